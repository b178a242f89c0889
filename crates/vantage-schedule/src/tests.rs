//! Unit and property tests for vantage-schedule.

use proptest::prelude::*;
use vantage_authority::MovementIntent;
use vantage_core::{EntityId, Point};

use crate::intent_buffer::IntentBuffer;

fn intent(entity: EntityId, sequence: u64) -> MovementIntent {
    MovementIntent { entity, sequence, delta: Point::new(1.0, 0.0), client_timestamp: 0 }
}

#[test]
fn new_buffer_is_empty() {
    let buffer = IntentBuffer::new();
    assert!(buffer.is_empty());
    assert_eq!(buffer.len(), 0);
}

#[test]
fn push_increments_len_and_drain_empties_it() {
    let mut buffer = IntentBuffer::new();
    buffer.push(intent(EntityId(1), 1));
    buffer.push(intent(EntityId(1), 2));
    buffer.push(intent(EntityId(2), 1));
    assert_eq!(buffer.len(), 3);

    let drained = buffer.drain_all();
    assert_eq!(drained.len(), 2); // two distinct entities
    assert!(buffer.is_empty());
}

#[test]
fn drain_groups_by_entity_and_sorts_ascending_by_sequence() {
    let mut buffer = IntentBuffer::new();
    let e = EntityId(7);
    buffer.push(intent(e, 3));
    buffer.push(intent(e, 1));
    buffer.push(intent(e, 2));

    let drained = buffer.drain_all();
    let sequences: Vec<u64> = drained[&e].iter().map(|i| i.sequence).collect();
    assert_eq!(sequences, vec![1, 2, 3]);
}

#[test]
fn drain_does_not_mix_intents_across_entities() {
    let mut buffer = IntentBuffer::new();
    let a = EntityId(1);
    let b = EntityId(2);
    buffer.push(intent(a, 5));
    buffer.push(intent(b, 1));

    let drained = buffer.drain_all();
    assert_eq!(drained[&a].len(), 1);
    assert_eq!(drained[&b].len(), 1);
    assert_eq!(drained[&a][0].sequence, 5);
    assert_eq!(drained[&b][0].sequence, 1);
}

proptest! {
    /// However the intents are pushed, draining always yields each
    /// entity's own intents in non-decreasing sequence order.
    #[test]
    fn drained_sequences_are_always_sorted(
        sequences in prop::collection::vec(0u64..1000, 1..20),
    ) {
        let mut buffer = IntentBuffer::new();
        let entity = EntityId(1);
        for &seq in &sequences {
            buffer.push(intent(entity, seq));
        }

        let drained = buffer.drain_all();
        let got: Vec<u64> = drained.get(&entity).map(|v| v.iter().map(|i| i.sequence).collect()).unwrap_or_default();
        let mut expected = sequences.clone();
        expected.sort_unstable();
        prop_assert_eq!(got, expected);
    }
}
