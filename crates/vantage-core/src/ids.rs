//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and
//! sorted collection elements without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer, with a
/// caller-chosen sentinel value.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) { sentinel: $sentinel:expr, sentinel_doc: $sentinel_doc:literal $(,)? }) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            #[doc = $sentinel_doc]
            pub const SENTINEL: $name = $name($sentinel);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// `true` if this is the sentinel value.
            #[inline(always)]
            pub fn is_sentinel(self) -> bool {
                self == Self::SENTINEL
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::SENTINEL
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Stable identifier of a live entity.
    ///
    /// Assigned by a monotonic counter that skips zero (spec.md §3:
    /// "unsigned 32-bit, monotonically assigned"); ids are never reused
    /// even after the entity they named is removed.
    pub struct EntityId(u32) {
        sentinel: 0,
        sentinel_doc: "Reserved value meaning \"no entity\" / unbound (spec.md §3: zero reserved to mean \"unbound\").",
    }
}

typed_id! {
    /// Identifier of a live client connection.
    pub struct SessionId(u64) {
        sentinel: 0,
        sentinel_doc: "Reserved value meaning \"no session\" (NPC-like entities have no owning session).",
    }
}
