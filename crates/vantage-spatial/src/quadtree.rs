//! The quadtree spatial index (spec.md §4.2).
//!
//! Grounded on `dt_spatial::network::RoadNetwork`'s builder/query split
//! (an immutable structure assembled once, then queried many times) and on
//! the generic quadtree shape recurring across `other_examples/` spatial
//! code (fixed per-node capacity, subdivide-on-overflow, half-open child
//! bounds). Unlike the teacher's R-tree-backed road network, the tree here
//! is rebuilt wholesale every tick rather than updated incrementally
//! (spec.md §4.2: "rebuild per tick, not incrementally updated") — there
//! is deliberately no `insert`/`remove` API; only [`Quadtree::build`].

use vantage_core::{EntityId, Point, Rect};

/// Per-instance quadtree tuning, carried from [`vantage_core::EngineConfig`]
/// rather than duplicated as crate-local constants.
#[derive(Copy, Clone, Debug)]
pub struct QuadtreeConfig {
    /// Node capacity before a leaf subdivides (spec.md §4.2).
    pub capacity: usize,
    /// Maximum subdivision depth — caps recursion when many entities share
    /// a point (spec.md §4.2 edge case: "at max depth, all entities are
    /// kept in the leaf regardless of capacity").
    pub max_depth: u32,
}

struct Node {
    bounds: Rect,
    depth: u32,
    entries: Vec<(EntityId, Point)>,
    children: Option<Box<[Node; 4]>>,
}

impl Node {
    fn leaf(bounds: Rect, depth: u32) -> Self {
        Self { bounds, depth, entries: Vec::new(), children: None }
    }

    fn insert(&mut self, config: &QuadtreeConfig, id: EntityId, pos: Point) {
        if let Some(children) = &mut self.children {
            let idx = Self::quadrant_index(&self.bounds, pos);
            children[idx].insert(config, id, pos);
            return;
        }

        self.entries.push((id, pos));

        if self.entries.len() > config.capacity && self.depth < config.max_depth {
            self.subdivide(config);
        }
    }

    fn subdivide(&mut self, config: &QuadtreeConfig) {
        let quads = self.bounds.subdivide();
        let mut children: [Node; 4] = [
            Node::leaf(quads[0], self.depth + 1),
            Node::leaf(quads[1], self.depth + 1),
            Node::leaf(quads[2], self.depth + 1),
            Node::leaf(quads[3], self.depth + 1),
        ];

        for (id, pos) in self.entries.drain(..) {
            let idx = Self::quadrant_index(&self.bounds, pos);
            children[idx].insert(config, id, pos);
        }

        self.children = Some(Box::new(children));
    }

    /// Fixed NW(0), NE(1), SW(2), SE(3) quadrant order, matching
    /// [`Rect::subdivide`]'s output order.
    fn quadrant_index(bounds: &Rect, pos: Point) -> usize {
        let mid_x = bounds.min_x + bounds.width() * 0.5;
        let mid_y = bounds.min_y + bounds.height() * 0.5;
        match (pos.x >= mid_x, pos.y >= mid_y) {
            (false, true) => 0,  // NW
            (true, true) => 1,   // NE
            (false, false) => 2, // SW
            (true, false) => 3,  // SE
        }
    }

    fn query_circle(&self, center: Point, radius: f64, out: &mut Vec<EntityId>) {
        if !self.bounds.intersects_circle(center, radius) {
            return;
        }

        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query_circle(center, radius, out);
            }
            return;
        }

        let radius_sq = radius * radius;
        for (id, pos) in &self.entries {
            if pos.distance_sq(center) <= radius_sq {
                out.push(*id);
            }
        }
    }

    fn query_rect(&self, rect: Rect, out: &mut Vec<EntityId>) {
        if !Self::rects_intersect(&self.bounds, &rect) {
            return;
        }

        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query_rect(rect, out);
            }
            return;
        }

        for (id, pos) in &self.entries {
            if rect.contains_closed(*pos) {
                out.push(*id);
            }
        }
    }

    fn rects_intersect(a: &Rect, b: &Rect) -> bool {
        a.min_x <= b.max_x && a.max_x >= b.min_x && a.min_y <= b.max_y && a.max_y >= b.min_y
    }

    fn len(&self) -> usize {
        match &self.children {
            Some(children) => children.iter().map(Node::len).sum(),
            None => self.entries.len(),
        }
    }
}

/// An immutable, fully-built quadtree over one tick's entity positions.
///
/// Built fresh every tick from the current position snapshot
/// ([`Quadtree::build`]); queried read-only afterward via
/// [`Quadtree::query_circle`]. Entities outside `bounds` are clamped to the
/// boundary before insertion rather than rejected, since
/// `vantage-mobility` already enforces the world-bounds invariant and a
/// strict rejection here would just turn a logic bug into a panic.
pub struct Quadtree {
    root: Node,
    bounds: Rect,
}

impl Quadtree {
    /// Build a new tree over `entries` (entity id + current position
    /// pairs) within `bounds`, using `config` for capacity/depth tuning.
    pub fn build(
        bounds: Rect,
        config: QuadtreeConfig,
        entries: impl IntoIterator<Item = (EntityId, Point)>,
    ) -> Self {
        let mut root = Node::leaf(bounds, 0);
        for (id, pos) in entries {
            let clamped = bounds.clamp_point(pos);
            root.insert(&config, id, clamped);
        }
        Self { root, bounds }
    }

    /// The world bounds this tree was built over.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// All entity ids whose position lies within `radius` of `center`
    /// (closed disk, spec.md §4.2: "all entities whose stored position
    /// lies within the query radius, inclusive of the boundary").
    pub fn query_circle(&self, center: Point, radius: f64) -> Vec<EntityId> {
        let mut out = Vec::new();
        self.root.query_circle(center, radius, &mut out);
        out
    }

    /// All entity ids whose position lies within `rect` (closed on every
    /// edge, spec.md §4.2's `queryRect`). Used for the spatial-index
    /// round-trip property (spec.md §8 property 4): `queryRect(worldBounds)`
    /// must return exactly the set of entities the tree was built from.
    pub fn query_rect(&self, rect: Rect) -> Vec<EntityId> {
        let mut out = Vec::new();
        self.root.query_rect(rect, &mut out);
        out
    }

    /// Total number of entries held by the tree.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
