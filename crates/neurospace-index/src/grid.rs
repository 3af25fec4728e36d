//! Uniform hypercubic grid bucketing neuron ids by cell.

use std::collections::HashMap;
use std::hash::Hash;

use neurospace_core::{CellId, DIMENSIONS, Locatable, NeuronId, Point};
use tracing::{debug, trace};

use crate::{CellSpan, GridConfig, IndexError, NeighborhoodIndex};

/// Uniform grid index mapping cells to the ids of the entities inside them.
///
/// The grid reflects positions as of the last [`build`](Self::build) or
/// [`add_neuron`](Self::add_neuron); it is never told when an entity moves, so entries go
/// stale until the caller rebuilds. Relying only on incremental adds across steps leaves
/// moved entities in their old cells.
#[derive(Debug, Clone)]
pub struct UniformGridIndex<K = NeuronId> {
    config: GridConfig,
    buckets: HashMap<CellId, Vec<K>>,
}

impl<K> Default for UniformGridIndex<K> {
    fn default() -> Self {
        Self {
            config: GridConfig::default(),
            buckets: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> UniformGridIndex<K> {
    /// Create an empty grid, validating `config`.
    pub fn new(config: GridConfig) -> Result<Self, IndexError> {
        config.validate()?;
        debug!(
            cell_size = config.cell_size,
            dimensions = config.dimensions,
            "created uniform grid index"
        );
        Ok(Self {
            config,
            buckets: HashMap::new(),
        })
    }

    /// Create an empty grid from loose parameters.
    pub fn with_params(
        cell_size: f64,
        dimensions: usize,
        origin: Point,
    ) -> Result<Self, IndexError> {
        Self::new(GridConfig::new(cell_size, dimensions, origin))
    }

    /// Configuration the grid was built with.
    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    fn axis_cell(&self, value: f64, axis: usize) -> i64 {
        ((value - self.config.origin[axis]) / self.config.cell_size).floor() as i64
    }

    /// Cell containing `point`: `floor((point - origin) / cell_size)` on every axis.
    #[must_use]
    pub fn cell_id(&self, point: &Point) -> CellId {
        let mut cell = [0i64; DIMENSIONS];
        for (axis, slot) in cell.iter_mut().enumerate() {
            *slot = self.axis_cell(point[axis], axis);
        }
        CellId(cell)
    }

    /// Append `entity` to the bucket of its current cell.
    pub fn add_neuron<E>(&mut self, entity: &E)
    where
        E: Locatable<Id = K> + ?Sized,
    {
        let cell = self.cell_id(entity.position());
        self.buckets.entry(cell).or_default().push(entity.id());
    }

    /// Drop every entry, then index each entity in `entities`.
    pub fn build<I>(&mut self, entities: I)
    where
        I: IntoIterator,
        I::Item: Locatable<Id = K>,
    {
        self.buckets.clear();
        let mut count = 0usize;
        for entity in entities {
            self.add_neuron(&entity);
            count += 1;
        }
        debug!(
            entities = count,
            occupied_cells = self.buckets.len(),
            "rebuilt uniform grid index"
        );
    }

    /// Remove every entry while keeping the configuration.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Remove `id` from the bucket `last_known` maps to.
    ///
    /// Returns false when `id` is not in that bucket. This is an extension on top of
    /// build/add; neither of those consults it.
    pub fn remove(&mut self, id: K, last_known: &Point) -> bool {
        let cell = self.cell_id(last_known);
        let Some(bucket) = self.buckets.get_mut(&cell) else {
            return false;
        };
        let Some(slot) = bucket.iter().position(|entry| *entry == id) else {
            return false;
        };
        bucket.remove(slot);
        if bucket.is_empty() {
            self.buckets.remove(&cell);
        }
        true
    }

    /// Move `id` from the bucket of `from` to the bucket of `to`.
    ///
    /// Nothing is inserted when `id` was not found at `from`.
    pub fn relocate(&mut self, id: K, from: &Point, to: &Point) -> bool {
        if !self.remove(id, from) {
            return false;
        }
        let cell = self.cell_id(to);
        self.buckets.entry(cell).or_default().push(id);
        true
    }

    /// Per-axis cell ranges covering the bounding box of the sphere at `center`.
    ///
    /// Returns `None` for a negative (or NaN) radius.
    #[must_use]
    pub fn cell_span(&self, center: &Point, radius: f64) -> Option<CellSpan> {
        if radius.is_nan() || radius < 0.0 {
            return None;
        }
        let mut min = [0i64; DIMENSIONS];
        let mut max = [0i64; DIMENSIONS];
        for axis in 0..DIMENSIONS {
            min[axis] = self.axis_cell(center[axis] - radius, axis);
            max[axis] = self.axis_cell(center[axis] + radius, axis);
        }
        Some(CellSpan::new(CellId(min), CellId(max)))
    }

    /// Ids of every entity in a cell touched by the bounding box of the sphere.
    ///
    /// The result is a superset of the entities within `radius`; no distance filtering is
    /// applied. A negative radius yields nothing.
    #[must_use]
    pub fn query_sphere_for_candidates(&self, center: &Point, radius: f64) -> Vec<K> {
        let mut candidates = Vec::new();
        self.for_each_candidate(center, radius, |id| candidates.push(id));
        candidates
    }

    fn for_each_candidate(&self, center: &Point, radius: f64, mut visit: impl FnMut(K)) {
        let Some(span) = self.cell_span(center, radius) else {
            return;
        };
        let span_cells = span.cell_count();
        if span_cells == 0 || self.buckets.is_empty() {
            return;
        }

        // Walking more cells than exist is wasted work; scan the occupied ones instead and
        // emit them in the same order the odometer would.
        if span_cells > self.buckets.len() as u128 {
            let mut cells: Vec<&CellId> = self
                .buckets
                .keys()
                .filter(|cell| span.contains(cell))
                .collect();
            cells.sort_unstable_by(|a, b| a.0.iter().rev().cmp(b.0.iter().rev()));
            trace!(span_cells, visited = cells.len(), "scanned occupied cells");
            for cell in cells {
                self.bucket(cell).iter().copied().for_each(&mut visit);
            }
            return;
        }

        trace!(span_cells, "enumerating cell span");
        for cell in span.cells() {
            if let Some(bucket) = self.buckets.get(&cell) {
                bucket.iter().copied().for_each(&mut visit);
            }
        }
    }

    /// Entities recorded in `cell`, in insertion order.
    #[must_use]
    pub fn bucket(&self, cell: &CellId) -> &[K] {
        self.buckets.get(cell).map_or(&[][..], Vec::as_slice)
    }

    /// Number of cells holding at least one entity.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Returns true when nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl<K: Copy + Eq + Hash> NeighborhoodIndex for UniformGridIndex<K> {
    type Id = K;

    fn rebuild<I>(&mut self, entities: I)
    where
        I: IntoIterator,
        I::Item: Locatable<Id = K>,
    {
        self.build(entities);
    }

    fn insert<E: Locatable<Id = K>>(&mut self, entity: &E) {
        self.add_neuron(entity);
    }

    fn visit_candidates(&self, center: &Point, radius: f64, visitor: &mut dyn FnMut(K)) {
        self.for_each_candidate(center, radius, visitor);
    }
}
