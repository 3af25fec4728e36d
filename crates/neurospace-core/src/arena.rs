use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::{Locatable, NeuronId, Point};

/// A neuron handle paired with the position it had when it was read from the arena.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedNeuron {
    pub id: NeuronId,
    pub position: Point,
}

impl Locatable for PlacedNeuron {
    type Id = NeuronId;

    fn id(&self) -> NeuronId {
        self.id
    }

    fn position(&self) -> &Point {
        &self.position
    }
}

/// Generational store of neuron positions.
///
/// The arena owns neuron lifetime; spatial indices only hold the [`NeuronId`]s it hands out
/// and must be rebuilt after positions change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NeuronArena {
    positions: SlotMap<NeuronId, Point>,
}

impl NeuronArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            positions: SlotMap::with_key(),
        }
    }

    /// Create an arena with reserved capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Number of live neurons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true when no neurons are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Insert a neuron at `position`, returning its handle.
    pub fn insert(&mut self, position: Point) -> NeuronId {
        self.positions.insert(position)
    }

    /// Remove a neuron, returning its last position.
    pub fn remove(&mut self, id: NeuronId) -> Option<Point> {
        self.positions.remove(id)
    }

    /// Returns true if `id` refers to a live neuron.
    #[must_use]
    pub fn contains(&self, id: NeuronId) -> bool {
        self.positions.contains_key(id)
    }

    /// Current position of `id`, if present.
    #[must_use]
    pub fn position(&self, id: NeuronId) -> Option<&Point> {
        self.positions.get(id)
    }

    /// Move a neuron. Returns false when `id` is stale.
    pub fn set_position(&mut self, id: NeuronId, position: Point) -> bool {
        match self.positions.get_mut(id) {
            Some(slot) => {
                *slot = position;
                true
            }
            None => false,
        }
    }

    /// Iterate over live neurons with a snapshot of their positions.
    pub fn iter(&self) -> impl Iterator<Item = PlacedNeuron> + '_ {
        self.positions
            .iter()
            .map(|(id, position)| PlacedNeuron { id, position: *position })
    }
}
