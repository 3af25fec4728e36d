use neurospace_core::{NeuronArena, NeuronId, Point};
use neurospace_geometry::{euclidean_distance, is_within_radius};
use neurospace_index::{NeighborhoodIndex, UniformGridIndex};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A neuron found within a query radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub id: NeuronId,
    pub distance: f64,
}

/// Re-index every neuron in `arena` at its current position.
pub fn rebuild_index(index: &mut UniformGridIndex, arena: &NeuronArena) {
    index.build(arena.iter());
}

/// Neurons whose current position lies within `radius` of `center`, nearest first.
///
/// Candidates come from `index` and are checked against positions held by `arena`. Neurons that
/// moved since the last rebuild are only found if their old cell is still inside the query box,
/// and ids the arena no longer holds are skipped.
#[must_use]
pub fn neighbors_within(
    index: &UniformGridIndex,
    arena: &NeuronArena,
    center: &Point,
    radius: f64,
) -> Vec<Neighbor> {
    let mut hits = Vec::new();
    let mut missing = 0usize;
    index.visit_candidates(center, radius, &mut |id| {
        let Some(position) = arena.position(id) else {
            missing += 1;
            return;
        };
        if is_within_radius(center, position, radius) {
            hits.push(Neighbor {
                id,
                distance: euclidean_distance(center, position),
            });
        }
    });
    if missing > 0 {
        debug!(missing, "skipped index entries with no live neuron");
    }
    // Stable, so equidistant neurons keep candidate order.
    hits.sort_by_key(|hit| OrderedFloat(hit.distance));
    hits
}
