//! Neighborhood queries over neurons positioned in 16-dimensional space.
//!
//! The grid in [`index`] narrows a query to candidate cells; [`neighbors_within`] resolves the
//! candidates against a [`NeuronArena`] and keeps the ones [`geometry`] places inside the radius.

pub use neurospace_core::*;
pub use neurospace_geometry as geometry;
pub use neurospace_index as index;

mod neighborhood;

pub use neighborhood::{Neighbor, neighbors_within, rebuild_index};
