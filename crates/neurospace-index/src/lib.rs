//! Spatial indexing abstractions for neuron neighborhood queries.

use neurospace_core::{DIMENSIONS, Locatable, Point};
use serde::{Deserialize, Serialize};
use std::hash::Hash;
use thiserror::Error;

mod grid;
mod span;

pub use grid::UniformGridIndex;
pub use span::{CellIter, CellSpan};

/// Smallest cell size accepted by [`GridConfig::validate`].
pub const MIN_CELL_SIZE: f64 = 1e-9;

/// Errors emitted by spatial index implementations.
#[derive(Debug, Error, PartialEq)]
pub enum IndexError {
    /// Cell size is zero, negative, NaN or too small to discretise with.
    #[error("cell_size {cell_size} must be greater than 1e-9")]
    InvalidCellSize { cell_size: f64 },
    #[error("dimension count must be positive")]
    ZeroDimensions,
    #[error("grid dimension {actual} does not match point dimension {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Static configuration for a uniform grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Edge length of each hypercubic cell.
    pub cell_size: f64,
    /// Number of axes; must equal [`DIMENSIONS`].
    pub dimensions: usize,
    /// Offset subtracted from positions before discretising.
    pub origin: Point,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 10.0,
            dimensions: DIMENSIONS,
            origin: Point::ORIGIN,
        }
    }
}

impl GridConfig {
    /// Construct a configuration without validating it.
    #[must_use]
    pub const fn new(cell_size: f64, dimensions: usize, origin: Point) -> Self {
        Self {
            cell_size,
            dimensions,
            origin,
        }
    }

    /// Reject configurations a grid cannot be built from.
    pub fn validate(&self) -> Result<(), IndexError> {
        if self.cell_size.is_nan() || self.cell_size <= MIN_CELL_SIZE {
            return Err(IndexError::InvalidCellSize {
                cell_size: self.cell_size,
            });
        }
        if self.dimensions == 0 {
            return Err(IndexError::ZeroDimensions);
        }
        if self.dimensions != DIMENSIONS {
            return Err(IndexError::DimensionMismatch {
                expected: DIMENSIONS,
                actual: self.dimensions,
            });
        }
        Ok(())
    }
}

/// Common behaviour exposed by neighborhood indices.
pub trait NeighborhoodIndex {
    /// Identifier stored for each indexed entity.
    type Id: Copy + Eq + Hash;

    /// Replace the indexed contents with `entities`.
    fn rebuild<I>(&mut self, entities: I)
    where
        I: IntoIterator,
        I::Item: Locatable<Id = Self::Id>;

    /// Index one more entity without disturbing existing entries.
    fn insert<E: Locatable<Id = Self::Id>>(&mut self, entity: &E);

    /// Visit every candidate that may lie within `radius` of `center`.
    ///
    /// Candidates are a superset of the true neighbors; callers filter by exact distance.
    fn visit_candidates(&self, center: &Point, radius: f64, visitor: &mut dyn FnMut(Self::Id));
}
