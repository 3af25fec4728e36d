//! Core types shared across the neurospace workspace.

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use std::hash::Hash;
use std::ops::{Index, IndexMut};

mod arena;

pub use arena::{NeuronArena, PlacedNeuron};

/// Number of axes in simulation space. Points, cells and grid configs all share it.
pub const DIMENSIONS: usize = 16;

new_key_type! {
    /// Stable handle for neurons backed by a generational slot map.
    pub struct NeuronId;
}

/// Location of a neuron in the continuous 16-dimensional simulation space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Point([f64; DIMENSIONS]);

impl Point {
    /// The point with every coordinate at zero.
    pub const ORIGIN: Self = Self([0.0; DIMENSIONS]);

    /// Construct a point from a full coordinate array.
    #[must_use]
    pub const fn new(axes: [f64; DIMENSIONS]) -> Self {
        Self(axes)
    }

    /// Construct a point from its leading coordinates; remaining axes are zero.
    ///
    /// Values past the sixteenth are ignored.
    #[must_use]
    pub fn from_prefix(prefix: &[f64]) -> Self {
        let mut axes = [0.0; DIMENSIONS];
        for (slot, value) in axes.iter_mut().zip(prefix) {
            *slot = *value;
        }
        Self(axes)
    }

    /// Borrow the raw coordinates.
    #[must_use]
    pub const fn axes(&self) -> &[f64; DIMENSIONS] {
        &self.0
    }

    /// Mutably borrow the raw coordinates.
    pub fn axes_mut(&mut self) -> &mut [f64; DIMENSIONS] {
        &mut self.0
    }

    /// Squared distance from the origin.
    #[must_use]
    pub fn norm_squared(&self) -> f64 {
        self.0.iter().map(|v| v * v).sum()
    }

    /// Returns true when every axis lies within `epsilon` of zero.
    #[must_use]
    pub fn is_origin(&self, epsilon: f64) -> bool {
        self.0.iter().all(|v| v.abs() <= epsilon)
    }

    /// Multiply every axis by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self(self.0.map(|v| v * factor))
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<[f64; DIMENSIONS]> for Point {
    fn from(axes: [f64; DIMENSIONS]) -> Self {
        Self(axes)
    }
}

impl Index<usize> for Point {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        &self.0[axis]
    }
}

impl IndexMut<usize> for Point {
    fn index_mut(&mut self, axis: usize) -> &mut f64 {
        &mut self.0[axis]
    }
}

/// Discretised cell coordinates: one signed index per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct CellId(pub [i64; DIMENSIONS]);

impl CellId {
    /// Cell containing the origin when the grid has no offset.
    pub const ZERO: Self = Self([0; DIMENSIONS]);

    /// Construct a cell id from its leading indices; remaining axes are zero.
    #[must_use]
    pub fn from_prefix(prefix: &[i64]) -> Self {
        let mut axes = [0; DIMENSIONS];
        for (slot, value) in axes.iter_mut().zip(prefix) {
            *slot = *value;
        }
        Self(axes)
    }
}

impl Index<usize> for CellId {
    type Output = i64;

    fn index(&self, axis: usize) -> &i64 {
        &self.0[axis]
    }
}

/// Anything the spatial index can bucket: a stable identifier plus a current position.
///
/// The index stores only `Id` values and never takes ownership of the entity.
pub trait Locatable {
    /// Identifier recorded in index buckets.
    type Id: Copy + Eq + Hash;

    /// Stable identifier of this entity.
    fn id(&self) -> Self::Id;

    /// Current location of this entity.
    fn position(&self) -> &Point;
}

impl<T: Locatable + ?Sized> Locatable for &T {
    type Id = T::Id;

    fn id(&self) -> Self::Id {
        (**self).id()
    }

    fn position(&self) -> &Point {
        (**self).position()
    }
}
