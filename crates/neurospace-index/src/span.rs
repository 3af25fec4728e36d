//! Axis-aligned blocks of cells and their odometer enumeration.

use neurospace_core::{CellId, DIMENSIONS};
use serde::{Deserialize, Serialize};

/// Inclusive per-axis range of cell indices: `min[i]..=max[i]` on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellSpan {
    pub min: CellId,
    pub max: CellId,
}

impl CellSpan {
    /// Construct a span from its corner cells.
    #[must_use]
    pub const fn new(min: CellId, max: CellId) -> Self {
        Self { min, max }
    }

    /// Returns true when some axis has `min > max`, i.e. the span holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.0.iter().zip(&self.max.0).any(|(lo, hi)| lo > hi)
    }

    /// Number of cells in the span, saturating at `u128::MAX`.
    #[must_use]
    pub fn cell_count(&self) -> u128 {
        if self.is_empty() {
            return 0;
        }
        self.min
            .0
            .iter()
            .zip(&self.max.0)
            .map(|(lo, hi)| (i128::from(*hi) - i128::from(*lo) + 1) as u128)
            .fold(1u128, u128::saturating_mul)
    }

    /// Returns true when `cell` lies inside the span.
    #[must_use]
    pub fn contains(&self, cell: &CellId) -> bool {
        (0..DIMENSIONS).all(|axis| self.min[axis] <= cell[axis] && cell[axis] <= self.max[axis])
    }

    /// Enumerate every cell in the span without recursion.
    #[must_use]
    pub fn cells(&self) -> CellIter {
        CellIter {
            span: *self,
            next: (!self.is_empty()).then_some(self.min),
        }
    }
}

impl IntoIterator for CellSpan {
    type Item = CellId;
    type IntoIter = CellIter;

    fn into_iter(self) -> CellIter {
        self.cells()
    }
}

/// Mixed-radix counter over a [`CellSpan`]; axis 0 is the fastest-moving digit.
#[derive(Debug, Clone)]
pub struct CellIter {
    span: CellSpan,
    next: Option<CellId>,
}

impl CellIter {
    fn advance(&mut self, current: CellId) {
        let mut digits = current.0;
        for axis in 0..DIMENSIONS {
            if digits[axis] < self.span.max[axis] {
                digits[axis] += 1;
                self.next = Some(CellId(digits));
                return;
            }
            digits[axis] = self.span.min[axis];
        }
        self.next = None;
    }
}

impl Iterator for CellIter {
    type Item = CellId;

    fn next(&mut self) -> Option<CellId> {
        let current = self.next?;
        self.advance(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(min: &[i64], max: &[i64]) -> CellSpan {
        CellSpan::new(CellId::from_prefix(min), CellId::from_prefix(max))
    }

    #[test]
    fn single_cell_span() {
        let s = span(&[3, -1], &[3, -1]);
        assert_eq!(s.cell_count(), 1);
        let cells: Vec<_> = s.cells().collect();
        assert_eq!(cells, vec![CellId::from_prefix(&[3, -1])]);
    }

    #[test]
    fn odometer_rolls_axis_zero_first() {
        let s = span(&[0, 0], &[1, 2]);
        let cells: Vec<_> = s.cells().collect();
        assert_eq!(s.cell_count(), 6);
        assert_eq!(
            cells,
            vec![
                CellId::from_prefix(&[0, 0]),
                CellId::from_prefix(&[1, 0]),
                CellId::from_prefix(&[0, 1]),
                CellId::from_prefix(&[1, 1]),
                CellId::from_prefix(&[0, 2]),
                CellId::from_prefix(&[1, 2]),
            ]
        );
    }

    #[test]
    fn every_axis_contributes_to_the_count() {
        let s = CellSpan::new(CellId([-1; DIMENSIONS]), CellId([0; DIMENSIONS]));
        assert_eq!(s.cell_count(), 1 << DIMENSIONS);
        assert_eq!(s.cells().count(), 1 << DIMENSIONS);
        assert!(s.cells().all(|cell| s.contains(&cell)));
    }

    #[test]
    fn inverted_axis_is_empty() {
        let s = span(&[0, 5], &[4, 4]);
        assert!(s.is_empty());
        assert_eq!(s.cell_count(), 0);
        assert_eq!(s.cells().next(), None);
    }

    #[test]
    fn huge_spans_saturate() {
        let s = CellSpan::new(CellId([i64::MIN; DIMENSIONS]), CellId([i64::MAX; DIMENSIONS]));
        assert_eq!(s.cell_count(), u128::MAX);
    }

    #[test]
    fn contains_checks_every_axis() {
        let s = span(&[0, 0], &[2, 2]);
        assert!(s.contains(&CellId::from_prefix(&[2, 1])));
        assert!(!s.contains(&CellId::from_prefix(&[3, 1])));
        assert!(!s.contains(&CellId::from_prefix(&[1, 1, 1])));
    }
}
