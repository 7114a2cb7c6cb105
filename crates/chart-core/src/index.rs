// File: crates/chart-core/src/index.rs
// Summary: (x, y) -> z lookup over a filtered point set.

use std::collections::HashMap;

use crate::types::{DataPoint, ResolvedTriple};

/// Hash key for a literal coordinate pair. Only the zero sign is folded so
/// that `-0.0` and `0.0` land on the same cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct CoordKey(u64, u64);

impl CoordKey {
    #[inline]
    fn new(x: f64, y: f64) -> Self { Self((x + 0.0).to_bits(), (y + 0.0).to_bits()) }
}

/// Built fresh from each filtered set. Duplicate pairs: the last point wins.
#[derive(Clone, Debug, Default)]
pub struct PointIndex {
    cells: HashMap<CoordKey, f64>,
}

impl PointIndex {
    /// Index `points` by their (x, y) coordinates on `axes`.
    pub fn build<'a, I>(points: I, axes: ResolvedTriple) -> Self
    where
        I: IntoIterator<Item = &'a DataPoint>,
    {
        let iter = points.into_iter();
        let mut cells = HashMap::with_capacity(iter.size_hint().0);
        for p in iter {
            cells.insert(CoordKey::new(p.value(axes.x), p.value(axes.y)), p.value(axes.z));
        }
        Self { cells }
    }

    /// z at the exact coordinate pair, if any point landed there.
    #[inline]
    pub fn lookup(&self, x: f64, y: f64) -> Option<f64> {
        self.cells.get(&CoordKey::new(x, y)).copied()
    }

    /// Distinct coordinate pairs.
    pub fn len(&self) -> usize { self.cells.len() }

    pub fn is_empty(&self) -> bool { self.cells.is_empty() }
}
