// File: crates/chart-core/src/zoom.rs
// Summary: Zoom-to-level mapping and tile visibility culling over a precomputed tile pyramid.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{DataPoint, ResolvedTriple};

/// Most aggregated level.
pub const MIN_LEVEL: u8 = 1;
/// Most detailed level.
pub const MAX_LEVEL: u8 = 10;

/// Axis-aligned rectangle in data coordinates (viewport ranges or tile extents).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self { x_min, x_max, y_min, y_max }
    }

    /// Extent of the finite (x, y) coordinates of `points`.
    pub fn of_points(points: &[&DataPoint], axes: ResolvedTriple) -> Option<Self> {
        let mut b = Self::new(f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
        for p in points {
            let (x, y) = (p.value(axes.x), p.value(axes.y));
            if x.is_finite() && y.is_finite() {
                b.x_min = b.x_min.min(x);
                b.x_max = b.x_max.max(x);
                b.y_min = b.y_min.min(y);
                b.y_max = b.y_max.max(y);
            }
        }
        b.x_min.is_finite().then_some(b)
    }

    pub fn width(&self) -> f64 { (self.x_max - self.x_min).max(0.0) }

    pub fn height(&self) -> f64 { (self.y_max - self.y_min).max(0.0) }

    pub fn area(&self) -> f64 { self.width() * self.height() }

    /// Closed-rectangle overlap; touching edges count.
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(self.x_max < other.x_min
            || self.x_min > other.x_max
            || self.y_max < other.y_min
            || self.y_min > other.y_max)
    }

    /// Scale the rectangle about (cx, cy); `factor < 1` zooms in.
    pub fn zoom_about(&mut self, cx: f64, cy: f64, factor: f64) {
        let f = factor.clamp(1e-6, 1e6);
        self.x_min = cx - (cx - self.x_min) * f;
        self.x_max = cx + (self.x_max - cx) * f;
        self.y_min = cy - (cy - self.y_min) * f;
        self.y_max = cy + (self.y_max - cy) * f;
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.x_min += dx;
        self.x_max += dx;
        self.y_min += dy;
        self.y_max += dy;
    }
}

/// Spatial bucket of points at one level. Bounds may be absent in external metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub bounds: Option<Bounds>,
    pub count: usize,
    /// Mean of the finite z values inside the tile.
    pub mean: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileLevel {
    pub level: u8,
    pub tiles: Vec<Tile>,
}

/// Tiles for levels 1..=10 plus the data extent they were cut from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TilePyramid {
    pub bounds: Option<Bounds>,
    pub levels: Vec<TileLevel>,
}

impl TilePyramid {
    /// Level `n` splits the data extent into an `n x n` grid; empty tiles are skipped.
    pub fn build(points: &[&DataPoint], axes: ResolvedTriple) -> Self {
        let Some(extent) = Bounds::of_points(points, axes) else {
            return Self::default();
        };
        let levels = (MIN_LEVEL..=MAX_LEVEL)
            .map(|level| TileLevel { level, tiles: cut_tiles(points, axes, extent, level as usize) })
            .collect();
        Self { bounds: Some(extent), levels }
    }

    pub fn level(&self, level: u8) -> Option<&TileLevel> {
        self.levels.iter().find(|l| l.level == level)
    }

    pub fn is_empty(&self) -> bool { self.levels.is_empty() }
}

fn bucket(v: f64, lo: f64, step: f64, n: usize) -> usize {
    if step <= 0.0 {
        return 0;
    }
    (((v - lo) / step).floor() as usize).min(n - 1)
}

fn cut_tiles(points: &[&DataPoint], axes: ResolvedTriple, extent: Bounds, n: usize) -> Vec<Tile> {
    let wx = extent.width() / n as f64;
    let wy = extent.height() / n as f64;
    let mut counts = vec![0usize; n * n];
    let mut sums = vec![(0.0f64, 0usize); n * n];
    for p in points {
        let (x, y, z) = (p.value(axes.x), p.value(axes.y), p.value(axes.z));
        if !(x.is_finite() && y.is_finite()) {
            continue;
        }
        let cell = bucket(y, extent.y_min, wy, n) * n + bucket(x, extent.x_min, wx, n);
        counts[cell] += 1;
        if z.is_finite() {
            sums[cell].0 += z;
            sums[cell].1 += 1;
        }
    }

    let edge = |lo: f64, hi: f64, step: f64, i: usize| -> (f64, f64) {
        let a = lo + step * i as f64;
        let b = if i + 1 == n { hi } else { lo + step * (i + 1) as f64 };
        (a, b)
    };
    let mut tiles = Vec::new();
    for iy in 0..n {
        for ix in 0..n {
            let cell = iy * n + ix;
            if counts[cell] == 0 {
                continue;
            }
            let (x0, x1) = edge(extent.x_min, extent.x_max, wx, ix);
            let (y0, y1) = edge(extent.y_min, extent.y_max, wy, iy);
            let (sum, finite) = sums[cell];
            tiles.push(Tile {
                bounds: Some(Bounds::new(x0, x1, y0, y1)),
                count: counts[cell],
                mean: (finite > 0).then(|| sum / finite as f64),
            });
        }
    }
    tiles
}

/// Map a viewport to a detail level in 1..=10 from its share of the data area.
/// Missing viewport, missing extent or an empty pyramid give level 1.
pub fn detect_zoom_level(viewport: Option<&Bounds>, pyramid: &TilePyramid) -> u8 {
    let (Some(view), Some(total)) = (viewport, pyramid.bounds.as_ref()) else {
        return MIN_LEVEL;
    };
    let total_area = total.area();
    if pyramid.is_empty() || !total_area.is_finite() || total_area <= 0.0 {
        return MIN_LEVEL;
    }
    let ratio = (view.area() / total_area).min(1.0);
    let level = ((1.0 - ratio) * MAX_LEVEL as f64).ceil();
    if level.is_nan() {
        return MIN_LEVEL;
    }
    level.clamp(MIN_LEVEL as f64, MAX_LEVEL as f64) as u8
}

/// Tiles of `level` whose bounds overlap `viewport`. Tiles without bounds are
/// dropped with a warning.
pub fn visible_tiles<'a>(viewport: &Bounds, level: &'a TileLevel) -> Vec<&'a Tile> {
    level
        .tiles
        .iter()
        .enumerate()
        .filter_map(|(i, tile)| match &tile.bounds {
            Some(b) => b.intersects(viewport).then_some(tile),
            None => {
                warn!(level = level.level, tile = i, "tile has no bounds; skipping");
                None
            }
        })
        .collect()
}
