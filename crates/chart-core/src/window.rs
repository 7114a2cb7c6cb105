// File: crates/chart-core/src/window.rs
// Summary: Window control and the window/tile builder: slice distinct coordinates,
// split into compress x compress blocks, aggregate each block into a grid or candles.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{aggregate, aggregate_candlestick, Aggregation};
use crate::error::{ChartError, Result};
use crate::index::PointIndex;
use crate::series::{CandleSeries, GridCell, RenderGrid, ScatterPoint, WindowOutput};
use crate::types::{AxisId, DataPoint, ResolvedTriple};

/// Distinct coordinates shown per axis when a chart is first opened.
pub const DEFAULT_WINDOW_COUNT: usize = 100;

/// Visible range and block size along x and y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowControl {
    pub start_x: i64,
    pub count_x: usize,
    pub start_y: i64,
    pub count_y: usize,
    /// Distinct coordinates merged per cell along each axis. Contract: >= 1.
    pub compress: usize,
    pub aggregation: Aggregation,
}

impl Default for WindowControl {
    fn default() -> Self {
        Self {
            start_x: 0,
            count_x: DEFAULT_WINDOW_COUNT,
            start_y: 0,
            count_y: DEFAULT_WINDOW_COUNT,
            compress: 1,
            aggregation: Aggregation::Mean,
        }
    }
}

impl WindowControl {
    /// Contract: `compress >= 1`.
    pub fn validate(&self) -> Result<()> {
        if self.compress == 0 {
            return Err(ChartError::ZeroCompress);
        }
        Ok(())
    }
}

/// Sorted distinct finite values of `axis`.
pub fn distinct_sorted(points: &[&DataPoint], axis: AxisId) -> Vec<f64> {
    let mut values: Vec<f64> = points
        .iter()
        .map(|p| p.value(axis))
        .filter(|v| v.is_finite())
        .collect();
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

/// `count` consecutive values starting at the first value >= `start`.
/// When every value is below `start` the window starts at the beginning.
pub fn window_slice(values: &[f64], start: i64, count: usize) -> &[f64] {
    let from = values.iter().position(|&v| v >= start as f64).unwrap_or(0);
    let to = from.saturating_add(count).min(values.len());
    &values[from..to]
}

/// Label coordinate of a block: the element at `compress / 2`, or the block's
/// last element when the block is cut short by the window edge.
#[inline]
fn block_label(block: &[f64], compress: usize) -> f64 {
    block[(compress / 2).min(block.len() - 1)]
}

/// z samples of a block in traversal order: y outer, x inner.
fn gather(index: &PointIndex, xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let mut samples = Vec::with_capacity(xs.len() * ys.len());
    for &y in ys {
        for &x in xs {
            if let Some(z) = index.lookup(x, y).filter(|z| z.is_finite()) {
                samples.push(z);
            }
        }
    }
    samples
}

/// Rebuild the render payload for the filtered `points` from scratch.
pub fn build_window(
    points: &[&DataPoint],
    axes: ResolvedTriple,
    control: &WindowControl,
) -> Result<WindowOutput> {
    control.validate()?;

    let xs = distinct_sorted(points, axes.x);
    let ys = distinct_sorted(points, axes.y);
    let x_window = window_slice(&xs, control.start_x, control.count_x);
    let y_window = window_slice(&ys, control.start_y, control.count_y);
    if x_window.is_empty() || y_window.is_empty() {
        debug!(points = points.len(), "window has no coordinates");
        return Ok(WindowOutput::Empty);
    }

    let index = PointIndex::build(points.iter().copied(), axes);
    let c = control.compress;

    let output = if control.aggregation == Aggregation::Candlestick {
        let mut candles = CandleSeries::default();
        for y_block in y_window.chunks(c) {
            let cy = block_label(y_block, c);
            for x_block in x_window.chunks(c) {
                let cx = block_label(x_block, c);
                if let Some(k) = aggregate_candlestick(&gather(&index, x_block, y_block)) {
                    candles.wicks.push_vertical(cx, cy, k.l, k.h);
                    candles.open.push(ScatterPoint { x: cx, y: cy, z: k.o });
                    candles.close.push(ScatterPoint { x: cx, y: cy, z: k.c });
                }
            }
        }
        if candles.is_empty() { WindowOutput::Empty } else { WindowOutput::Candles(candles) }
    } else {
        let rows: Vec<Vec<GridCell>> = y_window
            .chunks(c)
            .map(|y_block| {
                let cy = block_label(y_block, c);
                x_window
                    .chunks(c)
                    .map(|x_block| GridCell {
                        x: block_label(x_block, c),
                        y: cy,
                        z: aggregate(&gather(&index, x_block, y_block), control.aggregation),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        RenderGrid::from_rows(rows).map_or(WindowOutput::Empty, WindowOutput::Grid)
    };

    debug!(
        x_window = x_window.len(),
        y_window = y_window.len(),
        compress = c,
        aggregation = %control.aggregation,
        output = output.kind(),
        "rebuilt window"
    );
    Ok(output)
}
