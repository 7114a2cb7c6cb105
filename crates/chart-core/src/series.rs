// File: crates/chart-core/src/series.rs
// Summary: Render-ready output model: padded surface grids, scatter lists and candlestick series.
// Notes:
// - These are plain data handed to an external chart renderer; nothing here draws.
// - `None` cells serialize as JSON null and render as gaps.

use serde::Serialize;

/// One aggregated block before grid assembly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCell {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Rectangular surface: `x[r][c]`, `y[r][c]`, `z[r][c]` describe the same cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RenderGrid {
    pub x: Vec<Vec<f64>>,
    pub y: Vec<Vec<f64>>,
    pub z: Vec<Vec<Option<f64>>>,
    /// Every non-null cell, row by row.
    pub scatter: Vec<ScatterPoint>,
}

impl RenderGrid {
    /// Assemble rows of cells into a rectangle. Short rows are padded up to the
    /// widest row by repeating their last coordinate with a null z. Returns
    /// None when there is no row or no column to show.
    pub fn from_rows(rows: Vec<Vec<GridCell>>) -> Option<Self> {
        let rows: Vec<Vec<GridCell>> = rows.into_iter().filter(|r| !r.is_empty()).collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if rows.is_empty() || width == 0 {
            return None;
        }

        let mut grid = RenderGrid {
            x: Vec::with_capacity(rows.len()),
            y: Vec::with_capacity(rows.len()),
            z: Vec::with_capacity(rows.len()),
            scatter: Vec::new(),
        };
        for row in rows {
            let last = row[row.len() - 1];
            let mut xs = Vec::with_capacity(width);
            let mut ys = Vec::with_capacity(width);
            let mut zs = Vec::with_capacity(width);
            for cell in &row {
                xs.push(cell.x);
                ys.push(cell.y);
                zs.push(cell.z);
                if let Some(z) = cell.z {
                    grid.scatter.push(ScatterPoint { x: cell.x, y: cell.y, z });
                }
            }
            xs.resize(width, last.x);
            ys.resize(width, last.y);
            zs.resize(width, None);
            grid.x.push(xs);
            grid.y.push(ys);
            grid.z.push(zs);
        }
        Some(grid)
    }

    pub fn rows(&self) -> usize { self.z.len() }

    pub fn cols(&self) -> usize { self.z.first().map_or(0, Vec::len) }
}

/// Disjoint 3D segments packed into one trace; `None` separates segments.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SegmentSeries {
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    pub z: Vec<Option<f64>>,
}

impl SegmentSeries {
    /// Append a vertical segment at (x, y) from `z0` to `z1`, then a separator.
    pub fn push_vertical(&mut self, x: f64, y: f64, z0: f64, z1: f64) {
        self.x.extend([Some(x), Some(x), None]);
        self.y.extend([Some(y), Some(y), None]);
        self.z.extend([Some(z0), Some(z1), None]);
    }

    pub fn segment_count(&self) -> usize { self.x.len() / 3 }
}

/// Candlestick rendering: low-high wicks plus open and close markers.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CandleSeries {
    pub wicks: SegmentSeries,
    pub open: Vec<ScatterPoint>,
    pub close: Vec<ScatterPoint>,
}

impl CandleSeries {
    pub fn len(&self) -> usize { self.open.len() }

    pub fn is_empty(&self) -> bool { self.open.is_empty() }
}

/// Result of one window rebuild.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WindowOutput {
    /// Nothing in range; the renderer clears the plot.
    Empty,
    Grid(RenderGrid),
    Candles(CandleSeries),
}

impl WindowOutput {
    pub fn is_empty(&self) -> bool { matches!(self, WindowOutput::Empty) }

    /// Same string as the serialized `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            WindowOutput::Empty => "empty",
            WindowOutput::Grid(_) => "grid",
            WindowOutput::Candles(_) => "candles",
        }
    }
}
