// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; windowing, aggregation and zoom tiling for multi-axis charts.

pub mod aggregate;
pub mod chart;
pub mod combos;
pub mod error;
pub mod filter;
pub mod index;
pub mod series;
pub mod types;
pub mod window;
pub mod zoom;

pub use aggregate::{aggregate, aggregate_candlestick, Aggregation, Candle};
pub use chart::{ChartConfig, ChartSession, ControlEvent, Frame, Layer, Layers, WindowAxis, ZoomSnapshot};
pub use combos::{combinations, generate_triples};
pub use error::{ChartError, Result};
pub use filter::{filter, FilterEntry, FilterMode, FilterSpec};
pub use index::PointIndex;
pub use series::{CandleSeries, RenderGrid, ScatterPoint, WindowOutput};
pub use types::{AxisId, AxisKind, AxisTriple, DataPoint, Dataset, Payload};
pub use window::{build_window, WindowControl};
pub use zoom::{detect_zoom_level, visible_tiles, Bounds, Tile, TileLevel, TilePyramid};
