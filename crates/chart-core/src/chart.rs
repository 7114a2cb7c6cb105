// File: crates/chart-core/src/chart.rs
// Summary: Per-chart session: owned window/filter/view state, control-event dispatch and frame rebuild.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::aggregate::Aggregation;
use crate::error::{ChartError, Result};
use crate::filter::{filter, FilterEntry, FilterSpec};
use crate::series::WindowOutput;
use crate::types::{AxisTriple, DataPoint, Dataset, ResolvedTriple};
use crate::window::{build_window, WindowControl};
use crate::zoom::{detect_zoom_level, visible_tiles, Bounds, Tile, TilePyramid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowAxis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Surface,
    Scatter,
}

/// Show/hide toggles forwarded to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layers {
    pub surface: bool,
    pub scatter: bool,
}

impl Default for Layers {
    fn default() -> Self { Self { surface: true, scatter: true } }
}

/// One UI interaction, already mapped out of its widget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ControlEvent {
    SetWindow { axis: WindowAxis, start: i64, count: usize },
    SetCompress { compress: usize },
    SetAggregation { aggregation: Aggregation },
    SetFilter { axis: String, entry: FilterEntry },
    ClearFilter { axis: String },
    SetLayer { layer: Layer, visible: bool },
    Viewport { bounds: Bounds },
    ResetViewport,
}

/// Persistable description of one open chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub triple: AxisTriple,
    #[serde(default)]
    pub window: WindowControl,
    /// None means "use the slider defaults".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterSpec>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ZoomSnapshot {
    pub level: u8,
    pub tiles: Vec<Tile>,
}

/// Everything the renderer needs after one control change.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub triple: AxisTriple,
    /// Points surviving the filters.
    pub points: usize,
    pub output: WindowOutput,
    pub layers: Layers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<ZoomSnapshot>,
}

/// State owned by one open chart. Only the dataset is shared between sessions.
#[derive(Clone, Debug)]
pub struct ChartSession {
    dataset: Arc<Dataset>,
    triple: AxisTriple,
    axes: ResolvedTriple,
    window: WindowControl,
    filters: FilterSpec,
    layers: Layers,
    viewport: Option<Bounds>,
    pyramid: TilePyramid,
}

impl ChartSession {
    /// Open `triple` with default sliders and a window starting at each axis minimum.
    pub fn open(dataset: Arc<Dataset>, triple: AxisTriple) -> Result<Self> {
        let axes = triple.resolve(&dataset)?;
        let filters = FilterSpec::defaults_for(&dataset, &triple)?;
        let mut window = WindowControl::default();
        if let Some((lo, _)) = dataset.axis_range(axes.x) {
            window.start_x = lo.floor() as i64;
        }
        if let Some((lo, _)) = dataset.axis_range(axes.y) {
            window.start_y = lo.floor() as i64;
        }
        Self::assemble(dataset, triple, axes, window, filters)
    }

    /// Reopen a saved chart. Missing filters fall back to the defaults of `open`.
    pub fn from_config(dataset: Arc<Dataset>, config: ChartConfig) -> Result<Self> {
        let axes = config.triple.resolve(&dataset)?;
        config.window.validate()?;
        let filters = match config.filters {
            Some(f) => f,
            None => FilterSpec::defaults_for(&dataset, &config.triple)?,
        };
        for (name, _) in filters.iter() {
            check_filter_axis(&dataset, &config.triple, name)?;
        }
        Self::assemble(dataset, config.triple, axes, config.window, filters)
    }

    fn assemble(
        dataset: Arc<Dataset>,
        triple: AxisTriple,
        axes: ResolvedTriple,
        window: WindowControl,
        filters: FilterSpec,
    ) -> Result<Self> {
        let mut session = Self {
            dataset,
            triple,
            axes,
            window,
            filters,
            layers: Layers::default(),
            viewport: None,
            pyramid: TilePyramid::default(),
        };
        session.rebuild_tiles()?;
        Ok(session)
    }

    /// Snapshot of the current state, suitable for `from_config`.
    pub fn config(&self) -> ChartConfig {
        ChartConfig {
            triple: self.triple.clone(),
            window: self.window,
            filters: Some(self.filters.clone()),
        }
    }

    pub fn dataset(&self) -> &Dataset { &self.dataset }
    pub fn triple(&self) -> &AxisTriple { &self.triple }
    pub fn window(&self) -> &WindowControl { &self.window }
    pub fn filters(&self) -> &FilterSpec { &self.filters }
    pub fn layers(&self) -> Layers { self.layers }
    pub fn viewport(&self) -> Option<&Bounds> { self.viewport.as_ref() }
    pub fn pyramid(&self) -> &TilePyramid { &self.pyramid }

    /// Points passing the current sliders.
    pub fn filtered(&self) -> Result<Vec<&DataPoint>> {
        filter(&self.dataset, self.dataset.points(), &self.filters)
    }

    /// Apply one control change, then rebuild the frame from scratch.
    /// A rejected event leaves the session untouched.
    pub fn apply(&mut self, event: ControlEvent) -> Result<Frame> {
        trace!(?event, triple = %self.triple, "control event");
        match event {
            ControlEvent::SetWindow { axis: WindowAxis::X, start, count } => {
                self.window.start_x = start;
                self.window.count_x = count;
            }
            ControlEvent::SetWindow { axis: WindowAxis::Y, start, count } => {
                self.window.start_y = start;
                self.window.count_y = count;
            }
            ControlEvent::SetCompress { compress } => {
                if compress == 0 {
                    return Err(ChartError::ZeroCompress);
                }
                self.window.compress = compress;
            }
            ControlEvent::SetAggregation { aggregation } => self.window.aggregation = aggregation,
            ControlEvent::SetFilter { axis, entry } => {
                check_filter_axis(&self.dataset, &self.triple, &axis)?;
                self.filters.set(axis, entry);
                self.rebuild_tiles()?;
            }
            ControlEvent::ClearFilter { axis } => {
                if self.filters.remove(&axis).is_some() {
                    self.rebuild_tiles()?;
                }
            }
            ControlEvent::SetLayer { layer: Layer::Surface, visible } => self.layers.surface = visible,
            ControlEvent::SetLayer { layer: Layer::Scatter, visible } => self.layers.scatter = visible,
            ControlEvent::Viewport { bounds } => self.viewport = Some(bounds),
            ControlEvent::ResetViewport => self.viewport = None,
        }
        self.render()
    }

    /// Build the frame for the current state without changing it.
    pub fn render(&self) -> Result<Frame> {
        let points = self.filtered()?;
        let output = build_window(&points, self.axes, &self.window)?;
        let zoom = self.viewport.as_ref().map(|view| {
            let level = detect_zoom_level(Some(view), &self.pyramid);
            let tiles: Vec<Tile> = self
                .pyramid
                .level(level)
                .map(|l| visible_tiles(view, l).into_iter().cloned().collect())
                .unwrap_or_default();
            ZoomSnapshot { level, tiles }
        });
        Ok(Frame {
            triple: self.triple.clone(),
            points: points.len(),
            output,
            layers: self.layers,
            zoom,
        })
    }

    fn rebuild_tiles(&mut self) -> Result<()> {
        let points = filter(&self.dataset, self.dataset.points(), &self.filters)?;
        self.pyramid = TilePyramid::build(&points, self.axes);
        Ok(())
    }
}

fn check_filter_axis(dataset: &Dataset, triple: &AxisTriple, axis: &str) -> Result<()> {
    dataset.axis(axis)?;
    if triple.contains(axis) {
        return Err(ChartError::FilterOnPlottedAxis(axis.to_string()));
    }
    Ok(())
}
