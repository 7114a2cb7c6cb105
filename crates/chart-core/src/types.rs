// File: crates/chart-core/src/types.rs
// Summary: Shared data model: points, datasets, axis taxonomy and axis triples.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

/// Name prefix marking a parameter axis.
pub const PARAMETER_PREFIX: &str = "p_";
/// Name prefix marking a metric axis.
pub const METRIC_PREFIX: &str = "m_";

/// Opaque display record carried alongside a point. Never inspected by the core.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Position of an axis inside a dataset's dimension list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisId(usize);

impl AxisId {
    pub const fn index(self) -> usize { self.0 }
}

/// Role of an axis, derived from its name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    Time,
    Parameter,
    Metric,
}

impl AxisKind {
    /// `p_*` is a parameter, `m_*` a metric, anything else is a time axis candidate.
    pub fn classify(name: &str) -> Self {
        if name.starts_with(PARAMETER_PREFIX) {
            AxisKind::Parameter
        } else if name.starts_with(METRIC_PREFIX) {
            AxisKind::Metric
        } else {
            AxisKind::Time
        }
    }
}

/// One record: a numeric value per dataset dimension, plus the display payload.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    values: Vec<f64>,
    payload: Option<Arc<Payload>>,
}

impl DataPoint {
    /// Values in dataset dimension order.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, payload: None }
    }

    /// Attach the display record carried alongside the values.
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(Arc::new(payload));
        self
    }

    /// Value on `axis`. Points inside a `Dataset` always have one value per
    /// dimension; a loose point read past its end gives NaN.
    #[inline]
    pub fn value(&self, axis: AxisId) -> f64 {
        self.values.get(axis.0).copied().unwrap_or(f64::NAN)
    }

    pub fn values(&self) -> &[f64] { &self.values }

    /// Display record, if the loader kept one.
    pub fn payload(&self) -> Option<&Payload> { self.payload.as_deref() }
}

/// Immutable point cloud with named dimensions and human-readable labels.
#[derive(Clone, Debug)]
pub struct Dataset {
    dimensions: Vec<String>,
    labels: HashMap<String, String>,
    points: Vec<DataPoint>,
}

impl Dataset {
    /// Contract: dimension names are unique and non-empty as a list; every
    /// point carries exactly one value per dimension.
    pub fn new(dimensions: Vec<String>, points: Vec<DataPoint>) -> Result<Self> {
        if dimensions.is_empty() {
            return Err(ChartError::EmptyDimensions);
        }
        for (i, name) in dimensions.iter().enumerate() {
            if dimensions[..i].contains(name) {
                return Err(ChartError::DuplicateAxis(name.clone()));
            }
        }
        for (index, p) in points.iter().enumerate() {
            if p.values.len() != dimensions.len() {
                return Err(ChartError::ArityMismatch {
                    index,
                    expected: dimensions.len(),
                    got: p.values.len(),
                });
            }
        }
        Ok(Self { dimensions, labels: HashMap::new(), points })
    }

    pub fn with_labels<I, K, V>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn dimensions(&self) -> &[String] { &self.dimensions }

    pub fn points(&self) -> &[DataPoint] { &self.points }

    pub fn len(&self) -> usize { self.points.len() }

    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    /// Label for `name`, falling back to the name itself.
    pub fn label<'a>(&'a self, name: &'a str) -> &'a str {
        self.labels.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn axis(&self, name: &str) -> Result<AxisId> {
        self.dimensions
            .iter()
            .position(|d| d == name)
            .map(AxisId)
            .ok_or_else(|| ChartError::UnknownAxis(name.to_string()))
    }

    pub fn axis_name(&self, axis: AxisId) -> &str { &self.dimensions[axis.0] }

    /// Min/max over the finite values of `axis`; None when it has none.
    pub fn axis_range(&self, axis: AxisId) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for p in &self.points {
            let v = p.value(axis);
            if v.is_finite() {
                lo = lo.min(v);
                hi = hi.max(v);
            }
        }
        if lo.is_finite() { Some((lo, hi)) } else { None }
    }
}

/// Ordered (x, y, z) axis selection identifying one chart.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisTriple {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl AxisTriple {
    pub fn new(x: impl Into<String>, y: impl Into<String>, z: impl Into<String>) -> Self {
        Self { x: x.into(), y: y.into(), z: z.into() }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.x == name || self.y == name || self.z == name
    }

    /// Look the three names up in `dataset`; they must be known and distinct.
    /// Map the three names to dataset axes.
    /// Contract: the names are pairwise distinct and present in `dataset`.
    pub fn resolve(&self, dataset: &Dataset) -> Result<ResolvedTriple> {
        if self.x == self.y || self.x == self.z {
            return Err(ChartError::RepeatedTripleAxis(self.x.clone()));
        }
        if self.y == self.z {
            return Err(ChartError::RepeatedTripleAxis(self.y.clone()));
        }
        Ok(ResolvedTriple {
            x: dataset.axis(&self.x)?,
            y: dataset.axis(&self.y)?,
            z: dataset.axis(&self.z)?,
        })
    }
}

impl fmt::Display for AxisTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Axis ids of a triple checked against one dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedTriple {
    pub x: AxisId,
    pub y: AxisId,
    pub z: AxisId,
}
