// File: crates/chart-core/src/filter.rs
// Summary: Slider-driven per-axis predicates (>=, <=, =) selecting the active working set.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};
use crate::types::{AxisId, AxisKind, AxisTriple, DataPoint, Dataset};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterMode {
    #[serde(rename = ">=")]
    AtLeast,
    #[serde(rename = "<=")]
    AtMost,
    /// Exact floating-point equality, no tolerance.
    #[serde(rename = "=")]
    Equal,
}

impl FilterMode {
    /// Metric sliders default to a lower bound; every other axis to a pinned value.
    pub fn default_for(kind: AxisKind) -> Self {
        match kind {
            AxisKind::Metric => FilterMode::AtLeast,
            AxisKind::Time | AxisKind::Parameter => FilterMode::Equal,
        }
    }

    #[inline]
    pub fn matches(self, value: f64, threshold: f64) -> bool {
        match self {
            FilterMode::AtLeast => value >= threshold,
            FilterMode::AtMost => value <= threshold,
            FilterMode::Equal => value == threshold,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::AtLeast => ">=",
            FilterMode::AtMost => "<=",
            FilterMode::Equal => "=",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for FilterMode {
    type Err = ChartError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            ">=" | "≥" => Ok(FilterMode::AtLeast),
            "<=" | "≤" => Ok(FilterMode::AtMost),
            "=" | "==" => Ok(FilterMode::Equal),
            other => Err(ChartError::UnknownFilterMode(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterEntry {
    pub value: f64,
    pub mode: FilterMode,
}

impl FilterEntry {
    pub const fn new(value: f64, mode: FilterMode) -> Self { Self { value, mode } }
}

/// Axis name -> slider threshold. Axes without an entry are unconstrained.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec {
    entries: BTreeMap<String, FilterEntry>,
}

impl FilterSpec {
    pub fn new() -> Self { Self::default() }

    /// One entry per dimension outside `triple`, at the axis minimum with the
    /// kind's default mode. Axes with no finite values get no entry.
    pub fn defaults_for(dataset: &Dataset, triple: &AxisTriple) -> Result<Self> {
        let mut spec = Self::new();
        for name in dataset.dimensions() {
            if triple.contains(name) {
                continue;
            }
            let axis = dataset.axis(name)?;
            if let Some((min, _)) = dataset.axis_range(axis) {
                let mode = FilterMode::default_for(AxisKind::classify(name));
                spec.set(name.clone(), FilterEntry::new(min, mode));
            }
        }
        Ok(spec)
    }

    /// Insert or replace the slider for `axis`.
    pub fn set(&mut self, axis: impl Into<String>, entry: FilterEntry) {
        self.entries.insert(axis.into(), entry);
    }

    /// Drop the slider for `axis`, leaving it unconstrained.
    pub fn remove(&mut self, axis: &str) -> Option<FilterEntry> { self.entries.remove(axis) }

    pub fn get(&self, axis: &str) -> Option<&FilterEntry> { self.entries.get(axis) }

    /// Entries in axis-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    fn resolve(&self, dataset: &Dataset) -> Result<Vec<(AxisId, FilterEntry)>> {
        self.entries
            .iter()
            .map(|(name, entry)| Ok((dataset.axis(name)?, *entry)))
            .collect()
    }
}

/// Keep the points satisfying every entry of `spec`. Unknown axis names are an error.
pub fn filter<'a, I>(dataset: &Dataset, points: I, spec: &FilterSpec) -> Result<Vec<&'a DataPoint>>
where
    I: IntoIterator<Item = &'a DataPoint>,
{
    let preds = spec.resolve(dataset)?;
    Ok(points
        .into_iter()
        .filter(|p| preds.iter().all(|(axis, e)| e.mode.matches(p.value(*axis), e.value)))
        .collect())
}
