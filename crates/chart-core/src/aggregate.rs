// File: crates/chart-core/src/aggregate.rs
// Summary: Block reducers (mean/min/max/median/first/last) and candlestick aggregation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// How the samples of one block collapse into a rendered cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Mean,
    Min,
    Max,
    Median,
    First,
    Last,
    Candlestick,
}

impl Aggregation {
    pub const ALL: [Aggregation; 7] = [
        Aggregation::Mean,
        Aggregation::Min,
        Aggregation::Max,
        Aggregation::Median,
        Aggregation::First,
        Aggregation::Last,
        Aggregation::Candlestick,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Aggregation::Mean => "mean",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
            Aggregation::Median => "median",
            Aggregation::First => "first",
            Aggregation::Last => "last",
            Aggregation::Candlestick => "candlestick",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Aggregation {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Aggregation::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChartError::UnknownAggregation(s.to_string()))
    }
}

/// Open/high/low/close summary of one block.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Candle {
    #[serde(rename = "open")]
    pub o: f64,
    #[serde(rename = "high")]
    pub h: f64,
    #[serde(rename = "low")]
    pub l: f64,
    #[serde(rename = "close")]
    pub c: f64,
}

/// Reduce `samples` to one value. Non-finite samples are skipped; a block with
/// no finite sample gives None.
///
/// `First`/`Last` are positional in the order the samples were gathered, not
/// ordered by any axis value. `Candlestick` reduces to the close, i.e. `Last`.
pub fn aggregate(samples: &[f64], kind: Aggregation) -> Option<f64> {
    let finite = finite_samples(samples);
    let (&first, &last) = (finite.first()?, finite.last()?);
    let v = match kind {
        Aggregation::Mean => mean(&finite),
        Aggregation::Min => finite.iter().copied().fold(f64::INFINITY, f64::min),
        Aggregation::Max => finite.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        Aggregation::Median => median(&finite),
        Aggregation::First => first,
        Aggregation::Last | Aggregation::Candlestick => last,
    };
    v.is_finite().then_some(v)
}

/// open = first finite sample, close = last finite sample (positional);
/// high/low by value. None when no sample is finite.
pub fn aggregate_candlestick(samples: &[f64]) -> Option<Candle> {
    let finite = finite_samples(samples);
    let (&o, &c) = (finite.first()?, finite.last()?);
    let mut h = f64::NEG_INFINITY;
    let mut l = f64::INFINITY;
    for &v in &finite {
        h = h.max(v);
        l = l.min(v);
    }
    Some(Candle { o, h, l, c })
}

fn finite_samples(samples: &[f64]) -> Vec<f64> {
    samples.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Contract: `samples` are finite and non-empty. Falls back to scaling each
/// term when the plain sum overflows.
fn mean(samples: &[f64]) -> f64 {
    let n = samples.len() as f64;
    let sum: f64 = samples.iter().sum();
    if sum.is_finite() {
        sum / n
    } else {
        samples.iter().map(|v| v / n).sum()
    }
}

fn median(samples: &[f64]) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        sorted[mid - 1] / 2.0 + sorted[mid] / 2.0
    } else {
        sorted[mid]
    }
}
