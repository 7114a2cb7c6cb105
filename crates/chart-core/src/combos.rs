// File: crates/chart-core/src/combos.rs
// Summary: Enumerates the chartable (x, y, z) axis triples of a dataset in a fixed UI order.

use crate::error::{ChartError, Result};
use crate::types::{AxisKind, AxisTriple};

/// All `k`-element subsets of `items`, in input order ("fix the first, recurse
/// on the suffix").
pub fn combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    let mut out = Vec::new();
    for (i, head) in items.iter().enumerate() {
        for mut tail in combinations(&items[i + 1..], k - 1) {
            tail.insert(0, head.clone());
            out.push(tail);
        }
    }
    out
}

/// Every valid triple for `dimensions`, which must hold exactly one time axis.
///
/// Order: (time, param, metric), (time, metric, metric), (param, param, metric),
/// (param, metric, metric), (metric, metric, metric).
pub fn generate_triples<S: AsRef<str>>(dimensions: &[S]) -> Result<Vec<AxisTriple>> {
    if dimensions.is_empty() {
        return Err(ChartError::EmptyDimensions);
    }

    let mut times = Vec::new();
    let mut params = Vec::new();
    let mut metrics = Vec::new();
    for d in dimensions {
        let name = d.as_ref();
        match AxisKind::classify(name) {
            AxisKind::Time => times.push(name),
            AxisKind::Parameter => params.push(name),
            AxisKind::Metric => metrics.push(name),
        }
    }
    let time = match times.as_slice() {
        [t] => *t,
        _ => return Err(ChartError::TimeAxisCount(times.len())),
    };

    let metric_pairs = combinations(&metrics, 2);
    let mut out = Vec::new();

    for p in &params {
        for m in &metrics {
            out.push(AxisTriple::new(time, *p, *m));
        }
    }
    for pair in &metric_pairs {
        out.push(AxisTriple::new(time, pair[0], pair[1]));
    }
    for pair in combinations(&params, 2) {
        for m in &metrics {
            out.push(AxisTriple::new(pair[0], pair[1], *m));
        }
    }
    for p in &params {
        for pair in &metric_pairs {
            out.push(AxisTriple::new(*p, pair[0], pair[1]));
        }
    }
    for t in combinations(&metrics, 3) {
        out.push(AxisTriple::new(t[0], t[1], t[2]));
    }
    Ok(out)
}
