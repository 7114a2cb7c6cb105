// File: crates/demo/src/load.rs
// Summary: Dataset loaders for the demo: wire files, CSV exports and a synthetic parameter sweep.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chart_core::{DataPoint, Dataset, Payload};
use chart_wire::{FieldValue, RecordStream};
use tracing::{info, warn};

/// Pick a loader from the file extension (`.bin` wire stream, otherwise CSV).
pub fn load_path(path: &Path) -> Result<Dataset> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_lowercase();
    match ext.as_str() {
        "bin" | "wire" => {
            let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            chart_wire::decode(&bytes).with_context(|| format!("decoding {}", path.display()))
        }
        _ => load_csv(path),
    }
}

/// Resolve path, trying the .csv/.cvs swap if the given name does not exist.
pub fn resolve_path(raw: &str) -> Result<PathBuf> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok(p.to_path_buf());
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            info!(path = %alt.display(), "extension swapped between .csv/.cvs");
            return Ok(alt);
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    match p.extension()?.to_string_lossy().to_lowercase().as_str() {
        "cvs" => alt.set_extension("csv"),
        "csv" => alt.set_extension("cvs"),
        _ => return None,
    };
    Some(alt)
}

/// Every header becomes a dimension. Cells parse as numbers, then as
/// timestamps (epoch seconds); anything else becomes NaN on the axis and is
/// kept verbatim in the payload.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(str::to_string).collect::<Vec<_>>();
    info!(?headers, "csv headers");

    let mut points = Vec::new();
    let mut unparsed = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let mut values = Vec::with_capacity(headers.len());
        let mut payload = Payload::new();
        for (i, name) in headers.iter().enumerate() {
            let cell = rec.get(i).unwrap_or("");
            let v = parse_number(cell).or_else(|| parse_time(cell));
            if v.is_none() {
                unparsed += 1;
            }
            values.push(v.unwrap_or(f64::NAN));
            payload.insert(name.clone(), serde_json::Value::String(cell.to_string()));
        }
        points.push(DataPoint::new(values).with_payload(payload));
    }
    if unparsed > 0 {
        warn!(cells = unparsed, "non-numeric csv cells mapped to NaN");
    }
    Ok(Dataset::new(headers, points)?)
}

fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok()
}

fn parse_time(s: &str) -> Option<f64> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp() as f64);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp() as f64);
    }
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp() as f64)
}

/// A small sweep: one time axis, two parameters, three metrics, as a wire stream.
pub fn synthetic_stream(steps: usize) -> RecordStream {
    let mut stream = RecordStream::new()
        .dimension("t", "Time step")
        .dimension("p_speed", "Speed")
        .dimension("p_load", "Load")
        .dimension("m_latency", "Latency (ms)")
        .dimension("m_throughput", "Throughput (req/s)")
        .dimension("m_errors", "Error rate");

    for t in 0..steps {
        for speed in 1..=4 {
            for load in 1..=3 {
                let phase = t as f64 * 0.15;
                let latency = 10.0 + load as f64 * 4.0 / speed as f64 + phase.sin() * 2.0;
                let throughput = speed as f64 * 120.0 - load as f64 * 15.0 + phase.cos() * 8.0;
                let errors = (load as f64 * 0.01 + (phase * 0.5).sin().abs() * 0.02).min(1.0);
                stream.record([
                    ("t", FieldValue::Int(t as i32)),
                    ("p_speed", FieldValue::Int(speed)),
                    ("p_load", FieldValue::Int(load)),
                    ("m_latency", FieldValue::Float(latency)),
                    ("m_throughput", FieldValue::Float(throughput)),
                    ("m_errors", FieldValue::Float(errors)),
                    ("run", FieldValue::Text(format!("run-{t:04}-{speed}-{load}"))),
                ]);
            }
        }
    }
    stream
}
