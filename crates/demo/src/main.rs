// File: crates/demo/src/main.rs
// Summary: Demo loads a dataset (wire, CSV or synthetic), lists axis triples, opens one chart,
// replays control events and writes the resulting render frame as JSON.

mod load;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chart_core::{generate_triples, ChartConfig, ChartSession, ControlEvent, Frame};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hyperchart-demo")]
#[command(about = "Window, filter and aggregate a multi-axis point cloud into render JSON", long_about = None)]
struct Args {
    /// Input dataset (.bin wire stream or .csv). Omit for a synthetic sweep.
    input: Option<String>,

    #[arg(long, default_value = "40", help = "Time steps in the synthetic sweep")]
    steps: usize,

    #[arg(long, help = "Print the available axis triples and exit")]
    list: bool,

    #[arg(long, default_value = "0", help = "Index into the triple list")]
    triple: usize,

    #[arg(long, help = "Chart configuration JSON (overrides --triple)")]
    config: Option<PathBuf>,

    #[arg(long, help = "JSON array of control events to replay")]
    events: Option<PathBuf>,

    #[arg(long, help = "Write the render frame here instead of stdout")]
    out: Option<PathBuf>,

    #[arg(long, help = "Also write the loaded dataset as a wire stream (synthetic input only)")]
    write_wire: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let dataset = match &args.input {
        Some(raw) => {
            let path = load::resolve_path(raw)?;
            info!(path = %path.display(), "loading dataset");
            load::load_path(&path)?
        }
        None => {
            let stream = load::synthetic_stream(args.steps);
            let bytes = stream.to_bytes().context("encoding synthetic stream")?;
            if let Some(path) = &args.write_wire {
                std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
                info!(path = %path.display(), bytes = bytes.len(), "wrote wire stream");
            }
            chart_wire::decode(&bytes).context("decoding synthetic stream")?
        }
    };
    info!(points = dataset.len(), dimensions = ?dataset.dimensions(), "dataset ready");
    let dataset = Arc::new(dataset);

    let triples = generate_triples(dataset.dimensions()).context("enumerating axis triples")?;
    if args.list {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        for (i, t) in triples.iter().enumerate() {
            writeln!(
                handle,
                "{i:>3}  {t}  [{} / {} / {}]",
                dataset.label(&t.x),
                dataset.label(&t.y),
                dataset.label(&t.z)
            )?;
        }
        return Ok(());
    }

    let mut session = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            let config: ChartConfig = serde_json::from_str(&text).context("parsing chart config")?;
            ChartSession::from_config(dataset.clone(), config)?
        }
        None => {
            let triple = triples
                .get(args.triple)
                .cloned()
                .with_context(|| format!("triple index {} out of range (0..{})", args.triple, triples.len()))?;
            ChartSession::open(dataset.clone(), triple)?
        }
    };
    info!(triple = %session.triple(), "chart opened");

    let mut frame = session.render()?;
    if let Some(path) = &args.events {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let events: Vec<ControlEvent> = serde_json::from_str(&text).context("parsing control events")?;
        for event in events {
            frame = session.apply(event)?;
        }
    }
    report(&frame);

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
            serde_json::to_writer_pretty(io::BufWriter::new(file), &frame)?;
            info!(path = %path.display(), "wrote frame");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, &frame)?;
            writeln!(handle)?;
        }
    }
    Ok(())
}

fn report(frame: &Frame) {
    match &frame.output {
        chart_core::WindowOutput::Empty => info!(points = frame.points, "no data in window"),
        chart_core::WindowOutput::Grid(g) => info!(
            points = frame.points,
            rows = g.rows(),
            cols = g.cols(),
            scatter = g.scatter.len(),
            "surface grid"
        ),
        chart_core::WindowOutput::Candles(c) => info!(points = frame.points, candles = c.len(), "candlesticks"),
    }
    if let Some(zoom) = &frame.zoom {
        info!(level = zoom.level, tiles = zoom.tiles.len(), "zoom");
    }
}
