//! Align two scans of the same region taken at different angles.
//!
//! Scans a built-in region (or two record files) and runs the full
//! alignment pipeline, then compares the region's containment tree with a
//! simplified version of itself.
//!
//! Usage:
//!   cargo run --example align_scans -- --angle 0.8 --gap 15
//!   cargo run --example align_scans -- --first a.txt --second b.txt
//!   RUST_LOG=debug cargo run --example align_scans -- -c configs/rekha.yaml

use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info};

use rekha_align::{
    AlignmentSearch, IntervalKind, Outline, Point2D, RegionOutline, RegionTree, RekhaConfig,
    ScanData, tree_edit_distance,
};

/// Rigid alignment of two region scans
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "configs/rekha.yaml")]
    config: String,

    /// First scan record file (built-in region if omitted)
    #[arg(long)]
    first: Option<PathBuf>,

    /// Second scan record file (built-in region if omitted)
    #[arg(long)]
    second: Option<PathBuf>,

    /// Angle added for the second built-in scan (radians)
    #[arg(short, long, default_value_t = 0.6)]
    angle: f64,

    /// Override the line spacing from the config
    #[arg(short, long)]
    gap: Option<f64>,

    /// Print the aligned positives in record format
    #[arg(long)]
    records: bool,
}

fn demo_region() -> Vec<RegionOutline> {
    vec![
        RegionOutline::solid(Outline::polygon(&[
            Point2D::new(150.0, 120.0),
            Point2D::new(520.0, 120.0),
            Point2D::new(520.0, 260.0),
            Point2D::new(320.0, 260.0),
            Point2D::new(320.0, 450.0),
            Point2D::new(150.0, 450.0),
        ])),
        RegionOutline::hole(Outline::rectangle(190.0, 160.0, 90.0, 90.0)),
        RegionOutline::solid(Outline::circle(Point2D::new(640.0, 400.0), 70.0)),
    ]
}

fn run(args: &Args) -> rekha_align::Result<()> {
    let mut config = if Path::new(&args.config).exists() {
        RekhaConfig::load(Path::new(&args.config))?
    } else {
        RekhaConfig::default()
    };
    if let Some(gap) = args.gap {
        config.scan.gap = gap;
        config.validate()?;
    }
    let canvas = config.canvas();
    let region = demo_region();

    let (first, second) = match (&args.first, &args.second) {
        (Some(a), Some(b)) => (ScanData::load(a, canvas)?, ScanData::load(b, canvas)?),
        _ => {
            let angle = config.scan.angle;
            let first = ScanData::from_outlines(&region, angle, config.scan.gap, canvas)?;
            let second =
                ScanData::from_outlines(&region, angle + args.angle, config.scan.gap, canvas)?;
            (first.normalized().0, second.normalized().0)
        }
    };
    info!(
        "First scan: {} positives on {} lines, second: {} positives on {} lines",
        first.positives().len(),
        first.line_count(),
        second.positives().len(),
        second.line_count()
    );

    let search = AlignmentSearch::new(config.alignment.clone())?;
    let result = search.align(&first, &second);

    println!("Outcome:   {:?}", result.outcome());
    println!("Conflicts: {} -> {}", result.initial, result.residual);
    println!("Steps:     {}", result.steps_used);
    match result.transform {
        Some(t) => println!(
            "Transform: theta={:.4} rad, t=({:.2}, {:.2})",
            t.theta, t.tx, t.ty
        ),
        None => println!("Transform: none (no usable hull diagonal)"),
    }
    if args.records
        && let Some(aligned) = &result.aligned
    {
        print!("{}", aligned.to_records(IntervalKind::Positive));
    }

    let tolerance = config.topology.flatten_tolerance;
    let full = RegionTree::from_outlines(&region, tolerance)?;
    let simplified = RegionTree::from_outlines(&region[..1], tolerance)?;
    println!(
        "Topology:  {} vs {} nodes, edit distance {}",
        full.len(),
        simplified.len(),
        tree_edit_distance(&full, &simplified, &config.edit_costs())
    );
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
