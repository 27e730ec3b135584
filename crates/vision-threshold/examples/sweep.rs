//! Example: selection fraction as a function of the threshold parameters.
//!
//! Builds a synthetic sample, sweeps the global threshold over its full range
//! and the adaptive offset over its slider range, and records the fraction of
//! selected pixels at every step. Results go to stdout as a table and,
//! optionally, to a JSON file.
//!
//! Run from the workspace root:
//!   cargo run -p vision-threshold --example sweep -- --help
//!   RUST_LOG=debug cargo run -p vision-threshold --example sweep -- --sample page

use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use serde::Serialize;
use vision_threshold::controls::{OFFSET, THRESHOLD};
use vision_threshold::{
    AdaptiveMethod, AdaptiveThresholdConfig, GaussianBlur, GlobalThresholdConfig, Image,
    adaptive_threshold_u8, run_global, samples,
};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Sample {
    Coins,
    Page,
}

#[derive(Parser, Debug)]
#[command(about = "Sweep threshold parameters over a synthetic image")]
struct Args {
    #[arg(long, value_enum, default_value = "coins")]
    sample: Sample,

    #[arg(long, default_value_t = 640)]
    width: usize,

    #[arg(long, default_value_t = 480)]
    height: usize,

    /// Gaussian blur sigma applied before every threshold (0 disables)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    blur: f32,

    /// Neighborhood size for the adaptive offset sweep
    #[arg(long, default_value_t = 51)]
    window: usize,

    /// Step between swept global thresholds
    #[arg(long, default_value_t = 16)]
    step: u8,

    /// Output JSON path
    #[arg(long)]
    out: Option<String>,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GlobalPoint {
    threshold: u8,
    fraction: f64,
}

#[derive(Serialize)]
struct AdaptivePoint {
    offset: i32,
    mean: f64,
    gaussian: f64,
}

#[derive(Serialize)]
struct SweepResult {
    width: usize,
    height: usize,
    blur_sigma: f32,
    window: usize,
    global: Vec<GlobalPoint>,
    adaptive: Vec<AdaptivePoint>,
    elapsed_ms: f64,
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let blur = GaussianBlur::new(args.blur).context("invalid --blur")?;
    let base = AdaptiveThresholdConfig::new(args.window, 0, AdaptiveMethod::Mean)
        .context("invalid --window")?;

    let source: Image<u8> = match args.sample {
        Sample::Coins => samples::coins(args.width, args.height),
        Sample::Page => samples::uneven_page(args.width, args.height),
    };
    info!("sample {:?} {}x{}", args.sample, source.width(), source.height());

    let t0 = Instant::now();

    let step = usize::from(args.step.max(1));
    let mut global = Vec::new();
    for threshold in (THRESHOLD.min..=THRESHOLD.max).step_by(step) {
        let out = run_global(&source.as_view(), &GlobalThresholdConfig { threshold, blur });
        global.push(GlobalPoint {
            threshold,
            fraction: out.fraction,
        });
    }

    // The blur stage is shared by every offset; only the comparison changes.
    let smoothed = blur.apply(&source.as_view());
    let view = smoothed.as_view();
    let mut adaptive = Vec::new();
    for offset in (OFFSET.min..=OFFSET.max).step_by(10) {
        let fraction = |method: AdaptiveMethod| {
            let cfg = AdaptiveThresholdConfig {
                offset,
                method,
                ..base
            };
            adaptive_threshold_u8(&view, &cfg).fraction_set()
        };
        adaptive.push(AdaptivePoint {
            offset,
            mean: fraction(AdaptiveMethod::Mean),
            gaussian: fraction(AdaptiveMethod::Gaussian),
        });
    }

    let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;

    println!("{:>9}  {:>8}", "threshold", "selected");
    for p in &global {
        println!("{:>9}  {:>7.2}%", p.threshold, p.fraction * 100.0);
    }
    println!();
    println!("{:>6}  {:>8}  {:>8}", "offset", "mean", "gaussian");
    for p in &adaptive {
        println!(
            "{:>6}  {:>7.2}%  {:>7.2}%",
            p.offset,
            p.mean * 100.0,
            p.gaussian * 100.0
        );
    }
    println!();
    println!("sweep took {elapsed_ms:.1} ms");

    if let Some(path) = &args.out {
        let result = SweepResult {
            width: source.width(),
            height: source.height(),
            blur_sigma: blur.sigma(),
            window: base.window.get(),
            global,
            adaptive,
            elapsed_ms,
        };
        let json = serde_json::to_string_pretty(&result).context("serialising results")?;
        std::fs::write(path, json).with_context(|| format!("writing {path}"))?;
        info!("results written to {path}");
    }

    Ok(())
}
