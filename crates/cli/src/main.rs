#![deny(unsafe_code)]
//! CLI binary for inspecting the flowfield engine.
//!
//! Subcommands:
//! - `params`: defaults, current values, schema and grid size for a surface
//! - `probe`: the segment drawn at one grid point
//! - `oscillate`: trace of the breathing amplitude over redraws

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use flowfield_core::{Engine, FlowParams, PointerTracker, RecordingSurface};
use flowfield_engine::field::{segment_at, FieldSample, MINIMUM_LINE_LENGTH};
use flowfield_engine::oscillator::Oscillator;
use flowfield_engine::FlowField;
use glam::DVec2;
use serde_json::json;
use std::process;

#[derive(Parser)]
#[command(name = "flowfield", about = "Flow field engine inspector")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show parameter values and schema for an engine of the given size.
    Params {
        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: u32,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: u32,

        /// Engine parameters as a JSON object; every key is range-checked.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Evaluate the segment drawn at one grid point.
    Probe {
        /// Grid point x in pixels.
        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        /// Grid point y in pixels.
        #[arg(long, allow_hyphen_values = true)]
        y: f64,

        /// Pointer x in pixels.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        pointer_x: f64,

        /// Pointer y in pixels.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        pointer_y: f64,

        /// Oscillation amplitude applied to the angle.
        #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
        radius: f64,

        #[arg(long, default_value_t = 0.01)]
        zoom: f64,

        /// User-facing maximum line length (0-100).
        #[arg(long, default_value_t = 60.0)]
        max_length: f64,

        /// Floor on squared pointer distance.
        #[arg(long, default_value_t = MINIMUM_LINE_LENGTH)]
        min_length: f64,
    },
    /// Trace radius and velocity over a number of redraws.
    Oscillate {
        #[arg(short, long, default_value_t = 400)]
        redraws: usize,

        /// Print every n-th redraw.
        #[arg(short, long, default_value_t = 20)]
        every: usize,

        /// Start paused (radius stays frozen).
        #[arg(long)]
        paused: bool,
    },
}

/// Parses `--params` and builds an engine on an in-memory surface.
fn build_engine(
    width: u32,
    height: u32,
    params: &str,
) -> Result<FlowField<RecordingSurface>, CliError> {
    let params: serde_json::Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    Ok(FlowField::from_json(
        RecordingSurface::new(),
        width,
        height,
        PointerTracker::new(),
        &params,
    )?)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Params {
            width,
            height,
            params,
        } => {
            let engine = build_engine(width, height, &params)?;
            let cells = engine.grid_points().count();
            log::debug!("params for {width}x{height}: {cells} cells");

            if cli.json {
                let info = json!({
                    "width": width,
                    "height": height,
                    "cells": cells,
                    "defaults": FlowParams::default().to_json(),
                    "values": Engine::params(&engine),
                    "schema": engine.param_schema(),
                    "gradient": engine.gradient(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Surface: {width}x{height} ({cells} cells)");
                println!("Parameters:");
                for spec in flowfield_core::PARAM_SPECS {
                    let value = engine.params().get(spec.name).unwrap_or(f64::NAN);
                    println!(
                        "  {:<18} {:>8}  [{} .. {}] step {}",
                        spec.name, value, spec.min, spec.max, spec.step
                    );
                }
                println!("  {:<18} {:>8}", "started", engine.started());
                println!("Gradient stops:");
                for stop in engine.gradient().stops() {
                    println!("  {:.1}  {}", stop.offset, stop.color.to_hex());
                }
            }
        }
        Command::Probe {
            x,
            y,
            pointer_x,
            pointer_y,
            radius,
            zoom,
            max_length,
            min_length,
        } => {
            let mut checked = FlowParams::default();
            checked.set("zoom", &json!(zoom))?;
            checked.set("maximumLineLength", &json!(max_length))?;
            let sample = FieldSample {
                radius,
                zoom: checked.zoom,
                minimum_line_length: min_length,
                maximum_line_length: checked.maximum_line_length,
            };
            let seg = segment_at(DVec2::new(x, y), DVec2::new(pointer_x, pointer_y), &sample);

            if cli.json {
                let info = json!({
                    "from": [seg.from.x, seg.from.y],
                    "to": [seg.to.x, seg.to.y],
                    "angle": seg.angle,
                    "length": seg.length,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "({:.3}, {:.3}) -> ({:.3}, {:.3})  angle {:.4} rad, length {:.4}",
                    seg.from.x, seg.from.y, seg.to.x, seg.to.y, seg.angle, seg.length
                );
            }
        }
        Command::Oscillate {
            redraws,
            every,
            paused,
        } => {
            if every == 0 {
                return Err(CliError::Input("--every must be at least 1".into()));
            }
            let mut osc = Oscillator::new();
            osc.set_started(!paused);
            let mut trace = Vec::new();
            for i in 1..=redraws {
                osc.advance();
                if i % every == 0 {
                    trace.push((i, osc.radius(), osc.vr()));
                }
            }

            if cli.json {
                let rows: Vec<_> = trace
                    .iter()
                    .map(|&(i, r, vr)| json!({"redraw": i, "radius": r, "vr": vr}))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for (i, r, vr) in trace {
                    println!("{i:>6}  radius {r:>8.3}  vr {vr:>6.3}");
                }
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
