use anyhow::Context;
use clap::Parser;
use generator::profile::build_frames_from_config;
use gui_bridge::bridge::{gui_bind_address, GuiBridge};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::replay::{load_frames, write_frames};
use workflow::runner::{Runner, WorkflowResult};

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Squat counter replay and workout driver")]
struct Args {
    /// Load session thresholds and generator settings from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Override the smoothing window size
    #[arg(long)]
    window_size: Option<usize>,
    /// Replay a JSON Lines capture of pose frames
    #[arg(long)]
    replay: Option<PathBuf>,
    /// Run a generated workout
    #[arg(long, default_value_t = false)]
    synthetic: bool,
    #[arg(long)]
    reps: Option<u32>,
    #[arg(long)]
    seed: Option<u64>,
    /// Write the generated workout as a JSON Lines capture
    #[arg(long)]
    dump: Option<PathBuf>,
    /// Append a one-line summary of each run to this file
    #[arg(long)]
    report: Option<PathBuf>,
    /// Keep the HTTP bridge alive for live frames
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn append_report(path: &Path, source: &str, result: &WorkflowResult) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let report = format!(
        "source={} reps={} state={:?} frames={} dropped={} stale={}\n",
        source,
        result.rep_count,
        result.final_state,
        result.stats.frames_seen,
        result.stats.frames_dropped,
        result.stats.stale_frames
    );
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening report {}", path.display()))?;
    file.write_all(report.as_bytes())?;
    Ok(())
}

fn summarize(source: &str, result: &WorkflowResult) {
    println!(
        "{} -> reps {}, final state {:?}, frames {} (dropped {}, stale {})",
        source,
        result.rep_count,
        result.final_state,
        result.stats.frames_seen,
        result.stats.frames_dropped,
        result.stats.stale_frames
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut workflow_config = if let Some(path) = &args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(None)
    };
    if let Some(window_size) = args.window_size {
        workflow_config.session.window_size = window_size;
    }
    if let Some(reps) = args.reps {
        workflow_config.generator.reps = reps;
    }
    if let Some(seed) = args.seed {
        workflow_config.generator.seed = seed;
    }

    let runner = Arc::new(Runner::new(workflow_config.clone()));
    let gui_bridge = GuiBridge::new(runner.clone())?;

    if let Some(path) = &args.replay {
        let frames = load_frames(path)?;
        let result = runner.execute(&frames)?;
        let source = path.display().to_string();
        summarize(&source, &result);
        gui_bridge.publish(&result, Some(source.clone()));
        if let Some(report) = &args.report {
            append_report(report, &source, &result)?;
        }
    }

    if args.synthetic || args.dump.is_some() {
        let frames = build_frames_from_config(&workflow_config.generator)?;
        if let Some(path) = &args.dump {
            write_frames(path, &frames)?;
            gui_bridge.publish_status(&format!(
                "wrote {} frames to {}",
                frames.len(),
                path.display()
            ));
        }
        if args.synthetic {
            let result = runner.execute(&frames)?;
            summarize("synthetic", &result);
            gui_bridge.publish(&result, workflow_config.generator.scenario.clone());
            if let Some(report) = &args.report {
                append_report(report, "synthetic", &result)?;
            }
        }
    }

    if args.serve {
        let _server = gui_bridge.serve(gui_bind_address());
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
