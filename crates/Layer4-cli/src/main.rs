//! Reducer Combiner CLI - Main entry point

mod replay;
mod script;

use anyhow::Context;
use clap::{Parser, Subcommand};
use combiner_foundation::{CombinerConfig, JsonStore};
use replay::Replay;
use script::Script;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// combiner - replay reducer scripts against a dynamic reducer tree
#[derive(Parser, Debug)]
#[command(name = "combiner")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a replay script and print the state after each step
    Replay {
        /// Path to the JSON script
        script: PathBuf,

        /// Pretty-print states
        #[arg(short, long)]
        pretty: bool,

        /// Read combiner.json from this directory instead of global + project
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the merged configuration
    ShowConfig {
        /// Read combiner.json from this directory instead of global + project
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match args.command {
        Command::Replay {
            script,
            pretty,
            config,
        } => run_replay(&script, pretty, config),
        Command::ShowConfig { config } => {
            let config = load_config(config)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(dir: Option<PathBuf>) -> anyhow::Result<CombinerConfig> {
    let config = match dir {
        Some(dir) => CombinerConfig::load_from(&JsonStore::new(&dir))
            .with_context(|| format!("Failed to load config from {}", dir.display()))?,
        None => CombinerConfig::load().context("Failed to load config")?,
    };
    Ok(config)
}

fn run_replay(path: &Path, pretty: bool, config: Option<PathBuf>) -> anyhow::Result<ExitCode> {
    let config = load_config(config)?;
    let script = Script::from_file(path)?;

    tracing::info!(
        "Replaying {} steps from {}",
        script.steps.len(),
        path.display()
    );

    // 단계가 끝날 때마다 바로 출력 (실패 전 단계도 보이도록)
    let outcome = Replay::run_with(&script, &config, |report| {
        println!("[{}] {}", report.index, report.description);
        if pretty {
            println!("{:#}", report.state);
        } else {
            println!("{}", report.state);
        }
    });

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if e.is_user_facing() => {
            eprintln!("error: {}", e);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(anyhow::Error::new(e).context(format!("Replay of {} failed", path.display()))),
    }
}
