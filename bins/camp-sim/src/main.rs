//! camp-sim — Replay camp interaction scripts against a registry.
//!
//! Useful for tuning caps and decay: feed a JSON script of kills, rests and
//! waits, and read back the bonus each interaction earned.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use camp_core::types::{ActorId, CategoryId};
use tracing::info;

mod script;
mod settings;

/// Camp interaction decay simulator.
#[derive(Parser)]
#[command(name = "camp-sim")]
#[command(version, about = "Replay camp interaction scripts.")]
struct Cli {
    /// TOML file with cap and decay overrides.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the kind and cap of category ids.
    Caps(CapsArgs),
    /// Replay an event script and print the per-step report as JSON.
    Replay(ReplayArgs),
}

#[derive(Args)]
struct CapsArgs {
    /// Category ids to classify.
    #[arg(required = true)]
    ids: Vec<u32>,
}

#[derive(Args)]
struct ReplayArgs {
    /// Path to the JSON event script.
    script: PathBuf,

    /// Actor the registry belongs to.
    #[arg(short, long, default_value = "1")]
    actor: u64,

    /// Unix time the simulated clock starts at.
    #[arg(short, long, default_value = "0")]
    start: u64,

    /// Pretty-print the report.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Caps(args) => {
            for id in args.ids {
                let category = CategoryId(id);
                println!(
                    "{id:#010x} {:?} cap={}",
                    category.kind(),
                    config.max_interactions(category)
                );
            }
            Ok(())
        }
        Commands::Replay(args) => {
            let text = std::fs::read_to_string(&args.script)
                .with_context(|| format!("failed to read {}", args.script.display()))?;
            let steps = script::parse(&text)?;
            info!(
                script = %args.script.display(),
                steps = steps.len(),
                actor = args.actor,
                "replaying"
            );

            let replay = script::replay(ActorId(args.actor), config, args.start, &steps)?;
            let out = if args.pretty {
                serde_json::to_string_pretty(&replay)?
            } else {
                serde_json::to_string(&replay)?
            };
            println!("{out}");
            Ok(())
        }
    }
}
