//! hookstate - headless replay of host events against the demo page
//!
//! ```text
//! hookstate run demos/login.json --config demos/hookstate.toml --report out/login.json
//! hookstate init-config hookstate.toml
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hookstate_cli::{run_scenario, Page, PageConfig, Scenario};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Replay host event scenarios against hookstate components
#[derive(Parser, Debug)]
#[command(name = "hookstate")]
#[command(about = "Replay host event scenarios against hookstate components")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scenario and print its report
    Run {
        /// Scenario JSON file
        scenario: PathBuf,

        /// Page config (file, or directory containing hookstate.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also write the report to this relative path
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Write the default page config
    InitConfig {
        #[arg(default_value = "hookstate.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scenario,
            config,
            report,
        } => {
            let config = match config {
                Some(path) => PageConfig::load(&path)?,
                None => PageConfig::default(),
            };
            let scenario = Scenario::from_path(&scenario)?;
            tracing::info!("Running {} steps", scenario.steps.len());

            let mut page = Page::build(config);
            let outcome = run_scenario(&mut page, &scenario);

            outcome.report().write_to_writer(&mut std::io::stdout())?;
            if let Some(path) = report {
                outcome
                    .report()
                    .write_to_path(&path)
                    .with_context(|| format!("Failed to write report {}", path.display()))?;
            }

            if outcome.is_failed() {
                std::process::exit(1);
            }
        }
        Commands::InitConfig { path, force } => {
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            std::fs::write(&path, PageConfig::default().to_toml()?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
    }

    Ok(())
}
