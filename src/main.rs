use anyhow::{Context, Result};
use clap::Parser;
use deadlock_lab::{DeadlockLab, Scenario};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "deadlock-lab - Banker's safety checks and deadlock detection for JSON scenarios"
)]
struct Cli {
    /// Path to the scenario file
    scenario: PathBuf,

    /// Record the analysis in a JSON-lines log ("{timestamp}" is expanded)
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut lab = DeadlockLab::new();
    if let Some(log) = &cli.log {
        lab = lab.with_log(log);
    }
    let engine = lab.start()?;

    let scenario = Scenario::from_path(&cli.scenario)
        .with_context(|| format!("Failed to load scenario {}", cli.scenario.display()))?;
    let verdict = scenario.run(&engine).context("Invalid scenario")?;

    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(())
}
