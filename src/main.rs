use std::process::ExitCode;

use anyhow::{anyhow, Result};
use bkip_study::deviation::{DeviationModel, Deviations};
use bkip_study::study::grid::StudyConfig;
use bkip_study::study::run::{run_study, Run};
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct StudyTools {
    /// Integer deviations (True) or continuous deviations (False)
    #[clap(long, global = true, default_value = "True")]
    randint: DeviationModel,
    /// Runs the full study grid when omitted
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the solvers over the experiment grid
    Run(Run),
    /// Print the solver commands of the grid without running them
    Plan(Run),
    /// Print the deviations generated for one instance file
    Deviations(Deviations),
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

fn study(cli: StudyTools) -> Result<()> {
    let model = cli.randint;
    let summary = match cli.command {
        None => run_study(&StudyConfig::new(model))?,
        Some(Command::Run(run)) => run.run(model)?,
        Some(Command::Plan(run)) => return Ok(run.plan(model)?),
        Some(Command::Deviations(deviations)) => return Ok(deviations.print(model)?),
    };

    let failed = summary.total() - summary.succeeded();
    if failed > 0 {
        return Err(anyhow!("{failed} of {} solver runs failed", summary.total()));
    }
    Ok(())
}

fn main() -> ExitCode {
    enable_tracing();

    if let Err(e) = study(StudyTools::parse()) {
        error!("{e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
