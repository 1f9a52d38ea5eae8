use std::path::PathBuf;

use clap::Args;

use crate::deviation::DeviationModel;
use crate::error::Result;
use crate::study::grid::{ExperimentGrid, RunSummary, StudyConfig};
use crate::study::invoke::ProcessInvoker;

#[derive(Debug, Args)]
pub struct Run {
    /// Instance sizes to run, comma separated (default: 35,40,...,100)
    #[clap(long, value_delimiter = ',')]
    pub sizes: Option<Vec<u32>>,
    /// Instance indices to run, comma separated (default: 1,...,10)
    #[clap(long, value_delimiter = ',')]
    pub instances: Option<Vec<u32>>,
    /// Settings to run, comma separated (default: 1,2,3,4)
    #[clap(long, value_delimiter = ',')]
    pub settings: Option<Vec<u32>>,
    /// The directory holding data/ and results/
    #[clap(short, long, default_value = ".")]
    pub workdir: PathBuf,
    /// The python interpreter used to launch the solvers
    #[clap(long, default_value = "python3")]
    pub python: String,
    /// Also run the general heuristic with its refinement pass
    #[clap(long)]
    pub refined: bool,
}

impl Run {
    pub fn config(&self, model: DeviationModel) -> StudyConfig {
        let defaults = StudyConfig::new(model);
        StudyConfig {
            sizes: self.sizes.clone().unwrap_or(defaults.sizes),
            instances: self.instances.clone().unwrap_or(defaults.instances),
            settings: self.settings.clone().unwrap_or(defaults.settings),
            model,
            workdir: self.workdir.clone(),
            python: self.python.clone(),
            include_refined: self.refined,
        }
    }

    pub fn run(&self, model: DeviationModel) -> Result<RunSummary> {
        run_study(&self.config(model))
    }

    /// Prints every command the run would issue, one per line.
    pub fn plan(&self, model: DeviationModel) -> Result<()> {
        let config = self.config(model);
        for job in ExperimentGrid::new(&config).plan()? {
            println!("{}", job.invocation);
        }
        Ok(())
    }
}

pub fn run_study(config: &StudyConfig) -> Result<RunSummary> {
    ExperimentGrid::new(config).run_all(&mut ProcessInvoker)
}
