//! The experiment grid: sizes × instances × settings × families × variants.
//!
//! Cells are visited in a fixed nested order (size, instance, setting,
//! family, variant) and every solver runs to completion before the next one
//! starts. An unreadable instance or an output directory that cannot be
//! created aborts the run; a failing solver is logged and recorded, and the
//! grid moves on.

use std::{fmt, path::PathBuf};

use tracing::{info, warn};

use crate::deviation::{generate_for_file, DeviationModel};
use crate::error::Result;
use crate::paths::{ensure_dir, output_dir, resolve, Family};
use crate::setting::{is_defined, uncertainty_parameters};
use crate::study::invoke::{InvocationOutcome, Invoker};
use crate::study::solver::{variants, Invocation, SolverVariant};

/// Everything a study run needs, built once at the entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyConfig {
    pub sizes: Vec<u32>,
    pub instances: Vec<u32>,
    pub settings: Vec<u32>,
    pub model: DeviationModel,
    /// Root holding `data/` and `results/`; also the solvers' working directory.
    pub workdir: PathBuf,
    pub python: String,
    pub include_refined: bool,
}

impl StudyConfig {
    /// The grid of the published study.
    pub fn new(model: DeviationModel) -> Self {
        StudyConfig {
            sizes: default_sizes(),
            instances: default_instances(),
            settings: default_settings(),
            model,
            workdir: PathBuf::from("."),
            python: "python3".to_string(),
            include_refined: false,
        }
    }
}

/// 35, 40, ..., 100.
pub fn default_sizes() -> Vec<u32> {
    (7..=20).map(|i| 5 * i).collect()
}

pub fn default_instances() -> Vec<u32> {
    (1..=10).collect()
}

pub fn default_settings() -> Vec<u32> {
    (1..=4).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperimentCell {
    pub family: Family,
    pub size: u32,
    pub instance: u32,
    pub setting: u32,
    pub model: DeviationModel,
}

impl fmt::Display for ExperimentCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} size={} instance={} setting={} model={}",
            self.family, self.size, self.instance, self.setting, self.model
        )
    }
}

/// One solver run of one cell.
#[derive(Debug, Clone)]
pub struct Job {
    pub cell: ExperimentCell,
    pub variant: &'static SolverVariant,
    /// Relative to the working directory, as are the paths below.
    pub output_dir: PathBuf,
    pub output_file: PathBuf,
    pub invocation: Invocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub cell: ExperimentCell,
    pub variant: &'static str,
    pub output_file: PathBuf,
    pub outcome: InvocationOutcome,
}

/// Outcome of every invocation of a run, in execution order.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub records: Vec<JobRecord>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn succeeded(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &JobRecord> {
        self.records.iter().filter(|r| !r.outcome.is_success())
    }
}

pub struct ExperimentGrid<'a> {
    config: &'a StudyConfig,
}

impl<'a> ExperimentGrid<'a> {
    pub fn new(config: &'a StudyConfig) -> Self {
        ExperimentGrid { config }
    }

    /// All cells, in execution order.
    pub fn cells(&self) -> impl Iterator<Item = ExperimentCell> + '_ {
        let config = self.config;
        config.sizes.iter().flat_map(move |&size| {
            config.instances.iter().flat_map(move |&instance| {
                config.settings.iter().flat_map(move |&setting| {
                    Family::ALL.into_iter().map(move |family| ExperimentCell {
                        family,
                        size,
                        instance,
                        setting,
                        model: config.model,
                    })
                })
            })
        })
    }

    /// Builds the jobs of one cell. The instance is read and its deviations
    /// generated once, then shared by all variants of the family.
    pub fn jobs(&self, cell: ExperimentCell) -> Result<Vec<Job>> {
        let params = uncertainty_parameters(cell.setting);
        let paths = resolve(cell.family, cell.size, cell.instance, cell.setting);
        let deviations = generate_for_file(
            &self.config.workdir.join(&paths.instance_file),
            params.uncertainty,
            cell.model,
        )?;

        let jobs = variants(cell.family, self.config.include_refined)
            .into_iter()
            .map(|variant| {
                debug_assert_eq!(variant.family, cell.family);
                let output_dir = output_dir(cell.family, variant.dir, cell.model);
                let output_file = output_dir.join(&paths.result_file_name);
                let invocation = variant.invocation(
                    &self.config.python,
                    &paths.instance_file,
                    params.conservatism,
                    &deviations,
                    &output_file,
                );
                Job { cell, variant, output_dir, output_file, invocation }
            })
            .collect();
        Ok(jobs)
    }

    /// Every job of the grid without running anything.
    pub fn plan(&self) -> Result<Vec<Job>> {
        self.warn_undefined_settings();
        let mut jobs = vec![];
        for cell in self.cells() {
            jobs.extend(self.jobs(cell)?);
        }
        Ok(jobs)
    }

    /// Runs every job of the grid through `invoker`.
    pub fn run_all(&self, invoker: &mut impl Invoker) -> Result<RunSummary> {
        self.warn_undefined_settings();
        let mut summary = RunSummary::default();
        for cell in self.cells() {
            for job in self.jobs(cell)? {
                ensure_dir(&self.config.workdir.join(&job.output_dir))?;
                let outcome = invoker.invoke(&job.invocation, &self.config.workdir);
                if outcome.is_success() {
                    info!(
                        family = %cell.family,
                        size = cell.size,
                        instance = cell.instance,
                        setting = cell.setting,
                        variant = job.variant.dir,
                        model = %cell.model,
                        "solver finished"
                    );
                } else {
                    warn!(
                        family = %cell.family,
                        size = cell.size,
                        instance = cell.instance,
                        setting = cell.setting,
                        variant = job.variant.dir,
                        model = %cell.model,
                        "solver failed: {outcome}"
                    );
                }
                summary.records.push(JobRecord {
                    cell,
                    variant: job.variant.dir,
                    output_file: job.output_file,
                    outcome,
                });
            }
        }

        info!(
            total = summary.total(),
            succeeded = summary.succeeded(),
            failed = summary.total() - summary.succeeded(),
            "study finished"
        );
        Ok(summary)
    }

    fn warn_undefined_settings(&self) {
        for &setting in self.config.settings.iter().filter(|s| !is_defined(**s)) {
            let params = uncertainty_parameters(setting);
            warn!(
                setting,
                uncertainty = params.uncertainty,
                conservatism = params.conservatism,
                "undefined setting, using fallback parameters"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid() {
        let config = StudyConfig::new(DeviationModel::Integer);
        assert_eq!(config.sizes.len(), 14);
        assert_eq!(config.sizes.first(), Some(&35));
        assert_eq!(config.sizes.last(), Some(&100));
        assert_eq!(config.instances, (1..=10).collect::<Vec<_>>());
        assert_eq!(config.settings, vec![1, 2, 3, 4]);
        assert_eq!(ExperimentGrid::new(&config).cells().count(), 14 * 10 * 4 * 2);
    }

    #[test]
    fn cells_follow_nested_order() {
        let config = StudyConfig {
            sizes: vec![35, 40],
            instances: vec![1, 2],
            settings: vec![1, 2],
            ..StudyConfig::new(DeviationModel::Continuous)
        };
        let cells: Vec<_> = ExperimentGrid::new(&config)
            .cells()
            .map(|c| (c.size, c.instance, c.setting, c.family))
            .collect();
        assert_eq!(cells.len(), 16);
        assert_eq!(cells[0], (35, 1, 1, Family::Standard));
        assert_eq!(cells[1], (35, 1, 1, Family::Generalized));
        assert_eq!(cells[2], (35, 1, 2, Family::Standard));
        assert_eq!(cells[4], (35, 2, 1, Family::Standard));
        assert_eq!(cells[8], (40, 1, 1, Family::Standard));
        let mut sorted = cells.clone();
        sorted.sort_by_key(|&(size, instance, setting, family)| {
            (size, instance, setting, family == Family::Generalized)
        });
        assert_eq!(sorted, cells);
    }
}
