//! Naming conventions for instance and result files.
//!
//! Downstream aggregation scripts rely on the layout
//! `results/<family>/<variant>/<randint|cont>/<result file>`, so none of the
//! names below may change.

use std::{fmt, fs, path::{Path, PathBuf}};

use crate::deviation::DeviationModel;
use crate::error::{Result, StudyError};

pub const DATA_DIR: &str = "data";
pub const RESULTS_DIR: &str = "results";

/// The two problem families of the study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Bounded-knapsack interdiction, solved with the min-max solvers.
    Standard,
    Generalized,
}

impl Family {
    pub const ALL: [Family; 2] = [Family::Standard, Family::Generalized];

    /// Directory name under `data/` and `results/`.
    pub fn dir_name(self) -> &'static str {
        match self {
            Family::Standard => "BKIP",
            Family::Generalized => "generalized-BKIP",
        }
    }

    /// Prefix of every instance and result file name.
    pub fn file_prefix(self) -> &'static str {
        match self {
            Family::Standard => "BKIP",
            Family::Generalized => "generalized_BKIP",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Standard => f.write_str("standard"),
            Family::Generalized => f.write_str("generalized"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Relative to the study's working directory.
    pub instance_file: PathBuf,
    pub result_file_name: String,
}

pub fn resolve(family: Family, size: u32, instance: u32, setting: u32) -> ResolvedPaths {
    let prefix = family.file_prefix();
    ResolvedPaths {
        instance_file: Path::new(DATA_DIR)
            .join(family.dir_name())
            .join(format!("{prefix}_{size}_{instance}.txt")),
        result_file_name: format!("{prefix}_{size}_{instance}_{setting}.json"),
    }
}

/// `results/<family>/<variant>/<model>`, relative to the working directory.
pub fn output_dir(family: Family, variant_dir: &str, model: DeviationModel) -> PathBuf {
    Path::new(RESULTS_DIR)
        .join(family.dir_name())
        .join(variant_dir)
        .join(model.dir_name())
}

/// Creates `dir` and its parents unless it already exists.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| StudyError::DirectoryCreation {
        path: dir.to_path_buf(),
        source,
    })
}
