//! This module defines the part of a (generalized) BKIP instance the study reads.

use std::{fs::File, io::BufReader, path::Path};

use serde::Deserialize;

use crate::error::{Result, StudyError};

/// Only the profits matter here; every other field of the instance file is
/// left for the solvers.
#[derive(Debug, Clone, Deserialize)]
pub struct BkipInstance {
    pub profits: Vec<f64>,
}

impl BkipInstance {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| StudyError::InstanceRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| StudyError::InstanceFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn size(&self) -> usize {
        self.profits.len()
    }
}
