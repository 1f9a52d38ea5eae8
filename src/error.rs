//! Errors that stop a study run.
//!
//! Solver failures are not part of this taxonomy: they are recorded as an
//! [`InvocationOutcome`](crate::study::invoke::InvocationOutcome) and the grid
//! carries on.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudyError {
    /// The instance file is missing or could not be read.
    #[error("cannot read instance file {}", path.display())]
    InstanceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The instance file is not JSON or has no `profits` array.
    #[error("malformed instance file {}", path.display())]
    InstanceFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot create output directory {}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("uncertainty must be finite and non-negative, got {0}")]
    InvalidUncertainty(f64),
    #[error("profit {profit} of item {index} admits no integer deviation")]
    InvalidProfit { index: usize, profit: f64 },
}

impl StudyError {
    /// Whether this error stems from the instance file itself.
    pub fn is_instance_error(&self) -> bool {
        matches!(self, StudyError::InstanceRead { .. } | StudyError::InstanceFormat { .. })
    }
}

pub type Result<T> = std::result::Result<T, StudyError>;
