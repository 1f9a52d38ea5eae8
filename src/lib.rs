//! Driver for the computational study on Gamma-robust bilevel knapsack
//! interdiction: synthesizes reproducible deviations for every instance and
//! runs each external solver once per cell of the experiment grid.

pub mod deviation;
pub mod error;
pub mod instance;
pub mod paths;
pub mod setting;
pub mod study;
