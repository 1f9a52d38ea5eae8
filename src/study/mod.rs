//! The experiment grid and the external solvers it drives.

pub mod grid;
pub mod invoke;
pub mod run;
pub mod solver;
