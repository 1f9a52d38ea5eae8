//! Deterministic synthesis of the per-item profit deviations.
//!
//! Every item draws from its own generator, seeded with `index * len` where
//! `len` is the number of items. A deviation therefore depends only on the
//! item's position, the instance size, its profit, the uncertainty and the
//! model: never on call order or on draws made elsewhere in the process.

use std::{fmt, path::{Path, PathBuf}, str::FromStr};

use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use rand_distr::{Distribution, Uniform};

use crate::error::{Result, StudyError};
use crate::instance::BkipInstance;
use crate::setting::uncertainty_parameters;

/// Distribution the deviations are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviationModel {
    /// Uniform integer in `[0, ceil(uncertainty * profit)]`.
    Integer,
    /// `profit * U[0, uncertainty)`, rounded to one decimal.
    Continuous,
}

impl DeviationModel {
    /// Name of the result subdirectory for this model.
    pub fn dir_name(self) -> &'static str {
        match self {
            DeviationModel::Integer => "randint",
            DeviationModel::Continuous => "cont",
        }
    }
}

impl fmt::Display for DeviationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Parses the `--randint` flag: `True` selects integer deviations, `False`
/// continuous ones.
impl FromStr for DeviationModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(DeviationModel::Integer),
            "false" => Ok(DeviationModel::Continuous),
            _ => Err(format!("expected True or False, got '{s}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deviation {
    Integer(u64),
    Continuous(f64),
}

impl Deviation {
    pub fn value(self) -> f64 {
        match self {
            Deviation::Integer(v) => v as f64,
            Deviation::Continuous(v) => v,
        }
    }
}

impl fmt::Display for Deviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deviation::Integer(v) => write!(f, "{v}"),
            Deviation::Continuous(v) => write!(f, "{v:.1}"),
        }
    }
}

/// One deviation per item, in item order.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviationVector(pub Vec<Deviation>);

impl DeviationVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(|d| d.value()).collect()
    }

    /// The single command-line token handed to the solvers.
    pub fn to_token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DeviationVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// Generates the deviation vector of `profits`.
pub fn generate(profits: &[f64], uncertainty: f64, model: DeviationModel) -> Result<DeviationVector> {
    if !uncertainty.is_finite() || uncertainty < 0.0 {
        return Err(StudyError::InvalidUncertainty(uncertainty));
    }
    let len = profits.len();
    profits
        .iter()
        .copied()
        .enumerate()
        .map(|(index, profit)| {
            let mut rng = item_rng(index, len);
            draw(&mut rng, index, profit, uncertainty, model)
        })
        .collect::<Result<Vec<_>>>()
        .map(DeviationVector)
}

/// Loads the instance at `path` and generates its deviations.
pub fn generate_for_file(path: &Path, uncertainty: f64, model: DeviationModel) -> Result<DeviationVector> {
    let instance = BkipInstance::load(path)?;
    generate(&instance.profits, uncertainty, model)
}

/// Seed of the generator for item `index` of a vector of `len` items.
pub fn item_seed(index: usize, len: usize) -> u64 {
    (index as u64).wrapping_mul(len as u64)
}

/// A fresh generator for item `index`, independent of any other state.
pub fn item_rng(index: usize, len: usize) -> ChaChaRng {
    let init = item_seed(index, len) as u128;
    let mut seed = [0_u8; 32];
    seed.iter_mut().zip(init.to_be_bytes().into_iter()).for_each(|(s, i)| *s = i);
    seed.iter_mut().rev().zip(init.to_le_bytes().into_iter()).for_each(|(s, i)| *s = i);
    ChaChaRng::from_seed(seed)
}

fn draw(rng: &mut ChaChaRng, index: usize, profit: f64, uncertainty: f64, model: DeviationModel) -> Result<Deviation> {
    if !profit.is_finite() {
        return Err(StudyError::InvalidProfit { index, profit });
    }
    match model {
        DeviationModel::Integer => {
            let high = (uncertainty * profit).ceil() + 1.0;
            if high < 1.0 {
                return Err(StudyError::InvalidProfit { index, profit });
            }
            Ok(Deviation::Integer(Uniform::new(0, high as u64).sample(rng)))
        }
        DeviationModel::Continuous => {
            if uncertainty == 0.0 {
                return Ok(Deviation::Continuous(0.0));
            }
            let share = Uniform::new(0.0, uncertainty).sample(rng);
            let rounded = (share * profit * 10.0).round_ties_even() / 10.0;
            // avoid printing -0.0
            Ok(Deviation::Continuous(rounded + 0.0))
        }
    }
}

#[derive(Debug, Args)]
pub struct Deviations {
    /// The path to the instance file
    #[clap(short, long)]
    pub instance_file: PathBuf,
    /// The setting whose uncertainty is used
    #[clap(short, long, default_value = "1", conflicts_with = "uncertainty")]
    pub setting: u32,
    /// An explicit uncertainty level, overriding the setting
    #[clap(short, long)]
    pub uncertainty: Option<f64>,
}

impl Deviations {
    pub fn print(&self, model: DeviationModel) -> Result<()> {
        let uncertainty = self
            .uncertainty
            .unwrap_or_else(|| uncertainty_parameters(self.setting).uncertainty);
        let deviations = generate_for_file(&self.instance_file, uncertainty, model)?;
        println!("{deviations}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::RngCore;

    use super::*;

    #[test]
    fn seeds_depend_on_position_and_length() {
        assert_eq!(item_seed(0, 3), 0);
        assert_eq!(item_seed(1, 3), 3);
        assert_eq!(item_seed(2, 3), 6);

        let mut a = item_rng(2, 3);
        let mut b = item_rng(1, 6);
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn generation_is_deterministic() {
        let profits = [12.0, 7.0, 33.0, 0.0, 51.0];
        for model in [DeviationModel::Integer, DeviationModel::Continuous] {
            let a = generate(&profits, 0.1, model).unwrap();
            let b = generate(&profits, 0.1, model).unwrap();
            assert_eq!(a, b);
            assert_eq!(a.len(), profits.len());
        }
    }

    #[test]
    fn zero_profit_has_zero_integer_deviation() {
        for len in 1..20 {
            let mut profits = vec![40.0; len];
            profits[len - 1] = 0.0;
            let deviations = generate(&profits, 0.1, DeviationModel::Integer).unwrap();
            assert_eq!(deviations.0[len - 1], Deviation::Integer(0));
        }
    }

    #[test]
    fn zero_uncertainty_yields_zeros() {
        let profits = [10.0, 20.0];
        let int = generate(&profits, 0.0, DeviationModel::Integer).unwrap();
        assert!(int.values().iter().all(|v| *v == 0.0));
        let cont = generate(&profits, 0.0, DeviationModel::Continuous).unwrap();
        assert_eq!(cont.to_token(), "0.0 0.0");
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert!(matches!(
            generate(&[1.0], -0.1, DeviationModel::Integer),
            Err(StudyError::InvalidUncertainty(_))
        ));
        assert!(matches!(
            generate(&[1.0, -30.0], 0.1, DeviationModel::Integer),
            Err(StudyError::InvalidProfit { index: 1, .. })
        ));
        assert!(matches!(
            generate(&[f64::NAN], 0.1, DeviationModel::Continuous),
            Err(StudyError::InvalidProfit { index: 0, .. })
        ));
    }

    #[test]
    fn token_formatting() {
        let v = DeviationVector(vec![Deviation::Integer(3), Deviation::Integer(0), Deviation::Integer(12)]);
        assert_eq!(v.to_token(), "3 0 12");
        let v = DeviationVector(vec![Deviation::Continuous(2.0), Deviation::Continuous(0.3)]);
        assert_eq!(v.to_token(), "2.0 0.3");
        assert_eq!(DeviationVector(vec![]).to_token(), "");
    }

    #[test]
    fn randint_flag() {
        assert_eq!("True".parse::<DeviationModel>(), Ok(DeviationModel::Integer));
        assert_eq!("False".parse::<DeviationModel>(), Ok(DeviationModel::Continuous));
        assert_eq!("true".parse::<DeviationModel>(), Ok(DeviationModel::Integer));
        assert!("yes".parse::<DeviationModel>().is_err());
    }
}
