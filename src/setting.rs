//! Robustness settings of the study.

/// The settings the study is defined for.
pub const DEFINED_SETTINGS: [u32; 4] = [1, 2, 3, 4];

/// Uncertainty and conservatism applied to one setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UncertaintyParameters {
    /// Fraction of each profit an item may deviate by.
    pub uncertainty: f64,
    /// Gamma, passed to the solvers as `--conservatism`.
    pub conservatism: f64,
}

/// Maps a setting to its parameters.
///
/// The uncertainty is 0.1 for every setting; odd settings use a conservatism of
/// 0.1 and even ones 0.5. Any setting outside 1..=4 gets the fallback
/// (0.1, 0.5), see [`is_defined`].
pub fn uncertainty_parameters(setting: u32) -> UncertaintyParameters {
    // same level for every setting, only gamma varies
    let uncertainty = 0.1;
    let conservatism = match setting {
        1 | 3 => 0.1,
        _ => 0.5,
    };
    UncertaintyParameters { uncertainty, conservatism }
}

pub fn is_defined(setting: u32) -> bool {
    DEFINED_SETTINGS.contains(&setting)
}
