//! The solver variants benchmarked in each family and their command lines.

use std::{fmt, path::Path};

use crate::deviation::DeviationVector;
use crate::paths::Family;

/// One solver configuration: a python module plus fixed flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverVariant {
    pub family: Family,
    /// Name of the variant's directory under `results/<family>/`.
    pub dir: &'static str,
    pub module: &'static str,
    /// Passed before the instance arguments, in this order.
    pub flags: &'static [&'static str],
}

pub const STANDARD_VARIANTS: [SolverVariant; 3] = [
    SolverVariant {
        family: Family::Standard,
        dir: "bkp",
        module: "src.min_max_heuristic",
        flags: &["--modify", "True"],
    },
    SolverVariant {
        family: Family::Standard,
        dir: "bnc",
        module: "src.min_max_heuristic",
        flags: &["--solver", "ic", "--modify", "True"],
    },
    SolverVariant {
        family: Family::Standard,
        dir: "greedy",
        module: "src.greedy_interdiction",
        flags: &[],
    },
];

pub const GENERALIZED_VARIANTS: [SolverVariant; 4] = [
    SolverVariant {
        family: Family::Generalized,
        dir: "heuristic",
        module: "src.general_heuristic",
        flags: &[],
    },
    SolverVariant {
        family: Family::Generalized,
        dir: "one-shot",
        module: "src.iterate_heuristic",
        flags: &["--one_shot", "True"],
    },
    SolverVariant {
        family: Family::Generalized,
        dir: "iterate",
        module: "src.iterate_heuristic",
        flags: &[],
    },
    SolverVariant {
        family: Family::Generalized,
        dir: "exact",
        module: "src.gamma_robust_extended_model",
        flags: &[],
    },
];

/// General heuristic with the refinement pass. Only run on request.
pub const REFINED_HEURISTIC: SolverVariant = SolverVariant {
    family: Family::Generalized,
    dir: "refined",
    module: "src.general_heuristic",
    flags: &["--refine", "True"],
};

/// The variants run for `family`, in execution order.
pub fn variants(family: Family, include_refined: bool) -> Vec<&'static SolverVariant> {
    match family {
        Family::Standard => STANDARD_VARIANTS.iter().collect(),
        Family::Generalized => {
            let mut variants: Vec<_> = GENERALIZED_VARIANTS.iter().collect();
            if include_refined {
                variants.push(&REFINED_HEURISTIC);
            }
            variants
        }
    }
}

/// A fully formatted solver command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl SolverVariant {
    pub fn invocation(
        &self,
        python: &str,
        instance_file: &Path,
        conservatism: f64,
        deviations: &DeviationVector,
        output_file: &Path,
    ) -> Invocation {
        let mut args = vec!["-m".to_string(), self.module.to_string()];
        args.extend(self.flags.iter().map(|f| f.to_string()));
        args.extend([
            "--instance_file".to_string(),
            path_arg(instance_file),
            "--conservatism".to_string(),
            conservatism.to_string(),
            "--deviations".to_string(),
        ]);
        // one word per item, as a shell would split the joined token
        args.extend(deviations.0.iter().map(|d| d.to_string()));
        args.extend(["--output_file".to_string(), path_arg(output_file)]);
        Invocation { program: python.to_string(), args }
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Renders the command the way it would be typed in a shell.
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains(|c: char| c.is_whitespace() || c == '"' || c == '\'') {
        arg.to_string()
    } else {
        format!("\"{}\"", arg.replace('"', "\\\""))
    }
}
