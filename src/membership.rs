use serde::{Deserialize, Serialize};

use crate::universe::Universe;

/// Shape of a linguistic term.
///
/// Both shapes are total: `degree` is defined for every real `x` and always
/// lands in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum MembershipFunction {
    /// Peak at `b`, zero at and outside `[a, c]`, linear ramps in between.
    Triangular { a: f64, b: f64, c: f64 },
    /// Unbounded bell curve centred on `mean`.
    Gaussian { mean: f64, sigma: f64 },
}

impl MembershipFunction {
    pub fn triangular(a: f64, b: f64, c: f64) -> Self {
        Self::Triangular { a, b, c }
    }

    pub fn gaussian(mean: f64, sigma: f64) -> Self {
        Self::Gaussian { mean, sigma }
    }

    /// Membership degree of the crisp value `x`.
    pub fn degree(&self, x: f64) -> f64 {
        match *self {
            Self::Triangular { a, b, c } => {
                // Checked first so a zero-width ramp behaves as a vertical step
                if x == b {
                    1.
                } else if x <= a || x >= c {
                    0.
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            },
            Self::Gaussian { mean, sigma } => (-(x - mean).powi(2) / (2. * sigma.powi(2))).exp(),
        }
    }

    /// Samples the function at every point of `universe`.
    pub fn sample(&self, universe: &Universe) -> Vec<(f64, f64)> {
        universe.points().map(|p| (p, self.degree(p))).collect()
    }

    /// Checks the parameter invariants, returning a reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            Self::Triangular { a, b, c } => {
                if !(a.is_finite() && b.is_finite() && c.is_finite()) {
                    return Err(format!("triangular breakpoints ({a}, {b}, {c}) must be finite"));
                }
                if !(a <= b && b <= c) {
                    return Err(format!("triangular breakpoints ({a}, {b}, {c}) must satisfy a <= b <= c"));
                }
                Ok(())
            },
            Self::Gaussian { mean, sigma } => {
                if !mean.is_finite() {
                    return Err(format!("gaussian mean {mean} must be finite"));
                }
                if !(sigma.is_finite() && sigma > 0.) {
                    return Err(format!("gaussian sigma {sigma} must be positive"));
                }
                Ok(())
            },
        }
    }
}
