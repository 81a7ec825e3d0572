use num::Float;
use serde::{Deserialize, Serialize};

use crate::math::interp;

/// And operator method for combining the propositions of a rule antecedent.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if v == F::one() {
                    u
                } else if u == F::one() {
                    v
                } else {
                    F::zero()
                }
            },
        }
    }
}

/// Or operator method for combining the propositions of a rule antecedent.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
        }
    }
}

/// How a rule's firing strength shapes its consequent's membership curve.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplicationOp {
    /// Mamdani clipping
    #[default]
    Min,
    /// Larsen scaling
    Prod,
}

impl ImplicationOp {
    pub fn call<F: Float>(self, strength: F, membership: F) -> F {
        match self {
            Self::Min => F::min(strength, membership),
            Self::Prod => strength * membership,
        }
    }
}

/// Method for aggregating the implied consequents targeting one output variable.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
}

impl AggregationOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => OrOp::Max.call(u, v),
            Self::ProbOr => OrOp::ProbOr.call(u, v),
            Self::BoundedSum => OrOp::BoundedSum.call(u, v),
        }
    }
}

/// Method for defuzzificating the aggregated membership curve.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzificationOp {
    /// Center of gravity over the sampled points
    #[default]
    Centroid,
    /// Point splitting the area under the curve in two halves
    Bisector,
    /// Mean of the points at which the curve is maximum
    MeanOfMaximum,
    /// Smallest point at which the curve is maximum
    SmallestOfMaximum,
    /// Largest point at which the curve is maximum
    LargestOfMaximum,
}

impl DefuzzificationOp {
    /// Returns `None` when the curve is zero everywhere, where every method is undefined.
    pub fn call<F: Float>(self, universe: &[F], membership: &[F]) -> Option<F> {
        debug_assert_eq!(universe.len(), membership.len());

        let total = membership.iter().fold(F::zero(), |acc, m| acc + *m);

        if total == F::zero() || universe.is_empty() {
            return None;
        }

        fn at_maximum<F: Float>(universe: &[F], membership: &[F]) -> Vec<F> {
            let maximum = membership.iter().copied().fold(F::zero(), F::max);

            universe
                .iter()
                .copied()
                .zip(membership.iter().copied())
                .filter_map(|(u, m)| if m == maximum { Some(u) } else { None })
                .collect()
        }

        match self {
            Self::Centroid => {
                let num = universe
                    .iter()
                    .zip(membership)
                    .fold(F::zero(), |acc, (u, m)| acc + *u * *m);

                Some(num / total)
            },
            Self::Bisector => {
                let two = F::one() + F::one();
                let n_areas = universe.len() - 1;

                if n_areas == 0 {
                    return Some(universe[0]);
                }

                let areas: Vec<F> = (0..n_areas)
                    .map(|i| (membership[i] + membership[i + 1]) * (universe[i + 1] - universe[i]) / two)
                    .collect();
                let target = areas.iter().fold(F::zero(), |acc, a| acc + *a) / two;
                let mut cum_area = F::zero();
                let mut i_area = n_areas - 1;

                for (i, area) in areas.iter().enumerate() {
                    cum_area = cum_area + *area;
                    if cum_area >= target {
                        i_area = i;
                        break;
                    }
                }

                let coords = [
                    (cum_area - areas[i_area], universe[i_area]),
                    (cum_area, universe[i_area + 1]),
                ];

                interp(Some(target), &coords).into_iter().next()
            },
            Self::MeanOfMaximum => {
                let peaks = at_maximum(universe, membership);
                let sum = peaks.iter().fold(F::zero(), |acc, u| acc + *u);

                F::from(peaks.len()).map(|len| sum / len)
            },
            Self::SmallestOfMaximum => at_maximum(universe, membership).into_iter().reduce(F::min),
            Self::LargestOfMaximum => at_maximum(universe, membership).into_iter().reduce(F::max),
        }
    }
}
