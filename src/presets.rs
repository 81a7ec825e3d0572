//! The DC motor speed systems: voltage (V) and torque (Nm) on `[0, 25]`,
//! speed on `[0, 2500]`.

use crate::dsl::Expr;
use crate::error::ConfigError;
use crate::membership::MembershipFunction;
use crate::rules::Rules;
use crate::system::FuzzySystem;
use crate::terms::Terms;
use crate::universe::Universe;
use crate::variable::LinguisticVariable;

pub const VOLTAGE: &str = "voltage";
pub const TORQUE: &str = "torque";
pub const SPEED: &str = "speed";

/// Input labels, lowest first.
pub const LEVELS: [&str; 5] = ["Very Low", "Low", "Medium", "High", "Very High"];
/// Output labels, slowest first.
pub const SPEEDS: [&str; 5] = ["Very Slow", "Slow", "Moderate", "Fast", "Very Fast"];

fn input_universe() -> Universe {
    Universe::new(0., 25., 1.)
}

fn speed_universe() -> Universe {
    Universe::new(0., 2500., 1.)
}

fn triangular_levels() -> Terms {
    let breakpoints = [(0., 5., 10.), (4., 10., 15.), (8., 15., 20.), (12., 18., 25.), (18., 25., 25.)];

    LEVELS
        .into_iter()
        .zip(breakpoints)
        .map(|(label, (a, b, c))| (label, MembershipFunction::triangular(a, b, c)))
        .collect()
}

fn triangular_speeds() -> Terms {
    let breakpoints = [
        (0., 500., 1000.),
        (400., 1000., 1500.),
        (800., 1500., 2000.),
        (1200., 2000., 2500.),
        (1800., 2500., 2500.),
    ];

    SPEEDS
        .into_iter()
        .zip(breakpoints)
        .map(|(label, (a, b, c))| (label, MembershipFunction::triangular(a, b, c)))
        .collect()
}

fn gaussian_terms(labels: [&str; 5], means: [f64; 5], sigma: f64) -> Terms {
    labels
        .into_iter()
        .zip(means)
        .map(|(label, mean)| (label, MembershipFunction::gaussian(mean, sigma)))
        .collect()
}

fn variables(levels: Terms, speeds: Terms) -> Vec<LinguisticVariable> {
    vec![
        LinguisticVariable::input(VOLTAGE, input_universe(), levels.clone()),
        LinguisticVariable::input(TORQUE, input_universe(), levels),
        LinguisticVariable::output(SPEED, speed_universe(), speeds),
    ]
}

/// `voltage is L and torque is L => speed is S` for the i-th level / speed.
pub fn diagonal_rules() -> Rules {
    let mut rules = Rules::with_capacity(LEVELS.len());

    for (level, speed) in LEVELS.into_iter().zip(SPEEDS) {
        rules.add(Expr::is(VOLTAGE, level).and(Expr::is(TORQUE, level)), SPEED, speed);
    }

    rules
}

/// One rule per (voltage, torque) pair. Speed rises with voltage and falls
/// with torque: bucket = voltage level - torque level + 2, clamped.
pub fn combinatorial_rules() -> Rules {
    let mut rules = Rules::with_capacity(LEVELS.len() * LEVELS.len());

    for (v, voltage) in LEVELS.into_iter().enumerate() {
        for (t, torque) in LEVELS.into_iter().enumerate() {
            let bucket = (v + 2).saturating_sub(t).min(SPEEDS.len() - 1);

            rules.add(
                Expr::is(VOLTAGE, voltage).and(Expr::is(TORQUE, torque)),
                SPEED,
                SPEEDS[bucket],
            );
        }
    }

    rules
}

/// Triangular terms with the five diagonal rules.
pub fn triangular() -> Result<FuzzySystem, ConfigError> {
    FuzzySystem::configure(variables(triangular_levels(), triangular_speeds()), diagonal_rules())
}

/// Gaussian terms with the five diagonal rules.
pub fn gaussian() -> Result<FuzzySystem, ConfigError> {
    let levels = gaussian_terms(LEVELS, [0., 7., 13., 18., 25.], 3.);
    let speeds = gaussian_terms(SPEEDS, [0., 750., 1250., 1750., 2500.], 500.);

    FuzzySystem::configure(variables(levels, speeds), diagonal_rules())
}

/// Triangular terms with the full 25-rule base.
pub fn combinatorial() -> Result<FuzzySystem, ConfigError> {
    FuzzySystem::configure(variables(triangular_levels(), triangular_speeds()), combinatorial_rules())
}
