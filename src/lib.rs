//! Mamdani fuzzy inference.
//!
//! Crisp inputs are fuzzified against each input variable's labelled
//! membership functions, rule antecedents are combined with a t-norm /
//! t-conorm, each rule clips its consequent, the clipped curves are
//! aggregated per output variable over its sampled universe, and the result
//! is defuzzified back into a crisp value.
//!
//! ```
//! use motor_fuzzy::{presets, Inputs};
//!
//! let system = presets::triangular().unwrap();
//! let outputs = system.infer(&Inputs::new().with("voltage", 15.).with("torque", 15.)).unwrap();
//! let speed = outputs.crisp("speed").unwrap();
//!
//! assert!(speed > 1000. && speed < 1900.);
//! ```

pub mod config;
mod dsl;
pub mod error;
mod inference;
mod inputs;
mod math;
mod membership;
pub mod ops;
mod outputs;
pub mod presets;
mod rules;
mod system;
mod terms;
mod universe;
mod variable;

pub use config::{RuleConfig, SystemConfig};
pub use dsl::{parse_assignment, Expr};
pub use error::{ConfigError, Error, InferenceError, Result};
pub use inference::Mamdani;
pub use inputs::Inputs;
pub use membership::MembershipFunction;
pub use ops::{AggregationOp, AndOp, DefuzzificationOp, ImplicationOp, OrOp};
pub use outputs::{Fuzzified, Outputs};
pub use rules::{Consequent, Rule, Rules};
pub use system::FuzzySystem;
pub use terms::{Term, Terms};
pub use universe::{Arange, Universe, MAX_POINTS};
pub use variable::{LinguisticVariable, Role, VariableKey, Variables};
