//! Error types for motor-fuzzy.
//!
//! Two families:
//! - [`ConfigError`]: a variable or rule definition is malformed. Raised while
//!   building a [`FuzzySystem`](crate::FuzzySystem) and never at inference time.
//! - [`InferenceError`]: a single inference call was rejected. The system that
//!   produced it is untouched and can be queried again.

use std::path::PathBuf;

use thiserror::Error;

/// Setup-time errors. A system that fails with one of these is never built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("variable '{variable}' has a degenerate universe [{low}, {high}) with step {step}")]
    DegenerateUniverse {
        variable: String,
        low: f64,
        high: f64,
        step: f64,
    },

    #[error("term '{label}' of variable '{variable}' is invalid: {reason}")]
    InvalidMembership {
        variable: String,
        label: String,
        reason: String,
    },

    #[error("variable '{0}' declares no terms")]
    EmptyTerms(String),

    #[error("variable '{0}' is declared more than once")]
    DuplicateVariable(String),

    #[error("variable '{variable}' declares label '{label}' more than once")]
    DuplicateLabel { variable: String, label: String },

    #[error("rule {rule} references unknown variable '{variable}'")]
    UnknownVariable { rule: usize, variable: String },

    #[error("rule {rule} references unknown label '{label}' of variable '{variable}'")]
    UnknownLabel {
        rule: usize,
        variable: String,
        label: String,
    },

    #[error("rule {rule} uses {role} variable '{variable}' in its {position}")]
    RoleMismatch {
        rule: usize,
        variable: String,
        role: &'static str,
        position: &'static str,
    },

    #[error("the rule base is empty")]
    EmptyRuleBase,

    #[error("cannot parse rule text '{text}': {reason}")]
    RuleSyntax { text: String, reason: String },

    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Per-call errors.
#[derive(Debug, Error, PartialEq)]
pub enum InferenceError {
    #[error("input '{variable}' = {value} is outside its domain [{low}, {high}]")]
    OutOfDomain {
        variable: String,
        value: f64,
        low: f64,
        high: f64,
    },

    #[error("input '{0}' is required by the rule base but was not supplied")]
    MissingInput(String),

    #[error("no rule fired for output '{0}'; the crisp output cannot be calculated")]
    NoRuleFired(String),
}

impl InferenceError {
    /// Whether the request itself was bad, as opposed to a rule base that does
    /// not cover a valid request.
    pub fn is_out_of_domain(&self) -> bool {
        matches!(self, Self::OutOfDomain { .. } | Self::MissingInput(_))
    }
}

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

pub type Result<T> = std::result::Result<T, Error>;
