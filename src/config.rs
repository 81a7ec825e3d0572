//! TOML description of a fuzzy system.
//!
//! ```toml
//! [inference]
//! defuzzification = "centroid"
//!
//! [[variables]]
//! name = "voltage"
//! role = "input"
//! universe = { low = 0.0, high = 25.0, step = 1.0 }
//! terms = [
//!     { label = "Low", shape = "triangular", a = 4.0, b = 10.0, c = 15.0 },
//!     { label = "High", shape = "gaussian", mean = 18.0, sigma = 3.0 },
//! ]
//!
//! [[rules]]
//! when = "voltage is Low and torque is Low"
//! then = "speed is Slow"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::inference::Mamdani;
use crate::rules::{Rule, Rules};
use crate::system::FuzzySystem;
use crate::variable::LinguisticVariable;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Antecedent text, e.g. `voltage is Low and torque is Low`
    pub when: String,
    /// Consequent text, e.g. `speed is Slow`
    pub then: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemConfig {
    #[serde(default)]
    pub inference: Mamdani,
    pub variables: Vec<LinguisticVariable>,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl SystemConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_owned(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Parses the rule texts and runs the full configuration validation.
    pub fn build(self) -> Result<FuzzySystem, ConfigError> {
        let rules = self
            .rules
            .iter()
            .map(|rule| Rule::parse(&rule.when, &rule.then))
            .collect::<Result<Rules, _>>()?;

        FuzzySystem::configure_with(self.variables, rules, self.inference)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::{Error, InferenceError};
    use crate::inputs::Inputs;
    use crate::membership::MembershipFunction;
    use crate::ops::{AndOp, DefuzzificationOp};
    use crate::variable::Role;

    const SMALL: &str = r#"
[inference]
and = "prod"
defuzzification = "mean_of_maximum"

[[variables]]
name = "voltage"
role = "input"
universe = { low = 0.0, high = 10.0, step = 1.0 }
terms = [
    { label = "Very Low", shape = "triangular", a = 0.0, b = 0.0, c = 10.0 },
    { label = "High", shape = "gaussian", mean = 10.0, sigma = 2.0 },
]

[[variables]]
name = "speed"
role = "output"
universe = { low = 0.0, high = 100.0, step = 1.0 }
terms = [
    { label = "Slow", shape = "triangular", a = 0.0, b = 20.0, c = 40.0 },
    { label = "Fast", shape = "triangular", a = 60.0, b = 80.0, c = 100.0 },
]

[[rules]]
when = "voltage is Very Low"
then = "speed is Slow"

[[rules]]
when = "voltage is High"
then = "speed is Fast"
"#;

    #[test]
    fn test_parse_small_system() {
        let config = SystemConfig::from_toml_str(SMALL).unwrap();

        assert_eq!(config.inference.and_op, AndOp::Prod);
        assert_eq!(config.inference.defuzz_op, DefuzzificationOp::MeanOfMaximum);
        assert_eq!(config.variables.len(), 2);
        assert_eq!(config.variables[1].role, Role::Output);
        assert_eq!(
            config.variables[0].terms.get("High"),
            Some(&MembershipFunction::gaussian(10., 2.))
        );

        let system = config.build().unwrap();
        let outputs = system.infer(&Inputs::new().with("voltage", 0.)).unwrap();

        // "High" barely fires at 0, so the unclipped "Slow" peak is the single maximum
        assert_eq!(outputs.crisp("speed"), Some(20.));
    }

    #[test]
    fn test_bad_rule_text_fails_build() {
        let text = SMALL.replace("voltage is High", "voltage High");
        let err = SystemConfig::from_toml_str(&text).unwrap().build().unwrap_err();

        assert!(matches!(err, ConfigError::RuleSyntax { .. }));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let text = SMALL.replace("and = \"prod\"", "and = \"prod\"\ncolor = \"red\"");

        assert!(matches!(SystemConfig::from_toml_str(&text), Err(ConfigError::Toml(_))));

        let text = SMALL.replace("c = 40.0 }", "c = 40.0, d = 5.0 }");
        assert_ne!(text, SMALL);
        assert!(matches!(SystemConfig::from_toml_str(&text), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SMALL.as_bytes()).unwrap();

        let system = FuzzySystem::from_file(file.path()).unwrap();
        assert_eq!(system.rules().len(), 2);

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            FuzzySystem::from_file(&missing),
            Err(ConfigError::FileRead { .. })
        ));
    }

    #[test]
    fn test_infer_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SMALL.as_bytes()).unwrap();

        let outputs = FuzzySystem::infer_file(file.path(), &Inputs::new().with("voltage", 0.)).unwrap();
        assert_eq!(outputs.crisp("speed"), Some(20.));

        let err = FuzzySystem::infer_file(file.path(), &Inputs::new().with("voltage", 11.)).unwrap_err();
        assert!(matches!(err, Error::Inference(InferenceError::OutOfDomain { .. })));

        let missing = file.path().with_extension("missing");
        let err = FuzzySystem::infer_file(&missing, &Inputs::new()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::FileRead { .. })));
    }
}
