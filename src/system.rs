use std::path::Path;

use tracing::{debug, warn};

use crate::config::SystemConfig;
use crate::error::{self, ConfigError, InferenceError};
use crate::inference::Mamdani;
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::rules::{CompiledRule, Rules};
use crate::variable::{LinguisticVariable, Role, VariableKey, Variables};

/// A validated, immutable set of variables and rules.
///
/// Built once and shared read-only: [`FuzzySystem::infer`] takes `&self`, so
/// any number of threads may run inferences against one system.
#[derive(Clone, Debug)]
pub struct FuzzySystem {
    pub(crate) variables: Variables,
    pub(crate) rules: Rules,
    pub(crate) compiled: Vec<CompiledRule>,
    /// Inputs referenced by at least one rule, in declaration order.
    pub(crate) required: Vec<VariableKey>,
    pub(crate) inference: Mamdani,
}

impl FuzzySystem {
    /// Validates every variable and resolves every rule, using the default
    /// max-min operators.
    pub fn configure(
        variables: impl IntoIterator<Item = LinguisticVariable>,
        rules: Rules,
    ) -> Result<Self, ConfigError> {
        Self::configure_with(variables, rules, Mamdani::default())
    }

    pub fn configure_with(
        variables: impl IntoIterator<Item = LinguisticVariable>,
        rules: Rules,
        inference: Mamdani,
    ) -> Result<Self, ConfigError> {
        let mut vars = Variables::new();

        for var in variables {
            vars.add(var)?;
        }

        if rules.is_empty() {
            return Err(ConfigError::EmptyRuleBase);
        }

        let compiled = rules
            .iter()
            .enumerate()
            .map(|(i, rule)| CompiledRule::compile(i, rule, &vars))
            .collect::<Result<Vec<_>, _>>()?;

        let required = vars
            .with_role(Role::Input)
            .filter(|(_, var)| {
                rules
                    .iter()
                    .any(|rule| rule.antecedent.propositions().iter().any(|(name, _)| *name == var.name))
            })
            .map(|(key, _)| key)
            .collect();

        for (_, var) in vars.with_role(Role::Output) {
            if !rules.iter().any(|rule| rule.consequent.variable == var.name) {
                warn!(variable = %var.name, "Output variable is not the consequent of any rule");
            }
        }

        debug!(variables = vars.len(), rules = rules.len(), "Configured fuzzy system");

        Ok(Self {
            variables: vars,
            rules,
            compiled,
            required,
            inference,
        })
    }

    /// Loads and configures a system from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        SystemConfig::from_file(path.as_ref())?.build()
    }

    /// Loads a system from `path` and runs a single inference against it.
    pub fn infer_file(path: impl AsRef<Path>, inputs: &Inputs) -> error::Result<Outputs> {
        let system = Self::from_file(path)?;

        Ok(system.infer(inputs)?)
    }

    pub fn infer(&self, inputs: &Inputs) -> Result<Outputs, InferenceError> {
        self.inference.eval(self, inputs)
    }

    /// `(point, degree)` samples of one label across its variable's universe.
    ///
    /// Reads the same term table the engine evaluates, so plotted curves and
    /// inferred curves cannot diverge.
    pub fn sample_curve(&self, variable: &str, label: &str) -> Option<Vec<(f64, f64)>> {
        self.variables.get(variable)?.sample(label)
    }

    /// Every label of `variable`, in legend order.
    pub fn sample_variable(&self, variable: &str) -> Option<Vec<(&str, Vec<(f64, f64)>)>> {
        self.variables.get(variable).map(LinguisticVariable::sample_all)
    }

    pub fn variable(&self, name: &str) -> Option<&LinguisticVariable> {
        self.variables.get(name)
    }

    pub fn variables(&self) -> impl Iterator<Item = &LinguisticVariable> {
        self.variables.iter().map(|(_, var)| var)
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn inference(&self) -> &Mamdani {
        &self.inference
    }
}
