use std::collections::HashMap;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::error::ConfigError;
use crate::membership::MembershipFunction;
use crate::terms::Terms;
use crate::universe::Universe;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Antecedent: receives a crisp value per inference call.
    Input,
    /// Consequent: produced by defuzzification.
    Output,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Input => "input",
            Role::Output => "output",
        }
    }
}

/// A named real-valued quantity with its universe and labelled terms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinguisticVariable {
    pub name: String,
    pub role: Role,
    pub universe: Universe,
    pub terms: Terms,
}

impl LinguisticVariable {
    pub fn new(name: impl Into<String>, role: Role, universe: Universe, terms: Terms) -> Self {
        Self {
            name: name.into(),
            role,
            universe,
            terms,
        }
    }

    pub fn input(name: impl Into<String>, universe: Universe, terms: Terms) -> Self {
        Self::new(name, Role::Input, universe, terms)
    }

    pub fn output(name: impl Into<String>, universe: Universe, terms: Terms) -> Self {
        Self::new(name, Role::Output, universe, terms)
    }

    /// Degree of every label at the crisp value `x`, in label order.
    ///
    /// Evaluated analytically rather than read off the sampled curve.
    pub fn fuzzify(&self, x: f64) -> Vec<f64> {
        self.terms.iter().map(|t| t.function.degree(x)).collect()
    }

    /// Samples one label across the universe.
    pub fn sample(&self, label: &str) -> Option<Vec<(f64, f64)>> {
        self.terms.get(label).map(|mf| mf.sample(&self.universe))
    }

    /// Samples every label, in legend order.
    pub fn sample_all(&self) -> Vec<(&str, Vec<(f64, f64)>)> {
        self.terms
            .iter()
            .map(|t| (t.label.as_str(), t.function.sample(&self.universe)))
            .collect()
    }

    pub(crate) fn function_at(&self, label_index: usize) -> &MembershipFunction {
        &self.terms.0[label_index].function
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let Universe { low, high, step } = self.universe;

        if !self.universe.is_valid() {
            return Err(ConfigError::DegenerateUniverse {
                variable: self.name.clone(),
                low,
                high,
                step,
            });
        }

        if self.terms.is_empty() {
            return Err(ConfigError::EmptyTerms(self.name.clone()));
        }

        let mut seen = HashSet::with_capacity(self.terms.len());

        for term in self.terms.iter() {
            if !seen.insert(term.label.as_str()) {
                return Err(ConfigError::DuplicateLabel {
                    variable: self.name.clone(),
                    label: term.label.clone(),
                });
            }

            term.function
                .validate()
                .map_err(|reason| ConfigError::InvalidMembership {
                    variable: self.name.clone(),
                    label: term.label.clone(),
                    reason,
                })?;
        }

        Ok(())
    }
}

/// Keyed store of validated variables, iterated in declaration order.
#[derive(Clone, Debug, Default)]
pub struct Variables {
    slots: SlotMap<VariableKey, LinguisticVariable>,
    order: Vec<VariableKey>,
    names: HashMap<String, VariableKey>,
}

impl Variables {
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            order: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Validates and stores `var`.
    pub fn add(&mut self, var: LinguisticVariable) -> Result<VariableKey, ConfigError> {
        var.validate()?;

        if self.names.contains_key(&var.name) {
            return Err(ConfigError::DuplicateVariable(var.name));
        }

        let name = var.name.clone();
        let key = self.slots.insert(var);

        self.order.push(key);
        self.names.insert(name, key);

        Ok(key)
    }

    pub fn key(&self, name: &str) -> Option<VariableKey> {
        self.names.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&LinguisticVariable> {
        self.key(name).map(|key| &self.slots[key])
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableKey, &LinguisticVariable)> {
        self.order.iter().map(|key| (*key, &self.slots[*key]))
    }

    pub fn with_role(&self, role: Role) -> impl Iterator<Item = (VariableKey, &LinguisticVariable)> {
        self.iter().filter(move |(_, var)| var.role == role)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl std::ops::Index<VariableKey> for Variables {
    type Output = LinguisticVariable;

    fn index(&self, key: VariableKey) -> &LinguisticVariable {
        &self.slots[key]
    }
}
