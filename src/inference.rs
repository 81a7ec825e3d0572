use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use slotmap::SecondaryMap;
use tracing::{debug, trace, warn};

use crate::error::InferenceError;
use crate::inputs::Inputs;
use crate::ops::*;
use crate::outputs::{Fuzzified, Outputs};
use crate::rules::CompiledExpr;
use crate::system::FuzzySystem;
use crate::variable::{Role, VariableKey};

/// Operator selection for a Mamdani inference run.
///
/// The default is the classic max-min system: `min` conjunction, `max`
/// disjunction, clipping implication, `max` aggregation and centroid
/// defuzzification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Mamdani {
    #[serde(rename = "and")]
    pub and_op: AndOp,
    #[serde(rename = "or")]
    pub or_op: OrOp,
    #[serde(rename = "implication")]
    pub imp_op: ImplicationOp,
    #[serde(rename = "aggregation")]
    pub agg_op: AggregationOp,
    #[serde(rename = "defuzzification")]
    pub defuzz_op: DefuzzificationOp,
}

impl Mamdani {
    pub fn new(
        and_op: AndOp,
        or_op: OrOp,
        imp_op: ImplicationOp,
        agg_op: AggregationOp,
        defuzz_op: DefuzzificationOp,
    ) -> Self {
        Self {
            and_op,
            or_op,
            imp_op,
            agg_op,
            defuzz_op,
        }
    }

    /// Runs one inference over `system`.
    ///
    /// Either every targeted output variable is defuzzified or the call fails;
    /// a partial result is never returned.
    pub fn eval(&self, system: &FuzzySystem, inputs: &Inputs) -> Result<Outputs, InferenceError> {
        let vars = &system.variables;

        for (name, value) in inputs.iter() {
            match vars.get(name) {
                None => warn!(variable = name, value, "Ignoring input for an undeclared variable"),
                Some(var) if var.role == Role::Output => {
                    warn!(variable = name, value, "Ignoring input for an output variable")
                },
                Some(_) => {},
            }
        }

        // Validate
        let mut crisp_inputs = SecondaryMap::with_capacity(system.required.len());

        for (key, var) in vars.with_role(Role::Input) {
            let value = match inputs.get(&var.name) {
                Some(value) => value,
                None if system.required.contains(&key) => {
                    return Err(InferenceError::MissingInput(var.name.clone()));
                },
                None => continue,
            };

            if !var.universe.contains(value) {
                return Err(InferenceError::OutOfDomain {
                    variable: var.name.clone(),
                    value,
                    low: var.universe.low,
                    high: var.universe.high,
                });
            }

            crisp_inputs.insert(key, value);
        }

        debug!(inputs = crisp_inputs.len(), rules = system.compiled.len(), "Running inference");

        // Fuzzificate crisp inputs
        let mut fact_values: SecondaryMap<VariableKey, Vec<f64>> =
            SecondaryMap::with_capacity(crisp_inputs.len());

        for (key, value) in &crisp_inputs {
            fact_values.insert(key, vars[key].fuzzify(*value));
        }

        // Rule firing strengths
        let firing_strengths: Vec<f64> = system
            .compiled
            .iter()
            .enumerate()
            .map(|(i, rule)| {
                let strength = self.strength(&rule.antecedent, &fact_values);

                trace!(rule = i, strength, "Rule fired");

                strength
            })
            .collect();

        // Implication and aggregation
        let mut aggregated_memberships: SecondaryMap<VariableKey, Vec<f64>> = SecondaryMap::new();

        for (rule, strength) in system.compiled.iter().zip(&firing_strengths) {
            let var = &vars[rule.output];

            // A targeted output gets a curve even when none of its rules fire
            if !aggregated_memberships.contains_key(rule.output) {
                aggregated_memberships.insert(rule.output, vec![0.; var.universe.len()]);
            }

            if *strength == 0. {
                continue;
            }

            let Some(agg) = aggregated_memberships.get_mut(rule.output) else {
                continue;
            };
            let consequent = var.function_at(rule.label);

            for (agg, p) in agg.iter_mut().zip(var.universe.points()) {
                let implied = self.imp_op.call(*strength, consequent.degree(p));
                *agg = self.agg_op.call(*agg, implied);
            }
        }

        // Defuzzificate
        let mut crisp = BTreeMap::new();
        let mut aggregated = BTreeMap::new();

        for (key, var) in vars.with_role(Role::Output) {
            let Some(membership) = aggregated_memberships.remove(key) else {
                continue;
            };
            let universe: Vec<f64> = var.universe.points().collect();
            let value = self
                .defuzz_op
                .call(&universe, &membership)
                .ok_or_else(|| InferenceError::NoRuleFired(var.name.clone()))?;

            debug!(variable = %var.name, value, "Defuzzificated output");

            crisp.insert(var.name.clone(), value);
            aggregated.insert(var.name.clone(), universe.into_iter().zip(membership).collect());
        }

        let fuzzified = fact_values
            .iter()
            .map(|(key, degrees)| {
                let var = &vars[key];
                let degrees = var
                    .terms
                    .labels()
                    .map(str::to_owned)
                    .zip(degrees.iter().copied())
                    .collect();

                (
                    var.name.clone(),
                    Fuzzified {
                        value: crisp_inputs[key],
                        degrees,
                    },
                )
            })
            .collect();

        Ok(Outputs::new(crisp, aggregated, firing_strengths, fuzzified))
    }

    fn strength(&self, expr: &CompiledExpr, fact_values: &SecondaryMap<VariableKey, Vec<f64>>) -> f64 {
        match expr {
            // Every proposition names a required input, which was fuzzificated above
            CompiledExpr::Is(key, label) => fact_values.get(*key).map_or(0., |degrees| degrees[*label]),
            CompiledExpr::And(lhs, rhs) => {
                let lhs = self.strength(lhs, fact_values);
                let rhs = self.strength(rhs, fact_values);

                self.and_op.call(lhs, rhs)
            },
            CompiledExpr::Or(lhs, rhs) => {
                let lhs = self.strength(lhs, fact_values);
                let rhs = self.strength(rhs, fact_values);

                self.or_op.call(lhs, rhs)
            },
            CompiledExpr::Not(expr) => 1. - self.strength(expr, fact_values),
        }
    }
}
