use std::collections::BTreeMap;

use serde::Serialize;

/// Degrees of every label of one input variable at its crisp value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Fuzzified {
    pub value: f64,
    /// `(label, degree)` in legend order.
    pub degrees: Vec<(String, f64)>,
}

/// Result of a successful inference run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Outputs {
    crisp: BTreeMap<String, f64>,
    aggregated: BTreeMap<String, Vec<(f64, f64)>>,
    firing_strengths: Vec<f64>,
    fuzzified: BTreeMap<String, Fuzzified>,
}

impl Outputs {
    pub(crate) fn new(
        crisp: BTreeMap<String, f64>,
        aggregated: BTreeMap<String, Vec<(f64, f64)>>,
        firing_strengths: Vec<f64>,
        fuzzified: BTreeMap<String, Fuzzified>,
    ) -> Self {
        Self {
            crisp,
            aggregated,
            firing_strengths,
            fuzzified,
        }
    }

    /// Defuzzified value of an output variable.
    pub fn crisp(&self, variable: &str) -> Option<f64> {
        self.crisp.get(variable).copied()
    }

    pub fn crisp_outputs(&self) -> &BTreeMap<String, f64> {
        &self.crisp
    }

    /// Aggregated `(point, degree)` curve of an output variable.
    pub fn aggregated(&self, variable: &str) -> Option<&[(f64, f64)]> {
        self.aggregated.get(variable).map(Vec::as_slice)
    }

    /// Firing strength of every rule, in rule base order.
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }

    pub fn fuzzified(&self, variable: &str) -> Option<&Fuzzified> {
        self.fuzzified.get(variable)
    }
}
