use std::fmt;

use crate::dsl::{parse_assignment, Expr};
use crate::error::ConfigError;
use crate::variable::{Role, VariableKey, Variables};

/// `if <antecedent> then <variable> is <label>`
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub antecedent: Expr,
    pub consequent: Consequent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Consequent {
    pub variable: String,
    pub label: String,
}

impl Rule {
    pub fn new(antecedent: Expr, variable: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            antecedent,
            consequent: Consequent {
                variable: variable.into(),
                label: label.into(),
            },
        }
    }

    /// Builds a rule from its textual form, e.g.
    /// `Rule::parse("voltage is Low and torque is Low", "speed is Slow")`.
    pub fn parse(when: &str, then: &str) -> Result<Self, ConfigError> {
        let antecedent: Expr = when.parse()?;
        let (variable, label) = parse_assignment(then)?;

        Ok(Self::new(antecedent, variable, label))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "if {} then {} is {}",
            self.antecedent, self.consequent.variable, self.consequent.label
        )
    }
}

/// Ordered rule base. Order does not change the result but is kept for diagnostics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    pub fn add(&mut self, antecedent: Expr, variable: impl Into<String>, label: impl Into<String>) {
        self.0.push(Rule::new(antecedent, variable, label));
    }

    pub fn push(&mut self, rule: Rule) {
        self.0.push(rule);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Rule> for Rules {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Rules(iter.into_iter().collect())
    }
}

/// Antecedent with every proposition resolved to `(variable, label index)`.
#[derive(Clone, Debug)]
pub(crate) enum CompiledExpr {
    Is(VariableKey, usize),
    And(Box<CompiledExpr>, Box<CompiledExpr>),
    Or(Box<CompiledExpr>, Box<CompiledExpr>),
    Not(Box<CompiledExpr>),
}

#[derive(Clone, Debug)]
pub(crate) struct CompiledRule {
    pub(crate) antecedent: CompiledExpr,
    pub(crate) output: VariableKey,
    pub(crate) label: usize,
}

impl CompiledRule {
    pub(crate) fn compile(rule_id: usize, rule: &Rule, vars: &Variables) -> Result<Self, ConfigError> {
        let antecedent = compile_expr(rule_id, &rule.antecedent, vars)?;
        let (output, label) = resolve(
            rule_id,
            &rule.consequent.variable,
            &rule.consequent.label,
            Role::Output,
            vars,
        )?;

        Ok(Self {
            antecedent,
            output,
            label,
        })
    }
}

fn compile_expr(rule_id: usize, expr: &Expr, vars: &Variables) -> Result<CompiledExpr, ConfigError> {
    Ok(match expr {
        Expr::Is { variable, label } => {
            let (key, index) = resolve(rule_id, variable, label, Role::Input, vars)?;
            CompiledExpr::Is(key, index)
        },
        Expr::And(lhs, rhs) => CompiledExpr::And(
            Box::new(compile_expr(rule_id, lhs, vars)?),
            Box::new(compile_expr(rule_id, rhs, vars)?),
        ),
        Expr::Or(lhs, rhs) => CompiledExpr::Or(
            Box::new(compile_expr(rule_id, lhs, vars)?),
            Box::new(compile_expr(rule_id, rhs, vars)?),
        ),
        Expr::Not(expr) => CompiledExpr::Not(Box::new(compile_expr(rule_id, expr, vars)?)),
    })
}

fn resolve(
    rule_id: usize,
    variable: &str,
    label: &str,
    expected: Role,
    vars: &Variables,
) -> Result<(VariableKey, usize), ConfigError> {
    let key = vars.key(variable).ok_or_else(|| ConfigError::UnknownVariable {
        rule: rule_id,
        variable: variable.to_owned(),
    })?;
    let var = &vars[key];

    if var.role != expected {
        return Err(ConfigError::RoleMismatch {
            rule: rule_id,
            variable: variable.to_owned(),
            role: var.role.as_str(),
            position: match expected {
                Role::Input => "antecedent",
                Role::Output => "consequent",
            },
        });
    }

    let index = var.terms.position(label).ok_or_else(|| ConfigError::UnknownLabel {
        rule: rule_id,
        variable: variable.to_owned(),
        label: label.to_owned(),
    })?;

    Ok((key, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::MembershipFunction;
    use crate::terms::Terms;
    use crate::universe::Universe;
    use crate::variable::LinguisticVariable;

    fn vars() -> Variables {
        let mut vars = Variables::new();
        let low_high = Terms::new()
            .with("Low", MembershipFunction::triangular(0., 0., 10.))
            .with("High", MembershipFunction::triangular(0., 10., 10.));

        vars.add(LinguisticVariable::input("voltage", Universe::new(0., 10., 1.), low_high.clone()))
            .unwrap();
        vars.add(LinguisticVariable::output("speed", Universe::new(0., 10., 1.), low_high))
            .unwrap();
        vars
    }

    #[test]
    fn test_compile_resolves_labels() {
        let vars = vars();
        let rule = Rule::parse("voltage is High", "speed is Low").unwrap();
        let compiled = CompiledRule::compile(0, &rule, &vars).unwrap();

        assert_eq!(compiled.output, vars.key("speed").unwrap());
        assert_eq!(compiled.label, 0);
        assert!(matches!(compiled.antecedent, CompiledExpr::Is(_, 1)));
    }

    #[test]
    fn test_compile_errors() {
        let vars = vars();
        let cases = [
            ("torque is Low", "speed is Low"),
            ("voltage is Medium", "speed is Low"),
            ("voltage is Low", "speed is Medium"),
            ("speed is Low", "speed is Low"),
            ("voltage is Low", "voltage is Low"),
        ];

        let errors: Vec<_> = cases
            .iter()
            .enumerate()
            .map(|(i, (when, then))| CompiledRule::compile(i, &Rule::parse(when, then).unwrap(), &vars).unwrap_err())
            .collect();

        assert!(matches!(&errors[0], ConfigError::UnknownVariable { rule: 0, variable } if variable == "torque"));
        assert!(matches!(&errors[1], ConfigError::UnknownLabel { rule: 1, label, .. } if label == "Medium"));
        assert!(matches!(&errors[2], ConfigError::UnknownLabel { rule: 2, .. }));
        assert!(matches!(&errors[3], ConfigError::RoleMismatch { rule: 3, position: "antecedent", .. }));
        assert!(matches!(&errors[4], ConfigError::RoleMismatch { rule: 4, position: "consequent", .. }));
    }

    #[test]
    fn test_display() {
        let rule = Rule::parse("voltage is Low and torque is Very Low", "speed is Very Slow").unwrap();

        assert_eq!(
            rule.to_string(),
            "if voltage is Low and torque is Very Low then speed is Very Slow"
        );
    }
}
