use serde::{Deserialize, Serialize};

use crate::membership::MembershipFunction;

/// One labelled membership function of a variable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TermRepr")]
pub struct Term {
    pub label: String,
    #[serde(flatten)]
    pub function: MembershipFunction,
}

/// Flat on-disk form of a [`Term`]. Every key must belong to the declared shape.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TermRepr {
    label: String,
    shape: Shape,
    a: Option<f64>,
    b: Option<f64>,
    c: Option<f64>,
    mean: Option<f64>,
    sigma: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum Shape {
    Triangular,
    Gaussian,
}

impl TryFrom<TermRepr> for Term {
    type Error = String;

    fn try_from(repr: TermRepr) -> Result<Self, Self::Error> {
        let TermRepr {
            label,
            shape,
            a,
            b,
            c,
            mean,
            sigma,
        } = repr;

        let function = match shape {
            Shape::Triangular => {
                if mean.is_some() || sigma.is_some() {
                    return Err(format!("triangular term '{label}' does not take 'mean' or 'sigma'"));
                }

                match (a, b, c) {
                    (Some(a), Some(b), Some(c)) => MembershipFunction::triangular(a, b, c),
                    _ => return Err(format!("triangular term '{label}' needs 'a', 'b' and 'c'")),
                }
            },
            Shape::Gaussian => {
                if a.is_some() || b.is_some() || c.is_some() {
                    return Err(format!("gaussian term '{label}' does not take 'a', 'b' or 'c'"));
                }

                match (mean, sigma) {
                    (Some(mean), Some(sigma)) => MembershipFunction::gaussian(mean, sigma),
                    _ => return Err(format!("gaussian term '{label}' needs 'mean' and 'sigma'")),
                }
            },
        };

        Ok(Term { label, function })
    }
}

/// Ordered table of label -> membership function.
///
/// Insertion order is the legend order used when sampling a whole variable.
/// Label uniqueness is checked when the owning system is configured.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Terms(pub(crate) Vec<Term>);

impl Terms {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, label: impl Into<String>, function: MembershipFunction) {
        self.0.push(Term {
            label: label.into(),
            function,
        });
    }

    /// Builder form of [`Terms::insert`].
    pub fn with(mut self, label: impl Into<String>, function: MembershipFunction) -> Self {
        self.insert(label, function);
        self
    }

    pub fn get(&self, label: &str) -> Option<&MembershipFunction> {
        self.0.iter().find(|t| t.label == label).map(|t| &t.function)
    }

    pub(crate) fn position(&self, label: &str) -> Option<usize> {
        self.0.iter().position(|t| t.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.0.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|t| t.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<L: Into<String>> FromIterator<(L, MembershipFunction)> for Terms {
    fn from_iter<I: IntoIterator<Item = (L, MembershipFunction)>>(iter: I) -> Self {
        let mut terms = Terms::new();

        for (label, function) in iter {
            terms.insert(label, function);
        }

        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_preserved() {
        let terms = Terms::new()
            .with("Very Low", MembershipFunction::triangular(0., 5., 10.))
            .with("Low", MembershipFunction::triangular(4., 10., 15.))
            .with("Medium", MembershipFunction::triangular(8., 15., 20.));

        assert_eq!(terms.labels().collect::<Vec<_>>(), ["Very Low", "Low", "Medium"]);
        assert_eq!(terms.position("Medium"), Some(2));
        assert_eq!(terms.get("Low"), Some(&MembershipFunction::triangular(4., 10., 15.)));
        assert_eq!(terms.get("High"), None);
    }

    #[derive(Debug, Deserialize)]
    struct Doc {
        terms: Terms,
    }

    fn parse(terms: &str) -> Result<Terms, toml::de::Error> {
        toml::from_str::<Doc>(&format!("terms = [{terms}]")).map(|doc| doc.terms)
    }

    #[test]
    fn test_deserialize_terms() {
        let terms = parse(
            r#"{ label = "Low", shape = "triangular", a = 0.0, b = 5.0, c = 10.0 },
               { label = "High", shape = "gaussian", mean = 10.0, sigma = 2.0 }"#,
        )
        .unwrap();

        assert_eq!(terms.get("Low"), Some(&MembershipFunction::triangular(0., 5., 10.)));
        assert_eq!(terms.get("High"), Some(&MembershipFunction::gaussian(10., 2.)));
    }

    #[test]
    fn test_stray_term_keys_are_rejected() {
        for term in [
            r#"{ label = "Low", shape = "triangular", a = 0.0, b = 5.0, c = 10.0, d = 5.0 }"#,
            r#"{ label = "Low", shape = "triangular", a = 0.0, b = 5.0, c = 10.0, sigma = 1.0 }"#,
            r#"{ label = "Low", shape = "gaussian", mean = 0.0, sigma = 1.0, a = 0.0 }"#,
            r#"{ label = "Low", shape = "triangular", a = 0.0, b = 5.0 }"#,
            r#"{ label = "Low", shape = "gaussian", mean = 0.0 }"#,
            r#"{ label = "Low", shape = "trapezoidal", a = 0.0, b = 5.0, c = 10.0 }"#,
        ] {
            assert!(parse(term).is_err(), "accepted {term}");
        }
    }
}
