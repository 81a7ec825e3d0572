use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Antecedent expression of a rule.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// `variable is label`
    Is { variable: String, label: String },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    pub fn is(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Expr::Is {
            variable: variable.into(),
            label: label.into(),
        }
    }

    pub fn and(self, rhs: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(rhs))
    }

    pub fn or(self, rhs: Expr) -> Self {
        Expr::Or(Box::new(self), Box::new(rhs))
    }

    pub fn negate(self) -> Self {
        Expr::Not(Box::new(self))
    }

    /// Every `(variable, label)` proposition, left to right.
    pub fn propositions(&self) -> Vec<(&str, &str)> {
        let mut props = Vec::new();

        fn parse<'p>(expr: &'p Expr, out: &mut Vec<(&'p str, &'p str)>) {
            match expr {
                Expr::Is { variable, label } => out.push((variable.as_str(), label.as_str())),
                Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                    parse(lhs, out);
                    parse(rhs, out);
                },
                Expr::Not(expr) => parse(expr, out),
            }
        }

        parse(self, &mut props);

        props
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Or(..) => 0,
            Expr::And(..) => 1,
            Expr::Not(_) | Expr::Is { .. } => 2,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn child(f: &mut fmt::Formatter<'_>, parent: u8, expr: &Expr) -> fmt::Result {
            if expr.precedence() < parent {
                write!(f, "({expr})")
            } else {
                write!(f, "{expr}")
            }
        }

        match self {
            Expr::Is { variable, label } => write!(f, "{variable} is {label}"),
            Expr::And(lhs, rhs) => {
                child(f, 1, lhs)?;
                f.write_str(" and ")?;
                child(f, 1, rhs)
            },
            Expr::Or(lhs, rhs) => {
                child(f, 0, lhs)?;
                f.write_str(" or ")?;
                child(f, 0, rhs)
            },
            Expr::Not(expr) => {
                f.write_str("not ")?;
                child(f, 2, expr)
            },
        }
    }
}

/// Parses rule text such as `voltage is Very Low and (torque is Low or torque is Medium)`.
///
/// `and` binds tighter than `or`; `not` binds tightest. Keywords are
/// case-insensitive. Labels run until the next keyword or parenthesis, so they
/// may contain spaces.
impl FromStr for Expr {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(text);
        let mut parser = Parser {
            text,
            tokens: &tokens,
            pos: 0,
        };
        let expr = parser.or()?;

        if let Some(token) = parser.peek() {
            return Err(parser.error(format!("unexpected '{token}'")));
        }

        Ok(expr)
    }
}

/// Parses a consequent of the form `<variable> is <label>`.
pub fn parse_assignment(text: &str) -> Result<(String, String), ConfigError> {
    match text.parse::<Expr>()? {
        Expr::Is { variable, label } => Ok((variable, label)),
        _ => Err(ConfigError::RuleSyntax {
            text: text.to_owned(),
            reason: "a consequent must be a single '<variable> is <label>' term".to_owned(),
        }),
    }
}

fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();

    for word in text.split_whitespace() {
        let mut rest = word;

        while !rest.is_empty() {
            match rest.find(['(', ')']) {
                Some(0) => {
                    tokens.push(&rest[..1]);
                    rest = &rest[1..];
                },
                Some(i) => {
                    tokens.push(&rest[..i]);
                    rest = &rest[i..];
                },
                None => {
                    tokens.push(rest);
                    rest = "";
                },
            }
        }
    }

    tokens
}

fn is_keyword(token: &str, keyword: &str) -> bool {
    token.eq_ignore_ascii_case(keyword)
}

fn ends_label(token: &str) -> bool {
    token == "(" || token == ")" || is_keyword(token, "and") || is_keyword(token, "or")
}

struct Parser<'t> {
    text: &'t str,
    tokens: &'t [&'t str],
    pos: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t str> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<&'t str> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn error(&self, reason: String) -> ConfigError {
        ConfigError::RuleSyntax {
            text: self.text.to_owned(),
            reason,
        }
    }

    fn or(&mut self) -> Result<Expr, ConfigError> {
        let mut expr = self.and()?;

        while self.peek().is_some_and(|t| is_keyword(t, "or")) {
            self.bump();
            expr = expr.or(self.and()?);
        }

        Ok(expr)
    }

    fn and(&mut self) -> Result<Expr, ConfigError> {
        let mut expr = self.unary()?;

        while self.peek().is_some_and(|t| is_keyword(t, "and")) {
            self.bump();
            expr = expr.and(self.unary()?);
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, ConfigError> {
        match self.peek() {
            Some(t) if is_keyword(t, "not") => {
                self.bump();
                Ok(self.unary()?.negate())
            },
            Some("(") => {
                self.bump();
                let expr = self.or()?;

                match self.bump() {
                    Some(")") => Ok(expr),
                    _ => Err(self.error("missing ')'".to_owned())),
                }
            },
            _ => self.term(),
        }
    }

    fn term(&mut self) -> Result<Expr, ConfigError> {
        let variable = match self.bump() {
            Some(t) if !ends_label(t) && !is_keyword(t, "is") && !is_keyword(t, "not") => t,
            Some(t) => return Err(self.error(format!("expected a variable name, found '{t}'"))),
            None => return Err(self.error("expected a variable name, found end of text".to_owned())),
        };

        match self.bump() {
            Some(t) if is_keyword(t, "is") => {},
            _ => return Err(self.error(format!("expected 'is' after '{variable}'"))),
        }

        let start = self.pos;

        while self.peek().is_some_and(|t| !ends_label(t)) {
            self.bump();
        }

        if start == self.pos {
            return Err(self.error(format!("missing label after '{variable} is'")));
        }

        Ok(Expr::is(variable, self.tokens[start..self.pos].join(" ")))
    }
}
