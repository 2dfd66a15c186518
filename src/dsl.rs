use serde::{Deserialize, Serialize};

use crate::ops::{complement, s_norm, t_norm};
use crate::variable::VariableKey;

/// A fuzzy proposition over named input terms.
///
/// Built either from deserialized rule specs or with the combinators:
///
/// ```
/// use fuzzy_mamdani::Expr;
///
/// let premise = Expr::is("soil_moisture", "dry")
///     .and(Expr::is("temperature", "hot"))
///     .or(Expr::is("solar_radiation", "high").not());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Is { variable: String, term: String },
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    pub fn is(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Expr::Is {
            variable: variable.into(),
            term: term.into(),
        }
    }

    /// Appends to an existing AND instead of nesting a new one.
    pub fn and(self, rhs: Expr) -> Self {
        match self {
            Expr::And(mut exprs) => {
                exprs.push(rhs);
                Expr::And(exprs)
            },
            lhs => Expr::And(vec![lhs, rhs]),
        }
    }

    /// Appends to an existing OR instead of nesting a new one.
    pub fn or(self, rhs: Expr) -> Self {
        match self {
            Expr::Or(mut exprs) => {
                exprs.push(rhs);
                Expr::Or(exprs)
            },
            lhs => Expr::Or(vec![lhs, rhs]),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Expr::Not(Box::new(self))
    }

    pub fn all(exprs: impl IntoIterator<Item = Expr>) -> Self {
        Expr::And(exprs.into_iter().collect())
    }

    pub fn any(exprs: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Or(exprs.into_iter().collect())
    }

    /// Every `(variable, term)` leaf, left to right.
    pub fn propositions(&self) -> Vec<(&str, &str)> {
        let mut props = Vec::new();

        fn parse<'p>(expr: &'p Expr, out: &mut Vec<(&'p str, &'p str)>) {
            match expr {
                Expr::Is { variable, term } => out.push((variable, term)),
                Expr::And(exprs) | Expr::Or(exprs) => {
                    for expr in exprs {
                        parse(expr, out);
                    }
                },
                Expr::Not(expr) => parse(expr, out),
            }
        }

        parse(self, &mut props);

        props
    }
}

/// [`Expr`] with names resolved to variable keys and term positions.
#[derive(Clone, Debug)]
pub(crate) enum Compiled {
    Is(VariableKey, usize),
    And(Vec<Compiled>),
    Or(Vec<Compiled>),
    Not(Box<Compiled>),
}

impl Compiled {
    /// Recursively folds the tree: leaves via `leaf`, AND as min, OR as max,
    /// NOT as complement. Stops at the first leaf error.
    pub(crate) fn eval<E>(&self, leaf: &mut impl FnMut(VariableKey, usize) -> Result<f64, E>) -> Result<f64, E> {
        match self {
            Compiled::Is(key, term) => leaf(*key, *term),
            Compiled::And(exprs) => {
                let mut acc = 1.;
                for expr in exprs {
                    acc = t_norm(acc, expr.eval(leaf)?);
                }
                Ok(acc)
            },
            Compiled::Or(exprs) => {
                let mut acc = 0.;
                for expr in exprs {
                    acc = s_norm(acc, expr.eval(leaf)?);
                }
                Ok(acc)
            },
            Compiled::Not(expr) => Ok(complement(expr.eval(leaf)?)),
        }
    }
}
