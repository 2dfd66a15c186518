use serde::{Deserialize, Serialize};

use crate::dsl::{Compiled, Expr};
use crate::variable::VariableKey;

/// A value between zero and one
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct ZeroOne(f64);

impl ZeroOne {
    pub const ONE: ZeroOne = ZeroOne(1.);

    pub fn new(value: f64) -> Option<Self> {
        (0. ..=1.).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

fn default_weight() -> f64 {
    1.
}

/// `THEN variable IS term`, scaled by `weight`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsequentSpec {
    pub variable: String,
    pub term: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

/// An uncompiled rule, referring to variables and terms by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub antecedent: Expr,
    pub consequent: ConsequentSpec,
    /// Left empty, the rule is labelled `R{n}` after its 1-based position.
    #[serde(default)]
    pub label: String,
}

/// Ordered rule specs, built up one rule at a time.
#[derive(Clone, Debug, Default)]
pub struct Rules(pub(crate) Vec<RuleSpec>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    pub fn add(&mut self, label: impl Into<String>, premise: Expr, consequence: (&str, &str)) -> &mut Self {
        self.add_weighted(label, premise, consequence, 1.)
    }

    pub fn add_weighted(
        &mut self,
        label: impl Into<String>,
        premise: Expr,
        (variable, term): (&str, &str),
        weight: f64,
    ) -> &mut Self {
        self.0.push(RuleSpec {
            antecedent: premise,
            consequent: ConsequentSpec {
                variable: variable.to_owned(),
                term: term.to_owned(),
                weight,
            },
            label: label.into(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn specs(&self) -> &[RuleSpec] {
        &self.0
    }

    pub fn into_specs(self) -> Vec<RuleSpec> {
        self.0
    }
}

impl From<Vec<RuleSpec>> for Rules {
    fn from(specs: Vec<RuleSpec>) -> Self {
        Rules(specs)
    }
}

impl IntoIterator for Rules {
    type Item = RuleSpec;
    type IntoIter = std::vec::IntoIter<RuleSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Rule {
    pub(crate) label: String,
    pub(crate) premise: Compiled,
    pub(crate) output: VariableKey,
    pub(crate) term: usize,
    pub(crate) weight: ZeroOne,
}

impl Rule {
    /// Antecedent degree scaled by the rule weight; stays in `[0, 1]` since
    /// both factors do.
    pub(crate) fn firing_strength<E>(
        &self,
        leaf: &mut impl FnMut(VariableKey, usize) -> Result<f64, E>,
    ) -> Result<f64, E> {
        Ok(self.premise.eval(leaf)? * self.weight.get())
    }
}
