use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::error::ConfigurationError;
use crate::linspace::Linspace;
use crate::terms::MembershipFunction;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Upper bound on the number of grid points a single universe may hold.
pub const MAX_SAMPLES: usize = 1_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Input,
    Output,
}

/// Bounded interval of discourse plus the grid used to sample it.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe {
    min: f64,
    max: f64,
    resolution: f64,
    samples: Vec<f64>,
}

impl Universe {
    /// Returns `None` unless `min < max` and `resolution > 0`, all finite,
    /// and the grid fits in [`MAX_SAMPLES`] points.
    ///
    /// The grid holds `floor((max - min) / resolution) + 1` evenly spaced
    /// points (never fewer than two) with both bounds included, so the
    /// spacing equals `resolution` whenever it divides the span.
    pub fn new(min: f64, max: f64, resolution: f64) -> Option<Self> {
        if !(min.is_finite() && max.is_finite() && resolution.is_finite()) || min >= max || resolution <= 0. {
            return None;
        }

        // Nudge the quotient so that e.g. 1.0 / 0.1 = 9.999999999999998
        // still yields 11 points.
        let steps = ((max - min) / resolution + 1e-9).floor();

        if steps >= MAX_SAMPLES as f64 {
            return None;
        }

        let num = (steps as usize + 1).max(2);
        let samples = Linspace::new(min, max, num).collect();

        Some(Self {
            min,
            max,
            resolution,
            samples,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn midpoint(&self) -> f64 {
        self.min + (self.max - self.min) / 2.
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Term {
    pub(crate) name: String,
    pub(crate) membership: MembershipFunction,
    /// `membership` evaluated at every universe sample
    pub(crate) sampled: Vec<f64>,
}

/// A named quantity described by overlapping fuzzy terms.
#[derive(Clone, Debug)]
pub struct LinguisticVariable {
    name: String,
    role: Role,
    universe: Universe,
    terms: Vec<Term>,
    term_index: HashMap<String, usize>,
}

impl LinguisticVariable {
    pub fn new(name: impl Into<String>, role: Role, universe: Universe) -> Self {
        Self {
            name: name.into(),
            role,
            universe,
            terms: Vec::new(),
            term_index: HashMap::new(),
        }
    }

    pub fn add_term(&mut self, term: impl Into<String>, membership: MembershipFunction) -> Result<(), ConfigurationError> {
        let term = term.into();

        if self.term_index.contains_key(&term) {
            return Err(ConfigurationError::DuplicateTerm {
                variable: self.name.clone(),
                term,
            });
        }

        let sampled = self.universe.samples.iter().map(|&y| membership.degree(y)).collect();

        self.term_index.insert(term.clone(), self.terms.len());
        self.terms.push(Term {
            name: term,
            membership,
            sampled,
        });

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Term names in declaration order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.name.as_str())
    }

    pub fn membership(&self, term: &str) -> Option<&MembershipFunction> {
        self.term_index.get(term).map(|&i| &self.terms[i].membership)
    }

    /// Degree of `x` in `term`. Values outside the universe are clamped to
    /// the nearest bound first, so readings at or past the extremes are
    /// scored like the extremes themselves.
    pub fn degree(&self, term: &str, x: f64) -> Option<f64> {
        self.term_index.get(term).map(|&i| self.degree_at(i, x))
    }

    /// Degrees of `x` in every term, in declaration order.
    pub fn fuzzify(&self, x: f64) -> Vec<(&str, f64)> {
        (0..self.terms.len())
            .map(|i| (self.terms[i].name.as_str(), self.degree_at(i, x)))
            .collect()
    }

    /// The term's degrees over [`Universe::samples`].
    pub fn membership_curve(&self, term: &str) -> Option<&[f64]> {
        self.term_index.get(term).map(|&i| &*self.terms[i].sampled)
    }

    pub(crate) fn term_position(&self, term: &str) -> Option<usize> {
        self.term_index.get(term).copied()
    }

    pub(crate) fn degree_at(&self, term: usize, x: f64) -> f64 {
        self.terms[term].membership.degree(self.universe.clamp(x))
    }

    pub(crate) fn sampled_at(&self, term: usize) -> &[f64] {
        &self.terms[term].sampled
    }
}
