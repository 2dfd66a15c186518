use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Crisp readings for one inference call, keyed by input variable name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inputs(pub(crate) HashMap<String, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add(&mut self, var: impl Into<String>, val: f64) {
        self.0.insert(var.into(), val);
    }

    pub fn with(mut self, var: impl Into<String>, val: f64) -> Self {
        self.add(var, val);
        self
    }

    pub fn get(&self, var: &str) -> Option<f64> {
        self.0.get(var).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Inputs {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Inputs(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<HashMap<String, f64>> for Inputs {
    fn from(map: HashMap<String, f64>) -> Self {
        Inputs(map)
    }
}
