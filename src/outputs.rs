use std::collections::HashMap;

/// Firing strength of one rule for one call.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleActivation {
    pub label: String,
    pub strength: f64,
}

/// Defuzzified value of one output variable.
#[derive(Clone, Debug, PartialEq)]
pub struct CrispOutput {
    pub variable: String,
    pub value: f64,
    /// Aggregated fuzzy set, one degree per output universe sample.
    pub aggregate: Vec<f64>,
    /// Set when no rule activated this output and the universe midpoint was
    /// reported instead of a centroid.
    pub fallback: bool,
}

/// An input that was clamped into its universe before evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeWarning {
    pub variable: String,
    pub value: f64,
    pub clamped_to: f64,
}

/// Everything one `infer` call produced. Rules and outputs keep the order in
/// which they were compiled.
#[derive(Clone, Debug, PartialEq)]
pub struct InferenceResult {
    pub(crate) firing_strengths: Vec<RuleActivation>,
    pub(crate) outputs: Vec<CrispOutput>,
    pub(crate) warnings: Vec<RangeWarning>,
}

impl InferenceResult {
    pub fn output(&self, variable: &str) -> Option<f64> {
        self.output_detail(variable).map(|o| o.value)
    }

    pub fn output_detail(&self, variable: &str) -> Option<&CrispOutput> {
        self.outputs.iter().find(|o| o.variable == variable)
    }

    pub fn outputs(&self) -> &[CrispOutput] {
        &self.outputs
    }

    pub fn firing_strength(&self, label: &str) -> Option<f64> {
        self.firing_strengths
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.strength)
    }

    pub fn firing_strengths(&self) -> &[RuleActivation] {
        &self.firing_strengths
    }

    pub fn warnings(&self) -> &[RangeWarning] {
        &self.warnings
    }

    /// Output name to crisp value.
    pub fn to_output_map(&self) -> HashMap<String, f64> {
        self.outputs
            .iter()
            .map(|o| (o.variable.clone(), o.value))
            .collect()
    }
}
