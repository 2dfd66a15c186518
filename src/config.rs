//! Engine policies and the serde-facing shape of a rule base definition.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::inference::{compile, CompiledSystem};
use crate::rules::RuleSpec;
use crate::terms::Shape;
use crate::variable::Role;

/// What to do with a crisp input outside its variable's universe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    /// Clamp to the nearest bound and report a warning.
    #[default]
    Clamp,
    /// Fail the call.
    Strict,
}

/// What to report for an output whose aggregated set has zero mass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedPolicy {
    /// Report the midpoint of the output universe.
    #[default]
    Midpoint,
    /// Fail the call.
    Error,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub range_policy: RangePolicy,
    pub undefined_policy: UndefinedPolicy,
}

impl EngineConfig {
    pub fn strict() -> Self {
        Self {
            range_policy: RangePolicy::Strict,
            undefined_policy: UndefinedPolicy::Error,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    pub role: Role,
    pub min: f64,
    pub max: f64,
    pub resolution: f64,
}

impl VariableSpec {
    pub fn input(name: impl Into<String>, min: f64, max: f64, resolution: f64) -> Self {
        Self {
            name: name.into(),
            role: Role::Input,
            min,
            max,
            resolution,
        }
    }

    pub fn output(name: impl Into<String>, min: f64, max: f64, resolution: f64) -> Self {
        Self {
            name: name.into(),
            role: Role::Output,
            min,
            max,
            resolution,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MembershipSpec {
    pub variable: String,
    pub term: String,
    pub shape: Shape,
}

impl MembershipSpec {
    pub fn new(variable: impl Into<String>, term: impl Into<String>, shape: Shape) -> Self {
        Self {
            variable: variable.into(),
            term: term.into(),
            shape,
        }
    }
}

/// A complete rule base definition as an external loader would supply it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemSpec {
    pub variables: Vec<VariableSpec>,
    #[serde(default)]
    pub memberships: Vec<MembershipSpec>,
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
    #[serde(default)]
    pub config: EngineConfig,
}

impl SystemSpec {
    pub fn compile(&self) -> Result<CompiledSystem, ConfigurationError> {
        compile(&self.variables, &self.memberships, &self.rules, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.range_policy, RangePolicy::Clamp);
        assert_eq!(config.undefined_policy, UndefinedPolicy::Midpoint);

        let config: EngineConfig = serde_json::from_str(r#"{"range_policy": "strict"}"#).unwrap();

        assert_eq!(config.range_policy, RangePolicy::Strict);
        assert_eq!(config.undefined_policy, UndefinedPolicy::Midpoint);
    }

    #[test]
    fn test_system_spec_compiles() {
        let json = r#"{
            "variables": [
                {"name": "temperature", "role": "input", "min": 0, "max": 40, "resolution": 1},
                {"name": "fan", "role": "output", "min": 0, "max": 10, "resolution": 0.5}
            ],
            "memberships": [
                {"variable": "temperature", "term": "hot", "shape": {"kind": "trapezoidal", "a": 25, "b": 32, "c": 40, "d": 40}},
                {"variable": "fan", "term": "fast", "shape": {"kind": "triangular", "a": 5, "b": 10, "c": 10}}
            ],
            "rules": [
                {
                    "antecedent": {"is": {"variable": "temperature", "term": "hot"}},
                    "consequent": {"variable": "fan", "term": "fast"}
                }
            ]
        }"#;
        let spec: SystemSpec = serde_json::from_str(json).unwrap();
        let system = spec.compile().unwrap();

        assert_eq!(system.rule_labels().collect::<Vec<_>>(), vec!["R1"]);
        assert_eq!(system.config(), EngineConfig::default());
    }
}
