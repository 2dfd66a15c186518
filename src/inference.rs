use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use slotmap::{SecondaryMap, SlotMap};
use tracing::{debug, trace, warn};

use crate::config::{EngineConfig, MembershipSpec, RangePolicy, UndefinedPolicy, VariableSpec};
use crate::dsl::{Compiled, Expr};
use crate::error::{ConfigurationError, InferenceError};
use crate::inputs::Inputs;
use crate::math::centroid;
use crate::ops::{aggregate_into, implication};
use crate::outputs::{CrispOutput, InferenceResult, RangeWarning, RuleActivation};
use crate::rules::{Rule, RuleSpec, ZeroOne};
use crate::terms::MembershipFunction;
use crate::variable::{LinguisticVariable, Role, Universe, VariableKey};

/// Validates variable, membership and rule specs and freezes them into a
/// [`CompiledSystem`]. The first problem found aborts compilation.
pub fn compile(
    variables: &[VariableSpec],
    memberships: &[MembershipSpec],
    rules: &[RuleSpec],
    config: EngineConfig,
) -> Result<CompiledSystem, ConfigurationError> {
    let mut vars = SlotMap::with_capacity_and_key(variables.len());
    let mut names = HashMap::with_capacity(variables.len());
    let mut order = Vec::with_capacity(variables.len());

    for spec in variables {
        if names.contains_key(&spec.name) {
            return Err(ConfigurationError::DuplicateVariable(spec.name.clone()));
        }

        let universe =
            Universe::new(spec.min, spec.max, spec.resolution).ok_or_else(|| ConfigurationError::InvalidUniverse {
                variable: spec.name.clone(),
                min: spec.min,
                max: spec.max,
                resolution: spec.resolution,
            })?;
        let key = vars.insert(LinguisticVariable::new(spec.name.clone(), spec.role, universe));

        names.insert(spec.name.clone(), key);
        order.push(key);
    }

    for spec in memberships {
        let key = names
            .get(&spec.variable)
            .copied()
            .ok_or_else(|| ConfigurationError::UnknownVariable {
                context: format!("membership `{}`", spec.term),
                variable: spec.variable.clone(),
            })?;
        let membership = MembershipFunction::new(spec.shape).ok_or_else(|| ConfigurationError::MalformedShape {
            variable: spec.variable.clone(),
            term: spec.term.clone(),
            points: spec.shape.points(),
        })?;

        vars[key].add_term(spec.term.clone(), membership)?;
    }

    let mut compiled_rules = Vec::with_capacity(rules.len());
    let mut labels = HashSet::with_capacity(rules.len());

    for (i, spec) in rules.iter().enumerate() {
        let label = if spec.label.is_empty() {
            format!("R{}", i + 1)
        } else {
            spec.label.clone()
        };

        if !labels.insert(label.clone()) {
            return Err(ConfigurationError::DuplicateRuleLabel(label));
        }

        let resolver = Resolver {
            vars: &vars,
            names: &names,
            rule: &label,
        };
        let premise = resolver.premise(&spec.antecedent)?;
        let (output, term) = resolver.term(&spec.consequent.variable, &spec.consequent.term, Role::Output)?;
        let weight = ZeroOne::new(spec.consequent.weight).ok_or_else(|| ConfigurationError::InvalidWeight {
            rule: label.clone(),
            weight: spec.consequent.weight,
        })?;

        compiled_rules.push(Rule {
            label,
            premise,
            output,
            term,
            weight,
        });
    }

    let (inputs, outputs) = order.iter().copied().partition(|&key| vars[key].role() == Role::Input);

    debug!(
        variables = order.len(),
        rules = compiled_rules.len(),
        "compiled fuzzy system"
    );

    Ok(CompiledSystem {
        variables: vars,
        names,
        order,
        inputs,
        outputs,
        rules: compiled_rules,
        config,
    })
}

/// Turns name references in one rule into keys, checking roles on the way.
struct Resolver<'a> {
    vars: &'a SlotMap<VariableKey, LinguisticVariable>,
    names: &'a HashMap<String, VariableKey>,
    rule: &'a str,
}

impl Resolver<'_> {
    fn term(&self, variable: &str, term: &str, role: Role) -> Result<(VariableKey, usize), ConfigurationError> {
        let key = self
            .names
            .get(variable)
            .copied()
            .ok_or_else(|| ConfigurationError::UnknownVariable {
                context: format!("rule `{}`", self.rule),
                variable: variable.to_owned(),
            })?;
        let var = &self.vars[key];

        match (role, var.role()) {
            (Role::Input, Role::Output) => {
                return Err(ConfigurationError::AntecedentNotInput {
                    rule: self.rule.to_owned(),
                    variable: variable.to_owned(),
                })
            },
            (Role::Output, Role::Input) => {
                return Err(ConfigurationError::ConsequentNotOutput {
                    rule: self.rule.to_owned(),
                    variable: variable.to_owned(),
                })
            },
            _ => {},
        }

        let position = var.term_position(term).ok_or_else(|| ConfigurationError::UnknownTerm {
            context: format!("rule `{}`", self.rule),
            variable: variable.to_owned(),
            term: term.to_owned(),
        })?;

        Ok((key, position))
    }

    fn premise(&self, expr: &Expr) -> Result<Compiled, ConfigurationError> {
        match expr {
            Expr::Is { variable, term } => {
                let (key, position) = self.term(variable, term, Role::Input)?;
                Ok(Compiled::Is(key, position))
            },
            Expr::And(exprs) => Ok(Compiled::And(self.operands(exprs)?)),
            Expr::Or(exprs) => Ok(Compiled::Or(self.operands(exprs)?)),
            Expr::Not(expr) => Ok(Compiled::Not(Box::new(self.premise(expr)?))),
        }
    }

    fn operands(&self, exprs: &[Expr]) -> Result<Vec<Compiled>, ConfigurationError> {
        if exprs.is_empty() {
            return Err(ConfigurationError::EmptyExpression {
                rule: self.rule.to_owned(),
            });
        }

        exprs.iter().map(|expr| self.premise(expr)).collect()
    }
}

/// Summary of a compiled rule base, for reporting layers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemInfo {
    pub num_rules: usize,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub rule_labels: Vec<String>,
}

/// An immutable, validated rule base.
///
/// Holds no interior mutability, so one instance can serve any number of
/// concurrent [`infer`](Self::infer) calls.
#[derive(Clone, Debug)]
pub struct CompiledSystem {
    variables: SlotMap<VariableKey, LinguisticVariable>,
    names: HashMap<String, VariableKey>,
    order: Vec<VariableKey>,
    inputs: Vec<VariableKey>,
    outputs: Vec<VariableKey>,
    rules: Vec<Rule>,
    config: EngineConfig,
}

impl CompiledSystem {
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Runs fuzzification, rule evaluation, min-implication, max-aggregation
    /// and centroid defuzzification for one set of crisp inputs.
    ///
    /// Every output variable appears in the result, including ones that no
    /// rule names; those follow [`UndefinedPolicy`].
    pub fn infer(&self, inputs: &Inputs) -> Result<InferenceResult, InferenceError> {
        let (values, warnings) = self.crisp_values(inputs)?;

        let mut leaf = |key: VariableKey, term: usize| match values.get(key) {
            Some(&x) => Ok(self.variables[key].degree_at(term, x)),
            None => Err(InferenceError::InputMissing {
                variable: self.variables[key].name().to_owned(),
            }),
        };

        let mut firing_strengths = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let strength = rule.firing_strength(&mut leaf)?;

            trace!(rule = %rule.label, strength, "rule fired");
            firing_strengths.push(RuleActivation {
                label: rule.label.clone(),
                strength,
            });
        }

        let mut outputs = Vec::with_capacity(self.outputs.len());

        for &key in &self.outputs {
            let var = &self.variables[key];
            let universe = var.universe();
            let mut aggregate = vec![0.; universe.samples().len()];

            for (rule, activation) in self.rules.iter().zip(&firing_strengths) {
                // A zero-strength rule implies the empty set
                if rule.output != key || activation.strength <= 0. {
                    continue;
                }

                aggregate_into(&mut aggregate, implication(var.sampled_at(rule.term), activation.strength));
            }

            let (value, fallback) = match centroid(universe.samples(), &aggregate) {
                Some(value) => (value, false),
                None => match self.config.undefined_policy {
                    UndefinedPolicy::Midpoint => {
                        debug!(variable = var.name(), "no activation, reporting universe midpoint");
                        (universe.midpoint(), true)
                    },
                    UndefinedPolicy::Error => {
                        return Err(InferenceError::Undefined {
                            variable: var.name().to_owned(),
                        })
                    },
                },
            };

            outputs.push(CrispOutput {
                variable: var.name().to_owned(),
                value,
                aggregate,
                fallback,
            });
        }

        Ok(InferenceResult {
            firing_strengths,
            outputs,
            warnings,
        })
    }

    /// Evaluates every input set independently, in parallel. Result `i`
    /// always belongs to `batch[i]`, and one failing item does not affect
    /// the others.
    pub fn infer_batch(&self, batch: &[Inputs]) -> Vec<Result<InferenceResult, InferenceError>> {
        batch.par_iter().map(|inputs| self.infer(inputs)).collect()
    }

    /// Checks the supplied names against the input variables and applies the
    /// range policy.
    fn crisp_values(
        &self,
        inputs: &Inputs,
    ) -> Result<(SecondaryMap<VariableKey, f64>, Vec<RangeWarning>), InferenceError> {
        if let Some(name) = inputs
            .0
            .keys()
            .filter(|name| !self.is_input(name))
            .min()
        {
            return Err(InferenceError::UnknownInput { name: name.clone() });
        }

        let mut values = SecondaryMap::with_capacity(self.inputs.len());
        let mut warnings = Vec::new();

        for &key in &self.inputs {
            let var = &self.variables[key];
            let Some(value) = inputs.get(var.name()) else {
                continue;
            };

            if !value.is_finite() {
                return Err(InferenceError::NonFiniteInput {
                    variable: var.name().to_owned(),
                    value,
                });
            }

            let universe = var.universe();
            let value = if universe.contains(value) {
                value
            } else {
                match self.config.range_policy {
                    RangePolicy::Strict => {
                        return Err(InferenceError::InputRange {
                            variable: var.name().to_owned(),
                            value,
                            min: universe.min(),
                            max: universe.max(),
                        })
                    },
                    RangePolicy::Clamp => {
                        let clamped_to = universe.clamp(value);

                        warn!(variable = var.name(), value, clamped_to, "input outside universe, clamped");
                        warnings.push(RangeWarning {
                            variable: var.name().to_owned(),
                            value,
                            clamped_to,
                        });
                        clamped_to
                    },
                }
            };

            values.insert(key, value);
        }

        Ok((values, warnings))
    }

    fn is_input(&self, name: &str) -> bool {
        self.names
            .get(name)
            .is_some_and(|&key| self.variables[key].role() == Role::Input)
    }

    pub fn variable(&self, name: &str) -> Option<&LinguisticVariable> {
        self.names.get(name).map(|&key| &self.variables[key])
    }

    /// All variables in declaration order.
    pub fn variables(&self) -> impl Iterator<Item = &LinguisticVariable> {
        self.order.iter().map(|&key| &self.variables[key])
    }

    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().map(|&key| self.variables[key].name())
    }

    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|&key| self.variables[key].name())
    }

    pub fn rule_labels(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.label.as_str())
    }

    /// Degree of `value` in `term` of `variable`, clamped into the universe.
    pub fn degree(&self, variable: &str, term: &str, value: f64) -> Option<f64> {
        self.variable(variable)?.degree(term, value)
    }

    pub fn fuzzify(&self, variable: &str, value: f64) -> Option<Vec<(&str, f64)>> {
        self.variable(variable).map(|var| var.fuzzify(value))
    }

    pub fn membership_curve(&self, variable: &str, term: &str) -> Option<&[f64]> {
        self.variable(variable)?.membership_curve(term)
    }

    pub fn info(&self) -> SystemInfo {
        SystemInfo {
            num_rules: self.rules.len(),
            inputs: self.input_names().map(str::to_owned).collect(),
            outputs: self.output_names().map(str::to_owned).collect(),
            rule_labels: self.rule_labels().map(str::to_owned).collect(),
        }
    }
}
