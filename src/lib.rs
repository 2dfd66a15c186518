//! Mamdani fuzzy inference over named linguistic variables.
//!
//! Crisp readings are fuzzified against triangular and trapezoidal terms,
//! combined through AND (min) / OR (max) / NOT (complement) premises, used to
//! clip consequent terms, aggregated by max and defuzzified by centroid.
//!
//! ```
//! use fuzzy_mamdani::{compile, EngineConfig, Expr, Inputs, MembershipSpec, Rules, Shape, VariableSpec};
//!
//! let variables = [
//!     VariableSpec::input("temperature", 0., 40., 1.),
//!     VariableSpec::output("fan", 0., 10., 0.5),
//! ];
//! let memberships = [
//!     MembershipSpec::new("temperature", "hot", Shape::Trapezoidal { a: 20., b: 30., c: 40., d: 40. }),
//!     MembershipSpec::new("fan", "fast", Shape::Triangular { a: 5., b: 10., c: 10. }),
//! ];
//! let mut rules = Rules::new();
//! rules.add("hot", Expr::is("temperature", "hot"), ("fan", "fast"));
//!
//! let system = compile(&variables, &memberships, rules.specs(), EngineConfig::default())?;
//! let result = system.infer(&Inputs::new().with("temperature", 35.))?;
//!
//! assert_eq!(result.firing_strength("hot"), Some(1.));
//! assert!(result.output("fan").unwrap() > 5.);
//! # Ok::<(), fuzzy_mamdani::Error>(())
//! ```

mod config;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
pub mod ops;
mod outputs;
mod rules;
mod terms;
mod variable;

pub use config::{EngineConfig, MembershipSpec, RangePolicy, SystemSpec, UndefinedPolicy, VariableSpec};
pub use dsl::Expr;
pub use error::{ConfigurationError, Error, InferenceError};
pub use inference::{compile, CompiledSystem, SystemInfo};
pub use inputs::Inputs;
pub use outputs::{CrispOutput, InferenceResult, RangeWarning, RuleActivation};
pub use rules::{ConsequentSpec, RuleSpec, Rules, ZeroOne};
pub use terms::{MembershipFunction, Shape};
pub use variable::{LinguisticVariable, Role, Universe, VariableKey, MAX_SAMPLES};
