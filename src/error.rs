//! Error types for compiling a rule base and running inference against it.

/// Problems found while compiling variables, terms and rules. Any of these
/// aborts compilation; no partially built system is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("variable `{variable}` has an invalid universe [{min}, {max}] with resolution {resolution}")]
    InvalidUniverse {
        variable: String,
        min: f64,
        max: f64,
        resolution: f64,
    },

    #[error("variable `{0}` is declared more than once")]
    DuplicateVariable(String),

    #[error("term `{term}` is declared more than once on variable `{variable}`")]
    DuplicateTerm { variable: String, term: String },

    #[error("term `{term}` on variable `{variable}` has malformed control points {points:?}")]
    MalformedShape {
        variable: String,
        term: String,
        points: Vec<f64>,
    },

    #[error("{context} references unknown variable `{variable}`")]
    UnknownVariable { context: String, variable: String },

    #[error("{context} references unknown term `{term}` on variable `{variable}`")]
    UnknownTerm {
        context: String,
        variable: String,
        term: String,
    },

    #[error("rule `{rule}` uses output variable `{variable}` in its antecedent")]
    AntecedentNotInput { rule: String, variable: String },

    #[error("rule `{rule}` concludes on input variable `{variable}`")]
    ConsequentNotOutput { rule: String, variable: String },

    #[error("rule `{rule}` has weight {weight} outside [0, 1]")]
    InvalidWeight { rule: String, weight: f64 },

    #[error("rule `{rule}` contains an AND/OR with no operands")]
    EmptyExpression { rule: String },

    #[error("rule label `{0}` is used more than once")]
    DuplicateRuleLabel(String),
}

/// Per-call failures. None of these touch the compiled system, which stays
/// usable for the next call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("input `{variable}` = {value} is outside its universe [{min}, {max}]")]
    InputRange {
        variable: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("no value supplied for input variable `{variable}`")]
    InputMissing { variable: String },

    #[error("`{name}` is not an input variable of this system")]
    UnknownInput { name: String },

    #[error("input `{variable}` is not a finite number ({value})")]
    NonFiniteInput { variable: String, value: f64 },

    #[error("output `{variable}` is undefined: no rule produced any activation")]
    Undefined { variable: String },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}
