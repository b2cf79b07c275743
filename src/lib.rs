//! # Rulecheck - Composable Validation Rules
//!
//! Rulecheck evaluates a list of independent, named predicate rules against
//! one input and reports the outcome of every rule, in rule order.
//!
//! ## Features
//!
//! - **Complete reports**: every rule runs, a `false` never hides the others
//! - **Abnormal failures kept apart**: a predicate that cannot answer aborts
//!   the run with an error naming the rule, instead of reading as `false`
//! - **Shareable**: pipelines are immutable and can be run from many threads
//! - **Data-driven rule sets**: declare constraints in TOML or JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use rulecheck::prelude::*;
//!
//! let pipeline = ValidationPipeline::new(vec![
//!     ValidationRule::pattern("has digit", "[0-9]").unwrap(),
//!     ValidationRule::pattern("length 10-15", "^[a-zA-Z0-9]{10,15}$").unwrap(),
//!     ValidationRule::pattern("has uppercase", "[A-Z]").unwrap(),
//! ]);
//!
//! let outcomes = pipeline.run("Teste123").unwrap();
//! let passed: Vec<bool> = outcomes.iter().map(|o| o.passed).collect();
//! assert_eq!(passed, vec![true, false, true]);
//! assert!(!all_passed(&outcomes));
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: rules, outcomes, dynamic values, constraints and errors
//! - [`validation`]: the pipeline and ready-made rule sets
//! - [`rules`]: rule-set files and the registry of named rule sets

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod rules;
pub mod validation;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust
/// use rulecheck::prelude::*;
/// ```
pub mod prelude {
    // Rules and outcomes
    pub use crate::core::outcome::{all_passed, ValidationOutcome, ValidationReport};
    pub use crate::core::rule::{Predicate, ValidationRule};

    // Dynamic values
    pub use crate::core::constraint::Constraint;
    pub use crate::core::types::{Value, ValueType};

    // Errors
    pub use crate::core::error::{
        PipelineError, PipelineResult, PredicateError, RuleDefinitionError, RulecheckError,
        RulecheckResult,
    };

    // Validation
    pub use crate::validation::pipeline::ValidationPipeline;
    pub use crate::validation::presets::{password_pipeline, password_rules};

    // Rule sets
    pub use crate::rules::config::{RuleSetConfig, RuleSpec};
    pub use crate::rules::registry::{RegistryEntry, RuleRegistry};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
