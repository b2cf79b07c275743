//! Core types for the Rulecheck validation engine.
//!
//! This module contains the building blocks every pipeline is made of:
//! - Rules (a description paired with a predicate)
//! - Outcomes and reports
//! - Dynamic values and declarative constraints for data-driven rules
//! - Error types

pub mod constraint;
pub mod error;
pub mod outcome;
pub mod rule;
pub mod types;

// Re-export commonly used types
pub use constraint::Constraint;
pub use error::{PipelineError, PredicateError, RuleDefinitionError, RulecheckError};
pub use outcome::{all_passed, ValidationOutcome, ValidationReport};
pub use rule::{Predicate, ValidationRule};
pub use types::{Value, ValueType};
