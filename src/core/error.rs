//! Error types for Rulecheck.
//!
//! Uses thiserror for structured errors with context. Two categories are kept
//! strictly apart:
//! - A rule returning `false` is a normal outcome and never appears here
//! - A predicate that cannot produce a boolean is an abnormal failure
//!   ([`PredicateError`]), surfaced by the pipeline as [`PipelineError`]

use crate::core::types::ValueType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for Rulecheck.
///
/// This enum encompasses all error categories and enables automatic
/// conversion between specific error types.
#[derive(Error, Debug)]
pub enum RulecheckError {
    /// A rule or constraint could not be built
    #[error("Rule definition error: {0}")]
    Definition(#[from] RuleDefinitionError),

    /// A pipeline run was aborted
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Reading or writing a rule-set file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON rule set or report
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed TOML rule set
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// No rule set registered under this id
    #[error("Unknown rule set '{0}'")]
    UnknownRuleSet(String),

    /// Anything else
    #[error("{0}")]
    Other(String),
}

/// Abnormal failure raised by a predicate.
///
/// A predicate returns this when it cannot answer at all for the given
/// input, e.g. a numeric rule handed a string.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PredicateError {
    /// The input is of a kind the predicate does not handle
    #[error("Unsupported input: expected {expected}, got {got}")]
    UnsupportedInput {
        /// Kind the predicate accepts
        expected: ValueType,
        /// Kind it was given
        got: ValueType,
    },

    /// The input has the right kind but cannot be judged
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Any other failure inside a predicate
    #[error("{0}")]
    Other(String),
}

/// Errors raised while building rules.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuleDefinitionError {
    /// The rule was given an empty description
    #[error("Rule description must not be empty")]
    EmptyDescription,

    /// The regex did not compile
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Pattern source as written
        pattern: String,
        /// Compiler message
        reason: String,
    },

    /// Lower bound above upper bound
    #[error("Invalid bounds: min {min} is greater than max {max}")]
    InvalidBounds {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// A numeric bound is NaN, which no value can be compared against
    #[error("Invalid bounds: bound must be a number, got NaN")]
    NanBound,
}

/// Errors surfaced by [`ValidationPipeline::run`](crate::validation::ValidationPipeline::run).
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PipelineError {
    /// A predicate failed abnormally; the run stopped at this rule
    #[error("Rule {index} ('{description}') failed abnormally: {source}")]
    RuleFailed {
        /// Position of the rule in the pipeline
        index: usize,
        /// Description of the rule
        description: String,
        /// What the predicate reported
        source: PredicateError,
    },
}

// ============================================================================
// Error Utilities
// ============================================================================

impl PredicateError {
    /// Shorthand for a type mismatch between the predicate and its input.
    pub fn unsupported(expected: ValueType, got: ValueType) -> Self {
        PredicateError::UnsupportedInput { expected, got }
    }
}

impl PipelineError {
    /// Position of the failing rule within the pipeline.
    pub fn rule_index(&self) -> usize {
        match self {
            PipelineError::RuleFailed { index, .. } => *index,
        }
    }

    /// Description of the failing rule.
    pub fn rule_description(&self) -> &str {
        match self {
            PipelineError::RuleFailed { description, .. } => description,
        }
    }

    /// The predicate error that aborted the run.
    pub fn predicate_error(&self) -> &PredicateError {
        match self {
            PipelineError::RuleFailed { source, .. } => source,
        }
    }
}

/// Result type alias for Rulecheck operations.
pub type RulecheckResult<T> = Result<T, RulecheckError>;

/// Result type alias for pipeline runs.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type alias for rule construction.
pub type DefinitionResult<T> = Result<T, RuleDefinitionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_error_accessors() {
        let error = PipelineError::RuleFailed {
            index: 2,
            description: "is positive".to_string(),
            source: PredicateError::unsupported(ValueType::Float, ValueType::String),
        };

        assert_eq!(error.rule_index(), 2);
        assert_eq!(error.rule_description(), "is positive");
        assert!(matches!(
            error.predicate_error(),
            PredicateError::UnsupportedInput { .. }
        ));
    }

    #[test]
    fn test_error_messages_name_the_rule() {
        let error = PipelineError::RuleFailed {
            index: 0,
            description: "has digit".to_string(),
            source: PredicateError::InvalidInput("not text".to_string()),
        };
        let msg = error.to_string();
        assert!(msg.contains("has digit"));
        assert!(msg.contains("not text"));
    }

    #[test]
    fn test_top_level_conversion() {
        let err: RulecheckError = RuleDefinitionError::EmptyDescription.into();
        assert!(matches!(err, RulecheckError::Definition(_)));
    }

    #[test]
    fn test_nan_bound_message() {
        let msg = RuleDefinitionError::NanBound.to_string();
        assert!(msg.contains("NaN"));
    }
}
