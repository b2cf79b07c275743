//! Declarative constraints over dynamic values.
//!
//! A [`Constraint`] is the data form of a predicate: it can be written in a
//! rule-set file, given a default description, and compiled into a
//! [`ValidationRule<Value>`].

use crate::core::error::{DefinitionResult, PredicateError, RuleDefinitionError};
use crate::core::rule::{compile_pattern, ValidationRule};
use crate::core::types::{Value, ValueType};
use serde::{Deserialize, Serialize};

/// Constraints that can be applied to a [`Value`].
///
/// Applying a constraint to a value of the wrong kind (a numeric bound on a
/// string, a pattern on an integer) is an abnormal failure, not `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params")]
pub enum Constraint {
    /// String must contain a match for the regex
    Pattern(String),
    /// Whole string must match the regex
    FullMatch(String),

    /// String/array/map length must be >= min
    MinLength(usize),
    /// String/array/map length must be <= max
    MaxLength(usize),
    /// String/array/map length must be within [min, max]
    LengthBetween {
        /// Shortest accepted length
        min: usize,
        /// Longest accepted length
        max: usize,
    },
    /// String/array/map must not be empty
    NotEmpty,

    /// Numeric value must be within range [min, max]
    Range {
        /// Lower bound, inclusive
        min: f64,
        /// Upper bound, inclusive
        max: f64,
    },
    /// Numeric value must be >= min
    MinValue(f64),
    /// Numeric value must be <= max
    MaxValue(f64),
    /// Numeric value must be > 0
    Positive,
    /// Numeric value must be >= 0
    NonNegative,

    /// Value must equal one of the options
    OneOf(Vec<Value>),
}

impl Constraint {
    /// Check a value against this constraint.
    ///
    /// Pattern constraints compile their regex on every call; use
    /// [`Constraint::into_rule`] to compile once.
    pub fn check(&self, value: &Value) -> Result<bool, PredicateError> {
        match self {
            Constraint::Pattern(pattern) | Constraint::FullMatch(pattern) => {
                let source = if matches!(self, Constraint::FullMatch(_)) {
                    anchored(pattern)
                } else {
                    pattern.clone()
                };
                let regex = compile_pattern(&source)
                    .map_err(|e| PredicateError::Other(e.to_string()))?;
                Ok(regex.is_match(expect_str(value)?))
            }

            Constraint::MinLength(min) => Ok(expect_len(value)? >= *min),
            Constraint::MaxLength(max) => Ok(expect_len(value)? <= *max),
            Constraint::LengthBetween { min, max } => {
                let len = expect_len(value)?;
                Ok(len >= *min && len <= *max)
            }
            Constraint::NotEmpty => Ok(expect_len(value)? > 0),

            Constraint::Range { min, max } => {
                let num = expect_number(value)?;
                Ok(num >= *min && num <= *max)
            }
            Constraint::MinValue(min) => Ok(expect_number(value)? >= *min),
            Constraint::MaxValue(max) => Ok(expect_number(value)? <= *max),
            Constraint::Positive => Ok(expect_number(value)? > 0.0),
            Constraint::NonNegative => Ok(expect_number(value)? >= 0.0),

            Constraint::OneOf(options) => Ok(options.contains(value)),
        }
    }

    /// Get a human-readable description of this constraint.
    pub fn description(&self) -> String {
        match self {
            Constraint::Pattern(p) => format!("Must match pattern: {}", p),
            Constraint::FullMatch(p) => format!("Must fully match pattern: {}", p),
            Constraint::MinLength(len) => format!("Minimum length: {}", len),
            Constraint::MaxLength(len) => format!("Maximum length: {}", len),
            Constraint::LengthBetween { min, max } => {
                format!("Length between {} and {}", min, max)
            }
            Constraint::NotEmpty => "Cannot be empty".to_string(),
            Constraint::Range { min, max } => format!("Must be between {} and {}", min, max),
            Constraint::MinValue(min) => format!("Must be at least {}", min),
            Constraint::MaxValue(max) => format!("Must be at most {}", max),
            Constraint::Positive => "Must be positive".to_string(),
            Constraint::NonNegative => "Must be non-negative".to_string(),
            Constraint::OneOf(options) => format!("One of {} options", options.len()),
        }
    }

    /// Compile this constraint into a rule.
    ///
    /// Regexes are compiled here, once, and bounds are checked, so a bad
    /// constraint is reported at build time rather than on first use.
    pub fn into_rule(self, description: Option<String>) -> DefinitionResult<ValidationRule<Value>> {
        let description = description.unwrap_or_else(|| self.description());

        match self {
            Constraint::Pattern(pattern) => {
                let regex = compile_pattern(&pattern)?;
                ValidationRule::new(description, move |value: &Value| {
                    Ok(regex.is_match(expect_str(value)?))
                })
            }
            Constraint::FullMatch(pattern) => {
                let regex = compile_pattern(&anchored(&pattern))?;
                ValidationRule::new(description, move |value: &Value| {
                    Ok(regex.is_match(expect_str(value)?))
                })
            }
            constraint => {
                constraint.check_bounds()?;
                ValidationRule::new(description, move |value: &Value| constraint.check(value))
            }
        }
    }

    fn check_bounds(&self) -> DefinitionResult<()> {
        let (min, max) = match self {
            Constraint::LengthBetween { min, max } => (*min as f64, *max as f64),
            Constraint::Range { min, max } => (*min, *max),
            Constraint::MinValue(min) => (*min, f64::INFINITY),
            Constraint::MaxValue(max) => (f64::NEG_INFINITY, *max),
            _ => return Ok(()),
        };
        if min.is_nan() || max.is_nan() {
            return Err(RuleDefinitionError::NanBound);
        }
        if min > max {
            return Err(RuleDefinitionError::InvalidBounds { min, max });
        }
        Ok(())
    }
}

impl ValidationRule<Value> {
    /// Rule from a constraint, using the constraint's default description.
    pub fn from_constraint(constraint: Constraint) -> DefinitionResult<Self> {
        constraint.into_rule(None)
    }
}

fn anchored(pattern: &str) -> String {
    format!("^(?:{})$", pattern)
}

fn expect_str(value: &Value) -> Result<&str, PredicateError> {
    value
        .as_str()
        .ok_or_else(|| PredicateError::unsupported(ValueType::String, value.value_type()))
}

fn expect_len(value: &Value) -> Result<usize, PredicateError> {
    value
        .len()
        .ok_or_else(|| PredicateError::unsupported(ValueType::Collection, value.value_type()))
}

fn expect_number(value: &Value) -> Result<f64, PredicateError> {
    value
        .as_float()
        .ok_or_else(|| PredicateError::unsupported(ValueType::Number, value.value_type()))
}
