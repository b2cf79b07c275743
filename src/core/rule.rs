//! The validation rule: a description paired with a predicate.

use crate::core::error::{DefinitionResult, PredicateError, RuleDefinitionError};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Shared predicate function.
///
/// `Ok(bool)` is the rule's answer. `Err` means the predicate could not
/// answer for this input at all.
pub type Predicate<T> = Arc<dyn Fn(&T) -> Result<bool, PredicateError> + Send + Sync>;

/// A named unit of validation logic.
///
/// Rules are immutable once built and cheap to clone (the predicate is
/// reference counted), so one rule can sit in several pipelines and be
/// evaluated from several threads at once.
///
/// Predicates must be pure: no mutation of the input or shared state, no
/// blocking, no I/O. A predicate that performs I/O violates this contract;
/// the pipeline gives no timeout or retry for it.
pub struct ValidationRule<T: ?Sized> {
    description: String,
    predicate: Predicate<T>,
}

impl<T: ?Sized> ValidationRule<T> {
    /// Create a rule from a fallible predicate.
    ///
    /// Returns [`RuleDefinitionError::EmptyDescription`] if `description` is
    /// blank.
    pub fn new<F>(description: impl Into<String>, predicate: F) -> DefinitionResult<Self>
    where
        F: Fn(&T) -> Result<bool, PredicateError> + Send + Sync + 'static,
    {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(RuleDefinitionError::EmptyDescription);
        }
        Ok(Self {
            description,
            predicate: Arc::new(predicate),
        })
    }

    /// Create a rule from a total predicate that always answers.
    pub fn from_fn<F>(description: impl Into<String>, predicate: F) -> DefinitionResult<Self>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::new(description, move |input: &T| Ok(predicate(input)))
    }

    /// What this rule checks.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Apply the predicate to `input`.
    ///
    /// Predicate errors are returned exactly as the predicate produced them.
    pub fn evaluate(&self, input: &T) -> Result<bool, PredicateError> {
        (self.predicate)(input)
    }
}

impl ValidationRule<str> {
    /// Rule that passes when `pattern` matches anywhere in the input.
    ///
    /// Anchor the pattern (`^...$`) to require a full match.
    pub fn pattern(description: impl Into<String>, pattern: &str) -> DefinitionResult<Self> {
        let regex = compile_pattern(pattern)?;
        Self::from_fn(description, move |input: &str| regex.is_match(input))
    }
}

/// Compile a regex, mapping failures into a definition error.
pub(crate) fn compile_pattern(pattern: &str) -> DefinitionResult<Regex> {
    Regex::new(pattern).map_err(|e| RuleDefinitionError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

impl<T: ?Sized> Clone for ValidationRule<T> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T: ?Sized> fmt::Debug for ValidationRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("description", &self.description)
            .field("predicate", &"<closure>")
            .finish()
    }
}
