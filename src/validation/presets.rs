//! Ready-made rule sets.

use crate::core::error::DefinitionResult;
use crate::core::rule::ValidationRule;
use crate::validation::pipeline::ValidationPipeline;

/// Password must contain at least one digit.
pub const PASSWORD_DIGIT: &str = "[0-9]";
/// Password must be 10 to 15 ASCII letters or digits.
pub const PASSWORD_LENGTH: &str = "^[a-zA-Z0-9]{10,15}$";
/// Password must contain at least one uppercase letter.
pub const PASSWORD_UPPERCASE: &str = "[A-Z]";

/// The password rules, in report order: digit, length, uppercase.
pub fn password_rules() -> DefinitionResult<Vec<ValidationRule<str>>> {
    Ok(vec![
        ValidationRule::pattern("has digit", PASSWORD_DIGIT)?,
        ValidationRule::pattern("length 10-15", PASSWORD_LENGTH)?,
        ValidationRule::pattern("has uppercase", PASSWORD_UPPERCASE)?,
    ])
}

/// Pipeline over [`password_rules`].
pub fn password_pipeline() -> DefinitionResult<ValidationPipeline<str>> {
    Ok(ValidationPipeline::new(password_rules()?))
}
