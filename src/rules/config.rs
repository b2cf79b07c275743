//! Rule-set files: declare rules as data and compile them into pipelines.
//!
//! A rule set is written in TOML or JSON:
//!
//! ```toml
//! name = "username"
//!
//! [[rules]]
//! description = "3 to 20 characters"
//! constraint = { type = "LengthBetween", params = { min = 3, max = 20 } }
//!
//! [[rules]]
//! constraint = { type = "FullMatch", params = "[a-z0-9_]+" }
//! ```
//!
//! A rule without a description uses its constraint's default description.

use crate::core::constraint::Constraint;
use crate::core::error::{DefinitionResult, RulecheckResult};
use crate::core::types::Value;
use crate::validation::pipeline::ValidationPipeline;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One rule as written in a rule-set file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Overrides the constraint's default description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// What the rule checks
    pub constraint: Constraint,
}

impl RuleSpec {
    /// Create a rule spec with an explicit description.
    pub fn new(description: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            description: Some(description.into()),
            constraint,
        }
    }

    /// The description the compiled rule will carry.
    pub fn effective_description(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| self.constraint.description())
    }
}

impl From<Constraint> for RuleSpec {
    fn from(constraint: Constraint) -> Self {
        Self {
            description: None,
            constraint,
        }
    }
}

/// A named, ordered list of rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSetConfig {
    /// File format version
    #[serde(default = "default_version")]
    pub version: String,
    /// Rule set name
    pub name: String,
    /// Rules in evaluation order
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

fn default_version() -> String {
    RuleSetConfig::VERSION.to_string()
}

impl RuleSetConfig {
    /// Current format version.
    pub const VERSION: &'static str = "1.0.0";

    /// Create an empty rule set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: Self::VERSION.to_string(),
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Append a rule, builder style.
    pub fn with_rule(mut self, rule: impl Into<RuleSpec>) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// Compile into a pipeline over dynamic values.
    ///
    /// Fails on the first rule with an invalid pattern, inverted bounds or a
    /// blank description.
    pub fn build(&self) -> DefinitionResult<ValidationPipeline<Value>> {
        debug!("compiling rule set '{}' ({} rules)", self.name, self.rules.len());
        self.rules
            .iter()
            .map(|spec| spec.constraint.clone().into_rule(spec.description.clone()))
            .collect::<DefinitionResult<Vec<_>>>()
            .map(ValidationPipeline::new)
    }

    /// Deserialize from a TOML string.
    pub fn from_toml(toml: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from a file. `.json` files are read as JSON, anything else as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> RulecheckResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        debug!("loading rule set from {}", path.display());

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Ok(Self::from_json(&content)?)
        } else {
            Ok(Self::from_toml(&content)?)
        }
    }
}
