//! Registry of named rule sets.

use crate::core::error::DefinitionResult;
use crate::core::types::Value;
use crate::rules::config::RuleSetConfig;
use crate::validation::pipeline::ValidationPipeline;
use crate::validation::presets;
use indexmap::IndexMap;
use log::debug;

/// Registry entry containing a compiled pipeline and its metadata.
#[derive(Debug)]
pub struct RegistryEntry<T: ?Sized> {
    /// The compiled pipeline.
    pub pipeline: ValidationPipeline<T>,
    /// What the rule set is for.
    pub description: String,
    /// Tags for organization and search.
    pub tags: Vec<String>,
}

/// Registry for named rule sets.
///
/// Rule sets are kept in registration order, which is also the order
/// [`ids`](Self::ids) lists them in.
#[derive(Debug)]
pub struct RuleRegistry<T: ?Sized> {
    sets: IndexMap<String, RegistryEntry<T>>,
}

impl<T: ?Sized> RuleRegistry<T> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            sets: IndexMap::new(),
        }
    }

    /// Register a rule set, replacing any set with the same id.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        description: impl Into<String>,
        pipeline: ValidationPipeline<T>,
    ) {
        self.register_with_tags(id, description, pipeline, Vec::new());
    }

    /// Register a rule set with additional tags.
    pub fn register_with_tags(
        &mut self,
        id: impl Into<String>,
        description: impl Into<String>,
        pipeline: ValidationPipeline<T>,
        tags: Vec<String>,
    ) {
        let id = id.into();
        debug!("registering rule set '{}' ({} rules)", id, pipeline.len());
        self.sets.insert(
            id,
            RegistryEntry {
                pipeline,
                description: description.into(),
                tags,
            },
        );
    }

    /// Get the pipeline registered under `id`.
    pub fn get(&self, id: &str) -> Option<&ValidationPipeline<T>> {
        self.sets.get(id).map(|e| &e.pipeline)
    }

    /// Get a registry entry.
    pub fn get_entry(&self, id: &str) -> Option<&RegistryEntry<T>> {
        self.sets.get(id)
    }

    /// Check if a rule set is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.sets.contains_key(id)
    }

    /// Get all registered ids.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(|s| s.as_str())
    }

    /// Get all registered entries.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &RegistryEntry<T>)> {
        self.sets.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Search rule sets by id, description, tag or rule description.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let query = query.to_lowercase();

        self.sets
            .iter()
            .filter(|(id, entry)| {
                id.to_lowercase().contains(&query)
                    || entry.description.to_lowercase().contains(&query)
                    || entry.tags.iter().any(|t| t.to_lowercase().contains(&query))
                    || entry
                        .pipeline
                        .descriptions()
                        .any(|d| d.to_lowercase().contains(&query))
            })
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Unregister a rule set.
    pub fn unregister(&mut self, id: &str) -> bool {
        self.sets.shift_remove(id).is_some()
    }

    /// Get the total number of registered rule sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl<T: ?Sized> Default for RuleRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleRegistry<str> {
    /// Create a registry pre-populated with the built-in text rule sets.
    pub fn with_builtins() -> DefinitionResult<Self> {
        let mut registry = Self::new();
        registry.register_with_tags(
            "password",
            "Password strength: digit, 10-15 alphanumerics, uppercase",
            presets::password_pipeline()?,
            vec!["security".to_string(), "login".to_string()],
        );
        Ok(registry)
    }
}

impl RuleRegistry<Value> {
    /// Compile a rule-set config and register it under its name.
    pub fn register_config(&mut self, config: &RuleSetConfig) -> DefinitionResult<()> {
        let pipeline = config.build()?;
        self.register(config.name.clone(), format!("Loaded rule set '{}'", config.name), pipeline);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constraint::Constraint;
    use crate::core::rule::ValidationRule;

    fn non_empty() -> ValidationPipeline<str> {
        ValidationPipeline::empty()
            .with_rule(ValidationRule::from_fn("non-empty", |s: &str| !s.is_empty()).unwrap())
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = RuleRegistry::new();
        registry.register("non_empty", "Rejects blank input", non_empty());

        assert!(registry.contains("non_empty"));
        let pipeline = registry.get("non_empty").unwrap();
        assert!(pipeline.is_valid("x").unwrap());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_builtins() {
        let registry = RuleRegistry::with_builtins().unwrap();
        assert!(registry.contains("password"));
        assert_eq!(registry.get("password").unwrap().len(), 3);
    }

    #[test]
    fn test_registration_order() {
        let mut registry = RuleRegistry::new();
        registry.register("b", "second letter", non_empty());
        registry.register("a", "first letter", non_empty());
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_search() {
        let registry = RuleRegistry::with_builtins().unwrap();

        assert_eq!(registry.search("login"), vec!["password"]);
        assert_eq!(registry.search("UPPERCASE"), vec!["password"]);
        assert!(registry.search("nonexistent").is_empty());
    }

    #[test]
    fn test_unregister() {
        let mut registry = RuleRegistry::with_builtins().unwrap();
        assert!(registry.unregister("password"));
        assert!(!registry.unregister("password"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_config() {
        let config = RuleSetConfig::new("quantity")
            .with_rule(Constraint::Positive)
            .with_rule(Constraint::MaxValue(99.0));

        let mut registry = RuleRegistry::<Value>::new();
        registry.register_config(&config).unwrap();

        let pipeline = registry.get("quantity").unwrap();
        assert!(pipeline.is_valid(&Value::Integer(5)).unwrap());
        assert!(!pipeline.is_valid(&Value::Integer(500)).unwrap());
    }
}
