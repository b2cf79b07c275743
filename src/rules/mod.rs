//! Named rule sets: declarative rule-set files and the registry.

pub mod config;
pub mod registry;

pub use config::{RuleSetConfig, RuleSpec};
pub use registry::{RegistryEntry, RuleRegistry};
