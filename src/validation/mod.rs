//! Validation module: pipelines of rules and ready-made rule sets.
//!
//! The pipeline evaluates every rule against one input and reports each
//! outcome in rule order.

pub mod pipeline;
pub mod presets;

pub use pipeline::ValidationPipeline;
pub use presets::{password_pipeline, password_rules};
