//! Per-rule outcomes and the report built from them.

use serde::{Deserialize, Serialize};

/// Result of applying one rule to one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Whether the rule's predicate answered `true`.
    pub passed: bool,
    /// Copied from the originating rule.
    pub description: String,
}

impl ValidationOutcome {
    /// Create an outcome.
    pub fn new(passed: bool, description: impl Into<String>) -> Self {
        Self {
            passed,
            description: description.into(),
        }
    }
}

/// Overall pass: every outcome passed. An empty slice passes vacuously.
pub fn all_passed(outcomes: &[ValidationOutcome]) -> bool {
    outcomes.iter().all(|o| o.passed)
}

/// Outcomes of one pipeline run plus timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// One outcome per rule, in rule order.
    pub outcomes: Vec<ValidationOutcome>,
    /// Time taken for the run in milliseconds.
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Wrap a list of outcomes.
    pub fn new(outcomes: Vec<ValidationOutcome>) -> Self {
        Self {
            outcomes,
            duration_ms: 0,
        }
    }

    /// Whether every rule passed.
    pub fn passed(&self) -> bool {
        all_passed(&self.outcomes)
    }

    /// Number of rules that passed.
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    /// Outcomes of the rules that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &ValidationOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    /// Get a human-readable summary.
    pub fn summary(&self) -> String {
        let total = self.outcomes.len();
        if self.passed() {
            format!("✓ All {} rule(s) passed", total)
        } else {
            format!(
                "✗ {} of {} rule(s) failed",
                total - self.passed_count(),
                total
            )
        }
    }

    /// One line per rule, in rule order.
    pub fn detailed(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .enumerate()
            .map(|(i, outcome)| {
                let mark = if outcome.passed { "✓" } else { "✗" };
                format!("{}. {} {}", i + 1, mark, outcome.description)
            })
            .collect()
    }
}
