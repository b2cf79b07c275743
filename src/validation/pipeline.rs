//! Validation pipeline implementation.

use crate::core::error::{PipelineError, PipelineResult};
use crate::core::outcome::{ValidationOutcome, ValidationReport};
use crate::core::rule::ValidationRule;
use log::{debug, trace, warn};
use rayon::prelude::*;
use std::borrow::Borrow;
use std::fmt;
use std::time::Instant;

/// Ordered set of rules evaluated together against one input.
///
/// Every rule runs on every call to [`run`](Self::run); a rule answering
/// `false` does not stop the others. Only an abnormal predicate failure
/// aborts the run. The pipeline holds no mutable state, so one instance can
/// be shared and run from many threads.
pub struct ValidationPipeline<T: ?Sized> {
    rules: Vec<ValidationRule<T>>,
}

impl<T: ?Sized> ValidationPipeline<T> {
    /// Create a new pipeline with the given rules.
    pub fn new(rules: Vec<ValidationRule<T>>) -> Self {
        trace!("building pipeline with {} rule(s)", rules.len());
        Self { rules }
    }

    /// Create a pipeline with no rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule.
    pub fn add_rule(&mut self, rule: ValidationRule<T>) {
        self.rules.push(rule);
    }

    /// Append a rule, builder style.
    pub fn with_rule(mut self, rule: ValidationRule<T>) -> Self {
        self.add_rule(rule);
        self
    }

    /// The rules, in evaluation order.
    pub fn rules(&self) -> &[ValidationRule<T>] {
        &self.rules
    }

    /// Rule descriptions, in evaluation order.
    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.description())
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the pipeline has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule against `input`.
    ///
    /// Returns one outcome per rule, in rule order. If a predicate fails
    /// abnormally the remaining rules are skipped and the failure is returned
    /// with the index and description of the rule that raised it.
    pub fn run(&self, input: &T) -> PipelineResult<Vec<ValidationOutcome>> {
        let mut outcomes = Vec::with_capacity(self.rules.len());

        for (index, rule) in self.rules.iter().enumerate() {
            match rule.evaluate(input) {
                Ok(passed) => {
                    debug!(
                        "rule {} '{}': {}",
                        index,
                        rule.description(),
                        if passed { "passed" } else { "failed" }
                    );
                    outcomes.push(ValidationOutcome::new(passed, rule.description()));
                }
                Err(source) => {
                    warn!(
                        "rule {} '{}' could not be evaluated: {}",
                        index,
                        rule.description(),
                        source
                    );
                    return Err(PipelineError::RuleFailed {
                        index,
                        description: rule.description().to_string(),
                        source,
                    });
                }
            }
        }

        Ok(outcomes)
    }

    /// Run and wrap the outcomes in a timed report.
    pub fn report(&self, input: &T) -> PipelineResult<ValidationReport> {
        let start = Instant::now();
        let mut report = ValidationReport::new(self.run(input)?);
        report.duration_ms = start.elapsed().as_millis() as u64;
        Ok(report)
    }

    /// Whether every rule passes for `input`. Vacuously true with no rules.
    pub fn is_valid(&self, input: &T) -> PipelineResult<bool> {
        Ok(self.run(input)?.iter().all(|o| o.passed))
    }

    /// Run the pipeline over many inputs in parallel.
    ///
    /// Results come back in input order. Each input is evaluated on its own,
    /// so an abnormal failure for one input leaves the others untouched.
    pub fn run_many<I>(&self, inputs: &[I]) -> Vec<PipelineResult<Vec<ValidationOutcome>>>
    where
        I: Borrow<T> + Sync,
    {
        inputs
            .par_iter()
            .map(|input| self.run(input.borrow()))
            .collect()
    }
}

impl<T: ?Sized> Default for ValidationPipeline<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized> Clone for ValidationPipeline<T> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for ValidationPipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationPipeline")
            .field("rules", &self.rules)
            .finish()
    }
}

impl<T: ?Sized> FromIterator<ValidationRule<T>> for ValidationPipeline<T> {
    fn from_iter<It: IntoIterator<Item = ValidationRule<T>>>(iter: It) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::PredicateError;
    use crate::core::outcome::all_passed;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn number_rules() -> ValidationPipeline<i64> {
        ValidationPipeline::empty()
            .with_rule(ValidationRule::from_fn("is positive", |n: &i64| *n > 0).unwrap())
            .with_rule(ValidationRule::from_fn("is even", |n: &i64| n % 2 == 0).unwrap())
            .with_rule(ValidationRule::from_fn("below 100", |n: &i64| *n < 100).unwrap())
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = ValidationPipeline::<str>::empty();
        let outcomes = pipeline.run("anything").unwrap();

        assert!(outcomes.is_empty());
        assert!(all_passed(&outcomes));
        assert!(pipeline.is_valid("anything").unwrap());
    }

    #[test]
    fn test_outcomes_follow_rule_order() {
        let pipeline = number_rules();
        let outcomes = pipeline.run(&7).unwrap();

        assert_eq!(outcomes.len(), pipeline.len());
        let descriptions: Vec<_> = outcomes.iter().map(|o| o.description.as_str()).collect();
        assert_eq!(descriptions, pipeline.descriptions().collect::<Vec<_>>());
        let passed: Vec<_> = outcomes.iter().map(|o| o.passed).collect();
        assert_eq!(passed, vec![true, false, true]);
    }

    #[test]
    fn test_no_short_circuit_on_false() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut pipeline = ValidationPipeline::<i64>::empty();
        for i in 0..3 {
            let calls = Arc::clone(&calls);
            pipeline.add_rule(
                ValidationRule::from_fn(format!("rule {}", i), move |_: &i64| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    false
                })
                .unwrap(),
            );
        }

        let outcomes = pipeline.run(&0).unwrap();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_abnormal_failure_aborts_run() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let pipeline = ValidationPipeline::<str>::empty()
            .with_rule(ValidationRule::from_fn("non-empty", |s: &str| !s.is_empty()).unwrap())
            .with_rule(
                ValidationRule::new("is a number", |s: &str| {
                    s.parse::<f64>()
                        .map(|n| n.is_finite())
                        .map_err(|e| PredicateError::InvalidInput(e.to_string()))
                })
                .unwrap(),
            )
            .with_rule(
                ValidationRule::from_fn("never reached", move |_: &str| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    true
                })
                .unwrap(),
            );

        let error = pipeline.run("abc").unwrap_err();
        assert_eq!(error.rule_index(), 1);
        assert_eq!(error.rule_description(), "is a number");
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // A later run is not affected by the earlier failure.
        let outcomes = pipeline.run("12").unwrap();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_run_is_idempotent() {
        let pipeline = number_rules();
        assert_eq!(pipeline.run(&42).unwrap(), pipeline.run(&42).unwrap());
    }

    #[test]
    fn test_report() {
        let report = number_rules().report(&200).unwrap();
        assert!(!report.passed());
        assert_eq!(report.passed_count(), 2);
    }

    #[test]
    fn test_run_many_keeps_input_order() {
        let pipeline = number_rules();
        let inputs: Vec<i64> = (-5..50).collect();
        let results = pipeline.run_many(&inputs);

        assert_eq!(results.len(), inputs.len());
        for (input, result) in inputs.iter().zip(results) {
            assert_eq!(result.unwrap(), pipeline.run(input).unwrap());
        }
    }

    #[test]
    fn test_run_many_isolates_failures() {
        let pipeline: ValidationPipeline<str> = std::iter::once(
            ValidationRule::new("parses", |s: &str| {
                s.parse::<i32>()
                    .map(|_| true)
                    .map_err(|e| PredicateError::InvalidInput(e.to_string()))
            })
            .unwrap(),
        )
        .collect();

        let inputs = vec!["1".to_string(), "x".to_string(), "3".to_string()];
        let results = pipeline.run_many(&inputs);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_pipeline_shared_across_threads() {
        let pipeline = Arc::new(number_rules());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let pipeline = Arc::clone(&pipeline);
                std::thread::spawn(move || pipeline.run(&(i * 2)).unwrap())
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let outcomes = handle.join().unwrap();
            assert_eq!(outcomes, pipeline.run(&(i as i64 * 2)).unwrap());
        }
    }
}
