//! Rulecheck CLI - run rule sets against text input.
//!
//! This is a demonstration CLI for the Rulecheck library.

use anyhow::{bail, Context};
use rulecheck::prelude::*;
use std::process::ExitCode;

const EXIT_OK: u8 = 0;
const EXIT_FAILED: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    ExitCode::from(run(&args))
}

/// Dispatch a command line and return its exit status.
fn run(args: &[String]) -> u8 {
    let program = args.first().map(String::as_str).unwrap_or("rulecheck");

    if args.len() < 2 {
        print_usage(program);
        return EXIT_OK;
    }

    let result = match args[1].as_str() {
        "list" => list_rule_sets(),
        "check" => {
            if args.len() < 4 {
                eprintln!("Error: Please specify a rule set and an input");
                eprintln!("Usage: {} check <ruleset> <input>", program);
                return EXIT_ERROR;
            }
            check_input(&args[2], &args[3])
        }
        "config" => {
            if args.len() < 4 {
                eprintln!("Error: Please specify a rule-set file and an input");
                eprintln!("Usage: {} config <file> <input> [--json]", program);
                return EXIT_ERROR;
            }
            let as_json = args[4..].iter().any(|a| a == "--json");
            check_with_config(&args[2], &args[3], as_json)
        }
        "help" | "--help" | "-h" => {
            print_usage(program);
            Ok(true)
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage(program);
            return EXIT_ERROR;
        }
    };

    match result {
        Ok(true) => EXIT_OK,
        Ok(false) => EXIT_FAILED,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            EXIT_ERROR
        }
    }
}

fn print_usage(program: &str) {
    println!("Rulecheck v{}", rulecheck::VERSION);
    println!();
    println!("Usage: {} <command> [options]", program);
    println!();
    println!("Commands:");
    println!("  list                          List built-in rule sets");
    println!("  check <ruleset> <input>       Check input against a built-in rule set");
    println!("  config <file> <input> [--json]  Check input against a TOML/JSON rule-set file");
    println!("  help                          Show this help message");
    println!();
    println!("Exit status: 0 if every rule passed, 1 if any failed, 2 on error.");
}

fn list_rule_sets() -> anyhow::Result<bool> {
    let registry = RuleRegistry::with_builtins()?;

    println!("Available rule sets ({} total):", registry.len());
    println!();

    for (id, entry) in registry.entries() {
        println!("  • {} - {}", id, entry.description);
        for description in entry.pipeline.descriptions() {
            println!("      - {}", description);
        }
    }

    Ok(true)
}

fn check_input(ruleset: &str, input: &str) -> anyhow::Result<bool> {
    let registry = RuleRegistry::with_builtins()?;
    let Some(pipeline) = registry.get(ruleset) else {
        bail!(RulecheckError::UnknownRuleSet(ruleset.to_string()));
    };

    let report = pipeline.report(input)?;
    print_report(&report);
    Ok(report.passed())
}

fn check_with_config(path: &str, input: &str, as_json: bool) -> anyhow::Result<bool> {
    let config = RuleSetConfig::from_file(path)
        .with_context(|| format!("failed to load rule set from {}", path))?;
    let pipeline = config.build()?;

    let report = pipeline.report(&Value::from(input))?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("🔍 Rule set '{}'", config.name);
        print_report(&report);
    }
    Ok(report.passed())
}

fn print_report(report: &ValidationReport) {
    for line in report.detailed() {
        println!("   {}", line);
    }
    println!("{}", report.summary());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_usage_errors_exit_with_error_status() {
        assert_eq!(run(&args(&["rulecheck", "check"])), EXIT_ERROR);
        assert_eq!(run(&args(&["rulecheck", "check", "password"])), EXIT_ERROR);
        assert_eq!(run(&args(&["rulecheck", "config", "rules.toml"])), EXIT_ERROR);
        assert_eq!(run(&args(&["rulecheck", "frobnicate"])), EXIT_ERROR);
    }

    #[test]
    fn test_help_exits_ok() {
        assert_eq!(run(&args(&["rulecheck"])), EXIT_OK);
        assert_eq!(run(&args(&["rulecheck", "help"])), EXIT_OK);
    }

    #[test]
    fn test_check_exit_status_follows_outcomes() {
        assert_eq!(run(&args(&["rulecheck", "check", "password", "Teste12345"])), EXIT_OK);
        assert_eq!(run(&args(&["rulecheck", "check", "password", "Teste123"])), EXIT_FAILED);
        assert_eq!(run(&args(&["rulecheck", "check", "nope", "Teste123"])), EXIT_ERROR);
    }
}
