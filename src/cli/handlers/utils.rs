use anyhow::{Context, Result, bail};
use colored::Colorize;
use serde_json::{Map, Value};
use std::io::{self, Read};

use crate::validation::{Rule, Validation};

/// Parses a JSON CLI argument; `-` reads it from stdin.
pub fn parse_json(input: &str, what: &str) -> Result<Value> {
    let text = if input == "-" {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        content
    } else {
        input.to_string()
    };
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON for {}", what))
}

/// Parses a JSON CLI argument that must be an object, such as `--args`.
pub fn parse_json_object(input: &str, what: &str) -> Result<Map<String, Value>> {
    match parse_json(input, what)? {
        Value::Object(map) => Ok(map),
        _ => bail!("{} must be a JSON object", what),
    }
}

pub fn parse_json_opt(input: Option<&str>, what: &str) -> Result<Option<Value>> {
    input.map(|i| parse_json(i, what)).transpose()
}

pub fn print_rules(rules: &[Rule]) {
    if rules.is_empty() {
        println!("  {}", "(no rules)".dimmed());
        return;
    }
    let width = rules.iter().map(|r| r.attribute.len()).max().unwrap_or(0);
    for rule in rules {
        let attribute = format!("{:width$}", rule.attribute, width = width);
        println!("  {}  {}", attribute.cyan(), rule.rule);
    }
}

pub fn print_validation(validation: &Validation) {
    if validation.passes() {
        println!("{}", "✓ passes".green());
        return;
    }
    println!("{}", "✗ fails".red());
    for (attribute, messages) in validation.errors() {
        for message in messages {
            println!("  {}: {}", attribute.cyan(), message);
        }
    }
}
