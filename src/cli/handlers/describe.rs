use anyhow::Result;
use colored::Colorize;
use serde_json::{Map, Value};

use super::CommandContext;
use crate::declare::DeclaredEntry;
use crate::field::{Attribute, RuleSpec};

pub fn handle_describe(ctx: &CommandContext, field: Option<String>, json: bool) -> Result<()> {
    let entries: Vec<&DeclaredEntry> = match field {
        Some(ref path) => vec![ctx.field(path)?],
        None => ctx.entries.iter().collect(),
    };

    if json {
        let map: Map<String, Value> = entries
            .iter()
            .map(|e| (format!("{}.{}", e.type_name, e.name), e.definition.to_json()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&Value::Object(map))?);
        return Ok(());
    }

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_entry(entry);
    }
    Ok(())
}

fn print_entry(entry: &DeclaredEntry) {
    let attributes = entry.definition.attributes();
    let ty = attributes
        .field_type()
        .map(|t| t.to_string())
        .unwrap_or_else(|| "?".to_string());

    println!(
        "{}.{}: {}",
        entry.type_name.dimmed(),
        entry.name.cyan().bold(),
        ty.blue()
    );
    if let Some(description) = attributes.description() {
        println!("  {}", description);
    }
    if let Some(reason) = attributes.deprecation_reason() {
        println!("  {} {}", "deprecated:".yellow(), reason);
    }
    let resolver = if attributes.resolver().is_some() {
        "validated".green()
    } else {
        "parent property".dimmed()
    };
    println!("  resolve: {}", resolver);

    if let Some(args) = attributes.args() {
        for (name, arg) in args {
            let rules = match arg.rules {
                Some(RuleSpec::Static(ref rules)) => rules.join(" "),
                Some(RuleSpec::Dynamic(_)) => "<dynamic>".to_string(),
                None => String::new(),
            };
            println!("  {} {}: {} {}", "arg".dimmed(), name.cyan(), arg.ty, rules.dimmed());
        }
    }

    for (key, attribute) in attributes.iter() {
        if matches!(key, "args" | "type" | "resolve" | "description" | "deprecationReason") {
            continue;
        }
        if let Attribute::Value(value) = attribute {
            println!("  {} = {}", key.magenta(), value);
        }
    }
}
