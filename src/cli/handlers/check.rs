use anyhow::Result;
use colored::Colorize;
use serde_json::{Map, json};

use super::CommandContext;
use super::utils::{parse_json_object, print_rules, print_validation};
use crate::field::ResolveCall;

/// Shows the rules a call would be checked against, then runs the validator.
pub fn handle_check(ctx: &CommandContext, field: String, args: String, json: bool) -> Result<()> {
    let entry = ctx.field(&field)?;
    let call = ResolveCall::default().with_args(parse_json_object(&args, "--args")?);

    let rules = entry.definition.rules(&call);
    let empty = Map::new();
    let data = call.args.as_ref().unwrap_or(&empty);
    let validation = entry.definition.services().validator.make(data, &rules)?;

    if json {
        let out = json!({
            "field": format!("{}.{}", entry.type_name, entry.name),
            "rules": rules,
            "passes": validation.passes(),
            "errors": validation.errors(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Rules for {}.{}:", entry.type_name, entry.name.cyan().bold());
        print_rules(&rules);
        print_validation(&validation);
    }

    // Non-zero exit so scripts can branch on the result
    if validation.fails() {
        std::process::exit(1);
    }
    Ok(())
}
