use anyhow::{Result, bail};
use serde_json::Value;

use super::CommandContext;
use super::utils::{parse_json_object, parse_json_opt};
use crate::field::{FieldInfo, ResolveCall};

pub fn handle_resolve(
    ctx: &CommandContext,
    field: String,
    args: Option<String>,
    root: Option<String>,
    context: Option<String>,
) -> Result<()> {
    let entry = ctx.field(&field)?;
    let Some(resolver) = entry.definition.resolver() else {
        bail!(
            "{}.{} has no resolver; its value comes from the parent object",
            entry.type_name,
            entry.name
        );
    };

    let root = parse_json_opt(root.as_deref(), "--root")?.unwrap_or(Value::Null);
    let mut call =
        ResolveCall::new(root).with_info(FieldInfo::new(&entry.type_name, &entry.name));
    if let Some(ref args) = args {
        call = call.with_args(parse_json_object(args, "--args")?);
    }
    if let Some(context) = parse_json_opt(context.as_deref(), "--context")? {
        call = call.with_context(context);
    }

    let value = resolver.call(&call)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
