use anyhow::Result;
use serde_json::Value;

use super::CommandContext;
use super::utils::{parse_json_object, parse_json_opt};
use crate::graphql::build_schema;

pub fn handle_query(
    ctx: &CommandContext,
    query: String,
    variables: Option<String>,
    context: Option<String>,
) -> Result<()> {
    let context = parse_json_opt(context.as_deref(), "--context")?;
    let schema = build_schema(&ctx.config, context)?;

    let mut request = async_graphql::Request::new(query);
    if let Some(ref variables) = variables {
        let variables = parse_json_object(variables, "--variables")?;
        request = request.variables(async_graphql::Variables::from_json(Value::Object(variables)));
    }

    let response = tokio::runtime::Runtime::new()?.block_on(schema.execute(request));
    println!("{}", serde_json::to_string_pretty(&response)?);

    // Errors are already in the printed response
    if response.is_err() {
        std::process::exit(1);
    }
    Ok(())
}
