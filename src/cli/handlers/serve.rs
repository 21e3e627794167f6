use anyhow::Result;

use super::CommandContext;
use crate::graphql::{build_schema, run_server};

pub fn handle_serve(ctx: CommandContext, port: Option<u16>) -> Result<()> {
    let schema = build_schema(&ctx.config, None)?;
    let mut settings = ctx.config.server.clone();
    if let Some(port) = port {
        settings.port = port;
    }

    let url = format!("http://{}:{}{}", settings.host, settings.port, settings.path);
    println!("Starting GraphQL server on {}", url);
    println!("GraphiQL: {}", url);

    tokio::runtime::Runtime::new()?.block_on(async { run_server(schema, &settings).await })?;
    Ok(())
}
