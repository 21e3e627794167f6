use anyhow::Result;

use super::CommandContext;
use crate::graphql::build_schema;

pub fn handle_sdl(ctx: &CommandContext) -> Result<()> {
    let schema = build_schema(&ctx.config, None)?;
    print!("{}", schema.sdl());
    Ok(())
}
