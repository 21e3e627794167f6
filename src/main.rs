use anyhow::Result;
use clap::Parser;

use gqlfield::cli::handlers::{self, CommandContext};
use gqlfield::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    gqlfield::logging::init(cli.verbose, cli.log_file.clone());

    // Only init and global-id work without a project config
    let load = || CommandContext::load(cli.config.as_deref());

    match cli.command {
        Commands::Init { force } => handlers::handle_init(force),
        Commands::GlobalId(action) => handlers::handle_global_id(action),
        Commands::Describe { field, json } => handlers::handle_describe(&load()?, field, json),
        Commands::Check { field, args, json } => {
            handlers::handle_check(&load()?, field, args, json)
        }
        Commands::Resolve {
            field,
            args,
            root,
            context,
        } => handlers::handle_resolve(&load()?, field, args, root, context),
        Commands::Sdl => handlers::handle_sdl(&load()?),
        Commands::Query {
            query,
            variables,
            context,
        } => handlers::handle_query(&load()?, query, variables, context),
        Commands::Serve { port } => handlers::handle_serve(load()?, port),
    }
}
