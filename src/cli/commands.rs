use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gqlfield")]
#[command(
    author,
    version,
    about = "Declarative GraphQL field definitions with validated resolvers"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for .gqlfield.yml by default)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter .gqlfield.yml in the current directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show the attribute mapping of declared fields
    #[command(visible_alias = "show")]
    Describe {
        /// Field as `name` (query type) or `Type.name`; all fields when omitted
        field: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a field's rules against arguments without resolving
    Check {
        /// Field as `name` or `Type.name`
        field: String,

        /// Arguments as a JSON object (use '-' to read from stdin)
        #[arg(short, long, default_value = "{}")]
        args: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a field's validated resolver
    Resolve {
        /// Field as `name` or `Type.name`
        field: String,

        /// Arguments as a JSON object (use '-' to read from stdin)
        #[arg(short, long)]
        args: Option<String>,

        /// Parent value as JSON
        #[arg(long)]
        root: Option<String>,

        /// Context value as JSON
        #[arg(long)]
        context: Option<String>,
    },

    /// Print the schema in SDL
    Sdl,

    /// Execute a GraphQL query against the declared schema
    Query {
        /// GraphQL query string
        query: String,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,

        /// Context value as JSON
        #[arg(long)]
        context: Option<String>,
    },

    /// Start the GraphQL server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Encode or decode Relay global IDs
    #[command(subcommand)]
    GlobalId(GlobalIdAction),
}

#[derive(Subcommand)]
pub enum GlobalIdAction {
    /// Encode a type name and ID
    Encode {
        /// Object type name
        type_name: String,

        /// Type-local ID
        id: String,
    },

    /// Decode a global ID into type name and ID
    Decode {
        /// Base64 global ID
        global_id: String,
    },
}
