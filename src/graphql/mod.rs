//! GraphQL schema assembly and serving.
//!
//! Field definitions are registered on a dynamic async-graphql schema; each
//! field's validated resolver runs inside the engine's field resolution.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server
//! gqlfield serve --port 4000
//!
//! # Execute a query from CLI
//! gqlfield query '{ hello(name: "Ada") }'
//! ```

mod schema;
mod server;
mod types;

pub use schema::{FieldSchema, ResolveContext, SchemaBuilder, build_schema};
pub use server::run_server;
pub use types::{to_graphql_error, type_ref};
