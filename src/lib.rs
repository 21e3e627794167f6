//! # gqlfield - Declarative GraphQL field definitions with validated resolvers
//!
//! A field is described once: its type, its arguments, the validation rules
//! attached to those arguments, and optionally a resolver. Wrapping it in a
//! [`field::FieldDefinition`] produces the attribute mapping a schema builder
//! consumes. When the field can resolve, the installed resolver validates the
//! call's arguments first and only then runs the field's own logic.
//!
//! Fields can be written in Rust or declared in a `.gqlfield.yml` file and
//! served through a dynamic async-graphql schema.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a starter config
//! gqlfield init
//!
//! # Inspect what a field expands to
//! gqlfield describe hello
//!
//! # Run its validated resolver
//! gqlfield resolve hello --args '{"name": "Ada"}'
//!
//! # Serve the schema with GraphiQL
//! gqlfield serve
//! ```
//!
//! ## Modules
//!
//! - [`field`]: Field contract, attribute mapping and the validating resolver
//! - [`validation`]: Rules, validation results and the rule engine
//! - [`registry`]: Named GraphQL types and type references
//! - [`global_id`]: Relay global ID encoding
//! - [`declare`]: Fields declared in configuration
//! - [`graphql`]: Dynamic schema assembly and HTTP server
//! - [`config`]: Configuration loading and management
//! - [`cli`]: Command-line interface

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.gqlfield.yml` files and project discovery.
pub mod config;

/// Fields declared in configuration instead of Rust code.
pub mod declare;

/// Error types and result aliases.
///
/// Defines `FieldError`, `ValidationError` and `Result<T>`.
pub mod error;

/// The field contract and `FieldDefinition`.
pub mod field;

/// Relay global ID helpers.
pub mod global_id;

/// Dynamic GraphQL schema built from field definitions.
pub mod graphql;

/// Tracing subscriber setup.
pub mod logging;

/// Type registry.
pub mod registry;

/// Validation rules and the rule engine.
pub mod validation;

pub use error::{FieldError, Result, ValidationError};
