//! Declarative GraphQL field definitions.
//!
//! A field is described by implementing [`Field`] (arguments, output type,
//! extra attributes and field-level rules) and, when it computes its own
//! value, [`Resolve`]. Wrapping it in a [`FieldDefinition`] produces the
//! attribute mapping a schema builder consumes, with the resolver guarded by
//! argument validation.
//!
//! ```
//! use gqlfield::field::{ArgumentDef, Args, Field, FieldDefinition, FieldType, Resolve, ResolveCall, Services};
//! use serde_json::{Map, Value, json};
//!
//! struct Greeting;
//!
//! impl Field for Greeting {
//!     fn args(&self) -> Args {
//!         Args::from([(
//!             "name".to_string(),
//!             ArgumentDef::new(FieldType::named("String")).rules(["required"]),
//!         )])
//!     }
//!
//!     fn field_type(&self) -> Option<FieldType> {
//!         Some(FieldType::named("String"))
//!     }
//! }
//!
//! impl Resolve for Greeting {
//!     fn resolve(&self, call: &ResolveCall) -> gqlfield::Result<Value> {
//!         Ok(call.arg("name").cloned().unwrap_or(Value::Null))
//!     }
//! }
//!
//! let field = FieldDefinition::resolvable(Greeting, Services::default());
//! let resolver = field.resolver().unwrap();
//!
//! assert!(resolver.call(&ResolveCall::default()).is_err());
//! let args = Map::from_iter([("name".to_string(), json!("Ada"))]);
//! let call = ResolveCall::default().with_args(args);
//! assert_eq!(resolver.call(&call).unwrap(), json!("Ada"));
//! ```

mod args;
mod attributes;
mod call;
mod definition;
mod types;

pub use args::{ArgumentDef, Args, RuleSpec};
pub use attributes::{Attribute, Attributes, Resolver};
pub use call::{FieldInfo, ResolveCall};
pub use definition::{FieldDefinition, Services};
pub use types::FieldType;

use serde_json::{Map, Value};

use crate::error::Result;
use crate::validation::Rule;

/// The shape of a field: what it accepts, what it returns, how it is checked.
///
/// Every method has an empty default, so a field only overrides what it needs.
pub trait Field: Send + Sync + 'static {
    /// Arguments this field accepts, in declaration order.
    fn args(&self) -> Args {
        Args::new()
    }

    /// Extra attributes merged over the constructor-supplied ones.
    fn attributes(&self) -> Map<String, Value> {
        Map::new()
    }

    /// The output type; `None` leaves the `type` attribute null.
    fn field_type(&self) -> Option<FieldType> {
        None
    }

    /// Field-level rules, evaluated with the same call the resolver receives.
    fn rules(&self, _call: &ResolveCall) -> Vec<Rule> {
        Vec::new()
    }
}

/// A field that computes its own value.
pub trait Resolve: Field {
    fn resolve(&self, call: &ResolveCall) -> Result<Value>;
}
