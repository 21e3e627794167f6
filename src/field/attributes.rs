use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use super::{Args, FieldType, ResolveCall};
use crate::error::Result;

type ResolveFn = dyn Fn(&ResolveCall) -> Result<Value> + Send + Sync;

/// A callable resolver, cheap to clone and share across threads.
#[derive(Clone)]
pub struct Resolver(Arc<ResolveFn>);

impl Resolver {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ResolveCall) -> Result<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, call: &ResolveCall) -> Result<Value> {
        (self.0)(call)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Resolver(..)")
    }
}

/// One entry of a field's attribute mapping.
#[derive(Debug, Clone)]
pub enum Attribute {
    Value(Value),
    Args(Args),
    Type(FieldType),
    Resolve(Resolver),
}

impl Attribute {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Args(args) => Value::Object(
                args.iter()
                    .map(|(name, arg)| (name.clone(), arg.to_json()))
                    .collect(),
            ),
            Self::Type(ty) => Value::String(ty.to_string()),
            Self::Resolve(_) => Value::Bool(true),
        }
    }
}

/// The attribute mapping a schema builder reads for one field.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    entries: IndexMap<String, Attribute>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites; an overwritten key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, attribute: Attribute) {
        self.entries.insert(key.into(), attribute);
    }

    /// Present and not null.
    pub fn get(&self, key: &str) -> Option<&Attribute> {
        self.entries.get(key).filter(|a| !a.is_null())
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The argument map, unless `attributes()` replaced it with a plain value.
    pub fn args(&self) -> Option<&Args> {
        match self.get("args") {
            Some(Attribute::Args(args)) => Some(args),
            _ => None,
        }
    }

    pub fn field_type(&self) -> Option<&FieldType> {
        match self.get("type") {
            Some(Attribute::Type(ty)) => Some(ty),
            _ => None,
        }
    }

    pub fn resolver(&self) -> Option<&Resolver> {
        match self.get("resolve") {
            Some(Attribute::Resolve(resolver)) => Some(resolver),
            _ => None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.get("description").and_then(Attribute::as_str)
    }

    pub fn deprecation_reason(&self) -> Option<&str> {
        self.get("deprecationReason").and_then(Attribute::as_str)
    }

    /// Resolvers render as `true`, absent ones as `null`.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_attributes_are_unset() {
        let mut attributes = Attributes::new();
        attributes.insert("resolve", Attribute::Value(Value::Null));
        attributes.insert("description", Attribute::Value(json!("Users")));

        assert!(!attributes.has("resolve"));
        assert!(attributes.resolver().is_none());
        assert_eq!(attributes.description(), Some("Users"));
        assert_eq!(attributes.keys().collect::<Vec<_>>(), vec!["resolve", "description"]);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut attributes = Attributes::new();
        attributes.insert("type", Attribute::Value(json!("Y")));
        attributes.insert("args", Attribute::Args(Args::new()));
        attributes.insert("type", Attribute::Type(FieldType::named("X")));

        assert_eq!(attributes.keys().collect::<Vec<_>>(), vec!["type", "args"]);
        assert_eq!(attributes.field_type(), Some(&FieldType::named("X")));
    }

    #[test]
    fn test_to_json_renders_resolver_presence() {
        let mut attributes = Attributes::new();
        attributes.insert("resolve", Attribute::Resolve(Resolver::new(|_| Ok(Value::Null))));
        attributes.insert("type", Attribute::Type(FieldType::named("String")));

        assert_eq!(
            attributes.to_json(),
            json!({"resolve": true, "type": "String"})
        );
    }
}
