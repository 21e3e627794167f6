//! Conversions between field definitions and async-graphql's dynamic types.

use async_graphql::dynamic::TypeRef;
use async_graphql::{ErrorExtensions, Name, Value as GqlValue};
use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::FieldError;
use crate::field::FieldType;

pub fn type_ref(ty: &FieldType) -> TypeRef {
    match ty {
        FieldType::Named(name) => TypeRef::named(name.clone()),
        FieldType::NonNull(inner) => TypeRef::NonNull(Box::new(type_ref(inner))),
        FieldType::List(inner) => TypeRef::List(Box::new(type_ref(inner))),
    }
}

pub fn to_graphql_value(value: Value) -> async_graphql::Result<GqlValue> {
    GqlValue::from_json(value).map_err(|e| async_graphql::Error::new(e.to_string()))
}

pub fn to_json_value(value: &GqlValue) -> async_graphql::Result<Value> {
    value
        .clone()
        .into_json()
        .map_err(|e| async_graphql::Error::new(e.to_string()))
}

pub fn to_json_args(args: &IndexMap<Name, GqlValue>) -> async_graphql::Result<Map<String, Value>> {
    args.iter()
        .map(|(name, value)| Ok((name.to_string(), to_json_value(value)?)))
        .collect()
}

/// Validation failures keep their per-argument messages under
/// `extensions.validation`.
pub fn to_graphql_error(err: FieldError) -> async_graphql::Error {
    match err {
        FieldError::Validation(e) => {
            let details = serde_json::to_value(e.validation().errors())
                .ok()
                .and_then(|v| GqlValue::from_json(v).ok());
            async_graphql::Error::new(e.to_string()).extend_with(|_, ext| {
                ext.set("code", "VALIDATION");
                if let Some(details) = details {
                    ext.set("validation", details);
                }
            })
        }
        other => async_graphql::Error::new(other.to_string()),
    }
}


