use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FieldError;

/// Reference to a GraphQL type defined elsewhere, in SDL notation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldType {
    Named(String),
    NonNull(Box<FieldType>),
    List(Box<FieldType>),
}

impl FieldType {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn non_null(self) -> Self {
        match self {
            Self::NonNull(_) => self,
            other => Self::NonNull(Box::new(other)),
        }
    }

    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// The named type at the core of any list/non-null wrapping.
    pub fn base_name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::NonNull(inner) | Self::List(inner) => inner.base_name(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{}", name),
            Self::NonNull(inner) => write!(f, "{}!", inner),
            Self::List(inner) => write!(f, "[{}]", inner),
        }
    }
}

fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

impl FromStr for FieldType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || FieldError::InvalidTypeRef(s.to_string());

        if let Some(inner) = trimmed.strip_suffix('!') {
            let inner: FieldType = inner.parse().map_err(|_| invalid())?;
            if inner.is_non_null() {
                return Err(invalid());
            }
            return Ok(Self::NonNull(Box::new(inner)));
        }
        if let Some(inner) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            let inner: FieldType = inner.parse().map_err(|_| invalid())?;
            return Ok(Self::List(Box::new(inner)));
        }
        if is_name(trimmed) {
            Ok(Self::Named(trimmed.to_string()))
        } else {
            Err(invalid())
        }
    }
}

impl TryFrom<String> for FieldType {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldType> for String {
    fn from(ty: FieldType) -> Self {
        ty.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wrapped_types() {
        let ty: FieldType = "[String!]!".parse().unwrap();
        assert_eq!(ty, FieldType::named("String").non_null().list().non_null());
        assert_eq!(ty.base_name(), "String");
        assert_eq!(ty.to_string(), "[String!]!");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("String!!".parse::<FieldType>().is_err());
        assert!("[String".parse::<FieldType>().is_err());
        assert!("1Type".parse::<FieldType>().is_err());
        assert!("".parse::<FieldType>().is_err());
    }

    #[test]
    fn test_non_null_is_idempotent() {
        let ty = FieldType::named("ID").non_null().non_null();
        assert_eq!(ty.to_string(), "ID!");
    }

    #[test]
    fn test_serde_as_string() {
        let ty: FieldType = serde_json::from_str("\"[User]\"").unwrap();
        assert_eq!(ty, FieldType::named("User").list());
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"[User]\"");
    }
}
