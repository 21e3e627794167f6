//! Registry of the GraphQL types a schema knows about.
//!
//! Fields refer to their types by name; the registry is what turns a type
//! notation such as `[User!]` into a checked [`FieldType`].

use indexmap::IndexMap;

use crate::error::{FieldError, Result};
use crate::field::FieldType;

pub const BUILTIN_SCALARS: &[&str] = &["String", "Int", "Float", "Boolean", "ID"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Scalar,
    Object,
}

#[derive(Debug, Clone)]
struct TypeEntry {
    kind: TypeKind,
    description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Registry {
    types: IndexMap<String, TypeEntry>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// A registry holding only the built-in scalars.
    pub fn new() -> Self {
        let types = BUILTIN_SCALARS
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    TypeEntry {
                        kind: TypeKind::Scalar,
                        description: None,
                    },
                )
            })
            .collect();
        Self { types }
    }

    /// Registers an object type. Re-registering an object updates its description.
    pub fn register_object(&mut self, name: &str, description: Option<String>) -> Result<()> {
        if !is_type_name(name) {
            return Err(FieldError::InvalidTypeRef(name.to_string()));
        }
        if self.kind(name) == Some(TypeKind::Scalar) {
            return Err(FieldError::Config(format!(
                "'{}' is a built-in scalar and cannot be redefined",
                name
            )));
        }
        self.types.insert(
            name.to_string(),
            TypeEntry {
                kind: TypeKind::Object,
                description,
            },
        );
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn kind(&self, name: &str) -> Option<TypeKind> {
        self.types.get(name).map(|entry| entry.kind)
    }

    /// Parses a type notation and checks its named type is registered.
    pub fn type_ref(&self, notation: &str) -> Result<FieldType> {
        let ty: FieldType = notation.parse()?;
        self.check(&ty)?;
        Ok(ty)
    }

    pub fn check(&self, ty: &FieldType) -> Result<()> {
        if self.contains(ty.base_name()) {
            Ok(())
        } else {
            Err(FieldError::UnknownType(ty.base_name().to_string()))
        }
    }

    /// Registered object types with their descriptions, in registration order.
    pub fn objects(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.types
            .iter()
            .filter(|(_, entry)| entry.kind == TypeKind::Object)
            .map(|(name, entry)| (name.as_str(), entry.description.as_deref()))
    }
}

fn is_type_name(name: &str) -> bool {
    matches!(name.parse::<FieldType>(), Ok(FieldType::Named(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_scalars() {
        let registry = Registry::new();
        for name in BUILTIN_SCALARS {
            assert_eq!(registry.kind(name), Some(TypeKind::Scalar));
        }
        assert_eq!(registry.objects().count(), 0);
    }

    #[test]
    fn test_type_ref_checks_names() {
        let mut registry = Registry::new();
        registry
            .register_object("User", Some("A person".to_string()))
            .unwrap();

        assert_eq!(
            registry.type_ref("[User!]").unwrap(),
            FieldType::named("User").non_null().list()
        );
        assert!(matches!(
            registry.type_ref("Post"),
            Err(FieldError::UnknownType(name)) if name == "Post"
        ));
        assert_eq!(
            registry.objects().collect::<Vec<_>>(),
            vec![("User", Some("A person"))]
        );
    }

    #[test]
    fn test_cannot_redefine_scalar() {
        let mut registry = Registry::new();
        assert!(registry.register_object("String", None).is_err());
        assert!(registry.register_object("[Bad]", None).is_err());
    }
}
