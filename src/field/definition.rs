use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::{Attribute, Attributes, Field, Resolve, ResolveCall, Resolver};
use crate::error::{Result, ValidationError};
use crate::global_id::{self, GlobalId};
use crate::registry::Registry;
use crate::validation::{Rule, RuleValidator, Validator};

/// Services a field definition is built against.
#[derive(Clone)]
pub struct Services {
    pub validator: Arc<dyn Validator>,
    pub registry: Arc<Registry>,
}

impl Services {
    pub fn new(validator: Arc<dyn Validator>, registry: Arc<Registry>) -> Self {
        Self {
            validator,
            registry,
        }
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new(Arc::new(RuleValidator::new()), Arc::new(Registry::new()))
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// A field plus everything needed to register it on an object type.
pub struct FieldDefinition {
    attributes: Map<String, Value>,
    field: Arc<dyn Field>,
    resolver: Option<Resolver>,
    services: Services,
}

impl FieldDefinition {
    /// Wraps a field without a resolver; its `resolve` attribute stays null.
    ///
    /// This holds even when `F` implements [`Resolve`]: its `resolve` is never
    /// installed or called. Use [`FieldDefinition::resolvable`] to expose it.
    pub fn new<F: Field>(field: F, services: Services) -> Self {
        Self {
            attributes: Map::new(),
            field: Arc::new(field),
            resolver: None,
            services,
        }
    }

    /// Wraps a resolving field. The exposed resolver validates the call's
    /// arguments against [`FieldDefinition::rules`] before running `resolve`.
    pub fn resolvable<F: Resolve>(field: F, services: Services) -> Self {
        let field = Arc::new(field);
        let inner = Arc::clone(&field);
        let validator = Arc::clone(&services.validator);

        let resolver = Resolver::new(move |call: &ResolveCall| {
            let rules = collect_rules(inner.as_ref(), call);
            // No rules: hand the call straight to the field
            if !rules.is_empty() {
                let empty = Map::new();
                let data = call.args.as_ref().unwrap_or(&empty);
                let validation = validator.make(data, &rules)?;
                if validation.fails() {
                    debug!(
                        field = call.info.as_ref().map(|i| i.field_name.as_str()),
                        errors = %validation.summary(),
                        "argument validation failed"
                    );
                    return Err(ValidationError::new(validation).into());
                }
            }
            inner.resolve(call) // errors pass through untouched
        });

        Self {
            attributes: Map::new(),
            field,
            resolver: Some(resolver),
            services,
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// The merged attribute mapping.
    ///
    /// Constructor attributes, then `args`, then the field's own
    /// `attributes()`; `type` and `resolve` are written last and always win.
    pub fn attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        // Later writes replace earlier ones but keep the first position
        for (key, value) in &self.attributes {
            attributes.insert(key.clone(), Attribute::Value(value.clone()));
        }
        attributes.insert("args", Attribute::Args(self.field.args()));
        for (key, value) in self.field.attributes() {
            attributes.insert(key, Attribute::Value(value));
        }
        // type and resolve always come from the definition itself
        attributes.insert(
            "type",
            self.field
                .field_type()
                .map(Attribute::Type)
                .unwrap_or(Attribute::Value(Value::Null)),
        );
        attributes.insert(
            "resolve",
            self.resolver
                .clone()
                .map(Attribute::Resolve)
                .unwrap_or(Attribute::Value(Value::Null)),
        );
        attributes
    }

    /// A single attribute; `None` when absent or null.
    pub fn get(&self, key: &str) -> Option<Attribute> {
        self.attributes().get(key).cloned()
    }

    pub fn has(&self, key: &str) -> bool {
        self.attributes().has(key)
    }

    /// Per-argument rules in argument order, then the field-level rules.
    pub fn rules(&self, call: &ResolveCall) -> Vec<Rule> {
        collect_rules(self.field.as_ref(), call)
    }

    pub fn resolver(&self) -> Option<&Resolver> {
        self.resolver.as_ref()
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn registry(&self) -> &Registry {
        &self.services.registry
    }

    pub fn encode_global_id(&self, type_name: &str, id: &str) -> String {
        global_id::encode_global_id(type_name, id)
    }

    pub fn decode_global_id(&self, global_id: &str) -> Result<GlobalId> {
        global_id::decode_global_id(global_id)
    }

    pub fn decode_relay_id(&self, global_id: &str) -> Result<String> {
        global_id::decode_relay_id(global_id)
    }

    pub fn decode_relay_type(&self, global_id: &str) -> Result<String> {
        global_id::decode_relay_type(global_id)
    }

    pub fn to_json(&self) -> Value {
        self.attributes().to_json()
    }
}

impl fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("attributes", &self.to_json())
            .finish_non_exhaustive()
    }
}

fn collect_rules<F: Field + ?Sized>(field: &F, call: &ResolveCall) -> Vec<Rule> {
    let mut rules: Vec<Rule> = field
        .args()
        .iter()
        .filter_map(|(name, arg)| arg.rules.as_ref().map(|spec| (name, spec)))
        .flat_map(|(name, spec)| {
            spec.evaluate(call)
                .into_iter()
                .map(move |rule| Rule::new(name.clone(), rule))
        })
        .collect();
    rules.extend(field.rules(call));
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;
    use crate::field::{ArgumentDef, Args, FieldType};
    use crate::validation::Validation;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Plain;

    impl Field for Plain {}

    struct Counted {
        calls: Arc<AtomicUsize>,
    }

    impl Field for Counted {
        fn args(&self) -> Args {
            Args::from([(
                "id".to_string(),
                ArgumentDef::new(FieldType::named("ID")).rules(["required"]),
            )])
        }
    }

    impl Resolve for Counted {
        fn resolve(&self, call: &ResolveCall) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(call.arg("id").cloned().unwrap_or(Value::Null))
        }
    }

    #[test]
    fn test_plain_field_defaults() {
        let field = FieldDefinition::new(Plain, Services::default());
        let attributes = field.attributes();

        assert_eq!(attributes.keys().collect::<Vec<_>>(), vec!["args", "type", "resolve"]);
        assert!(attributes.args().unwrap().is_empty());
        assert!(!field.has("type"));
        assert!(!field.has("resolve"));
        assert!(field.resolver().is_none());
        assert!(field.rules(&ResolveCall::default()).is_empty());
    }

    #[test]
    fn test_constructor_attributes_come_first() {
        let field = FieldDefinition::new(Plain, Services::default())
            .with_attribute("description", json!("Plain field"));

        assert_eq!(
            field.attributes().keys().collect::<Vec<_>>(),
            vec!["description", "args", "type", "resolve"]
        );
        assert_eq!(field.attributes().description(), Some("Plain field"));
    }

    #[test]
    fn test_validator_error_propagates() {
        let calls = Arc::new(AtomicUsize::new(0));
        let failing = |_: &Map<String, Value>, _: &[Rule]| -> Result<Validation> {
            Err(FieldError::UnknownRule("broken".to_string()))
        };
        let services = Services::new(Arc::new(failing), Arc::new(Registry::new()));
        let field = FieldDefinition::resolvable(
            Counted {
                calls: Arc::clone(&calls),
            },
            services,
        );

        let err = field
            .resolver()
            .unwrap()
            .call(&ResolveCall::default())
            .unwrap_err();
        assert!(matches!(err, FieldError::UnknownRule(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_validation_error_carries_messages() {
        let calls = Arc::new(AtomicUsize::new(0));
        let field = FieldDefinition::resolvable(
            Counted {
                calls: Arc::clone(&calls),
            },
            Services::default(),
        );

        let err = field
            .resolver()
            .unwrap()
            .call(&ResolveCall::default().with_args(Map::new()))
            .unwrap_err();
        match err {
            FieldError::Validation(e) => {
                assert_eq!(e.validation().first("id"), Some("The id field is required."));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_global_id_delegation() {
        let field = FieldDefinition::new(Plain, Services::default());
        let encoded = field.encode_global_id("User", "42");
        assert_eq!(field.decode_relay_type(&encoded).unwrap(), "User");
        assert_eq!(field.decode_relay_id(&encoded).unwrap(), "42");
        assert_eq!(
            field.decode_global_id(&encoded).unwrap(),
            GlobalId::new("User", "42")
        );
    }
}
