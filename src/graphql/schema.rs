use async_graphql::dynamic::{
    Field as GqlField, FieldFuture, FieldValue, InputValue, Object, ResolverContext, Schema,
};
use async_graphql::Value as GqlValue;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::types::{to_graphql_error, to_graphql_value, to_json_args, to_json_value, type_ref};
use crate::config::GqlFieldConfig;
use crate::declare::declared_fields;
use crate::error::{FieldError, Result};
use crate::field::{FieldDefinition, FieldInfo, ResolveCall, Resolver};
use crate::registry::{Registry, TypeKind};

pub type FieldSchema = Schema;

/// Request-wide value handed to resolvers as the call's `context`.
#[derive(Debug, Clone, Default)]
pub struct ResolveContext(pub Value);

/// Collects field definitions per object type and assembles a dynamic schema.
pub struct SchemaBuilder {
    registry: Arc<Registry>,
    query: String,
    objects: IndexMap<String, IndexMap<String, FieldDefinition>>,
    context: Option<ResolveContext>,
}

impl SchemaBuilder {
    pub fn new(registry: Arc<Registry>, query: impl Into<String>) -> Self {
        Self {
            registry,
            query: query.into(),
            objects: IndexMap::new(),
            context: None,
        }
    }

    /// Registers `definition` as `type_name.name`, checking every type it
    /// references against the registry.
    pub fn add_field(
        &mut self,
        type_name: &str,
        name: &str,
        definition: FieldDefinition,
    ) -> Result<()> {
        if self.registry.kind(type_name) != Some(TypeKind::Object) {
            return Err(FieldError::UnknownType(type_name.to_string()));
        }

        let attributes = definition.attributes();
        let ty = attributes
            .field_type()
            .ok_or_else(|| FieldError::Schema(format!("{}.{} has no type", type_name, name)))?;
        self.registry.check(ty)?;
        if let Some(args) = attributes.args() {
            for arg in args.values() {
                self.registry.check(&arg.ty)?;
            }
        }

        let fields = self.objects.entry(type_name.to_string()).or_default();
        if fields.contains_key(name) {
            return Err(FieldError::Schema(format!(
                "{}.{} is defined twice",
                type_name, name
            )));
        }
        fields.insert(name.to_string(), definition);
        Ok(())
    }

    pub fn context(mut self, context: Value) -> Self {
        self.context = Some(ResolveContext(context));
        self
    }

    pub fn finish(self) -> Result<FieldSchema> {
        if !self.objects.contains_key(&self.query) {
            return Err(FieldError::Schema(format!(
                "query type '{}' has no fields",
                self.query
            )));
        }

        // Query only; no mutation or subscription roots
        let mut builder = Schema::build(&self.query, None, None);
        for (type_name, description) in self.registry.objects() {
            // Registered types without fields are left out of the schema
            let Some(fields) = self.objects.get(type_name) else {
                continue;
            };
            let mut object = Object::new(type_name);
            if let Some(description) = description {
                object = object.description(description);
            }
            for (name, definition) in fields {
                object = object.field(build_field(type_name, name, definition)?);
            }
            builder = builder.register(object);
        }
        if let Some(context) = self.context {
            builder = builder.data(context);
        }

        debug!(query = %self.query, objects = self.objects.len(), "assembled schema");
        builder
            .finish()
            .map_err(|e| FieldError::Schema(e.to_string()))
    }
}

fn build_field(type_name: &str, name: &str, definition: &FieldDefinition) -> Result<GqlField> {
    let attributes = definition.attributes();
    let ty = attributes
        .field_type()
        .map(type_ref)
        .ok_or_else(|| FieldError::Schema(format!("{}.{} has no type", type_name, name)))?;

    let info = FieldInfo::new(type_name, name);
    let mut field = match attributes.resolver().cloned() {
        Some(resolver) => GqlField::new(name, ty, move |ctx| {
            let outcome = call_resolver(&resolver, &info, &ctx);
            FieldFuture::new(async move { outcome })
        }),
        None => {
            // No resolver: read the field off the parent object
            let key = name.to_string();
            GqlField::new(name, ty, move |ctx| {
                FieldFuture::from_value(parent_property(&ctx, &key))
            })
        }
    };

    if let Some(description) = attributes.description() {
        field = field.description(description);
    }
    if let Some(reason) = attributes.deprecation_reason() {
        field = field.deprecation(Some(reason));
    }
    if let Some(args) = attributes.args() {
        for (arg_name, arg) in args {
            let mut input = InputValue::new(arg_name, type_ref(&arg.ty));
            if let Some(ref description) = arg.description {
                input = input.description(description);
            }
            if let Some(ref default) = arg.default {
                // Defaults that don't convert are dropped
                if let Ok(default) = GqlValue::from_json(default.clone()) {
                    input = input.default_value(default);
                }
            }
            field = field.argument(input);
        }
    }
    Ok(field)
}

fn call_resolver<'a>(
    resolver: &Resolver,
    info: &FieldInfo,
    ctx: &ResolverContext<'a>,
) -> async_graphql::Result<Option<FieldValue<'a>>> {
    let root = match ctx.parent_value.as_value() {
        Some(value) => to_json_value(value)?,
        None => Value::Null,
    };
    let mut call = ResolveCall::new(root)
        .with_args(to_json_args(ctx.args.as_index_map())?)
        .with_info(info.clone());
    if let Some(context) = ctx.ctx.data_opt::<ResolveContext>() {
        call = call.with_context(context.0.clone());
    }

    // null maps to an absent value so nullable fields resolve to null
    match resolver.call(&call).map_err(to_graphql_error)? {
        Value::Null => Ok(None),
        value => Ok(Some(FieldValue::value(to_graphql_value(value)?))),
    }
}

/// Fields without a resolver read their own name off the parent object.
fn parent_property(ctx: &ResolverContext<'_>, key: &str) -> Option<GqlValue> {
    match ctx.parent_value.as_value() {
        Some(GqlValue::Object(map)) => map.get(key).cloned(),
        _ => None,
    }
}

/// Builds the schema declared in a configuration file.
pub fn build_schema(config: &GqlFieldConfig, context: Option<Value>) -> Result<FieldSchema> {
    let registry = Arc::new(config.registry()?);
    let mut builder = SchemaBuilder::new(Arc::clone(&registry), &config.schema.query);
    for entry in declared_fields(config, registry)? {
        builder.add_field(&entry.type_name, &entry.name, entry.definition)?;
    }
    if let Some(context) = context {
        builder = builder.context(context);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ArgumentDef, Args, Field, FieldType, Resolve, Services};
    use serde_json::json;

    struct Echo;

    impl Field for Echo {
        fn args(&self) -> Args {
            Args::from([(
                "name".to_string(),
                ArgumentDef::new(FieldType::named("String")).rules(["required"]),
            )])
        }

        fn field_type(&self) -> Option<FieldType> {
            Some(FieldType::named("String"))
        }
    }

    impl Resolve for Echo {
        fn resolve(&self, call: &ResolveCall) -> Result<Value> {
            Ok(call.arg("name").cloned().unwrap_or(Value::Null))
        }
    }

    struct Whoami;

    impl Field for Whoami {
        fn field_type(&self) -> Option<FieldType> {
            Some(FieldType::named("String"))
        }
    }

    impl Resolve for Whoami {
        fn resolve(&self, call: &ResolveCall) -> Result<Value> {
            Ok(call
                .context
                .as_ref()
                .and_then(|c| c.get("user"))
                .cloned()
                .unwrap_or(Value::Null))
        }
    }

    fn schema() -> FieldSchema {
        let mut registry = Registry::new();
        registry.register_object("Query", None).unwrap();
        let registry = Arc::new(registry);
        let services = Services::new(
            Arc::new(crate::validation::RuleValidator::new()),
            Arc::clone(&registry),
        );

        let mut builder = SchemaBuilder::new(registry, "Query");
        builder
            .add_field("Query", "echo", FieldDefinition::resolvable(Echo, services.clone()))
            .unwrap();
        builder
            .add_field("Query", "whoami", FieldDefinition::resolvable(Whoami, services))
            .unwrap();
        builder.context(json!({"user": "ada"})).finish().unwrap()
    }

    #[tokio::test]
    async fn test_execute_resolves_through_definition() {
        let response = schema().execute(r#"{ echo(name: "Ada") whoami }"#).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({"echo": "Ada", "whoami": "ada"})
        );
    }

    #[tokio::test]
    async fn test_validation_failure_becomes_graphql_error() {
        let response = schema().execute("{ echo }").await;
        assert_eq!(response.errors.len(), 1);
        assert_eq!(
            response.errors[0].message,
            "Validation failed: The name field is required."
        );
    }

    #[test]
    fn test_add_field_rejects_unknown_types() {
        let registry = Arc::new(Registry::new());
        let mut builder = SchemaBuilder::new(Arc::clone(&registry), "Query");
        let definition = FieldDefinition::resolvable(Echo, Services::default());
        assert!(matches!(
            builder.add_field("Query", "echo", definition),
            Err(FieldError::UnknownType(name)) if name == "Query"
        ));
    }

    #[test]
    fn test_finish_requires_query_fields() {
        let mut registry = Registry::new();
        registry.register_object("Query", None).unwrap();
        let builder = SchemaBuilder::new(Arc::new(registry), "Query");
        assert!(matches!(builder.finish(), Err(FieldError::Schema(_))));
    }
}
