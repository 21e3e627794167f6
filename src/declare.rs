//! Fields declared in configuration instead of Rust code.

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::config::{FieldConfig, GqlFieldConfig, ResolveConfig};
use crate::error::{FieldError, Result};
use crate::field::{
    ArgumentDef, Args, Field, FieldDefinition, FieldType, Resolve, ResolveCall, Services,
};
use crate::global_id::encode_global_id;
use crate::registry::Registry;
use crate::validation::Rule;

/// A declared field together with the object type it belongs to.
#[derive(Debug)]
pub struct DeclaredEntry {
    pub type_name: String,
    pub name: String,
    pub definition: FieldDefinition,
}

/// Every field in `config`: the query type's first, then each object type's.
pub fn declared_fields(
    config: &GqlFieldConfig,
    registry: Arc<Registry>,
) -> Result<Vec<DeclaredEntry>> {
    let services = Services::new(Arc::new(config.validator()), Arc::clone(&registry));
    let owners = std::iter::once((config.schema.query.as_str(), &config.fields))
        .chain(config.types.iter().map(|ty| (ty.name.as_str(), &ty.fields)));

    let mut entries = Vec::new();
    for (type_name, fields) in owners {
        for field in fields {
            let declared = DeclaredField::from_config(field, &registry)?;
            entries.push(DeclaredEntry {
                type_name: type_name.to_string(),
                name: declared.name().to_string(),
                definition: declared.into_definition(services.clone()),
            });
        }
    }
    Ok(entries)
}

/// Finds a declared field by `name` (query type) or `Type.name`.
pub fn find_declared<'a>(
    entries: &'a [DeclaredEntry],
    query: &str,
    path: &str,
) -> Option<&'a DeclaredEntry> {
    let (type_name, name) = path.split_once('.').unwrap_or((query, path));
    entries
        .iter()
        .find(|e| e.type_name == type_name && e.name == name)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolveStrategy {
    Argument(String),
    Value(Value),
    Parent(String),
    GlobalId { type_name: String, argument: String },
}

impl ResolveStrategy {
    fn from_config(field: &str, config: &ResolveConfig) -> Result<Self> {
        let mut strategies = Vec::new();
        if let Some(ref name) = config.argument {
            strategies.push(Self::Argument(name.clone()));
        }
        if let Some(ref value) = config.value {
            strategies.push(Self::Value(value.clone()));
        }
        if let Some(ref key) = config.parent {
            strategies.push(Self::Parent(key.clone()));
        }
        if let Some(ref gid) = config.global_id {
            strategies.push(Self::GlobalId {
                type_name: gid.type_name.clone(),
                argument: gid.argument.clone(),
            });
        }

        match strategies.len() {
            1 => Ok(strategies.remove(0)),
            0 => Err(FieldError::Config(format!(
                "field '{}': resolve needs one of argument, value, parent, global_id",
                field
            ))),
            _ => Err(FieldError::Config(format!(
                "field '{}': resolve takes exactly one strategy",
                field
            ))),
        }
    }
}

/// A field whose shape and resolver come from a [`FieldConfig`].
#[derive(Debug, Clone)]
pub struct DeclaredField {
    name: String,
    ty: FieldType,
    args: Args,
    attributes: Map<String, Value>,
    rules: Vec<Rule>,
    resolve: Option<ResolveStrategy>,
}

impl DeclaredField {
    /// Resolves every type notation against `registry`.
    pub fn from_config(config: &FieldConfig, registry: &Registry) -> Result<Self> {
        let ty = registry.type_ref(&config.ty)?;

        let mut args = Args::new();
        for (name, arg) in &config.args {
            let mut def = ArgumentDef::new(registry.type_ref(&arg.ty)?);
            def.description = arg.description.clone();
            def.default = arg.default.clone();
            if let Some(ref rules) = arg.rules {
                def = def.rules(rules.clone().into_vec());
            }
            args.insert(name.clone(), def);
        }

        // Named settings override the free-form attributes map
        let mut attributes = config.attributes.clone();
        if let Some(ref description) = config.description {
            attributes.insert("description".to_string(), Value::String(description.clone()));
        }
        if let Some(ref reason) = config.deprecation_reason {
            attributes.insert("deprecationReason".to_string(), Value::String(reason.clone()));
        }

        let rules = config
            .rules
            .iter()
            .flat_map(|(attribute, rules)| {
                rules
                    .clone()
                    .into_vec()
                    .into_iter()
                    .map(move |rule| Rule::new(attribute.clone(), rule))
            })
            .collect();

        let resolve = config
            .resolve
            .as_ref()
            .map(|r| ResolveStrategy::from_config(&config.name, r))
            .transpose()?;

        // Strategies reading an argument need it declared
        if let Some(
            ResolveStrategy::Argument(ref name)
            | ResolveStrategy::GlobalId {
                argument: ref name, ..
            },
        ) = resolve
        {
            if !args.contains_key(name) {
                return Err(FieldError::Config(format!(
                    "field '{}': resolves from unknown argument '{}'",
                    config.name, name
                )));
            }
        }

        Ok(Self {
            name: config.name.clone(),
            ty,
            args,
            attributes,
            rules,
            resolve,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strategy(&self) -> Option<&ResolveStrategy> {
        self.resolve.as_ref()
    }

    /// Fields with a resolve strategy get the validating resolver.
    pub fn into_definition(self, services: Services) -> FieldDefinition {
        if self.resolve.is_some() {
            FieldDefinition::resolvable(self, services)
        } else {
            FieldDefinition::new(self, services)
        }
    }
}

impl Field for DeclaredField {
    fn args(&self) -> Args {
        self.args.clone()
    }

    fn attributes(&self) -> Map<String, Value> {
        self.attributes.clone()
    }

    fn field_type(&self) -> Option<FieldType> {
        Some(self.ty.clone())
    }

    fn rules(&self, _call: &ResolveCall) -> Vec<Rule> {
        self.rules.clone()
    }
}

impl Resolve for DeclaredField {
    fn resolve(&self, call: &ResolveCall) -> Result<Value> {
        let value = match self.resolve {
            Some(ResolveStrategy::Argument(ref name)) => call.arg(name).cloned(),
            Some(ResolveStrategy::Value(ref value)) => Some(value.clone()),
            Some(ResolveStrategy::Parent(ref key)) => call.root.get(key).cloned(),
            Some(ResolveStrategy::GlobalId {
                ref type_name,
                ref argument,
            }) => match call.arg(argument) {
                Some(Value::String(id)) => Some(Value::String(encode_global_id(type_name, id))),
                // Numeric ids are encoded in their JSON text form
                Some(Value::Number(id)) => {
                    Some(Value::String(encode_global_id(type_name, &id.to_string())))
                }
                _ => None,
            },
            None => None,
        };
        Ok(value.unwrap_or(Value::Null))
    }
}


