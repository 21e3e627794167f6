use indexmap::IndexMap;
use serde_json::{Map, Value, json};
use std::fmt;
use std::sync::Arc;

use super::{FieldType, ResolveCall};

/// Arguments keyed by name, in declaration order.
pub type Args = IndexMap<String, ArgumentDef>;

type RuleFn = dyn Fn(&ResolveCall) -> Vec<String> + Send + Sync;

/// Where an argument's rules come from.
#[derive(Clone)]
pub enum RuleSpec {
    Static(Vec<String>),
    /// Computed from the resolver call, e.g. to require a value only when
    /// another argument is absent.
    Dynamic(Arc<RuleFn>),
}

impl RuleSpec {
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&ResolveCall) -> Vec<String> + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(f))
    }

    pub fn evaluate(&self, call: &ResolveCall) -> Vec<String> {
        match self {
            Self::Static(rules) => rules.clone(),
            Self::Dynamic(f) => f(call),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Static(rules) => json!(rules),
            Self::Dynamic(_) => Value::String("<dynamic>".to_string()),
        }
    }
}

impl fmt::Debug for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(rules) => f.debug_tuple("Static").field(rules).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Descriptor for one argument of a field.
#[derive(Debug, Clone)]
pub struct ArgumentDef {
    pub ty: FieldType,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub rules: Option<RuleSpec>,
}

impl ArgumentDef {
    pub fn new(ty: FieldType) -> Self {
        Self {
            ty,
            description: None,
            default: None,
            rules: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules = Some(RuleSpec::Static(
            rules.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn rules_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&ResolveCall) -> Vec<String> + Send + Sync + 'static,
    {
        self.rules = Some(RuleSpec::dynamic(f));
        self
    }

    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".to_string(), Value::String(self.ty.to_string()));
        if let Some(ref description) = self.description {
            map.insert("description".to_string(), Value::String(description.clone()));
        }
        if let Some(ref default) = self.default {
            map.insert("defaultValue".to_string(), default.clone());
        }
        if let Some(ref rules) = self.rules {
            map.insert("rules".to_string(), rules.to_json());
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_rules_see_the_call() {
        let spec = RuleSpec::dynamic(|call| {
            if call.arg("email").is_some() {
                vec![]
            } else {
                vec!["required".to_string()]
            }
        });

        assert_eq!(spec.evaluate(&ResolveCall::default()), vec!["required"]);
        let call = ResolveCall::default()
            .with_args(Map::from_iter([("email".to_string(), json!("a@b.co"))]));
        assert!(spec.evaluate(&call).is_empty());
    }

    #[test]
    fn test_argument_to_json() {
        let arg = ArgumentDef::new(FieldType::named("Int").non_null())
            .description("Page size")
            .default_value(json!(10))
            .rules(["integer", "max:100"]);

        assert_eq!(
            arg.to_json(),
            json!({
                "type": "Int!",
                "description": "Page size",
                "defaultValue": 10,
                "rules": ["integer", "max:100"]
            })
        );
    }
}
