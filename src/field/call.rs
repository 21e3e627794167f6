use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Where in the schema a resolver is running.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub field_name: String,
    pub parent_type: String,
}

impl FieldInfo {
    pub fn new(parent_type: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            parent_type: parent_type.into(),
        }
    }
}

/// The positional arguments of one resolution: `(root, args, context, info)`.
///
/// `args` stays `None` when the caller supplied no argument mapping; rule
/// evaluation and validation then see an empty mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveCall {
    pub root: Value,
    pub args: Option<Map<String, Value>>,
    pub context: Option<Value>,
    pub info: Option<FieldInfo>,
}

impl ResolveCall {
    pub fn new(root: Value) -> Self {
        Self {
            root,
            ..Self::default()
        }
    }

    pub fn with_args(mut self, args: Map<String, Value>) -> Self {
        self.args = Some(args);
        self
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_info(mut self, info: FieldInfo) -> Self {
        self.info = Some(info);
        self
    }

    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.as_ref().and_then(|args| args.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_args_object() {
        let args = Map::from_iter([("name".to_string(), json!("Ada"))]);
        let call = ResolveCall::new(json!({"id": 1})).with_args(args.clone());
        assert_eq!(call.arg("name"), Some(&json!("Ada")));
        assert_eq!(call.args, Some(args));
        assert_eq!(call.root, json!({"id": 1}));
    }

    #[test]
    fn test_empty_args_differ_from_absent() {
        let call = ResolveCall::default().with_args(Map::new());
        assert_eq!(call.args, Some(Map::new()));
        assert_ne!(call, ResolveCall::default());
    }

    #[test]
    fn test_without_args() {
        let call = ResolveCall::default();
        assert!(call.args.is_none());
        assert_eq!(call.arg("name"), None);
    }
}
