use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::{FieldError, Result};
use crate::registry::Registry;
use crate::validation::RuleValidator;

pub const CONFIG_FILE: &str = ".gqlfield.yml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GqlFieldConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub schema: SchemaSettings,

    #[serde(default)]
    pub validation: ValidationSettings,

    /// Object types, each with its own fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeConfig>,

    /// Fields on the root query type.
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_path")]
    pub path: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_path() -> String {
    "/graphql".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path: default_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaSettings {
    #[serde(default = "default_query")]
    pub query: String,
}

fn default_query() -> String {
    "Query".to_string()
}

impl Default for SchemaSettings {
    fn default() -> Self {
        Self {
            query: default_query(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Stop at the first failing rule of each argument.
    #[serde(default)]
    pub bail: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,

    /// Free-form attributes passed through to the field definition.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub args: IndexMap<String, ArgConfig>,

    /// Field-level rules keyed by argument (dotted paths allowed).
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub rules: IndexMap<String, RulesConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolve: Option<ResolveConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgConfig {
    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<RulesConfig>,
}

/// Either `"required|string"` or `["required", "string"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RulesConfig {
    One(String),
    Many(Vec<String>),
}

impl RulesConfig {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            RulesConfig::One(rule) => vec![rule],
            RulesConfig::Many(rules) => rules,
        }
    }
}

/// How a declared field computes its value. Exactly one entry must be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Return the named argument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,

    /// Return a constant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Return a key of the parent value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Encode an argument as a Relay global ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_id: Option<GlobalIdConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalIdConfig {
    #[serde(rename = "type")]
    pub type_name: String,
    pub argument: String,
}

impl GqlFieldConfig {
    /// Finds `.gqlfield.yml` from `start_path` upwards and loads it.
    pub fn load(start_path: &Path) -> Result<(Self, PathBuf)> {
        let config_path = Self::find_config_file(start_path)?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<(Self, PathBuf)> {
        let content = std::fs::read_to_string(config_path)?;
        // Missing sections fall back to their serde defaults
        let config: GqlFieldConfig = serde_yaml::from_str(&content)?;
        let project_root = config_path
            .parent()
            .ok_or_else(|| FieldError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        Ok((config, project_root))
    }

    pub fn find_config_file(start_path: &Path) -> Result<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return Ok(config_path);
            }
            // Stop at the filesystem root
            if !current.pop() {
                return Err(FieldError::NotInitialized);
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Registry with the built-in scalars plus every configured object type.
    pub fn registry(&self) -> Result<Registry> {
        let mut registry = Registry::new();
        // Root query type first; a listed type of the same name replaces its description
        registry.register_object(&self.schema.query, None)?;
        for ty in &self.types {
            registry.register_object(&ty.name, ty.description.clone())?;
        }
        Ok(registry)
    }

    pub fn validator(&self) -> RuleValidator {
        RuleValidator::new().with_bail(self.validation.bail)
    }

    /// A small working configuration written by `gqlfield init`.
    pub fn starter() -> Self {
        let mut args = IndexMap::new();
        args.insert(
            "name".to_string(),
            ArgConfig {
                ty: "String".to_string(),
                description: Some("Who to greet".to_string()),
                default: None,
                rules: Some(RulesConfig::One("required|string|max:50".to_string())),
            },
        );
        let hello = FieldConfig {
            name: "hello".to_string(),
            ty: "String".to_string(),
            description: Some("Echoes the given name".to_string()),
            deprecation_reason: None,
            attributes: Map::new(),
            args,
            rules: IndexMap::new(),
            resolve: Some(ResolveConfig {
                argument: Some("name".to_string()),
                ..ResolveConfig::default()
            }),
        };

        Self {
            fields: vec![hello],
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
server:
  port: 4100
validation:
  bail: true
types:
  - name: User
    description: A person
    fields:
      - name: name
        type: String
fields:
  - name: user
    type: User
    description: Look a user up
    args:
      id:
        type: ID!
        rules: required
      tags:
        type: "[String]"
        default: []
        rules: [array, "max:3"]
    rules:
      id: "min:1"
    resolve:
      value: { name: "Ada" }
"#;

    #[test]
    fn test_parse_sample() {
        let config: GqlFieldConfig = serde_yaml::from_str(SAMPLE).unwrap();

        assert_eq!(config.server.port, 4100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.schema.query, "Query");
        assert!(config.validation.bail);

        let user = &config.fields[0];
        assert_eq!(user.name, "user");
        assert_eq!(user.args["id"].rules, Some(RulesConfig::One("required".to_string())));
        assert_eq!(
            user.args["tags"].rules.clone().unwrap().into_vec(),
            vec!["array", "max:3"]
        );
        assert!(user.resolve.as_ref().unwrap().value.is_some());

        let name = &config.types[0].fields[0];
        assert_eq!(name.ty, "String");
        assert!(name.resolve.is_none());
    }

    #[test]
    fn test_registry_from_config() {
        let config: GqlFieldConfig = serde_yaml::from_str(SAMPLE).unwrap();
        let registry = config.registry().unwrap();
        assert!(registry.contains("Query"));
        assert!(registry.contains("User"));
    }

    #[test]
    fn test_find_config_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        GqlFieldConfig::starter()
            .save(&temp_dir.path().join(CONFIG_FILE))
            .unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, root) = GqlFieldConfig::load(&nested).unwrap();
        assert_eq!(root, temp_dir.path());
        assert_eq!(config.fields[0].name, "hello");
    }

    #[test]
    fn test_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            GqlFieldConfig::load(temp_dir.path()),
            Err(FieldError::NotInitialized)
        ));
    }
}
