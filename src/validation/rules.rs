//! Built-in rule-string validator.

use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::debug;

use super::{Rule, Validation, Validator, lookup};
use crate::error::{FieldError, Result};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

#[derive(Debug, Clone)]
struct Bound {
    value: f64,
    raw: String,
}

#[derive(Debug, Clone)]
enum Constraint {
    Required,
    Present,
    Nullable,
    Bail,
    String,
    Integer,
    Numeric,
    Boolean,
    Array,
    Email,
    Alpha,
    AlphaNum,
    Min(Bound),
    Max(Bound),
    Between(Bound, Bound),
    In(Vec<String>),
    NotIn(Vec<String>),
    Regex(Regex),
}

impl Constraint {
    fn parse(token: &str) -> Result<Self> {
        let (name, params) = match token.split_once(':') {
            Some((name, params)) => (name.trim(), Some(params)),
            None => (token.trim(), None),
        };

        let constraint = match name {
            "required" => Self::Required,
            "present" => Self::Present,
            "nullable" => Self::Nullable,
            "bail" => Self::Bail,
            "string" => Self::String,
            "integer" | "int" => Self::Integer,
            "numeric" => Self::Numeric,
            "boolean" | "bool" => Self::Boolean,
            "array" => Self::Array,
            "email" => Self::Email,
            "alpha" => Self::Alpha,
            "alpha_num" => Self::AlphaNum,
            "min" => Self::Min(bound(token, params)?),
            "max" => Self::Max(bound(token, params)?),
            "between" => {
                let params = require_params(token, params)?;
                let (low, high) = params.split_once(',').ok_or_else(|| FieldError::InvalidRule {
                    rule: token.to_string(),
                    reason: "expected two bounds".to_string(),
                })?;
                Self::Between(bound(token, Some(low))?, bound(token, Some(high))?)
            }
            "in" => Self::In(list(require_params(token, params)?)),
            "not_in" => Self::NotIn(list(require_params(token, params)?)),
            "regex" => Self::Regex(pattern(token, require_params(token, params)?)?),
            _ => return Err(FieldError::UnknownRule(name.to_string())),
        };
        Ok(constraint)
    }

    /// Implicit rules run even when the attribute is missing or blank.
    fn is_implicit(&self) -> bool {
        matches!(self, Self::Required | Self::Present)
    }
}

fn require_params<'a>(token: &str, params: Option<&'a str>) -> Result<&'a str> {
    params
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| FieldError::InvalidRule {
            rule: token.to_string(),
            reason: "missing parameters".to_string(),
        })
}

fn bound(token: &str, params: Option<&str>) -> Result<Bound> {
    let raw = require_params(token, params)?.trim();
    let value = raw.parse::<f64>().map_err(|_| FieldError::InvalidRule {
        rule: token.to_string(),
        reason: format!("'{}' is not a number", raw),
    })?;
    Ok(Bound {
        value,
        raw: raw.to_string(),
    })
}

fn list(params: &str) -> Vec<String> {
    params.split(',').map(|s| s.trim().to_string()).collect()
}

/// Accepts both `/pattern/flags` and bare patterns.
fn pattern(token: &str, params: &str) -> Result<Regex> {
    let params = params.trim();
    let source = match (params.strip_prefix('/'), params.rfind('/')) {
        (Some(_), Some(end)) if end > 0 => {
            let body = &params[1..end];
            let flags = &params[end + 1..];
            if flags.contains('i') {
                format!("(?i){}", body)
            } else {
                body.to_string()
            }
        }
        _ => params.to_string(),
    };
    Regex::new(&source).map_err(|e| FieldError::InvalidRule {
        rule: token.to_string(),
        reason: e.to_string(),
    })
}

/// How a value is measured by `min`, `max` and `between`.
enum Size {
    Number(f64),
    Chars(f64),
    Items(f64),
}

impl Size {
    fn of(value: &Value, numeric_hint: bool) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(Size::Number),
            Value::String(s) if numeric_hint => s
                .trim()
                .parse::<f64>()
                .ok()
                .map(Size::Number)
                .or(Some(Size::Chars(s.chars().count() as f64))),
            Value::String(s) => Some(Size::Chars(s.chars().count() as f64)),
            Value::Array(items) => Some(Size::Items(items.len() as f64)),
            Value::Object(map) => Some(Size::Items(map.len() as f64)),
            _ => None,
        }
    }

    fn amount(&self) -> f64 {
        match self {
            Size::Number(n) | Size::Chars(n) | Size::Items(n) => *n,
        }
    }

    fn unit(&self) -> &'static str {
        match self {
            Size::Number(_) => "",
            Size::Chars(_) => " characters",
            Size::Items(_) => " items",
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        _ => None,
    }
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::String(s) => s.trim().parse::<i64>().is_ok(),
        _ => false,
    }
}

fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
        _ => false,
    }
}

fn is_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::Number(n) => matches!(n.as_i64(), Some(0 | 1)),
        Value::String(s) => matches!(s.as_str(), "0" | "1" | "true" | "false"),
        _ => false,
    }
}

/// Validator for pipe-separated rule strings.
///
/// Missing attributes only fail implicit rules (`required`, `present`); blank
/// strings skip every other rule, and `nullable` lets `null` through.
#[derive(Debug, Clone, Default)]
pub struct RuleValidator {
    bail: bool,
}

impl RuleValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop at the first failing rule of each attribute.
    pub fn with_bail(mut self, bail: bool) -> Self {
        self.bail = bail;
        self
    }

    fn check(&self, attribute: &str, value: Option<&Value>, constraints: &[Constraint]) -> Vec<String> {
        let label = attribute.replace('_', " ");
        let bail = self.bail || constraints.iter().any(|c| matches!(c, Constraint::Bail));
        let nullable = constraints.iter().any(|c| matches!(c, Constraint::Nullable));
        let numeric_hint = constraints
            .iter()
            .any(|c| matches!(c, Constraint::Numeric | Constraint::Integer));

        let mut messages = Vec::new();
        for constraint in constraints {
            let validatable = match value {
                None => constraint.is_implicit(),
                Some(Value::Null) => constraint.is_implicit() || !nullable,
                Some(Value::String(s)) if s.trim().is_empty() => constraint.is_implicit(),
                Some(_) => true,
            };
            if !validatable {
                continue;
            }
            if let Some(message) = failure(constraint, &label, value, numeric_hint) {
                messages.push(message);
                if bail {
                    break;
                }
            }
        }
        messages
    }
}

fn failure(
    constraint: &Constraint,
    label: &str,
    value: Option<&Value>,
    numeric_hint: bool,
) -> Option<String> {
    let Some(value) = value else {
        return match constraint {
            Constraint::Required => Some(format!("The {} field is required.", label)),
            Constraint::Present => Some(format!("The {} field must be present.", label)),
            _ => None,
        };
    };

    let failed = match constraint {
        Constraint::Required => is_blank(value),
        Constraint::Present | Constraint::Nullable | Constraint::Bail => false,
        Constraint::String => !value.is_string(),
        Constraint::Integer => !is_integer(value),
        Constraint::Numeric => !is_numeric(value),
        Constraint::Boolean => !is_boolean(value),
        Constraint::Array => !(value.is_array() || value.is_object()),
        Constraint::Email => !value.as_str().is_some_and(|s| EMAIL_RE.is_match(s)),
        Constraint::Alpha => !value
            .as_str()
            .is_some_and(|s| s.chars().all(char::is_alphabetic)),
        Constraint::AlphaNum => !value
            .as_str()
            .is_some_and(|s| s.chars().all(char::is_alphanumeric)),
        Constraint::Min(min) => !Size::of(value, numeric_hint).is_some_and(|s| s.amount() >= min.value),
        Constraint::Max(max) => !Size::of(value, numeric_hint).is_some_and(|s| s.amount() <= max.value),
        Constraint::Between(low, high) => !Size::of(value, numeric_hint)
            .is_some_and(|s| s.amount() >= low.value && s.amount() <= high.value),
        Constraint::In(allowed) => !scalar_text(value).is_some_and(|v| allowed.contains(&v)),
        Constraint::NotIn(denied) => scalar_text(value).is_none_or(|v| denied.contains(&v)),
        Constraint::Regex(re) => !scalar_text(value).is_some_and(|v| re.is_match(&v)),
    };

    if !failed {
        return None;
    }

    let unit = Size::of(value, numeric_hint)
        .map(|s| s.unit())
        .unwrap_or("");
    let message = match constraint {
        Constraint::Required => format!("The {} field is required.", label),
        Constraint::Present | Constraint::Nullable | Constraint::Bail => return None,
        Constraint::String => format!("The {} must be a string.", label),
        Constraint::Integer => format!("The {} must be an integer.", label),
        Constraint::Numeric => format!("The {} must be a number.", label),
        Constraint::Boolean => format!("The {} field must be true or false.", label),
        Constraint::Array => format!("The {} must be an array.", label),
        Constraint::Email => format!("The {} must be a valid email address.", label),
        Constraint::Alpha => format!("The {} may only contain letters.", label),
        Constraint::AlphaNum => format!("The {} may only contain letters and numbers.", label),
        Constraint::Min(min) if unit == " items" => {
            format!("The {} must have at least {} items.", label, min.raw)
        }
        Constraint::Min(min) => format!("The {} must be at least {}{}.", label, min.raw, unit),
        Constraint::Max(max) if unit == " items" => {
            format!("The {} may not have more than {} items.", label, max.raw)
        }
        Constraint::Max(max) => {
            format!("The {} may not be greater than {}{}.", label, max.raw, unit)
        }
        Constraint::Between(low, high) => format!(
            "The {} must be between {} and {}{}.",
            label, low.raw, high.raw, unit
        ),
        Constraint::In(_) | Constraint::NotIn(_) => format!("The selected {} is invalid.", label),
        Constraint::Regex(_) => format!("The {} format is invalid.", label),
    };
    Some(message)
}

impl Validator for RuleValidator {
    fn make(&self, data: &Map<String, Value>, rules: &[Rule]) -> Result<Validation> {
        // Parse everything up front so a bad rule never yields a partial result.
        let mut grouped: IndexMap<&str, Vec<Constraint>> = IndexMap::new();
        for rule in rules {
            let constraints = grouped.entry(rule.attribute.as_str()).or_default();
            for token in rule.tokens() {
                constraints.push(Constraint::parse(token)?);
            }
        }

        let mut validation = Validation::new();
        for (attribute, constraints) in &grouped {
            for message in self.check(attribute, lookup(data, attribute), constraints) {
                validation.add(*attribute, message);
            }
        }

        debug!(
            attributes = grouped.len(),
            failed = validation.errors().len(),
            "validated arguments"
        );
        Ok(validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(data: Value, rules: &[(&str, &str)]) -> Validation {
        let rules: Vec<Rule> = rules.iter().map(|(a, r)| Rule::new(*a, *r)).collect();
        RuleValidator::new()
            .make(data.as_object().unwrap(), &rules)
            .unwrap()
    }

    #[test]
    fn test_required_missing_and_blank() {
        let result = validate(json!({}), &[("name", "required")]);
        assert_eq!(result.first("name"), Some("The name field is required."));

        let result = validate(json!({"name": "   "}), &[("name", "required")]);
        assert!(result.fails());

        let result = validate(json!({"name": "Ada"}), &[("name", "required")]);
        assert!(result.passes());
    }

    #[test]
    fn test_optional_attribute_skips_rules() {
        let result = validate(json!({}), &[("age", "integer|min:18")]);
        assert!(result.passes());
    }

    #[test]
    fn test_nullable_lets_null_through() {
        let result = validate(json!({"bio": null}), &[("bio", "nullable|string")]);
        assert!(result.passes());

        let result = validate(json!({"bio": null}), &[("bio", "string")]);
        assert_eq!(result.first("bio"), Some("The bio must be a string."));
    }

    #[test]
    fn test_size_rules_by_kind() {
        let result = validate(json!({"name": "Al"}), &[("name", "min:3")]);
        assert_eq!(
            result.first("name"),
            Some("The name must be at least 3 characters.")
        );

        let result = validate(json!({"age": 12}), &[("age", "integer|min:18")]);
        assert_eq!(result.first("age"), Some("The age must be at least 18."));

        let result = validate(json!({"tags": ["a", "b", "c"]}), &[("tags", "array|max:2")]);
        assert_eq!(
            result.first("tags"),
            Some("The tags may not have more than 2 items.")
        );

        let result = validate(json!({"count": "7"}), &[("count", "numeric|between:1,5")]);
        assert_eq!(result.first("count"), Some("The count must be between 1 and 5."));
    }

    #[test]
    fn test_type_rules() {
        let result = validate(
            json!({"a": "x", "b": "1.5", "c": "yes", "d": "ada@example"}),
            &[("a", "integer"), ("b", "numeric"), ("c", "boolean"), ("d", "email")],
        );
        assert!(result.first("a").is_some());
        assert!(result.first("b").is_none());
        assert_eq!(result.first("c"), Some("The c field must be true or false."));
        assert_eq!(result.first("d"), Some("The d must be a valid email address."));
    }

    #[test]
    fn test_in_and_regex() {
        let result = validate(
            json!({"status": "open", "code": "AB-12"}),
            &[("status", "in:todo,done"), ("code", "regex:/^[a-z]{2}-\\d+$/i")],
        );
        assert_eq!(result.first("status"), Some("The selected status is invalid."));
        assert!(result.first("code").is_none());
    }

    #[test]
    fn test_bail_stops_at_first_failure() {
        let rules = [Rule::new("name", "string|min:5")];
        let data = json!({"name": 3});
        let data = data.as_object().unwrap();

        let all = RuleValidator::new().make(data, &rules).unwrap();
        assert_eq!(all.errors()["name"].len(), 2);

        let bailed = RuleValidator::new().with_bail(true).make(data, &rules).unwrap();
        assert_eq!(bailed.errors()["name"].len(), 1);
    }

    #[test]
    fn test_nested_attribute_label() {
        let result = validate(
            json!({"input": {"first_name": ""}}),
            &[("input.first_name", "required")],
        );
        assert_eq!(
            result.first("input.first_name"),
            Some("The input.first name field is required.")
        );
    }

    #[test]
    fn test_unknown_rule_is_an_error() {
        let err = RuleValidator::new()
            .make(&Map::new(), &[Rule::new("name", "required|shiny")])
            .unwrap_err();
        assert!(matches!(err, FieldError::UnknownRule(name) if name == "shiny"));
    }

    #[test]
    fn test_invalid_rule_parameters() {
        let err = RuleValidator::new()
            .make(&Map::new(), &[Rule::new("age", "min:abc")])
            .unwrap_err();
        assert!(matches!(err, FieldError::InvalidRule { .. }));
    }
}
