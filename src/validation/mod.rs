//! Argument validation service.
//!
//! A [`Validator`] takes the argument mapping of a resolver call together with
//! the [`Rule`]s collected for the field, and reports a [`Validation`] result.
//! The crate ships [`RuleValidator`], which understands pipe-separated rule
//! strings such as `required|string|max:20`. Any other implementation can be
//! injected through [`crate::field::Services`].

mod rules;

pub use rules::RuleValidator;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// A single rule string attached to one key of the argument mapping.
///
/// `rule` may hold several tokens separated by `|`. Dotted attributes such as
/// `input.email` address values nested inside input objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub attribute: String,
    pub rule: String,
}

impl Rule {
    pub fn new(attribute: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            rule: rule.into(),
        }
    }

    /// Individual rule tokens, with empty segments dropped.
    ///
    /// A `regex:` token keeps the remainder of the string, pipes included.
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens = Vec::new();
        let mut rest = self.rule.as_str();
        while !rest.is_empty() {
            if rest.trim_start().starts_with("regex:") {
                tokens.push(rest.trim());
                break;
            }
            let (token, tail) = rest.split_once('|').unwrap_or((rest, ""));
            let token = token.trim();
            if !token.is_empty() {
                tokens.push(token);
            }
            rest = tail;
        }
        tokens
    }
}

/// Outcome of running a set of rules against an argument mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Validation {
    errors: IndexMap<String, Vec<String>>,
}

impl Validation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, attribute: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(attribute.into())
            .or_default()
            .push(message.into());
    }

    pub fn fails(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn passes(&self) -> bool {
        !self.fails()
    }

    /// Messages keyed by attribute, in the order the attributes were checked.
    pub fn errors(&self) -> &IndexMap<String, Vec<String>> {
        &self.errors
    }

    pub fn first(&self, attribute: &str) -> Option<&str> {
        self.errors
            .get(attribute)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// The first message of every failing attribute, joined for display.
    pub fn summary(&self) -> String {
        self.errors
            .values()
            .filter_map(|messages| messages.first())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Checks argument data against rules.
pub trait Validator: Send + Sync {
    fn make(&self, data: &Map<String, Value>, rules: &[Rule]) -> Result<Validation>;
}

impl<F> Validator for F
where
    F: Fn(&Map<String, Value>, &[Rule]) -> Result<Validation> + Send + Sync,
{
    fn make(&self, data: &Map<String, Value>, rules: &[Rule]) -> Result<Validation> {
        self(data, rules)
    }
}

/// Looks up a dotted key inside the argument mapping.
pub(crate) fn lookup<'a>(data: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(value) = data.get(key) {
        return Some(value);
    }
    let mut segments = key.split('.');
    let mut current = data.get(segments.next()?)?;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}


