//! Relay global object identifiers.
//!
//! A global ID is `base64("<type>:<id>")`, opaque to clients and unique across
//! every object type in the schema.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::fmt;

use crate::error::{FieldError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlobalId {
    pub type_name: String,
    pub id: String,
}

impl GlobalId {
    pub fn new(type_name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            id: id.into(),
        }
    }

    pub fn encode(&self) -> String {
        encode_global_id(&self.type_name, &self.id)
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

pub fn encode_global_id(type_name: &str, id: &str) -> String {
    STANDARD.encode(format!("{}:{}", type_name, id))
}

/// Splits on the first `:`, so ids may themselves contain colons.
pub fn decode_global_id(global_id: &str) -> Result<GlobalId> {
    let invalid = || FieldError::InvalidGlobalId(global_id.to_string());

    let bytes = STANDARD.decode(global_id.trim()).map_err(|_| invalid())?;
    let decoded = String::from_utf8(bytes).map_err(|_| invalid())?;
    let (type_name, id) = decoded.split_once(':').ok_or_else(invalid)?;
    if type_name.is_empty() {
        return Err(invalid());
    }
    Ok(GlobalId::new(type_name, id))
}

pub fn decode_relay_id(global_id: &str) -> Result<String> {
    decode_global_id(global_id).map(|gid| gid.id)
}

pub fn decode_relay_type(global_id: &str) -> Result<String> {
    decode_global_id(global_id).map(|gid| gid.type_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_matches_relay_format() {
        assert_eq!(encode_global_id("User", "1"), "VXNlcjox");
        assert_eq!(GlobalId::new("User", "1").to_string(), "VXNlcjox");
    }

    #[test]
    fn test_decode_parts() {
        assert_eq!(decode_relay_type("VXNlcjox").unwrap(), "User");
        assert_eq!(decode_relay_id("VXNlcjox").unwrap(), "1");
    }

    #[test]
    fn test_id_may_contain_colons() {
        let encoded = encode_global_id("Event", "2024:10:17");
        let gid = decode_global_id(&encoded).unwrap();
        assert_eq!(gid, GlobalId::new("Event", "2024:10:17"));
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert!(matches!(
            decode_global_id("not base64!"),
            Err(FieldError::InvalidGlobalId(_))
        ));
        // "nocolon"
        assert!(decode_global_id("bm9jb2xvbg==").is_err());
    }
}
