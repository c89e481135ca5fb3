//! Opaque entity identity.
//!
//! The server issues string keys, but fixtures and older payloads also carry
//! integer ids. Both decode into the same normalized string form, so `10` and
//! `"10"` address the same entity.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier shared by notes and lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Builds an id from raw text, returning `None` for blank input.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Generates a fresh id for locally authored entities.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank ids name no entity; stores treat them as missing.
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trims `value`; blank input yields an id for which `is_blank` holds.
impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Text(text) => {
                Self::parse(&text).ok_or_else(|| de::Error::custom("entity id cannot be blank"))
            }
            RawId::Unsigned(value) => Ok(Self(value.to_string())),
            RawId::Signed(value) => Ok(Self(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EntityId;

    #[test]
    fn integer_and_string_ids_normalize_to_the_same_key() {
        let from_int: EntityId = serde_json::from_str("10").expect("integer id should decode");
        let from_text: EntityId = serde_json::from_str("\"10\"").expect("text id should decode");
        assert_eq!(from_int, from_text);
        assert_eq!(from_int.as_str(), "10");
    }

    #[test]
    fn blank_ids_are_rejected() {
        assert!(EntityId::parse("   ").is_none());
        let err = serde_json::from_str::<EntityId>("\"  \"").expect_err("blank id must fail");
        assert!(err.to_string().contains("blank"));
    }

    #[test]
    fn whitespace_only_conversion_is_blank() {
        assert!(EntityId::from("   ").is_blank());
        assert!(!EntityId::from(" 10 ").is_blank());
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(EntityId::generate(), EntityId::generate());
    }
}
