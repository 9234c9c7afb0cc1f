//! Sender identity normalisation.
//!
//! Chat exports label the same person inconsistently: saved contacts appear
//! by name, unsaved ones by phone number. [`IdentityMap`] folds the raw labels
//! onto one display name per person.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::Message;

/// Static mapping from raw sender labels to canonical display names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct IdentityMap {
    entries: HashMap<String, String>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a mapping. Keys are stored trimmed.
    pub fn insert(&mut self, raw: impl AsRef<str>, canonical: impl Into<String>) {
        self.entries
            .insert(raw.as_ref().trim().to_string(), canonical.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a raw sender to its canonical name.
    ///
    /// Lookup is exact on the trimmed label. Unmapped senders come back
    /// unchanged (minus surrounding whitespace), so an unsaved phone number
    /// stays its own participant.
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        let key = raw.trim();
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Rewrite every message's sender to its canonical name.
    pub fn normalize(&self, messages: Vec<Message>) -> Vec<Message> {
        messages
            .into_iter()
            .map(|mut msg| {
                let canonical = self.resolve(&msg.sender).to_string();
                msg.sender = canonical;
                msg
            })
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for IdentityMap
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (raw, canonical) in iter {
            map.insert(raw, canonical);
        }
        map
    }
}

impl From<BTreeMap<String, String>> for IdentityMap {
    fn from(entries: BTreeMap<String, String>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<IdentityMap> for BTreeMap<String, String> {
    fn from(map: IdentityMap) -> Self {
        map.entries.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn msg(sender: &str) -> Message {
        let ts = NaiveDateTime::parse_from_str("2024-01-01 12:00", "%Y-%m-%d %H:%M").unwrap();
        Message::new(ts, sender, "")
    }

    fn sample_map() -> IdentityMap {
        [("+351 912 345 678", "Alice"), ("Bobby", "Bob")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_resolve_mapped_phone_number() {
        let map = sample_map();
        assert_eq!(map.resolve("+351 912 345 678"), "Alice");
    }

    #[test]
    fn test_resolve_trims_raw_label() {
        let map = sample_map();
        assert_eq!(map.resolve("  Bobby "), "Bob");
    }

    #[test]
    fn test_resolve_unmapped_passes_through() {
        let map = sample_map();
        assert_eq!(map.resolve("Charlie"), "Charlie");
        assert_eq!(map.resolve("+351 900 000 000"), "+351 900 000 000");
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let map = sample_map();
        assert_eq!(map.resolve("bobby"), "bobby");
    }

    #[test]
    fn test_normalize_rewrites_senders() {
        let map = sample_map();
        let out = map.normalize(vec![msg("Bobby"), msg("+351 912 345 678"), msg("Dora")]);
        let senders: Vec<&str> = out.iter().map(|m| m.sender.as_str()).collect();
        assert_eq!(senders, vec!["Bob", "Alice", "Dora"]);
    }

    #[test]
    fn test_deserialises_from_plain_object() {
        let map: IdentityMap =
            serde_json::from_str(r#"{"+44 7700 900123": "Eve"}"#).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.resolve("+44 7700 900123"), "Eve");
    }

    #[test]
    fn test_deserialised_keys_are_trimmed() {
        let map: IdentityMap = serde_json::from_str(r#"{" Bobby ": "Bob"}"#).unwrap();
        assert_eq!(map.resolve("Bobby"), "Bob");
    }

    #[test]
    fn test_serialises_sorted_by_raw_label() {
        let json = serde_json::to_string(&sample_map()).unwrap();
        assert_eq!(json, r#"{"+351 912 345 678":"Alice","Bobby":"Bob"}"#);
    }

    #[test]
    fn test_empty_map() {
        let map = IdentityMap::new();
        assert!(map.is_empty());
        assert_eq!(map.resolve("Alice"), "Alice");
    }
}
