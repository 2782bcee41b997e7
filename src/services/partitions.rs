//! Lazily loaded per-letter dictionary partitions.
//!
//! Each source ships one JSON file per initial letter. Two on-disk shapes
//! are in circulation for the same logical source: a map of
//! headword → record, and a list of records each carrying its own key
//! field. Both are accepted and folded into the same in-memory map.
//!
//! Stored keys carry scholarly orthography (accents, homograph digits,
//! v/j spellings), so every key is passed through the source language's
//! lookup-key transform at load, and queries go through the same
//! transform. The first record to claim a normalized key wins.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;

/// Fields a list-shaped record may carry its lookup key under.
const KEY_FIELDS: &[&str] = &["key", "orth", "headword", "lemma"];

pub struct PartitionStore {
    dir: PathBuf,
    normalize: fn(&str) -> String,
    loaded: HashMap<char, HashMap<String, Value>>,
}

impl PartitionStore {
    pub fn new(dir: impl Into<PathBuf>, normalize: fn(&str) -> String) -> Self {
        PartitionStore {
            dir: dir.into(),
            normalize,
            loaded: HashMap::new(),
        }
    }

    /// Record(s) stored under a lemma, loading the lemma's partition on
    /// first touch. A missing partition file is a miss, not an error.
    pub fn get(&mut self, lemma: &str) -> Option<&Value> {
        let key = (self.normalize)(lemma);
        let letter = partition_letter(&key)?;
        self.load_letter(letter);
        self.loaded.get(&letter)?.get(&key)
    }

    /// Loading an already-loaded letter is a no-op.
    fn load_letter(&mut self, letter: char) {
        if self.loaded.contains_key(&letter) {
            return;
        }

        let path = self.dir.join(format!("{letter}.json"));
        let map = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str::<Value>(&data) {
                Ok(v) => fold_partition(v, self.normalize),
                Err(e) => {
                    eprintln!("[partitions] bad JSON in {}: {e}", path.display());
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        self.loaded.insert(letter, map);
    }
}

fn partition_letter(lemma: &str) -> Option<char> {
    lemma.chars().next().map(|c| c.to_lowercase().next().unwrap_or(c))
}

/// Fold either on-disk shape into normalized key → record. A list entry
/// without any recognizable key field is skipped.
fn fold_partition(value: Value, normalize: fn(&str) -> String) -> HashMap<String, Value> {
    let mut out = HashMap::new();
    match value {
        Value::Object(map) => {
            for (raw_key, item) in map {
                let key = normalize(&raw_key);
                if !key.is_empty() {
                    out.entry(key).or_insert(item);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if let Some(raw_key) = record_key(&item) {
                    let key = normalize(&raw_key);
                    if !key.is_empty() {
                        out.entry(key).or_insert(item);
                    }
                }
            }
        }
        _ => {}
    }
    out
}

fn record_key(record: &Value) -> Option<String> {
    for field in KEY_FIELDS {
        if let Some(k) = record.get(field).and_then(|v| v.as_str()) {
            if !k.is_empty() {
                return Some(k.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizers::lemma;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static DIR_SEQ: AtomicUsize = AtomicUsize::new(0);

    fn scratch_dir() -> PathBuf {
        let n = DIR_SEQ.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "glossa-partitions-{}-{n}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn latin_store(dir: &PathBuf) -> PartitionStore {
        PartitionStore::new(dir, lemma::normalize_latin)
    }

    #[test]
    fn map_and_list_shapes_are_equivalent() {
        let dir = scratch_dir();
        fs::write(
            dir.join("a.json"),
            r#"{"amo": {"senses": ["to love"]}}"#,
        )
        .unwrap();
        fs::write(
            dir.join("b.json"),
            r#"[{"key": "bellum", "senses": ["war"]}]"#,
        )
        .unwrap();

        let mut store = latin_store(&dir);
        let from_map = store.get("amo").unwrap();
        assert_eq!(from_map["senses"][0], "to love");
        let from_list = store.get("bellum").unwrap();
        assert_eq!(from_list["senses"][0], "war");
    }

    #[test]
    fn homograph_digit_keys_match_the_plain_lemma() {
        let dir = scratch_dir();
        fs::write(
            dir.join("o.json"),
            r#"{"occido1": {"senses": ["to fall down"]},
                "occido2": {"senses": ["to strike down, to kill"]}}"#,
        )
        .unwrap();

        let mut store = latin_store(&dir);
        let record = store.get("occido").unwrap();
        assert_eq!(record["senses"][0], "to fall down");
    }

    #[test]
    fn stored_keys_are_normalized_like_queries() {
        let dir = scratch_dir();
        // Scholarly v-spelling keyed on disk, classical u-spelling queried.
        fs::write(
            dir.join("u.json"),
            r#"{"vīta": {"senses": ["life"]}}"#,
        )
        .unwrap();

        let mut store = latin_store(&dir);
        assert_eq!(store.get("uita").unwrap()["senses"][0], "life");
    }

    #[test]
    fn missing_partition_is_a_miss() {
        let dir = scratch_dir();
        let mut store = latin_store(&dir);
        assert!(store.get("zona").is_none());
    }

    #[test]
    fn reload_of_loaded_letter_keeps_first_contents() {
        let dir = scratch_dir();
        let path = dir.join("a.json");
        fs::write(&path, r#"{"amo": {"senses": ["to love"]}}"#).unwrap();

        let mut store = latin_store(&dir);
        assert!(store.get("amo").is_some());

        // A rewrite after the first load must not be picked up.
        fs::write(&path, r#"{"amo": {"senses": ["changed"]}}"#).unwrap();
        assert_eq!(store.get("amo").unwrap()["senses"][0], "to love");
    }

    #[test]
    fn list_records_without_keys_are_skipped() {
        let dir = scratch_dir();
        fs::write(
            dir.join("c.json"),
            r#"[{"senses": ["orphan"]}, {"key": "canis", "senses": ["dog"]}]"#,
        )
        .unwrap();
        let mut store = latin_store(&dir);
        assert!(store.get("canis").is_some());
    }
}
