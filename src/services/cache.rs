//! Cross-session definition cache.
//!
//! Keyed by (normalized word, source id); one JSON file per key under the
//! cache directory. Offline dictionary partitions never go stale, so only
//! networked sources carry a TTL.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Sources whose entries expire.
const NETWORKED_SOURCES: &[&str] = &["morpheus"];

const NETWORKED_TTL_SECS: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
struct CacheRecord {
    word: String,
    source: String,
    stored_at: u64,
    value: Value,
}

pub struct DefinitionCache {
    dir: PathBuf,
}

impl DefinitionCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DefinitionCache { dir: dir.into() }
    }

    pub fn get(&self, word: &str, source: &str) -> Option<Value> {
        let path = self.entry_path(word, source);
        let data = fs::read_to_string(&path).ok()?;
        let record: CacheRecord = serde_json::from_str(&data).ok()?;

        if is_networked(source) {
            let age = now_secs().saturating_sub(record.stored_at);
            if age > NETWORKED_TTL_SECS {
                let _ = fs::remove_file(&path);
                return None;
            }
        }
        Some(record.value)
    }

    pub fn set(&self, word: &str, source: &str, value: &Value) {
        let record = CacheRecord {
            word: word.to_string(),
            source: source.to_string(),
            stored_at: now_secs(),
            value: value.clone(),
        };
        let json = match serde_json::to_string(&record) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("[cache] failed to serialize {word}/{source}: {e}");
                return;
            }
        };
        if let Err(e) = write_atomic(&self.entry_path(word, source), json.as_bytes()) {
            eprintln!("[cache] failed to write {word}/{source}: {e}");
        }
    }

    fn entry_path(&self, word: &str, source: &str) -> PathBuf {
        self.dir.join(format!("{}.json", cache_key(word, source)))
    }
}

pub fn cache_key(word: &str, source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(word.as_bytes());
    hasher.update(b"\n");
    hasher.update(source.as_bytes());
    hex::encode(hasher.finalize())
}

fn is_networked(source: &str) -> bool {
    NETWORKED_SOURCES.contains(&source)
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), String> {
    let mut tmp = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "cache".to_string(),
    };
    tmp.set_file_name(format!("{file_name}.tmp"));

    if let Some(parent) = tmp.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    fs::write(&tmp, bytes).map_err(|e| e.to_string())?;

    if path.exists() {
        fs::remove_file(path).map_err(|e| e.to_string())?;
    }

    fs::rename(&tmp, path).map_err(|e| e.to_string())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static DIR_SEQ: AtomicUsize = AtomicUsize::new(0);

    fn scratch_cache() -> DefinitionCache {
        let n = DIR_SEQ.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("glossa-cache-{}-{n}", std::process::id()));
        DefinitionCache::new(dir)
    }

    #[test]
    fn set_then_get_round_trips() {
        let cache = scratch_cache();
        cache.set("amo", "lewis_short", &json!({"senses": ["to love"]}));
        let value = cache.get("amo", "lewis_short").unwrap();
        assert_eq!(value["senses"][0], "to love");
    }

    #[test]
    fn key_separates_word_and_source() {
        assert_ne!(cache_key("amo", "lewis_short"), cache_key("amo", "whitakers"));
        assert_ne!(cache_key("ab", "cd"), cache_key("abc", "d"));
    }

    #[test]
    fn offline_entries_never_expire() {
        let cache = scratch_cache();
        cache.set("amo", "lewis_short", &json!({"ok": true}));

        // Backdate the record far beyond the networked TTL.
        let path = cache.entry_path("amo", "lewis_short");
        let data = fs::read_to_string(&path).unwrap();
        let mut record: CacheRecord = serde_json::from_str(&data).unwrap();
        record.stored_at = 0;
        fs::write(&path, serde_json::to_string(&record).unwrap()).unwrap();

        assert!(cache.get("amo", "lewis_short").is_some());
    }

    #[test]
    fn networked_entries_expire() {
        let cache = scratch_cache();
        cache.set("λογος", "morpheus", &json!({"ok": true}));

        let path = cache.entry_path("λογος", "morpheus");
        let data = fs::read_to_string(&path).unwrap();
        let mut record: CacheRecord = serde_json::from_str(&data).unwrap();
        record.stored_at = 0;
        fs::write(&path, serde_json::to_string(&record).unwrap()).unwrap();

        assert!(cache.get("λογος", "morpheus").is_none());
    }

    #[test]
    fn missing_entry_is_a_miss() {
        let cache = scratch_cache();
        assert!(cache.get("nusquam", "lewis_short").is_none());
    }
}
