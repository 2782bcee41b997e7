//! Dictionary sources behind one lookup capability.
//!
//! An orchestrator holds a prioritized list of `Box<dyn DictionarySource>`
//! and walks it until one source yields an entry. Partition-backed sources
//! tolerate both a single record and a list of homograph records under
//! one key, trying each in order.

use serde_json::Value;

use crate::model::entry::NormalizedEntry;
use crate::normalizers::lemma;
use crate::normalizers::lewis_short::LewisShortNormalizer;
use crate::normalizers::lsj::LsjNormalizer;
use crate::normalizers::records::{LewisShortRecord, LsjRecord, WhitakersRecord};
use crate::normalizers::whitakers::WhitakersNormalizer;
use crate::services::partitions::PartitionStore;

pub trait DictionarySource {
    fn id(&self) -> &'static str;

    /// One canonical entry for the lemma, or a miss.
    fn lookup(&mut self, lemma: &str) -> Option<NormalizedEntry>;
}

/// The stored value may be one record or a list of homographs.
fn record_values(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

pub struct WhitakersSource {
    partitions: PartitionStore,
    normalizer: WhitakersNormalizer,
}

impl WhitakersSource {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        WhitakersSource {
            partitions: PartitionStore::new(dir, lemma::normalize_latin),
            normalizer: WhitakersNormalizer::default(),
        }
    }
}

impl DictionarySource for WhitakersSource {
    fn id(&self) -> &'static str {
        "whitakers"
    }

    fn lookup(&mut self, lemma: &str) -> Option<NormalizedEntry> {
        let value = self.partitions.get(lemma)?.clone();
        for candidate in record_values(value) {
            if let Ok(record) = serde_json::from_value::<WhitakersRecord>(candidate) {
                if let Some(entry) = self.normalizer.normalize(&record, lemma) {
                    return Some(entry);
                }
            }
        }
        None
    }
}

pub struct LewisShortSource {
    partitions: PartitionStore,
    normalizer: LewisShortNormalizer,
}

impl LewisShortSource {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        LewisShortSource {
            partitions: PartitionStore::new(dir, lemma::normalize_latin),
            normalizer: LewisShortNormalizer::default(),
        }
    }
}

impl DictionarySource for LewisShortSource {
    fn id(&self) -> &'static str {
        "lewis_short"
    }

    fn lookup(&mut self, lemma: &str) -> Option<NormalizedEntry> {
        let value = self.partitions.get(lemma)?.clone();
        for candidate in record_values(value) {
            if let Ok(record) = serde_json::from_value::<LewisShortRecord>(candidate) {
                if let Some(entry) = self.normalizer.normalize(&record, lemma) {
                    return Some(entry);
                }
            }
        }
        None
    }
}

pub struct LsjSource {
    partitions: PartitionStore,
    normalizer: LsjNormalizer,
}

impl LsjSource {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        LsjSource {
            partitions: PartitionStore::new(dir, lemma::normalize_greek),
            normalizer: LsjNormalizer::default(),
        }
    }
}

impl DictionarySource for LsjSource {
    fn id(&self) -> &'static str {
        "lsj"
    }

    fn lookup(&mut self, lemma: &str) -> Option<NormalizedEntry> {
        let value = self.partitions.get(lemma)?.clone();
        for candidate in record_values(value) {
            if let Ok(record) = serde_json::from_value::<LsjRecord>(candidate) {
                if let Some(entry) = self.normalizer.normalize(&record, lemma) {
                    return Some(entry);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static DIR_SEQ: AtomicUsize = AtomicUsize::new(0);

    fn scratch_dir() -> PathBuf {
        let n = DIR_SEQ.fetch_add(1, Ordering::SeqCst);
        let dir =
            std::env::temp_dir().join(format!("glossa-sources-{}-{n}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn homograph_list_tries_records_in_order() {
        let dir = scratch_dir();
        // First homograph has no usable senses and must be skipped.
        fs::write(
            dir.join("o.json"),
            r#"{"occido": [
                {"key": "occido", "senses": []},
                {"key": "occido", "part_of_speech": "verb",
                 "main_notes": "occīdo, cīdi, cīsum, 3, v. a.",
                 "senses": ["to strike down, to kill"]}
            ]}"#,
        )
        .unwrap();

        let mut source = LewisShortSource::new(&dir);
        let entry = source.lookup("occido").unwrap();
        assert_eq!(entry.senses[0], "to strike down, to kill");
    }

    #[test]
    fn homograph_digit_keys_resolve_under_the_plain_lemma() {
        let dir = scratch_dir();
        fs::write(
            dir.join("o.json"),
            r#"{"occido1": {"key": "occido1", "part_of_speech": "verb",
                    "main_notes": "occĭdo, cĭdi, cāsum, 3",
                    "senses": ["to fall, to go down"]},
                "occido2": {"key": "occido2", "part_of_speech": "verb",
                    "main_notes": "occīdo, cīdi, cīsum, 3",
                    "senses": ["to strike down, to kill"]}}"#,
        )
        .unwrap();

        let mut source = LewisShortSource::new(&dir);
        let entry = source.lookup("occido").unwrap();
        assert_eq!(entry.lemma, "occido");
        assert_eq!(entry.senses[0], "to fall, to go down");
    }

    #[test]
    fn miss_propagates_as_none() {
        let dir = scratch_dir();
        let mut source = LsjSource::new(&dir);
        assert!(source.lookup("λόγος").is_none());
    }
}
