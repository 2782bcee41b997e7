//! Greek lexicon orchestrator.
//!
//! Scholarly dictionary partitions first, then the networked morphological
//! service. The service returns morphology without senses, so a morpheus
//! hit either redirects back into the dictionary chain under the service's
//! lemma or falls through to a small built-in core vocabulary.

use std::collections::HashMap;

use crate::model::entry::NormalizedEntry;
use crate::model::gloss;
use crate::model::token::Token;
use crate::normalizers::lemma;
use crate::normalizers::morpheus::MorpheusNormalizer;
use crate::normalizers::records::MorpheusRecord;
use crate::services::cache::DefinitionCache;
use crate::services::morpheus_client::MorpheusClient;
use crate::services::report::{self, MissingReport};
use crate::services::sources::{DictionarySource, LsjSource};

const VARIANT_CONFIDENCE: f64 = 0.9;

/// High-frequency vocabulary the dictionaries occasionally miss under
/// analyzer-normalized keys. Keyed accent-stripped. Best-effort floor,
/// not a dictionary.
const CORE_VOCAB: &[(&str, &str)] = &[
    ("και", "and, also, even"),
    ("δε", "but, and"),
    ("ο", "the"),
    ("ειμι", "to be, to exist"),
    ("εχω", "to have, to hold"),
    ("λεγω", "to say, to speak"),
    ("γιγνομαι", "to become, to happen"),
    ("ποιεω", "to make, to do"),
    ("θεος", "god, deity"),
    ("ανθρωπος", "man, human being"),
    ("πολις", "city, city-state"),
    ("λογος", "word, speech, reason"),
];

pub struct GreekLexicon {
    sources: Vec<Box<dyn DictionarySource>>,
    morpheus: Option<MorpheusClient>,
    morpheus_normalizer: MorpheusNormalizer,
    cache: Option<DefinitionCache>,
    memo: HashMap<String, Option<NormalizedEntry>>,
}

impl GreekLexicon {
    pub fn new(lsj_dir: impl Into<std::path::PathBuf>) -> Self {
        Self::with_sources(vec![Box::new(LsjSource::new(lsj_dir))])
    }

    pub fn with_sources(sources: Vec<Box<dyn DictionarySource>>) -> Self {
        GreekLexicon {
            sources,
            morpheus: None,
            morpheus_normalizer: MorpheusNormalizer::new(),
            cache: None,
            memo: HashMap::new(),
        }
    }

    /// Enable the networked fallback.
    pub fn with_morpheus(mut self, client: MorpheusClient) -> Self {
        self.morpheus = Some(client);
        self
    }

    /// Cache morpheus responses across sessions.
    pub fn with_cache(mut self, cache: DefinitionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn lookup(&mut self, word: &str) -> Vec<String> {
        self.lookup_normalized(word)
            .map(|e| e.senses)
            .unwrap_or_default()
    }

    pub fn lookup_normalized(&mut self, word: &str) -> Option<NormalizedEntry> {
        let key = lemma::normalize_greek(word);
        if key.is_empty() {
            return None;
        }
        if let Some(memoized) = self.memo.get(&key) {
            return memoized.clone();
        }

        let result = self.resolve(word, &key);
        self.memo.insert(key, result.clone());
        result
    }

    pub fn enrich(
        &mut self,
        tokens: &mut [Token],
        frequency: &HashMap<String, u32>,
        first_occurrence: &HashMap<String, u32>,
    ) -> MissingReport {
        for token in tokens.iter_mut() {
            if token.is_punct.unwrap_or(false) {
                continue;
            }
            let word = token.lookup_lemma().to_string();
            let key = lemma::normalize_greek(&word);
            if let Some(entry) = self.lookup_normalized(&word) {
                token.gloss = Some(gloss::project(
                    &entry,
                    frequency.get(&key).copied(),
                    first_occurrence.get(&key).copied(),
                ));
            }
        }
        report::from_tokens(tokens)
    }

    fn resolve(&mut self, word: &str, key: &str) -> Option<NormalizedEntry> {
        if let Some(entry) = self.chain(word) {
            return Some(entry);
        }

        // Accent/breathing-stripped and case-folded forms, since sources
        // disagree on which orthography keys an entry.
        for variant in spelling_variants(word, key) {
            if let Some(mut entry) = self.chain(&variant) {
                entry.confidence = entry.confidence.min(VARIANT_CONFIDENCE);
                entry.variant_of = Some(variant);
                return Some(entry);
            }
        }

        if let Some(record) = self.morpheus_record(word) {
            return self.entry_from_morpheus(&record, word);
        }

        None
    }

    fn chain(&mut self, query: &str) -> Option<NormalizedEntry> {
        for source in self.sources.iter_mut() {
            if let Some(entry) = source.lookup(query) {
                return Some(entry);
            }
        }
        None
    }

    fn morpheus_record(&mut self, word: &str) -> Option<MorpheusRecord> {
        let client = self.morpheus.as_ref()?;

        if let Some(cache) = self.cache.as_ref() {
            if let Some(value) = cache.get(word, "morpheus") {
                return serde_json::from_value(value).ok();
            }
        }

        let record = client.analyze(word)?;
        if let Some(cache) = self.cache.as_ref() {
            if let Ok(value) = serde_json::to_value(&record) {
                cache.set(word, "morpheus", &value);
            }
        }
        Some(record)
    }

    /// A morpheus analysis carries no senses. Prefer re-entering the
    /// dictionary chain under the service's lemma; fall back to the core
    /// vocabulary.
    fn entry_from_morpheus(
        &mut self,
        record: &MorpheusRecord,
        word: &str,
    ) -> Option<NormalizedEntry> {
        let service_lemma = record
            .hdwd
            .as_deref()
            .filter(|h| !h.is_empty())
            .unwrap_or(record.lemma.as_str());

        if !service_lemma.is_empty() && service_lemma != word {
            if let Some(mut entry) = self.chain(service_lemma) {
                entry.variant_of = Some(service_lemma.to_string());
                return Some(entry);
            }
        }

        let senses = core_vocab_senses(service_lemma)?;
        self.morpheus_normalizer.normalize(record, word, &senses)
    }
}

fn core_vocab_senses(lemma_form: &str) -> Option<Vec<String>> {
    let key = lemma::normalize_greek(lemma_form);
    CORE_VOCAB
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, senses)| vec![senses.to_string()])
}

fn spelling_variants(word: &str, key: &str) -> Vec<String> {
    let mut variants: Vec<String> = Vec::new();
    let mut push = |v: String, out: &mut Vec<String>| {
        if v != word && !out.contains(&v) {
            out.push(v);
        }
    };

    push(word.to_lowercase(), &mut variants);
    push(key.to_string(), &mut variants);
    push(capitalize(key), &mut variants);

    variants
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
