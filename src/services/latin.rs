//! Latin lexicon orchestrator.
//!
//! Walks a prioritized source chain for each lookup, widening the query
//! through spelling variants (u/v, i/j, capitalization) and, when the
//! whole chain misses, through derived candidate lemmas. The first source
//! returning an entry wins and short-circuits the rest.

use std::collections::HashMap;

use crate::model::entry::NormalizedEntry;
use crate::model::gloss;
use crate::model::token::Token;
use crate::normalizers::lemma;
use crate::services::candidates::latin_candidates;
use crate::services::report::{self, MissingReport};
use crate::services::sources::{DictionarySource, LewisShortSource, WhitakersSource};

const VARIANT_CONFIDENCE: f64 = 0.9;
const CANDIDATE_CONFIDENCE: f64 = 0.7;

pub struct LatinLexicon {
    sources: Vec<Box<dyn DictionarySource>>,
    memo: HashMap<String, Option<NormalizedEntry>>,
}

impl LatinLexicon {
    /// Default chain: parser-backed source first, scholarly dictionary as
    /// fallback.
    pub fn new(
        whitakers_dir: impl Into<std::path::PathBuf>,
        lewis_short_dir: impl Into<std::path::PathBuf>,
    ) -> Self {
        Self::with_sources(vec![
            Box::new(WhitakersSource::new(whitakers_dir)),
            Box::new(LewisShortSource::new(lewis_short_dir)),
        ])
    }

    pub fn with_sources(sources: Vec<Box<dyn DictionarySource>>) -> Self {
        LatinLexicon {
            sources,
            memo: HashMap::new(),
        }
    }

    pub fn lookup(&mut self, word: &str) -> Vec<String> {
        self.lookup_normalized(word)
            .map(|e| e.senses)
            .unwrap_or_default()
    }

    pub fn lookup_normalized(&mut self, word: &str) -> Option<NormalizedEntry> {
        let key = lemma::normalize_latin(word);
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

    /// Glosses every non-punctuation token in place; unresolved lemmas go
    /// into the returned report.
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
            let lemma_key = lemma::normalize_latin(token.lookup_lemma());
            if let Some(entry) = self.lookup_normalized(&lemma_key) {
                token.gloss = Some(gloss::project(
                    &entry,
                    frequency.get(&lemma_key).copied(),
                    first_occurrence.get(&lemma_key).copied(),
                ));
            }
        }
        report::from_tokens(tokens)
    }

    fn resolve(&mut self, word: &str, key: &str) -> Option<NormalizedEntry> {
        // Exact forms first, then orthographic variants of both the
        // surface form and the normalized key.
        if let Some(entry) = self.chain(word).or_else(|| self.chain(key)) {
            return Some(entry);
        }

        for variant in spelling_variants(word, key) {
            if let Some(mut entry) = self.chain(&variant) {
                entry.confidence = entry.confidence.min(VARIANT_CONFIDENCE);
                entry.variant_of = Some(variant);
                return Some(entry);
            }
        }

        for candidate in latin_candidates(key) {
            if let Some(mut entry) = self.chain(&candidate) {
                entry.confidence = entry.confidence.min(CANDIDATE_CONFIDENCE);
                entry.variant_of = Some(candidate);
                return Some(entry);
            }
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
}

/// Orthographic variants under which sources may key the same word:
/// consonantal u/i spelled v/j, and an initial capital.
fn spelling_variants(word: &str, key: &str) -> Vec<String> {
    let mut variants: Vec<String> = Vec::new();
    let mut push = |v: String, out: &mut Vec<String>| {
        if v != word && v != key && !out.contains(&v) {
            out.push(v);
        }
    };

    push(key.replace('u', "v"), &mut variants);
    push(key.replace('i', "j"), &mut variants);
    push(key.replace('u', "v").replace('i', "j"), &mut variants);
    push(capitalize(key), &mut variants);
    push(word.to_lowercase(), &mut variants);

    variants
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
