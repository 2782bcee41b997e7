//! Missing-definitions report.
//!
//! Lemmas no source could resolve are collected here instead of aborting
//! the run; the caller can surface them for manual review.

use serde::{Deserialize, Serialize};

use crate::model::token::Token;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MissingDefinition {
    pub lemma: String,
    pub surface: String,
    pub line: Option<u32>,
}

#[derive(Debug, Default, Serialize)]
pub struct MissingReport {
    items: Vec<MissingDefinition>,
}

impl MissingReport {
    pub fn new() -> Self {
        MissingReport::default()
    }

    /// One record per lemma; later sightings of a known lemma are dropped.
    pub fn record(&mut self, lemma: &str, surface: &str, line: Option<u32>) {
        if lemma.is_empty() || self.items.iter().any(|i| i.lemma == lemma) {
            return;
        }
        self.items.push(MissingDefinition {
            lemma: lemma.to_string(),
            surface: surface.to_string(),
            line,
        });
    }

    pub fn items(&self) -> &[MissingDefinition] {
        &self.items
    }

    pub fn into_items(self) -> Vec<MissingDefinition> {
        self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Report over already-enriched tokens: every non-punctuation token
/// without a gloss is an unresolved lemma.
pub fn from_tokens(tokens: &[Token]) -> MissingReport {
    let mut report = MissingReport::new();
    for token in tokens {
        if token.is_punct.unwrap_or(false) || token.gloss.is_some() {
            continue;
        }
        report.record(token.lookup_lemma(), &token.text, token.line_number);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_lemmas_are_recorded_once() {
        let mut report = MissingReport::new();
        report.record("armum", "arma", Some(1));
        report.record("armum", "armis", Some(7));
        assert_eq!(report.len(), 1);
        assert_eq!(report.items()[0].surface, "arma");
    }

    #[test]
    fn glossed_and_punct_tokens_are_skipped() {
        let tokens: Vec<Token> = serde_json::from_str(
            r#"[
                {"text": ",", "is_punct": true},
                {"text": "arma", "line_number": 1},
                {"text": "cano", "gloss": {"lemma": "cano", "senses": ["to sing"],
                    "headword": "canō", "source": "whitakers", "confidence": 1.0}}
            ]"#,
        )
        .unwrap();
        let report = from_tokens(&tokens);
        assert_eq!(report.len(), 1);
        assert_eq!(report.items()[0].lemma, "arma");
    }
}
