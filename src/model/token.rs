use serde::{Deserialize, Serialize};

use crate::model::gloss::Gloss;

/// Morphological analysis supplied by the upstream analyzer.
///
/// Consumed as opaque input: a lemma plus free-text POS labels.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Analysis {
    #[serde(default)]
    pub lemma: String,

    #[serde(default)]
    pub pos_labels: Vec<String>,

    #[serde(default)]
    pub backend: Option<String>,
}

/// A token of source text with optional analysis and enrichment.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Token {
    pub text: String,

    #[serde(default)]
    pub normalized: Option<String>,

    #[serde(default)]
    pub line_number: Option<u32>,

    #[serde(default)]
    pub is_punct: Option<bool>,

    /// Enclitic split off during tokenization (-que, -ne, -ve).
    #[serde(default)]
    pub enclitic: Option<String>,

    #[serde(default)]
    pub analysis: Option<Analysis>,

    #[serde(default)]
    pub gloss: Option<Gloss>,
}

impl Token {
    /// The lookup key for this token: analyzer lemma when present, else the
    /// normalized or surface text.
    pub fn lookup_lemma(&self) -> &str {
        if let Some(a) = &self.analysis {
            if !a.lemma.is_empty() {
                return &a.lemma;
            }
        }
        self.normalized.as_deref().unwrap_or(&self.text)
    }
}
