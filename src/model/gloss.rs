//! Flat, rendering-ready projection of a canonical entry.

use serde::{Deserialize, Serialize};

use crate::model::display::{
    dialect_display, gender_display, pos_display, voice_display,
};
use crate::model::entry::{NormalizedEntry, PartOfSpeech};

/// Downstream-facing gloss record: everything the commentary renderer needs,
/// derived from a canonical entry plus contextual frequency data. Never
/// independently mutated.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Gloss {
    pub lemma: String,

    #[serde(default)]
    pub senses: Vec<String>,

    #[serde(default)]
    pub headword: String,

    /// Genitive for nominals, infinitive-ending abbreviation for Latin verbs.
    #[serde(default)]
    pub ending: Option<String>,

    /// Gender abbreviation for nominals, POS abbreviation otherwise.
    #[serde(default)]
    pub pos_label: Option<String>,

    #[serde(default)]
    pub voice_label: Option<String>,

    #[serde(default)]
    pub dialect_label: Option<String>,

    #[serde(default)]
    pub principal_parts: Option<String>,

    #[serde(default)]
    pub article: Option<String>,

    #[serde(default)]
    pub frequency: Option<u32>,

    #[serde(default)]
    pub first_occurrence: Option<u32>,

    #[serde(default)]
    pub source: String,

    #[serde(default)]
    pub confidence: f64,
}

impl Gloss {
    pub fn best(&self) -> Option<&str> {
        self.senses.first().map(String::as_str)
    }
}

/// Conjugation-characteristic infinitive endings, longest first so "-āre"
/// wins over a bare "-e". Deponent infinitives precede the active set.
const INFINITIVE_ENDINGS: &[&str] = &[
    "ārī", "ērī", "īrī", "āre", "ēre", "īre", "ere", "ī",
];

fn ending_from_infinitive(infinitive: &str) -> Option<String> {
    for suffix in INFINITIVE_ENDINGS {
        if infinitive.ends_with(suffix) {
            return Some(format!("-{suffix}"));
        }
    }
    None
}

/// Project a canonical entry into a flat gloss.
///
/// Pure: derives only from the entry and the two contextual values, touches
/// no shared state and performs no I/O.
pub fn project(
    entry: &NormalizedEntry,
    frequency: Option<u32>,
    first_occurrence: Option<u32>,
) -> Gloss {
    let ending = match entry.pos {
        PartOfSpeech::Verb => entry
            .latin_principal_parts
            .as_ref()
            .and_then(|pp| ending_from_infinitive(&pp.infinitive))
            .or_else(|| entry.genitive.clone()),
        _ => entry.genitive.clone(),
    };

    let pos_label = match entry.pos {
        PartOfSpeech::Noun => entry
            .gender
            .and_then(gender_display)
            .map(str::to_string),
        pos => pos_display(pos).map(str::to_string),
    };

    Gloss {
        lemma: entry.lemma.clone(),
        senses: entry.senses.clone(),
        headword: entry.headword.clone(),
        ending,
        pos_label,
        voice_label: entry
            .verb_voice
            .and_then(voice_display)
            .map(str::to_string),
        dialect_label: entry
            .dialect
            .and_then(dialect_display)
            .map(str::to_string),
        principal_parts: entry.format_principal_parts(true),
        article: entry.article.clone(),
        frequency: frequency.or(entry.frequency),
        first_occurrence,
        source: entry.source.clone(),
        confidence: entry.confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::{
        Gender, Language, LatinPrincipalParts, VerbVoice,
    };

    fn noun_entry() -> NormalizedEntry {
        NormalizedEntry {
            headword: "terra".to_string(),
            lemma: "terra".to_string(),
            language: Some(Language::Latin),
            pos: PartOfSpeech::Noun,
            senses: vec!["earth".to_string()],
            gender: Some(Gender::Feminine),
            declension: Some(1),
            genitive: Some("-ae".to_string()),
            source: "whitakers".to_string(),
            confidence: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn noun_gets_genitive_and_gender_label() {
        let g = project(&noun_entry(), Some(4), Some(12));
        assert_eq!(g.ending.as_deref(), Some("-ae"));
        assert_eq!(g.pos_label.as_deref(), Some("f."));
        assert_eq!(g.frequency, Some(4));
        assert_eq!(g.first_occurrence, Some(12));
    }

    #[test]
    fn latin_verb_gets_infinitive_ending_abbreviation() {
        let mut e = noun_entry();
        e.pos = PartOfSpeech::Verb;
        e.gender = None;
        e.genitive = None;
        e.declension = None;
        e.conjugation = Some(1);
        e.verb_voice = Some(VerbVoice::Active);
        e.latin_principal_parts = Some(LatinPrincipalParts {
            present: "amō".to_string(),
            infinitive: "amāre".to_string(),
            ..Default::default()
        });
        let g = project(&e, None, None);
        assert_eq!(g.ending.as_deref(), Some("-āre"));
        assert_eq!(g.pos_label.as_deref(), Some("v."));
        assert_eq!(g.voice_label, None);
    }

    #[test]
    fn deponent_infinitive_matches_before_active() {
        assert_eq!(ending_from_infinitive("sequī").as_deref(), Some("-ī"));
        assert_eq!(ending_from_infinitive("cōnārī").as_deref(), Some("-ārī"));
        assert_eq!(ending_from_infinitive("regere").as_deref(), Some("-ere"));
    }

    #[test]
    fn projection_only_copies_entry_fields() {
        let g = project(&noun_entry(), None, None);
        assert_eq!(g.lemma, "terra");
        assert_eq!(g.source, "whitakers");
        assert_eq!(g.principal_parts, None);
        assert_eq!(g.first_occurrence, None);
    }
}
