//! Normalizer for the networked Greek morphological service.
//!
//! The service returns morphology only, usually a stem rather than a
//! citation form, and never senses. Senses are supplied by the caller
//! from whatever dictionary lookup accompanied the analysis, and the
//! citation headword is reconstructed from the stem when the service
//! does not send one.

use crate::model::display::greek_article;
use crate::model::entry::{
    Gender, GreekPrincipalParts, GreekVerbClass, Language, NormalizedEntry, PartOfSpeech,
    VerbVoice,
};
use crate::normalizers::headword;
use crate::normalizers::lemma;
use crate::normalizers::records::{declension_digit, GreekPartsMap, MorpheusRecord};

#[derive(Default)]
pub struct MorpheusNormalizer;

impl MorpheusNormalizer {
    pub fn new() -> Self {
        MorpheusNormalizer
    }

    pub fn normalize(
        &self,
        record: &MorpheusRecord,
        query_word: &str,
        senses: &[String],
    ) -> Option<NormalizedEntry> {
        let lemma_source = if !record.lemma.is_empty() {
            record.lemma.as_str()
        } else if let Some(h) = record.hdwd.as_deref().filter(|h| !h.is_empty()) {
            h
        } else {
            query_word
        };
        let lem = lemma::normalize_greek(lemma_source);

        let pos = map_pos(record.pos.as_deref());
        let gender = if pos == PartOfSpeech::Adjective {
            None
        } else {
            map_gender(record.gender.as_deref())
        };
        let declension = record.decl.as_ref().and_then(declension_digit);
        let explicit_mi = record.verb_class.as_deref() == Some("mi");

        let head = reconstruct_headword(record, lemma_source, pos, declension, gender, explicit_mi);

        let mut entry = NormalizedEntry {
            headword: head.clone(),
            lemma: lem,
            language: Some(Language::Greek),
            pos,
            senses: senses.to_vec(),
            gender,
            declension,
            stem: record.stem.clone().filter(|s| !s.is_empty()),
            source: "morpheus".to_string(),
            confidence: 1.0,
            ..Default::default()
        };

        if pos == PartOfSpeech::Noun {
            entry.article = gender.and_then(greek_article).map(str::to_string);
            entry.genitive = explicit_genitive(record)
                .or_else(|| infer_genitive(declension, gender));
        }

        if pos == PartOfSpeech::Verb {
            entry.greek_verb_class = if explicit_mi {
                Some(GreekVerbClass::Mi)
            } else {
                headword::greek_verb_class(&head)
            };
            entry.verb_voice = Some(map_voice(record.voice.as_deref()));
            entry.greek_principal_parts = Some(build_principal_parts(record, &head));
        }

        entry.validated()
    }
}

fn map_pos(raw: Option<&str>) -> PartOfSpeech {
    match raw.unwrap_or("").trim().to_lowercase().as_str() {
        "noun" => PartOfSpeech::Noun,
        "verb" => PartOfSpeech::Verb,
        "adjective" | "adj" => PartOfSpeech::Adjective,
        "adverb" | "adv" => PartOfSpeech::Adverb,
        "preposition" | "prep" => PartOfSpeech::Preposition,
        "conjunction" | "conj" => PartOfSpeech::Conjunction,
        "pronoun" | "pron" => PartOfSpeech::Pronoun,
        "particle" => PartOfSpeech::Particle,
        "article" => PartOfSpeech::Article,
        "numeral" | "number" => PartOfSpeech::Numeral,
        "interjection" | "exclam" => PartOfSpeech::Interjection,
        _ => PartOfSpeech::Unknown,
    }
}

fn map_gender(raw: Option<&str>) -> Option<Gender> {
    match raw?.trim().to_lowercase().as_str() {
        "masculine" | "masc" | "m" => Some(Gender::Masculine),
        "feminine" | "fem" | "f" => Some(Gender::Feminine),
        "neuter" | "neut" | "n" => Some(Gender::Neuter),
        "common" | "c" => Some(Gender::Common),
        _ => None,
    }
}

fn map_voice(raw: Option<&str>) -> VerbVoice {
    match raw.unwrap_or("").trim().to_lowercase().as_str() {
        "deponent" | "dep" => VerbVoice::Deponent,
        "middle" | "mid" | "mediopassive" | "mp" => VerbVoice::Middle,
        "passive" | "pass" => VerbVoice::Passive,
        _ => VerbVoice::Active,
    }
}

/// Citation form for the analysis. An explicit `hdwd` wins; otherwise the
/// stem is expanded by part of speech, with irregular nominals checked
/// before any declension rule.
fn reconstruct_headword(
    record: &MorpheusRecord,
    lemma_source: &str,
    pos: PartOfSpeech,
    declension: Option<u8>,
    gender: Option<Gender>,
    explicit_mi: bool,
) -> String {
    if let Some(h) = record.hdwd.as_deref().filter(|h| !h.is_empty()) {
        return h.to_string();
    }

    let stem = match record.stem.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => s,
        None => return lemma_source.to_string(),
    };

    if let Some(irregular) = headword::greek_irregular_nominal(stem) {
        return irregular.to_string();
    }

    match pos {
        PartOfSpeech::Noun => headword::greek_noun_headword(stem, declension, gender),
        PartOfSpeech::Adjective => headword::greek_adjective_headword(stem),
        PartOfSpeech::Verb => headword::greek_verb_headword(stem, explicit_mi),
        _ => lemma_source.to_string(),
    }
}

fn explicit_genitive(record: &MorpheusRecord) -> Option<String> {
    let g = record.genitive.as_deref()?.trim();
    if g.is_empty() {
        return None;
    }
    if g.starts_with('-') {
        Some(g.to_string())
    } else {
        Some(format!("-{g}"))
    }
}

fn infer_genitive(declension: Option<u8>, gender: Option<Gender>) -> Option<String> {
    headword::greek_genitive(declension?, gender).map(str::to_string)
}

fn build_principal_parts(record: &MorpheusRecord, head: &str) -> GreekPrincipalParts {
    match record.principal_parts.as_ref() {
        Some(map) => from_parts_map(map, head),
        None => GreekPrincipalParts {
            present: head.to_string(),
            ..Default::default()
        },
    }
}

fn from_parts_map(map: &GreekPartsMap, head: &str) -> GreekPrincipalParts {
    GreekPrincipalParts {
        present: map.present.clone().unwrap_or_else(|| head.to_string()),
        future: map.future.clone(),
        aorist: map.aorist.clone(),
        perfect_active: map.perfect_active.clone().or_else(|| map.perfect.clone()),
        perfect_middle: map.perfect_middle.clone().or_else(|| map.perfect_mp.clone()),
        aorist_passive: map.aorist_passive.clone(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn senses(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn noun_headword_is_reconstructed_from_stem() {
        let record: MorpheusRecord = serde_json::from_str(
            r#"{"lemma": "λογος", "stem": "λογ", "pos": "noun", "gender": "m", "decl": 2}"#,
        )
        .unwrap();
        let entry = MorpheusNormalizer::new()
            .normalize(&record, "λόγον", &senses(&["word, speech"]))
            .unwrap();
        assert_eq!(entry.headword, "λογος");
        assert_eq!(entry.article.as_deref(), Some("ὁ"));
        assert_eq!(entry.genitive.as_deref(), Some("-ου"));
    }

    #[test]
    fn irregular_stem_beats_declension_rules() {
        let record: MorpheusRecord = serde_json::from_str(
            r#"{"lemma": "ἀνήρ", "stem": "ανδρ", "pos": "noun", "gender": "m", "decl": 3}"#,
        )
        .unwrap();
        let entry = MorpheusNormalizer::new()
            .normalize(&record, "ἄνδρα", &senses(&["man, husband"]))
            .unwrap();
        assert_eq!(entry.headword, "ἀνήρ");
    }

    #[test]
    fn explicit_hdwd_wins_over_reconstruction() {
        let record: MorpheusRecord = serde_json::from_str(
            r#"{"lemma": "ναυς", "hdwd": "ναῦς", "stem": "ναυ", "pos": "noun", "gender": "f"}"#,
        )
        .unwrap();
        let entry = MorpheusNormalizer::new()
            .normalize(&record, "νεώς", &senses(&["ship"]))
            .unwrap();
        assert_eq!(entry.headword, "ναῦς");
    }

    #[test]
    fn explicit_mi_class_overrides_headword_shape() {
        let record: MorpheusRecord = serde_json::from_str(
            r#"{"lemma": "διδωμι", "stem": "διδω", "pos": "verb", "verb_class": "mi"}"#,
        )
        .unwrap();
        let entry = MorpheusNormalizer::new()
            .normalize(&record, "δίδωσι", &senses(&["to give"]))
            .unwrap();
        assert_eq!(entry.greek_verb_class, Some(GreekVerbClass::Mi));
        assert!(entry.headword.ends_with("μι"));
    }

    #[test]
    fn deponent_voice_is_mapped() {
        let record: MorpheusRecord = serde_json::from_str(
            r#"{"lemma": "βουλομαι", "hdwd": "βούλομαι", "pos": "verb", "voice": "deponent"}"#,
        )
        .unwrap();
        let entry = MorpheusNormalizer::new()
            .normalize(&record, "βούλεται", &senses(&["to wish"]))
            .unwrap();
        assert_eq!(entry.verb_voice, Some(VerbVoice::Deponent));
        let pp = entry.greek_principal_parts.unwrap();
        assert_eq!(pp.present, "βούλομαι");
    }

    #[test]
    fn empty_senses_reject_the_entry() {
        let record: MorpheusRecord =
            serde_json::from_str(r#"{"lemma": "λογος", "pos": "noun"}"#).unwrap();
        assert!(MorpheusNormalizer::new()
            .normalize(&record, "λόγος", &[])
            .is_none());
    }
}
