//! Normalizer for scholarly Latin dictionary records.
//!
//! These records carry rich prose: grammar notes like "ămō, āvi, ātum, 1,
//! v. a.", nested senses with citations and cross-references, genitive and
//! gender markers. Extraction keeps the pedagogically useful core and
//! strips the apparatus.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::entry::{
    Gender, Language, LatinPrincipalParts, NormalizedEntry, PartOfSpeech, VerbVoice,
};
use crate::normalizers::lemma;
use crate::normalizers::records::{flatten_senses, LewisShortRecord};
use crate::normalizers::senses::clean_senses;

/// "ămō, āvi, ātum, 1" — three forms plus a conjugation digit.
static PRINCIPAL_PARTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^,]+),\s*([^,]+),\s*([^,]+),\s*(\d)").unwrap());

static BARE_CONJUGATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([1-4])\b").unwrap());

/// Adjective paradigm spelled out in the notes: "-us, -a, -um".
static ADJ_PARADIGM: Lazy<Regex> = Lazy::new(|| Regex::new(r"-us,\s*-a,\s*-um").unwrap());

/// Proper nouns are capitalized in the orthography field.
fn looks_proper(headword: &str) -> bool {
    headword.chars().next().is_some_and(|c| c.is_uppercase())
}

pub struct LewisShortNormalizer {
    max_senses: usize,
}

impl Default for LewisShortNormalizer {
    fn default() -> Self {
        LewisShortNormalizer { max_senses: 3 }
    }
}

impl LewisShortNormalizer {
    pub fn new(max_senses: usize) -> Self {
        LewisShortNormalizer { max_senses }
    }

    pub fn normalize(
        &self,
        record: &LewisShortRecord,
        query_lemma: &str,
    ) -> Option<NormalizedEntry> {
        let head = record
            .title_orthography
            .clone()
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| record.key.clone());
        if head.is_empty() {
            return None;
        }

        let lemma_source = if query_lemma.is_empty() {
            head.as_str()
        } else {
            query_lemma
        };
        let lem = lemma::normalize_latin(lemma_source);

        let pos = extract_pos(record);

        let raw = flatten_senses(&record.senses);
        let senses = clean_senses(Language::Latin, &raw, self.max_senses);
        if senses.is_empty() {
            return None;
        }

        let gender = if pos == PartOfSpeech::Noun {
            extract_gender(record)
        } else {
            None
        };

        let mut entry = NormalizedEntry {
            headword: head.clone(),
            lemma: lem,
            language: Some(Language::Latin),
            pos,
            senses,
            gender,
            declension: record.declension,
            genitive: format_genitive(record.title_genitive.as_deref()),
            source: "lewis_short".to_string(),
            confidence: 1.0,
            is_proper_noun: pos == PartOfSpeech::Noun && looks_proper(&head),
            ..Default::default()
        };

        if pos == PartOfSpeech::Verb {
            let notes = record.main_notes.as_deref().unwrap_or("");
            let (pp, conjugation) = extract_principal_parts(notes);
            entry.latin_principal_parts = pp;
            entry.conjugation = conjugation;
            entry.verb_voice = Some(determine_voice(record));
        }

        entry.validated()
    }
}

fn extract_pos(record: &LewisShortRecord) -> PartOfSpeech {
    let raw = record
        .part_of_speech
        .as_deref()
        .unwrap_or("")
        .to_lowercase();
    let raw = raw.trim();

    if let Some(pos) = map_pos_word(raw) {
        return pos;
    }
    // Abbreviation prefixes: "v. a.", "adj. comp.", etc.
    for (prefix, pos) in POS_PREFIXES {
        if raw.starts_with(prefix) {
            return *pos;
        }
    }

    let notes = record.main_notes.as_deref().unwrap_or("").to_lowercase();
    if notes.contains("v. a.") || notes.contains("v. n.") || notes.contains("v. dep.") {
        return PartOfSpeech::Verb;
    }
    if ADJ_PARADIGM.is_match(&notes) {
        return PartOfSpeech::Adjective;
    }

    PartOfSpeech::Unknown
}

fn map_pos_word(raw: &str) -> Option<PartOfSpeech> {
    let pos = match raw {
        "noun" => PartOfSpeech::Noun,
        "verb" | "v. a." | "v. n." | "v. dep." | "v. freq." | "v. inch." => PartOfSpeech::Verb,
        "adjective" | "adj." => PartOfSpeech::Adjective,
        "adverb" | "adv." => PartOfSpeech::Adverb,
        "preposition" | "prep." => PartOfSpeech::Preposition,
        "conjunction" | "conj." => PartOfSpeech::Conjunction,
        "pronoun" | "pron." => PartOfSpeech::Pronoun,
        "interjection" | "interj." => PartOfSpeech::Interjection,
        "numeral" | "num." => PartOfSpeech::Numeral,
        "particle" | "part." => PartOfSpeech::Particle,
        _ => return None,
    };
    Some(pos)
}

const POS_PREFIXES: &[(&str, PartOfSpeech)] = &[
    ("v. dep.", PartOfSpeech::Verb),
    ("v. freq.", PartOfSpeech::Verb),
    ("v. inch.", PartOfSpeech::Verb),
    ("v. a.", PartOfSpeech::Verb),
    ("v. n.", PartOfSpeech::Verb),
    ("adj", PartOfSpeech::Adjective),
    ("adv", PartOfSpeech::Adverb),
    ("prep", PartOfSpeech::Preposition),
    ("conj", PartOfSpeech::Conjunction),
    ("pron", PartOfSpeech::Pronoun),
    ("interj", PartOfSpeech::Interjection),
    ("num", PartOfSpeech::Numeral),
    ("noun", PartOfSpeech::Noun),
    ("verb", PartOfSpeech::Verb),
];

fn extract_gender(record: &LewisShortRecord) -> Option<Gender> {
    let raw = record.gender.as_deref()?.trim().to_uppercase();
    match raw.as_str() {
        "M" => Some(Gender::Masculine),
        "F" => Some(Gender::Feminine),
        "N" => Some(Gender::Neuter),
        "C" | "MF" => Some(Gender::Common),
        _ => None,
    }
}

/// Genitive formatted as "-ending"; indeclinable markers yield nothing.
fn format_genitive(genitive: Option<&str>) -> Option<String> {
    let g = genitive?.trim();
    if g.is_empty() {
        return None;
    }
    match g.to_lowercase().as_str() {
        "indecl." | "indecl" | "indeclinable" => None,
        _ if g.starts_with('-') => Some(g.to_string()),
        _ => Some(format!("-{g}")),
    }
}

/// Principal parts and conjugation from the grammar notes.
///
/// The scholarly citation order is present, perfect, supine, conjugation;
/// the infinitive is synthesized from the present stem.
fn extract_principal_parts(notes: &str) -> (Option<LatinPrincipalParts>, Option<u8>) {
    if notes.is_empty() {
        return (None, None);
    }

    if let Some(caps) = PRINCIPAL_PARTS.captures(notes) {
        let present = caps[1].trim().to_string();
        let perfect = caps[2].trim().to_string();
        let supine = caps[3].trim().to_string();
        let conjugation = caps[4].parse::<u8>().ok();

        let infinitive = synthesize_infinitive(&present, conjugation);
        let pp = LatinPrincipalParts {
            present,
            infinitive,
            perfect: Some(perfect),
            supine: Some(supine),
            ..Default::default()
        };
        return (Some(pp), conjugation);
    }

    let conjugation = BARE_CONJUGATION
        .captures(notes)
        .and_then(|caps| caps[1].parse::<u8>().ok());
    (None, conjugation)
}

/// Strip the citation ending off the present form and attach the
/// conjugation-characteristic infinitive ending.
fn synthesize_infinitive(present: &str, conjugation: Option<u8>) -> String {
    let bare = lemma::normalize_latin(present);
    let stem = if conjugation == Some(2) && bare.ends_with("eo") {
        &bare[..bare.len() - 2]
    } else if conjugation == Some(4) && bare.ends_with("io") {
        &bare[..bare.len() - 2]
    } else if bare.ends_with("or") {
        &bare[..bare.len() - 2]
    } else if bare.ends_with('o') {
        &bare[..bare.len() - 1]
    } else {
        bare.as_str()
    };

    let ending = match conjugation {
        Some(1) => "āre",
        Some(2) => "ēre",
        Some(4) => "īre",
        _ => "ere",
    };
    format!("{stem}{ending}")
}

/// Voice from the POS field, grammar notes and senses. The semi-deponent
/// check always precedes the plain deponent check.
fn determine_voice(record: &LewisShortRecord) -> VerbVoice {
    let pos_raw = record
        .part_of_speech
        .as_deref()
        .unwrap_or("")
        .to_lowercase();
    let notes = record.main_notes.as_deref().unwrap_or("").to_lowercase();

    if pos_raw.contains("v. dep.") || notes.contains("dep.") {
        if notes.contains("semi-dep") || notes.contains("semidep") {
            return VerbVoice::SemiDeponent;
        }
        return VerbVoice::Deponent;
    }

    let senses_text = flatten_senses(&record.senses).join(" ").to_lowercase();
    if senses_text.contains("semi-dep") || senses_text.contains("semidep") {
        return VerbVoice::SemiDeponent;
    }
    if senses_text.contains("deponent") || senses_text.contains("dep.") {
        return VerbVoice::Deponent;
    }

    VerbVoice::Active
}
