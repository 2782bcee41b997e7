//! Normalizer for parser-backed Latin records.
//!
//! The parser hands back bare stems plus category codes, so most of the
//! work here is rebuilding citation forms: verb headwords from the
//! conjugation table, noun nominatives from declension and gender, pronoun
//! forms from the irregular lookup.

use crate::model::entry::{
    Gender, Language, LatinPrincipalParts, NormalizedEntry, Number, PartOfSpeech, VerbVoice,
};
use crate::normalizers::headword;
use crate::normalizers::lemma;
use crate::normalizers::records::WhitakersRecord;
use crate::normalizers::senses::clean_parser_sense;

/// Stems of nouns that occur only in the plural (arma, castra, Athenae).
const PLURAL_ONLY_STEMS: &[&str] = &[
    "arm", "castr", "moeni", "liber", "major", "diviti", "insidi", "induti", "nupti", "reliqui",
    "tenebr",
];

pub struct WhitakersNormalizer {
    max_senses: usize,
}

impl Default for WhitakersNormalizer {
    fn default() -> Self {
        WhitakersNormalizer { max_senses: 3 }
    }
}

impl WhitakersNormalizer {
    pub fn new(max_senses: usize) -> Self {
        WhitakersNormalizer { max_senses }
    }

    /// Convert a raw parser record into a canonical entry.
    ///
    /// Returns None when no usable sense survives cleaning; bad or missing
    /// fields otherwise degrade to unset attributes.
    pub fn normalize(
        &self,
        record: &WhitakersRecord,
        query_lemma: &str,
    ) -> Option<NormalizedEntry> {
        let senses: Vec<String> = record
            .senses
            .iter()
            .map(|s| clean_parser_sense(s))
            .filter(|s| !s.is_empty())
            .take(self.max_senses)
            .collect();
        if senses.is_empty() {
            return None;
        }

        let word_type = if record.word_type.is_empty() {
            "X"
        } else {
            record.word_type.as_str()
        };
        let pos = map_pos(word_type);

        let gender_code = record.form.first().map(String::as_str);
        let gender = match word_type {
            "N" | "ADJ" | "PRON" => gender_code.and_then(map_gender),
            _ => None,
        };

        let class_number = record.category.first().copied();

        let stem = record
            .roots
            .first()
            .filter(|r| !r.is_empty())
            .map(String::as_str)
            .unwrap_or(query_lemma);
        let head = reconstruct_headword(stem, word_type, class_number, gender);

        let mut entry = NormalizedEntry {
            headword: head.clone(),
            lemma: lemma::normalize_latin(&head),
            language: Some(Language::Latin),
            pos,
            senses,
            source: "whitakers".to_string(),
            confidence: 1.0,
            ..Default::default()
        };

        match word_type {
            "N" => {
                entry.gender = gender;
                entry.declension = class_number;
                if let Some(decl) = class_number {
                    entry.genitive = headword::latin_genitive(decl).map(str::to_string);
                    entry.latin_stem_type = headword::latin_stem_type(decl, gender);
                }
                if PLURAL_ONLY_STEMS.contains(&stem.to_lowercase().as_str()) {
                    entry.number = Some(Number::PluralOnly);
                }
            }
            "ADJ" => {
                entry.gender = gender;
                entry.declension = class_number;
            }
            "PRON" => {
                entry.gender = gender;
            }
            "V" | "VPAR" | "SUPINE" => {
                entry.conjugation = class_number;
                entry.verb_voice = Some(determine_voice(&entry.senses));
                if matches!(class_number, Some(c) if c > 4) {
                    entry.is_irregular = Some(true);
                }
                entry.latin_principal_parts =
                    build_principal_parts(&record.roots, class_number, &entry.headword);
            }
            _ => {}
        }

        entry.validated()
    }
}

fn map_pos(word_type: &str) -> PartOfSpeech {
    match word_type {
        "N" => PartOfSpeech::Noun,
        "V" | "VPAR" | "SUPINE" => PartOfSpeech::Verb,
        "ADJ" => PartOfSpeech::Adjective,
        "ADV" => PartOfSpeech::Adverb,
        "PREP" => PartOfSpeech::Preposition,
        "CONJ" => PartOfSpeech::Conjunction,
        "PRON" => PartOfSpeech::Pronoun,
        "INTERJ" => PartOfSpeech::Interjection,
        "NUM" => PartOfSpeech::Numeral,
        "TACKON" | "PREFIX" | "SUFFIX" => PartOfSpeech::Particle,
        _ => PartOfSpeech::Unknown,
    }
}

fn map_gender(code: &str) -> Option<Gender> {
    match code.trim_end_matches('.').to_uppercase().as_str() {
        "M" => Some(Gender::Masculine),
        "F" => Some(Gender::Feminine),
        "N" => Some(Gender::Neuter),
        "C" => Some(Gender::Common),
        "X" => Some(Gender::Unknown),
        _ => None,
    }
}

fn reconstruct_headword(
    stem: &str,
    word_type: &str,
    class_number: Option<u8>,
    gender: Option<Gender>,
) -> String {
    if stem.is_empty() {
        return String::new();
    }
    match word_type {
        "V" | "VPAR" | "SUPINE" => headword::latin_verb_headword(stem, class_number),
        "PRON" => headword::latin_pronoun_headword(stem),
        "N" => headword::latin_noun_headword(stem, class_number, gender),
        "ADJ" => headword::latin_adjective_headword(stem, class_number),
        // Adverbs, prepositions and the rest arrive as complete forms.
        _ => stem.to_string(),
    }
}

/// Parser roots for verbs, in order: present stem, infinitive stem,
/// perfect stem, supine stem.
fn build_principal_parts(
    roots: &[String],
    conjugation: Option<u8>,
    head: &str,
) -> Option<LatinPrincipalParts> {
    if roots.len() < 2 {
        return None;
    }

    let inf_stem = roots
        .get(1)
        .filter(|r| !r.is_empty())
        .or_else(|| roots.first())?;
    let infinitive = headword::latin_infinitive(inf_stem, conjugation);

    let perfect = roots
        .get(2)
        .filter(|r| !r.is_empty())
        .map(|r| format!("{r}ī"));
    let supine = roots
        .get(3)
        .filter(|r| !r.is_empty())
        .map(|r| format!("{r}um"));

    Some(LatinPrincipalParts {
        present: head.to_string(),
        infinitive,
        perfect,
        supine,
        ..Default::default()
    })
}

/// The semi-deponent check runs before the deponent check: "semi-dep"
/// contains "dep" as a substring.
fn determine_voice(senses: &[String]) -> VerbVoice {
    let text = senses.join(" ").to_lowercase();
    if text.contains("semi-dep") || text.contains("semidep") {
        return VerbVoice::SemiDeponent;
    }
    if text.contains("deponent") || text.contains("dep.") {
        return VerbVoice::Deponent;
    }
    VerbVoice::Active
}
