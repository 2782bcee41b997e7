//! Normalizer for scholarly Greek dictionary records.
//!
//! Grammar notes mix the article, genitive ending, principal parts and
//! dialect markers into one abbreviated string ("ἡ, gen. -ου, fut. λύσω,
//! Ion."); extraction reads each attribute out of whichever field carries
//! it, falling back to the headword's own shape.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::display::greek_article;
use crate::model::entry::{
    Gender, GreekDialect, GreekPrincipalParts, Language, NormalizedEntry, PartOfSpeech, VerbVoice,
};
use crate::normalizers::headword;
use crate::normalizers::lemma;
use crate::normalizers::records::{declension_digit, flatten_senses, LsjRecord};
use crate::normalizers::senses::clean_senses;

/// Genitive ending in the grammar notes: "gen. -ου", or a bare "-ης".
static GEN_ENDING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:gen\.?\s*)?(-[οηαεωυ][ςυ]?)").unwrap());

static FUT_FORM: Lazy<Regex> = Lazy::new(|| Regex::new(r"fut\.\s*([^\s,;]+)").unwrap());
static AOR_FORM: Lazy<Regex> = Lazy::new(|| Regex::new(r"aor\.\s*([^\s,;]+)").unwrap());
static PF_FORM: Lazy<Regex> = Lazy::new(|| Regex::new(r"pf\.\s*([^\s,;]+)").unwrap());
static PF_MP_FORM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"pf\.\s*(?:mid|pass)\.\s*([^\s,;]+)").unwrap());
static AOR_PASS_FORM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"aor\.\s*pass\.\s*([^\s,;]+)").unwrap());

pub struct LsjNormalizer {
    max_senses: usize,
}

impl Default for LsjNormalizer {
    fn default() -> Self {
        LsjNormalizer { max_senses: 3 }
    }
}

impl LsjNormalizer {
    pub fn new(max_senses: usize) -> Self {
        LsjNormalizer { max_senses }
    }

    pub fn normalize(&self, record: &LsjRecord, query_lemma: &str) -> Option<NormalizedEntry> {
        let head = record
            .orth
            .clone()
            .filter(|h| !h.is_empty())
            .or_else(|| record.headword.clone().filter(|h| !h.is_empty()))?;

        let lemma_source = if query_lemma.is_empty() {
            head.as_str()
        } else {
            query_lemma
        };
        let lem = lemma::normalize_greek(lemma_source);

        let gram = record.gram.as_deref().unwrap_or("");
        let pos = extract_pos(record, &head, gram);

        let raw = collect_raw_senses(record);
        let senses = clean_senses(Language::Greek, &raw, self.max_senses);
        if senses.is_empty() {
            return None;
        }

        let gender = if pos == PartOfSpeech::Noun {
            extract_gender(record, gram)
        } else {
            None
        };

        let mut entry = NormalizedEntry {
            headword: head.clone(),
            lemma: lem,
            language: Some(Language::Greek),
            pos,
            senses,
            gender,
            article: gender.and_then(greek_article).map(str::to_string),
            genitive: extract_genitive(record, gram),
            declension: record.declension.as_ref().and_then(declension_digit),
            dialect: extract_dialect(gram),
            source: "lsj".to_string(),
            confidence: 1.0,
            ..Default::default()
        };

        if pos == PartOfSpeech::Verb {
            entry.greek_verb_class = headword::greek_verb_class(&head);
            entry.verb_voice = Some(determine_voice(record, gram));
            entry.greek_principal_parts = Some(extract_principal_parts(record, &head, gram));
        }

        entry.validated()
    }
}

fn collect_raw_senses(record: &LsjRecord) -> Vec<String> {
    let mut raw = flatten_senses(&record.senses);
    if raw.is_empty() {
        raw = flatten_senses(&record.definitions);
    }
    if raw.is_empty() {
        if let Some(s) = record.sense.as_ref().or(record.definition.as_ref()) {
            raw.push(s.clone());
        }
    }
    raw
}

fn extract_pos(record: &LsjRecord, head: &str, gram: &str) -> PartOfSpeech {
    if let Some(raw) = record.pos.as_deref() {
        let raw = raw.trim().to_lowercase();
        let mapped = match raw.as_str() {
            "noun" | "subst" | "subst." => Some(PartOfSpeech::Noun),
            "verb" | "v" | "v." | "vb" | "vb." => Some(PartOfSpeech::Verb),
            "adjective" | "adj" | "adj." => Some(PartOfSpeech::Adjective),
            "adverb" | "adv" | "adv." => Some(PartOfSpeech::Adverb),
            "preposition" | "prep" | "prep." => Some(PartOfSpeech::Preposition),
            "conjunction" | "conj" | "conj." => Some(PartOfSpeech::Conjunction),
            "pronoun" | "pron" | "pron." => Some(PartOfSpeech::Pronoun),
            "particle" | "partic." => Some(PartOfSpeech::Particle),
            "interjection" | "interj." => Some(PartOfSpeech::Interjection),
            "numeral" | "num." => Some(PartOfSpeech::Numeral),
            "article" | "art." => Some(PartOfSpeech::Article),
            _ => None,
        };
        if let Some(pos) = mapped {
            return pos;
        }
    }

    // Verbal headword endings across all classes.
    let bare = lemma::normalize_greek(head);
    if bare.ends_with('ω') || bare.ends_with("μι") || bare.ends_with("μαι") {
        return PartOfSpeech::Verb;
    }

    if gram.contains("adj.") {
        return PartOfSpeech::Adjective;
    }
    if gram.contains("adv.") {
        return PartOfSpeech::Adverb;
    }

    PartOfSpeech::Unknown
}

fn extract_gender(record: &LsjRecord, gram: &str) -> Option<Gender> {
    if let Some(raw) = record.gender.as_deref() {
        let g = match raw.trim().to_lowercase().as_str() {
            "m" | "m." | "masc" | "masc." => Some(Gender::Masculine),
            "f" | "f." | "fem" | "fem." => Some(Gender::Feminine),
            "n" | "n." | "neut" | "neut." => Some(Gender::Neuter),
            "c" | "mf" | "m/f" => Some(Gender::Common),
            _ => None,
        };
        if g.is_some() {
            return g;
        }
    }

    // Article or abbreviation inside the grammar notes.
    if gram.contains('ὁ') && gram.contains('ἡ') {
        return Some(Gender::Common);
    }
    if gram.contains('ὁ') {
        return Some(Gender::Masculine);
    }
    if gram.contains('ἡ') {
        return Some(Gender::Feminine);
    }
    if gram.contains("τό") || gram.contains("τὸ") {
        return Some(Gender::Neuter);
    }
    if gram.contains("masc") || gram.starts_with("m.") || gram.contains(", m.") {
        return Some(Gender::Masculine);
    }
    if gram.contains("fem") || gram.starts_with("f.") || gram.contains(", f.") {
        return Some(Gender::Feminine);
    }
    if gram.contains("neut") || gram.starts_with("n.") || gram.contains(", n.") {
        return Some(Gender::Neuter);
    }
    None
}

fn extract_genitive(record: &LsjRecord, gram: &str) -> Option<String> {
    if let Some(g) = record.genitive.as_deref() {
        let g = g.trim();
        if !g.is_empty() {
            return if g.starts_with('-') {
                Some(g.to_string())
            } else {
                Some(format!("-{g}"))
            };
        }
    }
    GEN_ENDING
        .captures(gram)
        .map(|caps| caps[1].to_string())
}

fn extract_dialect(gram: &str) -> Option<GreekDialect> {
    // First marker wins; Attic is the unmarked default and never stored.
    const MARKERS: &[(&str, GreekDialect)] = &[
        ("Ion.", GreekDialect::Ionic),
        ("Hom.", GreekDialect::Homeric),
        ("Ep.", GreekDialect::Epic),
        ("Dor.", GreekDialect::Doric),
        ("Aeol.", GreekDialect::Aeolic),
        ("Koine", GreekDialect::Koine),
    ];
    MARKERS
        .iter()
        .find(|(marker, _)| gram.contains(marker))
        .map(|&(_, d)| d)
}

fn determine_voice(record: &LsjRecord, gram: &str) -> VerbVoice {
    let bare = lemma::normalize_greek(
        record
            .orth
            .as_deref()
            .or(record.headword.as_deref())
            .unwrap_or(""),
    );
    let gram_lower = gram.to_lowercase();

    if gram_lower.contains("dep.") {
        if gram_lower.contains("mid.") {
            return VerbVoice::Middle;
        }
        return VerbVoice::Deponent;
    }
    // A -μαι headword without active forms in the notes is deponent.
    if bare.ends_with("μαι") {
        if gram_lower.contains("mid.") && !gram_lower.contains("act.") {
            return VerbVoice::Middle;
        }
        if gram_lower.contains("pass.") && !gram_lower.contains("act.") {
            return VerbVoice::Passive;
        }
        return VerbVoice::Deponent;
    }
    VerbVoice::Active
}

fn extract_principal_parts(record: &LsjRecord, head: &str, gram: &str) -> GreekPrincipalParts {
    if let Some(map) = record.principal_parts.as_ref() {
        return GreekPrincipalParts {
            present: map.present.clone().unwrap_or_else(|| head.to_string()),
            future: map.future.clone(),
            aorist: map.aorist.clone(),
            perfect_active: map.perfect_active.clone().or_else(|| map.perfect.clone()),
            perfect_middle: map.perfect_middle.clone().or_else(|| map.perfect_mp.clone()),
            aorist_passive: map.aorist_passive.clone(),
            ..Default::default()
        };
    }

    // The compound labels are scanned first; the plain scans then reject
    // a capture that is itself a voice label, so "pf. pass. λέλυμαι" does
    // not land in the plain perfect slot.
    let is_voice_label = |f: &String| f.starts_with("mid") || f.starts_with("pass");
    let perfect_middle = PF_MP_FORM.captures(gram).map(|c| c[1].to_string());
    let aorist_passive = AOR_PASS_FORM.captures(gram).map(|c| c[1].to_string());
    let perfect_active = PF_FORM
        .captures(gram)
        .map(|c| c[1].to_string())
        .filter(|f| !is_voice_label(f) && perfect_middle.as_deref() != Some(f));
    let aorist = AOR_FORM
        .captures(gram)
        .map(|c| c[1].to_string())
        .filter(|f| !is_voice_label(f) && aorist_passive.as_deref() != Some(f));

    GreekPrincipalParts {
        present: head.to_string(),
        future: FUT_FORM.captures(gram).map(|c| c[1].to_string()),
        aorist,
        perfect_active,
        perfect_middle,
        aorist_passive,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::GreekVerbClass;

    #[test]
    fn noun_gets_article_and_genitive() {
        let record: LsjRecord = serde_json::from_str(
            r#"{
                "orth": "λόγος",
                "pos": "noun",
                "gender": "m",
                "genitive": "ου",
                "declension": 2,
                "senses": ["word, speech, account"]
            }"#,
        )
        .unwrap();
        let entry = LsjNormalizer::default().normalize(&record, "λόγος").unwrap();
        assert_eq!(entry.pos, PartOfSpeech::Noun);
        assert_eq!(entry.gender, Some(Gender::Masculine));
        assert_eq!(entry.article.as_deref(), Some("ὁ"));
        assert_eq!(entry.genitive.as_deref(), Some("-ου"));
        assert_eq!(entry.declension, Some(2));
        assert_eq!(entry.lemma, "λογος");
    }

    #[test]
    fn article_in_gram_notes_supplies_gender() {
        let record: LsjRecord = serde_json::from_str(
            r#"{
                "orth": "θάλασσα",
                "pos": "noun",
                "gram": "ἡ, gen. -ης",
                "senses": ["sea"]
            }"#,
        )
        .unwrap();
        let entry = LsjNormalizer::default().normalize(&record, "").unwrap();
        assert_eq!(entry.gender, Some(Gender::Feminine));
        assert_eq!(entry.genitive.as_deref(), Some("-ης"));
    }

    #[test]
    fn omega_headword_without_pos_is_a_verb() {
        let record: LsjRecord = serde_json::from_str(
            r#"{
                "orth": "λύω",
                "gram": "fut. λύσω, aor. ἔλυσα",
                "senses": ["to loosen, to release"]
            }"#,
        )
        .unwrap();
        let entry = LsjNormalizer::default().normalize(&record, "λύω").unwrap();
        assert_eq!(entry.pos, PartOfSpeech::Verb);
        assert_eq!(entry.greek_verb_class, Some(GreekVerbClass::Omega));
        assert_eq!(entry.verb_voice, Some(VerbVoice::Active));

        let pp = entry.greek_principal_parts.unwrap();
        assert_eq!(pp.present, "λύω");
        assert_eq!(pp.future.as_deref(), Some("λύσω"));
        assert_eq!(pp.aorist.as_deref(), Some("ἔλυσα"));
    }

    #[test]
    fn mai_headword_defaults_to_deponent() {
        let record: LsjRecord = serde_json::from_str(
            r#"{
                "orth": "βούλομαι",
                "pos": "verb",
                "senses": ["to wish, to want"]
            }"#,
        )
        .unwrap();
        let entry = LsjNormalizer::default().normalize(&record, "βούλομαι").unwrap();
        assert_eq!(entry.verb_voice, Some(VerbVoice::Deponent));
    }

    #[test]
    fn structured_parts_map_is_preferred() {
        let record: LsjRecord = serde_json::from_str(
            r#"{
                "orth": "παιδεύω",
                "pos": "verb",
                "gram": "fut. wrong",
                "principal_parts": {"present": "παιδεύω", "future": "παιδεύσω", "perfect": "πεπαίδευκα"},
                "senses": ["to teach, to educate"]
            }"#,
        )
        .unwrap();
        let entry = LsjNormalizer::default().normalize(&record, "").unwrap();
        let pp = entry.greek_principal_parts.unwrap();
        assert_eq!(pp.future.as_deref(), Some("παιδεύσω"));
        assert_eq!(pp.perfect_active.as_deref(), Some("πεπαίδευκα"));
    }

    #[test]
    fn dialect_marker_is_extracted() {
        let record: LsjRecord = serde_json::from_str(
            r#"{
                "orth": "νηῦς",
                "pos": "noun",
                "gram": "ἡ, Ion. for ναῦς",
                "senses": ["ship"]
            }"#,
        )
        .unwrap();
        let entry = LsjNormalizer::default().normalize(&record, "").unwrap();
        assert_eq!(entry.dialect, Some(GreekDialect::Ionic));
    }

    #[test]
    fn singular_definition_fallback_is_used() {
        let record: LsjRecord = serde_json::from_str(
            r#"{"orth": "καί", "pos": "conjunction", "definition": "and, also, even"}"#,
        )
        .unwrap();
        let entry = LsjNormalizer::default().normalize(&record, "καί").unwrap();
        assert_eq!(entry.senses, vec!["and, also, even"]);
    }

    #[test]
    fn record_without_senses_is_rejected() {
        let record: LsjRecord =
            serde_json::from_str(r#"{"orth": "λόγος", "pos": "noun"}"#).unwrap();
        assert!(LsjNormalizer::default().normalize(&record, "λόγος").is_none());
    }
}
