//! Raw source-record shapes, one per dictionary source.
//!
//! Every field is optional or defaulted: a missing field degrades to an
//! unset attribute downstream, never an error.

use serde::{Deserialize, Serialize};

/// Scholarly dictionaries nest senses arbitrarily: bare strings, lists of
/// sub-senses, and objects carrying the text under varying keys.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum SenseNode {
    Text(String),
    List(Vec<SenseNode>),
    Obj {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        definition: Option<String>,
        #[serde(default)]
        sense: Option<String>,
    },
}

impl SenseNode {
    fn collect_into(&self, out: &mut Vec<String>) {
        match self {
            SenseNode::Text(s) => out.push(s.clone()),
            SenseNode::List(items) => {
                for item in items {
                    item.collect_into(out);
                }
            }
            SenseNode::Obj {
                text,
                definition,
                sense,
            } => {
                if let Some(s) = text.as_ref().or(definition.as_ref()).or(sense.as_ref()) {
                    out.push(s.clone());
                }
            }
        }
    }
}

/// Depth-first flattening of a nested sense tree into plain strings.
pub fn flatten_senses(nodes: &[SenseNode]) -> Vec<String> {
    let mut out = Vec::new();
    for node in nodes {
        node.collect_into(&mut out);
    }
    out
}

/// Parser-backed Latin record: stems plus morphological class codes.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct WhitakersRecord {
    /// Word type code: N, V, ADJ, ADV, PREP, CONJ, PRON, INTERJ, NUM,
    /// VPAR, SUPINE, PACK, TACKON, PREFIX, SUFFIX, X.
    #[serde(default)]
    pub word_type: String,

    #[serde(default)]
    pub senses: Vec<String>,

    /// Root stems: [present, infinitive, perfect, supine] for verbs,
    /// [nominative stem, oblique stem] for nominals.
    #[serde(default)]
    pub roots: Vec<String>,

    /// Declension or conjugation numbers; the first entry is authoritative.
    #[serde(default)]
    pub category: Vec<u8>,

    /// Form codes; the first entry carries the gender for nominals.
    #[serde(default)]
    pub form: Vec<String>,
}

/// Scholarly Latin record (Lewis & Short shape).
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LewisShortRecord {
    /// Lookup key, may carry a trailing homograph digit ("occido2").
    #[serde(default)]
    pub key: String,

    /// Diacritic-bearing citation form ("ămō").
    #[serde(default)]
    pub title_orthography: Option<String>,

    #[serde(default)]
    pub part_of_speech: Option<String>,

    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default)]
    pub title_genitive: Option<String>,

    #[serde(default)]
    pub declension: Option<u8>,

    /// Free-text grammar notes: "ămō, āvi, ātum, 1, v. a.".
    #[serde(default)]
    pub main_notes: Option<String>,

    #[serde(default)]
    pub senses: Vec<SenseNode>,
}

/// Structured principal-parts map as some Greek sources supply it.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct GreekPartsMap {
    #[serde(default)]
    pub present: Option<String>,

    #[serde(default)]
    pub future: Option<String>,

    #[serde(default)]
    pub aorist: Option<String>,

    #[serde(default)]
    pub perfect_active: Option<String>,

    /// Some partitions use "perfect" for the active form.
    #[serde(default)]
    pub perfect: Option<String>,

    #[serde(default)]
    pub perfect_middle: Option<String>,

    /// Alternate key for the middle/passive perfect.
    #[serde(default)]
    pub perfect_mp: Option<String>,

    #[serde(default)]
    pub aorist_passive: Option<String>,
}

/// Scholarly Greek record (LSJ shape).
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LsjRecord {
    /// Diacritic-bearing citation form ("λόγος").
    #[serde(default)]
    pub orth: Option<String>,

    #[serde(default)]
    pub headword: Option<String>,

    #[serde(default)]
    pub pos: Option<String>,

    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default)]
    pub genitive: Option<String>,

    /// Free-text grammar notes: "ἡ, gen. -ου, fut. λύσω, aor. ἔλυσα".
    #[serde(default)]
    pub gram: Option<String>,

    #[serde(default)]
    pub declension: Option<serde_json::Value>,

    #[serde(default)]
    pub senses: Vec<SenseNode>,

    /// Alternate key some partitions use instead of `senses`.
    #[serde(default)]
    pub definitions: Vec<SenseNode>,

    /// Singular fallback used when both lists are empty.
    #[serde(default)]
    pub sense: Option<String>,

    #[serde(default)]
    pub definition: Option<String>,

    #[serde(default)]
    pub principal_parts: Option<GreekPartsMap>,
}

/// Networked morphological-service record; senses are supplied separately
/// by the caller since the service itself returns only morphology.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct MorpheusRecord {
    #[serde(default)]
    pub lemma: String,

    #[serde(default)]
    pub hdwd: Option<String>,

    #[serde(default)]
    pub stem: Option<String>,

    #[serde(default)]
    pub pos: Option<String>,

    #[serde(default)]
    pub gender: Option<String>,

    /// Declension as the service sends it: a bare number or a string
    /// like "3rd".
    #[serde(default)]
    pub decl: Option<serde_json::Value>,

    #[serde(default)]
    pub voice: Option<String>,

    #[serde(default)]
    pub verb_class: Option<String>,

    #[serde(default)]
    pub genitive: Option<String>,

    #[serde(default)]
    pub principal_parts: Option<GreekPartsMap>,
}

/// Pull a single declension digit out of either representation.
pub fn declension_digit(value: &serde_json::Value) -> Option<u8> {
    match value {
        serde_json::Value::Number(n) => {
            let d = n.as_u64()?;
            u8::try_from(d).ok()
        }
        serde_json::Value::String(s) => {
            s.chars().find(|c| c.is_ascii_digit()).map(|c| c as u8 - b'0')
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_handles_mixed_nesting() {
        let nodes: Vec<SenseNode> = serde_json::from_str(
            r#"["to love", ["to like", {"text": "to be fond of"}], {"definition": "to cherish"}]"#,
        )
        .unwrap();
        assert_eq!(
            flatten_senses(&nodes),
            vec!["to love", "to like", "to be fond of", "to cherish"]
        );
    }

    #[test]
    fn missing_fields_default() {
        let rec: LewisShortRecord = serde_json::from_str(r#"{"key": "amo"}"#).unwrap();
        assert_eq!(rec.key, "amo");
        assert!(rec.main_notes.is_none());
        assert!(rec.senses.is_empty());
    }

    #[test]
    fn declension_digit_accepts_both_shapes() {
        assert_eq!(declension_digit(&serde_json::json!(3)), Some(3));
        assert_eq!(declension_digit(&serde_json::json!("3rd")), Some(3));
        assert_eq!(declension_digit(&serde_json::json!(null)), None);
    }

    #[test]
    fn whitakers_record_tolerates_sparse_input() {
        let rec: WhitakersRecord = serde_json::from_str(
            r#"{"word_type": "V", "roots": ["am", "am", "amav", "amat"], "category": [1], "senses": ["to love"]}"#,
        )
        .unwrap();
        assert_eq!(rec.word_type, "V");
        assert_eq!(rec.category[0], 1);
        assert!(rec.form.is_empty());
    }
}
