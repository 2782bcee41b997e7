//! Sense-cleaning pipeline for scholarly dictionary prose.
//!
//! An ordered list of independent pattern rules run in sequence: citation
//! runs, numeric references, cross-references, long parentheticals,
//! editorial brackets, sub-sense enumerators, punctuation artifacts. Each
//! rule is testable on its own; the order matters only where noted.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::entry::Language;

/// Length ceiling for a cleaned sense.
pub const MAX_SENSE_LEN: usize = 200;

/// A truncation delimiter only counts when the text before it is at least
/// this long, so "adv." is never mistaken for a whole definition.
const MIN_INFORMATIVE_PREFIX: usize = 20;

/// Fragments at or below this length are dropped entirely.
const MIN_SENSE_LEN: usize = 2;

static LATIN_CITATIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:Cic\.|Verg\.|Hor\.|Ov\.|Plaut\.|Ter\.|Sall\.|Liv\.|Tac\.|Plin\.|Quint\.|Juv\.|Mart\.|Sen\.|Caes\.|Nep\.|Gell\.|Vulg\.|Lucr\.|Cat\.|Col\.|Suet\.|Val\.|Stat\.|Prop\.|Tib\.|Petr\.|Apul\.|Fest\.)[^;,]*[;,]?\s*",
    )
    .unwrap()
});

static GREEK_CITATIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:Hom\.|Il\.|Od\.|Hes\.|Th\.|Hdt\.|Thuc\.|Xen\.|Pl\.|Plat\.|Arist\.|Ar\.|Aesch\.|Soph\.|Eur\.|Dem\.|Isoc\.|Lys\.|Pind\.|Plut\.|Dion\.|Polyb\.|Diod\.|Strabo|Paus\.|Athen\.|LXX|NT|Ev\.|Act\.|Ep\.)[^;,]*[;,]?\s*",
    )
    .unwrap()
});

static LATIN_REFERENCES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:ib\.|l\.\s*c\.|id\.|al\.|sq\.|sqq\.)\s*|\b\d+,\s*\d+(?:,\s*\d+)*\b").unwrap()
});

static GREEK_REFERENCES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:ib\.|l\.\s*c\.|id\.|al\.|sq\.|sqq\.|v\.\s*l\.)\s*|\b\d+\.\d+(?:\.\d+)*\b|\b[A-Z]\.\s*\d+",
    )
    .unwrap()
});

static CROSS_REF_SUB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bv\.\s+sub\s+[^\s,;.]+").unwrap());

static V_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bv\.\s+[^,;.]+[,;.]?\s*").unwrap());

static CF_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bcf\.\s+[^,;.]+[,;.]?\s*").unwrap());

/// Length-gated: short helpful parentheticals survive.
static LONG_PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]{50,}\)").unwrap());

static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]+\]").unwrap());

/// Greek script embedded in Latin dictionary prose.
static GREEK_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[Ͱ-Ͽἀ-῿]+").unwrap());

/// Latin equivalents quoted in Greek dictionary prose.
static LATIN_GLOSS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bLat\.\s+[^\s,;]+").unwrap());

static TRAILING_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[;:,]\s*$").unwrap());
static LEADING_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[;:,]\s*").unwrap());
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static ENUM_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[a-z]\)\s*").unwrap());
static ENUM_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\)\s*").unwrap());
static ENUM_ROMAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[IVX]+\.\s*").unwrap());
static ENUM_SECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[AB]\.\s*").unwrap());

/// One pattern→replacement step of the pipeline.
pub struct CleanRule {
    pub name: &'static str,
    pattern: &'static Lazy<Regex>,
    replacement: &'static str,
}

impl CleanRule {
    pub fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, self.replacement).into_owned()
    }
}

static LATIN_RULES: &[CleanRule] = &[
    CleanRule { name: "citations", pattern: &LATIN_CITATIONS, replacement: "" },
    CleanRule { name: "references", pattern: &LATIN_REFERENCES, replacement: "" },
    CleanRule { name: "greek_text", pattern: &GREEK_TEXT, replacement: "" },
    CleanRule { name: "long_parenthetical", pattern: &LONG_PARENTHETICAL, replacement: "" },
    CleanRule { name: "bracketed", pattern: &BRACKETED, replacement: "" },
    CleanRule { name: "v_reference", pattern: &V_REFERENCE, replacement: "" },
    CleanRule { name: "cf_reference", pattern: &CF_REFERENCE, replacement: "" },
    CleanRule { name: "trailing_punct", pattern: &TRAILING_PUNCT, replacement: "" },
    CleanRule { name: "leading_punct", pattern: &LEADING_PUNCT, replacement: "" },
    CleanRule { name: "multi_space", pattern: &MULTI_SPACE, replacement: " " },
    CleanRule { name: "enum_letter", pattern: &ENUM_LETTER, replacement: "" },
    CleanRule { name: "enum_digit", pattern: &ENUM_DIGIT, replacement: "" },
    CleanRule { name: "enum_roman", pattern: &ENUM_ROMAN, replacement: "" },
];

static GREEK_RULES: &[CleanRule] = &[
    CleanRule { name: "citations", pattern: &GREEK_CITATIONS, replacement: "" },
    CleanRule { name: "references", pattern: &GREEK_REFERENCES, replacement: "" },
    CleanRule { name: "cross_ref_sub", pattern: &CROSS_REF_SUB, replacement: "" },
    CleanRule { name: "long_parenthetical", pattern: &LONG_PARENTHETICAL, replacement: "" },
    CleanRule { name: "bracketed", pattern: &BRACKETED, replacement: "" },
    CleanRule { name: "latin_gloss", pattern: &LATIN_GLOSS, replacement: "" },
    CleanRule { name: "trailing_punct", pattern: &TRAILING_PUNCT, replacement: "" },
    CleanRule { name: "leading_punct", pattern: &LEADING_PUNCT, replacement: "" },
    CleanRule { name: "multi_space", pattern: &MULTI_SPACE, replacement: " " },
    CleanRule { name: "enum_letter", pattern: &ENUM_LETTER, replacement: "" },
    CleanRule { name: "enum_digit", pattern: &ENUM_DIGIT, replacement: "" },
    CleanRule { name: "enum_roman", pattern: &ENUM_ROMAN, replacement: "" },
    CleanRule { name: "enum_section", pattern: &ENUM_SECTION, replacement: "" },
];

pub fn rules_for(language: Language) -> &'static [CleanRule] {
    match language {
        Language::Latin => LATIN_RULES,
        Language::Greek => GREEK_RULES,
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Cap an over-long sense at the last natural break, else hard-truncate.
///
/// Tries the delimiters in order; a split only wins when the text before the
/// delimiter is informative on its own and fits under the ceiling. The
/// hard-truncation fallback strips
/// whatever stray punctuation the cut left behind.
fn truncate_sense(text: &str) -> String {
    if char_len(text) <= MAX_SENSE_LEN {
        return text.to_string();
    }

    for delimiter in [";", ":", "—", "–"] {
        // Last split point whose prefix still fits under the ceiling.
        let mut best: Option<&str> = None;
        for (idx, _) in text.match_indices(delimiter) {
            let head = &text[..idx];
            let len = char_len(head);
            if len > MIN_INFORMATIVE_PREFIX && len <= MAX_SENSE_LEN {
                best = Some(head);
            }
        }
        if let Some(head) = best {
            return head.trim().to_string();
        }
    }

    let cut: String = text.chars().take(MAX_SENSE_LEN).collect();
    cut.trim_end()
        .trim_end_matches([',', ';', ':', '.', '-', '—', '–'])
        .trim_end()
        .to_string()
}

/// Run the full pipeline over one scholarly sense.
///
/// Returns None when nothing informative survives.
pub fn clean_sense(language: Language, sense: &str) -> Option<String> {
    let mut text = sense.to_string();
    for rule in rules_for(language) {
        text = rule.apply(&text);
    }
    let text = truncate_sense(text.trim());
    if char_len(&text) <= MIN_SENSE_LEN {
        return None;
    }
    Some(text)
}

/// Clean a batch of senses, dropping unusable ones and capping the count.
pub fn clean_senses(language: Language, raw: &[String], max_senses: usize) -> Vec<String> {
    raw.iter()
        .filter_map(|s| clean_sense(language, s))
        .take(max_senses)
        .collect()
}

static PARSER_BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").unwrap());

/// Citation parentheses in parser output: "(Cic. Off. 1.2)".
static PARSER_CITATION_PARENS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\([A-Z][a-z]*\.\s+[A-Za-z]+\.?\s*\d+[^)]*\)").unwrap()
});

/// Lighter cleaning for parser-backed senses, which carry editorial
/// brackets and citation parentheses but no scholarly prose apparatus.
pub fn clean_parser_sense(sense: &str) -> String {
    let text = PARSER_BRACKETS.replace_all(sense, "");
    let text = PARSER_CITATION_PARENS.replace_all(&text, "");
    let text = MULTI_SPACE.replace_all(&text, " ");
    let mut cleaned = text.trim().to_string();
    while cleaned.ends_with([',', ';', ':']) {
        cleaned.pop();
        cleaned = cleaned.trim_end().to_string();
    }
    cleaned
}
