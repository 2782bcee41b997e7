//! Per-language lemma normalization: the shared lookup-key transform.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::entry::Language;

/// Canonical decomposition followed by combining-mark removal. Strips Latin
/// macrons/breves and Greek accents, breathings and iota subscripts alike.
fn strip_combining(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

/// Latin lookup key: lowercase, no diacritics, classical orthography
/// (j folded to i, v to u), trailing homograph digits dropped.
pub fn normalize_latin(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = strip_combining(&lowered);
    let folded: String = stripped
        .chars()
        .map(|c| match c {
            'j' => 'i',
            'v' => 'u',
            other => other,
        })
        .collect();
    folded
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .trim()
        .to_string()
}

/// Greek lookup key: no accents/breathings, lowercase.
pub fn normalize_greek(text: &str) -> String {
    strip_combining(text).to_lowercase().trim().to_string()
}

pub fn normalize(language: Language, text: &str) -> String {
    match language {
        Language::Latin => normalize_latin(text),
        Language::Greek => normalize_greek(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin_normalization_is_deterministic() {
        assert_eq!(normalize_latin("AMŌ"), "amo");
        assert_eq!(normalize_latin("amo"), "amo");
        assert_eq!(normalize_latin("AMŌ"), normalize_latin("amo"));
    }

    #[test]
    fn latin_folds_classical_orthography() {
        assert_eq!(normalize_latin("Jūlius"), "iulius");
        assert_eq!(normalize_latin("vīvō"), "uiuo");
    }

    #[test]
    fn latin_strips_homograph_digits() {
        assert_eq!(normalize_latin("occido2"), "occido");
    }

    #[test]
    fn greek_strips_accents_and_breathings() {
        assert_eq!(normalize_greek("ἄνθρωπος"), "ανθρωπος");
        assert_eq!(normalize_greek("λύω"), "λυω");
    }

    #[test]
    fn greek_strips_iota_subscript() {
        assert_eq!(normalize_greek("τῷ"), "τω");
    }
}
