//! Headword reconstruction from bare stems.
//!
//! Dictionary parsers hand back truncated stems plus a morphological class;
//! these tables rebuild the citation form. Latin follows the
//! conjugation/declension paradigm tables, Greek follows Morpheus stem-type
//! conventions, and the forms neither can derive (pronouns, a handful of
//! irregular Greek nominals) go through direct lookup tables.

use crate::model::entry::{Gender, GreekVerbClass, LatinStemType};
use crate::normalizers::lemma;

/// Conjugation number to 1st sg present active ending.
pub fn latin_verb_headword(stem: &str, conjugation: Option<u8>) -> String {
    if stem.is_empty() {
        return String::new();
    }
    let ending = match conjugation {
        Some(2) => "eo",
        Some(4) | Some(5) => "io",
        // 1st, 3rd and the irregular classes all cite in bare -o.
        _ => "o",
    };
    format!("{stem}{ending}")
}

/// Present active infinitive from the infinitive stem.
pub fn latin_infinitive(stem: &str, conjugation: Option<u8>) -> String {
    if stem.is_empty() {
        return String::new();
    }
    let ending = match conjugation {
        Some(1) => "āre",
        Some(2) => "ēre",
        Some(3) => "ere",
        Some(4) => "īre",
        _ => "re",
    };
    format!("{stem}{ending}")
}

/// Nominative singular ending by declension and gender. Third declension is
/// resolved separately by stem-final pattern.
fn latin_noun_ending(declension: u8, gender: Option<Gender>) -> &'static str {
    match (declension, gender) {
        (1, _) => "a",
        (2, Some(Gender::Neuter)) => "um",
        (2, _) => "us",
        (4, Some(Gender::Neuter)) => "u",
        (4, _) => "us",
        (5, _) => "es",
        _ => "",
    }
}

pub fn latin_noun_headword(stem: &str, declension: Option<u8>, gender: Option<Gender>) -> String {
    let Some(decl) = declension else {
        return stem.to_string();
    };
    if decl == 3 {
        return latin_third_decl_noun(stem, gender);
    }
    let ending = latin_noun_ending(decl, gender);
    if !ending.is_empty() && !stem.ends_with(ending) {
        return format!("{stem}{ending}");
    }
    stem.to_string()
}

/// Third-declension nominative by stem-final letters.
///
/// Velars take -x, dentals take -s, -on/-in stems cite in -o, agent nouns in
/// -or and neuter -us/-ur/-er/-en/-ar stems cite as the bare stem.
fn latin_third_decl_noun(stem: &str, gender: Option<Gender>) -> String {
    if stem.is_empty() {
        return stem.to_string();
    }
    let lower = stem.to_lowercase();

    if lower.ends_with("or") {
        return stem.to_string();
    }
    if (lower.ends_with("on") || lower.ends_with("in")) && stem.len() > 2 {
        let mut s = stem[..stem.len() - 2].to_string();
        s.push('o');
        return s;
    }
    if (lower.ends_with('c') || lower.ends_with('g')) && stem.len() > 1 {
        let mut s = stem[..stem.len() - 1].to_string();
        s.push('x');
        return s;
    }
    if (lower.ends_with('d') || lower.ends_with('t')) && stem.len() > 1 {
        let mut s = stem[..stem.len() - 1].to_string();
        s.push('s');
        return s;
    }
    if lower.ends_with("men") {
        return stem.to_string();
    }
    if gender == Some(Gender::Neuter)
        && ["us", "ur", "er", "en", "ar"].iter().any(|e| lower.ends_with(e))
    {
        return stem.to_string();
    }
    // Many third-declension nominatives equal the stem (consul, pater).
    stem.to_string()
}

pub fn latin_adjective_headword(stem: &str, declension: Option<u8>) -> String {
    match declension {
        // 1st/2nd declension: bonus, -a, -um.
        Some(1) | Some(2) | None => {
            if !stem.ends_with("us") && !stem.ends_with("er") {
                format!("{stem}us")
            } else {
                stem.to_string()
            }
        }
        // 3rd declension two-termination: fortis, -e. One-termination forms
        // (felix, prudens) already end in -x or -ns.
        Some(3) => {
            if !["is", "x", "ns", "rs"].iter().any(|e| stem.ends_with(e)) {
                format!("{stem}is")
            } else {
                stem.to_string()
            }
        }
        _ => stem.to_string(),
    }
}

/// Pronoun nominatives are not rule-derivable.
const PRONOUN_HEADWORDS: &[(&str, &str)] = &[
    ("ill", "ille"),
    ("hic", "hic"),
    ("h", "hic"),
    ("ips", "ipse"),
    ("ist", "iste"),
    ("id", "is"),
    ("i", "is"),
    ("e", "is"),
    ("qu", "qui"),
    ("qui", "qui"),
    ("quae", "qui"),
    ("quod", "qui"),
    ("ali", "aliquis"),
    ("aliqu", "aliquis"),
    ("quidam", "quidam"),
    ("quicumqu", "quicumque"),
    ("quicunqu", "quicumque"),
    ("quisqu", "quisque"),
    ("quisquam", "quisquam"),
    ("quis", "quis"),
    ("uter", "uter"),
    ("neuter", "neuter"),
    ("null", "nullus"),
    ("sol", "solus"),
    ("tot", "totus"),
    ("un", "unus"),
    ("nos", "nos"),
    ("vos", "vos"),
    ("ego", "ego"),
    ("eg", "ego"),
    ("me", "meus"),
    ("se", "sui"),
    ("su", "sui"),
    ("sui", "sui"),
    ("sib", "sui"),
    ("nostr", "noster"),
    ("vestr", "vester"),
    ("meus", "meus"),
    ("tuus", "tuus"),
    ("tu", "tuus"),
    ("suus", "suus"),
];

/// Exact lookup first, then prefix matching either direction for compound
/// and truncated pronoun stems, else the stem itself.
pub fn latin_pronoun_headword(stem: &str) -> String {
    let lower = stem.to_lowercase();
    if let Some((_, head)) = PRONOUN_HEADWORDS.iter().find(|(k, _)| *k == lower) {
        return (*head).to_string();
    }
    for (key, head) in PRONOUN_HEADWORDS {
        if lower.starts_with(key) || key.starts_with(&lower) {
            return (*head).to_string();
        }
    }
    stem.to_string()
}

/// Genitive singular ending by declension.
pub fn latin_genitive(declension: u8) -> Option<&'static str> {
    match declension {
        1 => Some("-ae"),
        2 => Some("-ī"),
        3 => Some("-is"),
        4 => Some("-ūs"),
        5 => Some("-ēī"),
        _ => None,
    }
}

pub fn latin_stem_type(declension: u8, gender: Option<Gender>) -> Option<LatinStemType> {
    match (declension, gender?) {
        (1, Gender::Feminine) | (1, Gender::Masculine) => Some(LatinStemType::AAe),
        (2, Gender::Masculine) => Some(LatinStemType::UsI),
        (2, Gender::Neuter) => Some(LatinStemType::UmI),
        (4, Gender::Masculine) | (4, Gender::Feminine) => Some(LatinStemType::UsUs),
        (4, Gender::Neuter) => Some(LatinStemType::UUs),
        (5, Gender::Feminine) | (5, Gender::Masculine) => Some(LatinStemType::EsEi),
        _ => None,
    }
}

/// Irregular Greek nominals whose citation forms bypass the regular rules.
/// Keys are accent-stripped lowercase stems.
const GREEK_IRREGULAR_NOMINALS: &[(&str, &str)] = &[
    ("γυναικ", "γυνή"),
    ("ανδρ", "ἀνήρ"),
    ("πατρ", "πατήρ"),
    ("μητρ", "μήτηρ"),
    ("θυγατρ", "θυγάτηρ"),
    ("αστρ", "ἀστήρ"),
    ("κυν", "κύων"),
    ("υδατ", "ὕδωρ"),
    ("πυρ", "πῦρ"),
    ("ναυ", "ναῦς"),
    ("βου", "βοῦς"),
    ("ζευ", "Ζεύς"),
    ("χειρ", "χείρ"),
];

pub fn greek_irregular_nominal(stem: &str) -> Option<&'static str> {
    let key = lemma::normalize_greek(stem);
    GREEK_IRREGULAR_NOMINALS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, head)| *head)
}

pub fn greek_noun_headword(stem: &str, declension: Option<u8>, gender: Option<Gender>) -> String {
    if stem.is_empty() {
        return stem.to_string();
    }
    if let Some(head) = greek_irregular_nominal(stem) {
        return head.to_string();
    }
    match declension {
        Some(1) => {
            // Feminines cite in -α/-η, masculines in -ας/-ης.
            let ending = match gender {
                Some(Gender::Masculine) => "ας",
                Some(Gender::Feminine) => "α",
                _ => "η",
            };
            format!("{stem}{ending}")
        }
        Some(2) => {
            let ending = match gender {
                Some(Gender::Neuter) => "ον",
                _ => "ος",
            };
            format!("{stem}{ending}")
        }
        Some(3) => greek_third_decl_noun(stem),
        _ => stem.to_string(),
    }
}

/// Third-declension nominative by stem-final pattern: velars take -ξ,
/// labials -ψ, dentals drop and take -ς, -ντ stems lengthen, ν/ρ stems cite
/// as the bare stem, -εσ neuters cite in -ος, vowel stems append -ς.
fn greek_third_decl_noun(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    if n == 0 {
        return stem.to_string();
    }

    let take = |count: usize| -> String { chars[..n - count].iter().collect() };
    let last = chars[n - 1];
    let last_two: String = if n >= 2 { chars[n - 2..].iter().collect() } else { String::new() };

    match last {
        'τ' | 'δ' | 'θ' if last_two != "ντ" => format!("{}ς", take(1)),
        'π' | 'β' | 'φ' => format!("{}ψ", take(1)),
        'κ' | 'γ' | 'χ' => format!("{}ξ", take(1)),
        _ if last_two == "ντ" => {
            // Compensatory lengthening before the lost dental.
            let base: String = chars[..n - 2].iter().collect();
            if base.ends_with('α') {
                let trimmed: String = base.chars().take(base.chars().count() - 1).collect();
                format!("{trimmed}ᾱς")
            } else if base.ends_with('ο') {
                let trimmed: String = base.chars().take(base.chars().count() - 1).collect();
                format!("{trimmed}ους")
            } else {
                format!("{base}ς")
            }
        }
        'ν' | 'ρ' => stem.to_string(),
        _ if last_two == "εσ" => format!("{}ος", take(2)),
        'ι' | 'υ' => format!("{stem}ς"),
        _ => stem.to_string(),
    }
}

pub fn greek_adjective_headword(stem: &str) -> String {
    if stem.is_empty() {
        return stem.to_string();
    }
    if stem.ends_with("εσ") {
        let base: String = stem.chars().take(stem.chars().count() - 2).collect();
        return format!("{base}ης");
    }
    if stem.ends_with("ον") {
        let base: String = stem.chars().take(stem.chars().count() - 2).collect();
        return format!("{base}ων");
    }
    if stem.ends_with('υ') {
        return format!("{stem}ς");
    }
    if !["ος", "ης", "υς", "ων"].iter().any(|e| stem.ends_with(e)) {
        return format!("{stem}ος");
    }
    stem.to_string()
}

/// Athematic verb stems recognizable by prefix, compared accent-stripped.
const MI_VERB_STEM_PREFIXES: &[&str] = &["τιθ", "διδ", "ιστ", "ι"];

pub fn greek_verb_headword(stem: &str, explicit_mi: bool) -> String {
    if stem.is_empty() {
        return stem.to_string();
    }
    if stem.ends_with("μι") || stem.ends_with("ομαι") || stem.ends_with("μαι") {
        return stem.to_string();
    }
    let bare = lemma::normalize_greek(stem);
    let vowel_final = bare.ends_with(['η', 'ι', 'υ', 'ω']);
    if (explicit_mi || vowel_final)
        && MI_VERB_STEM_PREFIXES.iter().any(|p| bare.starts_with(p))
    {
        return format!("{stem}μι");
    }
    if stem.ends_with('ω') {
        return stem.to_string();
    }
    format!("{stem}ω")
}

/// Verb class from the citation form. The -μι check runs before the
/// contract checks, and those before plain -ω, since every contract verb
/// also ends in ω.
pub fn greek_verb_class(headword: &str) -> Option<GreekVerbClass> {
    if headword.is_empty() {
        return None;
    }
    if headword.ends_with("μι") {
        return Some(GreekVerbClass::Mi);
    }
    if headword.ends_with("άω") || headword.ends_with("αω") {
        return Some(GreekVerbClass::ContractAlpha);
    }
    if headword.ends_with("έω") || headword.ends_with("εω") {
        return Some(GreekVerbClass::ContractEpsilon);
    }
    if headword.ends_with("όω") || headword.ends_with("οω") {
        return Some(GreekVerbClass::ContractOmicron);
    }
    if headword.ends_with('ω') {
        return Some(GreekVerbClass::Omega);
    }
    None
}

/// Inferred genitive ending when the source supplies none.
pub fn greek_genitive(declension: u8, gender: Option<Gender>) -> Option<&'static str> {
    match declension {
        1 => {
            if gender == Some(Gender::Feminine) {
                Some("-ης")
            } else {
                Some("-ου")
            }
        }
        2 => Some("-ου"),
        3 => Some("-ος"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_declension_nouns() {
        assert_eq!(
            latin_noun_headword("domin", Some(2), Some(Gender::Masculine)),
            "dominus"
        );
        assert_eq!(
            latin_noun_headword("bell", Some(2), Some(Gender::Neuter)),
            "bellum"
        );
    }

    #[test]
    fn third_declension_velar_stem() {
        assert_eq!(
            latin_noun_headword("reg", Some(3), Some(Gender::Masculine)),
            "rex"
        );
    }

    #[test]
    fn third_declension_patterns() {
        assert_eq!(latin_third_decl_noun("ped", Some(Gender::Masculine)), "pes");
        assert_eq!(latin_third_decl_noun("homin", Some(Gender::Masculine)), "homo");
        assert_eq!(latin_third_decl_noun("orator", Some(Gender::Masculine)), "orator");
        assert_eq!(latin_third_decl_noun("nomen", Some(Gender::Neuter)), "nomen");
        assert_eq!(latin_third_decl_noun("consul", Some(Gender::Masculine)), "consul");
    }

    #[test]
    fn verb_headwords_by_conjugation() {
        assert_eq!(latin_verb_headword("am", Some(1)), "amo");
        assert_eq!(latin_verb_headword("mon", Some(2)), "moneo");
        assert_eq!(latin_verb_headword("aud", Some(4)), "audio");
        assert_eq!(latin_verb_headword("fer", None), "fero");
    }

    #[test]
    fn infinitives_by_conjugation() {
        assert_eq!(latin_infinitive("am", Some(1)), "amāre");
        assert_eq!(latin_infinitive("mon", Some(2)), "monēre");
        assert_eq!(latin_infinitive("reg", Some(3)), "regere");
        assert_eq!(latin_infinitive("aud", Some(4)), "audīre");
    }

    #[test]
    fn pronouns_use_lookup_with_prefix_fallback() {
        assert_eq!(latin_pronoun_headword("ill"), "ille");
        assert_eq!(latin_pronoun_headword("quicumqu"), "quicumque");
        // Unknown stem with a known prefix still resolves.
        assert_eq!(latin_pronoun_headword("illanostra"), "ille");
    }

    #[test]
    fn adjectives_default_to_first_second_paradigm() {
        assert_eq!(latin_adjective_headword("bon", Some(1)), "bonus");
        assert_eq!(latin_adjective_headword("fort", Some(3)), "fortis");
        assert_eq!(latin_adjective_headword("felix", Some(3)), "felix");
    }

    #[test]
    fn greek_irregulars_bypass_rules() {
        assert_eq!(
            greek_noun_headword("ανδρ", Some(3), Some(Gender::Masculine)),
            "ἀνήρ"
        );
        assert_eq!(
            greek_noun_headword("γυναικ", Some(3), Some(Gender::Feminine)),
            "γυνή"
        );
    }

    #[test]
    fn greek_regular_declensions() {
        assert_eq!(
            greek_noun_headword("λογ", Some(2), Some(Gender::Masculine)),
            "λογος"
        );
        assert_eq!(
            greek_noun_headword("εργ", Some(2), Some(Gender::Neuter)),
            "εργον"
        );
        assert_eq!(
            greek_noun_headword("χωρ", Some(1), Some(Gender::Feminine)),
            "χωρα"
        );
    }

    #[test]
    fn greek_third_declension_stem_patterns() {
        assert_eq!(greek_third_decl_noun("φυλακ"), "φυλαξ");
        assert_eq!(greek_third_decl_noun("ελπιδ"), "ελπις");
        assert_eq!(greek_third_decl_noun("Αιθιοπ"), "Αιθιοψ");
        assert_eq!(greek_third_decl_noun("γενεσ"), "γενος");
        assert_eq!(greek_third_decl_noun("δαιμον"), "δαιμον");
        assert_eq!(greek_third_decl_noun("πολι"), "πολις");
    }

    #[test]
    fn greek_verb_class_checks_mi_before_contracts() {
        assert_eq!(greek_verb_class("δίδωμι"), Some(GreekVerbClass::Mi));
        assert_eq!(greek_verb_class("τιμάω"), Some(GreekVerbClass::ContractAlpha));
        assert_eq!(greek_verb_class("ποιέω"), Some(GreekVerbClass::ContractEpsilon));
        assert_eq!(greek_verb_class("δηλόω"), Some(GreekVerbClass::ContractOmicron));
        assert_eq!(greek_verb_class("λύω"), Some(GreekVerbClass::Omega));
    }

    #[test]
    fn greek_verb_headword_reconstruction() {
        assert_eq!(greek_verb_headword("λυ", false), "λυω");
        assert_eq!(greek_verb_headword("διδω", false), "διδωμι");
        assert_eq!(greek_verb_headword("λύω", false), "λύω");
    }

    #[test]
    fn genitive_tables() {
        assert_eq!(latin_genitive(1), Some("-ae"));
        assert_eq!(latin_genitive(4), Some("-ūs"));
        assert_eq!(greek_genitive(1, Some(Gender::Feminine)), Some("-ης"));
        assert_eq!(greek_genitive(1, Some(Gender::Masculine)), Some("-ου"));
        assert_eq!(greek_genitive(3, None), Some("-ος"));
    }
}
