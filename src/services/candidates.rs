//! Ranked alternative-lemma candidates for failed Latin lookups.
//!
//! The upstream analyzer sometimes hands back an oblique form instead of
//! a dictionary lemma. These heuristics undo the most common inflections
//! so the full source chain can be retried per candidate, in order.

/// Enclitics the analyzer occasionally leaves attached.
const ENCLITICS: &[&str] = &["que", "ne", "ve"];

/// Oblique suffix → replacement nominatives/lemmas, most specific first.
const SUFFIX_SUBSTITUTIONS: &[(&str, &[&str])] = &[
    ("onis", &["o"]),
    ("inis", &["en", "o"]),
    ("ibus", &["us", "is", "a"]),
    ("orum", &["us", "um"]),
    ("arum", &["a"]),
];

/// Perfect-participle suffix → verb lemmas, vowel-aware forms before the
/// bare consonant-stem fallback.
const PARTICIPLE_SUBSTITUTIONS: &[(&str, &[&str])] = &[
    ("atus", &["o"]),
    ("itus", &["eo", "o"]),
    ("tus", &["o", "eo", "io"]),
];

/// Suffix must leave at least this much stem behind.
const MIN_STEM_LEN: usize = 2;

pub fn latin_candidates(lemma: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |candidate: String, out: &mut Vec<String>| {
        if candidate != lemma && !candidate.is_empty() && !out.contains(&candidate) {
            out.push(candidate);
        }
    };

    for enclitic in ENCLITICS {
        if let Some(stem) = lemma.strip_suffix(enclitic) {
            if stem.len() >= MIN_STEM_LEN {
                push(stem.to_string(), &mut out);
            }
        }
    }

    for (suffix, replacements) in SUFFIX_SUBSTITUTIONS {
        if let Some(stem) = lemma.strip_suffix(suffix) {
            if stem.len() >= MIN_STEM_LEN {
                for r in *replacements {
                    push(format!("{stem}{r}"), &mut out);
                }
            }
        }
    }

    // Perfect-participle form: try the verbs it could come from, the
    // conjugation-characteristic vowel readings first.
    for (suffix, replacements) in PARTICIPLE_SUBSTITUTIONS {
        if let Some(stem) = lemma.strip_suffix(suffix) {
            if stem.len() >= MIN_STEM_LEN {
                for r in *replacements {
                    push(format!("{stem}{r}"), &mut out);
                }
            }
        }
    }

    out
}
