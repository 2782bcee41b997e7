use serde::{Deserialize, Serialize};

/// Languages the normalization engine understands.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Latin,
    Greek,
}

/// Standardized part-of-speech categories.
///
/// Source-specific codes (parser word types, scholarly abbreviations like
/// "v. dep." or "subst.") are mapped onto these by the normalizers.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Conjunction,
    Pronoun,
    Interjection,
    Numeral,
    Particle,
    /// Greek only.
    Article,
    Unknown,
}

impl Default for PartOfSpeech {
    fn default() -> Self {
        PartOfSpeech::Unknown
    }
}

/// Grammatical gender for nominals.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    #[serde(rename = "m")]
    Masculine,
    #[serde(rename = "f")]
    Feminine,
    #[serde(rename = "n")]
    Neuter,
    /// Either masculine or feminine (Latin civis, Greek ὁ/ἡ θεός).
    #[serde(rename = "c")]
    Common,
    #[serde(rename = "x")]
    Unknown,
}

/// Grammatical number, mainly for tracking pluralia tantum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Number {
    #[serde(rename = "sg")]
    Singular,
    #[serde(rename = "pl")]
    Plural,
    /// Greek only, rare.
    #[serde(rename = "du")]
    Dual,
    /// Plural-only nouns: arma, castra, Athenae.
    #[serde(rename = "pl_tantum")]
    PluralOnly,
}

/// Voice categories for Greek and Latin verbs.
///
/// Deponents use passive/middle morphology with active meaning (sequor,
/// ἔρχομαι); semi-deponents mix active and deponent tenses (audeo).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerbVoice {
    Active,
    Passive,
    /// Greek only, distinct from passive.
    Middle,
    Deponent,
    SemiDeponent,
}

/// Greek verb stem classifications.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GreekVerbClass {
    /// Regular thematic verbs (λύω, παιδεύω).
    #[serde(rename = "omega")]
    Omega,
    /// Athematic verbs (δίδωμι, τίθημι, ἵημι, ἵστημι).
    #[serde(rename = "mi")]
    Mi,
    /// Contract verbs in -άω (τιμάω).
    #[serde(rename = "alpha_contract")]
    ContractAlpha,
    /// Contract verbs in -έω (ποιέω).
    #[serde(rename = "epsilon_contract")]
    ContractEpsilon,
    /// Contract verbs in -όω (δηλόω).
    #[serde(rename = "omicron_contract")]
    ContractOmicron,
}

/// Latin noun/adjective stem classifications following Morpheus conventions.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum LatinStemType {
    #[serde(rename = "a_ae")]
    AAe,
    #[serde(rename = "us_i")]
    UsI,
    #[serde(rename = "er_ri")]
    ErRi,
    #[serde(rename = "um_i")]
    UmI,
    #[serde(rename = "ius_ii")]
    IusIi,
    #[serde(rename = "cons_stem")]
    ConsStem,
    #[serde(rename = "x_cis")]
    XCis,
    #[serde(rename = "i_stem_pure")]
    IStemPure,
    #[serde(rename = "i_stem_mixed")]
    IStemMixed,
    #[serde(rename = "us_us")]
    UsUs,
    #[serde(rename = "u_us")]
    UUs,
    #[serde(rename = "es_ei")]
    EsEi,
}

/// Greek noun/adjective stem classifications following Morpheus conventions.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GreekStemType {
    #[serde(rename = "a_as")]
    AAs,
    #[serde(rename = "e_es")]
    EEs,
    #[serde(rename = "os_ou")]
    OsOu,
    #[serde(rename = "on_ou")]
    OnOu,
    #[serde(rename = "cons_stem")]
    ConsStem,
    #[serde(rename = "s_eos")]
    SEos,
    #[serde(rename = "eus_eos")]
    EusEos,
    #[serde(rename = "is_eos")]
    IsEos,
    #[serde(rename = "irregular")]
    Irregular,
}

/// Greek dialect markers for variant forms.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GreekDialect {
    Attic,
    Ionic,
    Homeric,
    Doric,
    Aeolic,
    Koine,
    Epic,
}

/// Structured Latin verb principal parts (the four standard citation forms).
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct LatinPrincipalParts {
    /// 1st sg present active indicative: amō.
    pub present: String,

    /// Present active infinitive: amāre.
    pub infinitive: String,

    /// 1st sg perfect active indicative: amāvī.
    #[serde(default)]
    pub perfect: Option<String>,

    /// Supine or perfect passive participle: amātum.
    #[serde(default)]
    pub supine: Option<String>,

    #[serde(default)]
    pub future_active_participle: Option<String>,

    #[serde(default)]
    pub perfect_passive_participle: Option<String>,
}

/// Structured Greek verb principal parts (up to six tense stems).
///
/// Deponent and defective verbs may lack some parts; verbs with both
/// thematic and athematic forms carry the extras in the optional slots.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct GreekPrincipalParts {
    /// 1st sg present active/middle: λύω.
    pub present: String,

    #[serde(default)]
    pub future: Option<String>,

    #[serde(default)]
    pub aorist: Option<String>,

    #[serde(default)]
    pub perfect_active: Option<String>,

    #[serde(default)]
    pub perfect_middle: Option<String>,

    #[serde(default)]
    pub aorist_passive: Option<String>,

    #[serde(default)]
    pub future_middle: Option<String>,

    /// 2nd aorist when the verb has one (ἔλαβον).
    #[serde(default)]
    pub second_aorist: Option<String>,

    #[serde(default)]
    pub second_perfect: Option<String>,
}

/// Canonical internal representation of a dictionary entry.
///
/// This is the single source of truth after extraction from any dictionary
/// source; rendering consumes this model, never raw source data. Latin- and
/// Greek-specific attributes are optional and POS-conditional; the
/// `validated` constructor enforces the cross-field invariants.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct NormalizedEntry {
    /// Full dictionary form with diacritics/macrons.
    #[serde(default)]
    pub headword: String,

    /// Normalized lookup key (lowercase, diacritics stripped).
    #[serde(default)]
    pub lemma: String,

    pub language: Option<Language>,

    #[serde(default)]
    pub pos: PartOfSpeech,

    /// Cleaned, pedagogical definitions, best first.
    #[serde(default)]
    pub senses: Vec<String>,

    /// Morphological stem, when the source decomposes the form.
    #[serde(default)]
    pub stem: Option<String>,

    /// Inflectional suffix pattern.
    #[serde(default)]
    pub suffix: Option<String>,

    #[serde(default)]
    pub latin_stem_type: Option<LatinStemType>,

    #[serde(default)]
    pub greek_stem_type: Option<GreekStemType>,

    #[serde(default)]
    pub dialect: Option<GreekDialect>,

    #[serde(default)]
    pub gender: Option<Gender>,

    #[serde(default)]
    pub number: Option<Number>,

    /// Declension class, 1-5 for Latin, 1-3 for Greek.
    #[serde(default)]
    pub declension: Option<u8>,

    /// Genitive ending, e.g. "-ae", "-ου".
    #[serde(default)]
    pub genitive: Option<String>,

    /// Greek definite article: ὁ, ἡ, τό.
    #[serde(default)]
    pub article: Option<String>,

    #[serde(default)]
    pub verb_voice: Option<VerbVoice>,

    /// Latin conjugation class; 1-4 regular, 5-9 irregular paradigms.
    #[serde(default)]
    pub conjugation: Option<u8>,

    #[serde(default)]
    pub latin_principal_parts: Option<LatinPrincipalParts>,

    #[serde(default)]
    pub greek_verb_class: Option<GreekVerbClass>,

    #[serde(default)]
    pub greek_principal_parts: Option<GreekPrincipalParts>,

    #[serde(default)]
    pub is_defective: Option<bool>,

    #[serde(default)]
    pub is_irregular: Option<bool>,

    /// Different stems across tenses (ferō/tulī, φέρω/οἴσω).
    #[serde(default)]
    pub is_suppletive: Option<bool>,

    #[serde(default)]
    pub has_second_aorist: Option<bool>,

    #[serde(default)]
    pub has_second_perfect: Option<bool>,

    #[serde(default)]
    pub is_compound: Option<bool>,

    /// Base verb for compounds: ἀπολύω → λύω.
    #[serde(default)]
    pub simplex_form: Option<String>,

    /// Prepositional prefix: ἀπο-, dē-.
    #[serde(default)]
    pub prefix: Option<String>,

    /// Flat principal-parts list kept for older consumers; prefer the
    /// structured fields.
    #[serde(default)]
    pub principal_parts: Option<Vec<String>>,

    /// Dictionary source identifier (whitakers, lewis_short, lsj, morpheus).
    #[serde(default)]
    pub source: String,

    /// Match quality: 1.0 exact, 0.9 spelling variant, 0.7 derived candidate.
    #[serde(default = "default_confidence")]
    pub confidence: f64,

    /// Occurrence count in the current text, merged in by the orchestrator.
    #[serde(default)]
    pub frequency: Option<u32>,

    #[serde(default)]
    pub is_proper_noun: bool,

    /// When this entry was reached through a spelling variant or derived
    /// candidate, the alternative form that actually matched.
    #[serde(default)]
    pub variant_of: Option<String>,
}

fn default_confidence() -> f64 {
    1.0
}

impl NormalizedEntry {
    /// Validate the construction invariants, clamping what can be clamped
    /// and rejecting what cannot.
    ///
    /// Returns None when headword or lemma is empty, no sense survived
    /// cleaning, or a declension/conjugation value is out of range. This is
    /// the only gate entries pass through on their way out of a normalizer.
    pub fn validated(mut self) -> Option<NormalizedEntry> {
        if self.headword.trim().is_empty() || self.lemma.trim().is_empty() {
            return None;
        }
        self.senses.retain(|s| !s.trim().is_empty());
        if self.senses.is_empty() {
            return None;
        }
        if let Some(d) = self.declension {
            if !(1..=5).contains(&d) {
                return None;
            }
        }
        if let Some(c) = self.conjugation {
            if !(1..=9).contains(&c) {
                return None;
            }
        }
        self.confidence = self.confidence.clamp(0.0, 1.0);
        Some(self)
    }

    pub fn has_definition(&self) -> bool {
        !self.senses.is_empty()
    }

    /// The primary (first) definition, if any.
    pub fn best_sense(&self) -> Option<&str> {
        self.senses.first().map(String::as_str)
    }

    pub fn is_deponent(&self) -> bool {
        matches!(
            self.verb_voice,
            Some(VerbVoice::Deponent) | Some(VerbVoice::SemiDeponent)
        )
    }

    /// Display note about deponency, e.g. for commentary footers.
    pub fn deponent_note(&self) -> Option<&'static str> {
        match self.verb_voice {
            Some(VerbVoice::Deponent) => Some("deponent"),
            Some(VerbVoice::SemiDeponent) => Some("semi-deponent"),
            _ => None,
        }
    }

    /// Format principal parts as a display string.
    ///
    /// Prefers structured Latin parts, then structured Greek parts, then the
    /// legacy flat list. Latin verbs get the conjugation number appended when
    /// requested: "amō, amāre, amāvī, amātum (1)".
    pub fn format_principal_parts(&self, include_conjugation: bool) -> Option<String> {
        if let Some(lpp) = &self.latin_principal_parts {
            let mut parts: Vec<&str> = vec![&lpp.present, &lpp.infinitive];
            if let Some(p) = &lpp.perfect {
                parts.push(p);
            }
            if let Some(s) = &lpp.supine {
                parts.push(s);
            }
            let mut out = parts
                .into_iter()
                .filter(|p| !p.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            if include_conjugation {
                if let Some(conj) = self.conjugation {
                    out.push_str(&format!(" ({conj})"));
                }
            }
            return Some(out);
        }

        if let Some(gpp) = &self.greek_principal_parts {
            let mut parts: Vec<&str> = vec![&gpp.present];
            for slot in [
                &gpp.future,
                &gpp.aorist,
                &gpp.perfect_active,
                &gpp.perfect_middle,
                &gpp.aorist_passive,
            ] {
                if let Some(p) = slot {
                    parts.push(p);
                }
            }
            return Some(
                parts
                    .into_iter()
                    .filter(|p| !p.is_empty())
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }

        let flat = self.principal_parts.as_ref()?;
        if flat.is_empty() {
            return None;
        }
        let mut out = flat.join(", ");
        if include_conjugation && self.language == Some(Language::Latin) {
            if let Some(conj) = self.conjugation {
                out.push_str(&format!(" ({conj})"));
            }
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_entry() -> NormalizedEntry {
        NormalizedEntry {
            headword: "terra".to_string(),
            lemma: "terra".to_string(),
            language: Some(Language::Latin),
            pos: PartOfSpeech::Noun,
            senses: vec!["earth".to_string(), "land".to_string()],
            source: "whitakers".to_string(),
            confidence: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn validated_accepts_complete_entry() {
        assert!(base_entry().validated().is_some());
    }

    #[test]
    fn validated_rejects_empty_identification() {
        let mut e = base_entry();
        e.headword = String::new();
        assert!(e.validated().is_none());

        let mut e = base_entry();
        e.lemma = "  ".to_string();
        assert!(e.validated().is_none());
    }

    #[test]
    fn validated_rejects_entry_without_senses() {
        let mut e = base_entry();
        e.senses = vec!["  ".to_string()];
        assert!(e.validated().is_none());
    }

    #[test]
    fn validated_clamps_confidence() {
        let mut e = base_entry();
        e.confidence = 1.7;
        assert_eq!(e.validated().unwrap().confidence, 1.0);
    }

    #[test]
    fn validated_rejects_out_of_range_declension() {
        let mut e = base_entry();
        e.declension = Some(6);
        assert!(e.validated().is_none());
    }

    #[test]
    fn format_latin_principal_parts_with_conjugation() {
        let mut e = base_entry();
        e.pos = PartOfSpeech::Verb;
        e.conjugation = Some(1);
        e.latin_principal_parts = Some(LatinPrincipalParts {
            present: "amō".to_string(),
            infinitive: "amāre".to_string(),
            perfect: Some("amāvī".to_string()),
            supine: Some("amātum".to_string()),
            ..Default::default()
        });
        assert_eq!(
            e.format_principal_parts(true).unwrap(),
            "amō, amāre, amāvī, amātum (1)"
        );
    }

    #[test]
    fn format_greek_principal_parts_skips_missing_slots() {
        let mut e = base_entry();
        e.language = Some(Language::Greek);
        e.greek_principal_parts = Some(GreekPrincipalParts {
            present: "λύω".to_string(),
            future: Some("λύσω".to_string()),
            aorist_passive: Some("ἐλύθην".to_string()),
            ..Default::default()
        });
        assert_eq!(
            e.format_principal_parts(false).unwrap(),
            "λύω, λύσω, ἐλύθην"
        );
    }

    #[test]
    fn deponent_covers_semi_deponent() {
        let mut e = base_entry();
        e.verb_voice = Some(VerbVoice::SemiDeponent);
        assert!(e.is_deponent());
        assert_eq!(e.deponent_note(), Some("semi-deponent"));
    }
}
