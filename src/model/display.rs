//! Display abbreviation lookups for the canonical entry vocabularies.
//!
//! Every function here is total: unmapped or deliberately unmarked values
//! come back as None (or 99 for sort ordering), never as an error.

use crate::model::entry::{Gender, GreekDialect, GreekVerbClass, PartOfSpeech, VerbVoice};

/// Abbreviation for a part of speech in commentary output.
///
/// Nouns show their gender instead of a POS tag.
pub fn pos_display(pos: PartOfSpeech) -> Option<&'static str> {
    match pos {
        PartOfSpeech::Noun => None,
        PartOfSpeech::Verb => Some("v."),
        PartOfSpeech::Adjective => Some("adj."),
        PartOfSpeech::Adverb => Some("adv."),
        PartOfSpeech::Preposition => Some("prep."),
        PartOfSpeech::Conjunction => Some("conj."),
        PartOfSpeech::Pronoun => Some("pron."),
        PartOfSpeech::Interjection => Some("interj."),
        PartOfSpeech::Numeral => Some("num."),
        PartOfSpeech::Particle => Some("part."),
        PartOfSpeech::Article => Some("art."),
        PartOfSpeech::Unknown => None,
    }
}

pub fn gender_display(gender: Gender) -> Option<&'static str> {
    match gender {
        Gender::Masculine => Some("m."),
        Gender::Feminine => Some("f."),
        Gender::Neuter => Some("n."),
        Gender::Common => Some("c."),
        Gender::Unknown => None,
    }
}

/// Greek definite article for a gender; common and unknown genders have none.
pub fn greek_article(gender: Gender) -> Option<&'static str> {
    match gender {
        Gender::Masculine => Some("ὁ"),
        Gender::Feminine => Some("ἡ"),
        Gender::Neuter => Some("τό"),
        Gender::Common | Gender::Unknown => None,
    }
}

/// Abbreviation for a verb voice; active is the default and goes unmarked.
pub fn voice_display(voice: VerbVoice) -> Option<&'static str> {
    match voice {
        VerbVoice::Active => None,
        VerbVoice::Passive => Some("pass."),
        VerbVoice::Middle => Some("mid."),
        VerbVoice::Deponent => Some("dep."),
        VerbVoice::SemiDeponent => Some("semi-dep."),
    }
}

/// Display marker for a Greek verb class; regular omega verbs go unmarked.
pub fn greek_verb_class_display(class: GreekVerbClass) -> Option<&'static str> {
    match class {
        GreekVerbClass::Omega => None,
        GreekVerbClass::Mi => Some("-μι"),
        GreekVerbClass::ContractAlpha => Some("contr. (-άω)"),
        GreekVerbClass::ContractEpsilon => Some("contr. (-έω)"),
        GreekVerbClass::ContractOmicron => Some("contr. (-όω)"),
    }
}

/// Sort order for multi-column alphabetization; lower sorts first.
pub fn pos_order(pos: PartOfSpeech) -> u8 {
    match pos {
        PartOfSpeech::Noun => 1,
        PartOfSpeech::Verb => 2,
        PartOfSpeech::Adjective => 3,
        PartOfSpeech::Adverb => 4,
        PartOfSpeech::Pronoun => 5,
        PartOfSpeech::Article => 6,
        PartOfSpeech::Preposition => 7,
        PartOfSpeech::Conjunction => 8,
        PartOfSpeech::Interjection => 9,
        PartOfSpeech::Numeral => 10,
        PartOfSpeech::Particle => 11,
        PartOfSpeech::Unknown => 99,
    }
}

/// Dialect marker for Greek entries; standard Attic goes unmarked.
pub fn dialect_display(dialect: GreekDialect) -> Option<&'static str> {
    match dialect {
        GreekDialect::Attic => None,
        GreekDialect::Ionic => Some("Ion."),
        GreekDialect::Homeric => Some("Hom."),
        GreekDialect::Doric => Some("Dor."),
        GreekDialect::Aeolic => Some("Aeol."),
        GreekDialect::Koine => Some("Koine"),
        GreekDialect::Epic => Some("epic"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nouns_show_gender_not_pos() {
        assert_eq!(pos_display(PartOfSpeech::Noun), None);
        assert_eq!(gender_display(Gender::Feminine), Some("f."));
    }

    #[test]
    fn articles_cover_the_three_core_genders() {
        assert_eq!(greek_article(Gender::Masculine), Some("ὁ"));
        assert_eq!(greek_article(Gender::Neuter), Some("τό"));
        assert_eq!(greek_article(Gender::Common), None);
    }

    #[test]
    fn active_voice_is_unmarked() {
        assert_eq!(voice_display(VerbVoice::Active), None);
        assert_eq!(voice_display(VerbVoice::SemiDeponent), Some("semi-dep."));
    }

    #[test]
    fn unknown_pos_sorts_last() {
        assert!(pos_order(PartOfSpeech::Noun) < pos_order(PartOfSpeech::Verb));
        assert_eq!(pos_order(PartOfSpeech::Unknown), 99);
    }
}
