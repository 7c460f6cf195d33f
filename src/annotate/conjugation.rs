//! Inflected verb forms quoted in a definition.
//!
//! Low recall by construction: the ending table only knows regular active
//! endings, so irregular, middle-voice and elliptical citations are missed.
//! Every slot that is not found stays empty.

use lazy_static::lazy_static;
use regex::Regex;

use crate::entry::{Conjugation, Number, Person, Tense};

/// How a tense is located in a definition and how its forms are shaped.
struct TenseRule {
    tense: Tense,
    /// Explicit label such as "pres." or "fut."; group 1 is the sub-block.
    intro: Regex,
    /// Fallback: first tense-shaped word up to the next semicolon.
    shape: Regex,
    /// Augment every form must start with.
    augment: &'static [char],
}

lazy_static! {
    static ref WORD: Regex = Regex::new(r"[\p{L}\p{M}]+").unwrap();

    static ref TENSE_RULES: Vec<TenseRule> = vec![
        TenseRule {
            tense: Tense::Present,
            intro: Regex::new(r"(?i)\bpres(?:ent)?\.?\s+([^;]*)").unwrap(),
            shape: Regex::new(r"\b[\p{L}\p{M}]+(?:ti|si|mi)\b[^;]*").unwrap(),
            augment: &[],
        },
        TenseRule {
            tense: Tense::Imperfect,
            intro: Regex::new(r"(?i)\b(?:impf|imperf|imperfect)\.?\s+([^;]*)").unwrap(),
            shape: Regex::new(r"\b[aā][\p{L}\p{M}]+(?:at|an|am)\b[^;]*").unwrap(),
            augment: &['a', 'ā'],
        },
        TenseRule {
            tense: Tense::Future,
            intro: Regex::new(r"(?i)\bfut(?:ure)?\.?\s+([^;]*)").unwrap(),
            shape: Regex::new(r"\b[\p{L}\p{M}]+[sṣ]y(?:ati|anti|asi|āmi)\b[^;]*").unwrap(),
            augment: &[],
        },
        TenseRule {
            tense: Tense::Perfect,
            intro: Regex::new(r"(?i)\b(?:pf|perf|perfect)\.?\s+([^;]*)").unwrap(),
            shape: Regex::new(r"\b[\p{L}\p{M}]+(?:atuḥ|athuḥ|uḥ|itha)\b[^;]*").unwrap(),
            augment: &[],
        },
    ];

    /// Pronoun followed by a word, one rule per person and number.
    static ref PRONOUN_RULES: Vec<(Person, Number, Regex)> = {
        let table: [(Person, Number, &str); 9] = [
            (Person::First, Number::Singular, "aham"),
            (Person::First, Number::Dual, "āvām"),
            (Person::First, Number::Plural, "vayam"),
            (Person::Second, Number::Singular, "tvam"),
            (Person::Second, Number::Dual, "yuvām"),
            (Person::Second, Number::Plural, "yūyam"),
            (Person::Third, Number::Singular, "saḥ|sa|sā"),
            (Person::Third, Number::Dual, "tau"),
            (Person::Third, Number::Plural, "te|tāḥ"),
        ];
        table
            .into_iter()
            .map(|(person, number, pronouns)| {
                let pattern = format!(r"(?i)\b(?:{})\s+([\p{{L}}\p{{M}}]+)", pronouns);
                (person, number, Regex::new(&pattern).unwrap())
            })
            .collect()
    };
}

/// Endings that identify a slot, and longer endings that must not be
/// mistaken for it.
struct SlotEndings {
    endings: &'static [&'static str],
    excludes: &'static [&'static str],
}

const fn ends(endings: &'static [&'static str], excludes: &'static [&'static str]) -> SlotEndings {
    SlotEndings { endings, excludes }
}

fn slot_endings(tense: Tense, person: Person, number: Number) -> SlotEndings {
    use Number::*;
    use Person::*;
    use Tense::*;

    match (tense, person, number) {
        (Present, Third, Singular) => ends(&["ti"], &["nti"]),
        (Present, Third, Dual) => ends(&["taḥ", "tas"], &[]),
        (Present, Third, Plural) => ends(&["nti"], &[]),
        (Present, Second, Singular) => ends(&["si"], &[]),
        (Present, Second, Dual) => ends(&["thaḥ", "thas"], &[]),
        (Present, Second, Plural) => ends(&["tha"], &[]),
        (Present, First, Singular) => ends(&["mi"], &[]),
        (Present, First, Dual) => ends(&["vaḥ", "vas"], &[]),
        (Present, First, Plural) => ends(&["maḥ", "mas"], &[]),

        (Imperfect, Third, Singular) => ends(&["t"], &[]),
        (Imperfect, Third, Dual) => ends(&["tām"], &[]),
        (Imperfect, Third, Plural) => ends(&["n"], &[]),
        (Imperfect, Second, Singular) => ends(&["ḥ", "s"], &[]),
        (Imperfect, Second, Dual) => ends(&["tam"], &[]),
        (Imperfect, Second, Plural) => ends(&["ta"], &[]),
        (Imperfect, First, Singular) => ends(&["m"], &["tam", "tām"]),
        (Imperfect, First, Dual) => ends(&["va"], &[]),
        (Imperfect, First, Plural) => ends(&["ma"], &[]),

        (Future, Third, Singular) => ends(&["syati", "ṣyati"], &[]),
        (Future, Third, Dual) => ends(&["syataḥ", "ṣyataḥ"], &[]),
        (Future, Third, Plural) => ends(&["syanti", "ṣyanti"], &[]),
        (Future, Second, Singular) => ends(&["syasi", "ṣyasi"], &[]),
        (Future, Second, Dual) => ends(&["syathaḥ", "ṣyathaḥ"], &[]),
        (Future, Second, Plural) => ends(&["syatha", "ṣyatha"], &[]),
        (Future, First, Singular) => ends(&["syāmi", "ṣyāmi"], &[]),
        (Future, First, Dual) => ends(&["syāvaḥ", "ṣyāvaḥ"], &[]),
        (Future, First, Plural) => ends(&["syāmaḥ", "ṣyāmaḥ"], &[]),

        // 1st and 3rd singular share "-a"; both slots get the same form
        (Perfect, Third, Singular) => ends(&["a"], &["tha", "iva", "ima"]),
        (Perfect, Third, Dual) => ends(&["atuḥ"], &[]),
        (Perfect, Third, Plural) => ends(&["uḥ"], &["atuḥ", "athuḥ"]),
        (Perfect, Second, Singular) => ends(&["itha", "tha"], &[]),
        (Perfect, Second, Dual) => ends(&["athuḥ"], &[]),
        (Perfect, Second, Plural) => ends(&["a"], &["tha", "iva", "ima"]),
        (Perfect, First, Singular) => ends(&["a"], &["tha", "iva", "ima"]),
        (Perfect, First, Dual) => ends(&["iva"], &[]),
        (Perfect, First, Plural) => ends(&["ima"], &[]),
    }
}

/// Text span holding the forms of one tense: after an explicit label if
/// there is one, otherwise from the first tense-shaped word.
fn tense_block<'t>(rule: &TenseRule, definition: &'t str) -> Option<&'t str> {
    if let Some(block) = rule.intro.captures(definition).and_then(|cap| cap.get(1)) {
        return Some(block.as_str());
    }
    rule.shape.find(definition).map(|m| m.as_str())
}

fn matches_slot(word: &str, slot: &SlotEndings, augment: &[char]) -> bool {
    if !augment.is_empty() && !word.starts_with(augment) {
        return false;
    }
    slot.endings.iter().any(|ending| {
        word.ends_with(ending)
            && word.chars().count() >= ending.chars().count() + 2
            && !slot.excludes.iter().any(|ex| word.ends_with(ex))
    })
}

fn find_form(block: &str, rule: &TenseRule, person: Person, number: Number) -> Option<String> {
    let slot = slot_endings(rule.tense, person, number);
    if let Some(word) = WORD
        .find_iter(block)
        .map(|m| m.as_str())
        .find(|word| matches_slot(word, &slot, rule.augment))
    {
        return Some(word.to_string());
    }

    PRONOUN_RULES
        .iter()
        .find(|(p, n, _)| *p == person && *n == number)
        .and_then(|(_, _, regex)| regex.captures(block))
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn extract_conjugation(definition: &str) -> Conjugation {
    let mut conjugation = Conjugation::default();
    for rule in TENSE_RULES.iter() {
        let Some(block) = tense_block(rule, definition) else {
            continue;
        };
        for person in Person::ALL {
            for number in Number::ALL {
                if let Some(form) = find_form(block, rule, person, number) {
                    conjugation.set(rule.tense, person, number, form);
                }
            }
        }
    }
    conjugation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::CONJUGATION_SLOTS;

    #[test]
    fn empty_definition_has_all_slots_empty() {
        let conj = extract_conjugation("");
        assert_eq!(conj.slots().count(), CONJUGATION_SLOTS);
        assert_eq!(conj.filled(), 0);
    }

    #[test]
    fn prose_without_forms() {
        let conj = extract_conjugation("m. a man, hero; a husband.");
        assert_eq!(conj.filled(), 0);
    }

    #[test]
    fn present_forms_by_ending() {
        let conj = extract_conjugation("cl. 1. P. gacchati, gacchanti, gacchasi; to go");
        assert_eq!(conj.get(Tense::Present, Person::Third, Number::Singular), "gacchati");
        assert_eq!(conj.get(Tense::Present, Person::Third, Number::Plural), "gacchanti");
        assert_eq!(conj.get(Tense::Present, Person::Second, Number::Singular), "gacchasi");
        assert_eq!(conj.get(Tense::Present, Person::First, Number::Singular), "");
    }

    #[test]
    fn future_by_label() {
        let conj = extract_conjugation("to go; fut. gamiṣyati, gamiṣyāmi; pf. jagāma, jagmuḥ");
        assert_eq!(conj.get(Tense::Future, Person::Third, Number::Singular), "gamiṣyati");
        assert_eq!(conj.get(Tense::Future, Person::First, Number::Singular), "gamiṣyāmi");
        assert_eq!(conj.get(Tense::Perfect, Person::Third, Number::Singular), "jagāma");
        assert_eq!(conj.get(Tense::Perfect, Person::Third, Number::Plural), "jagmuḥ");
    }

    #[test]
    fn imperfect_requires_augment() {
        let conj = extract_conjugation("impf. agacchat, gacchat, agacchan");
        assert_eq!(conj.get(Tense::Imperfect, Person::Third, Number::Singular), "agacchat");
        assert_eq!(conj.get(Tense::Imperfect, Person::Third, Number::Plural), "agacchan");
    }

    #[test]
    fn pronoun_fallback() {
        let conj = extract_conjugation("pres. aham gacchāmi; vayam calāma");
        // "gacchāmi" ends in -mi and is found by ending first
        assert_eq!(conj.get(Tense::Present, Person::First, Number::Singular), "gacchāmi");
        let conj = extract_conjugation("pres. tvam eva");
        assert_eq!(conj.get(Tense::Present, Person::Second, Number::Singular), "eva");
    }
}
