use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Coarse part of speech. `Undetermined` serializes as an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PartOfSpeech {
    #[serde(rename = "verb")]
    Verb,
    #[serde(rename = "noun")]
    Noun,
    #[default]
    #[serde(rename = "")]
    Undetermined,
}

impl PartOfSpeech {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Undetermined => "",
        }
    }
}

/// Set of grammatical genders found for an entry.
///
/// Rendered as the present genders joined by `/`, always in
/// masculine, feminine, neuter order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gender {
    pub masculine: bool,
    pub feminine: bool,
    pub neuter: bool,
}

impl Gender {
    pub const ALL: Gender = Gender {
        masculine: true,
        feminine: true,
        neuter: true,
    };

    pub fn is_empty(&self) -> bool {
        !(self.masculine || self.feminine || self.neuter)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            (self.masculine, "masculine"),
            (self.feminine, "feminine"),
            (self.neuter, "neuter"),
        ];
        let mut first = true;
        for (present, name) in parts {
            if !present {
                continue;
            }
            if !first {
                f.write_str("/")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for Gender {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tense {
    Present,
    Imperfect,
    Future,
    Perfect,
}

impl Tense {
    pub const ALL: [Tense; 4] = [Tense::Present, Tense::Imperfect, Tense::Future, Tense::Perfect];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tense::Present => "present",
            Tense::Imperfect => "imperfect",
            Tense::Future => "future",
            Tense::Perfect => "perfect",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Person {
    First,
    Second,
    Third,
}

impl Person {
    pub const ALL: [Person; 3] = [Person::First, Person::Second, Person::Third];

    pub fn as_str(&self) -> &'static str {
        match self {
            Person::First => "first",
            Person::Second => "second",
            Person::Third => "third",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Number {
    Singular,
    Dual,
    Plural,
}

impl Number {
    pub const ALL: [Number; 3] = [Number::Singular, Number::Dual, Number::Plural];

    pub fn as_str(&self) -> &'static str {
        match self {
            Number::Singular => "singular",
            Number::Dual => "dual",
            Number::Plural => "plural",
        }
    }
}

/// Number of tense × person × number slots.
pub const CONJUGATION_SLOTS: usize = 36;

/// Fixed 4 × 3 × 3 table of inflected forms. Every slot exists; a missing
/// form is an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conjugation {
    forms: [[[String; 3]; 3]; 4],
}

impl Conjugation {
    pub fn get(&self, tense: Tense, person: Person, number: Number) -> &str {
        &self.forms[tense as usize][person as usize][number as usize]
    }

    pub fn set(&mut self, tense: Tense, person: Person, number: Number, form: String) {
        self.forms[tense as usize][person as usize][number as usize] = form;
    }

    pub fn slot_key(tense: Tense, person: Person, number: Number) -> String {
        format!("{}_{}_{}", tense.as_str(), person.as_str(), number.as_str())
    }

    /// All 36 `(key, form)` pairs in tense, person, number order.
    pub fn slots(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        Tense::ALL.into_iter().flat_map(move |tense| {
            Person::ALL.into_iter().flat_map(move |person| {
                Number::ALL.into_iter().map(move |number| {
                    (
                        Self::slot_key(tense, person, number),
                        self.get(tense, person, number),
                    )
                })
            })
        })
    }

    pub fn filled(&self) -> usize {
        self.slots().filter(|(_, form)| !form.is_empty()).count()
    }
}

impl Serialize for Conjugation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CONJUGATION_SLOTS))?;
        for (key, form) in self.slots() {
            map.serialize_entry(&key, form)?;
        }
        map.end()
    }
}

/// One output record.
///
/// The two richer fields are `None` for the minimal record shape and always
/// `Some` (with empty defaults) for the rich one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub headword: String,
    pub definition: String,
    pub part_of_speech: PartOfSpeech,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_and_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conjugations: Option<Conjugation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_display_order() {
        let g = Gender {
            masculine: true,
            feminine: false,
            neuter: true,
        };
        assert_eq!(g.to_string(), "masculine/neuter");
        assert_eq!(Gender::ALL.to_string(), "masculine/feminine/neuter");
        assert_eq!(Gender::default().to_string(), "");
        assert!(Gender::default().is_empty());
    }

    #[test]
    fn conjugation_has_all_slots() {
        let conj = Conjugation::default();
        assert_eq!(conj.slots().count(), CONJUGATION_SLOTS);
        assert_eq!(conj.filled(), 0);

        let json = serde_json::to_value(&conj).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), CONJUGATION_SLOTS);
        assert_eq!(map["present_third_singular"], "");
        assert_eq!(map["perfect_first_plural"], "");
    }

    #[test]
    fn conjugation_set_and_get() {
        let mut conj = Conjugation::default();
        conj.set(Tense::Future, Person::Second, Number::Dual, "gamiṣyathaḥ".to_string());
        assert_eq!(conj.get(Tense::Future, Person::Second, Number::Dual), "gamiṣyathaḥ");
        assert_eq!(conj.get(Tense::Future, Person::Second, Number::Plural), "");
        assert_eq!(conj.filled(), 1);
    }

    #[test]
    fn minimal_entry_serialization() {
        let entry = Entry {
            headword: "naraḥ".to_string(),
            definition: "m. a man.".to_string(),
            part_of_speech: PartOfSpeech::Noun,
            gender: Gender {
                masculine: true,
                ..Gender::default()
            },
            root_and_class: None,
            conjugations: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"headword":"naraḥ","definition":"m. a man.","part_of_speech":"noun","gender":"masculine"}"#
        );
    }

    #[test]
    fn undetermined_pos_is_empty_string() {
        let json = serde_json::to_string(&PartOfSpeech::Undetermined).unwrap();
        assert_eq!(json, r#""""#);
        assert_eq!(PartOfSpeech::Undetermined.as_str(), "");
    }
}
