//! SLP1 to IAST transliteration.
//!
//! SLP1 spends exactly one ASCII letter per phoneme, so conversion is a plain
//! character substitution with no lookahead. Anything outside the table
//! (digits, punctuation, stray markup) is copied through.

/// Replacement for a single SLP1 character, `None` when it passes through.
pub fn slp1_char(ch: char) -> Option<&'static str> {
    let iast = match ch {
        // vowels
        'a' => "a",
        'A' => "ā",
        'i' => "i",
        'I' => "ī",
        'u' => "u",
        'U' => "ū",
        'f' => "ṛ",
        'F' => "ṝ",
        'x' => "ḷ",
        'X' => "ḹ",
        'e' => "e",
        'E' => "ai",
        'o' => "o",
        'O' => "au",
        // anusvāra, visarga, candrabindu, avagraha
        'M' => "ṃ",
        'H' => "ḥ",
        '~' => "m̐",
        '\'' => "'",
        // velars
        'k' => "k",
        'K' => "kh",
        'g' => "g",
        'G' => "gh",
        'N' => "ṅ",
        // palatals
        'c' => "c",
        'C' => "ch",
        'j' => "j",
        'J' => "jh",
        'Y' => "ñ",
        // retroflexes
        'w' => "ṭ",
        'W' => "ṭh",
        'q' => "ḍ",
        'Q' => "ḍh",
        'R' => "ṇ",
        // dentals
        't' => "t",
        'T' => "th",
        'd' => "d",
        'D' => "dh",
        'n' => "n",
        // labials
        'p' => "p",
        'P' => "ph",
        'b' => "b",
        'B' => "bh",
        'm' => "m",
        // semivowels, sibilants, h
        'y' => "y",
        'r' => "r",
        'l' => "l",
        'v' => "v",
        'S' => "ś",
        'z' => "ṣ",
        's' => "s",
        'h' => "h",
        _ => return None,
    };
    Some(iast)
}

pub fn slp1_to_iast(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 2);
    for ch in input.chars() {
        match slp1_char(ch) {
            Some(iast) => out.push_str(iast),
            None => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspirates_and_visarga() {
        assert_eq!(slp1_to_iast("gacCati"), "gacchati");
        assert_eq!(slp1_to_iast("naraH"), "naraḥ");
        assert_eq!(slp1_to_iast("BUmi"), "bhūmi");
    }

    #[test]
    fn vowels_and_retroflexes() {
        assert_eq!(slp1_to_iast("kfzRa"), "kṛṣṇa");
        assert_eq!(slp1_to_iast("SivaH"), "śivaḥ");
        assert_eq!(slp1_to_iast("DarmakzetrE"), "dharmakṣetrai");
        assert_eq!(slp1_to_iast("kOravAH"), "kauravāḥ");
        assert_eq!(slp1_to_iast("saMskfta"), "saṃskṛta");
    }

    #[test]
    fn empty_input() {
        assert_eq!(slp1_to_iast(""), "");
    }

    #[test]
    fn unmapped_characters_pass_through() {
        assert_eq!(slp1_to_iast("agni-1"), "agni-1");
        assert_eq!(slp1_to_iast("a.b, 2"), "a.b, 2");
        assert_eq!(slp1_char('7'), None);
        assert_eq!(slp1_char('ā'), None);
    }

    #[test]
    fn mapping_ignores_context() {
        for ch in ['C', 'H', 'f', 'z', 'E'] {
            let alone = slp1_to_iast(&ch.to_string());
            let embedded = slp1_to_iast(&format!("a{ch}a"));
            assert_eq!(embedded, format!("a{alone}a"));
        }
    }

    #[test]
    fn reapplying_to_output_is_stable() {
        for word in ["gacCati", "naraH", "kfzRa", "jYAna", "OzaDi", "tfRa~"] {
            let once = slp1_to_iast(word);
            assert_eq!(slp1_to_iast(&once), once);
        }
    }
}
