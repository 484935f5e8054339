// libarud/src/araby.rs
//
// Arabic code points and character classes used by the normalizer and the
// pattern extractor. Classes are static `phf` sets so membership checks are
// plain hash probes without any lazy initialisation.

use phf::phf_set;

pub const HAMZA: char = '\u{0621}';
pub const ALEF_MADDA: char = '\u{0622}';
pub const ALEF_HAMZA_ABOVE: char = '\u{0623}';
pub const WAW_HAMZA: char = '\u{0624}';
pub const ALEF_HAMZA_BELOW: char = '\u{0625}';
pub const YEH_HAMZA: char = '\u{0626}';
pub const ALEF: char = '\u{0627}';
pub const TEH_MARBUTA: char = '\u{0629}';
pub const TEH: char = '\u{062A}';
pub const LAM: char = '\u{0644}';
pub const NOON: char = '\u{0646}';
pub const HEH: char = '\u{0647}';
pub const WAW: char = '\u{0648}';
pub const ALEF_MAKSURA: char = '\u{0649}';
pub const YEH: char = '\u{064A}';

pub const FATHATAN: char = '\u{064B}';
pub const DAMMATAN: char = '\u{064C}';
pub const KASRATAN: char = '\u{064D}';
pub const FATHA: char = '\u{064E}';
pub const DAMMA: char = '\u{064F}';
pub const KASRA: char = '\u{0650}';
pub const SHADDA: char = '\u{0651}';
pub const SUKUN: char = '\u{0652}';
pub const DAGGER_ALEF: char = '\u{0670}';

/// Short vowels, in the order kasra, fatha, damma.
pub static HARAKAT: phf::Set<char> = phf_set! {
    '\u{0650}', '\u{064E}', '\u{064F}',
};

/// Nunation marks.
pub static TANWEEN: phf::Set<char> = phf_set! {
    '\u{064C}', '\u{064D}', '\u{064B}',
};

/// Every diacritic removed by [`strip_tashkeel`].
pub static TASHKEEL: phf::Set<char> = phf_set! {
    '\u{064B}', '\u{064C}', '\u{064D}', '\u{064E}', '\u{064F}', '\u{0650}', '\u{0651}', '\u{0652}',
};

/// Long-vowel letters: alef, waw, alef maksura, yeh.
pub static MOSTLY_SAKEN: phf::Set<char> = phf_set! {
    '\u{0627}', '\u{0648}', '\u{0649}', '\u{064A}',
};

/// Consonant letters (alef maksura is deliberately absent).
pub static LETTERS: phf::Set<char> = phf_set! {
    '\u{0627}', '\u{0628}', '\u{062A}', '\u{0629}', '\u{062B}', '\u{062C}', '\u{062D}', '\u{062E}',
    '\u{062F}', '\u{0630}', '\u{0631}', '\u{0632}', '\u{0633}', '\u{0634}', '\u{0635}', '\u{0636}',
    '\u{0637}', '\u{0638}', '\u{0639}', '\u{063A}', '\u{0641}', '\u{0642}', '\u{0643}', '\u{0644}',
    '\u{0645}', '\u{0646}', '\u{0647}', '\u{0648}', '\u{064A}', '\u{0621}', '\u{0622}', '\u{0623}',
    '\u{0624}', '\u{0625}', '\u{0626}',
};

/// The fourteen sun letters that assimilate the article's lam.
pub static SUN_LETTERS: phf::Set<char> = phf_set! {
    'ت', 'ث', 'د', 'ذ', 'ر', 'ز', 'س', 'ش', 'ص', 'ض', 'ط', 'ظ', 'ل', 'ن',
};

pub fn is_haraka(c: char) -> bool {
    HARAKAT.contains(&c)
}

pub fn is_tanween(c: char) -> bool {
    TANWEEN.contains(&c)
}

pub fn is_tashkeel(c: char) -> bool {
    TASHKEEL.contains(&c)
}

pub fn is_mostly_saken(c: char) -> bool {
    MOSTLY_SAKEN.contains(&c)
}

/// A letter or a space: positions the extractor scans.
pub fn is_letter_or_space(c: char) -> bool {
    c == ' ' || LETTERS.contains(&c)
}

/// Characters that survive the extractor's input filter.
pub fn is_scannable(c: char) -> bool {
    is_letter_or_space(c) || is_haraka(c) || is_tanween(c) || is_mostly_saken(c) || c == SHADDA || c == SUKUN
}

/// Remove every diacritic, keeping letters and everything else.
pub fn strip_tashkeel(text: &str) -> String {
    text.chars().filter(|c| !is_tashkeel(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alef_maksura_is_not_a_letter() {
        assert!(!LETTERS.contains(&ALEF_MAKSURA));
        assert!(is_mostly_saken(ALEF_MAKSURA));
        assert!(is_scannable(ALEF_MAKSURA));
    }

    #[test]
    fn strip() {
        assert_eq!(strip_tashkeel("لَكِنَّ"), "لكن");
        assert_eq!(strip_tashkeel("كِتَابًا"), "كتابا");
    }

    #[test]
    fn classes_are_disjoint() {
        for c in HARAKAT.iter() {
            assert!(!is_tanween(*c));
            assert!(!LETTERS.contains(c));
        }
        assert_eq!(SUN_LETTERS.len(), 14);
    }

    #[test]
    fn punctuation_is_not_scannable() {
        for c in ['،', '.', '!', 'a', '\u{0670}'] {
            assert!(!is_scannable(c), "{c}");
        }
    }
}
