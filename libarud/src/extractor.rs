// libarud/src/extractor.rs
//
// Arudi writing and binary pattern of one normalized hemistich.
//
// The scan walks letter by letter and looks at what follows each letter: a
// short vowel makes it mutaharrik (`1`), sukun or a following bare letter makes
// it sakin (`0`), nunation adds a written noon, shadda doubles the letter, and
// alef or alef maksura after a letter is a long vowel (`10`). Marks belonging to
// a letter are consumed together with it.

use crate::araby::{
    is_haraka, is_letter_or_space, is_mostly_saken, is_scannable, is_tanween, ALEF, ALEF_MADDA,
    ALEF_MAKSURA, DAMMA, DAMMATAN, FATHA, HAMZA, HEH, KASRA, KASRATAN, NOON, SHADDA, SUKUN,
    TEH_MARBUTA, TEH, WAW, YEH,
};
use crate::normalizer::collapse_harakat;

/// Scan `text` into `(arudi_text, pattern)`.
///
/// `saturate` lengthens the final vowel (Ishbāʿ) and closes the pattern with a
/// sakin; `restrict_rhyme` reads the last letter as sakin instead and disables
/// saturation altogether.
pub fn extract(text: &str, saturate: bool, restrict_rhyme: bool) -> (String, String) {
    let chars = prepare_chars(text);
    let n = chars.len();

    let mut pattern = String::new();
    let mut plain = String::new();

    let mut i = 0;
    while i + 1 < n {
        let c = chars[i];
        if !is_letter_or_space(c) {
            i += 1;
            continue;
        }
        if c == ' ' {
            plain.push(c);
            i += 1;
            continue;
        }

        // a single space between a letter and its mark is looked through
        let mut next = chars[i + 1];
        if next == ' ' && i + 2 < n {
            next = chars[i + 2];
        }
        let next_next = chars.get(i + 2).copied();
        let prev = pattern.chars().last();
        let after_sakin = prev == Some('0');
        let mut step = 2;

        if is_haraka(next) {
            if restrict_rhyme && i + 2 >= n {
                pattern.push('0');
            } else {
                pattern.push('1');
            }
            plain.push(c);
        } else if next == SUKUN {
            if !after_sakin || i + 1 == n - 1 {
                pattern.push('0');
                plain.push(c);
            } else {
                drop_last_letter(&mut plain);
                plain.push(c);
            }
        } else if is_tanween(next) {
            if c != ALEF {
                plain.push(c);
            }
            plain.push(NOON);
            pattern.push_str("10");
            if chars.get(i + 2) == Some(&ALEF) {
                i += 1;
            }
        } else if next == SHADDA {
            if !after_sakin {
                plain.push(c);
                plain.push(c);
                pattern.push_str("01");
            } else {
                drop_last_letter(&mut plain);
                plain.push(c);
                plain.push(c);
                pattern.push('1');
            }

            match chars.get(i + 2) {
                Some(&mark) if is_haraka(mark) => {
                    if restrict_rhyme && i + 3 >= n {
                        pattern.pop();
                        pattern.push('0');
                    }
                    i += 1;
                }
                Some(&mark) if is_tanween(mark) => {
                    i += 1;
                    plain.push(NOON);
                    pattern.push('0');
                    if chars.get(i + 2) == Some(&ALEF) {
                        i += 1;
                    }
                }
                _ => {}
            }
        } else if next == ALEF || next == ALEF_MAKSURA {
            pattern.push_str("10");
            plain.push(c);
            plain.push(next);
        } else if is_letter_or_space(next) {
            if !after_sakin {
                pattern.push('0');
                plain.push(c);
            } else if chars[i + 1] == ' ' {
                pattern.push('1');
                plain.push(c);
            } else {
                drop_last_letter(&mut plain);
                plain.push(c);
                pattern.push('0');
            }
            // the following letter still needs its own turn
            step = 1;
        }

        // pronoun heh closing a word after a mutaharrik is read long
        if !restrict_rhyme && next_next == Some(' ') && !after_sakin && c == HEH {
            if next == KASRA {
                plain.push(YEH);
                pattern.push('0');
            } else if next == DAMMA {
                plain.push(WAW);
                pattern.push('0');
            }
        }

        i += step;
    }

    if !restrict_rhyme && saturate {
        if !pattern.is_empty() && !pattern.ends_with('0') {
            pattern.push('0');
        }
        saturate_last(&chars, &mut plain);
    }

    // teh marbuta is pronounced teh before the noon of nunation
    let plain = plain.replace(
        &format!("{TEH_MARBUTA}{NOON}"),
        &format!("{TEH}{NOON}"),
    );
    (plain, pattern)
}

/// Collapse stacked vowels, expand alef madda, drop everything that is not
/// part of the scan and squeeze runs of spaces.
fn prepare_chars(text: &str) -> Vec<char> {
    let collapsed = collapse_harakat(text);
    let expanded = collapsed.replace(ALEF_MADDA, &format!("{HAMZA}{FATHA}{ALEF}"));
    let filtered: String = expanded.trim().chars().filter(|c| is_scannable(*c)).collect();
    filtered
        .split(' ')
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .collect()
}

/// Remove the last written letter, along with a space that precedes it.
fn drop_last_letter(plain: &mut String) {
    if plain.ends_with(' ') {
        plain.pop();
    }
    plain.pop();
}

/// Ishbāʿ: write out the long vowel implied by the final mark.
fn saturate_last(chars: &[char], plain: &mut String) {
    let Some(&last) = chars.last() else {
        return;
    };
    match last {
        KASRA => plain.push(YEH),
        FATHA => plain.push(ALEF),
        DAMMA => plain.push(WAW),
        KASRATAN => {
            plain.pop();
            plain.push(YEH);
        }
        DAMMATAN => {
            plain.pop();
            plain.push(WAW);
        }
        c if is_mostly_saken(c) && chars.len() > 1 && !is_tanween(chars[chars.len() - 2]) => {
            plain.push(c)
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> (String, String) {
        extract(text, true, false)
    }

    fn pair(arudi: &str, pattern: &str) -> (String, String) {
        (arudi.to_string(), pattern.to_string())
    }

    #[test]
    fn empty_and_single_char() {
        assert_eq!(scan(""), pair("", ""));
        assert_eq!(extract("ب", false, false), pair("", ""));
    }

    #[test]
    fn vowelled_letters_and_saturation() {
        assert_eq!(scan("ذَهَبَ"), pair("ذهبا", "1110"));
        assert_eq!(extract("ذَهَبَ", false, false), pair("ذهب", "111"));
        assert_eq!(extract("ذَهَبَ", true, true), pair("ذهب", "110"));
    }

    #[test]
    fn kasra_saturates_to_yeh() {
        assert_eq!(scan("بِسْمِ"), pair("بسمي", "1010"));
        assert_eq!(extract("بِسْمِ", true, true), pair("بسم", "100"));
    }

    #[test]
    fn nunation_writes_noon() {
        assert_eq!(scan("كِتَابً"), pair("كتابن", "11010"));
        assert_eq!(scan("بَيْتٌ"), pair("بيتو", "1010"));
        assert_eq!(extract("بَيْتٌ", true, true), pair("بيتن", "1010"));
    }

    #[test]
    fn shadda_doubles() {
        // shadda written before its vowel, as the normalizer leaves it
        let text = "مُحَم\u{0651}\u{064E}دٍ";
        assert_eq!(scan(text), pair("محممدي", "110110"));
        assert_eq!(extract(text, true, true), pair("محممدن", "110110"));
    }

    #[test]
    fn final_shadda_with_sukun() {
        assert_eq!(scan("رَدّْ"), pair("ردد", "1010"));
        assert_eq!(extract("رَدّْ", true, true), pair("ردد", "101"));
    }

    #[test]
    fn long_vowel_alef() {
        assert_eq!(scan("هَاذَا"), pair("هاذا", "1010"));
        assert_eq!(extract("هَاذَا", true, true), pair("هاذ", "101"));
    }

    #[test]
    fn heh_pronoun_is_long() {
        assert_eq!(scan("لَهُ قَلْبٌ"), pair("لهو قلبو", "1101010"));
        assert_eq!(extract("لَهُ قَلْبٌ", false, false), pair("لهو قلبن", "1101010"));
        assert_eq!(extract("لَهُ قَلْبٌ", true, true), pair("له قلبن", "111010"));
    }

    #[test]
    fn teh_marbuta_before_noon() {
        assert_eq!(extract("جَمِيلَةٌ", false, false), pair("جميلتن", "110110"));
    }

    #[test]
    fn drops_unscannable_chars() {
        assert_eq!(scan("ذَهَبَ،"), scan("ذَهَبَ"));
        assert_eq!(scan("  ذَهَبَ  "), scan("ذَهَبَ"));
    }
}
