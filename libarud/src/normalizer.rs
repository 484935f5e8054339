// libarud/src/normalizer.rs
//
// TextNormalizer: orthographic cleanup ahead of pattern extraction.
//
// Steps run in a fixed order because later rules match the surface forms the
// earlier ones leave behind:
// 1. collapse stacked short vowels (last one wins)
// 2. orthography: dagger alef, vowelled bare alef, alef + fathatan order
// 3. Lam-Alef ligatures → lam + optional mark + alef form
// 4. shadda before its vowel
// 5. line-level specials: leading alef, article detachment, sun letters,
//    `وا` endings, literal fix-ups, the spelling table, line-initial vowel,
//    redundant alef after nunation
// 6. Hamzat-al-Wasl elision
// 7. alef madda → hamza + fatha + alef, absorbing a short vowel written on it

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::araby::{
    is_haraka, is_letter_or_space, is_tanween, is_tashkeel, strip_tashkeel, ALEF,
    DAGGER_ALEF, FATHA, FATHATAN, HAMZA, SUKUN,
};

// Patterns below spell the marks out literally: kasra ِ fatha َ damma ُ,
// fathatan ً dammatan ٌ kasratan ٍ, shadda ّ, sukun ْ.

static VOWELLED_ALEF: Lazy<Regex> = Lazy::new(|| Regex::new("ا[َُِ]").expect("static regex"));

static MARK_BEFORE_SHADDA: Lazy<Regex> =
    Lazy::new(|| Regex::new("([\u{0650}\u{064E}\u{064F}\u{064B}\u{064C}\u{064D}])(\u{0651})").expect("static regex"));

static PROCLITIC_ARTICLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|\s)([فوبتك])([َُِ])?ال").expect("static regex"));

static SUN_ARTICLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(" ال([تثدذرزسشصضطظلن])").expect("static regex"));

static WASL_AFTER_LONG_VOWEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\s])([اىيو])\s+ا").expect("static regex"));

static WASL_AFTER_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+ا").expect("static regex"));

static WASL_BEFORE_DOUBLE_LAM: Lazy<Regex> =
    Lazy::new(|| Regex::new("([فوبتك])([َُِ]?)ا(لل)").expect("static regex"));

static MADDA: Lazy<Regex> =
    Lazy::new(|| Regex::new("\u{0622}[\u{0650}\u{064E}\u{064F}]?").expect("static regex"));

/// Exact substring fix-ups, applied in order.
const LITERAL_FIXUPS: &[(&str, &str)] = &[
    ("الله", "اللاه"),
    ("اللّه", "الله"),
    ("إلَّا", "إِلّا"),
    ("نْ ال", "نَ ال"),
    ("لْ ال", "لِ ال"),
    ("إلَى", "إِلَى"),
    ("إذَا", "إِذَا"),
    ("ك ", "كَ "),
    (" ال ", " الْ "),
    ("ْ ال", "ِ ال"),
    ("عَمْرٍو", "عَمْرٍ"),
    ("عَمْرُو", "عَمْرُ"),
];

/// Built-in Arudi spellings of irregularly written words, keyed by the bare
/// (diacritic-free) form.
const DEFAULT_SPELLINGS: &[(&str, &str)] = &[
    ("هذا", "هَاذَا"),
    ("هذه", "هَاذِه"),
    ("هذان", "هَاذَان"),
    ("هذين", "هَاذَين"),
    ("هؤلاء", "هَاؤُلَاء"),
    ("ذلك", "ذَالِك"),
    ("ذلكما", "ذَالِكُمَا"),
    ("ذلكم", "ذَالِكُم"),
    ("أولئك", "أُلَائِك"),
    ("أولئكم", "أُلَائِكُم"),
    ("الله", "اللَّاه"),
    ("اللهم", "اللَّاهُمّ"),
    ("إله", "إِلَاه"),
    ("الإله", "الإِلَاه"),
    ("إلهي", "إِلَاهي"),
    ("إلهنا", "إِلَاهنا"),
    ("إلهكم", "إِلَاهكم"),
    ("إلههم", "إِلَاههم"),
    ("إلههن", "إِلَاههن"),
    ("رحمن", "رَحمَان"),
    ("الرحمن", "الرَّحمَان"),
    ("طاوس", "طَاوُوس"),
    ("داود", "دَاوُود"),
    ("لكن", "لَاكِن"),
    ("لكنّ", "لَاكِنّ"),
    ("لكنه", "لَاكِنّهُ"),
    ("طه", "طَاهَ\u{064E}"),
    ("لله", "لِللَاهِ"),
    ("آه", "أَاهِ"),
    ("هو", "هْوَ"),
    ("هي", "هْيَ"),
];

/// Proclitics that may precede a table word.
const PROCLITICS: &[&str] = &["و", "ف", "ك", "ب", "ل", "وب", "فك", "ول", "فل"];

/// Vowel given to a proclitic letter when it is re-attached.
fn vocalize_proclitic(c: char) -> String {
    match c {
        'و' => "وَ".to_string(),
        'ف' => "فَ".to_string(),
        'ك' => "كَ".to_string(),
        'ب' => "بِ".to_string(),
        'ل' => "لِ".to_string(),
        other => other.to_string(),
    }
}

/// Word → Arudi spelling table.
///
/// Iteration order is insertion order; overwriting a key keeps its place.
/// Suffix matching walks the table in that order, so the first key that fits
/// wins.
#[derive(Debug, Clone)]
pub struct SpellingTable {
    entries: Vec<(String, String)>,
}

impl Default for SpellingTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_SPELLINGS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl SpellingTable {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or overwrite one entry; last write wins.
    pub fn insert(&mut self, word: &str, replacement: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == word) {
            Some(entry) => entry.1 = replacement.to_string(),
            None => self.entries.push((word.to_string(), replacement.to_string())),
        }
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == word)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Arudi spelling of one space-delimited word, if the table covers it
    /// directly or behind one of the known proclitics.
    pub fn respell(&self, word: &str) -> Option<String> {
        // bare form keeping shadda, then fully bare
        let with_shadda: String = word
            .chars()
            .filter(|c| !(is_haraka(*c) || is_tanween(*c) || *c == SUKUN))
            .collect();
        let plain = strip_tashkeel(word);
        let forms = [with_shadda, plain];

        for form in &forms {
            if let Some(replacement) = self.get(form) {
                return Some(replacement.to_string());
            }
        }

        for form in &forms {
            for (key, replacement) in self.iter() {
                let Some(prefix) = form.strip_suffix(key) else {
                    continue;
                };
                if PROCLITICS.contains(&prefix) {
                    let vocalized: String = prefix.chars().map(vocalize_proclitic).collect();
                    return Some(vocalized + replacement);
                }
            }
        }

        None
    }
}

/// Text normalizer owning the spelling table.
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    spellings: SpellingTable,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spellings(spellings: SpellingTable) -> Self {
        Self { spellings }
    }

    pub fn spellings(&self) -> &SpellingTable {
        &self.spellings
    }

    /// Add or override one spelling (bare word → vocalized replacement).
    pub fn register_custom_spelling(&mut self, word: &str, replacement: &str) {
        self.spellings.insert(word, replacement);
    }

    /// Full normalization of one line. Whitespace-only input yields "".
    pub fn normalize(&self, text: &str) -> String {
        let text = text.trim();
        if text.is_empty() {
            return String::new();
        }
        let text = collapse_harakat(text);
        let text = normalize_orthography(&text);
        let text = normalize_ligatures(&text);
        let text = normalize_shadda(&text);
        let text = self.process_specials(&text);
        let text = resolve_wasl(&text);
        decompose_madda(&text)
    }

    fn process_specials(&self, text: &str) -> String {
        let mut bait = text.to_string();

        if bait.starts_with(ALEF) {
            bait = format!("أَ{}", &bait[ALEF.len_utf8()..]);
        }

        bait = PROCLITIC_ARTICLE
            .replace_all(&bait, "${1}${2}${3} ال")
            .into_owned();
        bait = SUN_ARTICLE.replace_all(&bait, " ا${1}").into_owned();

        bait = bait.replace("وا ", "و ");
        if bait.ends_with("وا") {
            bait.pop();
        }
        bait = bait.replace("وْا", "و");

        for (from, to) in LITERAL_FIXUPS {
            bait = bait.replace(from, to);
        }

        bait = bait
            .split(' ')
            .map(|word| self.spellings.respell(word).unwrap_or_else(|| word.to_string()))
            .collect::<Vec<_>>()
            .join(" ");

        let bait = vowel_line_start(&bait);
        drop_alef_after_tanween(&bait)
    }
}

/// Drop a short vowel immediately followed by another one.
pub fn collapse_harakat(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|(i, c)| !(is_haraka(**c) && chars.get(i + 1).is_some_and(|n| is_haraka(*n))))
        .map(|(_, c)| *c)
        .collect()
}

fn normalize_orthography(text: &str) -> String {
    let text = text.replace(DAGGER_ALEF, &ALEF.to_string());
    let text = VOWELLED_ALEF.replace_all(&text, "ا").into_owned();
    text.replace(&format!("{ALEF}{FATHATAN}"), &format!("{FATHATAN}{ALEF}"))
}

/// Lam-Alef presentation forms (isolated and final) are decomposed with NFKC;
/// a mark written on the ligature moves between the lam and the alef.
fn normalize_ligatures(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if !('\u{FEF5}'..='\u{FEFC}').contains(&c) {
            out.push(c);
            continue;
        }
        let decomposed: String = c.to_string().nfkc().collect();
        let mut parts = decomposed.chars();
        let lam = parts.next().unwrap_or(c);
        let rest: String = parts.collect();
        out.push(lam);
        if let Some(&mark) = chars.peek() {
            if is_haraka(mark) || is_tanween(mark) {
                out.push(mark);
                chars.next();
            }
        }
        out.push_str(&rest);
    }
    out
}

/// Put shadda before a vowel or nunation mark written ahead of it.
fn normalize_shadda(text: &str) -> String {
    MARK_BEFORE_SHADDA.replace_all(text, "${2}${1}").into_owned()
}

/// A bare second character (letter or space) gets a fatha after the first.
fn vowel_line_start(text: &str) -> String {
    let mut chars = text.chars();
    match (chars.next(), chars.clone().next()) {
        (Some(first), Some(second)) if is_letter_or_space(second) => {
            format!("{first}{FATHA}{}", chars.as_str())
        }
        _ => text.to_string(),
    }
}

/// Nunation already carries the final vowel; the orthographic alef after it
/// goes, together with one mark written on that alef.
fn drop_alef_after_tanween(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == ALEF && i > 0 && is_tanween(chars[i - 1]) {
            i += 1;
            if i < chars.len() && is_tashkeel(chars[i]) {
                i += 1;
            }
            continue;
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Hamzat-al-Wasl elision.
fn resolve_wasl(text: &str) -> String {
    let text = WASL_AFTER_LONG_VOWEL.replace_all(text, "${1}");
    let text = WASL_AFTER_SPACE.replace_all(&text, "");
    WASL_BEFORE_DOUBLE_LAM
        .replace_all(&text, "${1}${2}${3}")
        .into_owned()
}

/// The madda already carries its fatha; a vowel written on it (or given to
/// it by the line-start rule) would otherwise land on the bare alef.
fn decompose_madda(text: &str) -> String {
    MADDA
        .replace_all(text, format!("{HAMZA}{FATHA}{ALEF}").as_str())
        .into_owned()
}
