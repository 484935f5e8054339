//! Tests for text → Arudi writing and binary pattern
//!
//! Every case runs the full conversion (normalizer, then extractor) through
//! the `Processor` facade.

use libarud::{ArudiConfig, Processor};

fn scan(processor: &Processor, text: &str) -> (String, String) {
    processor.prepare_text(text)
}

fn pair(arudi: &str, pattern: &str) -> (String, String) {
    (arudi.to_string(), pattern.to_string())
}

#[test]
fn test_empty_input() {
    let processor = Processor::new();
    assert_eq!(scan(&processor, ""), pair("", ""));
    assert_eq!(scan(&processor, "   "), pair("", ""));
    assert_eq!(processor.normalize_and_extract(" ", true, true), pair("", ""));
}

#[test]
fn test_single_words() {
    let processor = Processor::new();
    let cases = [
        ("هَذَا", "هاذا", "1010"),
        ("ذَهَبَ", "ذهبا", "1110"),
        ("فَاللَّهُ", "فللهو", "10110"),
        ("قَالَ اللَّهُ", "قالللهو", "1010110"),
        ("بِاسْمِ", "بسمي", "1010"),
        ("كِتَابًا", "كتابن", "11010"),
        ("مُحَمَّدٍ", "محممدي", "110110"),
        ("رَدّْ", "ردد", "1010"),
        ("بَيْتٌ", "بيتو", "1010"),
        ("عَلِمُوا", "علمو", "1110"),
        ("لَهُ قَلْبٌ", "لهو قلبو", "1101010"),
        ("وَالشَّمْسِ", "وششمسي", "101010"),
        ("إِذَا اشْتَدَّ الزَّمَانُ", "إذشتددززمانو", "110101011010"),
    ];
    for (text, arudi, pattern) in cases {
        assert_eq!(scan(&processor, text), pair(arudi, pattern), "{text}");
    }
}

#[test]
fn test_lam_alef_ligatures() {
    let processor = Processor::new();
    assert_eq!(scan(&processor, "\u{FEFB}\u{064E} تَقُلْ"), pair("لا تقل", "10110"));
    assert_eq!(scan(&processor, "\u{FEF7}\u{064E}نْتَ"), pair("لنتا", "1010"));
}

#[test]
fn test_restricted_rhyme() {
    let processor = Processor::new();
    let cases = [
        ("هَذَا", "هاذ", "101"),
        ("ذَهَبَ", "ذهب", "110"),
        ("بِاسْمِ", "بسم", "100"),
        ("مُحَمَّدٍ", "محممدن", "110110"),
        ("رَدّْ", "ردد", "101"),
        ("بَيْتٌ", "بيتن", "1010"),
        ("عَلِمُوا", "علم", "111"),
        ("لَهُ قَلْبٌ", "له قلبن", "111010"),
        ("وَالشَّمْسِ", "وششمس", "10100"),
        ("بَحْرٌ سَرِيعٌ مَا لَهُ سَاحِلُ", "بحرن سريعن ما له ساحل", "10101101010111010"),
    ];
    for (text, arudi, pattern) in cases {
        assert_eq!(
            processor.normalize_and_extract(text, true, true),
            pair(arudi, pattern),
            "{text}"
        );
    }
}

#[test]
fn test_without_saturation() {
    let processor = Processor::new();
    assert_eq!(processor.normalize_and_extract("ذَهَبَ", false, false), pair("ذهب", "111"));
    assert_eq!(
        processor.normalize_and_extract("لَهُ قَلْبٌ", false, false),
        pair("لهو قلبن", "1101010")
    );
}

#[test]
fn test_pattern_is_binary() {
    let processor = Processor::new();
    for text in [
        "أَخِي جَاوَزَ الظَّالِمُونَ الْمَدَى",
        "يَا صَاحِبِي قِفْ وَاسْتَمِعْ قَوْلِي لَكَا",
        "آمَنُوا بِاللَّهِ",
    ] {
        let (_, pattern) = scan(&processor, text);
        assert!(!pattern.is_empty());
        assert!(pattern.chars().all(|c| c == '0' || c == '1'), "{pattern}");
    }
}

#[test]
fn test_line_initial_madda() {
    let processor = Processor::new();
    assert_eq!(
        scan(&processor, "آمَنُوا بِاللَّهِ"),
        pair("ءامنو بللهي", "1011010110")
    );
    assert_eq!(scan(&processor, "آمَنَ"), pair("ءامنا", "10110"));
}

#[test]
fn test_custom_spelling_is_used_verbatim() {
    let mut processor = Processor::new();
    processor.register_custom_spelling("لكن", "لَاكِن");
    assert_eq!(
        scan(&processor, "وَلَكِنَّ قَلْبِي لكن صَابِرٌ"),
        pair("ولاكنن قلبي لاكن صابرو", "1101011010101010110")
    );
}

#[test]
fn test_custom_spellings_from_config() {
    let mut config = ArudiConfig::default();
    config
        .custom_spellings
        .insert("لكن".to_string(), "لَاكِن".to_string());
    let processor = Processor::with_config(config);
    assert_eq!(
        scan(&processor, "وَلَكِنَّ قَلْبِي لكن صَابِرٌ"),
        pair("ولاكنن قلبي لاكن صابرو", "1101011010101010110")
    );
}

#[test]
fn test_registering_invalidates_cached_conversion() {
    let mut processor = Processor::new();
    let before = scan(&processor, "جَاءَ عمرو");
    processor.register_custom_spelling("عمرو", "عَمْرُو");
    let after = scan(&processor, "جَاءَ عمرو");
    assert_ne!(before, after);
    assert_eq!(after, pair("جاء عمرو", "1011010"));
}
