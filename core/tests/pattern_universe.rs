//! Tests for the generated pattern universes
//!
//! Covers the properties every meter's universe must hold:
//! - deterministic generation
//! - pairing soundness (pairs only reference generated hemistichs)
//! - reference sizes for the classical catalog

use libarud_core::{generate, Catalog, Endings};

/// (meter, distinct sadr, distinct ajuz, pairs)
const SIZES: &[(&str, usize, usize, usize)] = &[
    ("taweel", 24, 36, 864),
    ("madeed", 18, 18, 108),
    ("baseet", 56, 96, 2368),
    ("wafer", 24, 24, 320),
    ("kamel", 56, 128, 3328),
    ("hazaj", 4, 4, 16),
    ("rajaz", 120, 112, 6520),
    ("ramal", 56, 116, 4768),
    ("saree", 64, 64, 1312),
    ("munsareh", 28, 40, 808),
    ("khafeef", 34, 56, 1512),
    ("mudhare", 3, 3, 9),
    ("muqtadheb", 4, 4, 16),
    ("mujtath", 8, 12, 96),
    ("mutakareb", 56, 40, 1600),
    ("mutadarak", 126, 126, 7821),
];

#[test]
fn test_universe_sizes() {
    let catalog = Catalog::classical();
    for &(name, sadr, ajuz, pairs) in SIZES {
        let universe = catalog.universe(name).unwrap();
        assert_eq!(universe.sadr().len(), sadr, "{name} sadr");
        assert_eq!(universe.ajuz().len(), ajuz, "{name} ajuz");
        assert_eq!(universe.pairs().len(), pairs, "{name} pairs");
    }
}

#[test]
fn test_generation_is_deterministic() {
    let catalog = Catalog::classical();
    for (bahr, cached) in catalog.iter() {
        let fresh = generate(bahr);
        assert_eq!(fresh.sadr(), cached.sadr(), "{}", bahr.name);
        assert_eq!(fresh.ajuz(), cached.ajuz(), "{}", bahr.name);
        assert_eq!(fresh.pairs(), cached.pairs(), "{}", bahr.name);
    }
}

#[test]
fn test_pairs_reference_generated_hemistichs() {
    let catalog = Catalog::classical();
    for (bahr, universe) in catalog.iter() {
        for (sadr, ajuz) in universe.pairs() {
            assert!(universe.contains_sadr(sadr), "{}: {sadr}", bahr.name);
            assert!(
                ajuz.is_empty() || universe.contains_ajuz(ajuz),
                "{}: {ajuz}",
                bahr.name
            );
        }
    }
}

#[test]
fn test_every_pattern_is_its_feet() {
    let catalog = Catalog::classical();
    for (_, universe) in catalog.iter() {
        for entry in universe.sadr().iter().chain(universe.ajuz()) {
            assert_eq!(entry.pattern, entry.feet.concat());
            assert_eq!(entry.feet.last(), Some(&entry.end_foot));
        }
    }
}

#[test]
fn test_ajuz_answers_some_arudh() {
    let catalog = Catalog::classical();
    for (bahr, universe) in catalog.iter() {
        for ajuz in universe.ajuz() {
            assert!(!ajuz.allowed_arudhs.is_empty(), "{}: {}", bahr.name, ajuz.pattern);
        }
    }
}

#[test]
fn test_single_shatr_sub_meters_pair_with_empty_ajuz() {
    let catalog = Catalog::classical();
    let rajaz = catalog.bahr("rajaz").unwrap();
    let universe = catalog.universe("rajaz").unwrap();
    for sub in &rajaz.sub_bahrs {
        if let Endings::Single(_) = sub.endings {
            for line in generate(sub).sadr() {
                assert!(universe.is_valid_pair(&line.pattern, ""), "{}", line.pattern);
            }
        }
    }
}
