// core/src/patterns.rs
//
// PatternGenerator: expands a `Bahr` into every admissible hemistich pattern
// plus the set of valid (Sadr, Ajuz) pairs. Sub-meters are expanded
// recursively and merged into the parent universe.

use ahash::{AHashMap, AHashSet};
use serde::Serialize;
use tracing::debug;

use crate::bahr::{Bahr, Endings, Shatr};
use crate::tafeela::{dedup_feet, Foot};
use crate::zihaf::Zihaf;

/// One admissible hemistich.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HemistichPattern {
    /// Concatenated bits, e.g. `"1101011010110110"`.
    pub pattern: String,
    /// Per-foot bit strings, in order.
    pub feet: Vec<String>,
    /// The last foot (Arudh for a Sadr, Dharb for an Ajuz).
    pub end_foot: String,
    /// Rule that produced the last foot.
    pub end_rule: Zihaf,
    /// Ajuz only: the Arudh feet this ending may answer.
    pub allowed_arudhs: Vec<String>,
    /// Name of the (sub-)meter that produced the pattern first.
    pub source: &'static str,
}

impl HemistichPattern {
    fn from_feet(feet: &[Foot], source: &'static str) -> Self {
        let feet_strs: Vec<String> = feet.iter().map(Foot::pattern).collect();
        let (end_foot, end_rule) = match feet.last() {
            Some(foot) => (foot.pattern(), foot.rule),
            None => (String::new(), Zihaf::NoZihaf),
        };
        Self {
            pattern: feet_strs.concat(),
            feet: feet_strs,
            end_foot,
            end_rule,
            allowed_arudhs: Vec::new(),
            source,
        }
    }
}

/// Generated universe of one meter (sub-meters included).
///
/// Both hemistich lists are deduplicated by pattern, keeping the first
/// occurrence in generation order; an Ajuz seen again under another Arudh only
/// extends its `allowed_arudhs`.
#[derive(Debug, Clone, Default)]
pub struct PatternUniverse {
    sadr: Vec<HemistichPattern>,
    ajuz: Vec<HemistichPattern>,
    sadr_index: AHashMap<String, usize>,
    ajuz_index: AHashMap<String, usize>,
    pairs: AHashSet<(String, String)>,
}

impl PatternUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sadr(&self) -> &[HemistichPattern] {
        &self.sadr
    }

    pub fn ajuz(&self) -> &[HemistichPattern] {
        &self.ajuz
    }

    pub fn pairs(&self) -> &AHashSet<(String, String)> {
        &self.pairs
    }

    /// Whether `(sadr, ajuz)` is a registered pair. Single-hemistich meters
    /// register their lines with an empty Ajuz.
    pub fn is_valid_pair(&self, sadr: &str, ajuz: &str) -> bool {
        // AHashSet<(String, String)> cannot be probed with borrowed halves
        self.pairs.contains(&(sadr.to_string(), ajuz.to_string()))
    }

    pub fn contains_sadr(&self, pattern: &str) -> bool {
        self.sadr_index.contains_key(pattern)
    }

    pub fn contains_ajuz(&self, pattern: &str) -> bool {
        self.ajuz_index.contains_key(pattern)
    }

    fn push_sadr(&mut self, entry: HemistichPattern) {
        if !self.sadr_index.contains_key(&entry.pattern) {
            self.sadr_index.insert(entry.pattern.clone(), self.sadr.len());
            self.sadr.push(entry);
        }
    }

    fn push_ajuz(&mut self, entry: HemistichPattern) {
        match self.ajuz_index.get(&entry.pattern) {
            Some(&at) => {
                let existing = &mut self.ajuz[at];
                for arudh in entry.allowed_arudhs {
                    if !existing.allowed_arudhs.contains(&arudh) {
                        existing.allowed_arudhs.push(arudh);
                    }
                }
            }
            None => {
                self.ajuz_index.insert(entry.pattern.clone(), self.ajuz.len());
                self.ajuz.push(entry);
            }
        }
    }

    /// Fold `other` into `self`, preserving `self`'s entries first.
    pub fn merge(&mut self, other: PatternUniverse) {
        for entry in other.sadr {
            self.push_sadr(entry);
        }
        for entry in other.ajuz {
            self.push_ajuz(entry);
        }
        self.pairs.extend(other.pairs);
    }
}

/// Cartesian product of `positions`, last position varying fastest.
pub fn cartesian(positions: &[Vec<Foot>]) -> Vec<Vec<Foot>> {
    let mut out: Vec<Vec<Foot>> = vec![Vec::new()];
    for choices in positions {
        let mut next = Vec::with_capacity(out.len() * choices.len());
        for prefix in &out {
            for choice in choices {
                let mut row = prefix.clone();
                row.push(choice.clone());
                next.push(row);
            }
        }
        out = next;
    }
    out
}

fn hemistichs(hashw: &[Vec<Foot>], endings: Vec<Foot>, source: &'static str) -> Vec<HemistichPattern> {
    let mut positions = hashw.to_vec();
    positions.push(endings);
    cartesian(&positions)
        .iter()
        .map(|feet| HemistichPattern::from_feet(feet, source))
        .collect()
}

/// Expand `bahr` and its sub-meters into a pattern universe.
pub fn generate(bahr: &Bahr) -> PatternUniverse {
    let mut universe = PatternUniverse::new();
    let last = bahr.last_tafeela();

    match &bahr.endings {
        Endings::Single(rules) => {
            let endings = bahr.end_feet(rules);
            let hashw = bahr.hashw_variants(Shatr::Sadr);
            for line in hemistichs(&hashw, endings, bahr.name) {
                universe.pairs.insert((line.pattern.clone(), String::new()));
                universe.push_sadr(line);
            }
        }
        Endings::Paired(map) => {
            let sadr_hashw = bahr.hashw_variants(Shatr::Sadr);
            let ajuz_hashw = bahr.hashw_variants(Shatr::Ajuz);

            for (arudh_rule, dharb_rules) in map {
                let Some(arudh) = last.and_then(|t| t.apply(*arudh_rule)) else {
                    continue;
                };
                let arudh_str = arudh.pattern();
                let sadrs = hemistichs(&sadr_hashw, vec![arudh], bahr.name);

                let dharbs: Vec<Foot> = dharb_rules.iter().filter_map(|r| last?.apply(*r)).collect();
                let ajuzs: Vec<HemistichPattern> = if dharbs.is_empty() {
                    Vec::new()
                } else {
                    hemistichs(&ajuz_hashw, dedup_feet(dharbs), bahr.name)
                        .into_iter()
                        .map(|mut a| {
                            a.allowed_arudhs.push(arudh_str.clone());
                            a
                        })
                        .collect()
                };

                for sadr in &sadrs {
                    for ajuz in &ajuzs {
                        universe
                            .pairs
                            .insert((sadr.pattern.clone(), ajuz.pattern.clone()));
                    }
                }
                for sadr in sadrs {
                    universe.push_sadr(sadr);
                }
                for ajuz in ajuzs {
                    universe.push_ajuz(ajuz);
                }
            }
        }
    }

    for sub in &bahr.sub_bahrs {
        universe.merge(generate(sub));
    }

    debug!(
        meter = bahr.name,
        sadr = universe.sadr.len(),
        ajuz = universe.ajuz.len(),
        pairs = universe.pairs.len(),
        "generated pattern universe"
    );
    universe
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bahr::classical_meters;
    use crate::tafeela::Tafeela;

    fn meter(name: &str) -> Bahr {
        classical_meters()
            .into_iter()
            .find(|b| b.name == name)
            .unwrap()
    }

    #[test]
    fn cartesian_last_position_fastest() {
        let a = Tafeela::Fawlon.enumerate_variants();
        let b = vec![Tafeela::Faelon.canonical()];
        let rows = cartesian(&[a[..2].to_vec(), b]);
        let flat: Vec<String> = rows
            .iter()
            .map(|r| r.iter().map(Foot::pattern).collect::<Vec<_>>().concat())
            .collect();
        assert_eq!(flat, vec!["1101010110", "110110110"]);
    }

    #[test]
    fn cartesian_of_nothing_is_one_empty_row() {
        assert_eq!(cartesian(&[]).len(), 1);
    }

    #[test]
    fn hazaj_universe() {
        let universe = generate(&meter("hazaj"));
        let sadr: Vec<&str> = universe.sadr().iter().map(|s| s.pattern.as_str()).collect();
        assert_eq!(
            sadr,
            vec![
                "11010101101010",
                "1101011101010",
                "1101010110101",
                "110101110101"
            ]
        );
        let ajuz: Vec<&str> = universe.ajuz().iter().map(|a| a.pattern.as_str()).collect();
        assert_eq!(
            ajuz,
            vec![
                "11010101101010",
                "110101011010",
                "1101011101010",
                "11010111010"
            ]
        );
        assert_eq!(universe.pairs().len(), 16);
        assert!(universe.is_valid_pair("110101110101", "11010111010"));
    }

    #[test]
    fn ajuz_records_every_arudh_it_answers() {
        let universe = generate(&meter("hazaj"));
        for ajuz in universe.ajuz() {
            assert_eq!(ajuz.allowed_arudhs, vec!["1101010", "110101"]);
        }
    }

    #[test]
    fn single_shatr_pairs_have_empty_ajuz() {
        let rajaz = meter("rajaz");
        let manhook = rajaz
            .sub_bahrs
            .iter()
            .find(|b| b.name == "rajaz_manhook")
            .unwrap();
        let universe = generate(manhook);
        assert!(universe.ajuz().is_empty());
        assert!(!universe.sadr().is_empty());
        for (sadr, ajuz) in universe.pairs() {
            assert!(ajuz.is_empty());
            assert!(universe.contains_sadr(sadr));
        }
    }

    #[test]
    fn sadr_is_tagged_with_its_arudh() {
        let universe = generate(&meter("taweel"));
        let first = &universe.sadr()[0];
        assert_eq!(first.feet.len(), 4);
        assert_eq!(first.end_foot, "110110");
        assert_eq!(first.end_rule, Zihaf::Qabadh);
        assert_eq!(first.pattern, "11010110101011010110110");
    }
}
