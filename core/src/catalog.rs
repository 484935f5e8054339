// core/src/catalog.rs
//
// The meter catalog: an explicit, constructed owner of the meter definitions
// and their lazily generated pattern universes. Universes are built on first
// use and shared read-only afterwards.

use once_cell::sync::OnceCell;

use crate::bahr::{classical_meters, Bahr};
use crate::patterns::{generate, PatternUniverse};

#[derive(Debug)]
struct Entry {
    bahr: Bahr,
    universe: OnceCell<PatternUniverse>,
}

/// Ordered collection of top-level meters.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::classical()
    }
}

impl Catalog {
    /// The sixteen classical meters.
    pub fn classical() -> Self {
        Self::from_meters(classical_meters())
    }

    pub fn from_meters(meters: Vec<Bahr>) -> Self {
        Self {
            entries: meters
                .into_iter()
                .map(|bahr| Entry {
                    bahr,
                    universe: OnceCell::new(),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Meter names in catalog order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.bahr.name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.bahr.name == name)
    }

    pub fn bahr(&self, name: &str) -> Option<&Bahr> {
        self.position(name).map(|i| &self.entries[i].bahr)
    }

    /// Generated universe for `name`, built on first access.
    pub fn universe(&self, name: &str) -> Option<&PatternUniverse> {
        self.position(name).map(|i| self.universe_at(i))
    }

    fn universe_at(&self, index: usize) -> &PatternUniverse {
        let entry = &self.entries[index];
        entry.universe.get_or_init(|| generate(&entry.bahr))
    }

    /// `(meter, universe)` for every meter, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&Bahr, &PatternUniverse)> + '_ {
        (0..self.entries.len()).map(move |i| (&self.entries[i].bahr, self.universe_at(i)))
    }

    /// Force every universe now instead of on first match.
    pub fn warm_up(&self) {
        for i in 0..self.entries.len() {
            self.universe_at(i);
        }
    }
}
