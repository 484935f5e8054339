// core/src/tafeela.rs
//
// Metrical feet (Tafeelat). A `Tafeela` names a canonical bit sequence and the
// rules it admits; a `Foot` is one concrete (possibly transformed) instance.
// Feet compare by bits only, so two catalog entries with the same shape
// (e.g. Faelaton / FaeLaton) are interchangeable once rendered.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::zihaf::{bits_to_string, Zihaf};

/// Catalog of the ten classical feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tafeela {
    /// فعولن
    Fawlon,
    /// فاعلن
    Faelon,
    /// مفاعيلن
    Mafaeelon,
    /// مستفعلن
    Mustafelon,
    /// متفاعلن
    Mutafaelon,
    /// مفاعلتن
    Mafaelaton,
    /// مفعولات
    Mafoolato,
    /// فاع لاتن (separated watad)
    FaeLaton,
    /// مستفع لن (separated watad)
    MustafeLon,
    /// فاعلاتن
    Faelaton,
}

impl Tafeela {
    pub fn name(self) -> &'static str {
        match self {
            Tafeela::Fawlon => "فعولن",
            Tafeela::Faelon => "فاعلن",
            Tafeela::Mafaeelon => "مفاعيلن",
            Tafeela::Mustafelon => "مستفعلن",
            Tafeela::Mutafaelon => "متفاعلن",
            Tafeela::Mafaelaton => "مفاعلتن",
            Tafeela::Mafoolato => "مفعولات",
            Tafeela::FaeLaton => "فاع لاتن",
            Tafeela::MustafeLon => "مستفع لن",
            Tafeela::Faelaton => "فاعلاتن",
        }
    }

    /// Canonical (Salim) bits.
    pub fn bits(self) -> &'static [u8] {
        match self {
            Tafeela::Fawlon => &[1, 1, 0, 1, 0],
            Tafeela::Faelon => &[1, 0, 1, 1, 0],
            Tafeela::Mafaeelon => &[1, 1, 0, 1, 0, 1, 0],
            Tafeela::Mustafelon | Tafeela::MustafeLon => &[1, 0, 1, 0, 1, 1, 0],
            Tafeela::Mutafaelon => &[1, 1, 1, 0, 1, 1, 0],
            Tafeela::Mafaelaton => &[1, 1, 0, 1, 1, 1, 0],
            Tafeela::Mafoolato => &[1, 0, 1, 0, 1, 0, 1],
            Tafeela::FaeLaton | Tafeela::Faelaton => &[1, 0, 1, 1, 0, 1, 0],
        }
    }

    /// Zihafs admissible in an internal position, in declaration order.
    pub fn allowed_zihafs(self) -> &'static [Zihaf] {
        use Zihaf::*;
        match self {
            Tafeela::Fawlon => &[Qabadh, Thalm, Tharm],
            Tafeela::Faelon => &[Khaban, Tasheeth],
            Tafeela::Mafaeelon => &[Qabadh, Kaff],
            Tafeela::Mustafelon => &[Khaban, Tay, Khabal],
            Tafeela::Mutafaelon => &[Edmaar, Waqas, Khazal],
            Tafeela::Mafaelaton => &[Asab, Akal, Nakas],
            Tafeela::Mafoolato => &[Khaban, Tay, Khabal, Kasf],
            Tafeela::FaeLaton => &[Kaff],
            Tafeela::MustafeLon => &[Khaban, Kaff, Tay, Shakal],
            Tafeela::Faelaton => &[Khaban, Kaff, Shakal],
        }
    }

    /// The untransformed foot.
    pub fn canonical(self) -> Foot {
        Foot {
            tafeela: self,
            bits: self.bits().to_vec(),
            rule: Zihaf::NoZihaf,
        }
    }

    /// Apply `rule` to the canonical foot; `None` when its precondition fails.
    pub fn apply(self, rule: Zihaf) -> Option<Foot> {
        rule.apply(self.bits()).map(|bits| Foot {
            tafeela: self,
            bits,
            rule,
        })
    }

    /// Canonical foot followed by every admissible transform, tagged with the
    /// rule that produced it. Not deduplicated, so callers can still filter
    /// by rule before collapsing equal shapes.
    pub fn forms(self) -> Vec<Foot> {
        let mut out = vec![self.canonical()];
        out.extend(
            self.allowed_zihafs()
                .iter()
                .filter_map(|rule| self.apply(*rule)),
        );
        out
    }

    /// Every distinct admissible shape, canonical first.
    pub fn enumerate_variants(self) -> Vec<Foot> {
        dedup_feet(self.forms())
    }
}

impl fmt::Display for Tafeela {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete foot: the bits plus where they came from.
#[derive(Debug, Clone)]
pub struct Foot {
    pub tafeela: Tafeela,
    pub bits: Vec<u8>,
    pub rule: Zihaf,
}

impl Foot {
    pub fn pattern(&self) -> String {
        bits_to_string(&self.bits)
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

impl PartialEq for Foot {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl Eq for Foot {}

impl Hash for Foot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl fmt::Display for Foot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern())
    }
}

/// Keep the first foot of every distinct shape, preserving order.
pub fn dedup_feet(feet: Vec<Foot>) -> Vec<Foot> {
    let mut out: Vec<Foot> = Vec::with_capacity(feet.len());
    for foot in feet {
        if !out.contains(&foot) {
            out.push(foot);
        }
    }
    out
}
