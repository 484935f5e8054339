//! Zihaf (internal-foot deviations) and Ellah (line-final deviations).
//!
//! Every rule is a plain value. `Zihaf::ops` lowers it to a short program of
//! [`Op`]s and [`apply`] interprets that program over an immutable bit slice,
//! returning a fresh sequence. A failed precondition yields `None`: the form is
//! simply not admissible, callers filter it out.
//!
//! Composite rules are flattened at definition time:
//! - paired Zihafs (Khabal, Shakal, ...) delete their indices highest first so
//!   an earlier deletion never shifts a later one, then quiesce;
//! - sequential Ellahs (Batr, KhabanAndQataa, ...) chain their parts in the
//!   declared order, each part seeing the previous result.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive bit-sequence operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Remove the bit at `index`. Out of range is a no-op.
    Delete(usize),
    /// Turn the mutaharrik at `index` into a sakin. Requires a `1` there.
    Quiesce(usize),
    /// Insert `bit` at `index` (clamped to the end).
    Insert(usize, u8),
    /// Require the sequence to end with these bits.
    ExpectTail(&'static [u8]),
    /// Drop the last bit.
    DeleteLast,
    /// Force the last bit to `0`.
    QuiesceLast,
    /// Insert `bit` just before the last position.
    InsertBeforeLast(u8),
    /// Append `bit`.
    Push(u8),
}

/// Run `ops` over `bits`. `None` when a precondition does not hold.
pub fn apply(bits: &[u8], ops: &[Op]) -> Option<Vec<u8>> {
    let mut out = bits.to_vec();
    for op in ops {
        match *op {
            Op::Delete(index) => {
                if index < out.len() {
                    out.remove(index);
                }
            }
            Op::Quiesce(index) => match out.get_mut(index) {
                Some(bit) if *bit == 1 => *bit = 0,
                _ => return None,
            },
            Op::Insert(index, bit) => {
                let index = index.min(out.len());
                out.insert(index, bit);
            }
            Op::ExpectTail(tail) => {
                if !out.ends_with(tail) {
                    return None;
                }
            }
            Op::DeleteLast => {
                out.pop();
            }
            Op::QuiesceLast => {
                if let Some(last) = out.last_mut() {
                    *last = 0;
                }
            }
            Op::InsertBeforeLast(bit) => {
                let index = out.len().saturating_sub(1);
                out.insert(index, bit);
            }
            Op::Push(bit) => out.push(bit),
        }
    }
    Some(out)
}

const SABAB: &[u8] = &[1, 0];
const WATAD_MAJMU: &[u8] = &[1, 1, 0];
const WATAD_MAFRUQ: &[u8] = &[1, 0, 1];

/// A named metrical transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zihaf {
    /// Salim: the canonical foot, untouched.
    NoZihaf,

    // single deletions
    Khaban,
    Tay,
    Waqas,
    Qabadh,
    Kaff,
    Akal,
    Kasf,
    Tasheeth,
    Thalm,
    // single quiescings
    Edmaar,
    Asab,
    Ziyada,

    // paired Zihafs
    Khabal,
    Khazal,
    Shakal,
    Nakas,
    TayAndKasf,
    Tharm,

    // Ellahs
    Hadhf,
    HadhfAndKhaban,
    Qataf,
    Qataa,
    Tatheel,
    Tasbeegh,
    TatheelAndEdmaar,
    Tarfeel,
    TarfeelAndEdmaar,
    TarfeelAndKhaban,
    KhabanAndQataa,
    QataaAndEdmaar,
    Hathath,
    HathathAndEdmaar,
    Salam,
    Waqf,
    WaqfAndTay,
    KhabalAndKasf,
    Qasar,
    ThalmAndQasar,
    Batr,
}

impl Zihaf {
    /// The flattened operation program for this rule.
    pub fn ops(self) -> &'static [Op] {
        use Op::*;
        match self {
            Zihaf::NoZihaf => &[],

            Zihaf::Khaban | Zihaf::Waqas => &[Delete(1)],
            Zihaf::Tay => &[Delete(3)],
            Zihaf::Qabadh | Zihaf::Akal => &[Delete(4)],
            Zihaf::Kaff | Zihaf::Kasf => &[Delete(6)],
            Zihaf::Tasheeth => &[Delete(2)],
            Zihaf::Thalm => &[Delete(0)],
            Zihaf::Edmaar => &[Quiesce(1)],
            Zihaf::Asab => &[Quiesce(4)],
            Zihaf::Ziyada => &[Insert(3, 1)],

            Zihaf::Khabal => &[Delete(3), Delete(1)],
            Zihaf::Khazal => &[Delete(3), Quiesce(1)],
            Zihaf::Shakal => &[Delete(6), Delete(1)],
            Zihaf::Nakas => &[Delete(6), Quiesce(4)],
            Zihaf::TayAndKasf => &[Delete(6), Delete(3)],
            Zihaf::Tharm => &[Delete(4), Delete(0)],

            Zihaf::Hadhf => &[ExpectTail(SABAB), DeleteLast, DeleteLast],
            Zihaf::HadhfAndKhaban => &[ExpectTail(SABAB), DeleteLast, DeleteLast, Delete(1)],
            Zihaf::Qataf => &[ExpectTail(SABAB), DeleteLast, DeleteLast, Quiesce(4)],
            Zihaf::Qataa | Zihaf::Qasar => &[ExpectTail(SABAB), DeleteLast, QuiesceLast],
            Zihaf::Tatheel => &[ExpectTail(WATAD_MAJMU), InsertBeforeLast(0)],
            Zihaf::Tasbeegh => &[ExpectTail(SABAB), InsertBeforeLast(0)],
            Zihaf::TatheelAndEdmaar => &[ExpectTail(WATAD_MAJMU), InsertBeforeLast(0), Quiesce(1)],
            Zihaf::Tarfeel => &[Push(1), Push(0)],
            Zihaf::TarfeelAndEdmaar => &[Push(1), Push(0), Quiesce(1)],
            Zihaf::TarfeelAndKhaban => &[Delete(1), Push(1), Push(0)],
            Zihaf::KhabanAndQataa => &[ExpectTail(SABAB), DeleteLast, QuiesceLast, Delete(1)],
            Zihaf::QataaAndEdmaar => &[ExpectTail(SABAB), DeleteLast, QuiesceLast, Quiesce(1)],
            Zihaf::Hathath => &[ExpectTail(WATAD_MAJMU), DeleteLast, DeleteLast, DeleteLast],
            Zihaf::HathathAndEdmaar => &[
                ExpectTail(WATAD_MAJMU),
                DeleteLast,
                DeleteLast,
                DeleteLast,
                Quiesce(1),
            ],
            Zihaf::Salam => &[ExpectTail(WATAD_MAFRUQ), DeleteLast, DeleteLast, DeleteLast],
            Zihaf::Waqf => &[ExpectTail(WATAD_MAFRUQ), QuiesceLast],
            Zihaf::WaqfAndTay => &[Delete(3), ExpectTail(WATAD_MAFRUQ), QuiesceLast],
            // Kasf lands on index 4 once Khabal removed two bits in front of it.
            Zihaf::KhabalAndKasf => &[Delete(3), Delete(1), Delete(4)],
            Zihaf::ThalmAndQasar => &[Delete(0), ExpectTail(SABAB), DeleteLast, QuiesceLast],
            Zihaf::Batr => &[
                ExpectTail(SABAB),
                DeleteLast,
                DeleteLast,
                ExpectTail(SABAB),
                DeleteLast,
                QuiesceLast,
            ],
        }
    }

    /// Apply this rule to a bit sequence.
    pub fn apply(self, bits: &[u8]) -> Option<Vec<u8>> {
        apply(bits, self.ops())
    }

    /// Rules that may only appear on the last foot of a hemistich.
    pub fn is_ellah(self) -> bool {
        matches!(
            self,
            Zihaf::Hadhf
                | Zihaf::HadhfAndKhaban
                | Zihaf::Qataf
                | Zihaf::Qataa
                | Zihaf::Tatheel
                | Zihaf::Tasbeegh
                | Zihaf::TatheelAndEdmaar
                | Zihaf::Tarfeel
                | Zihaf::TarfeelAndEdmaar
                | Zihaf::TarfeelAndKhaban
                | Zihaf::KhabanAndQataa
                | Zihaf::QataaAndEdmaar
                | Zihaf::Hathath
                | Zihaf::HathathAndEdmaar
                | Zihaf::Salam
                | Zihaf::Waqf
                | Zihaf::WaqfAndTay
                | Zihaf::KhabalAndKasf
                | Zihaf::Qasar
                | Zihaf::ThalmAndQasar
                | Zihaf::Batr
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Zihaf::NoZihaf => "no_zihaf",
            Zihaf::Khaban => "khaban",
            Zihaf::Tay => "tay",
            Zihaf::Waqas => "waqas",
            Zihaf::Qabadh => "qabadh",
            Zihaf::Kaff => "kaff",
            Zihaf::Akal => "akal",
            Zihaf::Kasf => "kasf",
            Zihaf::Tasheeth => "tasheeth",
            Zihaf::Thalm => "thalm",
            Zihaf::Edmaar => "edmaar",
            Zihaf::Asab => "asab",
            Zihaf::Ziyada => "ziyada",
            Zihaf::Khabal => "khabal",
            Zihaf::Khazal => "khazal",
            Zihaf::Shakal => "shakal",
            Zihaf::Nakas => "nakas",
            Zihaf::TayAndKasf => "tay_and_kasf",
            Zihaf::Tharm => "tharm",
            Zihaf::Hadhf => "hadhf",
            Zihaf::HadhfAndKhaban => "hadhf_and_khaban",
            Zihaf::Qataf => "qataf",
            Zihaf::Qataa => "qataa",
            Zihaf::Tatheel => "tatheel",
            Zihaf::Tasbeegh => "tasbeegh",
            Zihaf::TatheelAndEdmaar => "tatheel_and_edmaar",
            Zihaf::Tarfeel => "tarfeel",
            Zihaf::TarfeelAndEdmaar => "tarfeel_and_edmaar",
            Zihaf::TarfeelAndKhaban => "tarfeel_and_khaban",
            Zihaf::KhabanAndQataa => "khaban_and_qataa",
            Zihaf::QataaAndEdmaar => "qataa_and_edmaar",
            Zihaf::Hathath => "hathath",
            Zihaf::HathathAndEdmaar => "hathath_and_edmaar",
            Zihaf::Salam => "salam",
            Zihaf::Waqf => "waqf",
            Zihaf::WaqfAndTay => "waqf_and_tay",
            Zihaf::KhabalAndKasf => "khabal_and_kasf",
            Zihaf::Qasar => "qasar",
            Zihaf::ThalmAndQasar => "thalm_and_qasar",
            Zihaf::Batr => "batr",
        }
    }
}

impl fmt::Display for Zihaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render bits as an ASCII `0`/`1` string.
pub fn bits_to_string(bits: &[u8]) -> String {
    bits.iter().map(|b| if *b == 0 { '0' } else { '1' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(z: Zihaf, bits: &str) -> Option<String> {
        let parsed: Vec<u8> = bits.bytes().map(|b| b - b'0').collect();
        z.apply(&parsed).map(|out| bits_to_string(&out))
    }

    #[test]
    fn single_deletions() {
        assert_eq!(run(Zihaf::Khaban, "1010110").as_deref(), Some("110110"));
        assert_eq!(run(Zihaf::Tay, "1010110").as_deref(), Some("101110"));
        assert_eq!(run(Zihaf::Qabadh, "11010").as_deref(), Some("1101"));
        assert_eq!(run(Zihaf::Thalm, "11010").as_deref(), Some("1010"));
    }

    #[test]
    fn deletion_past_the_end_keeps_the_foot() {
        assert_eq!(run(Zihaf::Kaff, "11010").as_deref(), Some("11010"));
    }

    #[test]
    fn quiesce_requires_mutaharrik() {
        assert_eq!(run(Zihaf::Edmaar, "1110110").as_deref(), Some("1010110"));
        assert_eq!(run(Zihaf::Edmaar, "1010110"), None);
    }

    #[test]
    fn paired_deletions_use_original_indices() {
        // Khabal drops indices 3 and 1 of the untouched foot.
        assert_eq!(run(Zihaf::Khabal, "1010110").as_deref(), Some("11110"));
        assert_eq!(run(Zihaf::Tharm, "11010").as_deref(), Some("101"));
        assert_eq!(run(Zihaf::Nakas, "1101110").as_deref(), Some("110101"));
    }

    #[test]
    fn ellah_preconditions() {
        assert_eq!(run(Zihaf::Hadhf, "11010").as_deref(), Some("110"));
        assert_eq!(run(Zihaf::Hadhf, "1101"), None);
        assert_eq!(run(Zihaf::Qataa, "1010110").as_deref(), Some("101010"));
        assert_eq!(run(Zihaf::Tatheel, "10110").as_deref(), Some("101100"));
        assert_eq!(run(Zihaf::Waqf, "1010101").as_deref(), Some("1010100"));
        assert_eq!(run(Zihaf::Salam, "1010101").as_deref(), Some("1010"));
    }

    #[test]
    fn sequential_composites_chain_in_order() {
        assert_eq!(run(Zihaf::Batr, "11010").as_deref(), Some("10"));
        assert_eq!(run(Zihaf::KhabanAndQataa, "1010110").as_deref(), Some("11010"));
        assert_eq!(run(Zihaf::TarfeelAndKhaban, "10110").as_deref(), Some("111010"));
        assert_eq!(run(Zihaf::KhabalAndKasf, "1010101").as_deref(), Some("1110"));
        assert_eq!(run(Zihaf::Qataf, "1101110").as_deref(), Some("11010"));
    }

    #[test]
    fn no_zihaf_is_identity() {
        assert_eq!(run(Zihaf::NoZihaf, "1011010").as_deref(), Some("1011010"));
    }
}
