// core/src/matcher.rs
//
// ScansionMatcher: ranks catalog meters against a scanned verse, then aligns
// the verse foot by foot against the chosen meter's admissible feet.
//
// Foot alignment is greedy and advances the cursor by the length of the foot
// it settled on, not by what the input actually matched. A length-changing
// defect that is not admissible at that position therefore shifts every later
// foot; that is the known limit of this heuristic.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::{debug, trace};

use crate::bahr::Shatr;
use crate::catalog::Catalog;
use crate::error::{ArudError, Result};
use crate::patterns::HemistichPattern;
use crate::similarity::{round_to, score};
use crate::Config;

/// Best reference of one hemistich within one meter.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentMatch {
    /// `-1.0` when the meter has no reference for this hemistich.
    pub score: f64,
    pub reference: Option<HemistichPattern>,
}

impl ComponentMatch {
    pub fn reference_pattern(&self) -> &str {
        self.reference.as_ref().map_or("", |r| r.pattern.as_str())
    }
}

/// One ranked detection result.
#[derive(Debug, Clone, Serialize)]
pub struct MeterCandidate {
    pub meter: &'static str,
    pub score: f64,
    pub sadr_match: ComponentMatch,
    pub ajuz_match: Option<ComponentMatch>,
    /// The chosen references form a registered (Sadr, Ajuz) pair.
    pub valid_pair: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FootStatus {
    Ok,
    Broken,
    Missing,
    ExtraBits,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootDiagnosis {
    pub foot_index: usize,
    pub expected_pattern: String,
    pub actual_segment: String,
    pub score: f64,
    pub status: FootStatus,
}

/// Text and patterns of one verse after conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScannedVerse {
    pub sadr_text: String,
    pub ajuz_text: String,
    pub sadr_arudi: String,
    pub ajuz_arudi: String,
    pub sadr_pattern: String,
    /// Empty for a single-hemistich verse.
    pub ajuz_pattern: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerseAnalysis {
    pub verse_index: usize,
    pub sadr_text: String,
    pub ajuz_text: String,
    pub sadr_arudi: String,
    pub ajuz_arudi: String,
    pub input_pattern: String,
    pub best_ref_pattern: String,
    pub score: f64,
    pub sadr_analysis: Vec<FootDiagnosis>,
    pub ajuz_analysis: Option<Vec<FootDiagnosis>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoemAnalysis {
    pub meter: String,
    pub verses: Vec<VerseAnalysis>,
}

pub struct ScansionMatcher {
    catalog: Catalog,
    config: Config,
}

impl ScansionMatcher {
    pub fn new(config: Config) -> Self {
        Self::with_catalog(Catalog::classical(), config)
    }

    pub fn with_catalog(catalog: Catalog, config: Config) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn similarity(&self, reference: &str, input: &str) -> f64 {
        score(reference, input, self.config.similarity_exponent)
    }

    /// First reference with the strictly highest score.
    pub fn best_component_match(&self, input: &str, references: &[HemistichPattern]) -> ComponentMatch {
        let mut best = ComponentMatch {
            score: -1.0,
            reference: None,
        };
        for reference in references {
            let s = self.similarity(&reference.pattern, input);
            if s > best.score {
                best.score = s;
                best.reference = Some(reference.clone());
            }
        }
        best
    }

    /// Rank every meter for one verse, best first.
    pub fn detect(&self, sadr_pattern: &str, ajuz_pattern: &str) -> Vec<MeterCandidate> {
        let mut candidates: Vec<MeterCandidate> = self
            .catalog
            .iter()
            .map(|(bahr, universe)| {
                let sadr_match = self.best_component_match(sadr_pattern, universe.sadr());
                let ajuz_match = (!ajuz_pattern.is_empty())
                    .then(|| self.best_component_match(ajuz_pattern, universe.ajuz()));

                let valid_pair = match (&sadr_match.reference, &ajuz_match) {
                    (Some(s), None) => universe.is_valid_pair(&s.pattern, ""),
                    (Some(s), Some(a)) => match &a.reference {
                        Some(a) => universe.is_valid_pair(&s.pattern, &a.pattern),
                        None => false,
                    },
                    (None, _) => false,
                };

                let score = match &ajuz_match {
                    Some(a) => (sadr_match.score + a.score) / 2.0,
                    None => sadr_match.score,
                };

                MeterCandidate {
                    meter: bahr.name,
                    score,
                    sadr_match,
                    ajuz_match,
                    valid_pair,
                }
            })
            .collect();

        // stable: equal keys keep catalog order
        candidates.sort_by(|a, b| self.rank_key(b).cmp_key(&self.rank_key(a)));

        if let Some(best) = candidates.first() {
            debug!(meter = best.meter, score = best.score, valid_pair = best.valid_pair, "detected");
        }
        candidates
    }

    fn rank_key(&self, candidate: &MeterCandidate) -> RankKey {
        RankKey {
            score: round_to(candidate.score, self.config.score_precision),
            valid_pair: candidate.valid_pair,
            priority: self.config.priority(candidate.meter),
        }
    }

    /// Greedy foot alignment of `input` against per-position admissible feet.
    ///
    /// With no admissible feet the best reference's own feet are used, one
    /// candidate per position. Anything in `input` other than `0`/`1` is
    /// ignored.
    pub fn analyze_feet(
        &self,
        input: &str,
        allowed_feet: &[Vec<String>],
        best_reference: Option<&HemistichPattern>,
    ) -> Vec<FootDiagnosis> {
        let fallback: Vec<Vec<String>>;
        let positions: &[Vec<String>] = if allowed_feet.is_empty() {
            fallback = best_reference
                .map(|r| r.feet.iter().map(|f| vec![f.clone()]).collect())
                .unwrap_or_default();
            &fallback
        } else {
            allowed_feet
        };

        // segments are sliced by byte offset
        let input: String = input.chars().filter(|c| matches!(c, '0' | '1')).collect();
        let bits = input.as_bytes();
        let mut analysis = Vec::with_capacity(positions.len() + 1);
        let mut cursor = 0usize;

        for (foot_index, position) in positions.iter().enumerate() {
            let mut candidates: Vec<&String> = position.iter().collect();
            // stable: equal lengths keep declaration order
            candidates.sort_by(|a, b| b.len().cmp(&a.len()));

            let mut chosen: Option<&String> = None;
            let mut best_score = -1.0;
            for &candidate in &candidates {
                let end = (cursor + candidate.len()).min(bits.len());
                let segment = &input[cursor.min(bits.len())..end];
                if segment.is_empty() {
                    break;
                }
                let s = self.similarity(candidate, segment);
                if segment.len() == candidate.len() && s == 1.0 {
                    chosen = Some(candidate);
                    break;
                }
                if s > best_score {
                    best_score = s;
                    chosen = Some(candidate);
                }
            }

            let Some(expected) = chosen.or_else(|| candidates.first().copied()) else {
                analysis.push(FootDiagnosis {
                    foot_index,
                    expected_pattern: "?".to_string(),
                    actual_segment: "MISSING".to_string(),
                    score: 0.0,
                    status: FootStatus::Missing,
                });
                continue;
            };

            let end = (cursor + expected.len()).min(bits.len());
            let actual = &input[cursor.min(bits.len())..end];
            let final_score = self.similarity(expected, actual);
            let status = if actual.is_empty() {
                FootStatus::Missing
            } else if final_score == 1.0 {
                FootStatus::Ok
            } else {
                FootStatus::Broken
            };

            analysis.push(FootDiagnosis {
                foot_index,
                expected_pattern: expected.clone(),
                actual_segment: actual.to_string(),
                score: round_to(final_score, 2),
                status,
            });
            cursor = end.max(cursor);
        }

        if cursor < bits.len() {
            analysis.push(FootDiagnosis {
                foot_index: positions.len(),
                expected_pattern: String::new(),
                actual_segment: input[cursor..].to_string(),
                score: 0.0,
                status: FootStatus::ExtraBits,
            });
        }

        analysis
    }

    /// Diagnose one scanned verse against `meter`.
    pub fn diagnose(&self, verse_index: usize, verse: &ScannedVerse, meter: &str) -> Result<VerseAnalysis> {
        let (bahr, universe) = match (self.catalog.bahr(meter), self.catalog.universe(meter)) {
            (Some(b), Some(u)) => (b, u),
            _ => return Err(ArudError::UnknownMeter(meter.to_string())),
        };

        let sadr_match = self.best_component_match(&verse.sadr_pattern, universe.sadr());
        let ajuz_match = (!verse.ajuz_pattern.is_empty())
            .then(|| self.best_component_match(&verse.ajuz_pattern, universe.ajuz()));

        let sadr_analysis = self.analyze_feet(
            &verse.sadr_pattern,
            &bahr.allowed_feet_patterns(Shatr::Sadr),
            sadr_match.reference.as_ref(),
        );
        let ajuz_analysis = ajuz_match.as_ref().map(|m| {
            self.analyze_feet(
                &verse.ajuz_pattern,
                &bahr.allowed_feet_patterns(Shatr::Ajuz),
                m.reference.as_ref(),
            )
        });

        let score = match &ajuz_match {
            Some(a) => (sadr_match.score + a.score) / 2.0,
            None => sadr_match.score,
        };

        let mut best_ref_pattern = sadr_match.reference_pattern().to_string();
        if let Some(a) = &ajuz_match {
            best_ref_pattern.push_str(a.reference_pattern());
        }

        Ok(VerseAnalysis {
            verse_index,
            sadr_text: verse.sadr_text.clone(),
            ajuz_text: verse.ajuz_text.clone(),
            sadr_arudi: verse.sadr_arudi.clone(),
            ajuz_arudi: verse.ajuz_arudi.clone(),
            input_pattern: format!("{}{}", verse.sadr_pattern, verse.ajuz_pattern),
            best_ref_pattern,
            score: round_to(score, 2),
            sadr_analysis,
            ajuz_analysis,
        })
    }

    /// Detect one dominant meter across `verses` (unless forced) and diagnose
    /// every verse against it.
    pub fn analyze_verses(&self, verses: &[ScannedVerse], forced_meter: Option<&str>) -> Result<PoemAnalysis> {
        let meter = match forced_meter {
            Some(name) => {
                if !self.catalog.contains(name) {
                    return Err(ArudError::UnknownMeter(name.to_string()));
                }
                name.to_string()
            }
            None => self.dominant_meter(verses)?.to_string(),
        };
        debug!(meter = %meter, verses = verses.len(), "analysing poem");

        let verses = verses
            .iter()
            .enumerate()
            .map(|(i, verse)| {
                trace!(index = i, sadr = %verse.sadr_pattern, ajuz = %verse.ajuz_pattern, "verse");
                self.diagnose(i, verse, &meter)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PoemAnalysis { meter, verses })
    }

    /// Most frequent per-verse winner; ties go to the one detected first.
    fn dominant_meter(&self, verses: &[ScannedVerse]) -> Result<&'static str> {
        let mut tally: Vec<(&'static str, usize)> = Vec::new();
        for verse in verses {
            let Some(best) = self.detect(&verse.sadr_pattern, &verse.ajuz_pattern).into_iter().next() else {
                continue;
            };
            match tally.iter_mut().find(|(name, _)| *name == best.meter) {
                Some((_, count)) => *count += 1,
                None => tally.push((best.meter, 1)),
            }
        }

        let mut winner: Option<(&'static str, usize)> = None;
        for (name, count) in tally {
            if winner.map_or(true, |(_, best)| count > best) {
                winner = Some((name, count));
            }
        }
        winner.map(|(name, _)| name).ok_or(ArudError::NoMeterDetected)
    }
}

struct RankKey {
    score: f64,
    valid_pair: bool,
    priority: i32,
}

impl RankKey {
    fn cmp_key(&self, other: &RankKey) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then(self.valid_pair.cmp(&other.valid_pair))
            .then(self.priority.cmp(&other.priority))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> ScansionMatcher {
        ScansionMatcher::new(Config::default())
    }

    fn feet(positions: &[&[&str]]) -> Vec<Vec<String>> {
        positions
            .iter()
            .map(|p| p.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn consumed(analysis: &[FootDiagnosis]) -> usize {
        analysis
            .iter()
            .filter(|f| f.status != FootStatus::Missing)
            .map(|f| f.actual_segment.len())
            .sum()
    }

    #[test]
    fn empty_reference_list_scores_minus_one() {
        let m = matcher().best_component_match("1010", &[]);
        assert_eq!(m.score, -1.0);
        assert!(m.reference.is_none());
    }

    #[test]
    fn perfect_alignment() {
        let allowed = feet(&[&["11010", "1101"], &["1101010", "110110"]]);
        let analysis = matcher().analyze_feet("110101101010", &allowed, None);
        assert_eq!(analysis.len(), 2);
        assert!(analysis.iter().all(|f| f.status == FootStatus::Ok));
        assert_eq!(analysis[1].expected_pattern, "1101010");
    }

    #[test]
    fn longest_candidate_tried_first() {
        let allowed = feet(&[&["1101", "11010"]]);
        let analysis = matcher().analyze_feet("11010", &allowed, None);
        assert_eq!(analysis[0].expected_pattern, "11010");
        assert_eq!(analysis.len(), 1);
    }

    #[test]
    fn broken_foot_consumes_expected_length() {
        let allowed = feet(&[&["11010"], &["11010"]]);
        let analysis = matcher().analyze_feet("1111011010", &allowed, None);
        assert_eq!(analysis[0].status, FootStatus::Broken);
        assert_eq!(analysis[0].actual_segment, "11110");
        assert_eq!(analysis[1].status, FootStatus::Ok);
    }

    #[test]
    fn missing_and_extra_bits() {
        let allowed = feet(&[&["110"], &["110"]]);
        let short = matcher().analyze_feet("110", &allowed, None);
        assert_eq!(short[1].status, FootStatus::Missing);
        assert_eq!(short[1].actual_segment, "");
        assert_eq!(short[1].expected_pattern, "110");

        let long = matcher().analyze_feet("11011010", &allowed, None);
        let last = long.last().unwrap();
        assert_eq!(last.status, FootStatus::ExtraBits);
        assert_eq!(last.foot_index, 2);
        assert_eq!(last.actual_segment, "10");
    }

    #[test]
    fn position_without_candidates_is_missing() {
        let allowed = feet(&[&["110"], &[]]);
        let analysis = matcher().analyze_feet("110", &allowed, None);
        assert_eq!(analysis[1].expected_pattern, "?");
        assert_eq!(analysis[1].status, FootStatus::Missing);
    }

    #[test]
    fn alignment_accounts_for_every_bit() {
        let allowed = feet(&[&["11010", "1101"], &["1101010", "110110"], &["11010"]]);
        for input in ["1101011010101101", "11", "110111011010101101010110", ""] {
            let analysis = matcher().analyze_feet(input, &allowed, None);
            assert_eq!(consumed(&analysis), input.len(), "{input}");
        }
    }

    #[test]
    fn non_bit_characters_are_skipped() {
        let allowed = feet(&[&["11010"], &["11010"]]);
        let analysis = matcher().analyze_feet("110ب10 11010", &allowed, None);
        assert_eq!(analysis.len(), 2);
        assert!(analysis.iter().all(|f| f.status == FootStatus::Ok));

        let arabic = matcher().analyze_feet("فعولن", &allowed, None);
        assert!(arabic.iter().all(|f| f.status == FootStatus::Missing));
    }

    #[test]
    fn falls_back_to_reference_feet() {
        let reference = HemistichPattern {
            pattern: "110101101010".to_string(),
            feet: vec!["11010".to_string(), "1101010".to_string()],
            end_foot: "1101010".to_string(),
            end_rule: crate::Zihaf::NoZihaf,
            allowed_arudhs: Vec::new(),
            source: "hazaj",
        };
        let analysis = matcher().analyze_feet("110101101010", &[], Some(&reference));
        assert_eq!(analysis.len(), 2);
        assert!(analysis.iter().all(|f| f.status == FootStatus::Ok));
    }

    #[test]
    fn detect_ranks_exact_meter_first() {
        // hazaj: Mafaeelon Mafaeelon on both halves
        let top = matcher().detect("11010101101010", "11010101101010");
        assert_eq!(top[0].meter, "hazaj");
        assert_eq!(top[0].score, 1.0);
        assert!(top[0].valid_pair);
        assert_eq!(top.len(), 16);
    }

    #[test]
    fn unknown_forced_meter() {
        let verse = ScannedVerse {
            sadr_pattern: "110".to_string(),
            ..Default::default()
        };
        let err = matcher().analyze_verses(&[verse], Some("nope")).unwrap_err();
        assert_eq!(err, ArudError::UnknownMeter("nope".to_string()));
    }

    #[test]
    fn empty_batch_detects_nothing() {
        let err = matcher().analyze_verses(&[], None).unwrap_err();
        assert_eq!(err, ArudError::NoMeterDetected);
    }
}
