//! Score blending — combines classifier probabilities with rule-based career
//! heuristics and an experience boost, then renormalizes the top careers into
//! integer confidences.
//!
//! Algorithm, per career:
//! 1. `h` = fixed heuristic adjustment for that career (usually 0)
//! 2. `blended = max(0, p × W_MODEL + h × W_HEURISTIC) × (1 + ln(1 + years) × 0.05)`
//! 3. Stable sort descending (ties keep `Career::ALL` order), keep the top 5
//! 4. `confidence = round(blended / Σ top-5 × 100)`, then nudge the entries with
//!    the largest rounding error by one point each until the total is exactly 100

use std::cmp::Ordering;

use tracing::warn;

use crate::models::career::Career;
use crate::recommendation::features::{EncodedProfile, ProfileSignals};

pub const W_MODEL: f64 = 0.8;
pub const W_HEURISTIC: f64 = 0.2;
pub const EXPERIENCE_BOOST_RATE: f64 = 0.05;
pub const TOP_K: usize = 5;

const RESEARCH_MIN_EDUCATION: u8 = 2; // Master
const RESEARCH_PENALTY: f64 = 0.15;
const DATA_SCIENCE_MIN_TECH: u32 = 4;
const DATA_SCIENCE_BOOST: f64 = 0.10;
const SOFTWARE_MIN_TECH: u32 = 3;
const SOFTWARE_BOOST: f64 = 0.10;
const MARKETING_TRAIT_THRESHOLD: f64 = 0.7;
const MARKETING_BOOST: f64 = 0.12;

/// A ranked career with its raw blended score and renormalized confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct CareerScore {
    pub career: Career,
    pub score: f64,
    pub confidence: u32,
}

/// Additive rule-based correction for a single career.
pub fn heuristic_adjustment(career: Career, signals: &ProfileSignals) -> f64 {
    match career {
        Career::ResearchScientist if signals.education_encoded < RESEARCH_MIN_EDUCATION => {
            -RESEARCH_PENALTY
        }
        Career::DataScientist if signals.tech_skill_count >= DATA_SCIENCE_MIN_TECH => {
            DATA_SCIENCE_BOOST
        }
        Career::SoftwareEngineer
            if signals.java_flag && signals.tech_skill_count >= SOFTWARE_MIN_TECH =>
        {
            SOFTWARE_BOOST
        }
        Career::MarketingSpecialist
            if signals.creative > MARKETING_TRAIT_THRESHOLD
                && signals.social > MARKETING_TRAIT_THRESHOLD =>
        {
            MARKETING_BOOST
        }
        _ => 0.0,
    }
}

/// `ln(1 + years) × 0.05`, applied uniformly to every career.
pub fn experience_boost(experience: u32) -> f64 {
    f64::from(experience).ln_1p() * EXPERIENCE_BOOST_RATE
}

/// Blended score for one career. Only the model + heuristic term is clamped;
/// the experience multiplier scales the clamped value.
pub fn blended_score(base: f64, career: Career, signals: &ProfileSignals) -> f64 {
    let h = heuristic_adjustment(career, signals);
    let combined = (base * W_MODEL + h * W_HEURISTIC).max(0.0);
    combined * (1.0 + experience_boost(signals.experience))
}

/// Ranks all careers and returns the top [`TOP_K`] with confidences.
///
/// `probabilities` is indexed by `Career::index()`.
pub fn blend(probabilities: &[f64; Career::COUNT], encoded: &EncodedProfile) -> Vec<CareerScore> {
    let signals = &encoded.signals;

    let mut ranked: Vec<(Career, f64)> = Career::ALL
        .into_iter()
        .map(|career| {
            (
                career,
                blended_score(probabilities[career.index()], career, signals),
            )
        })
        .collect();

    // `sort_by` is stable, so equal scores stay in career order.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(TOP_K);

    renormalize(ranked)
}

/// Converts blended scores into integer percentages.
///
/// Each entry is rounded half-to-even, which can leave the total up to two
/// points away from 100. The drift is then removed one point at a time: the
/// entries rounded down the furthest gain a point, or the entries rounded up
/// the furthest lose one. Ties go to the earlier entry when adding and the
/// later entry when removing, so confidences stay in descending order.
///
/// When every selected score is zero there is nothing to be proportional to,
/// and 100 is split evenly instead, with any remainder going to the earliest
/// entries.
fn renormalize(ranked: Vec<(Career, f64)>) -> Vec<CareerScore> {
    let total: f64 = ranked.iter().map(|(_, score)| score).sum();

    if total > 0.0 {
        let exact: Vec<f64> = ranked
            .iter()
            .map(|(_, score)| score / total * 100.0)
            .collect();
        let mut confidences: Vec<u32> = exact
            .iter()
            .map(|e| e.round_ties_even() as u32)
            .collect();
        compensate_rounding(&exact, &mut confidences);

        return ranked
            .into_iter()
            .zip(confidences)
            .map(|((career, score), confidence)| CareerScore {
                career,
                score,
                confidence,
            })
            .collect();
    }

    if ranked.is_empty() {
        return Vec::new();
    }

    warn!(
        "All top {} blended scores are zero; splitting confidence evenly",
        ranked.len()
    );
    let n = ranked.len() as u32;
    let share = 100 / n;
    let remainder = (100 % n) as usize;

    ranked
        .into_iter()
        .enumerate()
        .map(|(i, (career, score))| CareerScore {
            career,
            score,
            confidence: share + u32::from(i < remainder),
        })
        .collect()
}

/// Moves rounded `confidences` onto a total of exactly 100.
fn compensate_rounding(exact: &[f64], confidences: &mut [u32]) {
    let rounded_total: i64 = confidences.iter().map(|&c| i64::from(c)).sum();
    let drift = 100 - rounded_total;
    if drift == 0 {
        return;
    }

    let error = |i: usize| exact[i] - f64::from(confidences[i]);
    let order: Vec<usize> = if drift > 0 {
        // Largest positive error first; stable sort keeps earlier entries ahead on ties.
        let mut order: Vec<usize> = (0..exact.len()).collect();
        order.sort_by(|&a, &b| error(b).partial_cmp(&error(a)).unwrap_or(Ordering::Equal));
        order
    } else {
        // Most negative error first; later entries ahead on ties.
        let mut order: Vec<usize> = (0..exact.len()).rev().collect();
        order.sort_by(|&a, &b| error(a).partial_cmp(&error(b)).unwrap_or(Ordering::Equal));
        order
    };

    for i in order.into_iter().take(drift.unsigned_abs() as usize) {
        if drift > 0 {
            confidences[i] += 1;
        } else {
            confidences[i] = confidences[i].saturating_sub(1);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Master's degree, no skills, middling personality: every heuristic is neutral.
    fn neutral_signals() -> ProfileSignals {
        ProfileSignals {
            creative: 0.5,
            social: 0.5,
            education_encoded: 2,
            experience: 0,
            tech_skill_count: 0,
            java_flag: false,
        }
    }

    fn encoded(signals: ProfileSignals) -> EncodedProfile {
        EncodedProfile {
            features: Vec::new(),
            signals,
        }
    }

    fn confidence_sum(scores: &[CareerScore]) -> u32 {
        scores.iter().map(|s| s.confidence).sum()
    }

    #[test]
    fn test_uniform_probabilities_split_equally() {
        let scores = blend(&[0.5; Career::COUNT], &encoded(neutral_signals()));

        assert_eq!(scores.len(), TOP_K);
        assert!(scores.iter().all(|s| s.confidence == 20));
        assert!(scores.iter().all(|s| (s.score - 0.4).abs() < 1e-12));
        // Ties resolve to the first five careers in declaration order.
        let careers: Vec<Career> = scores.iter().map(|s| s.career).collect();
        assert_eq!(careers, Career::ALL[..TOP_K].to_vec());
    }

    #[test]
    fn test_master_profile_scenario_heuristics() {
        let signals = ProfileSignals {
            creative: 0.5,
            social: 0.6,
            education_encoded: 2,
            experience: 3,
            tech_skill_count: 2,
            ..neutral_signals()
        };

        assert_eq!(heuristic_adjustment(Career::ResearchScientist, &signals), 0.0);
        assert_eq!(heuristic_adjustment(Career::DataScientist, &signals), 0.0);
        assert_eq!(heuristic_adjustment(Career::MarketingSpecialist, &signals), 0.0);
        assert!((experience_boost(3) - 4.0_f64.ln() * 0.05).abs() < 1e-12);
        assert!((experience_boost(3) - 0.0693).abs() < 1e-4);
    }

    #[test]
    fn test_research_scientist_penalty_below_master() {
        for education_encoded in [0, 1] {
            let signals = ProfileSignals {
                education_encoded,
                ..neutral_signals()
            };
            assert_eq!(
                heuristic_adjustment(Career::ResearchScientist, &signals),
                -0.15
            );
        }
        let phd = ProfileSignals {
            education_encoded: 3,
            ..neutral_signals()
        };
        assert_eq!(heuristic_adjustment(Career::ResearchScientist, &phd), 0.0);
    }

    #[test]
    fn test_four_tech_skills_boost_data_scientist_and_java_software_engineer() {
        let signals = ProfileSignals {
            tech_skill_count: 4,
            java_flag: true,
            ..neutral_signals()
        };
        assert_eq!(heuristic_adjustment(Career::DataScientist, &signals), 0.10);
        assert_eq!(heuristic_adjustment(Career::SoftwareEngineer, &signals), 0.10);
        assert_eq!(heuristic_adjustment(Career::BusinessAnalyst, &signals), 0.0);
    }

    #[test]
    fn test_software_engineer_needs_java_flag() {
        let signals = ProfileSignals {
            tech_skill_count: 5,
            java_flag: false,
            ..neutral_signals()
        };
        assert_eq!(heuristic_adjustment(Career::SoftwareEngineer, &signals), 0.0);

        let too_few = ProfileSignals {
            tech_skill_count: 2,
            java_flag: true,
            ..neutral_signals()
        };
        assert_eq!(heuristic_adjustment(Career::SoftwareEngineer, &too_few), 0.0);
    }

    #[test]
    fn test_marketing_thresholds_are_strict() {
        let at_threshold = ProfileSignals {
            creative: 0.7,
            social: 0.9,
            ..neutral_signals()
        };
        assert_eq!(
            heuristic_adjustment(Career::MarketingSpecialist, &at_threshold),
            0.0
        );

        let above = ProfileSignals {
            creative: 0.71,
            social: 0.8,
            ..neutral_signals()
        };
        assert_eq!(heuristic_adjustment(Career::MarketingSpecialist, &above), 0.12);
    }

    #[test]
    fn test_negative_term_clamped_before_boost() {
        let signals = ProfileSignals {
            education_encoded: 0,
            experience: 20,
            ..neutral_signals()
        };
        // 0.01 × 0.8 − 0.15 × 0.2 < 0
        assert_eq!(blended_score(0.01, Career::ResearchScientist, &signals), 0.0);
    }

    #[test]
    fn test_blended_score_formula() {
        let signals = ProfileSignals {
            tech_skill_count: 4,
            experience: 5,
            ..neutral_signals()
        };
        let expected = (0.6 * 0.8 + 0.1 * 0.2) * (1.0 + 6.0_f64.ln() * 0.05);
        let got = blended_score(0.6, Career::DataScientist, &signals);
        assert!((got - expected).abs() < 1e-12, "got {got}, expected {expected}");
    }

    #[test]
    fn test_experience_is_monotonic() {
        let probs = [0.9, 0.1, 0.33, 0.2, 0.7, 0.05, 0.6, 0.4];
        for career in Career::ALL {
            let mut previous = 0.0;
            for experience in [0, 1, 2, 5, 10, 40] {
                let signals = ProfileSignals {
                    experience,
                    education_encoded: 0,
                    ..neutral_signals()
                };
                let score = blended_score(probs[career.index()], career, &signals);
                assert!(score >= previous, "{career} decreased at {experience} years");
                previous = score;
            }
        }
    }

    #[test]
    fn test_results_sorted_and_sum_to_100() {
        let probs = [0.9, 0.1, 0.33, 0.2, 0.7, 0.05, 0.6, 0.4];
        let scores = blend(&probs, &encoded(neutral_signals()));

        assert_eq!(scores.len(), TOP_K);
        for pair in scores.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        assert_eq!(confidence_sum(&scores), 100);
        assert_eq!(scores[0].career, Career::BusinessAnalyst);
        assert_eq!(scores[1].career, Career::ProductManager);
    }

    fn assert_descending(scores: &[CareerScore]) {
        for pair in scores.windows(2) {
            assert!(
                pair[0].confidence >= pair[1].confidence,
                "not descending: {:?}",
                scores.iter().map(|s| s.confidence).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn test_four_entries_rounding_down_are_topped_up_to_100() {
        // Exact shares 20.4 × 4 and 18.4 round to 98 before compensation.
        let probs = [0.204, 0.204, 0.204, 0.204, 0.184, 0.1, 0.1, 0.1];
        let scores = blend(&probs, &encoded(neutral_signals()));

        assert_eq!(scores.len(), TOP_K);
        assert_eq!(confidence_sum(&scores), 100);
        assert_descending(&scores);
        assert!(scores.iter().all(|s| (18..=21).contains(&s.confidence)));
    }

    #[test]
    fn test_four_entries_rounding_up_are_trimmed_to_100() {
        // Exact shares 21.6 and 19.6 × 4 round to 102 before compensation.
        let probs = [0.216, 0.196, 0.196, 0.196, 0.196, 0.1, 0.1, 0.1];
        let scores = blend(&probs, &encoded(neutral_signals()));

        assert_eq!(scores.len(), TOP_K);
        assert_eq!(confidence_sum(&scores), 100);
        assert_descending(&scores);
        assert!(scores.iter().all(|s| (19..=22).contains(&s.confidence)));
    }

    #[test]
    fn test_compensation_prefers_largest_rounding_error() {
        // 33.3 / 33.3 / 33.4 → 33 + 33 + 33 = 99; the 33.4 entry takes the point.
        let exact = [33.3, 33.3, 33.4];
        let mut confidences = [33, 33, 33];
        compensate_rounding(&exact, &mut confidences);
        assert_eq!(confidences, [33, 33, 34]);

        // 50.6 / 49.4 rounds to 51 + 49 = 100 already.
        let mut already = [51, 49];
        compensate_rounding(&[50.6, 49.4], &mut already);
        assert_eq!(already, [51, 49]);
    }

    #[test]
    fn test_ties_break_on_career_order() {
        let mut probs = [0.1; Career::COUNT];
        probs[Career::UxDesigner.index()] = 0.8;
        probs[Career::DataScientist.index()] = 0.8;
        let scores = blend(&probs, &encoded(neutral_signals()));
        assert_eq!(scores[0].career, Career::DataScientist);
        assert_eq!(scores[1].career, Career::UxDesigner);
    }

    #[test]
    fn test_heuristic_can_reorder_careers() {
        let mut probs = [0.1; Career::COUNT];
        probs[Career::BusinessAnalyst.index()] = 0.5;
        probs[Career::DataScientist.index()] = 0.5;
        let signals = ProfileSignals {
            tech_skill_count: 4,
            ..neutral_signals()
        };
        let scores = blend(&probs, &encoded(signals));
        assert_eq!(scores[0].career, Career::DataScientist);
    }

    #[test]
    fn test_all_zero_scores_split_evenly() {
        let signals = ProfileSignals {
            education_encoded: 0,
            ..neutral_signals()
        };
        let scores = blend(&[0.0; Career::COUNT], &encoded(signals));

        assert_eq!(scores.len(), TOP_K);
        assert!(scores.iter().all(|s| s.score == 0.0 && s.confidence == 20));
        assert_eq!(confidence_sum(&scores), 100);
    }

    #[test]
    fn test_even_split_gives_remainder_to_leaders() {
        let ranked = vec![
            (Career::BusinessAnalyst, 0.0),
            (Career::DataScientist, 0.0),
            (Career::FinancialAnalyst, 0.0),
        ];
        let scores = renormalize(ranked);
        let confidences: Vec<u32> = scores.iter().map(|s| s.confidence).collect();
        assert_eq!(confidences, vec![34, 33, 33]);
    }

    #[test]
    fn test_rounding_is_half_to_even() {
        // 1/8 = 12.5% rounds to 12, 3/8 = 37.5% rounds to 38.
        let ranked = vec![
            (Career::BusinessAnalyst, 3.0),
            (Career::DataScientist, 3.0),
            (Career::FinancialAnalyst, 1.0),
            (Career::ProductManager, 1.0),
        ];
        let confidences: Vec<u32> = renormalize(ranked).iter().map(|s| s.confidence).collect();
        assert_eq!(confidences, vec![38, 38, 12, 12]);
    }
}
