use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::{JobHuntState, next_state};
use crate::constants::{
    HR_REJECTION, OFFER_REJECTION, OFFER_SUCCESS, SCREENING_REJECTION, SEARCHING_REJECTION,
    TECHNICAL_REJECTION,
};
use crate::numbers::{clamp_unit, floor_f64_to_u32, unit_from_u32, usize_to_f64};
use crate::stats::{SeedStats, StatKey};

/// Outcome distribution for one transition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionProbability {
    pub success: f64,
    pub rejection: f64,
    pub stall: f64,
}

impl TransitionProbability {
    /// Build a valid distribution from raw branch values.
    ///
    /// Rejection is fixed per state, so success is capped at `1 - rejection`
    /// and stall takes whatever remains.
    #[must_use]
    pub fn sanitize(success: f64, rejection: f64) -> Self {
        let rejection = clamp_unit(rejection);
        let success = clamp_unit(success).min(1.0 - rejection);
        let stall = (1.0 - success - rejection).max(0.0);
        Self {
            success,
            rejection,
            stall,
        }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.success + self.rejection + self.stall
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionResult {
    Success,
    Rejection,
    Stall,
}

impl TransitionResult {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Rejection => "rejection",
            Self::Stall => "stall",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    pub result: TransitionResult,
    pub from: JobHuntState,
    pub next_state: JobHuntState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<String>,
    /// Uniform value in `[0, 1)` the outcome was resolved with.
    pub roll: f64,
}

/// Closed-form outcome distribution for `state` given the player's traits.
#[must_use]
pub fn transition_probability(state: JobHuntState, stats: &SeedStats) -> TransitionProbability {
    let stress_factor = 1.0 - stats.ratio(StatKey::Stress);
    let resume = stats.ratio(StatKey::ResumeStrength);
    let interview = stats.ratio(StatKey::InterviewSkill);
    let confidence = stats.ratio(StatKey::Confidence);
    let reputation = stats.ratio(StatKey::Reputation);
    let technical = stats.ratio(StatKey::TechnicalDepth);

    match state {
        JobHuntState::Searching => TransitionProbability::sanitize(
            resume.mul_add(0.5, 0.4).min(0.8) * stress_factor,
            SEARCHING_REJECTION,
        ),
        JobHuntState::Screening => TransitionProbability::sanitize(
            reputation
                .mul_add(0.3, confidence.mul_add(0.3, interview.mul_add(0.4, 0.5)))
                .min(0.85)
                * stress_factor,
            SCREENING_REJECTION,
        ),
        JobHuntState::TechnicalRound => TransitionProbability::sanitize(
            interview
                .mul_add(0.3, technical.mul_add(0.7, 0.3))
                .min(0.8)
                * stress_factor,
            TECHNICAL_REJECTION,
        ),
        // The HR round is not dampened by stress.
        JobHuntState::HrRound => TransitionProbability::sanitize(
            interview
                .mul_add(0.2, confidence.mul_add(0.3, reputation.mul_add(0.5, 0.6)))
                .min(0.9),
            HR_REJECTION,
        ),
        JobHuntState::OfferStage => TransitionProbability::sanitize(OFFER_SUCCESS, OFFER_REJECTION),
        JobHuntState::Accepted => TransitionProbability {
            success: 0.0,
            rejection: 0.0,
            stall: 1.0,
        },
    }
}

/// Flavor text offered when an attempt from `state` is rejected.
#[must_use]
pub const fn rejection_reasons(state: JobHuntState) -> &'static [&'static str] {
    match state {
        JobHuntState::Searching => &[
            "Your application was auto-filtered by the applicant tracking system.",
            "The role was filled internally before anyone read your resume.",
            "The recruiter stopped replying after your first message.",
        ],
        JobHuntState::Screening => &[
            "The recruiter felt your experience was not a fit for the level.",
            "The phone screen ran long and the notes came back lukewarm.",
            "Hiring for the team was paused for the quarter.",
        ],
        JobHuntState::TechnicalRound => &[
            "The take-home did not pass the hidden test suite.",
            "You froze halfway through the live coding exercise.",
            "The panel wanted deeper system design experience.",
        ],
        JobHuntState::HrRound => &[
            "Salary expectations did not line up with the band.",
            "Another candidate scored higher on team fit.",
            "A reference check came back lukewarm.",
        ],
        JobHuntState::OfferStage => &["The offer was rescinded after a budget freeze."],
        JobHuntState::Accepted => &[],
    }
}

/// Resolve one attempt with an injected roll in `[0, 1)`.
///
/// `accepted` always stalls in place.
#[must_use]
pub fn attempt_transition(state: JobHuntState, stats: &SeedStats, roll: f64) -> TransitionOutcome {
    let roll = clamp_unit(roll);
    let probs = transition_probability(state, stats);
    let rejection_threshold = probs.success + probs.rejection;

    let (result, next, reject_reason) = if roll < probs.success {
        (TransitionResult::Success, next_state(state), None)
    } else if roll < rejection_threshold {
        let reason = pick_rejection_reason(state, (roll - probs.success) / probs.rejection);
        (
            TransitionResult::Rejection,
            JobHuntState::Searching,
            reason.map(str::to_string),
        )
    } else {
        (TransitionResult::Stall, state, None)
    };

    log::debug!(
        "transition {state} roll={roll:.4} p=({:.3},{:.3},{:.3}) -> {} ({next})",
        probs.success,
        probs.rejection,
        probs.stall,
        result.as_str(),
    );

    TransitionOutcome {
        result,
        from: state,
        next_state: next,
        reject_reason,
        roll,
    }
}

/// Resolve one attempt, consuming exactly one draw from `rng`.
#[must_use]
pub fn attempt_transition_with_rng<R: RngCore + ?Sized>(
    state: JobHuntState,
    stats: &SeedStats,
    rng: &mut R,
) -> TransitionOutcome {
    let roll = unit_from_u32(rng.next_u32());
    attempt_transition(state, stats, roll)
}

/// Reuse the position of the roll inside the rejection band so no extra draw is needed.
fn pick_rejection_reason(state: JobHuntState, band_position: f64) -> Option<&'static str> {
    let reasons = rejection_reasons(state);
    if reasons.is_empty() {
        return None;
    }
    let scaled = clamp_unit(band_position) * usize_to_f64(reasons.len());
    let idx = usize::try_from(floor_f64_to_u32(scaled))
        .unwrap_or(0)
        .min(reasons.len() - 1);
    reasons.get(idx).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FLOAT_EPSILON;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    struct StubRng {
        value: u32,
        calls: u32,
    }

    impl StubRng {
        fn new(value: u32) -> Self {
            Self { value, calls: 0 }
        }
    }

    impl RngCore for StubRng {
        fn next_u32(&mut self) -> u32 {
            self.calls = self.calls.saturating_add(1);
            self.value
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let value = self.next_u32().to_le_bytes();
            for (idx, byte) in dest.iter_mut().enumerate() {
                *byte = value[idx % value.len()];
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn stats_with(values: &[(StatKey, f64)]) -> SeedStats {
        let mut stats = SeedStats::default();
        for (key, value) in values {
            stats.apply_delta(*key, *value);
        }
        stats
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < FLOAT_EPSILON
    }

    #[test]
    fn distributions_sum_to_one_across_grid() {
        let levels = [0.0, 25.0, 50.0, 75.0, 100.0];
        for state in JobHuntState::ALL {
            for &stress in &levels {
                for &skill in &levels {
                    let stats = stats_with(&[
                        (StatKey::Stress, stress),
                        (StatKey::ResumeStrength, skill),
                        (StatKey::InterviewSkill, skill),
                        (StatKey::Confidence, skill),
                        (StatKey::Reputation, skill),
                        (StatKey::TechnicalDepth, skill),
                    ]);
                    let probs = transition_probability(state, &stats);
                    assert!(close(probs.total(), 1.0), "{state}: {probs:?}");
                    assert!(probs.success >= 0.0 && probs.rejection >= 0.0 && probs.stall >= 0.0);
                }
            }
        }
    }

    #[test]
    fn hr_round_caps_success_instead_of_negative_stall() {
        let stats = stats_with(&[
            (StatKey::Reputation, 100.0),
            (StatKey::Confidence, 100.0),
            (StatKey::InterviewSkill, 100.0),
        ]);
        let probs = transition_probability(JobHuntState::HrRound, &stats);
        assert!(close(probs.success, 0.8), "success {}", probs.success);
        assert!(close(probs.rejection, 0.2));
        assert!(close(probs.stall, 0.0));
    }

    #[test]
    fn searching_uses_resume_and_stress() {
        let stats = stats_with(&[(StatKey::ResumeStrength, 40.0), (StatKey::Stress, 50.0)]);
        let probs = transition_probability(JobHuntState::Searching, &stats);
        assert!(close(probs.success, 0.3));
        assert!(close(probs.rejection, 0.15));
        assert!(close(probs.stall, 0.55));
    }

    #[test]
    fn offer_stage_ignores_stats() {
        let probs = transition_probability(JobHuntState::OfferStage, &SeedStats::default());
        assert!(close(probs.success, 0.95));
        assert!(close(probs.rejection, 0.05));
        assert!(close(probs.stall, 0.0));
    }

    #[test]
    fn roll_bands_map_to_outcomes() {
        let stats = stats_with(&[(StatKey::ResumeStrength, 40.0), (StatKey::Stress, 50.0)]);
        let success = attempt_transition(JobHuntState::Searching, &stats, 0.1);
        assert_eq!(success.result, TransitionResult::Success);
        assert_eq!(success.next_state, JobHuntState::Screening);
        assert!(success.reject_reason.is_none());

        let rejection = attempt_transition(JobHuntState::Searching, &stats, 0.35);
        assert_eq!(rejection.result, TransitionResult::Rejection);
        assert_eq!(rejection.next_state, JobHuntState::Searching);
        assert!(rejection.reject_reason.is_some());

        let stall = attempt_transition(JobHuntState::Searching, &stats, 0.9);
        assert_eq!(stall.result, TransitionResult::Stall);
        assert_eq!(stall.next_state, JobHuntState::Searching);
    }

    #[test]
    fn rejection_from_any_depth_returns_to_searching() {
        let stats = SeedStats::default();
        for state in [
            JobHuntState::Screening,
            JobHuntState::TechnicalRound,
            JobHuntState::HrRound,
            JobHuntState::OfferStage,
        ] {
            let probs = transition_probability(state, &stats);
            let roll = probs.success + probs.rejection / 2.0;
            let outcome = attempt_transition(state, &stats, roll);
            assert_eq!(outcome.result, TransitionResult::Rejection, "{state}");
            assert_eq!(outcome.next_state, JobHuntState::Searching);
            let reason = outcome.reject_reason.expect("reason");
            assert!(rejection_reasons(state).contains(&reason.as_str()));
        }
    }

    #[test]
    fn rejection_reason_tracks_band_position() {
        let stats = SeedStats::default();
        let probs = transition_probability(JobHuntState::TechnicalRound, &stats);
        let reasons = rejection_reasons(JobHuntState::TechnicalRound);
        let first = attempt_transition(JobHuntState::TechnicalRound, &stats, probs.success + 1e-6);
        let last = attempt_transition(
            JobHuntState::TechnicalRound,
            &stats,
            probs.success + probs.rejection - 1e-6,
        );
        assert_eq!(first.reject_reason.as_deref(), Some(reasons[0]));
        assert_eq!(last.reject_reason.as_deref(), reasons.last().copied());
    }

    #[test]
    fn accepted_always_stalls() {
        let stats = stats_with(&[(StatKey::Reputation, 100.0), (StatKey::Confidence, 100.0)]);
        for roll in [0.0, 0.25, 0.5, 0.999_999] {
            let outcome = attempt_transition(JobHuntState::Accepted, &stats, roll);
            assert_eq!(outcome.result, TransitionResult::Stall);
            assert_eq!(outcome.next_state, JobHuntState::Accepted);
        }
    }

    #[test]
    fn rng_attempt_consumes_single_draw() {
        let mut rng = StubRng::new(u32::MAX / 3);
        let _ = attempt_transition_with_rng(JobHuntState::Screening, &SeedStats::default(), &mut rng);
        assert_eq!(rng.calls, 1, "transition must draw exactly once");
    }

    #[test]
    fn rng_attempts_are_reproducible() {
        let stats = SeedStats::default();
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);
        for state in JobHuntState::ALL {
            assert_eq!(
                attempt_transition_with_rng(state, &stats, &mut a),
                attempt_transition_with_rng(state, &stats, &mut b)
            );
        }
    }
}
