use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{JobHuntProgress, JobHuntState};
use crate::config::SimulationConfig;
use crate::constants::{REFERRAL_NETWORK_THRESHOLD, REFERRAL_REPUTATION_THRESHOLD};
use crate::profile::UnknownVariant;
use crate::stats::SeedStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndingType {
    BurnoutCollapse,
    FinancialBreakdown,
    OfferAccepted,
    ReferralFastTrack,
}

impl EndingType {
    /// Evaluation order; earlier entries win when several conditions hold.
    pub const PRIORITY: [Self; 4] = [
        Self::BurnoutCollapse,
        Self::FinancialBreakdown,
        Self::OfferAccepted,
        Self::ReferralFastTrack,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BurnoutCollapse => "burnout_collapse",
            Self::FinancialBreakdown => "financial_breakdown",
            Self::OfferAccepted => "offer_accepted",
            Self::ReferralFastTrack => "referral_fast_track",
        }
    }

    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::BurnoutCollapse => {
                "Back-to-back interview rounds under crushing stress ended in burnout."
            }
            Self::FinancialBreakdown => "Savings ran out before an offer arrived.",
            Self::OfferAccepted => "You signed an offer and the search is over.",
            Self::ReferralFastTrack => "Your network vouched for you and opened a referral path.",
        }
    }

    /// Whether the ending is driven by a failure rather than a win.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::BurnoutCollapse | Self::FinancialBreakdown)
    }
}

impl fmt::Display for EndingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndingType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PRIORITY
            .into_iter()
            .find(|ending| ending.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "ending",
                value: s.to_string(),
            })
    }
}

/// Thresholds for the burnout ending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnoutRule {
    /// Stress must be strictly above this value.
    pub stress_threshold: f64,
    /// History entries entered fewer than this many days ago count as recent.
    pub window_days: u32,
    pub min_transitions: usize,
}

impl Default for BurnoutRule {
    fn default() -> Self {
        Self::from(&SimulationConfig::default())
    }
}

impl From<&SimulationConfig> for BurnoutRule {
    fn from(cfg: &SimulationConfig) -> Self {
        Self {
            stress_threshold: cfg.burnout_stress_threshold,
            window_days: cfg.burnout_window_days,
            min_transitions: cfg.burnout_min_transitions,
        }
    }
}

/// Check ending conditions with the default burnout thresholds.
#[must_use]
pub fn check_end_conditions(
    stats: &SeedStats,
    progress: &JobHuntProgress,
    current_day: u32,
) -> Option<EndingType> {
    check_end_conditions_with(&BurnoutRule::default(), stats, progress, current_day)
}

/// Report at most one ending, in [`EndingType::PRIORITY`] order.
#[must_use]
pub fn check_end_conditions_with(
    rule: &BurnoutRule,
    stats: &SeedStats,
    progress: &JobHuntProgress,
    current_day: u32,
) -> Option<EndingType> {
    EndingType::PRIORITY
        .into_iter()
        .find(|ending| condition_holds(*ending, rule, stats, progress, current_day))
}

fn condition_holds(
    ending: EndingType,
    rule: &BurnoutRule,
    stats: &SeedStats,
    progress: &JobHuntProgress,
    current_day: u32,
) -> bool {
    match ending {
        EndingType::BurnoutCollapse => {
            stats.stress > rule.stress_threshold
                && progress.transitions_within(current_day, rule.window_days)
                    >= rule.min_transitions
        }
        EndingType::FinancialBreakdown => stats.savings < 0.0,
        EndingType::OfferAccepted => progress.phase.state == JobHuntState::Accepted,
        EndingType::ReferralFastTrack => {
            stats.network > REFERRAL_NETWORK_THRESHOLD
                && stats.reputation > REFERRAL_REPUTATION_THRESHOLD
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job_hunt::{TransitionOutcome, TransitionResult, initialize_job_hunt, next_state};

    fn advance(progress: &mut JobHuntProgress, day: u32) {
        let from = progress.state();
        let outcome = TransitionOutcome {
            result: TransitionResult::Success,
            from,
            next_state: next_state(from),
            reject_reason: None,
            roll: 0.0,
        };
        progress.apply_transition(&outcome, day);
    }

    fn rushed_progress(day: u32) -> JobHuntProgress {
        let mut progress = initialize_job_hunt();
        for _ in 0..3 {
            advance(&mut progress, day);
        }
        progress
    }

    #[test]
    fn quiet_run_has_no_ending() {
        let stats = SeedStats {
            savings: 10_000.0,
            stress: 40.0,
            ..SeedStats::default()
        };
        assert_eq!(check_end_conditions(&stats, &initialize_job_hunt(), 5), None);
    }

    #[test]
    fn burnout_needs_stress_and_rapid_transitions() {
        let stats = SeedStats {
            stress: 95.0,
            savings: 5_000.0,
            ..SeedStats::default()
        };
        let progress = rushed_progress(10);
        assert_eq!(
            check_end_conditions(&stats, &progress, 11),
            Some(EndingType::BurnoutCollapse)
        );
        // Same transitions, but too long ago.
        assert_eq!(check_end_conditions(&stats, &progress, 20), None);

        let calm = SeedStats {
            stress: 90.0,
            ..stats
        };
        assert_eq!(check_end_conditions(&calm, &progress, 11), None);
    }

    #[test]
    fn burnout_outranks_financial_breakdown() {
        let stats = SeedStats {
            stress: 99.0,
            savings: -10.0,
            ..SeedStats::default()
        };
        let progress = rushed_progress(3);
        assert_eq!(
            check_end_conditions(&stats, &progress, 4),
            Some(EndingType::BurnoutCollapse)
        );
        assert_eq!(
            check_end_conditions(&stats, &initialize_job_hunt(), 4),
            Some(EndingType::FinancialBreakdown)
        );
    }

    #[test]
    fn financial_outranks_accepted_and_referral() {
        let mut progress = initialize_job_hunt();
        for day in [1, 10, 20, 30, 40] {
            advance(&mut progress, day);
        }
        assert_eq!(progress.state(), JobHuntState::Accepted);

        let broke = SeedStats {
            savings: -1.0,
            network: 90.0,
            reputation: 90.0,
            ..SeedStats::default()
        };
        assert_eq!(
            check_end_conditions(&broke, &progress, 60),
            Some(EndingType::FinancialBreakdown)
        );

        let solvent = SeedStats {
            savings: 1.0,
            ..broke
        };
        assert_eq!(
            check_end_conditions(&solvent, &progress, 60),
            Some(EndingType::OfferAccepted)
        );
        assert_eq!(
            check_end_conditions(&solvent, &initialize_job_hunt(), 60),
            Some(EndingType::ReferralFastTrack)
        );
    }

    #[test]
    fn referral_needs_both_thresholds_strictly() {
        let stats = SeedStats {
            network: 80.0,
            reputation: 90.0,
            ..SeedStats::default()
        };
        assert_eq!(check_end_conditions(&stats, &initialize_job_hunt(), 1), None);
    }

    #[test]
    fn custom_rule_changes_burnout_window() {
        let rule = BurnoutRule {
            stress_threshold: 50.0,
            window_days: 30,
            min_transitions: 2,
        };
        let stats = SeedStats {
            stress: 60.0,
            ..SeedStats::default()
        };
        let progress = rushed_progress(1);
        assert_eq!(
            check_end_conditions_with(&rule, &stats, &progress, 20),
            Some(EndingType::BurnoutCollapse)
        );
    }

    #[test]
    fn ending_names_parse() {
        for ending in EndingType::PRIORITY {
            assert_eq!(ending.as_str().parse::<EndingType>(), Ok(ending));
        }
    }
}
