use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::{
    JobHuntProgress, JobHuntState, TransitionOutcome, TransitionResult,
    attempt_transition_with_rng,
};
use crate::config::SimulationConfig;
use crate::constants::{
    DAYS_PER_MONTH, LOG_APPLICATION_SENT, LOG_FUNNEL_ADVANCED, LOG_FUNNEL_REJECTED,
    LOG_FUNNEL_STALLED, LOG_MONTH_UNEMPLOYED, LOG_SAVINGS_DEPLETED,
};
use crate::event::DayEvent;
use crate::numbers::{clamp_pct, floor_f64_to_u32, unit_from_u32};
use crate::stats::SeedStats;

/// What happened during one simulated day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayReport {
    pub day: u32,
    pub events: Vec<DayEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionOutcome>,
    #[serde(default)]
    pub application_sent: bool,
}

impl DayReport {
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.events.iter().map(|event| event.message.as_str()).collect()
    }
}

/// Days of savings left at the current burn rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "days")]
pub enum Runway {
    Infinite,
    Days(u32),
}

impl Runway {
    #[must_use]
    pub const fn days(self) -> Option<u32> {
        match self {
            Self::Infinite => None,
            Self::Days(days) => Some(days),
        }
    }
}

/// Zero or negative spend never runs out.
#[must_use]
pub fn runway_days(stats: &SeedStats) -> Runway {
    let spend = stats.spending_monthly;
    if !spend.is_finite() || spend <= 0.0 {
        return Runway::Infinite;
    }
    let daily = spend / f64::from(DAYS_PER_MONTH);
    Runway::Days(floor_f64_to_u32(stats.savings / daily))
}

/// Advance the search by one day.
///
/// Draws at most three values from `rng`: the application roll (only while
/// searching), the transition gate, and the transition itself.
pub fn simulate_day<R: RngCore + ?Sized>(
    progress: &mut JobHuntProgress,
    stats: &mut SeedStats,
    rng: &mut R,
    cfg: &SimulationConfig,
) -> DayReport {
    if progress.is_ended() {
        log::warn!(
            "simulate_day called after the run ended on day {}",
            progress.days_in_search
        );
        return DayReport {
            day: progress.days_in_search,
            ..DayReport::default()
        };
    }

    progress.days_in_search = progress.days_in_search.saturating_add(1);
    let day = progress.days_in_search;
    let mut report = DayReport {
        day,
        ..DayReport::default()
    };

    stats.stress = clamp_pct(stats.stress + cfg.stress_drift_per_day);
    burn_savings(stats, day, &mut report);

    if day % DAYS_PER_MONTH == 0 && progress.phase.state != JobHuntState::Accepted {
        stats.months_unemployed = stats.months_unemployed.saturating_add(1);
        report.events.push(DayEvent::warning(
            day,
            LOG_MONTH_UNEMPLOYED,
            format!("{} months without a job.", stats.months_unemployed),
        ));
    }

    if progress.phase.state == JobHuntState::Searching
        && unit_from_u32(rng.next_u32()) < cfg.application_chance
    {
        progress.total_applications = progress.total_applications.saturating_add(1);
        stats.applications_sent = stats.applications_sent.saturating_add(1);
        report.application_sent = true;
        report.events.push(DayEvent::info(
            day,
            LOG_APPLICATION_SENT,
            format!(
                "Sent another application ({} total).",
                progress.total_applications
            ),
        ));
    }

    if !progress.phase.state.is_terminal()
        && unit_from_u32(rng.next_u32()) < cfg.transition_chance
    {
        let outcome = attempt_transition_with_rng(progress.phase.state, stats, rng);
        progress.apply_transition(&outcome, day);
        report.events.push(transition_event(day, &outcome));
        report.transition = Some(outcome);
    }

    report
}

fn burn_savings(stats: &mut SeedStats, day: u32, report: &mut DayReport) {
    let spend = stats.spending_monthly;
    if !spend.is_finite() || spend <= 0.0 {
        return;
    }
    let before = stats.savings;
    stats.savings -= spend / f64::from(DAYS_PER_MONTH);
    if before >= 0.0 && stats.savings < 0.0 {
        report.events.push(DayEvent::critical(
            day,
            LOG_SAVINGS_DEPLETED,
            "Savings are gone; rent is now going on credit.",
        ));
    }
}

/// Surface a resolved transition attempt as a day event.
#[must_use]
pub fn transition_event(day: u32, outcome: &TransitionOutcome) -> DayEvent {
    match outcome.result {
        TransitionResult::Success => DayEvent::info(
            day,
            LOG_FUNNEL_ADVANCED,
            format!("Moved on to the {}.", outcome.next_state.label().to_lowercase()),
        ),
        TransitionResult::Rejection => DayEvent::warning(
            day,
            LOG_FUNNEL_REJECTED,
            format!(
                "Rejected at the {}. {}",
                outcome.from.label().to_lowercase(),
                outcome.reject_reason.as_deref().unwrap_or("No reason given.")
            ),
        ),
        TransitionResult::Stall => DayEvent::info(
            day,
            LOG_FUNNEL_STALLED,
            format!("No news from the {}.", outcome.from.label().to_lowercase()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventSeverity;
    use crate::job_hunt::{EndingType, initialize_job_hunt};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Replays a fixed sequence of draws and counts consumption.
    struct ScriptedRng {
        values: Vec<u32>,
        calls: usize,
    }

    impl ScriptedRng {
        fn new(values: &[u32]) -> Self {
            Self {
                values: values.to_vec(),
                calls: 0,
            }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            let value = self.values[self.calls % self.values.len()];
            self.calls += 1;
            value
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for byte in dest.iter_mut() {
                *byte = self.next_u32().to_le_bytes()[0];
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn base_stats() -> SeedStats {
        SeedStats {
            stress: 50.0,
            savings: 3_000.0,
            spending_monthly: 3_000.0,
            resume_strength: 40.0,
            ..SeedStats::default()
        }
    }

    #[test]
    fn day_drifts_stress_and_burns_savings() {
        let mut progress = initialize_job_hunt();
        let mut stats = base_stats();
        // High draws: no application, no transition.
        let mut rng = ScriptedRng::new(&[u32::MAX]);
        let report = simulate_day(&mut progress, &mut stats, &mut rng, &SimulationConfig::default());

        assert_eq!(report.day, 1);
        assert_eq!(progress.days_in_search, 1);
        assert!((stats.stress - 50.5).abs() < 1e-9);
        assert!((stats.savings - 2_900.0).abs() < 1e-9);
        assert!(!report.application_sent);
        assert!(report.transition.is_none());
        assert_eq!(rng.calls, 2);
    }

    #[test]
    fn low_draws_send_application_and_attempt_transition() {
        let mut progress = initialize_job_hunt();
        let mut stats = base_stats();
        let mut rng = ScriptedRng::new(&[0]);
        let report = simulate_day(&mut progress, &mut stats, &mut rng, &SimulationConfig::default());

        assert!(report.application_sent);
        assert_eq!(progress.total_applications, 1);
        assert_eq!(stats.applications_sent, 1);
        let outcome = report.transition.expect("transition attempted");
        assert_eq!(outcome.result, TransitionResult::Success);
        assert_eq!(progress.state(), JobHuntState::Screening);
        assert_eq!(progress.history.len(), 1);
        assert_eq!(progress.total_interviews, 1);
        assert_eq!(rng.calls, 3);
    }

    #[test]
    fn applications_only_while_searching() {
        let mut progress = initialize_job_hunt();
        progress.phase.state = JobHuntState::Screening;
        let mut stats = base_stats();
        let mut rng = ScriptedRng::new(&[u32::MAX]);
        let report = simulate_day(&mut progress, &mut stats, &mut rng, &SimulationConfig::default());
        assert!(!report.application_sent);
        assert_eq!(rng.calls, 1);
    }

    #[test]
    fn savings_crossing_zero_emits_critical_event() {
        let mut progress = initialize_job_hunt();
        let mut stats = SeedStats {
            savings: 50.0,
            spending_monthly: 3_000.0,
            ..SeedStats::default()
        };
        let mut rng = ScriptedRng::new(&[u32::MAX]);
        let report = simulate_day(&mut progress, &mut stats, &mut rng, &SimulationConfig::default());
        assert!(stats.savings < 0.0);
        assert!(
            report
                .events
                .iter()
                .any(|event| event.severity == EventSeverity::Critical)
        );
    }

    #[test]
    fn every_thirtieth_day_adds_a_month() {
        let mut progress = initialize_job_hunt();
        let mut stats = base_stats();
        stats.savings = 1_000_000.0;
        let mut rng = ScriptedRng::new(&[u32::MAX]);
        let cfg = SimulationConfig::default();
        for _ in 0..61 {
            simulate_day(&mut progress, &mut stats, &mut rng, &cfg);
        }
        assert_eq!(stats.months_unemployed, 2);
    }

    #[test]
    fn ended_runs_do_not_advance() {
        let mut progress = initialize_job_hunt();
        progress
            .record_ending(EndingType::FinancialBreakdown, 0, "done")
            .unwrap();
        let mut stats = base_stats();
        let before = stats.clone();
        let mut rng = ScriptedRng::new(&[0]);
        let report = simulate_day(&mut progress, &mut stats, &mut rng, &SimulationConfig::default());
        assert!(report.events.is_empty());
        assert_eq!(stats, before);
        assert_eq!(rng.calls, 0);
    }

    #[test]
    fn runway_handles_zero_spend() {
        let stats = SeedStats {
            savings: 9_000.0,
            spending_monthly: 0.0,
            ..SeedStats::default()
        };
        assert_eq!(runway_days(&stats), Runway::Infinite);

        let spending = SeedStats {
            spending_monthly: 3_000.0,
            ..stats.clone()
        };
        assert_eq!(runway_days(&spending), Runway::Days(90));

        let broke = SeedStats {
            savings: -5.0,
            ..spending
        };
        assert_eq!(runway_days(&broke), Runway::Days(0));
    }

    #[test]
    fn seeded_days_are_reproducible() {
        let cfg = SimulationConfig::default();
        let run = |seed: u64| {
            let mut progress = initialize_job_hunt();
            let mut stats = base_stats();
            let mut rng = SmallRng::seed_from_u64(seed);
            let reports: Vec<DayReport> = (0..40)
                .map(|_| simulate_day(&mut progress, &mut stats, &mut rng, &cfg))
                .collect();
            (progress, reports)
        };
        assert_eq!(run(7), run(7));
    }
}
