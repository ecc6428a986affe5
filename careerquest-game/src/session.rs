//! One player's run: traits, funnel progress, scenario history, and RNG streams.
//!
//! The session is the single writer for its state. The scenario catalog is
//! shared read-only behind an `Arc`.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::config::{ReferralPolicy, SimulationConfig};
use crate::constants::{
    COMPANY_NAMES, LOG_ENDING_REACHED, LOG_OFFER_RECEIVED, OFFER_REPUTATION_WEIGHT,
    OFFER_SALARY_FLOOR_MULT, OFFER_SALARY_STEP, OFFER_TECHNICAL_WEIGHT,
};
use crate::effects::{ChoiceOutcome, EffectError, apply_choice};
use crate::event::DayEvent;
use crate::job_hunt::daily::transition_event;
use crate::job_hunt::{
    BurnoutRule, DayReport, EndingError, EndingRecord, EndingType, JobHuntProgress, JobHuntState,
    JobOffer, Runway, TransitionOutcome, TransitionProbability, TransitionResult,
    attempt_transition_with_rng, check_end_conditions_with, initialize_job_hunt, runway_days,
    simulate_day, transition_probability,
};
use crate::profile::{PlayerProfile, ProfessionalTrack};
use crate::rng::{RngBundle, RngPositions};
use crate::scenarios::{
    ScenarioCatalog, ScenarioPick, SelectionRequest, SelectorState, select_next_with_rng,
};
use crate::seeding::seed;
use crate::stats::{SeedStats, StatKey};

/// Snapshot format version written by [`CareerSession::snapshot`].
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("run already ended with {0}")]
    Ended(EndingType),
    #[error("no scenario available for {track} during {state}")]
    NoScenario {
        track: ProfessionalTrack,
        state: JobHuntState,
    },
    #[error("no scenario is waiting for a choice")]
    NoPendingScenario,
    #[error("scenario `{0}` is not in the catalog")]
    UnknownScenario(String),
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
    #[error(transparent)]
    Effect(#[from] EffectError),
    #[error(transparent)]
    Ending(#[from] EndingError),
}

/// One narrative decision taken during the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceRecord {
    pub day: u32,
    pub scenario_id: String,
    pub choice_id: String,
}

/// Player action accepted by [`CareerSession::submit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionAction {
    Choose { choice_id: String },
    Wait,
    Interview,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionResult {
    Choice(ChoiceOutcome),
    Day(DayReport),
    Transition(TransitionReport),
}

/// Result of a player-driven transition attempt and the events it raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionReport {
    pub outcome: TransitionOutcome,
    pub events: Vec<DayEvent>,
}

/// Read-only view of the session for presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mirror {
    pub day: u32,
    pub track: ProfessionalTrack,
    pub state: JobHuntState,
    pub stats: SeedStats,
    pub probabilities: TransitionProbability,
    pub runway: Runway,
    pub total_applications: u32,
    pub total_interviews: u32,
    pub total_rejections: u32,
    pub offers: Vec<JobOffer>,
    pub referral_eligible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_scenario: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending: Option<EndingRecord>,
}

/// Persisted form of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: u32,
    pub profile: PlayerProfile,
    pub stats: SeedStats,
    pub progress: JobHuntProgress,
    pub selector: SelectorState,
    #[serde(default)]
    pub choices: Vec<ChoiceRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_scenario: Option<String>,
    #[serde(default)]
    pub referral_eligible: bool,
    pub seed: u64,
    #[serde(default)]
    pub rng_positions: RngPositions,
    #[serde(default)]
    pub config: SimulationConfig,
    pub catalog_fingerprint: u64,
}

#[derive(Debug, Clone)]
pub struct CareerSession {
    profile: PlayerProfile,
    stats: SeedStats,
    progress: JobHuntProgress,
    selector: SelectorState,
    choices: Vec<ChoiceRecord>,
    pending_scenario: Option<String>,
    referral_eligible: bool,
    rng: RngBundle,
    cfg: SimulationConfig,
    catalog: Arc<ScenarioCatalog>,
}

impl CareerSession {
    /// Start a run for `profile` from a user-visible seed.
    #[must_use]
    pub fn new(
        profile: PlayerProfile,
        seed_value: u64,
        cfg: SimulationConfig,
        catalog: Arc<ScenarioCatalog>,
    ) -> Self {
        log::debug!(
            "new session track={} background={} finances={} seed={seed_value:#x}",
            profile.track,
            profile.background,
            profile.financial_situation
        );
        Self {
            stats: seed(&profile),
            profile,
            progress: initialize_job_hunt(),
            selector: SelectorState::with_cooldown(cfg.scenario_cooldown_days),
            choices: Vec::new(),
            pending_scenario: None,
            referral_eligible: false,
            rng: RngBundle::from_user_seed(seed_value),
            cfg,
            catalog,
        }
    }

    /// Restore a saved run against `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnsupportedVersion`] for snapshots written by
    /// an incompatible build.
    pub fn from_snapshot(
        snapshot: SessionSnapshot,
        catalog: Arc<ScenarioCatalog>,
    ) -> Result<Self, SessionError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SessionError::UnsupportedVersion(snapshot.version));
        }
        let pending_scenario = snapshot
            .pending_scenario
            .filter(|id| match catalog.get(id) {
                Some(_) => true,
                None => {
                    log::warn!("dropping pending scenario `{id}` missing from the catalog");
                    false
                }
            });
        Ok(Self {
            profile: snapshot.profile,
            stats: snapshot.stats,
            progress: snapshot.progress,
            selector: snapshot.selector,
            choices: snapshot.choices,
            pending_scenario,
            referral_eligible: snapshot.referral_eligible,
            rng: RngBundle::restore(snapshot.seed, snapshot.rng_positions),
            cfg: snapshot.config,
            catalog,
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            profile: self.profile,
            stats: self.stats.clone(),
            progress: self.progress.clone(),
            selector: self.selector.clone(),
            choices: self.choices.clone(),
            pending_scenario: self.pending_scenario.clone(),
            referral_eligible: self.referral_eligible,
            seed: self.rng.seed(),
            rng_positions: self.rng.positions(),
            config: self.cfg.clone(),
            catalog_fingerprint: self.catalog.fingerprint(),
        }
    }

    #[must_use]
    pub const fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    #[must_use]
    pub const fn stats(&self) -> &SeedStats {
        &self.stats
    }

    #[must_use]
    pub const fn progress(&self) -> &JobHuntProgress {
        &self.progress
    }

    #[must_use]
    pub const fn selector(&self) -> &SelectorState {
        &self.selector
    }

    #[must_use]
    pub fn choices(&self) -> &[ChoiceRecord] {
        &self.choices
    }

    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.cfg
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Current simulated day.
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.progress.days_in_search
    }

    #[must_use]
    pub const fn is_ended(&self) -> bool {
        self.progress.is_ended()
    }

    #[must_use]
    pub const fn referral_eligible(&self) -> bool {
        self.referral_eligible
    }

    #[must_use]
    pub fn pending_scenario(&self) -> Option<&str> {
        self.pending_scenario.as_deref()
    }

    fn ensure_running(&self) -> Result<(), SessionError> {
        match &self.progress.ending {
            Some(record) => Err(SessionError::Ended(record.ending)),
            None => Ok(()),
        }
    }

    /// Pick the next scenario and hold it until [`Self::choose`] is called.
    ///
    /// # Errors
    ///
    /// Fails when the run has ended or no scenario fits the current state.
    pub fn next_scenario(&mut self) -> Result<ScenarioPick, SessionError> {
        self.ensure_running()?;
        let request = SelectionRequest {
            track: self.profile.track,
            state: self.progress.phase.state,
            stats: &self.stats,
            selector: &self.selector,
            current_day: self.day(),
        };
        let pick = select_next_with_rng(&self.catalog, &request, self.rng.selection()).ok_or(
            SessionError::NoScenario {
                track: self.profile.track,
                state: self.progress.phase.state,
            },
        )?;
        self.pending_scenario = Some(pick.scenario.id.clone());
        Ok(pick)
    }

    /// Resolve the pending scenario with `choice_id`.
    ///
    /// # Errors
    ///
    /// Fails when the run has ended, nothing is pending, or the choice is unknown.
    pub fn choose(&mut self, choice_id: &str) -> Result<ChoiceOutcome, SessionError> {
        self.ensure_running()?;
        let scenario_id = self
            .pending_scenario
            .clone()
            .ok_or(SessionError::NoPendingScenario)?;
        let scenario = self
            .catalog
            .get(&scenario_id)
            .ok_or_else(|| SessionError::UnknownScenario(scenario_id.clone()))?;
        let day = self.day();
        let outcome = apply_choice(
            &mut self.stats,
            &mut self.selector,
            scenario,
            choice_id,
            day,
        )?;
        self.choices.push(ChoiceRecord {
            day,
            scenario_id,
            choice_id: choice_id.to_string(),
        });
        self.pending_scenario = None;
        self.check_ending();
        Ok(outcome)
    }

    /// Advance one simulated day.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Ended`] once the run is over.
    pub fn tick_day(&mut self) -> Result<DayReport, SessionError> {
        self.ensure_running()?;
        let mut report = simulate_day(
            &mut self.progress,
            &mut self.stats,
            self.rng.day(),
            &self.cfg,
        );
        if let Some(outcome) = report.transition.clone()
            && let Some(event) = self.after_transition(&outcome, report.day)
        {
            report.events.push(event);
        }
        if let Some(event) = self.ending_event() {
            report.events.push(event);
        }
        Ok(report)
    }

    /// Make a player-driven transition attempt (e.g. following up on an interview).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Ended`] once the run is over.
    pub fn attempt_transition(&mut self) -> Result<TransitionReport, SessionError> {
        self.ensure_running()?;
        let day = self.day();
        let outcome =
            attempt_transition_with_rng(self.progress.phase.state, &self.stats, self.rng.transition());
        self.progress.apply_transition(&outcome, day);
        let mut events = vec![transition_event(day, &outcome)];
        events.extend(self.after_transition(&outcome, day));
        events.extend(self.ending_event());
        Ok(TransitionReport { outcome, events })
    }

    /// Apply one action, mirroring the hosted `submitAction` call.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying operation.
    pub fn submit(&mut self, action: &SessionAction) -> Result<ActionResult, SessionError> {
        match action {
            SessionAction::Choose { choice_id } => self.choose(choice_id).map(ActionResult::Choice),
            SessionAction::Wait => self.tick_day().map(ActionResult::Day),
            SessionAction::Interview => self.attempt_transition().map(ActionResult::Transition),
        }
    }

    /// Evaluate ending conditions and apply the referral policy.
    ///
    /// Terminal endings are recorded once. Under [`ReferralPolicy::FlagOnly`]
    /// a referral only marks the player eligible and the run continues.
    pub fn check_ending(&mut self) -> Option<EndingType> {
        if let Some(record) = &self.progress.ending {
            return Some(record.ending);
        }
        let day = self.day();
        let ending = check_end_conditions_with(
            &BurnoutRule::from(&self.cfg),
            &self.stats,
            &self.progress,
            day,
        )?;

        if ending == EndingType::ReferralFastTrack
            && self.cfg.referral_policy == ReferralPolicy::FlagOnly
        {
            if !self.referral_eligible {
                log::info!("day {day}: referral fast track unlocked");
            }
            self.referral_eligible = true;
            return Some(ending);
        }

        match self.progress.record_ending(ending, day, ending.summary()) {
            Ok(_) => log::info!("day {day}: run ended with {ending}"),
            Err(err) => log::warn!("day {day}: {err}"),
        }
        Some(ending)
    }

    #[must_use]
    pub fn mirror(&self) -> Mirror {
        Mirror {
            day: self.day(),
            track: self.profile.track,
            state: self.progress.phase.state,
            stats: self.stats.clone(),
            probabilities: transition_probability(self.progress.phase.state, &self.stats),
            runway: runway_days(&self.stats),
            total_applications: self.progress.total_applications,
            total_interviews: self.progress.total_interviews,
            total_rejections: self.progress.total_rejections,
            offers: self.progress.offers.clone(),
            referral_eligible: self.referral_eligible,
            pending_scenario: self.pending_scenario.clone(),
            ending: self.progress.ending.clone(),
        }
    }

    fn ending_event(&mut self) -> Option<DayEvent> {
        let was_ended = self.is_ended();
        self.check_ending();
        if was_ended {
            return None;
        }
        let record = self.progress.ending.as_ref()?;
        let event = if record.ending.is_failure() {
            DayEvent::critical(record.triggered_day, LOG_ENDING_REACHED, record.summary.clone())
        } else {
            DayEvent::info(record.triggered_day, LOG_ENDING_REACHED, record.summary.clone())
        };
        Some(event)
    }

    /// Bookkeeping after a successful move: pick a target company when a new
    /// process starts and write an offer when one arrives.
    fn after_transition(&mut self, outcome: &TransitionOutcome, day: u32) -> Option<DayEvent> {
        if outcome.result != TransitionResult::Success {
            return None;
        }
        match outcome.next_state {
            JobHuntState::Screening => {
                let company = self.pick_company();
                self.progress
                    .set_target(company, role_title(self.profile.track));
                None
            }
            JobHuntState::OfferStage => {
                let offer = self.build_offer(day);
                let event = DayEvent::info(
                    day,
                    LOG_OFFER_RECEIVED,
                    format!(
                        "{} offered you {} at ${:.0}.",
                        offer.company, offer.role, offer.salary
                    ),
                );
                self.progress.record_offer(offer);
                Some(event)
            }
            _ => None,
        }
    }

    fn pick_company(&mut self) -> &'static str {
        let len = u32::try_from(COMPANY_NAMES.len()).unwrap_or(1);
        let idx = usize::try_from(self.rng.selection().next_u32() % len).unwrap_or(0);
        COMPANY_NAMES.get(idx).copied().unwrap_or(COMPANY_NAMES[0])
    }

    fn build_offer(&mut self, day: u32) -> JobOffer {
        let company = match self.progress.phase.current_company.clone() {
            Some(company) => company,
            None => self.pick_company().to_string(),
        };
        let role = self
            .progress
            .phase
            .current_role
            .clone()
            .unwrap_or_else(|| role_title(self.profile.track).to_string());
        JobOffer {
            salary: offer_salary(&self.cfg, self.profile.track, &self.stats),
            role,
            company,
            received_day: day,
        }
    }
}

#[must_use]
pub const fn role_title(track: ProfessionalTrack) -> &'static str {
    match track {
        ProfessionalTrack::Analyst => "Data Analyst",
        ProfessionalTrack::Engineer => "Software Engineer",
        ProfessionalTrack::AiEngineer => "Machine Learning Engineer",
    }
}

/// Track salary base scaled by reputation and technical depth, rounded to
/// the nearest $500.
#[must_use]
pub fn offer_salary(cfg: &SimulationConfig, track: ProfessionalTrack, stats: &SeedStats) -> f64 {
    let scale = OFFER_TECHNICAL_WEIGHT.mul_add(
        stats.ratio(StatKey::TechnicalDepth),
        OFFER_REPUTATION_WEIGHT.mul_add(stats.ratio(StatKey::Reputation), OFFER_SALARY_FLOOR_MULT),
    );
    (cfg.salary_base(track) * scale / OFFER_SALARY_STEP).round() * OFFER_SALARY_STEP
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{LOG_FUNNEL_ADVANCED, LOG_FUNNEL_REJECTED, LOG_FUNNEL_STALLED};
    use crate::profile::{Background, FinancialSituation, SelfRatings};

    fn profile() -> PlayerProfile {
        PlayerProfile::new(
            ProfessionalTrack::Engineer,
            Background::Bootcamp,
            FinancialSituation::Moderate,
            SelfRatings::default(),
        )
    }

    fn session(seed_value: u64) -> CareerSession {
        CareerSession::new(
            profile(),
            seed_value,
            SimulationConfig::default(),
            Arc::new(ScenarioCatalog::load_from_static()),
        )
    }

    fn first_choice(pick: &ScenarioPick) -> String {
        pick.scenario.choices[0].id.clone()
    }

    #[test]
    fn new_session_is_seeded() {
        let session = session(1);
        assert_eq!(session.stats(), &seed(&profile()));
        assert_eq!(session.day(), 0);
        assert_eq!(session.progress().state(), JobHuntState::Searching);
        assert!(!session.is_ended());
    }

    #[test]
    fn scenario_then_choice_updates_history() {
        let mut session = session(2);
        let pick = session.next_scenario().unwrap();
        assert_eq!(pick.scenario.phase, JobHuntState::Searching);
        assert_eq!(session.pending_scenario(), Some(pick.scenario.id.as_str()));

        let choice = first_choice(&pick);
        session.choose(&choice).unwrap();
        assert!(session.selector().has_shown(&pick.scenario.id));
        assert_eq!(session.choices().len(), 1);
        assert!(session.pending_scenario().is_none());
        assert!(matches!(
            session.choose(&choice),
            Err(SessionError::NoPendingScenario)
        ));
    }

    #[test]
    fn unknown_choice_keeps_scenario_pending() {
        let mut session = session(3);
        session.next_scenario().unwrap();
        let err = session.choose("not-a-choice").unwrap_err();
        assert!(matches!(err, SessionError::Effect(_)));
        assert!(session.pending_scenario().is_some());
    }

    #[test]
    fn ticking_advances_days() {
        let mut session = session(4);
        for _ in 0..5 {
            session.tick_day().unwrap();
        }
        assert_eq!(session.day(), 5);
        assert_eq!(session.mirror().day, 5);
    }

    #[test]
    fn flag_only_referral_keeps_running() {
        let mut session = session(5);
        session.stats.network = 95.0;
        session.stats.reputation = 95.0;
        assert_eq!(session.check_ending(), Some(EndingType::ReferralFastTrack));
        assert!(session.referral_eligible());
        assert!(!session.is_ended());
        assert!(session.tick_day().is_ok());
    }

    #[test]
    fn end_run_referral_terminates() {
        let cfg = SimulationConfig {
            referral_policy: ReferralPolicy::EndRun,
            ..SimulationConfig::default()
        };
        let mut session = CareerSession::new(
            profile(),
            6,
            cfg,
            Arc::new(ScenarioCatalog::load_from_static()),
        );
        session.stats.network = 95.0;
        session.stats.reputation = 95.0;
        assert_eq!(session.check_ending(), Some(EndingType::ReferralFastTrack));
        assert!(session.is_ended());
        assert!(matches!(
            session.tick_day(),
            Err(SessionError::Ended(EndingType::ReferralFastTrack))
        ));
    }

    #[test]
    fn bankruptcy_ends_the_run_during_a_tick() {
        let mut session = session(7);
        session.stats.savings = 10.0;
        let report = session.tick_day().unwrap();
        assert!(session.is_ended());
        assert!(report.events.iter().any(|e| e.key == LOG_ENDING_REACHED));
        assert_eq!(
            session.progress().ending.as_ref().map(|e| e.ending),
            Some(EndingType::FinancialBreakdown)
        );
    }

    #[test]
    fn reaching_offer_stage_records_an_offer() {
        let mut session = session(8);
        session.progress.phase.state = JobHuntState::HrRound;
        session.stats.reputation = 60.0;
        session.stats.confidence = 60.0;
        session.stats.interview_skill = 60.0;
        let mut offers = 0;
        for _ in 0..200 {
            if session.progress().state() == JobHuntState::OfferStage {
                break;
            }
            if session.progress().state() != JobHuntState::HrRound {
                session.progress.phase.state = JobHuntState::HrRound;
            }
            let report = session.attempt_transition().unwrap();
            if report.outcome.next_state == JobHuntState::OfferStage {
                offers += 1;
                assert!(report.events.iter().any(|e| e.key == LOG_OFFER_RECEIVED));
            }
        }
        assert_eq!(offers, 1);
        let offer = &session.progress().offers[0];
        assert_eq!(offer.role, "Software Engineer");
        assert!(offer.salary > 0.0);
        assert!((offer.salary % 500.0).abs() < 1e-9);
    }

    #[test]
    fn interview_attempt_reports_its_events() {
        let mut session = session(12);
        let ActionResult::Transition(report) = session.submit(&SessionAction::Interview).unwrap()
        else {
            panic!("interview should resolve a transition");
        };
        let expected_key = match report.outcome.result {
            TransitionResult::Success => LOG_FUNNEL_ADVANCED,
            TransitionResult::Rejection => LOG_FUNNEL_REJECTED,
            TransitionResult::Stall => LOG_FUNNEL_STALLED,
        };
        assert_eq!(report.events[0].key, expected_key);
        assert_eq!(report.events[0].day, 0);
    }

    #[test]
    fn offer_salary_scales_with_traits() {
        let cfg = SimulationConfig::default();
        let weak = SeedStats::default();
        let strong = SeedStats {
            reputation: 100.0,
            technical_depth: 100.0,
            ..SeedStats::default()
        };
        let low = offer_salary(&cfg, ProfessionalTrack::Analyst, &weak);
        let high = offer_salary(&cfg, ProfessionalTrack::Analyst, &strong);
        assert!((low - 76_500.0).abs() < 1e-9);
        assert!((high - 110_500.0).abs() < 1e-9);
    }

    #[test]
    fn submit_dispatches_actions() {
        let mut session = session(9);
        let pick = session.next_scenario().unwrap();
        let choice = first_choice(&pick);
        assert!(matches!(
            session.submit(&SessionAction::Choose { choice_id: choice }),
            Ok(ActionResult::Choice(_))
        ));
        assert!(matches!(
            session.submit(&SessionAction::Wait),
            Ok(ActionResult::Day(_))
        ));
        assert!(matches!(
            session.submit(&SessionAction::Interview),
            Ok(ActionResult::Transition(_))
        ));
    }

    #[test]
    fn snapshot_restores_identical_future() {
        let mut original = session(10);
        for _ in 0..12 {
            if let Ok(pick) = original.next_scenario() {
                let choice = first_choice(&pick);
                let _ = original.choose(&choice);
            }
            let _ = original.tick_day();
        }
        let mut restored = CareerSession::from_snapshot(
            original.snapshot(),
            Arc::new(ScenarioCatalog::load_from_static()),
        )
        .unwrap();
        assert_eq!(restored.mirror(), original.mirror());

        for _ in 0..10 {
            let a = original.tick_day().ok();
            let b = restored.tick_day().ok();
            assert_eq!(a, b);
        }
        assert_eq!(restored.snapshot(), original.snapshot());
    }

    #[test]
    fn snapshot_json_keeps_stream_positions() {
        let mut session = session(12);
        session.tick_day().unwrap();
        session.next_scenario().unwrap();
        let snapshot = session.snapshot();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["version"], SNAPSHOT_VERSION);
        assert_eq!(json["seed"], 12);
        let parsed: SessionSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.rng_positions, snapshot.rng_positions);
        assert_eq!(parsed.pending_scenario, snapshot.pending_scenario);
        assert_eq!(parsed.selector, snapshot.selector);
    }

    #[test]
    fn snapshot_version_is_checked() {
        let mut snapshot = session(11).snapshot();
        snapshot.version = 99;
        let err = CareerSession::from_snapshot(snapshot, Arc::new(ScenarioCatalog::default()))
            .unwrap_err();
        assert!(matches!(err, SessionError::UnsupportedVersion(99)));
    }
}
