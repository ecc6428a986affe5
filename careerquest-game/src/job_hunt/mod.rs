//! Interview funnel state machine.
//!
//! The funnel is strictly linear (`searching → screening → technical_round →
//! hr_round → offer_stage → accepted`). Any rejection drops the player back to
//! `searching`; `offer_stage` holds on stall and `accepted` is terminal.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::profile::UnknownVariant;

pub mod daily;
pub mod endings;
pub mod transition;

pub use daily::{DayReport, Runway, runway_days, simulate_day};
pub use endings::{BurnoutRule, EndingType, check_end_conditions, check_end_conditions_with};
pub use transition::{
    TransitionOutcome, TransitionProbability, TransitionResult, attempt_transition,
    attempt_transition_with_rng, rejection_reasons, transition_probability,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobHuntState {
    #[default]
    Searching,
    Screening,
    TechnicalRound,
    HrRound,
    OfferStage,
    Accepted,
}

impl JobHuntState {
    pub const ALL: [Self; 6] = [
        Self::Searching,
        Self::Screening,
        Self::TechnicalRound,
        Self::HrRound,
        Self::OfferStage,
        Self::Accepted,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Searching => "searching",
            Self::Screening => "screening",
            Self::TechnicalRound => "technical_round",
            Self::HrRound => "hr_round",
            Self::OfferStage => "offer_stage",
            Self::Accepted => "accepted",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Searching => "Searching",
            Self::Screening => "Recruiter screening",
            Self::TechnicalRound => "Technical round",
            Self::HrRound => "HR round",
            Self::OfferStage => "Offer stage",
            Self::Accepted => "Accepted",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl fmt::Display for JobHuntState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobHuntState {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "job hunt state",
                value: s.to_string(),
            })
    }
}

/// Successor of `state` in the funnel; the last two stages map to themselves.
#[must_use]
pub const fn next_state(state: JobHuntState) -> JobHuntState {
    match state {
        JobHuntState::Searching => JobHuntState::Screening,
        JobHuntState::Screening => JobHuntState::TechnicalRound,
        JobHuntState::TechnicalRound => JobHuntState::HrRound,
        JobHuntState::HrRound => JobHuntState::OfferStage,
        JobHuntState::OfferStage | JobHuntState::Accepted => JobHuntState::Accepted,
    }
}

/// Live funnel position. Timestamps are simulated day numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHuntPhase {
    pub state: JobHuntState,
    pub entered_day: u32,
    #[serde(default)]
    pub attempt_count: u32,
    #[serde(default)]
    pub rejections: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_role: Option<String>,
}

impl JobHuntPhase {
    #[must_use]
    pub const fn new(state: JobHuntState, entered_day: u32) -> Self {
        Self {
            state,
            entered_day,
            attempt_count: 0,
            rejections: 0,
            current_company: None,
            current_role: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOffer {
    pub salary: f64,
    pub role: String,
    pub company: String,
    pub received_day: u32,
}

/// Terminal marker written at most once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndingRecord {
    pub ending: EndingType,
    pub triggered_day: u32,
    pub summary: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EndingError {
    #[error("run already ended with {existing}")]
    AlreadyEnded { existing: EndingType },
}

/// Funnel progress for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobHuntProgress {
    pub phase: JobHuntPhase,
    #[serde(default)]
    pub history: Vec<JobHuntPhase>,
    #[serde(default)]
    pub days_in_search: u32,
    #[serde(default)]
    pub total_applications: u32,
    #[serde(default)]
    pub total_interviews: u32,
    #[serde(default)]
    pub total_rejections: u32,
    #[serde(default)]
    pub offers: Vec<JobOffer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending: Option<EndingRecord>,
}

impl Default for JobHuntProgress {
    fn default() -> Self {
        initialize_job_hunt()
    }
}

/// Fresh progress: `searching`, zero counters, empty history and offers.
#[must_use]
pub const fn initialize_job_hunt() -> JobHuntProgress {
    JobHuntProgress {
        phase: JobHuntPhase::new(JobHuntState::Searching, 0),
        history: Vec::new(),
        days_in_search: 0,
        total_applications: 0,
        total_interviews: 0,
        total_rejections: 0,
        offers: Vec::new(),
        ending: None,
    }
}

impl JobHuntProgress {
    #[must_use]
    pub const fn state(&self) -> JobHuntState {
        self.phase.state
    }

    #[must_use]
    pub const fn is_ended(&self) -> bool {
        self.ending.is_some()
    }

    /// Apply the bookkeeping for a resolved transition attempt on `day`.
    ///
    /// Success copies the new live phase into `history`. Rejection resets
    /// to a fresh `searching` phase that keeps the rejection tally.
    pub fn apply_transition(&mut self, outcome: &TransitionOutcome, day: u32) {
        match outcome.result {
            TransitionResult::Success => {
                let mut next = JobHuntPhase::new(outcome.next_state, day);
                next.rejections = self.phase.rejections;
                next.current_company = self.phase.current_company.take();
                next.current_role = self.phase.current_role.take();
                self.phase = next;
                self.history.push(self.phase.clone());
                self.total_interviews = self.total_interviews.saturating_add(1);
            }
            TransitionResult::Rejection => {
                let mut reset = JobHuntPhase::new(JobHuntState::Searching, day);
                reset.rejections = self.phase.rejections.saturating_add(1);
                self.phase = reset;
                self.total_rejections = self.total_rejections.saturating_add(1);
            }
            TransitionResult::Stall => {
                self.phase.attempt_count = self.phase.attempt_count.saturating_add(1);
            }
        }
    }

    /// Attach the company and role the player is currently interviewing for.
    pub fn set_target(&mut self, company: impl Into<String>, role: impl Into<String>) {
        self.phase.current_company = Some(company.into());
        self.phase.current_role = Some(role.into());
    }

    pub fn record_offer(&mut self, offer: JobOffer) {
        self.offers.push(offer);
    }

    /// Write the terminal marker.
    ///
    /// # Errors
    ///
    /// Returns [`EndingError::AlreadyEnded`] if an ending was already recorded.
    pub fn record_ending(
        &mut self,
        ending: EndingType,
        day: u32,
        summary: impl Into<String>,
    ) -> Result<&EndingRecord, EndingError> {
        if let Some(existing) = &self.ending {
            return Err(EndingError::AlreadyEnded {
                existing: existing.ending,
            });
        }
        Ok(self.ending.insert(EndingRecord {
            ending,
            triggered_day: day,
            summary: summary.into(),
        }))
    }

    /// Number of history entries entered fewer than `window_days` days before `current_day`.
    #[must_use]
    pub fn transitions_within(&self, current_day: u32, window_days: u32) -> usize {
        self.history
            .iter()
            .filter(|phase| current_day.saturating_sub(phase.entered_day) < window_days)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(result: TransitionResult, from: JobHuntState) -> TransitionOutcome {
        let next_state = match result {
            TransitionResult::Success => next_state(from),
            TransitionResult::Rejection => JobHuntState::Searching,
            TransitionResult::Stall => from,
        };
        TransitionOutcome {
            result,
            from,
            next_state,
            reject_reason: None,
            roll: 0.0,
        }
    }

    #[test]
    fn next_state_walks_the_funnel_in_order() {
        let mut state = JobHuntState::Searching;
        let mut visited = Vec::new();
        while !state.is_terminal() {
            state = next_state(state);
            visited.push(state);
        }
        assert_eq!(
            visited,
            vec![
                JobHuntState::Screening,
                JobHuntState::TechnicalRound,
                JobHuntState::HrRound,
                JobHuntState::OfferStage,
                JobHuntState::Accepted,
            ]
        );
        assert_eq!(next_state(JobHuntState::Accepted), JobHuntState::Accepted);
    }

    #[test]
    fn fresh_progress_is_empty() {
        let progress = initialize_job_hunt();
        assert_eq!(progress.state(), JobHuntState::Searching);
        assert!(progress.history.is_empty());
        assert!(progress.offers.is_empty());
        assert_eq!(progress.days_in_search, 0);
        assert_eq!(progress.total_applications, 0);
        assert!(!progress.is_ended());
    }

    #[test]
    fn success_copies_phase_into_history() {
        let mut progress = initialize_job_hunt();
        progress.set_target("Northwind Analytics", "Data Analyst");
        progress.apply_transition(&outcome(TransitionResult::Success, JobHuntState::Searching), 4);

        assert_eq!(progress.state(), JobHuntState::Screening);
        assert_eq!(progress.history.len(), 1);
        assert_eq!(progress.history[0], progress.phase);
        assert_eq!(progress.phase.entered_day, 4);
        assert_eq!(
            progress.phase.current_company.as_deref(),
            Some("Northwind Analytics")
        );
        assert_eq!(progress.total_interviews, 1);
    }

    #[test]
    fn rejection_resets_to_searching_and_counts() {
        let mut progress = initialize_job_hunt();
        progress.apply_transition(&outcome(TransitionResult::Success, JobHuntState::Searching), 1);
        progress.apply_transition(&outcome(TransitionResult::Success, JobHuntState::Screening), 2);
        progress.apply_transition(
            &outcome(TransitionResult::Rejection, JobHuntState::TechnicalRound),
            3,
        );
        assert_eq!(progress.state(), JobHuntState::Searching);
        assert_eq!(progress.phase.rejections, 1);
        assert_eq!(progress.total_rejections, 1);
        assert_eq!(progress.history.len(), 2);
    }

    #[test]
    fn stall_only_bumps_attempts() {
        let mut progress = initialize_job_hunt();
        progress.apply_transition(&outcome(TransitionResult::Stall, JobHuntState::Searching), 1);
        progress.apply_transition(&outcome(TransitionResult::Stall, JobHuntState::Searching), 2);
        assert_eq!(progress.phase.attempt_count, 2);
        assert_eq!(progress.state(), JobHuntState::Searching);
        assert!(progress.history.is_empty());
    }

    #[test]
    fn ending_is_write_once() {
        let mut progress = initialize_job_hunt();
        let record = progress
            .record_ending(EndingType::FinancialBreakdown, 40, "Savings ran dry.")
            .unwrap();
        assert_eq!(record.triggered_day, 40);
        let err = progress
            .record_ending(EndingType::OfferAccepted, 41, "late")
            .unwrap_err();
        assert_eq!(
            err,
            EndingError::AlreadyEnded {
                existing: EndingType::FinancialBreakdown
            }
        );
        assert_eq!(
            progress.ending.as_ref().map(|e| e.ending),
            Some(EndingType::FinancialBreakdown)
        );
    }

    #[test]
    fn transitions_within_counts_recent_history() {
        let mut progress = initialize_job_hunt();
        for (from, day) in [
            (JobHuntState::Searching, 3),
            (JobHuntState::Screening, 8),
            (JobHuntState::TechnicalRound, 9),
            (JobHuntState::HrRound, 10),
        ] {
            progress.apply_transition(&outcome(TransitionResult::Success, from), day);
        }
        assert_eq!(progress.transitions_within(10, 3), 3);
        assert_eq!(progress.transitions_within(10, 1), 1);
        assert_eq!(progress.transitions_within(30, 3), 0);
    }

    #[test]
    fn state_labels_parse() {
        for state in JobHuntState::ALL {
            assert_eq!(state.as_str().parse::<JobHuntState>(), Ok(state));
        }
        assert!("interviewing".parse::<JobHuntState>().is_err());
    }
}
