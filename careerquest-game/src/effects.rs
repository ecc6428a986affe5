//! Applies a narrative choice to the player's traits.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::numbers::round_f64_to_i64;
use crate::scenarios::{GameScenario, SelectorState};
use crate::stats::{SeedStats, StatKey};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EffectError {
    #[error("scenario `{scenario}` has no choice `{choice}`")]
    UnknownChoice { scenario: String, choice: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatChange {
    pub key: StatKey,
    pub before: f64,
    pub after: f64,
}

impl StatChange {
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.after - self.before
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOutcome {
    pub scenario_id: String,
    pub choice_id: String,
    pub changes: Vec<StatChange>,
    pub notifications: Vec<String>,
}

/// Apply `choice_id` from `scenario` and record the scenario as shown on `day`.
///
/// # Errors
///
/// Returns [`EffectError::UnknownChoice`] when the scenario has no such
/// choice; nothing is modified in that case.
pub fn apply_choice(
    stats: &mut SeedStats,
    selector: &mut SelectorState,
    scenario: &GameScenario,
    choice_id: &str,
    day: u32,
) -> Result<ChoiceOutcome, EffectError> {
    let choice = scenario
        .choice(choice_id)
        .ok_or_else(|| EffectError::UnknownChoice {
            scenario: scenario.id.clone(),
            choice: choice_id.to_string(),
        })?;

    let mut outcome = ChoiceOutcome {
        scenario_id: scenario.id.clone(),
        choice_id: choice.id.clone(),
        ..ChoiceOutcome::default()
    };

    for (&key, &delta) in &choice.effect {
        let before = stats.get(key);
        stats.apply_delta(key, delta);
        let change = StatChange {
            key,
            before,
            after: stats.get(key),
        };
        if let Some(note) = notification(&change) {
            outcome.notifications.push(note);
        }
        outcome.changes.push(change);
    }
    stats.clamp();
    selector.record_shown(scenario.id.clone(), day);

    log::debug!(
        "choice {}/{} applied {} changes",
        scenario.id,
        choice.id,
        outcome.changes.len()
    );
    Ok(outcome)
}

fn notification(change: &StatChange) -> Option<String> {
    let shown = round_f64_to_i64(change.delta());
    if shown == 0 {
        return None;
    }
    let label = change.key.label();
    if matches!(change.key, StatKey::Savings | StatKey::SpendingMonthly) {
        let sign = if shown < 0 { "-" } else { "+" };
        return Some(format!("{label} {sign}${}", shown.unsigned_abs()));
    }
    Some(format!("{label} {shown:+}"))
}
