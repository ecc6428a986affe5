use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::{GameScenario, ScenarioCatalog};
use crate::constants::{
    DEFAULT_COOLDOWN_DAYS, HIGH_NETWORK_REFERRAL_MULT, HIGH_NETWORK_THRESHOLD,
    LOW_CONFIDENCE_TECHNICAL_MULT, LOW_CONFIDENCE_THRESHOLD, LOW_SAVINGS_PRESSURE_MULT,
    LOW_SAVINGS_THRESHOLD, LOW_SCAM_AWARENESS_MULT, LOW_SCAM_AWARENESS_THRESHOLD,
    MIN_SCENARIO_WEIGHT, RECENT_REPEAT_MULT, SCENARIO_HISTORY_CAP, TAG_FINANCIAL_PRESSURE,
    TAG_REFERRAL, TAG_SCAM, TAG_TECHNICAL,
};
use crate::event::{EventDecisionTrace, WeightFactor, WeightedCandidate};
use crate::job_hunt::JobHuntState;
use crate::numbers::{clamp_unit, unit_from_u32};
use crate::profile::ProfessionalTrack;
use crate::stats::SeedStats;

/// Per-session record of recently shown scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorState {
    scenario_history: VecDeque<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_scenario_day: Option<u32>,
    #[serde(default = "default_cooldown")]
    cooldown_period: u32,
}

const fn default_cooldown() -> u32 {
    DEFAULT_COOLDOWN_DAYS
}

impl Default for SelectorState {
    fn default() -> Self {
        initialize_selector_state()
    }
}

#[must_use]
pub const fn initialize_selector_state() -> SelectorState {
    SelectorState {
        scenario_history: VecDeque::new(),
        last_scenario_day: None,
        cooldown_period: DEFAULT_COOLDOWN_DAYS,
    }
}

impl SelectorState {
    #[must_use]
    pub const fn with_cooldown(cooldown_period: u32) -> Self {
        Self {
            scenario_history: VecDeque::new(),
            last_scenario_day: None,
            cooldown_period,
        }
    }

    /// Append `id` to the history, evicting the oldest entries past the cap.
    pub fn record_shown(&mut self, id: impl Into<String>, day: u32) {
        self.scenario_history.push_back(id.into());
        while self.scenario_history.len() > SCENARIO_HISTORY_CAP {
            self.scenario_history.pop_front();
        }
        self.last_scenario_day = Some(day);
    }

    #[must_use]
    pub fn has_shown(&self, id: &str) -> bool {
        self.scenario_history.iter().any(|seen| seen == id)
    }

    /// History in recording order, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.scenario_history.iter().map(String::as_str)
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.scenario_history.len()
    }

    #[must_use]
    pub const fn last_scenario_day(&self) -> Option<u32> {
        self.last_scenario_day
    }

    #[must_use]
    pub const fn cooldown_period(&self) -> u32 {
        self.cooldown_period
    }

    /// Whether the last scenario was shown fewer than `cooldown_period` days before `day`.
    #[must_use]
    pub fn within_cooldown(&self, day: u32) -> bool {
        self.last_scenario_day
            .is_some_and(|last| day.saturating_sub(last) < self.cooldown_period)
    }
}

/// Inputs for one selection.
#[derive(Debug, Clone, Copy)]
pub struct SelectionRequest<'a> {
    pub track: ProfessionalTrack,
    pub state: JobHuntState,
    pub stats: &'a SeedStats,
    pub selector: &'a SelectorState,
    pub current_day: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioPick {
    pub scenario: GameScenario,
    pub decision_trace: EventDecisionTrace,
}

/// Highest difficulty tier offered in `state`.
#[must_use]
pub const fn difficulty_ceiling(state: JobHuntState, _stats: &SeedStats) -> u8 {
    match state {
        JobHuntState::Searching | JobHuntState::Screening | JobHuntState::Accepted => 1,
        JobHuntState::TechnicalRound | JobHuntState::HrRound | JobHuntState::OfferStage => 2,
    }
}

/// Reweight a scenario for the player's current traits and history.
#[must_use]
pub fn effective_weight(
    scenario: &GameScenario,
    stats: &SeedStats,
    selector: &SelectorState,
    current_day: u32,
) -> WeightedCandidate {
    let mut multipliers = Vec::new();
    if stats.confidence < LOW_CONFIDENCE_THRESHOLD && scenario.has_tag(TAG_TECHNICAL) {
        multipliers.push(WeightFactor::new("low_confidence", LOW_CONFIDENCE_TECHNICAL_MULT));
    }
    if stats.savings < LOW_SAVINGS_THRESHOLD && scenario.has_tag(TAG_FINANCIAL_PRESSURE) {
        multipliers.push(WeightFactor::new("low_savings", LOW_SAVINGS_PRESSURE_MULT));
    }
    if stats.scam_awareness < LOW_SCAM_AWARENESS_THRESHOLD && scenario.has_tag(TAG_SCAM) {
        multipliers.push(WeightFactor::new("low_scam_awareness", LOW_SCAM_AWARENESS_MULT));
    }
    if stats.network > HIGH_NETWORK_THRESHOLD && scenario.has_tag(TAG_REFERRAL) {
        multipliers.push(WeightFactor::new("strong_network", HIGH_NETWORK_REFERRAL_MULT));
    }
    if selector.has_shown(&scenario.id) && selector.within_cooldown(current_day) {
        multipliers.push(WeightFactor::new("recent_repeat", RECENT_REPEAT_MULT));
    }

    let raw = multipliers
        .iter()
        .fold(scenario.weight, |weight, factor| weight * factor.value);
    WeightedCandidate {
        id: scenario.id.clone(),
        base_weight: scenario.weight,
        multipliers,
        final_weight: raw.max(MIN_SCENARIO_WEIGHT),
    }
}

/// Pick the next scenario for a roll in `[0, 1)`.
///
/// Returns `None` only when no scenario matches the track, phase, and
/// difficulty ceiling, which a validated catalog rules out.
#[must_use]
pub fn select_next(
    catalog: &ScenarioCatalog,
    request: &SelectionRequest<'_>,
    roll: f64,
) -> Option<ScenarioPick> {
    let ceiling = difficulty_ceiling(request.state, request.stats);
    let candidates: Vec<&GameScenario> = catalog
        .scenarios
        .iter()
        .filter(|scenario| scenario.applies_to(request.track))
        .filter(|scenario| scenario.phase == request.state)
        .filter(|scenario| scenario.difficulty <= ceiling)
        .collect();

    let pool_id = format!("scenario.{}.{}", request.track, request.state);
    if candidates.is_empty() {
        log::warn!("{pool_id}: no scenario at difficulty <= {ceiling}");
        return None;
    }

    let weighted: Vec<(&GameScenario, WeightedCandidate)> = candidates
        .into_iter()
        .map(|scenario| {
            let weight =
                effective_weight(scenario, request.stats, request.selector, request.current_day);
            (scenario, weight)
        })
        .collect();

    let fresh: Vec<usize> = weighted
        .iter()
        .enumerate()
        .filter(|(_, (scenario, _))| !request.selector.has_shown(&scenario.id))
        .map(|(idx, _)| idx)
        .collect();
    let cooldown_bypassed = fresh.is_empty();
    let pool: Vec<usize> = if cooldown_bypassed {
        (0..weighted.len()).collect()
    } else {
        fresh
    };

    let roll = clamp_unit(roll);
    let chosen_idx = walk_weights(&pool, &weighted, roll)?;
    let (chosen, _) = weighted.get(chosen_idx)?;

    log::debug!(
        "{pool_id}: roll={roll:.4} candidates={} bypass={cooldown_bypassed} -> {}",
        pool.len(),
        chosen.id
    );

    let decision_trace = EventDecisionTrace {
        pool_id,
        roll,
        candidates: pool
            .iter()
            .filter_map(|idx| weighted.get(*idx).map(|(_, weight)| weight.clone()))
            .collect(),
        chosen_id: chosen.id.clone(),
        cooldown_bypassed,
    };

    Some(ScenarioPick {
        scenario: (*chosen).clone(),
        decision_trace,
    })
}

/// Pick the next scenario, consuming exactly one draw from `rng`.
#[must_use]
pub fn select_next_with_rng<R: RngCore + ?Sized>(
    catalog: &ScenarioCatalog,
    request: &SelectionRequest<'_>,
    rng: &mut R,
) -> Option<ScenarioPick> {
    let roll = unit_from_u32(rng.next_u32());
    select_next(catalog, request, roll)
}

/// Subtract weights from `roll * total` until the remainder is non-positive.
fn walk_weights(
    pool: &[usize],
    weighted: &[(&GameScenario, WeightedCandidate)],
    roll: f64,
) -> Option<usize> {
    let total: f64 = pool
        .iter()
        .filter_map(|idx| weighted.get(*idx))
        .map(|(_, weight)| weight.final_weight)
        .sum();
    let mut remaining = roll * total;
    for idx in pool {
        let Some((_, weight)) = weighted.get(*idx) else {
            continue;
        };
        remaining -= weight.final_weight;
        if remaining <= 0.0 {
            return Some(*idx);
        }
    }
    pool.last().copied()
}
