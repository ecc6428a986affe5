//! Structured events and selection telemetry emitted by the simulation.
//!
//! Events carry a stable `key` for localization plus an English `message`
//! the presentation layer can show as-is.

use serde::{Deserialize, Serialize};

/// Severity tier for a simulation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSeverity {
    Info,
    Warning,
    Critical,
}

/// Human-readable event produced by a day tick or a transition attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEvent {
    /// Simulated day the event happened on.
    pub day: u32,
    pub key: String,
    pub severity: EventSeverity,
    pub message: String,
}

impl DayEvent {
    #[must_use]
    pub fn info(day: u32, key: &str, message: impl Into<String>) -> Self {
        Self::new(day, key, EventSeverity::Info, message)
    }

    #[must_use]
    pub fn warning(day: u32, key: &str, message: impl Into<String>) -> Self {
        Self::new(day, key, EventSeverity::Warning, message)
    }

    #[must_use]
    pub fn critical(day: u32, key: &str, message: impl Into<String>) -> Self {
        Self::new(day, key, EventSeverity::Critical, message)
    }

    fn new(day: u32, key: &str, severity: EventSeverity, message: impl Into<String>) -> Self {
        Self {
            day,
            key: key.to_string(),
            severity,
            message: message.into(),
        }
    }
}

/// Explainability telemetry for weighted scenario selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDecisionTrace {
    /// Identifier for the selection pool (e.g., `scenario.engineer.screening`).
    pub pool_id: String,
    /// Uniform roll in `[0, 1)` used to pick from the pool.
    pub roll: f64,
    /// Candidate weights considered during selection.
    pub candidates: Vec<WeightedCandidate>,
    /// Identifier of the selected candidate.
    pub chosen_id: String,
    /// Whether the cooldown filter had to be bypassed.
    #[serde(default)]
    pub cooldown_bypassed: bool,
}

/// Candidate weight telemetry captured during selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCandidate {
    pub id: String,
    pub base_weight: f64,
    /// Multipliers applied in order.
    pub multipliers: Vec<WeightFactor>,
    pub final_weight: f64,
}

/// Single multiplicative weight factor used in a selection trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightFactor {
    pub label: String,
    pub value: f64,
}

impl WeightFactor {
    #[must_use]
    pub fn new(label: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_event_roundtrips() {
        let event = DayEvent::warning(7, "log.savings.depleted", "Savings ran out.");
        assert_eq!(event.severity, EventSeverity::Warning);
        let json = serde_json::to_string(&event).expect("serialize");
        let restored: DayEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, event);
    }

    #[test]
    fn decision_trace_defaults_cooldown_flag() {
        let json = r#"{
            "pool_id": "scenario.analyst.searching",
            "roll": 0.25,
            "candidates": [
                {"id": "a", "base_weight": 1.0, "multipliers": [], "final_weight": 1.0}
            ],
            "chosen_id": "a"
        }"#;
        let trace: EventDecisionTrace = serde_json::from_str(json).expect("deserialize");
        assert!(!trace.cooldown_bypassed);
        assert_eq!(trace.candidates.len(), 1);
    }
}
