//! Simulation pacing configuration.
//!
//! Designers tune these values through `assets/simulation.json`; every field
//! has a serde default so partial files stay valid.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::constants::DEFAULT_COOLDOWN_DAYS;
use crate::profile::ProfessionalTrack;

pub const DEFAULT_SIMULATION_DATA: &str = include_str!("../assets/simulation.json");

/// Errors raised when simulation configuration invariants are violated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("simulation config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be a probability in [0, 1] (got {value:.3})")]
    Probability { field: &'static str, value: f64 },
    #[error("{field} must be at least {min:.2} (got {value:.2})")]
    MinViolation {
        field: &'static str,
        min: f64,
        value: f64,
    },
    #[error("salary band missing for track {0}")]
    MissingSalaryBand(ProfessionalTrack),
}

/// What a `referral_fast_track` ending does to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferralPolicy {
    /// Mark the player eligible for the referral branch and keep simulating.
    #[default]
    FlagOnly,
    /// Treat the referral as a terminal ending.
    EndRun,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "SimulationConfig::default_stress_drift")]
    pub stress_drift_per_day: f64,
    #[serde(default = "SimulationConfig::default_application_chance")]
    pub application_chance: f64,
    #[serde(default = "SimulationConfig::default_transition_chance")]
    pub transition_chance: f64,
    #[serde(default = "SimulationConfig::default_burnout_stress")]
    pub burnout_stress_threshold: f64,
    #[serde(default = "SimulationConfig::default_burnout_window")]
    pub burnout_window_days: u32,
    #[serde(default = "SimulationConfig::default_burnout_transitions")]
    pub burnout_min_transitions: usize,
    #[serde(default)]
    pub referral_policy: ReferralPolicy,
    #[serde(default = "SimulationConfig::default_cooldown_days")]
    pub scenario_cooldown_days: u32,
    #[serde(default = "SimulationConfig::default_salary_base")]
    pub salary_base: BTreeMap<ProfessionalTrack, f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            stress_drift_per_day: Self::default_stress_drift(),
            application_chance: Self::default_application_chance(),
            transition_chance: Self::default_transition_chance(),
            burnout_stress_threshold: Self::default_burnout_stress(),
            burnout_window_days: Self::default_burnout_window(),
            burnout_min_transitions: Self::default_burnout_transitions(),
            referral_policy: ReferralPolicy::default(),
            scenario_cooldown_days: Self::default_cooldown_days(),
            salary_base: Self::default_salary_base(),
        }
    }
}

impl SimulationConfig {
    const fn default_stress_drift() -> f64 {
        0.5
    }

    const fn default_application_chance() -> f64 {
        0.6
    }

    const fn default_transition_chance() -> f64 {
        0.1
    }

    const fn default_burnout_stress() -> f64 {
        90.0
    }

    const fn default_burnout_window() -> u32 {
        3
    }

    const fn default_burnout_transitions() -> usize {
        3
    }

    const fn default_cooldown_days() -> u32 {
        DEFAULT_COOLDOWN_DAYS
    }

    const fn fallback_salary(track: ProfessionalTrack) -> f64 {
        match track {
            ProfessionalTrack::Analyst => 85_000.0,
            ProfessionalTrack::Engineer => 110_000.0,
            ProfessionalTrack::AiEngineer => 135_000.0,
        }
    }

    fn default_salary_base() -> BTreeMap<ProfessionalTrack, f64> {
        ProfessionalTrack::ALL
            .into_iter()
            .map(|track| (track, Self::fallback_salary(track)))
            .collect()
    }

    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load the configuration shipped with the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_SIMULATION_DATA).unwrap_or_default()
    }

    /// Check range invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("application_chance", self.application_chance),
            ("transition_chance", self.transition_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { field, value });
            }
        }
        if self.stress_drift_per_day.is_nan() || self.stress_drift_per_day < 0.0 {
            return Err(ConfigError::MinViolation {
                field: "stress_drift_per_day",
                min: 0.0,
                value: self.stress_drift_per_day,
            });
        }
        if self.burnout_stress_threshold.is_nan() || self.burnout_stress_threshold < 0.0 {
            return Err(ConfigError::MinViolation {
                field: "burnout_stress_threshold",
                min: 0.0,
                value: self.burnout_stress_threshold,
            });
        }
        for track in ProfessionalTrack::ALL {
            match self.salary_base.get(&track) {
                Some(base) if base.is_finite() && *base > 0.0 => {}
                _ => return Err(ConfigError::MissingSalaryBand(track)),
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn salary_base(&self, track: ProfessionalTrack) -> f64 {
        self.salary_base
            .get(&track)
            .copied()
            .unwrap_or(Self::fallback_salary(track))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_config_matches_defaults() {
        let loaded = SimulationConfig::from_json(DEFAULT_SIMULATION_DATA).expect("static config");
        assert_eq!(loaded, SimulationConfig::default());
    }

    #[test]
    fn partial_documents_fill_defaults() {
        let cfg = SimulationConfig::from_json(r#"{"referral_policy": "end_run"}"#).unwrap();
        assert_eq!(cfg.referral_policy, ReferralPolicy::EndRun);
        assert!((cfg.transition_chance - 0.1).abs() < f64::EPSILON);
        assert!((cfg.salary_base(ProfessionalTrack::Engineer) - 110_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let err = SimulationConfig::from_json(r#"{"application_chance": 1.4}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Probability {
                field: "application_chance",
                ..
            }
        ));
    }

    #[test]
    fn missing_salary_band_is_rejected() {
        let err =
            SimulationConfig::from_json(r#"{"salary_base": {"analyst": 90000.0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSalaryBand(_)));
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        let err = SimulationConfig::from_json("{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
