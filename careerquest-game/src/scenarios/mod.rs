//! Narrative scenario catalog and selection.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::hash::Hasher;
use thiserror::Error;
use twox_hash::XxHash64;

use crate::job_hunt::JobHuntState;
use crate::profile::{ProfessionalTrack, UnknownVariant};
use crate::stats::StatKey;

pub mod selector;

pub use selector::{
    ScenarioPick, SelectionRequest, SelectorState, difficulty_ceiling, effective_weight,
    initialize_selector_state, select_next, select_next_with_rng,
};

pub const DEFAULT_SCENARIO_DATA: &str = include_str!("../../assets/scenarios.json");

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 3;

/// Topic tags attached to a scenario.
pub type TagSet = SmallVec<[String; 4]>;

/// Which tracks a scenario applies to; `"*"` on the wire means every track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TrackScope {
    Universal,
    Track(ProfessionalTrack),
}

impl TrackScope {
    pub const UNIVERSAL_TOKEN: &'static str = "*";

    #[must_use]
    pub fn includes(self, track: ProfessionalTrack) -> bool {
        match self {
            Self::Universal => true,
            Self::Track(scoped) => scoped == track,
        }
    }
}

impl fmt::Display for TrackScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Universal => f.write_str(Self::UNIVERSAL_TOKEN),
            Self::Track(track) => f.write_str(track.as_str()),
        }
    }
}

impl TryFrom<String> for TrackScope {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == Self::UNIVERSAL_TOKEN {
            return Ok(Self::Universal);
        }
        value.parse().map(Self::Track)
    }
}

impl From<TrackScope> for String {
    fn from(scope: TrackScope) -> Self {
        scope.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioChoice {
    pub id: String,
    pub text: String,
    /// Additive deltas keyed by stat.
    #[serde(default)]
    pub effect: BTreeMap<StatKey, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameScenario {
    pub id: String,
    pub title: String,
    pub text: String,
    pub phase: JobHuntState,
    pub tracks: Vec<TrackScope>,
    pub difficulty: u8,
    #[serde(default)]
    pub tags: TagSet,
    #[serde(default = "default_weight")]
    pub weight: f64,
    pub choices: Vec<ScenarioChoice>,
}

const fn default_weight() -> f64 {
    1.0
}

impl GameScenario {
    #[must_use]
    pub fn applies_to(&self, track: ProfessionalTrack) -> bool {
        self.tracks.iter().any(|scope| scope.includes(track))
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    #[must_use]
    pub fn choice(&self, choice_id: &str) -> Option<&ScenarioChoice> {
        self.choices.iter().find(|choice| choice.id == choice_id)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("scenario catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate scenario id `{0}`")]
    DuplicateScenario(String),
    #[error("scenario `{scenario}` repeats choice id `{choice}`")]
    DuplicateChoice { scenario: String, choice: String },
    #[error("scenario `{id}` has difficulty {difficulty}, expected 1..=3")]
    Difficulty { id: String, difficulty: u8 },
    #[error("scenario `{id}` has invalid weight {weight}")]
    Weight { id: String, weight: f64 },
    #[error("scenario `{0}` has no choices")]
    NoChoices(String),
    #[error("scenario `{0}` applies to no tracks")]
    NoTracks(String),
    #[error("no difficulty-1 scenario for {track} during {phase}")]
    MissingBaseline {
        track: ProfessionalTrack,
        phase: JobHuntState,
    },
}

/// Read-only scenario content shared by every session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioCatalog {
    pub scenarios: Vec<GameScenario>,
}

impl ScenarioCatalog {
    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the content breaks a
    /// catalog invariant.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Validate a catalog built in code.
    ///
    /// # Errors
    ///
    /// Returns the first broken invariant.
    pub fn from_scenarios(scenarios: Vec<GameScenario>) -> Result<Self, CatalogError> {
        let catalog = Self { scenarios };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load the catalog shipped with the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_SCENARIO_DATA).unwrap_or_else(|err| {
            log::error!("shipped scenario catalog failed validation: {err}");
            Self::default()
        })
    }

    /// Check structural invariants and that every (track, phase) pair has a
    /// difficulty-1 scenario to fall back on.
    ///
    /// # Errors
    ///
    /// Returns the first broken invariant.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for scenario in &self.scenarios {
            if !seen.insert(scenario.id.as_str()) {
                return Err(CatalogError::DuplicateScenario(scenario.id.clone()));
            }
            validate_scenario(scenario)?;
        }

        for track in ProfessionalTrack::ALL {
            for phase in JobHuntState::ALL {
                let covered = self.scenarios.iter().any(|scenario| {
                    scenario.phase == phase
                        && scenario.difficulty == MIN_DIFFICULTY
                        && scenario.applies_to(track)
                });
                if !covered {
                    return Err(CatalogError::MissingBaseline { track, phase });
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&GameScenario> {
        self.scenarios.iter().find(|scenario| scenario.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Stable content hash used to detect catalog drift under saved sessions.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = XxHash64::with_seed(0);
        hasher.write(&bytes);
        hasher.finish()
    }
}

fn validate_scenario(scenario: &GameScenario) -> Result<(), CatalogError> {
    if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&scenario.difficulty) {
        return Err(CatalogError::Difficulty {
            id: scenario.id.clone(),
            difficulty: scenario.difficulty,
        });
    }
    if !scenario.weight.is_finite() || scenario.weight <= 0.0 {
        return Err(CatalogError::Weight {
            id: scenario.id.clone(),
            weight: scenario.weight,
        });
    }
    if scenario.tracks.is_empty() {
        return Err(CatalogError::NoTracks(scenario.id.clone()));
    }
    if scenario.choices.is_empty() {
        return Err(CatalogError::NoChoices(scenario.id.clone()));
    }
    let mut choice_ids = HashSet::new();
    for choice in &scenario.choices {
        if !choice_ids.insert(choice.id.as_str()) {
            return Err(CatalogError::DuplicateChoice {
                scenario: scenario.id.clone(),
                choice: choice.id.clone(),
            });
        }
    }
    Ok(())
}
