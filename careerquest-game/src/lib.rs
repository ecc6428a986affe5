//! Career Quest Simulation Core
//!
//! Platform-agnostic logic for the Career Quest job-hunt simulation: stat
//! seeding, the interview funnel state machine, and narrative scenario
//! selection. The crate has no UI or I/O beyond the JSON assets it embeds.

pub mod config;
pub mod constants;
pub mod effects;
pub mod event;
pub mod job_hunt;
pub mod numbers;
pub mod profile;
pub mod replay;
pub mod rng;
pub mod scenarios;
pub mod seeding;
pub mod session;
pub mod stats;

use std::sync::Arc;

use thiserror::Error;

// Re-export commonly used types
pub use config::{ConfigError, ReferralPolicy, SimulationConfig};
pub use effects::{ChoiceOutcome, EffectError, StatChange, apply_choice};
pub use event::{DayEvent, EventDecisionTrace, EventSeverity, WeightFactor, WeightedCandidate};
pub use job_hunt::{
    BurnoutRule, DayReport, EndingError, EndingRecord, EndingType, JobHuntPhase, JobHuntProgress,
    JobHuntState, JobOffer, Runway, TransitionOutcome, TransitionProbability, TransitionResult,
    attempt_transition, attempt_transition_with_rng, check_end_conditions,
    check_end_conditions_with, initialize_job_hunt, next_state, rejection_reasons, runway_days,
    simulate_day, transition_probability,
};
pub use profile::{
    Background, FinancialSituation, PlayerProfile, ProfessionalTrack, SelfRatings, UnknownVariant,
};
pub use replay::{encode_replay_code, parse_replay_code, replay_code_from_entropy};
pub use rng::{CountingRng, RngBundle, RngPositions};
pub use scenarios::{
    CatalogError, GameScenario, ScenarioCatalog, ScenarioChoice, ScenarioPick, SelectionRequest,
    SelectorState, TrackScope, initialize_selector_state, select_next, select_next_with_rng,
};
pub use seeding::seed;
pub use session::{
    ActionResult, CareerSession, ChoiceRecord, Mirror, SessionAction, SessionError,
    SessionSnapshot, TransitionReport,
};
pub use stats::{SeedStats, StatKey};

/// Config name under which [`SimulationConfig`] is requested from a [`DataLoader`].
pub const SIMULATION_CONFIG_NAME: &str = "simulation";

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the scenario catalog from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or fails validation.
    fn load_scenario_catalog(&self) -> Result<ScenarioCatalog, Self::Error>;

    /// Load configuration data for a specific system
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: serde::de::DeserializeOwned;
}

/// Trait for abstracting save/load operations
/// Platform-specific implementations should provide this
pub trait SessionStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save a session snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved.
    fn save_session(&self, save_name: &str, snapshot: &SessionSnapshot) -> Result<(), Self::Error>;

    /// Load a session snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be loaded.
    fn load_session(&self, save_name: &str) -> Result<Option<SessionSnapshot>, Self::Error>;

    /// Delete a saved session
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_session(&self, save_name: &str) -> Result<(), Self::Error>;
}

#[derive(Debug, Error)]
pub enum BundledDataError {
    #[error("no bundled config named `{0}`")]
    UnknownConfig(String),
    #[error("bundled config `{name}` is not valid: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Loader backed by the JSON assets compiled into this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledData;

impl DataLoader for BundledData {
    type Error = BundledDataError;

    fn load_scenario_catalog(&self) -> Result<ScenarioCatalog, Self::Error> {
        Ok(ScenarioCatalog::from_json(scenarios::DEFAULT_SCENARIO_DATA)?)
    }

    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let raw = match config_name {
            SIMULATION_CONFIG_NAME => config::DEFAULT_SIMULATION_DATA,
            other => return Err(BundledDataError::UnknownConfig(other.to_string())),
        };
        serde_json::from_str(raw).map_err(|source| BundledDataError::Parse {
            name: config_name.to_string(),
            source,
        })
    }
}

/// Main engine for creating and persisting career sessions
pub struct GameEngine<L, S>
where
    L: DataLoader,
    S: SessionStorage,
{
    data_loader: L,
    storage: S,
}

impl<L, S> GameEngine<L, S>
where
    L: DataLoader,
    S: SessionStorage,
{
    /// Create a new engine with the provided data loader and storage
    pub const fn new(data_loader: L, storage: S) -> Self {
        Self {
            data_loader,
            storage,
        }
    }

    /// Load and validate the simulation config.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or breaks a range invariant.
    pub fn load_config(&self) -> anyhow::Result<SimulationConfig> {
        let cfg: SimulationConfig = self.data_loader.load_config(SIMULATION_CONFIG_NAME)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Start a new session for `profile`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or config cannot be loaded.
    pub fn create_session(
        &self,
        profile: PlayerProfile,
        seed: u64,
    ) -> anyhow::Result<CareerSession> {
        let catalog = self.data_loader.load_scenario_catalog()?;
        let cfg = self.load_config()?;
        Ok(CareerSession::new(profile, seed, cfg, Arc::new(catalog)))
    }

    /// Save a session
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved.
    pub fn save_session(&self, save_name: &str, session: &CareerSession) -> Result<(), S::Error> {
        self.storage.save_session(save_name, &session.snapshot())
    }

    /// Load a session
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be loaded or restored.
    pub fn load_session(&self, save_name: &str) -> anyhow::Result<Option<CareerSession>>
    where
        L::Error: Into<anyhow::Error>,
        S::Error: Into<anyhow::Error>,
    {
        let Some(snapshot) = self.storage.load_session(save_name).map_err(Into::into)? else {
            return Ok(None);
        };
        // Rehydrate with the current catalog
        let catalog = self.data_loader.load_scenario_catalog().map_err(Into::into)?;
        let fingerprint = catalog.fingerprint();
        if fingerprint != snapshot.catalog_fingerprint {
            log::warn!(
                "save `{save_name}` was written against catalog {:#018x}, current is {fingerprint:#018x}",
                snapshot.catalog_fingerprint
            );
        }
        let session = CareerSession::from_snapshot(snapshot, Arc::new(catalog))?;
        Ok(Some(session))
    }

    /// Delete a saved session
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    pub fn delete_session(&self, save_name: &str) -> Result<(), S::Error> {
        self.storage.delete_session(save_name)
    }
}
