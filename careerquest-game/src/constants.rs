//! Centralized balance and tuning constants for Career Quest game logic.
//!
//! These values define the deterministic math for the core simulation.
//! Daily pacing knobs that designers tune live in `SimulationConfig`; the
//! values here only change through reviewed code.

// Event keys ---------------------------------------------------------------
pub(crate) const LOG_ENDING_REACHED: &str = "log.ending.reached";
pub(crate) const LOG_APPLICATION_SENT: &str = "log.application.sent";
pub(crate) const LOG_FUNNEL_ADVANCED: &str = "log.funnel.advanced";
pub(crate) const LOG_FUNNEL_REJECTED: &str = "log.funnel.rejected";
pub(crate) const LOG_FUNNEL_STALLED: &str = "log.funnel.stalled";
pub(crate) const LOG_MONTH_UNEMPLOYED: &str = "log.month.unemployed";
pub(crate) const LOG_SAVINGS_DEPLETED: &str = "log.savings.depleted";
pub(crate) const LOG_OFFER_RECEIVED: &str = "log.offer.received";

// Seeding ------------------------------------------------------------------
pub(crate) const SEED_ENERGY: f64 = 80.0;
pub(crate) const SEED_SCAM_AWARENESS: f64 = 60.0;
pub(crate) const SKILL_BASE: f64 = 30.0;
pub(crate) const SKILL_PER_RATING: f64 = 12.0;
pub(crate) const COMMUNICATION_BASE: f64 = 40.0;
pub(crate) const COMMUNICATION_PER_RATING: f64 = 10.0;
pub(crate) const CONFIDENCE_PER_RATING: f64 = 5.0;
pub(crate) const ANALYST_SQL_BONUS: f64 = 10.0;
pub(crate) const ENGINEER_PYTHON_BONUS: f64 = 10.0;
pub(crate) const AI_ENGINEER_PYTHON_BONUS: f64 = 15.0;
pub(crate) const AI_ENGINEER_DEPTH_BONUS: f64 = 10.0;
pub(crate) const HIGH_PRESSURE_STRESS: f64 = 20.0;
pub(crate) const COMFORTABLE_STRESS_RELIEF: f64 = 15.0;
pub(crate) const RATING_MIN: u8 = 1;
pub(crate) const RATING_MAX: u8 = 5;

// Funnel -------------------------------------------------------------------
pub(crate) const SEARCHING_REJECTION: f64 = 0.15;
pub(crate) const SCREENING_REJECTION: f64 = 0.25;
pub(crate) const TECHNICAL_REJECTION: f64 = 0.35;
pub(crate) const HR_REJECTION: f64 = 0.2;
pub(crate) const OFFER_SUCCESS: f64 = 0.95;
pub(crate) const OFFER_REJECTION: f64 = 0.05;
pub(crate) const DAYS_PER_MONTH: u32 = 30;

// Offers -------------------------------------------------------------------
pub(crate) const OFFER_SALARY_FLOOR_MULT: f64 = 0.9;
pub(crate) const OFFER_REPUTATION_WEIGHT: f64 = 0.2;
pub(crate) const OFFER_TECHNICAL_WEIGHT: f64 = 0.2;
pub(crate) const OFFER_SALARY_STEP: f64 = 500.0;
pub(crate) const COMPANY_NAMES: [&str; 8] = [
    "Northwind Analytics",
    "Bluefin Labs",
    "Harbor Health",
    "Quillstone Bank",
    "Pinecrest Logistics",
    "Orbital Retail",
    "Lumen Robotics",
    "Cobalt Insurance",
];

// Endings ------------------------------------------------------------------
pub(crate) const REFERRAL_NETWORK_THRESHOLD: f64 = 80.0;
pub(crate) const REFERRAL_REPUTATION_THRESHOLD: f64 = 60.0;

// Scenario selection -------------------------------------------------------
pub const SCENARIO_HISTORY_CAP: usize = 100;
pub const DEFAULT_COOLDOWN_DAYS: u32 = 30;
pub(crate) const MIN_SCENARIO_WEIGHT: f64 = 0.1;
pub(crate) const LOW_CONFIDENCE_THRESHOLD: f64 = 30.0;
pub(crate) const LOW_CONFIDENCE_TECHNICAL_MULT: f64 = 0.5;
pub(crate) const LOW_SAVINGS_THRESHOLD: f64 = 20_000.0;
pub(crate) const LOW_SAVINGS_PRESSURE_MULT: f64 = 2.0;
pub(crate) const LOW_SCAM_AWARENESS_THRESHOLD: f64 = 50.0;
pub(crate) const LOW_SCAM_AWARENESS_MULT: f64 = 1.5;
pub(crate) const HIGH_NETWORK_THRESHOLD: f64 = 70.0;
pub(crate) const HIGH_NETWORK_REFERRAL_MULT: f64 = 1.8;
pub(crate) const RECENT_REPEAT_MULT: f64 = 0.3;

// Scenario tags ------------------------------------------------------------
pub const TAG_TECHNICAL: &str = "technical";
pub const TAG_FINANCIAL_PRESSURE: &str = "financial_pressure";
pub const TAG_SCAM: &str = "scam";
pub const TAG_REFERRAL: &str = "referral";

// Shared tolerances --------------------------------------------------------
pub const FLOAT_EPSILON: f64 = 1e-9;
