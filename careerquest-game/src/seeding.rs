//! Stat seeding: maps a player profile onto the initial trait vector.
//!
//! Pure and deterministic. Every additive step clamps percentage fields
//! immediately, so later steps always compound on in-range values.

use crate::constants::{
    AI_ENGINEER_DEPTH_BONUS, AI_ENGINEER_PYTHON_BONUS, ANALYST_SQL_BONUS, COMFORTABLE_STRESS_RELIEF,
    COMMUNICATION_BASE, COMMUNICATION_PER_RATING, CONFIDENCE_PER_RATING, ENGINEER_PYTHON_BONUS,
    HIGH_PRESSURE_STRESS, SEED_ENERGY, SEED_SCAM_AWARENESS, SKILL_BASE, SKILL_PER_RATING,
};
use crate::numbers::clamp_pct;
use crate::profile::{Background, FinancialSituation, PlayerProfile, ProfessionalTrack};
use crate::stats::SeedStats;

/// Per-track starting values before background and ratings are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackDefaults {
    pub confidence: f64,
    pub stress: f64,
    pub reputation: f64,
    pub network: f64,
    pub linkedin_presence: f64,
    pub resume_strength: f64,
    pub portfolio_strength: f64,
    pub interview_skill: f64,
    pub technical_depth: f64,
}

/// Background scaling applied to confidence, resume, and portfolio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundMultipliers {
    pub confidence: f64,
    pub resume: f64,
    pub portfolio: f64,
}

/// Starting money for a financial situation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialStart {
    pub savings: f64,
    pub spending_monthly: f64,
}

#[must_use]
pub const fn track_defaults(track: ProfessionalTrack) -> TrackDefaults {
    match track {
        ProfessionalTrack::Analyst => TrackDefaults {
            confidence: 50.0,
            stress: 55.0,
            reputation: 30.0,
            network: 20.0,
            linkedin_presence: 40.0,
            resume_strength: 45.0,
            portfolio_strength: 30.0,
            interview_skill: 40.0,
            technical_depth: 55.0,
        },
        ProfessionalTrack::Engineer => TrackDefaults {
            confidence: 45.0,
            stress: 60.0,
            reputation: 25.0,
            network: 20.0,
            linkedin_presence: 35.0,
            resume_strength: 50.0,
            portfolio_strength: 45.0,
            interview_skill: 35.0,
            technical_depth: 60.0,
        },
        ProfessionalTrack::AiEngineer => TrackDefaults {
            confidence: 45.0,
            stress: 65.0,
            reputation: 25.0,
            network: 15.0,
            linkedin_presence: 35.0,
            resume_strength: 45.0,
            portfolio_strength: 50.0,
            interview_skill: 30.0,
            technical_depth: 65.0,
        },
    }
}

#[must_use]
pub const fn background_multipliers(background: Background) -> BackgroundMultipliers {
    match background {
        Background::FreshGrad => BackgroundMultipliers {
            confidence: 0.7,
            resume: 0.6,
            portfolio: 0.5,
        },
        Background::CareerSwitcher => BackgroundMultipliers {
            confidence: 0.85,
            resume: 0.8,
            portfolio: 0.6,
        },
        Background::Bootcamp => BackgroundMultipliers {
            confidence: 0.8,
            resume: 0.7,
            portfolio: 0.9,
        },
        Background::Experienced => BackgroundMultipliers {
            confidence: 1.2,
            resume: 1.4,
            portfolio: 1.2,
        },
    }
}

#[must_use]
pub const fn financial_start(situation: FinancialSituation) -> FinancialStart {
    match situation {
        FinancialSituation::Comfortable => FinancialStart {
            savings: 150_000.0,
            spending_monthly: 3_000.0,
        },
        FinancialSituation::Moderate => FinancialStart {
            savings: 60_000.0,
            spending_monthly: 3_500.0,
        },
        FinancialSituation::HighPressure => FinancialStart {
            savings: 20_000.0,
            spending_monthly: 2_500.0,
        },
    }
}

/// Build the initial trait vector for a profile.
#[must_use]
pub fn seed(profile: &PlayerProfile) -> SeedStats {
    let defaults = track_defaults(profile.track);
    let mult = background_multipliers(profile.background);
    let money = financial_start(profile.financial_situation);
    let ratings = profile.self_ratings.clamped();

    let mut stats = SeedStats {
        confidence: clamp_pct(defaults.confidence * mult.confidence),
        // Weaker backgrounds start more stressed.
        stress: clamp_pct(defaults.stress / mult.confidence),
        energy: SEED_ENERGY,
        reputation: clamp_pct(defaults.reputation),
        network: clamp_pct(defaults.network),
        linkedin_presence: clamp_pct(defaults.linkedin_presence),
        resume_strength: clamp_pct(defaults.resume_strength * mult.resume),
        portfolio_strength: clamp_pct(defaults.portfolio_strength * mult.portfolio),
        interview_skill: clamp_pct(defaults.interview_skill),
        technical_depth: clamp_pct(defaults.technical_depth),
        python_skill: 0.0,
        sql_skill: 0.0,
        communication: 0.0,
        scam_awareness: SEED_SCAM_AWARENESS,
        savings: money.savings,
        spending_monthly: money.spending_monthly,
        months_unemployed: 0,
        applications_sent: 0,
    };

    stats.python_skill = clamp_pct(SKILL_PER_RATING.mul_add(f64::from(ratings.python), SKILL_BASE));
    stats.sql_skill = clamp_pct(SKILL_PER_RATING.mul_add(f64::from(ratings.sql), SKILL_BASE));
    stats.communication = clamp_pct(COMMUNICATION_PER_RATING.mul_add(
        f64::from(ratings.communication),
        COMMUNICATION_BASE,
    ));
    stats.confidence = clamp_pct(CONFIDENCE_PER_RATING.mul_add(
        f64::from(ratings.confidence),
        stats.confidence,
    ));

    apply_track_bonus(&mut stats, profile.track);
    apply_financial_stress(&mut stats, profile.financial_situation);
    stats
}

fn apply_track_bonus(stats: &mut SeedStats, track: ProfessionalTrack) {
    match track {
        ProfessionalTrack::Analyst => {
            stats.sql_skill = clamp_pct(stats.sql_skill + ANALYST_SQL_BONUS);
        }
        ProfessionalTrack::Engineer => {
            stats.python_skill = clamp_pct(stats.python_skill + ENGINEER_PYTHON_BONUS);
        }
        ProfessionalTrack::AiEngineer => {
            stats.python_skill = clamp_pct(stats.python_skill + AI_ENGINEER_PYTHON_BONUS);
            stats.technical_depth = clamp_pct(stats.technical_depth + AI_ENGINEER_DEPTH_BONUS);
        }
    }
}

fn apply_financial_stress(stats: &mut SeedStats, situation: FinancialSituation) {
    match situation {
        FinancialSituation::HighPressure => {
            stats.stress = clamp_pct(stats.stress + HIGH_PRESSURE_STRESS);
        }
        FinancialSituation::Comfortable => {
            stats.stress = clamp_pct(stats.stress - COMFORTABLE_STRESS_RELIEF);
        }
        FinancialSituation::Moderate => {}
    }
}
