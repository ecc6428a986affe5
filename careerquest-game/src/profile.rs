//! Player profile captured once at game start.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{RATING_MAX, RATING_MIN};

/// Raised when a profile label does not name a known variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfessionalTrack {
    Analyst,
    Engineer,
    AiEngineer,
}

impl ProfessionalTrack {
    pub const ALL: [Self; 3] = [Self::Analyst, Self::Engineer, Self::AiEngineer];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Analyst => "analyst",
            Self::Engineer => "engineer",
            Self::AiEngineer => "ai_engineer",
        }
    }
}

impl fmt::Display for ProfessionalTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfessionalTrack {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "analyst" => Ok(Self::Analyst),
            "engineer" => Ok(Self::Engineer),
            "ai_engineer" => Ok(Self::AiEngineer),
            _ => Err(UnknownVariant::new("track", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    FreshGrad,
    CareerSwitcher,
    Bootcamp,
    Experienced,
}

impl Background {
    pub const ALL: [Self; 4] = [
        Self::FreshGrad,
        Self::CareerSwitcher,
        Self::Bootcamp,
        Self::Experienced,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FreshGrad => "fresh_grad",
            Self::CareerSwitcher => "career_switcher",
            Self::Bootcamp => "bootcamp",
            Self::Experienced => "experienced",
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Background {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fresh_grad" => Ok(Self::FreshGrad),
            "career_switcher" => Ok(Self::CareerSwitcher),
            "bootcamp" => Ok(Self::Bootcamp),
            "experienced" => Ok(Self::Experienced),
            _ => Err(UnknownVariant::new("background", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialSituation {
    Comfortable,
    Moderate,
    HighPressure,
}

impl FinancialSituation {
    pub const ALL: [Self; 3] = [Self::Comfortable, Self::Moderate, Self::HighPressure];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comfortable => "comfortable",
            Self::Moderate => "moderate",
            Self::HighPressure => "high_pressure",
        }
    }
}

impl fmt::Display for FinancialSituation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinancialSituation {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comfortable" => Ok(Self::Comfortable),
            "moderate" => Ok(Self::Moderate),
            "high_pressure" => Ok(Self::HighPressure),
            _ => Err(UnknownVariant::new("financial situation", s)),
        }
    }
}

/// Player self-assessment, each rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfRatings {
    pub python: u8,
    pub sql: u8,
    pub communication: u8,
    pub confidence: u8,
}

impl SelfRatings {
    /// Build ratings, clamping each value into `1..=5`.
    #[must_use]
    pub fn new(python: u8, sql: u8, communication: u8, confidence: u8) -> Self {
        Self {
            python,
            sql,
            communication,
            confidence,
        }
        .clamped()
    }

    #[must_use]
    pub fn clamped(self) -> Self {
        let fit = |value: u8| value.clamp(RATING_MIN, RATING_MAX);
        Self {
            python: fit(self.python),
            sql: fit(self.sql),
            communication: fit(self.communication),
            confidence: fit(self.confidence),
        }
    }
}

impl Default for SelfRatings {
    fn default() -> Self {
        Self::new(3, 3, 3, 3)
    }
}

/// Immutable description of the player, captured at game start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub track: ProfessionalTrack,
    pub background: Background,
    pub financial_situation: FinancialSituation,
    pub self_ratings: SelfRatings,
}

impl PlayerProfile {
    #[must_use]
    pub const fn new(
        track: ProfessionalTrack,
        background: Background,
        financial_situation: FinancialSituation,
        self_ratings: SelfRatings,
    ) -> Self {
        Self {
            track,
            background,
            financial_situation,
            self_ratings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_roundtrip_through_from_str() {
        for track in ProfessionalTrack::ALL {
            assert_eq!(track.as_str().parse::<ProfessionalTrack>(), Ok(track));
        }
        for background in Background::ALL {
            assert_eq!(background.to_string().parse::<Background>(), Ok(background));
        }
        for situation in FinancialSituation::ALL {
            assert_eq!(
                situation.as_str().parse::<FinancialSituation>(),
                Ok(situation)
            );
        }
        let err = "wizard".parse::<ProfessionalTrack>().unwrap_err();
        assert_eq!(err.to_string(), "unknown track `wizard`");
    }

    #[test]
    fn ratings_clamp_into_range() {
        let ratings = SelfRatings::new(0, 9, 3, 5);
        assert_eq!(ratings.python, 1);
        assert_eq!(ratings.sql, 5);
        assert_eq!(ratings.communication, 3);
        assert_eq!(ratings.confidence, 5);
    }

    #[test]
    fn profile_serializes_with_snake_case_labels() {
        let profile = PlayerProfile::new(
            ProfessionalTrack::AiEngineer,
            Background::CareerSwitcher,
            FinancialSituation::HighPressure,
            SelfRatings::default(),
        );
        let json = serde_json::to_value(profile).unwrap();
        assert_eq!(json["track"], "ai_engineer");
        assert_eq!(json["background"], "career_switcher");
        assert_eq!(json["financial_situation"], "high_pressure");
        let restored: PlayerProfile = serde_json::from_value(json).unwrap();
        assert_eq!(restored, profile);
    }
}
