use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::numbers::{clamp_pct, round_f64_to_i64};
use crate::profile::UnknownVariant;

/// Trait vector driving every probability and selection formula.
///
/// Percentage fields live in `[0, 100]`. `savings` may go negative (that is
/// a loss condition, not an error) and the two counters never do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SeedStats {
    pub confidence: f64,
    pub stress: f64,
    pub energy: f64,
    pub reputation: f64,
    pub network: f64,
    pub linkedin_presence: f64,
    pub resume_strength: f64,
    pub portfolio_strength: f64,
    pub interview_skill: f64,
    pub technical_depth: f64,
    pub python_skill: f64,
    pub sql_skill: f64,
    pub communication: f64,
    pub scam_awareness: f64,
    pub savings: f64,
    pub spending_monthly: f64,
    #[serde(default)]
    pub months_unemployed: u32,
    #[serde(default)]
    pub applications_sent: u32,
}

/// Name of a single `SeedStats` field; the key type of choice effect maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    Confidence,
    Stress,
    Energy,
    Reputation,
    Network,
    LinkedinPresence,
    ResumeStrength,
    PortfolioStrength,
    InterviewSkill,
    TechnicalDepth,
    PythonSkill,
    SqlSkill,
    Communication,
    ScamAwareness,
    Savings,
    SpendingMonthly,
    MonthsUnemployed,
    ApplicationsSent,
}

impl StatKey {
    pub const ALL: [Self; 18] = [
        Self::Confidence,
        Self::Stress,
        Self::Energy,
        Self::Reputation,
        Self::Network,
        Self::LinkedinPresence,
        Self::ResumeStrength,
        Self::PortfolioStrength,
        Self::InterviewSkill,
        Self::TechnicalDepth,
        Self::PythonSkill,
        Self::SqlSkill,
        Self::Communication,
        Self::ScamAwareness,
        Self::Savings,
        Self::SpendingMonthly,
        Self::MonthsUnemployed,
        Self::ApplicationsSent,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confidence => "confidence",
            Self::Stress => "stress",
            Self::Energy => "energy",
            Self::Reputation => "reputation",
            Self::Network => "network",
            Self::LinkedinPresence => "linkedin_presence",
            Self::ResumeStrength => "resume_strength",
            Self::PortfolioStrength => "portfolio_strength",
            Self::InterviewSkill => "interview_skill",
            Self::TechnicalDepth => "technical_depth",
            Self::PythonSkill => "python_skill",
            Self::SqlSkill => "sql_skill",
            Self::Communication => "communication",
            Self::ScamAwareness => "scam_awareness",
            Self::Savings => "savings",
            Self::SpendingMonthly => "spending_monthly",
            Self::MonthsUnemployed => "months_unemployed",
            Self::ApplicationsSent => "applications_sent",
        }
    }

    /// Player-facing label used in notifications.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Confidence => "Confidence",
            Self::Stress => "Stress",
            Self::Energy => "Energy",
            Self::Reputation => "Reputation",
            Self::Network => "Network",
            Self::LinkedinPresence => "LinkedIn presence",
            Self::ResumeStrength => "Resume",
            Self::PortfolioStrength => "Portfolio",
            Self::InterviewSkill => "Interview skill",
            Self::TechnicalDepth => "Technical depth",
            Self::PythonSkill => "Python",
            Self::SqlSkill => "SQL",
            Self::Communication => "Communication",
            Self::ScamAwareness => "Scam awareness",
            Self::Savings => "Savings",
            Self::SpendingMonthly => "Monthly spending",
            Self::MonthsUnemployed => "Months unemployed",
            Self::ApplicationsSent => "Applications sent",
        }
    }

    /// Whether the field is a bounded `[0, 100]` percentage.
    #[must_use]
    pub const fn is_percentage(self) -> bool {
        !matches!(
            self,
            Self::Savings | Self::SpendingMonthly | Self::MonthsUnemployed | Self::ApplicationsSent
        )
    }

    #[must_use]
    pub const fn is_counter(self) -> bool {
        matches!(self, Self::MonthsUnemployed | Self::ApplicationsSent)
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatKey {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "stat",
                value: s.to_string(),
            })
    }
}

impl SeedStats {
    /// Read a field by key; counters are widened to f64.
    #[must_use]
    pub fn get(&self, key: StatKey) -> f64 {
        match key {
            StatKey::Confidence => self.confidence,
            StatKey::Stress => self.stress,
            StatKey::Energy => self.energy,
            StatKey::Reputation => self.reputation,
            StatKey::Network => self.network,
            StatKey::LinkedinPresence => self.linkedin_presence,
            StatKey::ResumeStrength => self.resume_strength,
            StatKey::PortfolioStrength => self.portfolio_strength,
            StatKey::InterviewSkill => self.interview_skill,
            StatKey::TechnicalDepth => self.technical_depth,
            StatKey::PythonSkill => self.python_skill,
            StatKey::SqlSkill => self.sql_skill,
            StatKey::Communication => self.communication,
            StatKey::ScamAwareness => self.scam_awareness,
            StatKey::Savings => self.savings,
            StatKey::SpendingMonthly => self.spending_monthly,
            StatKey::MonthsUnemployed => f64::from(self.months_unemployed),
            StatKey::ApplicationsSent => f64::from(self.applications_sent),
        }
    }

    /// Add `delta` to a field. Percentages clamp to `[0, 100]` and counters
    /// saturate at zero.
    pub fn apply_delta(&mut self, key: StatKey, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        match key {
            StatKey::MonthsUnemployed => {
                self.months_unemployed = offset_counter(self.months_unemployed, delta);
            }
            StatKey::ApplicationsSent => {
                self.applications_sent = offset_counter(self.applications_sent, delta);
            }
            StatKey::Savings => self.savings += delta,
            StatKey::SpendingMonthly => self.spending_monthly += delta,
            pct => {
                if let Some(slot) = self.pct_slot(pct) {
                    *slot = clamp_pct(*slot + delta);
                }
            }
        }
    }

    /// Re-clamp every percentage field.
    pub fn clamp(&mut self) {
        for key in StatKey::ALL {
            if let Some(slot) = self.pct_slot(key) {
                *slot = clamp_pct(*slot);
            }
        }
    }

    /// Normalized `[0, 1]` view of a percentage field.
    #[must_use]
    pub fn ratio(&self, key: StatKey) -> f64 {
        clamp_pct(self.get(key)) / 100.0
    }

    fn pct_slot(&mut self, key: StatKey) -> Option<&mut f64> {
        let slot = match key {
            StatKey::Confidence => &mut self.confidence,
            StatKey::Stress => &mut self.stress,
            StatKey::Energy => &mut self.energy,
            StatKey::Reputation => &mut self.reputation,
            StatKey::Network => &mut self.network,
            StatKey::LinkedinPresence => &mut self.linkedin_presence,
            StatKey::ResumeStrength => &mut self.resume_strength,
            StatKey::PortfolioStrength => &mut self.portfolio_strength,
            StatKey::InterviewSkill => &mut self.interview_skill,
            StatKey::TechnicalDepth => &mut self.technical_depth,
            StatKey::PythonSkill => &mut self.python_skill,
            StatKey::SqlSkill => &mut self.sql_skill,
            StatKey::Communication => &mut self.communication,
            StatKey::ScamAwareness => &mut self.scam_awareness,
            StatKey::Savings
            | StatKey::SpendingMonthly
            | StatKey::MonthsUnemployed
            | StatKey::ApplicationsSent => return None,
        };
        Some(slot)
    }
}

fn offset_counter(current: u32, delta: f64) -> u32 {
    let next = i64::from(current).saturating_add(round_f64_to_i64(delta));
    u32::try_from(next.max(0)).unwrap_or(u32::MAX)
}
