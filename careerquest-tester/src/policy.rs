use std::fmt;

use careerquest_game::{GameScenario, ScenarioChoice, SeedStats, StatKey};
use clap::ValueEnum;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Decision returned by a [`PlayerPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDecision {
    pub choice_id: String,
    pub rationale: Option<String>,
}

/// Scripted player used to answer scenarios during batch runs.
pub trait PlayerPolicy {
    fn name(&self) -> &'static str;

    fn pick_choice(&mut self, stats: &SeedStats, scenario: &GameScenario) -> PolicyDecision;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum ChoiceStrategy {
    /// Keep stress and spending down
    Cautious,
    /// Chase skills and network, whatever it costs
    Ambitious,
    /// Weigh gains against stress and money
    Balanced,
    /// Uniform random choice (seeded per run)
    Random,
}

impl ChoiceStrategy {
    pub const ALL: [Self; 4] = [Self::Cautious, Self::Ambitious, Self::Balanced, Self::Random];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cautious => "cautious",
            Self::Ambitious => "ambitious",
            Self::Balanced => "balanced",
            Self::Random => "random",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn PlayerPolicy> {
        match self {
            Self::Cautious => Box::new(ScoredPolicy::new("cautious", cautious_score)),
            Self::Ambitious => Box::new(ScoredPolicy::new("ambitious", ambitious_score)),
            Self::Balanced => Box::new(ScoredPolicy::new("balanced", balanced_score)),
            Self::Random => Box::new(RandomPolicy {
                rng: ChaCha20Rng::seed_from_u64(seed),
            }),
        }
    }
}

impl fmt::Display for ChoiceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

type ScoreFn = fn(&SeedStats, &ScenarioChoice) -> f64;

/// Picks the highest-scoring choice; ties go to the earliest.
struct ScoredPolicy {
    name: &'static str,
    score: ScoreFn,
}

impl ScoredPolicy {
    const fn new(name: &'static str, score: ScoreFn) -> Self {
        Self { name, score }
    }
}

impl PlayerPolicy for ScoredPolicy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn pick_choice(&mut self, stats: &SeedStats, scenario: &GameScenario) -> PolicyDecision {
        let mut best: Option<(&ScenarioChoice, f64)> = None;
        for choice in &scenario.choices {
            let score = (self.score)(stats, choice);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((choice, score));
            }
        }
        match best {
            Some((choice, score)) => PolicyDecision {
                choice_id: choice.id.clone(),
                rationale: Some(format!("score {score:.1}")),
            },
            None => PolicyDecision {
                choice_id: String::new(),
                rationale: None,
            },
        }
    }
}

struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl PlayerPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn pick_choice(&mut self, _stats: &SeedStats, scenario: &GameScenario) -> PolicyDecision {
        let choice_id = if scenario.choices.is_empty() {
            String::new()
        } else {
            let idx = self.rng.gen_range(0..scenario.choices.len());
            scenario.choices[idx].id.clone()
        };
        PolicyDecision {
            choice_id,
            rationale: None,
        }
    }
}

fn delta(choice: &ScenarioChoice, key: StatKey) -> f64 {
    choice.effect.get(&key).copied().unwrap_or(0.0)
}

fn skill_gain(choice: &ScenarioChoice) -> f64 {
    [
        StatKey::InterviewSkill,
        StatKey::TechnicalDepth,
        StatKey::ResumeStrength,
        StatKey::PortfolioStrength,
        StatKey::Network,
        StatKey::Reputation,
        StatKey::Confidence,
    ]
    .into_iter()
    .map(|key| delta(choice, key))
    .sum()
}

fn cautious_score(_stats: &SeedStats, choice: &ScenarioChoice) -> f64 {
    -delta(choice, StatKey::Stress) + delta(choice, StatKey::Savings) / 100.0
        - delta(choice, StatKey::SpendingMonthly) / 50.0
}

fn ambitious_score(_stats: &SeedStats, choice: &ScenarioChoice) -> f64 {
    skill_gain(choice)
}

fn balanced_score(stats: &SeedStats, choice: &ScenarioChoice) -> f64 {
    // Stress hurts more as the player nears burnout.
    let stress_weight = 1.0 + stats.ratio(StatKey::Stress) * 2.0;
    let money_weight: f64 = if stats.savings < 5_000.0 { 0.05 } else { 0.01 };
    stress_weight.mul_add(
        -delta(choice, StatKey::Stress),
        money_weight.mul_add(delta(choice, StatKey::Savings), skill_gain(choice)),
    )
}
