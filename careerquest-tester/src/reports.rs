use anyhow::Result;
use careerquest_game::{EndingType, ProfessionalTrack};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

use crate::simulation::RunRecord;

const NO_ENDING: &str = "unfinished";

/// Aggregated results for one track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub runs: usize,
    pub endings: BTreeMap<String, usize>,
    pub mean_days: f64,
    pub mean_applications: f64,
    pub mean_interviews: f64,
    pub mean_rejections: f64,
    pub offer_rate: f64,
    pub referral_rate: f64,
    pub mean_best_offer: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub total_runs: usize,
    pub failed_runs: usize,
    pub tracks: BTreeMap<ProfessionalTrack, TrackSummary>,
    pub runs: Vec<RunRecord>,
    pub duration_ms: u128,
}

impl BatchReport {
    #[must_use]
    pub fn new(runs: Vec<RunRecord>, duration: Duration) -> Self {
        let mut grouped: BTreeMap<ProfessionalTrack, Vec<&RunRecord>> = BTreeMap::new();
        for run in &runs {
            grouped.entry(run.track).or_default().push(run);
        }
        let tracks = grouped
            .into_iter()
            .map(|(track, runs)| (track, summarize(&runs)))
            .collect();
        Self {
            total_runs: runs.len(),
            failed_runs: runs.iter().filter(|run| !run.passed()).count(),
            tracks,
            runs,
            duration_ms: duration.as_millis(),
        }
    }

    #[must_use]
    pub const fn passed(&self) -> bool {
        self.failed_runs == 0
    }
}

fn ending_label(ending: Option<EndingType>) -> String {
    ending.map_or_else(|| NO_ENDING.to_string(), |e| e.as_str().to_string())
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

#[allow(clippy::cast_precision_loss)]
fn summarize(runs: &[&RunRecord]) -> TrackSummary {
    let count = runs.len();
    let mut endings = BTreeMap::new();
    for run in runs {
        *endings.entry(ending_label(run.ending)).or_insert(0) += 1;
    }
    let offers: Vec<f64> = runs.iter().filter_map(|run| run.best_offer).collect();
    TrackSummary {
        runs: count,
        endings,
        mean_days: mean(runs.iter().map(|run| f64::from(run.days)), count),
        mean_applications: mean(runs.iter().map(|run| f64::from(run.applications)), count),
        mean_interviews: mean(runs.iter().map(|run| f64::from(run.interviews)), count),
        mean_rejections: mean(runs.iter().map(|run| f64::from(run.rejections)), count),
        offer_rate: mean(
            runs.iter().map(|run| if run.offers > 0 { 1.0 } else { 0.0 }),
            count,
        ),
        referral_rate: mean(
            runs.iter()
                .map(|run| if run.referral_eligible { 1.0 } else { 0.0 }),
            count,
        ),
        mean_best_offer: (!offers.is_empty())
            .then(|| offers.iter().sum::<f64>() / offers.len() as f64),
    }
}

pub fn write_console_report(out: &mut dyn Write, report: &BatchReport) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Career Quest Batch Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "=============================".cyan())?;
    writeln!(out, "Total runs: {}", report.total_runs)?;
    writeln!(
        out,
        "Clean: {}",
        (report.total_runs - report.failed_runs).to_string().green()
    )?;
    writeln!(out, "With violations: {}", report.failed_runs.to_string().red())?;
    writeln!(out, "Total time: {}ms", report.duration_ms)?;
    writeln!(out)?;

    for (track, summary) in &report.tracks {
        writeln!(out, "{}", track.as_str().bold())?;
        writeln!(
            out,
            "   Runs: {}  Mean days: {:.1}  Offer rate: {:.1}%  Referral rate: {:.1}%",
            summary.runs,
            summary.mean_days,
            summary.offer_rate * 100.0,
            summary.referral_rate * 100.0
        )?;
        writeln!(
            out,
            "   Funnel: {:.1} applications, {:.1} interviews, {:.1} rejections",
            summary.mean_applications, summary.mean_interviews, summary.mean_rejections
        )?;
        if let Some(salary) = summary.mean_best_offer {
            writeln!(out, "   Mean best offer: ${salary:.0}")?;
        }
        for (ending, count) in &summary.endings {
            let label = match ending.as_str() {
                "offer_accepted" | "referral_fast_track" => ending.green(),
                NO_ENDING => ending.yellow(),
                _ => ending.red(),
            };
            writeln!(out, "     • {label}: {count}")?;
        }
        writeln!(out)?;
    }

    for run in report.runs.iter().filter(|run| !run.passed()) {
        writeln!(
            out,
            "{} {} seed {} ({})",
            "❌ FAIL".red(),
            run.track,
            run.seed,
            run.replay_code
        )?;
        for violation in &run.violations {
            writeln!(out, "     • {}", violation.red())?;
        }
    }
    Ok(())
}

pub fn write_json_report(out: &mut dyn Write, report: &BatchReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_markdown_report(out: &mut dyn Write, report: &BatchReport) -> Result<()> {
    writeln!(out, "# Career Quest Batch Results\n")?;
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total runs**: {}", report.total_runs)?;
    writeln!(out, "- **With violations**: {}", report.failed_runs)?;
    writeln!(out, "- **Total time**: {}ms\n", report.duration_ms)?;

    writeln!(out, "## Tracks\n")?;
    writeln!(
        out,
        "| Track | Runs | Mean days | Offer rate | Referral rate | Endings |"
    )?;
    writeln!(out, "|---|---|---|---|---|---|")?;
    for (track, summary) in &report.tracks {
        let endings = summary
            .endings
            .iter()
            .map(|(ending, count)| format!("{ending} {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            out,
            "| {track} | {} | {:.1} | {:.1}% | {:.1}% | {endings} |",
            summary.runs,
            summary.mean_days,
            summary.offer_rate * 100.0,
            summary.referral_rate * 100.0
        )?;
    }

    let failures: Vec<&RunRecord> = report.runs.iter().filter(|run| !run.passed()).collect();
    if !failures.is_empty() {
        writeln!(out, "\n## Violations\n")?;
        for run in failures {
            writeln!(out, "### {} seed {} ({})\n", run.track, run.seed, run.replay_code)?;
            for violation in &run.violations {
                writeln!(out, "- {violation}")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn write_csv_report(out: &mut dyn Write, report: &BatchReport) -> Result<()> {
    writeln!(
        out,
        "seed,replay_code,track,background,financial_situation,strategy,ending,days,final_state,applications,interviews,rejections,offers,best_offer,referral_eligible,final_stress,final_savings,violations"
    )?;
    for run in &report.runs {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{:.2},{:.2},{}",
            run.seed,
            run.replay_code,
            run.track,
            run.background,
            run.financial_situation,
            run.strategy,
            ending_label(run.ending),
            run.days,
            run.final_state,
            run.applications,
            run.interviews,
            run.rejections,
            run.offers,
            run.best_offer.map_or_else(String::new, |salary| format!("{salary:.0}")),
            run.referral_eligible,
            run.final_stress,
            run.final_savings,
            run.violations.len()
        )?;
    }
    Ok(())
}
