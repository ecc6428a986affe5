mod policy;
mod reports;
mod seeds;
mod simulation;
mod util;

use anyhow::{Context, Result, bail};
use careerquest_game::{
    Background, BundledData, DataLoader, FinancialSituation, ProfessionalTrack, ReferralPolicy,
    SIMULATION_CONFIG_NAME, ScenarioCatalog, SimulationConfig,
};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use policy::ChoiceStrategy;
use reports::{
    BatchReport, write_console_report, write_csv_report, write_json_report, write_markdown_report,
};
use seeds::{SeedInfo, resolve_seed_inputs};
use simulation::{RunPlan, RunRecord, profile_grid, run_career};
use util::{OutputTarget, split_csv};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "careerquest-tester", version)]
#[command(about = "Headless batch runner for the Career Quest simulation core")]
struct Args {
    /// Seeds to run: numbers, ranges like `1..50`, or replay codes like `AN-OFFER42`
    #[arg(long, default_value = "1..21")]
    seeds: String,

    /// Tracks to run (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    tracks: String,

    /// Backgrounds to run (comma-separated, or `all`)
    #[arg(long, default_value = "bootcamp")]
    backgrounds: String,

    /// Financial situations to run (comma-separated, or `all`)
    #[arg(long, default_value = "moderate")]
    finances: String,

    /// Strategy the scripted player uses to answer scenarios
    #[arg(long, value_enum, default_value_t = ChoiceStrategy::Balanced)]
    strategy: ChoiceStrategy,

    /// Stop a run after this many days even if no ending triggered
    #[arg(long, default_value_t = 730)]
    days: u32,

    /// Read a scenario every N days
    #[arg(long, default_value_t = 3)]
    scenario_every: u32,

    /// Make an extra interview attempt every N days (0 disables)
    #[arg(long, default_value_t = 7)]
    interview_every: u32,

    /// Treat the referral fast track as a terminal ending
    #[arg(long)]
    referral_ends_run: bool,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let seed_infos = resolve_seed_inputs(&split_csv(&args.seeds))?;
    let tracks = parse_list(&args.tracks, &ProfessionalTrack::ALL, "track")?;
    let backgrounds = parse_list(&args.backgrounds, &Background::ALL, "background")?;
    let finances = parse_list(&args.finances, &FinancialSituation::ALL, "financial situation")?;

    let loader = BundledData;
    let catalog = Arc::new(
        loader
            .load_scenario_catalog()
            .context("loading scenario catalog")?,
    );
    let cfg = load_config(&loader, args.referral_ends_run)?;

    let mut output = OutputTarget::new(args.output.clone())?;
    if args.report == ReportFormat::Console && output.is_terminal() {
        announce_banner(&catalog, &seed_infos);
    }

    let start_time = Instant::now();
    let records = run_batch(&args, &seed_infos, &tracks, &backgrounds, &finances, &cfg, &catalog);
    let report = BatchReport::new(records, start_time.elapsed());

    match args.report {
        ReportFormat::Console => write_console_report(&mut output, &report)?,
        ReportFormat::Json => write_json_report(&mut output, &report)?,
        ReportFormat::Markdown => write_markdown_report(&mut output, &report)?,
        ReportFormat::Csv => write_csv_report(&mut output, &report)?,
    }
    output.flush()?;

    if !report.passed() {
        bail!("{} of {} runs broke an invariant", report.failed_runs, report.total_runs);
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn announce_banner(catalog: &ScenarioCatalog, seeds: &[SeedInfo]) {
    println!("{}", "🎮 Career Quest Batch Tester".bright_cyan().bold());
    println!("{}", "============================".cyan());
    println!(
        "Catalog: {} scenarios (fingerprint {:#018x}), {} seed(s)",
        catalog.len(),
        catalog.fingerprint(),
        seeds.len()
    );
}

fn load_config(loader: &BundledData, referral_ends_run: bool) -> Result<SimulationConfig> {
    let mut cfg: SimulationConfig = loader
        .load_config(SIMULATION_CONFIG_NAME)
        .context("loading simulation config")?;
    if referral_ends_run {
        cfg.referral_policy = ReferralPolicy::EndRun;
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Parse a comma-separated list of snake_case labels; `all` selects every value.
fn parse_list<T>(raw: &str, all: &[T], kind: &str) -> Result<Vec<T>>
where
    T: Copy + std::str::FromStr,
{
    let tokens = split_csv(raw);
    if tokens.iter().any(|token| token.eq_ignore_ascii_case("all")) {
        return Ok(all.to_vec());
    }
    let parsed = tokens
        .iter()
        .map(|token| {
            token
                .parse::<T>()
                .map_err(|_| anyhow::anyhow!("unknown {kind} `{token}`"))
        })
        .collect::<Result<Vec<_>>>()?;
    if parsed.is_empty() {
        bail!("no {kind} selected");
    }
    Ok(parsed)
}

fn run_batch(
    args: &Args,
    seeds: &[SeedInfo],
    tracks: &[ProfessionalTrack],
    backgrounds: &[Background],
    finances: &[FinancialSituation],
    cfg: &SimulationConfig,
    catalog: &Arc<ScenarioCatalog>,
) -> Vec<RunRecord> {
    let mut records = Vec::new();
    for profile in profile_grid(tracks, backgrounds, finances) {
        for info in seeds.iter().filter(|info| info.matches_track(profile.track)) {
            let plan = RunPlan {
                profile,
                seed: info.seed,
                replay_code: info.replay_code_for_track(profile.track),
                strategy: args.strategy,
                max_days: args.days,
                scenario_every: args.scenario_every,
                interview_every: args.interview_every,
            };
            let record = run_career(&plan, cfg, catalog);
            if args.verbose {
                let status = if record.passed() { "✅" } else { "❌" };
                log::info!(
                    "{status} {} {} {} seed {} -> {} on day {}",
                    profile.track,
                    profile.background,
                    profile.financial_situation,
                    info.seed,
                    record
                        .ending
                        .map_or("unfinished", careerquest_game::EndingType::as_str),
                    record.days
                );
            }
            records.push(record);
        }
    }
    records
}
