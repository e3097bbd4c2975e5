use database::{CollegeDatabaseBuilder, CollegeLoader, DatabaseGenerator, LnfLoader, SettingsLoader, Storage};
use env_logger::Env;
use log::{info, warn};
use std::env;
use std::path::{Path, PathBuf};
use unifut_core::utils::{RandomUtils, TimeEstimation};
use unifut_core::{LeagueError, LeagueSimulator, SeasonSummary, SimulationSettings, SimulatorData, TournamentKind};

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const DEFAULT_TEAMS_DB: &str = "teams_db.json";

const CUP_WEEK: u8 = 20;
const COLLEGE_FINALS_WEEK: u8 = 46;
const DRAFT_WEEK: u8 = 48;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let teams_db = env::var("TEAMS_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_TEAMS_DB));

    let mut settings = match env::var("SETTINGS") {
        Ok(path) => SettingsLoader::load(Path::new(&path))?,
        Err(_) => SimulationSettings::default(),
    };

    if let Some(seed) = env::var("SEED").ok().and_then(|s| s.parse().ok()) {
        settings.seed = Some(seed);
    }

    if env::var("MODE") == Ok(String::from("BUILD_DB")) {
        CollegeDatabaseBuilder::write(&teams_db, &mut RandomUtils::seeded(settings.seed))?;
        return Ok(());
    }

    unifut_core::set_match_events_mode(env::var("MATCH_EVENTS").is_ok());

    let seasons: usize = env::var("SEASONS").ok().and_then(|s| s.parse().ok()).unwrap_or(1);
    let save_path = env::var("SAVE_PATH").ok().map(PathBuf::from);

    let mut simulator = LeagueSimulator::new(&settings);

    let mut data = match env::var("LOAD_PATH") {
        Ok(path) => Storage::load(Path::new(&path), &mut simulator)?,
        Err(_) => {
            let (mut data, estimated) = TimeEstimation::estimate(|| {
                let college = CollegeLoader::load(&teams_db);
                let mut rng = RandomUtils::seeded(settings.seed);

                DatabaseGenerator::generate(&LnfLoader::load(), &college, settings, simulator.generator(), &mut rng)
            });

            info!("database generated: {} ms", estimated);

            simulator.start_season(&mut data)?;
            data
        }
    };

    for _ in 0..seasons {
        let (summary, estimated) = TimeEstimation::estimate(|| run_season(&mut simulator, &mut data));
        let summary = summary?;

        info!("season {} simulated: {} ms", summary.year, estimated);
        log_summary(&summary);

        if let Some(path) = &save_path {
            Storage::save(&data, path)?;
        }
    }

    Ok(())
}

/// Week loop from the current week up to and including the rollover.
fn run_season(simulator: &mut LeagueSimulator, data: &mut SimulatorData) -> Result<SeasonSummary, LeagueError> {
    loop {
        match data.week() {
            1 => {
                let report = simulator.open_transfer_window(data);
                info!(
                    "transfer window {}: {} transfers, {} renewed, {} released, {} no deals",
                    data.year(),
                    report.transfers.len(),
                    report.renewed.len(),
                    report.released.len(),
                    report.no_deals.len()
                );
            }
            CUP_WEEK => run_tournament(simulator, data, TournamentKind::NationalCup)?,
            COLLEGE_FINALS_WEEK => {
                run_tournament(simulator, data, TournamentKind::RegionalFinals)?;
                run_tournament(simulator, data, TournamentKind::CollegePlayoff)?;
                run_tournament(simulator, data, TournamentKind::CollegeLeagueCup)?;
            }
            DRAFT_WEEK => {
                let report = simulator.run_draft(data);
                info!(
                    "draft {}: {} picks, {} skipped",
                    data.year(),
                    report.picks.len(),
                    report.no_deals.len()
                );
            }
            _ => {}
        }

        if let Some(end) = simulator.advance_week(data)?.season_end {
            return Ok(end.summary);
        }
    }
}

/// Too few entrants is not fatal: the tournament is skipped for the year.
fn run_tournament(
    simulator: &mut LeagueSimulator,
    data: &mut SimulatorData,
    kind: TournamentKind,
) -> Result<(), LeagueError> {
    match simulator.run_tournament(data, kind) {
        Ok(result) => {
            let champion = result.champion.map(|id| data.clubs.name(id).to_string());
            info!(
                "{} {}: {} ties, champion {}",
                kind.name(),
                data.year(),
                result.ties.len(),
                champion.as_deref().unwrap_or("-")
            );
            Ok(())
        }
        Err(err) if !err.is_configuration() => {
            warn!("{} {} skipped: {}", kind.name(), data.year(), err);
            Ok(())
        }
        Err(err) => Err(err),
    }
}

fn log_summary(summary: &SeasonSummary) {
    info!(
        "{}: champion {}",
        summary.year,
        summary.champion.as_deref().unwrap_or("-")
    );

    for (conference, leader) in &summary.conference_leaders {
        info!("{}: {} leader {}", summary.year, conference, leader);
    }

    info!(
        "{}: cup {}, college playoff {}, league cup {}, {} bowls",
        summary.year,
        summary.cup_champion.as_deref().unwrap_or("-"),
        summary.college_playoff_champion.as_deref().unwrap_or("-"),
        summary.league_cup_champion.as_deref().unwrap_or("-"),
        summary.bowls_played
    );

    info!(
        "{}: {} transfers, {} retirements",
        summary.year, summary.transfers, summary.retirements
    );
}
