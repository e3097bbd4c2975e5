use crate::club::{Club, ClubCollection, ClubId, Player, PlayerGenerator, PlayerIdSequence, Tier};
use crate::competitions::{
    CollegeLeagueCup, NationalCup, RegionalFinals, SeededPlayoff, TournamentKind, TournamentResult,
};
use crate::error::LeagueError;
use crate::league::{
    Calendar, Competition, FixtureId, LeagueStructure, LeagueTable, PlayoffBracket, PlayoffRound, ScheduleGenerator,
    WeekLayout,
};
use crate::r#match::{MatchEngine, MatchOptions, MatchResult};
use crate::season::{PlayedFixture, SeasonEndReport, SeasonState, WeekResult, YearEnd};
use crate::settings::SimulationSettings;
use crate::transfers::{Draft, DraftReport, TransferWindow, TransferWindowReport};
use crate::utils::{RandomUtils, TimeEstimation};
use log::{debug, info, warn};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Everything the simulation mutates, passed explicitly to every operation.
#[derive(Debug, Clone)]
pub struct SimulatorData {
    pub season: SeasonState,
    pub clubs: ClubCollection,
    pub calendar: Calendar,
    pub playoffs: Option<PlayoffBracket>,
    pub free_agents: Vec<Player>,
    pub player_ids: PlayerIdSequence,
    pub settings: SimulationSettings,
}

impl SimulatorData {
    pub fn new(clubs: Vec<Club>, settings: SimulationSettings) -> Self {
        let clubs = ClubCollection::new(clubs);
        let player_ids = PlayerIdSequence::starting_after(clubs.max_player_id());

        SimulatorData {
            season: SeasonState::new(settings.start_year),
            clubs,
            calendar: Calendar::new(),
            playoffs: None,
            free_agents: Vec::new(),
            player_ids,
            settings,
        }
    }

    pub fn year(&self) -> i32 {
        self.season.year
    }

    pub fn week(&self) -> u8 {
        self.season.week
    }

    pub fn club(&self, id: ClubId) -> Option<&Club> {
        self.clubs.get(id)
    }

    pub fn club_mut(&mut self, id: ClubId) -> Option<&mut Club> {
        self.clubs.get_mut(id)
    }

    /// Top-tier standings snapshot.
    pub fn table(&self) -> LeagueTable {
        LeagueTable::from_clubs(self.clubs.by_tier(Tier::Top))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FixturePlay {
    Played(MatchResult),
    AlreadyPlayed,
    NotFound,
}

pub struct LeagueSimulator {
    engine: MatchEngine,
    generator: PlayerGenerator,
    rng: ChaCha8Rng,
}

impl LeagueSimulator {
    pub fn new(settings: &SimulationSettings) -> Self {
        Self::with_rng(settings, RandomUtils::seeded(settings.seed))
    }

    pub fn with_rng(settings: &SimulationSettings, rng: ChaCha8Rng) -> Self {
        LeagueSimulator {
            engine: MatchEngine::new(settings.matches.clone()),
            generator: PlayerGenerator::default(),
            rng,
        }
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn generator(&self) -> &PlayerGenerator {
        &self.generator
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Builds the regular-season calendar for the current year. Nothing is
    /// touched when the league shape or the playoff format is invalid.
    pub fn start_season(&mut self, data: &mut SimulatorData) -> Result<(), LeagueError> {
        let year = data.season.year;
        let format = &data.settings.playoffs;
        let first_week = data.settings.schedule.first_week;

        format.validate(first_week)?;

        let structure = LeagueStructure::from_clubs(data.clubs.by_tier(Tier::Top))?;
        let pairings = ScheduleGenerator::generate(&structure, year, &mut self.rng);

        debug_assert_eq!(ScheduleGenerator::verify(&structure, &pairings), Ok(()));

        let placed = WeekLayout::place(&pairings, first_week, format.last_regular_week(), &data.clubs, &mut self.rng)?;

        let mut calendar = Calendar::new();
        WeekLayout::fill_calendar(&mut calendar, &placed);

        info!("season {}: {} fixtures scheduled", year, calendar.len());

        data.calendar = calendar;
        data.playoffs = None;

        Ok(())
    }

    /// Fires the week's triggers, plays its fixtures and moves the clock on.
    /// After week 52 the year is closed and the next season's calendar built.
    pub fn advance_week(&mut self, data: &mut SimulatorData) -> Result<WeekResult, LeagueError> {
        let year = data.season.year;
        let week = data.season.week;

        self.fire_triggers(data);

        let mut result = WeekResult::new(year, week);

        let view: &SimulatorData = data;
        let (fixtures, elapsed) = TimeEstimation::estimate(|| self.simulate_week(view, week));

        for fixture in &fixtures {
            fixture.process(data);
        }

        if !fixtures.is_empty() {
            debug!("week {} of {}: {} matches in {}ms", week, year, fixtures.len(), elapsed);
        }

        result.fixtures = fixtures;

        if week == data.settings.playoffs.championship_week {
            self.close_playoffs(data);
        }

        if data.season.is_last_week() {
            result.season_end = Some(YearEnd::process(data, &self.generator, &mut self.rng));
        }

        if data.season.advance_week() {
            self.start_season(data)?;
        }

        Ok(result)
    }

    /// Plays out the rest of the year, including the rollover.
    pub fn advance_season(&mut self, data: &mut SimulatorData) -> Result<SeasonEndReport, LeagueError> {
        loop {
            if let Some(report) = self.advance_week(data)?.season_end {
                return Ok(report);
            }
        }
    }

    /// Plays one fixture on demand. Playing it again is a no-op.
    pub fn play_fixture(&mut self, data: &mut SimulatorData, id: FixtureId) -> FixturePlay {
        let Some(fixture) = data.calendar.get(id) else {
            return FixturePlay::NotFound;
        };

        if fixture.is_played() {
            return FixturePlay::AlreadyPlayed;
        }

        let (Some(home), Some(away)) = (data.clubs.get(fixture.home), data.clubs.get(fixture.away)) else {
            return FixturePlay::NotFound;
        };

        let options = Self::options_for(fixture.competition);
        let result = self.engine.play(home, away, options, &mut self.rng);

        let played = PlayedFixture {
            fixture_id: id,
            week: fixture.week,
            competition: fixture.competition,
            result,
        };

        played.process(data);

        FixturePlay::Played(played.result)
    }

    /// Runs a whole tournament now. Its ties go on the calendar at the current week.
    pub fn run_tournament(
        &mut self,
        data: &mut SimulatorData,
        kind: TournamentKind,
    ) -> Result<TournamentResult, LeagueError> {
        let result = match kind {
            TournamentKind::NationalCup => {
                NationalCup::new(&data.settings.cup).play(&self.engine, &data.clubs, &mut self.rng)
            }
            TournamentKind::RegionalFinals => {
                RegionalFinals::play(&self.engine, &data.clubs, data.season.year, &mut self.rng)
            }
            TournamentKind::CollegePlayoff => SeededPlayoff::play(&self.engine, &data.clubs, &mut self.rng),
            TournamentKind::CollegeLeagueCup => {
                CollegeLeagueCup::new(data.settings.cup.pool_policy).play(&self.engine, &data.clubs, &mut self.rng)
            }
        }?;

        let week = data.season.week;
        for tie in &result.ties {
            data.calendar.add_played(week, tie.competition, &tie.result);
            tie.result.apply(&mut data.clubs);
        }

        if !result.dropped.is_empty() {
            warn!("{}: {} clubs dropped without playing", kind.name(), result.dropped.len());
        }

        let champion = result.champion.map(|id| data.clubs.name(id).to_string());
        let summary = &mut data.season.current;

        match kind {
            TournamentKind::NationalCup => summary.cup_champion = champion,
            TournamentKind::RegionalFinals => summary.bowls_played += result.ties.len(),
            TournamentKind::CollegePlayoff => summary.college_playoff_champion = champion,
            TournamentKind::CollegeLeagueCup => summary.league_cup_champion = champion,
        }

        Ok(result)
    }

    pub fn open_transfer_window(&mut self, data: &mut SimulatorData) -> TransferWindowReport {
        let report = TransferWindow::new(&data.settings.economy, &data.settings.transfers).open(
            &mut data.clubs,
            &mut data.free_agents,
            data.season.year,
            &mut self.rng,
        );

        data.season.current.transfers += report.transfers.len();

        report
    }

    pub fn run_draft(&mut self, data: &mut SimulatorData) -> DraftReport {
        let report =
            Draft::new(&data.settings.economy, &data.settings.transfers).run(&mut data.clubs, data.season.year);

        data.season.current.transfers += report.picks.len();

        report
    }

    fn options_for(competition: Competition) -> MatchOptions {
        let options = if competition.is_knockout() {
            MatchOptions::knockout()
        } else {
            MatchOptions::league()
        };

        if crate::is_match_events_mode() {
            options.with_narrative()
        } else {
            options
        }
    }

    /// Schedules the playoff round that starts this week.
    fn fire_triggers(&mut self, data: &mut SimulatorData) {
        let week = data.season.week;
        let format = data.settings.playoffs.clone();

        let Some(round) = format.round_at(week) else {
            return;
        };

        if round == PlayoffRound::WildCard {
            let bracket = PlayoffBracket::seed(&data.table(), &format);
            info!("playoffs {}: {} conferences seeded", data.season.year, bracket.seeds.len());
            data.playoffs = Some(bracket);
        }

        let Some(bracket) = data.playoffs.as_ref() else {
            warn!("{} week reached without a playoff bracket", round);
            return;
        };

        let ties = match round {
            PlayoffRound::Championship => bracket.championship_tie(&data.table()).into_iter().collect(),
            _ => bracket.conference_ties(round, &format),
        };

        for tie in ties {
            data.calendar.schedule(week, tie.home, tie.away, Competition::Playoff(round));
        }
    }

    /// Simulates every unplayed fixture of the week in parallel. Each fixture
    /// gets its own stream seeded in calendar order from the master RNG.
    fn simulate_week(&mut self, data: &SimulatorData, week: u8) -> Vec<PlayedFixture> {
        let jobs: Vec<(FixtureId, u64)> = data
            .calendar
            .unplayed_in_week(week)
            .into_iter()
            .map(|id| (id, self.rng.next_u64()))
            .collect();

        let engine = &self.engine;

        jobs.into_par_iter()
            .filter_map(|(id, seed)| {
                let fixture = data.calendar.get(id)?;
                let home = data.clubs.get(fixture.home)?;
                let away = data.clubs.get(fixture.away)?;

                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let result = engine.play(home, away, Self::options_for(fixture.competition), &mut rng);

                Some(PlayedFixture {
                    fixture_id: id,
                    week,
                    competition: fixture.competition,
                    result,
                })
            })
            .collect()
    }

    fn close_playoffs(&self, data: &mut SimulatorData) {
        let Some(champion) = data.playoffs.as_ref().and_then(|p| p.champion) else {
            return;
        };

        let name = data.clubs.name(champion).to_string();
        info!("{} champion {}: {}", Tier::Top.name(), data.season.year, name);

        data.season.current.champion = Some(name);
    }
}
