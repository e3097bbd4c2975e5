use crate::StorageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unifut_core::league::PlayoffBracket;
use unifut_core::shared::FullName;
use unifut_core::{
    Calendar, Club, ClubFinances, ClubId, ClubRecord, Coach, Fixture, Player, PlayerClubContract, PlayerId, PlayerIdSequence,
    PlayerPositionType, PlayerStatistics, SeasonSummary, SimulationSettings, SimulatorData, Tier,
};

pub const SAVE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveEntity {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub year: i32,
    pub week: u8,
    #[serde(default)]
    pub current: SeasonSummary,
    #[serde(default)]
    pub history: Vec<SeasonSummary>,
    #[serde(default)]
    pub settings: SimulationSettings,
    #[serde(default)]
    pub free_agents: Vec<PlayerEntity>,
    pub clubs: Vec<ClubEntity>,
    /// Fixtures of the saved year with their scores. Empty in saves that
    /// predate it; such a season is scheduled again on load.
    #[serde(default)]
    pub calendar: Vec<Fixture>,
    #[serde(default)]
    pub playoffs: Option<PlayoffBracket>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubEntity {
    pub id: ClubId,
    pub name: String,
    pub tier: Tier,
    pub conference: String,
    #[serde(default)]
    pub division: String,
    pub rating: u8,
    #[serde(default)]
    pub record: ClubRecord,
    pub cash: i64,
    #[serde(default)]
    pub season_revenue: i64,
    #[serde(default)]
    pub season_expenses: i64,
    pub salary_cap: i64,
    /// Written for readers of the file; recomputed from the roster on load.
    #[serde(default)]
    pub wage_bill: i64,
    pub coach: Option<Coach>,
    pub players: Vec<PlayerEntity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerEntity {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub position: PlayerPositionType,
    pub age: u8,
    pub ability: u8,
    pub potential: u8,
    pub contract: Option<PlayerClubContract>,
    #[serde(default)]
    pub statistics: PlayerStatistics,
    #[serde(default)]
    pub last_evolution: i8,
    #[serde(default)]
    pub years_at_club: u8,
}

impl SaveEntity {
    pub fn from_data(data: &SimulatorData) -> Self {
        SaveEntity {
            version: SAVE_FORMAT_VERSION,
            saved_at: Utc::now(),
            year: data.season.year,
            week: data.season.week,
            current: data.season.current.clone(),
            history: data.season.history.clone(),
            settings: data.settings.clone(),
            free_agents: data.free_agents.iter().map(PlayerEntity::from).collect(),
            clubs: data.clubs.iter().map(ClubEntity::from).collect(),
            calendar: data.calendar.fixtures().to_vec(),
            playoffs: data.playoffs.clone(),
        }
    }

    /// Rebuilds the league, its calendar and the playoff bracket.
    pub fn into_data(self) -> Result<SimulatorData, StorageError> {
        let calendar = Calendar::from_fixtures(self.calendar)
            .ok_or_else(|| StorageError::Entity("calendar fixtures are out of order".to_string()))?;

        let clubs = self
            .clubs
            .into_iter()
            .map(ClubEntity::into_club)
            .collect::<Result<Vec<_>, _>>()?;

        let free_agents = self
            .free_agents
            .into_iter()
            .map(|p| p.into_player(None))
            .collect::<Result<Vec<_>, _>>()?;

        let mut data = SimulatorData::new(clubs, self.settings);

        data.season.year = self.year;
        data.season.week = self.week;
        data.season.current = self.current;
        data.season.history = self.history;

        // free agents can hold the highest id in the league
        let max_id = data.clubs.max_player_id().max(free_agents.iter().map(|p| p.id).max());
        data.player_ids = PlayerIdSequence::starting_after(max_id);
        data.free_agents = free_agents;

        data.calendar = calendar;
        data.playoffs = self.playoffs;

        Ok(data)
    }
}

impl From<&Club> for ClubEntity {
    fn from(club: &Club) -> Self {
        ClubEntity {
            id: club.id,
            name: club.name.clone(),
            tier: club.tier,
            conference: club.conference.clone(),
            division: club.division.clone(),
            rating: club.rating,
            record: club.record,
            cash: club.finance.cash(),
            season_revenue: club.finance.balance.income,
            season_expenses: club.finance.balance.outcome,
            salary_cap: club.finance.salary_cap,
            wage_bill: club.finance.wage_bill,
            coach: club.coach.clone(),
            players: club.players.iter().map(PlayerEntity::from).collect(),
        }
    }
}

impl ClubEntity {
    fn into_club(self) -> Result<Club, StorageError> {
        let mut finance = ClubFinances::new(self.cash, self.salary_cap);
        finance.balance.income = self.season_revenue;
        finance.balance.outcome = self.season_expenses;

        let mut club = Club::new(
            self.id,
            self.name,
            self.tier,
            self.conference,
            self.division,
            self.rating,
            finance,
        );

        club.record = self.record;
        club.coach = self.coach;
        club.players = self
            .players
            .into_iter()
            .map(|p| p.into_player(Some(self.id)))
            .collect::<Result<Vec<_>, _>>()?;

        club.refresh_wage_bill();

        Ok(club)
    }
}

impl From<&Player> for PlayerEntity {
    fn from(player: &Player) -> Self {
        PlayerEntity {
            id: player.id,
            first_name: player.full_name.first_name.clone(),
            last_name: player.full_name.last_name.clone(),
            position: player.position,
            age: player.age,
            ability: player.ability,
            potential: player.potential,
            contract: player.contract,
            statistics: player.statistics,
            last_evolution: player.last_evolution,
            years_at_club: player.years_at_club,
        }
    }
}

impl PlayerEntity {
    fn into_player(self, club_id: Option<ClubId>) -> Result<Player, StorageError> {
        let id = self.id;

        let mut builder = Player::builder()
            .id(self.id)
            .full_name(FullName::new(self.first_name, self.last_name))
            .position(self.position)
            .age(self.age)
            .ability(self.ability)
            .potential(self.potential)
            .contract(self.contract)
            .statistics(self.statistics)
            .last_evolution(self.last_evolution)
            .years_at_club(self.years_at_club);

        if let Some(club_id) = club_id {
            builder = builder.club_id(club_id);
        }

        builder
            .build()
            .map_err(|reason| StorageError::Entity(format!("player {}: {}", id, reason)))
    }
}
