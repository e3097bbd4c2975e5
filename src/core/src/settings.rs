use crate::club::Tier;
use crate::competitions::PoolPolicy;
use crate::league::PlayoffFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub start_year: i32,
    /// Master seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub matches: MatchSettings,
    pub schedule: ScheduleSettings,
    pub playoffs: PlayoffFormat,
    pub economy: EconomySettings,
    pub transfers: TransferSettings,
    pub cup: CupSettings,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            start_year: 2026,
            seed: None,
            matches: MatchSettings::default(),
            schedule: ScheduleSettings::default(),
            playoffs: PlayoffFormat::default(),
            economy: EconomySettings::default(),
            transfers: TransferSettings::default(),
            cup: CupSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    pub home_advantage: f64,
    /// Rating points that make a tenfold difference in the odds.
    pub rating_scale: f64,
    pub base_goals: f64,
    /// Added to each side's win probability so underdogs keep a positive goal mean.
    pub goal_floor: f64,
    pub style_bonus: f64,
    pub assist_chance: f64,
    pub lineup_size: usize,
}

impl Default for MatchSettings {
    fn default() -> Self {
        MatchSettings {
            home_advantage: 5.0,
            rating_scale: 40.0,
            base_goals: 2.5,
            goal_floor: 0.1,
            style_bonus: 3.0,
            assist_chance: 0.7,
            lineup_size: 11,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSettings {
    /// First regular-season week; the season runs up to the week before the wild card round.
    pub first_week: u8,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        ScheduleSettings { first_week: 1 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomySettings {
    pub revenue_pool: i64,
    pub top_salary_cap: i64,
    pub college1_salary_cap: i64,
    pub college2_salary_cap: i64,
    pub renewal_raise_pct: i64,
    pub renewal_ability_margin: u8,
    pub transfer_premium_pct: i64,
    pub transfer_budget_pct: i64,
    pub draft_compensation_pct: i64,
}

impl Default for EconomySettings {
    fn default() -> Self {
        EconomySettings {
            revenue_pool: 800_000_000,
            top_salary_cap: 60_000_000,
            college1_salary_cap: 15_000_000,
            college2_salary_cap: 8_000_000,
            renewal_raise_pct: 20,
            renewal_ability_margin: 5,
            transfer_premium_pct: 20,
            transfer_budget_pct: 30,
            draft_compensation_pct: 50,
        }
    }
}

impl EconomySettings {
    pub fn salary_cap(&self, tier: Tier) -> i64 {
        match tier {
            Tier::Top => self.top_salary_cap,
            Tier::College1 => self.college1_salary_cap,
            Tier::College2 => self.college2_salary_cap,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferSettings {
    pub scouting_sample: usize,
    pub min_squad_size: usize,
    pub draft_rounds: usize,
    pub draft_min_years: u8,
    pub draft_max_age: u8,
}

impl Default for TransferSettings {
    fn default() -> Self {
        TransferSettings {
            scouting_sample: 10,
            min_squad_size: 18,
            draft_rounds: 1,
            draft_min_years: 2,
            draft_max_age: 23,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CupSettings {
    pub pool_policy: PoolPolicy,
    pub lower_tier_survivors: usize,
    pub mid_tier_survivors: usize,
    pub seeded_clubs: usize,
}

impl Default for CupSettings {
    fn default() -> Self {
        CupSettings {
            pool_policy: PoolPolicy::PlayIn,
            lower_tier_survivors: 16,
            mid_tier_survivors: 8,
            seeded_clubs: 8,
        }
    }
}
