use crate::club::{Club, ClubId, Player, PlayerId, PlayerPositionType};
use crate::r#match::{GoalDetail, MatchEvent, MatchResult, MatchStatisticType, Score};
use crate::settings::MatchSettings;
use crate::utils::{IntegerUtils, RandomUtils};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Poisson};

const FULL_TIME_MINUTE: u8 = 90;
const TIEBREAK_MINUTE: u8 = 120;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// A level score is broken by a coin flip worth one goal.
    pub knockout: bool,
    /// Record a minute-by-minute event log.
    pub narrative: bool,
}

impl MatchOptions {
    pub fn league() -> Self {
        MatchOptions::default()
    }

    pub fn knockout() -> Self {
        MatchOptions {
            knockout: true,
            narrative: false,
        }
    }

    pub fn with_narrative(mut self) -> Self {
        self.narrative = true;
        self
    }
}

/// Rating-driven Poisson scoreline model. Holds no state besides its settings,
/// so one engine is shared by every fixture of a week.
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    settings: MatchSettings,
}

impl MatchEngine {
    pub fn new(settings: MatchSettings) -> Self {
        MatchEngine { settings }
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// Home rating edge after home advantage and the coaching matchup.
    pub fn rating_difference(&self, home: &Club, away: &Club) -> f64 {
        let mut diff = home.rating as f64 + self.settings.home_advantage - away.rating as f64;

        if let (Some(home_coach), Some(away_coach)) = (&home.coach, &away.coach) {
            if home_coach.style.beats(away_coach.style) {
                diff += self.settings.style_bonus;
            } else if away_coach.style.beats(home_coach.style) {
                diff -= self.settings.style_bonus;
            }
        }

        diff
    }

    pub fn home_win_probability(&self, home: &Club, away: &Club) -> f64 {
        let diff = self.rating_difference(home, away);

        1.0 / (1.0 + 10f64.powf(-diff / self.settings.rating_scale))
    }

    /// Expected goals for (home, away).
    pub fn expected_goals(&self, home: &Club, away: &Club) -> (f64, f64) {
        let p = self.home_win_probability(home, away);
        let base = self.settings.base_goals;
        let floor = self.settings.goal_floor;

        (base * (p + floor), base * ((1.0 - p) + floor))
    }

    pub fn play<R: Rng + ?Sized>(
        &self,
        home: &Club,
        away: &Club,
        options: MatchOptions,
        rng: &mut R,
    ) -> MatchResult {
        let (home_lambda, away_lambda) = self.expected_goals(home, away);

        let mut score = Score::new(sample_goals(home_lambda, rng), sample_goals(away_lambda, rng));

        let home_lineup = self.select_lineup(home, rng);
        let away_lineup = self.select_lineup(away, rng);

        let mut details = Vec::with_capacity((score.home + score.away) as usize * 2);
        self.attribute_goals(home.id, &home_lineup, score.home, &mut details, rng);
        self.attribute_goals(away.id, &away_lineup, score.away, &mut details, rng);
        details.sort_by_key(|d| d.minute);

        let mut decided_by_tiebreak = false;

        if options.knockout && score.is_draw() {
            decided_by_tiebreak = true;

            if RandomUtils::coin_flip(rng) {
                score.home += 1;
            } else {
                score.away += 1;
            }
        }

        let events = options.narrative.then(|| {
            narrate(home, away, &home_lineup, &away_lineup, &details, score, decided_by_tiebreak)
        });

        let appearances = home_lineup
            .iter()
            .chain(away_lineup.iter())
            .map(|p| p.id)
            .collect();

        MatchResult {
            home_club_id: home.id,
            away_club_id: away.id,
            score,
            details,
            appearances,
            events,
            decided_by_tiebreak,
        }
    }

    /// Samples a 4-4-2 from the roster, topping up from any position when a unit is short.
    fn select_lineup<'c, R: Rng + ?Sized>(&self, club: &'c Club, rng: &mut R) -> Vec<&'c Player> {
        let size = self.settings.lineup_size;
        let mut lineup: Vec<&Player> = Vec::with_capacity(size);

        for position in PlayerPositionType::ALL {
            let candidates: Vec<&Player> = club.players_at(position).collect();
            lineup.extend(candidates.choose_multiple(rng, position.starters()).copied());
        }

        if lineup.len() < size {
            let bench: Vec<&Player> = club
                .players
                .iter()
                .filter(|p| !lineup.iter().any(|l| l.id == p.id))
                .collect();

            let missing = size - lineup.len();
            lineup.extend(bench.choose_multiple(rng, missing).copied());
        }

        lineup.truncate(size);
        lineup
    }

    fn attribute_goals<R: Rng + ?Sized>(
        &self,
        club_id: ClubId,
        lineup: &[&Player],
        goals: u8,
        details: &mut Vec<GoalDetail>,
        rng: &mut R,
    ) {
        if lineup.is_empty() {
            return;
        }

        for _ in 0..goals {
            let minute = IntegerUtils::random(rng, 1, FULL_TIME_MINUTE as i32) as u8;

            let Ok(scorer) = lineup.choose_weighted(rng, |p| p.position.scoring_weight()) else {
                continue;
            };

            details.push(GoalDetail {
                club_id,
                player_id: scorer.id,
                stat_type: MatchStatisticType::Goal,
                minute,
            });

            if !RandomUtils::chance(rng, self.settings.assist_chance) {
                continue;
            }

            let teammates: Vec<&Player> = lineup.iter().copied().filter(|p| p.id != scorer.id).collect();

            if let Ok(assist) = teammates.choose_weighted(rng, |p| p.position.assist_weight()) {
                details.push(GoalDetail {
                    club_id,
                    player_id: assist.id,
                    stat_type: MatchStatisticType::Assist,
                    minute,
                });
            }
        }
    }
}

fn sample_goals<R: Rng + ?Sized>(lambda: f64, rng: &mut R) -> u8 {
    match Poisson::new(lambda) {
        Ok(poisson) => {
            let goals: f64 = poisson.sample(rng);
            goals.min(u8::MAX as f64) as u8
        }
        Err(_) => 0,
    }
}

fn narrate(
    home: &Club,
    away: &Club,
    home_lineup: &[&Player],
    away_lineup: &[&Player],
    details: &[GoalDetail],
    score: Score,
    decided_by_tiebreak: bool,
) -> Vec<MatchEvent> {
    let name_of = |id: PlayerId| {
        home_lineup
            .iter()
            .chain(away_lineup.iter())
            .find(|p| p.id == id)
            .map(|p| p.full_name.short())
            .unwrap_or_default()
    };

    let mut events = vec![MatchEvent {
        minute: 0,
        club_id: None,
        description: format!("Kick-off: {} vs {}", home.name, away.name),
    }];

    for (idx, detail) in details.iter().enumerate() {
        if detail.stat_type != MatchStatisticType::Goal {
            continue;
        }

        let assist = details
            .get(idx + 1)
            .filter(|next| {
                next.stat_type == MatchStatisticType::Assist
                    && next.minute == detail.minute
                    && next.club_id == detail.club_id
            })
            .map(|next| format!(" (assist {})", name_of(next.player_id)))
            .unwrap_or_default();

        let club_name = if detail.club_id == home.id { &home.name } else { &away.name };

        events.push(MatchEvent {
            minute: detail.minute,
            club_id: Some(detail.club_id),
            description: format!("Goal for {}: {}{}", club_name, name_of(detail.player_id), assist),
        });
    }

    if decided_by_tiebreak {
        events.push(MatchEvent {
            minute: TIEBREAK_MINUTE,
            club_id: None,
            description: "Level after full time, decided on penalties".to_string(),
        });
    }

    events.push(MatchEvent {
        minute: if decided_by_tiebreak { TIEBREAK_MINUTE } else { FULL_TIME_MINUTE },
        club_id: None,
        description: format!("Full time: {} {} {}", home.name, score, away.name),
    });

    events
}
