use crate::club::{Club, ClubId};
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeagueTableRow {
    pub club_id: ClubId,
    pub name: String,
    pub conference: String,
    pub division: String,
    pub played: u16,
    pub wins: u16,
    pub draws: u16,
    pub losses: u16,
    pub goals_for: u16,
    pub goals_against: u16,
    pub goal_diff: i32,
    pub points: u16,
}

impl LeagueTableRow {
    pub fn from_club(club: &Club) -> Self {
        let record = &club.record;

        LeagueTableRow {
            club_id: club.id,
            name: club.name.clone(),
            conference: club.conference.clone(),
            division: club.division.clone(),
            played: record.played(),
            wins: record.wins,
            draws: record.draws,
            losses: record.losses,
            goals_for: record.goals_for,
            goals_against: record.goals_against,
            goal_diff: record.goal_diff(),
            points: record.points(),
        }
    }

    /// Points, wins, goal difference, goals for; name keeps the order total.
    pub fn standings_cmp(&self, other: &Self) -> Ordering {
        other
            .points
            .cmp(&self.points)
            .then_with(|| other.wins.cmp(&self.wins))
            .then_with(|| other.goal_diff.cmp(&self.goal_diff))
            .then_with(|| other.goals_for.cmp(&self.goals_for))
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// Sorted standings snapshot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeagueTable {
    rows: Vec<LeagueTableRow>,
}

impl LeagueTable {
    pub fn from_clubs<'c>(clubs: impl Iterator<Item = &'c Club>) -> Self {
        let mut rows: Vec<LeagueTableRow> = clubs.map(LeagueTableRow::from_club).collect();
        rows.sort_by(|a, b| a.standings_cmp(b));

        LeagueTable { rows }
    }

    pub fn rows(&self) -> &[LeagueTableRow] {
        &self.rows
    }

    pub fn conference<'t>(&'t self, conference: &str) -> impl Iterator<Item = &'t LeagueTableRow> {
        self.rows.iter().filter(move |r| r.conference == conference)
    }

    pub fn conferences(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rows.iter().map(|r| r.conference.clone()).collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn leader(&self, conference: &str) -> Option<&LeagueTableRow> {
        self.rows.iter().find(|r| r.conference == conference)
    }

    pub fn row(&self, club_id: ClubId) -> Option<&LeagueTableRow> {
        self.rows.iter().find(|r| r.club_id == club_id)
    }

    /// 1-based league position.
    pub fn position(&self, club_id: ClubId) -> Option<usize> {
        self.rows.iter().position(|r| r.club_id == club_id).map(|idx| idx + 1)
    }

    /// True when `a` finished above `b`.
    pub fn ranks_above(&self, a: ClubId, b: ClubId) -> bool {
        match (self.position(a), self.position(b)) {
            (Some(pa), Some(pb)) => pa < pb,
            (Some(_), None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::{ClubFinances, Tier};

    fn club(id: u32, name: &str, conference: &str, results: &[(u8, u8)]) -> Club {
        let mut club = Club::new(
            ClubId(id),
            name.to_string(),
            Tier::Top,
            conference.to_string(),
            "Div".to_string(),
            80,
            ClubFinances::new(0, 0),
        );
        for (scored, conceded) in results {
            club.record.register(*scored, *conceded);
        }
        club
    }

    #[test]
    fn sorted_by_points_then_tiebreakers() {
        let clubs = vec![
            club(1, "Bahia", "Norte", &[(1, 0), (0, 1)]),
            club(2, "Ceará", "Norte", &[(3, 0), (0, 0)]),
            club(3, "Sport", "Norte", &[(2, 0), (0, 1)]),
            club(4, "Fortaleza", "Norte", &[(2, 0), (0, 1)]),
        ];

        let table = LeagueTable::from_clubs(clubs.iter());
        let order: Vec<_> = table.rows().iter().map(|r| r.name.as_str()).collect();

        // Fortaleza and Sport are level on everything, name decides
        assert_eq!(order, vec!["Ceará", "Fortaleza", "Sport", "Bahia"]);
        assert_eq!(table.position(ClubId(2)), Some(1));
        assert!(table.ranks_above(ClubId(3), ClubId(1)));
    }

    #[test]
    fn rows_keep_record_invariants() {
        let clubs = vec![club(1, "Vasco", "Sul", &[(2, 2), (4, 1), (0, 3)])];
        let table = LeagueTable::from_clubs(clubs.iter());
        let row = &table.rows()[0];

        assert_eq!(row.points, 3 * row.wins + row.draws);
        assert_eq!(row.goal_diff, row.goals_for as i32 - row.goals_against as i32);
        assert_eq!(row.played, 3);
    }

    #[test]
    fn leader_per_conference() {
        let clubs = vec![
            club(1, "Grêmio", "Sul", &[(1, 0)]),
            club(2, "Inter", "Sul", &[(0, 0)]),
            club(3, "Remo", "Norte", &[(0, 2)]),
        ];

        let table = LeagueTable::from_clubs(clubs.iter());

        assert_eq!(table.leader("Sul").unwrap().club_id, ClubId(1));
        assert_eq!(table.leader("Norte").unwrap().club_id, ClubId(3));
        assert_eq!(table.conferences(), vec!["Norte".to_string(), "Sul".to_string()]);
    }

    #[test]
    fn leader_outlives_the_conference_name() {
        let clubs = vec![club(1, "Grêmio", "Sul", &[(1, 0)]), club(2, "Inter", "Sul", &[(0, 0)])];
        let table = LeagueTable::from_clubs(clubs.iter());

        let leader = {
            let conference = table.conferences().remove(0);
            table.leader(&conference)
        };
        let qualified: Vec<ClubId> = {
            let conference = "Sul".to_string();
            table.conference(&conference).map(|r| r.club_id).collect()
        };

        assert_eq!(leader.unwrap().name, "Grêmio");
        assert_eq!(qualified, vec![ClubId(1), ClubId(2)]);
    }
}
