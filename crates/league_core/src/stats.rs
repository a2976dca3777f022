//! # Association Statistics
//!
//! Global extremes and means over every team and player reachable from an
//! [`Association`].
//!
//! Ties go to the candidate met first when walking venues, then teams, then
//! players in insertion order. An association without players has no
//! statistics: [`compute`] returns [`LeagueError::EmptyAggregate`] instead of
//! dividing by zero.

use serde::Serialize;

use crate::error::{LeagueError, Result};
use crate::models::{Association, Player, Sport, Team, Venue};
use crate::ranking::{largest_n, smallest_n, Metric};

/// A team as it appears in the statistics block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStanding {
    pub team_id: u32,
    pub sport: Sport,
    pub venue_id: u32,
    pub venue: String,
    pub average_performance: f64,
}

impl TeamStanding {
    fn new(venue: &Venue, team: &Team) -> Self {
        Self {
            team_id: team.id,
            sport: team.sport.clone(),
            venue_id: venue.id,
            venue: venue.name.clone(),
            average_performance: team.average_performance(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationStats {
    pub best_team: TeamStanding,
    pub worst_team: TeamStanding,
    pub top_performer: Player,
    pub lowest_performer: Player,
    pub youngest: Player,
    pub oldest: Player,
    pub mean_age: f64,
    pub mean_performance: f64,
    pub player_count: usize,
    pub team_count: usize,
}

pub fn compute(association: &Association) -> Result<AssociationStats> {
    let teams: Vec<(&Venue, &Team)> = association.teams().collect();
    let players: Vec<&Player> = association.players().collect();

    if players.is_empty() {
        return Err(LeagueError::EmptyAggregate("association has no players"));
    }

    let team_average = |entry: &(&Venue, &Team)| Metric(entry.1.average_performance());
    let best_team = first(largest_n(&teams, 1, team_average), "no teams")?;
    let worst_team = first(smallest_n(&teams, 1, team_average), "no teams")?;

    let top_performer = first(largest_n(&players, 1, |p| p.performance), "no players")?;
    let lowest_performer = first(smallest_n(&players, 1, |p| p.performance), "no players")?;
    let youngest = first(smallest_n(&players, 1, |p| p.age), "no players")?;
    let oldest = first(largest_n(&players, 1, |p| p.age), "no players")?;

    let count = players.len() as f64;
    let total_age: u64 = players.iter().map(|p| u64::from(p.age)).sum();
    let total_performance: i128 = players.iter().map(|p| i128::from(p.performance)).sum();

    Ok(AssociationStats {
        best_team: TeamStanding::new(best_team.0, best_team.1),
        worst_team: TeamStanding::new(worst_team.0, worst_team.1),
        top_performer: top_performer.clone(),
        lowest_performer: lowest_performer.clone(),
        youngest: youngest.clone(),
        oldest: oldest.clone(),
        mean_age: total_age as f64 / count,
        mean_performance: total_performance as f64 / count,
        player_count: players.len(),
        team_count: teams.len(),
    })
}

fn first<T>(selected: Vec<T>, what: &'static str) -> Result<T> {
    selected
        .into_iter()
        .next()
        .ok_or(LeagueError::EmptyAggregate(what))
}
