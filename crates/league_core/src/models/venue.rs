use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::roster::{Identified, Roster};
use super::sport::Sport;
use super::team::Team;
use crate::ranking::{sort_by_key_in, Metric, SortOrder};

/// How a venue folds its teams' averages into one figure.
///
/// - `TeamMean`: mean of every team's average, regardless of sport
/// - `SportSum`: mean per sport, then the per-sport means are added up
/// - `SportSumPerTeam`: the `SportSum` figure divided by the number of teams
///
/// Every policy yields 0.0 for a venue without teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AveragePolicy {
    #[default]
    TeamMean,
    SportSum,
    SportSumPerTeam,
}

impl FromStr for AveragePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "team_mean" => Ok(AveragePolicy::TeamMean),
            "sport_sum" => Ok(AveragePolicy::SportSum),
            "sport_sum_per_team" => Ok(AveragePolicy::SportSumPerTeam),
            other => Err(format!(
                "unknown average policy '{}' (expected team_mean, sport_sum or sport_sum_per_team)",
                other
            )),
        }
    }
}

impl fmt::Display for AveragePolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AveragePolicy::TeamMean => write!(f, "team_mean"),
            AveragePolicy::SportSum => write!(f, "sport_sum"),
            AveragePolicy::SportSumPerTeam => write!(f, "sport_sum_per_team"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Venue {
    pub id: u32,
    pub name: String,
    teams: Roster<Team>,
}

impl Venue {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            teams: Roster::new(),
        }
    }

    pub fn add_team(&mut self, team: Team) -> Option<Team> {
        self.teams.insert(team)
    }

    pub fn teams(&self) -> &[Team] {
        self.teams.as_slice()
    }

    pub fn team(&self, id: u32) -> Option<&Team> {
        self.teams.get(id)
    }

    /// Total players across all teams
    pub fn player_count(&self) -> usize {
        self.teams.iter().map(Team::len).sum()
    }

    pub fn average_performance(&self, policy: AveragePolicy) -> f64 {
        if self.teams.is_empty() {
            return 0.0;
        }

        match policy {
            AveragePolicy::TeamMean => {
                let total: f64 = self.teams.iter().map(Team::average_performance).sum();
                total / self.teams.len() as f64
            }
            AveragePolicy::SportSum => self.sport_sum(),
            AveragePolicy::SportSumPerTeam => self.sport_sum() / self.teams.len() as f64,
        }
    }

    fn sport_sum(&self) -> f64 {
        // (sport, sum of team averages, team count) in first-seen order
        let mut groups: Vec<(&Sport, f64, usize)> = Vec::new();
        for team in &self.teams {
            let average = team.average_performance();
            match groups.iter_mut().find(|(sport, _, _)| **sport == team.sport) {
                Some(group) => {
                    group.1 += average;
                    group.2 += 1;
                }
                None => groups.push((&team.sport, average, 1)),
            }
        }
        groups
            .iter()
            .map(|(_, sum, count)| sum / *count as f64)
            .sum()
    }

    /// Teams ordered by average performance, larger teams first on ties
    pub fn ranked_teams(&self, order: SortOrder) -> Vec<&Team> {
        let teams: Vec<&Team> = self.teams.iter().collect();
        sort_by_key_in(&teams, order, |t| {
            (Metric(t.average_performance()), Reverse(t.len()))
        })
    }
}

impl Identified for Venue {
    fn id(&self) -> u32 {
        self.id
    }
}
