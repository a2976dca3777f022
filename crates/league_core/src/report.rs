//! # Report
//!
//! A [`Report`] is the ordered, fully computed view of an association:
//! venues with their ranked teams and members, the global player ranking and
//! the statistics block. It renders as plain text or JSON; both carry the
//! same information in the same order.

use std::fmt::Write as _;

use serde::Serialize;
use tracing::debug;

use crate::config::{OutputFormat, ReportConfig};
use crate::error::Result;
use crate::models::{Association, AveragePolicy, Player, Sport, Team, Venue};
use crate::ranking::SortOrder;
use crate::stats::{self, AssociationStats, TeamStanding};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSection {
    pub id: u32,
    pub sport: Sport,
    pub average_performance: f64,
    /// Member identifiers in ranked order
    pub players: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueSection {
    pub id: u32,
    pub name: String,
    pub average_performance: f64,
    pub player_count: usize,
    pub teams: Vec<TeamSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub average_policy: AveragePolicy,
    pub order: SortOrder,
    pub venues: Vec<VenueSection>,
    /// Player identifiers by performance, lowest first
    pub player_ranking: Vec<u32>,
    pub statistics: AssociationStats,
}

impl Report {
    pub fn build(association: &Association, config: &ReportConfig) -> Result<Self> {
        let statistics = stats::compute(association)?;

        let venues = association
            .ranked_venues(config.average_policy, config.order)
            .into_iter()
            .map(|venue| venue_section(venue, config))
            .collect();

        let player_ranking = association
            .player_ranking()
            .into_iter()
            .map(|player| player.id)
            .collect();

        debug!(
            "Report built: {} venues, {} players",
            association.venues().len(),
            statistics.player_count
        );

        Ok(Self {
            average_policy: config.average_policy,
            order: config.order,
            venues,
            player_ranking,
            statistics,
        })
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => self.to_json(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for venue in &self.venues {
            let _ = writeln!(
                out,
                "{}, performance: {}",
                venue.name,
                format_average(venue.average_performance)
            );
            for team in &venue.teams {
                let _ = writeln!(
                    out,
                    "{}, performance: {}",
                    team.sport,
                    format_average(team.average_performance)
                );
                let _ = writeln!(out, "{{{}}}", join_ids(&team.players));
            }
            out.push('\n');
        }

        out.push_str("Player ranking:\n");
        let _ = writeln!(out, "{}", join_ids(&self.player_ranking));
        out.push('\n');

        let s = &self.statistics;
        let _ = writeln!(out, "Best team: {}", describe_team(&s.best_team));
        let _ = writeln!(out, "Worst team: {}", describe_team(&s.worst_team));
        let _ = writeln!(
            out,
            "Top performer: {}",
            describe_player(&s.top_performer, s.top_performer.performance)
        );
        let _ = writeln!(
            out,
            "Lowest performer: {}",
            describe_player(&s.lowest_performer, s.lowest_performer.performance)
        );
        let _ = writeln!(
            out,
            "Youngest player: {}",
            describe_player(&s.youngest, i64::from(s.youngest.age))
        );
        let _ = writeln!(
            out,
            "Oldest player: {}",
            describe_player(&s.oldest, i64::from(s.oldest.age))
        );
        let _ = writeln!(out, "Mean player age: {}", format_average(s.mean_age));
        let _ = writeln!(
            out,
            "Mean player performance: {}",
            format_average(s.mean_performance)
        );

        out
    }
}

fn venue_section(venue: &Venue, config: &ReportConfig) -> VenueSection {
    VenueSection {
        id: venue.id,
        name: venue.name.clone(),
        average_performance: venue.average_performance(config.average_policy),
        player_count: venue.player_count(),
        teams: venue
            .ranked_teams(config.order)
            .into_iter()
            .map(|team| team_section(team, config.order))
            .collect(),
    }
}

fn team_section(team: &Team, order: SortOrder) -> TeamSection {
    TeamSection {
        id: team.id,
        sport: team.sport.clone(),
        average_performance: team.average_performance(),
        players: team.ranked_players(order).iter().map(|p| p.id).collect(),
    }
}

fn format_average(value: f64) -> String {
    format!("{:.2}", value)
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_team(team: &TeamStanding) -> String {
    format!(
        "{} (team {}) at {}, performance: {}",
        team.sport,
        team.team_id,
        team.venue,
        format_average(team.average_performance)
    )
}

fn describe_player(player: &Player, value: i64) -> String {
    format!("{{{}, {}, {}}}", player.id, player.name, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{parse_association, MalformedLinePolicy};
    use crate::error::LeagueError;

    const SCENARIO: &str = r#"j1 = Jugador.Jugador("Ana", 20, 50)
j2 = Jugador.Jugador("Leo", 22, 70)
e1 = Equipo.Equipo("Futbol", [j1, j2])
s1 = Sede.Sede("Stadium", [e1])
"#;

    const LEAGUE: &str = r#"j1 = Jugador.Jugador("Ana", 20, 50)
j2 = Jugador.Jugador("Leo", 31, 90)
j3 = Jugador.Jugador("Eva", 18, 90)
j4 = Jugador.Jugador("Tom", 31, 30)
j5 = Jugador.Jugador("Sam", 18, 30)
j6 = Jugador.Jugador("Kai", 25, 70)
e1 = Equipo.Equipo("Futbol", [j1, j2])
e2 = Equipo.Equipo("Volleyball", [j3, j4])
e3 = Equipo.Equipo("Futbol", [j5, j6])
s1 = Sede.Sede("North", [e1, e2])
s2 = Sede.Sede("South", [e3])
"#;

    fn report(text: &str, config: &ReportConfig) -> Report {
        let (association, _) = parse_association(text, MalformedLinePolicy::Fail).unwrap();
        Report::build(&association, config).unwrap()
    }

    #[test]
    fn test_scenario_report() {
        let report = report(SCENARIO, &ReportConfig::default());

        assert_eq!(report.venues.len(), 1);
        assert_eq!(report.venues[0].average_performance, 60.0);
        assert_eq!(report.venues[0].teams[0].average_performance, 60.0);
        assert_eq!(report.venues[0].teams[0].players, vec![1, 2]);
        assert_eq!(report.player_ranking, vec![1, 2]);
        assert_eq!(report.statistics.mean_age, 21.0);
    }

    #[test]
    fn test_scenario_text() {
        let text = report(SCENARIO, &ReportConfig::default()).render_text();
        let expected = "\
Stadium, performance: 60.00
Football, performance: 60.00
{1, 2}

Player ranking:
1, 2

Best team: Football (team 1) at Stadium, performance: 60.00
Worst team: Football (team 1) at Stadium, performance: 60.00
Top performer: {2, Leo, 70}
Lowest performer: {1, Ana, 50}
Youngest player: {1, Ana, 20}
Oldest player: {2, Leo, 22}
Mean player age: 21.00
Mean player performance: 60.00
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_ascending_layout() {
        let report = report(LEAGUE, &ReportConfig::default());

        // North: (70 + 60) / 2 = 65, South: 50
        let venues: Vec<&str> = report.venues.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(venues, vec!["South", "North"]);

        let north_teams: Vec<u32> = report.venues[1].teams.iter().map(|t| t.id).collect();
        assert_eq!(north_teams, vec![2, 1]);

        // Eva and Tom: 30 before 90
        assert_eq!(report.venues[1].teams[0].players, vec![4, 3]);
        assert_eq!(report.player_ranking, vec![4, 5, 1, 6, 2, 3]);
    }

    #[test]
    fn test_descending_layout_keeps_global_ranking_ascending() {
        let config = ReportConfig {
            order: SortOrder::Descending,
            ..ReportConfig::default()
        };
        let report = report(LEAGUE, &config);

        let venues: Vec<&str> = report.venues.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(venues, vec!["North", "South"]);
        assert_eq!(report.venues[0].teams[0].id, 1);
        assert_eq!(report.venues[0].teams[0].players, vec![2, 1]);
        assert_eq!(report.player_ranking, vec![4, 5, 1, 6, 2, 3]);
    }

    #[test]
    fn test_policy_changes_venue_figures() {
        let config = ReportConfig {
            average_policy: AveragePolicy::SportSum,
            ..ReportConfig::default()
        };
        let report = report(LEAGUE, &config);

        // North: football 70 + volleyball 60
        let north = report.venues.iter().find(|v| v.name == "North").unwrap();
        assert_eq!(north.average_performance, 130.0);
        assert_eq!(report.average_policy, AveragePolicy::SportSum);
    }

    #[test]
    fn test_json_carries_the_same_information() {
        let report = report(SCENARIO, &ReportConfig::default());
        let json = report.render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["average_policy"], "team_mean");
        assert_eq!(value["venues"][0]["name"], "Stadium");
        assert_eq!(value["venues"][0]["teams"][0]["sport"], "Football");
        assert_eq!(value["venues"][0]["teams"][0]["players"], serde_json::json!([1, 2]));
        assert_eq!(value["player_ranking"], serde_json::json!([1, 2]));
        assert_eq!(value["statistics"]["youngest"]["name"], "Ana");
        assert_eq!(value["statistics"]["mean_performance"], 60.0);
    }

    #[test]
    fn test_empty_association_has_no_report() {
        let (association, _) = parse_association("", MalformedLinePolicy::Fail).unwrap();
        assert!(matches!(
            Report::build(&association, &ReportConfig::default()),
            Err(LeagueError::EmptyAggregate(_))
        ));
    }

    #[test]
    fn test_empty_team_listed_with_zero_average() {
        let text = format!("{}e2 = Equipo.Equipo(\"Volleyball\", [])\ns2 = Sede.Sede(\"Annex\", [e2])\n", SCENARIO);
        let report = report(&text, &ReportConfig::default());

        assert_eq!(report.venues[0].name, "Annex");
        assert_eq!(report.venues[0].average_performance, 0.0);
        assert!(report.venues[0].teams[0].players.is_empty());
        assert_eq!(report.statistics.worst_team.team_id, 2);
    }
}
