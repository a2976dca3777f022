//! Association description file loader
//!
//! One declaration per line:
//!
//! ```text
//! j<ID> = Jugador.Jugador("<name>", <age>, <performance>)
//! e<ID> = Equipo.Equipo("<sport>", [j<ID>, j<ID>, ...])
//! s<ID> = Sede.Sede("<name>", [e<ID>, e<ID>, ...])
//! ```
//!
//! Lines are classified by their first character. Lines starting with
//! anything other than `j`, `e` or `s` (blank lines, `#` comments) are
//! ignored. A tagged line that does not match its pattern is malformed and
//! handled according to [`MalformedLinePolicy`].
//!
//! References must point backwards: players are declared before the teams
//! listing them, teams before the venues listing them. Each player belongs
//! to at most one team and each team to at most one venue; a second claim is
//! [`LeagueError::AlreadyAssigned`]. Re-declaring an identifier replaces the
//! earlier declaration, except for a team some venue already lists, which is
//! [`LeagueError::PlacedTeamRedefined`]. Teams never placed in a venue are
//! left out of the association.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{EntityKind, LeagueError, Result};
use crate::models::{Association, Player, Roster, Sport, Team, Venue};

/// What to do with a tagged line that does not match its pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedLinePolicy {
    /// Stop with [`LeagueError::MalformedLine`]
    #[default]
    Fail,
    /// Log a warning, count the line in [`ParseStats::malformed`] and go on
    Skip,
}

impl FromStr for MalformedLinePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(MalformedLinePolicy::Fail),
            "skip" => Ok(MalformedLinePolicy::Skip),
            other => Err(format!(
                "unknown malformed line policy '{}' (expected fail or skip)",
                other
            )),
        }
    }
}

impl fmt::Display for MalformedLinePolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MalformedLinePolicy::Fail => write!(f, "fail"),
            MalformedLinePolicy::Skip => write!(f, "skip"),
        }
    }
}

/// Line accounting for one description file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub total_lines: usize,
    pub players: usize,
    pub teams: usize,
    pub venues: usize,
    pub malformed: usize,
    pub ignored: usize,
    pub redefined: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum Declaration {
    Player(Player),
    Team {
        id: u32,
        sport: Sport,
        members: Vec<u32>,
    },
    Venue {
        id: u32,
        name: String,
        members: Vec<u32>,
    },
}

/// Read and parse a description file.
pub fn load_association(
    path: &Path,
    policy: MalformedLinePolicy,
) -> Result<(Association, ParseStats)> {
    let text = std::fs::read_to_string(path).map_err(|source| LeagueError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded {} ({} bytes)", path.display(), text.len());
    parse_association(&text, policy)
}

/// Parse description text into an association.
pub fn parse_association(
    text: &str,
    policy: MalformedLinePolicy,
) -> Result<(Association, ParseStats)> {
    let mut loader = Loader::new(policy);
    for (index, raw) in text.lines().enumerate() {
        loader.feed(index + 1, raw)?;
    }
    Ok(loader.finish())
}

struct Loader {
    policy: MalformedLinePolicy,
    players: Roster<Player>,
    teams: Roster<Team>,
    venues: Roster<Venue>,
    assigned_players: FxHashSet<u32>,
    assigned_teams: FxHashSet<u32>,
    stats: ParseStats,
}

impl Loader {
    fn new(policy: MalformedLinePolicy) -> Self {
        Self {
            policy,
            players: Roster::new(),
            teams: Roster::new(),
            venues: Roster::new(),
            assigned_players: FxHashSet::default(),
            assigned_teams: FxHashSet::default(),
            stats: ParseStats::default(),
        }
    }

    fn feed(&mut self, line_no: usize, raw: &str) -> Result<()> {
        self.stats.total_lines += 1;
        let line = raw.trim();

        let declaration = match parse_declaration(line) {
            Ok(Some(declaration)) => declaration,
            Ok(None) => {
                self.stats.ignored += 1;
                return Ok(());
            }
            Err(reason) => match self.policy {
                MalformedLinePolicy::Fail => {
                    return Err(LeagueError::MalformedLine {
                        line: line_no,
                        reason,
                        text: line.to_string(),
                    });
                }
                MalformedLinePolicy::Skip => {
                    warn!("Skipping malformed line {}: {} ('{}')", line_no, reason, line);
                    self.stats.malformed += 1;
                    return Ok(());
                }
            },
        };

        debug!("Line {}: {:?}", line_no, declaration);
        match declaration {
            Declaration::Player(player) => self.add_player(line_no, player),
            Declaration::Team { id, sport, members } => self.add_team(line_no, id, sport, &members),
            Declaration::Venue { id, name, members } => self.add_venue(line_no, id, name, &members),
        }
    }

    fn add_player(&mut self, line_no: usize, player: Player) -> Result<()> {
        let id = player.id;
        if self.players.insert(player).is_some() {
            warn!("Line {}: player {} redefined", line_no, id);
            self.stats.redefined += 1;
        } else {
            self.stats.players += 1;
        }
        Ok(())
    }

    fn add_team(&mut self, line_no: usize, id: u32, sport: Sport, members: &[u32]) -> Result<()> {
        // A venue holds its own copy of every team it lists
        if self.assigned_teams.contains(&id) {
            return Err(LeagueError::PlacedTeamRedefined { line: line_no, id });
        }
        if let Some(previous) = self.teams.get(id) {
            warn!("Line {}: team {} redefined", line_no, id);
            for player in previous.players() {
                self.assigned_players.remove(&player.id);
            }
        }

        let mut team = Team::new(id, sport);
        for &player_id in members {
            let player = self
                .players
                .get(player_id)
                .ok_or(LeagueError::MissingReference {
                    line: line_no,
                    kind: EntityKind::Player,
                    id: player_id,
                })?;
            if !self.assigned_players.insert(player_id) {
                return Err(LeagueError::AlreadyAssigned {
                    line: line_no,
                    kind: EntityKind::Player,
                    id: player_id,
                });
            }
            team.add_player(player.clone());
        }

        if self.teams.insert(team).is_some() {
            self.stats.redefined += 1;
        } else {
            self.stats.teams += 1;
        }
        Ok(())
    }

    fn add_venue(&mut self, line_no: usize, id: u32, name: String, members: &[u32]) -> Result<()> {
        if let Some(previous) = self.venues.get(id) {
            warn!("Line {}: venue {} redefined", line_no, id);
            for team in previous.teams() {
                self.assigned_teams.remove(&team.id);
            }
        }

        let mut venue = Venue::new(id, name);
        for &team_id in members {
            let team = self.teams.get(team_id).ok_or(LeagueError::MissingReference {
                line: line_no,
                kind: EntityKind::Team,
                id: team_id,
            })?;
            if !self.assigned_teams.insert(team_id) {
                return Err(LeagueError::AlreadyAssigned {
                    line: line_no,
                    kind: EntityKind::Team,
                    id: team_id,
                });
            }
            venue.add_team(team.clone());
        }

        if self.venues.insert(venue).is_some() {
            self.stats.redefined += 1;
        } else {
            self.stats.venues += 1;
        }
        Ok(())
    }

    fn finish(self) -> (Association, ParseStats) {
        let unplaced = self
            .teams
            .iter()
            .filter(|team| !self.assigned_teams.contains(&team.id))
            .count();
        if unplaced > 0 {
            warn!("{} team(s) are not listed by any venue", unplaced);
        }

        let mut association = Association::new();
        for venue in self.venues.iter() {
            association.add_venue(venue.clone());
        }

        info!(
            "Parsed {} lines: {} players, {} teams, {} venues ({} malformed, {} ignored)",
            self.stats.total_lines,
            self.stats.players,
            self.stats.teams,
            self.stats.venues,
            self.stats.malformed,
            self.stats.ignored
        );
        (association, self.stats)
    }
}

/// `Ok(None)` for lines that carry no declaration tag.
fn parse_declaration(line: &str) -> std::result::Result<Option<Declaration>, String> {
    let mut cursor = Cursor::new(line);
    match line.chars().next() {
        Some('j') => {
            let id = cursor.tagged_id('j')?;
            cursor.expect("=")?;
            cursor.expect("Jugador.Jugador")?;
            cursor.expect("(")?;
            let name = cursor.quoted()?;
            cursor.expect(",")?;
            let age = cursor.number::<u32>("age")?;
            cursor.expect(",")?;
            let performance = cursor.number::<i64>("performance")?;
            cursor.expect(")")?;
            cursor.finish()?;
            Ok(Some(Declaration::Player(Player::new(id, name, age, performance))))
        }
        Some('e') => {
            let id = cursor.tagged_id('e')?;
            cursor.expect("=")?;
            cursor.expect("Equipo.Equipo")?;
            cursor.expect("(")?;
            let sport = Sport::from_label(cursor.quoted()?);
            cursor.expect(",")?;
            let members = cursor.reference_list('j')?;
            cursor.expect(")")?;
            cursor.finish()?;
            Ok(Some(Declaration::Team { id, sport, members }))
        }
        Some('s') => {
            let id = cursor.tagged_id('s')?;
            cursor.expect("=")?;
            cursor.expect("Sede.Sede")?;
            cursor.expect("(")?;
            let name = cursor.quoted()?.to_string();
            cursor.expect(",")?;
            let members = cursor.reference_list('e')?;
            cursor.expect(")")?;
            cursor.finish()?;
            Ok(Some(Declaration::Venue { id, name, members }))
        }
        _ => Ok(None),
    }
}

/// Whitespace-tolerant scanner over one declaration line
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn expect(&mut self, token: &str) -> std::result::Result<(), String> {
        self.skip_whitespace();
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                Ok(())
            }
            None => Err(format!("expected '{}'", token)),
        }
    }

    fn number<N: FromStr>(&mut self, what: &str) -> std::result::Result<N, String> {
        self.skip_whitespace();
        let sign = usize::from(self.rest.starts_with('-'));
        let digits = self.rest[sign..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.rest.len() - sign);
        if digits == 0 {
            return Err(format!("expected {}", what));
        }
        let (literal, rest) = self.rest.split_at(sign + digits);
        let value = literal
            .parse::<N>()
            .map_err(|_| format!("invalid {} '{}'", what, literal))?;
        self.rest = rest;
        Ok(value)
    }

    fn tagged_id(&mut self, tag: char) -> std::result::Result<u32, String> {
        self.skip_whitespace();
        match self.rest.strip_prefix(tag) {
            Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => {
                self.rest = rest;
                self.number("identifier")
            }
            _ => Err(format!("expected '{}<id>'", tag)),
        }
    }

    fn quoted(&mut self) -> std::result::Result<&'a str, String> {
        self.expect("\"")?;
        let end = self
            .rest
            .find('"')
            .ok_or_else(|| "unterminated string".to_string())?;
        if end == 0 {
            return Err("empty string".to_string());
        }
        let (value, rest) = self.rest.split_at(end);
        self.rest = &rest[1..];
        Ok(value)
    }

    fn reference_list(&mut self, tag: char) -> std::result::Result<Vec<u32>, String> {
        self.expect("[")?;
        let mut ids = Vec::new();
        if self.expect("]").is_ok() {
            return Ok(ids);
        }
        loop {
            ids.push(self.tagged_id(tag)?);
            if self.expect(",").is_ok() {
                continue;
            }
            self.expect("]")?;
            return Ok(ids);
        }
    }

    fn finish(&mut self) -> std::result::Result<(), String> {
        self.skip_whitespace();
        if self.rest.is_empty() {
            Ok(())
        } else {
            Err(format!("unexpected trailing text '{}'", self.rest))
        }
    }
}
