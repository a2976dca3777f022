use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("Unresolved reference on line {line}: {kind} {id} is not declared")]
    MissingReference { line: usize, kind: EntityKind, id: u32 },

    #[error("Malformed line {line}: {reason}: '{text}'")]
    MalformedLine {
        line: usize,
        reason: String,
        text: String,
    },

    #[error("{kind} {id} is already assigned to another parent (line {line})")]
    AlreadyAssigned { line: usize, kind: EntityKind, id: u32 },

    #[error("Team {id} is already listed by a venue and cannot be redefined (line {line})")]
    PlacedTeamRedefined { line: usize, id: u32 },

    #[error("No data: {0}")]
    EmptyAggregate(&'static str),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LeagueError {
    /// True when the error points at a problem in the description file
    /// rather than in the environment or the configuration.
    pub fn is_input_error(&self) -> bool {
        match self {
            LeagueError::MissingReference { .. } => true,
            LeagueError::MalformedLine { .. } => true,
            LeagueError::AlreadyAssigned { .. } => true,
            LeagueError::PlacedTeamRedefined { .. } => true,
            LeagueError::EmptyAggregate(_) => true,
            LeagueError::Io { .. } => false,
            LeagueError::Config(_) => false,
            LeagueError::Serialization(_) => false,
        }
    }
}

/// Entity kinds that can be referenced by identifier in a description file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Team,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            EntityKind::Player => write!(f, "player"),
            EntityKind::Team => write!(f, "team"),
        }
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
