//! Report configuration
//!
//! Every field has a default, so an empty YAML document is a valid
//! configuration:
//!
//! ```yaml
//! average_policy: sport_sum   # team_mean | sport_sum | sport_sum_per_team
//! order: descending           # ascending | descending
//! malformed_lines: skip       # fail | skip
//! format: json                # text | json
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LeagueError, Result};
use crate::ingest::MalformedLinePolicy;
use crate::models::AveragePolicy;
use crate::ranking::SortOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected text or json)", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Venue aggregation formula
    pub average_policy: AveragePolicy,
    /// Presentation order of venues, teams and team members
    pub order: SortOrder,
    pub malformed_lines: MalformedLinePolicy,
    pub format: OutputFormat,
}

impl ReportConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| LeagueError::Config(e.to_string()))
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|source| LeagueError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml).map_err(|e| match e {
            LeagueError::Config(message) => {
                LeagueError::Config(format!("{}: {}", path.display(), message))
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.average_policy, AveragePolicy::TeamMean);
        assert_eq!(config.order, SortOrder::Ascending);
        assert_eq!(config.malformed_lines, MalformedLinePolicy::Fail);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(ReportConfig::from_yaml_str("").unwrap(), config);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ReportConfig::from_yaml_str("average_policy: sport_sum\n").unwrap();
        assert_eq!(config.average_policy, AveragePolicy::SportSum);
        assert_eq!(config.order, SortOrder::Ascending);
    }

    #[test]
    fn test_full_yaml() {
        let yaml = "average_policy: sport_sum_per_team\norder: descending\nmalformed_lines: skip\nformat: json\n";
        let config = ReportConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config,
            ReportConfig {
                average_policy: AveragePolicy::SportSumPerTeam,
                order: SortOrder::Descending,
                malformed_lines: MalformedLinePolicy::Skip,
                format: OutputFormat::Json,
            }
        );
    }

    #[test]
    fn test_unknown_values_are_config_errors() {
        assert!(matches!(
            ReportConfig::from_yaml_str("average_policy: median\n"),
            Err(LeagueError::Config(_))
        ));
        assert!(matches!(
            ReportConfig::from_yaml_str("colour: blue\n"),
            Err(LeagueError::Config(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"order: descending\n").unwrap();
        let config = ReportConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.order, SortOrder::Descending);
    }

    #[test]
    fn test_file_errors_name_the_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"order: sideways\n").unwrap();
        match ReportConfig::from_yaml_file(file.path()) {
            Err(LeagueError::Config(message)) => {
                assert!(message.starts_with(&file.path().display().to_string()));
            }
            other => panic!("expected config error, got {:?}", other),
        }

        let empty = NamedTempFile::new().unwrap();
        assert_eq!(
            ReportConfig::from_yaml_file(empty.path()).unwrap(),
            ReportConfig::default()
        );
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
