//! # league_core - Sports Association Reports
//!
//! Loads a sports association (venues → teams → players) from a
//! line-oriented description file, ranks it and summarises it.
//!
//! ## Pipeline
//! 1. [`ingest`]: description file → [`Association`]
//! 2. [`ranking`]: stable merge sort and heap selection over composite keys
//! 3. [`stats`]: global extremes and means
//! 4. [`report`]: ordered text or JSON rendering
//!
//! ```
//! use league_core::{parse_association, MalformedLinePolicy, Report, ReportConfig};
//!
//! let text = r#"
//! j1 = Jugador.Jugador("Ana", 20, 50)
//! j2 = Jugador.Jugador("Leo", 22, 70)
//! e1 = Equipo.Equipo("Futbol", [j1, j2])
//! s1 = Sede.Sede("Stadium", [e1])
//! "#;
//!
//! let (association, _) = parse_association(text, MalformedLinePolicy::Fail).unwrap();
//! let report = Report::build(&association, &ReportConfig::default()).unwrap();
//! assert_eq!(report.player_ranking, vec![1, 2]);
//! assert_eq!(report.statistics.mean_age, 21.0);
//! ```

pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod ranking;
pub mod report;
pub mod stats;

use std::path::Path;
use std::time::Instant;

use tracing::info;

pub use config::{OutputFormat, ReportConfig};
pub use error::{EntityKind, LeagueError, Result};
pub use ingest::{load_association, parse_association, MalformedLinePolicy, ParseStats};
pub use models::{Association, AveragePolicy, Player, Sport, Team, Venue};
pub use ranking::{Metric, SortOrder};
pub use report::Report;
pub use stats::AssociationStats;

/// Load `path` and build its report.
///
/// Nothing is printed; the caller decides how to render the result.
pub fn run(path: &Path, config: &ReportConfig) -> Result<Report> {
    let started = Instant::now();

    let (association, parse_stats) = load_association(path, config.malformed_lines)?;
    let report = Report::build(&association, config)?;

    info!(
        "Report for {} ready in {:.3} ms ({} players, {} malformed lines skipped)",
        path.display(),
        started.elapsed().as_secs_f64() * 1000.0,
        report.statistics.player_count,
        parse_stats.malformed
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_input(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_run_end_to_end() {
        let file = write_input(
            "j1 = Jugador.Jugador(\"Ana\", 20, 50)\n\
             j2 = Jugador.Jugador(\"Leo\", 22, 70)\n\
             e1 = Equipo.Equipo(\"Futbol\", [j1, j2])\n\
             s1 = Sede.Sede(\"Stadium\", [e1])\n",
        );

        let report = run(file.path(), &ReportConfig::default()).unwrap();
        assert_eq!(report.venues[0].average_performance, 60.0);
        assert_eq!(report.statistics.youngest.name, "Ana");
        assert_eq!(report.statistics.oldest.name, "Leo");
        assert_eq!(report.statistics.mean_performance, 60.0);
    }

    #[test]
    fn test_run_honours_malformed_policy() {
        let text = "j1 = Jugador.Jugador(\"Ana\", 20, 50)\n\
                    j2 = Jugador.Jugador(\"Leo\", 22\n\
                    e1 = Equipo.Equipo(\"Futbol\", [j1])\n\
                    s1 = Sede.Sede(\"Stadium\", [e1])\n";
        let file = write_input(text);

        let strict = run(file.path(), &ReportConfig::default());
        assert!(matches!(strict, Err(LeagueError::MalformedLine { line: 2, .. })));

        let lenient = ReportConfig {
            malformed_lines: MalformedLinePolicy::Skip,
            ..ReportConfig::default()
        };
        let report = run(file.path(), &lenient).unwrap();
        assert_eq!(report.player_ranking, vec![1]);
    }
}
