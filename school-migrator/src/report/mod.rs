//! Final summary of a migration run.
use std::fmt;
use std::time::Duration;

use school_migrator_shared::{EntityStats, MigrationStats};
use tracing::info;

use crate::config::DefaultEntitiesConfig;

/// Read-only view over the counters of a finished run.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub stats: MigrationStats,
    pub elapsed: Duration,
    pub role_name: String,
    pub institution_code: String,
    pub school_code: String,
}

impl SummaryReport {
    pub fn new(stats: MigrationStats, elapsed: Duration, defaults: &DefaultEntitiesConfig) -> Self {
        Self {
            stats,
            elapsed,
            role_name: defaults.role_name.clone(),
            institution_code: defaults.institution_code.clone(),
            school_code: defaults.school_code.clone(),
        }
    }

    pub fn totals(&self) -> EntityStats {
        self.stats.totals()
    }

    /// Emits the summary line by line through the log.
    pub fn log(&self) {
        for line in self.to_string().lines() {
            info!("{}", line);
        }
    }
}

fn counts(f: &mut fmt::Formatter<'_>, label: &str, stats: EntityStats) -> fmt::Result {
    writeln!(
        f,
        "{}: {} migrated, {} skipped, {} errors",
        label, stats.migrated, stats.skipped, stats.errors
    )
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Migration Summary ===")?;
        for (kind, stats) in self.stats.iter() {
            counts(f, kind.label(), stats)?;
        }
        counts(f, "Total", self.totals())?;
        writeln!(f, "Total time: {:.2}s", self.elapsed.as_secs_f64())?;
        writeln!(
            f,
            "Note: all migrated users were assigned the fallback role '{}'.",
            self.role_name
        )?;
        write!(
            f,
            "Note: migrated schools and users are linked to institution '{}' and school '{}'.",
            self.institution_code, self.school_code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use school_migrator_shared::EntityKind;

    fn report() -> SummaryReport {
        let mut stats = MigrationStats::new();
        stats.record(EntityKind::Institutions, EntityStats::new(2, 1, 0));
        stats.record(EntityKind::Users, EntityStats::new(4, 0, 1));
        SummaryReport::new(stats, Duration::from_millis(1500), &DefaultEntitiesConfig::default())
    }

    #[test]
    fn test_render() {
        let rendered = report().to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "=== Migration Summary ===");
        assert_eq!(lines[1], "Institutions: 2 migrated, 1 skipped, 0 errors");
        assert_eq!(lines[2], "Schools: 0 migrated, 0 skipped, 0 errors");
        assert_eq!(lines[3], "Users: 4 migrated, 0 skipped, 1 errors");
        assert_eq!(lines[6], "Total: 6 migrated, 1 skipped, 1 errors");
        assert_eq!(lines[7], "Total time: 1.50s");
        assert!(lines[8].contains("'TEACHER'"));
        assert!(lines[9].contains("'MYSQL_MIGRATED'"));
        assert!(lines[9].contains("'MYSQL_MIGRATED_SCHOOL'"));
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_totals() {
        assert_eq!(report().totals(), EntityStats::new(6, 1, 1));
    }
}
