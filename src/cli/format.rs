//! Output formatting for CLI display.

use crate::corpus::SkippedBlock;
use crate::model::{DeadlineRecord, Season};

pub(super) fn format_record(record: &DeadlineRecord) -> String {
    record.to_string()
}

pub(super) fn format_resolution(nominal: (Season, i32), resolved: (Season, i32)) -> String {
    let (season, year) = resolved;
    if nominal == resolved {
        format!("{season} {year}")
    } else {
        format!("{season} {year} (after the {} {} deadline)", nominal.0, nominal.1)
    }
}

pub(super) fn format_skipped(skipped: &SkippedBlock) -> String {
    format!(
        "{} block {}: {}",
        skipped.path.display(),
        skipped.block,
        skipped.error
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_resolution_is_plain() {
        let text = format_resolution((Season::Spring, 1901), (Season::Spring, 1901));
        assert_eq!(text, "Spring 1901");
    }

    #[test]
    fn advanced_resolution_names_the_deadline() {
        let text = format_resolution((Season::Fall, 1904), (Season::Spring, 1905));
        assert_eq!(text, "Spring 1905 (after the Fall 1904 deadline)");
    }

    #[test]
    fn record_shows_clock_time() {
        let record = DeadlineRecord {
            season: Season::Fall,
            year: 1904,
            phase: crate::model::Phase::Orders,
            deadline: jiff::civil::time(16, 45, 0, 0),
        };
        assert_eq!(format_record(&record), "Fall 1904 Orders 16:45");
    }
}
