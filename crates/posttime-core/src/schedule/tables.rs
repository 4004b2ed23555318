//! Peak and low-engagement hour tables.

use crate::error::ValidationError;

/// Hour-of-day tables driving the recommendation engine.
///
/// All three tables are kept sorted ascending and free of duplicates. The
/// fields are private so a value can only come out of [`ScheduleTables::new`]
/// (or `Default`), which guarantees non-empty peak tables, hours in 0-23 and
/// no overlap between low-engagement hours and either peak table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleTables {
    weekday_peak_hours: Vec<u8>,
    weekend_peak_hours: Vec<u8>,
    low_engagement_hours: Vec<u8>,
}

const DEFAULT_WEEKDAY_PEAK_HOURS: [u8; 9] = [9, 10, 12, 13, 14, 15, 19, 20, 21];
const DEFAULT_WEEKEND_PEAK_HOURS: [u8; 8] = [10, 11, 12, 13, 14, 15, 20, 21];
const DEFAULT_LOW_ENGAGEMENT_HOURS: [u8; 8] = [0, 1, 2, 3, 4, 5, 22, 23];

impl Default for ScheduleTables {
    fn default() -> Self {
        Self {
            weekday_peak_hours: DEFAULT_WEEKDAY_PEAK_HOURS.to_vec(),
            weekend_peak_hours: DEFAULT_WEEKEND_PEAK_HOURS.to_vec(),
            low_engagement_hours: DEFAULT_LOW_ENGAGEMENT_HOURS.to_vec(),
        }
    }
}

impl ScheduleTables {
    /// Build validated tables from raw hour lists.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if a peak table is empty, an hour is
    /// outside 0-23, or a low-engagement hour also appears in a peak table.
    pub fn new(
        weekday_peak_hours: &[u8],
        weekend_peak_hours: &[u8],
        low_engagement_hours: &[u8],
    ) -> Result<Self, ValidationError> {
        let weekday = normalize("weekday_peak_hours", weekday_peak_hours)?;
        let weekend = normalize("weekend_peak_hours", weekend_peak_hours)?;
        let low = normalize("low_engagement_hours", low_engagement_hours)?;

        for (table, hours) in [("weekday_peak_hours", &weekday), ("weekend_peak_hours", &weekend)] {
            if hours.is_empty() {
                return Err(ValidationError::EmptyTable(table.to_string()));
            }
            if let Some(&hour) = hours.iter().find(|h| low.binary_search(h).is_ok()) {
                return Err(ValidationError::OverlappingHours {
                    table: table.to_string(),
                    hour,
                });
            }
        }

        Ok(Self {
            weekday_peak_hours: weekday,
            weekend_peak_hours: weekend,
            low_engagement_hours: low,
        })
    }

    /// Weekday peak hours, ascending.
    pub fn weekday_peak_hours(&self) -> &[u8] {
        &self.weekday_peak_hours
    }

    /// Weekend peak hours, ascending.
    pub fn weekend_peak_hours(&self) -> &[u8] {
        &self.weekend_peak_hours
    }

    /// Low-engagement hours, ascending.
    pub fn low_engagement_hours(&self) -> &[u8] {
        &self.low_engagement_hours
    }

    pub fn is_weekday_peak(&self, hour: u8) -> bool {
        self.weekday_peak_hours.binary_search(&hour).is_ok()
    }

    pub fn is_weekend_peak(&self, hour: u8) -> bool {
        self.weekend_peak_hours.binary_search(&hour).is_ok()
    }

    pub fn is_low_engagement(&self, hour: u8) -> bool {
        self.low_engagement_hours.binary_search(&hour).is_ok()
    }

    /// Render the tables as a 24-row chart, one line per hour.
    pub fn render_ascii_chart(&self) -> String {
        let mut output = String::from("\nHour   Weekday  Weekend\n");
        output.push_str(&"─".repeat(26));
        output.push('\n');

        for hour in 0..24u8 {
            let mark = |peak: bool| {
                if self.is_low_engagement(hour) {
                    "·"
                } else if peak {
                    "█"
                } else {
                    "░"
                }
            };
            output.push_str(&format!(
                "{:02}:00  {:^7}  {:^7}\n",
                hour,
                mark(self.is_weekday_peak(hour)),
                mark(self.is_weekend_peak(hour)),
            ));
        }

        output.push_str(&"─".repeat(26));
        output.push_str("\n█ Peak  ░ Moderate  · Low\n");
        output
    }
}

fn normalize(table: &str, hours: &[u8]) -> Result<Vec<u8>, ValidationError> {
    if let Some(&hour) = hours.iter().find(|&&h| h > 23) {
        return Err(ValidationError::HourOutOfRange {
            table: table.to_string(),
            hour,
        });
    }
    let mut sorted = hours.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_match_constants() {
        let tables = ScheduleTables::default();
        assert_eq!(tables.weekday_peak_hours(), &DEFAULT_WEEKDAY_PEAK_HOURS);
        assert_eq!(tables.weekend_peak_hours(), &DEFAULT_WEEKEND_PEAK_HOURS);
        assert_eq!(tables.low_engagement_hours(), &DEFAULT_LOW_ENGAGEMENT_HOURS);
    }

    #[test]
    fn default_tables_pass_validation() {
        let rebuilt = ScheduleTables::new(
            &DEFAULT_WEEKDAY_PEAK_HOURS,
            &DEFAULT_WEEKEND_PEAK_HOURS,
            &DEFAULT_LOW_ENGAGEMENT_HOURS,
        )
        .unwrap();
        assert_eq!(rebuilt, ScheduleTables::default());
    }

    #[test]
    fn new_sorts_and_dedups() {
        let tables = ScheduleTables::new(&[21, 9, 9, 12], &[11], &[]).unwrap();
        assert_eq!(tables.weekday_peak_hours(), &[9, 12, 21]);
    }

    #[test]
    fn new_rejects_empty_peak_table() {
        let err = ScheduleTables::new(&[], &[10], &[0]).unwrap_err();
        assert_eq!(err, ValidationError::EmptyTable("weekday_peak_hours".into()));

        let err = ScheduleTables::new(&[10], &[], &[0]).unwrap_err();
        assert_eq!(err, ValidationError::EmptyTable("weekend_peak_hours".into()));
    }

    #[test]
    fn new_rejects_out_of_range_hour() {
        let err = ScheduleTables::new(&[9, 24], &[10], &[0]).unwrap_err();
        assert!(matches!(err, ValidationError::HourOutOfRange { hour: 24, .. }));
    }

    #[test]
    fn new_rejects_overlap_with_low_engagement() {
        let err = ScheduleTables::new(&[9, 10], &[10, 23], &[0, 23]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OverlappingHours {
                table: "weekend_peak_hours".into(),
                hour: 23,
            }
        );
    }

    #[test]
    fn membership_checks() {
        let tables = ScheduleTables::default();
        assert!(tables.is_weekday_peak(9));
        assert!(!tables.is_weekday_peak(11));
        assert!(tables.is_weekend_peak(11));
        assert!(tables.is_low_engagement(23));
        assert!(!tables.is_low_engagement(6));
    }

    #[test]
    fn chart_has_a_row_per_hour() {
        let chart = ScheduleTables::default().render_ascii_chart();
        assert!(chart.contains("00:00"));
        assert!(chart.contains("23:00"));
        assert_eq!(chart.lines().filter(|l| l.contains(":00 ")).count(), 24);
    }
}
