//! Posting-time engine and its result types.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

use crate::error::ValidationError;
use crate::schedule::ScheduleTables;
use crate::snapshot::TimeSnapshot;

/// Default display pattern for `next_best_time` (2-digit hour and minute).
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

/// Points of confidence lost per hour of distance from the nearest peak hour.
const CONFIDENCE_STEP: u32 = 15;

/// Minute from which the "approaching the next hour" risk fires.
const LATE_IN_HOUR_MINUTE: u8 = 45;

/// Audience size at the analyzed hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Engagement {
    Low,
    Moderate,
    High,
}

impl fmt::Display for Engagement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Engagement::Low => "Low",
            Engagement::Moderate => "Moderate",
            Engagement::High => "High",
        };
        f.write_str(label)
    }
}

/// Which peak table the next-best-time scan and the confidence distance read.
///
/// Classification (peak / low / good-time) always switches to the weekend
/// table on Saturdays and Sundays. `WeekdayOnly` keeps the historical
/// behavior of ranking weekend instants against the weekday table;
/// `WeekendAware` ranks them against the weekend table instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeakTableMode {
    #[default]
    WeekdayOnly,
    WeekendAware,
}

/// Complete output of one engine invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub is_good_time: bool,
    /// 0-100
    pub confidence: u8,
    pub reason: String,
    /// `next_best_at` rendered with the engine's time format
    pub next_best_time: String,
    pub next_best_at: NaiveDateTime,
    pub current_engagement: Engagement,
    /// In detection order
    pub risks: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Rule-based posting-time recommendation engine.
///
/// Stateless apart from its immutable configuration: every call to
/// [`analyze`](Self::analyze) is evaluated from scratch.
#[derive(Debug, Clone)]
pub struct PostingTimeEngine {
    tables: ScheduleTables,
    mode: PeakTableMode,
    time_format: String,
}

impl Default for PostingTimeEngine {
    fn default() -> Self {
        Self::new(ScheduleTables::default())
    }
}

impl PostingTimeEngine {
    /// Create an engine over the given tables with default options.
    pub fn new(tables: ScheduleTables) -> Self {
        Self {
            tables,
            mode: PeakTableMode::default(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }

    /// Choose which peak table ranks weekend instants.
    pub fn with_mode(mut self, mode: PeakTableMode) -> Self {
        if mode == PeakTableMode::WeekendAware {
            tracing::info!("weekend-aware peak table enabled; weekend confidence and next-best time use weekend peaks");
        }
        self.mode = mode;
        self
    }

    /// Use a chrono `strftime` pattern for `next_best_time`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimeFormat`] if chrono cannot render
    /// the pattern for a local time without an offset.
    pub fn with_time_format(mut self, format: &str) -> Result<Self, ValidationError> {
        validate_time_format(format)?;
        self.time_format = format.to_string();
        Ok(self)
    }

    pub fn tables(&self) -> &ScheduleTables {
        &self.tables
    }

    pub fn mode(&self) -> PeakTableMode {
        self.mode
    }

    /// Classify the snapshot's instant as a posting time.
    pub fn analyze(&self, snapshot: &TimeSnapshot) -> AnalysisResult {
        let hour = snapshot.hour();
        let is_weekend = snapshot.is_weekend();
        let is_low_engagement_hour = self.tables.is_low_engagement(hour);
        let is_weekend_peak = self.tables.is_weekend_peak(hour);
        let is_peak_hour = if is_weekend {
            is_weekend_peak
        } else {
            self.tables.is_weekday_peak(hour)
        };

        let ranking = self.ranking_table(is_weekend);
        let next_best_at = next_best_instant(ranking, snapshot.instant());
        let next_best_time = next_best_at.format(&self.time_format).to_string();
        let (nearest_peak, distance) = nearest_peak(ranking, hour);
        let confidence = confidence_for_distance(distance);

        let mut risks = Vec::new();
        let mut recommendations = Vec::new();

        if is_low_engagement_hour {
            risks.push("Very low active user base during these hours".to_string());
            risks.push("Reduced visibility in users' feeds".to_string());
            recommendations.push(format!("Wait until {next_best_time} for better engagement"));
        }

        if is_weekend && !is_weekend_peak {
            risks.push("Weekend posting patterns differ from weekdays".to_string());
            recommendations.push("Consider different timing for weekend posts".to_string());
        }

        if snapshot.minute() >= LATE_IN_HOUR_MINUTE {
            risks.push("Approaching the next hour - engagement patterns may shift".to_string());
            recommendations.push("Consider waiting for the start of the next hour".to_string());
        }

        let current_engagement = if is_low_engagement_hour {
            Engagement::Low
        } else if is_peak_hour {
            Engagement::High
        } else {
            Engagement::Moderate
        };

        let is_good_time = is_peak_hour && !is_low_engagement_hour;

        tracing::debug!(
            hour,
            day_of_week = snapshot.day_of_week(),
            minute = snapshot.minute(),
            nearest_peak,
            confidence,
            is_good_time,
            %next_best_at,
            "analyzed posting time"
        );

        AnalysisResult {
            is_good_time,
            confidence,
            reason: reason(is_peak_hour, is_low_engagement_hour, is_weekend),
            next_best_time,
            next_best_at,
            current_engagement,
            risks,
            recommendations,
        }
    }

    fn ranking_table(&self, is_weekend: bool) -> &[u8] {
        match self.mode {
            PeakTableMode::WeekendAware if is_weekend => self.tables.weekend_peak_hours(),
            _ => self.tables.weekday_peak_hours(),
        }
    }
}

/// Analyze with the default engine options.
pub fn analyze(snapshot: &TimeSnapshot, tables: &ScheduleTables) -> AnalysisResult {
    PostingTimeEngine::new(tables.clone()).analyze(snapshot)
}

/// Render the pattern once on a naive instant. Unknown specifiers and ones
/// needing an offset or timezone (`%z`, `%Z`, `%+`) fail here instead of
/// panicking later inside `to_string()`.
fn validate_time_format(format: &str) -> Result<(), ValidationError> {
    let mut rendered = String::new();
    write!(rendered, "{}", NaiveDateTime::default().format(format))
        .map_err(|_| ValidationError::InvalidTimeFormat(format.to_string()))
}

/// First peak after `now`'s hour (wrapping to the first entry), at minute 0,
/// pushed to the next day unless strictly later than `now`.
fn next_best_instant(peaks: &[u8], now: NaiveDateTime) -> NaiveDateTime {
    let hour = now.hour() as u8;
    let next_hour = peaks
        .iter()
        .copied()
        .find(|&h| h > hour)
        .or_else(|| peaks.first().copied())
        .unwrap_or(hour);

    let candidate = now.date().and_time(NaiveTime::MIN) + Duration::hours(i64::from(next_hour));
    if candidate > now {
        candidate
    } else {
        candidate + Duration::days(1)
    }
}

/// Nearest peak hour and its distance; ties keep the earlier (smaller) entry.
fn nearest_peak(peaks: &[u8], hour: u8) -> (u8, u8) {
    peaks
        .iter()
        .map(|&peak| (peak, peak.abs_diff(hour)))
        .min_by_key(|&(_, distance)| distance)
        // Peak tables are non-empty by construction.
        .unwrap_or((hour, 0))
}

fn confidence_for_distance(distance: u8) -> u8 {
    100u32.saturating_sub(u32::from(distance) * CONFIDENCE_STEP) as u8
}

fn reason(is_peak_hour: bool, is_low_engagement_hour: bool, is_weekend: bool) -> String {
    if is_peak_hour {
        format!(
            "Current time aligns with peak engagement hours{}",
            if is_weekend { " for weekends" } else { "" }
        )
    } else {
        format!(
            "Current time shows {} engagement levels{}",
            if is_low_engagement_hour { "very low" } else { "moderate" },
            if is_weekend { " during weekends" } else { "" }
        )
    }
}
