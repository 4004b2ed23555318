//! Posting-time recommendation engine.
//!
//! Classifies a [`TimeSnapshot`](crate::TimeSnapshot) against the
//! [`ScheduleTables`](crate::ScheduleTables): verdict, confidence, next
//! better slot, and the risks/recommendations that apply.

mod analyzer;

pub use analyzer::{
    analyze, AnalysisResult, Engagement, PeakTableMode, PostingTimeEngine, DEFAULT_TIME_FORMAT,
};
