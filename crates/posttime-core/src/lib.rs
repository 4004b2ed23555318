//! # Posttime Core Library
//!
//! This library answers one question: is now a good moment to publish a
//! social-media post? It follows a CLI-first philosophy where the engine is
//! a plain library and the `posttime` binary is a thin front-end over it.
//!
//! ## Architecture
//!
//! - **Schedule**: immutable hour tables (weekday peaks, weekend peaks,
//!   low-engagement hours), validated once at construction
//! - **Snapshot**: the hour/day/minute view of a single local instant
//! - **Engine**: a pure, total classifier from snapshot to [`AnalysisResult`]
//! - **Shell**: async wrapper that waits a cosmetic delay before analyzing
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`ScheduleTables`]: Peak and low-engagement hour tables
//! - [`TimeSnapshot`]: Hour, day-of-week and minute of one instant
//! - [`PostingTimeEngine`]: The recommendation engine
//! - [`AnalysisShell`]: Delayed, clock-reading invocation of the engine
//! - [`Config`]: Application configuration management

pub mod engine;
pub mod error;
pub mod schedule;
pub mod shell;
pub mod snapshot;
pub mod storage;

pub use engine::{AnalysisResult, Engagement, PeakTableMode, PostingTimeEngine};
pub use error::{ConfigError, CoreError, ValidationError};
pub use schedule::ScheduleTables;
pub use shell::AnalysisShell;
pub use snapshot::{Clock, FixedClock, SystemClock, TimeSnapshot};
pub use storage::Config;
