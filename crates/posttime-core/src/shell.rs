//! Async invocation shell around the engine.
//!
//! Waits a fixed, purely cosmetic delay, then reads the clock and runs the
//! engine. Calls are independent: overlapping requests each run their own
//! timer and each resolve with their own result.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::engine::{AnalysisResult, PostingTimeEngine};
use crate::snapshot::{Clock, SystemClock};

/// Default "processing" delay before a result is produced.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Triggers delayed analyses of the current time.
#[derive(Clone)]
pub struct AnalysisShell {
    engine: Arc<PostingTimeEngine>,
    clock: Arc<dyn Clock>,
    delay: Duration,
}

impl AnalysisShell {
    /// Shell over the system clock with the default delay.
    pub fn new(engine: PostingTimeEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            clock: Arc::new(SystemClock),
            delay: DEFAULT_DELAY,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn engine(&self) -> &PostingTimeEngine {
        &self.engine
    }

    /// Wait the configured delay, then analyze the clock's current instant.
    pub async fn request_analysis(&self) -> AnalysisResult {
        tracing::debug!(delay_ms = self.delay.as_millis() as u64, "analysis requested");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.engine.analyze(&self.clock.snapshot())
    }

    /// Run [`request_analysis`](Self::request_analysis) on the runtime and
    /// hand the result to `on_complete` when it resolves.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_analysis<F>(&self, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(AnalysisResult) + Send + 'static,
    {
        let shell = self.clone();
        tokio::spawn(async move {
            let result = shell.request_analysis().await;
            on_complete(result);
        })
    }
}

impl std::fmt::Debug for AnalysisShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisShell")
            .field("engine", &self.engine)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::FixedClock;
    use chrono::NaiveDate;

    fn monday(h: u32, m: u32) -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2024, 6, 10)
                .unwrap()
                .and_hms_opt(h, m, 0)
                .unwrap(),
        )
    }

    #[test]
    fn default_delay_is_one_second() {
        let shell = AnalysisShell::new(PostingTimeEngine::default());
        assert_eq!(shell.delay(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn zero_delay_resolves_immediately() {
        let shell = AnalysisShell::new(PostingTimeEngine::default())
            .with_clock(monday(10, 0))
            .with_delay(Duration::ZERO);
        let result = shell.request_analysis().await;
        assert!(result.is_good_time);
        assert_eq!(result.confidence, 100);
    }

    #[tokio::test(start_paused = true)]
    async fn resolves_only_after_delay() {
        let shell = AnalysisShell::new(PostingTimeEngine::default()).with_clock(monday(2, 0));
        let start = tokio::time::Instant::now();
        let result = shell.request_analysis().await;
        assert!(start.elapsed() >= DEFAULT_DELAY);
        assert!(!result.is_good_time);
    }
}
