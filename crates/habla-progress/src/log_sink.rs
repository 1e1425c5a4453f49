use crate::sink_trait::ProgressSink;
use async_trait::async_trait;
use habla_core::{DrillEvent, SinkError};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Emits drill events through `tracing` — the default sink when no file
/// destination is configured.
pub struct LogSink {
    record_count: AtomicUsize,
}

impl LogSink {
    pub fn new() -> Self {
        Self {
            record_count: AtomicUsize::new(0),
        }
    }

    pub fn record_count(&self) -> usize {
        self.record_count.load(Ordering::Relaxed)
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgressSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    async fn initialize(&mut self, _config: toml::Value) -> Result<(), SinkError> {
        Ok(())
    }

    async fn record(&self, event: &DrillEvent) -> Result<(), SinkError> {
        match event {
            DrillEvent::Graded(g) => tracing::info!(
                session_id = %g.session_id,
                word = %g.word,
                correct = g.correct,
                attempt = g.attempt,
                "graded '{}'",
                g.spoken,
            ),
            DrillEvent::Badge(b) => tracing::info!(
                session_id = %b.session_id,
                badge_id = %b.badge_id,
                threshold = b.threshold,
                "badge earned: {}",
                b.badge_name,
            ),
            DrillEvent::Summary(s) => tracing::info!(
                session_id = %s.session_id,
                "session complete: {}/{} correct in {} attempts",
                s.words_correct,
                s.words_total,
                s.attempts_total,
            ),
        }
        self.record_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        true
    }

    async fn shutdown(&self) -> Result<(), SinkError> {
        Ok(())
    }
}
