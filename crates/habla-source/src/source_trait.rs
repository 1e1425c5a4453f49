use async_trait::async_trait;
use habla_core::{RecognitionResult, SourceError};
use tokio::sync::mpsc;

/// A producer of speech-recognition transcripts for the drill loop.
///
/// Implementations are registered via [`SourceRegistry`](crate::SourceRegistry)
/// and emit [`RecognitionResult`]s through the sender passed to
/// [`run`](Self::run). The host stamps `source_id` on every emitted result, so
/// sources may leave it empty.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Returns the source's plugin name (e.g. `"stdin"`, `"script"`).
    fn name(&self) -> &str;
    /// One-time initialisation with source-specific TOML configuration.
    async fn initialize(&mut self, config: toml::Value) -> Result<(), SourceError>;
    /// Produce results until exhausted or the receiver is dropped.
    async fn run(
        &self,
        sender: mpsc::UnboundedSender<RecognitionResult>,
    ) -> Result<(), SourceError>;
    /// Gracefully shut down the source, releasing resources.
    async fn shutdown(&self) -> Result<(), SourceError>;
}
