use async_trait::async_trait;
use habla_core::{DrillEvent, SinkError};

/// A progress destination that records drill events somewhere.
///
/// Implementations are registered via [`SinkRegistry`](crate::SinkRegistry)
/// and receive every event routed to their session through
/// [`record`](Self::record).
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Returns the sink's plugin name (e.g. `"jsonl"`, `"log"`).
    fn name(&self) -> &str;
    /// One-time initialisation with sink-specific TOML configuration.
    async fn initialize(&mut self, config: toml::Value) -> Result<(), SinkError>;
    /// Record one drill event.
    async fn record(&self, event: &DrillEvent) -> Result<(), SinkError>;
    /// Returns `true` if the sink is currently able to record events.
    fn is_healthy(&self) -> bool;
    /// Gracefully shut down the sink, releasing resources.
    async fn shutdown(&self) -> Result<(), SinkError>;
}
