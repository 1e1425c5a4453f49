pub mod badges;
pub mod host;
pub mod jsonl_sink;
pub mod log_sink;
pub mod registry;
pub mod sink_trait;

pub use badges::{default_badges, BadgeLedger};
pub use host::ProgressHost;
pub use jsonl_sink::JsonlSink;
pub use log_sink::LogSink;
pub use registry::SinkRegistry;
pub use sink_trait::ProgressSink;
