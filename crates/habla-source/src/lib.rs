pub mod host;
pub mod registry;
pub mod script_source;
pub mod source_trait;
pub mod stdin_source;

pub use host::SourceHost;
pub use registry::SourceRegistry;
pub use script_source::ScriptSource;
pub use source_trait::TranscriptSource;
pub use stdin_source::StdinSource;
