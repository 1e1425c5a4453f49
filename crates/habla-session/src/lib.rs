pub mod prompt_cache;
pub mod session;

pub use prompt_cache::PromptCache;
pub use session::{DrillSession, Outcome};
