pub mod config;
pub mod error;
pub mod story;
pub mod types;

pub use config::{AppConfig, BadgeConfig, DeckConfig, SinkRouteConfig, SourceConfig};
pub use error::{ConfigError, SessionError, SinkError, SourceError};
pub use story::{paginate, Story, StoryPage};
pub use types::{
    BadgeAward, DrillEvent, GradedAnswer, RecognitionResult, SessionSummary, WordCard,
};
