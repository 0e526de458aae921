//! Outbreak risk analysis: the fetch → prompt → narrate → classify chain and
//! the dashboard state it feeds.

pub mod alert;
pub mod cycle;
pub mod error;
pub mod prompt;
pub mod season;
pub mod session;
pub mod state;
pub mod story;

pub use alert::{classify, AlertLevel};
pub use cycle::{AnalysisCycle, AnalysisMode, CycleReport};
pub use error::AnalysisError;
pub use prompt::{environment_prompt, news_prompt};
pub use season::Season;
pub use session::Session;
pub use state::{DashboardState, UiState, View};
pub use story::{StoryMode, STORY_STEPS};
