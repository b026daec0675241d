pub mod gitlab;
pub mod mock;

use async_trait::async_trait;
use gitpulse_core::Event;
use thiserror::Error;

/// Events are requested in fixed batches of this size.
pub const PAGE_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid credential or unreachable host: {0}")]
    Auth(String),

    #[error("{0}")]
    Http(String),

    #[error("request failed: {0}")]
    Transport(String),
}

/// One page of events plus whether another page should be requested.
#[derive(Debug, Clone, Default)]
pub struct EventsPage {
    pub events: Vec<Event>,
    pub has_more: bool,
}

/// Display metadata for a project.
#[derive(Debug, Clone)]
pub struct ProjectMeta {
    pub name: String,
    pub path: String,
}

/// Where the aggregator gets its data. The real implementation talks to a
/// GitLab instance; tests script pages and failures through the mock.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Resolve the id of the user the credential belongs to.
    async fn current_user_id(&self) -> Result<u64, SourceError>;

    /// Fetch one page (1-based) of the user's events within the source's
    /// date range.
    async fn events_page(&self, user_id: u64, page: usize) -> Result<EventsPage, SourceError>;

    /// Fetch display metadata for a project.
    async fn project(&self, project_id: u64) -> Result<ProjectMeta, SourceError>;
}
