use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{EventSource, EventsPage, ProjectMeta, SourceError};

/// A scripted event source for testing that serves pre-built pages and
/// project metadata, tracks call counts, and injects configurable failures.
pub struct MockEventSource {
    user_id: u64,
    pages: Vec<EventsPage>,
    projects: HashMap<u64, ProjectMeta>,
    auth_fail: bool,
    fail_on_page: Option<usize>,
    projects_fail: bool,
    events_calls: AtomicUsize,
    project_calls: AtomicUsize,
}

impl Default for MockEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEventSource {
    pub fn new() -> Self {
        Self {
            user_id: 1,
            pages: Vec::new(),
            projects: HashMap::new(),
            auth_fail: false,
            fail_on_page: None,
            projects_fail: false,
            events_calls: AtomicUsize::new(0),
            project_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_pages(mut self, pages: Vec<EventsPage>) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_project(mut self, project_id: u64, name: &str, path: &str) -> Self {
        self.projects.insert(
            project_id,
            ProjectMeta {
                name: name.to_string(),
                path: path.to_string(),
            },
        );
        self
    }

    pub fn with_auth_fail(mut self) -> Self {
        self.auth_fail = true;
        self
    }

    /// Fail the given 1-based page request with an HTTP error.
    pub fn with_fail_on_page(mut self, page: usize) -> Self {
        self.fail_on_page = Some(page);
        self
    }

    pub fn with_projects_fail(mut self) -> Self {
        self.projects_fail = true;
        self
    }

    pub fn events_calls(&self) -> usize {
        self.events_calls.load(Ordering::SeqCst)
    }

    pub fn project_calls(&self) -> usize {
        self.project_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventSource for MockEventSource {
    async fn current_user_id(&self) -> Result<u64, SourceError> {
        if self.auth_fail {
            return Err(SourceError::Auth("status 401 Unauthorized".into()));
        }
        Ok(self.user_id)
    }

    async fn events_page(&self, _user_id: u64, page: usize) -> Result<EventsPage, SourceError> {
        self.events_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_page == Some(page) {
            return Err(SourceError::Http("fetching events failed: Bad Gateway".into()));
        }
        Ok(self.pages.get(page - 1).cloned().unwrap_or_default())
    }

    async fn project(&self, project_id: u64) -> Result<ProjectMeta, SourceError> {
        self.project_calls.fetch_add(1, Ordering::SeqCst);
        if self.projects_fail {
            return Err(SourceError::Http(format!("project {project_id}: status 403")));
        }
        self.projects
            .get(&project_id)
            .cloned()
            .ok_or_else(|| SourceError::Http(format!("project {project_id}: status 404")))
    }
}
