use std::collections::HashMap;

use gitpulse_core::{Event, ProjectActivity};
use thiserror::Error;
use tracing::{info, warn};

use crate::source::{gitlab::GitLabSource, EventSource, ProjectMeta, SourceError};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("fill in all fields: {0} is missing")]
    Validation(&'static str),

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// The four scalar inputs of one aggregation run. Dates are plain strings
/// in a lexicographically comparable format (YYYY-MM-DD).
#[derive(Debug, Clone)]
pub struct RunParams {
    pub base_url: String,
    pub token: String,
    pub date_from: String,
    pub date_to: String,
}

impl RunParams {
    /// All four inputs must be non-empty before any network call is made.
    pub fn validate(&self) -> Result<(), RunError> {
        if self.base_url.trim().is_empty() {
            return Err(RunError::Validation("url"));
        }
        if self.token.trim().is_empty() {
            return Err(RunError::Validation("token"));
        }
        if self.date_from.trim().is_empty() {
            return Err(RunError::Validation("date from"));
        }
        if self.date_to.trim().is_empty() {
            return Err(RunError::Validation("date to"));
        }
        Ok(())
    }
}

/// Run one full aggregation against a GitLab instance.
pub async fn run(params: &RunParams) -> Result<Vec<ProjectActivity>, RunError> {
    params.validate()?;
    let source = GitLabSource::new(
        &params.base_url,
        &params.token,
        &params.date_from,
        &params.date_to,
    )?;
    aggregate(&source).await
}

/// Drive the fetch loop over any event source and fold the stream into
/// per-project activity buckets.
///
/// Buckets come back in the order their project id was first seen; events
/// inside each bucket are newest-first. Any source failure other than
/// project-metadata resolution aborts the run and discards partial results.
/// All state is local to the call, so overlapping runs never interfere.
pub async fn aggregate<S>(source: &S) -> Result<Vec<ProjectActivity>, RunError>
where
    S: EventSource + ?Sized,
{
    let user_id = source.current_user_id().await?;

    let mut events: Vec<Event> = Vec::new();
    let mut page = 1;
    loop {
        let batch = source.events_page(user_id, page).await?;
        events.extend(batch.events);
        if !batch.has_more {
            break;
        }
        page += 1;
    }
    info!(user_id, pages = page, count = events.len(), "fetched events");

    // Group in arrival order; metadata is fetched once per project id and
    // the result kept for the remainder of the run.
    let mut index: HashMap<u64, usize> = HashMap::new();
    let mut buckets: Vec<ProjectActivity> = Vec::new();
    for event in events {
        let slot = match index.get(&event.project_id).copied() {
            Some(slot) => slot,
            None => {
                let meta = resolve_project(source, event.project_id).await;
                buckets.push(ProjectActivity::new(event.project_id, meta.name, meta.path));
                index.insert(event.project_id, buckets.len() - 1);
                buckets.len() - 1
            }
        };
        buckets[slot].record(event);
    }

    for bucket in &mut buckets {
        bucket.sort_events();
    }
    info!(projects = buckets.len(), "aggregation complete");

    Ok(buckets)
}

/// Resolve project metadata, degrading to synthesized defaults on failure
/// so that restricted metadata permissions never abort a run.
async fn resolve_project<S>(source: &S, project_id: u64) -> ProjectMeta
where
    S: EventSource + ?Sized,
{
    match source.project(project_id).await {
        Ok(meta) => meta,
        Err(e) => {
            warn!(project_id, "metadata unavailable, using fallback: {e}");
            ProjectMeta {
                name: format!("Project {project_id}"),
                path: project_id.to_string(),
            }
        }
    }
}
