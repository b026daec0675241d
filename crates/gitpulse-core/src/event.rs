use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded user action against a project, as returned by
/// `GET /api/v4/users/:id/events`.
///
/// Only `id`, `project_id`, `action_name` and `created_at` are guaranteed
/// by the API; every other field depends on the action/target combination
/// and must be treated as possibly absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub project_id: u64,
    pub action_name: String,
    #[serde(default)]
    pub target_type: Option<String>,
    #[serde(default)]
    pub target_id: Option<u64>,
    /// Project-scoped counterpart of `target_id`. Issues and merge requests
    /// are addressed by iid in the web UI, so links use this one.
    #[serde(default)]
    pub target_iid: Option<u64>,
    #[serde(default)]
    pub target_title: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub push_data: Option<PushData>,
    #[serde(default)]
    pub target: Option<EventTarget>,
    #[serde(default)]
    pub note: Option<Note>,
}

impl Event {
    /// Best-effort title: the flat `target_title` field when present,
    /// otherwise the nested target object's title.
    pub fn title(&self) -> Option<&str> {
        self.target_title
            .as_deref()
            .or_else(|| self.target.as_ref().and_then(|t| t.title.as_deref()))
    }

    pub fn target_type(&self) -> Option<&str> {
        self.target_type.as_deref()
    }
}

/// Push payload attached to `action_name == "pushed"` events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushData {
    #[serde(default)]
    pub commit_count: Option<u64>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub ref_type: Option<String>,
    #[serde(default)]
    pub commit_from: Option<String>,
    #[serde(default)]
    pub commit_to: Option<String>,
    #[serde(rename = "ref", default)]
    pub ref_name: Option<String>,
    #[serde(default)]
    pub commit_title: Option<String>,
}

/// Nested target object some event payloads carry alongside the flat fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventTarget {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
}

/// Note payload for comment events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub body: Option<String>,
}
