use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Per-project activity counts keyed by `"{action_name}_{target_type}"`,
/// with the literal `"null"` standing in for an absent target type.
///
/// Iteration order is insertion order, which downstream chart shaping
/// relies on, so the backing store is a vec of pairs rather than a map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tally(Vec<(String, u64)>);

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some((_, count)) => *count += 1,
            None => self.0.push((key.to_string(), 1)),
        }
    }

    pub fn get(&self, key: &str) -> u64 {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts; equals the number of events tallied.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, v)| v).sum()
    }
}

/// Tally key for one event: `"{action_name}_{target_type}"`, with absent
/// target types rendered as the literal `"null"`.
pub fn tally_key(event: &Event) -> String {
    format!(
        "{}_{}",
        event.action_name,
        event.target_type.as_deref().unwrap_or("null")
    )
}

/// Everything observed for one project during a single aggregation run.
///
/// Created the first time an event for the project id is seen; events end
/// up newest-first once the run completes. A new run replaces these
/// wholesale rather than updating them incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectActivity {
    pub project_id: u64,
    pub project_name: String,
    /// Namespaced path used to build links; falls back to the stringified
    /// project id when metadata could not be resolved.
    pub project_path: String,
    pub events: Vec<Event>,
    pub tally: Tally,
}

impl ProjectActivity {
    pub fn new(project_id: u64, project_name: String, project_path: String) -> Self {
        Self {
            project_id,
            project_name,
            project_path,
            events: Vec::new(),
            tally: Tally::new(),
        }
    }

    /// Append an event and count it under its tally key.
    pub fn record(&mut self, event: Event) {
        self.tally.increment(&tally_key(&event));
        self.events.push(event);
    }

    /// Order events newest-first. Stable, so equal timestamps keep their
    /// arrival order.
    pub fn sort_events(&mut self) {
        self.events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}
