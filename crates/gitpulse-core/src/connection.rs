use serde::{Deserialize, Serialize};

/// A persisted connection profile: host plus credential under a label.
///
/// Owned and stored by the calling layer; the engine only ever consumes
/// the url/token pair as run inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedConnection {
    pub id: String,
    pub url: String,
    pub token: String,
    pub label: String,
}
