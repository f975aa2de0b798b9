//! Persisted Records
//!
//! Plain data shapes handed to and from a repository.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Display properties of a panel, keyed by property name
pub type VisualProps = Map<String, Value>;

/// Serialized form of a panel: `{ id, typeId, vprops }`
///
/// Missing fields decode to their defaults, so a partial document restores
/// an unnamed panel with no properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelDto {
    pub id: Option<String>,
    #[serde(rename = "typeId")]
    pub type_id: String,
    pub vprops: VisualProps,
}

/// Serialized form of a workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceRecord {
    pub id: String,
    pub name: String,
    /// Epoch milliseconds of the last save
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<i64>,
}

impl WorkspaceRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            updated_at: None,
        }
    }
}
