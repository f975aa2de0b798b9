//! Configuration
//!
//! JSON-loadable settings for workspaces and the in-memory repository.
//! Every field is optional in the document; absent fields keep their defaults.
//!
//! ```json
//! { "default_panel_width": 320.0, "default_panel_height": 240.0 }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::DomainResult;

/// Settings applied by a [`Workspace`](crate::Workspace)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Width given to panels created through the workspace
    pub default_panel_width: f64,
    /// Height given to panels created through the workspace
    pub default_panel_height: f64,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            default_panel_width: 400.0,
            default_panel_height: 300.0,
        }
    }
}

impl WorkspaceConfig {
    pub fn from_json(json: &str) -> DomainResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Settings for [`InMemoryWorkspaceRepository`](crate::repository::InMemoryWorkspaceRepository)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    pub workspace_id_prefix: String,
    pub panel_id_prefix: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            workspace_id_prefix: "workspace-".to_string(),
            panel_id_prefix: "panel-".to_string(),
        }
    }
}

impl RepositoryConfig {
    pub fn from_json(json: &str) -> DomainResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
