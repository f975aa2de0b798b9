//! Repository Layer - Core Traits
//!
//! Defines the abstract interface for workspace and panel persistence.
//! Implementations can use a database, in-memory maps, etc.

use async_trait::async_trait;

use crate::domain::{DomainResult, PanelDto, WorkspaceRecord};

/// Persistence for workspaces and the panels inside them
///
/// All operations are async to support various backends.
#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// Create a new workspace; the backend assigns its id
    async fn create_workspace(&self, name: &str) -> DomainResult<WorkspaceRecord>;

    /// Insert or update a workspace
    async fn save_workspace(&self, workspace: &WorkspaceRecord) -> DomainResult<WorkspaceRecord>;

    /// Find workspace by ID
    async fn get_workspace(&self, id: &str) -> DomainResult<Option<WorkspaceRecord>>;

    /// Create an empty panel of the given type; the backend assigns its id
    async fn create_panel(&self, workspace_id: &str, type_id: &str) -> DomainResult<PanelDto>;

    /// Insert or update a serialized panel
    async fn save_panel(&self, workspace_id: &str, panel: &PanelDto) -> DomainResult<PanelDto>;

    /// Find panel by ID within a workspace
    async fn get_panel(&self, workspace_id: &str, panel_id: &str) -> DomainResult<Option<PanelDto>>;
}
