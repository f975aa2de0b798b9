//! Unsupported Repository
//!
//! A backing store that rejects every operation. Useful where a workspace
//! is needed as a container but nothing is ever persisted.

use async_trait::async_trait;

use crate::domain::{DomainError, DomainResult, PanelDto, WorkspaceRecord};
use super::traits::WorkspaceRepository;

#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedRepository;

fn unsupported<T>(operation: &str) -> DomainResult<T> {
    Err(DomainError::Unsupported(operation.to_string()))
}

#[async_trait]
impl WorkspaceRepository for UnsupportedRepository {
    async fn create_workspace(&self, _name: &str) -> DomainResult<WorkspaceRecord> {
        unsupported("create_workspace")
    }

    async fn save_workspace(&self, _workspace: &WorkspaceRecord) -> DomainResult<WorkspaceRecord> {
        unsupported("save_workspace")
    }

    async fn get_workspace(&self, _id: &str) -> DomainResult<Option<WorkspaceRecord>> {
        unsupported("get_workspace")
    }

    async fn create_panel(&self, _workspace_id: &str, _type_id: &str) -> DomainResult<PanelDto> {
        unsupported("create_panel")
    }

    async fn save_panel(&self, _workspace_id: &str, _panel: &PanelDto) -> DomainResult<PanelDto> {
        unsupported("save_panel")
    }

    async fn get_panel(&self, _workspace_id: &str, _panel_id: &str) -> DomainResult<Option<PanelDto>> {
        unsupported("get_panel")
    }
}
