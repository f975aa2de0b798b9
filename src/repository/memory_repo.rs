//! In-Memory Workspace Repository
//!
//! Map-backed implementation of WorkspaceRepository. Ids are handed out
//! sequentially with the prefixes from [`RepositoryConfig`].

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::config::RepositoryConfig;
use crate::domain::{DomainError, DomainResult, PanelDto, WorkspaceRecord};
use super::traits::WorkspaceRepository;

#[derive(Default)]
struct Store {
    workspaces: HashMap<String, WorkspaceRecord>,
    /// workspace id -> panel id -> panel
    panels: HashMap<String, HashMap<String, PanelDto>>,
    next_workspace: u64,
    next_panel: u64,
}

pub struct InMemoryWorkspaceRepository {
    store: Mutex<Store>,
    config: RepositoryConfig,
}

impl InMemoryWorkspaceRepository {
    pub fn new(config: RepositoryConfig) -> Self {
        Self {
            store: Mutex::new(Store::default()),
            config,
        }
    }

    pub async fn workspace_count(&self) -> usize {
        self.store.lock().await.workspaces.len()
    }

    pub async fn panel_count(&self, workspace_id: &str) -> usize {
        self.store
            .lock()
            .await
            .panels
            .get(workspace_id)
            .map_or(0, HashMap::len)
    }
}

impl Default for InMemoryWorkspaceRepository {
    fn default() -> Self {
        Self::new(RepositoryConfig::default())
    }
}

fn workspace_not_found(id: &str) -> DomainError {
    DomainError::NotFound(format!("workspace {}", id))
}

#[async_trait]
impl WorkspaceRepository for InMemoryWorkspaceRepository {
    async fn create_workspace(&self, name: &str) -> DomainResult<WorkspaceRecord> {
        let mut store = self.store.lock().await;
        store.next_workspace += 1;
        let id = format!("{}{}", self.config.workspace_id_prefix, store.next_workspace);

        let mut record = WorkspaceRecord::new(id.clone(), name);
        record.updated_at = Some(chrono::Local::now().timestamp_millis());

        store.workspaces.insert(id.clone(), record.clone());
        store.panels.entry(id).or_default();
        Ok(record)
    }

    async fn save_workspace(&self, workspace: &WorkspaceRecord) -> DomainResult<WorkspaceRecord> {
        let mut store = self.store.lock().await;
        if !store.workspaces.contains_key(&workspace.id) {
            log::debug!("Inserting workspace {} on save", workspace.id);
        }
        store.workspaces.insert(workspace.id.clone(), workspace.clone());
        store.panels.entry(workspace.id.clone()).or_default();
        Ok(workspace.clone())
    }

    async fn get_workspace(&self, id: &str) -> DomainResult<Option<WorkspaceRecord>> {
        let store = self.store.lock().await;
        Ok(store.workspaces.get(id).cloned())
    }

    async fn create_panel(&self, workspace_id: &str, type_id: &str) -> DomainResult<PanelDto> {
        let mut store = self.store.lock().await;
        if !store.workspaces.contains_key(workspace_id) {
            return Err(workspace_not_found(workspace_id));
        }

        store.next_panel += 1;
        let id = format!("{}{}", self.config.panel_id_prefix, store.next_panel);
        let dto = PanelDto {
            id: Some(id.clone()),
            type_id: type_id.to_string(),
            ..PanelDto::default()
        };

        store
            .panels
            .entry(workspace_id.to_string())
            .or_default()
            .insert(id, dto.clone());
        Ok(dto)
    }

    async fn save_panel(&self, workspace_id: &str, panel: &PanelDto) -> DomainResult<PanelDto> {
        let id = panel
            .id
            .clone()
            .ok_or_else(|| DomainError::InvalidInput("Panel has no id".to_string()))?;

        let mut store = self.store.lock().await;
        if !store.workspaces.contains_key(workspace_id) {
            return Err(workspace_not_found(workspace_id));
        }

        store
            .panels
            .entry(workspace_id.to_string())
            .or_default()
            .insert(id, panel.clone());
        Ok(panel.clone())
    }

    async fn get_panel(&self, workspace_id: &str, panel_id: &str) -> DomainResult<Option<PanelDto>> {
        let store = self.store.lock().await;
        Ok(store
            .panels
            .get(workspace_id)
            .and_then(|panels| panels.get(panel_id))
            .cloned())
    }
}
