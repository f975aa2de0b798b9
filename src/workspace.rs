//! Workspace
//!
//! A named container of panels backed by a [`WorkspaceRepository`].
//! Panels hold a weak back-reference to it, so workspaces are always
//! handed out behind an `Arc`.

use std::sync::Arc;

use serde_json::Value;

use crate::config::WorkspaceConfig;
use crate::domain::{DomainError, DomainResult, PanelType, VisualProps, WorkspaceRecord};
use crate::panel::{Panel, PanelUpdate, HEIGHT, WIDTH};
use crate::repository::WorkspaceRepository;

pub struct Workspace {
    id: String,
    name: String,
    repository: Arc<dyn WorkspaceRepository>,
    config: WorkspaceConfig,
}

impl Workspace {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        repository: Arc<dyn WorkspaceRepository>,
    ) -> Arc<Self> {
        Self::with_config(id, name, repository, WorkspaceConfig::default())
    }

    pub fn with_config(
        id: impl Into<String>,
        name: impl Into<String>,
        repository: Arc<dyn WorkspaceRepository>,
        config: WorkspaceConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: id.into(),
            name: name.into(),
            repository,
            config,
        })
    }

    /// Create a new workspace record; the repository assigns the id.
    pub async fn create(
        repository: Arc<dyn WorkspaceRepository>,
        name: &str,
        config: WorkspaceConfig,
    ) -> DomainResult<Arc<Self>> {
        let record = repository.create_workspace(name).await?;
        log::debug!("Created workspace {} ({})", record.id, record.name);
        Ok(Self::with_config(record.id, record.name, repository, config))
    }

    /// Open a previously created workspace.
    pub async fn load(
        repository: Arc<dyn WorkspaceRepository>,
        id: &str,
        config: WorkspaceConfig,
    ) -> DomainResult<Arc<Self>> {
        let record = repository
            .get_workspace(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("workspace {}", id)))?;
        Ok(Self::with_config(record.id, record.name, repository, config))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn repository(&self) -> &Arc<dyn WorkspaceRepository> {
        &self.repository
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn to_record(&self) -> WorkspaceRecord {
        WorkspaceRecord::new(self.id.clone(), self.name.clone())
    }

    pub async fn save(&self) -> DomainResult<WorkspaceRecord> {
        let mut record = self.to_record();
        record.updated_at = Some(chrono::Local::now().timestamp_millis());
        self.repository.save_workspace(&record).await
    }

    /// Create and persist a panel of `panel_type` showing `data`.
    ///
    /// The panel starts at the configured default size, then receives the
    /// type's initial data. Seeding does not call `on_update`.
    pub async fn create_panel<F>(
        self: &Arc<Self>,
        panel_type: Arc<PanelType>,
        data: &Value,
        on_update: F,
    ) -> DomainResult<Panel>
    where
        F: FnMut(&PanelUpdate) + Send + Sync + 'static,
    {
        let dto = self
            .repository
            .create_panel(&self.id, &panel_type.id)
            .await?;

        let mut seed = VisualProps::new();
        seed.insert(WIDTH.to_string(), Value::from(self.config.default_panel_width));
        seed.insert(HEIGHT.to_string(), Value::from(self.config.default_panel_height));
        seed.extend(panel_type.init_panel_data(data));

        let mut panel = Panel::new(dto.id, panel_type, self, on_update);
        panel.seed(seed);
        self.save_panel(&panel).await?;

        log::debug!("Created panel {:?} in workspace {}", panel.id(), self.id);
        Ok(panel)
    }

    pub async fn save_panel(&self, panel: &Panel) -> DomainResult<()> {
        if panel.id().is_none() {
            return Err(DomainError::InvalidInput("Cannot save a panel without an id".into()));
        }
        let dto = panel.serialize();
        self.repository.save_panel(&self.id, &dto).await?;
        Ok(())
    }

    /// Rebuild a stored panel, wiring it to `panel_type` and `on_update`.
    pub async fn load_panel<F>(
        self: &Arc<Self>,
        panel_id: &str,
        panel_type: Arc<PanelType>,
        on_update: F,
    ) -> DomainResult<Panel>
    where
        F: FnMut(&PanelUpdate) + Send + Sync + 'static,
    {
        let dto = self
            .repository
            .get_panel(&self.id, panel_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("panel {}", panel_id)))?;

        let mut panel = Panel::new(None, panel_type, self, on_update);
        panel.deserialize(dto);
        Ok(panel)
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
