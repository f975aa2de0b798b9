//! Panel Workspace
//!
//! Layered architecture:
//! - domain: Entities, records and panel types
//! - panel / workspace: Live objects built on the domain records
//! - repository: Persistence abstractions and implementations
//! - config: Workspace and repository settings

pub mod config;
pub mod domain;
pub mod panel;
pub mod repository;
pub mod workspace;

pub use config::{RepositoryConfig, WorkspaceConfig};
pub use domain::{DomainError, DomainResult, PanelDto, PanelType, PanelTypeRegistry, VisualProps};
pub use panel::{Panel, PanelUpdate, Position, Size};
pub use repository::WorkspaceRepository;
pub use workspace::Workspace;
