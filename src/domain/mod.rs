//! Domain Layer
//!
//! Errors, records and panel types.
//! This layer has NO external dependencies (except serde and the log facade).

mod error;
mod panel_type;
mod records;

pub use error::{DomainError, DomainResult};
pub use panel_type::{InitPanelDataFn, MatchFn, PanelType, PanelTypeRegistry};
pub use records::{PanelDto, VisualProps, WorkspaceRecord};
