//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod memory_repo;
mod unsupported;


pub use traits::WorkspaceRepository;
pub use memory_repo::InMemoryWorkspaceRepository;
pub use unsupported::UnsupportedRepository;
