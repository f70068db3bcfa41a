pub mod coordinator;
pub mod paths;
pub mod store;

pub use coordinator::{build_channel, BuildCoordinator, BuildTask};
pub use paths::WorkspacePaths;
pub use store::{WorkspaceError, WorkspaceRecord, WorkspaceState, WorkspaceStore};
