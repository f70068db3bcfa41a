pub mod command;
pub mod plan;
pub mod ports;

pub use command::{render_flow_command, render_unit_command, LAUNCH_PROGRAM, WORKSPACE_MOUNT};
pub use plan::{prepare_flow, prepare_unit, LaunchPlan, PrepareError};
pub use ports::{flow_port_bindings, resolve_port_bindings};

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("unknown role type `{keyword}`")]
    UnknownRole { keyword: String },
    #[error("unknown socket type `{keyword}`")]
    UnknownSocket { keyword: String },
    #[error("failed to read flow definition {path}: {source}")]
    FlowRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid flow definition {path}: {source}")]
    FlowParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
