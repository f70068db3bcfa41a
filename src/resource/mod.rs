pub mod model;
pub mod validate;

pub use model::{
    FlowParams, PortChannel, RoleType, SocketType, UnitKind, UnitParams, PORT_CHANNELS,
};
pub use validate::{
    normalize_unit, validate_flow_file, ValidateError, CONTAINER_HOST_GATEWAY,
};
