pub mod launch;
pub mod resource;
pub mod runtime;
pub mod shared;
pub mod workspace;
