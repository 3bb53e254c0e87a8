#![deny(unsafe_code)]

pub mod error;
pub mod hash;
pub mod manifest;
pub mod paths;
pub mod registry;

pub use crate::error::StandardsError;
pub use crate::paths::{SCHEMAS_ENV_VAR, schemas_override};
pub use crate::registry::{SchemaRegistry, SchemaSource};
