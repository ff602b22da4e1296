//! Error types for the block registry

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Block type registered twice: {0}")]
    DuplicateType(String),

    #[error("Unknown block type: {0}")]
    UnknownType(String),
}
