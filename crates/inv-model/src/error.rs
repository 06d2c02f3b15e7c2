use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("unknown manual edit policy: {0}")]
    UnknownEditPolicy(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
