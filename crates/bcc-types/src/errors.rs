use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("codec error: {0}")]
    Codec(String),
}
