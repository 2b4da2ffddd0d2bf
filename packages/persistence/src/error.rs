use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Draft store error: {0}")]
    Store(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Remote store error: {0}")]
    Remote(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;
