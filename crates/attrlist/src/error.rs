use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttrError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported language index: {0}")]
    UnsupportedLanguage(usize),
}

pub type Result<T> = std::result::Result<T, AttrError>;
