use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("malformed annotation JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
