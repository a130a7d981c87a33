use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("news store {} is unavailable: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: StorageFault,
    },
    #[error("no news item with id {0}")]
    NotFound(u64),
}

#[derive(Debug, Error)]
pub enum StorageFault {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed news json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NewsError>;
