use thiserror::Error;
use unifut_core::LeagueError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save format version {found} is not supported (expected {expected})")]
    Version { found: u32, expected: u32 },

    #[error("corrupt save entity: {0}")]
    Entity(String),

    #[error("saved league cannot be scheduled: {0}")]
    League(#[from] LeagueError),
}
