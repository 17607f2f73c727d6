#[derive(Debug, thiserror::Error)]
pub enum NutriGuardError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Offline mode is enabled")]
    Offline,

    /// The backend has no such resource (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl NutriGuardError {
    /// True for failures that came from talking to the backend rather than
    /// from local state.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            NutriGuardError::Http(_)
                | NutriGuardError::Status { .. }
                | NutriGuardError::NotFound(_)
                | NutriGuardError::Offline
        )
    }
}

pub type Result<T> = std::result::Result<T, NutriGuardError>;
