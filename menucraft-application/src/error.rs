use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("menu '{0}' was not found")]
    MenuNotFound(String),
    #[error("viewer '{0}' is not connected")]
    ViewerOffline(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
