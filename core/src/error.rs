use thiserror::Error;

/// Boundary errors only. Projection math never fails — malformed numeric
/// input coerces to a default instead (see `types`). These variants cover
/// the JSON edge where profiles and configs enter the workspace.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Profile error: {0}")]
    Profile(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
