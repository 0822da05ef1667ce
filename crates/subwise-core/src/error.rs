//! Error types for Subwise

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The analysis engine was invoked before it finished initializing.
    ///
    /// [`AnalysisEngine::new`](crate::analysis::AnalysisEngine::new) is
    /// infallible, so an engine obtained from it never returns this. The
    /// variant exists for hosts that initialize lazily and need a typed
    /// "not ready yet" result to hand back to their UI.
    #[error("Analysis engine is not initialized")]
    EngineUnavailable,

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
