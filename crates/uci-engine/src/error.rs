//! Engine error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Engine process error: {0}")]
    Process(String),

    #[error("Engine protocol error: {0}")]
    Protocol(String),
}
