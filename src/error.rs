use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("failed to load model from {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to allocate tensors")]
    Allocate {
        #[source]
        source: anyhow::Error,
    },
    #[error("tensors are not allocated, call allocate() before reading details")]
    NotAllocated,
    #[error("tensor index {index} out of range: model has {len} tensors")]
    TensorIndexOutOfRange { index: usize, len: usize },
    #[error("malformed graph: {0}")]
    MalformedGraph(String),
    #[error("invalid config {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to render details: {0}")]
    Render(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InspectError>;
