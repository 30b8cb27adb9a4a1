use thiserror::Error;

#[derive(Debug, Error)]
pub enum LatticeError {
    #[error("auxiliary levels are already initialized")]
    AlreadyInitialized,
    #[error("auxiliary levels are not initialized")]
    NotInitialized,
    #[error("expected {expected} footprints, got {actual}")]
    LevelCountMismatch { expected: usize, actual: usize },
    #[error("level {level} out of range for {count} auxiliary levels")]
    LevelOutOfRange { level: usize, count: usize },
    #[error("out of bounds: {0}")]
    OutOfBounds(String),
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
