use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid box: negative size {width}x{height}")]
    InvalidBox { width: f32, height: f32 },

    #[error("Invalid box: non-finite coordinates")]
    NonFiniteBox,

    #[error("Invalid frame height: {0}")]
    InvalidFrameHeight(u32),

    #[error("Track {0} not found")]
    NotFound(u32),

    #[error("Track ids exhausted")]
    IdsExhausted,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Frame queue is full ({capacity} frames)")]
    QueueFull { capacity: usize },

    #[error("Frame {index} arrived after frame {expected} was expected")]
    StaleFrame { index: u64, expected: u64 },

    #[error("Frame {0} is already queued")]
    DuplicateFrame(u64),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
}
