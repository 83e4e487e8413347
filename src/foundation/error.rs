/// Convenience result type used across framecraft.
pub type FramecraftResult<T> = Result<T, FramecraftError>;

/// Top-level error taxonomy used by every transform and the codec boundary.
#[derive(thiserror::Error, Debug)]
pub enum FramecraftError {
    /// Caller-supplied value is out of range (bad multiplier, bad ratio, malformed color).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation does not apply to this input (e.g. changing the speed of a still image).
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Malformed or unsupported input bytes.
    #[error("decode error: {0}")]
    Decode(String),

    /// The encoder rejected the frame sequence.
    #[error("encode error: {0}")]
    Encode(String),

    /// The adaptive compressor ran out of iterations or hit its dimension/frame floors.
    #[error("compression impossible: {0}")]
    CompressionImpossible(String),

    /// The caller cancelled the operation (or its deadline passed).
    #[error("operation cancelled")]
    Cancelled,

    /// Invalid configuration file or value.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramecraftError {
    /// Build a [`FramecraftError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`FramecraftError::UnsupportedOperation`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedOperation(msg.into())
    }

    /// Build a [`FramecraftError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`FramecraftError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`FramecraftError::CompressionImpossible`] value.
    pub fn compression_impossible(msg: impl Into<String>) -> Self {
        Self::CompressionImpossible(msg.into())
    }

    /// Build a [`FramecraftError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
