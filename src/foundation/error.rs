/// Convenience result type used across animblit.
pub type BlitResult<T> = Result<T, BlitError>;

/// Error taxonomy for the fallible edges of the blitter.
///
/// Drawing itself is infallible: sprite data and draw parameters are trusted. Errors only
/// come from building inputs (encoding, targets, settings) and from external region buffers.
#[derive(thiserror::Error, Debug)]
pub enum BlitError {
    /// Raw sprite data could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// Image bytes could not be turned into a raw sprite.
    #[error("decode error: {0}")]
    Decode(String),

    /// Render target or region buffer geometry is inconsistent.
    #[error("region error: {0}")]
    Region(String),

    /// Invalid settings or unknown enumerated values.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlitError {
    /// Build a [`BlitError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`BlitError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`BlitError::Region`] value.
    pub fn region(msg: impl Into<String>) -> Self {
        Self::Region(msg.into())
    }

    /// Build a [`BlitError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
