pub type GlyphcastResult<T> = Result<T, GlyphcastError>;

#[derive(thiserror::Error, Debug)]
pub enum GlyphcastError {
    /// The source bytes could not be obtained (missing file, network failure,
    /// HTTP error status).
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// The source bytes were obtained but are not a decodable animation.
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// The caller-supplied conversion options are unusable.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// The conversion was cancelled between frames via a `CancelToken`.
    #[error("conversion cancelled")]
    Cancelled,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphcastError {
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    pub fn decode_failure(msg: impl Into<String>) -> Self {
        Self::DecodeFailure(msg.into())
    }

    pub fn invalid_options(msg: impl Into<String>) -> Self {
        Self::InvalidOptions(msg.into())
    }
}
