/// Convenience result type used across qrforge.
pub type QrForgeResult<T> = Result<T, QrForgeError>;

/// Which input image a [`QrForgeError::SourceDecode`] refers to.
///
/// Multi-image operations (logo embed, photo blend) must report which of
/// their inputs failed; callers surface different messages for a broken
/// user upload than for a broken QR raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// The user-supplied photograph.
    UserPhoto,
    /// The rendered (or re-loaded) QR raster.
    QrImage,
    /// The user-supplied logo overlay.
    Logo,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SourceKind::UserPhoto => "user photo",
            SourceKind::QrImage => "qr image",
            SourceKind::Logo => "logo",
        };
        f.write_str(s)
    }
}

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum QrForgeError {
    /// Invalid user-provided options or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// The payload could not be encoded into a QR matrix.
    #[error("encode error: {0}")]
    Encode(String),

    /// An input image failed to load or decode.
    #[error("{kind} failed to decode: {reason}")]
    SourceDecode {
        /// Which input image failed.
        kind: SourceKind,
        /// Decoder-reported reason.
        reason: String,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QrForgeError {
    /// Build a [`QrForgeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`QrForgeError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`QrForgeError::SourceDecode`] value.
    pub fn source_decode(kind: SourceKind, reason: impl Into<String>) -> Self {
        Self::SourceDecode {
            kind,
            reason: reason.into(),
        }
    }
}
