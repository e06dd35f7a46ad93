//! Error types for the verification pipeline.

/// Classified cause of an operational failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoErrorKind {
    /// No PEM boundary, broken armor, or PEM that is not UTF-8.
    MalformedPem,

    /// PEM label or SPKI algorithm is not RSA.
    NotRsaKey,

    /// DER key structure could not be built into an RSA key.
    MalformedKey,

    /// Re-encoding the key as SPKI DER failed.
    KeyEncoding,

    /// Library failure without a classified cause.
    Unknown,
}

impl CryptoErrorKind {
    /// Stable numeric identifier surfaced to hosts.
    ///
    /// `None` for [`CryptoErrorKind::Unknown`].
    pub fn code(self) -> Option<u32> {
        match self {
            Self::MalformedPem => Some(100),
            Self::NotRsaKey => Some(101),
            Self::MalformedKey => Some(102),
            Self::KeyEncoding => Some(103),
            Self::Unknown => None,
        }
    }
}

/// Operational failure raised by a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct CryptoError {
    pub kind: CryptoErrorKind,
    pub reason: String,
}

impl CryptoError {
    pub fn new(kind: CryptoErrorKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_pem(reason: impl Into<String>) -> Self {
        Self::new(CryptoErrorKind::MalformedPem, reason)
    }

    pub(crate) fn not_rsa(reason: impl Into<String>) -> Self {
        Self::new(CryptoErrorKind::NotRsaKey, reason)
    }

    pub(crate) fn malformed_key(reason: impl Into<String>) -> Self {
        Self::new(CryptoErrorKind::MalformedKey, reason)
    }

    /// Numeric identifier, see [`CryptoErrorKind::code`].
    pub fn code(&self) -> Option<u32> {
        self.kind.code()
    }
}

/// Result type for pipeline stages.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// The failure record of the current call, read at most once.
///
/// Stages hand their error value here instead of leaving it in any shared
/// place, so classification only ever sees the failure of its own call.
#[derive(Debug, Default)]
pub struct PendingError(Option<CryptoError>);

impl PendingError {
    pub fn none() -> Self {
        Self(None)
    }

    /// Drain the record. A second call returns `None`.
    pub fn take(&mut self) -> Option<CryptoError> {
        self.0.take()
    }
}

impl From<CryptoError> for PendingError {
    fn from(err: CryptoError) -> Self {
        Self(Some(err))
    }
}
