use thiserror::Error;

/// Why a translate call did not produce a translation.
#[derive(Error, Debug)]
pub enum TranslateError {
    /// The backend answered and said `success: false`.
    #[error("{0}")]
    Backend(String),

    /// The request never completed (refused, DNS, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Something answered, but not with the payload we expect.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl TranslateError {
    /// Transport and malformed-body failures both mean "service unreachable" to the user.
    pub fn is_transport(&self) -> bool {
        !matches!(self, TranslateError::Backend(_))
    }
}

impl From<serde_json::Error> for TranslateError {
    fn from(err: serde_json::Error) -> Self {
        TranslateError::MalformedResponse(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("clipboard error: {0}")]
pub struct ClipboardError(pub String);
