//! Error taxonomy shared by the search engine, preference store and export.

/// Errors produced by the college search client.
///
/// Search and details lookups never surface the first three variants to the
/// user: they switch to the local fallback instead (see
/// [`AppError::triggers_fallback`]). Connectivity checks and seeding report
/// them verbatim.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("Backend responded with status {code}: {message}")]
    BadResponseStatus { code: u16, message: String },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("No colleges found")]
    NoResultsFound,

    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkUnavailable(message.into())
    }

    /// Builds a status error; without a message from the backend the
    /// canonical reason phrase is used.
    pub fn bad_status(code: u16, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| {
            reqwest::StatusCode::from_u16(code)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("unknown status")
                .to_string()
        });
        Self::BadResponseStatus { code, message }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPayload(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Returns true for remote failures that the resolver answers with the
    /// local fallback filter.
    pub fn triggers_fallback(&self) -> bool {
        matches!(
            self,
            Self::NetworkUnavailable(_) | Self::BadResponseStatus { .. } | Self::MalformedPayload(_)
        )
    }

    /// Short machine-readable label, used as a metrics label and in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NetworkUnavailable(_) => "network_unavailable",
            Self::BadResponseStatus { .. } => "bad_response_status",
            Self::MalformedPayload(_) => "malformed_payload",
            Self::NoResultsFound => "no_results",
            Self::Validation(_) => "validation_error",
            Self::Storage(_) => "storage_error",
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return AppError::malformed(e.to_string());
        }
        if let Some(status) = e.status() {
            return AppError::bad_status(status.as_u16(), None);
        }
        AppError::network(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::storage(e.to_string())
    }
}
