use sea_orm::DbErr;
use thiserror::Error;

/// Everything that can go wrong while processing a scan, in the order the
/// pipeline can produce it.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scanned name is not in the configured zone table. Rejected before
    /// the state machine runs.
    #[error("unknown zone '{0}'")]
    UnknownZone(String),

    /// Legal scan, illegal sequence (interior zone without entering first).
    /// Reported to the requester only, never broadcast.
    #[error("{0}")]
    AccessDenied(String),

    /// The employee could not be resolved. No state change.
    #[error("employee not found")]
    EmployeeNotFound,

    /// Persistence failure during close/open/update. Logged server-side; the
    /// whole scan is safe to retry.
    #[error("storage failure: {0}")]
    Store(#[from] DbErr),
}

impl ScanError {
    pub fn access_denied(message: impl Into<String>) -> Self {
        ScanError::AccessDenied(message.into())
    }

    /// Stable machine-readable reason code for clients.
    pub fn reason(&self) -> &'static str {
        match self {
            ScanError::UnknownZone(_) => "VALIDATION_ERROR",
            ScanError::AccessDenied(_) => "ACCESS_DENIED",
            ScanError::EmployeeNotFound => "NOT_FOUND",
            ScanError::Store(_) => "STORE_ERROR",
        }
    }

    /// Message suitable for the requesting client. Store details stay in the
    /// server log.
    pub fn public_message(&self) -> String {
        match self {
            ScanError::Store(_) => "Scan could not be recorded, please try again".into(),
            other => other.to_string(),
        }
    }
}
