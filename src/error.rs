use thiserror::Error;

/// Result type alias for tracker construction.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors raised while setting up a tracker.
///
/// Per-frame tracking itself never fails; these only surface from
/// configuration checks.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    #[error("invalid tracker configuration: `{field}` {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
}

impl TrackerError {
    pub(crate) fn invalid_config<S: Into<String>>(field: &'static str, reason: S) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
