//! Media control error types.

use thiserror::Error;

/// Errors that can occur while sending a media play/pause toggle.
///
/// All of them are recoverable: the break goes ahead without pausing media.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// Media key injection is not implemented for this platform.
    #[error("media key injection is not supported on {0}")]
    Unsupported(&'static str),

    /// The OS rejected or only partly delivered the key events.
    #[error("failed to dispatch media key: {0}")]
    DispatchFailed(String),
}

impl MediaError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Unsupported(_) => "pause media manually during breaks",
            Self::DispatchFailed(_) => {
                "another application may be blocking synthetic input; pause media manually"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MediaError::Unsupported("linux");
        assert_eq!(err.to_string(), "media key injection is not supported on linux");

        let err = MediaError::DispatchFailed("access denied".to_string());
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_suggestion_not_empty() {
        for err in [
            MediaError::Unsupported("x"),
            MediaError::DispatchFailed("x".into()),
        ] {
            assert!(!err.suggestion().is_empty());
        }
    }
}
