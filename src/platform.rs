//! Startup platform check.
//!
//! Media key injection only exists for Windows, so the application refuses
//! to start elsewhere instead of running without it.

use thiserror::Error;
use tracing::error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The current OS is not supported.
    #[error("This application is designed for Windows only (detected: {0}).")]
    Unsupported(&'static str),
}

impl PlatformError {
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Unsupported(_) => "run eyecare on Windows 10 or later",
        }
    }
}

/// Returns an error unless running on a supported platform.
pub fn ensure_supported() -> Result<(), PlatformError> {
    check_os(std::env::consts::OS)
}

fn check_os(os: &'static str) -> Result<(), PlatformError> {
    match os {
        "windows" => Ok(()),
        other => Err(PlatformError::Unsupported(other)),
    }
}

/// Logs the error and shows it in a native message dialog.
pub fn report(err: &PlatformError) {
    error!(error = %err, suggestion = err.suggestion(), "Unsupported platform");

    let _ = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Platform Error")
        .set_description(err.to_string())
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_is_supported() {
        assert_eq!(check_os("windows"), Ok(()));
    }

    #[test]
    fn test_other_platforms_rejected() {
        for os in ["linux", "macos", "freebsd"] {
            let err = check_os(os).unwrap_err();
            assert_eq!(err, PlatformError::Unsupported(os));
            assert!(err.to_string().contains("Windows only"));
            assert!(err.to_string().contains(os));
        }
    }

    #[test]
    fn test_ensure_supported_matches_target() {
        assert_eq!(ensure_supported().is_ok(), cfg!(windows));
    }
}
