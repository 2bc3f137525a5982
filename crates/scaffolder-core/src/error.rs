//! Errors the binary maps to exit codes

use crate::config::NameError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// A prompt was abandoned; not a failure
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Invalid package name '{name}'")]
    InvalidPackageName {
        name: String,
        #[source]
        source: NameError,
    },

    #[error("Directory {} already exists", .0.display())]
    TargetExists(PathBuf),
}

impl ScaffoldError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ScaffoldError::Cancelled => 0,
            _ => 1,
        }
    }
}

/// Whether an error chain ends in a cancelled prompt. Prompts report
/// cancellation as an interrupted I/O error.
pub fn is_cancellation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(cause.downcast_ref::<ScaffoldError>(), Some(ScaffoldError::Cancelled))
            || cause
                .downcast_ref::<std::io::Error>()
                .is_some_and(|e| e.kind() == std::io::ErrorKind::Interrupted)
    })
}

/// Process exit code for a failed run
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if is_cancellation(err) {
        return 0;
    }
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ScaffoldError>())
        .map(ScaffoldError::exit_code)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_cancellation_exits_zero() {
        let err = anyhow::Error::from(ScaffoldError::Cancelled);
        assert_eq!(exit_code(&err), 0);

        let interrupted = std::io::Error::new(std::io::ErrorKind::Interrupted, "ctrl-c");
        let err = anyhow::Error::from(interrupted).context("Package name");
        assert!(is_cancellation(&err));
        assert_eq!(exit_code(&err), 0);
    }

    #[test]
    fn test_other_errors_exit_one() {
        let err = anyhow::Error::from(ScaffoldError::TargetExists(PathBuf::from("sample-lib")));
        assert_eq!(exit_code(&err), 1);
        assert!(err.to_string().contains("sample-lib already exists"));

        let err: anyhow::Error = Err::<(), _>(std::io::Error::other("disk full"))
            .context("Failed to write file")
            .unwrap_err();
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_invalid_name_message() {
        let err = anyhow::Error::from(ScaffoldError::InvalidPackageName {
            name: "My Package!".to_string(),
            source: NameError::Uppercase,
        });
        assert_eq!(
            format!("{:#}", err),
            "Invalid package name 'My Package!': Package name must be lowercase"
        );
        assert_eq!(exit_code(&err), 1);
    }
}
