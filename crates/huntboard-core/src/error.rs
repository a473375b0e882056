use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::validate::ValidationErrors;

/// Machine-readable error codes for scripting against the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    ValidationFailed,
    TargetNotFound,
    TagNotFound,
    FollowUpNotFound,
    OutreachNotFound,
    InvalidEnumValue,
    StorageReadFailed,
    StorageWriteFailed,
    LockContention,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::ValidationFailed => "E2001",
            Self::TargetNotFound => "E2002",
            Self::TagNotFound => "E2003",
            Self::FollowUpNotFound => "E2004",
            Self::OutreachNotFound => "E2005",
            Self::InvalidEnumValue => "E2006",
            Self::StorageReadFailed => "E5001",
            Self::StorageWriteFailed => "E5002",
            Self::LockContention => "E5003",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::ValidationFailed => "Validation failed",
            Self::TargetNotFound => "Job target not found",
            Self::TagNotFound => "Tag not found",
            Self::FollowUpNotFound => "Follow-up not found",
            Self::OutreachNotFound => "Outreach record not found",
            Self::InvalidEnumValue => "Invalid column/priority/type value",
            Self::StorageReadFailed => "Storage read failed",
            Self::StorageWriteFailed => "Storage write failed",
            Self::LockContention => "Lock contention",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to the user.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in config.toml in the data directory."),
            Self::ValidationFailed => Some("Correct the fields listed above and retry."),
            Self::TargetNotFound => Some("Use `hb list` to see job target ids."),
            Self::TagNotFound => Some("Use `hb tags list` to see known tags."),
            Self::FollowUpNotFound | Self::OutreachNotFound => {
                Some("Use `hb show <id>` to see the record ids on a job target.")
            }
            Self::InvalidEnumValue => Some("Use one of the documented values; see `--help`."),
            Self::StorageReadFailed => None,
            Self::StorageWriteFailed => Some("Check disk space and write permissions."),
            Self::LockContention => Some("Retry after the other `hb` process finishes."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by the key-value storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out after {waited:?} waiting for the store lock at {}", .path.display())]
    LockTimeout { path: PathBuf, waited: Duration },

    #[error("failed to lock {}: {source}", .path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::StorageReadFailed,
            Self::Write { .. } => ErrorCode::StorageWriteFailed,
            Self::LockTimeout { .. } => ErrorCode::LockContention,
            Self::Lock { .. } => ErrorCode::StorageWriteFailed,
        }
    }
}

/// Top-level error type for huntboard-core operations.
#[derive(Debug, thiserror::Error)]
pub enum HuntError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("job target '{id}' not found")]
    TargetNotFound { id: String },

    #[error("tag '{label}' not found")]
    TagNotFound { label: String },

    #[error("follow-up '{id}' not found on {target_id}")]
    FollowUpNotFound { target_id: String, id: String },

    #[error("outreach record '{id}' not found on {target_id}")]
    OutreachNotFound { target_id: String, id: String },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl HuntError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::TargetNotFound { .. } => ErrorCode::TargetNotFound,
            Self::TagNotFound { .. } => ErrorCode::TagNotFound,
            Self::FollowUpNotFound { .. } => ErrorCode::FollowUpNotFound,
            Self::OutreachNotFound { .. } => ErrorCode::OutreachNotFound,
            Self::Storage(err) => err.code(),
            Self::Serialize { .. } => ErrorCode::InternalUnexpected,
        }
    }

    /// Remediation hint, if one applies.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}
