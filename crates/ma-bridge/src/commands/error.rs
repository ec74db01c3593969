use serde::Serialize;
use thiserror::Error;

use ma_core::policy::{BackendError, PolicyError, ReleaseError, StorageError, WipeError};

/// Machine-readable category of a rejected command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandErrorCode {
    /// Caller must re-request elevation
    NotOwner,
    NotAdminActive,
    SecurityDenied,
    Backend,
    Storage,
    Resolution,
}

/// Structured rejection returned across the command boundary.
///
/// Serializes as `{"code": ..., "message": ...}`. Raw backend text only ever
/// appears in `message`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct CommandError {
    pub code: CommandErrorCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: CommandErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Prefix the message with operator-facing context, keeping the code.
    pub fn context(mut self, context: &str) -> Self {
        self.message = format!("{context}: {}", self.message);
        self
    }
}

impl From<PolicyError> for CommandError {
    fn from(err: PolicyError) -> Self {
        let code = match &err {
            PolicyError::NotOwner => CommandErrorCode::NotOwner,
            PolicyError::NotAdminActive => CommandErrorCode::NotAdminActive,
            PolicyError::Backend(BackendError::SecurityDenied(_)) => {
                CommandErrorCode::SecurityDenied
            }
            PolicyError::Backend(_) => CommandErrorCode::Backend,
            PolicyError::Storage(_) => CommandErrorCode::Storage,
            PolicyError::Resolution(_) => CommandErrorCode::Resolution,
        };
        Self::new(code, err.to_string())
    }
}

impl From<StorageError> for CommandError {
    fn from(err: StorageError) -> Self {
        Self::new(CommandErrorCode::Storage, err.to_string())
    }
}

impl From<WipeError> for CommandError {
    fn from(err: WipeError) -> Self {
        let code = match &err {
            WipeError::NotAdminActive => CommandErrorCode::NotAdminActive,
            WipeError::SecurityDenied(_) => CommandErrorCode::SecurityDenied,
            WipeError::Backend(_) => CommandErrorCode::Backend,
        };
        Self::new(code, err.to_string())
    }
}

impl From<ReleaseError> for CommandError {
    fn from(err: ReleaseError) -> Self {
        let code = match &err {
            ReleaseError::NotOwner => CommandErrorCode::NotOwner,
            ReleaseError::Backend(_) => CommandErrorCode::Backend,
        };
        Self::new(code, err.to_string())
    }
}
