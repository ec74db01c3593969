use thiserror::Error;

/// Failure reported by a privileged platform policy call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// The platform refused the call for security/permission reasons.
    #[error("security exception: {0}")]
    SecurityDenied(String),

    /// The platform rejected an enablement because it is already enabled.
    #[error("already enabled")]
    AlreadyEnabled,

    /// The operation does not exist on this platform version.
    #[error("unsupported on this platform: {0}")]
    Unsupported(String),

    /// No foreground surface is attached to perform the call from.
    #[error("no foreground surface: {0}")]
    NoSurface(String),

    /// Any other platform rejection.
    #[error("policy call failed: {0}")]
    Failed(String),
}

/// Persistence read/write failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage read failed: {0}")]
    Read(String),

    #[error("storage write failed: {0}")]
    Write(String),

    #[error("stored data corrupt: {0}")]
    Corrupt(String),
}

/// Error taxonomy surfaced by the enforcement use cases.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// The agent does not hold device-owner capability.
    #[error("App is not Device Owner")]
    NotOwner,

    /// The agent's device-administration capability is not active.
    #[error("Device Admin not active")]
    NotAdminActive,

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No launchable target or foreground surface.
    #[error("no launchable target: {0}")]
    Resolution(String),
}

impl PolicyError {
    /// Precondition failures ask the caller to re-request elevation.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::NotOwner | Self::NotAdminActive)
    }
}

/// Failure of the destructive wipe operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WipeError {
    #[error("Device Admin not active")]
    NotAdminActive,

    #[error("Security Exception: {0}")]
    SecurityDenied(String),

    #[error("Wipe Failed: {0}")]
    Backend(String),
}

/// Failure of releasing the managed-owner relationship.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReleaseError {
    #[error("App is not Device Owner")]
    NotOwner,

    #[error("Failed to release control: {0}")]
    Backend(String),
}
