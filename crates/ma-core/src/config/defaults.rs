//! Compiled-in defaults used when the configuration file omits a value.

pub const DEFAULT_PACKAGE_NAME: &str = "com.nama.emi.app";
pub const DEFAULT_API_URL: &str = "https://api.nama-emi.example";
pub const DEFAULT_PROFILE_NAME: &str = "Nama EMI Device";
pub const DEFAULT_ADMIN_EXPLANATION: &str = "Required for Nama EMI application security.";
pub const DEFAULT_DISMISS_DELAY_MS: u64 = 500;
pub const DEFAULT_TAMPER_CHECK_INTERVAL_SECS: u64 = 60;

/// Runtime permissions granted to the managed package during onboarding.
pub const DEFAULT_CRITICAL_PERMISSIONS: &[&str] = &[
    "android.permission.CAMERA",
    "android.permission.ACCESS_FINE_LOCATION",
    "android.permission.ACCESS_COARSE_LOCATION",
    "android.permission.READ_PHONE_STATE",
    "android.permission.WRITE_EXTERNAL_STORAGE",
    "android.permission.READ_EXTERNAL_STORAGE",
];
