//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config, store, note).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Decryption failed (wrong passphrase or color order, tampered note).
    pub const AUTH_FAILED: i32 = 5;

    /// Integrity check failed.
    pub const INTEGRITY_FAILED: i32 = 6;
}

/// Environment variables read by the CLI.
pub mod env_vars {
    pub const PASSPHRASE: &str = "HUENOTE_PASSPHRASE";
    pub const COLORS: &str = "HUENOTE_COLORS";
    pub const CONFIG: &str = "HUENOTE_CONFIG";
    pub const LOG: &str = "HUENOTE_LOG";
}

/// Default number of notes shown by `list`.
pub const DEFAULT_LIST_LIMIT: usize = 50;
