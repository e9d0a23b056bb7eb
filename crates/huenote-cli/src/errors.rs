//! CLI errors that carry an exit code and an optional hint.

use std::fmt;

use huenote_core::NoteError;

use crate::constants::exit_codes;

/// A user-facing failure with a specific exit code.
#[derive(Debug, Clone)]
pub struct CliError {
    pub code: i32,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn new(code: i32, message: impl Into<String>, hint: Option<&str>) -> Self {
        Self {
            code,
            message: message.into(),
            hint: hint.map(str::to_string),
        }
    }

    pub fn not_found(message: impl Into<String>, hint: &str) -> Self {
        Self::new(exit_codes::NOT_FOUND, message, Some(hint))
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(exit_codes::INVALID_INPUT, message, None)
    }

    pub fn invalid_input_with_hint(message: impl Into<String>, hint: &str) -> Self {
        Self::new(exit_codes::INVALID_INPUT, message, Some(hint))
    }

    pub fn auth_failed_with_hint(message: impl Into<String>, hint: &str) -> Self {
        Self::new(exit_codes::AUTH_FAILED, message, Some(hint))
    }

    pub fn integrity_failed(message: impl Into<String>, hint: &str) -> Self {
        Self::new(exit_codes::INTEGRITY_FAILED, message, Some(hint))
    }

    /// Print the error and exit the process.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self.message);
        if let Some(hint) = &self.hint {
            eprintln!("{}", hint);
        }
        std::process::exit(self.code)
    }

    /// Classify a core error, if it maps to a specific exit code.
    pub fn from_note_error(err: &NoteError) -> Option<Self> {
        match err {
            NoteError::Decryption => Some(Self::auth_failed_with_hint(
                "Decryption failed.",
                "Hint: Check the passphrase and that the colors are in the original order.",
            )),
            NoteError::Validation(msg) => Some(Self::invalid_input(msg.clone())),
            NoteError::Size { .. } => Some(Self::invalid_input_with_hint(
                err.to_string(),
                "Hint: RSA-OAEP only fits short notes. Use --algorithm aes-gcm or ecc.",
            )),
            NoteError::NotFound(msg) => Some(Self::not_found(
                msg.clone(),
                "Hint: Run `huenote list` to find note IDs.",
            )),
            _ => None,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Map an error returned from a command handler to its exit code, if any.
pub fn classify_error(err: &anyhow::Error) -> Option<CliError> {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return Some(cli.clone());
    }
    err.downcast_ref::<NoteError>()
        .and_then(CliError::from_note_error)
}
