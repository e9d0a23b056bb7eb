//! Note body input.

use std::io::{IsTerminal, Read};

use zeroize::Zeroizing;

use crate::errors::CliError;

/// Body from `--body`, piped stdin, or typed in until EOF.
///
/// One trailing newline from a pipe or `echo` is dropped.
pub fn read_note_body(body: Option<&str>, no_input: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(body) = body {
        return non_empty(Zeroizing::new(body.to_string()));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        if no_input {
            return Err(CliError::invalid_input_with_hint(
                "Note body required",
                "Hint: Pass --body or pipe the note on stdin.",
            )
            .into());
        }
        eprintln!("Enter the note, then press Ctrl-D:");
    }

    let mut buffer = Zeroizing::new(String::new());
    stdin.read_to_string(&mut buffer)?;
    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }
    non_empty(buffer)
}

fn non_empty(body: Zeroizing<String>) -> anyhow::Result<Zeroizing<String>> {
    if body.is_empty() {
        return Err(CliError::invalid_input("Note body cannot be empty").into());
    }
    Ok(body)
}
