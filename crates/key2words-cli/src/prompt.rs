//! Passphrase input for encrypted private keys.

use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;

use key2words_types::{Key2WordsError, Result};
use zeroize::Zeroizing;

/// Environment variable consulted before prompting.
pub const PASSPHRASE_ENV: &str = "KEY2WORDS_PASSPHRASE";

/// Prompts allowed before giving up on a wrong passphrase.
pub const MAX_ATTEMPTS: usize = 3;

/// Returns the passphrase from [`PASSPHRASE_ENV`], if set.
pub fn passphrase_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSPHRASE_ENV).ok().map(Zeroizing::new)
}

/// Asks for the passphrase of `path`.
///
/// On a terminal the passphrase is read without echo. Otherwise the
/// prompt goes to stderr and one line is read from stdin.
pub fn read_passphrase(path: &Path) -> Result<Zeroizing<String>> {
    let prompt = format!("Enter the passphrase to unlock {:?}: ", path.display().to_string());

    if std::io::stdin().is_terminal() {
        return rpassword::prompt_password(prompt)
            .map(Zeroizing::new)
            .map_err(input_error);
    }

    eprint!("{prompt}");
    let _ = std::io::stderr().flush();
    read_line_from(std::io::stdin().lock())
}

/// Reads one line. The line ending is stripped; other whitespace is kept.
fn read_line_from<R: BufRead>(mut reader: R) -> Result<Zeroizing<String>> {
    let mut input = Zeroizing::new(String::new());
    let read = reader.read_line(&mut input).map_err(input_error)?;
    if read == 0 {
        return Err(Key2WordsError::PassphraseInput {
            reason: "no input (stdin closed)".into(),
        });
    }

    let len = input.trim_end_matches(|c: char| c == '\n' || c == '\r').len();
    input.truncate(len);
    Ok(input)
}

fn input_error(e: std::io::Error) -> Key2WordsError {
    Key2WordsError::PassphraseInput {
        reason: e.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_ending_is_stripped() {
        let line = read_line_from(&b"asd\r\nrest\n"[..]).unwrap();
        assert_eq!(line.as_str(), "asd");
    }

    #[test]
    fn inner_whitespace_is_kept() {
        let line = read_line_from(&b" a s d \n"[..]).unwrap();
        assert_eq!(line.as_str(), " a s d ");
    }

    #[test]
    fn last_line_without_newline() {
        let line = read_line_from(&b"asd"[..]).unwrap();
        assert_eq!(line.as_str(), "asd");
    }

    #[test]
    fn eof_is_input_error() {
        assert!(matches!(
            read_line_from(&b""[..]),
            Err(Key2WordsError::PassphraseInput { .. })
        ));
    }
}
