//! Output formatting for human-readable and JSON modes.
//!
//! Human mode uses colored terminal output.
//! JSON mode outputs pure JSON with no ANSI escapes.

use colored::Colorize;
use key2words_types::Key2WordsError;

/// Prints a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg.green());
}

/// Prints a labelled value.
pub fn print_kv(key: &str, value: &str) {
    println!("{} {}", format!("{key}:").yellow().bold(), value);
}

/// Prints a JSON value on a single line.
pub fn print_json(value: &serde_json::Value) {
    println!("{value}");
}

/// Prints an error and its hint, if any, to stderr.
pub fn print_error(err: &Key2WordsError, json_mode: bool) {
    if json_mode {
        let obj = serde_json::json!({
            "error": err.to_string(),
            "hint": err.hint(),
        });
        eprintln!("{obj}");
    } else {
        eprintln!("{} {}", "error:".red().bold(), err);
        if let Some(hint) = err.hint() {
            eprintln!("{} {}", "hint:".yellow(), hint);
        }
    }
}
