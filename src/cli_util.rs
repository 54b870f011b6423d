use std::io::{self, Write};

use crate::InterpreterError;

/// Pretty-print a structured [`InterpreterError`] with caret positioning.
/// If `program` is `Some("bfi")`, messages get a "bfi: ..." prefix for CLI runs.
pub fn print_run_error(program: Option<&str>, code: &str, err: &InterpreterError) {
    let prefix_program = |msg: &str| {
        if let Some(p) = program {
            format!("{p}: {msg}")
        } else {
            msg.to_string()
        }
    };

    match err {
        InterpreterError::UnmatchedBracket { ip, kind } => {
            let msg = prefix_program(&format!("Parse error: unmatched bracket {kind}"));
            print_error_with_context(&msg, code, *ip);
        }
        InterpreterError::CapacityExceeded { needed, limit } => {
            // No caret: the failure is about the program's size, not a position.
            eprintln!(
                "{}",
                prefix_program(&format!(
                    "Capacity error: program is {needed} instruction characters, the buffer holds {limit}"
                ))
            );
            let _ = io::stderr().flush();
        }
        InterpreterError::Io { ip, source } => {
            let msg = prefix_program(&format!("I/O error: {source}"));
            print_error_with_context(&msg, code, *ip);
        }
    }
}

/// One-line error report for the interactive session.
///
/// The offending fragment was never buffered, so there is no surrounding code
/// to show a caret against; the position in the message counts from the start
/// of the accumulated buffer.
pub fn print_repl_error(err: &InterpreterError) {
    eprintln!("{}", repl_error_line(err));
    let _ = io::stderr().flush();
}

fn repl_error_line(err: &InterpreterError) -> String {
    match err {
        InterpreterError::UnmatchedBracket { ip, kind } => {
            format!("Parse error: unmatched bracket {kind} at instruction {ip}")
        }
        InterpreterError::CapacityExceeded { needed, limit } => {
            format!("Capacity error: code buffer full ({needed} > {limit}); buffered input discarded")
        }
        InterpreterError::Io { ip, source } => {
            format!("I/O error at instruction {ip}: {source}")
        }
    }
}

/// Print a concise error with instruction index and a caret context window.
pub fn print_error_with_context(prefix: &str, code: &str, pos: usize) {
    eprintln!("{prefix} at instruction {pos}");
    let (slice, caret) = context_window(code, pos);
    eprintln!("  {slice}");
    eprintln!("  {caret}");
    let _ = io::stderr().flush();
}

/// Build the context slice and caret underline for an error at `pos`,
/// slicing by char index so multi-byte characters in mixed content stay intact.
fn context_window(code: &str, pos: usize) -> (String, String) {
    const WINDOW_CHARS: usize = 32;

    let total_chars = code.chars().count();
    let start_char = pos.saturating_sub(WINDOW_CHARS);
    let end_char = (pos + WINDOW_CHARS + 1).min(total_chars);

    let slice = code[char_to_byte_index(code, start_char)..char_to_byte_index(code, end_char)]
        .to_string();
    let caret = format!("{}^", " ".repeat(pos.saturating_sub(start_char)));
    (slice, caret)
}

/// Convert a char index into a byte index in the given UTF-8 string.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(byte_idx, _)| byte_idx)
        .unwrap_or(s.len())
}
