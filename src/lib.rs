//! A Brainfuck interpreter with a session-persistent, incremental REPL.
//!
//! The interpreter operates on a tape of byte cells (default 30,000) with a
//! single data pointer.
//!
//! Features and behaviors:
//! - Memory tape initialized to 0; cell values wrap around at 0 and 255.
//! - The data pointer wraps at both ends of the tape, so `<` on cell 0 lands
//!   on the last cell.
//! - Input `,` reads a single byte from stdin; on EOF the current cell is set to 0.
//! - Output `.` writes the byte at the current cell as-is (no newline).
//! - Properly handles nested loops `[]`; unmatched brackets are reported with
//!   the offending instruction position.
//! - Characters outside `><+-.,[]` execute as no-ops.
//! - Fragments fed through [`Interpreter::eval_fragment`] accumulate until
//!   every `[` has its `]`, then run against the tape the session has built
//!   up so far.
//!
//! Quick start:
//!
//! ```no_run
//! use bfi::Interpreter;
//!
//! // Classic "Hello World!" in Brainfuck
//! let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";
//! let mut bf = Interpreter::new();
//! bf.run(code).expect("program should run");
//! println!(); // ensure a trailing newline for readability
//! ```

pub mod brackets;
pub mod cli_util;
pub mod commands;
pub mod config;
pub mod interpreter;
pub mod repl;
pub mod source;
pub mod theme;

pub use brackets::BracketMap;
pub use interpreter::{
    FragmentOutcome, Interpreter, InterpreterError, UnmatchedBracketKind, DEFAULT_CODE_LIMIT,
    DEFAULT_MEMORY_SIZE,
};
pub use source::clean_source;
