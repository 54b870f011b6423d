//! The execution engine: tape state, instruction dispatch, and the
//! incremental-evaluation protocol behind the interactive session.

use std::fmt;
use std::io::{self, Read, Write};

use crate::brackets;

/// Default number of cells on the memory tape.
pub const DEFAULT_MEMORY_SIZE: usize = 30_000;

/// Default ceiling on buffered program text, in instruction characters.
pub const DEFAULT_CODE_LIMIT: usize = 1_000_000;

/// Errors that can occur while interpreting Brainfuck code.
#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    /// Loops were not balanced; a matching `[` or `]` was not found.
    #[error("Unmatched bracket {kind} at instruction {ip}")]
    UnmatchedBracket { ip: usize, kind: UnmatchedBracketKind },

    /// Accepting more code would push the buffer past its configured limit.
    #[error("Code buffer full: {needed} instruction characters exceed the limit of {limit}")]
    CapacityExceeded { needed: usize, limit: usize },

    /// An underlying I/O error occurred on the program's input or output stream.
    #[error("I/O error at instruction {ip}: {source}")]
    Io {
        ip: usize,
        #[source]
        source: io::Error,
    },
}

/// Which side of the loop was unmatched.
#[derive(Debug, Clone, Copy)]
pub enum UnmatchedBracketKind {
    Open,
    Close,
}

impl fmt::Display for UnmatchedBracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmatchedBracketKind::Open => write!(f, "'['"),
            UnmatchedBracketKind::Close => write!(f, "']'"),
        }
    }
}

/// What [`Interpreter::eval_fragment`] did with a submitted fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentOutcome {
    /// The fragment was blank or whitespace-only; nothing was buffered.
    Ignored,
    /// The fragment was appended; loops remain open, so execution is deferred.
    Buffered,
    /// The accumulated buffer ran to completion and was cleared.
    Executed,
}

/// A Brainfuck interpreter with session-persistent tape state.
///
/// The interpreter maintains:
/// - a memory tape initialized to zeros (30,000 cells by default),
/// - a data pointer indexing into that tape,
/// - a code buffer that accumulates incrementally submitted fragments,
/// - a stack of open-loop positions that gates deferred execution.
///
/// One instance is meant to live for a whole session: the tape and the data
/// pointer carry over from one executed program to the next, which is what
/// makes the interactive shell stateful.
pub struct Interpreter {
    memory: Vec<u8>,
    pointer: usize,
    code: String,
    open_loops: Vec<usize>,
    code_limit: usize,
    // Optional hooks:
    output_sink: Option<Box<dyn Fn(&[u8]) + Send + Sync>>,
    input_provider: Option<Box<dyn Fn() -> Option<u8> + Send + Sync>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Create an interpreter with a 30,000-cell memory tape.
    pub fn new() -> Self {
        Self::new_with_memory(DEFAULT_MEMORY_SIZE)
    }

    /// Create an interpreter with a custom tape length.
    ///
    /// A length of zero is bumped to one cell so the data pointer always has
    /// somewhere to stand.
    pub fn new_with_memory(memory_size: usize) -> Self {
        Self {
            memory: vec![0; memory_size.max(1)],
            pointer: 0,
            code: String::new(),
            open_loops: Vec::new(),
            code_limit: DEFAULT_CODE_LIMIT,
            output_sink: None,
            input_provider: None,
        }
    }

    /// Cap the code buffer at `limit` instruction characters.
    pub fn set_code_limit(&mut self, limit: usize) {
        self.code_limit = limit;
    }

    /// Provide an output sink. When set, '.' sends bytes to this sink instead
    /// of stdout. The sink receives a single-byte slice per '.'.
    pub fn set_output_sink<F>(&mut self, sink: F)
    where
        F: Fn(&[u8]) + Send + Sync + 'static,
    {
        self.output_sink = Some(Box::new(sink));
    }

    /// Provide an input provider. When set, ',' reads from this provider
    /// instead of stdin. Returning None indicates end of input (cell is set to 0).
    pub fn set_input_provider<F>(&mut self, provider: F)
    where
        F: Fn() -> Option<u8> + Send + Sync + 'static,
    {
        self.input_provider = Some(Box::new(provider));
    }

    /// Number of incrementally submitted loop-opens not yet closed.
    ///
    /// Execution of buffered fragments is deferred while this is nonzero.
    pub fn open_loop_count(&self) -> usize {
        self.open_loops.len()
    }

    /// Execute a complete program against the session tape.
    ///
    /// Brackets are resolved over the whole program before the first
    /// instruction runs, so an unbalanced program executes nothing. Any
    /// fragments still buffered from incremental evaluation are discarded.
    pub fn run(&mut self, program: &str) -> Result<(), InterpreterError> {
        let needed = program.chars().count();
        if needed > self.code_limit {
            return Err(InterpreterError::CapacityExceeded {
                needed,
                limit: self.code_limit,
            });
        }

        self.reset_pending();
        self.code.push_str(program);
        let result = self.execute();
        self.reset_pending();
        result
    }

    /// Feed one fragment (typically one input line) to the session.
    ///
    /// The fragment is scanned for loop brackets first: an unmatched `]` is
    /// rejected before anything is buffered, so a fragment is never partially
    /// appended. Otherwise the fragment joins the code buffer, and once no
    /// loops remain open the whole buffer is resolved and run, after which
    /// the buffer is cleared. The tape and the data pointer keep their values
    /// across runs.
    ///
    /// On any error the pending buffer and the open-loop stack are reset, so
    /// the next fragment starts from a clean prompt state.
    pub fn eval_fragment(&mut self, fragment: &str) -> Result<FragmentOutcome, InterpreterError> {
        if fragment.trim().is_empty() {
            return Ok(FragmentOutcome::Ignored);
        }

        let base = self.code.chars().count();
        let mut opens = self.open_loops.clone();
        for (offset, ch) in fragment.chars().enumerate() {
            match ch {
                '[' => opens.push(base + offset),
                ']' => {
                    if opens.pop().is_none() {
                        self.reset_pending();
                        return Err(InterpreterError::UnmatchedBracket {
                            ip: base + offset,
                            kind: UnmatchedBracketKind::Close,
                        });
                    }
                }
                _ => {}
            }
        }

        let needed = base + fragment.chars().count();
        if needed > self.code_limit {
            self.reset_pending();
            return Err(InterpreterError::CapacityExceeded {
                needed,
                limit: self.code_limit,
            });
        }

        self.open_loops = opens;
        self.code.push_str(fragment);

        if !self.open_loops.is_empty() {
            return Ok(FragmentOutcome::Buffered);
        }

        let result = self.execute();
        self.reset_pending();
        result.map(|()| FragmentOutcome::Executed)
    }

    /// Drop buffered code and forget open loops. Tape state is untouched.
    fn reset_pending(&mut self) {
        self.code.clear();
        self.open_loops.clear();
    }

    /// Shared executor: resolve brackets over the current buffer, then
    /// dispatch instruction by instruction until the pointer falls off the end.
    fn execute(&mut self) -> Result<(), InterpreterError> {
        let chars: Vec<char> = self.code.chars().collect();
        let map = brackets::resolve(&chars)?;

        let mut ip = 0;
        while ip < chars.len() {
            match chars[ip] {
                '>' => {
                    // The data pointer wraps at both ends of the tape.
                    self.pointer = if self.pointer + 1 == self.memory.len() {
                        0
                    } else {
                        self.pointer + 1
                    };
                }
                '<' => {
                    self.pointer = if self.pointer == 0 {
                        self.memory.len() - 1
                    } else {
                        self.pointer - 1
                    };
                }
                '+' => {
                    self.memory[self.pointer] = self.memory[self.pointer].wrapping_add(1);
                }
                '-' => {
                    self.memory[self.pointer] = self.memory[self.pointer].wrapping_sub(1);
                }
                '.' => {
                    let b = [self.memory[self.pointer]];
                    if let Some(sink) = self.output_sink.as_ref() {
                        (sink)(&b);
                    } else {
                        let mut stdout = io::stdout();
                        stdout
                            .write_all(&b)
                            .and_then(|()| stdout.flush())
                            .map_err(|e| InterpreterError::Io { ip, source: e })?;
                    }
                }
                ',' => {
                    if let Some(provider) = self.input_provider.as_ref() {
                        self.memory[self.pointer] = (provider)().unwrap_or(0);
                    } else {
                        // Read exactly one byte from stdin into the current
                        // cell. At end of input, the cell is set to 0.
                        let mut buf = [0u8; 1];
                        match io::stdin().read(&mut buf) {
                            Ok(0) => self.memory[self.pointer] = 0,
                            Ok(_) => self.memory[self.pointer] = buf[0],
                            Err(e) => return Err(InterpreterError::Io { ip, source: e }),
                        }
                    }
                }
                '[' => {
                    if self.memory[self.pointer] == 0 {
                        ip = map.partner(ip).expect("validated bracket");
                    }
                }
                ']' => {
                    if self.memory[self.pointer] != 0 {
                        ip = map.partner(ip).expect("validated bracket");
                    }
                }
                // Everything else is commentary and is skipped.
                _ => {}
            }
            ip += 1;
        }

        Ok(())
    }
}
