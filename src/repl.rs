use std::borrow::Cow;
use std::env;
use std::io::{self, IsTerminal, Write};

use nu_ansi_term::Style;
use reedline::{
    Highlighter, Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, Signal,
    StyledText,
};

use crate::cli_util;
use crate::config::{self, Colors};
use crate::interpreter::{FragmentOutcome, Interpreter};

/// Prompt shown when the session has no open loops.
pub const PROMPT_READY: &str = ">>> ";
/// Prompt shown while a `[` is still waiting for its `]`.
pub const PROMPT_CONTINUE: &str = "... ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplMode {
    Bare,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeFlagOverride {
    None,
    Bare,
    Editor,
}

pub fn select_mode(flag: ModeFlagOverride) -> Result<ReplMode, String> {
    // Flag override
    match flag {
        ModeFlagOverride::Bare => return Ok(ReplMode::Bare),
        ModeFlagOverride::Editor => {
            if !io::stdin().is_terminal() {
                return Err(
                    "cannot start editor: stdin is not a TTY (use --bare or BFI_REPL_MODE=bare)"
                        .to_string(),
                );
            }
            return Ok(ReplMode::Editor);
        }
        ModeFlagOverride::None => {}
    }

    // Environment override
    if let Ok(val) = env::var("BFI_REPL_MODE") {
        let v = val.trim().to_ascii_lowercase();
        return match v.as_str() {
            "bare" => Ok(ReplMode::Bare),
            "editor" => {
                if !io::stdin().is_terminal() {
                    return Err(
                        "cannot start editor: stdin is not a TTY (use BFI_REPL_MODE=bare)"
                            .to_string(),
                    );
                }
                Ok(ReplMode::Editor)
            }
            _ => Err(format!(
                "invalid BFI_REPL_MODE value: {val}, must be 'bare' or 'editor'"
            )),
        };
    }

    // Auto-detect
    if io::stdin().is_terminal() {
        Ok(ReplMode::Editor)
    } else {
        Ok(ReplMode::Bare)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    Quit,
}

/// Feeds one line to the session interpreter.
/// - `exit` ends the session, but only while no loop is open; inside a loop
///   body it is buffered like any other comment text.
/// - An executed fragment gets a trailing newline on stdout so the next
///   prompt starts at column 0.
/// - Errors are printed concisely to stderr; the interpreter has already
///   dropped its pending buffer by the time `eval_fragment` returns.
pub fn handle_line(session: &mut Interpreter, line: &str) -> LineOutcome {
    if line.trim() == "exit" && session.open_loop_count() == 0 {
        return LineOutcome::Quit;
    }

    match session.eval_fragment(line) {
        Ok(FragmentOutcome::Executed) => {
            println!();
            let _ = io::stdout().flush();
        }
        Ok(FragmentOutcome::Ignored | FragmentOutcome::Buffered) => {}
        Err(err) => {
            cli_util::print_repl_error(&err);
            let _ = io::stderr().flush();
        }
    }

    LineOutcome::Continue
}

/// Plain line-at-a-time loop for pipes and dumb terminals.
pub fn run_bare(session: &mut Interpreter) -> io::Result<()> {
    let show_prompt = io::stdin().is_terminal();

    loop {
        if show_prompt {
            let prompt = if session.open_loop_count() == 0 {
                PROMPT_READY
            } else {
                PROMPT_CONTINUE
            };
            print!("{prompt}");
            io::stdout().flush()?;
        }

        // Take a fresh handle every iteration. The ',' instruction reads
        // stdin while a fragment runs, so the loop must not sit on a lock.
        let mut line = String::new();
        let read = io::stdin().read_line(&mut line)?;
        if read == 0 {
            // EOF
            if show_prompt {
                println!();
            }
            return Ok(());
        }

        let line = line.trim_end_matches(['\r', '\n']);
        if handle_line(session, line) == LineOutcome::Quit {
            return Ok(());
        }
    }
}

/// Interactive loop with line editing, history, and syntax highlighting.
pub fn repl_loop(session: &mut Interpreter) -> io::Result<()> {
    let mut editor = init_line_editor()?;

    loop {
        let prompt = LoopPrompt::for_depth(session.open_loop_count());

        match editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                if handle_line(session, &line) == LineOutcome::Quit {
                    return Ok(());
                }
            }
            Ok(Signal::CtrlC) | Ok(Signal::CtrlD) => {
                // End the session cleanly
                println!();
                io::stdout().flush()?;
                return Ok(());
            }
            Err(e) => {
                // Print concise error and end session
                eprintln!("repl: editor error: {e}");
                let _ = io::stderr().flush();
                return Ok(());
            }
        }
    }
}

fn init_line_editor() -> io::Result<reedline::Reedline> {
    use reedline::{FileBackedHistory, Reedline};

    // In-memory history; accepted lines are recorded automatically.
    let history = FileBackedHistory::new(1_000).unwrap();

    let editor = Reedline::create()
        .with_highlighter(Box::new(BrainfuckHighlighter::from_colors(
            &config::settings().colors,
        )))
        .with_history(Box::new(history));

    Ok(editor)
}

/// Prompt that follows the open-loop depth of the session.
struct LoopPrompt {
    depth: usize,
}

impl LoopPrompt {
    fn for_depth(depth: usize) -> Self {
        Self { depth }
    }
}

impl Prompt for LoopPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        if self.depth == 0 {
            Cow::Borrowed(PROMPT_READY)
        } else {
            Cow::Borrowed(PROMPT_CONTINUE)
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(PROMPT_CONTINUE)
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse-search: {}) ",
            prefix, history_search.term
        ))
    }
}

#[derive(Default)]
struct BrainfuckHighlighter {
    // Per-char styles for BF commands, and a fallback for non-commands
    map_plus: Style,
    map_minus: Style,
    map_lt: Style,
    map_gt: Style,
    map_dot: Style,
    map_comma: Style,
    map_lbracket: Style,
    map_rbracket: Style,
    map_other: Style,
}

impl BrainfuckHighlighter {
    fn from_colors(colors: &Colors) -> Self {
        // Character mapping
        // > <   movement
        // + -   data
        // . ,   I/O
        // [ ]   flow control
        let mut s = Self::default();
        s.map_gt = Style::new().fg(colors.op_right).bold();
        s.map_lt = Style::new().fg(colors.op_left).bold();
        s.map_plus = Style::new().fg(colors.op_inc).bold();
        s.map_minus = Style::new().fg(colors.op_dec).bold();
        s.map_dot = Style::new().fg(colors.op_output).bold();
        s.map_comma = Style::new().fg(colors.op_input).bold();
        s.map_lbracket = Style::new().fg(colors.op_bracket).bold();
        s.map_rbracket = Style::new().fg(colors.op_bracket).bold();
        s.map_other = Style::new().fg(colors.non_instruction).bold();
        s
    }

    #[inline]
    fn style_for(&self, ch: char) -> Style {
        match ch {
            '>' => self.map_gt,
            '<' => self.map_lt,
            '+' => self.map_plus,
            '-' => self.map_minus,
            '.' => self.map_dot,
            ',' => self.map_comma,
            '[' => self.map_lbracket,
            ']' => self.map_rbracket,
            _ => self.map_other,
        }
    }
}

impl Highlighter for BrainfuckHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut out: StyledText = StyledText::new();
        let mut current_style: Option<Style> = None;
        let mut buffer = String::new();

        for ch in line.chars() {
            let style = self.style_for(ch);

            match current_style {
                None => {
                    current_style = Some(style);
                    buffer.push(ch);
                }
                Some(s) if s == style => {
                    buffer.push(ch);
                }
                Some(s) => {
                    out.push((s, std::mem::take(&mut buffer)));
                    current_style = Some(style);
                    buffer.push(ch);
                }
            }
        }

        if let Some(s) = current_style {
            if !buffer.is_empty() {
                out.push((s, buffer));
            }
        }
        out
    }
}
