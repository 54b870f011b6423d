use clap::Args;
use std::env;
use std::io::{self, IsTerminal, Write};

use crate::config;
use crate::interpreter::Interpreter;
use crate::repl::{repl_loop, run_bare, select_mode, ModeFlagOverride, ReplMode};

#[derive(Args, Debug, Default)]
#[command(disable_help_flag = true)]
pub struct ReplArgs {
    /// Force non-interactive bare mode
    #[arg(long = "bare", conflicts_with = "editor")]
    pub bare: bool,

    /// Force interactive mode (errors if stdin is not a TTY)
    #[arg(long = "editor", conflicts_with = "bare")]
    pub editor: bool,

    /// Tape size in cells (fallback BFI_MEMORY; default 30,000)
    #[arg(long = "memory", value_name = "CELLS")]
    pub memory: Option<usize>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,
}

// Public entry point for the REPL from main.rs
pub fn run(program: &str, args: ReplArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let mode_flag = if args.bare {
        ModeFlagOverride::Bare
    } else if args.editor {
        ModeFlagOverride::Editor
    } else {
        ModeFlagOverride::None
    };

    // Determine mode: flags -> env -> auto-detect via is_terminal()
    let mode = match select_mode(mode_flag) {
        Ok(m) => m,
        Err(msg) => {
            eprintln!("{program}: {msg}");
            let _ = io::stderr().flush();
            return 1;
        }
    };

    // Install SIGINT (ctrl+c) handler to flush and exit(0) immediately
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(0);
    }) {
        eprintln!("{program}: failed to set ctrl+c handler: {e}");
        let _ = io::stderr().flush();
        return 1;
    }

    // Resolve tape size: flag -> env -> config -> default
    let memory_size = args
        .memory
        .or_else(|| env::var("BFI_MEMORY").ok().and_then(|s| s.parse::<usize>().ok()))
        .unwrap_or_else(|| config::settings().memory_size);

    // One interpreter for the whole session; the tape survives across lines
    let mut session = Interpreter::new_with_memory(memory_size);
    session.set_code_limit(config::settings().code_limit);

    match mode {
        ReplMode::Editor => {
            // Print banners only if stderr is a TTY
            if io::stderr().is_terminal() {
                eprintln!("Brainfuck REPL (interactive editor mode)");
                eprintln!(
                    "Enter evaluates a line; loops run once every '[' has its ']'. Type 'exit' or press ctrl+c to leave"
                );
                let _ = io::stderr().flush();
            }

            if let Err(e) = repl_loop(&mut session) {
                eprintln!("{program}: REPL error: {e}");
                let _ = io::stderr().flush();
                return 1;
            }

            0
        }
        ReplMode::Bare => match run_bare(&mut session) {
            Ok(_) => 0,
            Err(e) => {
                eprintln!("{program}: REPL error: {e}");
                let _ = io::stderr().flush();
                1
            }
        },
    }
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} repl   # Start a Brainfuck REPL (read-eval-print loop)

Options:
  --help,   -h        Show this help
  --bare              Force non-interactive bare mode
  --editor            Force interactive editor mode (errors if stdin is not a TTY)
  --memory <CELLS>    Tape size in cells (fallback BFI_MEMORY; default 30,000)

Description:
  Starts a REPL where you enter Brainfuck code one line at a time. A line is
  executed as soon as every '[' in the session has its ']'; until then lines
  are buffered and the prompt switches from ">>> " to "... ". The tape
  survives across executions, so later lines see the state earlier lines left.

Notes:
    - Type "exit" on its own line (outside a loop body) to leave; ctrl+c also exits.
    - A newline is printed after each execution for readability.
    - An unmatched ']' or a full code buffer discards the buffered fragment and
      resets the prompt; the tape keeps its state.
    - Mode selection:
        * Flags: --bare|--editor override environment and auto-detection.
        * Env: BFI_REPL_MODE=bare|editor overrides auto-detection (flags, when present, will override env).
        * Auto-detect: if stdin is a TTY, starts in interactive editor mode; otherwise, bare mode.
        * Prompts/banners suppressed if stderr is not a TTY.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
