use clap::Args;
use std::io::{self, Write};
use std::{env, fs};

use crate::cli_util::print_run_error;
use crate::config;
use crate::interpreter::Interpreter;
use crate::source::clean_source;

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    /// Read Brainfuck code from PATH instead of positional "<code>"
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Tape size in cells (fallback BFI_MEMORY; default 30,000)
    #[arg(long = "memory", value_name = "CELLS")]
    pub memory: Option<usize>,

    /// Concatenated Brainfuck code parts
    #[arg(value_name = "code", trailing_var_arg = true, allow_hyphen_values = true)]
    pub code: Vec<String>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program: &str, args: RunArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let RunArgs {
        file,
        memory,
        code,
        ..
    } = args;

    if file.is_none() && code.is_empty() {
        usage_and_exit(program, 2);
    }

    if file.is_some() && !code.is_empty() {
        eprintln!("{program}: cannot use positional code together with --file");
        usage_and_exit(program, 2);
    }

    let raw = if let Some(path) = file {
        match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{program}: failed to read code file as UTF-8: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
        }
    } else {
        code.join("")
    };

    // Drop comments before execution; error positions refer to what ran
    let source = clean_source(&raw);

    // Resolve tape size: flag -> env -> config -> default
    let memory_size = memory
        .or_else(|| env::var("BFI_MEMORY").ok().and_then(|s| s.parse::<usize>().ok()))
        .unwrap_or_else(|| config::settings().memory_size);

    let mut session = Interpreter::new_with_memory(memory_size);
    session.set_code_limit(config::settings().code_limit);

    if let Err(err) = session.run(&source) {
        print_run_error(Some(program), &source, &err);
        let _ = io::stderr().flush();
        return 1;
    }

    // For readability, ensure output ends with a newline
    println!();
    let _ = io::stdout().flush();
    0
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run "<code>"
  {0} run --file <PATH>

Options:
  --file,  -f <PATH>  Read Brainfuck code from PATH instead of positional "<code>"
  --memory <CELLS>    Tape size in cells (fallback BFI_MEMORY; default 30,000)
  --help,  -h         Show this help

Notes:
- Everything from `#` to the end of its line is a comment; other characters
  outside of Brainfuck's ><+-.,[] are dropped before execution.
- The tape pointer wraps around at both ends.
- Input (`,`) reads a single byte from stdin; on EOF the current cell is set to 0.

Examples:
- Load Brainfuck code from a file:
    {0} run --file ./program.bf
- Read bytes from a file as stdin (`,` will consume file input):
    {0} run ",[.,]" < input.txt
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
