//! Source cleaning for the one-shot entry point.

/// Reduce raw program text to executable instructions.
///
/// A `#` starts a comment that runs to the end of the line, and everything
/// outside the eight-instruction alphabet `><+-.,[]` is dropped. Instruction
/// characters inside a comment are dropped with it, so prose like
/// `# clear the cell with [-]` cannot leak loops into the program.
///
/// Only whole programs are cleaned this way; interactive fragments are fed to
/// the interpreter as typed and non-instruction characters execute as no-ops.
pub fn clean_source(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_comment = false;
    for ch in raw.chars() {
        match ch {
            '#' => in_comment = true,
            '\n' => in_comment = false,
            '>' | '<' | '+' | '-' | '.' | ',' | '[' | ']' if !in_comment => out.push(ch),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_instruction_characters() {
        assert_eq!(clean_source("a+b-c>d<e.f,g[h]i"), "+-><.,[]");
    }

    #[test]
    fn comments_run_to_end_of_line() {
        assert_eq!(clean_source("++ # add two then loop [\n[-]"), "++[-]");
    }

    #[test]
    fn comment_markers_inside_comments_stay_inert() {
        assert_eq!(clean_source("+# first # still the same comment\n-"), "+-");
    }

    #[test]
    fn instructions_inside_comments_do_not_leak() {
        assert_eq!(clean_source("# >>> all of this is prose . , [ ]\n"), "");
    }

    #[test]
    fn empty_and_prose_only_input_cleans_to_nothing() {
        assert_eq!(clean_source(""), "");
        assert_eq!(clean_source("just words\nand more words"), "");
    }
}
