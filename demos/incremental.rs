use std::sync::{Arc, Mutex};

use bfi::{FragmentOutcome, Interpreter};

// Feed a program in pieces, the way the REPL does. Fragments with open
// loops are buffered; once every '[' has its ']' the whole buffer runs.
// The tape survives between fragments.
fn main() {
    let mut bf = Interpreter::new();

    let output = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&output);
    bf.set_output_sink(move |bytes| sink.lock().unwrap().extend_from_slice(bytes));

    for fragment in ["++++++++", "[>++++++++<-", "]", ">."] {
        match bf.eval_fragment(fragment) {
            Ok(FragmentOutcome::Executed) => println!("{fragment:>14}  executed"),
            Ok(FragmentOutcome::Buffered) => {
                println!("{fragment:>14}  buffered ({} open)", bf.open_loop_count());
            }
            Ok(FragmentOutcome::Ignored) => println!("{fragment:>14}  ignored"),
            Err(err) => {
                eprintln!("Brainfuck interpreter error: {err}");
                std::process::exit(1);
            }
        }
    }

    let bytes = output.lock().unwrap();
    println!("program output: {}", String::from_utf8_lossy(&bytes));
}
