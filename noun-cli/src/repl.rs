// REPL implementation using editline

use editline::{LineEditor, terminals::StdioTerminal};
use noun_core::{Interpreter, execute_string};
use std::io::Write;

pub fn run_repl(interp: &Interpreter) -> Result<(), Box<dyn std::error::Error>> {
    println!();
    println!("noun v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Type `quit` or press Ctrl-D to exit");
    println!("Type `words` to see the native gates");
    println!("Type `help <word>` to get help for a gate");
    println!("Type `<word> <noun>...` to call a gate, e.g. `sub 5 3`");
    println!("Type `call <word> <core>` to pass a whole gate core");
    println!();

    let mut editor = LineEditor::new(1024, 50);
    let mut terminal = StdioTerminal::new();

    loop {
        print!("\n> ");
        std::io::stdout().flush()?;

        match editor.read_line(&mut terminal) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                if trimmed == "quit" {
                    break;
                }
                if trimmed == "words" {
                    println!("{}", interp.words().join(" "));
                    continue;
                }
                if let Some(word) = trimmed.strip_prefix("help ") {
                    match interp.doc(word.trim()) {
                        Some(doc) => println!("{}", doc),
                        None => eprintln!("No help for '{}'", word.trim()),
                    }
                    continue;
                }

                match execute_string(trimmed, interp) {
                    Ok(product) => println!("{}", product),
                    Err(e) => crate::report(&e),
                }
            }
            Err(editline::Error::Eof) => {
                // EOF (Ctrl-D)
                println!("\nGoodbye!");
                break;
            }
            Err(editline::Error::Interrupted) => {
                // Ctrl-C - just continue
                println!("^C");
                continue;
            }
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    Ok(())
}
