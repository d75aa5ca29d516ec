use rustyline::{DefaultEditor, error::ReadlineError};

use crate::{
    interpreter::{environment::Environment, value::Value},
    run_source,
};

/// The interactive prompt string.
const PROMPT: &str = "»» ";
/// The banner printed above parse diagnostics.
const PARSE_BANNER: &str = "Woops! That did not parse.\n parser errors:";

/// Runs the interactive read-evaluate-print loop.
///
/// Every line is lexed, parsed and evaluated against one persistent
/// root environment, so bindings survive between inputs. Results print
/// in their inspect form; bare `null` results are suppressed. Parse
/// failures print the banner and one tab-indented diagnostic per
/// error, and the input is discarded.
///
/// Ctrl-C clears the current line; Ctrl-D (end of input) exits.
///
/// # Errors
/// Returns a readline error when the terminal cannot be driven.
pub fn start() -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;
    let env = Environment::new();

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                match run_source(line, &env) {
                    // Binding statements answer `null`; not echoed.
                    Ok(Value::Null) => {},
                    Ok(value) => println!("{value}"),
                    Err(diagnostics) => {
                        println!("{PARSE_BANNER}");
                        for diagnostic in diagnostics {
                            println!("\t{diagnostic}");
                        }
                    },
                }
            },
            Err(ReadlineError::Interrupted) => {},
            Err(ReadlineError::Eof) => break,
            Err(error) => return Err(error),
        }
    }

    Ok(())
}
