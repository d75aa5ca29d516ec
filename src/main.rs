use std::fs;

use clap::Parser;
use scripta::{interpreter::{environment::Environment, value::Value}, repl, run_source};

/// scripta is a small, expression-oriented scripting language with
/// closures, classes and an interactive REPL.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells scripta to read a script file instead of inline text.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode automatically prints the value of the final statement
    /// of the script.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Script text, or a path when --file is given. Omit to start the
    /// interactive prompt.
    contents: Option<String>,
}

fn main() {
    let args = Args::parse();

    let Some(contents) = args.contents else {
        if let Err(error) = repl::start() {
            eprintln!("{error}");
            std::process::exit(1);
        }
        return;
    };

    let script = if args.file {
        fs::read_to_string(&contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
            std::process::exit(1);
        })
    } else {
        contents
    };

    let env = Environment::new();
    match run_source(&script, &env) {
        Ok(value) => match value {
            Value::Error(_) => println!("{value}"),
            Value::Null => {},
            value if args.pipe_mode => println!("{value}"),
            _ => {},
        },
        Err(diagnostics) => {
            println!("parser errors:");
            for diagnostic in diagnostics {
                println!("\t{diagnostic}");
            }
        },
    }
}
