//! # scripta
//!
//! scripta is a small, dynamically-typed, expression-oriented scripting
//! language with first-class functions, closures, arrays, hashes and
//! classes. This crate contains the whole pipeline (lexer, Pratt
//! parser, AST and tree-walking evaluator) plus an interactive REPL
//! and an embedding entry point.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::ParseError,
    interpreter::{
        environment::EnvRef,
        evaluator::eval_program,
        lexer::Lexer,
        parser::Parser,
        value::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the statement and expression types that
/// represent source code as a tree. The AST is built by the parser and
/// traversed by the evaluator; its `Display` impls render nodes in the
/// canonical parenthesized form used by diagnostics and `quote`.
///
/// # Responsibilities
/// - Defines expression and statement types for all language
///   constructs.
/// - Attaches source lines to nodes for error reporting.
/// - Renders nodes back into readable source form.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// Parse errors are accumulated by the parser and reported by the
/// driver; runtime errors travel in-band as values. Both carry stable,
/// user-visible message templates.
///
/// # Responsibilities
/// - Defines error enums for both phases.
/// - Renders the exact diagnostic and runtime message templates.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representation and scoping to provide a complete runtime for the
/// language.
///
/// # Responsibilities
/// - Coordinates the core components: lexer, parser, evaluator, values
///   and environments.
/// - Exposes the building blocks for embedding the interpreter.
pub mod interpreter;
/// The interactive prompt.
///
/// A readline-driven loop that evaluates each input line against one
/// persistent environment and prints results or parse diagnostics.
pub mod repl;

/// Parses and evaluates a source string against an environment.
///
/// This is the embedding entry point used by the CLI, the REPL and the
/// tests. Parse failures abort evaluation and return every recorded
/// diagnostic; otherwise the program's single result value is returned.
/// Runtime failures are part of that value (`Value::Error`), not an
/// `Err`.
///
/// # Errors
/// Returns the parser's diagnostics when the source does not parse.
///
/// # Examples
/// ```
/// use scripta::{interpreter::{environment::Environment, value::Value}, run_source};
///
/// let env = Environment::new();
///
/// let value = run_source("let add = fn(a, b) { a + b }; add(2, 3)", &env).unwrap();
/// assert_eq!(value, Value::Integer(5));
///
/// // The environment persists between runs.
/// let value = run_source("add(10, 20)", &env).unwrap();
/// assert_eq!(value, Value::Integer(30));
///
/// // Malformed input yields diagnostics instead of a value.
/// assert!(run_source("let = 3", &env).is_err());
/// ```
pub fn run_source(source: &str, env: &EnvRef) -> Result<Value, Vec<ParseError>> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();

    if parser.errors().is_empty() {
        Ok(eval_program(&program, env))
    } else {
        Err(parser.into_errors())
    }
}
