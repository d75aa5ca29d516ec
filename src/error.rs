/// Parsing errors.
///
/// Defines all diagnostics that can be recorded while parsing source
/// code. The parser never fails hard: it accumulates these diagnostics
/// and returns partial results, and the driver decides how to report
/// them.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error conditions that can arise during evaluation.
/// Runtime errors travel in-band as values and short-circuit the
/// enclosing block or program; their rendered messages are part of the
/// language's observable behavior.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
