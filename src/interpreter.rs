/// The environment module implements the lexical scope chain.
///
/// An environment maps names to values and optionally points to an
/// outer environment. Lookup walks the chain outward; binding writes
/// into the innermost scope. Environments are shared through reference
/// counting so that closures can capture them.
///
/// # Responsibilities
/// - Stores name-to-value bindings per scope.
/// - Resolves identifiers through the outer-pointer chain.
/// - Provides the rebinding primitive used by the postfix operators.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and
/// statements, applies functions and builtins, and manages closure and
/// instance environments. It is the core execution engine of the
/// interpreter. Runtime failures are produced as in-band error values
/// that short-circuit the enclosing block or program.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Implements closures, classes, loops and the `quote` form.
/// - Produces in-band runtime errors with stable message templates.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens,
/// each corresponding to a meaningful language element such as an
/// integer, identifier, operator, delimiter, or keyword. Lexing is
/// total: unrecognized bytes become `ILLEGAL` tokens and the end of
/// input yields `EOF` tokens indefinitely.
///
/// # Responsibilities
/// - Converts the input byte stream into tokens with kind, literal text
///   and source line.
/// - Handles integer and string literals, identifiers, and multi-byte
///   operators.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser is a Pratt (top-down operator precedence) parser over a
/// two-token window. Each token kind may register a prefix rule and an
/// infix rule; precedence climbing combines them into expression trees.
/// Failures are accumulated as diagnostics rather than raised.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions,
///   statements).
/// - Enforces the grammar, recording diagnostics with line info.
/// - Never loops forever and never panics on malformed input.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the value sum type used during execution:
/// integers, booleans, strings, arrays, hashes, functions, builtins,
/// classes, instances, quotes and in-band errors, together with hash
/// keys for hash storage and the `inspect` rendering of every variant.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported variants.
/// - Computes stable hash keys for the hashable kinds.
/// - Renders values for the REPL and drivers.
pub mod value;
