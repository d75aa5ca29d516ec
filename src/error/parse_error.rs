use crate::interpreter::lexer::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all diagnostics that can be recorded during parsing.
pub enum ParseError {
    /// The token after the current one did not match the expectation.
    UnexpectedToken {
        /// The token kind the parser required.
        expected: TokenKind,
        /// The token kind that was actually found.
        found:    TokenKind,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// No prefix parse rule exists for the current token.
    NoPrefixRule {
        /// The token kind that cannot start an expression.
        kind: TokenKind,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An integer literal did not fit into a 64-bit signed integer.
    InvalidIntegerLiteral {
        /// The literal text as written in the source.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A class body contained something other than members and methods.
    InvalidClassMember {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `new` was not followed by a constructor call.
    InvalidNewTarget {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { expected,
                                    found,
                                    line, } => {
                write!(f,
                       "line {line}: expected next token to be {expected}, got {found} instead")
            },

            Self::NoPrefixRule { kind, line } => {
                write!(f, "line {line}: no prefix parse function for {kind} found")
            },

            Self::InvalidIntegerLiteral { literal, line } => {
                write!(f, "line {line}: could not parse {literal} as integer")
            },

            Self::InvalidClassMember { line } => write!(f,
                                                        "line {line}: class bodies may only contain let members and function methods"),

            Self::InvalidNewTarget { line } => {
                write!(f, "line {line}: expected a constructor call after new")
            },
        }
    }
}

impl std::error::Error for ParseError {}
