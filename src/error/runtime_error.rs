use crate::{
    ast::{InfixOperator, PrefixOperator},
    interpreter::value::ValueKind,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all error conditions that can arise during evaluation.
///
/// Runtime errors are carried inside [`Value::Error`] and travel in-band
/// through the evaluator; the rendered messages below are observable
/// language behavior and must not change casually.
///
/// [`Value::Error`]: crate::interpreter::value::Value::Error
pub enum RuntimeError {
    /// A name was neither bound in any scope nor a builtin.
    IdentifierNotFound {
        /// The unresolved name.
        name: String,
    },
    /// A prefix operator was applied to an unsupported operand.
    UnknownPrefixOperator {
        /// The operator.
        operator: PrefixOperator,
        /// The operand's kind.
        right:    ValueKind,
    },
    /// An infix operator was applied to unsupported operands of one kind.
    UnknownInfixOperator {
        /// The left operand's kind.
        left:     ValueKind,
        /// The operator.
        operator: InfixOperator,
        /// The right operand's kind.
        right:    ValueKind,
    },
    /// An infix operator was applied to operands of different kinds.
    TypeMismatch {
        /// The left operand's kind.
        left:     ValueKind,
        /// The operator.
        operator: InfixOperator,
        /// The right operand's kind.
        right:    ValueKind,
    },
    /// Something other than a function or builtin was called.
    NotAFunction {
        /// The called value's kind.
        kind: ValueKind,
    },
    /// Something other than a class was instantiated with `new`.
    NotAClass {
        /// The instantiated value's kind.
        kind: ValueKind,
    },
    /// A method call was performed on something other than an instance.
    NotAnInstance {
        /// The receiver's kind.
        kind: ValueKind,
    },
    /// The index operator was applied to an unsupported combination.
    IndexNotSupported {
        /// The indexed value's kind.
        kind: ValueKind,
    },
    /// A hash key evaluated to an unhashable kind.
    UnusableHashKey {
        /// The offending key's kind.
        kind: ValueKind,
    },
    /// A function or builtin received the wrong number of arguments.
    WrongArgumentCount {
        /// How many arguments were supplied.
        got:  usize,
        /// How many arguments were required.
        want: usize,
    },
    /// A builtin received an argument of an unsupported kind.
    BuiltinArgUnsupported {
        /// The builtin's name.
        name: &'static str,
        /// The offending argument's kind.
        kind: ValueKind,
    },
    /// An integer division had a zero divisor.
    DivisionByZero,
    /// An `assert` call received a falsy argument.
    AssertionFailed,
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdentifierNotFound { name } => write!(f, "identifier not found: {name}"),

            Self::UnknownPrefixOperator { operator, right } => {
                write!(f, "unknown operator: {operator}{right}")
            },

            Self::UnknownInfixOperator { left,
                                         operator,
                                         right, } => {
                write!(f, "unknown operator: {left} {operator} {right}")
            },

            Self::TypeMismatch { left,
                                 operator,
                                 right, } => {
                write!(f, "type mismatch: {left} {operator} {right}")
            },

            Self::NotAFunction { kind } => write!(f, "not a function: {kind}"),

            Self::NotAClass { kind } => write!(f, "not a class: {kind}"),

            Self::NotAnInstance { kind } => write!(f, "not an instance: {kind}"),

            Self::IndexNotSupported { kind } => {
                write!(f, "index operator not supported: {kind}")
            },

            Self::UnusableHashKey { kind } => write!(f, "unusable as hash key: {kind}"),

            Self::WrongArgumentCount { got, want } => {
                write!(f, "wrong number of arguments. got={got}, want={want}")
            },

            Self::BuiltinArgUnsupported { name, kind } => {
                write!(f, "argument to `{name}` not supported, got={kind}")
            },

            Self::DivisionByZero => write!(f, "division by zero"),

            Self::AssertionFailed => write!(f, "assertion failed"),
        }
    }
}

impl std::error::Error for RuntimeError {}
