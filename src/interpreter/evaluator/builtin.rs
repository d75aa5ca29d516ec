use crate::{
    error::RuntimeError,
    interpreter::value::{Arity, BuiltinDef, Value},
};

/// Defines the builtin functions by generating the lookup table and a
/// public name list.
///
/// Each entry provides a name, an arity specification and a function
/// pointer. Arity is enforced centrally in [`apply`], so the
/// implementations can index their arguments directly.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// The names of all builtin functions.
        pub const BUILTIN_NAMES: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "len"    => { arity: Arity::Exact(1), func: len },
    "first"  => { arity: Arity::Exact(1), func: first },
    "last"   => { arity: Arity::Exact(1), func: last },
    "rest"   => { arity: Arity::Exact(1), func: rest },
    "push"   => { arity: Arity::Exact(2), func: push },
    "puts"   => { arity: Arity::Any, func: puts },
    "assert" => { arity: Arity::Exact(1), func: assert_fn },
}

/// Looks a builtin up by name.
///
/// Identifier resolution falls back to this table after the
/// environment chain comes up empty.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static BuiltinDef> {
    BUILTIN_TABLE.iter().find(|builtin| builtin.name == name)
}

/// Applies a builtin to already-evaluated arguments.
///
/// The table's arity is checked here; implementations only run with an
/// acceptable argument count.
#[must_use]
pub fn apply(def: &BuiltinDef, args: &[Value]) -> Value {
    if let Arity::Exact(want) = def.arity
       && args.len() != want
    {
        return RuntimeError::WrongArgumentCount { got: args.len(),
                                                  want }.into();
    }
    (def.func)(args)
}

/// Converts a host length into an integer value.
fn length_value(length: usize) -> Value {
    i64::try_from(length).map_or(Value::Integer(i64::MAX), Value::Integer)
}

/// `len(x)`: byte length of a string or element count of an array.
fn len(args: &[Value]) -> Value {
    match &args[0] {
        Value::Str(s) => length_value(s.len()),
        Value::Array(elements) => length_value(elements.len()),
        other => RuntimeError::BuiltinArgUnsupported { name: "len",
                                                       kind: other.kind() }.into(),
    }
}

/// `first(array)`: the first element, or `null` when empty.
fn first(args: &[Value]) -> Value {
    match &args[0] {
        Value::Array(elements) => elements.first().cloned().unwrap_or(Value::Null),
        other => RuntimeError::BuiltinArgUnsupported { name: "first",
                                                       kind: other.kind() }.into(),
    }
}

/// `last(array)`: the last element, or `null` when empty.
fn last(args: &[Value]) -> Value {
    match &args[0] {
        Value::Array(elements) => elements.last().cloned().unwrap_or(Value::Null),
        other => RuntimeError::BuiltinArgUnsupported { name: "last",
                                                       kind: other.kind() }.into(),
    }
}

/// `rest(array)`: a new array of everything after the first element,
/// or `null` when empty.
fn rest(args: &[Value]) -> Value {
    match &args[0] {
        Value::Array(elements) => {
            if elements.is_empty() {
                Value::Null
            } else {
                Value::from(elements[1..].to_vec())
            }
        },
        other => RuntimeError::BuiltinArgUnsupported { name: "rest",
                                                       kind: other.kind() }.into(),
    }
}

/// `push(array, value)`: a new array with the value appended.
///
/// Arrays are immutable values; the original is untouched.
fn push(args: &[Value]) -> Value {
    match &args[0] {
        Value::Array(elements) => {
            let mut extended = elements.as_ref().clone();
            extended.push(args[1].clone());
            Value::from(extended)
        },
        other => RuntimeError::BuiltinArgUnsupported { name: "push",
                                                       kind: other.kind() }.into(),
    }
}

/// `puts(...)`: prints each argument on its own line; returns `null`.
fn puts(args: &[Value]) -> Value {
    for arg in args {
        println!("{arg}");
    }
    Value::Null
}

/// `assert(x)`: `null` when truthy, an assertion error otherwise.
fn assert_fn(args: &[Value]) -> Value {
    if args[0].is_truthy() {
        Value::Null
    } else {
        RuntimeError::AssertionFailed.into()
    }
}
