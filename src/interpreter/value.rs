use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    rc::Rc,
};

use crate::{
    ast::{Block, Expr, FunctionLiteral, LetBinding},
    error::RuntimeError,
    interpreter::environment::EnvRef,
};

/// FNV-1a 64-bit offset basis.
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
/// FNV-1a 64-bit prime.
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Represents a runtime value in the interpreter.
///
/// This enum models every type a program can produce: scalars, the
/// shared composites (arrays, hashes), callable values, classes and
/// their instances, the `return` sentinel, in-band errors, and quoted
/// syntax.
///
/// Composite variants share their payload through `Rc`, so cloning a
/// value is cheap and two clones of one array refer to the same
/// storage. The language-level `==` compares non-integer values by
/// identity, which these shared pointers make observable.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A boolean, `true` or `false`.
    Boolean(bool),
    /// The null value.
    Null,
    /// An immutable string.
    Str(Rc<String>),
    /// An ordered sequence of values.
    Array(Rc<Vec<Value>>),
    /// A mapping from hash keys to key/value pairs.
    Hash(Rc<HashMap<HashKey, HashPair>>),
    /// A user-defined function together with its captured environment.
    Function(Rc<Function>),
    /// A host-provided builtin function.
    Builtin(&'static BuiltinDef),
    /// The sentinel wrapping a `return`ed value.
    ///
    /// Unwrapped exactly once: at a function-application boundary or at
    /// the program top level.
    Return(Box<Value>),
    /// An in-band runtime error.
    Error(RuntimeError),
    /// An unevaluated expression captured by `quote`.
    Quote(Box<Expr>),
    /// A class: member declarations plus methods.
    Class(Rc<Class>),
    /// An instance of a class with its own environment.
    Instance(Rc<Instance>),
}

/// A user-defined function value.
///
/// The environment reference points at the scope the function literal
/// was evaluated in; every application encloses that same environment,
/// which is what makes closures close over variables rather than
/// values.
pub struct Function {
    /// Parameter names, in declaration order.
    pub parameters: Vec<String>,
    /// The function body.
    pub body:       Block,
    /// The environment captured at the definition site.
    pub env:        EnvRef,
}

/// A class value: the blueprint evaluated from a class declaration.
///
/// Members and methods are stored as syntax; they are evaluated into an
/// instance environment each time `new` runs.
#[derive(Debug)]
pub struct Class {
    /// The class name.
    pub name:    String,
    /// Member declarations, in source order.
    pub members: Vec<LetBinding>,
    /// Method bodies keyed by method name.
    pub methods: BTreeMap<String, FunctionLiteral>,
}

/// An instance value: a shared class plus an exclusive environment.
///
/// The instance environment holds the evaluated members and the bound
/// methods; method bodies resolve sibling members through it.
pub struct Instance {
    /// The instantiated class.
    pub class: Rc<Class>,
    /// The per-instance environment.
    pub env:   EnvRef,
}

/// The type of a builtin implementation.
///
/// A builtin receives the evaluated argument values and produces a
/// value; failures are in-band error values like everywhere else.
pub type BuiltinFn = fn(&[Value]) -> Value;

/// How many arguments a builtin accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// Any number of arguments.
    Any,
}

/// A builtin function table entry: name, arity and implementation.
pub struct BuiltinDef {
    /// The builtin's name as written in programs.
    pub name:  &'static str,
    /// The accepted argument count.
    pub arity: Arity,
    /// The host implementation.
    pub func:  BuiltinFn,
}

impl fmt::Debug for BuiltinDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinDef")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The captured environment may contain this very function;
        // printing it would recurse forever.
        f.debug_struct("Function")
         .field("parameters", &self.parameters)
         .field("body", &self.body)
         .finish_non_exhaustive()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
         .field("class", &self.class.name)
         .finish_non_exhaustive()
    }
}

/// The kind tag of a [`Value`], used in error messages and hash keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// An integer.
    Integer,
    /// A boolean.
    Boolean,
    /// The null value.
    Null,
    /// A string.
    Str,
    /// An array.
    Array,
    /// A hash.
    Hash,
    /// A user-defined function.
    Function,
    /// A builtin function.
    Builtin,
    /// The return sentinel.
    Return,
    /// An in-band error.
    Error,
    /// Quoted syntax.
    Quote,
    /// A class.
    Class,
    /// A class instance.
    Instance,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "INTEGER",
            Self::Boolean => "BOOLEAN",
            Self::Null => "NULL",
            Self::Str => "STRING",
            Self::Array => "ARRAY",
            Self::Hash => "HASH",
            Self::Function => "FUNCTION",
            Self::Builtin => "BUILTIN",
            Self::Return => "RETURN_VALUE",
            Self::Error => "ERROR",
            Self::Quote => "QUOTE",
            Self::Class => "CLASS",
            Self::Instance => "INSTANCE",
        };
        write!(f, "{name}")
    }
}

/// A stable key derived from a hashable value.
///
/// The key combines the value's kind tag with a 64-bit number
/// (booleans map to 0/1, integers to their two's-complement bits, and
/// strings to the FNV-1a hash of their bytes), so keys of different
/// kinds never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    /// The kind of the value the key was derived from.
    pub kind:  ValueKind,
    /// The derived 64-bit hash.
    pub value: u64,
}

/// One entry of a hash value: the original key plus the mapped value.
///
/// The original key is kept alongside the derived [`HashKey`] so that
/// rendering a hash can show real keys.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    /// The key as written (an integer, boolean or string value).
    pub key:   Value,
    /// The mapped value.
    pub value: Value,
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(Rc::new(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(Rc::new(value.to_owned()))
    }
}

impl From<Vec<Self>> for Value {
    fn from(value: Vec<Self>) -> Self {
        Self::Array(Rc::new(value))
    }
}

impl From<RuntimeError> for Value {
    fn from(error: RuntimeError) -> Self {
        Self::Error(error)
    }
}

impl Value {
    /// Returns the kind tag of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Integer(_) => ValueKind::Integer,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Null => ValueKind::Null,
            Self::Str(_) => ValueKind::Str,
            Self::Array(_) => ValueKind::Array,
            Self::Hash(_) => ValueKind::Hash,
            Self::Function(_) => ValueKind::Function,
            Self::Builtin(_) => ValueKind::Builtin,
            Self::Return(_) => ValueKind::Return,
            Self::Error(_) => ValueKind::Error,
            Self::Quote(_) => ValueKind::Quote,
            Self::Class(_) => ValueKind::Class,
            Self::Instance(_) => ValueKind::Instance,
        }
    }

    /// Reports whether this value is an in-band error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Reports whether this value counts as true in a condition.
    ///
    /// Only `null` and `false` are falsy; every other value, including
    /// `0` and the empty string, is truthy.
    ///
    /// # Example
    /// ```
    /// use scripta::interpreter::value::Value;
    ///
    /// assert!(Value::Integer(0).is_truthy());
    /// assert!(Value::from("").is_truthy());
    /// assert!(!Value::Null.is_truthy());
    /// assert!(!Value::Boolean(false).is_truthy());
    /// ```
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Null | Self::Boolean(false))
    }

    /// Derives the stable hash key for this value.
    ///
    /// Only integers, booleans and strings are hashable; every other
    /// kind returns `None`.
    ///
    /// # Example
    /// ```
    /// use scripta::interpreter::value::Value;
    ///
    /// let a = Value::from("key").hash_key();
    /// let b = Value::from("key").hash_key();
    ///
    /// assert_eq!(a, b);
    /// assert!(a.is_some());
    /// assert!(Value::Null.hash_key().is_none());
    /// ```
    #[must_use]
    pub fn hash_key(&self) -> Option<HashKey> {
        let value = match self {
            Self::Integer(n) => n.cast_unsigned(),
            Self::Boolean(b) => u64::from(*b),
            Self::Str(s) => fnv1a(s.as_bytes()),
            _ => return None,
        };
        Some(HashKey { kind: self.kind(),
                       value })
    }
}

/// Computes the FNV-1a 64-bit hash of a byte slice.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter()
         .fold(FNV_OFFSET_BASIS, |hash, byte| {
             (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
         })
}

impl PartialEq for Value {
    /// Structural equality for data, identity for callables.
    ///
    /// This is host-side equality for tests and embedding code. The
    /// language's own `==` operator has different (identity-based)
    /// semantics and lives in the evaluator.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Null, Self::Null) => true,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Hash(a), Self::Hash(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => a.name == b.name,
            (Self::Return(a), Self::Return(b)) => a == b,
            (Self::Error(a), Self::Error(b)) => a == b,
            (Self::Quote(a), Self::Quote(b)) => a == b,
            (Self::Class(a), Self::Class(b)) => Rc::ptr_eq(a, b),
            (Self::Instance(a), Self::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    /// Renders the value the way the REPL prints it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Array(elements) => {
                write!(f, "[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            },
            Self::Hash(pairs) => {
                write!(f, "{{")?;
                for (index, pair) in pairs.values().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", pair.key, pair.value)?;
                }
                write!(f, "}}")
            },
            Self::Function(function) => {
                write!(f, "fn({}) {{ ... }}", function.parameters.join(", "))
            },
            Self::Builtin(_) => write!(f, "builtin function"),
            Self::Return(inner) => write!(f, "{inner}"),
            Self::Error(error) => write!(f, "ERROR: {error}"),
            Self::Quote(node) => write!(f, "QUOTE({node})"),
            Self::Class(class) => {
                write!(f, "<class:{}>{{", class.name)?;
                for (index, member) in class.members.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{member}")?;
                }
                write!(f, "}}")
            },
            Self::Instance(instance) => write!(f, "<Instance:{}>", instance.class.name),
        }
    }
}
