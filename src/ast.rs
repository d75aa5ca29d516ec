use std::{collections::BTreeMap, fmt};

/// Represents a complete parsed program.
///
/// A program is the root of the abstract syntax tree: an ordered list of
/// top-level statements produced by the parser and consumed by the
/// evaluator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// The top-level statements in source order.
    pub statements: Vec<Statement>,
}

/// A braced sequence of statements.
///
/// Blocks appear as the bodies of functions, conditionals and loops. A
/// block does not open a scope by itself; the constructs that own one
/// decide how it is evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements inside the braces, in source order.
    pub statements: Vec<Statement>,
    /// Line number of the opening brace.
    pub line:       usize,
}

/// An anonymous function literal such as `fn(x, y) { x + y }`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    /// Parameter names, in declaration order.
    pub parameters: Vec<String>,
    /// The function body.
    pub body:       Block,
    /// Line number of the `fn` keyword.
    pub line:       usize,
}

/// A single `let` binding: `let <name> = <value>`.
///
/// Used both as a statement and as a class member declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct LetBinding {
    /// The bound identifier.
    pub name:  String,
    /// The initializer expression.
    pub value: Expr,
    /// Line number of the `let` keyword.
    pub line:  usize,
}

/// A named function statement: `function <name>(params) { body }`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedFunction {
    /// The declared function name.
    pub name:     String,
    /// The underlying function literal.
    pub function: FunctionLiteral,
    /// Line number of the `function` keyword.
    pub line:     usize,
}

/// A class body: member `let` declarations plus named methods.
///
/// Class bodies are restricted at parse time to these two statement
/// kinds. Methods are keyed by method name.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassLiteral {
    /// The class name (filled in by the surrounding class statement).
    pub name:    String,
    /// Member declarations, in source order.
    pub members: Vec<LetBinding>,
    /// Methods keyed by method name.
    pub methods: BTreeMap<String, NamedFunction>,
    /// Line number of the `class` keyword or opening brace.
    pub line:    usize,
}

/// A statement node.
///
/// Statements do not produce values themselves; the evaluator assigns
/// every statement a result (often `null`) so that a program evaluates
/// to exactly one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A `let` binding.
    Let(LetBinding),
    /// A `return` statement.
    Return {
        /// The returned expression.
        value: Expr,
        /// Line number of the `return` keyword.
        line:  usize,
    },
    /// A bare expression used as a statement.
    Expression {
        /// The wrapped expression.
        expr: Expr,
        /// Line number of the expression's first token.
        line: usize,
    },
    /// A named function declaration.
    Function(NamedFunction),
    /// A class declaration.
    Class {
        /// The declared class name.
        name:  String,
        /// Members and methods of the class.
        class: ClassLiteral,
        /// Line number of the `class` keyword.
        line:  usize,
    },
}

/// An expression node.
///
/// Expressions produce values. Every syntactic form of the language is
/// one of these variants; the evaluator matches on them exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A variable reference.
    Identifier {
        /// The referenced name.
        name: String,
        /// Line number of the identifier token.
        line: usize,
    },
    /// A 64-bit signed integer literal.
    Integer {
        /// The literal value.
        value: i64,
        /// Line number of the literal token.
        line:  usize,
    },
    /// A string literal.
    Str {
        /// The literal contents, without the surrounding quotes.
        value: String,
        /// Line number of the literal token.
        line:  usize,
    },
    /// A boolean literal, `true` or `false`.
    Boolean {
        /// The literal value.
        value: bool,
        /// Line number of the literal token.
        line:  usize,
    },
    /// An array literal, `[e1, e2, ...]`.
    Array {
        /// Element expressions in source order.
        elements: Vec<Expr>,
        /// Line number of the opening bracket.
        line:     usize,
    },
    /// A hash literal, `{k1: v1, k2: v2, ...}`.
    ///
    /// Keys may be arbitrary expressions; whether a key is hashable is
    /// only known once it evaluates.
    Hash {
        /// Key/value expression pairs in source order.
        pairs: Vec<(Expr, Expr)>,
        /// Line number of the opening brace.
        line:  usize,
    },
    /// A prefix operator application such as `!ok` or `-x`.
    Prefix {
        /// The operator.
        operator: PrefixOperator,
        /// The operand.
        right:    Box<Expr>,
        /// Line number of the operator token.
        line:     usize,
    },
    /// An infix operator application such as `a + b`.
    Infix {
        /// Left operand.
        left:     Box<Expr>,
        /// The operator.
        operator: InfixOperator,
        /// Right operand.
        right:    Box<Expr>,
        /// Line number of the operator token.
        line:     usize,
    },
    /// A postfix operator application such as `i++`.
    Postfix {
        /// The operand.
        left:     Box<Expr>,
        /// The operator.
        operator: PostfixOperator,
        /// Line number of the operator token.
        line:     usize,
    },
    /// A conditional expression with optional alternative.
    If {
        /// The condition.
        condition:   Box<Expr>,
        /// Block evaluated when the condition is truthy.
        consequence: Block,
        /// Block evaluated otherwise, if present.
        alternative: Option<Block>,
        /// Line number of the `if` keyword.
        line:        usize,
    },
    /// A `while` loop.
    While {
        /// The loop condition.
        condition: Box<Expr>,
        /// The loop body.
        body:      Block,
        /// Line number of the `while` keyword.
        line:      usize,
    },
    /// A C-style `for` loop: `for (init; cond; update) { body }`.
    For {
        /// The initializer expression.
        init:      Box<Expr>,
        /// The loop condition.
        condition: Box<Expr>,
        /// The per-iteration update expression.
        update:    Box<Expr>,
        /// The loop body.
        body:      Block,
        /// Line number of the `for` keyword.
        line:      usize,
    },
    /// An anonymous function literal.
    Function(FunctionLiteral),
    /// A call expression: `callee(arg1, arg2, ...)`.
    Call {
        /// The called expression.
        callee:    Box<Expr>,
        /// Argument expressions in source order.
        arguments: Vec<Expr>,
        /// Line number of the opening parenthesis.
        line:      usize,
    },
    /// An index expression: `left[index]`.
    Index {
        /// The indexed expression.
        left:  Box<Expr>,
        /// The index expression.
        index: Box<Expr>,
        /// Line number of the opening bracket.
        line:  usize,
    },
    /// An assignment expression: `target = value`.
    Assign {
        /// The assignment target.
        target: Box<Expr>,
        /// The assigned expression.
        value:  Box<Expr>,
        /// Line number of the `=` token.
        line:   usize,
    },
    /// An instantiation: `new` followed by a constructor call.
    ///
    /// The parser desugars `new Dog()` to a `New` node holding only the
    /// callee.
    New {
        /// The expression naming the class.
        class: Box<Expr>,
        /// Line number of the `new` keyword.
        line:  usize,
    },
    /// A member access or method call: `object.call`.
    MethodCall {
        /// The receiver expression.
        object: Box<Expr>,
        /// The member identifier or call expression.
        call:   Box<Expr>,
        /// Line number of the `.` token.
        line:   usize,
    },
    /// An anonymous class body (the payload of a class statement).
    ClassLiteral(ClassLiteral),
}

/// A prefix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrefixOperator {
    /// Logical negation (`!x`).
    Bang,
    /// Arithmetic negation (`-x`).
    Minus,
    /// Prefix increment (`++x`). Parsed but rejected by the evaluator.
    Increment,
    /// Prefix decrement (`--x`). Parsed but rejected by the evaluator.
    Decrement,
}

/// An infix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InfixOperator {
    /// Addition (`+`), also string concatenation.
    Add,
    /// Subtraction (`-`).
    Sub,
    /// Multiplication (`*`).
    Mul,
    /// Division (`/`), truncating toward zero.
    Div,
    /// Less than (`<`).
    Less,
    /// Greater than (`>`).
    Greater,
    /// Equality (`==`).
    Equal,
    /// Inequality (`!=`).
    NotEqual,
}

/// A postfix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PostfixOperator {
    /// Postfix increment (`i++`).
    Increment,
    /// Postfix decrement (`i--`).
    Decrement,
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Bang => "!",
            Self::Minus => "-",
            Self::Increment => "++",
            Self::Decrement => "--",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for PostfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Increment => "++",
            Self::Decrement => "--",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl fmt::Display for LetBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "let {} = {};", self.name, self.value)
    }
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn({}) {}", self.parameters.join(", "), self.body)
    }
}

impl fmt::Display for NamedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "function {}({}) {}",
               self.name,
               self.function.parameters.join(", "),
               self.function.body)
    }
}

impl fmt::Display for ClassLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class {} {{", self.name)?;
        for member in &self.members {
            write!(f, "{member}")?;
        }
        for method in self.methods.values() {
            write!(f, "{method}")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Let(binding) => write!(f, "{binding}"),
            Self::Return { value, .. } => write!(f, "return {value};"),
            Self::Expression { expr, .. } => write!(f, "{expr}"),
            Self::Function(function) => write!(f, "{function}"),
            Self::Class { class, .. } => write!(f, "{class}"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier { name, .. } => write!(f, "{name}"),
            Self::Integer { value, .. } => write!(f, "{value}"),
            Self::Str { value, .. } => write!(f, "{value}"),
            Self::Boolean { value, .. } => write!(f, "{value}"),
            Self::Array { elements, .. } => {
                write!(f, "[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            },
            Self::Hash { pairs, .. } => {
                write!(f, "{{")?;
                for (index, (key, value)) in pairs.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            },
            Self::Prefix { operator, right, .. } => write!(f, "({operator}{right})"),
            Self::Infix { left,
                          operator,
                          right,
                          .. } => write!(f, "({left} {operator} {right})"),
            Self::Postfix { left, operator, .. } => write!(f, "({left}{operator})"),
            Self::If { condition,
                       consequence,
                       alternative,
                       .. } => {
                write!(f, "if {condition} {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {alternative}")?;
                }
                Ok(())
            },
            Self::While { condition, body, .. } => write!(f, "while {condition} {body}"),
            Self::For { init,
                        condition,
                        update,
                        body,
                        .. } => write!(f, "for ({init}; {condition}; {update}) {body}"),
            Self::Function(function) => write!(f, "{function}"),
            Self::Call { callee, arguments, .. } => {
                write!(f, "{callee}(")?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            },
            Self::Index { left, index, .. } => write!(f, "({left}[{index}])"),
            Self::Assign { target, value, .. } => write!(f, "{target} = {value}"),
            Self::New { class, .. } => write!(f, "new {class}"),
            Self::MethodCall { object, call, .. } => write!(f, "{object}.{call}"),
            Self::ClassLiteral(class) => write!(f, "{class}"),
        }
    }
}
