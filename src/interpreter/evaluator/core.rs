use crate::{
    ast::{Block, Expr, Program, Statement},
    error::RuntimeError,
    interpreter::{
        environment::EnvRef,
        evaluator::{binary, builtin, class, collection, function, loops, unary},
        value::Value,
    },
};

/// Evaluates a whole program against an environment.
///
/// Statements run in order. A `return` produced at the top level is
/// unwrapped and becomes the program result; an error value becomes the
/// result immediately. Otherwise the program evaluates to the value of
/// its last statement, or `null` for an empty program.
///
/// # Example
/// ```
/// use scripta::interpreter::{
///     environment::Environment,
///     evaluator::eval_program,
///     lexer::Lexer,
///     parser::Parser,
///     value::Value,
/// };
///
/// let mut parser = Parser::new(Lexer::new("let x = 2; x * 3"));
/// let program = parser.parse_program();
/// assert!(parser.errors().is_empty());
///
/// let env = Environment::new();
/// assert_eq!(eval_program(&program, &env), Value::Integer(6));
/// ```
#[must_use]
pub fn eval_program(program: &Program, env: &EnvRef) -> Value {
    let mut result = Value::Null;

    for statement in &program.statements {
        match eval_statement(statement, env) {
            Value::Return(inner) => return *inner,
            error @ Value::Error(_) => return error,
            value => result = value,
        }
    }
    result
}

/// Evaluates a block of statements in the given environment.
///
/// Unlike [`eval_program`], a `return` sentinel is NOT unwrapped here:
/// it stops the block and propagates unchanged, so that the enclosing
/// function application can unwrap it exactly once. Errors stop the
/// block the same way.
#[must_use]
pub fn eval_block(block: &Block, env: &EnvRef) -> Value {
    let mut result = Value::Null;

    for statement in &block.statements {
        match eval_statement(statement, env) {
            stop @ (Value::Return(_) | Value::Error(_)) => return stop,
            value => result = value,
        }
    }
    result
}

/// Evaluates a single statement.
///
/// Binding statements (`let`, `function`, `class`) evaluate to `null`
/// after installing their binding; expression statements evaluate to
/// the expression's value; `return` wraps its value in the sentinel.
#[must_use]
pub fn eval_statement(statement: &Statement, env: &EnvRef) -> Value {
    match statement {
        Statement::Let(binding) => {
            let value = eval_expression(&binding.value, env);
            if value.is_error() {
                return value;
            }
            env.borrow_mut().set(binding.name.clone(), value);
            Value::Null
        },
        Statement::Return { value, .. } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return value;
            }
            Value::Return(Box::new(value))
        },
        Statement::Expression { expr, .. } => eval_expression(expr, env),
        Statement::Function(named) => {
            let function = function::eval_function_literal(&named.function, env);
            env.borrow_mut().set(named.name.clone(), function);
            Value::Null
        },
        Statement::Class { name, class, .. } => {
            let value = class::eval_class_literal(class);
            env.borrow_mut().set(name.clone(), value);
            Value::Null
        },
    }
}

/// Evaluates a single expression.
///
/// This is the evaluator's central dispatch; each variant delegates to
/// the module implementing that form.
#[must_use]
pub fn eval_expression(expr: &Expr, env: &EnvRef) -> Value {
    match expr {
        Expr::Identifier { name, .. } => eval_identifier(name, env),
        Expr::Integer { value, .. } => Value::Integer(*value),
        Expr::Str { value, .. } => Value::from(value.as_str()),
        Expr::Boolean { value, .. } => Value::Boolean(*value),
        Expr::Array { elements, .. } => collection::eval_array_literal(elements, env),
        Expr::Hash { pairs, .. } => collection::eval_hash_literal(pairs, env),
        Expr::Prefix { operator, right, .. } => unary::eval_prefix(*operator, right, env),
        Expr::Infix { left,
                      operator,
                      right,
                      .. } => binary::eval_infix(*operator, left, right, env),
        Expr::Postfix { left, operator, .. } => unary::eval_postfix(*operator, left, env),
        Expr::If { condition,
                   consequence,
                   alternative,
                   .. } => eval_if(condition, consequence, alternative.as_ref(), env),
        Expr::While { condition, body, .. } => loops::eval_while(condition, body, env),
        Expr::For { init,
                    condition,
                    update,
                    body,
                    .. } => loops::eval_for(init, condition, update, body, env),
        Expr::Function(literal) => function::eval_function_literal(literal, env),
        Expr::Call { callee, arguments, .. } => function::eval_call(callee, arguments, env),
        Expr::Index { left, index, .. } => collection::eval_index_expression(left, index, env),
        Expr::Assign { target, value, .. } => eval_assign(target, value, env),
        Expr::New { class, .. } => class::eval_new(class, env),
        Expr::MethodCall { object, call, .. } => class::eval_method_call(object, call, env),
        Expr::ClassLiteral(literal) => class::eval_class_literal(literal),
    }
}

/// Resolves an identifier.
///
/// The environment chain is consulted first; names not bound anywhere
/// fall back to the builtin table, and anything still unresolved is an
/// in-band error.
fn eval_identifier(name: &str, env: &EnvRef) -> Value {
    if let Some(value) = env.borrow().get(name) {
        return value;
    }
    if let Some(def) = builtin::lookup(name) {
        return Value::Builtin(def);
    }
    RuntimeError::IdentifierNotFound { name: name.to_owned() }.into()
}

/// Evaluates a conditional expression.
///
/// Only `null` and `false` fail the condition; a missing alternative
/// makes the whole expression `null`.
fn eval_if(condition: &Expr,
           consequence: &Block,
           alternative: Option<&Block>,
           env: &EnvRef)
           -> Value {
    let condition = eval_expression(condition, env);
    if condition.is_error() {
        return condition;
    }

    if condition.is_truthy() {
        eval_block(consequence, env)
    } else if let Some(alternative) = alternative {
        eval_block(alternative, env)
    } else {
        Value::Null
    }
}

/// Evaluates an assignment expression.
///
/// The target must reduce to a name: an identifier directly, or the
/// root identifier under an index chain. The index itself is NOT
/// re-applied, so `a[0] = x` rebinds `a` wholesale. The binding is
/// updated in the local scope only (`reset` does not walk outward);
/// assignment to a captured outer variable therefore shadows it. The
/// expression evaluates to the assigned value, or `null` when no name
/// can be extracted.
fn eval_assign(target: &Expr, value: &Expr, env: &EnvRef) -> Value {
    let value = eval_expression(value, env);
    if value.is_error() {
        return value;
    }

    match assignment_name(target) {
        Some(name) => {
            env.borrow_mut().reset(name, value.clone());
            value
        },
        None => Value::Null,
    }
}

/// Extracts the bound name from an assignment target.
fn assignment_name(target: &Expr) -> Option<&str> {
    match target {
        Expr::Identifier { name, .. } => Some(name),
        Expr::Index { left, .. } => assignment_name(left),
        _ => None,
    }
}

/// Evaluates a list of expressions left to right.
///
/// The first error aborts the walk and is returned as the `Err` value.
pub(crate) fn eval_expressions(exprs: &[Expr], env: &EnvRef) -> Result<Vec<Value>, Value> {
    let mut values = Vec::with_capacity(exprs.len());

    for expr in exprs {
        let value = eval_expression(expr, env);
        if value.is_error() {
            return Err(value);
        }
        values.push(value);
    }
    Ok(values)
}
