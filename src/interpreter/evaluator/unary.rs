use crate::{
    ast::{Expr, PostfixOperator, PrefixOperator},
    error::RuntimeError,
    interpreter::{
        environment::{self, EnvRef},
        evaluator::core::eval_expression,
        value::Value,
    },
};

/// Evaluates a prefix operator application.
///
/// `!` and `-` are the only operators the evaluator knows; the prefix
/// forms of `++`/`--` parse but evaluate to an unknown-operator error.
pub fn eval_prefix(operator: PrefixOperator, right: &Expr, env: &EnvRef) -> Value {
    let right = eval_expression(right, env);
    if right.is_error() {
        return right;
    }

    match operator {
        PrefixOperator::Bang => eval_bang(&right),
        PrefixOperator::Minus => eval_minus(operator, &right),
        PrefixOperator::Increment | PrefixOperator::Decrement => {
            RuntimeError::UnknownPrefixOperator { operator,
                                                  right: right.kind() }.into()
        },
    }
}

/// Logical negation: `true`/`false` flip, `null` negates to `true`,
/// and every other value is truthy, so `!` yields `false`.
fn eval_bang(right: &Value) -> Value {
    match right {
        Value::Boolean(b) => Value::Boolean(!b),
        Value::Null => Value::Boolean(true),
        _ => Value::Boolean(false),
    }
}

/// Integer negation. Non-integers are an unknown-operator error.
fn eval_minus(operator: PrefixOperator, right: &Value) -> Value {
    match right {
        Value::Integer(n) => Value::Integer(n.wrapping_neg()),
        _ => RuntimeError::UnknownPrefixOperator { operator,
                                                   right: right.kind() }.into(),
    }
}

/// Evaluates a postfix `++`/`--` application.
///
/// Integers only: the operand's current value is returned and, when the
/// operand is an identifier, old±1 is written back into the scope that
/// defines it. The outward walk is what lets a closure increment a
/// captured counter. Non-integer operands yield `null`.
pub fn eval_postfix(operator: PostfixOperator, left: &Expr, env: &EnvRef) -> Value {
    let value = eval_expression(left, env);
    if value.is_error() {
        return value;
    }
    let Value::Integer(old) = value else {
        return Value::Null;
    };

    let updated = match operator {
        PostfixOperator::Increment => old.wrapping_add(1),
        PostfixOperator::Decrement => old.wrapping_sub(1),
    };

    if let Expr::Identifier { name, .. } = left {
        environment::rebind(env, name, Value::Integer(updated));
    }

    Value::Integer(old)
}
