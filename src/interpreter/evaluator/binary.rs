use std::rc::Rc;

use crate::{
    ast::{Expr, InfixOperator},
    error::RuntimeError,
    interpreter::{
        environment::EnvRef,
        evaluator::core::eval_expression,
        value::{Value, ValueKind},
    },
};

/// Evaluates an infix operator application.
///
/// Both operands evaluate left to right; the first error wins.
pub fn eval_infix(operator: InfixOperator, left: &Expr, right: &Expr, env: &EnvRef) -> Value {
    let left = eval_expression(left, env);
    if left.is_error() {
        return left;
    }
    let right = eval_expression(right, env);
    if right.is_error() {
        return right;
    }

    eval_infix_values(operator, &left, &right)
}

/// Applies an infix operator to two evaluated values.
///
/// Dispatch order matters and is part of the language:
/// 1. two integers use integer arithmetic and comparisons;
/// 2. `==`/`!=` on anything else compare identity; mixed kinds are
///    simply unequal, never a type mismatch;
/// 3. two strings concatenate under `+` and reject other operators;
/// 4. remaining mixed kinds are a type mismatch, same kinds an unknown
///    operator.
pub fn eval_infix_values(operator: InfixOperator, left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),

        _ if operator == InfixOperator::Equal => Value::Boolean(identity_eq(left, right)),
        _ if operator == InfixOperator::NotEqual => Value::Boolean(!identity_eq(left, right)),

        (Value::Str(l), Value::Str(r)) => eval_string_infix(operator, l, r),

        _ if left.kind() != right.kind() => RuntimeError::TypeMismatch { left: left.kind(),
                                                                         operator,
                                                                         right: right.kind() }.into(),

        _ => RuntimeError::UnknownInfixOperator { left: left.kind(),
                                                  operator,
                                                  right: right.kind() }.into(),
    }
}

/// Integer arithmetic and comparisons.
///
/// Addition, subtraction and multiplication wrap on overflow; division
/// truncates toward zero and rejects a zero divisor in-band.
fn eval_integer_infix(operator: InfixOperator, left: i64, right: i64) -> Value {
    match operator {
        InfixOperator::Add => Value::Integer(left.wrapping_add(right)),
        InfixOperator::Sub => Value::Integer(left.wrapping_sub(right)),
        InfixOperator::Mul => Value::Integer(left.wrapping_mul(right)),
        InfixOperator::Div => {
            if right == 0 {
                RuntimeError::DivisionByZero.into()
            } else {
                Value::Integer(left.wrapping_div(right))
            }
        },
        InfixOperator::Less => Value::Boolean(left < right),
        InfixOperator::Greater => Value::Boolean(left > right),
        InfixOperator::Equal => Value::Boolean(left == right),
        InfixOperator::NotEqual => Value::Boolean(left != right),
    }
}

/// String operators: only `+` (concatenation) is supported.
fn eval_string_infix(operator: InfixOperator, left: &Rc<String>, right: &Rc<String>) -> Value {
    if operator == InfixOperator::Add {
        let mut combined = String::with_capacity(left.len() + right.len());
        combined.push_str(left);
        combined.push_str(right);
        Value::from(combined)
    } else {
        RuntimeError::UnknownInfixOperator { left: ValueKind::Str,
                                             operator,
                                             right: ValueKind::Str }.into()
    }
}

/// Identity comparison for the `==`/`!=` fast path.
///
/// Booleans, null and integers compare by value; every shared variant
/// compares by pointer. Two separately built strings with equal
/// contents are therefore NOT `==` in the language; only clones of one
/// value are. Mixed kinds are always unequal.
fn identity_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Null, Value::Null) => true,
        (Value::Str(a), Value::Str(b)) => Rc::ptr_eq(a, b),
        (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
        (Value::Hash(a), Value::Hash(b)) => Rc::ptr_eq(a, b),
        (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
        (Value::Builtin(a), Value::Builtin(b)) => std::ptr::eq(*a, *b),
        (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
        (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}
