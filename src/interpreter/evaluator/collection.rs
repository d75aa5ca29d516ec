use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::EnvRef,
        evaluator::core::{eval_expression, eval_expressions},
        value::{HashPair, Value},
    },
};

/// Evaluates an array literal.
///
/// Elements evaluate left to right; the first error becomes the result.
pub fn eval_array_literal(elements: &[Expr], env: &EnvRef) -> Value {
    match eval_expressions(elements, env) {
        Ok(values) => Value::from(values),
        Err(error) => error,
    }
}

/// Evaluates a hash literal.
///
/// Pairs evaluate in literal order, key before value. Keys must be
/// hashable (integer, boolean or string); anything else aborts
/// construction with an in-band error. A later duplicate key replaces
/// the earlier entry.
pub fn eval_hash_literal(pairs: &[(Expr, Expr)], env: &EnvRef) -> Value {
    let mut map = HashMap::with_capacity(pairs.len());

    for (key_expr, value_expr) in pairs {
        let key = eval_expression(key_expr, env);
        if key.is_error() {
            return key;
        }

        let Some(hash_key) = key.hash_key() else {
            return RuntimeError::UnusableHashKey { kind: key.kind() }.into();
        };

        let value = eval_expression(value_expr, env);
        if value.is_error() {
            return value;
        }

        map.insert(hash_key, HashPair { key, value });
    }

    Value::Hash(Rc::new(map))
}

/// Evaluates an index expression.
///
/// Arrays take integer indices and answer `null` for anything out of
/// range (negative included); hashes take hashable keys and answer
/// `null` for missing entries. Every other combination is an error
/// naming the indexed value's kind.
pub fn eval_index_expression(left: &Expr, index: &Expr, env: &EnvRef) -> Value {
    let left = eval_expression(left, env);
    if left.is_error() {
        return left;
    }
    let index = eval_expression(index, env);
    if index.is_error() {
        return index;
    }

    match (&left, &index) {
        (Value::Array(elements), Value::Integer(position)) => index_array(elements, *position),
        (Value::Hash(pairs), key) => match key.hash_key() {
            Some(hash_key) => pairs.get(&hash_key)
                                   .map_or(Value::Null, |pair| pair.value.clone()),
            None => RuntimeError::IndexNotSupported { kind: left.kind() }.into(),
        },
        _ => RuntimeError::IndexNotSupported { kind: left.kind() }.into(),
    }
}

/// Looks up one array element, yielding `null` outside `0..len`.
fn index_array(elements: &[Value], position: i64) -> Value {
    usize::try_from(position).ok()
                             .and_then(|position| elements.get(position))
                             .cloned()
                             .unwrap_or(Value::Null)
}
