use crate::{
    ast::{Block, Expr},
    interpreter::{
        environment::{EnvRef, Environment},
        evaluator::core::{eval_block, eval_expression},
        value::Value,
    },
};

/// Evaluates a `while` loop.
///
/// Condition and body share one enclosed scope created per `while`
/// node. A body-local `let` therefore shadows an outer binding for the
/// rest of the loop (the condition sees the shadow and can terminate)
/// while the outer binding stays untouched. The loop itself evaluates
/// to `null`; `return` sentinels and errors from the body propagate
/// out.
pub fn eval_while(condition: &Expr, body: &Block, env: &EnvRef) -> Value {
    let loop_env = Environment::enclosed(env);

    loop {
        let condition = eval_expression(condition, &loop_env);
        if condition.is_error() {
            return condition;
        }
        if !condition.is_truthy() {
            return Value::Null;
        }

        let result = eval_block(body, &loop_env);
        if matches!(result, Value::Return(_) | Value::Error(_)) {
            return result;
        }
    }
}

/// Evaluates a `for (init; cond; update)` loop.
///
/// One enclosed loop scope holds the initializer binding and is where
/// the condition and update run. Each iteration evaluates the body in
/// a fresh child scope, so body-local `let` bindings cannot leak from
/// one iteration into the next. The loop evaluates to the last body
/// value, or `null` when the body never ran.
pub fn eval_for(init: &Expr, condition: &Expr, update: &Expr, body: &Block, env: &EnvRef) -> Value {
    let loop_env = Environment::enclosed(env);

    let init = eval_expression(init, &loop_env);
    if init.is_error() {
        return init;
    }

    let mut last = Value::Null;
    loop {
        let condition = eval_expression(condition, &loop_env);
        if condition.is_error() {
            return condition;
        }
        if !condition.is_truthy() {
            return last;
        }

        let iteration_env = Environment::enclosed(&loop_env);
        let result = eval_block(body, &iteration_env);
        if matches!(result, Value::Return(_) | Value::Error(_)) {
            return result;
        }
        last = result;

        let update = eval_expression(update, &loop_env);
        if update.is_error() {
            return update;
        }
    }
}
