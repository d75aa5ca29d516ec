use std::rc::Rc;

use crate::{
    ast::{Expr, FunctionLiteral},
    error::RuntimeError,
    interpreter::{
        environment::{EnvRef, Environment},
        evaluator::{
            builtin,
            core::{eval_block, eval_expression, eval_expressions},
        },
        value::{Function, Value},
    },
};

/// Evaluates a function literal into a function value.
///
/// The literal's parameters and body are captured together with a
/// reference to the CURRENT environment, not a snapshot of its
/// contents. Every later application encloses that same environment,
/// so the function closes over variables, not values.
pub fn eval_function_literal(literal: &FunctionLiteral, env: &EnvRef) -> Value {
    Value::Function(Rc::new(Function { parameters: literal.parameters.clone(),
                                       body:       literal.body.clone(),
                                       env:        Rc::clone(env), }))
}

/// Evaluates a call expression.
///
/// `quote` is the one special form: a callee spelled `quote` captures
/// its single argument unevaluated. Every other call evaluates the
/// callee, then the arguments left to right, then applies.
pub fn eval_call(callee: &Expr, arguments: &[Expr], env: &EnvRef) -> Value {
    if let Expr::Identifier { name, .. } = callee
       && name == "quote"
    {
        if arguments.len() != 1 {
            return RuntimeError::WrongArgumentCount { got:  arguments.len(),
                                                      want: 1, }.into();
        }
        return Value::Quote(Box::new(arguments[0].clone()));
    }

    let function = eval_expression(callee, env);
    if function.is_error() {
        return function;
    }

    let args = match eval_expressions(arguments, env) {
        Ok(args) => args,
        Err(error) => return error,
    };

    apply_function(&function, args)
}

/// Applies a callable value to already-evaluated arguments.
///
/// User functions get a fresh environment enclosed by their captured
/// one, with parameters bound positionally; the body's `return`
/// sentinel is unwrapped exactly once here. Builtins go through the
/// table's arity check. Anything else is not callable.
pub fn apply_function(function: &Value, args: Vec<Value>) -> Value {
    match function {
        Value::Function(function) => {
            if args.len() != function.parameters.len() {
                return RuntimeError::WrongArgumentCount { got:  args.len(),
                                                          want: function.parameters.len(), }.into();
            }

            let call_env = Environment::enclosed(&function.env);
            for (parameter, arg) in function.parameters.iter().zip(args) {
                call_env.borrow_mut().set(parameter.clone(), arg);
            }

            unwrap_return(eval_block(&function.body, &call_env))
        },
        Value::Builtin(def) => builtin::apply(def, &args),
        _ => RuntimeError::NotAFunction { kind: function.kind() }.into(),
    }
}

/// Unwraps the `return` sentinel once, passing other values through.
fn unwrap_return(value: Value) -> Value {
    match value {
        Value::Return(inner) => *inner,
        value => value,
    }
}
