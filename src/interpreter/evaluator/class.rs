use std::rc::Rc;

use crate::{
    ast::{ClassLiteral, Expr},
    error::RuntimeError,
    interpreter::{
        environment::{EnvRef, Environment},
        evaluator::{core::eval_expression, function::eval_function_literal},
        value::{Class, Instance, Value},
    },
};

/// Evaluates a class body into a class value.
///
/// Members and methods stay syntax inside the class value; they are
/// only evaluated when `new` builds an instance, which is what lets
/// method bodies see the members of their own instance.
pub fn eval_class_literal(literal: &ClassLiteral) -> Value {
    let methods = literal.methods
                         .iter()
                         .map(|(name, method)| (name.clone(), method.function.clone()))
                         .collect();

    Value::Class(Rc::new(Class { name: literal.name.clone(),
                                 members: literal.members.clone(),
                                 methods }))
}

/// Evaluates `new <classExpr>` into an instance.
///
/// A fresh instance environment is enclosed by the current scope. Each
/// member `let` evaluates into it in declaration order (later members
/// may read earlier ones), then each method literal is evaluated with
/// the instance environment as its closure and bound under its name.
/// The class itself stays shared between instances; the environment is
/// exclusive to this one.
pub fn eval_new(class: &Expr, env: &EnvRef) -> Value {
    let class = eval_expression(class, env);
    if class.is_error() {
        return class;
    }
    let Value::Class(class) = class else {
        return RuntimeError::NotAClass { kind: class.kind() }.into();
    };

    let instance_env = Environment::enclosed(env);

    for member in &class.members {
        let value = eval_expression(&member.value, &instance_env);
        if value.is_error() {
            return value;
        }
        instance_env.borrow_mut().set(member.name.clone(), value);
    }

    for (name, method) in &class.methods {
        let method = eval_function_literal(method, &instance_env);
        instance_env.borrow_mut().set(name.clone(), method);
    }

    Value::Instance(Rc::new(Instance { class,
                                       env: instance_env }))
}

/// Evaluates `object.call`.
///
/// The receiver must be an instance. A bare identifier reads the
/// member or method of that name from the instance environment; a call
/// expression evaluates inside the instance environment, so method
/// bodies resolve sibling members and methods. Any other shape after
/// the dot is `null`.
pub fn eval_method_call(object: &Expr, call: &Expr, env: &EnvRef) -> Value {
    let object = eval_expression(object, env);
    if object.is_error() {
        return object;
    }
    let Value::Instance(instance) = object else {
        return RuntimeError::NotAnInstance { kind: object.kind() }.into();
    };

    match call {
        Expr::Identifier { name, .. } => {
            instance.env
                    .borrow()
                    .get(name)
                    .unwrap_or_else(|| {
                        RuntimeError::IdentifierNotFound { name: name.clone() }.into()
                    })
        },
        Expr::Call { .. } => eval_expression(call, &instance.env),
        _ => Value::Null,
    }
}
