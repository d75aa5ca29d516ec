use std::fs;

use scripta::{
    interpreter::{environment::Environment, evaluator::builtin, value::Value},
    run_source,
};
use walkdir::WalkDir;

fn eval_source(source: &str) -> Value {
    let env = Environment::new();
    match run_source(source, &env) {
        Ok(value) => value,
        Err(diagnostics) => panic!("parse failed for {source:?}: {diagnostics:?}"),
    }
}

fn assert_integer(source: &str, expected: i64) {
    assert_eq!(eval_source(source), Value::Integer(expected), "source: {source}");
}

fn assert_boolean(source: &str, expected: bool) {
    assert_eq!(eval_source(source), Value::Boolean(expected), "source: {source}");
}

fn assert_null(source: &str) {
    assert_eq!(eval_source(source), Value::Null, "source: {source}");
}

fn assert_inspect(source: &str, expected: &str) {
    assert_eq!(eval_source(source).to_string(), expected, "source: {source}");
}

fn assert_error(source: &str, message: &str) {
    match eval_source(source) {
        Value::Error(error) => assert_eq!(error.to_string(), message, "source: {source}"),
        other => panic!("expected error {message:?} for {source:?}, got {other:?}"),
    }
}

#[test]
fn integer_arithmetic() {
    assert_integer("5", 5);
    assert_integer("1 + 2 * 3", 7);
    assert_integer("(1 + 2) * 3", 9);
    assert_integer("2 * -3", -6);
    assert_integer("50 / 2 * 2 + 10", 60);
    assert_integer("3 * (3 * 3) + 10", 37);
}

#[test]
fn division_truncates_toward_zero() {
    assert_integer("10 / 3", 3);
    assert_integer("-7 / 2", -3);
    assert_integer("7 / -2", -3);
    assert_error("5 / 0", "division by zero");
}

#[test]
fn boolean_operators() {
    assert_boolean("true", true);
    assert_boolean("1 < 2", true);
    assert_boolean("1 > 2", false);
    assert_boolean("1 == 1", true);
    assert_boolean("1 != 2", true);
    assert_boolean("true == true", true);
    assert_boolean("false == false", true);
    assert_boolean("true != false", true);
    assert_boolean("(1 < 2) == true", true);
}

#[test]
fn bang_operator() {
    assert_boolean("!true", false);
    assert_boolean("!false", true);
    assert_boolean("!5", false);
    assert_boolean("!!true", true);
    assert_boolean("!if (false) { 1 }", true);
}

#[test]
fn only_null_and_false_are_falsy() {
    assert_integer("if (0) { 1 } else { 2 }", 1);
    assert_integer(r#"if ("") { 1 } else { 2 }"#, 1);
    assert_integer("if ([]) { 1 } else { 2 }", 1);
    assert_integer("if (false) { 1 } else { 2 }", 2);
    assert_integer("if (if (false) { 1 }) { 1 } else { 2 }", 2);
}

#[test]
fn if_expressions() {
    assert_integer("if (true) { 10 }", 10);
    assert_null("if (false) { 10 }");
    assert_integer("if (1 < 2) { 10 } else { 20 }", 10);
    assert_integer("if (1 > 2) { 10 } else { 20 }", 20);
}

#[test]
fn return_unwraps_once() {
    assert_integer("return 10; 9", 10);
    assert_integer("2 * 5; return 10; 9", 10);
    assert_integer("if (10 > 1) { if (10 > 1) { return 10; } return 1; }", 10);
}

#[test]
fn let_bindings_and_identifiers() {
    assert_integer("let a = 5; a", 5);
    assert_integer("let a = 5; let b = a; b", 5);
    assert_integer("let a = 5; let b = a + 5; a + b", 15);
    assert_error("foobar", "identifier not found: foobar");
}

#[test]
fn inner_let_shadows_without_mutating() {
    assert_integer("let x = 5; let f = fn() { let x = 10; x }; f(); x", 5);
    assert_integer("let i = 0; while (i < 3) { let i = i + 1; } i", 0);
}

#[test]
fn closures_capture_environments() {
    assert_integer("let f = fn(x) { fn(y) { x + y } }; f(2)(3)", 5);
    assert_integer("let add = fn(a, b) { a + b }; add(2, 3)", 5);
    assert_integer("let apply = fn(f, x) { f(x) }; apply(fn(n) { n * 2 }, 21)", 42);
}

#[test]
fn counter_closure_increments_captured_binding() {
    assert_integer("let counter = fn() { let c = 0; fn() { c++ } }; \
                    let c = counter(); c(); c(); c()",
                   2);
}

#[test]
fn named_functions_recurse() {
    assert_integer("function fact(n) { if (n < 2) { return 1; } n * fact(n - 1) } fact(5)",
                   120);
}

#[test]
fn function_arity_is_checked() {
    assert_error("let f = fn(a, b) { a }; f(1)",
                 "wrong number of arguments. got=1, want=2");
    assert_error("fn() { 1 }(2)", "wrong number of arguments. got=1, want=0");
}

#[test]
fn calling_a_non_function_is_an_error() {
    assert_error("5(1)", "not a function: INTEGER");
    assert_error("let x = true; x()", "not a function: BOOLEAN");
}

#[test]
fn string_concatenation() {
    assert_inspect(r#""Hello" + " " + "World""#, "Hello World");
    assert_error(r#""a" - "b""#, "unknown operator: STRING - STRING");
}

#[test]
fn string_equality_is_identity() {
    // Two separately built strings never share an allocation.
    assert_boolean(r#""a" == "a""#, false);
    assert_boolean(r#""a" != "a""#, true);
    // Two reads of one binding do.
    assert_boolean(r#"let s = "a"; s == s"#, true);
}

#[test]
fn mixed_operand_kinds() {
    assert_boolean("5 == true", false);
    assert_boolean("5 != true", true);
    assert_error("5 + true", "type mismatch: INTEGER + BOOLEAN");
    assert_error("true + false", "unknown operator: BOOLEAN + BOOLEAN");
    assert_error("-true", "unknown operator: -BOOLEAN");
}

#[test]
fn array_literals_and_indexing() {
    assert_inspect("[1, 2 * 2, 3 + 3]", "[1, 4, 6]");
    assert_integer("[1, 2, 3][0]", 1);
    assert_integer("[1, 2, 3][1 + 1]", 3);
    assert_integer("let a = [1, 2]; a[1]", 2);
    assert_null("[1, 2, 3][3]");
    assert_null("[1, 2, 3][-1]");
    assert_error("5[0]", "index operator not supported: INTEGER");
}

#[test]
fn hash_literals_and_indexing() {
    assert_integer(r#"let m = {"one": 1, "two": 2}; m["two"] + m["one"]"#, 3);
    assert_integer("{1: 2}[1]", 2);
    assert_integer("{true: 3}[true]", 3);
    assert_integer(r#"{"a" + "b": 1}["ab"]"#, 1);
    assert_null(r#"{"a": 1}["missing"]"#);
    assert_error("{fn(x) { x }: 1}", "unusable as hash key: FUNCTION");
    assert_error(r#"{"a": 1}[fn(x) { x }]"#, "index operator not supported: HASH");
}

#[test]
fn postfix_operators_return_the_pre_value() {
    assert_integer("let i = 5; i++", 5);
    assert_integer("let i = 5; i++; i", 6);
    assert_integer("let i = 5; i--; i", 4);
    assert_integer("5++", 5);
    assert_null(r#"let s = "a"; s++"#);
}

#[test]
fn postfix_rebinds_through_enclosing_scopes() {
    assert_integer("let i = 0; while (i < 3) { i++; } i", 3);
}

#[test]
fn prefix_increment_is_unknown() {
    assert_error("let i = 5; ++i", "unknown operator: ++INTEGER");
    assert_error("let i = 5; --i", "unknown operator: --INTEGER");
}

#[test]
fn assignment_updates_the_local_scope_only() {
    assert_integer("let a = 5; a = 10; a", 10);
    assert_integer("let a = 1; let b = (a = 5); b", 5);
    // Assignment inside a function shadows the captured binding.
    assert_integer("let x = 1; let f = fn() { x = 99; x }; f(); x", 1);
    assert_integer("let x = 1; let f = fn() { x = 99; x }; f()", 99);
}

#[test]
fn index_target_assignment_rebinds_the_whole_name() {
    assert_integer("let a = [1, 2, 3]; a[0] = 99; a", 99);
}

#[test]
fn while_loops() {
    assert_null("while (false) { 1 }");
    assert_integer("let f = fn() { while (true) { return 7; } }; f()", 7);
    // Assignment in the body stays inside the loop scope.
    assert_integer("let total = 0; let i = 0; \
                    while (i < 5) { total = total + i; i = i + 1; } total",
                   0);
}

#[test]
fn for_loops() {
    assert_integer("let sum = 0; for (i = 0; i < 5; i = i + 1) { sum++; } sum", 5);
    assert_integer("for (i = 0; i < 3; i = i + 1) { i * 2 }", 4);
    assert_null("for (i = 0; i < 0; i = i + 1) { i }");
    assert_integer("for (i = 0; i < 2; i = i + 1) { let x = i; x }", 1);
}

#[test]
fn errors_short_circuit_evaluation() {
    assert_error("let x = foo; 5", "identifier not found: foo");
    assert_error("[1, foo]", "identifier not found: foo");
    assert_error("{foo: 1}", "identifier not found: foo");
    assert_error("len(foo)", "identifier not found: foo");
}

#[test]
fn len_builtin() {
    assert_integer(r#"len("hello")"#, 5);
    assert_integer(r#"len("")"#, 0);
    assert_integer("len([1, 2, 3])", 3);
    assert_error("len()", "wrong number of arguments. got=0, want=1");
    assert_error(r#"len("a", "b")"#, "wrong number of arguments. got=2, want=1");
    assert_error("len(1)", "argument to `len` not supported, got=INTEGER");
}

#[test]
fn array_builtins() {
    assert_integer("first([1, 2])", 1);
    assert_integer("last([1, 2])", 2);
    assert_null("first([])");
    assert_null("last([])");
    assert_inspect("rest([1, 2, 3])", "[2, 3]");
    assert_null("rest([])");
    assert_inspect("push([1], 2)", "[1, 2]");
    assert_inspect("let a = [1]; push(a, 2); a", "[1]");
    assert_error("first(1)", "argument to `first` not supported, got=INTEGER");
    assert_error("push(1, 2)", "argument to `push` not supported, got=INTEGER");
}

#[test]
fn puts_and_assert_builtins() {
    assert_null(r#"puts("hi")"#);
    assert_null("assert(true)");
    assert_null("assert(1)");
    assert_error("assert(false)", "assertion failed");
    assert_error("assert(1 == 2)", "assertion failed");
}

#[test]
fn every_builtin_is_resolvable() {
    for name in builtin::BUILTIN_NAMES {
        assert!(builtin::lookup(name).is_some(), "missing builtin {name}");
    }
    assert!(builtin::lookup("missing").is_none());
}

#[test]
fn value_inspection() {
    assert_inspect("5", "5");
    assert_inspect("true", "true");
    assert_inspect("if (false) { 1 }", "null");
    assert_inspect(r#""raw bytes""#, "raw bytes");
    assert_inspect("fn(x, y) { x + y }", "fn(x, y) { ... }");
    assert_inspect("len", "builtin function");
    assert_inspect("foobar", "ERROR: identifier not found: foobar");
    assert_inspect(r#"{"a": 1}"#, "{a: 1}");
}

#[test]
fn classes_and_instances() {
    assert_inspect(r#"class Dog { let name = "rex"; function bark() { name } } let d = new Dog(); d.bark()"#,
                   "rex");
    assert_null("class Dog { }");
    assert_inspect(r#"class Dog { let name = "rex"; } Dog"#, "<class:Dog>{let name = rex;}");
    assert_inspect(r#"class Dog { let name = "rex"; } new Dog()"#, "<Instance:Dog>");
}

#[test]
fn methods_see_sibling_members_and_methods() {
    assert_inspect(r#"class Greeter {
                          let who = "world";
                          function greet() { "hello " + who }
                          function loud() { greet() }
                      }
                      let g = new Greeter();
                      g.loud()"#,
                   "hello world");
}

#[test]
fn methods_mutate_their_instance() {
    assert_integer("class Counter { let count = 0; function tick() { count++ } } \
                    let c = new Counter(); c.tick(); c.tick(); c.count",
                   2);
}

#[test]
fn instances_do_not_share_environments() {
    assert_integer("class Counter { let count = 0; function tick() { count++ } } \
                    let a = new Counter(); let b = new Counter(); \
                    a.tick(); a.tick(); b.tick(); a.count + b.count",
                   3);
}

#[test]
fn class_errors() {
    assert_error("let x = 5; new x()", "not a class: INTEGER");
    assert_error("5.bark", "not an instance: INTEGER");
    assert_error("class Dog { } let d = new Dog(); d.tail",
                 "identifier not found: tail");
}

#[test]
fn quote_captures_syntax_unevaluated() {
    assert_inspect("quote(1 + 2)", "QUOTE((1 + 2))");
    assert_inspect("quote(foobar)", "QUOTE(foobar)");
    assert_inspect("quote(fn(x) { x })", "QUOTE(fn(x) x)");
    assert_error("quote()", "wrong number of arguments. got=0, want=1");
}

#[test]
fn repl_scenarios_end_to_end() {
    assert_inspect("let add = fn(a, b) { a + b }; add(2, 3)", "5");
    assert_inspect("let counter = fn() { let c = 0; fn() { c++ } }; \
                    let c = counter(); c(); c(); c()",
                   "2");
    assert_inspect(r#"let m = {"one": 1, "two": 2}; m["two"] + m["one"]"#, "3");
    assert_inspect(r#"class Dog { let name = "rex"; function bark() { name } } let d = new Dog(); d.bark()"#,
                   "rex");
    assert_inspect("let i = 0; while (i < 3) { let i = i + 1; } i", "0");
    assert_inspect("foobar", "ERROR: identifier not found: foobar");
}

#[test]
fn demo_scripts_run_clean() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "scripta"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {path:?}: {e}"));

        count += 1;
        let env = Environment::new();
        match run_source(&source, &env) {
            Ok(value) => assert!(!value.is_error(), "script {path:?} failed: {value}"),
            Err(diagnostics) => panic!("script {path:?} did not parse: {diagnostics:?}"),
        }
    }

    assert!(count > 0, "no demo scripts found in demos/");
}
