// ABOUTME: End-to-end tests driving the full parse/expand/eval pipeline

use marmoset::env::Environment;
use marmoset::error::InterpreterError;
use marmoset::lexer::Lexer;
use marmoset::object::Object;
use marmoset::parser::Parser;
use marmoset::run;
use pretty_assertions::assert_eq;

/// Fresh environments, one-shot pipeline.
fn eval_source(source: &str) -> Object {
    let macro_env = Environment::new();
    let env = Environment::new();
    run(source, &macro_env, &env).expect("unexpected parse failure")
}

fn assert_integer(source: &str, expected: i64) {
    match eval_source(source) {
        Object::Integer(value) => assert_eq!(value, expected, "source {:?}", source),
        other => panic!("expected Integer for {:?}, got {:?}", source, other),
    }
}

#[test]
fn test_function_definition_and_call() {
    assert_integer("let add = fn(a, b) { a + b }; add(2, 3);", 5);
}

#[test]
fn test_recursive_function_with_early_return() {
    match eval_source(
        "let counter = fn(x) { if (x > 5) { return true; } else { counter(x + 1); } }; counter(0);",
    ) {
        Object::Boolean(value) => assert!(value),
        other => panic!("expected Boolean, got {:?}", other),
    }
}

#[test]
fn test_closure_over_captured_frame() {
    assert_integer(
        "let makeAdder = fn(x) { fn(y) { x + y } }; let addTwo = makeAdder(2); addTwo(3);",
        5,
    );
}

#[test]
fn test_array_indexing() {
    assert_integer("let a = [1, 2, 3]; a[1] + a[2];", 5);
    match eval_source("let a = [1, 2, 3]; a[99];") {
        Object::Null => {}
        other => panic!("expected Null, got {:?}", other),
    }
}

#[test]
fn test_hash_lookup_and_unusable_key() {
    match eval_source(r#"let h = {"name": "Alice", "age": 30}; h["name"];"#) {
        Object::String(value) => assert_eq!(value, "Alice"),
        other => panic!("expected String, got {:?}", other),
    }

    match eval_source(r#"let h = {"name": "Alice", "age": 30}; h[fn(x) { x }];"#) {
        Object::Error(message) => assert_eq!(message, "unusable as hash key: FUNCTION"),
        other => panic!("expected Error, got {:?}", other),
    }
}

#[test]
fn test_unless_macro_expands_and_evaluates() {
    // The branch taken proves the call site was rewritten into the if form:
    // the alternative runs because the negated condition is false
    assert_integer(
        r#"let unless = macro(cond, cons, alt) {
            quote(if (!(unquote(cond))) { unquote(cons); } else { unquote(alt); });
        };
        unless(10 > 5, 1, 2);"#,
        2,
    );
    assert_integer(
        r#"let unless = macro(cond, cons, alt) {
            quote(if (!(unquote(cond))) { unquote(cons); } else { unquote(alt); });
        };
        unless(10 > 15, 1, 2);"#,
        1,
    );
}

#[test]
fn test_runtime_errors_surface_in_band() {
    match eval_source("5 + true;") {
        Object::Error(message) => assert_eq!(message, "type mismatch: INTEGER + BOOLEAN"),
        other => panic!("expected Error, got {:?}", other),
    }
    match eval_source("foobar;") {
        Object::Error(message) => assert_eq!(message, "identifier not found: foobar"),
        other => panic!("expected Error, got {:?}", other),
    }
}

#[test]
fn test_parse_errors_abort_before_evaluation() {
    let macro_env = Environment::new();
    let env = Environment::new();
    match run("let x 5; puts(1);", &macro_env, &env) {
        Err(InterpreterError::Parse(errors)) => {
            assert_eq!(
                errors,
                vec!["expected next token to be =, got INT instead".to_string()]
            );
        }
        other => panic!("expected parse failure, got {:?}", other),
    }
    // Nothing was bound
    assert!(env.get("x").is_none());
}

#[test]
fn test_left_to_right_evaluation_order() {
    // push through a closure to observe evaluation order as data
    let source = r#"
        let order = [];
        let observe = fn(arr, n) { push(arr, n) };
        let o1 = observe(order, 1);
        let o2 = observe(o1, 2);
        len(o2);
    "#;
    assert_integer(source, 2);

    // the first failing element decides the error, in every container
    for source in [
        "[first_missing, second_missing]",
        "{first_missing: 1, second_missing: 2}",
        "len(first_missing, second_missing)",
    ] {
        match eval_source(source) {
            Object::Error(message) => {
                assert_eq!(message, "identifier not found: first_missing", "source {:?}", source);
            }
            other => panic!("expected Error for {:?}, got {:?}", source, other),
        }
    }
}

#[test]
fn test_macros_and_bindings_persist_across_inputs() {
    // REPL-shaped driving: one macro environment, one eval environment,
    // several separate inputs
    let macro_env = Environment::new();
    let env = Environment::new();

    run(
        "let unless = macro(cond, cons, alt) { quote(if (!(unquote(cond))) { unquote(cons); } else { unquote(alt); }); };",
        &macro_env,
        &env,
    )
    .expect("macro definition failed");

    run("let x = 10;", &macro_env, &env).expect("let failed");

    match run("unless(x > 5, x + 1, x + 2);", &macro_env, &env) {
        Ok(Object::Integer(value)) => assert_eq!(value, 12),
        other => panic!("expected Integer(12), got {:?}", other),
    }
}

#[test]
fn test_parse_print_round_trip_is_a_fixed_point() {
    let sources = [
        "let x = 1 + 2 * 3;",
        "let y = -a * b;",
        "!-a;",
        "a + b * c + d / e - f;",
        "3 + 4 * 5 == 3 * 1 + 4 * 5;",
        "if (x < y) { x } else { y };",
        "let f = fn(x, y) { return x + y; };",
        "let m = macro(x) { quote(unquote(x) + 1); };",
        "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8));",
        "a * [1, 2, 3, 4][b * c] * d;",
        "{\"one\": 1, \"two\": 2}[\"one\"];",
        "let s = \"hello\" + \" \" + \"world\";",
        "[1, [2, 3], {4: 5}];",
        "if (x < y) { if (y < z) { 1 } else { 2 } };",
    ];

    for source in sources {
        let mut parser = Parser::new(Lexer::new(source));
        let program = parser.parse_program();
        assert_eq!(parser.errors(), &[] as &[String], "source {:?}", source);
        let printed = program.to_string();

        let mut reparser = Parser::new(Lexer::new(&printed));
        let reparsed = reparser.parse_program();
        assert_eq!(reparser.errors(), &[] as &[String], "printed {:?}", printed);
        assert_eq!(reparsed.to_string(), printed, "source {:?}", source);
    }
}

#[test]
fn test_return_unwinds_nested_blocks_but_not_callers() {
    assert_integer(
        "let f = fn() { if (true) { if (true) { return 1; } }; return 2; }; f() + 10;",
        11,
    );
    // A top-level return yields its value at program level
    assert_integer("if (true) { return 7; }; 100;", 7);
}

#[test]
fn test_error_short_circuits_whole_expression() {
    match eval_source("let f = fn() { missing }; [1, 2, f(), 4][0] + 10;") {
        Object::Error(message) => assert_eq!(message, "identifier not found: missing"),
        other => panic!("expected Error, got {:?}", other),
    }
}

#[test]
fn test_builtin_pipeline() {
    assert_integer(
        "let a = [1, 2, 3]; let b = push(rest(a), 10); first(b) + last(b) + len(b);",
        15,
    );
}

#[test]
fn test_shared_environment_mutation_is_visible_to_closures() {
    let macro_env = Environment::new();
    let env = Environment::new();

    run("let x = 1; let f = fn() { x };", &macro_env, &env).expect("setup failed");
    run("let x = 42;", &macro_env, &env).expect("rebind failed");

    match run("f();", &macro_env, &env) {
        Ok(Object::Integer(value)) => assert_eq!(value, 42),
        other => panic!("expected Integer(42), got {:?}", other),
    }
}

#[test]
fn test_environments_can_hold_cyclic_closures() {
    // A recursive closure is bound in the very frame it captured; the
    // interpreter must tolerate the cycle and still terminate
    assert_integer(
        "let fact = fn(n) { if (n < 2) { 1 } else { n * fact(n - 1) } }; fact(10);",
        3628800,
    );
}
