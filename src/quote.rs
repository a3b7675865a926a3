// ABOUTME: quote/unquote support reifying AST fragments as runtime values

use crate::ast::Expression;
use crate::env::Environment;
use crate::eval;
use crate::modify;
use crate::object::Object;
use std::rc::Rc;

/// Implements the `quote(...)` special form: the argument is returned as a
/// [`Object::Quote`] without being evaluated, except for `unquote(...)`
/// escapes inside it, which are evaluated now and spliced back in as
/// syntax.
pub fn quote(expression: &Expression, env: &Rc<Environment>) -> Object {
    let node = eval_unquote_calls(expression.clone(), env);
    Object::Quote(node)
}

fn eval_unquote_calls(quoted: Expression, env: &Rc<Environment>) -> Expression {
    modify::modify_expression(quoted, &mut |expression| {
        if !is_unquote_call(&expression) {
            return expression;
        }
        let Expression::Call { arguments, .. } = &expression else {
            return expression;
        };
        let unquoted = eval::eval_expression(&arguments[0], env);
        convert_object_to_node(unquoted)
    })
}

/// An unquote escape is any call whose callee renders as the literal
/// `unquote` and which has exactly one argument.
fn is_unquote_call(expression: &Expression) -> bool {
    match expression {
        Expression::Call {
            function,
            arguments,
        } => function.to_string() == "unquote" && arguments.len() == 1,
        _ => false,
    }
}

/// Turns an evaluated unquote result back into syntax. Values without a
/// literal form cannot be spliced; that is a macro programmer error, not a
/// user runtime error, so it panics like a non-Quote macro result does.
fn convert_object_to_node(object: Object) -> Expression {
    match object {
        Object::Integer(value) => Expression::IntegerLiteral(value),
        Object::Boolean(value) => Expression::Boolean(value),
        Object::String(value) => Expression::StringLiteral(value),
        Object::Array(elements) => Expression::ArrayLiteral(
            elements.into_iter().map(convert_object_to_node).collect(),
        ),
        Object::Quote(node) => node,
        other => panic!("cannot splice {} into syntax", other.type_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn run(input: &str) -> Object {
        let mut parser = Parser::new(Lexer::new(input));
        let program = parser.parse_program();
        assert_eq!(parser.errors(), &[] as &[String]);
        eval::eval_program(&program, &Environment::new())
    }

    fn assert_quote(input: &str, expected: &str) {
        match run(input) {
            Object::Quote(node) => assert_eq!(node.to_string(), expected, "input {:?}", input),
            other => panic!("expected Quote for {:?}, got {:?}", input, other),
        }
    }

    #[test]
    fn test_quote_does_not_evaluate() {
        assert_quote("quote(5)", "5");
        assert_quote("quote(5 + 8)", "(5 + 8)");
        assert_quote("quote(foobar)", "foobar");
        assert_quote("quote(foobar + barfoo)", "(foobar + barfoo)");
    }

    #[test]
    fn test_unquote_evaluates_inside_quote() {
        assert_quote("quote(unquote(4))", "4");
        assert_quote("quote(unquote(4 + 4))", "8");
        assert_quote("quote(8 + unquote(4 + 4))", "(8 + 8)");
        assert_quote("quote(unquote(4 + 4) + 8)", "(8 + 8)");
    }

    #[test]
    fn test_unquote_sees_environment() {
        assert_quote("let foobar = 8; quote(foobar)", "foobar");
        assert_quote("let foobar = 8; quote(unquote(foobar))", "8");
    }

    #[test]
    fn test_unquote_converts_booleans() {
        assert_quote("quote(unquote(true))", "true");
        assert_quote("quote(unquote(true == false))", "false");
    }

    #[test]
    fn test_unquote_splices_quoted_syntax() {
        assert_quote("quote(unquote(quote(4 + 4)))", "(4 + 4)");
        assert_quote(
            "let quotedInfixExpression = quote(4 + 4); quote(unquote(4 + 4) + unquote(quotedInfixExpression))",
            "(8 + (4 + 4))",
        );
    }

    #[test]
    fn test_unquote_converts_strings_and_arrays() {
        assert_quote("quote(unquote(\"hello\"))", "hello");
        assert_quote("quote(unquote([1, 2 + 3]))", "[1, 5]");
    }

    #[test]
    fn test_quote_with_no_arguments_is_an_error() {
        match run("quote()") {
            Object::Error(message) => {
                assert_eq!(message, "wrong number of arguments to quote. got=0, want=1");
            }
            other => panic!("expected Error, got {:?}", other),
        }
    }

    #[test]
    fn test_unquote_ignores_quote_nesting() {
        // The walker is level-blind: an unquote escape evaluates even
        // inside a nested quote call
        assert_quote("quote(quote(unquote(4)))", "quote(4)");
    }
}
