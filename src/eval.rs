// ABOUTME: Recursive tree-walking evaluator over the Program AST

use crate::ast::{BlockStatement, Expression, Program, Statement};
use crate::builtins;
use crate::env::Environment;
use crate::object::{Function, HashPair, Object};
use crate::quote;
use std::collections::HashMap;
use std::rc::Rc;

/// Evaluates a whole program. A `ReturnValue` reaching the top level is
/// unwrapped here; an `Error` stops evaluation immediately.
pub fn eval_program(program: &Program, env: &Rc<Environment>) -> Object {
    let mut result = Object::Null;

    for statement in &program.statements {
        result = eval_statement(statement, env);
        match result {
            Object::ReturnValue(value) => return *value,
            Object::Error(_) => return result,
            _ => {}
        }
    }

    result
}

/// Evaluates a block. Unlike [`eval_program`], a `ReturnValue` is returned
/// still wrapped so it keeps unwinding through enclosing blocks until a
/// function boundary unwraps it.
pub fn eval_block(block: &BlockStatement, env: &Rc<Environment>) -> Object {
    let mut result = Object::Null;

    for statement in &block.statements {
        result = eval_statement(statement, env);
        if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
            return result;
        }
    }

    result
}

fn eval_statement(statement: &Statement, env: &Rc<Environment>) -> Object {
    match statement {
        Statement::Expression(expression) => eval_expression(expression, env),
        Statement::Return(value) => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return value;
            }
            Object::ReturnValue(Box::new(value))
        }
        Statement::Let { name, value } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return value;
            }
            env.set(name.clone(), value);
            Object::Null
        }
    }
}

pub fn eval_expression(expression: &Expression, env: &Rc<Environment>) -> Object {
    match expression {
        Expression::IntegerLiteral(value) => Object::Integer(*value),
        Expression::Boolean(value) => Object::Boolean(*value),
        Expression::StringLiteral(value) => Object::String(value.clone()),
        Expression::Identifier(name) => eval_identifier(name, env),
        Expression::Prefix { operator, right } => {
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(operator, right)
        }
        Expression::Infix {
            operator,
            left,
            right,
        } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(operator, left, right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, env);
            if condition.is_error() {
                return condition;
            }
            if is_truthy(&condition) {
                eval_block(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_block(alternative, env)
            } else {
                Object::Null
            }
        }
        Expression::FunctionLiteral { parameters, body } => Object::Function(Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env: Rc::clone(env),
        }),
        Expression::Call {
            function,
            arguments,
        } => eval_call_expression(function, arguments, env),
        Expression::ArrayLiteral(elements) => {
            let elements = eval_expressions(elements, env);
            if elements.len() == 1 && elements[0].is_error() {
                return elements.into_iter().next().unwrap();
            }
            Object::Array(elements)
        }
        Expression::Index { left, index } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let index = eval_expression(index, env);
            if index.is_error() {
                return index;
            }
            eval_index_expression(left, index)
        }
        Expression::HashLiteral(pairs) => eval_hash_literal(pairs, env),
        // A macro literal outside a top-level let definition is inert; the
        // expansion pass never reaches it and evaluation has nothing to do.
        Expression::MacroLiteral { .. } => Object::Null,
    }
}

fn eval_identifier(name: &str, env: &Rc<Environment>) -> Object {
    if let Some(value) = env.get(name) {
        return value;
    }
    // User bindings shadow builtins, so the table is consulted second
    if let Some(builtin) = builtins::lookup(name) {
        return builtin;
    }
    Object::Error(format!("identifier not found: {}", name))
}

fn eval_prefix_expression(operator: &str, right: Object) -> Object {
    match operator {
        "!" => Object::Boolean(!is_truthy(&right)),
        "-" => match right {
            Object::Integer(value) => Object::Integer(value.wrapping_neg()),
            other => Object::Error(format!("unknown operator: -{}", other.type_name())),
        },
        _ => Object::Error(format!("unknown operator: {}{}", operator, right.type_name())),
    }
}

fn eval_infix_expression(operator: &str, left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix_expression(operator, left, right)
        }
        (Object::String(left), Object::String(right)) => {
            eval_string_infix_expression(operator, left, right)
        }
        (left, right) => match operator {
            // Identity comparison: meaningful for the boolean and null
            // singletons, false for everything else
            "==" => Object::Boolean(is_identical(&left, &right)),
            "!=" => Object::Boolean(!is_identical(&left, &right)),
            _ if left.type_name() != right.type_name() => Object::Error(format!(
                "type mismatch: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            )),
            _ => Object::Error(format!(
                "unknown operator: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            )),
        },
    }
}

fn eval_integer_infix_expression(operator: &str, left: i64, right: i64) -> Object {
    match operator {
        "+" => Object::Integer(left.wrapping_add(right)),
        "-" => Object::Integer(left.wrapping_sub(right)),
        "*" => Object::Integer(left.wrapping_mul(right)),
        "/" => {
            if right == 0 {
                Object::Error(format!("division by zero: {} / {}", left, right))
            } else {
                Object::Integer(left.wrapping_div(right))
            }
        }
        "<" => Object::Boolean(left < right),
        ">" => Object::Boolean(left > right),
        "==" => Object::Boolean(left == right),
        "!=" => Object::Boolean(left != right),
        _ => Object::Error(format!("unknown operator: INTEGER {} INTEGER", operator)),
    }
}

fn eval_string_infix_expression(operator: &str, left: String, right: String) -> Object {
    match operator {
        "+" => Object::String(left + &right),
        _ => Object::Error(format!("unknown operator: STRING {} STRING", operator)),
    }
}

fn eval_call_expression(
    function: &Expression,
    arguments: &[Expression],
    env: &Rc<Environment>,
) -> Object {
    // quote is a special form: its argument is reified, never evaluated.
    // It is recognized by the callee's spelling before anything else runs,
    // so a user binding named quote does not reach here.
    if let Expression::Identifier(name) = function {
        if name == "quote" {
            return match arguments.first() {
                Some(argument) => quote::quote(argument, env),
                None => Object::Error("wrong number of arguments to quote. got=0, want=1".to_string()),
            };
        }
    }

    let function = eval_expression(function, env);
    if function.is_error() {
        return function;
    }

    let arguments = eval_expressions(arguments, env);
    if arguments.len() == 1 && arguments[0].is_error() {
        return arguments.into_iter().next().unwrap();
    }

    apply_function(function, &arguments)
}

/// Evaluates expressions left to right. On the first error the result list
/// collapses to a single element carrying that error.
fn eval_expressions(expressions: &[Expression], env: &Rc<Environment>) -> Vec<Object> {
    let mut results = Vec::with_capacity(expressions.len());

    for expression in expressions {
        let evaluated = eval_expression(expression, env);
        if evaluated.is_error() {
            return vec![evaluated];
        }
        results.push(evaluated);
    }

    results
}

fn apply_function(function: Object, arguments: &[Object]) -> Object {
    match function {
        Object::Function(function) => {
            let env = extend_function_env(&function, arguments);
            let evaluated = eval_block(&function.body, &env);
            unwrap_return_value(evaluated)
        }
        Object::Builtin(builtin) => builtin(arguments),
        other => Object::Error(format!("not a function: {}", other.type_name())),
    }
}

/// Binds parameters positionally in a fresh frame enclosing the captured
/// environment. Arity is not checked: surplus arguments are dropped, and a
/// missing one surfaces as `identifier not found` when the parameter is
/// first referenced.
fn extend_function_env(function: &Function, arguments: &[Object]) -> Rc<Environment> {
    let env = Environment::new_enclosed(Rc::clone(&function.env));
    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        env.set(parameter.clone(), argument.clone());
    }
    env
}

fn unwrap_return_value(object: Object) -> Object {
    match object {
        Object::ReturnValue(value) => *value,
        other => other,
    }
}

fn eval_index_expression(left: Object, index: Object) -> Object {
    match (left, index) {
        (Object::Array(elements), Object::Integer(index)) => {
            // Out-of-range reads produce null, not an error
            usize::try_from(index)
                .ok()
                .and_then(|i| elements.get(i).cloned())
                .unwrap_or(Object::Null)
        }
        (Object::Hash(pairs), key) => match key.hash_key() {
            Some(key) => pairs
                .get(&key)
                .map(|pair| pair.value.clone())
                .unwrap_or(Object::Null),
            None => Object::Error(format!("unusable as hash key: {}", key.type_name())),
        },
        (left, _) => Object::Error(format!(
            "index operator not supported: {}",
            left.type_name()
        )),
    }
}

fn eval_hash_literal(pairs: &[(Expression, Expression)], env: &Rc<Environment>) -> Object {
    let mut hash = HashMap::new();

    for (key_expression, value_expression) in pairs {
        let key = eval_expression(key_expression, env);
        if key.is_error() {
            return key;
        }

        let Some(hash_key) = key.hash_key() else {
            return Object::Error(format!("unusable as hash key: {}", key.type_name()));
        };

        let value = eval_expression(value_expression, env);
        if value.is_error() {
            return value;
        }

        // Source order: a duplicate key overwrites the earlier pair
        hash.insert(hash_key, HashPair { key, value });
    }

    Object::Hash(hash)
}

/// `false` and `null` are the only falsey values.
fn is_truthy(object: &Object) -> bool {
    match object {
        Object::Null => false,
        Object::Boolean(value) => *value,
        _ => true,
    }
}

fn is_identical(left: &Object, right: &Object) -> bool {
    match (left, right) {
        (Object::Boolean(left), Object::Boolean(right)) => left == right,
        (Object::Null, Object::Null) => true,
        _ => false,
    }
}
