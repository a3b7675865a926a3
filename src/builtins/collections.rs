//! Collection builtins: len, first, last, rest, push
//!
//! Arrays are persistent: rest and push build fresh arrays and never touch
//! their argument.

use super::expect_arity;
use crate::object::{BuiltinFn, Object};
use std::collections::HashMap;

/// Length of a string (in bytes) or an array.
pub fn builtin_len(args: &[Object]) -> Object {
    if let Some(error) = expect_arity(args, 1) {
        return error;
    }

    match &args[0] {
        Object::String(value) => Object::Integer(value.len() as i64),
        Object::Array(elements) => Object::Integer(elements.len() as i64),
        other => Object::Error(format!(
            "argument to `len` not supported, got {}",
            other.type_name()
        )),
    }
}

/// First element of an array, or null when it is empty.
pub fn builtin_first(args: &[Object]) -> Object {
    if let Some(error) = expect_arity(args, 1) {
        return error;
    }

    match &args[0] {
        Object::Array(elements) => elements.first().cloned().unwrap_or(Object::Null),
        other => Object::Error(format!(
            "argument to `first` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

/// Last element of an array, or null when it is empty.
pub fn builtin_last(args: &[Object]) -> Object {
    if let Some(error) = expect_arity(args, 1) {
        return error;
    }

    match &args[0] {
        Object::Array(elements) => elements.last().cloned().unwrap_or(Object::Null),
        other => Object::Error(format!(
            "argument to `last` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

/// All elements but the first, as a fresh array; null when empty.
pub fn builtin_rest(args: &[Object]) -> Object {
    if let Some(error) = expect_arity(args, 1) {
        return error;
    }

    match &args[0] {
        Object::Array(elements) if !elements.is_empty() => {
            Object::Array(elements[1..].to_vec())
        }
        Object::Array(_) => Object::Null,
        other => Object::Error(format!(
            "argument to `rest` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

/// Fresh array with the element appended.
pub fn builtin_push(args: &[Object]) -> Object {
    if let Some(error) = expect_arity(args, 2) {
        return error;
    }

    match &args[0] {
        Object::Array(elements) => {
            let mut pushed = elements.clone();
            pushed.push(args[1].clone());
            Object::Array(pushed)
        }
        other => Object::Error(format!(
            "argument to `push` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

/// Register all collection builtins in the table.
pub fn register(table: &mut HashMap<&'static str, BuiltinFn>) {
    table.insert("len", builtin_len as BuiltinFn);
    table.insert("first", builtin_first as BuiltinFn);
    table.insert("last", builtin_last as BuiltinFn);
    table.insert("rest", builtin_rest as BuiltinFn);
    table.insert("push", builtin_push as BuiltinFn);
}
