//! Console builtins: puts
//!
//! The only output channel the language has. Everything else the
//! interpreter writes goes through the logger or the REPL.

use crate::object::{BuiltinFn, Object};
use std::collections::HashMap;

/// Prints each argument's display form on its own line. Accepts any arity
/// and always returns null.
pub fn builtin_puts(args: &[Object]) -> Object {
    for arg in args {
        println!("{}", arg);
    }
    Object::Null
}

/// Register all console builtins in the table.
pub fn register(table: &mut HashMap<&'static str, BuiltinFn>) {
    table.insert("puts", builtin_puts as BuiltinFn);
}
