//! # Built-in Functions Module
//!
//! Native functions exposed to Marmoset programs, organized by category:
//!
//! - **[collections]** (5): len, first, last, rest, push
//! - **[console]** (1): puts
//!
//! Each category module registers its functions into the shared table. The
//! table is read-only at runtime and is consulted by the evaluator only
//! after an environment lookup misses, so user `let` bindings shadow
//! builtins.

use crate::object::{BuiltinFn, Object};
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub mod collections;
pub mod console;

static BUILTINS: Lazy<HashMap<&'static str, BuiltinFn>> = Lazy::new(|| {
    let mut table = HashMap::new();
    collections::register(&mut table);
    console::register(&mut table);
    table
});

/// Looks a name up in the builtin table.
pub fn lookup(name: &str) -> Option<Object> {
    BUILTINS.get(name).map(|function| Object::Builtin(*function))
}

/// Names of all registered builtins, for the REPL highlighter.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.keys().copied()
}

/// Shared arity check producing the canonical error message.
fn expect_arity(args: &[Object], want: usize) -> Option<Object> {
    if args.len() == want {
        None
    } else {
        Some(Object::Error(format!(
            "wrong number of arguments. got={}, want={}",
            args.len(),
            want
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_builtin() {
        assert!(matches!(lookup("len"), Some(Object::Builtin(_))));
        assert!(matches!(lookup("puts"), Some(Object::Builtin(_))));
    }

    #[test]
    fn test_lookup_unknown_name() {
        assert!(lookup("no_such_builtin").is_none());
    }

    #[test]
    fn test_names_cover_both_categories() {
        let names: Vec<&str> = names().collect();
        assert!(names.contains(&"len"));
        assert!(names.contains(&"push"));
        assert!(names.contains(&"puts"));
    }
}
