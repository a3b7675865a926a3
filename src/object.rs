// ABOUTME: Runtime value types produced by the evaluator

use crate::ast::{BlockStatement, Expression};
use crate::env::Environment;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Signature of a native function exposed to the language. Errors are
/// returned in-band as [`Object::Error`].
pub type BuiltinFn = fn(&[Object]) -> Object;

/// Closed sum of every runtime value.
///
/// Two variants are control-flow tags rather than ordinary values:
/// `ReturnValue` threads an early return up through nested blocks until a
/// function boundary unwraps it, and `Error` short-circuits every compound
/// operation until the top-level driver prints it.
#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    String(String),
    Array(Vec<Object>),
    Hash(HashMap<HashKey, HashPair>),
    Function(Function),
    Builtin(BuiltinFn),
    ReturnValue(Box<Object>),
    Error(String),
    Quote(Expression),
    Macro(Macro),
}

/// A closure: parameters, body, and the environment frame that was active
/// where the literal was evaluated.
#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<String>,
    pub body: BlockStatement,
    pub env: Rc<Environment>,
}

/// Like [`Function`], but bound during macro expansion only. Its parameters
/// receive quoted argument ASTs instead of evaluated values.
#[derive(Clone)]
pub struct Macro {
    pub parameters: Vec<String>,
    pub body: BlockStatement,
    pub env: Rc<Environment>,
}

// The captured environment is omitted from Debug output: a closure can be
// bound inside the very frame it captured, and walking that edge would never
// terminate.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body.to_string())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Macro")
            .field("parameters", &self.parameters)
            .field("body", &self.body.to_string())
            .finish_non_exhaustive()
    }
}

/// Key type for hash values. Only integers, booleans, and strings can be
/// used as keys; everything else is reported as unusable at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

/// The stored pair keeps the original key object around so hashes can be
/// displayed with their keys, not just indexed by them.
#[derive(Debug, Clone)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

impl Object {
    /// Uppercase type tag as it appears in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Null => "NULL",
            Object::String(_) => "STRING",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
            Object::Quote(_) => "QUOTE",
            Object::Macro(_) => "MACRO",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Derives a hash key, or `None` for unhashable kinds.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(value) => Some(HashKey::Integer(*value)),
            Object::Boolean(value) => Some(HashKey::Boolean(*value)),
            Object::String(value) => Some(HashKey::String(value.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
            Object::String(value) => write!(f, "{}", value),
            Object::Array(elements) => {
                let rendered: Vec<String> = elements.iter().map(Object::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Object::Hash(pairs) => {
                // Map iteration order is arbitrary; sort the rendered pairs
                // so output is stable across runs.
                let mut rendered: Vec<String> = pairs
                    .values()
                    .map(|pair| format!("{}: {}", pair.key, pair.value))
                    .collect();
                rendered.sort();
                write!(f, "{{{}}}", rendered.join(", "))
            }
            Object::Function(function) => {
                write!(f, "fn({}) {}", function.parameters.join(", "), function.body)
            }
            Object::Builtin(_) => write!(f, "builtin function"),
            Object::ReturnValue(value) => write!(f, "{}", value),
            Object::Error(message) => write!(f, "ERROR: {}", message),
            Object::Quote(node) => write!(f, "QUOTE({})", node),
            Object::Macro(mac) => {
                write!(f, "macro({}) {}", mac.parameters.join(", "), mac.body)
            }
        }
    }
}
