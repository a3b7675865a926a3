// ABOUTME: Driver-level error types for the Marmoset interpreter

use thiserror::Error;

/// Errors surfaced by the driver surface ([`crate::run`] and the binary).
///
/// Runtime failures inside the language are not represented here: they stay
/// in-band as `Object::Error` values and propagate through evaluation until
/// the driver prints them.
#[derive(Error, Debug)]
pub enum InterpreterError {
    /// The parser accumulated one or more errors; evaluation never ran.
    #[error("parse failed:\n{}", .0.join("\n"))]
    Parse(Vec<String>),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
