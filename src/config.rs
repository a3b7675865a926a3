// ABOUTME: Configuration and constants for the Marmoset interpreter
// This module contains version info, REPL messages, and driver defaults

pub const VERSION: &str = "1.0.0";
pub const WELCOME_MESSAGE: &str = "Marmoset v1.0";
pub const WELCOME_SUBTITLE: &str = "A small dynamically-typed language with closures and macros";
pub const WELCOME_FOOTER: &str = "Type an expression to evaluate it. Use Ctrl-D to exit.";

/// Prompt shown by the interactive REPL.
pub const PROMPT: &str = ">> ";

/// File used to persist REPL history between sessions.
pub const HISTORY_FILE: &str = ".marmoset_history";
