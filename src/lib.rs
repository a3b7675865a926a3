// ABOUTME: Library root wiring the interpreter pipeline together

pub mod ast;
pub mod builtins;
pub mod config;
pub mod env;
pub mod error;
pub mod eval;
pub mod highlighter;
pub mod lexer;
pub mod macros;
pub mod modify;
pub mod object;
pub mod parser;
pub mod quote;
pub mod token;

use env::Environment;
use error::InterpreterError;
use lexer::Lexer;
use log::debug;
use object::Object;
use parser::Parser;
use std::rc::Rc;

/// Runs a source text through the full pipeline: parse, macro definition
/// and expansion against `macro_env`, then evaluation in `env`.
///
/// Both environments persist across calls, which is what gives the REPL
/// (and multi-chunk scripts) macros and bindings that survive between
/// inputs. Parser errors abort before anything is evaluated; runtime
/// errors come back as an ordinary [`Object::Error`] value.
pub fn run(
    source: &str,
    macro_env: &Rc<Environment>,
    env: &Rc<Environment>,
) -> Result<Object, InterpreterError> {
    let mut parser = Parser::new(Lexer::new(source));
    let mut program = parser.parse_program();
    if !parser.errors().is_empty() {
        return Err(InterpreterError::Parse(parser.errors().to_vec()));
    }
    debug!("parsed {} top-level statements", program.statements.len());

    macros::define_macros(&mut program, macro_env);
    let expanded = macros::expand_macros(program, macro_env);
    debug!("macro expansion done");

    Ok(eval::eval_program(&expanded, env))
}

/// Parses and macro-expands without evaluating, returning the canonical
/// rendering of the expanded program. Backs the `--parse-only` flag.
pub fn expand_only(source: &str) -> Result<String, InterpreterError> {
    let mut parser = Parser::new(Lexer::new(source));
    let mut program = parser.parse_program();
    if !parser.errors().is_empty() {
        return Err(InterpreterError::Parse(parser.errors().to_vec()));
    }

    let macro_env = Environment::new();
    macros::define_macros(&mut program, &macro_env);
    let expanded = macros::expand_macros(program, &macro_env);
    Ok(expanded.to_string())
}
