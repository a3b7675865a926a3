// ABOUTME: Binary entry point: CLI parsing, script runner, and REPL

use clap::Parser as ClapParser;
use log::debug;
use marmoset::config::{HISTORY_FILE, PROMPT, WELCOME_FOOTER, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use marmoset::env::Environment;
use marmoset::error::InterpreterError;
use marmoset::highlighter::MarmosetHelper;
use marmoset::object::Object;
use marmoset::{config, expand_only, run};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use std::path::PathBuf;

/// Tree-walking interpreter for the Marmoset language
#[derive(ClapParser, Debug)]
#[command(name = "marmoset")]
#[command(version = config::VERSION)]
#[command(about = "A small dynamically-typed language with closures and macros")]
struct CliArgs {
    /// Script file to execute (optional - if not provided, starts REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Parse and macro-expand only, printing the canonical rendering
    #[arg(long = "parse-only")]
    parse_only: bool,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    simple_logger::SimpleLogger::new().with_level(level).init()?;

    if let Some(script_path) = args.script {
        run_script(&script_path, args.parse_only)?;
        return Ok(());
    }

    repl()
}

/// Executes a script file and exits. Only `puts` writes to stdout in
/// normal mode; a runtime error is printed and reported through the exit
/// status.
fn run_script(path: &PathBuf, parse_only: bool) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read script file {}: {}", path.display(), e))?;

    if parse_only {
        print!("{}", expand_only(&source)?);
        return Ok(());
    }

    let macro_env = Environment::new();
    let env = Environment::new();
    match run(&source, &macro_env, &env) {
        Ok(Object::Error(message)) => Err(format!("runtime error: {}", message).into()),
        Ok(result) => {
            debug!("script finished with {}", result.type_name());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Interactive loop. The macro environment and the evaluation environment
/// both persist across lines, so macros and bindings defined earlier stay
/// usable.
fn repl() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<MarmosetHelper, DefaultHistory> = Editor::with_config(config)?;
    rl.set_helper(Some(MarmosetHelper::new()));

    let _ = rl.load_history(HISTORY_FILE);

    println!("{}", WELCOME_MESSAGE);
    println!("{}", WELCOME_SUBTITLE);
    println!("{}", WELCOME_FOOTER);

    let macro_env = Environment::new();
    let env = Environment::new();

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                match run(&line, &macro_env, &env) {
                    // Null results are noise at the prompt (let bindings,
                    // puts, if with no alternative), so they are not echoed
                    Ok(Object::Null) => {}
                    Ok(result) => println!("{}", result),
                    Err(InterpreterError::Parse(errors)) => {
                        eprintln!("parser errors:");
                        for error in errors {
                            eprintln!("\t{}", error);
                        }
                    }
                    Err(e) => eprintln!("error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                eprintln!("error: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(HISTORY_FILE);

    Ok(())
}
