// ABOUTME: Syntax highlighter for the REPL with color support
// Implements rustyline's Highlighter trait to provide ANSI color codes
// for Marmoset syntax elements while preserving display width

use crate::builtins;
use rustyline::completion::Completer;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;
use std::borrow::Cow;
use std::collections::HashSet;

// ANSI color codes (3-bit/4-bit colors for maximum terminal compatibility)
const COLOR_RESET: &str = "\x1b[0m";
const COLOR_KEYWORD: &str = "\x1b[1;35m"; // Bold magenta
const COLOR_BUILTIN: &str = "\x1b[36m"; // Cyan
const COLOR_NUMBER: &str = "\x1b[33m"; // Yellow
const COLOR_STRING: &str = "\x1b[32m"; // Green
const COLOR_BRACKET: &str = "\x1b[1;34m"; // Bold blue
const COLOR_QUOTE: &str = "\x1b[1;33m"; // Bold yellow

/// Rustyline helper providing syntax-aware color highlighting.
pub struct MarmosetHelper;

impl MarmosetHelper {
    pub fn new() -> Self {
        MarmosetHelper
    }
}

impl Default for MarmosetHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for MarmosetHelper {}

impl Completer for MarmosetHelper {
    type Candidate = String;
}

impl Hinter for MarmosetHelper {
    type Hint = String;
}

impl Validator for MarmosetHelper {}

impl Highlighter for MarmosetHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let keywords = keyword_set();
        let builtin_names: HashSet<&str> = builtins::names().collect();

        let highlighted = highlight_line(line, &keywords, &builtin_names);
        if highlighted == line {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(highlighted)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

fn highlight_line(line: &str, keywords: &HashSet<&str>, builtin_names: &HashSet<&str>) -> String {
    let mut result = String::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            // Strings: there are no escape sequences in the language
            '"' => {
                result.push_str(COLOR_STRING);
                result.push('"');
                i += 1;
                while i < chars.len() {
                    let c = chars[i];
                    result.push(c);
                    i += 1;
                    if c == '"' {
                        break;
                    }
                }
                result.push_str(COLOR_RESET);
            }

            '0'..='9' => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                result.push_str(COLOR_NUMBER);
                result.extend(&chars[start..i]);
                result.push_str(COLOR_RESET);
            }

            '(' | ')' | '[' | ']' | '{' | '}' => {
                result.push_str(COLOR_BRACKET);
                result.push(chars[i]);
                i += 1;
                result.push_str(COLOR_RESET);
            }

            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                if keywords.contains(word.as_str()) {
                    result.push_str(COLOR_KEYWORD);
                    result.push_str(&word);
                    result.push_str(COLOR_RESET);
                } else if word == "quote" || word == "unquote" {
                    result.push_str(COLOR_QUOTE);
                    result.push_str(&word);
                    result.push_str(COLOR_RESET);
                } else if builtin_names.contains(word.as_str()) {
                    result.push_str(COLOR_BUILTIN);
                    result.push_str(&word);
                    result.push_str(COLOR_RESET);
                } else {
                    result.push_str(&word);
                }
            }

            c => {
                result.push(c);
                i += 1;
            }
        }
    }

    result
}

/// Keywords with dedicated token kinds.
fn keyword_set() -> HashSet<&'static str> {
    ["fn", "let", "true", "false", "if", "else", "return", "macro"]
        .iter()
        .copied()
        .collect()
}
