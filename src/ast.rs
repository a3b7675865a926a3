// ABOUTME: AST node types produced by the parser, with canonical rendering

use std::fmt;

/// Root node: owns every statement of a parsed source text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

/// A brace-delimited statement sequence, used as the body of `if`, `fn`,
/// and `macro` forms.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for statement in &self.statements {
            write!(f, "\t{}", statement)?;
        }
        write!(f, "}}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let { name: String, value: Expression },
    Return(Expression),
    Expression(Expression),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => writeln!(f, "let {} = {};", name, value),
            Statement::Return(value) => writeln!(f, "return {};", value),
            Statement::Expression(expression) => writeln!(f, "{};", expression),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(String),
    IntegerLiteral(i64),
    Boolean(bool),
    StringLiteral(String),
    ArrayLiteral(Vec<Expression>),
    /// Pairs in source order; duplicate keys are kept at parse time.
    HashLiteral(Vec<(Expression, Expression)>),
    Prefix {
        operator: String,
        right: Box<Expression>,
    },
    Infix {
        operator: String,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    If {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    FunctionLiteral {
        parameters: Vec<String>,
        body: BlockStatement,
    },
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Index {
        left: Box<Expression>,
        index: Box<Expression>,
    },
    MacroLiteral {
        parameters: Vec<String>,
        body: BlockStatement,
    },
}

impl fmt::Display for Expression {
    /// The canonical rendering. Prefix and infix expressions are fully
    /// parenthesized, which makes precedence uniquely recoverable: the
    /// rendering is a fixed point under parse-then-print.
    ///
    /// The macro expander also leans on this: `unquote` call sites are
    /// recognized by their callee rendering to the literal string `unquote`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::IntegerLiteral(value) => write!(f, "{}", value),
            Expression::Boolean(value) => write!(f, "{}", value),
            Expression::StringLiteral(value) => write!(f, "{}", value),
            Expression::ArrayLiteral(elements) => {
                write!(f, "[{}]", join(elements, ", "))
            }
            Expression::HashLiteral(pairs) => {
                let rendered: Vec<String> = pairs
                    .iter()
                    .map(|(key, value)| format!("{} : {}", key, value))
                    .collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
            Expression::Prefix { operator, right } => write!(f, "({}{})", operator, right),
            Expression::Infix {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if{} {}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, " else {}", alternative)?;
                }
                Ok(())
            }
            Expression::FunctionLiteral { parameters, body } => {
                write!(f, "fn({}) {}", parameters.join(", "), body)
            }
            Expression::MacroLiteral { parameters, body } => {
                write!(f, "macro({}) {}", parameters.join(", "), body)
            }
            Expression::Call {
                function,
                arguments,
            } => write!(f, "{}({})", function, join(arguments, ", ")),
            Expression::Index { left, index } => write!(f, "({}[{}])", left, index),
        }
    }
}

fn join(expressions: &[Expression], separator: &str) -> String {
    expressions
        .iter()
        .map(Expression::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}
