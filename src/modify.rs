// ABOUTME: Generic post-order AST transform used by the macro expander

use crate::ast::{BlockStatement, Expression, Program, Statement};

/// Rebuilds a program bottom-up, passing every expression through `modifier`
/// after its children have been rebuilt. Statements are structural: the
/// callback sees only expressions, which is the one node category the macro
/// system ever replaces.
pub fn modify_program<F>(program: Program, modifier: &mut F) -> Program
where
    F: FnMut(Expression) -> Expression,
{
    Program {
        statements: program
            .statements
            .into_iter()
            .map(|statement| modify_statement(statement, modifier))
            .collect(),
    }
}

pub fn modify_statement<F>(statement: Statement, modifier: &mut F) -> Statement
where
    F: FnMut(Expression) -> Expression,
{
    match statement {
        Statement::Let { name, value } => Statement::Let {
            name,
            value: modify_expression(value, modifier),
        },
        Statement::Return(value) => Statement::Return(modify_expression(value, modifier)),
        Statement::Expression(expression) => {
            Statement::Expression(modify_expression(expression, modifier))
        }
    }
}

pub fn modify_block<F>(block: BlockStatement, modifier: &mut F) -> BlockStatement
where
    F: FnMut(Expression) -> Expression,
{
    BlockStatement {
        statements: block
            .statements
            .into_iter()
            .map(|statement| modify_statement(statement, modifier))
            .collect(),
    }
}

/// Every container position recurses: operands, branches, bodies, element
/// lists, hash pairs, call and index sub-expressions.
pub fn modify_expression<F>(expression: Expression, modifier: &mut F) -> Expression
where
    F: FnMut(Expression) -> Expression,
{
    let rebuilt = match expression {
        Expression::Prefix { operator, right } => Expression::Prefix {
            operator,
            right: Box::new(modify_expression(*right, modifier)),
        },
        Expression::Infix {
            operator,
            left,
            right,
        } => Expression::Infix {
            operator,
            left: Box::new(modify_expression(*left, modifier)),
            right: Box::new(modify_expression(*right, modifier)),
        },
        Expression::Index { left, index } => Expression::Index {
            left: Box::new(modify_expression(*left, modifier)),
            index: Box::new(modify_expression(*index, modifier)),
        },
        Expression::If {
            condition,
            consequence,
            alternative,
        } => Expression::If {
            condition: Box::new(modify_expression(*condition, modifier)),
            consequence: modify_block(consequence, modifier),
            alternative: alternative.map(|block| modify_block(block, modifier)),
        },
        Expression::FunctionLiteral { parameters, body } => Expression::FunctionLiteral {
            parameters,
            body: modify_block(body, modifier),
        },
        Expression::MacroLiteral { parameters, body } => Expression::MacroLiteral {
            parameters,
            body: modify_block(body, modifier),
        },
        Expression::Call {
            function,
            arguments,
        } => Expression::Call {
            function: Box::new(modify_expression(*function, modifier)),
            arguments: arguments
                .into_iter()
                .map(|argument| modify_expression(argument, modifier))
                .collect(),
        },
        Expression::ArrayLiteral(elements) => Expression::ArrayLiteral(
            elements
                .into_iter()
                .map(|element| modify_expression(element, modifier))
                .collect(),
        ),
        Expression::HashLiteral(pairs) => Expression::HashLiteral(
            pairs
                .into_iter()
                .map(|(key, value)| {
                    (
                        modify_expression(key, modifier),
                        modify_expression(value, modifier),
                    )
                })
                .collect(),
        ),
        leaf @ (Expression::Identifier(_)
        | Expression::IntegerLiteral(_)
        | Expression::Boolean(_)
        | Expression::StringLiteral(_)) => leaf,
    };
    modifier(rebuilt)
}
