// ABOUTME: Macro definition sweep and call-site expansion pass

use crate::ast::{Expression, Program, Statement};
use crate::env::Environment;
use crate::eval;
use crate::modify;
use crate::object::{Macro, Object};
use log::debug;
use std::rc::Rc;

/// Pass 1: collects top-level `let name = macro(...) { ... }` statements
/// into `env` and removes them from the program. Only top-level statements
/// are swept; a macro literal inside a block never becomes a definition.
pub fn define_macros(program: &mut Program, env: &Rc<Environment>) {
    let mut definitions = Vec::new();

    for (index, statement) in program.statements.iter().enumerate() {
        if let Statement::Let {
            name,
            value: Expression::MacroLiteral { parameters, body },
        } = statement
        {
            debug!("defining macro {}", name);
            env.set(
                name.clone(),
                Object::Macro(Macro {
                    parameters: parameters.clone(),
                    body: body.clone(),
                    env: Rc::clone(env),
                }),
            );
            definitions.push(index);
        }
    }

    // Remove in descending order so earlier indices stay valid
    for index in definitions.into_iter().rev() {
        program.statements.remove(index);
    }
}

/// Pass 2: rewrites every call of a defined macro, bottom-up. Arguments are
/// bound unevaluated as `Quote` values, the body is evaluated once, and the
/// resulting quoted syntax replaces the call site.
pub fn expand_macros(program: Program, env: &Rc<Environment>) -> Program {
    modify::modify_program(program, &mut |expression| {
        let Some(mac) = as_macro_call(&expression, env) else {
            return expression;
        };
        let Expression::Call { arguments, .. } = &expression else {
            return expression;
        };

        let eval_env = Environment::new_enclosed(Rc::clone(&mac.env));
        for (parameter, argument) in mac.parameters.iter().zip(arguments) {
            eval_env.set(parameter.clone(), Object::Quote(argument.clone()));
        }

        debug!("expanding macro call {}", expression);
        match eval::eval_block(&mac.body, &eval_env) {
            Object::Quote(node) => node,
            other => panic!(
                "macros must return quoted syntax, got {}",
                other.type_name()
            ),
        }
    })
}

/// A macro call is a call expression whose callee is an identifier bound to
/// a `Macro` in the expansion environment.
fn as_macro_call(expression: &Expression, env: &Rc<Environment>) -> Option<Macro> {
    let Expression::Call { function, .. } = expression else {
        return None;
    };
    let Expression::Identifier(name) = function.as_ref() else {
        return None;
    };
    match env.get(name) {
        Some(Object::Macro(mac)) => Some(mac),
        _ => None,
    }
}
