//! Self-call contraction
//!
//! A block such as
//!
//! ```text
//! { Shape s := shape; draw(s); }
//! ```
//!
//! writes `draw(s)` as a bare self call, which the builder represents as
//! `draw.draw(s)`. When an earlier local in the same block is initialised to
//! a different plain identifier, the call is folded into that initialiser
//! (`s := shape.draw(s)`) and the call statement disappears.
//!
//! Only declarations positioned before the call qualify. Declarations are
//! scanned in order and the first matching variable wins; each call is folded
//! at most once.

use crate::parser::ast::*;
use log::debug;

/// A block entry tagged with its index among all items of the block
#[derive(Debug)]
pub(super) struct Positioned<T> {
    pub position: usize,
    pub node: T,
}

pub(super) fn contract_self_calls(
    var_decls: &mut [Positioned<VariableDecl>],
    statements: &mut Vec<Positioned<Statement>>,
) {
    let mut i = 0;
    while i < statements.len() {
        let call_position = statements[i].position;
        let folded = match &statements[i].node {
            Statement::MethodInvocation(call) => match call.self_call() {
                Some((name, args)) => fold_into_earlier(var_decls, call_position, name, args),
                None => false,
            },
            _ => false,
        };

        if folded {
            statements.remove(i);
        } else {
            i += 1;
        }
    }
}

/// Rewrite the first eligible initialiser; returns whether one was found
fn fold_into_earlier(
    var_decls: &mut [Positioned<VariableDecl>],
    call_position: usize,
    method: &str,
    args: &[Expr],
) -> bool {
    let candidates = var_decls
        .iter_mut()
        .take_while(|decl| decl.position < call_position)
        .flat_map(|decl| decl.node.variables.iter_mut());

    for variable in candidates {
        let receiver = match &variable.init {
            Some(Expr::Identifier(receiver)) if *receiver != variable.name => receiver.clone(),
            _ => continue,
        };

        debug!(
            "folding {}(..) into initialiser of {} on {}",
            method, variable.name, receiver
        );
        variable.init = Some(Expr::Postfix(PostfixExpr::new(
            Expr::Identifier(receiver),
            vec![PostfixOp::MethodCall {
                name: method.to_string(),
                args: args.to_vec(),
            }],
        )));
        return true;
    }

    false
}
