//! Block shaping and statement construction

use super::contraction::{contract_self_calls, Positioned};
use super::{AstBuilder, BuildError};
use crate::parser::ast::*;
use crate::parser::cst::*;

impl AstBuilder {
    /// Split a block into its declaration list and statement list, each in
    /// source order, then run self-call contraction over it.
    pub(crate) fn build_block(&self, block: &BlockNode) -> Result<BlockStatement, BuildError> {
        let mut var_decls = Vec::new();
        let mut statements = Vec::new();

        for (position, item) in block.items.iter().enumerate() {
            match item {
                BlockItem::Declaration(decl) => var_decls.push(Positioned {
                    position,
                    node: self.build_variable_decl(decl)?,
                }),
                BlockItem::Statement(stmt) => statements.push(Positioned {
                    position,
                    node: self.build_statement(stmt)?,
                }),
            }
        }

        contract_self_calls(&mut var_decls, &mut statements);

        Ok(BlockStatement {
            var_decls: var_decls.into_iter().map(|p| p.node).collect(),
            statements: statements.into_iter().map(|p| p.node).collect(),
        })
    }

    pub(crate) fn build_statement(&self, stmt: &StmtNode) -> Result<Statement, BuildError> {
        Ok(match stmt {
            StmtNode::Assign { target, value } => Statement::Assignment {
                target: self.build_lhs(target)?,
                value: self.build_expr(value)?,
            },
            StmtNode::If {
                condition,
                then_branch,
                else_branch,
            } => Statement::If {
                condition: self.build_expr(condition)?,
                then_branch: Box::new(self.build_statement(then_branch)?),
                else_branch: else_branch
                    .as_ref()
                    .map(|branch| self.build_statement(branch).map(Box::new))
                    .transpose()?,
            },
            StmtNode::For {
                variable,
                start,
                direction,
                end,
                body,
            } => Statement::For {
                variable: variable.text.clone(),
                start: self.build_expr(start)?,
                direction: *direction,
                end: self.build_expr(end)?,
                body: Box::new(self.build_statement(body)?),
            },
            StmtNode::Return(value) => Statement::Return(match value {
                Some(expr) => self.build_expr(expr)?,
                None => Expr::NilLiteral,
            }),
            StmtNode::Break => Statement::Break,
            StmtNode::Continue => Statement::Continue,
            StmtNode::Call(expr) => match self.build_expr(expr)? {
                Expr::Postfix(call) => Statement::MethodInvocation(call),
                other => {
                    return Err(BuildError {
                        message: format!("call statement without a call: {:?}", other),
                        location: None,
                    })
                }
            },
            StmtNode::Block(block) => Statement::Block(self.build_block(block)?),
        })
    }
}
