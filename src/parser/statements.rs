//! Statement parsing implementation
//!
//! This module handles parsing of method bodies:
//!
//! - Local declarations: `final int[3] a := {1, 2, 3}, b;`
//! - Assignments: `x := 1;`, `this.x := x;`, `a[i] := 0;`
//! - Control flow: `if ... then ... else ...`, `for i := 1 to n do ...`
//! - Jump statements: `return`, `break`, `continue`
//! - Nested blocks and call statements
//!
//! # Grammar
//!
//! ```text
//! block     ::= "{" (var_decl | statement)* "}"
//! var_decl  ::= "final"? type declarator ("," declarator)* ";"
//! statement ::= if_stmt | for_stmt | return_stmt | "break" ";" | "continue" ";"
//!             | block | lhs ":=" expression ";" | call_expr ";"
//! if_stmt   ::= "if" expression "then" statement ("else" statement)?
//! for_stmt  ::= "for" ID ":=" expression ("to" | "downto") expression "do" statement
//! ```
//!
//! Branches and loop bodies are statements, so a declaration can only appear
//! directly inside a block.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::ForDirection;
use crate::parser::cst::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a braced block
    pub(crate) fn parse_block(&mut self) -> Result<BlockNode, ParseError> {
        self.expect_token(TokenKind::LBrace)?;
        let mut items = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if self.is_var_decl_start() {
                items.push(BlockItem::Declaration(self.parse_var_decl()?));
            } else {
                items.push(BlockItem::Statement(self.parse_statement()?));
            }
        }

        self.expect_token(TokenKind::RBrace)?;
        Ok(BlockNode { items })
    }

    /// Decide between a declaration and a statement without consuming input.
    ///
    /// `ID ID` and `ID [ INT ] ID` declare; `ID [ expr ] :=` assigns.
    fn is_var_decl_start(&self) -> bool {
        if self.check(TokenKind::Final) || self.is_type_start() {
            return true;
        }
        if !self.check(TokenKind::Ident) {
            return false;
        }
        match self.peek_ahead(1) {
            TokenKind::Ident => true,
            TokenKind::LBracket => {
                self.peek_ahead(2) == TokenKind::IntLiteral
                    && self.peek_ahead(3) == TokenKind::RBracket
                    && self.peek_ahead(4) == TokenKind::Ident
            }
            _ => false,
        }
    }

    fn parse_var_decl(&mut self) -> Result<VarDeclNode, ParseError> {
        let is_final = self.match_token(TokenKind::Final);
        let ty = self.parse_type()?;
        let name = self.expect_identifier()?;
        let declarators = self.parse_declarators(name)?;

        Ok(VarDeclNode {
            is_final,
            ty,
            declarators,
        })
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<StmtNode, ParseError> {
        self.nested(Self::parse_statement_inner)
    }

    fn parse_statement_inner(&mut self) -> Result<StmtNode, ParseError> {
        match self.peek_kind() {
            TokenKind::If => self.parse_if_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Break => {
                self.advance();
                self.expect_token(TokenKind::Semicolon)?;
                Ok(StmtNode::Break)
            }
            TokenKind::Continue => {
                self.advance();
                self.expect_token(TokenKind::Semicolon)?;
                Ok(StmtNode::Continue)
            }
            TokenKind::LBrace => self.parse_block().map(StmtNode::Block),
            _ => self.parse_expression_statement(),
        }
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<StmtNode, ParseError> {
        self.expect_token(TokenKind::If)?;

        // Outer parentheses around the whole condition belong to the `if`
        let condition = match self.parse_expression()? {
            ExprNode::Paren(inner) => *inner,
            other => other,
        };

        self.expect_token(TokenKind::Then)?;
        let then_branch = Box::new(self.parse_statement()?);

        let else_branch = if self.match_token(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(StmtNode::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    /// Parse for statement
    fn parse_for_statement(&mut self) -> Result<StmtNode, ParseError> {
        self.expect_token(TokenKind::For)?;
        let variable = self.expect_identifier()?;
        self.expect_token(TokenKind::Assign)?;
        let start = self.parse_expression()?;

        let direction = if self.match_token(TokenKind::To) {
            ForDirection::To
        } else if self.match_token(TokenKind::Downto) {
            ForDirection::Downto
        } else {
            return Err(self.error_at_current("'to' or 'downto'"));
        };

        let end = self.parse_expression()?;
        self.expect_token(TokenKind::Do)?;
        let body = Box::new(self.parse_statement()?);

        Ok(StmtNode::For {
            variable,
            start,
            direction,
            end,
            body,
        })
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<StmtNode, ParseError> {
        self.expect_token(TokenKind::Return)?;

        if self.match_token(TokenKind::Semicolon) {
            return Ok(StmtNode::Return(None));
        }

        let value = self.parse_expression()?;
        self.expect_token(TokenKind::Semicolon)?;
        Ok(StmtNode::Return(Some(value)))
    }

    /// Parse an assignment or a call used as a statement
    fn parse_expression_statement(&mut self) -> Result<StmtNode, ParseError> {
        let expr = self.parse_expression()?;

        if self.check(TokenKind::Assign) {
            if !expr.is_assignable() {
                return Err(self.error_at_current("';'"));
            }
            self.advance();
            let value = self.parse_expression()?;
            self.expect_token(TokenKind::Semicolon)?;
            return Ok(StmtNode::Assign {
                target: expr,
                value,
            });
        }

        if !expr.ends_in_call() {
            return Err(self.error_at_current("':='"));
        }
        self.expect_token(TokenKind::Semicolon)?;
        Ok(StmtNode::Call(expr))
    }
}
