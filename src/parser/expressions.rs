//! Expression parsing implementation
//!
//! One method per precedence level, lowest binding first:
//!
//! | Level          | Operators              | Associativity |
//! |----------------|------------------------|---------------|
//! | logical        | `&&` `\|\|`            | left          |
//! | relational     | `==` `!=` `<` `<=` `>` `>=` | none     |
//! | additive       | `+` `-`                | left          |
//! | multiplicative | `*` `/` `\` `%`        | left          |
//! | concatenation  | `^`                    | left          |
//! | unary          | `!` `-`                | right         |
//! | postfix        | `.id` `.id(..)` `(..)` `[..]` | left   |
//!
//! Atoms are literals, `this`, `new C(args)`, `(expr)`, `{ expr, ... }` and
//! identifiers.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::{BinOp, UnOp};
use crate::parser::cst::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<ExprNode, ParseError> {
        self.nested(Self::parse_logical)
    }

    fn parse_logical(&mut self) -> Result<ExprNode, ParseError> {
        let mut left = self.parse_relational()?;

        loop {
            let op = match self.peek_kind() {
                TokenKind::AndAnd => BinOp::And,
                TokenKind::OrOr => BinOp::Or,
                _ => break,
            };
            self.advance();
            let right = self.parse_relational()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    /// A single comparison at most; `a < b < c` stops before the second `<`
    fn parse_relational(&mut self) -> Result<ExprNode, ParseError> {
        let left = self.parse_additive()?;

        let op = match self.peek_kind() {
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::NotEq => BinOp::Ne,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Le => BinOp::Le,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::Ge => BinOp::Ge,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_additive()?;

        Ok(binary(left, op, right))
    }

    fn parse_additive(&mut self) -> Result<ExprNode, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<ExprNode, ParseError> {
        let mut left = self.parse_concatenation()?;

        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Backslash => BinOp::IntDiv,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_concatenation()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_concatenation(&mut self) -> Result<ExprNode, ParseError> {
        let mut left = self.parse_unary()?;

        while self.match_token(TokenKind::Caret) {
            let right = self.parse_unary()?;
            left = binary(left, BinOp::Concat, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<ExprNode, ParseError> {
        if let Some(literal) = self.negated_min_literal() {
            return Ok(literal);
        }

        let op = match self.peek_kind() {
            TokenKind::Bang => UnOp::Not,
            TokenKind::Minus => UnOp::Neg,
            _ => return self.parse_postfix(),
        };
        self.advance();
        let operand = Box::new(self.nested(Self::parse_unary)?);
        Ok(ExprNode::Unary { op, operand })
    }

    /// `-9223372036854775808` as a single literal.
    ///
    /// Its magnitude alone is outside `i64`, so the minus is folded into the
    /// literal. Only applies when no postfix operation follows the digits.
    fn negated_min_literal(&mut self) -> Option<ExprNode> {
        if !self.check(TokenKind::Minus)
            || self.peek_ahead(1) != TokenKind::IntLiteral
            || matches!(
                self.peek_ahead(2),
                TokenKind::LParen | TokenKind::LBracket | TokenKind::Dot
            )
        {
            return None;
        }

        if self.peek_nth(1).lexeme.parse::<u64>() != Ok(i64::MIN.unsigned_abs()) {
            return None;
        }
        let minus = self.advance();
        let digits = self.advance();
        Some(ExprNode::Literal(LiteralNode::Int(Spelling::new(
            format!("-{}", digits.lexeme),
            minus.location,
        ))))
    }

    /// Parse a primary followed by any number of postfix operations
    fn parse_postfix(&mut self) -> Result<ExprNode, ParseError> {
        let primary = self.parse_primary()?;
        let mut ops = Vec::new();

        loop {
            match self.peek_kind() {
                TokenKind::Dot => {
                    self.advance();
                    let name = self.expect_identifier()?;
                    if self.check(TokenKind::LParen) {
                        let args = self.parse_arguments()?;
                        ops.push(PostfixNode::MemberCall { name, args });
                    } else {
                        ops.push(PostfixNode::Member(name));
                    }
                }
                TokenKind::LParen => {
                    let args = self.parse_arguments()?;
                    ops.push(PostfixNode::Call(args));
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_expression()?;
                    self.expect_token(TokenKind::RBracket)?;
                    ops.push(PostfixNode::Index(Box::new(index)));
                }
                _ => break,
            }
        }

        if ops.is_empty() {
            Ok(primary)
        } else {
            Ok(ExprNode::Postfix {
                primary: Box::new(primary),
                ops,
            })
        }
    }

    fn parse_primary(&mut self) -> Result<ExprNode, ParseError> {
        match self.peek_kind() {
            TokenKind::IntLiteral => {
                let token = self.peek().clone();
                if token.lexeme.parse::<i64>().is_err() {
                    return Err(self.error_at(&token, "integer within 64-bit range"));
                }
                self.advance();
                Ok(ExprNode::Literal(LiteralNode::Int(Spelling::new(
                    token.lexeme,
                    token.location,
                ))))
            }
            TokenKind::FloatLiteral => {
                let token = self.advance();
                Ok(ExprNode::Literal(LiteralNode::Float(Spelling::new(
                    token.lexeme,
                    token.location,
                ))))
            }
            TokenKind::StringLiteral => {
                let token = self.advance();
                Ok(ExprNode::Literal(LiteralNode::Str(token.lexeme)))
            }
            TokenKind::True => {
                self.advance();
                Ok(ExprNode::Literal(LiteralNode::Bool(true)))
            }
            TokenKind::False => {
                self.advance();
                Ok(ExprNode::Literal(LiteralNode::Bool(false)))
            }
            TokenKind::Nil => {
                self.advance();
                Ok(ExprNode::Literal(LiteralNode::Nil))
            }
            TokenKind::This => {
                self.advance();
                Ok(ExprNode::This)
            }
            TokenKind::New => {
                self.advance();
                let class_name = self.expect_identifier()?;
                let args = self.parse_arguments()?;
                Ok(ExprNode::New { class_name, args })
            }
            TokenKind::Ident => {
                let name = self.expect_identifier()?;
                Ok(ExprNode::Identifier(name))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect_token(TokenKind::RParen)?;
                Ok(ExprNode::Paren(Box::new(inner)))
            }
            TokenKind::LBrace => {
                self.advance();
                let elements = self.parse_expression_list(TokenKind::RBrace)?;
                self.expect_token(TokenKind::RBrace)?;
                Ok(ExprNode::ArrayLiteral(elements))
            }
            _ => Err(self.error_at_current("expression")),
        }
    }

    /// Parse `( expr, ... )`
    pub(crate) fn parse_arguments(&mut self) -> Result<Vec<ExprNode>, ParseError> {
        self.expect_token(TokenKind::LParen)?;
        let args = self.parse_expression_list(TokenKind::RParen)?;
        self.expect_token(TokenKind::RParen)?;
        Ok(args)
    }

    /// Comma-separated expressions up to, not including, `close`
    fn parse_expression_list(&mut self, close: TokenKind) -> Result<Vec<ExprNode>, ParseError> {
        let mut list = Vec::new();
        if self.check(close) {
            return Ok(list);
        }

        loop {
            list.push(self.parse_expression()?);
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(list)
    }
}

fn binary(left: ExprNode, op: BinOp, right: ExprNode) -> ExprNode {
    ExprNode::Binary {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}
