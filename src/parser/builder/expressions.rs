//! Expression, assignment target and literal construction

use super::{AstBuilder, BuildError};
use crate::parser::ast::*;
use crate::parser::cst::*;

impl AstBuilder {
    pub(crate) fn build_expr(&self, expr: &ExprNode) -> Result<Expr, BuildError> {
        Ok(match expr {
            ExprNode::Binary { left, op, right } => Expr::BinaryOp {
                left: Box::new(self.build_expr(left)?),
                op: *op,
                right: Box::new(self.build_expr(right)?),
            },
            ExprNode::Unary { op, operand } => Expr::UnaryOp {
                op: *op,
                operand: Box::new(self.build_expr(operand)?),
            },
            ExprNode::Postfix { primary, ops } => {
                Expr::Postfix(self.build_postfix(primary, ops)?)
            }
            ExprNode::Literal(literal) => self.build_literal(literal)?,
            ExprNode::ArrayLiteral(items) => Expr::ArrayLiteral(self.build_exprs(items)?),
            ExprNode::Identifier(name) => Expr::Identifier(name.text.clone()),
            ExprNode::This => Expr::This,
            ExprNode::New { class_name, args } => Expr::ObjectCreation {
                class_name: class_name.text.clone(),
                args: self.build_exprs(args)?,
            },
            ExprNode::Paren(inner) => Expr::Parenthesized(Box::new(self.build_expr(inner)?)),
        })
    }

    pub(crate) fn build_exprs(&self, exprs: &[ExprNode]) -> Result<Vec<Expr>, BuildError> {
        exprs.iter().map(|expr| self.build_expr(expr)).collect()
    }

    /// Build a postfix chain.
    ///
    /// A call written directly after the primary takes its name from it:
    /// `foo(x)` calls `foo` on `foo`, `this(x)` calls `this`. Any later
    /// bare call has an empty name.
    fn build_postfix(
        &self,
        primary: &ExprNode,
        ops: &[PostfixNode],
    ) -> Result<PostfixExpr, BuildError> {
        let built_primary = self.build_expr(primary)?;
        let mut built_ops = Vec::with_capacity(ops.len());

        for (i, op) in ops.iter().enumerate() {
            built_ops.push(match op {
                PostfixNode::Member(name) => PostfixOp::MemberAccess(name.text.clone()),
                PostfixNode::MemberCall { name, args } => PostfixOp::MethodCall {
                    name: name.text.clone(),
                    args: self.build_exprs(args)?,
                },
                PostfixNode::Call(args) => {
                    let name = match (i, primary) {
                        (0, ExprNode::Identifier(callee)) => callee.text.clone(),
                        (0, ExprNode::This) => "this".to_string(),
                        _ => String::new(),
                    };
                    PostfixOp::MethodCall {
                        name,
                        args: self.build_exprs(args)?,
                    }
                }
                PostfixNode::Index(index) => {
                    PostfixOp::ArrayAccess(Box::new(self.build_expr(index)?))
                }
            });
        }

        Ok(PostfixExpr::new(built_primary, built_ops))
    }

    pub(crate) fn build_lhs(&self, target: &ExprNode) -> Result<Lhs, BuildError> {
        match target {
            ExprNode::Identifier(name) => Ok(Lhs::Id(name.text.clone())),
            ExprNode::Postfix { primary, ops } => {
                Ok(Lhs::Postfix(self.build_postfix(primary, ops)?))
            }
            other => Err(BuildError {
                message: format!("not an assignment target: {:?}", other),
                location: None,
            }),
        }
    }

    fn build_literal(&self, literal: &LiteralNode) -> Result<Expr, BuildError> {
        Ok(match literal {
            LiteralNode::Int(spelling) => Expr::IntLiteral(
                spelling
                    .text
                    .parse::<i64>()
                    .map_err(|e| BuildError::at(e.to_string(), spelling.location))?,
            ),
            LiteralNode::Float(spelling) => Expr::FloatLiteral(
                spelling
                    .text
                    .parse::<f64>()
                    .map_err(|e| BuildError::at(e.to_string(), spelling.location))?,
            ),
            LiteralNode::Str(text) => Expr::StringLiteral(text.clone()),
            LiteralNode::Bool(value) => Expr::BoolLiteral(*value),
            LiteralNode::Nil => Expr::NilLiteral,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::builder::AstBuilder;
    use crate::parser::parse::Parser;

    fn expr(text: &str) -> Expr {
        let source = format!("class T {{ float v := {}; }}", text);
        let cst = Parser::new(&source).parse_program().unwrap();
        let mut program = AstBuilder::new().build(&cst).unwrap();
        match program.classes.remove(0).members.remove(0) {
            Member::Attribute(mut decl) => decl.attributes.remove(0).init.unwrap(),
            other => panic!("Expected attribute, got {:?}", other),
        }
    }

    #[test]
    fn test_float_spellings() {
        assert_eq!(expr("1."), Expr::FloatLiteral(1.0));
        assert_eq!(expr(".5"), Expr::FloatLiteral(0.5));
        assert_eq!(expr("12e8"), Expr::FloatLiteral(12e8));
        assert_eq!(expr("0.33E-3"), Expr::FloatLiteral(0.33e-3));
    }

    #[test]
    fn test_most_negative_integer() {
        assert_eq!(expr("-9223372036854775808"), Expr::IntLiteral(i64::MIN));
        assert_eq!(
            expr("-9223372036854775808").to_string(),
            "IntLiteral(-9223372036854775808)"
        );
    }

    #[test]
    fn test_bare_call_names() {
        assert_eq!(
            expr("foo(1)"),
            Expr::Postfix(PostfixExpr::new(
                Expr::Identifier("foo".into()),
                vec![PostfixOp::MethodCall {
                    name: "foo".into(),
                    args: vec![Expr::IntLiteral(1)],
                }],
            ))
        );
        match expr("this(2)(3)") {
            Expr::Postfix(postfix) => {
                assert!(matches!(&postfix.ops[0], PostfixOp::MethodCall { name, .. } if name == "this"));
                assert!(matches!(&postfix.ops[1], PostfixOp::MethodCall { name, .. } if name.is_empty()));
            }
            other => panic!("Expected postfix, got {:?}", other),
        }
    }

    #[test]
    fn test_parentheses_are_kept_inside_expressions() {
        assert_eq!(
            expr("(1)").to_string(),
            "ParenthesizedExpression(IntLiteral(1))"
        );
        assert_eq!(
            expr("-a ^ b").to_string(),
            "BinaryOp(UnaryOp(-, Identifier(a)), ^, Identifier(b))"
        );
    }

    #[test]
    fn test_object_creation_with_arguments() {
        assert_eq!(
            expr("new Rectangle(5.0, 3.0)").to_string(),
            "ObjectCreation(new Rectangle(FloatLiteral(5.0), FloatLiteral(3.0)))"
        );
    }
}
