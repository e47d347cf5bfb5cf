//! Canonical one-line rendering of the AST
//!
//! Every node prints as `NodeName(children)`, e.g.
//!
//! ```text
//! Program([ClassDecl(TestClass, [AttributeDecl(PrimitiveType(int), [Attribute(x)])])])
//! ```
//!
//! The format is stable and is what golden tests and the `oplang` binary
//! compare against.

use super::ast::*;
use std::fmt::{self, Display, Formatter};

/// Writes `items` separated by `, `
fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Writes `, <body>` when there is one
fn write_body(f: &mut Formatter<'_>, body: &Option<BlockStatement>) -> fmt::Result {
    match body {
        Some(block) => write!(f, ", {}", block),
        None => Ok(()),
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Program([")?;
        write_list(f, &self.classes)?;
        f.write_str("])")
    }
}

impl Display for ClassDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ClassDecl({}, ", self.name)?;
        if let Some(superclass) = &self.superclass {
            write!(f, "extends {}, ", superclass)?;
        }
        f.write_str("[")?;
        write_list(f, &self.members)?;
        f.write_str("])")
    }
}

impl Display for Member {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Member::Attribute(decl) => decl.fmt(f),
            Member::Method(decl) => decl.fmt(f),
            Member::Constructor(decl) => decl.fmt(f),
            Member::Destructor(decl) => decl.fmt(f),
        }
    }
}

impl Display for AttributeDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("AttributeDecl(")?;
        if self.is_static {
            f.write_str("static ")?;
        }
        if self.is_final {
            f.write_str("final ")?;
        }
        write!(f, "{}, [", self.attr_type)?;
        write_list(f, &self.attributes)?;
        f.write_str("])")
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.init {
            Some(init) => write!(f, "Attribute({} = {})", self.name, init),
            None => write!(f, "Attribute({})", self.name),
        }
    }
}

impl Display for MethodDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("MethodDecl(")?;
        if self.is_static {
            f.write_str("static ")?;
        }
        write!(f, "{} {}([", self.return_type, self.name)?;
        write_list(f, &self.params)?;
        f.write_str("])")?;
        write_body(f, &self.body)?;
        f.write_str(")")
    }
}

impl Display for ConstructorDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ConstructorDecl({}([", self.name)?;
        write_list(f, &self.params)?;
        f.write_str("])")?;
        write_body(f, &self.body)?;
        f.write_str(")")
    }
}

impl Display for DestructorDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DestructorDecl(~{}()", self.name)?;
        write_body(f, &self.body)?;
        f.write_str(")")
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Parameter({} {})", self.param_type, self.name)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(kind) => write!(f, "PrimitiveType({})", kind.keyword()),
            Type::Class(name) => write!(f, "ClassType({})", name),
            Type::Array { element, size } => write!(f, "ArrayType({}[{}])", element, size),
            Type::Reference(inner) => write!(f, "ReferenceType({} &)", inner),
        }
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("BlockStatement(")?;
        if !self.var_decls.is_empty() {
            f.write_str("vars=[")?;
            write_list(f, &self.var_decls)?;
            f.write_str("], ")?;
        }
        f.write_str("stmts=[")?;
        write_list(f, &self.statements)?;
        f.write_str("])")
    }
}

impl Display for VariableDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("VariableDecl(")?;
        if self.is_final {
            f.write_str("final ")?;
        }
        write!(f, "{}, [", self.var_type)?;
        write_list(f, &self.variables)?;
        f.write_str("])")
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.init {
            Some(init) => write!(f, "Variable({} = {})", self.name, init),
            None => write!(f, "Variable({})", self.name),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Assignment { target, value } => {
                write!(f, "AssignmentStatement({} := {})", target, value)
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                write!(f, "IfStatement(if {} then {}", condition, then_branch)?;
                if let Some(else_branch) = else_branch {
                    write!(f, ", else {}", else_branch)?;
                }
                f.write_str(")")
            }
            Statement::For {
                variable,
                start,
                direction,
                end,
                body,
            } => write!(
                f,
                "ForStatement(for {} := {} {} {} do {})",
                variable,
                start,
                direction.keyword(),
                end,
                body
            ),
            Statement::Return(value) => write!(f, "ReturnStatement(return {})", value),
            Statement::Break => f.write_str("BreakStatement()"),
            Statement::Continue => f.write_str("ContinueStatement()"),
            Statement::MethodInvocation(call) => {
                f.write_str("MethodInvocationStatement(")?;
                match (call.primary.as_ref(), call.ops.as_slice()) {
                    (Expr::Identifier(receiver), [op @ PostfixOp::MethodCall { .. }]) => {
                        write!(f, "StaticMethodInvocation({}{})", receiver, op)?;
                    }
                    _ => write!(f, "InstanceMethodInvocation({})", call)?,
                }
                f.write_str(")")
            }
            Statement::Block(block) => block.fmt(f),
        }
    }
}

impl Display for Lhs {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Lhs::Id(name) => write!(f, "IdLHS({})", name),
            Lhs::Postfix(postfix) => write!(f, "PostfixLHS({})", postfix),
        }
    }
}

impl Display for PostfixExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "PostfixExpression({}", self.primary)?;
        for op in &self.ops {
            write!(f, "{}", op)?;
        }
        f.write_str(")")
    }
}

impl Display for PostfixOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PostfixOp::MemberAccess(name) => write!(f, ".{}", name),
            PostfixOp::MethodCall { name, args } => {
                // Calls on a computed callee carry no name
                if !name.is_empty() {
                    write!(f, ".{}", name)?;
                }
                f.write_str("(")?;
                write_list(f, args)?;
                f.write_str(")")
            }
            PostfixOp::ArrayAccess(index) => write!(f, "[{}]", index),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::IntLiteral(value) => write!(f, "IntLiteral({})", value),
            Expr::FloatLiteral(value) => write!(f, "FloatLiteral({:?})", value),
            Expr::StringLiteral(text) => write!(f, "StringLiteral('{}')", text),
            Expr::BoolLiteral(value) => write!(f, "BoolLiteral({})", value),
            Expr::NilLiteral => f.write_str("NilLiteral(nil)"),
            Expr::ArrayLiteral(items) => {
                f.write_str("ArrayLiteral({")?;
                write_list(f, items)?;
                f.write_str("})")
            }
            Expr::Identifier(name) => write!(f, "Identifier({})", name),
            Expr::This => f.write_str("ThisExpression(this)"),
            Expr::ObjectCreation { class_name, args } => {
                write!(f, "ObjectCreation(new {}(", class_name)?;
                write_list(f, args)?;
                f.write_str("))")
            }
            Expr::BinaryOp { left, op, right } => {
                write!(f, "BinaryOp({}, {}, {})", left, op.symbol(), right)
            }
            Expr::UnaryOp { op, operand } => write!(f, "UnaryOp({}, {})", op.symbol(), operand),
            Expr::Parenthesized(inner) => write!(f, "ParenthesizedExpression({})", inner),
            Expr::Postfix(postfix) => postfix.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals() {
        assert_eq!(Expr::FloatLiteral(5.0).to_string(), "FloatLiteral(5.0)");
        assert_eq!(Expr::FloatLiteral(2.5).to_string(), "FloatLiteral(2.5)");
        assert_eq!(
            Expr::StringLiteral("a\\n".to_string()).to_string(),
            "StringLiteral('a\\n')"
        );
        assert_eq!(Expr::NilLiteral.to_string(), "NilLiteral(nil)");
        assert_eq!(
            Expr::ArrayLiteral(vec![Expr::IntLiteral(1), Expr::IntLiteral(2)]).to_string(),
            "ArrayLiteral({IntLiteral(1), IntLiteral(2)})"
        );
    }

    #[test]
    fn test_types() {
        let int = Type::Primitive(PrimitiveKind::Int);
        assert_eq!(int.clone().with_array(5).to_string(), "ArrayType(PrimitiveType(int)[5])");
        assert_eq!(
            int.with_reference().to_string(),
            "ReferenceType(PrimitiveType(int) &)"
        );
        assert_eq!(Type::Class("Shape".into()).to_string(), "ClassType(Shape)");
    }

    #[test]
    fn test_invocation_forms() {
        let static_call = Statement::MethodInvocation(PostfixExpr::new(
            Expr::Identifier("io".into()),
            vec![PostfixOp::MethodCall {
                name: "writeIntLn".into(),
                args: vec![Expr::Identifier("i".into())],
            }],
        ));
        assert_eq!(
            static_call.to_string(),
            "MethodInvocationStatement(StaticMethodInvocation(io.writeIntLn(Identifier(i))))"
        );

        let chained = Statement::MethodInvocation(PostfixExpr::new(
            Expr::This,
            vec![
                PostfixOp::MemberAccess("shape".into()),
                PostfixOp::MethodCall {
                    name: "draw".into(),
                    args: vec![],
                },
            ],
        ));
        assert_eq!(
            chained.to_string(),
            "MethodInvocationStatement(InstanceMethodInvocation(PostfixExpression(ThisExpression(this).shape.draw())))"
        );
    }

    #[test]
    fn test_forward_declarations_omit_body() {
        let method = MethodDecl {
            is_static: true,
            return_type: Type::void(),
            name: "run".into(),
            params: vec![],
            body: None,
        };
        assert_eq!(method.to_string(), "MethodDecl(static PrimitiveType(void) run([]))");

        let dtor = DestructorDecl {
            name: "A".into(),
            body: Some(BlockStatement::default()),
        };
        assert_eq!(dtor.to_string(), "DestructorDecl(~A(), BlockStatement(stmts=[]))");
    }
}
