// AST (Abstract Syntax Tree) definitions for OPLang programs

use serde::{Deserialize, Serialize};

/// Source location information for error reporting.
///
/// `line` is 1-based; `column` is the 0-based character offset within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Built-in scalar types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Int,
    Float,
    String,
    Boolean,
    Void,
}

impl PrimitiveKind {
    /// The keyword spelling of this type
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Int => "int",
            PrimitiveKind::Float => "float",
            PrimitiveKind::String => "string",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Void => "void",
        }
    }
}

/// Type representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    Primitive(PrimitiveKind),
    Class(String),
    Array { element: Box<Type>, size: usize },
    /// Only produced for by-reference parameters (`int & a`)
    Reference(Box<Type>),
}

impl Type {
    pub fn void() -> Self {
        Type::Primitive(PrimitiveKind::Void)
    }

    pub fn with_array(self, size: usize) -> Self {
        Type::Array {
            element: Box::new(self),
            size,
        }
    }

    pub fn with_reference(self) -> Self {
        Type::Reference(Box::new(self))
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    // Logical
    And,
    Or,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    Mod,
    // String
    Concat,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::IntDiv => "\\",
            BinOp::Mod => "%",
            BinOp::Concat => "^",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnOp {
    Not, // !x
    Neg, // -x
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Not => "!",
            UnOp::Neg => "-",
        }
    }
}

/// Direction of a counted `for` loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForDirection {
    To,
    Downto,
}

impl ForDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            ForDirection::To => "to",
            ForDirection::Downto => "downto",
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    IntLiteral(i64),
    FloatLiteral(f64),
    /// Content between the quotes, escapes kept as written
    StringLiteral(String),
    BoolLiteral(bool),
    NilLiteral,
    ArrayLiteral(Vec<Expr>),
    Identifier(String),
    This,
    ObjectCreation {
        class_name: String,
        args: Vec<Expr>,
    },
    BinaryOp {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<Expr>,
    },
    Parenthesized(Box<Expr>),
    Postfix(PostfixExpr),
}

/// A primary expression followed by at least one postfix operation.
///
/// A primary with no operations is never wrapped; builders collapse it to the
/// primary itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostfixExpr {
    pub primary: Box<Expr>,
    pub ops: Vec<PostfixOp>,
}

impl PostfixExpr {
    pub fn new(primary: Expr, ops: Vec<PostfixOp>) -> Self {
        Self {
            primary: Box::new(primary),
            ops,
        }
    }

    /// `name(args)` written without a receiver: the callee doubles as the receiver
    pub fn self_call(&self) -> Option<(&str, &[Expr])> {
        match (self.primary.as_ref(), self.ops.as_slice()) {
            (Expr::Identifier(receiver), [PostfixOp::MethodCall { name, args }])
                if receiver == name =>
            {
                Some((name, args))
            }
            _ => None,
        }
    }
}

/// Operations chained after a primary expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PostfixOp {
    MemberAccess(String),
    MethodCall { name: String, args: Vec<Expr> },
    ArrayAccess(Box<Expr>),
}

/// Assignment targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Lhs {
    Id(String),
    Postfix(PostfixExpr),
}

/// `name [:= init]` inside a local declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub init: Option<Expr>,
}

/// Local variable declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub is_final: bool,
    pub var_type: Type,
    pub variables: Vec<Variable>,
}

/// Braced statement list.
///
/// Declarations and statements keep their own source order; their
/// interleaving is not recorded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockStatement {
    pub var_decls: Vec<VariableDecl>,
    pub statements: Vec<Statement>,
}

/// Executable statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Assignment {
        target: Lhs,
        value: Expr,
    },
    If {
        condition: Expr,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
    },
    For {
        variable: String,
        start: Expr,
        direction: ForDirection,
        end: Expr,
        body: Box<Statement>,
    },
    /// `return;` carries `Expr::NilLiteral`
    Return(Expr),
    Break,
    Continue,
    MethodInvocation(PostfixExpr),
    Block(BlockStatement),
}

/// `name [:= init]` inside an attribute declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub init: Option<Expr>,
}

/// Class-level field declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDecl {
    pub is_static: bool,
    pub is_final: bool,
    pub attr_type: Type,
    pub attributes: Vec<Attribute>,
}

/// Method or constructor parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub param_type: Type,
    pub name: String,
}

impl Parameter {
    pub fn is_reference(&self) -> bool {
        matches!(self.param_type, Type::Reference(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub is_static: bool,
    pub return_type: Type,
    pub name: String,
    pub params: Vec<Parameter>,
    /// `None` for a declaration-only stub
    pub body: Option<BlockStatement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorDecl {
    pub name: String,
    pub params: Vec<Parameter>,
    pub body: Option<BlockStatement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestructorDecl {
    pub name: String,
    pub body: Option<BlockStatement>,
}

/// Class members, in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Member {
    Attribute(AttributeDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Destructor(DestructorDecl),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    pub superclass: Option<String>,
    pub members: Vec<Member>,
}

/// Top-level program structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    pub classes: Vec<ClassDecl>,
}

impl Program {
    /// First class declared with `name`
    pub fn class(&self, name: &str) -> Option<&ClassDecl> {
        self.classes.iter().find(|c| c.name == name)
    }
}
