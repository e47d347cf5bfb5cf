//! Concrete syntax tree produced by the [`Parser`](super::parse::Parser)
//!
//! The CST mirrors the grammar one node per production instance. It keeps
//! source spellings and locations (numeric lexemes are not converted yet) and
//! records block items in source order with declarations and statements
//! interleaved. [`AstBuilder`](super::builder::AstBuilder) reshapes it into the
//! [`ast`](super::ast) model.

use super::ast::{BinOp, ForDirection, PrimitiveKind, SourceLocation, UnOp};

/// An identifier or literal spelling together with where it was written
#[derive(Debug, Clone, PartialEq)]
pub struct Spelling {
    pub text: String,
    pub location: SourceLocation,
}

impl Spelling {
    pub fn new(text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            text: text.into(),
            location,
        }
    }
}

/// `classDecl* EOF`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgramNode {
    pub classes: Vec<ClassNode>,
}

/// `class ID (extends ID)? { member* }`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassNode {
    pub name: Spelling,
    pub superclass: Option<Spelling>,
    pub members: Vec<MemberNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberNode {
    Attributes(AttributeListNode),
    Method(MethodNode),
    Destructor(DestructorNode),
}

/// `static? final? type declarator (, declarator)* ;`
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeListNode {
    pub is_static: bool,
    pub is_final: bool,
    pub ty: TypeNode,
    pub declarators: Vec<DeclaratorNode>,
}

/// `ID (:= expr)?`
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaratorNode {
    pub name: Spelling,
    pub init: Option<ExprNode>,
}

/// Any method-shaped member. Constructors are the ones written without a
/// return type; telling them apart from void methods needs the class name.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodNode {
    pub is_static: bool,
    pub return_type: Option<TypeNode>,
    pub name: Spelling,
    pub params: Vec<ParamNode>,
    pub body: Option<BlockNode>,
}

/// `~ID ( ) (block | ;)`
#[derive(Debug, Clone, PartialEq)]
pub struct DestructorNode {
    pub name: Spelling,
    pub body: Option<BlockNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeBase {
    Primitive(PrimitiveKind),
    Class(Spelling),
}

/// `(primitive | ID) ([ INTLIT ])?`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    pub base: TypeBase,
    /// Spelling of the array size literal
    pub array_size: Option<Spelling>,
}

/// `type &? ID`
#[derive(Debug, Clone, PartialEq)]
pub struct ParamNode {
    pub ty: TypeNode,
    pub by_reference: bool,
    pub name: Spelling,
}

/// `{ (varDecl | statement)* }`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockNode {
    pub items: Vec<BlockItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockItem {
    Declaration(VarDeclNode),
    Statement(StmtNode),
}

/// `final? type declarator (, declarator)* ;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclNode {
    pub is_final: bool,
    pub ty: TypeNode,
    pub declarators: Vec<DeclaratorNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtNode {
    /// `lhs := expr ;` where the target is an identifier or a postfix chain
    /// ending in member or element access
    Assign { target: ExprNode, value: ExprNode },
    If {
        condition: ExprNode,
        then_branch: Box<StmtNode>,
        else_branch: Option<Box<StmtNode>>,
    },
    For {
        variable: Spelling,
        start: ExprNode,
        direction: ForDirection,
        end: ExprNode,
        body: Box<StmtNode>,
    },
    Return(Option<ExprNode>),
    Break,
    Continue,
    /// `expr ;` where the expression ends in a call
    Call(ExprNode),
    Block(BlockNode),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralNode {
    Int(Spelling),
    Float(Spelling),
    Str(String),
    Bool(bool),
    Nil,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    Binary {
        left: Box<ExprNode>,
        op: BinOp,
        right: Box<ExprNode>,
    },
    Unary {
        op: UnOp,
        operand: Box<ExprNode>,
    },
    Postfix {
        primary: Box<ExprNode>,
        ops: Vec<PostfixNode>,
    },
    Literal(LiteralNode),
    ArrayLiteral(Vec<ExprNode>),
    Identifier(Spelling),
    This,
    New {
        class_name: Spelling,
        args: Vec<ExprNode>,
    },
    Paren(Box<ExprNode>),
}

impl ExprNode {
    /// True when the last postfix operation invokes something
    pub fn ends_in_call(&self) -> bool {
        match self {
            ExprNode::Postfix { ops, .. } => matches!(
                ops.last(),
                Some(PostfixNode::Call(_)) | Some(PostfixNode::MemberCall { .. })
            ),
            _ => false,
        }
    }

    /// True for forms that may appear left of `:=`
    pub fn is_assignable(&self) -> bool {
        match self {
            ExprNode::Identifier(_) => true,
            ExprNode::Postfix { ops, .. } => matches!(
                ops.last(),
                Some(PostfixNode::Member(_)) | Some(PostfixNode::Index(_))
            ),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PostfixNode {
    /// `.ID`
    Member(Spelling),
    /// `.ID ( args )`
    MemberCall { name: Spelling, args: Vec<ExprNode> },
    /// `( args )` directly after an expression
    Call(Vec<ExprNode>),
    /// `[ expr ]`
    Index(Box<ExprNode>),
}
