//! CST to AST transformation
//!
//! [`AstBuilder`] walks a [`ProgramNode`] once and produces the [`Program`]
//! the rest of a compiler consumes. It holds no state: the enclosing class
//! name needed to route constructors travels as a parameter, so one builder
//! can be shared freely.
//!
//! - this module: program, classes, members, types and parameters
//! - `statements`: blocks and statements
//! - `expressions`: expressions, assignment targets and literal conversion
//! - `contraction`: the self-call contraction pass run on every block

mod contraction;
mod expressions;
mod statements;

use crate::parser::ast::*;
use crate::parser::cst::*;
use log::debug;
use std::fmt;

/// Internal inconsistency between the CST and what the builder expects.
///
/// The parser certifies every tree it returns, so this signals a defect
/// rather than a problem with the input program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildError {
    pub message: String,
    pub location: Option<SourceLocation>,
}

impl BuildError {
    pub(crate) fn at(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location: Some(location),
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(loc) => write!(
                f,
                "Internal error on line {} col {}: {}",
                loc.line, loc.column, self.message
            ),
            None => write!(f, "Internal error: {}", self.message),
        }
    }
}

impl std::error::Error for BuildError {}

/// Stateless CST to AST transformer
#[derive(Debug, Clone, Copy, Default)]
pub struct AstBuilder;

impl AstBuilder {
    pub fn new() -> Self {
        AstBuilder
    }

    pub fn build(&self, program: &ProgramNode) -> Result<Program, BuildError> {
        let classes = program
            .classes
            .iter()
            .map(|class| self.build_class(class))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Program { classes })
    }

    fn build_class(&self, class: &ClassNode) -> Result<ClassDecl, BuildError> {
        let class_name = class.name.text.as_str();
        let members = class
            .members
            .iter()
            .map(|member| self.build_member(member, class_name))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("built class {} ({} member(s))", class_name, members.len());
        Ok(ClassDecl {
            name: class.name.text.clone(),
            superclass: class.superclass.as_ref().map(|s| s.text.clone()),
            members,
        })
    }

    fn build_member(&self, member: &MemberNode, class_name: &str) -> Result<Member, BuildError> {
        match member {
            MemberNode::Attributes(list) => self.build_attribute_decl(list).map(Member::Attribute),
            MemberNode::Method(method) => self.build_method(method, class_name),
            MemberNode::Destructor(dtor) => Ok(Member::Destructor(DestructorDecl {
                name: dtor.name.text.clone(),
                body: self.build_optional_body(&dtor.body)?,
            })),
        }
    }

    /// Route a method-shaped member.
    ///
    /// Without a return type it is the constructor when named after the
    /// class, otherwise a `void` method.
    fn build_method(&self, method: &MethodNode, class_name: &str) -> Result<Member, BuildError> {
        let params = self.build_params(&method.params)?;
        let body = self.build_optional_body(&method.body)?;

        match &method.return_type {
            // Constructors carry no `static` flag; one written before them is discarded
            None if method.name.text == class_name => Ok(Member::Constructor(ConstructorDecl {
                name: method.name.text.clone(),
                params,
                body,
            })),
            return_type => {
                let return_type = match return_type {
                    Some(ty) => self.build_type(ty)?,
                    None => Type::void(),
                };
                Ok(Member::Method(MethodDecl {
                    is_static: method.is_static,
                    return_type,
                    name: method.name.text.clone(),
                    params,
                    body,
                }))
            }
        }
    }

    fn build_optional_body(
        &self,
        body: &Option<BlockNode>,
    ) -> Result<Option<BlockStatement>, BuildError> {
        body.as_ref().map(|block| self.build_block(block)).transpose()
    }

    fn build_params(&self, params: &[ParamNode]) -> Result<Vec<Parameter>, BuildError> {
        params
            .iter()
            .map(|param| {
                let ty = self.build_type(&param.ty)?;
                Ok(Parameter {
                    param_type: if param.by_reference {
                        ty.with_reference()
                    } else {
                        ty
                    },
                    name: param.name.text.clone(),
                })
            })
            .collect()
    }

    pub(crate) fn build_type(&self, ty: &TypeNode) -> Result<Type, BuildError> {
        let base = match &ty.base {
            TypeBase::Primitive(kind) => Type::Primitive(*kind),
            TypeBase::Class(name) => Type::Class(name.text.clone()),
        };

        match &ty.array_size {
            Some(size) => {
                let n = size
                    .text
                    .parse::<usize>()
                    .map_err(|_| BuildError::at("array size out of range", size.location))?;
                Ok(base.with_array(n))
            }
            None => Ok(base),
        }
    }

    fn build_attribute_decl(&self, list: &AttributeListNode) -> Result<AttributeDecl, BuildError> {
        let (attr_type, entries) = self.build_declarators(&list.ty, &list.declarators)?;
        Ok(AttributeDecl {
            is_static: list.is_static,
            is_final: list.is_final,
            attr_type,
            attributes: entries
                .into_iter()
                .map(|(name, init)| Attribute { name, init })
                .collect(),
        })
    }

    pub(crate) fn build_variable_decl(&self, decl: &VarDeclNode) -> Result<VariableDecl, BuildError> {
        let (var_type, entries) = self.build_declarators(&decl.ty, &decl.declarators)?;
        Ok(VariableDecl {
            is_final: decl.is_final,
            var_type,
            variables: entries
                .into_iter()
                .map(|(name, init)| Variable { name, init })
                .collect(),
        })
    }

    /// Shared part of attribute and local declarations: the declared type and
    /// each `(name, initialiser)` pair in order
    fn build_declarators(
        &self,
        ty: &TypeNode,
        declarators: &[DeclaratorNode],
    ) -> Result<(Type, Vec<(String, Option<Expr>)>), BuildError> {
        let ty = self.build_type(ty)?;
        let entries = declarators
            .iter()
            .map(|declarator| {
                let init = declarator
                    .init
                    .as_ref()
                    .map(|expr| self.build_expr(expr))
                    .transpose()?;
                Ok((declarator.name.text.clone(), init))
            })
            .collect::<Result<Vec<_>, BuildError>>()?;
        Ok((ty, entries))
    }
}
