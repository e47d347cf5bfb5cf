//! Declaration parsing implementation
//!
//! This module handles parsing of classes and their members:
//!
//! - Class declarations: `class Name extends Base { ... }`
//! - Attributes: `static final int a := 1, b;`
//! - Methods, constructors and destructors, with or without a body
//! - Types and parameter lists
//!
//! # Grammar
//!
//! ```text
//! class_decl  ::= "class" ID ("extends" ID)? "{" member* "}"
//! member      ::= "~" ID "(" ")" body
//!               | "static"? "final"? ID params body
//!               | "static"? "final"? type ID params body
//!               | "static"? "final"? type declarator ("," declarator)* ";"
//! declarator  ::= ID (":=" expression)?
//! params      ::= "(" (param (";" param)*)? ")"
//! param       ::= type "&"? ID
//! body        ::= block | ";"
//! type        ::= ("int" | "float" | "string" | "boolean" | "void" | ID) ("[" INT "]")?
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::PrimitiveKind;
use crate::parser::cst::*;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{ParseError, Parser};
use log::debug;

impl Parser {
    /// Parse a class declaration, starting at the `class` keyword
    pub(crate) fn parse_class(&mut self) -> Result<ClassNode, ParseError> {
        self.expect_token(TokenKind::Class)?;
        let name = self.expect_identifier()?;

        let superclass = if self.match_token(TokenKind::Extends) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        self.expect_token(TokenKind::LBrace)?;

        let mut members = Vec::new();
        while !self.check(TokenKind::RBrace) {
            members.push(self.parse_member(&name)?);
        }

        self.expect_token(TokenKind::RBrace)?;

        Ok(ClassNode {
            name,
            superclass,
            members,
        })
    }

    /// Parse one class member. `class_name` is only needed to validate
    /// destructor names.
    pub(crate) fn parse_member(&mut self, class_name: &Spelling) -> Result<MemberNode, ParseError> {
        if self.match_token(TokenKind::Tilde) {
            return self.parse_destructor(class_name).map(MemberNode::Destructor);
        }

        let is_static = self.match_token(TokenKind::Static);
        let is_final = self.match_token(TokenKind::Final);

        // Constructor shape: no return type. `static` is accepted here and
        // dropped when the builder routes the member to a constructor.
        if self.check(TokenKind::Ident) && self.peek_ahead(1) == TokenKind::LParen {
            let name = self.expect_identifier()?;
            if is_final {
                return Err(self.error_at_current("method without 'final'"));
            }
            let method = self.parse_method_rest(is_static, None, name)?;
            debug!("parsed member {}() without return type", method.name.text);
            return Ok(MemberNode::Method(method));
        }

        let ty = self.parse_type()?;
        let name = self.expect_identifier()?;

        if self.check(TokenKind::LParen) {
            if is_final {
                return Err(self.error_at_current("method without 'final'"));
            }
            let method = self.parse_method_rest(is_static, Some(ty), name)?;
            debug!("parsed method {}", method.name.text);
            return Ok(MemberNode::Method(method));
        }

        let declarators = self.parse_declarators(name)?;
        debug!("parsed attribute list of {} name(s)", declarators.len());
        Ok(MemberNode::Attributes(AttributeListNode {
            is_static,
            is_final,
            ty,
            declarators,
        }))
    }

    fn parse_destructor(&mut self, class_name: &Spelling) -> Result<DestructorNode, ParseError> {
        let name_token = self.peek().clone();
        let name = self.expect_identifier()?;
        if name.text != class_name.text {
            return Err(self.error_at(&name_token, "destructor named after its class"));
        }

        self.expect_token(TokenKind::LParen)?;
        self.expect_token(TokenKind::RParen)?;
        let body = self.parse_optional_body()?;
        debug!("parsed destructor ~{}", name.text);

        Ok(DestructorNode { name, body })
    }

    fn parse_method_rest(
        &mut self,
        is_static: bool,
        return_type: Option<TypeNode>,
        name: Spelling,
    ) -> Result<MethodNode, ParseError> {
        let params = self.parse_parameter_list()?;
        let body = self.parse_optional_body()?;

        Ok(MethodNode {
            is_static,
            return_type,
            name,
            params,
            body,
        })
    }

    /// `block` or `;` for a declaration-only member
    fn parse_optional_body(&mut self) -> Result<Option<BlockNode>, ParseError> {
        if self.match_token(TokenKind::Semicolon) {
            Ok(None)
        } else {
            self.parse_block().map(Some)
        }
    }

    /// Parse `( param ; param ... )`
    pub(crate) fn parse_parameter_list(&mut self) -> Result<Vec<ParamNode>, ParseError> {
        self.expect_token(TokenKind::LParen)?;
        let mut params = Vec::new();

        if !self.check(TokenKind::RParen) {
            loop {
                let ty = self.parse_type()?;
                let by_reference = self.match_token(TokenKind::Amp);
                let name = self.expect_identifier()?;
                params.push(ParamNode {
                    ty,
                    by_reference,
                    name,
                });

                if !self.match_token(TokenKind::Semicolon) {
                    break;
                }
            }
        }

        self.expect_token(TokenKind::RParen)?;
        Ok(params)
    }

    /// Parse the declarator list after its first name, through the closing `;`
    pub(crate) fn parse_declarators(
        &mut self,
        first: Spelling,
    ) -> Result<Vec<DeclaratorNode>, ParseError> {
        let mut declarators = vec![self.parse_declarator_init(first)?];

        while self.match_token(TokenKind::Comma) {
            let name = self.expect_identifier()?;
            declarators.push(self.parse_declarator_init(name)?);
        }

        self.expect_token(TokenKind::Semicolon)?;
        Ok(declarators)
    }

    fn parse_declarator_init(&mut self, name: Spelling) -> Result<DeclaratorNode, ParseError> {
        let init = if self.match_token(TokenKind::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(DeclaratorNode { name, init })
    }

    /// Parse a type: primitive keyword or class name, optionally `[N]`
    pub(crate) fn parse_type(&mut self) -> Result<TypeNode, ParseError> {
        let base = match self.peek_kind() {
            TokenKind::Int => TypeBase::Primitive(PrimitiveKind::Int),
            TokenKind::Float => TypeBase::Primitive(PrimitiveKind::Float),
            TokenKind::StringType => TypeBase::Primitive(PrimitiveKind::String),
            TokenKind::Boolean => TypeBase::Primitive(PrimitiveKind::Boolean),
            TokenKind::Void => TypeBase::Primitive(PrimitiveKind::Void),
            TokenKind::Ident => {
                let token = self.peek();
                TypeBase::Class(Spelling::new(token.lexeme.clone(), token.location))
            }
            _ => return Err(self.error_at_current("type")),
        };
        self.advance();

        let array_size = if self.match_token(TokenKind::LBracket) {
            let size = self.expect_array_size()?;
            self.expect_token(TokenKind::RBracket)?;
            Some(size)
        } else {
            None
        };

        Ok(TypeNode { base, array_size })
    }

    fn expect_array_size(&mut self) -> Result<Spelling, ParseError> {
        let token: Token = self.expect_token(TokenKind::IntLiteral)?;
        if token.lexeme.parse::<usize>().is_err() {
            return Err(self.error_at(&token, "array size"));
        }
        Ok(Spelling::new(token.lexeme, token.location))
    }

    /// True when the upcoming tokens can only start a type
    pub(crate) fn is_type_start(&self) -> bool {
        matches!(
            self.peek_kind(),
            TokenKind::Int
                | TokenKind::Float
                | TokenKind::StringType
                | TokenKind::Boolean
                | TokenKind::Void
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::cst::*;
    use crate::parser::parse::Parser;

    fn members(source: &str) -> Vec<MemberNode> {
        let mut program = Parser::new(source).parse_program().unwrap();
        program.classes.remove(0).members
    }

    fn error(source: &str) -> String {
        Parser::new(source).parse_program().unwrap_err().to_string()
    }

    #[test]
    fn test_attribute_list() {
        let members = members("class A { static final int a := 1, b; }");
        match &members[0] {
            MemberNode::Attributes(list) => {
                assert!(list.is_static);
                assert!(list.is_final);
                assert_eq!(list.declarators.len(), 2);
                assert!(list.declarators[0].init.is_some());
                assert!(list.declarators[1].init.is_none());
            }
            other => panic!("Expected attributes, got {:?}", other),
        }
    }

    #[test]
    fn test_constructor_shape_and_forward_method() {
        let members = members("class A { A(int x; float & y); int f(); }");
        match &members[0] {
            MemberNode::Method(method) => {
                assert!(method.return_type.is_none());
                assert_eq!(method.params.len(), 2);
                assert!(!method.params[0].by_reference);
                assert!(method.params[1].by_reference);
                assert!(method.body.is_none());
            }
            other => panic!("Expected constructor shape, got {:?}", other),
        }
        assert!(matches!(&members[1], MemberNode::Method(m) if m.return_type.is_some()));
    }

    #[test]
    fn test_array_attribute_type() {
        let members = members("class A { Point[3] pts; }");
        match &members[0] {
            MemberNode::Attributes(list) => {
                assert!(matches!(&list.ty.base, TypeBase::Class(name) if name.text == "Point"));
                assert_eq!(list.ty.array_size.as_ref().unwrap().text, "3");
            }
            other => panic!("Expected attributes, got {:?}", other),
        }
    }

    #[test]
    fn test_destructor_must_name_class() {
        assert!(matches!(
            members("class A { ~A() {} }")[0],
            MemberNode::Destructor(_)
        ));
        assert_eq!(error("class A { ~B() {} }"), "Error on line 1 col 11: B");
    }

    #[test]
    fn test_final_method_rejected() {
        assert_eq!(error("class A { final int f() {} }"), "Error on line 1 col 21: (");
    }

    #[test]
    fn test_array_size_must_be_integer() {
        assert_eq!(error("class A { int[x] a; }"), "Error on line 1 col 14: x");
        assert_eq!(error("class A { int[2][3] a; }"), "Error on line 1 col 16: [");
    }
}
