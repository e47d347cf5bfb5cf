//! Lexer (tokenizer) for OPLang source code
//!
//! Converts raw source text into [`Token`]s on demand. The parser pulls one
//! token at a time through [`Lexer::next_token`]; [`Lexer::tokenize`] collects
//! the whole stream for callers that want it materialized.
//!
//! Lexical errors are terminal: after the first [`LexError`] the lexer keeps
//! returning that same error and never produces another token.

use super::ast::SourceLocation;
use crate::config::{CommentPolicy, LexerConfig};
use log::{debug, trace};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::fmt;

/// Token categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    IntLiteral,
    FloatLiteral,
    StringLiteral,

    // Identifiers
    Ident,

    // Keywords
    Class,
    Extends,
    Static,
    Final,
    If,
    Else,
    For,
    Do,
    Then,
    To,
    Downto,
    New,
    This,
    Void,
    Boolean,
    Int,
    Float,
    StringType,
    True,
    False,
    Nil,
    Break,
    Continue,
    Return,

    // Arithmetic
    Plus,      // +
    Minus,     // -
    Star,      // *
    Slash,     // /
    Backslash, // \
    Percent,   // %
    Caret,     // ^

    // Comparison
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    Le,    // <=
    Gt,    // >
    Ge,    // >=

    // Logical
    AndAnd, // &&
    OrOr,   // ||
    Bang,   // !

    // Assignment
    Assign, // :=

    // Punctuation
    Dot,       // .
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    LBrace,    // {
    RBrace,    // }
    Comma,     // ,
    Semicolon, // ;
    Colon,     // :
    Tilde,     // ~ (destructor marker)
    Amp,       // & (by-reference marker)

    Eof,
    /// Placeholder for the point where scanning failed
    Error,
}

static KEYWORDS: Lazy<FxHashMap<&'static str, TokenKind>> = Lazy::new(|| {
    use TokenKind::*;
    [
        ("class", Class),
        ("extends", Extends),
        ("static", Static),
        ("final", Final),
        ("if", If),
        ("else", Else),
        ("for", For),
        ("do", Do),
        ("then", Then),
        ("to", To),
        ("downto", Downto),
        ("new", New),
        ("this", This),
        ("void", Void),
        ("boolean", Boolean),
        ("int", Int),
        ("float", Float),
        ("string", StringType),
        ("true", True),
        ("false", False),
        ("nil", Nil),
        ("break", Break),
        ("continue", Continue),
        ("return", Return),
    ]
    .into_iter()
    .collect()
});

impl TokenKind {
    /// Keyword kind for an identifier spelling, if it is reserved
    pub fn keyword(word: &str) -> Option<TokenKind> {
        KEYWORDS.get(word).copied()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::IntLiteral => "integer literal",
            TokenKind::FloatLiteral => "float literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Ident => "identifier",
            TokenKind::Class => "'class'",
            TokenKind::Extends => "'extends'",
            TokenKind::Static => "'static'",
            TokenKind::Final => "'final'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::For => "'for'",
            TokenKind::Do => "'do'",
            TokenKind::Then => "'then'",
            TokenKind::To => "'to'",
            TokenKind::Downto => "'downto'",
            TokenKind::New => "'new'",
            TokenKind::This => "'this'",
            TokenKind::Void => "'void'",
            TokenKind::Boolean => "'boolean'",
            TokenKind::Int => "'int'",
            TokenKind::Float => "'float'",
            TokenKind::StringType => "'string'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Nil => "'nil'",
            TokenKind::Break => "'break'",
            TokenKind::Continue => "'continue'",
            TokenKind::Return => "'return'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Backslash => "'\\'",
            TokenKind::Percent => "'%'",
            TokenKind::Caret => "'^'",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Bang => "'!'",
            TokenKind::Assign => "':='",
            TokenKind::Dot => "'.'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Tilde => "'~'",
            TokenKind::Amp => "'&'",
            TokenKind::Eof => "end of file",
            TokenKind::Error => "invalid input",
        };
        f.write_str(text)
    }
}

/// A single lexeme with its category and position.
///
/// String literal lexemes hold the content between the quotes with escape
/// sequences left exactly as written.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    /// Text used when this token is reported in a diagnostic
    pub fn text(&self) -> &str {
        match self.kind {
            TokenKind::Eof => "<EOF>",
            _ => &self.lexeme,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Lexical error categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// String content collected before the end of line or input
    UnclosedString(String),
    /// String content so far followed by the offending two-character escape
    IllegalEscape(String),
    /// A character that starts no token
    ErrorToken(char),
    /// `/*` without `*/`, only under [`CommentPolicy::Reject`]
    UnterminatedComment,
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: SourceLocation,
}

impl LexError {
    pub fn new(kind: LexErrorKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::UnclosedString(content) => write!(f, "Unclosed String: {}", content),
            LexErrorKind::IllegalEscape(content) => {
                write!(f, "Illegal Escape In String: {}", content)
            }
            LexErrorKind::ErrorToken(ch) => write!(f, "Error Token {}", ch),
            LexErrorKind::UnterminatedComment => write!(f, "Unterminated Comment"),
        }
    }
}

impl std::error::Error for LexError {}

#[derive(Debug, Clone)]
enum ScanState {
    Scanning,
    Finished,
    Failed(LexError),
}

/// Lexer for OPLang source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    config: LexerConfig,
    state: ScanState,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self::with_config(input, LexerConfig::default())
    }

    pub fn with_config(input: &str, config: LexerConfig) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 0,
            config,
            state: ScanState::Scanning,
        }
    }

    /// Rewind to the start of the input, clearing any recorded error.
    pub fn reset(&mut self) {
        self.position = 0;
        self.line = 1;
        self.column = 0;
        self.state = ScanState::Scanning;
    }

    /// Tokenize the entire input, including the trailing [`TokenKind::Eof`].
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        self.by_ref().collect()
    }

    /// Produce the next token.
    ///
    /// Once end-of-input has been reached every call returns another `Eof`
    /// token; once an error has been reported every call returns it again.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        match &self.state {
            ScanState::Finished => {
                return Ok(Token::new(TokenKind::Eof, "", self.current_location()));
            }
            ScanState::Failed(err) => return Err(err.clone()),
            ScanState::Scanning => {}
        }

        match self.scan_token() {
            Ok(token) => {
                trace!(
                    "token {:?} {:?} at {}:{}",
                    token.kind,
                    token.lexeme,
                    token.location.line,
                    token.location.column
                );
                if token.kind == TokenKind::Eof {
                    self.state = ScanState::Finished;
                }
                Ok(token)
            }
            Err(err) => {
                debug!(
                    "lexical error at {}:{}: {}",
                    err.location.line, err.location.column, err
                );
                self.state = ScanState::Failed(err.clone());
                Err(err)
            }
        }
    }

    fn scan_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;

        let Some(ch) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, "", self.current_location()));
        };

        match ch {
            // String literals
            '"' => self.string_literal(),

            // Numeric literals, including the `.5` form
            '0'..='9' => Ok(self.number_literal()),
            '.' if self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) => {
                Ok(self.number_literal())
            }

            // Identifiers and keywords
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword()),

            // Operators and punctuation
            _ => self.operator(),
        }
    }

    /// Parse operator or separator at the current position
    fn operator(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| {
            LexError::new(LexErrorKind::ErrorToken('\0'), loc)
        })?;

        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '\\' => TokenKind::Backslash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::EqEq
                } else {
                    return Err(LexError::new(LexErrorKind::ErrorToken(ch), loc));
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::Le
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    TokenKind::AndAnd
                } else {
                    TokenKind::Amp
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    TokenKind::OrOr
                } else {
                    return Err(LexError::new(LexErrorKind::ErrorToken(ch), loc));
                }
            }
            ':' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::Assign
                } else {
                    TokenKind::Colon
                }
            }
            '.' => TokenKind::Dot,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '~' => TokenKind::Tilde,

            _ => return Err(LexError::new(LexErrorKind::ErrorToken(ch), loc)),
        };

        Ok(Token::new(kind, self.text_from(loc, ch), loc))
    }

    /// Spelling of an operator that started with `first` at `start`
    fn text_from(&self, start: SourceLocation, first: char) -> String {
        let consumed = self.column - start.column;
        if consumed == 1 {
            first.to_string()
        } else {
            self.input[self.position - consumed..self.position]
                .iter()
                .collect()
        }
    }

    /// Parse string literal; the lexeme excludes the quotes
    fn string_literal(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        self.advance(); // consume opening quote
        let mut content = String::new();

        loop {
            match self.peek() {
                None | Some('\n') | Some('\r') => {
                    return Err(LexError::new(LexErrorKind::UnclosedString(content), loc));
                }
                Some('"') => {
                    self.advance(); // consume closing quote
                    return Ok(Token::new(TokenKind::StringLiteral, content, loc));
                }
                Some('\\') => match self.peek_ahead(1) {
                    None | Some('\n') | Some('\r') => {
                        return Err(LexError::new(LexErrorKind::UnclosedString(content), loc));
                    }
                    Some(escaped) => {
                        content.push('\\');
                        content.push(escaped);
                        if !matches!(escaped, 'n' | 't' | 'b' | 'f' | 'r' | '"' | '\\') {
                            return Err(LexError::new(
                                LexErrorKind::IllegalEscape(content),
                                loc,
                            ));
                        }
                        self.advance();
                        self.advance();
                    }
                },
                Some(ch) => {
                    content.push(ch);
                    self.advance();
                }
            }
        }
    }

    /// Parse integer or float literal, keeping the spelling as written
    fn number_literal(&mut self) -> Token {
        let loc = self.current_location();
        let start = self.position;
        let mut is_float = false;

        self.skip_digits();

        if self.peek() == Some('.') {
            // `1.` is complete; `.5` was only entered because a digit follows
            self.advance();
            self.skip_digits();
            is_float = true;
        }

        let exponent = self.exponent_length();
        if exponent > 0 {
            for _ in 0..exponent {
                self.advance();
            }
            is_float = true;
        }

        let text: String = self.input[start..self.position].iter().collect();
        let kind = if is_float {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntLiteral
        };
        Token::new(kind, text, loc)
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Length of an `e[+-]digits` suffix at the current position, or 0
    fn exponent_length(&self) -> usize {
        if !matches!(self.peek(), Some('e') | Some('E')) {
            return 0;
        }
        let mut len = 1;
        if matches!(self.peek_ahead(len), Some('+') | Some('-')) {
            len += 1;
        }
        let digits_start = len;
        while self.peek_ahead(len).is_some_and(|c| c.is_ascii_digit()) {
            len += 1;
        }
        if len == digits_start {
            0
        } else {
            len
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self) -> Token {
        let loc = self.current_location();
        let mut ident = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = TokenKind::keyword(&ident).unwrap_or(TokenKind::Ident);
        Token::new(kind, ident, loc)
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') | Some('\x0C') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip multi-line comment (/* ... */); comments do not nest
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        match self.config.unterminated_comment {
            CommentPolicy::Consume => Ok(()),
            CommentPolicy::Reject => Err(LexError::new(
                LexErrorKind::UnterminatedComment,
                start_loc,
            )),
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    /// Yields every token up to and including `Eof`, or up to the first error.
    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            ScanState::Scanning => Some(self.next_token()),
            ScanState::Finished | ScanState::Failed(_) => None,
        }
    }
}

/// Render the token stream of `source` as comma-separated lexemes.
///
/// End-of-input shows as `EOF`; a lexical error replaces the rest of the
/// stream with its message.
pub fn token_listing(source: &str) -> String {
    token_listing_with(source, LexerConfig::default())
}

pub fn token_listing_with(source: &str, config: LexerConfig) -> String {
    token_listing_report(source, config).0
}

/// The token listing along with the lexical error that ended it, if any
pub fn token_listing_report(source: &str, config: LexerConfig) -> (String, Option<LexError>) {
    let mut entries = Vec::new();
    let mut failure = None;

    for result in Lexer::with_config(source, config) {
        match result {
            Ok(token) if token.kind == TokenKind::Eof => entries.push("EOF".to_string()),
            Ok(token) => entries.push(token.lexeme),
            Err(err) => {
                entries.push(err.to_string());
                failure = Some(err);
            }
        }
    }

    (entries.join(","), failure)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("class A { int x; }");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].kind, TokenKind::Class);
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].lexeme, "A");
        assert_eq!(tokens[2].kind, TokenKind::LBrace);
        assert_eq!(tokens[3].kind, TokenKind::Int);
        assert_eq!(tokens[4].kind, TokenKind::Ident);
        assert_eq!(tokens[5].kind, TokenKind::Semicolon);
        assert_eq!(tokens[6].kind, TokenKind::RBrace);
        assert_eq!(tokens[7].kind, TokenKind::Eof);
        assert_eq!(tokens.len(), 8);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds(": := == != <= >= && || & ~ \\"),
            vec![
                TokenKind::Colon,
                TokenKind::Assign,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Amp,
                TokenKind::Tilde,
                TokenKind::Backslash,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_locations() {
        let tokens = Lexer::new("class A\n  { x }").tokenize().unwrap();
        assert_eq!(tokens[0].location, SourceLocation::new(1, 0));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 6));
        assert_eq!(tokens[2].location, SourceLocation::new(2, 2));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 4));
        assert_eq!(tokens[5].location, SourceLocation::new(2, 7));
    }

    #[test]
    fn test_eof_position_after_last_char() {
        let tokens = Lexer::new("class Test { int x := 1; ").tokenize().unwrap();
        let eof = tokens.last().unwrap();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.location, SourceLocation::new(1, 25));
        assert_eq!(eof.text(), "<EOF>");
    }

    #[test]
    fn test_float_forms() {
        let tokens = Lexer::new("9.0 12e8 1. .5 0.33E-3 128e+42").tokenize().unwrap();
        for token in &tokens[..6] {
            assert_eq!(token.kind, TokenKind::FloatLiteral, "{}", token.lexeme);
        }
        assert_eq!(tokens[3].lexeme, ".5");
        assert_eq!(tokens[5].lexeme, "128e+42");
    }

    #[test]
    fn test_exponent_needs_digits() {
        let tokens = Lexer::new("12e x").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].lexeme, "e");
    }

    #[test]
    fn test_comments() {
        let tokens = Lexer::new("int x; // comment\nint /* block\ncomment */ y;")
            .tokenize()
            .unwrap();
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["int", "x", ";", "int", "y", ";", ""]);
        assert_eq!(tokens[4].location, SourceLocation::new(3, 11));
    }

    #[test]
    fn test_unterminated_comment_policies() {
        let tokens = Lexer::new("int /* never closed").tokenize().unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].kind, TokenKind::Eof);

        let strict = LexerConfig {
            unterminated_comment: CommentPolicy::Reject,
        };
        let err = Lexer::with_config("int /* never closed", strict)
            .tokenize()
            .unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedComment);
        assert_eq!(err.location, SourceLocation::new(1, 4));
    }

    #[test]
    fn test_string_literal_keeps_escapes() {
        let tokens = Lexer::new(r#""a\nb\t\"q\"""#).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].lexeme, r#"a\nb\t\"q\""#);
    }

    #[test]
    fn test_string_ends_at_newline() {
        let err = Lexer::new("\"abc\ndef\"").tokenize().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnclosedString("abc".to_string()));
    }

    #[test]
    fn test_error_is_sticky() {
        let mut lexer = Lexer::new("x $ y");
        assert_eq!(lexer.next_token().unwrap().lexeme, "x");
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::ErrorToken('$'));
        assert_eq!(err.location, SourceLocation::new(1, 2));
        assert_eq!(lexer.next_token().unwrap_err(), err);
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_reset_restarts_from_beginning() {
        let mut lexer = Lexer::new("a b");
        let first = lexer.tokenize().unwrap();
        assert!(lexer.next().is_none());
        lexer.reset();
        let second = lexer.tokenize().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_keyword_table() {
        assert_eq!(TokenKind::keyword("downto"), Some(TokenKind::Downto));
        assert_eq!(TokenKind::keyword("string"), Some(TokenKind::StringType));
        assert_eq!(TokenKind::keyword("classs"), None);
        assert_eq!(TokenKind::keyword("Int"), None);
    }

    #[test]
    fn test_listing_report_carries_the_failure() {
        let (listing, failure) =
            token_listing_report("class A { int x := 1 @ }", LexerConfig::default());
        assert_eq!(listing, "class,A,{,int,x,:=,1,Error Token @");
        assert_eq!(failure.map(|e| e.kind), Some(LexErrorKind::ErrorToken('@')));

        let (listing, failure) = token_listing_report("a \"b\"", LexerConfig::default());
        assert_eq!(listing, "a,b,EOF");
        assert!(failure.is_none());
    }
}
