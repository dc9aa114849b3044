//! Lexer for the configuration syntax
//!
//! Produces a flat token stream with 1-based line/column positions. Newlines
//! are tokens (entry terminators); comments are tokens too, so the parser can
//! attach them to entries. Spaces, tabs, and carriage returns are skipped.

use std::iter::Peekable;
use std::str::Chars;

use lamina_core::SyntaxError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// Bare identifier, including the keywords `true`, `false`, `null`
    Ident(String),
    /// Decoded string literal
    Str(String),
    Int(i64),
    Float(f64),
    /// Full comment text, marker included, trailing whitespace trimmed
    Comment(String),
    Assign,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Newline,
    Eof,
}

impl TokenKind {
    pub(crate) fn describe(&self) -> String {
        match self {
            TokenKind::Ident(text) => format!("identifier {text:?}"),
            TokenKind::Str(_) => "string".to_string(),
            TokenKind::Int(_) | TokenKind::Float(_) => "number".to_string(),
            TokenKind::Comment(_) => "comment".to_string(),
            TokenKind::Assign => "'='".to_string(),
            TokenKind::LBrace => "'{'".to_string(),
            TokenKind::RBrace => "'}'".to_string(),
            TokenKind::LBracket => "'['".to_string(),
            TokenKind::RBracket => "']'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Newline => "end of line".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = Lexer {
        chars: input.chars().peekable(),
        line: 1,
        column: 1,
    };
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

impl<'a> Lexer<'a> {
    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, line: usize, column: usize, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(line, column, message)
    }

    fn next_token(&mut self) -> Result<Token, SyntaxError> {
        // Skip horizontal whitespace; newlines are significant.
        while matches!(self.chars.peek(), Some(' ' | '\t' | '\r')) {
            self.bump();
        }
        let (line, column) = (self.line, self.column);
        let token = |kind| Token { kind, line, column };

        let c = match self.chars.peek().copied() {
            None => return Ok(token(TokenKind::Eof)),
            Some(c) => c,
        };

        match c {
            '\n' => {
                self.bump();
                Ok(token(TokenKind::Newline))
            }
            '=' => {
                self.bump();
                Ok(token(TokenKind::Assign))
            }
            '{' => {
                self.bump();
                Ok(token(TokenKind::LBrace))
            }
            '}' => {
                self.bump();
                Ok(token(TokenKind::RBrace))
            }
            '[' => {
                self.bump();
                Ok(token(TokenKind::LBracket))
            }
            ']' => {
                self.bump();
                Ok(token(TokenKind::RBracket))
            }
            ',' => {
                self.bump();
                Ok(token(TokenKind::Comma))
            }
            '#' => Ok(token(TokenKind::Comment(self.lex_comment()))),
            '/' => {
                self.bump();
                if self.chars.peek() == Some(&'/') {
                    Ok(token(TokenKind::Comment(self.lex_comment_slash())))
                } else {
                    Err(self.error(line, column, "unexpected character '/'"))
                }
            }
            '"' => {
                let text = self.lex_string(line, column)?;
                Ok(token(TokenKind::Str(text)))
            }
            c if c.is_ascii_digit() || c == '-' => {
                let kind = self.lex_number(line, column)?;
                Ok(token(kind))
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut text = String::new();
                while let Some(&c) = self.chars.peek() {
                    if c.is_alphanumeric() || c == '_' || c == '-' {
                        text.push(c);
                        self.bump();
                    } else {
                        break;
                    }
                }
                Ok(token(TokenKind::Ident(text)))
            }
            c => Err(self.error(line, column, format!("unexpected character {c:?}"))),
        }
    }

    /// Comment starting at `#`; consumes up to (not including) the newline
    fn lex_comment(&mut self) -> String {
        let mut text = String::new();
        while let Some(&c) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            text.push(c);
            self.bump();
        }
        text.trim_end().to_string()
    }

    /// Comment starting at `//`; the first `/` is already consumed
    fn lex_comment_slash(&mut self) -> String {
        let mut text = String::from("/");
        while let Some(&c) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            text.push(c);
            self.bump();
        }
        text.trim_end().to_string()
    }

    fn lex_string(&mut self, line: usize, column: usize) -> Result<String, SyntaxError> {
        self.bump(); // opening quote
        let mut text = String::new();
        loop {
            let (cline, ccolumn) = (self.line, self.column);
            match self.bump() {
                None => return Err(self.error(line, column, "unterminated string")),
                Some('"') => return Ok(text),
                Some('\n') => return Err(self.error(line, column, "unterminated string")),
                Some('\\') => match self.bump() {
                    Some('"') => text.push('"'),
                    Some('\\') => text.push('\\'),
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('r') => text.push('\r'),
                    Some(c) => {
                        return Err(self.error(
                            cline,
                            ccolumn,
                            format!("unknown escape sequence '\\{c}'"),
                        ))
                    }
                    None => return Err(self.error(line, column, "unterminated string")),
                },
                Some(c) => text.push(c),
            }
        }
    }

    fn lex_number(&mut self, line: usize, column: usize) -> Result<TokenKind, SyntaxError> {
        let mut text = String::new();
        if self.chars.peek() == Some(&'-') {
            text.push('-');
            self.bump();
        }
        let mut is_float = false;
        while let Some(&c) = self.chars.peek() {
            match c {
                '0'..='9' => {
                    text.push(c);
                    self.bump();
                }
                '.' | 'e' | 'E' => {
                    is_float = true;
                    text.push(c);
                    self.bump();
                    // Exponent sign directly after e/E
                    if c == 'e' || c == 'E' {
                        if let Some(sign @ ('+' | '-')) = self.chars.peek().copied() {
                            text.push(sign);
                            self.bump();
                        }
                    }
                }
                _ => break,
            }
        }
        if is_float {
            text.parse::<f64>()
                .map(TokenKind::Float)
                .map_err(|_| self.error(line, column, format!("invalid number {text:?}")))
        } else {
            text.parse::<i64>()
                .map(TokenKind::Int)
                .map_err(|_| self.error(line, column, format!("invalid number {text:?}")))
        }
    }
}
