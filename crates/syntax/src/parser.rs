//! Parser: source text to document model
//!
//! Builds a [`Document`] preserving entry order, key quoting, comment
//! attachment, and source alignment markers. Comment lines above an entry
//! become its lead group; a comment after the value on the same line becomes
//! its line group. Comments inside list brackets are skipped as trivia.

use lamina_core::{
    AnnotationGroup, Body, Document, Entry, KeyPath, KeySegment, Marker, Node, Scalar, SyntaxError,
};

use crate::lexer::{tokenize, Token, TokenKind};

/// Parse source text into a document
///
/// # Errors
///
/// Returns a [`SyntaxError`] with the offending position on malformed input.
pub fn parse(input: &str) -> Result<Document, SyntaxError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let body = parser.parse_body(true)?;
    Ok(Document::from_body(body))
}

/// Parse raw bytes into a document
///
/// # Errors
///
/// Invalid UTF-8 is reported as a [`SyntaxError`] at the position of the
/// first bad byte; otherwise behaves like [`parse`].
pub fn parse_bytes(input: &[u8]) -> Result<Document, SyntaxError> {
    let text = std::str::from_utf8(input).map_err(|e| {
        let valid = &input[..e.valid_up_to()];
        let line = 1 + valid.iter().filter(|&&b| b == b'\n').count();
        let column = 1 + valid.iter().rev().take_while(|&&b| b != b'\n').count();
        SyntaxError::new(line, column, "invalid UTF-8")
    })?;
    parse(text)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // tokenize always terminates the stream with Eof
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Bump nesting depth when descending into a brace or bracket
    fn descend(&mut self) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > crate::layout::MAX_NESTING_DEPTH {
            let token = self.peek();
            return Err(SyntaxError::new(
                token.line,
                token.column,
                format!(
                    "nesting depth exceeds {}",
                    crate::layout::MAX_NESTING_DEPTH
                ),
            ));
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        let token = self.peek();
        SyntaxError::new(
            token.line,
            token.column,
            format!("expected {expected}, found {}", token.kind.describe()),
        )
    }

    /// Parse entries until end of input (top level) or a closing brace
    ///
    /// Comment lines not followed by an entry in the same body are dropped.
    fn parse_body(&mut self, top_level: bool) -> Result<Body, SyntaxError> {
        let mut body = Body::new();
        let mut pending: Vec<String> = Vec::new();
        loop {
            match &self.peek().kind {
                TokenKind::Newline => {
                    self.advance();
                }
                TokenKind::Comment(text) => {
                    pending.push(text.clone());
                    self.advance();
                }
                TokenKind::Eof => {
                    if top_level {
                        return Ok(body);
                    }
                    return Err(self.unexpected("'}'"));
                }
                TokenKind::RBrace => {
                    if top_level {
                        return Err(self.unexpected("a key or end of input"));
                    }
                    return Ok(body);
                }
                _ => {
                    let lead = std::mem::take(&mut pending);
                    let entry = self.parse_entry(lead)?;
                    body.push(entry);
                }
            }
        }
    }

    fn parse_entry(&mut self, lead: Vec<String>) -> Result<Entry, SyntaxError> {
        let indent = self.peek().column.saturating_sub(1);
        let mut segments = Vec::new();
        loop {
            match &self.peek().kind {
                TokenKind::Ident(text) => {
                    segments.push(KeySegment::ident(text.clone()));
                    self.advance();
                }
                TokenKind::Str(text) => {
                    segments.push(KeySegment::quoted(text.clone()));
                    self.advance();
                }
                _ => break,
            }
        }
        if segments.is_empty() {
            return Err(self.unexpected("a key"));
        }

        let mut marker = Marker { indent, align: 0 };
        let value = match &self.peek().kind {
            TokenKind::Assign => {
                let assign = self.advance();
                marker.align = assign.column.saturating_sub(1);
                self.parse_value()?
            }
            TokenKind::LBrace => {
                self.descend()?;
                self.advance();
                let nested = self.parse_body(false)?;
                self.advance(); // closing brace, checked by parse_body
                self.ascend();
                Node::Object(nested)
            }
            _ => return Err(self.unexpected("'=' or '{'")),
        };

        let mut line_comment: Option<AnnotationGroup> = None;
        while let TokenKind::Comment(text) = &self.peek().kind {
            line_comment
                .get_or_insert_with(AnnotationGroup::new)
                .push(text.clone());
            self.advance();
        }

        match &self.peek().kind {
            TokenKind::Newline => {
                self.advance();
            }
            // End of body closes the entry; the caller consumes the brace.
            TokenKind::Eof | TokenKind::RBrace => {}
            _ => return Err(self.unexpected("end of line after entry")),
        }

        let mut entry = Entry::new(KeyPath::new(segments), value);
        if !lead.is_empty() {
            entry.lead_comment = Some(AnnotationGroup::from_lines(lead));
        }
        entry.line_comment = line_comment;
        entry.assign = marker;
        Ok(entry)
    }

    fn parse_value(&mut self) -> Result<Node, SyntaxError> {
        match &self.peek().kind {
            TokenKind::Ident(text) => {
                let scalar = match text.as_str() {
                    "true" => Scalar::Bool(true),
                    "false" => Scalar::Bool(false),
                    "null" => Scalar::Null,
                    _ => return Err(self.unexpected("a value")),
                };
                self.advance();
                Ok(Node::Scalar(scalar))
            }
            TokenKind::Int(i) => {
                let node = Node::Scalar(Scalar::Int(*i));
                self.advance();
                Ok(node)
            }
            TokenKind::Float(f) => {
                let node = Node::Scalar(Scalar::Float(*f));
                self.advance();
                Ok(node)
            }
            TokenKind::Str(s) => {
                let node = Node::Scalar(Scalar::String(s.clone()));
                self.advance();
                Ok(node)
            }
            TokenKind::LBracket => {
                self.descend()?;
                self.advance();
                let list = self.parse_list()?;
                self.ascend();
                Ok(list)
            }
            TokenKind::LBrace => {
                self.descend()?;
                self.advance();
                let body = self.parse_body(false)?;
                self.advance(); // closing brace
                self.ascend();
                Ok(Node::Object(body))
            }
            _ => Err(self.unexpected("a value")),
        }
    }

    /// Parse list items after the opening bracket
    fn parse_list(&mut self) -> Result<Node, SyntaxError> {
        let mut items = Vec::new();
        loop {
            self.skip_list_trivia();
            if self.peek().kind == TokenKind::RBracket {
                self.advance();
                return Ok(Node::List(items));
            }
            items.push(self.parse_value()?);
            self.skip_list_trivia();
            match &self.peek().kind {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::RBracket => {
                    self.advance();
                    return Ok(Node::List(items));
                }
                _ => return Err(self.unexpected("',' or ']'")),
            }
        }
    }

    /// Newlines and comments inside list brackets carry no attachment
    fn skip_list_trivia(&mut self) {
        while matches!(
            self.peek().kind,
            TokenKind::Newline | TokenKind::Comment(_)
        ) {
            self.advance();
        }
    }
}
