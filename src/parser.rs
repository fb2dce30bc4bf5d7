use log::debug;

use crate::ast::FunctionStatement;
use crate::error::{Expected, ParseError};
use crate::lexer::{Scanner, Token, TokenKind};

/// Parse exactly one `f('template', { key: value, ... })` statement.
///
/// Anything after the closing `)` (usually `;`) is left unread.
pub fn parse(source: &str) -> Result<FunctionStatement, ParseError> {
    Parser::new(source).parse()
}

// ---------------------------------------------------------------------------
// Parser state
// ---------------------------------------------------------------------------

pub struct Parser<I: Iterator<Item = char>> {
    scanner: Scanner<I>,
    /// One token of pushback.
    held: Option<Token>,
}

impl<'a> Parser<std::str::Chars<'a>> {
    pub fn new(source: &'a str) -> Self {
        Self::from_scanner(Scanner::new(source.chars()))
    }
}

impl<I: Iterator<Item = char>> Parser<I> {
    pub fn from_scanner(scanner: Scanner<I>) -> Self {
        Self {
            scanner,
            held: None,
        }
    }

    /// Grammar:
    /// ```text
    /// statement := FUNCTION OPEN_BRACKET TEMPLATE COMMA OPEN_BRACE pairs CLOSE_BRACE CLOSE_BRACKET
    /// pairs     := (IDENT COLON value (COMMA IDENT COLON value)*)?
    /// value     := TEMPLATE | NUM_VALUE
    /// ```
    /// A trailing comma after the last pair is accepted.
    pub fn parse(&mut self) -> Result<FunctionStatement, ParseError> {
        let mut stmt = FunctionStatement::default();

        self.expect(TokenKind::Function)?;
        self.expect(TokenKind::OpenBracket)?;
        stmt.template = self.expect(TokenKind::Template)?.literal;
        self.expect(TokenKind::Comma)?;
        self.expect(TokenKind::OpenBrace)?;

        loop {
            let key = self.scan_ignore_whitespace();
            if key.kind == TokenKind::CloseBrace {
                self.unscan(key);
                break;
            }
            if key.kind != TokenKind::Ident {
                return Err(mismatch(key, Expected::Key));
            }

            self.expect(TokenKind::Colon)?;

            let value = self.scan_ignore_whitespace();
            if !matches!(value.kind, TokenKind::Template | TokenKind::NumValue) {
                return Err(mismatch(value, Expected::Value));
            }

            // Last occurrence of a key wins.
            stmt.vars.insert(key.literal, value.literal);

            let next = self.scan_ignore_whitespace();
            if next.kind != TokenKind::Comma {
                self.unscan(next);
                break;
            }
        }

        self.expect(TokenKind::CloseBrace)?;
        self.expect(TokenKind::CloseBracket)?;

        debug!(
            "parsed statement: template={} vars={:?}",
            stmt.template, stmt.vars
        );
        Ok(stmt)
    }

    // -----------------------------------------------------------------------
    // Token helpers
    // -----------------------------------------------------------------------

    fn scan(&mut self) -> Token {
        match self.held.take() {
            Some(token) => token,
            None => self.scanner.next_token(),
        }
    }

    /// Skip a single whitespace token. The scanner already merges
    /// contiguous whitespace, so one is enough.
    fn scan_ignore_whitespace(&mut self) -> Token {
        let token = self.scan();
        if token.kind == TokenKind::Ws {
            return self.scan();
        }
        token
    }

    fn unscan(&mut self, token: Token) {
        debug_assert!(self.held.is_none(), "parser pushback holds one token");
        self.held = Some(token);
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        let token = self.scan_ignore_whitespace();
        if token.kind != kind {
            return Err(mismatch(token, Expected::Token(kind)));
        }
        Ok(token)
    }
}

fn mismatch(token: Token, expected: Expected) -> ParseError {
    ParseError::Mismatch {
        found: token.literal,
        expected,
        pos: token.pos,
    }
}
