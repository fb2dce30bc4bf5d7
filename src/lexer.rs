use std::fmt;

use log::trace;

/// Classification of a lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    /// A run of contiguous whitespace.
    Ws,
    Ident,
    /// A run of ASCII digits. No sign, decimal point or exponent.
    NumValue,
    /// A single letter directly followed by `(`.
    Function,
    /// A single-quoted template, quotes included.
    Template,
    Period,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Quote,
    Pipe,
    Colon,
    Comma,
    Semicolon,
    Illegal,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Eof => "EOF",
            Self::Ws => "WS",
            Self::Ident => "IDENT",
            Self::NumValue => "NUM_VALUE",
            Self::Function => "FUNCTION",
            Self::Template => "TEMPLATE",
            Self::Period => "PERIOD",
            Self::OpenBrace => "OPEN_BRACE",
            Self::CloseBrace => "CLOSE_BRACE",
            Self::OpenBracket => "OPEN_BRACKET",
            Self::CloseBracket => "CLOSE_BRACKET",
            Self::Quote => "QUOTE",
            Self::Pipe => "PIPE",
            Self::Colon => "COLON",
            Self::Comma => "COMMA",
            Self::Semicolon => "SEMICOLON",
            Self::Illegal => "ILLEGAL",
        };
        f.write_str(name)
    }
}

/// 1-based source location of the first character of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl Position {
    fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub pos: Position,
}

/// Hand-written scanner over a character stream.
///
/// Lookahead is limited to a single held-back character. Callers never see
/// it: they receive whole tokens from [`Scanner::next_token`].
pub struct Scanner<I: Iterator<Item = char>> {
    chars: I,
    /// One rune of pushback.
    held: Option<char>,
    /// Whitespace split off after a template closed by `}`.
    pending: Option<Token>,
    /// Position of the next character to be read.
    pos: Position,
    /// Position before the last read, restored by `unread`.
    prev: Position,
    done: bool,
}

impl<I: Iterator<Item = char>> Scanner<I> {
    pub fn new(chars: I) -> Self {
        Self {
            chars,
            held: None,
            pending: None,
            pos: Position::default(),
            prev: Position::default(),
            done: false,
        }
    }

    /// Return the next token. Once the input is exhausted every call yields
    /// an `Eof` token with an empty literal.
    pub fn next_token(&mut self) -> Token {
        let token = match self.pending.take() {
            Some(token) => token,
            None => {
                let pos = self.pos;
                let (kind, literal) = self.scan_kind();
                Token { kind, literal, pos }
            }
        };
        trace!("scanned {} {:?} at {}", token.kind, token.literal, token.pos);
        token
    }

    // -----------------------------------------------------------------------
    // Classification
    // -----------------------------------------------------------------------

    fn scan_kind(&mut self) -> (TokenKind, String) {
        let ch = match self.read() {
            Some(ch) => ch,
            None => return (TokenKind::Eof, String::new()),
        };

        if is_whitespace(ch) {
            return self.scan_whitespace(ch);
        }

        // The same letter means different things depending on what follows:
        // `f(` is the function keyword, `a:` a one-letter key.
        if is_letter(ch) {
            return match self.peek() {
                Some('(') => (TokenKind::Function, ch.to_string()),
                Some(':') => (TokenKind::Ident, ch.to_string()),
                _ => self.scan_ident(ch),
            };
        }

        if is_digit(ch) {
            return self.scan_number(ch);
        }

        if ch == '\'' {
            return self.scan_template(ch);
        }

        let kind = match ch {
            '(' => TokenKind::OpenBracket,
            ')' => TokenKind::CloseBracket,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            '\'' => TokenKind::Quote,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            _ => TokenKind::Illegal,
        };
        (kind, ch.to_string())
    }

    fn scan_whitespace(&mut self, first: char) -> (TokenKind, String) {
        let mut buf = String::from(first);
        self.read_while(&mut buf, is_whitespace);
        (TokenKind::Ws, buf)
    }

    fn scan_ident(&mut self, first: char) -> (TokenKind, String) {
        let mut buf = String::from(first);
        self.read_while(&mut buf, |ch| is_letter(ch) || is_digit(ch) || ch == '_');
        (TokenKind::Ident, buf)
    }

    fn scan_number(&mut self, first: char) -> (TokenKind, String) {
        let mut buf = String::from(first);
        self.read_while(&mut buf, is_digit);
        (TokenKind::NumValue, buf)
    }

    /// Scan a single-quoted template, quotes included.
    ///
    /// There is no escaping. A quote closes the template only when it is
    /// immediately followed by `,`, or when the next non-whitespace
    /// character is `}`. Any other quote is content. Running out of input
    /// yields whatever was read so far.
    ///
    /// The `}` rule does not know which template it is in, so a main
    /// template cannot contain a quote followed by `}` either.
    fn scan_template(&mut self, quote: char) -> (TokenKind, String) {
        let mut buf = String::from(quote);

        while let Some(ch) = self.read() {
            buf.push(ch);
            if ch != '\'' {
                continue;
            }
            match self.peek() {
                Some(',') | Some('}') => break,
                Some(next) if is_whitespace(next) => {
                    let pos = self.pos;
                    let mut ws = String::new();
                    self.read_while(&mut ws, is_whitespace);
                    if self.peek() == Some('}') {
                        self.pending = Some(Token {
                            kind: TokenKind::Ws,
                            literal: ws,
                            pos,
                        });
                        break;
                    }
                    buf.push_str(&ws);
                }
                _ => {}
            }
        }

        (TokenKind::Template, buf)
    }

    // -----------------------------------------------------------------------
    // Character stream
    // -----------------------------------------------------------------------

    fn read(&mut self) -> Option<char> {
        let ch = match self.held.take() {
            Some(ch) => ch,
            None => self.chars.next()?,
        };
        self.prev = self.pos;
        self.pos.advance(ch);
        Some(ch)
    }

    /// Push back the character returned by the most recent `read`.
    fn unread(&mut self, ch: char) {
        debug_assert!(self.held.is_none(), "scanner pushback holds one character");
        self.held = Some(ch);
        self.pos = self.prev;
    }

    fn peek(&mut self) -> Option<char> {
        let ch = self.read()?;
        self.unread(ch);
        Some(ch)
    }

    /// Append characters to `buf` while `pred` holds, leaving the first
    /// non-matching character unread.
    fn read_while(&mut self, buf: &mut String, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.read() {
            if !pred(ch) {
                self.unread(ch);
                break;
            }
            buf.push(ch);
        }
    }
}

/// Yields tokens up to, but not including, the first `Eof`.
impl<I: Iterator<Item = char>> Iterator for Scanner<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.done = true;
            return None;
        }
        Some(token)
    }
}

/// Tokenize an entire source string.
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::new(source.chars()).collect()
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}
