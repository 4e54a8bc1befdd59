//! Lexer for JavaScript-like source.
//!
//! The lexer converts source text into a stream of tokens.

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Lexer for JavaScript-like source code.
///
/// The lexer iterates through source text and produces tokens.
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src str,
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();

            let start = self.position;
            let start_line = self.line;
            let start_column = self.column;

            let Some(c) = self.peek_char() else {
                return Token::new(
                    TokenKind::Eof,
                    Span::new(start, start, start_line, start_column),
                );
            };

            let kind = match c {
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                '[' => self.single(TokenKind::LBracket),
                ']' => self.single(TokenKind::RBracket),
                '{' => self.single(TokenKind::LBrace),
                '}' => self.single(TokenKind::RBrace),
                ';' => self.single(TokenKind::Semicolon),
                ',' => self.single(TokenKind::Comma),
                ':' => self.single(TokenKind::Colon),
                '?' => self.single(TokenKind::Question),
                '~' => self.single(TokenKind::Tilde),
                '.' => {
                    // `.5` is a number; `.name` is member access
                    if self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit()) {
                        self.scan_number()
                    } else {
                        self.single(TokenKind::Dot)
                    }
                }
                '+' => self.operator2('+', TokenKind::PlusPlus, TokenKind::PlusAssign, TokenKind::Plus),
                '-' => self.operator2('-', TokenKind::MinusMinus, TokenKind::MinusAssign, TokenKind::Minus),
                '*' => self.operator_assign(TokenKind::StarAssign, TokenKind::Star),
                '%' => self.operator_assign(TokenKind::PercentAssign, TokenKind::Percent),
                '/' => match self.peek_char_n(1) {
                    Some('/') => {
                        self.skip_line_comment();
                        continue;
                    }
                    Some('*') => {
                        if let Err(kind) = self.skip_block_comment() {
                            kind
                        } else {
                            continue;
                        }
                    }
                    _ => self.operator_assign(TokenKind::SlashAssign, TokenKind::Slash),
                },
                '=' => self.scan_eq(),
                '!' => self.scan_bang(),
                '<' => self.scan_lt(),
                '>' => self.scan_gt(),
                '&' => self.doubled('&', TokenKind::AndAnd, TokenKind::Amp),
                '|' => self.doubled('|', TokenKind::OrOr, TokenKind::Pipe),
                '^' => self.single(TokenKind::Caret),
                '"' | '\'' => self.scan_string(c),
                c if c.is_ascii_digit() => self.scan_number(),
                c if is_ident_start(c) => self.scan_word(),
                c => {
                    self.advance();
                    TokenKind::Error(format!("unexpected character: {c}"))
                }
            };

            return Token::new(
                kind,
                Span::new(start, self.position, start_line, start_column),
            );
        }
    }

    /// Tokenizes all source and returns a vector of tokens.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Peeks at the character `n` positions ahead.
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Consumes one character and returns the given kind.
    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// Scans an operator that may be doubled (`++`), combined with `=`
    /// (`+=`), or stand alone (`+`).
    fn operator2(
        &mut self,
        repeat: char,
        doubled: TokenKind,
        with_eq: TokenKind,
        plain: TokenKind,
    ) -> TokenKind {
        self.advance();
        if self.peek_char() == Some(repeat) {
            self.advance();
            doubled
        } else if self.peek_char() == Some('=') {
            self.advance();
            with_eq
        } else {
            plain
        }
    }

    /// Scans an operator that is either doubled (`&&`) or stands alone (`&`).
    fn doubled(&mut self, repeat: char, both: TokenKind, plain: TokenKind) -> TokenKind {
        self.advance();
        if self.peek_char() == Some(repeat) {
            self.advance();
            both
        } else {
            plain
        }
    }

    /// Scans an operator that may be combined with `=` or stand alone.
    fn operator_assign(&mut self, with_eq: TokenKind, plain: TokenKind) -> TokenKind {
        self.advance();
        if self.peek_char() == Some('=') {
            self.advance();
            with_eq
        } else {
            plain
        }
    }

    /// Scans `=`, `==`, or `===`.
    fn scan_eq(&mut self) -> TokenKind {
        self.advance();
        if self.peek_char() == Some('=') {
            self.advance();
            if self.peek_char() == Some('=') {
                self.advance();
                TokenKind::EqEqEq
            } else {
                TokenKind::EqEq
            }
        } else {
            TokenKind::Assign
        }
    }

    /// Scans `!`, `!=`, or `!==`.
    fn scan_bang(&mut self) -> TokenKind {
        self.advance();
        if self.peek_char() == Some('=') {
            self.advance();
            if self.peek_char() == Some('=') {
                self.advance();
                TokenKind::NotEqEq
            } else {
                TokenKind::NotEq
            }
        } else {
            TokenKind::Bang
        }
    }

    /// Scans `<`, `<=`, or `<<`.
    fn scan_lt(&mut self) -> TokenKind {
        self.advance();
        match self.peek_char() {
            Some('=') => {
                self.advance();
                TokenKind::LtEq
            }
            Some('<') => {
                self.advance();
                TokenKind::Shl
            }
            _ => TokenKind::Lt,
        }
    }

    /// Scans `>`, `>=`, `>>`, or `>>>`.
    fn scan_gt(&mut self) -> TokenKind {
        self.advance();
        match self.peek_char() {
            Some('=') => {
                self.advance();
                TokenKind::GtEq
            }
            Some('>') => {
                self.advance();
                if self.peek_char() == Some('>') {
                    self.advance();
                    TokenKind::UShr
                } else {
                    TokenKind::Shr
                }
            }
            _ => TokenKind::Gt,
        }
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Skips a `//` comment through the end of the line.
    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skips a `/* ... */` comment.
    ///
    /// Returns an error kind if the comment is unterminated.
    fn skip_block_comment(&mut self) -> Result<(), TokenKind> {
        self.advance(); // '/'
        self.advance(); // '*'
        loop {
            match self.peek_char() {
                Some('*') if self.peek_char_n(1) == Some('/') => {
                    self.advance();
                    self.advance();
                    return Ok(());
                }
                Some(_) => self.advance(),
                None => return Err(TokenKind::Error("unterminated block comment".into())),
            }
        }
    }

    /// Scans a string literal delimited by `quote`.
    fn scan_string(&mut self, quote: char) -> TokenKind {
        self.advance(); // consume opening quote
        let mut text = String::new();
        loop {
            match self.peek_char() {
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.peek_char() {
                        Some('n') => {
                            self.advance();
                            text.push('\n');
                        }
                        Some('r') => {
                            self.advance();
                            text.push('\r');
                        }
                        Some('t') => {
                            self.advance();
                            text.push('\t');
                        }
                        Some('0') => {
                            self.advance();
                            text.push('\0');
                        }
                        Some('\n') => {
                            // Line continuation
                            self.advance();
                        }
                        Some(c) => {
                            // Unknown escapes keep the escaped character
                            self.advance();
                            text.push(c);
                        }
                        None => {
                            return TokenKind::Error(
                                "unexpected end of input in string escape".into(),
                            );
                        }
                    }
                }
                Some('\n') | None => {
                    return TokenKind::Error("unterminated string literal".into());
                }
                Some(c) => {
                    self.advance();
                    text.push(c);
                }
            }
        }
        TokenKind::Str(text)
    }

    /// Scans a numeric literal.
    fn scan_number(&mut self) -> TokenKind {
        let start = self.position;

        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let mut lookahead = 1;
            if matches!(self.peek_char_n(1), Some('+' | '-')) {
                lookahead = 2;
            }
            if self.peek_char_n(lookahead).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..=lookahead {
                    self.advance();
                }
                while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let text = &self.source[start..self.position];
        match text.parse::<f64>() {
            Ok(n) => TokenKind::Number(n),
            Err(e) => TokenKind::Error(format!("invalid number: {e}")),
        }
    }

    /// Scans an identifier or keyword.
    fn scan_word(&mut self) -> TokenKind {
        let start = self.position;
        while self.peek_char().is_some_and(is_ident_char) {
            self.advance();
        }
        let text = &self.source[start..self.position];

        match text {
            "var" => TokenKind::Var,
            "function" => TokenKind::Function,
            "return" => TokenKind::Return,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "new" => TokenKind::New,
            "typeof" => TokenKind::Typeof,
            "void" => TokenKind::Void,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => TokenKind::Ident(text.to_string()),
        }
    }
}

/// Returns true if `c` can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

/// Returns true if `c` can appear in an identifier (not at start).
fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}
