use crate::lexer::tokens::{make_identifier_kind, Token, TokenKind};

// Submodules
pub mod tokens;

/// Struct that represents the scanner.
pub struct Lexer<'a> {
  /// The raw source text.
  source: &'a str,
  /// The byte position of the first character of the current token.
  token_start: usize,
  /// The byte position of the current character.
  current: usize,
  /// The current line number.
  line_num: usize,
}

impl<'a> Lexer<'a> {
  /// An initialized instance of the lexer.
  ///
  /// # Parameters
  /// - `src`: The source text. The caller keeps it alive for as long as
  /// the produced tokens are in use, since their lexemes borrow from it.
  pub fn new(src: &'a str) -> Lexer<'a> {
    Self {
      source: src,
      token_start: 0,
      current: 0,
      line_num: 1,
    }
  }

  /// Scans the next token in the source. Once the source is exhausted,
  /// every subsequent call returns an `EOF` token.
  pub fn next_token(&mut self) -> Token<'a> {
    self.skip_whitespace();
    self.token_start = self.current;

    if self.is_at_end() {
      return self.make_token(TokenKind::EOF);
    }

    let c = self.advance();

    if c.is_ascii_digit() {
      return self.make_number_token();
    }

    if c == b'_' || c.is_ascii_alphabetic() {
      return self.make_identifier_token();
    }

    match c {
      b'(' => self.make_token(TokenKind::L_PAREN),
      b')' => self.make_token(TokenKind::R_PAREN),
      b'{' => self.make_token(TokenKind::L_CURLY),
      b'}' => self.make_token(TokenKind::R_CURLY),
      b';' => self.make_token(TokenKind::SEMICOLON),
      b',' => self.make_token(TokenKind::COMMA),
      b'.' => self.make_token(TokenKind::DOT),
      b'-' => self.make_token(TokenKind::DASH),
      b'+' => self.make_token(TokenKind::PLUS),
      b'/' => self.make_token(TokenKind::SLASH),
      b'*' => self.make_token(TokenKind::STAR),
      b'!' => {
        let kind = if self.matches(b'=') { TokenKind::BANG_EQ } else { TokenKind::BANG };
        self.make_token(kind)
      }
      b'=' => {
        let kind = if self.matches(b'=') { TokenKind::LOGIC_EQ } else { TokenKind::EQUALS };
        self.make_token(kind)
      }
      b'<' => {
        let kind = if self.matches(b'=') {
          TokenKind::LESS_THAN_EQ
        } else {
          TokenKind::LESS_THAN
        };
        self.make_token(kind)
      }
      b'>' => {
        let kind = if self.matches(b'=') {
          TokenKind::GREATER_THAN_EQ
        } else {
          TokenKind::GREATER_THAN
        };
        self.make_token(kind)
      }
      b'"' => self.make_string_token(),
      _ => self.make_error_token("Unexpected character"),
    }
  }

  /// Gets the current character without consuming it. Returns the NUL
  /// byte once the source is exhausted.
  fn get_current(&self) -> u8 {
    if self.is_at_end() {
      return b'\0';
    }

    self.source.as_bytes()[self.current]
  }

  /// Returns the character after the current one without consuming it.
  fn get_next(&self) -> u8 {
    if self.current + 1 >= self.source.len() {
      return b'\0';
    }

    self.source.as_bytes()[self.current + 1]
  }

  /// Checks if the scanner is at the end of the source.
  fn is_at_end(&self) -> bool {
    self.current >= self.source.len()
  }

  /// Advances to the next character and returns the consumed one.
  fn advance(&mut self) -> u8 {
    let current = self.get_current();
    self.current += 1;
    current
  }

  /// Matches the current character against a provided character,
  /// consuming it on a match.
  fn matches(&mut self, expected: u8) -> bool {
    if self.is_at_end() || self.get_current() != expected {
      return false;
    }

    self.current += 1;
    true
  }

  /// Skips whitespace-like characters and line comments from the source code.
  fn skip_whitespace(&mut self) {
    loop {
      match self.get_current() {
        b' ' | b'\r' | b'\t' => {
          self.advance();
        }
        b'\n' => {
          self.line_num += 1;
          self.advance();
        }
        b'/' if self.get_next() == b'/' => {
          // A line comment runs to the end of the line.
          while !self.is_at_end() && self.get_current() != b'\n' {
            self.advance();
          }
        }
        _ => break,
      }
    }
  }

  /// Generates a number token with the current state of the scanner.
  fn make_number_token(&mut self) -> Token<'a> {
    while self.get_current().is_ascii_digit() {
      self.advance();
    }

    // The '.' is consumed only when a fractional digit follows it.
    if self.get_current() == b'.' && self.get_next().is_ascii_digit() {
      self.advance();

      while self.get_current().is_ascii_digit() {
        self.advance();
      }
    }

    self.make_token(TokenKind::NUM_LIT)
  }

  /// Generates a string token with the current state of the scanner.
  /// Strings may span multiple lines.
  fn make_string_token(&mut self) -> Token<'a> {
    while self.get_current() != b'"' && !self.is_at_end() {
      if self.get_current() == b'\n' {
        self.line_num += 1;
      }

      self.advance();
    }

    if self.is_at_end() {
      return self.make_error_token("Unterminated string.");
    }

    // The closing quote.
    self.advance();
    self.make_token(TokenKind::STR_LIT)
  }

  /// Generates an identifier or keyword token with the current state of
  /// the scanner.
  fn make_identifier_token(&mut self) -> Token<'a> {
    loop {
      let c = self.get_current();

      if c == b'_' || c.is_ascii_alphanumeric() {
        self.advance();
      } else {
        break;
      }
    }

    let id = &self.source[self.token_start..self.current];
    self.make_token(make_identifier_kind(id))
  }

  /// Generates a token with the current state of the scanner.
  fn make_token(&self, kind: TokenKind) -> Token<'a> {
    Token {
      kind,
      lexeme: &self.source[self.token_start..self.current],
      line: self.line_num,
    }
  }

  /// Generates an error token with the provided message as its lexeme.
  fn make_error_token(&self, message: &'static str) -> Token<'a> {
    Token {
      kind: TokenKind::ERROR,
      lexeme: message,
      line: self.line_num,
    }
  }
}
