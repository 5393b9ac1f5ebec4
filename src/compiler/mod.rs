use crate::chunk::op_codes::OpCode;
use crate::chunk::Chunk;
use crate::lexer::tokens::{Token, TokenKind};
use crate::lexer::Lexer;
use crate::objects::StrPool;
use crate::values::Value;

// Submodules
mod expressions;
mod precedence;
mod statements;

/// Represents the compiler and its internal state.
pub struct Compiler<'a> {
  lexer: Lexer<'a>,
  previous: Token<'a>,
  current: Token<'a>,
  had_error: bool,
  is_in_panic: bool,
  chunk: Chunk,
  /// The number of open blocks. Braces delimit syntactic blocks, but no
  /// locals are resolved yet, so every variable still compiles as a
  /// global.
  scope_depth: usize,
  strings: &'a mut StrPool,
}

impl<'a> Compiler<'a> {
  /// Compiles a source string into a chunk of bytecode instructions.
  ///
  /// # Parameters
  /// - `src`: The source text to be compiled.
  /// - `strings`: The intern pool that string literals and identifier
  /// names are allocated into.
  ///
  /// # Returns
  /// `Result<Chunk, ()>`: The compiled chunk, or `Err` if any compile
  /// error was reported along the way.
  pub fn compile(src: &'a str, strings: &'a mut StrPool) -> Result<Chunk, ()> {
    let init_token = Token {
      kind: TokenKind::EOF,
      lexeme: "",
      line: 0,
    };

    // Initialize the compiler
    let mut s = Self {
      lexer: Lexer::new(src),
      previous: init_token,
      current: init_token,
      had_error: false,
      is_in_panic: false,
      chunk: Chunk::default(),
      scope_depth: 0,
      strings,
    };

    // Start compiling the chunk
    s.advance();
    while !s.matches(TokenKind::EOF) {
      s.declaration();
    }

    s.emit_op_code(OpCode::Return);

    #[cfg(feature = "show_bytecode")]
    {
      if !s.had_error {
        s.chunk.disassemble("<script>");
      }
    }

    if !s.had_error {
      Ok(s.chunk)
    } else {
      Err(())
    }
  }

  /// Checks that the current token matches the token kind provided.
  pub(super) fn check(&self, kind: TokenKind) -> bool {
    self.current.kind == kind
  }

  /// Checks that the current token matches the token kind provided.
  /// If the tokens match, the current token gets consumed and the
  /// function returns true. Otherwise the token is not consumed and the
  /// function returns false.
  pub(super) fn matches(&mut self, kind: TokenKind) -> bool {
    if self.check(kind) {
      self.advance();
      true
    } else {
      false
    }
  }

  /// Advances the compiler to the next token, reporting any error
  /// tokens the lexer produces along the way.
  pub(super) fn advance(&mut self) {
    self.previous = self.current;

    loop {
      self.current = self.lexer.next_token();

      if self.current.kind != TokenKind::ERROR {
        break;
      }

      // Error tokens carry their diagnostic message in the lexeme slot.
      let message = self.current.lexeme;
      self.error_at_current(message);
    }
  }

  /// Consumes the current token only if it is of a given kind. If the
  /// token does not match the kind, emits a compiler error.
  ///
  /// # Parameters
  /// - `kind`: The expected kind of the token to consume.
  /// - `message`: The error message to be displayed if the current
  /// token does not match the provided kind.
  pub(super) fn consume(&mut self, kind: TokenKind, message: &str) {
    if self.check(kind) {
      self.advance();
      return;
    }

    self.error_at_current(message);
  }

  /// Emits an OpCode instruction byte into the chunk.
  pub(super) fn emit_op_code(&mut self, instr: OpCode) {
    self.chunk.push_byte(instr as u8, self.previous.line);
  }

  /// Emits an OpCode instruction byte followed by its one-byte operand.
  pub(super) fn emit_op_code_with_byte(&mut self, instr: OpCode, byte: u8) {
    self.emit_op_code(instr);
    self.chunk.push_byte(byte, self.previous.line);
  }

  /// Adds a value to the constant pool and emits a `LoadConstant`
  /// instruction for it.
  pub(super) fn emit_constant(&mut self, value: Value) {
    if let Some(idx) = self.make_constant(value) {
      self.emit_op_code_with_byte(OpCode::LoadConstant, idx);
    }
  }

  /// Adds a value to the constant pool, reporting a compile error when
  /// the pool overflows.
  pub(super) fn make_constant(&mut self, value: Value) -> Option<u8> {
    let idx = self.chunk.add_constant(value);

    if idx.is_none() {
      self.error_at_previous("Too many constants in one chunk.");
    }

    idx
  }

  /// Emits a compiler error at the current token.
  pub(super) fn error_at_current(&mut self, message: &str) {
    self.error_at_token(self.current, message);
  }

  /// Emits a compiler error at the previous token.
  pub(super) fn error_at_previous(&mut self, message: &str) {
    self.error_at_token(self.previous, message);
  }

  /// Emits a compiler error at the given token. While the compiler is
  /// in panic mode, further errors are swallowed until `synchronize`
  /// finds a statement boundary.
  ///
  /// # Parameters
  /// - `tok`: The token that caused the error.
  /// - `message`: The error message to display.
  pub(super) fn error_at_token(&mut self, tok: Token<'a>, message: &str) {
    if self.is_in_panic {
      return;
    }
    self.is_in_panic = true;

    eprint!("[line {}] Error", tok.line);

    match tok.kind {
      TokenKind::EOF => eprint!(" at end"),
      // The lexeme of an error token is already the message.
      TokenKind::ERROR => {}
      _ => eprint!(" at '{}'", tok.lexeme),
    }

    eprintln!(": {}", message);
    self.had_error = true;
  }

  /// Synchronizes the compiler after a parsing error. Tokens are
  /// discarded until something that looks like a statement boundary,
  /// which keeps one syntax slip from producing a cascade of errors.
  pub(super) fn synchronize(&mut self) {
    self.is_in_panic = false;

    while self.current.kind != TokenKind::EOF {
      if self.previous.kind == TokenKind::SEMICOLON {
        return;
      }

      match self.current.kind {
        TokenKind::CLASS_KW
        | TokenKind::FOR_KW
        | TokenKind::FUN_KW
        | TokenKind::IF_KW
        | TokenKind::PRINT_KW
        | TokenKind::RETURN_KW
        | TokenKind::VAR_KW
        | TokenKind::WHILE_KW => {
          return;
        }

        _ => {}
      }

      self.advance();
    }
  }
}
