use crate::chunk::op_codes::OpCode;
use crate::compiler::Compiler;
use crate::lexer::tokens::TokenKind;
use crate::values::Value;

impl<'a> Compiler<'a> {
  /// Compiles a single declaration, recovering to the next statement
  /// boundary when the declaration left the compiler in panic mode.
  pub(super) fn declaration(&mut self) {
    if self.matches(TokenKind::VAR_KW) {
      self.var_declaration();
    } else {
      self.statement();
    }

    if self.is_in_panic {
      self.synchronize();
    }
  }

  /// Compiles a variable declaration. A declaration without an
  /// initializer binds the variable to `nil`.
  fn var_declaration(&mut self) {
    let idx = self.parse_variable("Expect variable name.");

    if self.matches(TokenKind::EQUALS) {
      self.expression();
    } else {
      self.emit_op_code(OpCode::LoadImmNil);
    }

    self.consume(TokenKind::SEMICOLON, "Expect ';' after variable declaration.");
    self.define_variable(idx);
  }

  /// Consumes an identifier token and returns the constant-pool
  /// position of its interned name.
  fn parse_variable(&mut self, message: &str) -> u8 {
    self.consume(TokenKind::IDENTIFIER, message);
    self.identifier_constant(self.previous.lexeme)
  }

  /// Interns an identifier name and stores it in the constant pool, so
  /// that the global opcodes can refer to the name by position.
  pub(super) fn identifier_constant(&mut self, name: &str) -> u8 {
    let name = Value::Str(self.strings.intern(name));
    self.make_constant(name).unwrap_or(0)
  }

  /// Defines a declaration as a global variable.
  fn define_variable(&mut self, idx: u8) {
    self.emit_op_code_with_byte(OpCode::DefineGlobal, idx);
  }

  /// Compiles a single statement.
  pub(super) fn statement(&mut self) {
    if self.matches(TokenKind::PRINT_KW) {
      self.print_statement();
    } else if self.matches(TokenKind::L_CURLY) {
      self.begin_scope();
      self.block();
      self.end_scope();
    } else {
      self.expression_statement();
    }
  }

  /// Compiles a print statement.
  fn print_statement(&mut self) {
    self.expression();
    self.consume(TokenKind::SEMICOLON, "Expect ';' after value.");
    self.emit_op_code(OpCode::Print);
  }

  /// Compiles an expression statement, discarding the expression's
  /// value afterwards.
  fn expression_statement(&mut self) {
    self.expression();
    self.consume(TokenKind::SEMICOLON, "Expect ';' after expression.");
    self.emit_op_code(OpCode::PopStackTop);
  }

  /// Compiles the declarations inside a braced block.
  fn block(&mut self) {
    while !self.check(TokenKind::R_CURLY) && !self.check(TokenKind::EOF) {
      self.declaration();
    }

    self.consume(TokenKind::R_CURLY, "Expect '}' after block.");
  }

  // Blocks are recognized syntactically, but no locals are resolved
  // yet, so entering and leaving a scope only tracks the depth.
  fn begin_scope(&mut self) {
    self.scope_depth += 1;
  }

  fn end_scope(&mut self) {
    debug_assert!(self.scope_depth > 0, "Unbalanced scopes.");
    self.scope_depth -= 1;
  }
}
