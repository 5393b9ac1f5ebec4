use crate::chunk::op_codes::OpCode;
use crate::compiler::precedence::{get_rule, ParseFn, Precedence};
use crate::compiler::Compiler;
use crate::lexer::tokens::TokenKind;
use crate::values::Value;

impl<'a> Compiler<'a> {
  /// Compiles an expression.
  pub(super) fn expression(&mut self) {
    self.parse_precedence(Precedence::Assignment);
  }

  /// Parses every expression at or above the given precedence level:
  /// the previous token's prefix rule first, then infix rules for as
  /// long as the current token binds at least as tightly.
  pub(super) fn parse_precedence(&mut self, precedence: Precedence) {
    self.advance();

    let prefix = get_rule(self.previous.kind).prefix;

    // Assignment only nests inside the loosest expressions. Any deeper
    // parse level must leave a trailing `=` alone so that it can be
    // rejected below.
    let can_assign = precedence as u8 <= Precedence::Assignment as u8;

    if let ParseFn::None = prefix {
      self.error_at_previous("Expect expression.");
      return;
    }

    self.exec_parse_fn(prefix, can_assign);

    while precedence as u8 <= get_rule(self.current.kind).precedence as u8 {
      self.advance();
      let infix = get_rule(self.previous.kind).infix;
      self.exec_parse_fn(infix, can_assign);
    }

    if can_assign && self.matches(TokenKind::EQUALS) {
      self.error_at_previous("Invalid assignment target.");
    }
  }

  /// Executes a parsing function by name.
  fn exec_parse_fn(&mut self, func: ParseFn, can_assign: bool) {
    match func {
      ParseFn::CompileBinaryExpr => self.compile_binary_expr(),
      ParseFn::CompileGrouping => self.compile_grouping_expr(),
      ParseFn::CompileLiteral => self.compile_literal_expr(),
      ParseFn::CompileNumeric => self.compile_numeric_expr(),
      ParseFn::CompileString => self.compile_string_expr(),
      ParseFn::CompileUnary => self.compile_unary_expr(),
      ParseFn::CompileVariable => self.compile_variable_expr(can_assign),
      ParseFn::None => {}
    }
  }

  /// Compiles a parenthesized grouping expression.
  fn compile_grouping_expr(&mut self) {
    self.expression();
    self.consume(TokenKind::R_PAREN, "Expect ')' after expression.");
  }

  /// Compiles a numeric literal.
  fn compile_numeric_expr(&mut self) {
    // The lexer only produces NUM_LIT for digit sequences that f64
    // already accepts, so this parse cannot fail.
    let value: f64 = self.previous.lexeme.parse().unwrap();
    self.emit_constant(Value::Number(value));
  }

  /// Compiles a string literal, trimming the surrounding quotes and
  /// interning the contents.
  fn compile_string_expr(&mut self) {
    let lexeme = self.previous.lexeme;
    let chars = &lexeme[1..lexeme.len() - 1];

    let value = Value::Str(self.strings.intern(chars));
    self.emit_constant(value);
  }

  /// Compiles a `true`, `false`, or `nil` literal.
  fn compile_literal_expr(&mut self) {
    match self.previous.kind {
      TokenKind::FALSE_LIT => self.emit_op_code(OpCode::LoadImmFalse),
      TokenKind::NIL_LIT => self.emit_op_code(OpCode::LoadImmNil),
      TokenKind::TRUE_LIT => self.emit_op_code(OpCode::LoadImmTrue),
      _ => unreachable!("Only literal tokens have a literal rule."),
    }
  }

  /// Compiles a unary expression.
  fn compile_unary_expr(&mut self) {
    let operator = self.previous.kind;

    // Compile the operand first; the operator applies to its result.
    self.parse_precedence(Precedence::Unary);

    match operator {
      TokenKind::BANG => self.emit_op_code(OpCode::LogicNot),
      TokenKind::DASH => self.emit_op_code(OpCode::Negate),
      _ => unreachable!("Only '!' and '-' have a unary rule."),
    }
  }

  /// Compiles the right operand and operator of a binary expression.
  /// The `!=`, `>=`, and `<=` operators lower to the negation of their
  /// complementary instruction.
  fn compile_binary_expr(&mut self) {
    let operator = self.previous.kind;

    // One level higher keeps operators of the same precedence
    // left-associative.
    self.parse_precedence(get_rule(operator).precedence.one_higher());

    match operator {
      TokenKind::BANG_EQ => {
        self.emit_op_code(OpCode::Equals);
        self.emit_op_code(OpCode::LogicNot);
      }
      TokenKind::DASH => self.emit_op_code(OpCode::Subtract),
      TokenKind::GREATER_THAN => self.emit_op_code(OpCode::GreaterThan),
      TokenKind::GREATER_THAN_EQ => {
        self.emit_op_code(OpCode::LessThan);
        self.emit_op_code(OpCode::LogicNot);
      }
      TokenKind::LESS_THAN => self.emit_op_code(OpCode::LessThan),
      TokenKind::LESS_THAN_EQ => {
        self.emit_op_code(OpCode::GreaterThan);
        self.emit_op_code(OpCode::LogicNot);
      }
      TokenKind::LOGIC_EQ => self.emit_op_code(OpCode::Equals),
      TokenKind::PLUS => self.emit_op_code(OpCode::Add),
      TokenKind::SLASH => self.emit_op_code(OpCode::Divide),
      TokenKind::STAR => self.emit_op_code(OpCode::Multiply),
      _ => unreachable!("Only binary operators have an infix rule."),
    }
  }

  /// Compiles an identifier expression: a global read, or a global
  /// write when the identifier is a valid assignment target followed
  /// by `=`.
  fn compile_variable_expr(&mut self, can_assign: bool) {
    let idx = self.identifier_constant(self.previous.lexeme);

    if can_assign && self.matches(TokenKind::EQUALS) {
      self.expression();
      self.emit_op_code_with_byte(OpCode::SetGlobal, idx);
    } else {
      self.emit_op_code_with_byte(OpCode::GetGlobal, idx);
    }
  }
}
