use crate::lexer::tokens::TokenKind;

/// Represents the precedence of different expressions in ascending
/// order. For example, `Equality` binds looser than `Unary` because
/// `Equality` appears earlier in the enum.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum Precedence {
  None,
  Assignment, // =
  Or,         // or
  And,        // and
  Equality,   // == !=
  Comparison, // < > <= >=
  Term,       // + -
  Factor,     // * /
  Unary,      // ! -
  Call,       // . ()
  Primary,
}

impl Precedence {
  /// Gets the Precedence variant associated with a given numeric value.
  pub fn get_by_val(val: u8) -> Precedence {
    match val {
      0 => Precedence::None,
      1 => Precedence::Assignment,
      2 => Precedence::Or,
      3 => Precedence::And,
      4 => Precedence::Equality,
      5 => Precedence::Comparison,
      6 => Precedence::Term,
      7 => Precedence::Factor,
      8 => Precedence::Unary,
      9 => Precedence::Call,
      10 => Precedence::Primary,
      _ => Precedence::None, // Should never be reached
    }
  }

  /// The next-higher precedence level. Parsing a binary operator's right
  /// operand one level higher keeps the operator left-associative.
  pub fn one_higher(self) -> Precedence {
    Precedence::get_by_val(self as u8 + 1)
  }
}

/// The set of compiling functions that can be associated with a given
/// token.
#[derive(Clone, Copy)]
pub enum ParseFn {
  CompileBinaryExpr,
  CompileGrouping,
  CompileLiteral,
  CompileNumeric,
  CompileString,
  CompileUnary,
  CompileVariable,
  None, // Do not call a parsing function
}

/// Wraps the parsing properties of a token so that they can be easily
/// accessed throughout the compiler.
pub struct ParserRule {
  pub prefix: ParseFn,
  pub infix: ParseFn,
  pub precedence: Precedence,
}

/// Gets the parsing rule for a token kind: the compiling function for
/// the token in prefix position, the one for infix position, and the
/// token's infix precedence.
pub fn get_rule(kind: TokenKind) -> ParserRule {
  match kind {
    TokenKind::BANG => ParserRule {
      prefix: ParseFn::CompileUnary,
      infix: ParseFn::None,
      precedence: Precedence::None,
    },

    TokenKind::BANG_EQ => ParserRule {
      prefix: ParseFn::None,
      infix: ParseFn::CompileBinaryExpr,
      precedence: Precedence::Equality,
    },

    TokenKind::DASH => ParserRule {
      prefix: ParseFn::CompileUnary,
      infix: ParseFn::CompileBinaryExpr,
      precedence: Precedence::Term,
    },

    TokenKind::FALSE_LIT => ParserRule {
      prefix: ParseFn::CompileLiteral,
      infix: ParseFn::None,
      precedence: Precedence::None,
    },

    TokenKind::GREATER_THAN => ParserRule {
      prefix: ParseFn::None,
      infix: ParseFn::CompileBinaryExpr,
      precedence: Precedence::Comparison,
    },

    TokenKind::GREATER_THAN_EQ => ParserRule {
      prefix: ParseFn::None,
      infix: ParseFn::CompileBinaryExpr,
      precedence: Precedence::Comparison,
    },

    TokenKind::IDENTIFIER => ParserRule {
      prefix: ParseFn::CompileVariable,
      infix: ParseFn::None,
      precedence: Precedence::None,
    },

    TokenKind::LESS_THAN => ParserRule {
      prefix: ParseFn::None,
      infix: ParseFn::CompileBinaryExpr,
      precedence: Precedence::Comparison,
    },

    TokenKind::LESS_THAN_EQ => ParserRule {
      prefix: ParseFn::None,
      infix: ParseFn::CompileBinaryExpr,
      precedence: Precedence::Comparison,
    },

    TokenKind::LOGIC_EQ => ParserRule {
      prefix: ParseFn::None,
      infix: ParseFn::CompileBinaryExpr,
      precedence: Precedence::Equality,
    },

    TokenKind::L_PAREN => ParserRule {
      prefix: ParseFn::CompileGrouping,
      infix: ParseFn::None,
      precedence: Precedence::None,
    },

    TokenKind::NIL_LIT => ParserRule {
      prefix: ParseFn::CompileLiteral,
      infix: ParseFn::None,
      precedence: Precedence::None,
    },

    TokenKind::NUM_LIT => ParserRule {
      prefix: ParseFn::CompileNumeric,
      infix: ParseFn::None,
      precedence: Precedence::None,
    },

    TokenKind::PLUS => ParserRule {
      prefix: ParseFn::None,
      infix: ParseFn::CompileBinaryExpr,
      precedence: Precedence::Term,
    },

    TokenKind::SLASH => ParserRule {
      prefix: ParseFn::None,
      infix: ParseFn::CompileBinaryExpr,
      precedence: Precedence::Factor,
    },

    TokenKind::STAR => ParserRule {
      prefix: ParseFn::None,
      infix: ParseFn::CompileBinaryExpr,
      precedence: Precedence::Factor,
    },

    TokenKind::STR_LIT => ParserRule {
      prefix: ParseFn::CompileString,
      infix: ParseFn::None,
      precedence: Precedence::None,
    },

    TokenKind::TRUE_LIT => ParserRule {
      prefix: ParseFn::CompileLiteral,
      infix: ParseFn::None,
      precedence: Precedence::None,
    },

    // The rest of the tokens do not have a parse rule.
    _ => ParserRule {
      prefix: ParseFn::None,
      infix: ParseFn::None,
      precedence: Precedence::None,
    },
  }
}
