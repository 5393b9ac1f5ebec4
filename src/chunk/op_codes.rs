use num_derive::FromPrimitive;

/// The set of instructions supported by the virtual machine.
///
/// **NOTE:** Changing the order in which members are declared creates
/// incompatibilities between different versions of the interpreter.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
#[derive(FromPrimitive)]
pub enum OpCode {
  // Instructions with zero chunk operands. While these instructions do
  // not have any bytecode operands, most of them do have value operands
  // from the stack.
  Add,
  Divide,
  Equals,
  GreaterThan,
  LessThan,
  LoadImmFalse,
  LoadImmNil,
  LoadImmTrue,
  LogicNot,
  Multiply,
  Negate,
  PopStackTop,
  Print,
  Return,
  Subtract,

  // Instructions with one chunk operand. These instructions use the
  // next byte from the chunk as the index of a constant-pool entry.
  DefineGlobal,
  GetGlobal,
  LoadConstant,
  SetGlobal,
}
