use crate::values::Value;
use num_traits::FromPrimitive;
use op_codes::OpCode;

// Submodules
pub mod op_codes;

/// The maximum number of constants a single chunk can hold. Constant
/// operands are one byte wide.
pub const MAX_CONSTANTS: usize = 256;

/// Contains all the necessary information about the instructions to be
/// executed: the raw bytecode, the source line of every byte, and the
/// constant pool the bytecode refers into.
#[derive(Default)]
pub struct Chunk {
  /// The raw instruction bytes to execute in this chunk.
  pub instructions: Vec<u8>,
  /// The source line associated with each instruction byte. Always the
  /// same length as `instructions`.
  pub lines: Vec<usize>,
  /// The literal constant values found in this chunk of code.
  constants: Vec<Value>,
}

impl Chunk {
  /// Adds a raw byte and its source line into the chunk.
  pub fn push_byte(&mut self, byte: u8, line: usize) {
    self.instructions.push(byte);
    self.lines.push(line);
  }

  /// Decodes the instruction byte at the given index.
  pub fn get_op_code(&self, idx: usize) -> OpCode {
    // The compiler only emits valid opcode bytes at instruction
    // boundaries, so decoding cannot fail here.
    FromPrimitive::from_u8(self.instructions[idx]).unwrap()
  }

  /// Retrieves the raw byte at the given index.
  pub fn get_byte(&self, idx: usize) -> u8 {
    self.instructions[idx]
  }

  /// Gets the source line associated with the byte at the given index.
  pub fn get_line(&self, idx: usize) -> usize {
    self.lines[idx]
  }

  /// Adds a constant to this chunk's constant pool and returns its
  /// position. Equal constants share a single pool slot.
  ///
  /// # Returns
  /// `Option<u8>`: The position of the value in the pool, or `None` if
  /// the pool is already full.
  pub fn add_constant(&mut self, value: Value) -> Option<u8> {
    match self.constants.iter().position(|x| *x == value) {
      Some(pos) => Some(pos as u8),
      None => {
        if self.constants.len() >= MAX_CONSTANTS {
          return None;
        }

        self.constants.push(value);
        Some((self.constants.len() - 1) as u8)
      }
    }
  }

  /// Retrieves a constant from this chunk's constant pool.
  pub fn get_constant(&self, idx: usize) -> &Value {
    &self.constants[idx]
  }

  /// Gets the size of the constant pool for this chunk.
  #[allow(dead_code)]
  pub fn get_pool_size(&self) -> usize {
    self.constants.len()
  }

  /// Disassembles the chunk, printing each instruction with its byte
  /// offset, source line, mnemonic, and operand.
  #[cfg(feature = "show_bytecode")]
  pub fn disassemble(&self, name: &str) {
    println!("==== {} ====", name);

    let mut offset = 0;
    let mut last_line = 0;

    while offset < self.instructions.len() {
      let instr = self.get_op_code(offset);
      let line = self.lines[offset];

      // Prints the index of the current instruction.
      print!("{:04} ", offset);

      // Prints a line number, or a vertical bar when the instruction is
      // on the same line as the previous one.
      if line == last_line {
        print!("   | ");
      } else {
        print!("{:4} ", line);
        last_line = line;
      }

      match instr {
        OpCode::DefineGlobal | OpCode::GetGlobal | OpCode::LoadConstant | OpCode::SetGlobal => {
          let idx = self.get_byte(offset + 1) as usize;
          println!("{:<16} {:4} '{}'", format!("{:?}", instr), idx, self.get_constant(idx));
          offset += 2;
        }
        _ => {
          println!("{:?}", instr);
          offset += 1;
        }
      }
    }
  }
}
