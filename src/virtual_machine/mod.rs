use crate::chunk::op_codes::OpCode;
use crate::chunk::Chunk;
use crate::compiler::Compiler;
use crate::objects::StrPool;
use crate::table::Table;
use crate::values::Value;

// Submodules
mod run;

/// The types of results the interpreter can return.
#[derive(Debug, PartialEq, Eq)]
pub enum InterpretResult {
  CompileError,
  Ok,
  RuntimeError,
}

/// The result of executing a single instruction.
pub(crate) enum RuntimeResult {
  Continue,
  End,
  Error { message: String },
}

/// Represents the virtual machine and its internal state.
pub struct VM {
  /// The chunk currently being executed.
  chunk: Chunk,
  /// The instruction pointer into the current chunk.
  ip: usize,
  /// The value stack.
  stack: Vec<Value>,
  /// The global variable bindings.
  globals: Table,
  /// The pool of every interned string.
  strings: StrPool,
}

impl VM {
  /// Creates a virtual machine with an empty globals table and an empty
  /// string pool. Both survive across `interpret` calls, which is what
  /// lets a REPL session accumulate state.
  pub fn new() -> Self {
    Self {
      chunk: Chunk::default(),
      ip: 0,
      stack: Vec::with_capacity(256),
      globals: Table::default(),
      strings: StrPool::default(),
    }
  }

  /// Compiles and runs a source string.
  ///
  /// # Returns
  /// `InterpretResult`: The result of the source interpretation.
  pub fn interpret(&mut self, source: &str) -> InterpretResult {
    let chunk = match Compiler::compile(source, &mut self.strings) {
      Ok(chunk) => chunk,
      Err(()) => return InterpretResult::CompileError,
    };

    self.chunk = chunk;
    self.ip = 0;
    self.stack.clear();

    match self.run() {
      RuntimeResult::End => InterpretResult::Ok,
      RuntimeResult::Error { message } => {
        self.report_runtime_error(&message);
        InterpretResult::RuntimeError
      }
      RuntimeResult::Continue => unreachable!("The run loop only stops on End or Error."),
    }
  }

  /// Looks up the current value of a global variable.
  #[cfg(test)]
  pub fn get_global(&mut self, name: &str) -> Option<Value> {
    let key = self.strings.intern(name);
    self.globals.get(&key).cloned()
  }

  /// Throws a runtime error to the console, naming the source line of
  /// the instruction that failed, and resets the stack. The globals
  /// table and the string pool survive.
  fn report_runtime_error(&mut self, message: &str) {
    let line = self.chunk.get_line(self.ip - 1);

    eprintln!("{}", message);
    eprintln!("[line {}] in script", line);

    self.stack.clear();
  }

  /// Decodes the instruction at the instruction pointer and moves the
  /// pointer past it.
  fn get_next_op_code(&mut self) -> OpCode {
    let code = self.chunk.get_op_code(self.ip);
    self.ip += 1;
    code
  }

  /// Reads the byte operand at the instruction pointer and moves the
  /// pointer past it.
  fn get_next_byte(&mut self) -> u8 {
    let byte = self.chunk.get_byte(self.ip);
    self.ip += 1;
    byte
  }

  /// Reads the next byte as a constant-pool index and loads the
  /// constant it names.
  fn read_constant(&mut self) -> Value {
    let idx = self.get_next_byte() as usize;
    self.chunk.get_constant(idx).clone()
  }

  fn push_stack(&mut self, value: Value) -> RuntimeResult {
    self.stack.push(value);
    RuntimeResult::Continue
  }

  fn pop_stack(&mut self) -> Value {
    match self.stack.pop() {
      Some(val) => val,
      None => panic!("Stack is empty!"),
    }
  }

  /// Peeks at a value `distance` slots down from the top of the stack
  /// without popping it.
  fn peek_stack(&self, distance: usize) -> &Value {
    &self.stack[self.stack.len() - 1 - distance]
  }
}
