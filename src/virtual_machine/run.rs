use crate::chunk::op_codes::OpCode;
use crate::objects::StrObj;
use crate::values::Value;
use crate::virtual_machine::{RuntimeResult, VM};
use std::rc::Rc;

impl VM {
  /// Executes the instructions in the current chunk.
  pub(crate) fn run(&mut self) -> RuntimeResult {
    loop {
      let instruction = self.get_next_op_code();

      let exec = match instruction {
        OpCode::PopStackTop => {
          self.pop_stack();
          RuntimeResult::Continue
        }

        // Value loaders
        OpCode::LoadConstant => self.op_load_constant(),
        OpCode::LoadImmFalse => self.push_stack(Value::Bool(false)),
        OpCode::LoadImmNil => self.push_stack(Value::Nil),
        OpCode::LoadImmTrue => self.push_stack(Value::Bool(true)),

        // Global declarations
        OpCode::DefineGlobal => self.op_define_global(),
        OpCode::GetGlobal => self.op_get_global(),
        OpCode::SetGlobal => self.op_set_global(),

        // Operators
        OpCode::Add => self.op_add(),
        OpCode::Divide | OpCode::Multiply | OpCode::Subtract => self.op_arithmetic(instruction),
        OpCode::Equals => self.op_equals(),
        OpCode::GreaterThan | OpCode::LessThan => self.op_comparison(instruction),
        OpCode::LogicNot => self.op_logic_not(),
        OpCode::Negate => self.op_negate(),

        OpCode::Print => self.op_print(),
        OpCode::Return => RuntimeResult::End,
      };

      match exec {
        RuntimeResult::Continue => continue,
        _ => return exec,
      }
    }
  }

  /// Executes the instruction to load a constant onto the stack.
  fn op_load_constant(&mut self) -> RuntimeResult {
    let constant = self.read_constant();
    self.push_stack(constant)
  }

  /// Executes the instruction to bind the top of the stack to a global
  /// variable name, then pops the bound value.
  fn op_define_global(&mut self) -> RuntimeResult {
    let name = self.read_string_constant();
    let value = self.peek_stack(0).clone();

    self.globals.set(name, value);
    self.pop_stack();

    RuntimeResult::Continue
  }

  /// Executes the instruction to push a global variable's value onto
  /// the stack.
  fn op_get_global(&mut self) -> RuntimeResult {
    let name = self.read_string_constant();

    match self.globals.get(&name) {
      Some(value) => {
        let value = value.clone();
        self.push_stack(value)
      }
      None => RuntimeResult::Error {
        message: format!("Undefined variable '{}'.", name.chars),
      },
    }
  }

  /// Executes the instruction to rebind an existing global variable to
  /// the value at the top of the stack. Assignment is an expression, so
  /// the value stays on the stack.
  fn op_set_global(&mut self) -> RuntimeResult {
    let name = self.read_string_constant();
    let value = self.peek_stack(0).clone();

    // A set that creates the binding means the variable was never
    // defined; undo it and report.
    if self.globals.set(Rc::clone(&name), value) {
      self.globals.delete(&name);

      return RuntimeResult::Error {
        message: format!("Undefined variable '{}'.", name.chars),
      };
    }

    RuntimeResult::Continue
  }

  /// Reads the next byte as the constant-pool position of a variable
  /// name.
  fn read_string_constant(&mut self) -> Rc<StrObj> {
    match self.read_constant() {
      Value::Str(name) => name,
      // The compiler only stores interned identifier names as the
      // operands of the global opcodes.
      _ => unreachable!("Expected a string constant for a global name."),
    }
  }

  /// Executes the instruction to compare the two topmost values for
  /// equality. Any pair of values can be compared.
  fn op_equals(&mut self) -> RuntimeResult {
    let right = self.pop_stack();
    let left = self.pop_stack();

    self.push_stack(Value::Bool(left == right))
  }

  /// Executes a `GreaterThan` or `LessThan` comparison between two
  /// numbers.
  fn op_comparison(&mut self, operator: OpCode) -> RuntimeResult {
    let (left, right) = match (self.peek_stack(1).as_number(), self.peek_stack(0).as_number()) {
      (Some(left), Some(right)) => (left, right),
      _ => {
        return RuntimeResult::Error {
          message: String::from("Operands must be numbers."),
        }
      }
    };

    self.pop_stack();
    self.pop_stack();

    let result = match operator {
      OpCode::GreaterThan => left > right,
      _ => left < right,
    };

    self.push_stack(Value::Bool(result))
  }

  /// Executes a numeric `Subtract`, `Multiply`, or `Divide` instruction.
  fn op_arithmetic(&mut self, operator: OpCode) -> RuntimeResult {
    let (left, right) = match (self.peek_stack(1).as_number(), self.peek_stack(0).as_number()) {
      (Some(left), Some(right)) => (left, right),
      _ => {
        return RuntimeResult::Error {
          message: String::from("Operands must be numbers."),
        }
      }
    };

    self.pop_stack();
    self.pop_stack();

    let result = match operator {
      OpCode::Subtract => left - right,
      OpCode::Multiply => left * right,
      _ => left / right,
    };

    self.push_stack(Value::Number(result))
  }

  /// Executes the `Add` instruction: numeric addition, or concatenation
  /// when both operands are strings. The concatenated string is interned
  /// like any other allocation.
  fn op_add(&mut self) -> RuntimeResult {
    match (self.peek_stack(1), self.peek_stack(0)) {
      (Value::Number(left), Value::Number(right)) => {
        let result = left + right;

        self.pop_stack();
        self.pop_stack();
        self.push_stack(Value::Number(result))
      }
      (Value::Str(left), Value::Str(right)) => {
        let mut chars = String::with_capacity(left.chars.len() + right.chars.len());
        chars.push_str(&left.chars);
        chars.push_str(&right.chars);

        self.pop_stack();
        self.pop_stack();

        let result = Value::Str(self.strings.intern_owned(chars));
        self.push_stack(result)
      }
      _ => RuntimeResult::Error {
        message: String::from("Operands must be two numbers or two strings."),
      },
    }
  }

  /// Executes the instruction to replace the top of the stack with its
  /// logical negation.
  fn op_logic_not(&mut self) -> RuntimeResult {
    let value = self.pop_stack();
    self.push_stack(Value::Bool(value.is_falsey()))
  }

  /// Executes the instruction to arithmetically negate the number at
  /// the top of the stack.
  fn op_negate(&mut self) -> RuntimeResult {
    match self.peek_stack(0).as_number() {
      Some(number) => {
        self.pop_stack();
        self.push_stack(Value::Number(-number))
      }
      None => RuntimeResult::Error {
        message: String::from("Operand must be a number."),
      },
    }
  }

  /// Executes the instruction to print the top of the stack, followed
  /// by a newline.
  fn op_print(&mut self) -> RuntimeResult {
    let value = self.pop_stack();
    println!("{}", value);
    RuntimeResult::Continue
  }
}
