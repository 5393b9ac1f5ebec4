use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::{env, fs, process};

// Declaring crate-level modules
mod chunk;
mod compiler;
mod lexer;
mod objects;
mod table;
mod values;
mod virtual_machine;

#[cfg(test)]
mod tests;

use virtual_machine::{InterpretResult, VM};

/// The main function
fn main() {
  // structure: clox <filename?>
  let args = env::args().collect::<Vec<String>>();

  match args.as_slice() {
    [_] => repl(),
    [_, file] => run_file(file),
    _ => {
      eprintln!("Usage: clox [path]");
      process::exit(64);
    }
  }
}

/// Runs a line-oriented session against a single persistent VM, so that
/// globals and interned strings carry over from line to line. The
/// session ends at end-of-input.
fn repl() {
  let mut vm = VM::new();

  let mut editor = match DefaultEditor::new() {
    Ok(editor) => editor,
    Err(_) => {
      eprintln!("Could not start the interactive session.");
      process::exit(74);
    }
  };

  loop {
    match editor.readline("> ") {
      Ok(line) => {
        let _ = editor.add_history_entry(&line);
        vm.interpret(&line);
      }
      Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
      Err(_) => break,
    }
  }
}

/// Interprets a source file and exits the process with the appropriate
/// code.
fn run_file(filename: &str) {
  let source = match fs::read_to_string(filename) {
    Ok(contents) => contents,
    Err(_) => {
      eprintln!("Could not open file \"{}\".", filename);
      process::exit(74);
    }
  };

  // Interprets the source contents in the VM
  let mut vm = VM::new();
  let result = vm.interpret(&source);

  // Exit the interpreter with the appropriate code
  match result {
    InterpretResult::CompileError => process::exit(65),
    InterpretResult::RuntimeError => process::exit(70),
    InterpretResult::Ok => (),
  }
}
