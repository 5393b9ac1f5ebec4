use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Writes the source to a temporary script file and runs the
/// interpreter over it.
fn run_source(source: &str) -> Output {
  let mut file = tempfile::NamedTempFile::new().expect("could not create a script file");
  file.write_all(source.as_bytes()).expect("could not write the script file");

  Command::new(env!("CARGO_BIN_EXE_clox"))
    .arg(file.path())
    .output()
    .expect("could not run the interpreter")
}

fn stdout_of(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn prints_simple_arithmetic() {
  let output = run_source("print 1 + 2;");

  assert_eq!(stdout_of(&output), "3\n");
  assert_eq!(output.status.code(), Some(0));
}

#[test]
fn prints_grouped_arithmetic_with_negation() {
  let output = run_source("print (-1 + 2) * 3 - -4;");

  assert_eq!(stdout_of(&output), "7\n");
  assert_eq!(output.status.code(), Some(0));
}

#[test]
fn prints_mixed_comparison_chains() {
  let output = run_source("print !(5 - 4 > 3 * 2 == !nil);");

  assert_eq!(stdout_of(&output), "true\n");
  assert_eq!(output.status.code(), Some(0));
}

#[test]
fn prints_concatenated_globals() {
  let output = run_source("var a = \"st\"; var b = \"ring\"; print a + b;");

  assert_eq!(stdout_of(&output), "string\n");
  assert_eq!(output.status.code(), Some(0));
}

#[test]
fn prints_reassigned_globals() {
  let output = run_source("var x = 1; x = x + 41; print x;");

  assert_eq!(stdout_of(&output), "42\n");
  assert_eq!(output.status.code(), Some(0));
}

#[test]
fn prints_string_bytes_verbatim() {
  let output = run_source("print \"a b\tc\";");

  assert_eq!(stdout_of(&output), "a b\tc\n");
  assert_eq!(output.status.code(), Some(0));
}

#[test]
fn undefined_variable_reads_exit_70() {
  let output = run_source("print y;");
  let stderr = stderr_of(&output);

  assert!(stderr.contains("Undefined variable 'y'."), "stderr: {}", stderr);
  assert!(stderr.contains("[line 1] in script"), "stderr: {}", stderr);
  assert_eq!(output.status.code(), Some(70));
}

#[test]
fn mismatched_addition_exits_70() {
  let output = run_source("print 1 + \"a\";");
  let stderr = stderr_of(&output);

  assert!(
    stderr.contains("Operands must be two numbers or two strings."),
    "stderr: {}",
    stderr
  );
  assert_eq!(output.status.code(), Some(70));
}

#[test]
fn invalid_assignment_targets_exit_65() {
  let output = run_source("a * b = c + d;");
  let stderr = stderr_of(&output);

  assert!(stderr.contains("Invalid assignment target."), "stderr: {}", stderr);
  assert_eq!(output.status.code(), Some(65));
}

#[test]
fn compile_errors_name_the_line_and_lexeme() {
  let output = run_source("print 1;\nvar = 2;");
  let stderr = stderr_of(&output);

  assert!(
    stderr.contains("[line 2] Error at '=': Expect variable name."),
    "stderr: {}",
    stderr
  );
  assert_eq!(output.status.code(), Some(65));
}

#[test]
fn runtime_errors_report_the_offending_line() {
  let output = run_source("var a = 1;\nvar b = 2;\nprint a + \"no\";\n");
  let stderr = stderr_of(&output);

  assert!(stderr.contains("[line 3] in script"), "stderr: {}", stderr);
  assert_eq!(output.status.code(), Some(70));
}

#[test]
fn too_many_arguments_exit_64() {
  let output = Command::new(env!("CARGO_BIN_EXE_clox"))
    .args(["one.lox", "two.lox"])
    .output()
    .expect("could not run the interpreter");

  assert_eq!(stderr_of(&output), "Usage: clox [path]\n");
  assert_eq!(output.status.code(), Some(64));
}

#[test]
fn unreadable_files_exit_74() {
  let output = Command::new(env!("CARGO_BIN_EXE_clox"))
    .arg("definitely/not/a/real/file.lox")
    .output()
    .expect("could not run the interpreter");

  assert!(stderr_of(&output).contains("Could not open file"));
  assert_eq!(output.status.code(), Some(74));
}

#[test]
fn repl_keeps_globals_between_lines() {
  let mut child = Command::new(env!("CARGO_BIN_EXE_clox"))
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .expect("could not start the REPL");

  child
    .stdin
    .take()
    .expect("no stdin handle")
    .write_all(b"var a = 20;\nprint a + 2;\n")
    .expect("could not write to the REPL");

  let output = child.wait_with_output().expect("could not wait for the REPL");

  assert!(stdout_of(&output).contains("22"), "stdout: {}", stdout_of(&output));
  assert_eq!(output.status.code(), Some(0));
}
