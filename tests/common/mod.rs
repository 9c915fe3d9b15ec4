//! Shared harness for the integration tests below.
//!
//! Runs a program in-process through `laze::run`, capturing `print` output
//! into an in-memory buffer instead of reading real `stdout`.

use std::io::Cursor;

/// Runs `source` with empty stdin and returns everything written to
/// stdout. Panics (failing the test) if the program does not run to
/// completion.
pub fn run_ok(source: &str) -> String {
    run_with_stdin(source, "").expect("program was expected to run successfully")
}

/// Runs `source` with empty stdin and asserts it terminates with a fatal
/// error.
pub fn run_err(source: &str) {
    let mut stdout = Vec::new();
    let mut stdin = Cursor::new(Vec::new());
    let result = laze::run(source, &mut stdout, &mut stdin);
    assert!(
        result.is_err(),
        "expected a fatal error, got success with stdout: {:?}",
        String::from_utf8_lossy(&stdout)
    );
}

/// Runs `source` against the given stdin text, returning captured stdout
/// on success.
pub fn run_with_stdin(source: &str, stdin_text: &str) -> Result<String, String> {
    let mut stdout = Vec::new();
    let mut stdin = Cursor::new(stdin_text.as_bytes().to_vec());
    laze::run(source, &mut stdout, &mut stdin).map_err(|e| e.to_string())?;
    Ok(String::from_utf8(stdout).expect("program output must be valid UTF-8"))
}
