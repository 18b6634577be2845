//! Shared test harness. The teacher's own `tests!` macro (`tests/common`)
//! loads fixtures from `tests/target/<scope>/<name>.rocks`; the retrieved
//! snapshot did not include those fixture files, so this version takes the
//! Lox source inline as a string literal instead of a path, and the ERR arm
//! writes that source to a uniquely named temp file for the subprocess run.

use std::sync::atomic::{AtomicU32, Ordering};

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Writes `source` to a fresh file under the OS temp directory and returns
/// its path. Used only by the ERR arm of [`tests`], which has to run the
/// compiled binary out-of-process to assert on its real exit code.
pub fn write_temp_source(test_name: &str, source: &str) -> std::path::PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!("lox-lang-test-{}-{test_name}-{n}.lox", std::process::id()));
    std::fs::write(&path, source).expect("failed to write temp fixture");
    path
}

/// `tests! { name is OK, command: run, source: "...", "expected line 1", ... }`
/// runs entirely in-process via [`lox_lang::Lox`] and asserts stdout.
///
/// `tests! { name is ERR, command: run, source: "...", "expected stderr line", ... }`
/// spawns the compiled `lox` binary via `assert_cmd` and asserts the exact
/// stderr text and a failing exit status.
#[macro_export]
macro_rules! tests {
    ($name:ident is OK, command: $command:ident, source: $source:expr $(, $expected:expr)* $(,)?) => {
        #[test]
        fn $name() {
            use lox_lang::error::Reporter;
            use lox_lang::{Lox, Outcome};

            #[allow(unused_mut)]
            let mut expected: Vec<&str> = vec![$($expected),*];
            let expected = if expected.is_empty() {
                String::new()
            } else {
                expected.push("");
                expected.join("\n")
            };

            let mut stderr = Vec::new();
            let mut reporter = Reporter::new(&mut stderr);
            let mut output = Vec::new();
            let outcome = Lox::$command($source, &mut reporter, &mut output);

            assert_eq!(
                outcome,
                Outcome::Ok,
                "expected success, stderr was: {}",
                String::from_utf8_lossy(&stderr)
            );
            assert_eq!(expected, String::from_utf8(output).unwrap());
        }
    };

    ($name:ident is ERR, command: $command:ident, source: $source:expr $(, $expected:expr)+ $(,)?) => {
        #[test]
        fn $name() {
            use assert_cmd::Command;

            let expected = vec![$($expected),+].join("\n");
            let path = $crate::common::write_temp_source(stringify!($name), $source);

            Command::cargo_bin("lox")
                .unwrap()
                .arg(stringify!($command))
                .arg(&path)
                .assert()
                .stderr(format!("{expected}\n"))
                .failure();

            let _ = std::fs::remove_file(&path);
        }
    };
}
