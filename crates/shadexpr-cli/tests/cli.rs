//! Integration tests for the `shadexpr` binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn shadexpr() -> Command {
    Command::new(env!("CARGO_BIN_EXE_shadexpr"))
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = shadexpr()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn shadexpr");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for shadexpr")
}

#[test]
fn test_sexpr_output() {
    let output = shadexpr()
        .args(["--format", "sexpr", "1 + 2 * 3"])
        .output()
        .expect("Failed to run shadexpr");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "(+ 1 (* 2 3))");
}

#[test]
fn test_tree_output_is_default() {
    let output = shadexpr()
        .arg("(float)x")
        .output()
        .expect("Failed to run shadexpr");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, ["cast float @0..8", "  identifier x @7..8"]);
}

#[test]
fn test_error_exits_nonzero_with_message() {
    let output = shadexpr()
        .arg("5++")
        .output()
        .expect("Failed to run shadexpr");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("lvalue required"),
        "stderr should name the error: {stderr}"
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn test_json_reports_one_line_per_expression() {
    let output = run_with_stdin(&["--json"], "a.b[0]\n\n1 +\n");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let reports: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("stdout line should be valid JSON"))
        .collect();
    assert_eq!(reports.len(), 2);

    assert_eq!(reports[0]["ok"], true);
    assert_eq!(reports[0]["sexpr"], "([] (. a b) 0)");
    assert_eq!(reports[0]["identifiers"], serde_json::json!(["a"]));

    assert_eq!(reports[1]["ok"], false);
    assert_eq!(
        reports[1]["error"]["message"],
        "binary expression is missing its right operand"
    );
}

#[test]
fn test_no_validate_accepts_partial_tree() {
    let output = shadexpr()
        .args(["--no-validate", "--format", "sexpr", "1 +"])
        .output()
        .expect("Failed to run shadexpr");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "(+ 1 <missing>)");
}

#[test]
fn test_max_depth_flag() {
    let output = shadexpr()
        .args(["--max-depth", "4", "((((a))))"])
        .output()
        .expect("Failed to run shadexpr");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nesting exceeds the limit of 4"), "{stderr}");
}

#[test]
fn test_reads_expressions_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exprs.txt");
    std::fs::write(&path, "x ? y : z\nvec3(1, 2, 3).x\n").unwrap();

    let output = shadexpr()
        .args(["--format", "source", "--file"])
        .arg(&path)
        .output()
        .expect("Failed to run shadexpr");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        ["(x ? y : z)", "vec3(1, 2, 3).x"]
    );
}
