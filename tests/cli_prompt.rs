use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_omup"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

// The file does not exist, so an accepted prompt fails on the read step
// before anything touches the network.
fn missing_file() -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt").to_string_lossy().into_owned();
    (dir, path)
}

#[test]
fn piped_no_exits_cleanly_without_upload() {
    let (_dir, path) = missing_file();
    let output = run_with_stdin(&["-p", &path], "n\n");

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[y/n]"), "{}", stderr);
}

#[test]
fn piped_yes_proceeds_past_prompt() {
    let (_dir, path) = missing_file();
    let output = run_with_stdin(&["--prompt", &path], "y\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error reading file"), "{}", stderr);
}

#[test]
fn closed_stdin_declines() {
    let (_dir, path) = missing_file();
    let output = run_with_stdin(&["-p", &path], "");

    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn missing_file_without_prompt_fails() {
    let (_dir, path) = missing_file();
    let output = run_with_stdin(&[&path], "");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: error reading file"), "{}", stderr);
}
