use std::process::{Command, Output};

fn stlview(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stlview"))
        .args(args)
        .output()
        .expect("failed to run stlview")
}

#[test]
fn no_arguments_prints_usage_and_exits_1() {
    let output = stlview(&[]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Usage:"), "stdout: {stdout}");
}

#[test]
fn two_arguments_print_usage_and_exit_1() {
    let output = stlview(&["missing-a.stl", "missing-b.stl"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Usage:"), "stdout: {stdout}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("failed to open"), "stderr: {stderr}");
}

#[test]
fn missing_file_fails_without_dimensions() {
    let output = stlview(&["does/not/exist.stl"]);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Dimensions"), "stdout: {stdout}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to open STL file"), "stderr: {stderr}");
}

#[test]
fn invalid_file_fails_without_dimensions() {
    let path = std::env::temp_dir().join(format!("stlview-invalid-{}.stl", std::process::id()));
    std::fs::write(&path, b"not an stl file").unwrap();

    let output = stlview(&[path.to_str().unwrap()]);
    std::fs::remove_file(&path).ok();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Dimensions"), "stdout: {stdout}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to parse STL file"), "stderr: {stderr}");
}
