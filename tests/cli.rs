use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_fbase64"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_encode_stdin_default_wrap() {
    let out = run(&[], b"Hello World");
    assert!(out.status.success());
    assert_eq!(out.stdout, b"SGVsbG8gV29ybGQ=\n");
}

#[test]
fn test_encode_wrap_and_crlf() {
    let out = run(&["-w", "4", "--crlf"], b"foobar");
    assert!(out.status.success());
    assert_eq!(out.stdout, b"Zm9v\r\nYmFy\r\n");

    let out = run(&["-w", "0"], b"foobar");
    assert_eq!(out.stdout, b"Zm9vYmFy");
}

#[test]
fn test_decode_stdin() {
    let out = run(&["-d"], b"SGVs\nbG8=\n");
    assert!(out.status.success());
    assert_eq!(out.stdout, b"Hello");
}

#[test]
fn test_decode_invalid_reports_error() {
    let out = run(&["-d"], b"TW#u");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("base64: invalid input"), "{}", stderr);
}

#[test]
fn test_decode_ignore_garbage() {
    let out = run(&["-d", "-i"], b"SGVs!!bG8=");
    assert!(out.status.success());
    assert_eq!(out.stdout, b"Hello");
}

#[test]
fn test_url_safe_alphabet() {
    let out = run(&["--url", "-w", "0"], &[0xFB, 0xFF]);
    assert_eq!(out.stdout, b"-_8");

    let out = run(&["--url", "-d"], b"-_8");
    assert_eq!(out.stdout, [0xFB, 0xFF]);
}

#[test]
fn test_custom_alphabet_and_pad() {
    let out = run(&["--extra-chars", "*!", "--pad", "~", "-w", "0"], &[0xFB, 0xFF]);
    assert_eq!(out.stdout, b"*!8~");

    let out = run(&["--no-padding", "-w", "0"], b"M");
    assert_eq!(out.stdout, b"TQ");
}

#[test]
fn test_bad_extra_chars() {
    let out = run(&["--extra-chars", "+"], b"");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("--extra-chars"), "{}", stderr);
}

#[test]
fn test_encode_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"Man").unwrap();
    let path = file.path().to_str().unwrap();
    let out = run(&[path], b"");
    assert!(out.status.success());
    assert_eq!(out.stdout, b"TWFu\n");
}

#[cfg(unix)]
#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing");
    let out = run(&[path.to_str().unwrap()], b"");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("No such file or directory"), "{}", stderr);
}
