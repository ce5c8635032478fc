use image::{Rgb, RgbImage};
use std::io::Write;
use std::process::{Command, Stdio};

fn stego() -> Command {
    Command::new(env!("CARGO_BIN_EXE_stego"))
}

#[test]
fn test_decode_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.png");

    let output = stego().arg("decode").arg("--image").arg(&missing).output().unwrap();
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("was not found"), "stdout: {}", stdout);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_encode_rejected_message_fails() {
    let dir = tempfile::tempdir().unwrap();
    let cover = dir.path().join("cover.png");
    RgbImage::new(8, 8).save(&cover).unwrap();

    let output = stego()
        .args(["--no-show", "encode", "--message", "€uro", "--image"])
        .arg(&cover)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(!dir.path().join("encoded_output.png").exists());
}

#[test]
fn test_encode_then_decode_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let cover = dir.path().join("cover.png");
    RgbImage::from_pixel(50, 50, Rgb([120, 60, 30])).save(&cover).unwrap();

    let output = stego()
        .args(["--no-show", "encode", "--message", "hello", "--color", "white", "--image"])
        .arg(&cover)
        .output()
        .unwrap();
    assert!(output.status.success());

    let hidden = dir.path().join("encoded_output.png");
    let output = stego().arg("decode").arg("--image").arg(&hidden).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Decoded message: hello"));
}

#[test]
fn test_interactive_invalid_choice_exits_cleanly() {
    let mut child = stego()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"x\n").unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Invalid choice"));
}
