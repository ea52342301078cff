use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

const SAMPLE_HEX: &str = "00AC020A026162";

fn tstag_bin() -> &'static str {
    env!("CARGO_BIN_EXE_tstag")
}

fn test_temp_dir(tag: &str) -> PathBuf {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("tstag-cli-e2e-{tag}-{}-{ts}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn run_tstag(args: &[&str]) -> Output {
    Command::new(tstag_bin())
        .args(args)
        .output()
        .expect("run tstag")
}

fn run_tstag_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(tstag_bin())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn tstag");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait tstag")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

#[test]
fn cli_decode_inline_hex() {
    let out = run_tstag(&["decode", SAMPLE_HEX]);
    assert!(out.status.success(), "decode failed: {}", String::from_utf8_lossy(&out.stderr));
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).expect("json output");
    assert_eq!(
        json,
        serde_json::json!([
            {"index": 0, "type": 0, "value": 300},
            {"index": 1, "type": 2, "value": "ab"}
        ])
    );
}

#[test]
fn cli_encode_inline_json() {
    let out = run_tstag(&[
        "encode",
        r#"[{"index":1,"type":2,"value":"ab"},{"index":0,"type":0,"value":300}]"#,
    ]);
    assert!(out.status.success(), "encode failed: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(stdout(&out), SAMPLE_HEX);
}

#[test]
fn cli_decode_then_encode_via_files() {
    let dir = test_temp_dir("files");
    let hex_path = dir.join("in.hex");
    let json_path = dir.join("out.json");
    fs::write(&hex_path, format!("{}\n", SAMPLE_HEX.to_lowercase())).expect("write hex");

    let dec = run_tstag(&["decode", "-i", hex_path.to_str().unwrap(), "--pretty"]);
    assert!(dec.status.success(), "decode failed: {}", String::from_utf8_lossy(&dec.stderr));
    fs::write(&json_path, &dec.stdout).expect("write json");

    let enc = run_tstag(&["encode", "-i", json_path.to_str().unwrap()]);
    assert!(enc.status.success(), "encode failed: {}", String::from_utf8_lossy(&enc.stderr));
    assert_eq!(stdout(&enc), SAMPLE_HEX);
}

#[test]
fn cli_decode_from_stdin() {
    let out = run_tstag_stdin(&["decode", "-i", "-"], SAMPLE_HEX);
    assert!(out.status.success(), "decode failed: {}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("\"ab\""));
}

#[test]
fn cli_decode_unknown_type_fails() {
    let out = run_tstag(&["decode", "0B00"]);
    assert!(!out.status.success());
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("type code 3"), "{err}");
    assert!(out.stdout.is_empty());
}

#[test]
fn cli_decode_truncated_text_fails() {
    let out = run_tstag(&["decode", "0A0561"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("underflow"));
}

#[test]
fn cli_decode_invalid_hex_fails() {
    let out = run_tstag(&["decode", "ABC"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid hex"));
}

#[test]
fn cli_encode_index_out_of_range_fails() {
    let out = run_tstag(&["encode", r#"[{"index":32,"type":0,"value":1}]"#]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("index 32"));
}

#[test]
fn cli_decode_strict_rejects_overflow() {
    let hex = "00FFFFFFFFFFFFFFFFFFFF01";
    let lenient = run_tstag(&["decode", hex]);
    assert!(lenient.status.success());
    let strict = run_tstag(&["decode", "--strict", hex]);
    assert!(!strict.status.success());
    assert!(String::from_utf8_lossy(&strict.stderr).contains("64 bits"));
}

#[test]
fn cli_lenient_overflow_is_logged() {
    let out = run_tstag(&["decode", "00FFFFFFFFFFFFFFFFFFFF01"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("varint overflow"));
}

#[test]
fn cli_check_canonical() {
    let out = run_tstag(&["check", SAMPLE_HEX]);
    assert!(out.status.success(), "check failed: {}", String::from_utf8_lossy(&out.stderr));
    let text = stdout(&out);
    assert!(text.contains("Index 0 Type: 0 Value: 300"), "{text}");
    assert!(text.contains("Index 1 Type: 2 Value: \"ab\""), "{text}");
    assert!(text.ends_with("Equal: yes"), "{text}");
}

#[test]
fn cli_check_non_canonical() {
    // Index 1 vor Index 0 → Re-Encode sortiert um.
    let out = run_tstag(&["check", "08010002"]);
    assert!(!out.status.success());
    assert!(stdout(&out).ends_with("Equal: no"));
}

#[test]
fn cli_decode_type_code_1_header_fails() {
    let out = run_tstag(&["decode", "00AC0209026162"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("type code 1"));
}

#[test]
fn cli_decode_multiline_stdin() {
    let out = run_tstag_stdin(&["decode"], "00AC02\n0A02\r\n61 62\n");
    assert!(out.status.success(), "decode failed: {}", String::from_utf8_lossy(&out.stderr));
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).expect("json output");
    assert_eq!(json[1]["value"], "ab");
}

#[test]
fn cli_check_repeated_index() {
    // Index 0 zweimal: beide Eintraege werden gelistet, der zweite gewinnt.
    let out = run_tstag(&["check", "00010002"]);
    assert!(!out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Index 0 Type: 0 Value: 1\n"), "{text}");
    assert!(text.contains("Index 0 Type: 0 Value: 2\n"), "{text}");
    assert!(text.contains("Hex:\n0002\n"), "{text}");
    assert!(text.ends_with("Equal: no"), "{text}");
}

#[test]
fn cli_inline_and_file_conflict() {
    let out = run_tstag(&["decode", SAMPLE_HEX, "-i", "x.hex"]);
    assert!(!out.status.success());
}
