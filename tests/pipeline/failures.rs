//! Failure classification and what is left behind.

use std::path::Path;

use crate::common::{owned, read_table, write_table, Scratch};
use vecscale::{ErrorKind, Orchestrator, ScaleOptions};

fn run(input: &str, output: &str) -> vecscale::Result<vecscale::RunReport> {
    Orchestrator::new(ScaleOptions::default()).run(input, output)
}

#[test]
fn mixed_modes_touch_nothing() {
    let s = Scratch::new();
    let plain = s.path("out.vec");
    let table = s.path("out.ark");

    let err = run(&format!("ark:{}", s.path("in.ark")), &plain).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(!Path::new(&plain).exists());

    let err = run(&s.path("in.vec"), &format!("ark:{}", table)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(!Path::new(&table).exists());
}

#[test]
fn malformed_specifiers_are_configuration_errors() {
    let s = Scratch::new();
    let out = s.path("out.ark");
    for (input, output) in [
        ("ark,bogus:in.ark".to_string(), format!("ark:{}", out)),
        ("ark:in.ark".to_string(), format!("ark,scp:{}", out)),
        ("ark:in.ark".to_string(), "ark:-, ".to_string()),
    ] {
        let err = run(&input, &output).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration, "{} -> {}", input, output);
    }
    assert!(!Path::new(&out).exists());
}

#[test]
fn missing_single_input_is_io_error() {
    let s = Scratch::new();
    let err = run(&s.path("absent.vec"), &s.path("out.vec")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn truncated_binary_resource_is_format_error() {
    let s = Scratch::new();
    let input = s.path("short.vec");
    // Header promises four floats, body carries one.
    let mut bytes = b"\0BFV \x04".to_vec();
    bytes.extend_from_slice(&4i32.to_le_bytes());
    bytes.extend_from_slice(&1.0f32.to_le_bytes());
    std::fs::write(&input, bytes).unwrap();

    let err = run(&input, &s.path("out.vec")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn bad_text_token_is_format_error() {
    let s = Scratch::new();
    let input = s.path("bad.txt");
    std::fs::write(&input, " [ 1 two 3 ]\n").unwrap();
    let err = run(&input, &s.path("out.vec")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn missing_archive_is_archive_error_after_writer_opens() {
    let s = Scratch::new();
    let output = s.path("out.ark");
    let err = run(&format!("ark:{}", s.path("absent.ark")), &format!("ark:{}", output)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Archive);
    // The writer is opened first, so its output exists even though nothing was read.
    assert!(Path::new(&output).exists());
}

#[test]
fn unwritable_output_fails_before_reading() {
    let s = Scratch::new();
    let input = s.path("in.ark");
    write_table(&format!("ark:{}", input), &[("a", &[1.0])]);
    let output = s.path("no/such/dir/out.ark");

    let err = run(&format!("ark:{}", input), &format!("ark:{}", output)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Archive);
}

#[test]
fn partial_output_survives_mid_table_failure() {
    let s = Scratch::new();
    let input = s.path("in.ark");
    write_table(&format!("ark,t:{}", input), &[("a", &[1.0]), ("b", &[2.0])]);
    let mut bytes = std::fs::read(&input).unwrap();
    bytes.extend_from_slice(b"c \0BXX");
    std::fs::write(&input, bytes).unwrap();
    let output = s.path("out.ark");

    assert!(run(&format!("ark:{}", input), &format!("ark:{}", output)).is_err());
    assert_eq!(
        read_table(&format!("ark:{}", output)),
        owned(&[("a", &[1.0]), ("b", &[2.0])])
    );
}
