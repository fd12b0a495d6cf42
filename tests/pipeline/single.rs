//! Single-resource runs.

use crate::common::Scratch;
use vecscale::storage::codec;
use vecscale::{Orchestrator, RunMode, ScaleOptions, Vector};

fn options(binary: bool, scale: f32, inverse_scale: f32) -> ScaleOptions {
    ScaleOptions {
        binary,
        scale,
        inverse_scale,
    }
}

#[test]
fn scales_binary_input_into_binary_output() {
    let s = Scratch::new();
    let (input, output) = (s.path("in.vec"), s.path("out.vec"));
    codec::write_resource(&Vector::from(vec![0.1, -3.0, 7.5]), &input, true).unwrap();

    let report = Orchestrator::new(options(true, 4.0, 0.0)).run(&input, &output).unwrap();
    assert_eq!(report.mode, RunMode::Single);
    assert_eq!(report.processed, 1);

    let (back, binary) = codec::read_resource(&output).unwrap();
    assert!(binary);
    let expected: Vec<f32> = [0.1f32, -3.0, 7.5].iter().map(|v| v * 4.0).collect();
    assert_eq!(back.as_slice(), expected.as_slice());
}

#[test]
fn output_encoding_follows_flag_not_input() {
    let s = Scratch::new();
    let (input, output) = (s.path("in.txt"), s.path("out.bin"));
    std::fs::write(&input, " [ 1 2 3 ]\n").unwrap();

    Orchestrator::new(options(true, 1.0, 0.0)).run(&input, &output).unwrap();
    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(&bytes[..2], b"\0B");

    let text_out = s.path("out.txt");
    Orchestrator::new(options(false, 1.0, 0.0)).run(&output, &text_out).unwrap();
    assert_eq!(std::fs::read_to_string(&text_out).unwrap(), " [ 1 2 3 ]\n");
}

#[test]
fn inverse_scale_overrides_scale() {
    let s = Scratch::new();
    let (input, output) = (s.path("in.txt"), s.path("out.txt"));
    std::fs::write(&input, "[ 8 16 ]").unwrap();

    Orchestrator::new(options(false, 100.0, 8.0)).run(&input, &output).unwrap();
    assert_eq!(std::fs::read_to_string(&output).unwrap(), " [ 1 2 ]\n");
}

#[test]
fn zero_scale_zeroes_every_element() {
    let s = Scratch::new();
    let (input, output) = (s.path("in.txt"), s.path("out.txt"));
    std::fs::write(&input, " [ 5 -6 7 ]\n").unwrap();

    Orchestrator::new(options(false, 0.0, 0.0)).run(&input, &output).unwrap();
    let (back, _) = codec::read_resource(&output).unwrap();
    assert_eq!(back.len(), 3);
    assert!(back.as_slice().iter().all(|v| *v == 0.0));
}

#[test]
fn reads_from_a_byte_offset() {
    let s = Scratch::new();
    let input = s.path("padded.vec");
    let mut bytes = b"JUNKJUNK".to_vec();
    codec::write_object(&mut bytes, &Vector::from(vec![2.0]), true).unwrap();
    std::fs::write(&input, bytes).unwrap();

    let output = s.path("out.txt");
    Orchestrator::new(options(false, 3.0, 0.0))
        .run(&format!("{}:8", input), &output)
        .unwrap();
    assert_eq!(std::fs::read_to_string(&output).unwrap(), " [ 6 ]\n");
}

#[cfg(unix)]
#[test]
fn pipes_on_both_sides() {
    let s = Scratch::new();
    let input = s.path("in.txt");
    let output = s.path("out.txt");
    std::fs::write(&input, " [ 1.5 ]\n").unwrap();

    Orchestrator::new(options(false, 2.0, 0.0))
        .run(&format!("cat '{}' |", input), &format!("| cat > '{}'", output))
        .unwrap();
    assert_eq!(std::fs::read_to_string(&output).unwrap(), " [ 3 ]\n");
}
