//! Table runs.

use crate::common::{owned, read_table, write_table, Scratch};
use vecscale::{Orchestrator, RunMode, ScaleOptions};

fn scaled_by(scale: f32) -> Orchestrator {
    Orchestrator::new(ScaleOptions {
        scale,
        ..ScaleOptions::default()
    })
}

const ABC: &[(&str, &[f32])] = &[("a", &[1.0, 1.0]), ("b", &[2.0, 2.0]), ("c", &[3.0, 3.0])];

#[test]
fn archive_to_archive_preserves_keys_and_order() {
    let s = Scratch::new();
    let (input, output) = (s.path("in.ark"), s.path("out.ark"));
    write_table(&format!("ark:{}", input), ABC);

    let report = scaled_by(10.0)
        .run(&format!("ark:{}", input), &format!("ark:{}", output))
        .unwrap();
    assert_eq!(report.mode, RunMode::Table);
    assert_eq!(report.processed, 3);
    assert!(report.succeeded());

    assert_eq!(
        read_table(&format!("ark:{}", output)),
        owned(&[("a", &[10.0, 10.0]), ("b", &[20.0, 20.0]), ("c", &[30.0, 30.0])])
    );
}

#[test]
fn stored_order_is_not_resorted() {
    let s = Scratch::new();
    let (input, output) = (s.path("in.ark"), s.path("out.ark"));
    let entries: &[(&str, &[f32])] = &[("z", &[1.0]), ("m", &[2.0]), ("a", &[3.0])];
    write_table(&format!("ark,t:{}", input), entries);

    scaled_by(1.0)
        .run(&format!("ark:{}", input), &format!("ark,t:{}", output))
        .unwrap();
    assert_eq!(read_table(&format!("ark:{}", output)), owned(entries));
}

#[test]
fn sorted_option_rejects_unsorted_archive() {
    let s = Scratch::new();
    let (input, output) = (s.path("in.ark"), s.path("out.ark"));
    write_table(&format!("ark:{}", input), &[("b", &[1.0]), ("a", &[2.0])]);

    let err = scaled_by(2.0)
        .run(&format!("s,ark:{}", input), &format!("ark,t:{}", output))
        .unwrap_err();
    assert_eq!(err.kind(), vecscale::ErrorKind::Archive);
    // The entry before the violation was already written.
    assert_eq!(read_table(&format!("ark:{}", output)), owned(&[("b", &[2.0])]));
}

#[test]
fn sorted_option_accepts_sorted_archive() {
    let s = Scratch::new();
    let (input, output) = (s.path("in.ark"), s.path("out.ark"));
    write_table(&format!("ark:{}", input), ABC);

    let report = scaled_by(1.0)
        .run(&format!("s,cs,ark:{}", input), &format!("ark:{}", output))
        .unwrap();
    assert_eq!(report.processed, 3);
}

#[test]
fn indexed_archive_round_trips_through_script() {
    let s = Scratch::new();
    let input = s.path("in.ark");
    let (out_ark, out_scp) = (s.path("out.ark"), s.path("out.scp"));
    write_table(&format!("ark:{}", input), ABC);

    scaled_by(0.5)
        .run(&format!("ark:{}", input), &format!("ark,scp:{},{}", out_ark, out_scp))
        .unwrap();

    let expected = owned(&[("a", &[0.5, 0.5]), ("b", &[1.0, 1.0]), ("c", &[1.5, 1.5])]);
    assert_eq!(read_table(&format!("scp:{}", out_scp)), expected);
    assert_eq!(read_table(&format!("ark:{}", out_ark)), expected);
}

#[test]
fn script_input_into_script_output() {
    let s = Scratch::new();
    let (src_ark, src_scp) = (s.path("src.ark"), s.path("src.scp"));
    write_table(&format!("ark,scp:{},{}", src_ark, src_scp), ABC);

    // Output script routes each key to its own file.
    let targets = s.path("targets.scp");
    let lines: String = ["a", "b", "c"]
        .iter()
        .map(|k| format!("{} {}\n", k, s.path(&format!("{}.vec", k))))
        .collect();
    std::fs::write(&targets, lines).unwrap();

    let report = scaled_by(-1.0)
        .run(&format!("scp:{}", src_scp), &format!("scp:{}", targets))
        .unwrap();
    assert_eq!(report.processed, 3);
    assert_eq!(
        read_table(&format!("scp:{}", targets)),
        owned(&[("a", &[-1.0, -1.0]), ("b", &[-2.0, -2.0]), ("c", &[-3.0, -3.0])])
    );
}

#[test]
fn permissive_script_skips_missing_entries() {
    let s = Scratch::new();
    let good = s.path("good.ark");
    write_table(&format!("ark:{}", good), &[("ok", &[4.0])]);
    let script = s.path("in.scp");
    std::fs::write(
        &script,
        format!("gone {}\nok {}:3\n", s.path("missing.vec"), good),
    )
    .unwrap();
    let output = s.path("out.ark");

    let strict = scaled_by(1.0).run(&format!("scp:{}", script), &format!("ark:{}", output));
    assert!(strict.is_err());

    let report = scaled_by(1.0)
        .run(&format!("p,scp:{}", script), &format!("ark:{}", output))
        .unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(read_table(&format!("ark:{}", output)), owned(&[("ok", &[4.0])]));
}

#[test]
fn permissive_archive_stops_at_corruption() {
    let s = Scratch::new();
    let input = s.path("in.ark");
    write_table(&format!("ark,t:{}", input), &[("a", &[1.0])]);
    let mut bytes = std::fs::read(&input).unwrap();
    bytes.extend_from_slice(b"b [ 1 oops ]\n");
    std::fs::write(&input, bytes).unwrap();
    let output = s.path("out.ark");

    let err = scaled_by(1.0)
        .run(&format!("ark:{}", input), &format!("ark:{}", output))
        .unwrap_err();
    assert_eq!(err.kind(), vecscale::ErrorKind::Format);

    let report = scaled_by(1.0)
        .run(&format!("p,ark:{}", input), &format!("ark:{}", output))
        .unwrap();
    assert_eq!(report.processed, 1);
}

#[test]
fn empty_archive_counts_as_unsuccessful() {
    let s = Scratch::new();
    let input = s.path("empty.ark");
    std::fs::write(&input, "\n\n").unwrap();

    let report = scaled_by(1.0)
        .run(&format!("ark:{}", input), &format!("ark:{}", s.path("out.ark")))
        .unwrap();
    assert_eq!(report.processed, 0);
    assert!(!report.succeeded());
}
