use rstest::rstest;
use servo_config::{load_file, load_toml};
use std::fs;
use tempfile::tempdir;

#[rstest]
#[case("[output]\nnum = 0\n", "output.num must be in the range 1-2")]
#[case("[output]\nnum = 3\n", "output.num must be in the range 1-2")]
#[case("[input]\nmin = 1.0\nmax = 1.0\n", "input.min should be less than input.max")]
#[case("[input]\nmin = 5.0\nmax = -5.0\n", "input.min should be less than input.max")]
#[case("[input]\nmin = -inf\nmax = 1.0\n", "must be finite")]
#[case("[pulse]\nmin_us = 2000\nmax_us = 1000\n", "pulse.min_us should be less than pulse.max_us")]
#[case("[pulse]\nmin_us = 1000\nmax_us = 25000\n", "output period")]
#[case("[motion]\nmove_interval_ms = 0\n", "motion.move_interval_ms must be >= 1")]
#[case("[motion]\nsettle_ms = 600000\n", "settle_ms is unreasonably large")]
fn rejects_invalid_values(#[case] toml: &str, #[case] needle: &str) {
    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("config should be rejected");
    assert!(
        err.to_string().contains(needle),
        "error {err:?} should mention {needle:?}"
    );
}

#[test]
fn accepts_full_valid_config() {
    let toml = r#"
[output]
num = 2
dry_run = true

[motion]
move_interval_ms = 10
max_move_ms = 0
settle_ms = 0

[input]
min = -90.0
max = 90.0

[pulse]
min_us = 500
max_us = 2500

[logging]
level = "debug"
rotation = "daily"
"#;

    let cfg = load_toml(toml).expect("parse TOML");
    cfg.validate().expect("valid config should pass");
    assert_eq!(cfg.output.num, 2);
    assert!(cfg.output.dry_run);
    assert_eq!(cfg.motion.max_move_ms, 0);
    assert_eq!(cfg.logging.level.as_deref(), Some("debug"));
}

#[test]
fn unknown_field_types_fail_to_parse() {
    let err = load_toml("[output]\nnum = \"one\"\n").expect_err("string is not a u8");
    assert!(err.to_string().contains("num"));
}

#[test]
fn load_file_reads_and_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("servo.toml");
    fs::write(&path, "[motion]\nmove_interval_ms = 20\n").unwrap();
    let cfg = load_file(&path).expect("load");
    assert_eq!(cfg.motion.move_interval_ms, 20);

    let missing = dir.path().join("missing.toml");
    let err = load_file(&missing).expect_err("missing file");
    assert!(format!("{err}").contains("missing.toml"));
}
