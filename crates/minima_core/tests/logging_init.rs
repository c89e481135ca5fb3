use minima_core::{init_logging, logging_status};

#[test]
fn init_logging_is_idempotent_and_rejects_reconfiguration() {
    let log_dir = tempfile::tempdir().unwrap();
    let other_dir = tempfile::tempdir().unwrap();
    let log_dir_str = log_dir.path().to_str().unwrap().to_string();
    let other_dir_str = other_dir.path().to_str().unwrap().to_string();

    init_logging("info", &log_dir_str).expect("first init should succeed");
    init_logging("INFO", &log_dir_str).expect("same config should be idempotent");

    let level_error = init_logging("debug", &log_dir_str).expect_err("level conflict should fail");
    assert!(level_error.contains("refusing to switch"));

    let dir_error = init_logging("info", &other_dir_str).expect_err("dir conflict should fail");
    assert!(dir_error.contains("refusing to switch"));

    let (active_level, active_dir) = logging_status().expect("logging should be active");
    assert_eq!(active_level, "info");
    assert_eq!(active_dir, log_dir.path());

    let relative = init_logging("info", "logs/dev").expect_err("relative dir should fail");
    assert!(relative.contains("absolute"));
}
