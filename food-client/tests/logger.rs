use food_client::logger::init_logger;

#[test]
fn test_init_logger_writes_rotating_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_dir = dir.path().join("logs");

    init_logger("info", true, Some(&log_dir)).unwrap();
    tracing::info!(food_id = 1, "logger smoke test");

    let files: Vec<_> = std::fs::read_dir(&log_dir)
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert!(files.iter().any(|f| f.starts_with("food-client")), "{files:?}");

    // A second subscriber cannot be installed
    assert!(init_logger("info", false, None).is_err());
}
