use mcf_logger::{Logger, LoggingConfig, RotationPolicy};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn config_driven_json_file_output() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let config = LoggingConfig {
        name: "mcf-file".into(),
        level: "debug".into(),
        console: false,
        path: Some(log_dir.clone()),
        json: true,
        rotation: RotationPolicy::Never,
        max_files: 2,
        ..LoggingConfig::default()
    };

    let logger = Logger::from_config(&config)?;
    assert!(logger.has_file_output());

    tracing::info!(envelope = "AES-GCM", "sealed payload");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    let line = contents
        .lines()
        .find(|line| line.contains("sealed payload"))
        .expect("event should be written");
    assert!(line.starts_with('{'), "file output should be JSON: {line}");
    assert!(line.contains("\"envelope\":\"AES-GCM\""));

    Ok(())
}
