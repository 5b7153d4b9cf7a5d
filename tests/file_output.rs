//! Tests for the rotating file sink.

mod common;

use chrono::{Local, NaiveDate};
use common::{entries, value};
use reqlog::output::log_file_name;
use reqlog::{Engine, FileOutput, Level, Logger, RotationPolicy};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn file_name_carries_the_date() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    assert_eq!(log_file_name(date), "logger-2024-03-07.log");
}

#[test]
fn in_dir_creates_missing_directories() {
    let tmp_dir = TempDir::new().unwrap();
    let dir = tmp_dir.path().join("nested").join("logs");

    let output = FileOutput::in_dir(&dir, RotationPolicy::default());

    assert!(dir.is_dir());
    assert_eq!(
        output.path(),
        dir.join(log_file_name(Local::now().date_naive())).as_path()
    );
}

#[test]
fn falls_back_to_current_directory() {
    let tmp_dir = TempDir::new().unwrap();
    let blocker = tmp_dir.path().join("not-a-dir");
    fs::write(&blocker, "occupied").unwrap();

    let output = FileOutput::in_dir(blocker.join("logs"), RotationPolicy::default());

    assert_eq!(
        output.path(),
        PathBuf::from(".")
            .join(log_file_name(Local::now().date_naive()))
            .as_path()
    );
}

#[test]
fn policy_is_kept() {
    let tmp_dir = TempDir::new().unwrap();
    let policy = RotationPolicy {
        max_size: 2048,
        max_backups: 1,
        max_age_days: 2,
        compress: false,
    };

    let output = FileOutput::at_path(tmp_dir.path().join("app.log"), policy);
    assert_eq!(output.policy(), policy);
}

#[test]
fn nothing_is_created_before_first_record() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("lazy.log");

    let _output = FileOutput::at_path(&path, RotationPolicy::default());
    assert!(!path.exists());
}

#[test]
fn records_append_as_json_lines() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("app.log");
    let engine = Engine::builder()
        .level(Level::Info)
        .file()
        .path(&path)
        .done()
        .build();
    let logger = Logger::from_engine(engine);

    logger.debug("filtered").send();
    logger.info("first").data("n", 1).send();
    logger.warn("second").send();
    logger.flush().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(value(lines[0], "msg"), Some(json!("first")));
    assert_eq!(value(lines[0], "n"), Some(json!(1)));
    assert_eq!(value(lines[1], "level"), Some(json!("WARN")));
    assert!(content.ends_with('\n'));
}

#[test]
fn existing_file_is_appended_to() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("app.log");
    fs::write(&path, "{\"msg\":\"earlier\"}\n").unwrap();

    let logger = Logger::from_engine(Engine::builder().file().path(&path).done().build());
    logger.info("later").send();
    logger.shutdown();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(entries(lines[0]), vec![("msg".to_string(), json!("earlier"))]);
    assert_eq!(value(lines[1], "msg"), Some(json!("later")));
}
