use std::path::PathBuf;

use slotbook_cli::config::{parse_log_level, session_file};
use tracing::Level;

#[test]
fn test_session_file_explicit_path_wins() {
    let path = session_file(Some("/tmp/session.json".to_string()), Some(PathBuf::from("/home/ana")));
    assert_eq!(path, PathBuf::from("/tmp/session.json"));
}

#[test]
fn test_session_file_under_home() {
    let path = session_file(None, Some(PathBuf::from("/home/ana")));
    assert_eq!(path, PathBuf::from("/home/ana/.slotbook/current_user.json"));

    let blank = session_file(Some("  ".to_string()), Some(PathBuf::from("/home/ana")));
    assert_eq!(blank, path);
}

#[test]
fn test_session_file_without_home() {
    assert_eq!(session_file(None, None), PathBuf::from(".slotbook/current_user.json"));
}

#[test]
fn test_log_level() {
    assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level(" WARN ").unwrap(), Level::WARN);
    assert!(parse_log_level("loud").is_err());
}
