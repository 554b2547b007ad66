use datagrid::observability::{init_tracing, LOG_FILE_NAME};
use datagrid::table::{FilterKind, PaginationMode, SearchMode, TableOptions};
use datagrid::{Config, GridError};
use std::fs;
use std::time::Duration;

#[test]
fn toml_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.toml");
    fs::write(
        &path,
        r#"
title = "Tickets"
pagination = "cursor"
page_size = 25
page_size_options = [25, 50]
search_mode = "fuzzy"
debounce_ms = 150

[[columns]]
id = "status"
header = "Status"
filter = "multi_select"
options = ["Open", "Closed"]

[[columns]]
id = "owner"
field = "owner.name"
sortable = true
hidden = true
"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.title, "Tickets");
    assert_eq!(config.pagination, PaginationMode::Cursor);
    assert_eq!(config.search_mode, SearchMode::Fuzzy);
    assert_eq!(config.columns.len(), 2);
    assert!(config.trace_level.is_none());

    let options = TableOptions::from_config(&config);
    assert_eq!(options.page_size, 25);
    assert_eq!(options.page_size_options, vec![25, 50]);
    assert_eq!(options.debounce, Duration::from_millis(150));

    let columns = config.column_defs(&[]);
    assert_eq!(columns[0].filter_kind(), Some(FilterKind::MultiSelect));
    assert!(columns[1].sortable && columns[1].hidden);
    assert_eq!(columns[1].value(&serde_json::json!({"owner": {"name": "Ada"}})).to_string(), "Ada");
}

#[test]
fn invalid_files_are_config_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.toml");

    fs::write(&path, "page_size = \"many\"").unwrap();
    assert!(matches!(Config::from_file(&path), Err(GridError::Config(_))));

    fs::write(&path, "page_size = 0").unwrap();
    assert!(matches!(Config::from_file(&path), Err(GridError::Config(_))));

    assert!(matches!(Config::from_file(dir.path().join("missing.toml")), Err(GridError::Io(_))));
}

#[test]
fn tracing_writes_to_the_log_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        trace_level: Some("debug".to_string()),
        log_dir: Some(dir.path().display().to_string()),
        ..Config::default()
    };

    init_tracing(&config);
    tracing::info!("grid ready");

    let log = fs::read_to_string(dir.path().join(LOG_FILE_NAME)).unwrap();
    assert!(log.contains("grid ready"));
}
