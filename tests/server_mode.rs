use datagrid::source::{JsonFileSource, MemorySource};
use datagrid::table::{
    ColumnDef, Event, FetchFuture, FetchParams, FetchResult, PaginationMode, TableController, TableOptions,
};
use datagrid::ui::BodyState;
use datagrid::GridError;
use futures_util::FutureExt;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

fn columns() -> Vec<ColumnDef<Value>> {
    vec![
        ColumnDef::keyed("name", "Name").sortable().filterable(),
        ColumnDef::keyed("status", "Status").filterable(),
    ]
}

fn rows(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| json!({"name": format!("Row {i:02}"), "status": if i < 3 { "Closed" } else { "Open" }}))
        .collect()
}

fn names(controller: &TableController<Value>) -> Vec<String> {
    controller
        .state()
        .rows()
        .iter()
        .map(|row| row["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn rejected_fetch_keeps_the_previous_rows() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let source = move |_params: FetchParams| -> FetchFuture<Value> {
        let call = counter.fetch_add(1, Ordering::SeqCst);
        async move {
            if call == 0 {
                Ok(FetchResult::page(vec![json!({"name": "Alpha"}), json!({"name": "Beta"})], 30))
            } else {
                Err(GridError::Fetch("backend unavailable".to_string()))
            }
        }
        .boxed()
    };

    let mut controller = TableController::server(columns(), source, TableOptions::default()).unwrap();
    controller.load().await.unwrap();
    controller.dispatch(Event::NextPage).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(names(&controller), vec!["Alpha", "Beta"]);
    assert_eq!(controller.state().error(), Some("backend unavailable"));

    let vm = controller.view();
    assert_eq!(vm.error_banner.as_deref(), Some("backend unavailable"));
    assert!(matches!(vm.body, BodyState::Rows(rows) if rows.len() == 2));
}

#[tokio::test]
async fn first_load_failure_shows_the_error_body() {
    let source = |_params: FetchParams| -> FetchFuture<Value> {
        async { Err(GridError::Fetch("no such table".to_string())) }.boxed()
    };

    let mut controller = TableController::server(columns(), source, TableOptions::default()).unwrap();
    controller.load().await.unwrap();

    match controller.view().body {
        BodyState::Error { message } => assert_eq!(message, "no such table"),
        other => panic!("expected error body, got {other:?}"),
    }
}

#[tokio::test]
async fn search_is_debounced_before_fetching() {
    let seen = Arc::new(Mutex::new(Vec::<FetchParams>::new()));
    let sink = Arc::clone(&seen);
    let source = move |params: FetchParams| -> FetchFuture<Value> {
        sink.lock().unwrap().push(params);
        async { Ok(FetchResult::page(vec![], 0)) }.boxed()
    };

    let mut controller = TableController::server(columns(), source, TableOptions::default()).unwrap();
    controller.load().await.unwrap();

    controller.dispatch(Event::SearchChanged("a".to_string())).await.unwrap();
    controller.dispatch(Event::SearchChanged("al".to_string())).await.unwrap();
    assert_eq!(seen.lock().unwrap().len(), 1);
    assert!(controller.state().fetch_pending());

    let later = Instant::now() + Duration::from_secs(1);
    controller.dispatch(Event::Tick(later)).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1].filters.global, "al");
    assert_eq!(seen[1].page, Some(1));
}

#[tokio::test]
async fn hidden_columns_are_left_out_of_server_search() {
    let source_rows = vec![
        json!({"name": "Alpha", "status": "Open", "note": "beta tester"}),
        json!({"name": "Beta", "status": "Open", "note": ""}),
    ];
    let mut columns = columns();
    columns.push(ColumnDef::keyed("note", "Note").hidden());

    let mut options = TableOptions::default();
    options.initial_filters.set_global("beta");

    let source = MemorySource::new(source_rows, columns.clone());
    let mut controller = TableController::server(columns, source, options).unwrap();
    controller.load().await.unwrap();

    assert_eq!(controller.state().fetch_params().search_columns, vec!["name", "status"]);
    assert_eq!(names(&controller), vec!["Beta"]);
}

#[tokio::test]
async fn memory_source_pages_by_cursor() {
    let options = TableOptions {
        pagination: PaginationMode::Cursor,
        page_size: 4,
        page_size_options: vec![4],
        ..TableOptions::default()
    };
    let source = MemorySource::new(rows(10), columns());
    let mut controller = TableController::server(columns(), source, options).unwrap();

    controller.load().await.unwrap();
    assert_eq!(names(&controller), vec!["Row 00", "Row 01", "Row 02", "Row 03"]);

    controller.dispatch(Event::NextPage).await.unwrap();
    controller.dispatch(Event::NextPage).await.unwrap();
    assert_eq!(names(&controller), vec!["Row 08", "Row 09"]);
    assert!(!controller.state().pagination.has_next(controller.state().total()));

    controller.dispatch(Event::PreviousPage).await.unwrap();
    assert_eq!(names(&controller)[0], "Row 04");
    assert_eq!(controller.state().pagination.page(), 2);
}

#[tokio::test]
async fn json_file_source_answers_filters() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.json");
    std::fs::write(&path, serde_json::to_string(&rows(12)).unwrap()).unwrap();

    let mut options = TableOptions::default();
    options.initial_filters.set_column("status", datagrid::table::FilterValue::text("Closed"));

    let source = JsonFileSource::new(&path, columns());
    let mut controller = TableController::server(columns(), source, options).unwrap();
    controller.load().await.unwrap();

    assert_eq!(controller.state().total(), 3);
    assert_eq!(names(&controller), vec!["Row 00", "Row 01", "Row 02"]);
}
