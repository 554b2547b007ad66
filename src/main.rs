//! Command-line entry point.
//!
//! Loads a JSON row file into a table, applies the filters, sort and page
//! given on the command line, and prints one rendered frame.
//!
//! # Data Flow
//!
//! ```text
//! rows.json ──► Config::column_defs ──► TableController ──► render ──► stdout
//!                                          │
//!                                          └─ --server: JsonFileSource answers
//!                                             each fetch from the file
//! ```
//!
//! # Examples
//!
//! ```text
//! datagrid tickets.json --filter status=Closed --sort name:desc
//! datagrid tickets.json --config grid.toml --server --page 2 --page-size 25
//! datagrid tickets.json --search alp --theme catppuccin-latte --width 120
//! ```

use clap::Parser;
use datagrid::observability::init_tracing;
use datagrid::source::{load_rows, JsonFileSource};
use datagrid::table::{FilterState, FilterValue, PaginationMode, SearchMode, SortState};
use datagrid::{ColumnDef, Config, Event, GridError, Result, TableController, TableOptions};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "datagrid", version, about = "Render a JSON row file as a filtered, sorted, paged table")]
struct Cli {
    /// JSON file holding an array of row objects (or `{"rows": [...]}`).
    rows: PathBuf,

    /// TOML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Global search string.
    #[arg(long)]
    search: Option<String>,

    /// Column filter, repeatable. Ranges use `from..to`, multi-select uses `a|b`.
    #[arg(long = "filter", value_name = "COLUMN=VALUE")]
    filters: Vec<String>,

    /// Sort column, optionally suffixed with `:desc`.
    #[arg(long, value_name = "COLUMN[:desc]")]
    sort: Option<String>,

    /// One-based page to show.
    #[arg(long, default_value_t = 1)]
    page: usize,

    #[arg(long)]
    page_size: Option<usize>,

    /// Use cursor pagination instead of numbered pages.
    #[arg(long)]
    cursor: bool,

    /// Match the search string fuzzily.
    #[arg(long)]
    fuzzy: bool,

    /// Query the file through a data source, as a server-mode table would.
    #[arg(long)]
    server: bool,

    /// Built-in theme name.
    #[arg(long)]
    theme: Option<String>,

    /// Frame width in columns.
    #[arg(long, default_value_t = 100)]
    width: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(frame) => {
            print!("{frame}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("datagrid: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let mut config = cli.config.as_ref().map(Config::from_file).transpose()?.unwrap_or_default();
    if let Some(theme) = cli.theme.clone() {
        config.theme_name = Some(theme);
        config.theme_file = None;
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    if cli.cursor {
        config.pagination = PaginationMode::Cursor;
    }
    if cli.fuzzy {
        config.search_mode = SearchMode::Fuzzy;
    }

    init_tracing(&config);
    let _span = tracing::debug_span!("run", rows = %cli.rows.display(), server = cli.server).entered();

    let rows = load_rows(&cli.rows)?;
    let columns = config.column_defs(&rows);

    let mut options = TableOptions::from_config(&config);
    options.initial_filters = parse_filters(&columns, cli.search.as_deref(), &cli.filters)?;
    options.initial_sort = cli.sort.as_deref().map_or(SortState::Unsorted, parse_sort);

    let theme = config.load_theme();
    let runtime = tokio::runtime::Builder::new_current_thread().build()?;

    runtime.block_on(async {
        let mut controller = if cli.server {
            let source = JsonFileSource::new(&cli.rows, columns.clone()).with_search_mode(config.search_mode);
            TableController::server(columns, source, options)?
        } else {
            TableController::client(columns, rows, options)?
        };

        controller.load().await?;
        go_to_page(&mut controller, cli.page).await?;

        Ok::<_, GridError>(datagrid::ui::render(controller.state(), &theme, cli.width))
    })
}

/// Moves to a one-based page. Cursor tables can only step forward, so they
/// advance one page at a time until the source runs out.
async fn go_to_page(controller: &mut TableController<Value>, page: usize) -> Result<()> {
    if page <= 1 {
        return Ok(());
    }

    match controller.state().pagination.mode() {
        PaginationMode::Page => {
            controller.dispatch(Event::GoToPage(page)).await?;
        }
        PaginationMode::Cursor => {
            for _ in 1..page {
                if !controller.dispatch(Event::NextPage).await? {
                    break;
                }
            }
        }
    }
    Ok(())
}

fn parse_filters(columns: &[ColumnDef<Value>], search: Option<&str>, filters: &[String]) -> Result<FilterState> {
    let mut state = FilterState::default();
    if let Some(query) = search {
        state.set_global(query);
    }

    for filter in filters {
        let (column, input) = filter
            .split_once('=')
            .ok_or_else(|| GridError::Config(format!("filter '{filter}' must look like COLUMN=VALUE")))?;

        let kind = columns
            .iter()
            .find(|c| c.id == column)
            .and_then(ColumnDef::filter_kind)
            .ok_or_else(|| GridError::Column(format!("column '{column}' is not filterable")))?;
        let value = FilterValue::parse(kind, input)
            .ok_or_else(|| GridError::Config(format!("invalid value '{input}' for column '{column}'")))?;

        state.set_column(column, value);
    }
    Ok(state)
}

fn parse_sort(input: &str) -> SortState {
    match input.rsplit_once(':') {
        Some((field, direction)) if direction.eq_ignore_ascii_case("desc") => SortState::Desc(field.to_string()),
        Some((field, direction)) if direction.eq_ignore_ascii_case("asc") => SortState::Asc(field.to_string()),
        _ => SortState::Asc(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnDef<Value>> {
        vec![
            ColumnDef::keyed("name", "Name").sortable().filterable(),
            ColumnDef::keyed("score", "Score")
                .filter(datagrid::table::FilterSpec::number_range()),
            ColumnDef::keyed("note", "Note"),
        ]
    }

    #[test]
    fn sort_flags_parse() {
        assert_eq!(parse_sort("name"), SortState::Asc("name".to_string()));
        assert_eq!(parse_sort("name:desc"), SortState::Desc("name".to_string()));
        assert_eq!(parse_sort("name:ASC"), SortState::Asc("name".to_string()));
    }

    #[test]
    fn filters_are_parsed_by_column_kind() {
        let state = parse_filters(&columns(), Some("alp"), &["score=10..20".to_string()]).unwrap();

        assert_eq!(state.global, "alp");
        assert_eq!(
            state.column("score"),
            Some(&FilterValue::NumberRange { min: Some(10.0), max: Some(20.0) })
        );
    }

    #[test]
    fn bad_filters_are_rejected() {
        assert!(matches!(
            parse_filters(&columns(), None, &["name".to_string()]),
            Err(GridError::Config(_))
        ));
        assert!(matches!(
            parse_filters(&columns(), None, &["note=x".to_string()]),
            Err(GridError::Column(_))
        ));
        assert!(matches!(
            parse_filters(&columns(), None, &["score=abc..".to_string()]),
            Err(GridError::Config(_))
        ));
    }
}
