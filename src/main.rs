use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use tokio_util::sync::CancellationToken;

use witsml_autoquery::config::{self, Config, LogLevel};
use witsml_autoquery::cursor::{self, CursorUpdate, GrowingObjectCursor};
use witsml_autoquery::session::{
    OptionsIn, QueryRequest, ReplayClient, SessionEvent, SessionSummary, StoreResponse,
    Transcript, spawn_session,
};
use witsml_autoquery::xml::Document;

/// Incremental auto-query for WITSML growing objects
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Incremental auto-query for WITSML growing objects (logs)"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the next query from a query and the result it produced
    Next {
        /// Query that produced the result
        #[arg(long)]
        query: PathBuf,
        /// Result returned by the store
        #[arg(long)]
        result: PathBuf,
        /// Object type (defaults to the singular of the query root, e.g. logs -> log)
        #[arg(long)]
        object_type: Option<String>,
        /// Explain on stderr why no further query was produced
        #[arg(long)]
        explain: bool,
    },
    /// Run an auto-query session against recorded store responses
    Replay {
        /// Initial query
        #[arg(long)]
        query: PathBuf,
        /// TOML transcript of recorded responses
        #[arg(long)]
        transcript: PathBuf,
        #[arg(long)]
        object_type: Option<String>,
        /// OptionsIn for the initial request (e.g. "returnElements=all")
        #[arg(long)]
        options_in: Option<String>,
        /// Do not continue after partial results
        #[arg(long)]
        no_partial: bool,
        /// Stop after this many round trips (0 = unlimited)
        #[arg(long)]
        max_round_trips: Option<u32>,
        /// Print a JSON summary instead of the issued queries
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    // Load config early so the log level applies to everything after
    let config_result = config::load_config();
    init_logging(config_result.config.logging.level);
    if let Some(warning) = &config_result.warning {
        log::warn!("{}", warning);
    }

    let args = Args::parse();

    match args.command {
        Command::Next {
            query,
            result,
            object_type,
            explain,
        } => run_next(&query, &result, object_type, explain),
        Command::Replay {
            query,
            transcript,
            object_type,
            options_in,
            no_partial,
            max_round_trips,
            json,
        } => {
            let options = ReplayOptions {
                object_type,
                options_in,
                no_partial,
                max_round_trips,
                json,
            };
            run_replay(&query, &transcript, options, &config_result.config)
        }
    }
}

/// Initialize stderr logging; RUST_LOG overrides the configured level
fn init_logging(level: LogLevel) {
    use std::io::Write;

    env_logger::Builder::new()
        .filter_level(level.to_filter())
        .parse_default_env()
        .format(|buf, record| {
            use std::time::SystemTime;
            let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
            writeln!(
                buf,
                "[{}] [{}] {}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {}", path.display()))
}

/// Use the explicit object type, or infer it from the query root
fn resolve_object_type(explicit: Option<String>, query_xml: &str) -> Result<String> {
    match explicit {
        Some(object_type) => Ok(object_type),
        None => {
            let document = Document::parse(query_xml).wrap_err("Query is not valid XML")?;
            Ok(cursor::object_type_of(&document))
        }
    }
}

fn run_next(query: &Path, result: &Path, object_type: Option<String>, explain: bool) -> Result<()> {
    let query_xml = read_input(query)?;
    let result_xml = read_input(result)?;
    let object_type = resolve_object_type(object_type, &query_xml)?;

    let mut query_cursor = GrowingObjectCursor::new(object_type, query_xml);
    match query_cursor.next_query(&result_xml)? {
        CursorUpdate::Continue(next) => println!("{}", next),
        CursorUpdate::Stop(reason) => {
            if explain {
                eprintln!("No further query: {}", reason.description());
            }
        }
    }
    Ok(())
}

struct ReplayOptions {
    object_type: Option<String>,
    options_in: Option<String>,
    no_partial: bool,
    max_round_trips: Option<u32>,
    json: bool,
}

fn run_replay(
    query: &Path,
    transcript: &Path,
    options: ReplayOptions,
    config: &Config,
) -> Result<()> {
    let query_xml = read_input(query)?;
    let object_type = resolve_object_type(options.object_type, &query_xml)?;
    let client = ReplayClient::from_transcript(Transcript::load(transcript)?)?;

    let mut settings = config.auto_query.session_settings();
    if options.no_partial {
        settings.retrieve_partial_results = false;
    }
    if let Some(max_round_trips) = options.max_round_trips {
        settings.max_round_trips = max_round_trips;
    }
    let options_in = options
        .options_in
        .as_deref()
        .map(OptionsIn::parse)
        .unwrap_or_else(|| config.auto_query.default_options());

    let request = QueryRequest::new(1, object_type, query_xml, options_in);
    let (event_tx, event_rx) = channel();
    let handle = spawn_session(
        client,
        request,
        settings,
        CancellationToken::new(),
        event_tx,
    );

    let mut round_trips = Vec::new();
    let mut summary = None;
    let mut failure = None;
    for event in event_rx {
        match event {
            SessionEvent::RoundTrip { request, response } => {
                if !options.json {
                    print_round_trip(&request, &response);
                }
                round_trips.push((request, response));
            }
            SessionEvent::Finished(finished) => summary = Some(finished),
            SessionEvent::Failed { message } => failure = Some(message),
        }
    }
    handle
        .join()
        .map_err(|_| eyre!("Auto-query worker thread panicked"))?;

    if let Some(message) = failure {
        return Err(eyre!(message));
    }
    let summary = summary.ok_or_else(|| eyre!("Auto-query session ended without a summary"))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&json_report(&summary, &round_trips))?);
    } else {
        println!(
            "# {} after {} round trips",
            summary.outcome.as_str(),
            summary.round_trips
        );
    }
    Ok(())
}

fn print_round_trip(request: &QueryRequest, response: &StoreResponse) {
    println!(
        "# request {}{} options_in=\"{}\" -> {}",
        request.request_id,
        if request.is_partial_query { " (partial)" } else { "" },
        request.options_in,
        response.return_code
    );
    println!("{}", request.query_xml);
}

fn json_report(
    summary: &SessionSummary,
    round_trips: &[(QueryRequest, StoreResponse)],
) -> serde_json::Value {
    let requests: Vec<serde_json::Value> = round_trips
        .iter()
        .map(|(request, response)| {
            serde_json::json!({
                "request_id": request.request_id,
                "partial": request.is_partial_query,
                "options_in": request.options_in.to_string(),
                "query": request.query_xml,
                "return_code": response.return_code,
                "status": response.status(),
                "message": response.message,
            })
        })
        .collect();

    serde_json::json!({
        "summary": summary,
        "requests": requests,
    })
}
