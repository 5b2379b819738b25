// crates/cna_cli/src/main.rs
//
// Wires up: exit codes, typed error mapping, CLI parsing, input loading
// (survey responses or a prebuilt report document), report building, export
// dispatch, and atomic artifact writes. The library crates stay logging-free;
// all logging lives here.

mod args;
mod report_builder;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const DATA_NOT_READY: i32 = 3;
    pub const IO: i32 = 4;
    pub const EXPORT: i32 = 5;
}

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use args::{parse_and_validate as parse_cli, Args};
use cna_core::SurveyResponse;
use cna_report::{
    copy_for_sheets, export_to_csv, export_to_json, require_document, Clipboard, ExportArtifact,
    ExportContext, ExportError, ReportDocument,
};
use report_builder::build_statistics_report;

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Argument/shape/contract failures (bad JSON shape, aggregation contract)
    Validation(String),
    /// Export requested before the source document was constructed
    DataNotReady,
    /// Filesystem errors (read/write/persist)
    Io(String),
    /// Export failures (no tabular data, renderer/clipboard unavailable)
    Export(String),
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("cna: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    let rc = match run_once(&args) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("cna: error: {}", describe(&e));
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

fn run_once(args: &Args) -> Result<(), MainError> {
    let document = load_document(args)?;

    if args.validate_only {
        if !args.quiet {
            println!("inputs OK");
        }
        return Ok(());
    }

    let doc = require_document(document.as_ref()).map_err(from_export)?;
    let ctx = ExportContext::today(args.org.clone());

    match args.format.as_str() {
        "json" => write_artifact(args, export_to_json(doc, &ctx).map_err(from_export)?),
        "csv" => write_artifact(args, export_to_csv(doc, &ctx).map_err(from_export)?),
        "sheets" => {
            // The CLI's "clipboard" is stdout: the payload is paste-ready.
            let mut clipboard = StdoutClipboard;
            let message = copy_for_sheets(doc, &mut clipboard).map_err(from_export)?;
            log::info!("{message}");
            Ok(())
        }
        // The page-oriented renderers are injected by embedding applications;
        // none is linked into this CLI build.
        "pdf" | "docx" | "xlsx" => Err(from_export(ExportError::RendererUnavailable(format!(
            "no {} renderer is linked into this build",
            args.format
        )))),
        other => Err(MainError::Validation(format!("unknown format: {other}"))),
    }
}

/// Load the report document from either input mode. A `--document` file
/// containing JSON `null` means the upstream data was not ready.
fn load_document(args: &Args) -> Result<Option<ReportDocument>, MainError> {
    if let Some(path) = &args.document {
        return parse_json::<Option<ReportDocument>>(path);
    }

    // --responses mode; combination rules were enforced at parse time.
    let (responses_path, officer_count) = match (&args.responses, args.officers) {
        (Some(path), Some(count)) => (path, count),
        _ => {
            return Err(MainError::Validation(
                "--responses and --officers are required".to_string(),
            ))
        }
    };
    let responses: Vec<SurveyResponse> = parse_json(responses_path)?;
    let labels: BTreeMap<String, String> = match &args.labels {
        Some(path) => parse_json(path)?,
        None => BTreeMap::new(),
    };

    let doc = build_statistics_report(&args.title, &responses, officer_count, &labels)
        .map_err(|e| MainError::Validation(e.to_string()))?;
    log::info!(
        "aggregated {} responses into {} sections",
        responses.len(),
        doc.sections.len().saturating_sub(1)
    );
    Ok(Some(doc))
}

fn parse_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, MainError> {
    let bytes = std::fs::read(path)
        .map_err(|e| MainError::Io(format!("{}: {e}", path.display())))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| MainError::Validation(format!("{}: {e}", path.display())))
}

/// Write the artifact atomically: a temp file in the destination directory,
/// persisted to its final name only once fully written. A failed export
/// never leaves a truncated file behind.
fn write_artifact(args: &Args, artifact: ExportArtifact) -> Result<(), MainError> {
    std::fs::create_dir_all(&args.out).map_err(|e| MainError::Io(e.to_string()))?;
    let mut tmp =
        tempfile::NamedTempFile::new_in(&args.out).map_err(|e| MainError::Io(e.to_string()))?;
    tmp.write_all(&artifact.bytes)
        .map_err(|e| MainError::Io(e.to_string()))?;

    let dest = args.out.join(&artifact.filename);
    tmp.persist(&dest).map_err(|e| MainError::Io(e.to_string()))?;

    log::info!("wrote {}", dest.display());
    if !args.quiet {
        println!("{}", dest.display());
    }
    Ok(())
}

/// Stdout-backed clipboard for the CLI context: the tab-separated payload is
/// emitted for piping or terminal paste.
struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(text.as_bytes())
            .and_then(|()| stdout.write_all(b"\n"))
            .map_err(|e| e.to_string())
    }
}

fn from_export(e: ExportError) -> MainError {
    match e {
        ExportError::DataNotReady => MainError::DataNotReady,
        other => MainError::Export(other.to_string()),
    }
}

fn describe(e: &MainError) -> String {
    match e {
        MainError::Validation(msg) => msg.clone(),
        MainError::DataNotReady => "report data is not ready yet".to_string(),
        MainError::Io(msg) => msg.clone(),
        MainError::Export(msg) => msg.clone(),
    }
}

fn map_error(e: &MainError) -> i32 {
    match e {
        MainError::Validation(_) => exitcodes::VALIDATION,
        MainError::DataNotReady => exitcodes::DATA_NOT_READY,
        MainError::Io(_) => exitcodes::IO,
        MainError::Export(_) => exitcodes::EXPORT,
    }
}
