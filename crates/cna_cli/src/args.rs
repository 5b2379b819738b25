// crates/cna_cli/src/args.rs
//
// Offline CLI argument parsing surface.
//
// Rules:
// - Exactly one input mode: --document XOR (--responses + --officers)
// - --labels is only meaningful with --responses
// - Output: --out dir, --format (one of the six export formats)
// - --validate-only loads and shape-checks inputs without exporting

use clap::Parser;
use std::path::PathBuf;

pub const FORMATS: [&str; 6] = ["json", "csv", "sheets", "pdf", "docx", "xlsx"];

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "cna",
    disable_help_subcommand = true,
    about = "Offline CLI for the CNA reporting engine"
)]
pub struct Args {
    // --- Input mode selection ---
    /// Prebuilt report document JSON (mutually exclusive with survey flags).
    /// A JSON `null` means the upstream data was not ready.
    #[arg(long, conflicts_with_all = ["responses", "officers", "labels"])]
    pub document: Option<PathBuf>,

    /// Survey responses JSON: an array of {question_code, current_score}.
    #[arg(long)]
    pub responses: Option<PathBuf>,
    /// Officers in scope (the response-rate denominator).
    #[arg(long, requires = "responses")]
    pub officers: Option<u32>,
    /// Question code → label lookup JSON (object of strings).
    #[arg(long, requires = "responses")]
    pub labels: Option<PathBuf>,

    // --- Report shaping ---
    /// Report title (also the export filename stem).
    #[arg(long, default_value = "Capability Needs Analysis")]
    pub title: String,
    /// Organisation label for headers/footers.
    #[arg(long, default_value = "Public Service Division")]
    pub org: String,

    // --- Output ---
    /// Export format.
    #[arg(long, value_parser = FORMATS, default_value = "json")]
    pub format: String,
    /// Output directory (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    // --- Control ---
    /// Load and shape-check inputs only; do not export.
    #[arg(long)]
    pub validate_only: bool,

    /// Suppress non-essential stdout output.
    #[arg(long)]
    pub quiet: bool,
}

/// Errors surfaced by argument validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    Missing(&'static str),
    BadCombo(&'static str),
}

impl core::fmt::Display for CliError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CliError::Missing(what) => write!(f, "missing required flag: {what}"),
            CliError::BadCombo(what) => write!(f, "invalid flag combination: {what}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Parse argv and enforce the combination rules clap cannot express.
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

fn validate(args: Args) -> Result<Args, CliError> {
    match (&args.document, &args.responses) {
        (None, None) => Err(CliError::Missing("--document or --responses")),
        (Some(_), Some(_)) => Err(CliError::BadCombo("--document excludes --responses")),
        (None, Some(_)) if args.officers.is_none() => {
            Err(CliError::Missing("--officers (required with --responses)"))
        }
        _ => Ok(args),
    }
}
