//! cna_report: pure report document model + multi-format export engine.
//!
//! Determinism rules:
//! - No network, no I/O here. Callers supply the document already in-memory
//!   and an explicit `ExportContext` (generation date + organisation label),
//!   so two exports of the same inputs produce the same bytes.
//! - Stable section order: every format preserves document order.
//! - Filenames follow `<slug(title)>-report-<YYYY-MM-DD>.<ext>`.
//!
//! Page-oriented formats (PDF, DOCX, XLSX) are driven against narrow
//! renderer traits (`PdfCanvas`, `DocxBuilder`, `WorkbookWriter`). The engine
//! owns every layout decision (pagination, orientation transitions, sheet
//! naming, column widths); the injected implementation only draws. Text
//! formats (JSON, CSV, tab-separated) are produced in-crate.

#![forbid(unsafe_code)]

use chrono::NaiveDate;
use thiserror::Error;

pub mod filename;
pub mod structure;

#[cfg(feature = "export-csv")]
pub mod render_csv;
#[cfg(feature = "export-docx")]
pub mod render_docx;
#[cfg(feature = "export-json")]
pub mod render_json;
#[cfg(feature = "export-pdf")]
pub mod render_pdf;
#[cfg(feature = "export-sheets")]
pub mod render_sheets;
#[cfg(feature = "export-xlsx")]
pub mod render_xlsx;

pub use filename::{export_filename, slug};
pub use structure::{
    CellValue, ContentBlock, HeadingAccent, ImageBlock, Orientation, ReportDocument,
    ReportSection, TableBlock,
};

#[cfg(feature = "export-csv")]
pub use render_csv::export_to_csv;
#[cfg(feature = "export-docx")]
pub use render_docx::{export_to_docx, DocxBuilder, IMAGE_SCALE};
#[cfg(feature = "export-json")]
pub use render_json::export_to_json;
#[cfg(feature = "export-pdf")]
pub use render_pdf::{export_to_pdf, PageSize, PdfCanvas, TextStyle};
#[cfg(feature = "export-sheets")]
pub use render_sheets::{copy_for_sheets, tab_separated, Clipboard};
#[cfg(feature = "export-xlsx")]
pub use render_xlsx::{
    export_to_xlsx, plan_workbook, SheetPlan, WorkbookPlan, WorkbookWriter, MAX_SHEET_NAME_LEN,
};

// ===== Errors =====

/// Export failure taxonomy. Every variant aborts only the current export;
/// nothing here is fatal to the process and no exporter retries internally.
#[derive(Debug, Error)]
pub enum ExportError {
    /// An export was requested before its source document was constructed.
    #[error("report data is not ready yet")]
    DataNotReady,

    /// CSV/clipboard export against a document with no table content.
    #[error("the report contains no tabular data")]
    NoTabularData,

    /// A required rendering capability failed to initialize. The specific
    /// export is abandoned; other formats remain usable.
    #[error("renderer unavailable: {0}")]
    RendererUnavailable(String),

    /// Clipboard write rejected by the runtime context.
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    /// Byte-level serialization failed (JSON/CSV writer errors).
    #[error("serialization failed: {0}")]
    Serialize(String),
}

#[cfg(feature = "export-json")]
impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Serialize(e.to_string())
    }
}

#[cfg(feature = "export-csv")]
impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        ExportError::Serialize(e.to_string())
    }
}

// ===== Shared export surface =====

/// A fully-formed export payload. How the bytes reach the user (download,
/// file write, clipboard) is the caller's concern; producing correct bytes
/// atomically is this crate's.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExportArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Caller-supplied context shared by every exporter: the generation date
/// (filename + footer stamp) and the organisation label (headers/footers).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExportContext {
    pub generated_on: NaiveDate,
    pub organisation: String,
}

impl ExportContext {
    /// Context pinned to an explicit date (deterministic; used in tests and
    /// anywhere reproducible output matters).
    pub fn on(generated_on: NaiveDate, organisation: impl Into<String>) -> Self {
        Self {
            generated_on,
            organisation: organisation.into(),
        }
    }

    /// Context stamped with today's UTC date.
    pub fn today(organisation: impl Into<String>) -> Self {
        Self::on(chrono::Utc::now().date_naive(), organisation)
    }
}

/// The `DataNotReady` boundary: callers whose upstream data may still be
/// loading hold an `Option<ReportDocument>` and pass it through here before
/// dispatching any exporter.
pub fn require_document(doc: Option<&ReportDocument>) -> Result<&ReportDocument, ExportError> {
    doc.ok_or(ExportError::DataNotReady)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_document_is_data_not_ready() {
        let err = require_document(None).unwrap_err();
        assert!(matches!(err, ExportError::DataNotReady));
    }

    #[test]
    fn present_document_passes_through() {
        let doc = ReportDocument::new("T");
        assert_eq!(require_document(Some(&doc)).unwrap().title, "T");
    }
}
