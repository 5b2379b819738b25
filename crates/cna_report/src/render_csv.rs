//! crates/cna_report/src/render_csv.rs
//! CSV export of the document's first table.
//!
//! Exactly one table is serialized: the first found scanning sections in
//! order, then blocks in order within each section. Every cell is
//! double-quote-enclosed (internal quotes doubled) so embedded commas and
//! newlines survive a standard CSV parse-back. A table-free document fails
//! with `NoTabularData`.

use csv::{QuoteStyle, WriterBuilder};

use crate::filename::export_filename;
use crate::structure::ReportDocument;
use crate::{ExportArtifact, ExportContext, ExportError};

pub fn export_to_csv(
    doc: &ReportDocument,
    ctx: &ExportContext,
) -> Result<ExportArtifact, ExportError> {
    let table = doc.first_table().ok_or(ExportError::NoTabularData)?;

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Serialize(e.to_string()))?;

    Ok(ExportArtifact {
        filename: export_filename(&doc.title, ctx.generated_on, "csv"),
        bytes,
    })
}
