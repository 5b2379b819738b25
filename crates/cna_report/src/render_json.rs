//! crates/cna_report/src/render_json.rs
//! Lossless JSON export of the whole document (pretty-printed).
//!
//! This is the one format that round-trips the full model; the test suites
//! use it as the reference when checking the other exporters' fidelity.

use crate::filename::export_filename;
use crate::structure::ReportDocument;
use crate::{ExportArtifact, ExportContext, ExportError};

pub fn export_to_json(
    doc: &ReportDocument,
    ctx: &ExportContext,
) -> Result<ExportArtifact, ExportError> {
    let bytes = serde_json::to_vec_pretty(doc)?;
    Ok(ExportArtifact {
        filename: export_filename(&doc.title, ctx.generated_on, "json"),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{CellValue, ContentBlock, ReportSection, TableBlock};
    use chrono::NaiveDate;

    #[test]
    fn round_trips_the_full_document() {
        let mut doc = ReportDocument::new("Round Trip");
        let mut s = ReportSection::new("S1");
        s.content.push(ContentBlock::Text { text: "line1\n\nline3".into() });
        s.content.push(ContentBlock::Table(TableBlock {
            headers: vec!["A".into(), "B".into()],
            rows: vec![vec![CellValue::from(1), CellValue::from("x")]],
        }));
        doc.sections.push(s);

        let ctx = ExportContext::on(NaiveDate::from_ymd_opt(2026, 8, 27).unwrap(), "Org");
        let artifact = export_to_json(&doc, &ctx).unwrap();
        assert_eq!(artifact.filename, "round-trip-report-2026-08-27.json");

        let parsed: ReportDocument = serde_json::from_slice(&artifact.bytes).unwrap();
        assert_eq!(parsed, doc);
    }
}
