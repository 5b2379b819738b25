//! crates/cna_report/src/render_sheets.rs
//! Clipboard export for direct paste into spreadsheet UIs.
//!
//! Same first-table discovery as CSV, but tab-separated and written to a
//! clipboard rather than returned as a file. The clipboard itself is a
//! platform capability injected through the `Clipboard` trait; a runtime
//! that refuses the write (e.g. a non-secure context) surfaces as
//! `ClipboardUnavailable`.

use crate::structure::{ReportDocument, TableBlock};
use crate::ExportError;

/// Platform clipboard boundary. Implementations report refusal with a
/// human-readable message.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

/// Serialize one table as tab-separated lines (header row first).
pub fn tab_separated(table: &TableBlock) -> String {
    let mut lines = Vec::with_capacity(table.rows.len() + 1);
    lines.push(table.headers.join("\t"));
    for row in &table.rows {
        lines.push(
            row.iter()
                .map(|cell| cell.to_string())
                .collect::<Vec<_>>()
                .join("\t"),
        );
    }
    lines.join("\n")
}

/// Copy the document's first table to the clipboard. Resolves with a
/// human-readable success message for the caller's transient notification.
pub fn copy_for_sheets(
    doc: &ReportDocument,
    clipboard: &mut dyn Clipboard,
) -> Result<String, ExportError> {
    let table = doc.first_table().ok_or(ExportError::NoTabularData)?;
    let payload = tab_separated(table);
    clipboard
        .set_text(&payload)
        .map_err(ExportError::ClipboardUnavailable)?;
    Ok(format!(
        "Copied {} rows to the clipboard. Paste directly into a spreadsheet.",
        table.rows.len() + 1
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{CellValue, ContentBlock, ReportSection};

    #[derive(Default)]
    struct FakeClipboard {
        text: Option<String>,
        refuse: bool,
    }

    impl Clipboard for FakeClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), String> {
            if self.refuse {
                return Err("write not permitted in this context".into());
            }
            self.text = Some(text.to_string());
            Ok(())
        }
    }

    fn doc_with_table() -> ReportDocument {
        let mut doc = ReportDocument::new("T");
        let mut s = ReportSection::new("S");
        s.content.push(ContentBlock::Table(TableBlock {
            headers: vec!["A".into(), "B".into()],
            rows: vec![vec![CellValue::from(1), CellValue::from("x y")]],
        }));
        doc.sections.push(s);
        doc
    }

    #[test]
    fn writes_tab_separated_payload() {
        let mut clip = FakeClipboard::default();
        let msg = copy_for_sheets(&doc_with_table(), &mut clip).unwrap();
        assert_eq!(clip.text.as_deref(), Some("A\tB\n1\tx y"));
        assert!(msg.contains("2 rows"));
    }

    #[test]
    fn refused_write_is_clipboard_unavailable() {
        let mut clip = FakeClipboard { refuse: true, ..Default::default() };
        let err = copy_for_sheets(&doc_with_table(), &mut clip).unwrap_err();
        assert!(matches!(err, ExportError::ClipboardUnavailable(_)));
    }

    #[test]
    fn table_free_document_is_no_tabular_data() {
        let mut clip = FakeClipboard::default();
        let err = copy_for_sheets(&ReportDocument::new("T"), &mut clip).unwrap_err();
        assert!(matches!(err, ExportError::NoTabularData));
        assert!(clip.text.is_none());
    }
}
