//! crates/cna_report/src/render_xlsx.rs
//! Spreadsheet workbook driver.
//!
//! Planning is a pure function (`plan_workbook`) so every naming, ordering,
//! and sizing rule is testable without a spreadsheet backend; `export_to_xlsx`
//! feeds the finished plan to the injected `WorkbookWriter`.
//!
//! Rules in this layer:
//! - One worksheet per table, in document order. Sheet names are the
//!   sanitized section title (worksheet-illegal characters stripped,
//!   truncated to the format's 31-char limit); a name that sanitizes to
//!   empty or collides falls back to an auto-numbered `Sheet N`.
//! - A section with several tables keeps them all: the second and later
//!   tables get `-2`, `-3`… suffixed names. Nothing is ever dropped.
//! - A summary worksheet aggregates every text block in document order,
//!   prefixed by the overall title and generation date, and is always moved
//!   to the first tab when created.
//! - Column widths are auto-sized to the longest of header and cell text in
//!   each column, plus small padding.
//! - A document with no tables and no text still yields one placeholder
//!   sheet (the container format requires at least one).

use std::collections::BTreeSet;

use crate::filename::export_filename;
use crate::structure::{CellValue, ContentBlock, ReportDocument};
use crate::{ExportArtifact, ExportContext, ExportError};

/// Worksheet-name length limit of the container format.
pub const MAX_SHEET_NAME_LEN: usize = 31;
const ILLEGAL_NAME_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];
const WIDTH_PADDING: usize = 2;

/// One planned worksheet.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetPlan {
    pub name: String,
    /// All rows, header row first when `header_row` is set.
    pub rows: Vec<Vec<CellValue>>,
    /// Whether row 0 is a styled header row.
    pub header_row: bool,
    /// Auto-sized width (character count) per column.
    pub column_widths: Vec<usize>,
}

/// The full workbook, in tab order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkbookPlan {
    pub sheets: Vec<SheetPlan>,
}

/// Narrow assembly contract for a spreadsheet backend.
pub trait WorkbookWriter {
    fn write_sheet(&mut self, sheet: &SheetPlan);
    fn finish(&mut self) -> Vec<u8>;
}

/// Compute the whole workbook layout. Pure; document order in, tab order out.
pub fn plan_workbook(doc: &ReportDocument, ctx: &ExportContext) -> WorkbookPlan {
    let mut used_names: BTreeSet<String> = BTreeSet::new();
    let mut sheets: Vec<SheetPlan> = Vec::new();

    for section in &doc.sections {
        let mut table_index = 0usize;
        for block in &section.content {
            let ContentBlock::Table(table) = block else { continue };
            table_index += 1;

            let base = if table_index == 1 {
                sanitize_name(&section.title)
            } else {
                suffixed_name(&sanitize_name(&section.title), table_index)
            };
            let name = resolve_name(base, sheets.len() + 1, &mut used_names);

            let mut rows = Vec::with_capacity(table.rows.len() + 1);
            rows.push(
                table
                    .headers
                    .iter()
                    .map(|h| CellValue::Text(h.clone()))
                    .collect::<Vec<_>>(),
            );
            rows.extend(table.rows.iter().cloned());
            let column_widths = auto_widths(&rows);

            sheets.push(SheetPlan {
                name,
                rows,
                header_row: true,
                column_widths,
            });
        }
    }

    let summary = plan_summary(doc, ctx, &mut used_names);
    if let Some(summary) = summary {
        // The summary tab always comes first when it exists.
        sheets.insert(0, summary);
    }

    if sheets.is_empty() {
        sheets.push(SheetPlan {
            name: "Report".to_string(),
            rows: vec![vec![CellValue::from("No tabular data in this report")]],
            header_row: false,
            column_widths: vec!["No tabular data in this report".len() + WIDTH_PADDING],
        });
    }

    WorkbookPlan { sheets }
}

pub fn export_to_xlsx(
    doc: &ReportDocument,
    ctx: &ExportContext,
    writer: &mut dyn WorkbookWriter,
) -> Result<ExportArtifact, ExportError> {
    let plan = plan_workbook(doc, ctx);
    for sheet in &plan.sheets {
        writer.write_sheet(sheet);
    }
    Ok(ExportArtifact {
        filename: export_filename(&doc.title, ctx.generated_on, "xlsx"),
        bytes: writer.finish(),
    })
}

/// Summary sheet: overall title, generation date, then every text block in
/// document order under its section title. `None` when the document has no
/// text blocks at all.
fn plan_summary(
    doc: &ReportDocument,
    ctx: &ExportContext,
    used_names: &mut BTreeSet<String>,
) -> Option<SheetPlan> {
    let mut rows: Vec<Vec<CellValue>> = vec![
        vec![CellValue::Text(doc.title.clone())],
        vec![CellValue::Text(format!(
            "Generated {}",
            ctx.generated_on.format("%Y-%m-%d")
        ))],
    ];

    let mut any_text = false;
    for section in &doc.sections {
        let texts: Vec<&str> = section
            .content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        if texts.is_empty() {
            continue;
        }
        any_text = true;
        rows.push(vec![CellValue::Text(String::new())]);
        rows.push(vec![CellValue::Text(section.title.clone())]);
        for text in texts {
            for line in text.split('\n') {
                rows.push(vec![CellValue::Text(line.to_string())]);
            }
        }
    }
    if !any_text {
        return None;
    }

    let column_widths = auto_widths(&rows);
    let name = resolve_name("Summary".to_string(), 0, used_names);
    Some(SheetPlan {
        name,
        rows,
        header_row: false,
        column_widths,
    })
}

/// Strip worksheet-illegal characters and truncate to the name limit.
fn sanitize_name(title: &str) -> String {
    let cleaned: String = title
        .trim()
        .chars()
        .filter(|c| !ILLEGAL_NAME_CHARS.contains(c))
        .collect();
    truncate_chars(&cleaned, MAX_SHEET_NAME_LEN)
}

/// Append a `-N` suffix for the Nth table of one section, keeping the whole
/// name inside the length limit.
fn suffixed_name(base: &str, table_index: usize) -> String {
    let suffix = format!("-{table_index}");
    let room = MAX_SHEET_NAME_LEN.saturating_sub(suffix.len());
    format!("{}{}", truncate_chars(base, room), suffix)
}

/// Empty or colliding names fall back to an auto-numbered `Sheet N`.
/// Collision checks are case-insensitive, as the container format's are.
fn resolve_name(candidate: String, ordinal: usize, used: &mut BTreeSet<String>) -> String {
    let mut name = candidate;
    let mut n = ordinal.max(1);
    if name.is_empty() {
        name = format!("Sheet {n}");
        n += 1;
    }
    while used.contains(&name.to_lowercase()) {
        name = format!("Sheet {n}");
        n += 1;
    }
    used.insert(name.to_lowercase());
    name
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Widest cell (or header) per column, plus padding.
fn auto_widths(rows: &[Vec<CellValue>]) -> Vec<usize> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.to_string().chars().count())
                .max()
                .unwrap_or(0)
                + WIDTH_PADDING
        })
        .collect()
}
