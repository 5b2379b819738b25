//! crates/cna_report/src/structure.rs
//! The language-agnostic report document model.
//!
//! A `ReportDocument` is constructed fresh per report-generation request,
//! held in memory for the duration of one export, and discarded. Section
//! order and block order are significant and preserved by every exporter.
//! The JSON exporter round-trips this model losslessly, which is why every
//! type here derives both serde traits and `PartialEq`.

use serde::{Deserialize, Serialize};

/// Page layout for page-oriented formats (PDF, DOCX). Applies from the point
/// the owning section begins rendering.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Optional semantic accent for a section heading. A rendering hint only;
/// exporters that have no notion of color ignore it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingAccent {
    Blue,
    Green,
}

/// One table cell. Untagged so JSON numbers and strings map naturally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl core::fmt::Display for CellValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            // Whole numbers print without a trailing ".0".
            CellValue::Number(n) if n.fract() == 0.0 && n.is_finite() => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

/// Ordered column headers plus ordered rows of cells. Header names need not
/// be unique; row lengths are taken as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableBlock {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// Self-contained raster image payload (a data URI) plus intrinsic pixel
/// size, used for embedding pre-rendered charts.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub data_uri: String,
    pub width: u32,
    pub height: u32,
}

/// One content unit of a section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentBlock {
    /// Free text; embedded newlines mean separate paragraphs/lines.
    Text { text: String },
    Table(TableBlock),
    Image(ImageBlock),
}

/// One titled division of a report document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: String,
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<HeadingAccent>,
}

impl ReportSection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: Vec::new(),
            orientation: Orientation::Portrait,
            accent: None,
        }
    }
}

/// The in-memory model of one renderable report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    /// Document title; also the export filename stem and page header text.
    pub title: String,
    pub sections: Vec<ReportSection>,
}

impl ReportDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// First table anywhere in the document: sections in order, then content
    /// blocks in order within each section. This is the table the CSV and
    /// clipboard exporters serialize.
    pub fn first_table(&self) -> Option<&TableBlock> {
        self.sections.iter().find_map(|section| {
            section.content.iter().find_map(|block| match block {
                ContentBlock::Table(t) => Some(t),
                _ => None,
            })
        })
    }
}
