//! Recording fakes for the injected renderer traits. Each fake implements
//! the narrow drawing contract and logs the call stream so tests can assert
//! on layout decisions (pagination, orientation, ordering) without a real
//! rendering library.

#![allow(dead_code)]

use cna_report::{
    DocxBuilder, ImageBlock, Orientation, PageSize, PdfCanvas, SheetPlan, TableBlock, TextStyle,
    WorkbookWriter,
};

// ===== PDF =====

#[derive(Clone, Debug, PartialEq)]
pub enum CanvasEvent {
    BeginPage(Orientation),
    Text {
        text: String,
        style: TextStyle,
        page: usize,
    },
    Table {
        rows: usize,
        page: usize,
    },
    Image {
        page: usize,
    },
    Stamp {
        page: usize,
        total: usize,
        header: String,
        footer: String,
    },
}

pub const LINE_HEIGHT: f32 = 14.0;
pub const TABLE_ROW_HEIGHT: f32 = 20.0;

/// A4-sized fake canvas with deterministic text metrics: every line of a
/// text block is `LINE_HEIGHT` tall, every table row `TABLE_ROW_HEIGHT`.
#[derive(Default)]
pub struct FakeCanvas {
    pub events: Vec<CanvasEvent>,
    pub pages: usize,
    pub fail_images: bool,
}

impl FakeCanvas {
    pub fn begin_pages(&self) -> Vec<Orientation> {
        self.events
            .iter()
            .filter_map(|e| match e {
                CanvasEvent::BeginPage(o) => Some(*o),
                _ => None,
            })
            .collect()
    }

    pub fn orientation_transitions(&self) -> usize {
        let pages = self.begin_pages();
        pages.windows(2).filter(|w| w[0] != w[1]).count()
    }
}

impl PdfCanvas for FakeCanvas {
    fn begin_page(&mut self, orientation: Orientation) {
        self.pages += 1;
        self.events.push(CanvasEvent::BeginPage(orientation));
    }

    fn page_size(&self, orientation: Orientation) -> PageSize {
        match orientation {
            Orientation::Portrait => PageSize { width: 595.0, height: 842.0 },
            Orientation::Landscape => PageSize { width: 842.0, height: 595.0 },
        }
    }

    fn measure_text(&self, text: &str, _width: f32, _style: TextStyle) -> f32 {
        text.split('\n').count() as f32 * LINE_HEIGHT
    }

    fn draw_text(&mut self, text: &str, _x: f32, _y: f32, width: f32, style: TextStyle) -> f32 {
        self.events.push(CanvasEvent::Text {
            text: text.to_string(),
            style,
            page: self.pages,
        });
        self.measure_text(text, width, style)
    }

    fn measure_table(&self, table: &TableBlock, _width: f32) -> f32 {
        (table.rows.len() + 1) as f32 * TABLE_ROW_HEIGHT
    }

    fn draw_table(&mut self, table: &TableBlock, _x: f32, _y: f32, width: f32) -> f32 {
        self.events.push(CanvasEvent::Table {
            rows: table.rows.len(),
            page: self.pages,
        });
        self.measure_table(table, width)
    }

    fn draw_image(
        &mut self,
        image: &ImageBlock,
        _x: f32,
        _y: f32,
        max_width: f32,
    ) -> Result<f32, String> {
        if self.fail_images {
            return Err("corrupt data URI".to_string());
        }
        self.events.push(CanvasEvent::Image { page: self.pages });
        let scale = (max_width / image.width.max(1) as f32).min(1.0);
        Ok(image.height as f32 * scale)
    }

    fn stamp_header_footer(&mut self, page: usize, total: usize, header: &str, footer: &str) {
        self.events.push(CanvasEvent::Stamp {
            page,
            total,
            header: header.to_string(),
            footer: footer.to_string(),
        });
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn finish(&mut self) -> Vec<u8> {
        b"%PDF-fake".to_vec()
    }
}

// ===== DOCX =====

#[derive(Clone, Debug, PartialEq)]
pub enum DocxEvent {
    Title(String),
    BeginSection {
        title: String,
        orientation: Orientation,
        header: String,
        footer: String,
    },
    Paragraph(String),
    Table { rows: usize },
    Image { width: f32, height: f32 },
}

pub struct FakeDocxBuilder {
    pub events: Vec<DocxEvent>,
    pub available: bool,
}

impl Default for FakeDocxBuilder {
    fn default() -> Self {
        Self { events: Vec::new(), available: true }
    }
}

impl DocxBuilder for FakeDocxBuilder {
    fn availability(&self) -> Result<(), String> {
        if self.available {
            Ok(())
        } else {
            Err("document library failed to load".to_string())
        }
    }

    fn add_document_title(&mut self, text: &str) {
        self.events.push(DocxEvent::Title(text.to_string()));
    }

    fn begin_section(
        &mut self,
        title: &str,
        orientation: Orientation,
        header: &str,
        footer: &str,
    ) {
        self.events.push(DocxEvent::BeginSection {
            title: title.to_string(),
            orientation,
            header: header.to_string(),
            footer: footer.to_string(),
        });
    }

    fn add_paragraph(&mut self, text: &str) {
        self.events.push(DocxEvent::Paragraph(text.to_string()));
    }

    fn add_table(&mut self, table: &TableBlock) {
        self.events.push(DocxEvent::Table { rows: table.rows.len() });
    }

    fn add_image(&mut self, _image: &ImageBlock, display_width: f32, display_height: f32) {
        self.events.push(DocxEvent::Image {
            width: display_width,
            height: display_height,
        });
    }

    fn finish(&mut self) -> Vec<u8> {
        b"PK-docx-fake".to_vec()
    }
}

// ===== XLSX =====

#[derive(Default)]
pub struct FakeWorkbookWriter {
    pub sheets: Vec<SheetPlan>,
}

impl WorkbookWriter for FakeWorkbookWriter {
    fn write_sheet(&mut self, sheet: &SheetPlan) {
        self.sheets.push(sheet.clone());
    }

    fn finish(&mut self) -> Vec<u8> {
        b"PK-xlsx-fake".to_vec()
    }
}
