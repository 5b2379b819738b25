//! crates/cna_report/src/render_pdf.rs
//! Paginated PDF driver.
//!
//! The engine owns the layout: cursor tracking, page breaks against a fixed
//! bottom safety margin, orientation transitions at section boundaries, and
//! the post-content header/footer pass (stamped after all content so the
//! `page i of n` totals are accurate). The injected `PdfCanvas` only draws
//! and measures.
//!
//! Rules in this layer:
//! - Initial page orientation = orientation of the first section.
//! - A section whose orientation differs from the current page starts a new
//!   page in the new orientation before its heading is drawn.
//! - A block that does not fit above the safety margin starts a new page in
//!   the current orientation before being drawn; a block taller than a whole
//!   page is drawn anyway (the canvas clips) rather than looping.
//! - A failed image draw is replaced by a one-line visible placeholder and
//!   the export continues. This is the engine's only partial-failure policy.

use crate::filename::export_filename;
use crate::structure::{
    ContentBlock, HeadingAccent, ImageBlock, Orientation, ReportDocument, TableBlock,
};
use crate::{ExportArtifact, ExportContext, ExportError};

/// Page dimensions in points for one orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// Text roles the canvas may style differently (font, weight, accent color).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextStyle {
    Body,
    Heading(Option<HeadingAccent>),
    /// Red one-liner substituted for a failed image draw.
    ErrorPlaceholder,
}

/// Narrow drawing contract for a PDF backend. All coordinates are points
/// from the top-left of the current page.
pub trait PdfCanvas {
    /// Start a new page; subsequent drawing lands on it.
    fn begin_page(&mut self, orientation: Orientation);
    /// Page dimensions for an orientation.
    fn page_size(&self, orientation: Orientation) -> PageSize;
    /// Height `text` will consume wrapped to `width` in `style`.
    fn measure_text(&self, text: &str, width: f32, style: TextStyle) -> f32;
    /// Draw wrapped text; returns the height consumed.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, width: f32, style: TextStyle) -> f32;
    /// Height a bordered table (styled header row included) will consume.
    fn measure_table(&self, table: &TableBlock, width: f32) -> f32;
    /// Draw a bordered table with a styled header row; returns the height
    /// consumed, so later content resumes below it.
    fn draw_table(&mut self, table: &TableBlock, x: f32, y: f32, width: f32) -> f32;
    /// Draw an image scaled to fit `max_width` preserving aspect ratio;
    /// returns the height consumed, or a message when the payload cannot be
    /// decoded or drawn.
    fn draw_image(&mut self, image: &ImageBlock, x: f32, y: f32, max_width: f32)
        -> Result<f32, String>;
    /// Stamp the running header (title, centered) and footer (organisation,
    /// date, page numbering) onto an already-drawn page, 1-based index.
    fn stamp_header_footer(&mut self, page: usize, total_pages: usize, header: &str, footer: &str);
    /// Pages begun so far.
    fn page_count(&self) -> usize;
    /// Final document bytes.
    fn finish(&mut self) -> Vec<u8>;
}

const MARGIN: f32 = 40.0;
/// Extra inset below the running header band.
const HEADER_BAND: f32 = 20.0;
/// Fixed safety margin from the bottom: content never starts below
/// `page_height - BOTTOM_SAFETY`.
const BOTTOM_SAFETY: f32 = 60.0;
const HEADING_GAP: f32 = 8.0;
const BLOCK_GAP: f32 = 10.0;

struct Layout<'a> {
    canvas: &'a mut dyn PdfCanvas,
    orientation: Orientation,
    cursor: f32,
}

impl<'a> Layout<'a> {
    fn new(canvas: &'a mut dyn PdfCanvas, orientation: Orientation) -> Self {
        canvas.begin_page(orientation);
        Self {
            canvas,
            orientation,
            cursor: MARGIN + HEADER_BAND,
        }
    }

    fn content_width(&self) -> f32 {
        self.canvas.page_size(self.orientation).width - 2.0 * MARGIN
    }

    fn limit(&self) -> f32 {
        self.canvas.page_size(self.orientation).height - BOTTOM_SAFETY
    }

    fn new_page(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.canvas.begin_page(orientation);
        self.cursor = MARGIN + HEADER_BAND;
    }

    /// Break to a fresh page (same orientation) when `needed` does not fit.
    /// Oversized blocks draw from the top of a fresh page instead of looping.
    fn ensure_room(&mut self, needed: f32) {
        let top = MARGIN + HEADER_BAND;
        if self.cursor + needed > self.limit() && self.cursor > top {
            self.new_page(self.orientation);
        }
    }
}

pub fn export_to_pdf(
    doc: &ReportDocument,
    ctx: &ExportContext,
    canvas: &mut dyn PdfCanvas,
) -> Result<ExportArtifact, ExportError> {
    let initial = doc
        .sections
        .first()
        .map(|s| s.orientation)
        .unwrap_or_default();
    let mut layout = Layout::new(canvas, initial);

    for section in &doc.sections {
        if section.orientation != layout.orientation {
            layout.new_page(section.orientation);
        }

        let width = layout.content_width();
        let heading_style = TextStyle::Heading(section.accent);
        let heading_h = layout.canvas.measure_text(&section.title, width, heading_style);
        layout.ensure_room(heading_h);
        let consumed = layout
            .canvas
            .draw_text(&section.title, MARGIN, layout.cursor, width, heading_style);
        layout.cursor += consumed + HEADING_GAP;

        for block in &section.content {
            let width = layout.content_width();
            match block {
                ContentBlock::Text { text } => {
                    let h = layout.canvas.measure_text(text, width, TextStyle::Body);
                    layout.ensure_room(h);
                    let consumed =
                        layout
                            .canvas
                            .draw_text(text, MARGIN, layout.cursor, width, TextStyle::Body);
                    layout.cursor += consumed + BLOCK_GAP;
                }
                ContentBlock::Table(table) => {
                    let h = layout.canvas.measure_table(table, width);
                    layout.ensure_room(h);
                    let consumed = layout.canvas.draw_table(table, MARGIN, layout.cursor, width);
                    layout.cursor += consumed + BLOCK_GAP;
                }
                ContentBlock::Image(image) => {
                    // Fit-to-width estimate for the page-break decision.
                    let scale = (width / image.width.max(1) as f32).min(1.0);
                    let h = image.height as f32 * scale;
                    layout.ensure_room(h);
                    match layout.canvas.draw_image(image, MARGIN, layout.cursor, width) {
                        Ok(consumed) => layout.cursor += consumed + BLOCK_GAP,
                        Err(reason) => {
                            // Local recovery: visible placeholder, keep going.
                            let placeholder = format!("[chart could not be rendered: {reason}]");
                            let consumed = layout.canvas.draw_text(
                                &placeholder,
                                MARGIN,
                                layout.cursor,
                                width,
                                TextStyle::ErrorPlaceholder,
                            );
                            layout.cursor += consumed + BLOCK_GAP;
                        }
                    }
                }
            }
        }
    }

    // Header/footer pass after all content so page totals are accurate.
    let total = layout.canvas.page_count();
    let footer = format!(
        "{} | Generated {}",
        ctx.organisation,
        ctx.generated_on.format("%Y-%m-%d")
    );
    for page in 1..=total {
        layout.canvas.stamp_header_footer(page, total, &doc.title, &footer);
    }

    let bytes = layout.canvas.finish();
    Ok(ExportArtifact {
        filename: export_filename(&doc.title, ctx.generated_on, "pdf"),
        bytes,
    })
}
