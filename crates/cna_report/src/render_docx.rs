//! crates/cna_report/src/render_docx.rs
//! Word-processor document driver.
//!
//! One word-processor section per `ReportSection`, each carrying its own
//! page-orientation property and repeating the running header (title +
//! organisation) and footer (generation date). The overall document title is
//! a distinct, larger heading drawn before section 1's own heading, not
//! folded into it.
//!
//! The underlying renderer may be absent at runtime (it was a
//! network-loaded library in the original deployment); the engine probes it
//! first and fails fast with `RendererUnavailable` rather than attempting a
//! partial export.

use crate::filename::export_filename;
use crate::structure::{ContentBlock, ImageBlock, Orientation, ReportDocument, TableBlock};
use crate::{ExportArtifact, ExportContext, ExportError};

/// Fixed scale-up factor from intrinsic pixel size for embedded images
/// (aspect ratio preserved, centered).
pub const IMAGE_SCALE: f32 = 2.5;

/// Narrow assembly contract for a word-processor backend.
pub trait DocxBuilder {
    /// Probe the underlying renderer; an error message means unavailable.
    fn availability(&self) -> Result<(), String>;
    /// Distinct top-level document title (precedes all sections).
    fn add_document_title(&mut self, text: &str);
    /// Open a new word-processor section with its own page orientation and
    /// running header/footer, and draw its heading.
    fn begin_section(&mut self, title: &str, orientation: Orientation, header: &str, footer: &str);
    /// One paragraph unit. Empty strings become empty paragraphs (blank-line
    /// spacing is preserved, not omitted).
    fn add_paragraph(&mut self, text: &str);
    /// Bordered full-width table; bold header row, marked as repeating.
    fn add_table(&mut self, table: &TableBlock);
    /// Centered image at the given display size in pixels.
    fn add_image(&mut self, image: &ImageBlock, display_width: f32, display_height: f32);
    /// Final document bytes.
    fn finish(&mut self) -> Vec<u8>;
}

pub fn export_to_docx(
    doc: &ReportDocument,
    ctx: &ExportContext,
    builder: &mut dyn DocxBuilder,
) -> Result<ExportArtifact, ExportError> {
    builder
        .availability()
        .map_err(ExportError::RendererUnavailable)?;

    builder.add_document_title(&doc.title);

    let header = format!("{} | {}", doc.title, ctx.organisation);
    let footer = format!("Generated {}", ctx.generated_on.format("%Y-%m-%d"));

    for section in &doc.sections {
        builder.begin_section(&section.title, section.orientation, &header, &footer);
        for block in &section.content {
            match block {
                ContentBlock::Text { text } => {
                    // Newline-split into separate paragraph units; `split`
                    // yields empty strings for blank lines, which the
                    // builder must keep.
                    for line in text.split('\n') {
                        builder.add_paragraph(line);
                    }
                }
                ContentBlock::Table(table) => builder.add_table(table),
                ContentBlock::Image(image) => builder.add_image(
                    image,
                    image.width as f32 * IMAGE_SCALE,
                    image.height as f32 * IMAGE_SCALE,
                ),
            }
        }
    }

    Ok(ExportArtifact {
        filename: export_filename(&doc.title, ctx.generated_on, "docx"),
        bytes: builder.finish(),
    })
}
