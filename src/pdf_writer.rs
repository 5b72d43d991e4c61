use log::{debug, info};
use printpdf::*;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::error::{ExportError, ExportResult};
use crate::font_metrics::FontWeight;
use crate::layout::{layout, LaidOutDocument, Rule, TextLine};
use crate::style::Style;
use crate::utils::{output_file_name, present, ResumeRecord};
use crate::{PAGE_HEIGHT, PAGE_WIDTH};

const LAYER_NAME: &str = "Layer 1";
const PT_PER_MM: f32 = 72.0 / 25.4;

/// A finished document plus the name it will be saved under.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentHandle {
    pub document: LaidOutDocument,
    pub file_name: String,
    pub title: String,
}

/// Lays out `record` and derives its file name. Nothing is written yet.
pub fn render(record: &ResumeRecord, style: &Style, file_name_hint: &str) -> DocumentHandle {
    let document = layout(record, style);
    let title = present(&record.full_name)
        .map(|name| format!("{} - Resume", name))
        .unwrap_or_else(|| "Resume".to_string());
    DocumentHandle {
        document,
        file_name: output_file_name(&record.full_name, file_name_hint),
        title,
    }
}

/// Renders and saves in one step, returning the written path.
pub fn export(
    record: &ResumeRecord,
    style: &Style,
    file_name_hint: &str,
    dir: impl AsRef<Path>,
) -> ExportResult<PathBuf> {
    render(record, style, file_name_hint).save(dir)
}

impl DocumentHandle {
    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    pub fn to_pdf_bytes(&self) -> ExportResult<Vec<u8>> {
        debug!("Starting PDF serialization of '{}'", self.title);
        let (doc, page1, layer1) =
            PdfDocument::new(&self.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);

        let family = self.document.font;
        let font = doc
            .add_builtin_font(family.builtin(FontWeight::Regular))
            .map_err(pdf_error)?;
        let font_bold = doc
            .add_builtin_font(family.builtin(FontWeight::Bold))
            .map_err(pdf_error)?;

        for (index, page) in self.document.pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(page1).get_layer(layer1)
            } else {
                let (page_index, layer_index) =
                    doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
                doc.get_page(page_index).get_layer(layer_index)
            };
            debug!(
                "Writing page {} with {} lines",
                index + 1,
                page.lines.len()
            );

            for rule in &page.rules {
                draw_rule(&layer, rule);
            }
            for line in &page.lines {
                let font_to_use = match line.weight {
                    FontWeight::Regular => &font,
                    FontWeight::Bold => &font_bold,
                };
                draw_text(&layer, line, font_to_use);
            }
        }

        doc.save_to_bytes().map_err(pdf_error)
    }

    /// Writes the PDF to `dir/{file_name}`.
    pub fn save(&self, dir: impl AsRef<Path>) -> ExportResult<PathBuf> {
        let bytes = self.to_pdf_bytes()?;
        let path = dir.as_ref().join(&self.file_name);
        debug!("Saving PDF to {}", path.display());

        let io_error = |source| ExportError::Io {
            path: path.clone(),
            source,
        };
        let mut writer = BufWriter::new(File::create(&path).map_err(io_error)?);
        writer.write_all(&bytes).map_err(io_error)?;
        writer.flush().map_err(io_error)?;

        info!(
            "PDF saved successfully to {} ({} pages, {} bytes)",
            path.display(),
            self.page_count(),
            bytes.len()
        );
        Ok(path)
    }
}

fn pdf_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::Pdf(e.to_string())
}

// Layout measures y down from the top edge; PDF measures up from the bottom.
fn to_pdf_y(y: f32) -> f32 {
    PAGE_HEIGHT - y
}

fn draw_text(layer: &PdfLayerReference, line: &TextLine, font: &IndirectFontRef) {
    layer.set_fill_color(line.color.to_printpdf());
    layer.use_text(
        line.text.clone(),
        line.font_size,
        Mm(line.x),
        Mm(to_pdf_y(line.y)),
        font,
    );
}

fn draw_rule(layer: &PdfLayerReference, rule: &Rule) {
    layer.set_outline_color(rule.color.to_printpdf());
    layer.set_outline_thickness(rule.thickness * PT_PER_MM);
    let line = Line {
        points: vec![
            (Point::new(Mm(rule.x1), Mm(to_pdf_y(rule.y))), false),
            (Point::new(Mm(rule.x2), Mm(to_pdf_y(rule.y))), false),
        ],
        is_closed: false,
    };
    layer.add_line(line);
}
