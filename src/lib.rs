pub mod config;
pub mod error;
pub mod font_metrics;
pub mod layout;
pub mod pdf_writer;
pub mod record_reader;
pub mod style;
pub mod text_flow;
pub mod utils;

pub use error::ExportError;
pub use layout::{layout, LaidOutDocument, Page, Rule, Section, TextLine};
pub use pdf_writer::{export, render, DocumentHandle};
pub use record_reader::{parse_record, read_record, FlatResumeRecord};
pub use style::{Rgb, Style, TemplateStyle};
pub use utils::{output_file_name, Degree, Job, ResumeRecord};

// A4, millimetres, y measured from the top edge.
pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 20.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
pub const TOP_OFFSET: f32 = 20.0;
pub const BOTTOM_LIMIT: f32 = 270.0;
pub const COVER_LETTER_LIMIT: f32 = 230.0;

pub const NAME_FONT_SIZE: f32 = 24.0;
pub const TITLE_FONT_SIZE: f32 = 14.0;
pub const BODY_FONT_SIZE: f32 = 10.0;

pub const NAME_LINE_HEIGHT: f32 = 10.0;
pub const TITLE_LINE_HEIGHT: f32 = 7.0;
pub const LINE_HEIGHT: f32 = 5.0;
pub const SECTION_SPACING: f32 = 5.0;
pub const DIVIDER_SPACING: f32 = 10.0;
pub const DIVIDER_THICKNESS: f32 = 0.5;
