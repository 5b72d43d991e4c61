use anyhow::bail;
use std::{fmt, str::FromStr};

use crate::font_metrics::FontFamily;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_printpdf(self) -> printpdf::Color {
        printpdf::Color::Rgb(printpdf::Rgb::new(
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            None,
        ))
    }
}

/// Colours and typeface a document is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Name line and section titles.
    pub heading: Rgb,
    /// Company names.
    pub accent: Rgb,
    /// Rule under the contact line.
    pub divider: Rgb,
    pub text: Rgb,
    pub font: FontFamily,
}

impl Default for Style {
    fn default() -> Self {
        TemplateStyle::Default.style()
    }
}

/// The selectable resume templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemplateStyle {
    #[default]
    Default,
    ModernProfessional,
    CreativeDesigner,
    TechDeveloper,
    ExecutiveManager,
    SimpleClean,
    AcademicResearch,
}

const SKY_500: Rgb = Rgb::new(14, 165, 233);
const EMERALD_500: Rgb = Rgb::new(16, 185, 129);
const EMERALD_600: Rgb = Rgb::new(5, 150, 105);

impl TemplateStyle {
    pub const ALL: [TemplateStyle; 7] = [
        TemplateStyle::Default,
        TemplateStyle::ModernProfessional,
        TemplateStyle::CreativeDesigner,
        TemplateStyle::TechDeveloper,
        TemplateStyle::ExecutiveManager,
        TemplateStyle::SimpleClean,
        TemplateStyle::AcademicResearch,
    ];

    /// Unknown ids fall back to the default template.
    pub fn from_id(id: u32) -> Self {
        Self::ALL
            .get(id as usize)
            .copied()
            .unwrap_or(TemplateStyle::Default)
    }

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            TemplateStyle::Default => "default",
            TemplateStyle::ModernProfessional => "modern-professional",
            TemplateStyle::CreativeDesigner => "creative-designer",
            TemplateStyle::TechDeveloper => "tech-developer",
            TemplateStyle::ExecutiveManager => "executive-manager",
            TemplateStyle::SimpleClean => "simple-clean",
            TemplateStyle::AcademicResearch => "academic-research",
        }
    }

    pub fn style(self) -> Style {
        let (heading, accent, divider, font) = match self {
            TemplateStyle::Default => (Rgb::BLACK, SKY_500, SKY_500, FontFamily::Helvetica),
            TemplateStyle::ModernProfessional => (
                Rgb::new(29, 78, 216),
                Rgb::new(37, 99, 235),
                Rgb::new(59, 130, 246),
                FontFamily::Helvetica,
            ),
            TemplateStyle::CreativeDesigner => (
                Rgb::new(190, 24, 93),
                Rgb::new(219, 39, 119),
                Rgb::new(236, 72, 153),
                FontFamily::Helvetica,
            ),
            TemplateStyle::TechDeveloper => (
                Rgb::new(4, 120, 87),
                EMERALD_600,
                EMERALD_500,
                FontFamily::Courier,
            ),
            TemplateStyle::ExecutiveManager => (
                Rgb::new(30, 41, 59),
                Rgb::new(3, 105, 161),
                SKY_500,
                FontFamily::Times,
            ),
            TemplateStyle::SimpleClean => (
                Rgb::BLACK,
                Rgb::new(107, 114, 128),
                Rgb::BLACK,
                FontFamily::Helvetica,
            ),
            TemplateStyle::AcademicResearch => (
                Rgb::new(6, 95, 70),
                EMERALD_600,
                EMERALD_500,
                FontFamily::Helvetica,
            ),
        };
        Style {
            heading,
            accent,
            divider,
            text: Rgb::BLACK,
            font,
        }
    }
}

impl fmt::Display for TemplateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemplateStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u32>() {
            return Ok(Self::from_id(id));
        }
        let normalized = s.to_ascii_lowercase().replace(['_', ' '], "-");
        match Self::ALL.into_iter().find(|t| t.name() == normalized) {
            Some(template) => Ok(template),
            None => bail!("Unknown template: {}", s),
        }
    }
}
