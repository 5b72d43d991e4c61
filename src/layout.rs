//! Single-pass document layout.
//!
//! `layout` walks the resume sections in a fixed order and flows each line down
//! the page with a cursor. Before every line the cursor checks the bottom
//! limit and starts a new page when it has been passed, so a body may span
//! any number of pages. The cursor lives for one call only.

use itertools::Itertools;
use log::debug;

use crate::font_metrics::{FontFamily, FontWeight};
use crate::style::{Rgb, Style};
use crate::text_flow::wrap_text;
use crate::utils::{is_present, present, ResumeRecord};
use crate::{
    BODY_FONT_SIZE, BOTTOM_LIMIT, CONTENT_WIDTH, COVER_LETTER_LIMIT, DIVIDER_SPACING,
    DIVIDER_THICKNESS, LINE_HEIGHT, MARGIN, NAME_FONT_SIZE, NAME_LINE_HEIGHT, PAGE_WIDTH,
    SECTION_SPACING, TITLE_FONT_SIZE, TITLE_LINE_HEIGHT, TOP_OFFSET,
};

pub const PLACEHOLDER_NAME: &str = "Your Name";
pub const PLACEHOLDER_POSITION: &str = "Position";
const CONTACT_SEPARATOR: &str = " | ";
const SKILL_SEPARATOR: &str = " - ";
const JOB_SPACING: f32 = 3.0;
const EXPERIENCE_SPACING: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Header,
    Contact,
    Summary,
    Skills,
    Experience,
    Education,
    Projects,
    CoverLetter,
}

impl Section {
    /// Heading printed above the section body, if it has one.
    pub fn title(self) -> Option<&'static str> {
        match self {
            Section::Header | Section::Contact => None,
            Section::Summary => Some("SUMMARY"),
            Section::Skills => Some("SKILLS"),
            Section::Experience => Some("EXPERIENCE"),
            Section::Education => Some("EDUCATION"),
            Section::Projects => Some("PROJECTS"),
            Section::CoverLetter => Some("COVER LETTER"),
        }
    }
}

/// A positioned run of text. `y` is the baseline in millimetres from the top
/// edge of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub weight: FontWeight,
    pub color: Rgb,
    pub section: Section,
}

/// Horizontal rule, same coordinate system as `TextLine`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
    pub thickness: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<TextLine>,
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub pages: Vec<Page>,
    pub font: FontFamily,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every text line with the index of the page it sits on.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &TextLine)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(index, page)| page.lines.iter().map(move |line| (index, line)))
    }

    /// Sections in the order they appear, each listed once.
    pub fn sections(&self) -> Vec<Section> {
        self.lines().map(|(_, line)| line.section).dedup().collect()
    }

    pub fn section_lines(&self, section: Section) -> Vec<&str> {
        self.lines()
            .filter(|(_, line)| line.section == section)
            .map(|(_, line)| line.text.as_str())
            .collect()
    }

    pub fn contains_text(&self, text: &str) -> bool {
        self.lines().any(|(_, line)| line.text == text)
    }
}

struct LayoutCursor<'a> {
    style: &'a Style,
    pages: Vec<Page>,
    y: f32,
}

impl<'a> LayoutCursor<'a> {
    fn new(style: &'a Style) -> Self {
        Self {
            style,
            pages: vec![Page::default()],
            y: TOP_OFFSET,
        }
    }

    fn new_page(&mut self) {
        debug!("Adding page {} at y = {}", self.pages.len() + 1, self.y);
        self.pages.push(Page::default());
        self.y = TOP_OFFSET;
    }

    fn break_if_past(&mut self, limit: f32) {
        if self.y > limit {
            self.new_page();
        }
    }

    fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    fn current_page(&mut self) -> &mut Page {
        // pages starts non-empty and only grows
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn flow_text(
        &mut self,
        text: &str,
        section: Section,
        font_size: f32,
        weight: FontWeight,
        color: Rgb,
        line_height: f32,
    ) {
        if !is_present(text) {
            return;
        }
        for line in wrap_text(text, CONTENT_WIDTH, self.style.font, weight, font_size) {
            if line.is_empty() {
                // Blank paragraph: keep the gap, but never open a page for it.
                if self.y <= BOTTOM_LIMIT {
                    self.advance(line_height);
                }
                continue;
            }

            self.break_if_past(BOTTOM_LIMIT);
            let y = self.y;
            self.current_page().lines.push(TextLine {
                text: line,
                x: MARGIN,
                y,
                font_size,
                weight,
                color,
                section,
            });
            self.advance(line_height);
        }
    }

    fn title(&mut self, section: Section) {
        if let Some(title) = section.title() {
            let color = self.style.heading;
            self.flow_text(
                title,
                section,
                TITLE_FONT_SIZE,
                FontWeight::Bold,
                color,
                TITLE_LINE_HEIGHT,
            );
        }
    }

    fn body(&mut self, text: &str, section: Section, weight: FontWeight, color: Rgb) {
        self.flow_text(text, section, BODY_FONT_SIZE, weight, color, LINE_HEIGHT);
    }

    fn rule(&mut self, color: Rgb) {
        self.break_if_past(BOTTOM_LIMIT);
        let y = self.y;
        self.current_page().rules.push(Rule {
            x1: MARGIN,
            x2: PAGE_WIDTH - MARGIN,
            y,
            thickness: DIVIDER_THICKNESS,
            color,
        });
    }

    fn finish(self) -> LaidOutDocument {
        LaidOutDocument {
            pages: self.pages,
            font: self.style.font,
        }
    }
}

/// Lays out `record` as a paginated document.
///
/// Sections come in a fixed order: name, contact, divider, summary, skills,
/// experience, education, projects, cover letter. A section with no content
/// emits nothing, heading included.
pub fn layout(record: &ResumeRecord, style: &Style) -> LaidOutDocument {
    let mut cursor = LayoutCursor::new(style);
    let text = style.text;

    let name = present(&record.full_name).unwrap_or(PLACEHOLDER_NAME);
    cursor.flow_text(
        name,
        Section::Header,
        NAME_FONT_SIZE,
        FontWeight::Bold,
        style.heading,
        NAME_LINE_HEIGHT,
    );
    cursor.advance(SECTION_SPACING);

    let contact = [&record.email, &record.phone, &record.location]
        .into_iter()
        .filter_map(|value| present(value))
        .join(CONTACT_SEPARATOR);
    if !contact.is_empty() {
        cursor.body(&contact, Section::Contact, FontWeight::Regular, text);
        cursor.advance(SECTION_SPACING);
    }

    cursor.rule(style.divider);
    cursor.advance(DIVIDER_SPACING);

    if let Some(summary) = present(&record.summary) {
        cursor.title(Section::Summary);
        cursor.body(summary, Section::Summary, FontWeight::Regular, text);
        cursor.advance(SECTION_SPACING);
    }

    let skills = record
        .skills
        .iter()
        .filter_map(|skill| present(skill))
        .join(SKILL_SEPARATOR);
    if !skills.is_empty() {
        cursor.title(Section::Skills);
        cursor.body(&skills, Section::Skills, FontWeight::Regular, text);
        cursor.advance(SECTION_SPACING);
    }

    let jobs: Vec<_> = record
        .experience
        .iter()
        .filter(|job| present(&job.company).is_some())
        .collect();
    if !jobs.is_empty() {
        cursor.title(Section::Experience);
        for job in jobs {
            let position = present(&job.position).unwrap_or(PLACEHOLDER_POSITION);
            cursor.body(position, Section::Experience, FontWeight::Bold, text);
            cursor.body(&job.company, Section::Experience, FontWeight::Regular, style.accent);
            // An empty duration takes no height; the gap stays at JOB_SPACING.
            cursor.body(&job.duration, Section::Experience, FontWeight::Regular, text);
            cursor.advance(JOB_SPACING);
        }
        cursor.advance(EXPERIENCE_SPACING);
    }

    let degrees: Vec<_> = record
        .education
        .iter()
        .filter(|degree| present(&degree.degree).is_some())
        .collect();
    if !degrees.is_empty() {
        cursor.title(Section::Education);
        for degree in degrees {
            cursor.body(&degree.degree, Section::Education, FontWeight::Bold, text);
            // Empty university or year lines take no height.
            cursor.body(&degree.university, Section::Education, FontWeight::Regular, text);
            cursor.body(
                &degree.graduation_year,
                Section::Education,
                FontWeight::Regular,
                text,
            );
        }
        cursor.advance(SECTION_SPACING);
    }

    let projects: Vec<_> = record
        .projects
        .iter()
        .filter_map(|project| present(project))
        .collect();
    if !projects.is_empty() {
        cursor.title(Section::Projects);
        for project in projects {
            cursor.body(
                &format!("- {}", project),
                Section::Projects,
                FontWeight::Regular,
                text,
            );
        }
    }

    if let Some(cover_letter) = present(&record.cover_letter) {
        // Long block: don't start it in the last few centimetres of a page.
        cursor.break_if_past(COVER_LETTER_LIMIT);
        cursor.title(Section::CoverLetter);
        cursor.body(cover_letter, Section::CoverLetter, FontWeight::Regular, text);
    }

    let document = cursor.finish();
    debug!(
        "Laid out {} lines on {} pages",
        document.lines().count(),
        document.page_count()
    );
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_metrics::measure;
    use crate::style::TemplateStyle;
    use crate::utils::{Degree, Job};

    fn style() -> Style {
        Style::default()
    }

    fn full_record() -> ResumeRecord {
        ResumeRecord {
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: "555-0100".into(),
            location: "Lisbon".into(),
            summary: "Backend engineer who likes compilers.".into(),
            skills: vec!["Rust".into(), "SQL".into(), "Kafka".into()],
            experience: vec![
                Job {
                    company: "Acme".into(),
                    position: "Senior Engineer".into(),
                    duration: "2020 - 2024".into(),
                },
                Job {
                    company: "Initech".into(),
                    position: "Engineer".into(),
                    duration: "2017 - 2020".into(),
                },
            ],
            education: vec![Degree {
                degree: "BSc Computer Science".into(),
                university: "University of Porto".into(),
                graduation_year: "2017".into(),
            }],
            projects: vec!["Toy database".into(), "Ray tracer".into()],
            cover_letter: "Dear hiring manager,\n\nI would like to apply.".into(),
        }
    }

    fn numbered_lines(count: usize) -> String {
        (0..count).map(|i| format!("line{i}")).join("\n")
    }

    #[test]
    fn test_minimal_record_example() {
        let record = ResumeRecord {
            full_name: "A B".into(),
            summary: "S".into(),
            skills: vec!["X".into(), "Y".into()],
            ..Default::default()
        };
        let doc = layout(&record, &style());

        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.section_lines(Section::Header), vec!["A B"]);
        assert_eq!(doc.section_lines(Section::Summary), vec!["SUMMARY", "S"]);
        assert_eq!(doc.section_lines(Section::Skills), vec!["SKILLS", "X - Y"]);
        assert_eq!(
            doc.sections(),
            vec![Section::Header, Section::Summary, Section::Skills]
        );
        for title in ["EXPERIENCE", "EDUCATION", "PROJECTS", "COVER LETTER"] {
            assert!(!doc.contains_text(title), "unexpected {title}");
        }
    }

    #[test]
    fn test_empty_record_uses_placeholder_name_only() {
        let doc = layout(&ResumeRecord::default(), &style());
        assert_eq!(doc.sections(), vec![Section::Header]);
        assert_eq!(doc.section_lines(Section::Header), vec![PLACEHOLDER_NAME]);
        assert_eq!(doc.pages[0].rules.len(), 1);
    }

    #[test]
    fn test_blank_fields_suppress_sections() {
        let record = ResumeRecord {
            full_name: "A".into(),
            summary: "   ".into(),
            skills: vec!["".into(), " ".into()],
            experience: vec![Job {
                company: " ".into(),
                position: "Ghost".into(),
                duration: "never".into(),
            }],
            education: vec![Degree {
                degree: "".into(),
                university: "Nowhere".into(),
                graduation_year: "2000".into(),
            }],
            projects: vec!["\t".into()],
            cover_letter: "\n\n".into(),
            ..Default::default()
        };
        let doc = layout(&record, &style());
        assert_eq!(doc.sections(), vec![Section::Header]);
        assert!(!doc.contains_text("Ghost"));
        assert!(!doc.contains_text("Nowhere"));
    }

    #[test]
    fn test_full_record_section_order() {
        let doc = layout(&full_record(), &style());
        assert_eq!(
            doc.sections(),
            vec![
                Section::Header,
                Section::Contact,
                Section::Summary,
                Section::Skills,
                Section::Experience,
                Section::Education,
                Section::Projects,
                Section::CoverLetter,
            ]
        );
        assert_eq!(
            doc.section_lines(Section::Contact),
            vec!["jane@example.com | 555-0100 | Lisbon"]
        );
        assert_eq!(
            doc.section_lines(Section::Projects),
            vec!["PROJECTS", "- Toy database", "- Ray tracer"]
        );
    }

    #[test]
    fn test_lines_move_strictly_down_each_page() {
        let doc = layout(&full_record(), &style());
        for page in &doc.pages {
            for pair in page.lines.windows(2) {
                assert!(pair[1].y > pair[0].y, "{:?} then {:?}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn test_header_positions() {
        let doc = layout(&full_record(), &style());
        let lines = &doc.pages[0].lines;
        assert_eq!(lines[0].text, "Jane Doe");
        assert_eq!(lines[0].y, TOP_OFFSET);
        assert_eq!(lines[0].font_size, NAME_FONT_SIZE);
        assert_eq!(lines[0].weight, FontWeight::Bold);
        // name line height + gap
        assert_eq!(lines[1].y, 35.0);
        // contact line height + gap
        assert_eq!(doc.pages[0].rules[0].y, 45.0);
        assert_eq!(lines[2].text, "SUMMARY");
        assert_eq!(lines[2].y, 55.0);
    }

    #[test]
    fn test_job_has_three_styled_sub_lines() {
        let style = TemplateStyle::ModernProfessional.style();
        let doc = layout(&full_record(), &style);
        let job: Vec<&TextLine> = doc
            .lines()
            .map(|(_, line)| line)
            .filter(|line| line.section == Section::Experience)
            .collect();

        assert_eq!(job[0].text, "EXPERIENCE");
        assert_eq!(job[0].color, style.heading);
        assert_eq!(job[1].text, "Senior Engineer");
        assert_eq!(job[1].weight, FontWeight::Bold);
        assert_eq!(job[2].text, "Acme");
        assert_eq!(job[2].color, style.accent);
        assert_eq!(job[3].text, "2020 - 2024");
        assert_eq!(job[3].weight, FontWeight::Regular);
        assert_eq!(job[3].color, Rgb::BLACK);
        assert_eq!(job.len(), 7);
    }

    #[test]
    fn test_job_without_position_or_duration() {
        let record = ResumeRecord {
            experience: vec![Job {
                company: "Acme".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let doc = layout(&record, &style());
        assert_eq!(
            doc.section_lines(Section::Experience),
            vec!["EXPERIENCE", PLACEHOLDER_POSITION, "Acme"]
        );
    }

    #[test]
    fn test_empty_sub_lines_take_no_height() {
        let record = ResumeRecord {
            experience: vec![
                Job {
                    company: "Acme".into(),
                    position: "Dev".into(),
                    ..Default::default()
                },
                Job {
                    position: "Lead".into(),
                    ..Default::default()
                },
            ],
            education: vec![Degree {
                degree: "BSc".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let doc = layout(&record, &style());
        let y_of = |text: &str| {
            doc.lines()
                .map(|(_, line)| line)
                .find(|line| line.text == text)
                .map(|line| line.y)
                .unwrap()
        };

        assert_eq!(y_of("Lead") - y_of("Acme"), LINE_HEIGHT + JOB_SPACING);
        assert_eq!(doc.section_lines(Section::Education), vec!["EDUCATION", "BSc"]);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let mut record = full_record();
        record.cover_letter = numbered_lines(120);
        let first = layout(&record, &style());
        let second = layout(&record, &style());
        assert_eq!(first, second);
    }

    #[test]
    fn test_long_summary_spans_pages_within_bottom_limit() {
        let record = ResumeRecord {
            full_name: "Long Winded".into(),
            summary: "Shipped features across a very wide range of products and teams. "
                .repeat(120),
            ..Default::default()
        };
        let doc = layout(&record, &style());
        assert!(doc.page_count() > 1);
        for (page, line) in doc.lines() {
            assert!(line.y <= BOTTOM_LIMIT, "page {page}: {line:?}");
            assert!(line.y >= TOP_OFFSET, "page {page}: {line:?}");
            let width = measure(&line.text, doc.font, line.weight, line.font_size);
            assert!(width <= CONTENT_WIDTH, "too wide: {}", line.text);
        }
        // the body keeps going on the next page, no repeated heading
        assert_eq!(doc.section_lines(Section::Summary)[0], "SUMMARY");
        assert_eq!(
            doc.section_lines(Section::Summary)
                .iter()
                .filter(|text| **text == "SUMMARY")
                .count(),
            1
        );
        assert_eq!(doc.pages[1].lines[0].y, TOP_OFFSET);
    }

    #[test]
    fn test_cover_letter_page_count() {
        // Cover letter title sits at 45, body starts at 52: 44 lines fit on the
        // first page, then 51 per page (20..=270 in steps of 5).
        let record = ResumeRecord {
            full_name: "A".into(),
            cover_letter: numbered_lines(150),
            ..Default::default()
        };
        let doc = layout(&record, &style());

        assert_eq!(doc.page_count(), 1 + (150_usize - 44).div_ceil(51));
        assert_eq!(doc.pages[0].lines.len(), 1 + 1 + 44);
        assert_eq!(doc.pages[1].lines.len(), 51);
        assert_eq!(doc.pages[2].lines.len(), 51);
        assert_eq!(doc.pages[3].lines.len(), 4);
        assert_eq!(doc.pages[3].lines[3].text, "line149");
        assert_eq!(doc.pages[1].lines.last().map(|l| l.y), Some(BOTTOM_LIMIT));
    }

    #[test]
    fn test_cover_letter_starts_new_page_near_bottom() {
        // Summary body of 35 lines leaves the cursor at 232, past the
        // cover-letter limit.
        let record = ResumeRecord {
            full_name: "A".into(),
            summary: numbered_lines(35),
            cover_letter: "Hello".into(),
            ..Default::default()
        };
        let doc = layout(&record, &style());
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[1].lines[0].text, "COVER LETTER");
        assert_eq!(doc.pages[1].lines[0].y, TOP_OFFSET);
    }

    #[test]
    fn test_cover_letter_stays_when_room_left() {
        let record = ResumeRecord {
            full_name: "A".into(),
            summary: numbered_lines(34),
            cover_letter: "Hello".into(),
            ..Default::default()
        };
        let doc = layout(&record, &style());
        assert_eq!(doc.page_count(), 1);
        let title = doc.pages[0]
            .lines
            .iter()
            .find(|line| line.text == "COVER LETTER")
            .map(|line| line.y);
        assert_eq!(title, Some(227.0));
    }

    #[test]
    fn test_blank_cover_letter_paragraphs_keep_spacing() {
        let record = ResumeRecord {
            cover_letter: "First\n\nSecond".into(),
            ..Default::default()
        };
        let doc = layout(&record, &style());
        let body: Vec<&TextLine> = doc
            .lines()
            .map(|(_, line)| line)
            .filter(|line| line.section == Section::CoverLetter)
            .collect();
        assert_eq!(body.len(), 3);
        assert_eq!(body[2].y - body[1].y, 2.0 * LINE_HEIGHT);
    }

    #[test]
    fn test_blank_paragraph_past_bottom_limit_is_dropped() {
        // 44 lines from 52 end at 267, leaving the cursor at 272.
        let record = ResumeRecord {
            full_name: "A".into(),
            cover_letter: format!("{}\n\nafter", numbered_lines(44)),
            ..Default::default()
        };
        let doc = layout(&record, &style());

        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[0].lines.len(), 1 + 1 + 44);
        assert_eq!(doc.pages[0].lines.last().map(|l| l.y), Some(267.0));
        assert_eq!(doc.pages[1].lines.len(), 1);
        assert_eq!(doc.pages[1].lines[0].text, "after");
        assert_eq!(doc.pages[1].lines[0].y, TOP_OFFSET);
    }

    #[test]
    fn test_document_carries_style_font() {
        let doc = layout(&full_record(), &TemplateStyle::TechDeveloper.style());
        assert_eq!(doc.font, FontFamily::Courier);
    }
}
