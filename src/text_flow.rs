use crate::font_metrics::{get_metrics, FontFamily, FontWeight};

/// Greedy word wrap.
///
/// Newlines split the text into paragraphs; a blank paragraph comes back as an
/// empty line so vertical spacing survives. Within a paragraph words are packed
/// while `line + " " + word` fits `max_width`. Words are never split, so a
/// single word wider than `max_width` gets a line of its own.
pub fn wrap_text(
    text: &str,
    max_width: f32,
    family: FontFamily,
    weight: FontWeight,
    font_size: f32,
) -> Vec<String> {
    let metrics = get_metrics(family, weight);
    let space_width = metrics.measure(" ", font_size);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current_line = String::new();
        let mut current_width = 0.0;

        for word in paragraph.split_whitespace() {
            let word_width = metrics.measure(word, font_size);

            if !current_line.is_empty() && current_width + space_width + word_width > max_width {
                lines.push(std::mem::take(&mut current_line));
                current_width = 0.0;
            }

            if !current_line.is_empty() {
                current_line.push(' ');
                current_width += space_width;
            }
            current_line.push_str(word);
            current_width += word_width;
        }

        lines.push(current_line);
    }

    lines
}
