#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Job {
    pub company: String,
    pub position: String,
    pub duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Degree {
    pub degree: String,
    pub university: String,
    pub graduation_year: String,
}

/// One person's resume content, as the layout engine consumes it.
///
/// Empty or whitespace-only strings mean "absent" and suppress whatever
/// block they would have produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeRecord {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<Job>,
    pub education: Vec<Degree>,
    pub projects: Vec<String>,
    pub cover_letter: String,
}

pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// `{name}{_hint}.pdf`, falling back to `resume` when the name is blank.
pub fn output_file_name(full_name: &str, hint: &str) -> String {
    let name = sanitize_file_component(full_name);
    let name = if name.is_empty() {
        "resume".to_string()
    } else {
        name
    };
    let hint = sanitize_file_component(hint);
    if hint.is_empty() {
        format!("{}.pdf", name)
    } else {
        format!("{}_{}.pdf", name, hint)
    }
}

fn sanitize_file_component(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim_matches('.')
        .to_string()
}
