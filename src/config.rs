use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::style::TemplateStyle;

pub const OUT_DIR_ENV: &str = "RESUME_PDF_OUT_DIR";
pub const TEMPLATE_ENV: &str = "RESUME_PDF_TEMPLATE";

pub const USAGE: &str =
    "Usage: resume-pdf <record.json> [--out-dir <dir>] [--suffix <text>] [--template <name|id>]";

/// Export settings for one CLI run.
///
/// Flags win over `RESUME_PDF_OUT_DIR` / `RESUME_PDF_TEMPLATE`, which win over
/// the defaults (current directory, default template, no suffix).
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub suffix: String,
    pub template: TemplateStyle,
}

impl ExportConfig {
    pub fn from_env_args() -> Result<Self> {
        Self::from_args(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// `args` excludes the program name.
    pub fn from_args<I, F>(args: I, env: F) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut input = None;
        let mut out_dir = None;
        let mut suffix = String::new();
        let mut template = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out-dir" => out_dir = Some(PathBuf::from(flag_value(&mut args, &arg)?)),
                "--suffix" => suffix = flag_value(&mut args, &arg)?,
                "--template" => template = Some(flag_value(&mut args, &arg)?),
                flag if flag.starts_with("--") => bail!("Unknown option {}\n{}", flag, USAGE),
                path if input.is_none() => input = Some(PathBuf::from(path)),
                extra => bail!("Unexpected argument {}\n{}", extra, USAGE),
            }
        }

        let input = input.with_context(|| USAGE.to_string())?;
        let out_dir = out_dir
            .or_else(|| env(OUT_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        let template = match template.or_else(|| env(TEMPLATE_ENV)) {
            Some(raw) => raw
                .parse::<TemplateStyle>()
                .with_context(|| format!("Invalid template '{}'", raw))?,
            None => TemplateStyle::default(),
        };

        Ok(ExportConfig {
            input,
            out_dir,
            suffix,
            template,
        })
    }
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("Missing value for {}\n{}", flag, USAGE))
}
