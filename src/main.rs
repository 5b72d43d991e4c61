use anyhow::{Context, Result};
use log::{debug, error, info};

use resume_pdf::config::ExportConfig;
use resume_pdf::{read_record, render};

fn main() -> Result<()> {
    env_logger::init();

    let config = ExportConfig::from_env_args()?;
    info!(
        "Exporting {} with the {} template into {}",
        config.input.display(),
        config.template,
        config.out_dir.display()
    );

    match export_resume(&config) {
        Ok(_) => {
            info!("Export completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Export failed: {:?}", e);
            Err(e)
        }
    }
}

fn export_resume(config: &ExportConfig) -> Result<()> {
    let record = read_record(&config.input)?;
    let handle = render(&record, &config.template.style(), &config.suffix);
    debug!(
        "Laid out '{}' on {} pages",
        handle.file_name,
        handle.page_count()
    );

    let path = handle
        .save(&config.out_dir)
        .with_context(|| format!("Failed to export {}", handle.file_name))?;
    println!("{}", path.display());
    Ok(())
}
