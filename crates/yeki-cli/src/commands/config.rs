use std::path::Path;

use anyhow::{bail, Result};
use tracing::info;

use yeki_core::AppConfig;

pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}

pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    AppConfig::default().save_to(path)?;
    info!(path = %path.display(), "wrote default configuration");
    println!("Wrote {}", path.display());
    Ok(())
}
