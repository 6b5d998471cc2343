pub mod check;
pub mod click;
pub mod config;
pub mod preview;

use std::path::Path;

use anyhow::{Context, Result};
use yeki_core::StaticPage;

/// Read a page description, naming the file in errors
pub fn load_page(path: &Path) -> Result<StaticPage> {
    StaticPage::load(path).with_context(|| format!("loading page {}", path.display()))
}
