use anyhow::{Context, Result};
use std::path::Path;

/// Creates directory if it doesn't exist
///
/// # Arguments
/// * `dir` - Path to the directory
pub fn create_dir(dir: &str) -> Result<()> {
    if !Path::new(dir).is_dir() {
        std::fs::create_dir_all(dir).context(format!("Failed to create directory {}", dir))?;
    }
    Ok(())
}

/// Returns true only for an existing regular file; directories and missing paths are false.
pub fn file_exists(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}
