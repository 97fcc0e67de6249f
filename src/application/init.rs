//! Initialize configuration use case

use crate::error::{PontoError, Result};
use crate::infrastructure::config::{CONFIG_FILE, DEFAULT_TEMPLATE};
use std::fs;
use std::path::{Path, PathBuf};

/// Write a starter ponto.toml into `path`, creating the directory if needed
pub fn init(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        return Err(PontoError::Config(format!(
            "Already initialized: {}",
            config_path.display()
        )));
    }

    fs::write(&config_path, DEFAULT_TEMPLATE)?;

    println!("Created {}", config_path.display());
    println!("Edit the [roster] and [[terminal]] entries to match your files.");

    Ok(config_path)
}
