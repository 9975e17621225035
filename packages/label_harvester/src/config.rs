use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Command-line arguments for the label harvester
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to a configuration file in YAML format. Built-in defaults are used when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Application configuration structure
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Base URL of the catalog API, without trailing slash
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Prefix joined with a document's label folder and file name
    #[serde(default = "default_file_host")]
    pub file_host: String,
    /// First manufacturer ID to query
    #[serde(default)]
    pub manufacturer_start: u32,
    /// Manufacturer ID at which the sweep stops (exclusive)
    #[serde(default = "default_manufacturer_end")]
    pub manufacturer_end: u32,
    /// Directory where files will be downloaded
    #[serde(default = "default_download_dir")]
    pub download_dir: String,
    /// Upper bound for a single document download, in seconds
    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,
    /// Whether to download the files, or only list their URLs
    #[serde(default = "default_download")]
    pub download: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            file_host: default_file_host(),
            manufacturer_start: 0,
            manufacturer_end: default_manufacturer_end(),
            download_dir: default_download_dir(),
            download_timeout_secs: default_download_timeout_secs(),
            download: default_download(),
        }
    }
}

impl Config {
    /// Reads the YAML file at `path`, or falls back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let config_file = File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        let reader = BufReader::new(config_file);
        serde_yaml::from_reader(reader).context("Failed to parse config YAML")
    }

    pub fn manufacturer_ids(&self) -> Range<u32> {
        self.manufacturer_start..self.manufacturer_end
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    pub fn product_list_url(&self, manufacturer_id: u32) -> String {
        format!("{}/ProductList?manId={}", self.api_base_url, manufacturer_id)
    }

    pub fn document_list_url(&self, product_id: i64) -> String {
        format!("{}/DocumentList?productId={}", self.api_base_url, product_id)
    }

    /// Plain concatenation; the label folder carries its own slashes.
    pub fn document_url(&self, label_folder: &str, file_name: &str) -> String {
        format!("{}{}{}", self.file_host, label_folder, file_name)
    }
}

fn default_api_base_url() -> String {
    "https://www.cdms.telusagcg.com/labelssds/Home".to_string()
}
fn default_file_host() -> String {
    "https://www.cdms.telusagcg.com/".to_string()
}
fn default_manufacturer_end() -> u32 {
    1000
}
fn default_download_dir() -> String {
    "PDFs".to_string()
}
fn default_download_timeout_secs() -> u64 {
    30
}
fn default_download() -> bool {
    true
}
