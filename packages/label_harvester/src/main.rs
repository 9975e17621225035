//! A CLI tool that sweeps a label catalog API by manufacturer ID and downloads every
//! referenced PDF label and safety data sheet.
//!
//! For each manufacturer it fetches the product list, for each product the document
//! list, and downloads each document into a single output directory. Files already on
//! disk are skipped, so re-running only fetches what is missing. Errors are logged
//! and the sweep moves on to the next ID.

mod catalog;
mod config;
mod crawl;
mod download;
mod error;
mod fetch;
mod models;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Args, Config};
use crawl::Crawler;
use log::info;
use reqwest::Client;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let client = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    if config.download {
        info!("Downloading documents into {}", config.download_dir);
    } else {
        info!("Listing mode: documents will not be downloaded");
    }

    let summary = Crawler::new(client, config).run().await?;

    info!(
        "Saved {} new files, {} already present, {} listed, {} skipped",
        summary.saved, summary.already_present, summary.listed, summary.skipped
    );

    Ok(())
}
