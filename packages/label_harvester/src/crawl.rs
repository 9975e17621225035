//! Sequential sweep over the manufacturer range: product list, document list,
//! then one download per document.

use crate::catalog::{extract_ids, extract_label_data, LabelData};
use crate::config::Config;
use crate::download::{download_document, DownloadOutcome};
use crate::error::{on_error, StageError, Step};
use crate::fetch::fetch_text;
use crate::utils::file::create_dir;

use anyhow::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::info;
use reqwest::Client;
use std::path::Path;

/// Counters collected over one sweep
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    pub manufacturers_scanned: u64,
    pub products_seen: u64,
    pub documents_seen: u64,
    pub saved: u64,
    pub already_present: u64,
    /// Documents logged without downloading (listing mode)
    pub listed: u64,
    /// Units of work dropped after a stage error or an empty response
    pub skipped: u64,
}

pub struct Crawler {
    client: Client,
    config: Config,
    multi_progress: MultiProgress,
}

impl Crawler {
    pub fn new(client: Client, config: Config) -> Self {
        Self::with_progress(client, config, MultiProgress::new())
    }

    pub fn with_progress(client: Client, config: Config, multi_progress: MultiProgress) -> Self {
        Self {
            client,
            config,
            multi_progress,
        }
    }

    /// Runs the full sweep. Only output directory bootstrap can fail; every
    /// later error drops the current unit of work and the sweep carries on.
    pub async fn run(&self) -> Result<CrawlSummary> {
        if self.config.download {
            create_dir(&self.config.download_dir)?;
        }

        let ids = self.config.manufacturer_ids();
        info!("Sweeping manufacturer IDs {}..{}", ids.start, ids.end);

        let pb = self.multi_progress.add(ProgressBar::new(ids.len() as u64));
        pb.set_style(sweep_style());
        pb.set_message("Manufacturers");

        let mut summary = CrawlSummary::default();
        for manufacturer_id in ids {
            summary.manufacturers_scanned += 1;
            if let Err(e) = self.crawl_manufacturer(manufacturer_id, &mut summary).await {
                match on_error(&e) {
                    Step::Continue => summary.skipped += 1,
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        info!("Sweep finished: {:?}", summary);
        Ok(summary)
    }

    async fn crawl_manufacturer(
        &self,
        manufacturer_id: u32,
        summary: &mut CrawlSummary,
    ) -> Result<(), StageError> {
        let page = fetch_text(&self.client, &self.config.product_list_url(manufacturer_id)).await?;
        if page.is_empty() {
            return Err(StageError::NoData(format!(
                "empty product list for manufacturer {}",
                manufacturer_id
            )));
        }

        let product_ids = extract_ids(&page)?;
        if product_ids.is_empty() {
            return Err(StageError::NoData(format!(
                "no products for manufacturer {}",
                manufacturer_id
            )));
        }

        for product_id in product_ids {
            summary.products_seen += 1;
            match self.fetch_label_data(product_id).await {
                Ok(label) => self.process_label(&label, summary).await,
                Err(e) => match on_error(&e) {
                    Step::Continue => summary.skipped += 1,
                },
            }
        }
        Ok(())
    }

    async fn fetch_label_data(&self, product_id: i64) -> Result<LabelData, StageError> {
        let doc = fetch_text(&self.client, &self.config.document_list_url(product_id)).await?;
        if doc.is_empty() {
            return Err(StageError::NoData(format!(
                "empty document list for product {}",
                product_id
            )));
        }

        let label = extract_label_data(&doc)?;
        if !label.is_usable() {
            return Err(StageError::NoData(format!(
                "no label folder or documents for product {}",
                product_id
            )));
        }
        Ok(label)
    }

    async fn process_label(&self, label: &LabelData, summary: &mut CrawlSummary) {
        for file_name in &label.file_names {
            summary.documents_seen += 1;
            let remote_url = self.config.document_url(&label.folder, file_name);

            if !self.config.download {
                info!("Document: {}", remote_url);
                summary.listed += 1;
                continue;
            }

            let outcome = download_document(
                &self.client,
                &remote_url,
                Path::new(&self.config.download_dir),
                self.config.download_timeout(),
                &self.multi_progress,
            )
            .await;
            match outcome {
                Ok(DownloadOutcome::Saved { .. }) => summary.saved += 1,
                Ok(DownloadOutcome::AlreadyExists(_)) => summary.already_present += 1,
                Err(e) => match on_error(&e) {
                    Step::Continue => summary.skipped += 1,
                },
            }
        }
    }
}

fn sweep_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}
