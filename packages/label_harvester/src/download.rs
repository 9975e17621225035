use crate::error::StageError;
use crate::utils::file::file_exists;
use crate::utils::filename::url_to_filename;

use futures::StreamExt;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{info, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File as AsyncFile;
use tokio::io::{AsyncWrite, AsyncWriteExt};

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Result of a download attempt that did not fail
#[derive(Debug, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// A regular file was already present at the target path; nothing was fetched.
    AlreadyExists(PathBuf),
    /// The document was fetched and written.
    Saved { path: PathBuf, bytes: u64 },
}

/// Downloads a single PDF into `output_dir` unless it is already there
///
/// # Arguments
/// * `client` - HTTP client instance
/// * `url` - Remote document URL
/// * `output_dir` - Directory to save the downloaded file
/// * `timeout` - Upper bound for the whole request, body included
/// * `multi_progress` - MultiProgress instance for tracking progress
///
/// Nothing touches the filesystem until the complete, non-empty body is in memory.
/// If the write fails afterwards, the partial file is removed.
pub async fn download_document(
    client: &Client,
    url: &str,
    output_dir: &Path,
    timeout: Duration,
    multi_progress: &MultiProgress,
) -> Result<DownloadOutcome, StageError> {
    let file_path = output_dir.join(url_to_filename(url));

    if file_exists(&file_path) {
        info!("File already exists, skipping: {}", file_path.display());
        return Ok(DownloadOutcome::AlreadyExists(file_path));
    }

    let transport = |source| StageError::Transport {
        url: url.to_string(),
        source,
    };

    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(transport)?;

    if response.status() != StatusCode::OK {
        return Err(StageError::HttpStatus {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .unwrap_or_default();
    if !content_type.contains(PDF_CONTENT_TYPE) {
        return Err(StageError::ContentType {
            url: url.to_string(),
            content_type,
        });
    }

    let pb = multi_progress.add(ProgressBar::new(response.content_length().unwrap_or(0)));
    pb.set_style(bar_style());
    pb.set_message(file_path.display().to_string());

    let mut buffer = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(source) => {
                pb.abandon();
                return Err(transport(source));
            }
        };
        buffer.extend_from_slice(&chunk);
        pb.set_position(buffer.len() as u64);
    }
    pb.finish_and_clear();

    if buffer.is_empty() {
        return Err(StageError::EmptyBody {
            url: url.to_string(),
        });
    }

    write_file(&file_path, &buffer).await?;

    let bytes = buffer.len() as u64;
    info!(
        "Successfully downloaded {} bytes: {} → {}",
        bytes,
        url,
        file_path.display()
    );
    Ok(DownloadOutcome::Saved {
        path: file_path,
        bytes,
    })
}

async fn write_file(file_path: &Path, buffer: &[u8]) -> Result<(), StageError> {
    let file = AsyncFile::create(file_path)
        .await
        .map_err(|source| StageError::Filesystem {
            path: file_path.to_path_buf(),
            source,
        })?;
    write_or_remove(file, file_path, buffer).await
}

/// Writes `buffer` into `sink`, the open handle of `file_path`. On failure the
/// handle is dropped and the file at `file_path` removed.
async fn write_or_remove<W>(mut sink: W, file_path: &Path, buffer: &[u8]) -> Result<(), StageError>
where
    W: AsyncWrite + Unpin,
{
    let written = match sink.write_all(buffer).await {
        Ok(()) => sink.flush().await,
        Err(e) => Err(e),
    };
    if let Err(source) = written {
        drop(sink);
        if let Err(e) = tokio::fs::remove_file(file_path).await {
            warn!(
                "Failed to remove partial download {}: {}",
                file_path.display(),
                e
            );
        }
        return Err(StageError::Filesystem {
            path: file_path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}
