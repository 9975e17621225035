use crate::error::StageError;

use reqwest::Client;

/// Fetches the body of `url` as text.
///
/// No timeout and no status check: an error page comes back as text and fails
/// decoding downstream. An empty body is `Ok("")`.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, StageError> {
    let transport = |source| StageError::Transport {
        url: url.to_string(),
        source,
    };
    let response = client.get(url).send().await.map_err(transport)?;
    response.text().await.map_err(transport)
}
