// src/github/fetch.rs
// =============================================================================
// Downloads raw file contents (download_url from a contents listing).
//
// Unlike the API client this path is forgiving: any failure (non-200,
// network error, undecodable body) means "content unavailable" and comes
// back as None. The caller still builds a record, just without that text.
// =============================================================================

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

// Fetches content from a download URL
//
// Returns: Some(text) on HTTP 200, None otherwise
pub async fn fetch_raw(client: &Client, url: &str) -> Option<String> {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(%url, error = %e, "Could not download file");
            return None;
        }
    };

    if response.status() != StatusCode::OK {
        debug!(%url, status = %response.status(), "Download returned non-200");
        return None;
    }

    match response.text().await {
        Ok(content) => Some(content),
        Err(e) => {
            warn!(%url, error = %e, "Could not read file body");
            None
        }
    }
}
