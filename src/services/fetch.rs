//! Fetch text from a location: an `http(s)://` URL or a local file path.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {location} failed: {source}")]
    Http {
        location: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{location} returned status {status}")]
    Status { location: String, status: reqwest::StatusCode },
    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
}

/// Whether `location` is fetched over HTTP rather than read from disk.
#[must_use]
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Read the full text at `location`.
///
/// # Errors
///
/// Returns a `FetchError` if the request fails, the server answers with a
/// non-success status, or the file cannot be read.
pub async fn fetch_text(client: &reqwest::Client, location: &str) -> Result<String, FetchError> {
    if !is_remote(location) {
        return tokio::fs::read_to_string(location)
            .await
            .map_err(|source| FetchError::Io { location: location.to_owned(), source });
    }

    let http_err = |source| FetchError::Http { location: location.to_owned(), source };
    let response = client.get(location).send().await.map_err(http_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status { location: location.to_owned(), status });
    }
    response.text().await.map_err(http_err)
}

#[cfg(test)]
#[path = "fetch_test.rs"]
mod tests;
