//! URL-driven asset loader

use super::{AssetLoader, LoadError, LoadFuture, ParserRegistry};
use std::path::PathBuf;
use std::sync::Arc;

/// Loads models from `http(s)://` URLs, `file://` URLs and plain paths
///
/// The parser is chosen from the URL's extension before anything is
/// fetched, so unsupported formats fail without touching the network.
#[derive(Clone)]
pub struct UrlAssetLoader {
    registry: Arc<ParserRegistry>,
    #[cfg(feature = "network")]
    client: reqwest::Client,
}

impl UrlAssetLoader {
    /// Create a loader with all built-in parsers
    pub fn new() -> Self {
        Self::with_registry(ParserRegistry::new())
    }

    /// Create a loader with a custom parser registry
    pub fn with_registry(registry: ParserRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            #[cfg(feature = "network")]
            client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured HTTP client (proxies, headers, timeouts)
    #[cfg(feature = "network")]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        if url.starts_with("http://") || url.starts_with("https://") {
            return self.fetch_http(url).await;
        }

        let path = if url.starts_with("file://") {
            file_url_path(url)?
        } else if let Some((scheme, _)) = url.split_once("://") {
            return Err(LoadError::UnsupportedScheme(scheme.to_string()));
        } else {
            PathBuf::from(url)
        };

        tokio::fs::read(&path)
            .await
            .map_err(|e| LoadError::from_io(&path.to_string_lossy(), e))
    }

    #[cfg(feature = "network")]
    async fn fetch_http(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?
            .error_for_status()
            .map_err(|e| LoadError::Network(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    #[cfg(not(feature = "network"))]
    async fn fetch_http(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let scheme = url.split_once("://").map_or(url, |(scheme, _)| scheme);
        Err(LoadError::UnsupportedScheme(format!(
            "{scheme} (URL loading requires the 'network' feature)"
        )))
    }
}

/// Local path named by a `file://` URL, percent-decoded, without query
/// string or fragment
#[cfg(feature = "network")]
fn file_url_path(url: &str) -> Result<PathBuf, LoadError> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| LoadError::InvalidData(format!("invalid file URL {url}: {e}")))?;
    parsed
        .to_file_path()
        .map_err(|_| LoadError::InvalidData(format!("not a local file URL: {url}")))
}

/// Local path named by a `file://` URL, without query string or fragment
///
/// Percent-encoded paths need the `network` feature.
#[cfg(not(feature = "network"))]
fn file_url_path(url: &str) -> Result<PathBuf, LoadError> {
    let rest = url.trim_start_matches("file://");
    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    let path = rest[..end].strip_prefix("localhost").unwrap_or(&rest[..end]);
    if !path.starts_with('/') {
        return Err(LoadError::InvalidData(format!("not a local file URL: {url}")));
    }
    Ok(PathBuf::from(path))
}

impl Default for UrlAssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetLoader for UrlAssetLoader {
    fn load(&self, url: &str) -> LoadFuture {
        let loader = self.clone();
        let url = url.to_string();

        Box::pin(async move {
            loader.registry.parser_for(&url)?;

            let bytes = loader.fetch(&url).await?;
            tracing::debug!(url = %url, bytes = bytes.len(), "fetched model");

            // Parsing is CPU-bound; keep it off the async workers
            let registry = Arc::clone(&loader.registry);
            tokio::task::spawn_blocking(move || registry.parse(&url, &bytes))
                .await
                .map_err(|e| LoadError::InvalidData(format!("parser task failed: {e}")))?
        })
    }

    fn name(&self) -> &'static str {
        "URL Asset Loader"
    }
}
