//! Model loader system
//!
//! Loading is split in two seams:
//!
//! - [`AssetLoader`] turns a URL into a [`Node`] tree asynchronously. The
//!   swap controller only ever sees this trait.
//! - [`ModelParser`] turns fetched bytes into a [`Node`] tree. The bundled
//!   [`UrlAssetLoader`] picks one from a [`ParserRegistry`] by file extension.
//!
//! Supported formats:
//!
//! - Wavefront OBJ (`.obj`) - Feature: `utils-obj`
//!
//! # Example
//!
//! ```ignore
//! use vista_3d::utils::loader::*;
//!
//! let loader = UrlAssetLoader::new();
//! let node = loader.load("https://example.com/models/teapot.obj").await?;
//! println!("{} triangles", node.triangle_count());
//! ```

#[cfg(feature = "utils-obj")]
mod obj;
mod url;

#[cfg(feature = "utils-obj")]
pub use self::obj::ObjParser;
pub use self::url::UrlAssetLoader;

use crate::scene::Node;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Error type for model loading operations
#[derive(Debug, Error)]
pub enum LoadError {
    /// File not found
    #[error("file not found: {0}")]
    NotFound(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),
    /// Transport or HTTP status failure
    #[error("network error: {0}")]
    Network(String),
    /// URL scheme the loader cannot fetch
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    /// No parser for the extension
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    /// Parse error
    #[error("parse error: {0}")]
    Parse(String),
    /// Parsed successfully but unusable
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl LoadError {
    /// Map an IO error for `path`, keeping not-found distinct
    pub fn from_io(path: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound(path.to_string())
        } else {
            LoadError::Io(err)
        }
    }
}

/// Boxed future resolving to a loaded model
pub type LoadFuture = Pin<Box<dyn Future<Output = Result<Node, LoadError>> + Send + 'static>>;

/// Asynchronous URL to node-tree loader
///
/// One-shot: no retry and no timeout. The returned future must not borrow
/// the loader, so it can run as a detached task.
pub trait AssetLoader: Send + Sync {
    /// Start loading `url`
    fn load(&self, url: &str) -> LoadFuture;

    /// Get the loader name for debugging
    fn name(&self) -> &'static str;
}

/// Trait for model format parsers
pub trait ModelParser: Send + Sync {
    /// Parse fetched bytes; `name` becomes the root node's name
    fn parse(&self, name: &str, bytes: &[u8]) -> Result<Node, LoadError>;

    /// Get supported file extensions
    fn supported_extensions(&self) -> &[&str];

    /// Check if this parser can handle the given extension
    fn can_parse(&self, extension: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }

    /// Get the parser name for debugging
    fn name(&self) -> &'static str;
}

/// Registry of available model parsers
pub struct ParserRegistry {
    parsers: Vec<Box<dyn ModelParser>>,
}

impl ParserRegistry {
    /// Create a new registry with all available parsers
    pub fn new() -> Self {
        #[allow(unused_mut)]
        let mut parsers: Vec<Box<dyn ModelParser>> = Vec::new();

        #[cfg(feature = "utils-obj")]
        parsers.push(Box::new(ObjParser::new()));

        Self { parsers }
    }

    /// Create a registry with no parsers
    pub fn empty() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Register a custom parser
    pub fn register(&mut self, parser: Box<dyn ModelParser>) {
        self.parsers.push(parser);
    }

    /// Find the parser for a URL's extension
    pub fn parser_for(&self, url: &str) -> Result<&dyn ModelParser, LoadError> {
        let extension = url_extension(url).unwrap_or_default();
        self.parsers
            .iter()
            .find(|p| p.can_parse(extension))
            .map(|p| p.as_ref())
            .ok_or_else(|| LoadError::UnsupportedFormat(display_extension(extension)))
    }

    /// Parse bytes fetched from `url`
    pub fn parse(&self, url: &str, bytes: &[u8]) -> Result<Node, LoadError> {
        let parser = self.parser_for(url)?;
        tracing::debug!(url, parser = parser.name(), bytes = bytes.len(), "parsing model");
        parser.parse(url_file_stem(url).unwrap_or("model"), bytes)
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn display_extension(extension: &str) -> String {
    if extension.is_empty() {
        "(no extension)".to_string()
    } else {
        extension.to_string()
    }
}

/// Last path segment of a URL with query string and fragment removed
fn url_file_name(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..end];
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// File extension of a URL, ignoring query string and fragment
pub fn url_extension(url: &str) -> Option<&str> {
    let (stem, extension) = url_file_name(url).rsplit_once('.')?;
    (!stem.is_empty() && !extension.is_empty()).then_some(extension)
}

/// File name without extension, ignoring query string and fragment
pub fn url_file_stem(url: &str) -> Option<&str> {
    let name = url_file_name(url);
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };
    (!stem.is_empty()).then_some(stem)
}
