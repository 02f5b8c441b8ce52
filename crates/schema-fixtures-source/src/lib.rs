#![warn(missing_docs)]
//! # schema-fixtures-source
//!
//! ## Purpose
//! Fetches fixture documents for the runner through an injectable transport.
//!
//! ## Responsibilities
//! - Define the [`FixtureSource`] trait the runner depends on.
//! - Classify fixture locations into filesystem paths and HTTP URLs.
//! - Ship filesystem, in-memory and (with the `http` feature) blocking HTTP
//!   sources, plus a [`DefaultSource`] that dispatches on the location scheme.
//!
//! ## Data flow
//! Runner builds `<fixture_dir><type>.json` -> [`FixtureSource::fetch`] ->
//! raw body text handed back for parsing.
//!
//! ## Error model
//! Every failure is a [`FetchError`]. Sources never retry; the runner turns
//! a fetch error into exactly one failed assertion.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::debug;
use url::Url;

/// Transport used to fetch fixture documents.
pub trait FixtureSource: Send + Sync {
    /// Fetches the document at `location` and returns its body.
    ///
    /// Implementations block until the fetch completes.
    fn fetch(&self, location: &str) -> Result<String, FetchError>;
}

/// Classified fixture location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureLocation {
    /// Local filesystem path.
    Path(PathBuf),
    /// Remote `http`/`https` URL.
    Http(Url),
}

/// Classifies a fixture location string.
///
/// Strings without a scheme (and single-letter schemes, which are drive
/// letters) are filesystem paths. `file://` URLs resolve to paths.
///
/// # Errors
/// Returns [`FetchError::InvalidLocation`] for blank strings or `file://`
/// URLs that do not map to a path, and [`FetchError::UnsupportedScheme`] for
/// any other scheme.
pub fn classify_location(location: &str) -> Result<FixtureLocation, FetchError> {
    if location.trim().is_empty() {
        return Err(FetchError::InvalidLocation(
            "fixture location is empty".to_string(),
        ));
    }

    let parsed = match Url::parse(location) {
        Ok(parsed) if parsed.scheme().len() > 1 => parsed,
        _ => return Ok(FixtureLocation::Path(PathBuf::from(location))),
    };

    match parsed.scheme() {
        "file" => parsed
            .to_file_path()
            .map(FixtureLocation::Path)
            .map_err(|()| {
                FetchError::InvalidLocation(format!("file url has no local path: {location}"))
            }),
        "http" | "https" => Ok(FixtureLocation::Http(parsed)),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

/// Reads fixture documents from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileSource;

impl FileSource {
    /// Creates a filesystem source.
    pub fn new() -> Self {
        Self
    }

    fn read(&self, path: &Path) -> Result<String, FetchError> {
        debug!(path = %path.display(), "reading fixture document");
        std::fs::read_to_string(path).map_err(|error| match error.kind() {
            ErrorKind::NotFound => FetchError::NotFound(path.display().to_string()),
            _ => FetchError::Io {
                location: path.display().to_string(),
                source: error,
            },
        })
    }
}

impl FixtureSource for FileSource {
    fn fetch(&self, location: &str) -> Result<String, FetchError> {
        match classify_location(location)? {
            FixtureLocation::Path(path) => self.read(&path),
            FixtureLocation::Http(url) => Err(FetchError::UnsupportedScheme(url.scheme().to_string())),
        }
    }
}

/// In-memory source keyed by exact location string.
///
/// Records every requested location so callers can assert fetch order.
#[derive(Debug, Default)]
pub struct StaticSource {
    documents: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl StaticSource {
    /// Creates an empty in-memory source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a document body under `location`.
    pub fn with_document(mut self, location: impl Into<String>, body: impl Into<String>) -> Self {
        self.documents.insert(location.into(), body.into());
        self
    }

    /// Returns every location requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl FixtureSource for StaticSource {
    fn fetch(&self, location: &str) -> Result<String, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(location.to_string());
        }

        self.documents
            .get(location)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(location.to_string()))
    }
}

/// Blocking HTTP source.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpSource {
    /// Creates an HTTP source with a default client.
    ///
    /// # Errors
    /// Returns [`FetchError::Transport`] when the client cannot be built.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|error| FetchError::Transport(format!("http client setup failed: {error}")))?;
        Ok(Self { client })
    }

    /// Creates an HTTP source around a preconfigured client.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }

    fn get(&self, url: &Url) -> Result<String, FetchError> {
        debug!(url = %url, "requesting fixture document");
        let response = self
            .client
            .get(url.as_str())
            .send()
            .map_err(|error| FetchError::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                location: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .map_err(|error| FetchError::Transport(error.to_string()))
    }
}

#[cfg(feature = "http")]
impl FixtureSource for HttpSource {
    fn fetch(&self, location: &str) -> Result<String, FetchError> {
        match classify_location(location)? {
            FixtureLocation::Http(url) => self.get(&url),
            FixtureLocation::Path(path) => Err(FetchError::InvalidLocation(format!(
                "http source cannot read local path {}",
                path.display()
            ))),
        }
    }
}

/// Source that dispatches on the location scheme.
///
/// Paths and `file://` URLs go to [`FileSource`]. With the `http` feature,
/// `http`/`https` URLs go to an [`HttpSource`] built at construction; a client
/// that failed to build is reported on the first HTTP fetch. Without the
/// feature, HTTP URLs are refused as unsupported.
#[derive(Debug, Clone)]
pub struct DefaultSource {
    files: FileSource,
    #[cfg(feature = "http")]
    http: Result<HttpSource, String>,
}

impl DefaultSource {
    /// Creates a source serving every scheme the enabled features allow.
    pub fn new() -> Self {
        Self {
            files: FileSource::new(),
            #[cfg(feature = "http")]
            http: HttpSource::new().map_err(|error| error.to_string()),
        }
    }

    /// Routes HTTP fetches through `http`.
    #[cfg(feature = "http")]
    pub fn with_http(mut self, http: HttpSource) -> Self {
        self.http = Ok(http);
        self
    }
}

impl Default for DefaultSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureSource for DefaultSource {
    fn fetch(&self, location: &str) -> Result<String, FetchError> {
        match classify_location(location)? {
            FixtureLocation::Path(path) => self.files.read(&path),
            #[cfg(feature = "http")]
            FixtureLocation::Http(url) => match &self.http {
                Ok(http) => http.get(&url),
                Err(reason) => Err(FetchError::Transport(reason.clone())),
            },
            #[cfg(not(feature = "http"))]
            FixtureLocation::Http(url) => Err(FetchError::UnsupportedScheme(url.scheme().to_string())),
        }
    }
}

/// Errors produced while fetching fixture documents.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No document exists at the location.
    #[error("fixture document not found: {0}")]
    NotFound(String),
    /// Filesystem read failure other than not-found.
    #[error("failed to read fixture document {location}: {source}")]
    Io {
        /// Location that failed.
        location: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Location string cannot be fetched.
    #[error("invalid fixture location: {0}")]
    InvalidLocation(String),
    /// Location scheme is not served by this source.
    #[error("unsupported fixture location scheme: {0}")]
    UnsupportedScheme(String),
    /// HTTP request completed with a non-success status.
    #[error("fixture request to {location} returned status {status}")]
    Http {
        /// Requested URL.
        location: String,
        /// HTTP status code.
        status: u16,
    },
    /// Transport-level failure.
    #[error("fixture transport failure: {0}")]
    Transport(String),
}
