use crate::names::NameIndex;
use once_cell::sync::OnceCell;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Fixed path the names document is served from.
pub const SUGGEST_PATH: &str = "/suggest";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("names request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("names request returned {0}")]
    Status(u16),

    #[error("failed to read names file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid names document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("names task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Where the names document comes from.
pub trait NameSource: Send + Sync {
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<String, LoadError>;

    fn load(&self) -> Result<NameIndex, LoadError> {
        let body = self.fetch()?;
        Ok(NameIndex::from_json(&body)?)
    }
}

/// Fetches the names with the blocking HTTP client and its default timeouts.
/// Must not run on a runtime worker; see [`load_blocking`].
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(endpoint: &str) -> Self {
        HttpSource {
            url: format!("{}{}", endpoint.trim_end_matches('/'), SUGGEST_PATH),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl NameSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        let client = reqwest::blocking::Client::builder().build()?;
        let response = client.get(&self.url).send()?;
        if !response.status().is_success() {
            return Err(LoadError::Status(response.status().as_u16()));
        }
        Ok(response.text()?)
    }
}

/// Loads `source` on tokio's blocking pool, for callers on the runtime.
pub async fn load_blocking(source: Arc<dyn NameSource>) -> Result<NameIndex, LoadError> {
    tokio::task::spawn_blocking(move || source.load()).await?
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

impl NameSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Session-wide names cache. Written at most once, never invalidated.
#[derive(Debug, Default)]
pub struct NameCache {
    index: OnceCell<NameIndex>,
}

impl NameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.index.get().is_some()
    }

    pub fn get(&self) -> Option<&NameIndex> {
        self.index.get()
    }

    // first install wins; the cache is immutable afterwards
    pub fn install(&self, index: NameIndex) -> &NameIndex {
        if self.index.set(index).is_err() {
            debug!("names cache already populated, dropping second index");
        }
        self.index.get_or_init(NameIndex::new)
    }

    /// Runs `on_ready` with the cached index, fetching it from `source` first
    /// when the cache is empty. On a failed fetch `on_ready` is never called
    /// and the cache stays empty, so the next call fetches again.
    pub fn ensure_loaded<R>(
        &self,
        source: &dyn NameSource,
        on_ready: impl FnOnce(&NameIndex) -> R,
    ) -> Result<R, LoadError> {
        let index = self.index.get_or_try_init(|| {
            debug!(source = %source.describe(), "fetching names");
            let index = source.load()?;
            info!(names = index.len(), source = %source.describe(), "names loaded");
            Ok::<_, LoadError>(index)
        })?;
        Ok(on_ready(index))
    }
}
