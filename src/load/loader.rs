use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::JoinHandle,
};

use crate::{
    decode::parser::SvgaParser,
    foundation::error::{SvgaError, SvgaResult},
    load::{
        cache::{ByteCache, cache_key},
        fetch::ByteFetcher,
    },
    scene::model::Document,
};

/// Where a document comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadSource {
    Bytes(Vec<u8>),
    File(PathBuf),
    Url(String),
}

impl From<Vec<u8>> for LoadSource {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<PathBuf> for LoadSource {
    fn from(value: PathBuf) -> Self {
        Self::File(value)
    }
}

/// Front door for turning bytes, files and URLs into documents.
///
/// URL loads go through the optional [`ByteCache`] keyed by [`cache_key`]. An unreadable
/// cache entry is removed and the load proceeds as a miss.
#[derive(Clone)]
pub struct SvgaLoader {
    parser: SvgaParser,
    cache: Option<Arc<dyn ByteCache>>,
    fetcher: Option<Arc<dyn ByteFetcher>>,
}

impl Default for SvgaLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SvgaLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgaLoader")
            .field("parser", &self.parser)
            .field("cache", &self.cache.is_some())
            .field("fetcher", &self.fetcher.is_some())
            .finish()
    }
}

impl SvgaLoader {
    /// Loader with the default parser, no cache and, with the `http` feature, an HTTP fetcher.
    pub fn new() -> Self {
        Self {
            parser: SvgaParser::new(),
            cache: None,
            fetcher: default_fetcher(),
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn ByteCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn ByteFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_parser(mut self, parser: SvgaParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn parser(&self) -> &SvgaParser {
        &self.parser
    }

    pub fn load_bytes(&self, bytes: &[u8]) -> SvgaResult<Document> {
        self.parser.decode_bytes(bytes)
    }

    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn load_file(&self, path: &Path) -> SvgaResult<Document> {
        let bytes = read_file(path)?;
        self.parser.decode_bytes(&bytes)
    }

    #[tracing::instrument(skip(self))]
    pub fn load_url(&self, url: &str) -> SvgaResult<Document> {
        self.url_stages(url, &AtomicBool::new(false))
    }

    pub fn load(&self, source: LoadSource) -> SvgaResult<Document> {
        self.load_with_cancel(source, &AtomicBool::new(false))
    }

    /// Run [`SvgaLoader::load`] on a worker thread.
    pub fn spawn(&self, source: LoadSource) -> SvgaResult<LoadHandle> {
        let cancel = Arc::new(AtomicBool::new(false));
        let loader = self.clone();
        let flag = Arc::clone(&cancel);
        let join = std::thread::Builder::new()
            .name("svga-load".into())
            .spawn(move || loader.load_with_cancel(source, &flag))
            .map_err(|e| SvgaError::Other(anyhow::anyhow!("spawn load worker: {e}")))?;
        Ok(LoadHandle { cancel, join })
    }

    fn load_with_cancel(&self, source: LoadSource, cancel: &AtomicBool) -> SvgaResult<Document> {
        match source {
            LoadSource::Url(url) => self.url_stages(&url, cancel),
            LoadSource::Bytes(bytes) => {
                checkpoint(cancel)?;
                self.parser.decode_bytes(&bytes)
            }
            LoadSource::File(path) => {
                checkpoint(cancel)?;
                let bytes = read_file(&path)?;
                checkpoint(cancel)?;
                self.parser.decode_bytes(&bytes)
            }
        }
    }

    fn url_stages(&self, url: &str, cancel: &AtomicBool) -> SvgaResult<Document> {
        let run = || -> SvgaResult<Document> {
            let bytes = self.url_bytes(url, cancel)?;
            checkpoint(cancel)?;
            self.parser.decode_bytes(&bytes)
        };
        run().map_err(|e| e.with_stage("Failed to decode SVGA from URL"))
    }

    fn url_bytes(&self, url: &str, cancel: &AtomicBool) -> SvgaResult<Vec<u8>> {
        let key = cache_key(url);

        if let Some(cache) = &self.cache {
            match cache.get(&key) {
                Ok(Some(bytes)) => {
                    tracing::debug!(%key, len = bytes.len(), "cache hit");
                    return Ok(bytes);
                }
                Ok(None) => tracing::debug!(%key, "cache miss"),
                Err(err) => {
                    tracing::warn!(%key, %err, "cache entry unreadable, refetching");
                    if let Err(err) = cache.remove(&key) {
                        tracing::debug!(%key, %err, "failed to drop cache entry");
                    }
                }
            }
        }

        checkpoint(cancel)?;
        let fetcher = self
            .fetcher
            .as_ref()
            .ok_or_else(|| SvgaError::unavailable("no network fetcher configured"))?;
        let bytes = fetcher.fetch(url)?;
        checkpoint(cancel)?;

        if let Some(cache) = &self.cache
            && let Err(err) = cache.put(&key, &bytes)
        {
            tracing::warn!(%key, %err, "failed to write cache entry");
        }
        Ok(bytes)
    }
}

/// Handle to a load running on a worker thread.
#[derive(Debug)]
pub struct LoadHandle {
    cancel: Arc<AtomicBool>,
    join: JoinHandle<SvgaResult<Document>>,
}

impl LoadHandle {
    /// Request cancellation. Takes effect at the next stage boundary.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the worker and return its result.
    pub fn join(self) -> SvgaResult<Document> {
        self.join
            .join()
            .map_err(|_| SvgaError::Other(anyhow::anyhow!("load worker panicked")))?
    }
}

fn checkpoint(cancel: &AtomicBool) -> SvgaResult<()> {
    if cancel.load(Ordering::Acquire) {
        return Err(SvgaError::Cancelled);
    }
    Ok(())
}

fn read_file(path: &Path) -> SvgaResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        tracing::debug!(path = %path.display(), err = %e, "file read failed");
        SvgaError::unavailable(format!("File not found or unreadable: {}", path.display()))
    })
}

#[cfg(feature = "http")]
fn default_fetcher() -> Option<Arc<dyn ByteFetcher>> {
    match crate::load::fetch::HttpFetcher::new() {
        Ok(f) => Some(Arc::new(f)),
        Err(err) => {
            tracing::warn!(%err, "http fetcher unavailable");
            None
        }
    }
}

#[cfg(not(feature = "http"))]
fn default_fetcher() -> Option<Arc<dyn ByteFetcher>> {
    None
}

#[cfg(test)]
#[path = "../../tests/unit/load/loader.rs"]
mod tests;
