use std::{
    collections::HashMap,
    io::Write as _,
    path::{Path, PathBuf},
    sync::{
        Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

use md5::{Digest, Md5};

use crate::foundation::error::{SvgaError, SvgaResult};

/// Environment variable overriding the default cache directory.
pub const CACHE_DIR_ENV: &str = "SVGA_CACHE_DIR";

const ENTRY_EXT: &str = "svga";

/// Key/value byte store consulted by URL loads.
///
/// `get` returns `Ok(None)` for a miss and an error for an entry that exists but cannot be
/// read back; the loader removes such entries and refetches.
pub trait ByteCache: Send + Sync {
    fn get(&self, key: &str) -> SvgaResult<Option<Vec<u8>>>;

    fn put(&self, key: &str, bytes: &[u8]) -> SvgaResult<()>;

    fn remove(&self, key: &str) -> SvgaResult<()>;

    fn clear(&self) -> SvgaResult<()>;
}

/// 32-character lowercase hex MD5 digest of `url`.
pub fn cache_key(url: &str) -> String {
    format!("{:x}", Md5::digest(url.as_bytes()))
}

/// One file per entry under a directory. Writes go through a temp file and a rename.
#[derive(Clone, Debug)]
pub struct FsByteCache {
    dir: PathBuf,
}

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

impl FsByteCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache rooted at [`FsByteCache::default_dir`].
    pub fn open_default() -> Self {
        Self::new(Self::default_dir())
    }

    /// `$SVGA_CACHE_DIR`, else the platform cache dir plus `svga`, else the temp dir plus `svga`.
    pub fn default_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(CACHE_DIR_ENV).filter(|v| !v.is_empty()) {
            return PathBuf::from(dir);
        }
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("svga")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> SvgaResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{ENTRY_EXT}")))
    }
}

fn validate_key(key: &str) -> SvgaResult<()> {
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(SvgaError::validation(format!("invalid cache key '{key}'")));
    }
    Ok(())
}

impl ByteCache for FsByteCache {
    fn get(&self, key: &str) -> SvgaResult<Option<Vec<u8>>> {
        let path = self.entry_path(key)?;
        match std::fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => Err(SvgaError::cache(format!(
                "empty cache entry '{}'",
                path.display()
            ))),
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SvgaError::cache(format!(
                "read '{}': {e}",
                path.display()
            ))),
        }
    }

    fn put(&self, key: &str, bytes: &[u8]) -> SvgaResult<()> {
        let path = self.entry_path(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            SvgaError::cache(format!("create cache dir '{}': {e}", self.dir.display()))
        })?;

        let tmp = self.dir.join(format!(
            "{key}.{}.{}.tmp",
            std::process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        let write = || -> std::io::Result<()> {
            let mut f = std::fs::File::create(&tmp)?;
            f.write_all(bytes)?;
            f.sync_all()?;
            std::fs::rename(&tmp, &path)
        };
        write().map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            SvgaError::cache(format!("write '{}': {e}", path.display()))
        })?;
        tracing::debug!(key, len = bytes.len(), "cache entry written");
        Ok(())
    }

    fn remove(&self, key: &str) -> SvgaResult<()> {
        let path = self.entry_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SvgaError::cache(format!(
                "remove '{}': {e}",
                path.display()
            ))),
        }
    }

    fn clear(&self) -> SvgaResult<()> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(SvgaError::cache(format!(
                    "list '{}': {e}",
                    self.dir.display()
                )));
            }
        };
        for entry in entries {
            let path = entry
                .map_err(|e| SvgaError::cache(format!("list '{}': {e}", self.dir.display())))?
                .path();
            if path.extension().is_some_and(|ext| ext == ENTRY_EXT) {
                std::fs::remove_file(&path).map_err(|e| {
                    SvgaError::cache(format!("remove '{}': {e}", path.display()))
                })?;
            }
        }
        Ok(())
    }
}

/// In-process cache.
#[derive(Debug, Default)]
pub struct MemoryByteCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryByteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A poisoned map is still structurally valid.
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ByteCache for MemoryByteCache {
    fn get(&self, key: &str) -> SvgaResult<Option<Vec<u8>>> {
        Ok(self.lock().get(key).cloned())
    }

    fn put(&self, key: &str, bytes: &[u8]) -> SvgaResult<()> {
        self.lock().insert(key.to_owned(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> SvgaResult<()> {
        self.lock().remove(key);
        Ok(())
    }

    fn clear(&self) -> SvgaResult<()> {
        self.lock().clear();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/load/cache.rs"]
mod tests;
