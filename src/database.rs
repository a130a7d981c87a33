use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};

use crate::error::{NewsError, Result, StorageFault};
use crate::feed;
use crate::model::NewsItem;

/// The news collection, kept as one JSON array in one file.
///
/// Every call reads the whole file; writes replace it. Calls on the same
/// store are serialized, so concurrent appends cannot lose each other.
/// Processes sharing the file are not coordinated.
#[derive(Debug)]
pub struct NewsStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl NewsStore {
    pub fn new(path: impl Into<PathBuf>) -> NewsStore {
        NewsStore {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// Like [`NewsStore::new`], but seeds an empty collection when the file
    /// does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<NewsStore> {
        let store = NewsStore::new(path);
        if !store.path.exists() {
            if let Some(parent) = store.path.parent() {
                fs::create_dir_all(parent).map_err(|e| store.unavailable(e))?;
            }
            store.write_all(&[])?;
            info!("created empty news store at {}", store.path.display());
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<NewsItem>> {
        let _guard = self.lock();
        self.read_all()
    }

    /// Appends `item` to the collection and rewrites the file.
    ///
    /// A link already in use is kept as is; lookups will keep returning the
    /// older item.
    pub fn append_and_save(&self, item: NewsItem) -> Result<()> {
        let _guard = self.lock();
        let mut news = self.read_all()?;

        if let Some(id) = item.link_id() {
            if feed::find_by_link(&news, id).is_some() {
                warn!("link {} is already taken; lookups will return the older item", id);
            }
        }

        news.push(item);
        self.write_all(&news)?;
        debug!("news store now holds {} items", news.len());
        Ok(())
    }

    /// Looks up the first item whose link is `id`.
    pub fn find(&self, id: u64) -> Result<NewsItem> {
        let news = self.load()?;
        feed::find_by_link(&news, id)
            .cloned()
            .ok_or(NewsError::NotFound(id))
    }

    /// Stamps a new item and appends it, returning what was written.
    pub fn create(&self, title: Option<&str>, text: Option<&str>) -> Result<NewsItem> {
        let item = NewsItem::fresh(title, text);
        self.append_and_save(item.clone())?;
        Ok(item)
    }

    // The guarded value is `()`, so a poisoned lock carries no broken state.
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.guard.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_all(&self) -> Result<Vec<NewsItem>> {
        let raw = fs::read_to_string(&self.path).map_err(|e| self.unavailable(e))?;
        serde_json::from_str(&raw).map_err(|e| self.unavailable(e))
    }

    // Written beside the target and renamed over it, so readers see either
    // the old or the new collection.
    fn write_all(&self, news: &[NewsItem]) -> Result<()> {
        let payload = serde_json::to_string(news).map_err(|e| self.unavailable(e))?;
        let staging = self.staging_path();
        fs::write(&staging, payload).map_err(|e| self.unavailable(e))?;
        fs::rename(&staging, &self.path).map_err(|e| self.unavailable(e))
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn unavailable(&self, source: impl Into<StorageFault>) -> NewsError {
        NewsError::StorageUnavailable {
            path: self.path.clone(),
            source: source.into(),
        }
    }
}
