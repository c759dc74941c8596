//! Run-scoped URL deduplication.
//!
//! Every URL is claimed here before any network call. A claim marks the URL
//! seen and hands out a ticket from an atomic counter; the ticket numbers the
//! synthetic `downloaded_image_<n>.jpeg` filenames, so two workers can never
//! derive the same fallback name.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Set of URLs already processed in the current run.
///
/// Shared by reference (or `Arc`) between workers; all methods take `&self`.
#[derive(Debug, Default)]
pub struct DedupStore {
    urls: Mutex<HashSet<String>>,
    next_ticket: AtomicU64,
}

impl DedupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `urls` (e.g. URLs known to be handled elsewhere).
    /// The ticket counter starts after them, matching a run that had already seen them.
    pub fn with_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: HashSet<String> = urls.into_iter().map(Into::into).collect();
        let count = set.len() as u64;
        Self {
            urls: Mutex::new(set),
            next_ticket: AtomicU64::new(count),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        // A panicking worker cannot leave the set half-updated; keep using it.
        self.urls.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn seen(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    /// Marks `url` seen. Marking an already-seen URL is a no-op.
    pub fn mark_seen(&self, url: &str) {
        let mut set = self.lock();
        if !set.contains(url) {
            set.insert(url.to_string());
            self.next_ticket.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Atomically checks and marks `url`.
    ///
    /// Returns `None` if the URL was already seen (duplicate), otherwise the
    /// ticket for this URL: the number of URLs claimed before it in this run.
    pub fn claim(&self, url: &str) -> Option<u64> {
        let mut set = self.lock();
        if set.contains(url) {
            return None;
        }
        set.insert(url.to_string());
        Some(self.next_ticket.fetch_add(1, Ordering::Relaxed))
    }

    /// Number of distinct URLs seen so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
