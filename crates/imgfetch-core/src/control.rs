//! Run control: a shared abort token for one fetch run.
//!
//! The scheduler hands a clone of the token to every worker. Setting it (e.g.
//! from a Ctrl-C handler) stops workers from taking new URLs, and in-flight
//! curl transfers see it in their progress callback and abort.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cheaply cloneable abort token shared by all workers of a run.
#[derive(Debug, Clone, Default)]
pub struct RunControl {
    aborted: Arc<AtomicBool>,
}

impl RunControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request abort for the whole run. Idempotent.
    pub fn request_abort(&self) {
        self.aborted.store(true, Ordering::Relaxed);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Relaxed)
    }
}
