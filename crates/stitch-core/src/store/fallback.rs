use std::sync::atomic::{AtomicBool, Ordering};

use log::warn;

use super::{DraftStore, MemoryDraftStore};
use crate::error::Result;

/// Store wrapper that degrades to memory when the inner store fails.
///
/// The first storage error is logged and flips the wrapper into memory-only
/// mode for the rest of its life. Callers never see storage errors.
pub struct FallbackStore<S> {
    inner: S,
    memory: MemoryDraftStore,
    degraded: AtomicBool,
}

impl<S: DraftStore> FallbackStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            memory: MemoryDraftStore::new(),
            degraded: AtomicBool::new(false),
        }
    }

    /// Whether the wrapper has switched to memory-only mode.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    fn degrade(&self, operation: &str, error: &crate::MarketError) {
        if !self.degraded.swap(true, Ordering::Relaxed) {
            warn!("Draft storage {operation} failed, keeping drafts in memory for this session: {error}");
        }
    }
}

impl<S: DraftStore> DraftStore for FallbackStore<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.is_degraded() {
            return self.memory.get(key);
        }
        match self.inner.get(key) {
            Ok(value) => Ok(value),
            Err(e) => {
                self.degrade("read", &e);
                self.memory.get(key)
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.is_degraded() {
            return self.memory.set(key, value);
        }
        match self.inner.set(key, value) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.degrade("write", &e);
                self.memory.set(key, value)
            }
        }
    }

    fn clear(&self, key: &str) -> Result<()> {
        if self.is_degraded() {
            return self.memory.clear(key);
        }
        match self.inner.clear(key) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.degrade("clear", &e);
                self.memory.clear(key)
            }
        }
    }
}
