//! Shared test doubles.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::adapter::{Adapter, ContextId, ElementHandle};
use crate::error::{Error, Result};
use crate::rect::Rect;
use crate::selector::By;

/// Installs the tracing subscriber for test diagnostics.
///
/// Honors `RUST_LOG`; later calls are no-ops so every test can invoke it.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Scripted [`Adapter`] for tests.
///
/// Presence and element geometry are keyed on the locator's value string;
/// sleeps are recorded and also really elapse on the tokio clock, so tests
/// running under `start_paused` stay fast and deterministic.
pub(crate) struct MockAdapter {
    present: FxHashSet<String>,
    elements: FxHashMap<String, Rect>,
    screenshot: Vec<u8>,
    sleeps: Mutex<Vec<Duration>>,
    presence_queries: AtomicU32,
}

impl MockAdapter {
    pub(crate) fn new() -> Self {
        Self {
            present: FxHashSet::default(),
            elements: FxHashMap::default(),
            screenshot: Vec::new(),
            sleeps: Mutex::new(Vec::new()),
            presence_queries: AtomicU32::new(0),
        }
    }

    /// Marks a selector value as present.
    pub(crate) fn with_present(mut self, selector: impl Into<String>) -> Self {
        self.present.insert(selector.into());
        self
    }

    /// Registers an element with a bounding rect under a selector value.
    pub(crate) fn with_element(mut self, selector: impl Into<String>, rect: Rect) -> Self {
        self.elements.insert(selector.into(), rect);
        self
    }

    /// Sets the bytes `take_screenshot` returns.
    pub(crate) fn with_screenshot(mut self, bytes: Vec<u8>) -> Self {
        self.screenshot = bytes;
        self
    }

    /// Returns every sleep requested so far, in order.
    pub(crate) fn recorded_sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }

    /// Returns how many presence queries ran.
    pub(crate) fn presence_queries(&self) -> u32 {
        self.presence_queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Adapter for MockAdapter {
    async fn element_exists(&self, _context: &ContextId, by: &By) -> Result<bool> {
        self.presence_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.present.contains(by.value()))
    }

    async fn get_element(&self, _context: &ContextId, by: &By) -> Result<ElementHandle> {
        self.elements
            .get(by.value())
            .map(|rect| ElementHandle::new(by.value(), *rect))
            .ok_or_else(|| Error::adapter(format!("no element for {}", by.value())))
    }

    async fn take_screenshot(&self, _context: &ContextId) -> Result<Vec<u8>> {
        Ok(self.screenshot.clone())
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
        tokio::time::sleep(duration).await;
    }
}
