//! Page objects: a DOM context, named selectors, and a loaded precondition.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `wait` | Readiness poller (`wait_until`, `wait_for_elements`) |
//! | `screenshot` | Capture builder and composition pipeline |
//!
//! # Example
//!
//! ```ignore
//! use page_harness::{By, PageObject};
//!
//! let page = PageObject::builder("root")
//!     .with_selector("header", By::css(".hdr"))
//!     .with_selector("body", By::css(".bd"))
//!     .with_load_selector("header")?
//!     .with_load_selector("body")?
//!     .attach(adapter)
//!     .await?; // blocks until both load selectors are present
//!
//! page.capture("Login Test")
//!     .black_out(Rect::new(40, 40, 200, 24))
//!     .save()
//!     .await?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod screenshot;
mod wait;

pub use screenshot::{CaptureBuilder, CaptureResult, DEFAULT_SETTLE_DELAY};
pub use wait::{DEFAULT_POLL_INTERVAL, DEFAULT_WAIT_TIMEOUT};

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::adapter::{Adapter, ContextId};
use crate::config::CaptureConfig;
use crate::error::{Error, Result};
use crate::selector::{By, SelectorTable};

// ============================================================================
// PageObject
// ============================================================================

/// A page object bound to one DOM context.
///
/// Construction goes through [`PageObjectBuilder`]; [`PageObjectBuilder::attach`]
/// runs the readiness wait over the registered load selectors, so a
/// `PageObject` value is always "loaded" at birth.
pub struct PageObject {
    adapter: Arc<dyn Adapter>,
    context: ContextId,
    selectors: SelectorTable,
    load_selectors: Vec<String>,
    config: CaptureConfig,
}

impl std::fmt::Debug for PageObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageObject")
            .field("context", &self.context)
            .field("selectors", &self.selectors)
            .field("load_selectors", &self.load_selectors)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PageObject {
    /// Starts building a page object for a context.
    #[must_use]
    pub fn builder(context: impl Into<ContextId>) -> PageObjectBuilder {
        PageObjectBuilder::new(context)
    }

    /// Returns the bound context.
    #[inline]
    #[must_use]
    pub fn context(&self) -> &ContextId {
        &self.context
    }

    /// Returns the adapter this page object queries through.
    #[inline]
    #[must_use]
    pub fn adapter(&self) -> &dyn Adapter {
        self.adapter.as_ref()
    }

    /// Returns the capture configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Returns the registered load selector names, in registration order.
    #[inline]
    #[must_use]
    pub fn load_selectors(&self) -> &[String] {
        &self.load_selectors
    }

    /// Looks up a named selector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSelector`] if the name was never registered.
    pub fn selector(&self, name: &str) -> Result<&By> {
        self.selectors.get(name)
    }

    /// Replaces the selector table wholesale.
    ///
    /// Load selectors registered against the old table are not re-validated;
    /// removing a name they reference is a usage error that surfaces as
    /// [`Error::UnknownSelector`] on the next wait.
    pub fn set_selectors<N, B>(&mut self, entries: impl IntoIterator<Item = (N, B)>)
    where
        N: Into<String>,
        B: Into<By>,
    {
        self.selectors.set_all(entries);
    }

    /// Re-runs the readiness wait over the registered load selectors.
    ///
    /// `attach` already ran this once; call it again after navigation or
    /// DOM churn when the loaded precondition needs re-establishing.
    pub async fn wait_until_loaded(
        &self,
        timeout: Option<Duration>,
        poll_interval: Option<Duration>,
    ) -> Result<()> {
        if self.load_selectors.is_empty() {
            return Ok(());
        }
        self.wait_for_elements(&self.load_selectors, timeout, poll_interval)
            .await
    }
}

// ============================================================================
// PageObjectBuilder
// ============================================================================

/// Builder for [`PageObject`].
///
/// Selectors must be registered before any load selector that references
/// them; an unknown name fails immediately at registration, not at wait
/// time.
#[derive(Debug)]
pub struct PageObjectBuilder {
    context: ContextId,
    selectors: SelectorTable,
    load_selectors: Vec<String>,
    config: CaptureConfig,
    load_timeout: Option<Duration>,
    poll_interval: Option<Duration>,
}

impl PageObjectBuilder {
    /// Creates a builder for a context.
    #[must_use]
    pub fn new(context: impl Into<ContextId>) -> Self {
        Self {
            context: context.into(),
            selectors: SelectorTable::new(),
            load_selectors: Vec::new(),
            config: CaptureConfig::new(),
            load_timeout: None,
            poll_interval: None,
        }
    }

    /// Registers a named selector.
    #[must_use]
    pub fn with_selector(mut self, name: impl Into<String>, by: impl Into<By>) -> Self {
        self.selectors.insert(name, by);
        self
    }

    /// Registers selectors wholesale.
    #[must_use]
    pub fn with_selectors<N, B>(mut self, entries: impl IntoIterator<Item = (N, B)>) -> Self
    where
        N: Into<String>,
        B: Into<By>,
    {
        self.selectors.set_all(entries);
        self
    }

    /// Appends a load selector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSelector`] if the name is not in the
    /// selector table yet.
    pub fn with_load_selector(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !self.selectors.contains(&name) {
            return Err(Error::unknown_selector(name));
        }
        self.load_selectors.push(name);
        Ok(self)
    }

    /// Sets the capture configuration.
    #[must_use]
    pub fn with_config(mut self, config: CaptureConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the readiness wait timeout used by `attach`.
    #[must_use]
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = Some(timeout);
        self
    }

    /// Sets the poll interval used by `attach`.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Finishes construction and enforces the loaded precondition.
    ///
    /// Waits until every registered load selector is present under the
    /// context, then returns the page object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if the load selectors do not all become
    /// present within the wait budget; the caller decides whether to retry
    /// construction.
    pub async fn attach(self, adapter: Arc<dyn Adapter>) -> Result<PageObject> {
        debug!(
            context = %self.context,
            load_selectors = ?self.load_selectors,
            "Attaching page object"
        );

        let page = PageObject {
            adapter,
            context: self.context,
            selectors: self.selectors,
            load_selectors: self.load_selectors,
            config: self.config,
        };

        page.wait_until_loaded(self.load_timeout, self.poll_interval)
            .await?;

        Ok(page)
    }
}

// ============================================================================
// Tests
// ============================================================================
