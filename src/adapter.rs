//! Driver adapter seam.
//!
//! The page-object core never talks to a browser directly; everything
//! remote (element presence, element geometry, raw screenshots, sleeping)
//! goes through the [`Adapter`] trait supplied by the caller. Any WebDriver,
//! CDP, or in-process DOM backend can sit behind it.
//!
//! # Example
//!
//! ```ignore
//! use page_harness::{Adapter, ContextId, ElementHandle, Rect, Result};
//!
//! struct MyDriver { /* session handle */ }
//!
//! #[async_trait::async_trait]
//! impl Adapter for MyDriver {
//!     async fn element_exists(&self, ctx: &ContextId, by: &By) -> Result<bool> {
//!         // strategy/value travel to the backend unchanged
//!         # unimplemented!()
//!     }
//!     // ...
//! }
//! ```

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rect::Rect;
use crate::selector::By;

// ============================================================================
// ContextId
// ============================================================================

/// Identifier for the DOM scope a page object is bound to.
///
/// All selector queries run relative to this context; how it maps onto a
/// window, frame, or root element is the adapter's business.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextId(String);

impl ContextId {
    /// Creates a context identifier.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContextId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ============================================================================
// ElementHandle
// ============================================================================

/// Reference to a located element, carrying its bounding rectangle.
///
/// The rectangle is in full-screenshot pixel coordinates at lookup time;
/// it is never cached by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    /// Adapter-assigned element identifier.
    pub id: String,
    /// Bounding rectangle at lookup time.
    pub rect: Rect,
}

impl ElementHandle {
    /// Creates an element handle.
    #[inline]
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

// ============================================================================
// Adapter Trait
// ============================================================================

/// Capability surface the page-object core consumes.
///
/// Implementations must be cheap to share (`Send + Sync`); the core holds
/// one behind an `Arc` per page object.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Returns `true` if an element matching the locator currently exists
    /// under the context.
    ///
    /// Presence only; no visibility or interactability check.
    async fn element_exists(&self, context: &ContextId, by: &By) -> Result<bool>;

    /// Looks up a single element under the context, including its bounding
    /// rectangle.
    ///
    /// # Errors
    ///
    /// Fails if no element matches the locator.
    async fn get_element(&self, context: &ContextId, by: &By) -> Result<ElementHandle>;

    /// Captures a raw screenshot of the context's window as encoded image
    /// bytes (typically PNG).
    async fn take_screenshot(&self, context: &ContextId) -> Result<Vec<u8>>;

    /// Suspends the calling task for the given duration.
    ///
    /// The poller and the capture settle delay both sleep through this
    /// method so tests can observe or substitute the clock.
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

// ============================================================================
// Tests
// ============================================================================
