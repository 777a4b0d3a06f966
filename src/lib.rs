//! page-harness - Page-object base library for browser test automation.
//!
//! This library provides the two primitives every page-object layer needs:
//! a readiness poller that makes "loaded" a constructor-time precondition,
//! and a screenshot pipeline that redacts and clips before anything lands
//! on disk.
//!
//! # Architecture
//!
//! The core never talks to a browser. Everything remote goes through the
//! [`Adapter`] trait supplied by the caller:
//!
//! - **Core (this crate)**: selector table, wait loop, image composition
//! - **Adapter (yours)**: element queries, raw screenshots, the clock
//!
//! Key design principles:
//!
//! - A [`PageObject`] is always "loaded" at birth: [`PageObjectBuilder::attach`]
//!   polls the registered load selectors and fails with a timeout otherwise
//! - Selector names are validated eagerly; an unknown name is an error at
//!   registration or lookup, never a silent "element absent"
//! - Redaction happens in the full screenshot's coordinate space; clipping
//!   is strictly last, so black-out coordinates never depend on the frame
//! - A capture result exists only after the file write completed
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use page_harness::{By, PageObject, Rect, Result};
//! # struct MyDriver;
//! # #[async_trait::async_trait]
//! # impl page_harness::Adapter for MyDriver {
//! #     async fn element_exists(&self, _: &page_harness::ContextId, _: &By) -> Result<bool> { Ok(true) }
//! #     async fn get_element(&self, _: &page_harness::ContextId, _: &By) -> Result<page_harness::ElementHandle> { unimplemented!() }
//! #     async fn take_screenshot(&self, _: &page_harness::ContextId) -> Result<Vec<u8>> { Ok(vec![]) }
//! # }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let adapter = Arc::new(MyDriver /* your WebDriver/CDP backend */);
//!
//!     // Attach blocks until every load selector is present.
//!     let page = PageObject::builder("root")
//!         .with_selector("header", By::css(".hdr"))
//!         .with_selector("body", By::css(".bd"))
//!         .with_load_selector("header")?
//!         .with_load_selector("body")?
//!         .attach(adapter)
//!         .await?;
//!
//!     // Redact, clip, write.
//!     let shot = page
//!         .capture("Login Test")
//!         .prefix("suite1")
//!         .black_out(Rect::new(40, 40, 200, 24))
//!         .save()
//!         .await?;
//!     println!("wrote {}", shot.path.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapter`] | The [`Adapter`] seam, [`ContextId`], [`ElementHandle`] |
//! | [`compose`] | Pure image composition: decode, black-out, clip, encode |
//! | [`config`] | Capture output configuration and precedence tiers |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`naming`] | Screenshot file naming and sanitization |
//! | [`page`] | [`PageObject`], readiness waits, capture builder |
//! | [`rect`] | [`Rect`] and the [`RectSource`] tagged union |
//! | [`selector`] | [`By`] locators and the named [`SelectorTable`] |

// ============================================================================
// Modules
// ============================================================================

/// Driver adapter seam.
///
/// Implement [`Adapter`] over your browser backend; the core consumes it
/// behind an `Arc`.
pub mod adapter;

/// Pure image composition.
///
/// Decode, black-out fills, clipping, and PNG encoding, with no I/O.
pub mod compose;

/// Capture output configuration.
///
/// Per-object, process-global, and environment precedence tiers.
pub mod config;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Screenshot file naming.
pub mod naming;

/// Page objects, readiness waits, and capture.
pub mod page;

/// Integer rectangles for frames and black-out regions.
pub mod rect;

/// Element locator strategies and the named selector table.
pub mod selector;

#[cfg(test)]
pub(crate) mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

// Adapter seam
pub use adapter::{Adapter, ContextId, ElementHandle};

// Configuration
pub use config::CaptureConfig;

// Error types
pub use error::{Error, Result};

// Page objects
pub use page::{
    CaptureBuilder, CaptureResult, DEFAULT_POLL_INTERVAL, DEFAULT_SETTLE_DELAY,
    DEFAULT_WAIT_TIMEOUT, PageObject, PageObjectBuilder,
};

// Geometry
pub use rect::{Rect, RectSource};

// Selectors
pub use selector::{By, SelectorTable};
