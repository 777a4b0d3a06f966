//! Screenshot capture with redaction and clipping.
//!
//! [`CaptureBuilder`] drives the ordered pipeline: settle, capture raw
//! bytes, resolve the frame and black-out rectangles, then decode, redact,
//! clip, encode, and write. The returned [`CaptureResult`] exists only
//! after the file write fully completed; no partially-written file is ever
//! observable as a finished capture.

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::compose;
use crate::error::{Error, Result};
use crate::naming;
use crate::rect::{Rect, RectSource};
use crate::selector::By;

use super::PageObject;

// ============================================================================
// Constants
// ============================================================================

/// Default settle delay before capturing (1 second), letting rendering
/// finish.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1_000);

/// Default capture identifier when the caller sets none.
const DEFAULT_CAPTURE_ID: &str = "1";

// ============================================================================
// CaptureResult
// ============================================================================

/// Outcome of a completed capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureResult {
    /// Path of the written PNG file.
    pub path: PathBuf,
}

impl CaptureResult {
    /// Returns the file name component of the written path.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

// ============================================================================
// CaptureBuilder
// ============================================================================

/// Builder for configuring and running one screenshot capture.
///
/// # Example
///
/// ```ignore
/// let result = page
///     .capture("Login Test")
///     .prefix("suite1")
///     .black_out(Rect::new(40, 40, 200, 24))        // literal region
///     .black_out_element(By::css(".session-token")) // resolved at capture
///     .frame(Rect::new(10, 10, 100, 50))            // clip after redaction
///     .save()
///     .await?;
///
/// assert_eq!(result.file_name(), Some("suite1_Login_Test_1.png"));
/// ```
pub struct CaptureBuilder<'a> {
    page: &'a PageObject,
    title: String,
    id: String,
    prefix: Option<String>,
    settle: Duration,
    black_outs: Vec<RectSource>,
    frame: Option<RectSource>,
}

impl<'a> CaptureBuilder<'a> {
    /// Creates a builder for one capture.
    pub(crate) fn new(page: &'a PageObject, title: impl Into<String>) -> Self {
        Self {
            page,
            title: title.into(),
            id: DEFAULT_CAPTURE_ID.to_string(),
            prefix: None,
            settle: DEFAULT_SETTLE_DELAY,
            black_outs: Vec::new(),
            frame: None,
        }
    }

    /// Sets the capture identifier (default `"1"`).
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Overrides the file name prefix for this capture only.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets the settle delay slept before capturing.
    #[must_use]
    pub fn settle(mut self, delay: Duration) -> Self {
        self.settle = delay;
        self
    }

    /// Adds a black-out region from a literal rectangle or element locator.
    ///
    /// Regions are filled with opaque black in the full, unclipped
    /// coordinate space; overlapping regions are fine.
    #[must_use]
    pub fn black_out(mut self, source: impl Into<RectSource>) -> Self {
        self.black_outs.push(source.into());
        self
    }

    /// Adds a black-out region covering an element's bounding rect.
    #[must_use]
    pub fn black_out_element(self, by: By) -> Self {
        self.black_out(RectSource::Element(by))
    }

    /// Sets the frame the final image is clipped to.
    ///
    /// Clipping happens strictly after redaction. Without a frame (or with
    /// a degenerate one) the image is left unclipped.
    #[must_use]
    pub fn frame(mut self, source: impl Into<RectSource>) -> Self {
        self.frame = Some(source.into());
        self
    }

    /// Runs the capture pipeline and writes the PNG file.
    ///
    /// Pipeline order is a correctness requirement: settle sleep, raw
    /// capture, frame and black-out resolution against the pre-edit image,
    /// decode, redact in list order, clip, encode, write.
    ///
    /// # Errors
    ///
    /// Adapter failures propagate as [`Error::Adapter`]; decode and write
    /// failures both surface as [`Error::Capture`].
    pub async fn save(self) -> Result<CaptureResult> {
        let adapter = self.page.adapter();
        let context = self.page.context();

        debug!(
            context = %context,
            title = %self.title,
            id = %self.id,
            settle_ms = self.settle.as_millis() as u64,
            black_outs = self.black_outs.len(),
            "Capturing screenshot"
        );

        adapter.sleep(self.settle).await;

        let bytes = adapter.take_screenshot(context).await?;

        // Frame and redaction rects are resolved before decoding, so all
        // coordinates are relative to the pre-edit image.
        let frame = match &self.frame {
            Some(source) => source.resolve(adapter, context).await?,
            None => Rect::ZERO,
        };

        let mut black_outs = Vec::with_capacity(self.black_outs.len());
        for source in &self.black_outs {
            black_outs.push(source.resolve(adapter, context).await?);
        }

        let png = compose::compose(&bytes, frame, &black_outs)?;

        let config = self.page.config();
        let dir = config.resolve_dir();
        let prefix = match self.prefix {
            Some(prefix) => Some(prefix),
            None => config.resolve_prefix(),
        };

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| Error::capture(format!("create {} failed: {e}", dir.display())))?;

        let path = dir.join(naming::file_name(&self.title, &self.id, prefix.as_deref()));

        tokio::fs::write(&path, png)
            .await
            .map_err(|e| Error::capture(format!("write {} failed: {e}", path.display())))?;

        debug!(path = %path.display(), "Screenshot written");

        Ok(CaptureResult { path })
    }
}

// ============================================================================
// PageObject - Capture
// ============================================================================

impl PageObject {
    /// Creates a capture builder for a titled screenshot.
    ///
    /// Same title, id, and prefix silently overwrite the earlier file;
    /// sequencing captures that share a name is the caller's business.
    #[must_use]
    pub fn capture(&self, title: impl Into<String>) -> CaptureBuilder<'_> {
        CaptureBuilder::new(self, title)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    use crate::config::CaptureConfig;
    use crate::test_support::{MockAdapter, init_tracing};

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn white_png(width: u32, height: u32) -> Vec<u8> {
        compose::encode_png(&RgbaImage::from_pixel(width, height, WHITE)).unwrap()
    }

    async fn page_in(dir: &TempDir, adapter: Arc<MockAdapter>) -> PageObject {
        init_tracing();
        PageObject::builder("root")
            .with_config(CaptureConfig::new().with_output_dir(dir.path()))
            .attach(adapter)
            .await
            .unwrap()
    }

    fn read_image(result: &CaptureResult) -> RgbaImage {
        let bytes = std::fs::read(&result.path).unwrap();
        compose::decode(&bytes).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_names_file_from_title_id_prefix() {
        let dir = TempDir::new().unwrap();
        let adapter = Arc::new(MockAdapter::new().with_screenshot(white_png(20, 20)));
        let page = page_in(&dir, Arc::clone(&adapter)).await;

        let result = page.capture("Login Test").prefix("suite1").save().await.unwrap();

        assert_eq!(result.file_name(), Some("suite1_Login_Test_1.png"));
        assert!(result.path.exists());
        assert_eq!(read_image(&result), compose::decode(&white_png(20, 20)).unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_custom_id_no_prefix() {
        let dir = TempDir::new().unwrap();
        let adapter = Arc::new(MockAdapter::new().with_screenshot(white_png(4, 4)));
        let page = page_in(&dir, adapter).await;

        let result = page.capture("Home").id("7").save().await.unwrap();

        assert_eq!(result.file_name(), Some("Home_7.png"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_settles_before_capturing() {
        let dir = TempDir::new().unwrap();
        let adapter = Arc::new(MockAdapter::new().with_screenshot(white_png(4, 4)));
        let page = page_in(&dir, Arc::clone(&adapter)).await;

        page.capture("Home").save().await.unwrap();

        assert_eq!(adapter.recorded_sleeps(), vec![DEFAULT_SETTLE_DELAY]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_clips_and_hides_outside_black_out() {
        let dir = TempDir::new().unwrap();
        let adapter = Arc::new(MockAdapter::new().with_screenshot(white_png(120, 80)));
        let page = page_in(&dir, adapter).await;

        // Black-out entirely outside the frame: invisible after the clip.
        let result = page
            .capture("Checkout")
            .frame(Rect::new(10, 10, 100, 50))
            .black_out(Rect::new(0, 0, 5, 5))
            .save()
            .await
            .unwrap();

        let img = read_image(&result);
        assert_eq!((img.width(), img.height()), (100, 50));
        assert!(img.pixels().all(|p| *p == WHITE));
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_redacts_element_rect() {
        let dir = TempDir::new().unwrap();
        let adapter = Arc::new(
            MockAdapter::new()
                .with_screenshot(white_png(40, 40))
                .with_element(".secret", Rect::new(20, 20, 10, 10)),
        );
        let page = page_in(&dir, adapter).await;

        let result = page
            .capture("Profile")
            .black_out_element(By::css(".secret"))
            .save()
            .await
            .unwrap();

        let img = read_image(&result);
        assert_eq!(*img.get_pixel(25, 25), BLACK);
        assert_eq!(*img.get_pixel(19, 19), WHITE);
        assert_eq!(*img.get_pixel(30, 30), WHITE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_decode_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let adapter = Arc::new(MockAdapter::new().with_screenshot(b"not a png".to_vec()));
        let page = page_in(&dir, adapter).await;

        let err = page.capture("Broken").save().await.unwrap_err();

        assert!(err.is_capture_error());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_missing_black_out_element_fails() {
        let dir = TempDir::new().unwrap();
        let adapter = Arc::new(MockAdapter::new().with_screenshot(white_png(4, 4)));
        let page = page_in(&dir, adapter).await;

        let err = page
            .capture("Profile")
            .black_out_element(By::css(".gone"))
            .save()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Adapter { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_traversal_prefix_stays_in_output_dir() {
        let dir = TempDir::new().unwrap();
        let adapter = Arc::new(MockAdapter::new().with_screenshot(white_png(4, 4)));
        let page = page_in(&dir, adapter).await;

        let result = page
            .capture("Login Test")
            .prefix("../evil")
            .save()
            .await
            .unwrap();

        assert_eq!(result.file_name(), Some("evil_Login_Test_1.png"));
        assert_eq!(result.path.parent(), Some(dir.path()));
        assert!(result.path.exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_overwrites_same_name() {
        let dir = TempDir::new().unwrap();
        let adapter = Arc::new(MockAdapter::new().with_screenshot(white_png(8, 8)));
        let page = page_in(&dir, adapter).await;

        let first = page.capture("Home").save().await.unwrap();
        let second = page.capture("Home").save().await.unwrap();

        assert_eq!(first.path, second.path);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
