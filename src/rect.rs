//! Integer rectangles for frames and black-out regions.

use serde::{Deserialize, Serialize};

use crate::adapter::{Adapter, ContextId};
use crate::error::Result;
use crate::selector::By;

// ============================================================================
// Rect
// ============================================================================

/// Integer rectangle in screenshot pixel coordinates.
///
/// The origin may be negative (an element scrolled partly off-screen);
/// width and height are unsigned. The all-zero rectangle is a sentinel:
/// as a frame it means "do not clip".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// The all-zero rectangle ("no clipping" when used as a frame).
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Creates a rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if the rectangle has no area.
    ///
    /// A degenerate frame disables clipping; a degenerate black-out
    /// rectangle fills nothing.
    #[inline]
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersects this rectangle with an image of the given dimensions.
    ///
    /// Returns the overlapping region as `(x, y, width, height)` in image
    /// coordinates, or `None` if the rectangle lies entirely outside.
    #[must_use]
    pub fn clamp_to(&self, image_width: u32, image_height: u32) -> Option<(u32, u32, u32, u32)> {
        if self.is_degenerate() {
            return None;
        }

        let left = self.x.max(0) as i64;
        let top = self.y.max(0) as i64;
        let right = (i64::from(self.x) + i64::from(self.width)).min(i64::from(image_width));
        let bottom = (i64::from(self.y) + i64::from(self.height)).min(i64::from(image_height));

        if right <= left || bottom <= top {
            return None;
        }

        Some((
            left as u32,
            top as u32,
            (right - left) as u32,
            (bottom - top) as u32,
        ))
    }
}

// ============================================================================
// RectSource
// ============================================================================

/// Where a rectangle comes from: a literal, or an element whose bounding
/// rect the adapter reports.
///
/// Sources are resolved exactly once, at capture time, before any pixel is
/// touched; the resolved value is never cached across captures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "value")]
pub enum RectSource {
    /// A literal rectangle.
    #[serde(rename = "rect")]
    Literal(Rect),

    /// An element locator; resolves to the element's bounding rect.
    #[serde(rename = "element")]
    Element(By),
}

impl RectSource {
    /// Resolves the source to a concrete rectangle.
    ///
    /// # Errors
    ///
    /// Returns the adapter's error if the element lookup fails.
    pub async fn resolve(&self, adapter: &dyn Adapter, context: &ContextId) -> Result<Rect> {
        match self {
            Self::Literal(rect) => Ok(*rect),
            Self::Element(by) => {
                let handle = adapter.get_element(context, by).await?;
                Ok(handle.rect)
            }
        }
    }
}

impl From<Rect> for RectSource {
    fn from(rect: Rect) -> Self {
        Self::Literal(rect)
    }
}

impl From<By> for RectSource {
    fn from(by: By) -> Self {
        Self::Element(by)
    }
}

// ============================================================================
// Tests
// ============================================================================
