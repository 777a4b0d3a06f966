//! Capture output configuration.
//!
//! Where screenshots land and what prefixes their names carry is resolved
//! at call time, never cached, with this precedence:
//!
//! 1. the page object's own [`CaptureConfig`] (or a per-call override)
//! 2. the process-global config set via [`CaptureConfig::set_global`]
//! 3. the `PAGE_HARNESS_SCREENSHOT_DIR` / `PAGE_HARNESS_SCREENSHOT_PREFIX`
//!    environment variables
//! 4. built-in defaults (`./screenshots`, no prefix)
//!
//! The global tier exists for suite-wide setup; it is meant to be written
//! once before the first capture and read-only afterwards.

use std::env;
use std::path::PathBuf;

use parking_lot::RwLock;

// ============================================================================
// Constants
// ============================================================================

/// Environment variable naming the screenshot output directory.
pub const ENV_SCREENSHOT_DIR: &str = "PAGE_HARNESS_SCREENSHOT_DIR";

/// Environment variable naming the screenshot file prefix.
pub const ENV_SCREENSHOT_PREFIX: &str = "PAGE_HARNESS_SCREENSHOT_PREFIX";

/// Default output directory when nothing else is configured.
const DEFAULT_DIR: &str = "screenshots";

// ============================================================================
// Global Tier
// ============================================================================

static GLOBAL: RwLock<Option<CaptureConfig>> = RwLock::new(None);

// ============================================================================
// CaptureConfig
// ============================================================================

/// Screenshot output settings.
///
/// Unset fields fall through to the next precedence tier at resolution
/// time; a config with both fields set never consults the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Output directory override.
    pub output_dir: Option<PathBuf>,

    /// File name prefix override.
    pub file_prefix: Option<String>,
}

impl CaptureConfig {
    /// Creates an empty config (every field falls through).
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            output_dir: None,
            file_prefix: None,
        }
    }

    /// Sets the output directory.
    #[inline]
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Sets the file name prefix.
    #[inline]
    #[must_use]
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = Some(prefix.into());
        self
    }

    /// Installs this config as the process-global tier.
    ///
    /// Intended for one-time suite setup before the first capture.
    pub fn set_global(self) {
        *GLOBAL.write() = Some(self);
    }

    /// Clears the process-global tier.
    pub fn clear_global() {
        *GLOBAL.write() = None;
    }

    /// Resolves the output directory through all tiers.
    #[must_use]
    pub fn resolve_dir(&self) -> PathBuf {
        self.resolve_dir_with(|key| env::var(key).ok())
    }

    /// Resolves the file prefix through all tiers.
    ///
    /// `None` means "no prefix segment" in the output file name.
    #[must_use]
    pub fn resolve_prefix(&self) -> Option<String> {
        self.resolve_prefix_with(|key| env::var(key).ok())
    }

    /// Directory resolution over an injectable environment lookup.
    pub(crate) fn resolve_dir_with(&self, env: impl Fn(&str) -> Option<String>) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        if let Some(global) = GLOBAL.read().as_ref()
            && let Some(dir) = &global.output_dir
        {
            return dir.clone();
        }
        if let Some(dir) = env(ENV_SCREENSHOT_DIR) {
            return PathBuf::from(dir);
        }
        PathBuf::from(DEFAULT_DIR)
    }

    /// Prefix resolution over an injectable environment lookup.
    pub(crate) fn resolve_prefix_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        if let Some(prefix) = &self.file_prefix {
            return Some(prefix.clone());
        }
        if let Some(global) = GLOBAL.read().as_ref()
            && let Some(prefix) = &global.file_prefix
        {
            return Some(prefix.clone());
        }
        env(ENV_SCREENSHOT_PREFIX)
    }
}

// ============================================================================
// Tests
// ============================================================================
