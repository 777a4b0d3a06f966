//! Element locator strategies and the named selector table.
//!
//! A page object never passes raw selector strings around; it registers
//! them under stable names in a [`SelectorTable`] and refers to them by
//! name from wait calls and capture calls.
//!
//! # Example
//!
//! ```ignore
//! use page_harness::{By, SelectorTable};
//!
//! let mut table = SelectorTable::new();
//! table.insert("header", By::css(".hdr"));
//! table.insert("submit", By::xpath("//button[@type='submit']"));
//!
//! let by = table.get("header")?;
//! assert_eq!(by.value(), ".hdr");
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// By Enum
// ============================================================================

/// Element locator strategy.
///
/// The strategy name travels to the adapter unchanged; the adapter decides
/// how to execute it against its backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value")]
pub enum By {
    /// CSS selector (most common).
    ///
    /// # Example
    /// ```ignore
    /// By::css("#login-button")
    /// By::css("[data-testid='submit']")
    /// ```
    #[serde(rename = "css")]
    Css(String),

    /// XPath expression.
    ///
    /// # Example
    /// ```ignore
    /// By::xpath("//button[@type='submit']")
    /// ```
    #[serde(rename = "xpath")]
    XPath(String),

    /// Element ID (shorthand for `#id` CSS selector).
    #[serde(rename = "id")]
    Id(String),

    /// Name attribute.
    #[serde(rename = "name")]
    Name(String),

    /// Class name (single class).
    #[serde(rename = "class")]
    Class(String),

    /// Tag name.
    #[serde(rename = "tag")]
    Tag(String),
}

impl By {
    /// Creates a CSS selector.
    #[inline]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Creates an XPath selector.
    #[inline]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Creates an ID selector.
    #[inline]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Creates a name attribute selector.
    #[inline]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Creates a class name selector.
    #[inline]
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    /// Creates a tag name selector.
    #[inline]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    /// Returns the strategy name for the adapter.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Css(_) => "css",
            Self::XPath(_) => "xpath",
            Self::Id(_) => "id",
            Self::Name(_) => "name",
            Self::Class(_) => "class",
            Self::Tag(_) => "tag",
        }
    }

    /// Returns the selector value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Css(v)
            | Self::XPath(v)
            | Self::Id(v)
            | Self::Name(v)
            | Self::Class(v)
            | Self::Tag(v) => v,
        }
    }
}

impl From<&str> for By {
    /// Converts a string to CSS selector (default).
    fn from(s: &str) -> Self {
        Self::Css(s.to_string())
    }
}

impl From<String> for By {
    /// Converts a string to CSS selector (default).
    fn from(s: String) -> Self {
        Self::Css(s)
    }
}

// ============================================================================
// SelectorTable
// ============================================================================

/// Named selector registry owned by a page object.
///
/// Keys are unique; no iteration order is guaranteed. Lookups for names
/// that were never registered fail with [`Error::UnknownSelector`] rather
/// than returning a silent "not found".
#[derive(Debug, Clone, Default)]
pub struct SelectorTable {
    entries: FxHashMap<String, By>,
}

impl SelectorTable {
    /// Creates an empty table.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a selector under a name, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, by: impl Into<By>) {
        self.entries.insert(name.into(), by.into());
    }

    /// Replaces the whole table contents.
    pub fn set_all<N, B>(&mut self, entries: impl IntoIterator<Item = (N, B)>)
    where
        N: Into<String>,
        B: Into<By>,
    {
        self.entries = entries
            .into_iter()
            .map(|(n, b)| (n.into(), b.into()))
            .collect();
    }

    /// Looks up a selector by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSelector`] if the name was never registered.
    pub fn get(&self, name: &str) -> Result<&By> {
        self.entries
            .get(name)
            .ok_or_else(|| Error::unknown_selector(name))
    }

    /// Returns `true` if the name is registered.
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the number of registered selectors.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no selectors are registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, B> FromIterator<(N, B)> for SelectorTable
where
    N: Into<String>,
    B: Into<By>,
{
    fn from_iter<T: IntoIterator<Item = (N, B)>>(iter: T) -> Self {
        let mut table = Self::new();
        table.set_all(iter);
        table
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_css() {
        let by = By::css("#login");
        assert_eq!(by.strategy(), "css");
        assert_eq!(by.value(), "#login");
    }

    #[test]
    fn test_by_xpath() {
        let by = By::xpath("//button");
        assert_eq!(by.strategy(), "xpath");
        assert_eq!(by.value(), "//button");
    }

    #[test]
    fn test_from_str_defaults_to_css() {
        let by: By = ".hdr".into();
        assert!(matches!(by, By::Css(_)));
    }

    #[test]
    fn test_table_insert_and_get() {
        let mut table = SelectorTable::new();
        table.insert("header", By::css(".hdr"));

        let by = table.get("header").unwrap();
        assert_eq!(by.value(), ".hdr");
    }

    #[test]
    fn test_table_unknown_name_fails() {
        let table = SelectorTable::new();
        let err = table.get("missing").unwrap_err();
        assert!(matches!(err, Error::UnknownSelector { ref name } if name == "missing"));
    }

    #[test]
    fn test_table_insert_replaces() {
        let mut table = SelectorTable::new();
        table.insert("body", By::css(".old"));
        table.insert("body", By::css(".new"));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("body").unwrap().value(), ".new");
    }

    #[test]
    fn test_table_set_all_replaces_wholesale() {
        let mut table = SelectorTable::new();
        table.insert("stale", By::css(".stale"));
        table.set_all([("header", ".hdr"), ("body", ".bd")]);

        assert_eq!(table.len(), 2);
        assert!(!table.contains("stale"));
        assert!(table.contains("header"));
        assert!(table.contains("body"));
    }

    #[test]
    fn test_table_from_iterator() {
        let table: SelectorTable = [("a", "#a"), ("b", "#b")].into_iter().collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("a").unwrap().value(), "#a");
    }
}
