//! Static display tables for categories and relations.
//!
//! Both tables map a raw name from the upstream export (an entity label or a
//! relation type) to how it should be shown. Unknown names pass through
//! unchanged; unknown categories get the table's default color.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Color used for categories missing from the table.
pub const DEFAULT_COLOR: &str = "#CCCCCC";

// ============================================================================
// Category table
// ============================================================================

/// Display settings for one raw category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStyle {
    /// CSS color string.
    pub color: String,
    /// Human-facing label.
    pub display_label: String,
}

impl CategoryStyle {
    /// Creates a category style.
    pub fn new(color: impl Into<String>, display_label: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            display_label: display_label.into(),
        }
    }
}

/// The outcome of resolving a raw category against a [`CategoryTable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCategory {
    /// Display label (the raw name when unknown).
    pub display_label: String,
    /// Color (the default color when unknown).
    pub color: String,
}

/// Mapping from raw category name to its display settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable {
    entries: BTreeMap<String, CategoryStyle>,
}

impl CategoryTable {
    /// Creates an empty table.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Adds or replaces an entry.
    pub fn with_entry(mut self, raw: impl Into<String>, style: CategoryStyle) -> Self {
        self.entries.insert(raw.into(), style);
        self
    }

    /// Looks up a raw category.
    pub fn get(&self, raw: &str) -> Option<&CategoryStyle> {
        self.entries.get(raw)
    }

    /// Resolves a raw category, falling back to the raw name and `default_color`.
    pub fn resolve(&self, raw: &str, default_color: &str) -> ResolvedCategory {
        match self.entries.get(raw) {
            Some(style) => ResolvedCategory {
                display_label: style.display_label.clone(),
                color: style.color.clone(),
            },
            None => ResolvedCategory {
                display_label: raw.to_string(),
                color: default_color.to_string(),
            },
        }
    }

    /// Finds the raw category whose display label is `display_label`.
    ///
    /// Falls back to `display_label` itself, which covers tables where raw
    /// and display names coincide. Entries are scanned in raw-name order, so
    /// when several raw categories share a display label the alphabetically
    /// first one is reported. Only meant for diagnostics; filtering always
    /// matches on the resolved display label.
    pub fn raw_for_display<'a>(&'a self, display_label: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(_, style)| style.display_label == display_label)
            .map(|(raw, _)| raw.as_str())
            .unwrap_or(display_label)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::empty()
            .with_entry("姓名", CategoryStyle::new("#FF9999", "姓名"))
            .with_entry("年龄", CategoryStyle::new("#99CCFF", "年龄"))
            .with_entry("性别", CategoryStyle::new("#99FF99", "性别"))
            .with_entry("单位", CategoryStyle::new("#FFCC99", "单位"))
            .with_entry("地区", CategoryStyle::new("#FF99CC", "地区"))
            .with_entry("研究领域", CategoryStyle::new("#99FFCC", "研究领域"))
    }
}

// ============================================================================
// Relation table
// ============================================================================

/// Display settings for one raw relation type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationStyle {
    /// Human-facing label.
    pub display_label: String,
}

/// Mapping from raw relation type to its display settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationTable {
    entries: BTreeMap<String, RelationStyle>,
}

impl RelationTable {
    /// Creates an empty table.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Adds or replaces an entry.
    pub fn with_entry(mut self, raw: impl Into<String>, display_label: impl Into<String>) -> Self {
        self.entries.insert(
            raw.into(),
            RelationStyle {
                display_label: display_label.into(),
            },
        );
        self
    }

    /// Resolves a raw relation type to its display label.
    pub fn resolve(&self, raw: &str) -> String {
        self.entries
            .get(raw)
            .map(|style| style.display_label.clone())
            .unwrap_or_else(|| raw.to_string())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RelationTable {
    fn default() -> Self {
        Self::empty()
            .with_entry("拥有", "拥有")
            .with_entry("就职于", "就职于")
            .with_entry("所在地区", "所在地区")
            .with_entry("是", "是")
            .with_entry("参与项目", "参与项目")
            .with_entry("所研究领域", "所研究领域")
    }
}

// ============================================================================
// Tests
// ============================================================================
