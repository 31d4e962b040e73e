//! Line color lookup table.
//!
//! Maps a transit category (`suburban`, `subway`, `tram`, `regional`, ...)
//! and a line name to the line's signage colors. The table format is a
//! nested JSON object:
//!
//! ```json
//! { "subway": { "U2": { "bg": "#DA421E", "fg": "#FFF" } } }
//! ```
//!
//! Missing categories, missing lines and missing channels are all valid.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Built-in table of VBB line colors.
const BUILTIN_TABLE: &str = include_str!("../data/line-colors.json");

/// Errors loading a color table.
#[derive(Debug, thiserror::Error)]
pub enum ColorsError {
    #[error("failed to read color table {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse color table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Signage colors for one line. Either channel may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LineColor {
    #[serde(default)]
    pub bg: Option<String>,
    #[serde(default)]
    pub fg: Option<String>,
}

impl LineColor {
    pub fn new(bg: impl Into<String>, fg: impl Into<String>) -> Self {
        Self {
            bg: Some(bg.into()),
            fg: Some(fg.into()),
        }
    }
}

/// Category → line name → colors.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LineColors {
    categories: HashMap<String, HashMap<String, LineColor>>,
}

impl LineColors {
    /// The built-in VBB table.
    pub fn builtin() -> Result<Self, ColorsError> {
        Self::from_json(BUILTIN_TABLE)
    }

    /// Parse a table from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ColorsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a table from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ColorsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ColorsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Look up the colors for `name` in `category`.
    pub fn get(&self, category: &str, name: &str) -> Option<&LineColor> {
        self.categories.get(category)?.get(name)
    }

    /// Add or replace an entry.
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        name: impl Into<String>,
        color: LineColor,
    ) {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(name.into(), color);
    }

    /// Number of lines across all categories.
    pub fn len(&self) -> usize {
        self.categories.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
