//! Content filtering and summary counts

use super::{ContentItem, ContentKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three fixed filter categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ContentFilter {
    #[default]
    #[serde(rename = "todos")]
    All,

    #[serde(rename = "ebook")]
    Ebook,

    #[serde(rename = "desenho")]
    Drawing,
}

impl ContentFilter {
    pub const ALL: [ContentFilter; 3] = [
        ContentFilter::All,
        ContentFilter::Ebook,
        ContentFilter::Drawing,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ContentFilter::All => "todos",
            ContentFilter::Ebook => "ebook",
            ContentFilter::Drawing => "desenho",
        }
    }

    /// Button label in the filter bar
    pub fn label(self) -> &'static str {
        match self {
            ContentFilter::All => "Todos",
            ContentFilter::Ebook => "Ebooks",
            ContentFilter::Drawing => "Desenhos",
        }
    }

    pub fn matches(self, item: &ContentItem) -> bool {
        match self {
            ContentFilter::All => true,
            ContentFilter::Ebook => item.kind == ContentKind::Ebook,
            ContentFilter::Drawing => item.kind == ContentKind::Drawing,
        }
    }

    /// Keep the items this filter selects, preserving order
    pub fn apply<'a>(self, items: &'a [ContentItem]) -> Vec<&'a ContentItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

impl fmt::Display for ContentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ContentFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todos" | "all" => Ok(ContentFilter::All),
            "ebook" => Ok(ContentFilter::Ebook),
            "desenho" | "drawing" => Ok(ContentFilter::Drawing),
            other => Err(format!(
                "unknown filter '{}' (expected todos, ebook or desenho)",
                other
            )),
        }
    }
}

/// Counts shown in the welcome section
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ContentStats {
    pub ebooks: usize,
    pub drawings: usize,
    pub total: usize,
}

impl ContentStats {
    pub fn from_items(items: &[ContentItem]) -> Self {
        let ebooks = items
            .iter()
            .filter(|item| item.kind == ContentKind::Ebook)
            .count();
        Self {
            ebooks,
            drawings: items.len() - ebooks,
            total: items.len(),
        }
    }
}
