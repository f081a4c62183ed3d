//! Content records as stored by the data provider

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One library entry, either an ebook or a coloring drawing.
///
/// Field names on the wire follow the provider's table (`titulo`, `tipo`,
/// `url_capa`, `url_arquivo`). Records are created and updated only by the
/// data provider; nothing in this crate mutates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentItem {
    /// Provider-assigned identifier
    pub id: String,

    /// Display title
    #[serde(rename = "titulo")]
    pub title: String,

    /// Ebook or drawing
    #[serde(rename = "tipo")]
    pub kind: ContentKind,

    /// Cover image URI
    #[serde(rename = "url_capa")]
    pub cover_url: String,

    /// File URI (PDF for ebooks, image for drawings)
    #[serde(rename = "url_arquivo")]
    pub file_url: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    /// Create an item with both timestamps set to `created_at`
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        kind: ContentKind,
        file_url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            cover_url: String::new(),
            file_url: file_url.into(),
            created_at,
            updated_at: created_at,
        }
    }

    /// Set the cover image
    pub fn with_cover(mut self, cover_url: impl Into<String>) -> Self {
        self.cover_url = cover_url.into();
        self
    }

    /// Name the file should be saved under when downloaded.
    ///
    /// The suffix follows the content kind only; the resource itself is
    /// never inspected. Titles come from the provider, so path separators and
    /// control characters are replaced and leading dots stripped; the result
    /// is always a single plain file name.
    pub fn download_filename(&self) -> String {
        let stem: String = self
            .title
            .chars()
            .map(|c| match c {
                '/' | '\\' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        let stem = stem.trim().trim_start_matches('.').trim_start();
        let stem = if stem.is_empty() { "download" } else { stem };
        format!("{}.{}", stem, self.kind.file_extension())
    }
}

/// Kind of content item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ContentKind {
    #[serde(rename = "ebook")]
    Ebook,

    #[serde(rename = "desenho")]
    Drawing,
}

impl ContentKind {
    /// Wire tag used by the provider
    pub fn tag(self) -> &'static str {
        match self {
            ContentKind::Ebook => "ebook",
            ContentKind::Drawing => "desenho",
        }
    }

    /// Badge label shown on cards
    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Ebook => "Ebook",
            ContentKind::Drawing => "Desenho",
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            ContentKind::Ebook => "pdf",
            ContentKind::Drawing => "jpg",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
