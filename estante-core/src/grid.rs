//! Grid and card presentation models

use crate::types::{ContentItem, ContentKind};
use serde::Serialize;

/// Number of placeholder cards shown while loading
pub const SKELETON_CARDS: usize = 8;

pub const EMPTY_TITLE: &str = "Nenhum conteúdo encontrado";
pub const EMPTY_HINT: &str =
    "Tente ajustar os filtros ou volte mais tarde para ver novos conteúdos.";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub kind: ContentKind,
    pub badge: &'static str,
    pub read_label: &'static str,
    pub cover_url: String,
    pub file_url: String,
    pub download_filename: String,
}

impl From<&ContentItem> for CardView {
    fn from(item: &ContentItem) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            kind: item.kind,
            badge: item.kind.label(),
            read_label: match item.kind {
                ContentKind::Ebook => "Ler Online",
                ContentKind::Drawing => "Ver Agora",
            },
            cover_url: item.cover_url.clone(),
            file_url: item.file_url.clone(),
            download_filename: item.download_filename(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum GridView {
    Skeleton { placeholders: usize },
    Empty { title: &'static str, hint: &'static str },
    Cards { cards: Vec<CardView> },
}

impl GridView {
    pub fn build<'a>(items: impl IntoIterator<Item = &'a ContentItem>, is_loading: bool) -> Self {
        if is_loading {
            return GridView::Skeleton {
                placeholders: SKELETON_CARDS,
            };
        }
        let cards: Vec<CardView> = items.into_iter().map(CardView::from).collect();
        if cards.is_empty() {
            GridView::Empty {
                title: EMPTY_TITLE,
                hint: EMPTY_HINT,
            }
        } else {
            GridView::Cards { cards }
        }
    }

    pub fn cards(&self) -> &[CardView] {
        match self {
            GridView::Cards { cards } => cards,
            _ => &[],
        }
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self, GridView::Empty { .. })
    }
}
