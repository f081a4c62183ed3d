use serde::{Deserialize, Serialize};

/// What the page asks the viewer to show.
///
/// Owned by the library page and handed to the viewer by value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ModalState {
    pub is_open: bool,
    pub title: String,
    pub file_url: String,
}

impl ModalState {
    pub fn open(title: impl Into<String>, file_url: impl Into<String>) -> Self {
        Self {
            is_open: true,
            title: title.into(),
            file_url: file_url.into(),
        }
    }

    pub fn closed() -> Self {
        Self::default()
    }
}
