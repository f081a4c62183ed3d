//! Library page model
//!
//! Owns the active filter, the loaded contents and the modal state, and is
//! the only place that turns query failures and download outcomes into
//! notifications.

use crate::error::FetchError;
use crate::grid::GridView;
use crate::notify::{Notifier, Toast};
use crate::platform::Platform;
use crate::query::QueryState;
use crate::types::{ContentFilter, ContentItem, ContentStats, ModalState};
use std::sync::Arc;

pub struct LibraryPage {
    filter: ContentFilter,
    contents: Vec<ContentItem>,
    is_loading: bool,
    error: Option<FetchError>,
    failure_reported: bool,
    modal: ModalState,
    notifier: Arc<dyn Notifier>,
}

impl LibraryPage {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            filter: ContentFilter::All,
            contents: Vec::new(),
            is_loading: true,
            error: None,
            failure_reported: false,
            modal: ModalState::closed(),
            notifier,
        }
    }

    /// Take in the latest query state.
    ///
    /// A failure is reported once; repeated failure states are not
    /// re-announced until a successful load clears the episode.
    pub fn apply_query(&mut self, state: QueryState<Vec<ContentItem>>) {
        self.is_loading = state.is_loading;
        self.contents = state.data;

        if state.is_error {
            if !self.failure_reported {
                if let Some(error) = &state.error {
                    tracing::error!("Error fetching contents: {}", error);
                }
                self.notifier.notify(Toast::load_failed());
                self.failure_reported = true;
            }
        } else if !state.is_loading {
            self.failure_reported = false;
        }
        self.error = state.error;
    }

    pub fn filter(&self) -> ContentFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: ContentFilter) {
        self.filter = filter;
    }

    pub fn contents(&self) -> &[ContentItem] {
        &self.contents
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn filtered(&self) -> Vec<&ContentItem> {
        self.filter.apply(&self.contents)
    }

    pub fn grid(&self) -> GridView {
        GridView::build(self.filtered(), self.is_loading)
    }

    /// Counts over the whole collection, independent of the filter
    pub fn stats(&self) -> ContentStats {
        ContentStats::from_items(&self.contents)
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    /// "Read" action of a card; returns the new modal state
    pub fn read(&mut self, id: &str) -> Option<ModalState> {
        let item = self.contents.iter().find(|item| item.id == id)?;
        self.modal = ModalState::open(item.title.clone(), item.file_url.clone());
        Some(self.modal.clone())
    }

    pub fn close_modal(&mut self) -> ModalState {
        self.modal = ModalState::closed();
        self.modal.clone()
    }

    /// "Download" action of a card, independent of the modal
    pub fn download(&self, item: &ContentItem, platform: &dyn Platform) -> bool {
        match platform.save_file(&item.file_url, &item.download_filename()) {
            Ok(()) => {
                self.notifier.notify(Toast::download_started(&item.title));
                true
            }
            Err(e) => {
                tracing::error!("Error downloading file: {}", e);
                self.notifier.notify(Toast::download_failed());
                false
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<&ContentItem> {
        self.contents.iter().find(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationCenter;
    use crate::platform::{PlatformCall, RecordingPlatform};
    use crate::types::ContentKind;
    use chrono::Utc;

    fn ebook() -> ContentItem {
        ContentItem::new("1", "Guia", ContentKind::Ebook, "https://cdn/guia.pdf", Utc::now())
    }

    #[test]
    fn test_read_opens_modal_for_known_id() {
        let mut page = LibraryPage::new(Arc::new(NotificationCenter::new()));
        page.apply_query(QueryState::success(vec![ebook()]));

        assert!(page.read("missing").is_none());
        let modal = page.read("1").unwrap();
        assert_eq!(modal, ModalState::open("Guia", "https://cdn/guia.pdf"));
        assert!(!page.close_modal().is_open);
    }

    #[test]
    fn test_download_saves_with_kind_suffix() {
        let notifier = Arc::new(NotificationCenter::new());
        let page = LibraryPage::new(notifier.clone());
        let platform = RecordingPlatform::new();

        assert!(page.download(&ebook(), &platform));
        assert_eq!(
            platform.calls(),
            vec![PlatformCall::Save {
                url: "https://cdn/guia.pdf".into(),
                filename: "Guia.pdf".into(),
            }]
        );
        assert_eq!(notifier.history(), vec![Toast::download_started("Guia")]);
    }

    #[test]
    fn test_download_failure_is_reported() {
        let notifier = Arc::new(NotificationCenter::new());
        let page = LibraryPage::new(notifier.clone());

        assert!(!page.download(&ebook(), &RecordingPlatform::failing()));
        assert_eq!(notifier.history(), vec![Toast::download_failed()]);
        assert!(!page.modal().is_open);
    }
}
