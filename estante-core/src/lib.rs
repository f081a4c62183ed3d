//! Estante Core Library
//!
//! This crate provides the data model, the content query and the presentation
//! state for the Estante digital library. The PDF viewer is a pure state
//! machine ([`viewer::PdfViewer`]) driven by a small timer runtime
//! ([`viewer::ViewerRuntime`]); everything that touches the host environment
//! goes through the [`platform::Platform`] and [`notify::Notifier`] traits.

pub mod carousel;
pub mod config;
pub mod error;
pub mod grid;
pub mod notify;
pub mod page;
pub mod platform;
pub mod provider;
pub mod query;
pub mod types;
pub mod viewer;

pub use config::EstanteConfig;
pub use error::{ConfigError, EstanteError, FetchError, PageInputError, PlatformError, Result};
pub use types::{ContentFilter, ContentItem, ContentKind, ContentStats, ModalState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_state_lifecycle() {
        let modal = ModalState::open("Guia", "https://cdn.example/guia.pdf");
        assert!(modal.is_open);
        assert_eq!(modal.title, "Guia");

        let closed = ModalState::closed();
        assert!(!closed.is_open);
        assert!(closed.file_url.is_empty());
    }
}
