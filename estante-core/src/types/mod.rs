//! Core types for the Estante library

mod content;
mod filter;
mod modal;

pub use content::{ContentItem, ContentKind};
pub use filter::{ContentFilter, ContentStats};
pub use modal::ModalState;
