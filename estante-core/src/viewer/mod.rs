//! PDF viewing modal

mod keys;
mod machine;
mod runtime;
mod state;

pub use keys::Key;
pub use machine::{
    parse_page_input, validate_page, OpenPurpose, PdfViewer, SessionId, ViewerEffect, ViewerEvent,
    ViewerSnapshot,
};
pub use runtime::{ViewerEvents, ViewerHandle, ViewerRuntime};
pub use state::{
    embed_url, PageTurn, Slide, TransitionPhase, TransitionTiming, ViewMode, ViewerState,
    ViewerStatus,
};
