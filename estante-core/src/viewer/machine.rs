//! PDF viewing modal state machine
//!
//! [`PdfViewer::handle`] is pure: it updates the state and returns the side
//! effects the host has to carry out. Deferred transition phases come back in
//! as [`ViewerEvent::TransitionElapsed`] and are only applied while the same
//! viewing session is still open.

use super::keys::Key;
use super::state::{
    embed_url, PageTurn, Slide, TransitionPhase, TransitionTiming, ViewMode, ViewerState,
    ViewerStatus,
};
use crate::error::PageInputError;
use crate::types::ModalState;
use serde::Serialize;
use std::time::Duration;

/// Generation counter of viewing sessions; bumped on every open and close
pub type SessionId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    Open { title: String, file_url: String },
    /// Close requested from inside the viewer (button or Escape)
    Close,
    NextPage,
    PrevPage,
    /// Page number typed by the user
    GoToPage(i64),
    /// The embedded renderer could not display the file
    EmbedLoadFailed,
    /// Switch to the external panel without waiting for a failure
    ViewExternally,
    OpenInNewContext,
    Download,
    ToggleFullscreen,
    /// Platform notification; the only source of truth for fullscreen
    FullscreenChanged(bool),
    Key(Key),
    TransitionElapsed {
        session: SessionId,
        phase: TransitionPhase,
    },
}

/// Why a new browsing context is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenPurpose {
    View,
    Download,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEffect {
    RequestFullscreen,
    ExitFullscreen,
    OpenUrl { url: String, purpose: OpenPurpose },
    Schedule {
        delay: Duration,
        session: SessionId,
        phase: TransitionPhase,
    },
    /// The viewer closed itself; the owner should clear its modal state
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingTurn {
    turn: PageTurn,
    phase: TransitionPhase,
}

/// Serializable view of the viewer for front-ends
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ViewerSnapshot {
    pub status: ViewerStatus,
    pub is_open: bool,
    pub title: String,
    pub file_url: String,
    pub current_page: u32,
    pub is_transitioning: bool,
    pub is_fullscreen: bool,
    pub view_mode: ViewMode,
    pub slide: Slide,
    pub embed_url: Option<String>,
    pub can_go_back: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PdfViewer {
    modal: ModalState,
    state: ViewerState,
    session: SessionId,
    pending: Option<PendingTurn>,
    timing: TransitionTiming,
}

/// Validate a typed page number
pub fn validate_page(page: i64) -> Result<u32, PageInputError> {
    if page <= 0 {
        return Err(PageInputError::NotPositive(page));
    }
    u32::try_from(page).map_err(|_| PageInputError::OutOfRange(page))
}

/// Parse and validate the text of the page-number field
pub fn parse_page_input(input: &str) -> Result<u32, PageInputError> {
    let trimmed = input.trim();
    let page: i64 = trimmed
        .parse()
        .map_err(|_| PageInputError::NotANumber(trimmed.to_string()))?;
    validate_page(page)
}

impl PdfViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timing(timing: TransitionTiming) -> Self {
        Self {
            timing,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open
    }

    pub fn title(&self) -> &str {
        &self.modal.title
    }

    pub fn file_url(&self) -> &str {
        &self.modal.file_url
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn timing(&self) -> TransitionTiming {
        self.timing
    }

    pub fn status(&self) -> ViewerStatus {
        if !self.modal.is_open {
            ViewerStatus::Closed
        } else if self.state.view_mode == ViewMode::External {
            ViewerStatus::ExternalViewing
        } else if self.state.is_transitioning {
            ViewerStatus::Transitioning
        } else {
            ViewerStatus::EmbeddedViewing
        }
    }

    /// Display target for the embedded renderer, when one is shown
    pub fn embed_url(&self) -> Option<String> {
        (self.status() == ViewerStatus::EmbeddedViewing
            || self.status() == ViewerStatus::Transitioning)
            .then(|| embed_url(&self.modal.file_url, self.state.current_page))
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        ViewerSnapshot {
            status: self.status(),
            is_open: self.modal.is_open,
            title: self.modal.title.clone(),
            file_url: self.modal.file_url.clone(),
            current_page: self.state.current_page,
            is_transitioning: self.state.is_transitioning,
            is_fullscreen: self.state.is_fullscreen,
            view_mode: self.state.view_mode,
            slide: self.state.slide,
            embed_url: self.embed_url(),
            can_go_back: self.state.current_page > 1 && !self.state.is_transitioning,
        }
    }

    /// Follow the owner's modal state, reacting only to open/close edges
    pub fn sync_modal(&mut self, modal: &ModalState) -> Vec<ViewerEffect> {
        match (self.modal.is_open, modal.is_open) {
            (false, true) => self.open(modal.title.clone(), modal.file_url.clone()),
            (true, false) => self.close(false),
            _ => {
                if modal.is_open {
                    self.modal.title = modal.title.clone();
                    self.modal.file_url = modal.file_url.clone();
                }
                Vec::new()
            }
        }
    }

    pub fn handle(&mut self, event: ViewerEvent) -> Vec<ViewerEffect> {
        match event {
            ViewerEvent::Open { title, file_url } => self.open(title, file_url),
            ViewerEvent::FullscreenChanged(active) => {
                if self.state.is_fullscreen != active {
                    tracing::debug!("Fullscreen is now {}", active);
                    self.state.is_fullscreen = active;
                }
                Vec::new()
            }
            ViewerEvent::TransitionElapsed { session, phase } => self.elapse(session, phase),
            _ if !self.modal.is_open => Vec::new(),
            ViewerEvent::Close => self.close(true),
            ViewerEvent::NextPage => self.turn(PageTurn::Forward),
            ViewerEvent::PrevPage => self.turn(PageTurn::Backward),
            ViewerEvent::GoToPage(page) => {
                self.go_to_page(page);
                Vec::new()
            }
            ViewerEvent::EmbedLoadFailed => {
                if self.state.view_mode == ViewMode::Embedded {
                    tracing::debug!("Embedded renderer failed, falling back to external view");
                    self.state.view_mode = ViewMode::External;
                }
                Vec::new()
            }
            ViewerEvent::ViewExternally => {
                self.state.view_mode = ViewMode::External;
                Vec::new()
            }
            ViewerEvent::OpenInNewContext => vec![self.open_url(OpenPurpose::View)],
            ViewerEvent::Download => vec![self.open_url(OpenPurpose::Download)],
            ViewerEvent::ToggleFullscreen => {
                if self.state.is_fullscreen {
                    vec![ViewerEffect::ExitFullscreen]
                } else {
                    vec![ViewerEffect::RequestFullscreen]
                }
            }
            ViewerEvent::Key(key) => match key {
                Key::Escape => self.close(true),
                Key::ArrowLeft => self.turn(PageTurn::Backward),
                Key::ArrowRight => self.turn(PageTurn::Forward),
                Key::Other(_) => Vec::new(),
            },
        }
    }

    /// Apply the text of the page-number field
    pub fn submit_page_input(&mut self, input: &str) -> Result<u32, PageInputError> {
        let page = parse_page_input(input)?;
        if self.go_to_page(i64::from(page)) {
            Ok(page)
        } else {
            Ok(self.state.current_page)
        }
    }

    fn open(&mut self, title: String, file_url: String) -> Vec<ViewerEffect> {
        self.session = self.session.wrapping_add(1);
        self.modal = ModalState::open(title, file_url);
        self.pending = None;
        self.state = ViewerState {
            is_fullscreen: self.state.is_fullscreen,
            ..ViewerState::default()
        };
        tracing::debug!("Viewer session {} opened: {}", self.session, self.modal.title);
        Vec::new()
    }

    fn close(&mut self, notify_owner: bool) -> Vec<ViewerEffect> {
        if !self.modal.is_open {
            return Vec::new();
        }
        tracing::debug!("Viewer session {} closed", self.session);

        self.session = self.session.wrapping_add(1);
        self.modal = ModalState::closed();
        self.pending = None;
        self.state.is_transitioning = false;
        self.state.slide = Slide::Visible;

        let mut effects = Vec::new();
        if self.state.is_fullscreen {
            effects.push(ViewerEffect::ExitFullscreen);
        }
        if notify_owner {
            effects.push(ViewerEffect::Closed);
        }
        effects
    }

    fn turn(&mut self, turn: PageTurn) -> Vec<ViewerEffect> {
        // External mode has no embedded surface to slide, so turns are
        // dropped rather than leaving a transition nobody can see
        if self.state.is_transitioning || self.state.view_mode == ViewMode::External {
            return Vec::new();
        }
        if turn == PageTurn::Backward && self.state.current_page <= 1 {
            return Vec::new();
        }

        self.state.is_transitioning = true;
        self.state.slide = turn.exit_slide();
        self.pending = Some(PendingTurn {
            turn,
            phase: TransitionPhase::SlideOut,
        });
        vec![self.schedule(TransitionPhase::SlideOut)]
    }

    fn elapse(&mut self, session: SessionId, phase: TransitionPhase) -> Vec<ViewerEffect> {
        let Some(pending) = self.pending else {
            return Vec::new();
        };
        if !self.modal.is_open || session != self.session || pending.phase != phase {
            tracing::debug!(
                "Dropping stale {:?} for session {} (current {})",
                phase,
                session,
                self.session
            );
            return Vec::new();
        }

        match phase {
            TransitionPhase::SlideOut => {
                self.state.current_page = match pending.turn {
                    PageTurn::Forward => self.state.current_page.saturating_add(1),
                    PageTurn::Backward => self.state.current_page.saturating_sub(1).max(1),
                };
                self.state.slide = pending.turn.enter_slide();
                self.pending = Some(PendingTurn {
                    turn: pending.turn,
                    phase: TransitionPhase::Settle,
                });
                vec![self.schedule(TransitionPhase::Settle)]
            }
            TransitionPhase::Settle => {
                self.state.slide = Slide::Visible;
                self.state.is_transitioning = false;
                self.pending = None;
                Vec::new()
            }
        }
    }

    /// Direct page entry: no animation, ignored while a turn is running
    fn go_to_page(&mut self, page: i64) -> bool {
        if self.state.is_transitioning {
            return false;
        }
        match validate_page(page) {
            Ok(page) => {
                self.state.current_page = page;
                true
            }
            Err(e) => {
                tracing::trace!("Ignoring page input: {}", e);
                false
            }
        }
    }

    fn open_url(&self, purpose: OpenPurpose) -> ViewerEffect {
        ViewerEffect::OpenUrl {
            url: self.modal.file_url.clone(),
            purpose,
        }
    }

    fn schedule(&self, phase: TransitionPhase) -> ViewerEffect {
        ViewerEffect::Schedule {
            delay: self.timing.delay(phase),
            session: self.session,
            phase,
        }
    }
}

impl From<&ModalState> for ViewerEvent {
    fn from(modal: &ModalState) -> Self {
        if modal.is_open {
            ViewerEvent::Open {
                title: modal.title.clone(),
                file_url: modal.file_url.clone(),
            }
        } else {
            ViewerEvent::Close
        }
    }
}
