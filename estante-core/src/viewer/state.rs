//! Viewer state types

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the file is being shown
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Inside the application through the browser's native renderer
    #[default]
    Embedded,

    /// Fallback panel offering "open" and "download"
    External,
}

/// Position of the embedded surface during a page turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Slide {
    #[default]
    Visible,
    ExitingLeft,
    ExitingRight,
    EnteringFromLeft,
    EnteringFromRight,
}

/// Direction of a button or arrow-key page change
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PageTurn {
    Forward,
    Backward,
}

impl PageTurn {
    /// Where the current page slides to
    pub fn exit_slide(self) -> Slide {
        match self {
            PageTurn::Forward => Slide::ExitingRight,
            PageTurn::Backward => Slide::ExitingLeft,
        }
    }

    /// Where the new page comes in from
    pub fn enter_slide(self) -> Slide {
        match self {
            PageTurn::Forward => Slide::EnteringFromLeft,
            PageTurn::Backward => Slide::EnteringFromRight,
        }
    }
}

/// The two deferred phases of a page turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPhase {
    /// Current page is sliding out; the index swaps when this elapses
    SlideOut,

    /// New page is placed off-screen; the slide-in starts when this elapses
    Settle,
}

/// Durations of the two transition phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTiming {
    pub slide_out: Duration,
    pub settle: Duration,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            slide_out: Duration::from_millis(300),
            settle: Duration::from_millis(50),
        }
    }
}

impl TransitionTiming {
    pub fn delay(&self, phase: TransitionPhase) -> Duration {
        match phase {
            TransitionPhase::SlideOut => self.slide_out,
            TransitionPhase::Settle => self.settle,
        }
    }

    pub fn total(&self) -> Duration {
        self.slide_out + self.settle
    }
}

/// Per-session viewer state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewerState {
    /// 1-based page hint, never below 1
    pub current_page: u32,
    pub is_transitioning: bool,
    pub is_fullscreen: bool,
    pub view_mode: ViewMode,
    pub slide: Slide,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            current_page: 1,
            is_transitioning: false,
            is_fullscreen: false,
            view_mode: ViewMode::Embedded,
            slide: Slide::Visible,
        }
    }
}

/// Coarse state of the modal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewerStatus {
    Closed,
    EmbeddedViewing,
    Transitioning,
    ExternalViewing,
}

/// Display target for the embedded renderer.
///
/// The fragment is only a hint; some renderers ignore it.
pub fn embed_url(file_url: &str, page: u32) -> String {
    format!("{}#page={}", file_url, page)
}
