//! Behavioural tests for the PDF viewer state machine

use estante_core::viewer::{
    Key, PdfViewer, TransitionPhase, ViewMode, ViewerEffect, ViewerEvent, ViewerStatus,
};
use proptest::prelude::*;

fn open(viewer: &mut PdfViewer) {
    viewer.handle(ViewerEvent::Open {
        title: "Alimentação Saudável".into(),
        file_url: "https://cdn.example/alimentacao.pdf".into(),
    });
}

/// Deliver every scheduled phase right away, like timers firing in order
fn settle(viewer: &mut PdfViewer, mut pending: Vec<ViewerEffect>) {
    while let Some(effect) = pending.pop() {
        if let ViewerEffect::Schedule { session, phase, .. } = effect {
            pending.extend(viewer.handle(ViewerEvent::TransitionElapsed { session, phase }));
        }
    }
}

#[derive(Debug, Clone)]
enum Op {
    Next,
    Prev,
    Page(i64),
    Key(&'static str),
    EmbedFailed,
    Fullscreen(bool),
    Close,
    Reopen,
    /// Fire the oldest outstanding timer
    Tick,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => Just(Op::Next),
        3 => Just(Op::Prev),
        2 => (-10i64..20).prop_map(Op::Page),
        2 => prop_oneof![Just("ArrowLeft"), Just("ArrowRight"), Just("x")].prop_map(Op::Key),
        1 => Just(Op::EmbedFailed),
        1 => any::<bool>().prop_map(Op::Fullscreen),
        1 => Just(Op::Close),
        1 => Just(Op::Reopen),
        6 => Just(Op::Tick),
    ]
}

proptest! {
    #[test]
    fn page_never_drops_below_one_and_one_turn_at_a_time(ops in prop::collection::vec(op(), 0..80)) {
        let mut viewer = PdfViewer::new();
        open(&mut viewer);
        let mut timers: std::collections::VecDeque<ViewerEffect> = Default::default();

        for op in ops {
            let effects = match op {
                Op::Next => viewer.handle(ViewerEvent::NextPage),
                Op::Prev => viewer.handle(ViewerEvent::PrevPage),
                Op::Page(p) => viewer.handle(ViewerEvent::GoToPage(p)),
                Op::Key(k) => viewer.handle(ViewerEvent::Key(k.parse::<Key>().unwrap())),
                Op::EmbedFailed => viewer.handle(ViewerEvent::EmbedLoadFailed),
                Op::Fullscreen(on) => viewer.handle(ViewerEvent::FullscreenChanged(on)),
                Op::Close => viewer.handle(ViewerEvent::Close),
                Op::Reopen => {
                    open(&mut viewer);
                    Vec::new()
                }
                Op::Tick => match timers.pop_front() {
                    Some(ViewerEffect::Schedule { session, phase, .. }) => {
                        viewer.handle(ViewerEvent::TransitionElapsed { session, phase })
                    }
                    _ => Vec::new(),
                },
            };

            let scheduled = effects
                .iter()
                .filter(|e| matches!(e, ViewerEffect::Schedule { .. }))
                .count();
            prop_assert!(scheduled <= 1);
            timers.extend(effects.into_iter().filter(|e| matches!(e, ViewerEffect::Schedule { .. })));

            prop_assert!(viewer.state().current_page >= 1);
            if viewer.state().is_transitioning {
                prop_assert!(viewer.is_open());
            }
        }
    }

    #[test]
    fn each_settled_next_adds_exactly_one(count in 1usize..25) {
        let mut viewer = PdfViewer::new();
        open(&mut viewer);
        let mut last = viewer.state().current_page;

        for _ in 0..count {
            let effects = viewer.handle(ViewerEvent::NextPage);
            settle(&mut viewer, effects);
            prop_assert_eq!(viewer.state().current_page, last + 1);
            last = viewer.state().current_page;
        }
    }

    #[test]
    fn invalid_page_input_leaves_page_unchanged(start in 1i64..50, bad in -1000i64..=0) {
        let mut viewer = PdfViewer::new();
        open(&mut viewer);
        viewer.handle(ViewerEvent::GoToPage(start));
        viewer.handle(ViewerEvent::GoToPage(bad));
        prop_assert_eq!(i64::from(viewer.state().current_page), start);
    }
}

#[test]
fn test_prev_at_first_page_is_idempotent() {
    let mut viewer = PdfViewer::new();
    open(&mut viewer);
    let before = viewer.snapshot();

    for _ in 0..3 {
        assert!(viewer.handle(ViewerEvent::PrevPage).is_empty());
        assert!(viewer
            .handle(ViewerEvent::Key(Key::ArrowLeft))
            .is_empty());
    }
    assert_eq!(viewer.snapshot(), before);
}

#[test]
fn test_any_request_during_transition_is_noop() {
    let mut viewer = PdfViewer::new();
    open(&mut viewer);
    viewer.handle(ViewerEvent::GoToPage(5));
    viewer.handle(ViewerEvent::NextPage);
    let during = viewer.snapshot();

    for event in [
        ViewerEvent::NextPage,
        ViewerEvent::PrevPage,
        ViewerEvent::Key(Key::ArrowRight),
        ViewerEvent::Key(Key::ArrowLeft),
        ViewerEvent::GoToPage(12),
    ] {
        assert!(viewer.handle(event).is_empty());
    }
    assert_eq!(viewer.snapshot(), during);
}

#[test]
fn test_open_always_resets_leftover_state() {
    let mut viewer = PdfViewer::new();
    open(&mut viewer);
    viewer.handle(ViewerEvent::GoToPage(40));
    viewer.handle(ViewerEvent::NextPage);
    viewer.handle(ViewerEvent::EmbedLoadFailed);
    viewer.handle(ViewerEvent::Close);

    open(&mut viewer);
    assert_eq!(viewer.state().current_page, 1);
    assert_eq!(viewer.state().view_mode, ViewMode::Embedded);
    assert!(!viewer.state().is_transitioning);
    assert_eq!(viewer.status(), ViewerStatus::EmbeddedViewing);
}

#[test]
fn test_close_while_fullscreen_exits_fullscreen() {
    let mut viewer = PdfViewer::new();
    open(&mut viewer);
    viewer.handle(ViewerEvent::FullscreenChanged(true));

    let effects = viewer.handle(ViewerEvent::Close);
    assert!(effects.contains(&ViewerEffect::ExitFullscreen));

    // platform Escape already left fullscreen: nothing to exit on close
    open(&mut viewer);
    viewer.handle(ViewerEvent::FullscreenChanged(false));
    viewer.handle(ViewerEvent::FullscreenChanged(false));
    let effects = viewer.handle(ViewerEvent::Close);
    assert!(!effects.contains(&ViewerEffect::ExitFullscreen));
}

#[test]
fn test_embed_failure_makes_external_action_unnecessary() {
    let mut viewer = PdfViewer::new();
    open(&mut viewer);
    assert_eq!(viewer.state().view_mode, ViewMode::Embedded);

    viewer.handle(ViewerEvent::EmbedLoadFailed);
    assert_eq!(viewer.state().view_mode, ViewMode::External);

    let before = viewer.snapshot();
    viewer.handle(ViewerEvent::ViewExternally);
    assert_eq!(viewer.snapshot(), before);
}

#[test]
fn test_typed_zero_and_negative_pages_are_ignored() {
    let mut viewer = PdfViewer::new();
    open(&mut viewer);
    viewer.handle(ViewerEvent::GoToPage(3));

    viewer.handle(ViewerEvent::GoToPage(0));
    assert_eq!(viewer.state().current_page, 3);
    viewer.handle(ViewerEvent::GoToPage(-5));
    assert_eq!(viewer.state().current_page, 3);
    assert!(viewer.submit_page_input("0").is_err());
    assert!(viewer.submit_page_input("-5").is_err());
    assert_eq!(viewer.state().current_page, 3);
}

#[test]
fn test_phases_out_of_order_are_ignored() {
    let mut viewer = PdfViewer::new();
    open(&mut viewer);
    viewer.handle(ViewerEvent::NextPage);

    viewer.handle(ViewerEvent::TransitionElapsed {
        session: viewer.session(),
        phase: TransitionPhase::Settle,
    });
    assert!(viewer.state().is_transitioning);
    assert_eq!(viewer.state().current_page, 1);
}
