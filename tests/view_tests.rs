//! Puzzle view tests - rendering a live session and hit-testing taps

use tui_fifteen::core::{NullFeedback, NullProgress, PuzzleSession};
use tui_fifteen::term::{FrameBuffer, HudView, PuzzleView, Viewport};
use tui_fifteen::types::{SHUFFLE_DELAY_MS, TICK_MS};

fn find_text(fb: &FrameBuffer, needle: &str) -> bool {
    (0..fb.height()).any(|y| {
        let row: String = (0..fb.width())
            .map(|x| fb.get(x, y).map(|c| c.ch).unwrap_or(' '))
            .collect();
        row.contains(needle)
    })
}

#[test]
fn test_render_follows_session_lifecycle() {
    let view = PuzzleView::default();
    let viewport = Viewport::new(100, 30);
    let mut fb = FrameBuffer::new(0, 0);

    let mut session = PuzzleSession::new(0, 3, "meadow", 77).unwrap();
    session.schedule_shuffle(SHUFFLE_DELAY_MS);

    // Pre-shuffle: the ordered board is previewed behind a READY banner.
    view.render_into(&session.snapshot(), &HudView::default(), viewport, &mut fb);
    assert!(find_text(&fb, "GET READY"));

    while session.pending_shuffle_ms().is_some() {
        session.tick(TICK_MS);
    }
    view.render_into(&session.snapshot(), &HudView::default(), viewport, &mut fb);
    assert!(!find_text(&fb, "GET READY"));
    assert!(find_text(&fb, "PLAY"));
    assert!(find_text(&fb, "meadow"));
}

#[test]
fn test_hit_tested_taps_reach_the_board() {
    let view = PuzzleView::default();
    let viewport = Viewport::new(100, 30);

    let mut session = PuzzleSession::new(0, 3, "meadow", 123).unwrap();
    session.shuffle_now();

    // Tap the center of every slot via hit-testing: the board must accept
    // exactly the slots it reports movable.
    let snap = session.snapshot();
    let movable = session.board().movable_slots();
    for slot in 0..snap.cells.len() {
        let mut probe = session.clone();
        let mut hit = None;
        for row in 0..viewport.height {
            for col in 0..viewport.width {
                if view.hit_test(snap.size, viewport, col, row) == Some(slot) {
                    hit = Some((col, row));
                }
            }
        }
        let (col, row) = hit.expect("every slot must be reachable by mouse");
        let tapped = view.hit_test(snap.size, viewport, col, row).unwrap();
        assert_eq!(tapped, slot);

        let result = probe.tap(tapped, &mut NullFeedback, &mut NullProgress);
        assert_eq!(result.moved(), movable.contains(&slot));
    }
}

#[test]
fn test_solved_session_renders_banner() {
    let view = PuzzleView::default();
    let viewport = Viewport::new(100, 30);

    let mut session = PuzzleSession::new(0, 2, "harbor", 9).unwrap();
    session.shuffle_now();
    while !session.is_solved() {
        let slot = match session.board().empty_index() {
            0 => 1,
            1 => 3,
            3 => 2,
            _ => 0,
        };
        session.tap(slot, &mut NullFeedback, &mut NullProgress);
    }

    let fb = view.render(&session.snapshot(), &HudView::default(), viewport);
    assert!(find_text(&fb, "SOLVED!"));
    assert!(find_text(&fb, "SOLVED"));
}
