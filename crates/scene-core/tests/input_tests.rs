// Input sampling: queue ordering, section tracking, cursor normalization.

use scene_core::*;

#[test]
fn queue_drains_in_arrival_order() {
    let mut q = InputQueue::new();
    q.push(InputEvent::Scroll { scroll_y: 10.0 });
    q.push(InputEvent::CursorMove {
        client_x: 1.0,
        client_y: 2.0,
    });
    q.push(InputEvent::Scroll { scroll_y: 20.0 });
    assert_eq!(q.len(), 3);
    let drained: Vec<_> = q.drain().into_iter().collect();
    assert_eq!(drained[0], InputEvent::Scroll { scroll_y: 10.0 });
    assert_eq!(drained[2], InputEvent::Scroll { scroll_y: 20.0 });
    assert!(q.is_empty());
}

#[test]
fn section_index_rounds_to_nearest_viewport() {
    let s = ScrollState::new(3);
    assert_eq!(s.section_for(0.0, 800.0), Some(0));
    assert_eq!(s.section_for(399.0, 800.0), Some(0));
    assert_eq!(s.section_for(400.0, 800.0), Some(1));
    assert_eq!(s.section_for(1100.0, 800.0), Some(1));
    assert_eq!(s.section_for(1200.0, 800.0), Some(2));
}

#[test]
fn section_index_is_clamped() {
    let s = ScrollState::new(3);
    assert_eq!(s.section_for(-500.0, 800.0), Some(0));
    assert_eq!(s.section_for(10_000.0, 800.0), Some(2));
}

#[test]
fn section_index_needs_a_viewport() {
    let s = ScrollState::new(3);
    assert_eq!(s.section_for(400.0, 0.0), None);
    assert_eq!(s.section_for(f32::NAN, 800.0), None);
    assert_eq!(ScrollState::new(0).section_for(400.0, 800.0), None);
}

#[test]
fn jump_across_sections_fires_once() {
    let mut s = ScrollState::new(3);
    assert_eq!(s.on_scroll(1200.0, 800.0), Some(2));
    assert_eq!(s.current_section(), 2);
    assert_eq!(s.on_scroll(1210.0, 800.0), None);
    assert_eq!(s.scroll_y, 1210.0);
}

#[test]
fn gradual_scroll_enters_each_section_once() {
    let mut s = ScrollState::new(3);
    let mut entered = Vec::new();
    let mut y = 0.0;
    while y <= 1600.0 {
        if let Some(section) = s.on_scroll(y, 800.0) {
            entered.push(section);
        }
        y += 10.0;
    }
    assert_eq!(entered, vec![1, 2]);

    // and back up again
    while y >= 0.0 {
        if let Some(section) = s.on_scroll(y, 800.0) {
            entered.push(section);
        }
        y -= 10.0;
    }
    assert_eq!(entered, vec![1, 2, 1, 0]);
}

#[test]
fn cursor_is_normalized_to_half_unit() {
    let vp = Viewport::new(800.0, 600.0);
    let mut c = CursorState::default();
    c.on_move(0.0, 0.0, vp);
    assert_eq!((c.x, c.y), (-0.5, -0.5));
    c.on_move(800.0, 600.0, vp);
    assert_eq!((c.x, c.y), (0.5, 0.5));
    c.on_move(400.0, 300.0, vp);
    assert_eq!((c.x, c.y), (0.0, 0.0));
}

#[test]
fn cursor_ignores_moves_without_viewport() {
    let mut c = CursorState::default();
    c.on_move(400.0, 300.0, Viewport::new(800.0, 600.0));
    c.on_move(10.0, 10.0, Viewport::new(0.0, 0.0));
    assert_eq!((c.x, c.y), (0.0, 0.0));
}

#[test]
fn snapshot_reflects_every_record() {
    let mut input = InputState::new(Viewport::new(1000.0, 500.0), 3);
    input.scroll.on_scroll(500.0, 500.0);
    input.cursor.on_move(250.0, 125.0, input.viewport.viewport);
    let snap = input.snapshot();
    assert_eq!(snap.scroll_y, 500.0);
    assert_eq!(snap.current_section, 1);
    assert_eq!((snap.cursor.x, snap.cursor.y), (-0.25, -0.25));
    assert_eq!(snap.viewport, Viewport::new(1000.0, 500.0));
}
