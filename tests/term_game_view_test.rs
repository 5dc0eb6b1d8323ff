use tui_2048::core::{resolve_move, Grid, Session, SimpleRng};
use tui_2048::term::{AnchorY, FrameBuffer, GameView, SlideAnimation, Viewport};
use tui_2048::types::Direction;

fn session_with(rows: [[u32; 4]; 4]) -> Session {
    Session::from_grid(Grid::from_rows(rows), SimpleRng::new(1))
}

fn all_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            all.push(fb.get(x, y).unwrap().ch);
        }
        all.push('\n');
    }
    all
}

fn read(fb: &FrameBuffer, x: u16, y: u16, len: u16) -> String {
    (0..len).map(|dx| fb.get(x + dx, y).unwrap().ch).collect()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = session_with([[0; 4]; 4]).snapshot();
    let view = GameView::default();

    // With 7x3 tiles and 1-cell gaps:
    // inner = 4*7 + 5 by 4*3 + 5 => 33x17
    // plus border => 35x19
    let fb = view.render(&snap, Viewport::new(35, 19));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(34, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 18).unwrap().ch, '└');
    assert_eq!(fb.get(34, 18).unwrap().ch, '┘');
}

#[test]
fn term_view_centers_tile_values() {
    let snap = session_with([[0; 4], [0; 4], [0, 128, 0, 0], [0; 4]]).snapshot();
    let view = GameView::default();
    let fb = view.render(&snap, Viewport::new(35, 19));

    // Tile (1,2) starts at x = 1 + 1 + 8, y = 1 + 1 + 2*4.
    assert_eq!(view.tile_origin(Viewport::new(35, 19), 1, 2), (10, 10));
    // Three digits centered in seven columns, middle row.
    assert_eq!(read(&fb, 12, 11, 3), "128");
}

#[test]
fn term_view_respects_custom_tile_size() {
    let snap = session_with([[0; 4]; 4]).snapshot();
    let view = GameView::new(5, 1);

    // inner = 4*5 + 5 by 4*1 + 5 => 25x9, frame 27x11.
    let fb = view.render(&snap, Viewport::new(27, 11));
    assert_eq!(fb.get(26, 10).unwrap().ch, '┘');
    assert_eq!(view.pitch_x(), 6);
    assert_eq!(view.pitch_y(), 2);
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut session = session_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    session.apply_move(Direction::Left).unwrap();
    let view = GameView::default();

    let narrow = all_text(&view.render(&session.snapshot(), Viewport::new(35, 19)));
    assert!(!narrow.contains("SCORE"));

    let wide = all_text(&view.render(&session.snapshot(), Viewport::new(60, 19)));
    for label in ["SCORE", "BEST", "GOAL", "MOVES", "u undo"] {
        assert!(wide.contains(label), "missing {label}");
    }
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = session_with([[0; 4]; 4]).snapshot();
    let view = GameView::default();

    // start_y = (27 - 19) / 2 = 4 => top-left corner at (0,4).
    let fb = view.render(&snap, Viewport::new(35, 27));
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = session_with([[0; 4]; 4]).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    let fb = view.render(&snap, Viewport::new(35, 27));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_overlays_follow_session_state() {
    let view = GameView::default();
    let vp = Viewport::new(60, 19);

    let mut session = session_with([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]);
    session.apply_move(Direction::Left).unwrap();
    assert!(all_text(&view.render(&session.snapshot(), vp)).contains("YOU WIN!"));

    session.continue_game().unwrap();
    let after = all_text(&view.render(&session.snapshot(), vp));
    assert!(!after.contains("YOU WIN!"));
    assert!(after.contains("4096"));

    let stuck = session_with([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
    assert!(all_text(&view.render(&stuck.snapshot(), vp)).contains("GAME OVER"));
}

#[test]
fn term_view_slides_merging_tiles_onto_their_target() {
    let before = Grid::from_rows([[2, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
    let mut session = Session::from_grid(before, SimpleRng::new(1));
    let result = session.begin_move(Direction::Left).unwrap();
    let snap = session.snapshot();

    let view = GameView::default();
    let vp = Viewport::new(35, 19);
    let mut slide = SlideAnimation::new(before, &result);

    // Midway the moving 2 sits between its start and the target column.
    slide.advance(slide.duration_ms() / 2);
    let fb = view.render_frame(&snap, Some(&slide), vp);
    let (x0, y0) = view.tile_origin(vp, 0, 0);
    assert_eq!(read(&fb, x0 + 3, y0 + 1, 1), "2");
    let mid_x = x0 + 3 + 12;
    assert_eq!(read(&fb, mid_x, y0 + 1, 1), "2");

    // Without a slide the committed grid is drawn.
    let fb = view.render_frame(&snap, None, vp);
    assert_eq!(read(&fb, x0 + 3, y0 + 1, 1), "4");
}
