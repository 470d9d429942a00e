//! Rendering a live game into a framebuffer and through the diff renderer.

use tui_polyomino::core::{Field, GameState, Polyomino};
use tui_polyomino::term::{block_rgb, changed_runs, AnchorY, GameView, TerminalRenderer, Viewport};
use tui_polyomino::types::{Color, GameAction, Position};

const VIEW: Viewport = Viewport {
    width: 80,
    height: 30,
};

// Default field 15x25 with 2-column cells: frame is 32x27.
const START_X: u16 = (80 - (32 + 12 + 2)) / 2;
const START_Y: u16 = (30 - 27) / 2;

#[test]
fn test_frame_border_is_double_line() {
    let mut game = GameState::new(1);
    game.start();
    let fb = GameView::default().render(&game.snapshot(), VIEW);

    let corner = |x, y| fb.get(x, y).unwrap().ch;
    assert_eq!(corner(START_X, START_Y), '╔');
    assert_eq!(corner(START_X + 31, START_Y), '╗');
    assert_eq!(corner(START_X, START_Y + 26), '╚');
    assert_eq!(corner(START_X + 31, START_Y + 26), '╝');
    assert_eq!(corner(START_X + 1, START_Y), '═');
    assert_eq!(corner(START_X, START_Y + 1), '║');
}

#[test]
fn test_active_piece_drawn_two_columns_wide() {
    let mut game = GameState::new(1);
    game.start();
    game.set_active(Polyomino::from_offsets(
        &[(0, 0), (1, 0)],
        Color::Magenta,
        Position::new(4, 10),
    ));

    let fb = GameView::default().render(&game.snapshot(), VIEW);
    let magenta = block_rgb(Color::Magenta);
    let row = START_Y + 1 + 10;
    let left = START_X + 1 + 4 * 2;
    for x in left..left + 4 {
        let cell = fb.get(x, row).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, magenta);
    }
    assert_ne!(fb.get(left + 4, row).unwrap().style.fg, magenta);
}

#[test]
fn test_side_panel_tracks_score_after_clear() {
    let mut field = Field::new(15, 25);
    for x in 1..15 {
        field.set(x, 24, Some(Color::Green));
    }
    let mut game = GameState::with_field(field, 1);
    game.start();
    game.set_active(Polyomino::from_offsets(&[(0, 0)], Color::Red, Position::new(0, -1)));
    assert!(game.apply_action(GameAction::HardDrop));

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&game.snapshot(), VIEW);
    let panel_x = usize::from(START_X + 32 + 2);
    let rows: Vec<String> = (0..fb.height())
        .map(|y| fb.row_text(y).chars().skip(panel_x).collect())
        .collect();

    let value_after = |label: &str| {
        let i = rows.iter().position(|r| r.trim_end() == label).unwrap();
        rows[i + 1].trim_end().to_string()
    };
    assert_eq!(value_after("SCORE"), "100");
    assert_eq!(value_after("LINES"), "1");
    assert_eq!(value_after("LEVEL"), "1");
    assert!(rows.iter().any(|r| r.contains("cleared 1 lines")));
}

#[test]
fn test_renderer_sends_only_changed_cells() {
    let mut game = GameState::new(8);
    game.start();
    let view = GameView::default();
    let mut renderer = TerminalRenderer::with_writer(Vec::new());

    let mut fb = view.render(&game.snapshot(), VIEW);
    renderer.draw_swap(&mut fb).unwrap();
    let full = renderer.last_frame_bytes();

    let before = view.render(&game.snapshot(), VIEW);
    // Bring the piece into view, then move it.
    for _ in 0..8 {
        game.apply_action(GameAction::SoftDrop);
    }
    game.apply_action(GameAction::MoveLeft);
    let after = view.render(&game.snapshot(), VIEW);
    assert!(!changed_runs(&before, &after).is_empty());

    view.render_into(&game.snapshot(), VIEW, &mut fb);
    renderer.draw_swap(&mut fb).unwrap();
    let diff = renderer.last_frame_bytes();
    assert!(diff > 0);
    assert!(diff < full / 4, "diff {diff} vs full {full}");
}

#[test]
fn test_pause_overlay() {
    let mut game = GameState::new(2);
    game.start();
    game.apply_action(GameAction::Pause);
    let fb = GameView::default().render(&game.snapshot(), VIEW);
    let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(text.contains("PAUSED"));
    assert!(!text.contains("GAME OVER"));
}
