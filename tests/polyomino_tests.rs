//! Piece generation and rotation through the public API.

use proptest::prelude::*;
use tui_polyomino::core::generator::is_connected;
use tui_polyomino::core::{generate, Polyomino, SimpleRng};
use tui_polyomino::types::{Color, Position, FIELD_WIDTH};

fn local(piece: &Polyomino) -> Vec<Position> {
    piece.blocks().iter().map(|b| b.pos).collect()
}

fn pairwise_dist2(cells: &[Position]) -> Vec<i32> {
    let mut out = Vec::new();
    for (i, a) in cells.iter().enumerate() {
        for b in &cells[i + 1..] {
            let (dx, dy) = (a.x - b.x, a.y - b.y);
            out.push(dx * dx + dy * dy);
        }
    }
    out
}

#[test]
fn test_generated_sizes_cover_two_to_six() {
    let mut rng = SimpleRng::new(2024);
    let mut seen = [false; 7];
    for _ in 0..500 {
        let piece = generate(&mut rng, FIELD_WIDTH);
        assert!((2..=6).contains(&piece.len()));
        seen[piece.len()] = true;
    }
    assert!(seen[2..].iter().all(|&s| s), "sizes seen: {:?}", seen);
}

#[test]
fn test_spawn_position_hangs_above_top() {
    let piece = Polyomino::from_offsets(&[(0, 0), (0, 1), (0, 2)], Color::Cyan, Position::default());
    // Lowest local row is 2, so the origin sits three rows above the field.
    assert_eq!(piece.spawn_position(15), Position::new(7, -3));
    assert_eq!(piece.spawn_position(4), Position::new(2, -3));
}

#[test]
fn test_rotation_point_fixed_across_rotations() {
    let mut piece = Polyomino::from_offsets(
        &[(0, 0), (1, 0), (2, 0), (2, 1)],
        Color::Yellow,
        Position::new(4, 4),
    );
    let pivot = piece.rotation_point();
    for _ in 0..3 {
        piece.rotate(true);
        assert_eq!(piece.rotation_point(), pivot);
    }
}

proptest! {
    #[test]
    fn generated_pieces_are_connected_and_distinct(seed in any::<u32>()) {
        let mut rng = SimpleRng::new(seed);
        let piece = generate(&mut rng, FIELD_WIDTH);
        let cells = local(&piece);

        prop_assert!(is_connected(&cells));
        prop_assert_eq!(cells[0], Position::new(0, 0));
        let mut dedup = cells.clone();
        dedup.sort_by_key(|p| (p.x, p.y));
        dedup.dedup();
        prop_assert_eq!(dedup.len(), cells.len());
    }

    #[test]
    fn rotation_is_rigid_and_reversible(seed in any::<u32>(), clockwise in any::<bool>()) {
        let mut rng = SimpleRng::new(seed);
        let mut piece = generate(&mut rng, FIELD_WIDTH);
        let before = local(&piece);
        let position = piece.position;

        piece.rotate(clockwise);
        prop_assert_eq!(pairwise_dist2(&local(&piece)), pairwise_dist2(&before));
        prop_assert_eq!(piece.position, position);

        piece.rotate(!clockwise);
        prop_assert_eq!(local(&piece), before.clone());

        for _ in 0..4 {
            piece.rotate(clockwise);
        }
        prop_assert_eq!(local(&piece), before);
    }
}
