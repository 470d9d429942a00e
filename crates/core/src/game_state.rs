//! Game state module - manages the complete game state
//!
//! This module ties together all core components: field, pieces, RNG, scoring
//! and the diagnostic log. It handles gravity timing, piece movement, rotation
//! with wall kicks, swapping, locking, line clears and the game lifecycle.
//!
//! Lifecycle:
//!
//! ```text
//! new --start--> playing --lock with a block above the top--> game over
//!                  ^  |                                          |
//!                  |  +--pause--> paused --pause--+              |
//!                  +--------------------restart------------------+
//! ```

use crate::field::Field;
use crate::generator::generate;
use crate::log::RingLog;
use crate::polyomino::Polyomino;
use crate::rng::SimpleRng;
use crate::scoring::ScoringSystem;
use crate::snapshot::GameSnapshot;
use crate::types::{
    Collision, CoreLastEvent, GameAction, FIELD_HEIGHT, FIELD_WIDTH, KICK_OFFSETS,
};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    field: Field,
    active: Option<Polyomino>,
    next: Polyomino,
    rng: SimpleRng,
    scoring: ScoringSystem,
    log: RingLog,
    /// Last lock summary (consumed by observers).
    last_event: Option<CoreLastEvent>,
    has_swapped: bool,
    game_over: bool,
    paused: bool,
    started: bool,
    drop_timer_ms: u32,
    elapsed_ms: u64,
}

impl GameState {
    /// Create a new game on the default 15x25 field with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_field(Field::new(FIELD_WIDTH, FIELD_HEIGHT), seed)
    }

    /// Create a game on a prepared field. The field keeps its contents.
    pub fn with_field(field: Field, seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = generate(&mut rng, field.width());

        Self {
            field,
            active: None,
            next,
            rng,
            scoring: ScoringSystem::new(),
            log: RingLog::default(),
            last_event: None,
            has_swapped: false,
            game_over: false,
            paused: false,
            started: false,
            drop_timer_ms: 0,
            elapsed_ms: 0,
        }
    }

    /// Replace the diagnostic log (e.g. with [`RingLog::disabled`]).
    pub fn with_log(mut self, log: RingLog) -> Self {
        self.log = log;
        self
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn has_swapped(&self) -> bool {
        self.has_swapped
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn level(&self) -> u32 {
        self.scoring.level()
    }

    pub fn lines(&self) -> u32 {
        self.scoring.lines_cleared()
    }

    pub fn scoring(&self) -> &ScoringSystem {
        &self.scoring
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn active(&self) -> Option<&Polyomino> {
        self.active.as_ref()
    }

    pub fn next(&self) -> &Polyomino {
        &self.next
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn log(&self) -> &RingLog {
        &self.log
    }

    /// Install a specific active piece, returning the previous one.
    ///
    /// The piece keeps its position. Used by scripted setups and tests.
    pub fn set_active(&mut self, piece: Polyomino) -> Option<Polyomino> {
        self.active.replace(piece)
    }

    /// Install a specific preview piece, returning the previous one.
    pub fn set_next(&mut self, piece: Polyomino) -> Polyomino {
        std::mem::replace(&mut self.next, piece)
    }

    /// Refill `out` in place, copying at most `out.log_limit` log lines.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.field.width();
        out.height = self.field.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.field.cells());

        out.active.clear();
        if let Some(piece) = &self.active {
            out.active.extend(piece.absolute_blocks());
        }
        out.next.clear();
        out.next.extend(self.next.blocks().iter().copied());

        out.score = self.scoring.score();
        out.level = self.scoring.level();
        out.lines = self.scoring.lines_cleared();
        out.elapsed_ms = self.elapsed_ms;
        out.drop_interval_ms = self.drop_interval_ms();
        out.started = self.started;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.has_swapped = self.has_swapped;

        out.fill_log(self.log.recent(out.log_limit));
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Promote the preview piece to active and generate a new preview.
    pub fn spawn_piece(&mut self) {
        let width = self.field.width();
        let fresh = generate(&mut self.rng, width);
        let mut piece = std::mem::replace(&mut self.next, fresh);
        piece.position = piece.spawn_position(width);
        piece.placed = false;

        self.log.record(format_args!(
            "spawned {}-block {} piece",
            piece.len(),
            piece.color().map_or("?", |c| c.as_str())
        ));
        self.active = Some(piece);
        self.drop_timer_ms = 0;
    }

    /// Get current drop interval based on level
    pub fn drop_interval_ms(&self) -> u32 {
        self.scoring.drop_interval_ms()
    }

    /// Classify the active piece where it currently sits.
    pub fn classify(&self) -> Collision {
        match &self.active {
            Some(piece) => self.field.classify(piece),
            None => Collision::None,
        }
    }

    /// Try to move the active piece
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        if !self.field.classify_offset(piece, dx, dy).is_none() {
            return false;
        }
        piece.move_by(dx, dy);
        true
    }

    /// Try to rotate the active piece, falling back to positional kicks.
    ///
    /// A rotation that lands on a placed block is rejected outright. One that
    /// only hits a wall or the floor tries [`KICK_OFFSETS`] in order from the
    /// pre-rotation position, keeping the rotated shape. If nothing fits, the
    /// piece is restored exactly.
    pub fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        let saved = piece.local_positions();
        let origin = piece.position;
        piece.rotate(clockwise);

        match self.field.classify(piece) {
            Collision::None => return true,
            Collision::Wall if !self.field.overlaps_placed(piece) => {}
            _ => {
                piece.restore_local_positions(&saved);
                self.log.record(format_args!("rotation blocked"));
                return false;
            }
        }

        for (dx, dy) in KICK_OFFSETS {
            piece.position = origin.offset(dx, dy);
            if self.field.classify(piece).is_none() {
                self.log
                    .record(format_args!("rotation kicked by ({}, {})", dx, dy));
                return true;
            }
        }

        piece.position = origin;
        piece.restore_local_positions(&saved);
        self.log.record(format_args!("rotation rejected, no kick fits"));
        false
    }

    /// Hard drop the active piece to the bottom and lock it.
    ///
    /// Returns the number of rows moved.
    pub fn hard_drop(&mut self) -> u32 {
        let Some(piece) = self.active.as_mut() else {
            return 0;
        };

        let mut rows = 0;
        while self.field.can_fall(piece) {
            piece.move_by(0, 1);
            rows += 1;
        }

        self.log.record(format_args!("hard dropped {} rows", rows));
        self.lock_piece();
        rows
    }

    /// Exchange the active piece with the preview piece.
    ///
    /// Both are repositioned at spawn coordinates and must fit there. On any
    /// collision both pieces are left exactly as they were. Allowed once per
    /// piece; the next lock re-arms it.
    pub fn swap(&mut self) -> bool {
        let Some(current) = self.active.as_ref() else {
            return false;
        };
        if self.has_swapped {
            self.log.record(format_args!("swap refused, already swapped"));
            return false;
        }

        let width = self.field.width();
        let mut incoming = self.next.clone();
        let mut outgoing = current.clone();
        incoming.position = incoming.spawn_position(width);
        outgoing.position = outgoing.spawn_position(width);

        let fits = self.field.classify(&incoming).is_none()
            && self.field.classify(&outgoing).is_none();
        if !fits {
            self.log.record(format_args!("swap refused, collision"));
            return false;
        }

        self.active = Some(incoming);
        self.next = outgoing;
        self.has_swapped = true;
        self.log.record(format_args!("swapped pieces"));
        true
    }

    /// Lock the active piece onto the field and handle line clears
    pub fn lock_piece(&mut self) {
        let Some(mut piece) = self.active.take() else {
            return;
        };
        piece.placed = true;

        let outcome = self.field.lock(&piece);
        self.has_swapped = false;
        self.log
            .record(format_args!("locked {} blocks", outcome.placed));

        if outcome.topped_out {
            self.game_over = true;
            self.log.record(format_args!("GAME OVER"));
        }

        let clear = self.field.process_line_clear();
        let lines = clear.lines();
        let points = self.scoring.add_lines(lines);
        if lines > 0 {
            self.log.record(format_args!(
                "cleared {} lines for {} points",
                lines, points
            ));
        }
        if clear.settle_passes > 0 {
            self.log
                .record(format_args!("settled in {} passes", clear.settle_passes));
        }

        self.last_event = Some(CoreLastEvent {
            blocks_placed: outcome.placed,
            lines_cleared: lines,
            settle_passes: clear.settle_passes,
            points,
            topped_out: outcome.topped_out,
        });

        if !self.game_over {
            self.spawn_piece();
        }
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<CoreLastEvent> {
        self.last_event.take()
    }

    /// Reset to a fresh running game.
    ///
    /// The random source keeps running, so the next game plays different
    /// pieces. Field dimensions and the log are kept.
    pub fn restart(&mut self) {
        let width = self.field.width();
        self.field.clear();
        self.scoring = ScoringSystem::new();
        self.active = None;
        self.next = generate(&mut self.rng, width);
        self.last_event = None;
        self.has_swapped = false;
        self.game_over = false;
        self.paused = false;
        self.drop_timer_ms = 0;
        self.elapsed_ms = 0;
        self.log.record(format_args!("game reset"));

        self.started = true;
        self.spawn_piece();
    }

    /// Main game tick - advance the clock and apply gravity.
    ///
    /// Returns true when the active piece moved or locked.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.paused || self.game_over || !self.started {
            return false;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(u64::from(elapsed_ms));

        if self.active.is_none() {
            self.spawn_piece();
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms < self.drop_interval_ms() {
            return false;
        }
        self.drop_timer_ms = 0;

        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        true
    }

    /// Apply a game action
    ///
    /// After game over only `Restart` is accepted; while paused only `Pause`
    /// and `Restart` are.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.game_over {
            return match action {
                GameAction::Restart => {
                    self.restart();
                    true
                }
                _ => false,
            };
        }

        match action {
            GameAction::Restart => {
                self.restart();
                true
            }
            GameAction::Pause => {
                if !self.started {
                    return false;
                }
                self.paused = !self.paused;
                self.log.record(format_args!(
                    "{}",
                    if self.paused { "paused" } else { "resumed" }
                ));
                true
            }
            _ if self.paused || !self.started => false,
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.try_move(0, 1),
            GameAction::HardDrop => {
                if self.active.is_none() {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::Rotate => self.try_rotate(true),
            GameAction::Swap => self.swap(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
