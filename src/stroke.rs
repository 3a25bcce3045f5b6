use egui::Pos2;

use crate::brush::Brush;
use crate::history::SnapshotHistory;
use crate::surface::{DrawOp, PixelSurface};

/// Everything a gesture mutates, borrowed for the duration of one event
pub struct StrokeContext<'a> {
    pub surface: &'a mut PixelSurface,
    pub history: &'a mut SnapshotHistory,
    pub brush: &'a mut Brush,
}

impl StrokeContext<'_> {
    fn draw(&mut self, ops: &[DrawOp]) {
        for op in ops {
            self.surface.apply(op);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Stroking {
        last_point: Pos2,
    },
}

/// Pointer-gesture state machine.
///
/// ```text
///            pointer_down (checkpoint)
///   ┌──────┐ ─────────────────────────► ┌───────────┐
///   │ Idle │                            │ Stroking  │ ◄─┐ pointer_move
///   └──────┘ ◄───────────────────────── └───────────┘ ──┘ (brush segment)
///            pointer_up / pointer_leave
/// ```
#[derive(Debug, Default)]
pub struct StrokeController {
    state: StrokeState,
}

impl StrokeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self.state, StrokeState::Stroking { .. })
    }

    /// Starts a gesture: checkpoints once, then lets the brush mark the
    /// down-point (only spray draws anything here). A down while already
    /// stroking begins a fresh gesture.
    pub fn pointer_down(&mut self, pos: Pos2, ctx: &mut StrokeContext<'_>) {
        if self.is_stroking() {
            log::debug!("pointer down during a stroke, starting a new gesture");
        }
        ctx.history.checkpoint(ctx.surface);
        self.state = StrokeState::Stroking { last_point: pos };
        let ops = ctx.brush.stroke_start(pos);
        ctx.draw(&ops);
    }

    /// Draws the segment from the previous point to `pos`. Returns false and
    /// does nothing while idle.
    pub fn pointer_move(&mut self, pos: Pos2, ctx: &mut StrokeContext<'_>) -> bool {
        let StrokeState::Stroking { last_point } = self.state else {
            return false;
        };
        let ops = ctx.brush.segment(last_point, pos);
        ctx.draw(&ops);
        self.state = StrokeState::Stroking { last_point: pos };
        true
    }

    pub fn pointer_up(&mut self) {
        self.state = StrokeState::Idle;
    }

    /// The pointer left the surface. The partial stroke is kept.
    pub fn pointer_leave(&mut self) {
        self.state = StrokeState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{BrushConfig, BrushKind, spray_density};
    use egui::Color32;

    struct Fixture {
        surface: PixelSurface,
        history: SnapshotHistory,
        brush: Brush,
        controller: StrokeController,
    }

    impl Fixture {
        fn new(kind: BrushKind) -> Self {
            Self {
                surface: PixelSurface::new(64, 64),
                history: SnapshotHistory::new(),
                brush: Brush::seeded(
                    BrushConfig {
                        kind,
                        color: Color32::RED,
                        size: 10.0,
                    },
                    9,
                ),
                controller: StrokeController::new(),
            }
        }

        fn down(&mut self, x: f32, y: f32) {
            let mut ctx = StrokeContext {
                surface: &mut self.surface,
                history: &mut self.history,
                brush: &mut self.brush,
            };
            self.controller.pointer_down(Pos2::new(x, y), &mut ctx);
        }

        fn moved(&mut self, x: f32, y: f32) -> bool {
            let mut ctx = StrokeContext {
                surface: &mut self.surface,
                history: &mut self.history,
                brush: &mut self.brush,
            };
            self.controller.pointer_move(Pos2::new(x, y), &mut ctx)
        }
    }

    #[test]
    fn test_move_while_idle_draws_nothing() {
        let mut f = Fixture::new(BrushKind::Round);
        assert!(!f.moved(10.0, 10.0));
        assert!(f.surface.is_blank());
        assert!(f.history.is_empty());
    }

    #[test]
    fn test_one_checkpoint_per_gesture() {
        let mut f = Fixture::new(BrushKind::Round);
        f.down(10.0, 10.0);
        assert!(f.surface.is_blank());
        for x in [15.0, 20.0, 25.0, 30.0] {
            assert!(f.moved(x, 10.0));
        }
        f.controller.pointer_up();

        assert_eq!(f.history.len(), 1);
        assert!(f.history.peek_latest().unwrap().as_raw().iter().all(|b| *b == 0));
        assert_eq!(f.surface.pixel(20, 10), Some([255, 0, 0, 255]));
        assert_eq!(f.controller.state(), StrokeState::Idle);
    }

    #[test]
    fn test_leave_ends_gesture_and_keeps_pixels() {
        let mut f = Fixture::new(BrushKind::Round);
        f.down(10.0, 10.0);
        f.moved(20.0, 10.0);
        f.controller.pointer_leave();

        assert!(!f.controller.is_stroking());
        assert!(!f.moved(40.0, 40.0));
        assert_eq!(f.surface.pixel(40, 40), Some([0, 0, 0, 0]));
        assert_eq!(f.surface.pixel(15, 10), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_spray_tap_is_visible() {
        let mut f = Fixture::new(BrushKind::Spray);
        f.down(32.0, 32.0);
        f.controller.pointer_up();
        assert!(!f.surface.is_blank());
        assert_eq!(spray_density(10.0), 45);
    }

    #[test]
    fn test_segments_chain_from_last_point() {
        let mut f = Fixture::new(BrushKind::Round);
        f.down(10.0, 10.0);
        f.moved(10.0, 40.0);
        f.moved(40.0, 40.0);

        assert_eq!(
            f.controller.state(),
            StrokeState::Stroking {
                last_point: Pos2::new(40.0, 40.0)
            }
        );
        // corner reached through (10, 40), never on the diagonal
        assert_eq!(f.surface.pixel(10, 25), Some([255, 0, 0, 255]));
        assert_eq!(f.surface.pixel(25, 40), Some([255, 0, 0, 255]));
        assert_eq!(f.surface.pixel(25, 25), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_second_down_checkpoints_again() {
        let mut f = Fixture::new(BrushKind::Round);
        f.down(10.0, 10.0);
        f.moved(20.0, 10.0);
        f.down(30.0, 30.0);
        assert_eq!(f.history.len(), 2);
    }
}
