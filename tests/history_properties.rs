use eframe_sketchpad::brush::{Brush, BrushConfig, BrushKind, spray_density};
use eframe_sketchpad::history::{MAX_UNDO, SnapshotHistory};
use eframe_sketchpad::surface::{DrawOp, PixelSurface};
use egui::{Color32, Pos2};
use proptest::prelude::*;

fn paint(surface: &mut PixelSurface, step: usize) {
    let x = 4.0 + (step % 8) as f32 * 6.0;
    let y = 4.0 + (step / 8) as f32 * 6.0;
    surface.fill_rect(Pos2::new(x, y), 4.0, Color32::from_rgb((step as u8).wrapping_mul(10), 0, 255));
}

proptest! {
    #[test]
    fn prop_undo_round_trip(actions in 1usize..=MAX_UNDO) {
        let mut surface = PixelSurface::new(48, 48);
        let mut history = SnapshotHistory::new();
        paint(&mut surface, 7);
        let start = surface.read_region(surface.full_region());

        for step in 0..actions {
            history.checkpoint(&surface);
            paint(&mut surface, step);
        }
        for _ in 0..actions {
            prop_assert!(history.undo(&mut surface));
        }
        prop_assert_eq!(surface.read_region(surface.full_region()), start);
    }

    #[test]
    fn prop_history_is_bounded(checkpoints in 0usize..60, capacity in 1usize..30) {
        let mut surface = PixelSurface::new(8, 8);
        let mut history = SnapshotHistory::with_capacity(capacity);
        for step in 0..checkpoints {
            history.checkpoint(&surface);
            paint(&mut surface, step);
        }

        let mut undos = 0;
        while history.undo(&mut surface) {
            undos += 1;
        }
        prop_assert_eq!(undos, checkpoints.min(capacity));
        prop_assert!(!history.undo(&mut surface));
    }

    #[test]
    fn prop_rainbow_hue_progression(start in 0u16..360, segments in 0usize..500) {
        let mut brush = Brush::seeded(
            BrushConfig { kind: BrushKind::Rainbow, color: Color32::BLACK, size: 4.0 },
            0,
        );
        brush.set_hue(start);
        for i in 0..segments {
            brush.segment(Pos2::new(i as f32, 0.0), Pos2::new(i as f32 + 1.0, 0.0));
        }
        prop_assert_eq!(brush.hue() as usize, (start as usize + 3 * segments) % 360);
    }

    #[test]
    fn prop_spray_burst_count(size in 2u32..=40, seed in any::<u64>()) {
        let mut brush = Brush::seeded(
            BrushConfig { kind: BrushKind::Spray, color: Color32::BLACK, size: size as f32 },
            seed,
        );
        let ops = brush.burst(Pos2::new(50.0, 50.0));
        prop_assert_eq!(ops.len(), 25 + 2 * size as usize);
        prop_assert_eq!(spray_density(size as f32), ops.len());
        let all_circles = ops.iter().all(|op| matches!(op, DrawOp::Circle { .. }));
        prop_assert!(all_circles);
    }
}

#[test]
fn test_earliest_states_are_lost_after_overflow() {
    let mut surface = PixelSurface::new(48, 48);
    let mut history = SnapshotHistory::new();
    let blank = surface.read_region(surface.full_region());

    for step in 0..MAX_UNDO + 5 {
        history.checkpoint(&surface);
        paint(&mut surface, step);
    }
    while history.undo(&mut surface) {}

    assert_ne!(surface.read_region(surface.full_region()), blank);
}
