use glam::{Mat4, Vec2, Vec3};
use vislab_common::{Rgba, SceneId};
use vislab_render::{DrawCommand, DrawList, Geometry, MeshKey};

use crate::geometry;
use crate::scene::Scene;

pub const ZERO_DIGIT: MeshKey = MeshKey("zero_digit");
pub const ONE_DIGIT: MeshKey = MeshKey("one_digit");

/// Number of binary digits shown; the clock wraps at `2^NUM_DIGITS` seconds.
pub const NUM_DIGITS: usize = 6;

const DIGIT_SPACING: f32 = 0.3;
const ZERO_SIDE_RADIUS_SMALL: f32 = 0.05;
const ZERO_SIDE_RADIUS_BIG: f32 = 0.09;
const ZERO_UP_RADIUS_SMALL: f32 = 0.12;
const ZERO_UP_RADIUS_BIG: f32 = 0.16;
const ONE_HALF_WIDTH: f32 = 0.02;
const RING_SEGMENTS: u32 = 48;
const DIGIT_COLOR: Rgba = [0.1, 0.1, 0.1, 1.0];

/// `value` as `digits` binary digits, most significant first. Bits above
/// `digits` are dropped.
pub fn binary_digits(value: u64, digits: usize) -> Vec<bool> {
    (0..digits)
        .rev()
        .map(|bit| bit < 64 && (value >> bit) & 1 == 1)
        .collect()
}

/// Horizontal centre of digit slot `slot` when `digits` slots are centred on
/// the origin.
pub fn digit_offset(slot: usize, digits: usize) -> f32 {
    (slot as f32 - (digits.saturating_sub(1)) as f32 / 2.0) * DIGIT_SPACING
}

/// Scene 2: elapsed seconds shown as a row of binary digits.
#[derive(Debug, Clone, Default)]
pub struct BinaryClockScene {
    elapsed: f64,
    pub paused: bool,
}

impl BinaryClockScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seconds(&self) -> u64 {
        self.elapsed as u64
    }

    /// The value currently on display.
    pub fn displayed(&self) -> u64 {
        self.seconds() % (1 << NUM_DIGITS)
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

impl Scene for BinaryClockScene {
    fn id(&self) -> SceneId {
        SceneId::BinaryClock
    }

    fn meshes(&self) -> Vec<(MeshKey, Geometry)> {
        vec![
            (
                ZERO_DIGIT,
                geometry::ellipse_ring(
                    Vec2::new(ZERO_SIDE_RADIUS_SMALL, ZERO_UP_RADIUS_SMALL),
                    Vec2::new(ZERO_SIDE_RADIUS_BIG, ZERO_UP_RADIUS_BIG),
                    RING_SEGMENTS,
                    DIGIT_COLOR,
                ),
            ),
            (
                ONE_DIGIT,
                geometry::rectangle(ONE_HALF_WIDTH, ZERO_UP_RADIUS_BIG, DIGIT_COLOR),
            ),
        ]
    }

    fn update(&mut self, dt: f32) {
        if !self.paused {
            self.elapsed += f64::from(dt);
        }
    }

    fn draw(&self, list: &mut DrawList) {
        for (slot, is_one) in binary_digits(self.seconds(), NUM_DIGITS)
            .into_iter()
            .enumerate()
        {
            let mesh = if is_one { ONE_DIGIT } else { ZERO_DIGIT };
            let x = digit_offset(slot, NUM_DIGITS);
            list.push(DrawCommand::flat(
                mesh,
                Mat4::from_translation(Vec3::new(x, 0.0, 0.0)),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_msb_first() {
        assert_eq!(
            binary_digits(5, 6),
            vec![false, false, false, true, false, true]
        );
        assert_eq!(binary_digits(63, 6), vec![true; 6]);
    }

    #[test]
    fn digits_wrap_above_width() {
        assert_eq!(binary_digits(64, 6), vec![false; 6]);
        assert_eq!(binary_digits(65, 6), binary_digits(1, 6));
    }

    #[test]
    fn digit_offsets_are_symmetric() {
        let first = digit_offset(0, NUM_DIGITS);
        let last = digit_offset(NUM_DIGITS - 1, NUM_DIGITS);
        assert!((first + last).abs() < 1e-6);
        assert!(first < last);
    }

    #[test]
    fn clock_counts_whole_seconds() {
        let mut clock = BinaryClockScene::new();
        for _ in 0..150 {
            clock.update(1.0 / 60.0);
        }
        assert_eq!(clock.seconds(), 2);
    }

    #[test]
    fn clock_wraps_display() {
        let mut clock = BinaryClockScene::new();
        clock.update(64.5);
        assert_eq!(clock.seconds(), 64);
        assert_eq!(clock.displayed(), 0);
    }

    #[test]
    fn paused_clock_holds() {
        let mut clock = BinaryClockScene::new();
        clock.update(3.0);
        clock.paused = true;
        clock.update(10.0);
        assert_eq!(clock.seconds(), 3);
        clock.reset();
        assert_eq!(clock.seconds(), 0);
    }

    #[test]
    fn draws_one_command_per_digit() {
        let mut clock = BinaryClockScene::new();
        clock.update(5.0);
        let mut list = DrawList::new();
        clock.draw(&mut list);
        assert_eq!(list.len(), NUM_DIGITS);
        assert_eq!(list.count_mesh(ONE_DIGIT), 2);
        assert_eq!(list.count_mesh(ZERO_DIGIT), NUM_DIGITS - 2);
        // Least significant digit is rightmost.
        let last = list.commands.last().unwrap();
        assert_eq!(last.mesh, ONE_DIGIT);
        assert!(last.model.w_axis.x > 0.0);
    }
}
