use constants::layout::{ORNAMENT_SPACING, START_OFFSET};

use crate::engine::layout::WallSide;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrnamentKind {
    /// Empty decorative picture frame, inner size in metres.
    Frame { width: f32, height: f32 },
    /// Small bracket with a glowing bulb.
    Sconce,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ornament {
    pub z: f32,
    pub y: f32,
    pub side: WallSide,
    pub kind: OrnamentKind,
}

/// Linear congruential hash in [0, 1).
pub fn seed(n: u32) -> f32 {
    ((u64::from(n) * 9301 + 49297) % 233_280) as f32 / 233_280.0
}

/// Decorations scattered along both walls. A pure function of the corridor
/// length, so the same corridor always gets the same ornaments.
pub fn ornaments(corridor_length: f32) -> Vec<Ornament> {
    let count = (corridor_length / ORNAMENT_SPACING).floor().max(0.0) as u32;
    let margin = START_OFFSET.abs();
    let span = (corridor_length - 2.0 * margin).max(0.0);

    (0..count)
        .map(|i| {
            let z = -(seed(i * 7 + 1) * span + margin);
            let side = if seed(i * 13 + 3) > 0.5 {
                WallSide::Right
            } else {
                WallSide::Left
            };
            if seed(i * 17 + 5) > 0.5 {
                let sign = side.sign();
                Ornament {
                    z,
                    y: 2.6 + seed(i * 29) * 0.6,
                    side,
                    kind: OrnamentKind::Frame {
                        width: 0.6 + (z * 7.0 + sign * 13.0).rem_euclid(5.0) * 0.1,
                        height: 0.5 + (z * 11.0 + sign * 7.0).rem_euclid(4.0) * 0.08,
                    },
                }
            } else {
                Ornament {
                    z,
                    y: 2.0 + seed(i * 23) * 0.8,
                    side,
                    kind: OrnamentKind::Sconce,
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_matches_known_values() {
        assert!((seed(0) - 49_297.0 / 233_280.0).abs() < 1e-6);
        assert!((seed(1) - 58_598.0 / 233_280.0).abs() < 1e-6);
        for n in 0..1000 {
            let value = seed(n);
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn count_scales_with_length() {
        assert_eq!(ornaments(20.0).len(), 3);
        assert_eq!(ornaments(120.0).len(), 20);
        assert!(ornaments(0.0).is_empty());
    }

    #[test]
    fn ornaments_stay_within_the_corridor() {
        let length = 150.0;
        for ornament in ornaments(length) {
            assert!(ornament.z <= -10.0 && ornament.z >= -(length - 10.0));
            if let OrnamentKind::Frame { width, height } = ornament.kind {
                assert!((0.6..=1.1).contains(&width));
                assert!((0.5..=0.82).contains(&height));
                assert!((2.6..=3.2).contains(&ornament.y));
            } else {
                assert!((2.0..=2.8).contains(&ornament.y));
            }
        }
    }

    #[test]
    fn layout_is_stable() {
        assert_eq!(ornaments(96.0), ornaments(96.0));
    }
}
