//! Integer RGB colour with channels conceptually in 0..=255.
//!
//! Construction never clamps; every combining operation clamps each
//! channel back into range.

use std::ops::{Add, Mul};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

#[inline]
fn clamp_channel(value: f64) -> i32 {
    // truncation toward zero after clamping
    value.clamp(0.0, 255.0) as i32
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `factor`, clamped to 0..=255.
    pub fn scale(self, factor: f64) -> Color {
        Color::new(
            clamp_channel(self.r as f64 * factor),
            clamp_channel(self.g as f64 * factor),
            clamp_channel(self.b as f64 * factor),
        )
    }

    /// Channel-wise modulation `a·b / 255`, clamped to 0..=255.
    pub fn multiply(self, other: Color) -> Color {
        // widened so unclamped scene-file channels cannot overflow
        let modulate = |a: i32, b: i32| (i64::from(a) * i64::from(b) / 255).clamp(0, 255) as i32;
        Color::new(
            modulate(self.r, other.r),
            modulate(self.g, other.g),
            modulate(self.b, other.b),
        )
    }

    /// Halve each channel (integer division).
    pub fn halved(self) -> Color {
        Color::new(self.r / 2, self.g / 2, self.b / 2)
    }

    /// Pack as `0xRRGGBBAA` with alpha fixed at 255.
    pub fn to_rgba(self) -> u32 {
        let r = self.r.clamp(0, 255) as u32;
        let g = self.g.clamp(0, 255) as u32;
        let b = self.b.clamp(0, 255) as u32;
        (r << 24) | (g << 16) | (b << 8) | 0xFF
    }

    /// Unpack the RGB part of a `0xRRGGBBAA` texel.
    pub fn from_rgba(packed: u32) -> Color {
        Color::new(
            ((packed >> 24) & 0xFF) as i32,
            ((packed >> 16) & 0xFF) as i32,
            ((packed >> 8) & 0xFF) as i32,
        )
    }
}

impl Add for Color {
    type Output = Color;

    /// Channel-wise sum, clamped to 0..=255.
    fn add(self, rhs: Color) -> Color {
        Color::new(
            self.r.saturating_add(rhs.r).clamp(0, 255),
            self.g.saturating_add(rhs.g).clamp(0, 255),
            self.b.saturating_add(rhs.b).clamp(0, 255),
        )
    }
}

impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        self.multiply(rhs)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Color {
        self.scale(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_does_not_clamp() {
        let c = Color::new(300, -5, 10);
        assert_eq!(c.r, 300);
        assert_eq!(c.g, -5);
    }

    #[test]
    fn test_scale_clamps() {
        assert_eq!(Color::new(200, 100, 0).scale(2.0), Color::new(255, 200, 0));
        assert_eq!(Color::new(200, 100, 0).scale(-1.0), Color::BLACK);
        assert_eq!(Color::new(255, 255, 255).scale(0.2), Color::new(51, 51, 51));
    }

    #[test]
    fn test_add_clamps() {
        assert_eq!(
            Color::new(200, 10, 0) + Color::new(100, 20, 0),
            Color::new(255, 30, 0)
        );
    }

    #[test]
    fn test_multiply_modulates() {
        assert_eq!(Color::WHITE * Color::new(255, 128, 0), Color::new(255, 128, 0));
        assert_eq!(Color::new(128, 128, 128) * Color::new(128, 0, 255), Color::new(64, 0, 128));
    }

    #[test]
    fn test_huge_channels_clamp_without_overflow() {
        let huge = Color::new(99_999, 99_999, i32::MAX);
        assert_eq!(huge * huge, Color::WHITE);
        assert_eq!(huge * Color::new(-99_999, 0, 1), Color::new(0, 0, 255));
        assert_eq!(huge + huge, Color::WHITE);
    }

    #[test]
    fn test_rgba_packing() {
        assert_eq!(Color::new(0x12, 0x34, 0x56).to_rgba(), 0x123456FF);
        assert_eq!(Color::BLACK.to_rgba(), 0x000000FF);
        assert_eq!(Color::from_rgba(0xAABBCC00), Color::new(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_halved() {
        assert_eq!(Color::new(255, 100, 3).halved(), Color::new(127, 50, 1));
    }
}
