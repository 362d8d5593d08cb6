//! RGB colour handling.
//!
//! Shading works on unclamped `f64` channels; the framebuffer stores packed
//! ARGB8888 `u32` values, the format the window texture expects.

use std::ops::{Add, Mul};

pub const BLACK: u32 = 0xFF000000;
pub const WHITE: u32 = 0xFFFFFFFF;
pub const WIREFRAME: u32 = 0xFFFFFF00;

/// Linear RGB colour with channels nominally in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Packs to opaque ARGB8888, clamping each channel to [0, 1].
    pub fn to_argb(self) -> u32 {
        pack_color(self.r, self.g, self.b, 1.0)
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Self::Output {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

/// Per-channel product.
impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Self::Output {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

#[inline]
fn channel_to_byte(c: f64) -> u32 {
    if c.is_nan() {
        return 0;
    }
    (c.clamp(0.0, 1.0) * 255.0).round() as u32
}

/// Packs float channels into ARGB8888.
#[inline]
pub fn pack_color(r: f64, g: f64, b: f64, a: f64) -> u32 {
    (channel_to_byte(a) << 24)
        | (channel_to_byte(r) << 16)
        | (channel_to_byte(g) << 8)
        | channel_to_byte(b)
}

/// Splits ARGB8888 into `[r, g, b, a]` bytes.
#[inline]
pub fn unpack_rgba(color: u32) -> [u8; 4] {
    [
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
        (color >> 24) as u8,
    ]
}
