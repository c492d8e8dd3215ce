//! Core types for the rasterizer

use serde::{Serialize, Deserialize};

use super::math::{Vec2I, Vec3};

/// RGB color (0-255 per channel). Alpha is added as opaque when packed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as 0xAARRGGBB with alpha forced to 0xFF
    pub fn to_argb(self) -> u32 {
        0xFF00_0000 | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Unpack 0xAARRGGBB, discarding alpha
    pub fn from_argb(pixel: u32) -> Self {
        Self {
            r: (pixel >> 16) as u8,
            g: (pixel >> 8) as u8,
            b: pixel as u8,
        }
    }
}

/// Source vertex: model-space position and color
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Color,
}

impl Vertex {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }
}

/// Vertex after projection to pixel space; rebuilt every frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProjectedVertex {
    pub position: Vec2I,
    pub color: Color,
}

impl ProjectedVertex {
    pub fn new(x: i32, y: i32, color: Color) -> Self {
        Self {
            position: Vec2I::new(x, y),
            color,
        }
    }
}
