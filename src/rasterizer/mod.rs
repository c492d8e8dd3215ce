//! Software rasterizer
//!
//! - Turn-based, table-driven trigonometry
//! - Row-major 4x4 matrices, look-at view, orthographic and perspective projection
//! - Edge-function triangle fill with the top-left rule
//! - Barycentric vertex color blending
//! - No depth buffer: draw order decides what ends up on top

mod trig;
mod math;
mod projection;
mod types;
mod render;
mod pipeline;

pub use trig::*;
pub use math::*;
pub use projection::*;
pub use types::*;
pub use render::*;
pub use pipeline::*;

/// Default framebuffer dimensions, independent of the window size
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 128;
