//! Framebuffer and edge-function triangle rasterization

use std::path::Path;

use macroquad::logging::warn;

use super::math::Vec2I;
use super::types::{Color, ProjectedVertex};

/// Software framebuffer
///
/// One allocation for its whole life; pixels are packed 0xAARRGGBB, row-major.
pub struct Framebuffer {
    pub pixels: Vec<u32>,
    pub width: usize,
    pub height: usize,
    /// Bytes per row
    pub pitch: usize,
}

impl Framebuffer {
    pub const BYTES_PER_PIXEL: usize = 4;

    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![Color::BLACK.to_argb(); width * height],
            width,
            height,
            pitch: width * Self::BYTES_PER_PIXEL,
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_argb());
    }

    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color.to_argb();
        }
    }

    /// Scrolling blue/green test pattern; offsets wrap every 256 pixels
    pub fn fill_gradient(&mut self, blue_offset: i32, green_offset: i32) {
        if self.width == 0 {
            return;
        }
        for (y, row) in self.pixels.chunks_exact_mut(self.width).enumerate() {
            let green = (y as i32).wrapping_add(green_offset) as u8;
            for (x, pixel) in row.iter_mut().enumerate() {
                let blue = (x as i32).wrapping_add(blue_offset) as u8;
                *pixel = Color::new(0, green, blue).to_argb();
            }
        }
    }

    /// Copy into an RGBA8 byte buffer (`out.len()` must be width * height * 4)
    pub fn write_rgba(&self, out: &mut [u8]) {
        for (pixel, rgba) in self.pixels.iter().zip(out.chunks_exact_mut(4)) {
            let c = Color::from_argb(*pixel);
            rgba.copy_from_slice(&[c.r, c.g, c.b, 255]);
        }
    }

    /// Save the current contents as a PNG
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        let img = image::RgbaImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let c = Color::from_argb(self.pixel(x as usize, y as usize));
            image::Rgba([c.r, c.g, c.b, 255])
        });
        img.save(path)
    }
}

/// Edge function E(a, b, p) = cross(b - a, p - a)
///
/// Positive when p is on the inner side of a -> b for a triangle with
/// positive area in screen space (Y down). Inputs stay inside the guard
/// band, so the differences fit in i32 and the product is widened.
pub fn edge_function(a: Vec2I, b: Vec2I, p: Vec2I) -> i64 {
    (b - a).cross(p - a)
}

/// Top-left fill rule: a horizontal edge pointing right, or any edge with
/// negative y. Pixels exactly on these edges are inside.
pub fn is_top_left(edge: Vec2I) -> bool {
    (edge.y == 0 && edge.x > 0) || edge.y < 0
}

/// One directed edge with its fill-rule bias and stepping deltas
#[derive(Debug, Clone, Copy)]
struct Edge {
    a: Vec2I,
    b: Vec2I,
    bias: i64,
    /// Change in E for x + 1
    step_x: i64,
    /// Change in E for y + 1
    step_y: i64,
}

impl Edge {
    fn new(a: Vec2I, b: Vec2I) -> Self {
        let dir = Vec2I::new(b.x.wrapping_sub(a.x), b.y.wrapping_sub(a.y));
        Self {
            a,
            b,
            bias: if is_top_left(dir) { 0 } else { -1 },
            step_x: a.y as i64 - b.y as i64,
            step_y: b.x as i64 - a.x as i64,
        }
    }

    /// Biased value at p: >= 0 means inside this half-plane
    fn eval(&self, p: Vec2I) -> i64 {
        edge_function(self.a, self.b, p) + self.bias
    }
}

/// A pixel-space triangle ready for coverage and interpolation
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub v: [ProjectedVertex; 3],
    /// Signed double area, E(v0, v1, v2)
    pub area: i64,
}

impl Triangle {
    pub fn new(v0: ProjectedVertex, v1: ProjectedVertex, v2: ProjectedVertex) -> Self {
        Self {
            v: [v0, v1, v2],
            area: edge_function(v0.position, v1.position, v2.position),
        }
    }

    /// Barycentric weights (alpha, beta, gamma) of p, from unbiased edge values
    pub fn weights(&self, p: Vec2I) -> (f32, f32, f32) {
        let [v0, v1, v2] = self.v;
        self.weights_from(
            edge_function(v1.position, v2.position, p),
            edge_function(v2.position, v0.position, p),
            edge_function(v0.position, v1.position, p),
        )
    }

    fn weights_from(&self, w0: i64, w1: i64, w2: i64) -> (f32, f32, f32) {
        let area = self.area as f32;
        (w0 as f32 / area, w1 as f32 / area, w2 as f32 / area)
    }

    /// Blend the vertex colors with the given weights
    ///
    /// Channels are truncated, so a pixel whose weights round just under 1.0
    /// can land one step below a vertex color even on a single-color triangle.
    pub fn shade(&self, (alpha, beta, gamma): (f32, f32, f32)) -> Color {
        let [c0, c1, c2] = [self.v[0].color, self.v[1].color, self.v[2].color];
        let mix = |a: u8, b: u8, c: u8| (alpha * a as f32 + beta * b as f32 + gamma * c as f32) as u8;
        Color::new(mix(c0.r, c1.r, c2.r), mix(c0.g, c1.g, c2.g), mix(c0.b, c1.b, c2.b))
    }
}

/// Fill a triangle with barycentric-blended vertex colors
///
/// Only triangles with positive signed area in screen space produce pixels;
/// zero-area and opposite-winding triangles are skipped. Returns the number
/// of pixels written.
pub fn rasterize_triangle(
    fb: &mut Framebuffer,
    v0: &ProjectedVertex,
    v1: &ProjectedVertex,
    v2: &ProjectedVertex,
) -> usize {
    let tri = Triangle::new(*v0, *v1, *v2);
    if tri.area <= 0 || fb.width == 0 || fb.height == 0 {
        return 0;
    }

    let (p0, p1, p2) = (v0.position, v1.position, v2.position);

    // Bounding box, clamped to the framebuffer. This is the only bounds
    // check: every index written below lies inside it.
    let min_x = p0.x.min(p1.x).min(p2.x).max(0);
    let min_y = p0.y.min(p1.y).min(p2.y).max(0);
    let max_x = p0.x.max(p1.x).max(p2.x).min(fb.width as i32 - 1);
    let max_y = p0.y.max(p1.y).max(p2.y).min(fb.height as i32 - 1);
    if min_x > max_x || min_y > max_y {
        return 0;
    }

    // Edge i is opposite vertex i
    let edges = [Edge::new(p1, p2), Edge::new(p2, p0), Edge::new(p0, p1)];

    let start = Vec2I::new(min_x, min_y);
    let mut row = [edges[0].eval(start), edges[1].eval(start), edges[2].eval(start)];
    let mut written = 0;

    for y in min_y..=max_y {
        let mut w = row;
        let line = y as usize * fb.width;

        for x in min_x..=max_x {
            if w[0] >= 0 && w[1] >= 0 && w[2] >= 0 {
                let weights = tri.weights_from(
                    w[0] - edges[0].bias,
                    w[1] - edges[1].bias,
                    w[2] - edges[2].bias,
                );
                fb.pixels[line + x as usize] = tri.shade(weights).to_argb();
                written += 1;
            }

            for (wi, edge) in w.iter_mut().zip(&edges) {
                *wi += edge.step_x;
            }
        }

        for (ri, edge) in row.iter_mut().zip(&edges) {
            *ri += edge.step_y;
        }
    }

    written
}

/// Walk a flat vertex list three at a time, in order
///
/// Trailing vertices that do not form a full triangle are ignored.
/// Returns the number of triangles visited.
pub fn for_each_triangle<F>(vertices: &[ProjectedVertex], mut f: F) -> usize
where
    F: FnMut(&ProjectedVertex, &ProjectedVertex, &ProjectedVertex),
{
    let triangles = vertices.chunks_exact(3);
    if !triangles.remainder().is_empty() {
        warn!(
            "mesh has {} vertices, ignoring {} trailing",
            vertices.len(),
            triangles.remainder().len()
        );
    }

    let mut count = 0;
    for tri in triangles {
        f(&tri[0], &tri[1], &tri[2]);
        count += 1;
    }
    count
}

/// Rasterize every triangle of a flat vertex list in list order
///
/// There is no depth test: later triangles overwrite earlier ones.
pub fn rasterize_mesh(fb: &mut Framebuffer, vertices: &[ProjectedVertex]) -> usize {
    for_each_triangle(vertices, |v0, v1, v2| {
        rasterize_triangle(fb, v0, v1, v2);
    })
}
