//! Model -> view -> projection -> pixel transform feeding the rasterizer

use super::math::{Mat4, Vec2, Vec3, Vec4};
use super::projection::ndc_to_pixel;
use super::render::{rasterize_mesh, Framebuffer};
use super::types::{ProjectedVertex, Vertex};

/// Divide by w, or pass the coordinates through untouched when w is exactly 0
pub fn perspective_divide(clip: Vec4) -> Vec3 {
    let w = clip.w();
    if w == 0.0 {
        return clip.xyz();
    }
    clip.xyz().scale(1.0 / w)
}

/// Transform one vertex all the way to pixel space
///
/// NDC y is negated before mapping, since pixel rows grow downwards.
pub fn project_vertex(mvp: &Mat4, vertex: &Vertex, width: usize, height: usize) -> ProjectedVertex {
    let ndc = perspective_divide(*mvp * vertex.position.extend(1.0));
    ProjectedVertex {
        position: ndc_to_pixel(Vec2::new(ndc.x, -ndc.y), width, height),
        color: vertex.color,
    }
}

/// Per-scene transform state: view and projection are fixed, the model
/// matrix changes every frame
pub struct Pipeline {
    /// projection * view
    pub view_projection: Mat4,
    /// Scratch list of projected vertices, reused across frames
    projected: Vec<ProjectedVertex>,
}

impl Pipeline {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view_projection: projection * view,
            projected: Vec::new(),
        }
    }

    /// Project every vertex through `view_projection * model`
    pub fn project_mesh(&mut self, model: Mat4, vertices: &[Vertex], width: usize, height: usize) -> &[ProjectedVertex] {
        let mvp = self.view_projection * model;
        self.projected.clear();
        self.projected.extend(vertices.iter().map(|v| project_vertex(&mvp, v, width, height)));
        &self.projected
    }

    /// Project and rasterize a mesh into the framebuffer, returning the
    /// number of triangles submitted
    pub fn draw_mesh(&mut self, fb: &mut Framebuffer, model: Mat4, vertices: &[Vertex]) -> usize {
        let (width, height) = (fb.width, fb.height);
        self.project_mesh(model, vertices, width, height);
        rasterize_mesh(fb, &self.projected)
    }
}
