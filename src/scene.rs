//! Demo scenes and per-frame orchestration
//!
//! Each scene exercises one stage of the renderer:
//! - Gradient: raw framebuffer writes
//! - Triangle: one pixel-space triangle through the rasterizer
//! - Cube: a vertex-colored cube through the full 3D pipeline

use serde::{Serialize, Deserialize};

use crate::config::RendererConfig;
use crate::input::{InputState, Key};
use crate::rasterizer::{
    look_at, perspective_projection, rasterize_triangle, Color, Framebuffer, Mat4, Pipeline,
    ProjectedVertex, Vec2, Vec3, Vertex,
};

/// Which demo is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneMode {
    Gradient,
    Triangle,
    Cube,
}

impl SceneMode {
    pub const ALL: [SceneMode; 3] = [SceneMode::Gradient, SceneMode::Triangle, SceneMode::Cube];

    /// Cycle to the next scene
    pub fn next(self) -> SceneMode {
        let i = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SceneMode::Gradient => "Gradient",
            SceneMode::Triangle => "Triangle",
            SceneMode::Cube => "Cube",
        }
    }
}

/// Color a cube corner by its position: (-1,-1,-1) is black, (1,1,1) white
fn corner_color(p: Vec3) -> Color {
    let channel = |v: f32| ((v + 1.0) * 0.5 * 255.0) as u8;
    Color::new(channel(p.x), channel(p.y), channel(p.z))
}

/// Cube spanning [-1, 1]^3 as 12 triangles (36 vertices)
///
/// Each face is wound clockwise as seen from outside with +Y up, which is
/// positive area on screen after the Y flip. Faces pointing away from the
/// camera come out with negative area and are not drawn, so a convex mesh
/// needs no depth test.
pub fn cube_vertices() -> Vec<Vertex> {
    // (outward normal, right, up) as seen from outside the face
    let faces = [
        (Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0), Vec3::UP),
        (Vec3::new(0.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 0.0), Vec3::UP),
        (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), Vec3::UP),
        (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::UP),
        (Vec3::UP, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
        (Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
    ];

    let mut vertices = Vec::with_capacity(36);
    for (normal, right, up) in faces {
        let top_left = normal - right + up;
        let top_right = normal + right + up;
        let bottom_right = normal + right - up;
        let bottom_left = normal - right - up;

        for p in [top_left, top_right, bottom_right, top_left, bottom_right, bottom_left] {
            vertices.push(Vertex::new(p, corner_color(p)));
        }
    }
    vertices
}

/// Red/green/blue triangle in pixel space, sized to the framebuffer
pub fn demo_triangle(width: usize, height: usize, offset: Vec2) -> [ProjectedVertex; 3] {
    let (w, h) = (width as f32, height as f32);
    let at = |fx: f32, fy: f32, color: Color| {
        ProjectedVertex::new((fx * w + offset.x) as i32, (fy * h + offset.y) as i32, color)
    };
    [
        at(0.125, 0.125, Color::RED),
        at(0.875, 0.25, Color::GREEN),
        at(0.5, 0.875, Color::BLUE),
    ]
}

/// Scene state carried across frames
pub struct Scene {
    pub mode: SceneMode,
    clear_color: Color,
    spin_speed: f32,
    turn_speed: f32,
    move_speed: f32,

    // Gradient
    blue_offset: f32,
    green_offset: f32,

    // Triangle
    triangle_offset: Vec2,

    // Cube
    /// Rotation about Y, in turns
    pub yaw: f32,
    /// Rotation about X, in turns
    pub pitch: f32,
    cube: Vec<Vertex>,
    pipeline: Pipeline,
}

impl Scene {
    pub fn new(config: &RendererConfig) -> Self {
        let camera = &config.camera;
        let aspect = config.framebuffer_width as f32 / config.framebuffer_height.max(1) as f32;
        let view = look_at(camera.position, camera.target, camera.up);
        let projection = perspective_projection(camera.fov, aspect, camera.near, camera.far);

        Self {
            mode: config.start_scene,
            clear_color: config.clear_color,
            spin_speed: config.spin_speed,
            turn_speed: config.turn_speed,
            move_speed: config.move_speed,
            blue_offset: 0.0,
            green_offset: 0.0,
            triangle_offset: Vec2::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            cube: cube_vertices(),
            pipeline: Pipeline::new(view, projection),
        }
    }

    /// Advance one frame using held keys
    pub fn update(&mut self, input: &InputState, dt: f32) {
        // -1, 0 or +1 from a pair of opposing keys
        let axis = |neg: Key, pos: Key| input.is_down(pos) as i32 as f32 - input.is_down(neg) as i32 as f32;
        let horizontal = axis(Key::A, Key::D);
        let vertical = axis(Key::W, Key::S);

        match self.mode {
            SceneMode::Gradient => {
                self.blue_offset += horizontal * self.move_speed * dt;
                self.green_offset += vertical * self.move_speed * dt;
            }
            SceneMode::Triangle => {
                self.triangle_offset = self.triangle_offset
                    + Vec2::new(horizontal, vertical) * (self.move_speed * dt);
            }
            SceneMode::Cube => {
                // Turns wrap, so keep them small to preserve precision
                self.yaw = (self.yaw + (self.spin_speed + horizontal * self.turn_speed) * dt).fract();
                self.pitch = (self.pitch + vertical * self.turn_speed * dt).fract();
            }
        }
    }

    /// Model matrix of the cube: pitch first, then yaw
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::rotate_y(self.yaw) * Mat4::rotate_x(self.pitch)
    }

    /// Draw the current scene, returning the number of triangles submitted
    pub fn render(&mut self, fb: &mut Framebuffer) -> usize {
        match self.mode {
            SceneMode::Gradient => {
                fb.fill_gradient(self.blue_offset as i32, self.green_offset as i32);
                0
            }
            SceneMode::Triangle => {
                fb.clear(self.clear_color);
                let [a, b, c] = demo_triangle(fb.width, fb.height, self.triangle_offset);
                rasterize_triangle(fb, &a, &b, &c);
                1
            }
            SceneMode::Cube => {
                fb.clear(self.clear_color);
                let model = self.model_matrix();
                self.pipeline.draw_mesh(fb, model, &self.cube)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyState;
    use crate::rasterizer::{edge_function, Triangle};

    fn front_facing(vertices: &[ProjectedVertex]) -> usize {
        vertices
            .chunks_exact(3)
            .filter(|t| Triangle::new(t[0], t[1], t[2]).area > 0)
            .count()
    }

    fn project_cube(position: Vec3, model: Mat4) -> Vec<ProjectedVertex> {
        let view = look_at(position, Vec3::ZERO, Vec3::UP);
        let mut pipeline = Pipeline::new(view, perspective_projection(0.2, 1.0, 0.1, 100.0));
        pipeline.project_mesh(model, &cube_vertices(), 128, 128).to_vec()
    }

    #[test]
    fn test_cube_layout() {
        let cube = cube_vertices();
        assert_eq!(cube.len(), 36);
        assert!(cube.iter().all(|v| v.position.x.abs() == 1.0 && v.position.y.abs() == 1.0 && v.position.z.abs() == 1.0));
        assert_eq!(cube[0].color, corner_color(cube[0].position));
        assert_eq!(corner_color(Vec3::new(1.0, 1.0, 1.0)), Color::WHITE);
    }

    #[test]
    fn test_cube_faces_wound_outward() {
        let cube = cube_vertices();
        for tri in cube.chunks_exact(3) {
            let (a, b, c) = (tri[0].position, tri[1].position, tri[2].position);
            // Clockwise from outside: normal from (b - a) x (c - a) points inward
            let n = (b - a).cross(c - a);
            let centroid = (a + b + c).scale(1.0 / 3.0);
            assert!(n.dot(centroid) < 0.0);
        }
    }

    #[test]
    fn test_only_facing_sides_have_positive_area() {
        // Straight on: only the +Z face
        assert_eq!(front_facing(&project_cube(Vec3::new(0.0, 0.0, 4.0), Mat4::identity())), 2);
        // From above and in front: +Z and +Y
        assert_eq!(front_facing(&project_cube(Vec3::new(0.0, 3.0, 4.0), Mat4::identity())), 4);
        // Corner view: three faces
        assert_eq!(front_facing(&project_cube(Vec3::new(4.0, 4.0, 4.0), Mat4::identity())), 6);
        // Half a turn about Y shows the -Z face instead, still two triangles
        assert_eq!(front_facing(&project_cube(Vec3::new(0.0, 0.0, 4.0), Mat4::rotate_y(0.5))), 2);
    }

    #[test]
    fn test_cube_render_covers_center_only() {
        let config = RendererConfig::default();
        let mut scene = Scene::new(&config);
        let mut fb = Framebuffer::new(config.framebuffer_width, config.framebuffer_height);
        assert_eq!(scene.render(&mut fb), 12);

        let (cx, cy) = (fb.width / 2, fb.height / 2);
        assert_ne!(fb.pixel(cx, cy), config.clear_color.to_argb());
        assert_eq!(fb.pixel(0, 0), config.clear_color.to_argb());
    }

    #[test]
    fn test_demo_triangle_is_front_facing() {
        let [a, b, c] = demo_triangle(128, 128, Vec2::ZERO);
        assert!(edge_function(a.position, b.position, c.position) > 0);
        let moved = demo_triangle(128, 128, Vec2::new(3.0, -2.0));
        assert_eq!(moved[0].position.x, a.position.x + 3);
        assert_eq!(moved[0].position.y, a.position.y - 2);
    }

    #[test]
    fn test_keys_drive_current_scene() {
        let mut config = RendererConfig::default();
        config.spin_speed = 0.0;
        config.start_scene = SceneMode::Cube;
        let mut scene = Scene::new(&config);
        let mut input = InputState::new();

        scene.update(&input, 1.0);
        assert_eq!(scene.yaw, 0.0);

        input.process_key(Key::D, KeyState::pressed(false));
        scene.update(&input, 0.5);
        assert!((scene.yaw - config.turn_speed * 0.5).abs() < 1e-6);

        scene.mode = SceneMode::Triangle;
        input.process_key(Key::D, KeyState::released(false));
        input.process_key(Key::S, KeyState::pressed(false));
        scene.update(&input, 1.0);
        assert_eq!(scene.triangle_offset, Vec2::new(0.0, config.move_speed));
    }

    #[test]
    fn test_mode_cycle() {
        assert_eq!(SceneMode::Gradient.next(), SceneMode::Triangle);
        assert_eq!(SceneMode::Triangle.next(), SceneMode::Cube);
        assert_eq!(SceneMode::Cube.next(), SceneMode::Gradient);
    }

    #[test]
    fn test_gradient_scene_draws_no_triangles() {
        let mut config = RendererConfig::default();
        config.start_scene = SceneMode::Gradient;
        let mut scene = Scene::new(&config);
        let mut fb = Framebuffer::new(16, 16);
        assert_eq!(scene.render(&mut fb), 0);
        assert_eq!(Color::from_argb(fb.pixel(5, 7)), Color::new(0, 7, 5));
    }
}
