//! Projection and view matrix builders, and the NDC to pixel mapping

use super::math::{Mat4, Vec2, Vec2I, Vec3};
use super::trig::m_cotan;

/// Pixel coordinates are clamped to +/- this before entering integer edge
/// math, which keeps edge-function products well inside i64.
pub const GUARD_BAND: f32 = (1 << 20) as f32;

/// Orthographic projection mapping the given box onto [-1, 1]^3.
/// Depth is scaled by -2/depth, so `near` lands on -1 and `far` on +1
/// for a camera looking down -Z.
pub fn ortho_projection(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let width = right - left;
    let height = top - bottom;
    let depth = far - near;

    Mat4::from_rows([
        [2.0 / width, 0.0, 0.0, -(right + left) / width],
        [0.0, 2.0 / height, 0.0, -(top + bottom) / height],
        [0.0, 0.0, -2.0 / depth, -(far + near) / depth],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Perspective projection
///
/// `fov` is the vertical field of view as a turn fraction. The last row
/// copies -z into w, ready for the perspective divide.
pub fn perspective_projection(fov: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = m_cotan(0.5 * fov);
    let inv_depth = 1.0 / (near - far);

    Mat4::from_rows([
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, (far + near) * inv_depth, (2.0 * far * near) * inv_depth],
        [0.0, 0.0, -1.0, 0.0],
    ])
}

/// View matrix for a camera at `position` looking at `target`
///
/// The camera looks down its own -Z axis. `fake_up` only needs to be
/// roughly up; the real up axis is rebuilt from the other two.
pub fn look_at(position: Vec3, target: Vec3, fake_up: Vec3) -> Mat4 {
    let backward = (position - target).normalize();
    let right = fake_up.cross(backward).normalize();
    let up = backward.cross(right);

    Mat4::from_rows([
        [right.x, right.y, right.z, -right.dot(position)],
        [up.x, up.y, up.z, -up.dot(position)],
        [backward.x, backward.y, backward.z, -backward.dot(position)],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Map NDC in [-1, 1] to pixels in [0, width) x [0, height)
///
/// Truncates toward zero. Does not flip Y: callers negate NDC y first,
/// since NDC +y points up and framebuffer +y points down.
pub fn ndc_to_pixel(ndc: Vec2, width: usize, height: usize) -> Vec2I {
    let x = (ndc.x + 1.0) * 0.5 * width as f32;
    let y = (ndc.y + 1.0) * 0.5 * height as f32;
    Vec2I::new(
        x.clamp(-GUARD_BAND, GUARD_BAND) as i32,
        y.clamp(-GUARD_BAND, GUARD_BAND) as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::math::Vec4;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_ortho_unit_cube_is_identity_like() {
        let m = ortho_projection(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
        let p = m * Vec4::new(0.5, -0.25, 0.0, 1.0);
        assert_eq!(p, Vec4::new(0.5, -0.25, 0.0, 1.0));
        // Depth flips sign
        let q = m * Vec4::new(0.0, 0.0, 0.5, 1.0);
        assert!(close(q.z(), -0.5));
    }

    #[test]
    fn test_ortho_maps_bounds() {
        let m = ortho_projection(0.0, 128.0, 0.0, 64.0, 1.0, 11.0);
        let lo = m * Vec4::new(0.0, 0.0, -1.0, 1.0);
        let hi = m * Vec4::new(128.0, 64.0, -11.0, 1.0);
        assert!(close(lo.x(), -1.0) && close(lo.y(), -1.0) && close(lo.z(), -1.0));
        assert!(close(hi.x(), 1.0) && close(hi.y(), 1.0) && close(hi.z(), 1.0));
    }

    #[test]
    fn test_perspective_near_and_far_planes() {
        let m = perspective_projection(0.25, 1.0, 1.0, 10.0);
        let near = m * Vec4::new(0.0, 0.0, -1.0, 1.0);
        let far = m * Vec4::new(0.0, 0.0, -10.0, 1.0);
        assert!(close(near.w(), 1.0));
        assert!(close(near.z() / near.w(), -1.0));
        assert!(close(far.z() / far.w(), 1.0));
        // 90 degree fov: a point on the 45 degree line lands on the edge
        let edge = m * Vec4::new(2.0, 0.0, -2.0, 1.0);
        assert!(close(edge.x() / edge.w(), 1.0));
    }

    #[test]
    fn test_look_at_basis() {
        let position = Vec3::new(0.0, 0.0, 5.0);
        let view = look_at(position, Vec3::ZERO, Vec3::UP);
        // Camera ends up at the origin
        let eye = view * position.extend(1.0);
        assert!(close(eye.x(), 0.0) && close(eye.y(), 0.0) && close(eye.z(), 0.0));
        // Target is straight ahead, down -Z
        let target = view * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(close(target.z(), -5.0));
        // A point to the world's right stays to the right
        let right = view * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!(right.x() > 0.0);
    }

    #[test]
    fn test_look_at_rows_are_orthonormal() {
        let view = look_at(Vec3::new(3.0, 2.0, -4.0), Vec3::new(0.5, 0.0, 1.0), Vec3::UP);
        for i in 0..3 {
            let row = Vec3::new(view.e[i][0], view.e[i][1], view.e[i][2]);
            assert!(close(row.len(), 1.0));
            let next = (i + 1) % 3;
            let other = Vec3::new(view.e[next][0], view.e[next][1], view.e[next][2]);
            assert!(close(row.dot(other), 0.0));
        }
    }

    #[test]
    fn test_ndc_to_pixel() {
        assert_eq!(ndc_to_pixel(Vec2::new(-1.0, -1.0), 128, 64), Vec2I::new(0, 0));
        assert_eq!(ndc_to_pixel(Vec2::new(0.0, 0.0), 128, 64), Vec2I::new(64, 32));
        assert_eq!(ndc_to_pixel(Vec2::new(0.999, 0.999), 128, 64), Vec2I::new(127, 63));
        // Truncates toward zero on both sides of the origin
        assert_eq!(ndc_to_pixel(Vec2::new(-1.01, 0.0), 100, 100).x, 0);
    }

    #[test]
    fn test_ndc_to_pixel_guard_band() {
        let p = ndc_to_pixel(Vec2::new(f32::MAX, -f32::MAX), 128, 128);
        assert_eq!(p.x, GUARD_BAND as i32);
        assert_eq!(p.y, -(GUARD_BAND as i32));
    }
}
