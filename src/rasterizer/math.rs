//! Vector and matrix math for the transform pipeline
//!
//! Matrices are row-major and multiply column vectors (`m * v` dots each row
//! with `v`), so a combined transform reads right to left.

use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};
use serde::{Serialize, Deserialize};

use super::trig::{m_cos, m_sin};

/// 2D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or zero for the zero vector
    pub fn normalize(self) -> Vec2 {
        if self.x == 0.0 && self.y == 0.0 {
            return Vec2::ZERO;
        }
        self.scale(1.0 / self.len())
    }

    pub fn scale(self, s: f32) -> Vec2 {
        Vec2 {
            x: self.x * s,
            y: self.y * s,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        self.scale(s)
    }
}

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or zero for the zero vector
    pub fn normalize(self) -> Vec3 {
        if self.x == 0.0 && self.y == 0.0 && self.z == 0.0 {
            return Vec3::ZERO;
        }
        let l = self.len();
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Extend to homogeneous coordinates with the given w
    pub fn extend(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

/// Integer 2D vector (pixel space)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vec2I {
    pub x: i32,
    pub y: i32,
}

impl Vec2I {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// z component of the 3D cross product of two in-plane vectors,
    /// widened so pixel-space products cannot overflow
    pub fn cross(self, other: Vec2I) -> i64 {
        self.x as i64 * other.y as i64 - self.y as i64 * other.x as i64
    }
}

impl Add for Vec2I {
    type Output = Vec2I;
    fn add(self, other: Vec2I) -> Vec2I {
        Vec2I::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2I {
    type Output = Vec2I;
    fn sub(self, other: Vec2I) -> Vec2I {
        Vec2I::new(self.x - other.x, self.y - other.y)
    }
}

/// Integer 3D vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vec3I {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vec3I {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn cross(self, other: Vec3I) -> Vec3I {
        Vec3I {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl Sub for Vec3I {
    type Output = Vec3I;
    fn sub(self, other: Vec3I) -> Vec3I {
        Vec3I::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

/// Homogeneous 4D vector
///
/// Stored as a plain array; the named accessors index into the same storage,
/// so `v.x()` and `v[0]` can never disagree.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec4 {
    pub e: [f32; 4],
}

impl Vec4 {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { e: [x, y, z, w] }
    }

    pub fn x(&self) -> f32 {
        self.e[0]
    }

    pub fn y(&self) -> f32 {
        self.e[1]
    }

    pub fn z(&self) -> f32 {
        self.e[2]
    }

    pub fn w(&self) -> f32 {
        self.e[3]
    }

    pub fn set_w(&mut self, w: f32) {
        self.e[3] = w;
    }

    /// Drop w without dividing
    pub fn xyz(&self) -> Vec3 {
        Vec3::new(self.e[0], self.e[1], self.e[2])
    }
}

impl Index<usize> for Vec4 {
    type Output = f32;
    fn index(&self, i: usize) -> &f32 {
        &self.e[i]
    }
}

impl IndexMut<usize> for Vec4 {
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut self.e[i]
    }
}

/// Row-major 4x4 matrix, `e[row][column]`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Mat4 {
    pub e: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        e: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn from_rows(e: [[f32; 4]; 4]) -> Self {
        Self { e }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn transpose(&self) -> Mat4 {
        let mut result = Mat4::default();
        for i in 0..4 {
            for j in 0..4 {
                result.e[i][j] = self.e[j][i];
            }
        }
        result
    }

    /// Translation by (x, y, z) in the last column
    pub fn translate(x: f32, y: f32, z: f32) -> Mat4 {
        let mut result = Mat4::IDENTITY;
        result.e[0][3] = x;
        result.e[1][3] = y;
        result.e[2][3] = z;
        result
    }

    /// Rotation about the X axis, angle in turns
    pub fn rotate_x(turn: f32) -> Mat4 {
        let (s, c) = (m_sin(turn), m_cos(turn));
        let mut result = Mat4::IDENTITY;
        result.e[1][1] = c;
        result.e[1][2] = -s;
        result.e[2][1] = s;
        result.e[2][2] = c;
        result
    }

    /// Rotation about the Y axis, angle in turns
    pub fn rotate_y(turn: f32) -> Mat4 {
        let (s, c) = (m_sin(turn), m_cos(turn));
        let mut result = Mat4::IDENTITY;
        result.e[0][0] = c;
        result.e[0][2] = s;
        result.e[2][0] = -s;
        result.e[2][2] = c;
        result
    }

    /// Rotation about the Z axis, angle in turns
    pub fn rotate_z(turn: f32) -> Mat4 {
        let (s, c) = (m_sin(turn), m_cos(turn));
        let mut result = Mat4::IDENTITY;
        result.e[0][0] = c;
        result.e[0][1] = -s;
        result.e[1][0] = s;
        result.e[1][1] = c;
        result
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, other: Mat4) -> Mat4 {
        let mut result = Mat4::default();
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    result.e[i][j] += self.e[i][k] * other.e[k][j];
                }
            }
        }
        result
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        let mut result = Vec4::default();
        for i in 0..4 {
            for j in 0..4 {
                result[i] += self.e[i][j] * v[j];
            }
        }
        result
    }
}

/// a * b * c
pub fn mat4_mul3(a: Mat4, b: Mat4, c: Mat4) -> Mat4 {
    a * b * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_matrix() -> Mat4 {
        Mat4::from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ])
    }

    fn approx(a: Vec4, b: Vec4) -> bool {
        (0..4).all(|i| (a[i] - b[i]).abs() < 1e-3)
    }

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(b) - 32.0).abs() < 0.001);
    }

    #[test]
    fn test_vec3_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(a.cross(b), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(b.cross(a), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_normalize() {
        let n = Vec3::new(3.0, 0.0, 4.0).normalize();
        assert!((n.len() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
        assert!((Vec2::new(0.0, -2.0).normalize().y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_vector_ops() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(a + a, a * 2.0);
        assert_eq!(a - a, Vec3::ZERO);
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(Vec2::new(1.0, 2.0) - Vec2::new(3.0, 5.0), Vec2::new(-2.0, -3.0));
    }

    #[test]
    fn test_integer_cross() {
        let a = Vec2I::new(40, 0);
        let b = Vec2I::new(5, 5);
        assert_eq!(a.cross(b), 200);
        assert_eq!(b.cross(a), -200);
        let c = Vec3I::new(1, 0, 0).cross(Vec3I::new(0, 1, 0));
        assert_eq!(c, Vec3I::new(0, 0, 1));
    }

    #[test]
    fn test_vec4_views_agree() {
        let mut v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        v[3] = 9.0;
        assert_eq!(v.w(), 9.0);
        v.set_w(5.0);
        assert_eq!(v[3], 5.0);
        assert_eq!((v.x(), v.y(), v.z()), (v.e[0], v.e[1], v.e[2]));
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = sample_matrix();
        assert_eq!(m * Mat4::identity(), m);
        assert_eq!(Mat4::identity() * m, m);
    }

    #[test]
    fn test_mul_not_commutative() {
        let t = Mat4::translate(1.0, 0.0, 0.0);
        let r = Mat4::rotate_z(0.25);
        assert_ne!(t * r, r * t);
        assert_eq!(mat4_mul3(t, r, t), (t * r) * t);
    }

    #[test]
    fn test_transpose() {
        let m = sample_matrix();
        assert_eq!(m.transpose().e[0][3], 13.0);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn test_translate_point() {
        let p = Mat4::translate(1.0, 2.0, 3.0) * Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(p, Vec4::new(2.0, 3.0, 4.0, 1.0));
        // Directions ignore translation
        let d = Mat4::translate(1.0, 2.0, 3.0) * Vec4::new(1.0, 1.0, 1.0, 0.0);
        assert_eq!(d, Vec4::new(1.0, 1.0, 1.0, 0.0));
    }

    #[test]
    fn test_quarter_turn_rotations() {
        let x = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let y = Vec4::new(0.0, 1.0, 0.0, 1.0);
        let z = Vec4::new(0.0, 0.0, 1.0, 1.0);
        assert!(approx(Mat4::rotate_z(0.25) * x, y));
        assert!(approx(Mat4::rotate_x(0.25) * y, z));
        assert!(approx(Mat4::rotate_y(0.25) * z, x));
    }
}
