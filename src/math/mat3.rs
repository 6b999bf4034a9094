//! 3x3 linear transform, used for directions such as surface normals.
//!
//! Same layout as [`Mat4`]: row-major storage, column vectors on the right.

use std::ops::Mul;

use super::mat4::Mat4;
use super::vec3::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    data: [[f32; 3]; 3],
}

impl Mat3 {
    pub fn new(data: [[f32; 3]; 3]) -> Self {
        Self { data }
    }

    pub fn identity() -> Self {
        Self::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Upper-left block of a 4x4 transform. Applying it is the same as applying
/// the 4x4 matrix to a homogeneous vector with `w = 0`.
impl From<&Mat4> for Mat3 {
    fn from(m: &Mat4) -> Self {
        let mut data = [[0.0f32; 3]; 3];
        for (row, out) in data.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = m.get(row, col);
            }
        }
        Self { data }
    }
}

impl Mul<Mat3> for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Self::Output {
        let mut result = [[0.0f32; 3]; 3];
        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col];
            }
        }
        Mat3::new(result)
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        Vec3::new(
            self.data[0][0] * v.x + self.data[0][1] * v.y + self.data[0][2] * v.z,
            self.data[1][0] * v.x + self.data[1][1] * v.y + self.data[1][2] * v.z,
            self.data[2][0] * v.x + self.data[2][1] * v.y + self.data[2][2] * v.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec4::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn matches_mat4_on_directions() {
        let m4 = Mat4::translation(10.0, 20.0, 30.0) * Mat4::rotation_zyx(Vec3::new(0.3, -1.1, 2.0));
        let m3 = Mat3::from(&m4);
        let n = Vec3::new(0.2, -0.7, 0.4);

        let expected = (m4 * Vec4::direction(n.x, n.y, n.z)).to_vec3();
        let actual = m3 * n;
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-6);
        assert_relative_eq!(actual.z, expected.z, epsilon = 1e-6);
    }

    #[test]
    fn product_with_identity() {
        let m = Mat3::from(&Mat4::rotation_x(0.7));
        assert_eq!(m * Mat3::identity(), m);
    }
}
