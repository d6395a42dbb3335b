//! 4x4 affine/projective matrix over a flat 16-element array.
//!
//! The layout is the one GPU uniform uploads expect: translation in
//! elements 12-14, vectors multiplying on the left (`v' = v * M`), scale
//! then rotation then translation composing as `S * R * T`. All operations
//! are value-semantics; the in-place methods mutate `self` and return
//! `&mut Self` so transforms can be built up in a chain.

use super::vector::Vector3;

/// A 4x4 `f32` matrix in flat row-vector layout.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Matrix4(pub [f32; 16]);

impl Matrix4 {
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);

    pub const ZERO: Self = Self([0.0; 16]);

    /// New identity matrix.
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// New all-zero matrix.
    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Resets `self` to the identity matrix.
    pub fn set_identity(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    /// Resets `self` to a pure scale matrix with diagonal
    /// `(v.x, v.y, v.z, 1)`.
    ///
    /// This is a full reset, not an in-place scale of the existing
    /// transform; all off-diagonal terms are zeroed.
    pub fn set_scale(&mut self, v: Vector3) -> &mut Self {
        *self = Self::ZERO;
        self.0[0] = v.x;
        self.0[5] = v.y;
        self.0[10] = v.z;
        self.0[15] = 1.0;
        self
    }

    /// New translation matrix for `v`.
    pub fn translation(v: Vector3) -> Self {
        let mut m = Self::IDENTITY;
        m.0[12] = v.x;
        m.0[13] = v.y;
        m.0[14] = v.z;
        m
    }

    /// Rotates `self` by the Euler angles in `euler_deg` (degrees),
    /// composing rotation about X, then Y, then Z.
    pub fn rotate(&mut self, euler_deg: Vector3) -> &mut Self {
        self.rotate_x(euler_deg.x)
            .rotate_y(euler_deg.y)
            .rotate_z(euler_deg.z)
    }

    /// Rotates `self` about the x-axis by `angle` degrees.
    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        let (s, c) = angle.to_radians().sin_cos();
        #[rustfmt::skip]
        let rot = Self([
            1.0, 0.0, 0.0, 0.0,
            0.0,   c,   s, 0.0,
            0.0,  -s,   c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ]);
        self.multiply(&rot)
    }

    /// Rotates `self` about the y-axis by `angle` degrees.
    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        let (s, c) = angle.to_radians().sin_cos();
        #[rustfmt::skip]
        let rot = Self([
              c, 0.0,  -s, 0.0,
            0.0, 1.0, 0.0, 0.0,
              s, 0.0,   c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ]);
        self.multiply(&rot)
    }

    /// Rotates `self` about the z-axis by `angle` degrees.
    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
        let (s, c) = angle.to_radians().sin_cos();
        #[rustfmt::skip]
        let rot = Self([
              c,  -s, 0.0, 0.0,
              s,   c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ]);
        self.multiply(&rot)
    }

    /// Multiplies `self` by `b` in place (`a = a * b`, row-vector
    /// convention: `a` applies first, then `b`).
    pub fn multiply(&mut self, b: &Matrix4) -> &mut Self {
        let a = self.0;
        let b = &b.0;
        for row in 0..4 {
            let r = row * 4;
            for col in 0..4 {
                self.0[r + col] = a[r] * b[col]
                    + a[r + 1] * b[4 + col]
                    + a[r + 2] * b[8 + col]
                    + a[r + 3] * b[12 + col];
            }
        }
        self
    }

    /// Sets `self` to a left-handed view matrix looking from `eye` at
    /// `target`, with [`Vector3::UP`] as the up reference.
    pub fn look_at(&mut self, eye: Vector3, target: Vector3) -> &mut Self {
        self.look_at_up(eye, target, Vector3::UP)
    }

    /// Sets `self` to a left-handed view matrix with an explicit up
    /// reference.
    ///
    /// The basis is `forward = normalize(target - eye)`,
    /// `right = normalize(up x forward)`, `up' = normalize(forward x right)`;
    /// the translation row is the negated dot of `eye` with each basis
    /// axis. The handedness matches [`Matrix4::perspective_fov_lh`].
    pub fn look_at_up(&mut self, eye: Vector3, target: Vector3, up: Vector3) -> &mut Self {
        let z_axis = (target - eye).normalized();
        let x_axis = Vector3::cross(up, z_axis).normalized();
        let y_axis = Vector3::cross(z_axis, x_axis).normalized();
        let ex = -Vector3::dot(x_axis, eye);
        let ey = -Vector3::dot(y_axis, eye);
        let ez = -Vector3::dot(z_axis, eye);
        #[rustfmt::skip]
        let m = Self([
            x_axis.x, y_axis.x, z_axis.x, 0.0,
            x_axis.y, y_axis.y, z_axis.y, 0.0,
            x_axis.z, y_axis.z, z_axis.z, 0.0,
                  ex,       ey,       ez, 1.0,
        ]);
        *self = m;
        self
    }

    /// Sets `self` to a left-handed perspective projection.
    ///
    /// `fov` is the vertical field of view in radians; `aspect` is
    /// width over height.
    pub fn perspective_fov_lh(&mut self, fov: f32, aspect: f32, near: f32, far: f32) -> &mut Self {
        let tan = 1.0 / (fov * 0.5).tan();
        *self = Self::ZERO;
        self.0[0] = tan / aspect;
        self.0[5] = tan;
        self.0[10] = -far / (near - far);
        self.0[11] = 1.0;
        self.0[14] = (near * far) / (near - far);
        self
    }

    /// Inverts `self` in place via the adjugate and determinant.
    ///
    /// Inverting a singular matrix is undefined: the determinant division
    /// produces non-finite values and no check is made. Callers own that
    /// precondition.
    pub fn invert(&mut self) -> &mut Self {
        let [a00, a01, a02, a03, a10, a11, a12, a13, a20, a21, a22, a23, a30, a31, a32, a33] =
            self.0;

        // 2x2 minors of the lower two rows.
        let b0 = a22 * a33 - a23 * a32;
        let b1 = a21 * a33 - a23 * a31;
        let b2 = a21 * a32 - a22 * a31;
        let b3 = a20 * a33 - a23 * a30;
        let b4 = a20 * a32 - a22 * a30;
        let b5 = a20 * a31 - a21 * a30;

        // First column of the adjugate gives the determinant by expansion.
        let c0 = a11 * b0 - a12 * b1 + a13 * b2;
        let c1 = -(a10 * b0 - a12 * b3 + a13 * b4);
        let c2 = a10 * b1 - a11 * b3 + a13 * b5;
        let c3 = -(a10 * b2 - a11 * b4 + a12 * b5);
        let inv_det = 1.0 / (a00 * c0 + a01 * c1 + a02 * c2 + a03 * c3);

        // Minors mixing rows 1 and 3, and rows 1 and 2.
        let d0 = a12 * a33 - a13 * a32;
        let d1 = a11 * a33 - a13 * a31;
        let d2 = a11 * a32 - a12 * a31;
        let d3 = a10 * a33 - a13 * a30;
        let d4 = a10 * a32 - a12 * a30;
        let d5 = a10 * a31 - a11 * a30;
        let e0 = a12 * a23 - a13 * a22;
        let e1 = a11 * a23 - a13 * a21;
        let e2 = a11 * a22 - a12 * a21;
        let e3 = a10 * a23 - a13 * a20;
        let e4 = a10 * a22 - a12 * a20;
        let e5 = a10 * a21 - a11 * a20;

        self.0[0] = c0 * inv_det;
        self.0[4] = c1 * inv_det;
        self.0[8] = c2 * inv_det;
        self.0[12] = c3 * inv_det;
        self.0[1] = -(a01 * b0 - a02 * b1 + a03 * b2) * inv_det;
        self.0[5] = (a00 * b0 - a02 * b3 + a03 * b4) * inv_det;
        self.0[9] = -(a00 * b1 - a01 * b3 + a03 * b5) * inv_det;
        self.0[13] = (a00 * b2 - a01 * b4 + a02 * b5) * inv_det;
        self.0[2] = (a01 * d0 - a02 * d1 + a03 * d2) * inv_det;
        self.0[6] = -(a00 * d0 - a02 * d3 + a03 * d4) * inv_det;
        self.0[10] = (a00 * d1 - a01 * d3 + a03 * d5) * inv_det;
        self.0[14] = -(a00 * d2 - a01 * d4 + a02 * d5) * inv_det;
        self.0[3] = -(a01 * e0 - a02 * e1 + a03 * e2) * inv_det;
        self.0[7] = (a00 * e0 - a02 * e3 + a03 * e4) * inv_det;
        self.0[11] = -(a00 * e1 - a01 * e3 + a03 * e5) * inv_det;
        self.0[15] = (a00 * e2 - a01 * e4 + a02 * e5) * inv_det;
        self
    }

    /// Transforms the point `v` by `self` (`v' = v * M`), including the
    /// perspective divide by `w`.
    pub fn transform_point(&self, v: Vector3) -> Vector3 {
        let m = &self.0;
        let x = v.x * m[0] + v.y * m[4] + v.z * m[8] + m[12];
        let y = v.x * m[1] + v.y * m[5] + v.z * m[9] + m[13];
        let z = v.x * m[2] + v.y * m[6] + v.z * m[10] + m[14];
        let w = v.x * m[3] + v.y * m[7] + v.z * m[11] + m[15];
        Vector3::new(x / w, y / w, z / w)
    }

    /// The flat 16-element array.
    pub fn as_array(&self) -> &[f32; 16] {
        &self.0
    }

    /// The matrix as four rows of four, the shape uniform-buffer structs
    /// typically want.
    pub fn to_array_2d(&self) -> [[f32; 4]; 4] {
        let m = &self.0;
        [
            [m[0], m[1], m[2], m[3]],
            [m[4], m[5], m[6], m[7]],
            [m[8], m[9], m[10], m[11]],
            [m[12], m[13], m[14], m[15]],
        ]
    }

    /// True when every element is within `epsilon` of `other`'s.
    pub fn approx_eq(&self, other: &Matrix4, epsilon: f32) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Matrix4 {
    type Output = Matrix4;

    /// Pure form of [`Matrix4::multiply`].
    fn mul(self, rhs: Matrix4) -> Matrix4 {
        let mut m = self;
        m.multiply(&rhs);
        m
    }
}

impl std::ops::Index<usize> for Matrix4 {
    type Output = f32;

    fn index(&self, i: usize) -> &f32 {
        &self.0[i]
    }
}

impl std::ops::IndexMut<usize> for Matrix4 {
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut self.0[i]
    }
}
