//! 3-component floating-point vector.
//!
//! Operations come in two forms, and both are part of the API: pure
//! operators (`+`, `-`, `* f32`, [`Vector3::normalized`]) that return a new
//! vector, and chainable in-place methods ([`Vector3::add`],
//! [`Vector3::normalize`], ...) that mutate `self` and return `&mut Self`.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A 3-component `f32` vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The magnitude (length) of this vector.
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Dot product of `a` and `b`.
    pub fn dot(a: Vector3, b: Vector3) -> f32 {
        a.x * b.x + a.y * b.y + a.z * b.z
    }

    /// Cross product of `left` and `right`.
    pub fn cross(left: Vector3, right: Vector3) -> Vector3 {
        Vector3::new(
            left.y * right.z - left.z * right.y,
            left.z * right.x - left.x * right.z,
            left.x * right.y - left.y * right.x,
        )
    }

    /// True if any component is NaN.
    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns a unit-length copy of this vector.
    ///
    /// The zero vector is returned unchanged rather than dividing by zero.
    pub fn normalized(&self) -> Vector3 {
        let len = self.magnitude();
        if len == 0.0 {
            return *self;
        }
        *self * (1.0 / len)
    }

    /// Normalizes this vector in place.
    ///
    /// The zero vector is left unchanged rather than dividing by zero.
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.magnitude();
        if len != 0.0 {
            let inv = 1.0 / len;
            self.x *= inv;
            self.y *= inv;
            self.z *= inv;
        }
        self
    }

    /// Returns this vector scaled by `n`.
    pub fn scaled(&self, n: f32) -> Vector3 {
        *self * n
    }

    /// Adds `v` to this vector in place.
    pub fn add(&mut self, v: Vector3) -> &mut Self {
        self.x += v.x;
        self.y += v.y;
        self.z += v.z;
        self
    }

    /// Subtracts `v` from this vector in place.
    pub fn sub(&mut self, v: Vector3) -> &mut Self {
        self.x -= v.x;
        self.y -= v.y;
        self.z -= v.z;
        self
    }

    /// Scales this vector by `n` in place.
    pub fn scale(&mut self, n: f32) -> &mut Self {
        self.x *= n;
        self.y *= n;
        self.z *= n;
        self
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Vector3) {
        self.add(rhs);
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Vector3) {
        self.sub(rhs);
    }
}

impl Mul<f32> for Vector3 {
    type Output = Vector3;

    fn mul(self, n: f32) -> Vector3 {
        Vector3::new(self.x * n, self.y * n, self.z * n)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl From<Vector3> for [f32; 3] {
    fn from(v: Vector3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X: {}, Y: {}, Z: {}", self.x, self.y, self.z)
    }
}
