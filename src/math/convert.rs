//! Conversions between the flat row-vector layout and cgmath's
//! column-vector types.
//!
//! The two layouts share the same flat 16-element array: our rows are
//! cgmath's columns, so `v' = v * M` here and `v' = M_cg * v` over there
//! describe the same transform with no transpose. Composition order flips
//! across the boundary: `a.multiply(&b)` corresponds to `cg(b) * cg(a)`.
//! Renderers that take `cgmath::Matrix4<f32>` uniforms can consume scene
//! matrices through these impls directly.

use super::{Matrix4, Vector3};

impl From<Matrix4> for cgmath::Matrix4<f32> {
    fn from(m: Matrix4) -> Self {
        // Rows of the flat layout are columns of the cgmath layout.
        cgmath::Matrix4::from(m.to_array_2d())
    }
}

impl From<cgmath::Matrix4<f32>> for Matrix4 {
    fn from(m: cgmath::Matrix4<f32>) -> Self {
        let flat: &[f32; 16] = m.as_ref();
        Matrix4(*flat)
    }
}

impl From<Vector3> for cgmath::Vector3<f32> {
    fn from(v: Vector3) -> Self {
        cgmath::Vector3::new(v.x, v.y, v.z)
    }
}

impl From<cgmath::Vector3<f32>> for Vector3 {
    fn from(v: cgmath::Vector3<f32>) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for cgmath::Point3<f32> {
    fn from(v: Vector3) -> Self {
        cgmath::Point3::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::SquareMatrix;

    const EPS: f32 = 1e-4;

    fn flat(m: &cgmath::Matrix4<f32>) -> &[f32; 16] {
        m.as_ref()
    }

    fn assert_flat_eq(ours: &Matrix4, theirs: &cgmath::Matrix4<f32>) {
        for (a, b) in ours.as_array().iter().zip(flat(theirs).iter()) {
            assert!((a - b).abs() < EPS, "{:?} != {:?}", ours, theirs);
        }
    }

    #[test]
    fn test_round_trip_preserves_layout() {
        let t = Matrix4::translation(Vector3::new(1.0, 2.0, 3.0));
        let back = Matrix4::from(cgmath::Matrix4::from(t));
        assert_eq!(t, back);
    }

    #[test]
    fn test_translation_agrees_with_cgmath() {
        let ours = Matrix4::translation(Vector3::new(1.0, 2.0, 3.0));
        let theirs = cgmath::Matrix4::from_translation(cgmath::Vector3::new(1.0, 2.0, 3.0));
        assert_flat_eq(&ours, &theirs);
    }

    #[test]
    fn test_multiply_reverses_order_across_the_boundary() {
        let mut a = Matrix4::identity();
        a.set_scale(Vector3::new(2.0, 2.0, 2.0));
        let b = Matrix4::translation(Vector3::new(0.0, 3.0, 0.0));

        let mut ours = a;
        ours.multiply(&b);

        // Scale-then-translate is translate * scale under column vectors.
        let theirs = cgmath::Matrix4::from(b) * cgmath::Matrix4::from(a);
        assert_flat_eq(&ours, &theirs);
    }

    #[test]
    fn test_invert_agrees_with_cgmath() {
        let mut m = Matrix4::identity();
        m.set_scale(Vector3::new(2.0, 0.5, 1.5))
            .rotate(Vector3::new(30.0, 45.0, 60.0))
            .multiply(&Matrix4::translation(Vector3::new(1.0, -2.0, 3.0)));

        let theirs = cgmath::Matrix4::from(m)
            .invert()
            .expect("TRS matrix is invertible");
        let mut ours = m;
        ours.invert();
        assert_flat_eq(&ours, &theirs);
    }

    #[test]
    fn test_transform_point_agrees_with_cgmath() {
        let mut m = Matrix4::identity();
        m.rotate(Vector3::new(0.0, 90.0, 0.0))
            .multiply(&Matrix4::translation(Vector3::new(5.0, 0.0, 0.0)));

        let p = Vector3::new(1.0, 2.0, 3.0);
        let ours = m.transform_point(p);

        let theirs = cgmath::Matrix4::from(m) * cgmath::Vector4::new(p.x, p.y, p.z, 1.0);
        assert!((ours.x - theirs.x / theirs.w).abs() < EPS);
        assert!((ours.y - theirs.y / theirs.w).abs() < EPS);
        assert!((ours.z - theirs.z / theirs.w).abs() < EPS);
    }
}
