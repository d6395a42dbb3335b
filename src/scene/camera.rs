//! Perspective camera.

use crate::math::Matrix4;

use super::transform::{CacheSlot, Transform};

/// A viewpoint: a named transform plus a lazily cached left-handed
/// perspective projection.
///
/// The projection cache is invalidated only by [`Camera::set_fov`],
/// [`Camera::set_near`], and [`Camera::set_far`]. The aspect ratio belongs
/// to the display surface, so it is passed fresh on every
/// [`Camera::projection_matrix`] call and is not part of the cache key: a
/// resize alone does not rebuild the matrix until the next fov/near/far
/// change does.
#[derive(Debug)]
pub struct Camera {
    pub name: String,
    pub transform: Transform,
    fov: f32,
    near: f32,
    far: f32,
    projection: CacheSlot,
}

impl Camera {
    /// Creates a camera with the default lens: 0.90 rad vertical fov,
    /// near 0.1, far 20000.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            fov: 0.90,
            near: 0.1,
            far: 20000.0,
            projection: CacheSlot::Dirty,
        }
    }

    /// Vertical field of view in radians.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn set_fov(&mut self, fov: f32) -> &mut Self {
        self.fov = fov;
        self.projection.invalidate();
        self
    }

    pub fn set_near(&mut self, near: f32) -> &mut Self {
        self.near = near;
        self.projection.invalidate();
        self
    }

    pub fn set_far(&mut self, far: f32) -> &mut Self {
        self.far = far;
        self.projection.invalidate();
        self
    }

    /// The projection matrix for the given aspect ratio (width over
    /// height), recomputed only when the lens changed since the last read.
    pub fn projection_matrix(&mut self, aspect: f32) -> &Matrix4 {
        if self.projection.is_dirty() {
            let mut m = Matrix4::zero();
            m.perspective_fov_lh(self.fov, aspect, self.near, self.far);
            self.projection.store(m);
        }
        self.projection.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_is_cached_across_reads() {
        let mut cam = Camera::new("main");
        let first = *cam.projection_matrix(16.0 / 9.0);
        // A different aspect alone does not invalidate the cache.
        let second = *cam.projection_matrix(4.0 / 3.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_lens_change_invalidates_projection() {
        let mut cam = Camera::new("main");
        let before = *cam.projection_matrix(1.0);
        cam.set_fov(1.2);
        let after = *cam.projection_matrix(1.0);
        assert_ne!(before, after);

        let before = after;
        cam.set_near(1.0);
        let after = *cam.projection_matrix(1.0);
        assert_ne!(before, after);

        let before = after;
        cam.set_far(500.0);
        let after = *cam.projection_matrix(1.0);
        assert_ne!(before, after);
    }

    #[test]
    fn test_lens_change_picks_up_current_aspect() {
        let mut cam = Camera::new("main");
        cam.projection_matrix(1.0);
        cam.set_fov(1.0);
        let m = *cam.projection_matrix(2.0);
        let tan = 1.0 / 0.5_f32.tan();
        assert!((m[0] - tan / 2.0).abs() < 1e-5);
    }
}
