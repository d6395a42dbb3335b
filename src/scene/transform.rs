//! Per-node spatial state with lazily cached world and view matrices.
//!
//! Mutation is eager-invalidate, read is lazy-recompute: every mutator
//! marks both cache slots dirty immediately, and the matrix getters
//! rebuild only when asked with a stale cache. The renderer is expected to
//! read each matrix about once per frame, but nothing depends on that.

use log::trace;

use crate::math::{Matrix4, Vector3};

/// One cached matrix: either stale or holding a valid value.
///
/// "Clean implies valid" is carried by the variant itself, so there is no
/// window where a flag says clean while the buffer holds garbage.
#[derive(Debug, Clone, Copy)]
pub(crate) enum CacheSlot {
    Dirty,
    Clean(Matrix4),
}

impl CacheSlot {
    pub(crate) fn is_dirty(&self) -> bool {
        matches!(self, CacheSlot::Dirty)
    }

    pub(crate) fn invalidate(&mut self) {
        *self = CacheSlot::Dirty;
    }

    pub(crate) fn store(&mut self, m: Matrix4) {
        *self = CacheSlot::Clean(m);
    }

    /// The cached matrix. Callers fill the slot first; a dirty slot here
    /// is a bug in this module, not in the caller.
    pub(crate) fn value(&self) -> &Matrix4 {
        match self {
            CacheSlot::Clean(m) => m,
            CacheSlot::Dirty => unreachable!("cache slot read while dirty"),
        }
    }
}

/// Position, Euler rotation (degrees), and scale, with cached world and
/// view matrices.
///
/// Rotation components are wrapped into `[0, 360)` on every write.
/// Mutators reject vectors containing NaN: the call is a no-op and the
/// caches stay untouched. That is the documented contract, so chained
/// calls stay valid even when an upstream computation went bad.
#[derive(Debug, Clone)]
pub struct Transform {
    position: Vector3,
    rotation: Vector3,
    scale: Vector3,
    world: CacheSlot,
    view: CacheSlot,
    world_recomputes: u32,
    view_recomputes: u32,
}

impl Transform {
    pub fn new(position: Vector3, rotation: Vector3, scale: Vector3) -> Self {
        Self {
            position,
            rotation: wrap_euler(rotation),
            scale,
            world: CacheSlot::Dirty,
            view: CacheSlot::Dirty,
            world_recomputes: 0,
            view_recomputes: 0,
        }
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// Euler rotation in degrees, each component in `[0, 360)`.
    pub fn rotation(&self) -> Vector3 {
        self.rotation
    }

    pub fn scale(&self) -> Vector3 {
        self.scale
    }

    /// The local forward axis ([`Vector3::FORWARD`] rotated by the current
    /// Euler rotation).
    pub fn forward(&self) -> Vector3 {
        let mut rot = Matrix4::identity();
        rot.rotate(self.rotation);
        rot.transform_point(Vector3::FORWARD)
    }

    /// The local-to-world matrix, composed scale, then rotation, then
    /// translation.
    ///
    /// Returns a reference into the cache; the matrix is recomputed only
    /// if a mutator ran since the last read.
    pub fn world_matrix(&mut self) -> &Matrix4 {
        if self.world.is_dirty() {
            let mut m = Matrix4::identity();
            m.set_scale(self.scale)
                .rotate(self.rotation)
                .multiply(&Matrix4::translation(self.position));
            self.world.store(m);
            self.world_recomputes += 1;
        }
        self.world.value()
    }

    /// The world-to-view matrix for a viewer at `position` facing along
    /// [`Transform::forward`].
    pub fn view_matrix(&mut self) -> &Matrix4 {
        if self.view.is_dirty() {
            let mut m = Matrix4::identity();
            m.look_at(self.position, self.position + self.forward());
            self.view.store(m);
            self.view_recomputes += 1;
        }
        self.view.value()
    }

    /// Moves by `v` in world axes.
    pub fn translate(&mut self, v: Vector3) -> &mut Self {
        if v.is_nan() {
            trace!("translate rejected NaN input");
            return self;
        }
        self.position += v;
        self.dirty();
        self
    }

    /// Moves by `v` expressed in the node's local axes: `v` is rotated by
    /// the current rotation before being applied.
    pub fn translate_local(&mut self, v: Vector3) -> &mut Self {
        if v.is_nan() {
            trace!("translate_local rejected NaN input");
            return self;
        }
        let mut rot = Matrix4::identity();
        rot.rotate(self.rotation);
        self.translate(rot.transform_point(v))
    }

    /// Adds `v` (degrees) to the rotation, wrapping each component into
    /// `[0, 360)`.
    pub fn rotate(&mut self, v: Vector3) -> &mut Self {
        if v.is_nan() {
            trace!("rotate rejected NaN input");
            return self;
        }
        self.rotation = wrap_euler(self.rotation + v);
        self.dirty();
        self
    }

    pub fn set_position(&mut self, v: Vector3) -> &mut Self {
        if v.is_nan() {
            trace!("set_position rejected NaN input");
            return self;
        }
        self.position = v;
        self.dirty();
        self
    }

    /// Sets the rotation (degrees), wrapping each component into
    /// `[0, 360)`.
    pub fn set_rotation(&mut self, v: Vector3) -> &mut Self {
        if v.is_nan() {
            trace!("set_rotation rejected NaN input");
            return self;
        }
        self.rotation = wrap_euler(v);
        self.dirty();
        self
    }

    pub fn set_scale(&mut self, v: Vector3) -> &mut Self {
        if v.is_nan() {
            trace!("set_scale rejected NaN input");
            return self;
        }
        self.scale = v;
        self.dirty();
        self
    }

    // The view matrix depends on position and rotation too, so every
    // mutator invalidates both slots.
    fn dirty(&mut self) {
        self.world.invalidate();
        self.view.invalidate();
    }

    #[cfg(test)]
    pub(crate) fn world_is_dirty(&self) -> bool {
        self.world.is_dirty()
    }

    #[cfg(test)]
    pub(crate) fn view_is_dirty(&self) -> bool {
        self.view.is_dirty()
    }

    #[cfg(test)]
    pub(crate) fn recompute_counts(&self) -> (u32, u32) {
        (self.world_recomputes, self.view_recomputes)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vector3::ZERO, Vector3::ZERO, Vector3::ONE)
    }
}

fn wrap_euler(v: Vector3) -> Vector3 {
    Vector3::new(
        v.x.rem_euclid(360.0),
        v.y.rem_euclid(360.0),
        v.z.rem_euclid(360.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_starts_dirty_and_getter_cleans() {
        let mut t = Transform::default();
        assert!(t.world_is_dirty());
        assert!(t.view_is_dirty());

        let world = *t.world_matrix();
        assert!(!t.world_is_dirty());
        assert!(world.approx_eq(&Matrix4::IDENTITY, EPS));

        t.view_matrix();
        assert!(!t.view_is_dirty());
    }

    #[test]
    fn test_second_read_does_not_recompute() {
        let mut t = Transform::default();
        let first = *t.world_matrix();
        let second = *t.world_matrix();
        assert_eq!(first, second);
        assert_eq!(t.recompute_counts().0, 1);

        t.view_matrix();
        t.view_matrix();
        assert_eq!(t.recompute_counts().1, 1);
    }

    #[test]
    fn test_every_mutator_dirties_both_slots() {
        let mutators: [fn(&mut Transform); 6] = [
            |t| {
                t.translate(Vector3::ONE);
            },
            |t| {
                t.translate_local(Vector3::FORWARD);
            },
            |t| {
                t.rotate(Vector3::new(0.0, 10.0, 0.0));
            },
            |t| {
                t.set_position(Vector3::ONE);
            },
            |t| {
                t.set_rotation(Vector3::new(45.0, 0.0, 0.0));
            },
            |t| {
                t.set_scale(Vector3::new(2.0, 2.0, 2.0));
            },
        ];
        for mutate in mutators {
            let mut t = Transform::default();
            t.world_matrix();
            t.view_matrix();
            mutate(&mut t);
            assert!(t.world_is_dirty());
            assert!(t.view_is_dirty());
        }
    }

    #[test]
    fn test_nan_mutation_is_a_no_op() {
        let mut t = Transform::default();
        t.set_position(Vector3::new(1.0, 2.0, 3.0));
        t.world_matrix();
        t.view_matrix();

        let nan = Vector3::new(f32::NAN, 0.0, 0.0);
        t.translate(nan);
        t.translate_local(nan);
        t.rotate(nan);
        t.set_position(nan);
        t.set_rotation(nan);
        t.set_scale(nan);

        assert_eq!(t.position(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(t.rotation(), Vector3::ZERO);
        assert_eq!(t.scale(), Vector3::ONE);
        // Dirty flags untouched: the caches stay clean.
        assert!(!t.world_is_dirty());
        assert!(!t.view_is_dirty());
    }

    #[test]
    fn test_rotation_wraps_into_0_360() {
        let mut t = Transform::default();
        t.set_rotation(Vector3::new(370.0, -90.0, 720.0));
        assert_eq!(t.rotation(), Vector3::new(10.0, 270.0, 0.0));

        t.rotate(Vector3::new(0.0, 100.0, -10.0));
        let r = t.rotation();
        assert!((r.y - 10.0).abs() < EPS);
        assert!((r.z - 350.0).abs() < EPS);
    }

    #[test]
    fn test_world_matrix_composes_scale_rotate_translate() {
        let mut t = Transform::default();
        t.set_scale(Vector3::new(2.0, 2.0, 2.0))
            .set_rotation(Vector3::new(0.0, 90.0, 0.0))
            .set_position(Vector3::new(10.0, 0.0, 0.0));
        // Local +x scales to 2x, rotates about y, then translates.
        let p = t.world_matrix().transform_point(Vector3::RIGHT);
        assert!((p.x - 10.0).abs() < 1e-3);
        assert!((p.y - 0.0).abs() < 1e-3);
        assert!((p.z - (-2.0)).abs() < 1e-3);
    }

    #[test]
    fn test_translate_local_moves_along_rotated_axes() {
        let mut t = Transform::default();
        t.set_rotation(Vector3::new(0.0, 90.0, 0.0));
        t.translate_local(Vector3::FORWARD);
        let p = t.position();
        // Forward rotated 90 degrees about y.
        assert!((p.x - 1.0).abs() < 1e-4);
        assert!(p.y.abs() < 1e-4);
        assert!(p.z.abs() < 1e-4);
    }

    #[test]
    fn test_view_matrix_inverts_position() {
        let mut t = Transform::default();
        t.set_position(Vector3::new(0.0, 0.0, -5.0));
        let view = t.view_matrix();
        let origin = view.transform_point(Vector3::ZERO);
        assert!((origin.z - 5.0).abs() < EPS);
    }
}
