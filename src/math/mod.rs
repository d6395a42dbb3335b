//! # Vector and Matrix Math
//!
//! Value-type 3D math shared by the transform, scene, and geometry layers.
//!
//! Matrices use a flat 16-element layout with the translation in elements
//! 12-14 and vectors multiplying on the left (`v' = v * M`). Read
//! column-major, the same flat array is the equivalent column-vector
//! matrix, which is what lets [`convert`] hand it to cgmath-based
//! renderers without a transpose.

pub mod convert;
pub mod matrix;
pub mod vector;

pub use matrix::Matrix4;
pub use vector::Vector3;
