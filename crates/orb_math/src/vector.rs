//! Extra vector operations on top of glam.
//!
//! glam already covers add/sub/scale/component multiply/dot/negate and the
//! length queries. What it does not have is a normalize that is a no-op on
//! the zero vector (`normalize` yields NaN, `normalize_or_zero` also zeroes
//! tiny-but-valid vectors), so that lives here.

use crate::Vec3;

/// Helpers the tracer needs that glam doesn't provide directly.
pub trait VectorExt: Sized {
    /// Return a unit-length copy, or `self` unchanged when the length is zero.
    fn normalized(self) -> Self;

    /// Normalize in place. The zero vector stays zero.
    fn normalize_in_place(&mut self);

    /// True if any component differs from zero.
    fn is_nonzero(self) -> bool;

    /// True if any component is strictly positive.
    fn has_positive_component(self) -> bool;
}

impl VectorExt for Vec3 {
    #[inline]
    fn normalized(self) -> Self {
        let len2 = self.length_squared();
        if len2 > 0.0 {
            let inv_len = 1.0 / len2.sqrt();
            self * inv_len
        } else {
            self
        }
    }

    #[inline]
    fn normalize_in_place(&mut self) {
        *self = self.normalized();
    }

    #[inline]
    fn is_nonzero(self) -> bool {
        self.x != 0.0 || self.y != 0.0 || self.z != 0.0
    }

    #[inline]
    fn has_positive_component(self) -> bool {
        self.x > 0.0 || self.y > 0.0 || self.z > 0.0
    }
}
