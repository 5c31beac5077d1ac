//! Draw call dispatch.

use gl;

/// Primitive topology.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Primitive {
    /// List of triangle points.
    Triangles,
}

impl Primitive {
    pub(crate) fn as_gl_enum(self) -> u32 {
        match self {
            Primitive::Triangles => gl::TRIANGLES,
        }
    }
}

/// A non-indexed draw call command.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DrawCall {
    /// Where the vertices begin.
    pub offset: usize,

    /// Number of vertices to draw.
    pub count: usize,

    /// The primitive topology.
    pub primitive: Primitive,
}

impl DrawCall {
    /// Draws `count` vertices as triangles starting from the first vertex.
    pub fn triangles(count: usize) -> Self {
        DrawCall {
            offset: 0,
            count,
            primitive: Primitive::Triangles,
        }
    }

    /// Restricts the call to the vertices actually available.
    ///
    /// Returns `None` when the call already fits.
    pub fn clamp_to(&self, available: usize) -> Option<DrawCall> {
        if self.offset.saturating_add(self.count) <= available {
            return None;
        }
        let count = available.saturating_sub(self.offset);
        Some(DrawCall { count, ..*self })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_within_bounds_is_untouched() {
        assert_eq!(DrawCall::triangles(3).clamp_to(3), None);
    }

    #[test]
    fn overlong_call_is_clamped() {
        let clamped = DrawCall::triangles(5).clamp_to(3).unwrap();
        assert_eq!(clamped.count, 3);
        assert_eq!(clamped.offset, 0);
    }

    #[test]
    fn offset_past_end_draws_nothing() {
        let call = DrawCall { offset: 4, count: 2, primitive: Primitive::Triangles };
        assert_eq!(call.clamp_to(3).unwrap().count, 0);
    }

    #[test]
    fn huge_offset_clamps_without_overflow() {
        let call = DrawCall { offset: usize::MAX, count: 1, primitive: Primitive::Triangles };
        let clamped = call.clamp_to(3).unwrap();
        assert_eq!(clamped.count, 0);
        assert_eq!(clamped.offset, usize::MAX);
    }
}
