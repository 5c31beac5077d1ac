use std::{cmp, fmt, hash};

pub(crate) type Id = u32;

/// Color buffer clear at the start of a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClearOp {
    /// The `[r, g, b, a]` value the color buffer is filled with.
    pub color: [f32; 4],
}

/// A framebuffer object.
pub struct Framebuffer {
    /// The OpenGL framebuffer ID.
    id: Id,

    /// Width and height in pixels.
    dimensions: (u32, u32),
}

impl Framebuffer {
    /// Returns the implicit framebuffer object of the current window.
    pub(crate) fn implicit(width: u32, height: u32) -> Self {
        Self {
            id: 0,
            dimensions: (width, height),
        }
    }

    /// Returns the OpenGL framebuffer ID.
    pub(crate) fn id(&self) -> Id {
        self.id
    }

    /// Returns the framebuffer width and height in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[derive(Debug)]
        struct Framebuffer {
            id: Id,
            dimensions: (u32, u32),
        }

        Framebuffer {
            id: self.id,
            dimensions: self.dimensions,
        }.fmt(f)
    }
}

impl cmp::PartialEq<Self> for Framebuffer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl cmp::Eq for Framebuffer {}

impl hash::Hash for Framebuffer {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
