//! GLSL shader objects.

use gl;
use program::Destroyed;
use queue;
use std::{ffi, fmt, ops, sync};

/// GLSL shader stage.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    /// Corresponds to `GL_VERTEX_SHADER`.
    Vertex,

    /// Corresponds to `GL_FRAGMENT_SHADER`.
    Fragment,
}

impl Kind {
    pub(crate) fn as_gl_enum(self) -> u32 {
        match self {
            Kind::Vertex => gl::VERTEX_SHADER,
            Kind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

/// GLSL source text ready to be handed to the driver.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Source(ffi::CString);

impl Source {
    /// Fails if the text contains an interior NUL byte.
    pub fn new<T: Into<Vec<u8>>>(text: T) -> Result<Self, ffi::NulError> {
        ffi::CString::new(text).map(Source)
    }

    pub(crate) fn as_c_str(&self) -> &ffi::CStr {
        self.0.as_c_str()
    }
}

/// Pushes the shader ID onto the factory program queue when destroyed.
struct Destructor {
    id: u32,
    tx: queue::Sender<Destroyed>,
}

impl ops::Drop for Destructor {
    fn drop(&mut self) {
        if self.tx.try_send(Destroyed::Object(self.id)).is_err() {
            warn!("shader {} leaked: destruction queue unavailable", self.id);
        }
    }
}

/// A compiled shader object.
#[derive(Clone)]
pub struct Object {
    /// The OpenGL shader ID.
    id: u32,

    /// The shader stage.
    kind: Kind,

    _destructor: sync::Arc<Destructor>,
}

impl Object {
    /// Constructor.
    pub(crate) fn new(
        id: u32,
        kind: Kind,
        tx: queue::Sender<Destroyed>,
    ) -> Self {
        Self {
            id,
            kind,
            _destructor: sync::Arc::new(Destructor { id, tx }),
        }
    }

    /// Returns the OpenGL shader ID.
    pub(crate) fn id(&self) -> u32 {
        self.id
    }

    /// Returns the shader stage.
    pub fn kind(&self) -> Kind {
        self.kind
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[derive(Debug)]
        struct Object {
            id: u32,
            kind: Kind,
        }

        Object {
            id: self.id,
            kind: self.kind,
        }.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_rejects_interior_nul() {
        assert!(Source::new("void main() {}\0 trailing").is_err());
    }

    #[test]
    fn source_is_nul_terminated_once() {
        let source = Source::new("#version 150 core\n").unwrap();
        let bytes = source.as_c_str().to_bytes_with_nul();
        assert_eq!(bytes.last(), Some(&0));
        assert_eq!(bytes.iter().filter(|&&b| b == 0).count(), 1);
    }
}
