//! GPU buffer management.

use gl;
use queue;
use std::{cmp, fmt, hash, ops, sync};

#[doc(inline)]
pub use self::format::Format;

/// OpenGL buffer ID type.
pub(crate) type Id = u32;

/// Determines what the buffer may be used for.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Kind {
    /// Corresponds to `GL_ARRAY_BUFFER`.
    Array,
}

impl Kind {
    /// Returns the equivalent OpenGL target enumeration constant.
    pub fn as_gl_enum(self) -> u32 {
        match self {
            Kind::Array => gl::ARRAY_BUFFER,
        }
    }
}

/// A buffer data usage hint.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Usage {
    /// Corresponds to `GL_STATIC_DRAW`.
    StaticDraw,
}

impl Usage {
    /// Returns the equivalent OpenGL usage enumeration constant.
    pub(crate) fn as_gl_enum(self) -> u32 {
        match self {
            Usage::StaticDraw => gl::STATIC_DRAW,
        }
    }
}

/// Pushes the buffer ID onto the factory buffer queue when destroyed.
pub(crate) struct Destructor {
    id: Id,
    tx: queue::Sender<Id>,
}

impl ops::Drop for Destructor {
    fn drop(&mut self) {
        if self.tx.try_send(self.id).is_err() {
            warn!("buffer {} leaked: destruction queue unavailable", self.id);
        }
    }
}

/// A contiguous region of GPU memory.
#[derive(Clone)]
pub struct Buffer {
    /// The OpenGL buffer ID.
    id: Id,

    /// The type of buffer, e.g. a vertex buffer.
    kind: Kind,

    /// The number of bytes held by the buffer.
    size: usize,

    /// Data usage hint.
    usage: Usage,

    /// Returns the buffer back to the factory upon destruction.
    _destructor: sync::Arc<Destructor>,
}

impl Buffer {
    /// Constructor.
    pub(crate) fn new(
        id: Id,
        kind: Kind,
        usage: Usage,
        tx: queue::Sender<Id>,
    ) -> Self {
        Self {
            _destructor: sync::Arc::new(Destructor { id, tx }),
            id,
            kind,
            size: 0,
            usage,
        }
    }

    /// Returns the OpenGL buffer ID.
    pub(crate) fn id(&self) -> Id {
        self.id
    }

    /// Sets the buffer size.
    pub(crate) fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    /// Returns the buffer kind.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the number of bytes this buffer contains.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the buffer data usage hint.
    pub fn usage(&self) -> Usage {
        self.usage
    }
}

impl cmp::PartialEq<Self> for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl cmp::Eq for Buffer {}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[derive(Debug)]
        struct Buffer {
            id: Id,
            kind: Kind,
            size: usize,
            usage: Usage,
        }

        Buffer {
            id: self.id,
            kind: self.kind,
            size: self.size,
            usage: self.usage,
        }.fmt(f)
    }
}

impl hash::Hash for Buffer {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A formatted view into a [`Buffer`].
///
/// [`Buffer`]: struct.Buffer.html
#[derive(Clone, Debug)]
pub struct Accessor {
    /// The buffer the accessor reads from.
    buffer: Buffer,

    /// The accessor data format.
    format: Format,

    /// The number of bytes into the buffer the accessor reads from.
    offset: usize,

    /// The number of bytes between each element.
    stride: usize,
}

impl Accessor {
    /// Constructor.
    pub fn new(
        buffer: Buffer,
        format: Format,
        offset: usize,
        stride: usize,
    ) -> Self {
        Self {
            buffer,
            format,
            offset,
            stride,
        }
    }

    /// Returns the parent buffer.
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Returns the accessor data format.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Returns the accessor byte offset into the parent buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the accessor byte stride between consecutive elements.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the number of whole elements the accessor can read.
    pub fn count(&self) -> usize {
        let element = self.format.byte_size();
        let size = self.buffer.size();
        if size < self.offset + element {
            return 0;
        }
        let stride = if self.stride == 0 { element } else { self.stride };
        (size - self.offset - element) / stride + 1
    }
}

/// Buffer format descriptors.
pub mod format {
    use gl;
    use std::mem;

    /// Describes the data format of an individual item in an accessor.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum Format {
        /// 32-bit floating point vector with the given number of components.
        F32(u8),
    }

    impl Format {
        /// Returns the corresponding GL data type enumeration constant.
        pub(crate) fn gl_data_type(self) -> u32 {
            match self {
                Format::F32(_) => gl::FLOAT,
            }
        }

        /// Returns true if this is a normalized type.
        pub fn norm(self) -> bool {
            false
        }

        /// Returns the number of components.
        pub fn size(self) -> usize {
            let size = match self {
                Format::F32(size) => size,
            };
            match size {
                1 | 2 | 3 | 4 => size as usize,
                _ => panic!("invalid buffer format size"),
            }
        }

        /// Returns the number of bytes one element occupies.
        pub fn byte_size(self) -> usize {
            match self {
                Format::F32(_) => self.size() * mem::size_of::<f32>(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use queue::Queue;

    #[test]
    fn clones_release_the_buffer_once() {
        let queue = Queue::new();
        let buffer = Buffer::new(7, Kind::Array, Usage::StaticDraw, queue.tx());
        let copy = buffer.clone();
        drop(buffer);
        assert_eq!(queue.next(), None);
        drop(copy);
        assert_eq!(queue.drain(), vec![7]);
    }

    #[test]
    fn accessor_counts_interleaved_elements() {
        let queue = Queue::new();
        let mut buffer = Buffer::new(1, Kind::Array, Usage::StaticDraw, queue.tx());
        buffer.set_size(60);
        let position = Accessor::new(buffer.clone(), Format::F32(2), 0, 20);
        let color = Accessor::new(buffer, Format::F32(3), 8, 20);
        assert_eq!(position.count(), 3);
        assert_eq!(color.count(), 3);
    }

    #[test]
    fn tightly_packed_accessor_uses_element_size() {
        let queue = Queue::new();
        let mut buffer = Buffer::new(1, Kind::Array, Usage::StaticDraw, queue.tx());
        buffer.set_size(24);
        let position = Accessor::new(buffer, Format::F32(2), 0, 0);
        assert_eq!(position.count(), 3);
    }

    #[test]
    fn empty_buffer_has_no_elements() {
        let queue = Queue::new();
        let buffer = Buffer::new(1, Kind::Array, Usage::StaticDraw, queue.tx());
        let position = Accessor::new(buffer, Format::F32(2), 0, 0);
        assert_eq!(position.count(), 0);
    }
}
