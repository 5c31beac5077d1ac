//! Vertex array objects.

use buffer;
use queue;
use std::{cmp, fmt, hash, ops, sync};
use vec_map::VecMap;

/// The maximum number of vertex attributes permitted by the crate.
pub const MAX_ATTRIBUTES: usize = 8;

/// The OpenGL VAO ID type.
pub(crate) type Id = u32;

/// Vertex attribute.
pub type Attribute = buffer::Accessor;

/// Attribute accessors keyed by shader attribute location.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    pub attributes: VecMap<Attribute>,
}

impl Builder {
    /// Constructor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of vertices every bound attribute can supply.
    pub fn vertex_count(&self) -> usize {
        self.attributes
            .values()
            .map(|accessor| accessor.count())
            .min()
            .unwrap_or(0)
    }
}

/// Returns the VAO back to the factory upon destruction.
struct Destructor {
    id: Id,
    tx: queue::Sender<Id>,
}

impl ops::Drop for Destructor {
    fn drop(&mut self) {
        if self.tx.try_send(self.id).is_err() {
            warn!("vertex array {} leaked: destruction queue unavailable", self.id);
        }
    }
}

/// Corresponds to an OpenGL vertex array object.
#[derive(Clone)]
pub struct VertexArray {
    /// The OpenGL VAO ID.
    id: Id,

    /// Vertex attributes bound at creation time; keeps their buffers alive.
    attributes: VecMap<Attribute>,

    /// Number of vertices available to draw calls.
    vertex_count: usize,

    /// Returns the VAO back to the factory upon destruction.
    _destructor: sync::Arc<Destructor>,
}

impl VertexArray {
    /// Returns a builder for the attributes of a new vertex array.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Constructor.
    pub(crate) fn new(
        id: Id,
        builder: Builder,
        tx: queue::Sender<Id>,
    ) -> Self {
        let vertex_count = builder.vertex_count();
        Self {
            id,
            attributes: builder.attributes,
            vertex_count,
            _destructor: sync::Arc::new(Destructor { id, tx }),
        }
    }

    /// Returns the OpenGL VAO ID.
    pub(crate) fn id(&self) -> Id {
        self.id
    }

    /// Returns the number of vertices the bound attributes hold.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }
}

impl cmp::Eq for VertexArray {}

impl cmp::PartialEq<Self> for VertexArray {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for VertexArray {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[derive(Debug)]
        struct VertexArray<'a> {
            id: u32,
            vertex_count: usize,
            attributes: &'a VecMap<Attribute>,
        }

        VertexArray {
            id: self.id,
            vertex_count: self.vertex_count,
            attributes: &self.attributes,
        }.fmt(f)
    }
}

impl hash::Hash for VertexArray {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buffer::{Accessor, Buffer, Format, Kind, Usage};
    use queue::Queue;

    #[test]
    fn vertex_count_is_limited_by_shortest_attribute() {
        let buffers = Queue::new();
        let mut long = Buffer::new(1, Kind::Array, Usage::StaticDraw, buffers.tx());
        long.set_size(40);
        let mut short = Buffer::new(2, Kind::Array, Usage::StaticDraw, buffers.tx());
        short.set_size(36);

        let mut builder = VertexArray::builder();
        builder.attributes.insert(0, Accessor::new(long, Format::F32(2), 0, 0));
        builder.attributes.insert(3, Accessor::new(short, Format::F32(3), 0, 0));

        let arrays = Queue::new();
        let vertex_array = VertexArray::new(9, builder, arrays.tx());
        assert_eq!(vertex_array.vertex_count(), 3);

        drop(vertex_array);
        assert_eq!(arrays.drain(), vec![9]);
    }

    #[test]
    fn empty_builder_has_no_vertices() {
        assert_eq!(VertexArray::builder().vertex_count(), 0);
    }
}
