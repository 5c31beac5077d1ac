//! Vertex formats and their attribute layouts.

use buffer::Format;
use std::mem;

/// Describes where one named shader input lives inside a vertex.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Attribute {
    /// NUL-terminated GLSL attribute name.
    pub name: &'static [u8],

    /// Component type and count.
    pub format: Format,

    /// Byte offset from the start of the vertex.
    pub offset: usize,
}

/// A `#[repr(C)]` vertex type that can be uploaded as-is.
pub trait Vertex: Copy {
    /// The attributes making up one vertex, in memory order.
    fn attributes() -> Vec<Attribute>;

    /// Byte distance between consecutive vertices.
    fn stride() -> usize {
        mem::size_of::<Self>()
    }
}

/// A vertex with a 2D position only.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub position: [f32; 2],
}

impl Vertex for Position {
    fn attributes() -> Vec<Attribute> {
        vec![
            Attribute {
                name: b"position\0",
                format: Format::F32(2),
                offset: offset_of!(Position::position),
            },
        ]
    }
}

/// A vertex with a 2D position followed by an RGB color.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColoredVertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

impl Vertex for ColoredVertex {
    fn attributes() -> Vec<Attribute> {
        vec![
            Attribute {
                name: b"position\0",
                format: Format::F32(2),
                offset: offset_of!(ColoredVertex::position),
            },
            Attribute {
                name: b"color\0",
                format: Format::F32(3),
                offset: offset_of!(ColoredVertex::color),
            },
        ]
    }
}

/// The triangle shared by both scenes.
pub const TRIANGLE: [Position; 3] = [
    Position { position: [0.0, 0.5] },
    Position { position: [0.5, -0.5] },
    Position { position: [-0.5, -0.5] },
];

/// The triangle with a red, green and blue corner.
pub const COLORED_TRIANGLE: [ColoredVertex; 3] = [
    ColoredVertex { position: [0.0, 0.5], color: [1.0, 0.0, 0.0] },
    ColoredVertex { position: [0.5, -0.5], color: [0.0, 1.0, 0.0] },
    ColoredVertex { position: [-0.5, -0.5], color: [0.0, 0.0, 1.0] },
];

/// Reinterprets a slice of vertices as raw bytes.
pub(crate) fn as_bytes<V: Vertex>(vertices: &[V]) -> &[u8] {
    let len = vertices.len() * mem::size_of::<V>();
    unsafe { ::std::slice::from_raw_parts(vertices.as_ptr() as *const u8, len) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_f32(bytes: &[u8], offset: usize) -> f32 {
        let mut word = [0u8; 4];
        word.copy_from_slice(&bytes[offset .. offset + 4]);
        f32::from_bits(u32::from_ne_bytes(word))
    }

    #[test]
    fn position_layout_is_tightly_packed() {
        assert_eq!(Position::stride(), 8);
        let attributes = Position::attributes();
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes[0].offset, 0);
        assert_eq!(attributes[0].format.byte_size(), Position::stride());
    }

    #[test]
    fn colored_layout_interleaves_position_and_color() {
        assert_eq!(ColoredVertex::stride(), 20);
        let attributes = ColoredVertex::attributes();
        assert_eq!(attributes[0].name, b"position\0");
        assert_eq!(attributes[0].offset, 0);
        assert_eq!(attributes[1].name, b"color\0");
        assert_eq!(attributes[1].offset, 8);
        let covered: usize = attributes.iter().map(|a| a.format.byte_size()).sum();
        assert_eq!(covered, ColoredVertex::stride());
    }

    #[test]
    fn declared_offsets_match_uploaded_bytes() {
        let bytes = as_bytes(&COLORED_TRIANGLE);
        assert_eq!(bytes.len(), 3 * ColoredVertex::stride());
        let stride = ColoredVertex::stride();
        let attributes = ColoredVertex::attributes();
        for (index, vertex) in COLORED_TRIANGLE.iter().enumerate() {
            let base = index * stride;
            for component in 0 .. 2 {
                let offset = base + attributes[0].offset + 4 * component;
                assert_eq!(read_f32(bytes, offset), vertex.position[component]);
            }
            for component in 0 .. 3 {
                let offset = base + attributes[1].offset + 4 * component;
                assert_eq!(read_f32(bytes, offset), vertex.color[component]);
            }
        }
    }

    #[test]
    fn triangle_positions_match_between_scenes() {
        for (plain, colored) in TRIANGLE.iter().zip(COLORED_TRIANGLE.iter()) {
            assert_eq!(plain.position, colored.position);
        }
    }
}
