//! The two triangle scenes.

use draw_call::DrawCall;
use vertex::{self, Vertex};

/// Which triangle to render.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Scene {
    /// A red triangle fading in and out over time.
    Breathe,

    /// A triangle with a red, green and blue corner.
    Colored,
}

impl Scene {
    /// GLSL vertex shader source.
    pub fn vertex_source(self) -> &'static str {
        match self {
            Scene::Breathe => include_str!("shaders/breathe.vert"),
            Scene::Colored => include_str!("shaders/colored.vert"),
        }
    }

    /// GLSL fragment shader source.
    pub fn fragment_source(self) -> &'static str {
        match self {
            Scene::Breathe => include_str!("shaders/breathe.frag"),
            Scene::Colored => include_str!("shaders/colored.frag"),
        }
    }

    /// NUL-terminated name of the animated color uniform, if any.
    pub fn color_uniform(self) -> Option<&'static [u8]> {
        match self {
            Scene::Breathe => Some(b"triangleColor\0"),
            Scene::Colored => None,
        }
    }

    /// Number of vertices uploaded for this scene.
    pub fn vertex_count(self) -> usize {
        match self {
            Scene::Breathe => vertex::TRIANGLE.len(),
            Scene::Colored => vertex::COLORED_TRIANGLE.len(),
        }
    }

    /// Bytes per vertex.
    pub fn stride(self) -> usize {
        match self {
            Scene::Breathe => vertex::Position::stride(),
            Scene::Colored => vertex::ColoredVertex::stride(),
        }
    }

    /// The draw call issued every frame.
    pub fn draw_call(self) -> DrawCall {
        DrawCall::triangles(self.vertex_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shader::Source;

    const SCENES: [Scene; 2] = [Scene::Breathe, Scene::Colored];

    #[test]
    fn draw_calls_cover_exactly_the_uploaded_vertices() {
        for &scene in SCENES.iter() {
            let call = scene.draw_call();
            assert_eq!(call.offset, 0);
            assert_eq!(call.count, scene.vertex_count());
            assert_eq!(call.clamp_to(scene.vertex_count()), None);
        }
    }

    #[test]
    fn sources_are_valid_c_strings() {
        for &scene in SCENES.iter() {
            assert!(Source::new(scene.vertex_source()).is_ok());
            assert!(Source::new(scene.fragment_source()).is_ok());
            assert!(scene.vertex_source().starts_with("#version 150 core"));
        }
    }

    #[test]
    fn shaders_declare_the_bound_inputs() {
        assert!(Scene::Breathe.vertex_source().contains("in vec2 position;"));
        assert!(Scene::Breathe.fragment_source().contains("uniform vec3 triangleColor;"));
        assert!(Scene::Colored.vertex_source().contains("in vec3 color;"));
        assert!(!Scene::Colored.fragment_source().contains("uniform"));
    }

    #[test]
    fn only_breathe_animates() {
        assert_eq!(Scene::Breathe.color_uniform(), Some(&b"triangleColor\0"[..]));
        assert_eq!(Scene::Colored.color_uniform(), None);
    }

    #[test]
    fn strides_follow_vertex_types() {
        assert_eq!(Scene::Breathe.stride(), 8);
        assert_eq!(Scene::Colored.stride(), 20);
    }
}
