//! Factory.

use buffer;
use gl;
use program;
use shader;
use std::ffi;
use vertex;
use vertex_array;

use buffer::Accessor;
use draw_call::DrawCall;
use framebuffer::{ClearOp, Framebuffer};
use program::{Destroyed, Invocation, Uniform};
use queue::Queue;
use {Buffer, Program, VertexArray};

/// A GL object awaiting deletion.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Release {
    Program(u32),
    Shader(u32),
    Buffer(u32),
    VertexArray(u32),
}

/// Destroyed handles arrive here until the factory releases them.
#[derive(Clone, Default)]
pub(crate) struct Queues {
    /// Destroyed buffers.
    pub buffer: Queue<buffer::Id>,

    /// Destroyed vertex arrays.
    pub vertex_array: Queue<vertex_array::Id>,

    /// Destroyed GLSL programs and shader objects.
    pub program: Queue<Destroyed>,
}

impl Queues {
    /// Empties every queue, returning the objects in teardown order:
    /// programs, shader objects, buffers and finally vertex arrays.
    pub fn drain(&self) -> Vec<Release> {
        let mut programs = Vec::new();
        let mut shaders = Vec::new();
        for destroyed in self.program.drain() {
            match destroyed {
                Destroyed::Program(id) => programs.push(Release::Program(id)),
                Destroyed::Object(id) => shaders.push(Release::Shader(id)),
            }
        }
        let buffers = self.buffer.drain().into_iter().map(Release::Buffer);
        let vertex_arrays = self.vertex_array.drain().into_iter().map(Release::VertexArray);
        programs
            .into_iter()
            .chain(shaders)
            .chain(buffers)
            .chain(vertex_arrays)
            .collect()
    }
}

/// OpenGL memory manager.
#[derive(Clone)]
pub struct Factory {
    /// Function pointers to the OpenGL backend.
    backend: gl::Backend,

    /// Destroyed handles waiting to be released.
    queues: Queues,
}

impl Factory {
    /// Constructor.
    pub fn new<F>(query_proc_address: F) -> Self
        where F: FnMut(&str) -> *const ()
    {
        Self {
            backend: gl::Backend::load(query_proc_address),
            queues: Queues::default(),
        }
    }

    /// Returns the `GL_VERSION` string of the current context.
    pub fn version(&self) -> String {
        self.backend.get_string(gl::VERSION)
    }

    /// Reports the first GL error raised since the previous check.
    pub fn check_error(&self) -> Option<u32> {
        let error = self.backend.take_error();
        match error {
            None => info!("No errors"),
            Some(code) => error!("Some error. Error code: {}", code),
        }
        error
    }

    /// Clear the framebuffer color buffer.
    pub fn clear(&self, framebuffer: &Framebuffer, op: ClearOp) {
        self.backend.bind_framebuffer(framebuffer.id());
        let [r, g, b, a] = op.color;
        self.backend.clear_color(r, g, b, a);
        self.backend.clear(gl::COLOR_BUFFER_BIT);
    }

    /// Create an uninitialized GPU buffer.
    pub fn buffer(&self, kind: buffer::Kind, usage: buffer::Usage) -> Buffer {
        let id = self.backend.gen_buffer();
        let tx = self.queues.buffer.tx();
        Buffer::new(id, kind, usage, tx)
    }

    /// (Re)-initialize the contents of a [`Buffer`].
    ///
    /// [`Buffer`]: buffer/struct.Buffer.html
    pub fn initialize_buffer<V: vertex::Vertex>(&self, buffer: &mut Buffer, data: &[V]) {
        let bytes = vertex::as_bytes(data);
        self.backend.bind_buffer(buffer.id(), buffer.kind().as_gl_enum());
        self.backend.buffer_data(
            buffer.kind().as_gl_enum(),
            bytes.len(),
            bytes.as_ptr(),
            buffer.usage().as_gl_enum(),
        );
        self.backend.bind_buffer(0, buffer.kind().as_gl_enum());
        buffer.set_size(bytes.len());
    }

    /// Binds accessors for every attribute of `V` that the program consumes.
    ///
    /// Attributes the program does not use are skipped.
    pub fn vertex_layout<V: vertex::Vertex>(
        &self,
        program: &Program,
        buffer: &Buffer,
    ) -> vertex_array::Builder {
        let mut builder = VertexArray::builder();
        for attribute in V::attributes() {
            let name = ffi::CStr::from_bytes_with_nul(attribute.name);
            let location = match name {
                Ok(name) => self.query_attribute_location(program, name),
                Err(_) => {
                    warn!("attribute name {:?} is not NUL-terminated", attribute.name);
                    None
                }
            };
            match location {
                Some(location) => {
                    let accessor = Accessor::new(
                        buffer.clone(),
                        attribute.format,
                        attribute.offset,
                        V::stride(),
                    );
                    builder.attributes.insert(location as usize, accessor);
                }
                None => debug!("attribute {:?} is inactive", attribute.name),
            }
        }
        builder
    }

    /// A collection of GPU buffers that may be drawn with a program.
    pub fn vertex_array(&self, builder: vertex_array::Builder) -> VertexArray {
        let id = self.backend.gen_vertex_array();
        let tx = self.queues.vertex_array.tx();

        // Setup the vertex array
        {
            self.backend.bind_vertex_array(id);
            for (location, accessor) in builder.attributes.iter() {
                if location >= vertex_array::MAX_ATTRIBUTES {
                    warn!("attribute location {} out of range", location);
                    continue;
                }
                self.backend.bind_buffer(accessor.buffer().id(), gl::ARRAY_BUFFER);
                self.backend.vertex_attrib_pointer(
                    location as u8,
                    accessor.format().size() as _,
                    accessor.format().gl_data_type(),
                    accessor.format().norm(),
                    accessor.stride() as _,
                    accessor.offset(),
                );
                self.backend.enable_vertex_attrib_array(location as u8);
            }
            self.backend.bind_vertex_array(0);
        }

        VertexArray::new(id, builder, tx)
    }

    /// Compile GLSL shader code into a shader object.
    ///
    /// Compilation failures are logged, not returned.
    pub fn shader(
        &self,
        kind: shader::Kind,
        source: &shader::Source,
    ) -> shader::Object {
        let id = self.backend.create_shader(kind.as_gl_enum());
        self.backend.shader_source(id, source.as_c_str());
        let compiled = self.backend.compile_shader(id);
        let log = self.backend.get_shader_info_log(id);
        info!("Shader Log: {}", log.trim_end());
        if !compiled {
            error!("{:?} shader {} failed to compile", kind, id);
        }
        let tx = self.queues.program.tx();
        shader::Object::new(id, kind, tx)
    }

    /// Link GLSL objects to create a GLSL program.
    ///
    /// Linking failures are logged, not returned.
    pub fn program(
        &self,
        vertex: &shader::Object,
        fragment: &shader::Object,
    ) -> Program {
        let id = self.backend.create_program();
        self.backend.attach_shader(id, vertex.id());
        self.backend.attach_shader(id, fragment.id());
        let linked = self.backend.link_program(id);
        let log = self.backend.get_program_info_log(id);
        info!("Program Log: {}", log.trim_end());
        if !linked {
            error!("program {} failed to link", id);
        }
        let tx = self.queues.program.tx();
        Program::new(id, tx)
    }

    /// Retrieves the location of a named vertex attribute.
    pub fn query_attribute_location(
        &self,
        program: &Program,
        name: &ffi::CStr,
    ) -> Option<u8> {
        match self.backend.get_attrib_location(program.id(), name) {
            -1 => None,
            x => Some(x as u8),
        }
    }

    /// Retrieves the location of a named uniform.
    pub fn query_uniform_location(
        &self,
        program: &Program,
        name: &ffi::CStr,
    ) -> Option<program::UniformLocation> {
        match self.backend.get_uniform_location(program.id(), name) {
            -1 => None,
            x => Some(x),
        }
    }

    /// Perform a draw call.
    pub fn draw(
        &self,
        framebuffer: &Framebuffer,
        vertex_array: &VertexArray,
        draw_call: &DrawCall,
        invocation: &Invocation,
    ) {
        let draw_call = match draw_call.clamp_to(vertex_array.vertex_count()) {
            Some(clamped) => {
                warn!(
                    "draw call wants {} vertices from offset {} but only {} were uploaded",
                    draw_call.count,
                    draw_call.offset,
                    vertex_array.vertex_count(),
                );
                clamped
            }
            None => *draw_call,
        };
        self.backend.bind_framebuffer(framebuffer.id());
        let (w, h) = framebuffer.dimensions();
        self.backend.viewport(0, 0, w, h);
        self.backend.bind_vertex_array(vertex_array.id());
        self.backend.use_program(invocation.program.id());
        for &(location, uniform) in invocation.uniforms.iter() {
            match uniform {
                Uniform::Vec3([x, y, z]) => self.backend.uniform3f(location, x, y, z),
            }
        }
        let mode = draw_call.primitive.as_gl_enum();
        self.backend.draw_arrays(mode, draw_call.offset, draw_call.count);
        self.backend.use_program(0);
        self.backend.bind_vertex_array(0);
    }

    /// Deletes every GL object whose last handle has been dropped.
    ///
    /// Returns the number of objects released.
    pub fn collect_garbage(&self) -> usize {
        let released = self.queues.drain();
        for release in &released {
            match *release {
                Release::Program(id) => self.backend.delete_program(id),
                Release::Shader(id) => self.backend.delete_shader(id),
                Release::Buffer(id) => self.backend.delete_buffer(id),
                Release::VertexArray(id) => self.backend.delete_vertex_array(id),
            }
        }
        debug!("released {} GL objects", released.len());
        released.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buffer::{Kind, Usage};
    use vertex_array::Builder;

    #[test]
    fn teardown_releases_every_handle_once_in_order() {
        let queues = Queues::default();
        let vertex_array = VertexArray::new(4, Builder::new(), queues.vertex_array.tx());
        let buffer = Buffer::new(3, Kind::Array, Usage::StaticDraw, queues.buffer.tx());
        let vertex = shader::Object::new(1, shader::Kind::Vertex, queues.program.tx());
        let fragment = shader::Object::new(2, shader::Kind::Fragment, queues.program.tx());
        let program = Program::new(5, queues.program.tx());
        let program_copy = program.clone();

        drop(vertex_array);
        drop(buffer);
        drop(vertex);
        drop(fragment);
        drop(program);
        drop(program_copy);

        assert_eq!(
            queues.drain(),
            vec![
                Release::Program(5),
                Release::Shader(1),
                Release::Shader(2),
                Release::Buffer(3),
                Release::VertexArray(4),
            ],
        );
        assert!(queues.drain().is_empty());
    }

    #[test]
    fn live_handles_are_not_released() {
        let queues = Queues::default();
        let buffer = Buffer::new(3, Kind::Array, Usage::StaticDraw, queues.buffer.tx());
        let program = Program::new(5, queues.program.tx());
        assert!(queues.drain().is_empty());
        drop(program);
        assert_eq!(queues.drain(), vec![Release::Program(5)]);
        drop(buffer);
        assert_eq!(queues.drain(), vec![Release::Buffer(3)]);
    }

    #[test]
    fn accessor_keeps_buffer_alive() {
        let queues = Queues::default();
        let mut buffer = Buffer::new(3, Kind::Array, Usage::StaticDraw, queues.buffer.tx());
        buffer.set_size(24);
        let mut builder = Builder::new();
        builder.attributes.insert(0, Accessor::new(buffer.clone(), buffer::Format::F32(2), 0, 8));
        let vertex_array = VertexArray::new(4, builder, queues.vertex_array.tx());
        drop(buffer);
        assert!(queues.drain().is_empty());
        drop(vertex_array);
        assert_eq!(queues.drain(), vec![Release::Buffer(3), Release::VertexArray(4)]);
    }
}
