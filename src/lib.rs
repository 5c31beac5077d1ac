//! Draws a single triangle through a thin layer over OpenGL.

extern crate arrayvec;
extern crate crossbeam_channel;
extern crate glutin;
#[macro_use] extern crate log;
extern crate vec_map;

#[macro_use]
mod macros;

mod factory;
mod queue;
pub mod gl;

pub mod animation;
pub mod app;
pub mod buffer;
pub mod config;
pub mod draw_call;
pub mod error;
pub mod framebuffer;
pub mod program;
pub mod scene;
pub mod shader;
pub mod vertex;
pub mod vertex_array;
pub mod window;

/// Initialize the library, creating the default framebuffer to render to and
/// a factory to instantiate library objects.
///
/// The OpenGL context must be current on the calling thread.
pub fn init<F>(width: u32, height: u32, query_proc_address: F) -> (Framebuffer, Factory)
    where F: FnMut(&str) -> *const ()
{
    let factory = Factory::new(query_proc_address);
    let framebuffer = Framebuffer::implicit(width, height);
    (framebuffer, factory)
}

#[doc(inline)]
pub use app::run;

#[doc(inline)]
pub use buffer::Accessor;

#[doc(inline)]
pub use buffer::Buffer;

#[doc(inline)]
pub use config::Config;

#[doc(inline)]
pub use draw_call::DrawCall;

#[doc(inline)]
pub use draw_call::Primitive;

#[doc(inline)]
pub use error::Error;

#[doc(inline)]
pub use factory::Factory;

#[doc(inline)]
pub use framebuffer::Framebuffer;

#[doc(inline)]
pub use program::Invocation;

#[doc(inline)]
pub use program::Program;

#[doc(inline)]
pub use scene::Scene;

#[doc(inline)]
pub use vertex_array::VertexArray;
