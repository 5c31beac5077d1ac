//! Setup, render loop and teardown.

use animation::{self, Clock};
use buffer;
use config::Config;
use draw_call::DrawCall;
use error::Error;
use framebuffer::{ClearOp, Framebuffer};
use program::{Invocation, Uniform, UniformLocation};
use scene::Scene;
use shader;
use std::ffi;
use vertex;
use window::Window;
use {Buffer, Factory, Program, VertexArray};

/// Everything created during setup, owned for the lifetime of the loop.
struct Context {
    window: Window,
    framebuffer: Framebuffer,
    factory: Factory,
    vertex_array: VertexArray,
    buffer: Buffer,
    vertex_shader: shader::Object,
    fragment_shader: shader::Object,
    program: Program,
    triangle_color: Option<UniformLocation>,
    draw_call: DrawCall,
    clear: ClearOp,
}

/// Opens the window, renders `scene` until the window is closed, and
/// releases every GL object before the context goes away.
pub fn run(scene: Scene, config: &Config) -> Result<(), Error> {
    let window = Window::open(config)?;
    let (framebuffer, factory) = ::init(config.width, config.height, |sym| {
        window.get_proc_address(sym)
    });
    info!("OpenGL {}", factory.version());
    Context::new(scene, config, window, framebuffer, factory)?.render();
    Ok(())
}

/// Logs a failed buffer swap; returns whether rendering may continue.
fn presented(result: Result<(), Error>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            error!("failed to present frame: {}", err);
            false
        }
    }
}

impl Context {
    fn new(
        scene: Scene,
        config: &Config,
        window: Window,
        framebuffer: Framebuffer,
        factory: Factory,
    ) -> Result<Self, Error> {
        let mut buffer = factory.buffer(buffer::Kind::Array, buffer::Usage::StaticDraw);
        match scene {
            Scene::Breathe => factory.initialize_buffer(&mut buffer, &vertex::TRIANGLE),
            Scene::Colored => factory.initialize_buffer(&mut buffer, &vertex::COLORED_TRIANGLE),
        }
        debug!(
            "uploaded {} vertices of {} bytes",
            scene.vertex_count(),
            scene.stride(),
        );

        let vertex_source = shader::Source::new(scene.vertex_source())?;
        let fragment_source = shader::Source::new(scene.fragment_source())?;
        let vertex_shader = factory.shader(shader::Kind::Vertex, &vertex_source);
        let fragment_shader = factory.shader(shader::Kind::Fragment, &fragment_source);
        let program = factory.program(&vertex_shader, &fragment_shader);

        let layout = match scene {
            Scene::Breathe => factory.vertex_layout::<vertex::Position>(&program, &buffer),
            Scene::Colored => factory.vertex_layout::<vertex::ColoredVertex>(&program, &buffer),
        };
        let vertex_array = factory.vertex_array(layout);

        let triangle_color = match scene.color_uniform() {
            Some(name) => {
                let name = ffi::CStr::from_bytes_with_nul(name)?;
                let location = factory.query_uniform_location(&program, name);
                if location.is_none() {
                    warn!("uniform {:?} is inactive", name);
                }
                location
            }
            None => None,
        };

        factory.check_error();

        Ok(Context {
            window,
            framebuffer,
            factory,
            vertex_array,
            buffer,
            vertex_shader,
            fragment_shader,
            program,
            triangle_color,
            draw_call: scene.draw_call(),
            clear: ClearOp { color: config.clear_color },
        })
    }

    fn render(mut self) {
        let clock = Clock::start();
        while !self.window.should_close() {
            self.factory.clear(&self.framebuffer, self.clear);

            let mut invocation = Invocation::new(&self.program);
            if let Some(location) = self.triangle_color {
                let red = animation::breathe(clock.elapsed(), animation::BREATHE_MULTIPLIER);
                invocation.uniforms.push((location, Uniform::Vec3([red, 0.0, 0.0])));
            }
            self.factory.draw(
                &self.framebuffer,
                &self.vertex_array,
                &self.draw_call,
                &invocation,
            );

            if !presented(self.window.swap_buffers()) {
                break;
            }
            self.window.poll_events();
        }
        self.teardown();
    }

    fn teardown(self) {
        let Context {
            window,
            factory,
            vertex_array,
            buffer,
            vertex_shader,
            fragment_shader,
            program,
            ..
        } = self;
        drop(program);
        drop(fragment_shader);
        drop(vertex_shader);
        drop(buffer);
        drop(vertex_array);
        let released = factory.collect_garbage();
        info!("released {} GL objects", released);
        drop(window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glutin;

    #[test]
    fn successful_swap_keeps_rendering() {
        assert!(presented(Ok(())));
    }

    #[test]
    fn failed_swap_stops_the_loop_instead_of_failing() {
        let lost = Error::Context(glutin::ContextError::ContextLost);
        assert!(!presented(Err(lost)));
    }
}
