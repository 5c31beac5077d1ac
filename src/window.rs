//! Window and OpenGL context creation.

use config::Config;
use error::Error;
use glutin;
use glutin::dpi::LogicalSize;
use glutin::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::platform::run_return::EventLoopExtRunReturn;

/// A fixed-size window with a current OpenGL core context.
pub struct Window {
    event_loop: EventLoop<()>,
    context: glutin::WindowedContext<glutin::PossiblyCurrent>,
    should_close: bool,
}

/// Returns true if the event asks for the window to close.
fn closes(event: &WindowEvent) -> bool {
    match *event {
        WindowEvent::CloseRequested => true,
        WindowEvent::KeyboardInput {
            input: KeyboardInput {
                virtual_keycode: Some(VirtualKeyCode::Escape),
                state: ElementState::Pressed,
                ..
            },
            ..
        } => true,
        _ => false,
    }
}

impl Window {
    /// Opens the window and makes its context current on this thread.
    pub fn open(config: &Config) -> Result<Self, Error> {
        let event_loop = EventLoop::new();
        let window_builder = glutin::window::WindowBuilder::new()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(false);
        let context = glutin::ContextBuilder::new()
            .with_gl(glutin::GlRequest::Specific(glutin::Api::OpenGl, config.gl_version))
            .with_gl_profile(glutin::GlProfile::Core)
            .with_vsync(config.vsync)
            .build_windowed(window_builder, &event_loop)?;
        let context = unsafe { context.make_current().map_err(|(_, err)| err)? };
        Ok(Window {
            event_loop,
            context,
            should_close: false,
        })
    }

    /// Looks up an OpenGL entry point in the current context.
    pub fn get_proc_address(&self, symbol: &str) -> *const () {
        self.context.get_proc_address(symbol) as *const ()
    }

    /// Presents the back buffer.
    pub fn swap_buffers(&self) -> Result<(), Error> {
        self.context.swap_buffers()?;
        Ok(())
    }

    /// Returns true once the user has asked for the window to close.
    pub fn should_close(&self) -> bool {
        self.should_close
    }

    /// Processes pending events without blocking.
    pub fn poll_events(&mut self) {
        let mut should_close = self.should_close;
        self.event_loop.run_return(|event, _, control_flow| {
            *control_flow = ControlFlow::Poll;
            match event {
                Event::WindowEvent { ref event, .. } if closes(event) => should_close = true,
                Event::MainEventsCleared => *control_flow = ControlFlow::Exit,
                _ => {}
            }
        });
        if should_close && !self.should_close {
            debug!("window close requested");
        }
        self.should_close = should_close;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glutin::event::{DeviceId, ModifiersState};

    #[allow(deprecated)]
    fn key(keycode: VirtualKeyCode, state: ElementState) -> WindowEvent<'static> {
        WindowEvent::KeyboardInput {
            device_id: unsafe { DeviceId::dummy() },
            input: KeyboardInput {
                scancode: 0,
                state,
                virtual_keycode: Some(keycode),
                modifiers: ModifiersState::empty(),
            },
            is_synthetic: false,
        }
    }

    #[test]
    fn escape_press_closes() {
        assert!(closes(&key(VirtualKeyCode::Escape, ElementState::Pressed)));
    }

    #[test]
    fn escape_release_does_not_close() {
        assert!(!closes(&key(VirtualKeyCode::Escape, ElementState::Released)));
    }

    #[test]
    fn close_request_closes() {
        assert!(closes(&WindowEvent::CloseRequested));
    }

    #[test]
    fn other_keys_and_events_do_not_close() {
        assert!(!closes(&key(VirtualKeyCode::Space, ElementState::Pressed)));
        assert!(!closes(&WindowEvent::Focused(true)));
    }
}
