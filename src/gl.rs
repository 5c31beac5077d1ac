use std::{cell, ffi, ptr, rc};

// Import OpenGL bindings.
include!(concat!(env!("OUT_DIR"), "/gl.rs"));

/// Maximum number of bytes read back from shader and program info logs.
const MAX_INFO_LOG_LEN: usize = 512;

#[derive(Clone)]
pub struct Backend {
    gl: rc::Rc<Gl>,

    /// The first error code observed since the last call to `take_error`.
    latched_error: rc::Rc<cell::Cell<u32>>,
}

impl Backend {
    /// Constructor.
    pub fn load<F>(mut func: F) -> Self
        where F: FnMut(&str) -> *const ()
    {
        let gl = rc::Rc::new(Gl::load_with(|sym| func(sym) as *const _));
        let latched_error = rc::Rc::new(cell::Cell::new(NO_ERROR));
        Backend { gl, latched_error }
    }

    // Error checking

    /// Corresponds to `glGetError` plus an error check.
    ///
    /// The first error seen is latched until `take_error` is called.
    pub fn check_error(&self) {
        let error = unsafe { self.gl.GetError() };
        if error != NO_ERROR {
            debug!(target: "gl", "0x{:x}", error);
            if self.latched_error.get() == NO_ERROR {
                self.latched_error.set(error);
            }
        }
    }

    /// Returns the latched error code, if any, and resets the latch.
    pub fn take_error(&self) -> Option<u32> {
        self.check_error();
        match self.latched_error.replace(NO_ERROR) {
            NO_ERROR => None,
            code => Some(code),
        }
    }

    // Context queries

    /// Corresponds to `glGetString`.
    pub fn get_string(&self, name: u32) -> String {
        let string = unsafe {
            trace!(target: "gl", "glGetString{:?}", (name,));
            let ptr = self.gl.GetString(name);
            if ptr.is_null() {
                String::new()
            } else {
                ffi::CStr::from_ptr(ptr as *const _).to_string_lossy().into_owned()
            }
        };
        self.check_error();
        string
    }

    // Pipeline state operations

    /// Corresponds to `glClear`.
    pub fn clear(&self, ops: u32) {
        trace!(target: "gl", "glClear{:?}", (ops,));
        unsafe {
            self.gl.Clear(ops);
        }
        self.check_error();
    }

    /// Corresponds to `glClearColor`.
    pub fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        trace!(target: "gl", "glClearColor{:?}", (r, g, b, a));
        unsafe {
            self.gl.ClearColor(r, g, b, a);
        }
        self.check_error();
    }

    /// Corresponds to `glViewport`.
    pub fn viewport(&self, x: u32, y: u32, w: u32, h: u32) {
        trace!(target: "gl", "glViewport{:?}", (x, y, w, h));
        unsafe {
            self.gl.Viewport(x as _, y as _, w as _, h as _);
        }
        self.check_error();
    }

    /// Corresponds to `glBindFramebuffer`.
    pub fn bind_framebuffer(&self, id: u32) {
        trace!(target: "gl", "glBindFramebuffer{:?} ", (FRAMEBUFFER, id));
        unsafe {
            self.gl.BindFramebuffer(FRAMEBUFFER, id);
        }
        self.check_error();
    }

    // Buffer operations

    /// Corresponds to `glGenBuffers(1)`.
    pub fn gen_buffer(&self) -> u32 {
        let mut id: u32 = 0;
        unsafe {
            trace!(target: "gl", "glGenBuffers(1) ");
            self.gl.GenBuffers(1, &mut id as *mut _)
        };
        trace!(target: "gl", " => {}", id);
        self.check_error();
        id
    }

    /// Corresponds to `glBindBuffer`.
    pub fn bind_buffer(&self, id: u32, ty: u32) {
        unsafe {
            trace!(target: "gl", "glBindBuffer{:?}", (ty, id));
            self.gl.BindBuffer(ty, id);
        }
        self.check_error();
    }

    /// Corresponds to `glBufferData`.
    pub fn buffer_data<T>(&self, ty: u32, len: usize, ptr: *const T, usage: u32) {
        unsafe {
            trace!(target: "gl", "glBufferData{:?}", (ty, len, ptr, usage));
            self.gl.BufferData(ty, len as _, ptr as *const _, usage);
        }
        self.check_error();
    }

    /// Corresponds to `glDeleteBuffers(1)`.
    pub fn delete_buffer(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glDeleteBuffers(1, {})", id);
            self.gl.DeleteBuffers(1, &id as *const _);
        }
        self.check_error();
    }

    // Vertex array operations

    /// Corresponds to `glGenVertexArrays(1)`.
    pub fn gen_vertex_array(&self) -> u32 {
        let mut id: u32 = 0;
        unsafe {
            trace!(target: "gl", "glGenVertexArrays(1) ");
            self.gl.GenVertexArrays(1, &mut id as *mut _);
            trace!(target: "gl", "=> {}", id);
        }
        self.check_error();
        id
    }

    /// Corresponds to `glBindVertexArray`.
    pub fn bind_vertex_array(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glBindVertexArray{:?}", (id,));
            self.gl.BindVertexArray(id);
        }
        self.check_error();
    }

    /// Corresponds to `glDeleteVertexArrays(1)`.
    pub fn delete_vertex_array(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glDeleteVertexArrays(1, {})", id);
            self.gl.DeleteVertexArrays(1, &id as *const _);
        }
        self.check_error();
    }

    /// Corresponds to `glVertexAttribPointer`.
    pub fn vertex_attrib_pointer(&self, id: u8, sz: i32, ty: u32, norm: bool, stride: i32, off: usize) {
        unsafe {
            trace!(target: "gl", "glVertexAttribPointer{:?}", (id, sz, ty, norm, stride, off));
            self.gl.VertexAttribPointer(id as _, sz as _, ty, if norm { TRUE } else { FALSE }, stride as _, off as *const _);
        }
        self.check_error();
    }

    /// Corresponds to `glEnableVertexAttribArray`.
    pub fn enable_vertex_attrib_array(&self, idx: u8) {
        unsafe {
            trace!(target: "gl", "glEnableVertexAttribArray{:?}", (idx,));
            self.gl.EnableVertexAttribArray(idx as _);
        }
        self.check_error();
    }

    // Shader operations

    /// Corresponds to `glCreateShader`.
    pub fn create_shader(&self, ty: u32) -> u32 {
        let id = unsafe {
            trace!(target: "gl", "glCreateShader{:?} ", (ty,));
            self.gl.CreateShader(ty)
        };
        trace!(target: "gl", "=> {}", id);
        self.check_error();
        id
    }

    /// Corresponds to `glShaderSource`.
    pub fn shader_source(&self, id: u32, source: &ffi::CStr) {
        unsafe {
            trace!(target: "gl", "glShaderSource{:?}", (id, source));
            let ptr = source.as_ptr() as *const _;
            self.gl.ShaderSource(id, 1, &ptr as *const _, ptr::null());
        }
        self.check_error();
    }

    /// Corresponds to `glCompileShader` plus a `GL_COMPILE_STATUS` query.
    ///
    /// Returns `true` if compilation succeeded.
    pub fn compile_shader(&self, id: u32) -> bool {
        let mut status = 0i32;
        unsafe {
            trace!(target: "gl", "glCompileShader{:?}", (id,));
            self.gl.CompileShader(id);
            self.check_error();
            trace!(target: "gl", "glGetShaderiv{:?} ", (id, COMPILE_STATUS));
            self.gl.GetShaderiv(id, COMPILE_STATUS, &mut status as *mut _);
            trace!(target: "gl", "=> {}", status);
        }
        self.check_error();
        status != 0
    }

    /// Corresponds to `glGetShaderInfoLog`.
    pub fn get_shader_info_log(&self, id: u32) -> String {
        let mut buffer = vec![0u8; MAX_INFO_LOG_LEN];
        let mut len = 0i32;
        unsafe {
            trace!(target: "gl", "glGetShaderInfoLog{:?}", (id, MAX_INFO_LOG_LEN));
            self.gl.GetShaderInfoLog(
                id,
                MAX_INFO_LOG_LEN as _,
                &mut len as *mut _,
                buffer.as_mut_ptr() as *mut _,
            );
        }
        self.check_error();
        buffer.truncate(len.max(0) as usize);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Corresponds to `glDeleteShader`.
    pub fn delete_shader(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glDeleteShader{:?}", (id,));
            self.gl.DeleteShader(id);
        }
        self.check_error();
    }

    // Program operations

    /// Corresponds to `glCreateProgram`.
    pub fn create_program(&self) -> u32 {
        let id = unsafe {
            trace!(target: "gl", "glCreateProgram() ");
            self.gl.CreateProgram()
        };
        trace!(target: "gl", "=> {}", id);
        self.check_error();
        id
    }

    /// Corresponds to `glAttachShader`.
    pub fn attach_shader(&self, program: u32, shader: u32) {
        unsafe {
            trace!(target: "gl", "glAttachShader{:?}", (program, shader));
            self.gl.AttachShader(program, shader);
        }
        self.check_error();
    }

    /// Corresponds to `glLinkProgram` plus a `GL_LINK_STATUS` query.
    ///
    /// Returns `true` if linking succeeded.
    pub fn link_program(&self, id: u32) -> bool {
        let mut status = 0i32;
        unsafe {
            trace!(target: "gl", "glLinkProgram{:?}", (id,));
            self.gl.LinkProgram(id);
            self.check_error();
            trace!(target: "gl", "glGetProgramiv{:?} ", (id, LINK_STATUS));
            self.gl.GetProgramiv(id, LINK_STATUS, &mut status as *mut _);
            trace!(target: "gl", "=> {}", status);
        }
        self.check_error();
        status != 0
    }

    /// Corresponds to `glGetProgramInfoLog`.
    pub fn get_program_info_log(&self, id: u32) -> String {
        let mut buffer = vec![0u8; MAX_INFO_LOG_LEN];
        let mut len = 0i32;
        unsafe {
            trace!(target: "gl", "glGetProgramInfoLog{:?}", (id, MAX_INFO_LOG_LEN));
            self.gl.GetProgramInfoLog(
                id,
                MAX_INFO_LOG_LEN as _,
                &mut len as *mut _,
                buffer.as_mut_ptr() as *mut _,
            );
        }
        self.check_error();
        buffer.truncate(len.max(0) as usize);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Corresponds to `glUseProgram`.
    pub fn use_program(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glUseProgram{:?}", (id,));
            self.gl.UseProgram(id);
        }
        self.check_error();
    }

    /// Corresponds to `glDeleteProgram`.
    pub fn delete_program(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glDeleteProgram{:?}", (id,));
            self.gl.DeleteProgram(id);
        }
        self.check_error();
    }

    /// Corresponds to `glGetAttribLocation`.
    pub fn get_attrib_location(
        &self,
        id: u32,
        name: &ffi::CStr,
    ) -> i32 {
        let location;
        unsafe {
            trace!(target: "gl", "glGetAttribLocation{:?} ", (id, name));
            location = self.gl.GetAttribLocation(id, name.as_ptr() as _);
            trace!(target: "gl", "=> {}", location);
        }
        self.check_error();
        location
    }

    /// Corresponds to `glGetUniformLocation`.
    pub fn get_uniform_location(
        &self,
        id: u32,
        name: &ffi::CStr,
    ) -> i32 {
        let location;
        unsafe {
            trace!(target: "gl", "glGetUniformLocation{:?} ", (id, name));
            location = self.gl.GetUniformLocation(id, name.as_ptr() as _);
            trace!(target: "gl", "=> {}", location);
        }
        self.check_error();
        location
    }

    /// Corresponds to `glUniform3f`.
    pub fn uniform3f(&self, location: i32, x: f32, y: f32, z: f32) {
        unsafe {
            trace!(target: "gl", "glUniform3f{:?}", (location, x, y, z));
            self.gl.Uniform3f(location, x, y, z);
        }
        self.check_error();
    }

    // Draw call operations

    /// Corresponds to `glDrawArrays`.
    pub fn draw_arrays(&self, mode: u32, offset: usize, count: usize) {
        unsafe {
            trace!(target: "gl", "glDrawArrays{:?}", (mode, offset, count));
            self.gl.DrawArrays(mode, offset as _, count as _);
        }
        self.check_error();
    }
}
