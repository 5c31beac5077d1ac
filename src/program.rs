//! GLSL programs.

use arrayvec::ArrayVec;
use queue;
use std::{cmp, fmt, hash, ops, sync};

/// Specifies the maximum number of uniforms an invocation may set.
pub const MAX_UNIFORMS: usize = 4;

/// Location of a uniform in a linked program.
pub type UniformLocation = i32;

/// Specifies whether the destroyed item was an object or a program.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Destroyed {
    /// A shader object.
    Object(u32),

    /// A compiled and linked program.
    Program(u32),
}

/// Pushes the program ID onto the factory program queue when
/// destroyed.
struct Destructor {
    id: u32,
    tx: queue::Sender<Destroyed>,
}

impl ops::Drop for Destructor {
    fn drop(&mut self) {
        if self.tx.try_send(Destroyed::Program(self.id)).is_err() {
            warn!("program {} leaked: destruction queue unavailable", self.id);
        }
    }
}

/// A uniform value set on the host before a draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Uniform {
    /// Corresponds to `glUniform3f`.
    Vec3([f32; 3]),
}

/// An invocation of a shader program.
#[derive(Clone, Debug)]
pub struct Invocation<'a> {
    /// The program to bind at draw time.
    pub program: &'a Program,

    /// Uniform values to upload after binding the program.
    pub uniforms: ArrayVec<(UniformLocation, Uniform), MAX_UNIFORMS>,
}

impl<'a> Invocation<'a> {
    /// Constructor.
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            uniforms: ArrayVec::new(),
        }
    }
}

/// A linked shader program.
#[derive(Clone)]
pub struct Program {
    /// The OpenGL program ID.
    id: u32,

    /// Returns the program back to the factory upon destruction.
    _destructor: sync::Arc<Destructor>,
}

impl Program {
    /// Constructor.
    pub(crate) fn new(
        id: u32,
        tx: queue::Sender<Destroyed>,
    ) -> Self {
        Self {
            id,
            _destructor: sync::Arc::new(Destructor { id, tx }),
        }
    }

    /// Returns the GLSL program ID.
    pub(crate) fn id(&self) -> u32 {
        self.id
    }
}

impl cmp::Eq for Program {}

impl cmp::PartialEq<Self> for Program {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[derive(Debug)]
        struct Program(u32);

        Program(self.id).fmt(f)
    }
}

impl hash::Hash for Program {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}
