extern crate gl_generator;

use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};
use std::{env, fs, io, path};

/// The shaders are written against GLSL 1.50, i.e. OpenGL 3.2 core.
const GL_VERSION: (u8, u8) = (3, 2);

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=build.rs");
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let path = path::Path::new(&out_dir).join("gl.rs");
    let mut file = fs::File::create(path)?;
    Registry::new(Api::Gl, GL_VERSION, Profile::Core, Fallbacks::All, [])
        .write_bindings(StructGenerator, &mut file)
}
