//! GLSL shader compilation and program linking.

use std::fs;
use std::path::Path;

use glow::HasContext;

use crate::{Error, Result};

/// Compile a shader of the given stage (`glow::VERTEX_SHADER`,
/// `glow::FRAGMENT_SHADER`, ...) from source text.
///
/// On failure the shader object is deleted and the driver's info log is
/// returned in the error.
///
/// # Safety
///
/// `gl` must be current on the calling thread.
pub unsafe fn compile_shader(gl: &glow::Context, stage: u32, source: &str) -> Result<glow::Shader> {
    let shader = gl.create_shader(stage).map_err(Error::CreateResource)?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if gl.get_shader_compile_status(shader) {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        Err(Error::ShaderCompile { log })
    }
}

/// Read a shader source file and compile it via [`compile_shader`].
///
/// # Safety
///
/// `gl` must be current on the calling thread.
pub unsafe fn load_shader<P: AsRef<Path>>(
    gl: &glow::Context,
    path: P,
    stage: u32,
) -> Result<glow::Shader> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    compile_shader(gl, stage, &source)
}

/// Link a set of compiled shaders into a program.
///
/// On failure the program object is deleted and the driver's info log is
/// returned in the error. The shader objects stay alive either way and
/// remain the caller's to delete.
///
/// # Safety
///
/// `gl` must be current on the calling thread.
pub unsafe fn link_program(gl: &glow::Context, shaders: &[glow::Shader]) -> Result<glow::Program> {
    let program = gl.create_program().map_err(Error::CreateResource)?;
    for &shader in shaders {
        gl.attach_shader(program, shader);
    }
    gl.link_program(program);

    if gl.get_program_link_status(program) {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(program);
        gl.delete_program(program);
        Err(Error::ProgramLink { log })
    }
}
