//! Quad shader program

use glow::HasContext;

use crate::render::DeviceError;

const VERTEX_SOURCE: &str = include_str!("../../../resources/shaders/gui.vert");
const FRAGMENT_SOURCE: &str = include_str!("../../../resources/shaders/gui.frag");

/// Linked quad program and its uniform locations
pub(super) struct QuadProgram {
    pub program: glow::Program,
    pub screen_position: Option<glow::UniformLocation>,
    pub size: Option<glow::UniformLocation>,
    pub uv: Option<glow::UniformLocation>,
    pub image: Option<glow::UniformLocation>,
}

impl QuadProgram {
    pub fn new(gl: &glow::Context) -> Result<Self, DeviceError> {
        let program = link(gl, VERTEX_SOURCE, FRAGMENT_SOURCE)?;
        unsafe {
            Ok(Self {
                screen_position: gl.get_uniform_location(program, "screenPosition"),
                size: gl.get_uniform_location(program, "size"),
                uv: gl.get_uniform_location(program, "uv"),
                image: gl.get_uniform_location(program, "image"),
                program,
            })
        }
    }
}

fn compile(gl: &glow::Context, kind: u32, source: &str, label: &str) -> Result<glow::Shader, DeviceError> {
    unsafe {
        let shader = gl
            .create_shader(kind)
            .map_err(|e| DeviceError::Shader(format!("{label}: {e}")))?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(DeviceError::Shader(format!("{label} failed to compile: {log}")));
        }
        Ok(shader)
    }
}

fn link(gl: &glow::Context, vertex: &str, fragment: &str) -> Result<glow::Program, DeviceError> {
    let vertex = compile(gl, glow::VERTEX_SHADER, vertex, "vertex shader")?;
    let fragment = match compile(gl, glow::FRAGMENT_SHADER, fragment, "fragment shader") {
        Ok(shader) => shader,
        Err(e) => {
            unsafe { gl.delete_shader(vertex) };
            return Err(e);
        }
    };

    unsafe {
        let program = gl.create_program().map_err(DeviceError::Shader)?;
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        let linked = gl.get_program_link_status(program);

        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        if !linked {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(DeviceError::Shader(format!("program failed to link: {log}")));
        }
        Ok(program)
    }
}
