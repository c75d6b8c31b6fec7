use web_sys::{WebGl2RenderingContext as GL, WebGlProgram, WebGlShader};

use crate::error::InitError;

/// Moves each particle along its velocity, snaps it to the opposite face of
/// the cube once it leaves, and scales the sprite with view depth.
pub const PARTICLE_VERT: &str = r#"#version 300 es
in vec3 position;
in vec3 velocity;
in float size;

uniform float time;
uniform float extent;
uniform float attenuation;
uniform mat4 modelViewMatrix;
uniform mat4 projectionMatrix;

void main() {
    vec3 pos = position + velocity * time;

    if (pos.x > extent) pos.x = -extent;
    if (pos.x < -extent) pos.x = extent;
    if (pos.y > extent) pos.y = -extent;
    if (pos.y < -extent) pos.y = extent;
    if (pos.z > extent) pos.z = -extent;
    if (pos.z < -extent) pos.z = extent;

    vec4 mvPosition = modelViewMatrix * vec4(pos, 1.0);
    gl_PointSize = size * (attenuation / -mvPosition.z);
    gl_Position = projectionMatrix * mvPosition;
}
"#;

/// Round sprite whose alpha falls from 0.5 at the center to 0 at the rim.
pub const PARTICLE_FRAG: &str = r#"#version 300 es
precision mediump float;

uniform vec3 color;
out vec4 fragColor;

void main() {
    float d = distance(gl_PointCoord, vec2(0.5));
    if (d > 0.5) discard;

    float alpha = 0.5 * (1.0 - d * 2.0);
    fragColor = vec4(color, alpha);
}
"#;

pub fn link_program(gl: &GL, vertex_src: &str, fragment_src: &str) -> Result<WebGlProgram, InitError> {
    let vertex_shader = compile_shader(gl, GL::VERTEX_SHADER, vertex_src)?;
    let fragment_shader = compile_shader(gl, GL::FRAGMENT_SHADER, fragment_src)?;
    let program = gl
        .create_program()
        .ok_or(InitError::Allocation("program"))?;
    gl.attach_shader(&program, &vertex_shader);
    gl.attach_shader(&program, &fragment_shader);
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);

    gl.detach_shader(&program, &vertex_shader);
    gl.detach_shader(&program, &fragment_shader);
    gl.delete_shader(Some(&vertex_shader));
    gl.delete_shader(Some(&fragment_shader));

    if linked {
        Ok(program)
    } else {
        let info = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown program error".to_string());
        gl.delete_program(Some(&program));
        Err(InitError::ProgramLink(info))
    }
}

fn compile_shader(gl: &GL, shader_type: u32, source: &str) -> Result<WebGlShader, InitError> {
    let shader = gl
        .create_shader(shader_type)
        .ok_or(InitError::Allocation("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let info = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown shader error".to_string());
        gl.delete_shader(Some(&shader));
        Err(InitError::ShaderCompile(info))
    }
}
