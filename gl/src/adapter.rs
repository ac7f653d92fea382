use std::ffi::CStr;
use std::fmt::Debug;

use crate::types::*;

/// the slice of opengl that the rest of the workspace talks to.
///
/// handles are associated types so that the native implementation can use non-zero object names
/// while tests can substitute a recording implementation.
pub trait Adapter {
    type Buffer: Copy + Debug + PartialEq;
    type Program: Copy + Debug + PartialEq;
    type Shader: Copy + Debug + PartialEq;
    type VertexArray: Copy + Debug + PartialEq;

    unsafe fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    unsafe fn bind_buffer_base(&self, target: GLenum, index: GLuint, buffer: Option<Self::Buffer>);
    unsafe fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);
    unsafe fn clear(&self, mask: GLbitfield);
    unsafe fn clear_color(&self, red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat);
    unsafe fn create_buffer(&self) -> anyhow::Result<Self::Buffer>;
    unsafe fn create_program(&self) -> anyhow::Result<Self::Program>;
    unsafe fn create_shader(&self, r#type: GLenum) -> anyhow::Result<Self::Shader>;
    unsafe fn create_vertex_array(&self) -> anyhow::Result<Self::VertexArray>;
    unsafe fn delete_buffer(&self, buffer: Self::Buffer);
    unsafe fn delete_program(&self, program: Self::Program);
    unsafe fn delete_shader(&self, shader: Self::Shader);
    unsafe fn delete_vertex_array(&self, vertex_array: Self::VertexArray);
    unsafe fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    unsafe fn disable(&self, cap: GLenum);
    unsafe fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei);
    unsafe fn enable(&self, cap: GLenum);
    unsafe fn enable_vertex_array_attrib(&self, vertex_array: Self::VertexArray, index: GLuint);
    unsafe fn get_integer(&self, pname: GLenum) -> GLint;
    unsafe fn get_integer_v(&self, pname: GLenum, data: &mut [GLint]);
    unsafe fn get_program_info_log(&self, program: Self::Program) -> String;
    unsafe fn get_program_parameter(&self, program: Self::Program, pname: GLenum) -> GLint;
    unsafe fn get_shader_info_log(&self, shader: Self::Shader) -> String;
    unsafe fn get_shader_parameter(&self, shader: Self::Shader, pname: GLenum) -> GLint;
    unsafe fn get_string(&self, name: GLenum) -> anyhow::Result<String>;
    unsafe fn get_string_i(&self, name: GLenum, index: GLuint) -> anyhow::Result<String>;
    unsafe fn label_buffer(&self, buffer: Self::Buffer, label: &str);
    unsafe fn label_program(&self, program: Self::Program, label: &str);
    unsafe fn label_shader(&self, shader: Self::Shader, label: &str);
    unsafe fn label_vertex_array(&self, vertex_array: Self::VertexArray, label: &str);
    unsafe fn link_program(&self, program: Self::Program);
    unsafe fn named_buffer_storage(&self, buffer: Self::Buffer, data: &[u8], flags: GLbitfield);
    unsafe fn named_buffer_sub_data(&self, buffer: Self::Buffer, offset: GLintptr, data: &[u8]);
    unsafe fn polygon_mode(&self, face: GLenum, mode: GLenum);
    unsafe fn shader_binary(&self, shader: Self::Shader, binary_format: GLenum, binary: &[u8]);
    unsafe fn specialize_shader(
        &self,
        shader: Self::Shader,
        entry_point: &CStr,
        constant_indices: &[GLuint],
        constant_values: &[GLuint],
    );
    unsafe fn use_program(&self, program: Option<Self::Program>);
    unsafe fn vertex_array_attrib_binding(
        &self,
        vertex_array: Self::VertexArray,
        attrib_index: GLuint,
        binding_index: GLuint,
    );
    unsafe fn vertex_array_attrib_format(
        &self,
        vertex_array: Self::VertexArray,
        attrib_index: GLuint,
        size: GLint,
        r#type: GLenum,
        normalized: GLboolean,
        relative_offset: GLuint,
    );
    unsafe fn vertex_array_vertex_buffer(
        &self,
        vertex_array: Self::VertexArray,
        binding_index: GLuint,
        buffer: Self::Buffer,
        offset: GLintptr,
        stride: GLsizei,
    );
    unsafe fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei);
}
