use std::ffi::{CStr, c_char, c_void};
use std::num::NonZero;

use anyhow::{Context as _, anyhow};

use crate::adapter::Adapter;
use crate::enums::*;
use crate::libgl;
use crate::types::*;

pub struct Api {
    api: libgl::Api,
}

impl Api {
    /// # Safety
    ///
    /// a gl context must be current on the calling thread and `get_proc_address` must belong to
    /// it.
    pub unsafe fn load_with<F>(get_proc_address: F) -> Self
    where
        F: FnMut(&CStr) -> *const c_void,
    {
        Self {
            api: unsafe { libgl::Api::load_with(get_proc_address) },
        }
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.api.is_loaded(name)
    }

    #[inline]
    fn check(&self, call: &'static str) {
        if cfg!(all(feature = "debug", debug_assertions)) {
            let code = unsafe { self.api.GetError() };
            if code != NO_ERROR {
                log::error!("{call}: {} ({code:#x})", error_name(code));
            }
        }
    }

    unsafe fn get_info_log(
        &self,
        len: GLint,
        read: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar),
    ) -> String {
        if len <= 0 {
            return String::new();
        }
        let mut info_log = vec![0u8; len as usize];
        let mut written: GLsizei = 0;
        read(len, &mut written, info_log.as_mut_ptr() as *mut GLchar);
        info_log.truncate(written.clamp(0, len) as usize);
        String::from_utf8_lossy(&info_log).into_owned()
    }

    unsafe fn object_label(&self, identifier: GLenum, name: GLuint, label: &str) {
        unsafe {
            self.api.ObjectLabel(
                identifier,
                name,
                label.len() as GLsizei,
                label.as_ptr() as *const GLchar,
            )
        };
        self.check("glObjectLabel");
    }
}

fn string_from_ptr(ptr: *const GLubyte, what: &str) -> anyhow::Result<String> {
    if ptr.is_null() {
        return Err(anyhow!("could not get string ({what})"));
    }
    unsafe { CStr::from_ptr(ptr as *const c_char) }
        .to_str()
        .context("invalid string")
        .map(|str| str.to_string())
}

impl Adapter for Api {
    type Buffer = NonZero<GLuint>;
    type Program = NonZero<GLuint>;
    type Shader = NonZero<GLuint>;
    type VertexArray = NonZero<GLuint>;

    #[inline]
    unsafe fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.api.AttachShader(program.get(), shader.get()) };
        self.check("glAttachShader");
    }

    #[inline]
    unsafe fn bind_buffer_base(&self, target: GLenum, index: GLuint, buffer: Option<Self::Buffer>) {
        unsafe {
            self.api
                .BindBufferBase(target, index, buffer.map_or(0, |v| v.get()))
        };
        self.check("glBindBufferBase");
    }

    #[inline]
    unsafe fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>) {
        unsafe { self.api.BindVertexArray(vertex_array.map_or(0, |v| v.get())) };
        self.check("glBindVertexArray");
    }

    #[inline]
    unsafe fn clear(&self, mask: GLbitfield) {
        unsafe { self.api.Clear(mask) };
        self.check("glClear");
    }

    #[inline]
    unsafe fn clear_color(&self, red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat) {
        unsafe { self.api.ClearColor(red, green, blue, alpha) };
        self.check("glClearColor");
    }

    #[inline]
    unsafe fn create_buffer(&self) -> anyhow::Result<Self::Buffer> {
        let mut buffer: GLuint = 0;
        unsafe { self.api.CreateBuffers(1, &mut buffer) };
        NonZero::new(buffer).context("could not create buffer")
    }

    #[inline]
    unsafe fn create_program(&self) -> anyhow::Result<Self::Program> {
        let program = unsafe { self.api.CreateProgram() };
        NonZero::new(program).context("could not create program")
    }

    #[inline]
    unsafe fn create_shader(&self, r#type: GLenum) -> anyhow::Result<Self::Shader> {
        let shader = unsafe { self.api.CreateShader(r#type) };
        NonZero::new(shader).context("could not create shader")
    }

    #[inline]
    unsafe fn create_vertex_array(&self) -> anyhow::Result<Self::VertexArray> {
        let mut vertex_array: GLuint = 0;
        unsafe { self.api.CreateVertexArrays(1, &mut vertex_array) };
        NonZero::new(vertex_array).context("could not create vertex array")
    }

    #[inline]
    unsafe fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { self.api.DeleteBuffers(1, &buffer.get()) };
        self.check("glDeleteBuffers");
    }

    #[inline]
    unsafe fn delete_program(&self, program: Self::Program) {
        unsafe { self.api.DeleteProgram(program.get()) };
        self.check("glDeleteProgram");
    }

    #[inline]
    unsafe fn delete_shader(&self, shader: Self::Shader) {
        unsafe { self.api.DeleteShader(shader.get()) };
        self.check("glDeleteShader");
    }

    #[inline]
    unsafe fn delete_vertex_array(&self, vertex_array: Self::VertexArray) {
        unsafe { self.api.DeleteVertexArrays(1, &vertex_array.get()) };
        self.check("glDeleteVertexArrays");
    }

    #[inline]
    unsafe fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.api.DetachShader(program.get(), shader.get()) };
        self.check("glDetachShader");
    }

    #[inline]
    unsafe fn disable(&self, cap: GLenum) {
        unsafe { self.api.Disable(cap) };
        self.check("glDisable");
    }

    #[inline]
    unsafe fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
        unsafe { self.api.DrawArrays(mode, first, count) };
        self.check("glDrawArrays");
    }

    #[inline]
    unsafe fn enable(&self, cap: GLenum) {
        unsafe { self.api.Enable(cap) };
        self.check("glEnable");
    }

    #[inline]
    unsafe fn enable_vertex_array_attrib(&self, vertex_array: Self::VertexArray, index: GLuint) {
        unsafe { self.api.EnableVertexArrayAttrib(vertex_array.get(), index) };
        self.check("glEnableVertexArrayAttrib");
    }

    #[inline]
    unsafe fn get_integer(&self, pname: GLenum) -> GLint {
        let mut data: GLint = 0;
        unsafe { self.api.GetIntegerv(pname, &mut data) };
        data
    }

    #[inline]
    unsafe fn get_integer_v(&self, pname: GLenum, data: &mut [GLint]) {
        if data.is_empty() {
            return;
        }
        unsafe { self.api.GetIntegerv(pname, data.as_mut_ptr()) };
    }

    #[inline]
    unsafe fn get_program_info_log(&self, program: Self::Program) -> String {
        let len = unsafe { self.get_program_parameter(program, INFO_LOG_LENGTH) };
        unsafe {
            self.get_info_log(len, |buf_size, length, info_log| {
                self.api
                    .GetProgramInfoLog(program.get(), buf_size, length, info_log)
            })
        }
    }

    #[inline]
    unsafe fn get_program_parameter(&self, program: Self::Program, pname: GLenum) -> GLint {
        let mut param: GLint = 0;
        unsafe { self.api.GetProgramiv(program.get(), pname, &mut param) };
        param
    }

    #[inline]
    unsafe fn get_shader_info_log(&self, shader: Self::Shader) -> String {
        let len = unsafe { self.get_shader_parameter(shader, INFO_LOG_LENGTH) };
        unsafe {
            self.get_info_log(len, |buf_size, length, info_log| {
                self.api
                    .GetShaderInfoLog(shader.get(), buf_size, length, info_log)
            })
        }
    }

    #[inline]
    unsafe fn get_shader_parameter(&self, shader: Self::Shader, pname: GLenum) -> GLint {
        let mut param: GLint = 0;
        unsafe { self.api.GetShaderiv(shader.get(), pname, &mut param) };
        param
    }

    #[inline]
    unsafe fn get_string(&self, name: GLenum) -> anyhow::Result<String> {
        let ptr = unsafe { self.api.GetString(name) };
        string_from_ptr(ptr, &format!("name {name:#x}"))
    }

    #[inline]
    unsafe fn get_string_i(&self, name: GLenum, index: GLuint) -> anyhow::Result<String> {
        let ptr = unsafe { self.api.GetStringi(name, index) };
        string_from_ptr(ptr, &format!("name {name:#x}, index {index}"))
    }

    #[inline]
    unsafe fn label_buffer(&self, buffer: Self::Buffer, label: &str) {
        unsafe { self.object_label(BUFFER, buffer.get(), label) };
    }

    #[inline]
    unsafe fn label_program(&self, program: Self::Program, label: &str) {
        unsafe { self.object_label(PROGRAM, program.get(), label) };
    }

    #[inline]
    unsafe fn label_shader(&self, shader: Self::Shader, label: &str) {
        unsafe { self.object_label(SHADER, shader.get(), label) };
    }

    #[inline]
    unsafe fn label_vertex_array(&self, vertex_array: Self::VertexArray, label: &str) {
        unsafe { self.object_label(VERTEX_ARRAY, vertex_array.get(), label) };
    }

    #[inline]
    unsafe fn link_program(&self, program: Self::Program) {
        unsafe { self.api.LinkProgram(program.get()) };
        self.check("glLinkProgram");
    }

    #[inline]
    unsafe fn named_buffer_storage(&self, buffer: Self::Buffer, data: &[u8], flags: GLbitfield) {
        unsafe {
            self.api.NamedBufferStorage(
                buffer.get(),
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
                flags,
            )
        };
        self.check("glNamedBufferStorage");
    }

    #[inline]
    unsafe fn named_buffer_sub_data(&self, buffer: Self::Buffer, offset: GLintptr, data: &[u8]) {
        unsafe {
            self.api.NamedBufferSubData(
                buffer.get(),
                offset,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
            )
        };
        self.check("glNamedBufferSubData");
    }

    #[inline]
    unsafe fn polygon_mode(&self, face: GLenum, mode: GLenum) {
        unsafe { self.api.PolygonMode(face, mode) };
        self.check("glPolygonMode");
    }

    #[inline]
    unsafe fn shader_binary(&self, shader: Self::Shader, binary_format: GLenum, binary: &[u8]) {
        unsafe {
            self.api.ShaderBinary(
                1,
                &shader.get(),
                binary_format,
                binary.as_ptr() as *const c_void,
                binary.len() as GLsizei,
            )
        };
        self.check("glShaderBinary");
    }

    #[inline]
    unsafe fn specialize_shader(
        &self,
        shader: Self::Shader,
        entry_point: &CStr,
        constant_indices: &[GLuint],
        constant_values: &[GLuint],
    ) {
        assert_eq!(constant_indices.len(), constant_values.len());
        unsafe {
            self.api.SpecializeShader(
                shader.get(),
                entry_point.as_ptr(),
                constant_indices.len() as GLuint,
                constant_indices.as_ptr(),
                constant_values.as_ptr(),
            )
        };
        self.check("glSpecializeShader");
    }

    #[inline]
    unsafe fn use_program(&self, program: Option<Self::Program>) {
        unsafe { self.api.UseProgram(program.map_or(0, |v| v.get())) };
        self.check("glUseProgram");
    }

    #[inline]
    unsafe fn vertex_array_attrib_binding(
        &self,
        vertex_array: Self::VertexArray,
        attrib_index: GLuint,
        binding_index: GLuint,
    ) {
        unsafe {
            self.api
                .VertexArrayAttribBinding(vertex_array.get(), attrib_index, binding_index)
        };
        self.check("glVertexArrayAttribBinding");
    }

    #[inline]
    unsafe fn vertex_array_attrib_format(
        &self,
        vertex_array: Self::VertexArray,
        attrib_index: GLuint,
        size: GLint,
        r#type: GLenum,
        normalized: GLboolean,
        relative_offset: GLuint,
    ) {
        unsafe {
            self.api.VertexArrayAttribFormat(
                vertex_array.get(),
                attrib_index,
                size,
                r#type,
                normalized,
                relative_offset,
            )
        };
        self.check("glVertexArrayAttribFormat");
    }

    #[inline]
    unsafe fn vertex_array_vertex_buffer(
        &self,
        vertex_array: Self::VertexArray,
        binding_index: GLuint,
        buffer: Self::Buffer,
        offset: GLintptr,
        stride: GLsizei,
    ) {
        unsafe {
            self.api.VertexArrayVertexBuffer(
                vertex_array.get(),
                binding_index,
                buffer.get(),
                offset,
                stride,
            )
        };
        self.check("glVertexArrayVertexBuffer");
    }

    #[inline]
    unsafe fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        unsafe { self.api.Viewport(x, y, width, height) };
        self.check("glViewport");
    }
}
