use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ffi::CStr;

use gl::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Buffer,
    Program,
    Shader,
    VertexArray,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    AttachShader(u32, u32),
    BindBufferBase(GLenum, GLuint, Option<u32>),
    BindVertexArray(Option<u32>),
    Clear(GLbitfield),
    ClearColor([GLfloat; 4]),
    Create(Kind, u32),
    CreateShader(GLenum, u32),
    Delete(Kind, u32),
    DetachShader(u32, u32),
    Disable(GLenum),
    DrawArrays(GLenum, GLint, GLsizei),
    Enable(GLenum),
    EnableVertexArrayAttrib(u32, GLuint),
    Label(Kind, u32, String),
    LinkProgram(u32),
    NamedBufferStorage {
        buffer: u32,
        data: Vec<u8>,
        flags: GLbitfield,
    },
    NamedBufferSubData {
        buffer: u32,
        offset: GLintptr,
        data: Vec<u8>,
    },
    PolygonMode(GLenum, GLenum),
    ShaderBinary {
        shader: u32,
        format: GLenum,
        len: usize,
    },
    SpecializeShader {
        shader: u32,
        entry_point: String,
    },
    UseProgram(Option<u32>),
    VertexArrayAttribBinding {
        vertex_array: u32,
        attrib: GLuint,
        binding: GLuint,
    },
    VertexArrayAttribFormat {
        vertex_array: u32,
        attrib: GLuint,
        size: GLint,
        r#type: GLenum,
        normalized: GLboolean,
        relative_offset: GLuint,
    },
    VertexArrayVertexBuffer {
        vertex_array: u32,
        binding: GLuint,
        buffer: u32,
        offset: GLintptr,
        stride: GLsizei,
    },
    Viewport(GLint, GLint, GLsizei, GLsizei),
}

/// records every call and answers queries from its configuration.
pub struct RecordingGl {
    pub calls: RefCell<Vec<Call>>,
    pub next_name: Cell<u32>,
    pub shader_types: RefCell<HashMap<u32, GLenum>>,

    pub version: (GLint, GLint),
    pub extensions: Vec<String>,
    pub binary_formats: Vec<GLenum>,
    pub color_read: (GLenum, GLenum),
    /// shader types whose compile status is false.
    pub failing_stages: Vec<GLenum>,
    pub link_fails: bool,
    pub shader_info_log: String,
    pub program_info_log: String,
}

impl Default for RecordingGl {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            next_name: Cell::new(1),
            shader_types: RefCell::new(HashMap::new()),

            version: (4, 6),
            extensions: vec![
                "GL_ARB_direct_state_access".to_string(),
                "GL_ARB_gl_spirv".to_string(),
            ],
            binary_formats: vec![SHADER_BINARY_FORMAT_SPIR_V],
            color_read: (UNSIGNED_BYTE, BGRA),
            failing_stages: Vec::new(),
            link_fails: false,
            shader_info_log: String::new(),
            program_info_log: String::new(),
        }
    }
}

impl RecordingGl {
    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn create(&self, kind: Kind) -> u32 {
        let name = self.next_name.get();
        self.next_name.set(name + 1);
        self.record(Call::Create(kind, name));
        name
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn position(&self, call: &Call) -> Option<usize> {
        self.calls.borrow().iter().position(|c| c == call)
    }

    /// names of objects of `kind` that were created and not yet deleted.
    pub fn live(&self, kind: Kind) -> Vec<u32> {
        let mut live = Vec::new();
        for call in self.calls.borrow().iter() {
            match *call {
                Call::Create(k, name) if k == kind => live.push(name),
                Call::CreateShader(_, name) if kind == Kind::Shader => live.push(name),
                Call::Delete(k, name) if k == kind => live.retain(|&n| n != name),
                _ => {}
            }
        }
        live
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| pred(call)).count()
    }
}

impl Adapter for RecordingGl {
    type Buffer = u32;
    type Program = u32;
    type Shader = u32;
    type VertexArray = u32;

    unsafe fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
    }

    unsafe fn bind_buffer_base(&self, target: GLenum, index: GLuint, buffer: Option<u32>) {
        self.record(Call::BindBufferBase(target, index, buffer));
    }

    unsafe fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    unsafe fn clear(&self, mask: GLbitfield) {
        self.record(Call::Clear(mask));
    }

    unsafe fn clear_color(&self, red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat) {
        self.record(Call::ClearColor([red, green, blue, alpha]));
    }

    unsafe fn create_buffer(&self) -> anyhow::Result<u32> {
        Ok(self.create(Kind::Buffer))
    }

    unsafe fn create_program(&self) -> anyhow::Result<u32> {
        Ok(self.create(Kind::Program))
    }

    unsafe fn create_shader(&self, r#type: GLenum) -> anyhow::Result<u32> {
        let name = self.next_name.get();
        self.next_name.set(name + 1);
        self.shader_types.borrow_mut().insert(name, r#type);
        self.record(Call::CreateShader(r#type, name));
        Ok(name)
    }

    unsafe fn create_vertex_array(&self) -> anyhow::Result<u32> {
        Ok(self.create(Kind::VertexArray))
    }

    unsafe fn delete_buffer(&self, buffer: u32) {
        self.record(Call::Delete(Kind::Buffer, buffer));
    }

    unsafe fn delete_program(&self, program: u32) {
        self.record(Call::Delete(Kind::Program, program));
    }

    unsafe fn delete_shader(&self, shader: u32) {
        self.record(Call::Delete(Kind::Shader, shader));
    }

    unsafe fn delete_vertex_array(&self, vertex_array: u32) {
        self.record(Call::Delete(Kind::VertexArray, vertex_array));
    }

    unsafe fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader(program, shader));
    }

    unsafe fn disable(&self, cap: GLenum) {
        self.record(Call::Disable(cap));
    }

    unsafe fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
        self.record(Call::DrawArrays(mode, first, count));
    }

    unsafe fn enable(&self, cap: GLenum) {
        self.record(Call::Enable(cap));
    }

    unsafe fn enable_vertex_array_attrib(&self, vertex_array: u32, index: GLuint) {
        self.record(Call::EnableVertexArrayAttrib(vertex_array, index));
    }

    unsafe fn get_integer(&self, pname: GLenum) -> GLint {
        match pname {
            MAJOR_VERSION => self.version.0,
            MINOR_VERSION => self.version.1,
            NUM_EXTENSIONS => self.extensions.len() as GLint,
            NUM_SHADER_BINARY_FORMATS => self.binary_formats.len() as GLint,
            IMPLEMENTATION_COLOR_READ_TYPE => self.color_read.0 as GLint,
            IMPLEMENTATION_COLOR_READ_FORMAT => self.color_read.1 as GLint,
            other => panic!("unexpected get_integer({other:#x})"),
        }
    }

    unsafe fn get_integer_v(&self, pname: GLenum, data: &mut [GLint]) {
        match pname {
            SHADER_BINARY_FORMATS => {
                for (dst, src) in data.iter_mut().zip(self.binary_formats.iter()) {
                    *dst = *src as GLint;
                }
            }
            other => panic!("unexpected get_integer_v({other:#x})"),
        }
    }

    unsafe fn get_program_info_log(&self, _program: u32) -> String {
        self.program_info_log.clone()
    }

    unsafe fn get_program_parameter(&self, _program: u32, pname: GLenum) -> GLint {
        match pname {
            LINK_STATUS => (!self.link_fails) as GLint,
            INFO_LOG_LENGTH => self.program_info_log.len() as GLint,
            other => panic!("unexpected get_program_parameter({other:#x})"),
        }
    }

    unsafe fn get_shader_info_log(&self, _shader: u32) -> String {
        self.shader_info_log.clone()
    }

    unsafe fn get_shader_parameter(&self, shader: u32, pname: GLenum) -> GLint {
        match pname {
            COMPILE_STATUS => {
                let r#type = self.shader_types.borrow()[&shader];
                (!self.failing_stages.contains(&r#type)) as GLint
            }
            INFO_LOG_LENGTH => self.shader_info_log.len() as GLint,
            other => panic!("unexpected get_shader_parameter({other:#x})"),
        }
    }

    unsafe fn get_string(&self, name: GLenum) -> anyhow::Result<String> {
        Ok(match name {
            VENDOR => "recording vendor".to_string(),
            RENDERER => "recording renderer".to_string(),
            VERSION => format!("{}.{}.0 core", self.version.0, self.version.1),
            SHADING_LANGUAGE_VERSION => "4.60".to_string(),
            other => anyhow::bail!("unexpected get_string({other:#x})"),
        })
    }

    unsafe fn get_string_i(&self, name: GLenum, index: GLuint) -> anyhow::Result<String> {
        assert_eq!(name, EXTENSIONS);
        self.extensions
            .get(index as usize)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("extension index {index} out of range"))
    }

    unsafe fn label_buffer(&self, buffer: u32, label: &str) {
        self.record(Call::Label(Kind::Buffer, buffer, label.to_string()));
    }

    unsafe fn label_program(&self, program: u32, label: &str) {
        self.record(Call::Label(Kind::Program, program, label.to_string()));
    }

    unsafe fn label_shader(&self, shader: u32, label: &str) {
        self.record(Call::Label(Kind::Shader, shader, label.to_string()));
    }

    unsafe fn label_vertex_array(&self, vertex_array: u32, label: &str) {
        self.record(Call::Label(Kind::VertexArray, vertex_array, label.to_string()));
    }

    unsafe fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    unsafe fn named_buffer_storage(&self, buffer: u32, data: &[u8], flags: GLbitfield) {
        self.record(Call::NamedBufferStorage {
            buffer,
            data: data.to_vec(),
            flags,
        });
    }

    unsafe fn named_buffer_sub_data(&self, buffer: u32, offset: GLintptr, data: &[u8]) {
        self.record(Call::NamedBufferSubData {
            buffer,
            offset,
            data: data.to_vec(),
        });
    }

    unsafe fn polygon_mode(&self, face: GLenum, mode: GLenum) {
        self.record(Call::PolygonMode(face, mode));
    }

    unsafe fn shader_binary(&self, shader: u32, binary_format: GLenum, binary: &[u8]) {
        self.record(Call::ShaderBinary {
            shader,
            format: binary_format,
            len: binary.len(),
        });
    }

    unsafe fn specialize_shader(
        &self,
        shader: u32,
        entry_point: &CStr,
        constant_indices: &[GLuint],
        constant_values: &[GLuint],
    ) {
        assert_eq!(constant_indices.len(), constant_values.len());
        self.record(Call::SpecializeShader {
            shader,
            entry_point: entry_point.to_string_lossy().into_owned(),
        });
    }

    unsafe fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    unsafe fn vertex_array_attrib_binding(
        &self,
        vertex_array: u32,
        attrib_index: GLuint,
        binding_index: GLuint,
    ) {
        self.record(Call::VertexArrayAttribBinding {
            vertex_array,
            attrib: attrib_index,
            binding: binding_index,
        });
    }

    unsafe fn vertex_array_attrib_format(
        &self,
        vertex_array: u32,
        attrib_index: GLuint,
        size: GLint,
        r#type: GLenum,
        normalized: GLboolean,
        relative_offset: GLuint,
    ) {
        self.record(Call::VertexArrayAttribFormat {
            vertex_array,
            attrib: attrib_index,
            size,
            r#type,
            normalized,
            relative_offset,
        });
    }

    unsafe fn vertex_array_vertex_buffer(
        &self,
        vertex_array: u32,
        binding_index: GLuint,
        buffer: u32,
        offset: GLintptr,
        stride: GLsizei,
    ) {
        self.record(Call::VertexArrayVertexBuffer {
            vertex_array,
            binding: binding_index,
            buffer,
            offset,
            stride,
        });
    }

    unsafe fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        self.record(Call::Viewport(x, y, width, height));
    }
}
