use std::ffi::c_void;

use crate::types::*;

// NOTE: only the subset of gl 4.6 core that is actually used lives here. everything is resolved
// through the context's get_proc_address; missing functions panic when called.

dynlib::api! {
    fn GetError = c"glGetError" () -> GLenum;
    fn GetString = c"glGetString" (name: GLenum) -> *const GLubyte;
    fn GetStringi = c"glGetStringi" (name: GLenum, index: GLuint) -> *const GLubyte;
    fn GetIntegerv = c"glGetIntegerv" (pname: GLenum, data: *mut GLint);

    fn Clear = c"glClear" (mask: GLbitfield);
    fn ClearColor = c"glClearColor" (red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat);
    fn Viewport = c"glViewport" (x: GLint, y: GLint, width: GLsizei, height: GLsizei);
    fn Enable = c"glEnable" (cap: GLenum);
    fn Disable = c"glDisable" (cap: GLenum);
    fn PolygonMode = c"glPolygonMode" (face: GLenum, mode: GLenum);
    fn DrawArrays = c"glDrawArrays" (mode: GLenum, first: GLint, count: GLsizei);

    fn CreateBuffers = c"glCreateBuffers" (n: GLsizei, buffers: *mut GLuint);
    fn DeleteBuffers = c"glDeleteBuffers" (n: GLsizei, buffers: *const GLuint);
    fn NamedBufferStorage = c"glNamedBufferStorage" (
        buffer: GLuint,
        size: GLsizeiptr,
        data: *const c_void,
        flags: GLbitfield,
    );
    fn NamedBufferSubData = c"glNamedBufferSubData" (
        buffer: GLuint,
        offset: GLintptr,
        size: GLsizeiptr,
        data: *const c_void,
    );
    fn BindBufferBase = c"glBindBufferBase" (target: GLenum, index: GLuint, buffer: GLuint);

    fn CreateVertexArrays = c"glCreateVertexArrays" (n: GLsizei, arrays: *mut GLuint);
    fn DeleteVertexArrays = c"glDeleteVertexArrays" (n: GLsizei, arrays: *const GLuint);
    fn BindVertexArray = c"glBindVertexArray" (array: GLuint);
    fn EnableVertexArrayAttrib = c"glEnableVertexArrayAttrib" (vaobj: GLuint, index: GLuint);
    fn VertexArrayAttribFormat = c"glVertexArrayAttribFormat" (
        vaobj: GLuint,
        attribindex: GLuint,
        size: GLint,
        r#type: GLenum,
        normalized: GLboolean,
        relativeoffset: GLuint,
    );
    fn VertexArrayAttribBinding = c"glVertexArrayAttribBinding" (
        vaobj: GLuint,
        attribindex: GLuint,
        bindingindex: GLuint,
    );
    fn VertexArrayVertexBuffer = c"glVertexArrayVertexBuffer" (
        vaobj: GLuint,
        bindingindex: GLuint,
        buffer: GLuint,
        offset: GLintptr,
        stride: GLsizei,
    );

    fn CreateShader = c"glCreateShader" (r#type: GLenum) -> GLuint;
    fn DeleteShader = c"glDeleteShader" (shader: GLuint);
    fn ShaderBinary = c"glShaderBinary" (
        count: GLsizei,
        shaders: *const GLuint,
        binaryformat: GLenum,
        binary: *const c_void,
        length: GLsizei,
    );
    fn SpecializeShader = c"glSpecializeShader" (
        shader: GLuint,
        entry_point: *const GLchar,
        num_specialization_constants: GLuint,
        constant_index: *const GLuint,
        constant_value: *const GLuint,
    );
    fn GetShaderiv = c"glGetShaderiv" (shader: GLuint, pname: GLenum, params: *mut GLint);
    fn GetShaderInfoLog = c"glGetShaderInfoLog" (
        shader: GLuint,
        buf_size: GLsizei,
        length: *mut GLsizei,
        info_log: *mut GLchar,
    );

    fn CreateProgram = c"glCreateProgram" () -> GLuint;
    fn DeleteProgram = c"glDeleteProgram" (program: GLuint);
    fn AttachShader = c"glAttachShader" (program: GLuint, shader: GLuint);
    fn DetachShader = c"glDetachShader" (program: GLuint, shader: GLuint);
    fn LinkProgram = c"glLinkProgram" (program: GLuint);
    fn UseProgram = c"glUseProgram" (program: GLuint);
    fn GetProgramiv = c"glGetProgramiv" (program: GLuint, pname: GLenum, params: *mut GLint);
    fn GetProgramInfoLog = c"glGetProgramInfoLog" (
        program: GLuint,
        buf_size: GLsizei,
        length: *mut GLsizei,
        info_log: *mut GLchar,
    );

    fn ObjectLabel = c"glObjectLabel" (
        identifier: GLenum,
        name: GLuint,
        length: GLsizei,
        label: *const GLchar,
    );
}
