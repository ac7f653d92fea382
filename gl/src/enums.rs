use crate::types::*;

pub const FALSE: GLboolean = 0;
pub const TRUE: GLboolean = 1;

// errors
pub const NO_ERROR: GLenum = 0;
pub const INVALID_ENUM: GLenum = 0x0500;
pub const INVALID_VALUE: GLenum = 0x0501;
pub const INVALID_OPERATION: GLenum = 0x0502;
pub const STACK_OVERFLOW: GLenum = 0x0503;
pub const STACK_UNDERFLOW: GLenum = 0x0504;
pub const OUT_OF_MEMORY: GLenum = 0x0505;
pub const INVALID_FRAMEBUFFER_OPERATION: GLenum = 0x0506;

// clear
pub const DEPTH_BUFFER_BIT: GLbitfield = 0x0000_0100;
pub const STENCIL_BUFFER_BIT: GLbitfield = 0x0000_0400;
pub const COLOR_BUFFER_BIT: GLbitfield = 0x0000_4000;

// primitives and data types
pub const TRIANGLES: GLenum = 0x0004;
pub const UNSIGNED_BYTE: GLenum = 0x1401;
pub const FLOAT: GLenum = 0x1406;

// pixel formats
pub const RGB: GLenum = 0x1907;
pub const RGBA: GLenum = 0x1908;
pub const BGRA: GLenum = 0x80E1;

// capabilities and rasterization state
pub const CULL_FACE: GLenum = 0x0B44;
pub const DEPTH_TEST: GLenum = 0x0B71;
pub const FRONT_AND_BACK: GLenum = 0x0408;
pub const LINE: GLenum = 0x1B01;
pub const FILL: GLenum = 0x1B02;

// strings and integer queries
pub const VENDOR: GLenum = 0x1F00;
pub const RENDERER: GLenum = 0x1F01;
pub const VERSION: GLenum = 0x1F02;
pub const EXTENSIONS: GLenum = 0x1F03;
pub const SHADING_LANGUAGE_VERSION: GLenum = 0x8B8C;
pub const MAJOR_VERSION: GLenum = 0x821B;
pub const MINOR_VERSION: GLenum = 0x821C;
pub const NUM_EXTENSIONS: GLenum = 0x821D;
pub const IMPLEMENTATION_COLOR_READ_TYPE: GLenum = 0x8B9A;
pub const IMPLEMENTATION_COLOR_READ_FORMAT: GLenum = 0x8B9B;

// buffers
pub const UNIFORM_BUFFER: GLenum = 0x8A11;
pub const DYNAMIC_STORAGE_BIT: GLbitfield = 0x0100;

// shaders and programs
pub const FRAGMENT_SHADER: GLenum = 0x8B30;
pub const VERTEX_SHADER: GLenum = 0x8B31;
pub const COMPILE_STATUS: GLenum = 0x8B81;
pub const LINK_STATUS: GLenum = 0x8B82;
pub const INFO_LOG_LENGTH: GLenum = 0x8B84;
pub const SHADER_BINARY_FORMATS: GLenum = 0x8DF8;
pub const NUM_SHADER_BINARY_FORMATS: GLenum = 0x8DF9;
pub const SHADER_BINARY_FORMAT_SPIR_V: GLenum = 0x9551;
pub const SPIR_V_BINARY: GLenum = 0x9552;

// object labels
pub const VERTEX_ARRAY: GLenum = 0x8074;
pub const BUFFER: GLenum = 0x82E0;
pub const SHADER: GLenum = 0x82E1;
pub const PROGRAM: GLenum = 0x82E2;

pub fn error_name(code: GLenum) -> &'static str {
    match code {
        NO_ERROR => "GL_NO_ERROR",
        INVALID_ENUM => "GL_INVALID_ENUM",
        INVALID_VALUE => "GL_INVALID_VALUE",
        INVALID_OPERATION => "GL_INVALID_OPERATION",
        STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        _ => "unknown gl error",
    }
}
