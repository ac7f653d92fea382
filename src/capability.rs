use anyhow::anyhow;
use gl::{Adapter, GLenum, GLint};

pub const SPIRV_EXTENSION: &str = "GL_ARB_gl_spirv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextInfo {
    pub vendor: String,
    pub renderer: String,
    pub version: String,
    pub version_number: (GLint, GLint),
}

/// # Safety
///
/// a gl context must be current on the calling thread.
pub unsafe fn context_info<A: Adapter>(gl: &A) -> anyhow::Result<ContextInfo> {
    unsafe {
        Ok(ContextInfo {
            vendor: gl.get_string(gl::VENDOR)?,
            renderer: gl.get_string(gl::RENDERER)?,
            version: gl.get_string(gl::VERSION)?,
            version_number: (
                gl.get_integer(gl::MAJOR_VERSION),
                gl.get_integer(gl::MINOR_VERSION),
            ),
        })
    }
}

pub unsafe fn extensions<A: Adapter>(gl: &A) -> anyhow::Result<Vec<String>> {
    unsafe {
        let num_extensions = gl.get_integer(gl::NUM_EXTENSIONS).max(0) as u32;
        (0..num_extensions)
            .map(|index| gl.get_string_i(gl::EXTENSIONS, index))
            .collect()
    }
}

pub unsafe fn shader_binary_formats<A: Adapter>(gl: &A) -> Vec<GLenum> {
    unsafe {
        let num_formats = gl.get_integer(gl::NUM_SHADER_BINARY_FORMATS);
        if num_formats <= 0 {
            return Vec::new();
        }
        let mut formats = vec![0; num_formats as usize];
        gl.get_integer_v(gl::SHADER_BINARY_FORMATS, &mut formats);
        formats.into_iter().map(|format| format as GLenum).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpirvSupport {
    /// whether SHADER_BINARY_FORMAT_SPIR_V shows up in SHADER_BINARY_FORMATS.
    pub binary_format_listed: bool,
}

/// fails unless GL_ARB_gl_spirv is in the extension list, whatever the context version. a
/// missing entry in the binary format list is only warned about.
///
/// # Safety
///
/// a gl context must be current on the calling thread.
pub unsafe fn require_spirv<A: Adapter>(gl: &A) -> anyhow::Result<SpirvSupport> {
    let extension_listed = unsafe { extensions(gl) }?
        .iter()
        .any(|extension| extension == SPIRV_EXTENSION);
    if !extension_listed {
        return Err(anyhow!("spir-v is not supported ({SPIRV_EXTENSION} is missing)"));
    }

    let binary_format_listed = unsafe { shader_binary_formats(gl) }
        .contains(&gl::SHADER_BINARY_FORMAT_SPIR_V);
    if !binary_format_listed {
        log::warn!("SHADER_BINARY_FORMAT_SPIR_V is not included in SHADER_BINARY_FORMATS");
    }

    Ok(SpirvSupport {
        binary_format_listed,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorReadFormat {
    pub r#type: GLenum,
    pub format: GLenum,
}

impl ColorReadFormat {
    pub fn type_name(&self) -> &'static str {
        match self.r#type {
            gl::UNSIGNED_BYTE => "GL_UNSIGNED_BYTE",
            gl::FLOAT => "GL_FLOAT",
            _ => "unknown",
        }
    }

    pub fn format_name(&self) -> &'static str {
        match self.format {
            gl::RGB => "GL_RGB",
            gl::RGBA => "GL_RGBA",
            gl::BGRA => "GL_BGRA",
            _ => "unknown",
        }
    }
}

/// pixel type and format that glReadPixels prefers for the current read framebuffer.
pub unsafe fn implementation_color_read<A: Adapter>(gl: &A) -> ColorReadFormat {
    unsafe {
        ColorReadFormat {
            r#type: gl.get_integer(gl::IMPLEMENTATION_COLOR_READ_TYPE) as GLenum,
            format: gl.get_integer(gl::IMPLEMENTATION_COLOR_READ_FORMAT) as GLenum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::RecordingGl;

    #[test]
    fn test_context_info() {
        let gl = RecordingGl::default();
        let info = unsafe { context_info(&gl) }.unwrap();
        assert_eq!(info.vendor, "recording vendor");
        assert_eq!(info.version, "4.6.0 core");
        assert_eq!(info.version_number, (4, 6));
    }

    #[test]
    fn test_require_spirv_with_extension_and_format() {
        let gl = RecordingGl::default();
        let support = unsafe { require_spirv(&gl) }.unwrap();
        assert!(support.binary_format_listed);
    }

    #[test]
    fn test_require_spirv_fails_without_extension() {
        let gl = RecordingGl {
            version: (4, 2),
            extensions: vec!["GL_ARB_direct_state_access".to_string()],
            ..Default::default()
        };
        let err = unsafe { require_spirv(&gl) }.unwrap_err();
        assert!(err.to_string().contains(SPIRV_EXTENSION));
    }

    #[test]
    fn test_require_spirv_fails_without_extension_on_46() {
        let gl = RecordingGl {
            version: (4, 6),
            extensions: vec!["GL_ARB_direct_state_access".to_string()],
            ..Default::default()
        };
        let err = unsafe { require_spirv(&gl) }.unwrap_err();
        assert!(err.to_string().contains(SPIRV_EXTENSION));

        let gl = RecordingGl {
            version: (4, 6),
            extensions: Vec::new(),
            ..Default::default()
        };
        assert!(unsafe { require_spirv(&gl) }.is_err());
    }

    #[test]
    fn test_missing_binary_format_is_not_fatal() {
        let gl = RecordingGl {
            binary_formats: Vec::new(),
            ..Default::default()
        };
        let support = unsafe { require_spirv(&gl) }.unwrap();
        assert!(!support.binary_format_listed);

        let gl = RecordingGl {
            binary_formats: vec![0x1234],
            ..Default::default()
        };
        let support = unsafe { require_spirv(&gl) }.unwrap();
        assert!(!support.binary_format_listed);
    }

    #[test]
    fn test_implementation_color_read() {
        let gl = RecordingGl::default();
        let color_read = unsafe { implementation_color_read(&gl) };
        assert_eq!(color_read.type_name(), "GL_UNSIGNED_BYTE");
        assert_eq!(color_read.format_name(), "GL_BGRA");
    }
}
