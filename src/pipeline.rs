use std::rc::Rc;
use std::{error, fmt};

use gl::{Adapter, GLenum, GLint};
use scopeguard::ScopeGuard;

use crate::resource::{Program, Shader};
use crate::spirv;

pub const ENTRY_POINT: &std::ffi::CStr = c"main";

#[derive(Debug, Clone, Copy)]
pub struct Stage<'a> {
    pub r#type: GLenum,
    pub label: &'a str,
    pub module: spirv::Module<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// labels of the stages whose compile status was false.
    StagesFailed(Vec<String>),
    LinkFailed { info_log: String },
}

impl error::Error for BuildError {}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StagesFailed(labels) => f.write_fmt(format_args!(
                "could not load all binary shaders required for this program (failed: {})",
                labels.join(", ")
            )),
            Self::LinkFailed { info_log } => {
                f.write_fmt(format_args!("could not link program: {info_log}"))
            }
        }
    }
}

/// drivers may report an info log made of a single nul byte; that carries no text.
fn report_info_log(label: &str, reported_len: GLint, info_log: &str, failed: bool) {
    let text = info_log.trim_end_matches('\0').trim_end();
    if text.is_empty() {
        if reported_len == 1 {
            log::debug!("{label}: info log is a single nul byte");
        }
        return;
    }
    if failed {
        log::error!("{label} info log: {text}");
    } else {
        log::info!("{label} info log: {text}");
    }
}

/// loads the binary into a new shader object and specializes its `main` entry point. the shader
/// is returned even when its compile status is false so that every stage gets reported.
unsafe fn load_stage<A: Adapter>(gl: &Rc<A>, stage: &Stage) -> anyhow::Result<(Shader<A>, bool)> {
    let module = &stage.module;
    log::debug!(
        "loading {}: spir-v {}.{}, generator {:#010x}, {} words, id bound {}",
        stage.label,
        module.version.0,
        module.version.1,
        module.generator,
        module.word_count(),
        module.bound,
    );

    unsafe {
        let shader = Shader::create(gl, stage.r#type, stage.label)?;
        gl.shader_binary(
            shader.handle(),
            gl::SHADER_BINARY_FORMAT_SPIR_V,
            stage.module.as_bytes(),
        );
        gl.specialize_shader(shader.handle(), ENTRY_POINT, &[], &[]);

        let compiled = gl.get_shader_parameter(shader.handle(), gl::COMPILE_STATUS)
            != gl::FALSE as GLint;
        if !compiled {
            log::error!("could not compile {}", stage.label);
        }
        report_info_log(
            stage.label,
            gl.get_shader_parameter(shader.handle(), gl::INFO_LOG_LENGTH),
            &gl.get_shader_info_log(shader.handle()),
            !compiled,
        );

        Ok((shader, compiled))
    }
}

/// builds a program out of a vertex and a fragment spir-v stage.
///
/// fails without creating a program if any stage does not compile. stage objects never outlive
/// this call.
///
/// # Safety
///
/// a gl context must be current on the calling thread.
pub unsafe fn build_program<A: Adapter>(
    gl: &Rc<A>,
    label: &str,
    vertex: Stage,
    fragment: Stage,
) -> anyhow::Result<Program<A>> {
    unsafe {
        let (vert_shader, vert_compiled) = load_stage(gl, &vertex)?;
        let (frag_shader, frag_compiled) = load_stage(gl, &fragment)?;
        if !(vert_compiled && frag_compiled) {
            let failed = [(&vertex, vert_compiled), (&fragment, frag_compiled)]
                .into_iter()
                .filter(|(_, compiled)| !compiled)
                .map(|(stage, _)| stage.label.to_string())
                .collect();
            return Err(BuildError::StagesFailed(failed).into());
        }

        let program = ScopeGuard::new_with_data(gl.create_program()?, |program| {
            gl.delete_program(program)
        });
        gl.label_program(*program, label);

        gl.attach_shader(*program, vert_shader.handle());
        gl.attach_shader(*program, frag_shader.handle());
        gl.link_program(*program);
        // NOTE: linked program keeps the compiled code, stages are no longer needed.
        gl.detach_shader(*program, vert_shader.handle());
        gl.detach_shader(*program, frag_shader.handle());
        drop(vert_shader);
        drop(frag_shader);

        let linked = gl.get_program_parameter(*program, gl::LINK_STATUS) != gl::FALSE as GLint;
        let info_log = gl.get_program_info_log(*program);
        report_info_log(
            label,
            gl.get_program_parameter(*program, gl::INFO_LOG_LENGTH),
            &info_log,
            !linked,
        );
        if !linked {
            return Err(BuildError::LinkFailed { info_log }.into());
        }

        Ok(Program::from_raw(gl, program.dismiss()))
    }
}
