//! opens a gl 4.2 core context, makes sure spir-v shaders could be consumed and clears the
//! screen every frame.

use std::process::ExitCode;

use app::{AppConfig, AppHandler};
use gl::Adapter as _;
use glspirv::{capability, render};
use window::WindowAttrs;

struct App;

impl AppHandler for App {
    fn create(ctx: app::AppContext) -> anyhow::Result<Self> {
        let gl: &gl::Api = ctx.gl;
        unsafe {
            let info = capability::context_info(gl)?;
            log::info!("GL_VENDOR:   {}", info.vendor);
            log::info!("GL_RENDERER: {}", info.renderer);
            log::info!("GL_VERSION:  {}", info.version);

            let color_read = capability::implementation_color_read(gl);
            log::info!(
                "implementation color read: type {} ({:#x}), format {} ({:#x})",
                color_read.type_name(),
                color_read.r#type,
                color_read.format_name(),
                color_read.format,
            );

            let support = capability::require_spirv(gl)?;
            log::info!(
                "{} supported, spir-v binary format listed: {}",
                capability::SPIRV_EXTENSION,
                support.binary_format_listed,
            );

            gl.disable(gl::CULL_FACE);
        }
        Ok(Self)
    }

    fn iterate(&mut self, ctx: app::AppContext, _frame: app::Frame) {
        unsafe { render::clear::<gl::Api>(ctx.gl) };
    }
}

fn main() -> ExitCode {
    app::run::<App>(AppConfig {
        window: WindowAttrs {
            title: glspirv::APP_TITLE.to_string(),
            logical_size: Some((1280, 720)),
            ..WindowAttrs::default()
        },
        gl_version: (4, 2),
        credit: Some(glspirv::CREDIT.to_string()),
        ..AppConfig::default()
    })
}
