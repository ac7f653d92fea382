//! draws a triangle with per-vertex colors out of precompiled spir-v stages and spins it about
//! the y axis.

use std::process::ExitCode;

use app::{AppConfig, AppHandler};
use gl::Adapter as _;
use glspirv::capability;
use glspirv::render::{RenderState, TriangleRenderer};
use window::WindowAttrs;

struct App {
    state: RenderState,
    renderer: TriangleRenderer<gl::Api>,
}

impl AppHandler for App {
    fn create(ctx: app::AppContext) -> anyhow::Result<Self> {
        unsafe {
            let gl: &gl::Api = ctx.gl;
            let info = capability::context_info(gl)?;
            log::info!("GL_VENDOR:   {}", info.vendor);
            log::info!("GL_RENDERER: {}", info.renderer);
            log::info!("GL_VERSION:  {}", info.version);

            let support = capability::require_spirv(gl)?;
            log::info!(
                "{} supported, spir-v binary format listed: {}",
                capability::SPIRV_EXTENSION,
                support.binary_format_listed,
            );

            let state = RenderState::default();
            let renderer = TriangleRenderer::with_embedded_shaders(ctx.gl, &state)?;
            gl.disable(gl::CULL_FACE);

            Ok(Self { state, renderer })
        }
    }

    fn iterate(&mut self, _ctx: app::AppContext, frame: app::Frame) {
        unsafe { self.renderer.frame(&mut self.state, frame.delta_time) };
    }
}

fn main() -> ExitCode {
    app::run::<App>(AppConfig {
        window: WindowAttrs {
            title: glspirv::APP_TITLE.to_string(),
            logical_size: Some((1280, 720)),
            ..WindowAttrs::default()
        },
        gl_version: (4, 6),
        credit: Some(glspirv::CREDIT.to_string()),
        ..AppConfig::default()
    })
}
