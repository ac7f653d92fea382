use std::process::ExitCode;
use std::rc::Rc;
use std::time::Instant;

use anyhow::Context as _;
use gl::Adapter as _;
use raw_window_handle::{self as rwh, HasDisplayHandle as _, HasWindowHandle as _};
use window::{Event, Window, WindowEvent};

use crate::{
    AppConfig, AppContext, AppHandler, Control, Frame, FpsCounter, Logger, format_title,
};

struct InitializedGraphicsContext {
    egl_connection: egl::wrap::Connection,
    egl_context: Option<egl::wrap::Context>,
    egl_surface: Option<egl::wrap::Surface>,
    gl_api: Rc<gl::Api>,
}

impl Drop for InitializedGraphicsContext {
    fn drop(&mut self) {
        // NOTE: surface goes before the context, and both before the display is terminated by
        // Connection's drop.
        if let Some(ref egl_context) = self.egl_context {
            let _ = self.egl_connection.make_current(None, egl_context);
        }
        if let Some(egl_surface) = self.egl_surface.take() {
            self.egl_connection.destroy_surface(egl_surface);
        }
        if let Some(egl_context) = self.egl_context.take() {
            self.egl_connection.destroy_context(egl_context);
        }
        log::debug!("destroyed graphics context");
    }
}

enum GraphicsContext {
    Initialized(InitializedGraphicsContext),
    Uninit,
}

impl GraphicsContext {
    fn new_uninit() -> Self {
        Self::Uninit
    }

    fn init(
        &mut self,
        config: &AppConfig,
        display_handle: rwh::DisplayHandle,
        window_handle: rwh::WindowHandle,
        width: u32,
        height: u32,
    ) -> anyhow::Result<&mut InitializedGraphicsContext> {
        assert!(matches!(self, Self::Uninit));

        let mut egl_connection = egl::wrap::Connection::from_display_handle(display_handle)
            .context("could not create egl connection")?;
        for (name, query) in [
            ("vendor", egl::VENDOR),
            ("client apis", egl::CLIENT_APIS),
        ] {
            if let Some(value) = egl_connection.query_string(query) {
                log::debug!("egl {name}: {value}");
            }
        }

        let egl_config = {
            use egl::*;

            let mut attribs = wrap::Attribs::default();
            attribs
                .push(RED_SIZE, 8)
                .push(GREEN_SIZE, 8)
                .push(BLUE_SIZE, 8)
                .push(ALPHA_SIZE, 8)
                .push(DEPTH_SIZE, 24)
                .push(SURFACE_TYPE, WINDOW_BIT)
                .push(CONFORMANT, OPENGL_BIT)
                .push(RENDERABLE_TYPE, OPENGL_BIT);
            egl_connection
                .choose_config(&attribs)
                .context("could not choose egl config")?
        };

        let egl_context = {
            use egl::*;

            let (major, minor) = config.gl_version;
            let mut attribs = wrap::Attribs::default();
            attribs
                .push(CONTEXT_MAJOR_VERSION, major as EGLint)
                .push(CONTEXT_MINOR_VERSION, minor as EGLint)
                .push(CONTEXT_OPENGL_PROFILE_MASK, CONTEXT_OPENGL_CORE_PROFILE_BIT);
            // NOTE: forward compatible attribute is unknown to egl < 1.5.
            if egl_connection.version >= (1, 5) {
                attribs.push(CONTEXT_OPENGL_FORWARD_COMPATIBLE, TRUE as EGLint);
            }
            if cfg!(debug_assertions) && egl_connection.version >= (1, 5) {
                attribs.push(CONTEXT_OPENGL_DEBUG, TRUE as EGLint);
            }
            egl_connection
                .create_context(OPENGL_API, egl_config, &attribs)
                .with_context(|| format!("could not create opengl {major}.{minor} core context"))?
        };

        let egl_surface = egl_connection
            .create_window_surface(egl_context.config, window_handle, width, height)
            .context("could not create egl surface")?;

        egl_connection.make_current(Some(&egl_surface), &egl_context)?;

        if let Some(interval) = config.swap_interval {
            if let Err(err) = egl_connection.set_swap_interval(interval) {
                log::warn!("{err}");
            }
        }

        let gl_api = unsafe {
            gl::Api::load_with(|procname| egl_connection.get_proc_address(procname))
        };
        unsafe { gl_api.viewport(0, 0, width as i32, height as i32) };

        *self = Self::Initialized(InitializedGraphicsContext {
            egl_connection,
            egl_context: Some(egl_context),
            egl_surface: Some(egl_surface),
            gl_api: Rc::new(gl_api),
        });
        let Self::Initialized(init) = self else {
            unreachable!();
        };
        Ok(init)
    }
}

struct Clock {
    start: Instant,
}

impl Clock {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

// NOTE: field order matters; app handler owns gl objects and must drop while the graphics
// context is still alive, and the graphics context must go before the window.
struct Context<A: AppHandler> {
    app_handler: Option<A>,
    graphics_context: GraphicsContext,
    window: Box<dyn Window>,
    config: AppConfig,
    clock: Clock,
    last_frame_time: f64,
    fps: FpsCounter,
    close_requested: bool,
}

impl<A: AppHandler> Context<A> {
    fn new(config: AppConfig) -> anyhow::Result<Self> {
        let window = window::create_window(config.window.clone())?;
        let clock = Clock::new();
        Ok(Self {
            app_handler: None,
            graphics_context: GraphicsContext::new_uninit(),
            window,
            config,
            last_frame_time: clock.now(),
            fps: FpsCounter::new(clock.now()),
            clock,
            close_requested: false,
        })
    }

    fn handle_event(&mut self, event: &Event) -> anyhow::Result<()> {
        match event {
            Event::Window(WindowEvent::Configure { logical_size }) => {
                let GraphicsContext::Uninit = self.graphics_context else {
                    return Ok(());
                };

                let (width, height) = match self.window.size() {
                    (0, _) | (_, 0) => *logical_size,
                    physical_size => physical_size,
                };
                let igc = self.graphics_context.init(
                    &self.config,
                    self.window.display_handle()?,
                    self.window.window_handle()?,
                    width,
                    height,
                )?;

                self.app_handler = Some(A::create(AppContext {
                    window: self.window.as_mut(),
                    gl: &igc.gl_api,
                })?);

                let now = self.clock.now();
                self.last_frame_time = now;
                self.fps = FpsCounter::new(now);
            }
            event => match Control::for_event(event) {
                Some(Control::Close) => self.close_requested = true,
                Some(Control::Resize { width, height }) => {
                    if let GraphicsContext::Initialized(InitializedGraphicsContext {
                        egl_surface: Some(ref egl_surface),
                        ref gl_api,
                        ..
                    }) = self.graphics_context
                    {
                        egl_surface.resize(width, height);
                        unsafe { gl_api.viewport(0, 0, width as i32, height as i32) };
                    }
                }
                None => {}
            },
        }
        Ok(())
    }

    fn iterate(&mut self) -> anyhow::Result<()> {
        self.window.pump_events()?;

        while let Some(event) = self.window.pop_event() {
            self.handle_event(&event)?;
            if let (Some(app_handler), GraphicsContext::Initialized(igc)) =
                (self.app_handler.as_mut(), &self.graphics_context)
            {
                app_handler.handle_event(
                    AppContext {
                        window: self.window.as_mut(),
                        gl: &igc.gl_api,
                    },
                    &event,
                );
            }
        }

        if self.close_requested {
            return Ok(());
        }

        let (
            Some(app_handler),
            GraphicsContext::Initialized(InitializedGraphicsContext {
                egl_connection,
                egl_surface: Some(egl_surface),
                gl_api,
                ..
            }),
        ) = (self.app_handler.as_mut(), &self.graphics_context)
        else {
            return Ok(());
        };

        let now = self.clock.now();
        let frame = Frame {
            delta_time: now - self.last_frame_time,
        };
        self.last_frame_time = now;

        if let Some(fps) = self.fps.tick(now) {
            let title = format_title(&self.config.window.title, fps, self.config.credit.as_deref());
            self.window.set_title(&title);
        }

        app_handler.iterate(
            AppContext {
                window: self.window.as_mut(),
                gl: gl_api,
            },
            frame,
        );

        egl_connection
            .swap_buffers(egl_surface)
            .context("could not present frame")?;

        Ok(())
    }

    /// drops the app handler while its gl context is still current.
    fn shutdown(&mut self) {
        if self.app_handler.take().is_some() {
            log::debug!("destroyed app handler");
        }
        self.graphics_context = GraphicsContext::Uninit;
    }
}

/// runs the app until the window is closed or escape is pressed. any failure is logged and turns
/// into a failing exit code after every resource was released.
pub fn run<A: AppHandler>(config: AppConfig) -> ExitCode {
    Logger::init(config.log_level);

    let mut ctx = match Context::<A>::new(config) {
        Ok(ctx) => ctx,
        Err(err) => {
            log::error!("could not create app context: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let mut exit_code = ExitCode::SUCCESS;
    while !ctx.close_requested {
        if let Err(err) = ctx.iterate() {
            log::error!("{err:#}");
            exit_code = ExitCode::FAILURE;
            break;
        }
    }

    ctx.shutdown();
    drop(ctx);
    exit_code
}
