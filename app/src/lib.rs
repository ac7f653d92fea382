use std::rc::Rc;

use window::{Event, Window, WindowAttrs};

mod control;
mod fps;
mod logger;

pub use control::Control;
pub use fps::{FpsCounter, format_title};
pub use logger::Logger;

#[cfg(unix)]
mod app_native;
#[cfg(unix)]
pub use app_native::run;

pub struct AppContext<'a> {
    pub window: &'a mut dyn Window,
    pub gl: &'a Rc<gl::Api>,
}

#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// seconds since the previous frame.
    pub delta_time: f64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window: WindowAttrs,
    /// requested opengl core profile version.
    pub gl_version: (u8, u8),
    /// `Some(0)` disables vsync, `None` leaves the driver's default.
    pub swap_interval: Option<i32>,
    /// static suffix for the window title that shows the fps counter.
    pub credit: Option<String>,
    pub log_level: log::LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowAttrs::default(),
            gl_version: (4, 6),
            swap_interval: Some(0),
            credit: None,
            log_level: log::LevelFilter::Info,
        }
    }
}

pub trait AppHandler: Sized {
    /// called once the window and the gl context exist. returning an error terminates the app
    /// with a non-zero exit code.
    fn create(ctx: AppContext) -> anyhow::Result<Self>;

    /// every event is delivered here before the frame it arrived in is rendered; closing and
    /// viewport resizing are already taken care of by the app.
    fn handle_event(&mut self, _ctx: AppContext, _event: &Event) {}

    /// renders one frame; buffers are swapped after this returns.
    fn iterate(&mut self, ctx: AppContext, frame: Frame);
}
