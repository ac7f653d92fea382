use input::KeyboardEvent;
use raw_window_handle as rwh;

mod backend_winit;

pub const DEFAULT_LOGICAL_SIZE: (u32, u32) = (1280, 720);

#[derive(Debug, Clone)]
pub struct WindowAttrs {
    pub title: String,
    pub logical_size: Option<(u32, u32)>,
    pub resizable: bool,
}

impl Default for WindowAttrs {
    fn default() -> Self {
        Self {
            title: String::new(),
            logical_size: None,
            resizable: true,
        }
    }
}

#[derive(Debug, Clone)]
pub enum WindowEvent {
    /// the window was created and can be rendered into.
    Configure { logical_size: (u32, u32) },
    Resized { physical_size: (u32, u32) },
    CloseRequested,
}

#[derive(Debug, Clone)]
pub enum Event {
    Window(WindowEvent),
    Keyboard(KeyboardEvent),
}

pub trait Window: rwh::HasDisplayHandle + rwh::HasWindowHandle {
    /// polls pending os events without blocking; resulting events are queued for `pop_event`.
    fn pump_events(&mut self) -> anyhow::Result<()>;
    fn pop_event(&mut self) -> Option<Event>;
    fn set_title(&mut self, title: &str);
    /// physical size of the window's surface.
    fn size(&self) -> (u32, u32);
}

pub fn create_window(attrs: WindowAttrs) -> anyhow::Result<Box<dyn Window>> {
    backend_winit::WinitBackend::new(attrs).map(|backend| Box::new(backend) as Box<dyn Window>)
}
