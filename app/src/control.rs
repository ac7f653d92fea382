use input::Scancode;
use window::{Event, WindowEvent};

/// what the run loop does in response to an event, on top of forwarding it to the app handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Close,
    /// resize the surface and the viewport to this physical size.
    Resize { width: u32, height: u32 },
}

impl Control {
    pub fn for_event(event: &Event) -> Option<Self> {
        match event {
            Event::Window(WindowEvent::CloseRequested) => Some(Self::Close),
            Event::Window(WindowEvent::Resized {
                physical_size: (width, height),
            }) => {
                // NOTE: minimized windows report zero size.
                (*width > 0 && *height > 0).then_some(Self::Resize {
                    width: *width,
                    height: *height,
                })
            }
            Event::Window(WindowEvent::Configure { .. }) => None,
            Event::Keyboard(keyboard_event) => keyboard_event
                .is_press_of(Scancode::Esc)
                .then_some(Self::Close),
        }
    }
}
