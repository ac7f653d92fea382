use std::collections::VecDeque;

use anyhow::{Context, anyhow};
use input::{KeyState, KeyboardEvent, RawKey, Scancode};
use raw_window_handle::{self as rwh, HasDisplayHandle as _, HasWindowHandle as _};
use winit::platform::pump_events::EventLoopExtPumpEvents;

use crate::{DEFAULT_LOGICAL_SIZE, Event, Window, WindowAttrs, WindowEvent};

#[inline]
fn map_keyboard_physical_key(physical_key: winit::keyboard::PhysicalKey) -> Scancode {
    use winit::keyboard::{KeyCode, NativeKeyCode, PhysicalKey};
    match physical_key {
        PhysicalKey::Code(KeyCode::Escape) => Scancode::Esc,
        // NOTE: xkb keycodes are evdev codes offset by 8.
        PhysicalKey::Unidentified(NativeKeyCode::Xkb(code)) if code >= 8 => {
            Scancode::from_unix(code - 8)
        }
        _ => Scancode::Unidentified(RawKey::Unidentified),
    }
}

struct App {
    window_attrs: WindowAttrs,

    window: Option<winit::window::Window>,
    window_create_error: Option<winit::error::OsError>,

    events: VecDeque<Event>,
}

pub struct WinitBackend {
    event_loop: winit::event_loop::EventLoop<()>,
    app: App,
}

impl winit::application::ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let logical_size = self
            .window_attrs
            .logical_size
            .unwrap_or(DEFAULT_LOGICAL_SIZE);

        let window_attrs = winit::window::WindowAttributes::default()
            .with_title(self.window_attrs.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                logical_size.0 as f64,
                logical_size.1 as f64,
            ))
            .with_resizable(self.window_attrs.resizable);
        match event_loop.create_window(window_attrs) {
            Ok(window) => {
                self.window = Some(window);
                self.events
                    .push_back(Event::Window(WindowEvent::Configure { logical_size }));
                log::info!("created winit window");
            }
            Err(err) => self.window_create_error = Some(err),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &winit::event_loop::ActiveEventLoop,
        window_id: winit::window::WindowId,
        window_event: winit::event::WindowEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        if window.id() != window_id {
            return;
        }

        use winit::event::WindowEvent::*;
        let maybe_event = match window_event {
            Resized(physical_size) => Some(Event::Window(WindowEvent::Resized {
                physical_size: (physical_size.width, physical_size.height),
            })),
            KeyboardInput { event, .. } => Some(Event::Keyboard(KeyboardEvent::Key {
                state: if event.state.is_pressed() {
                    KeyState::Pressed
                } else {
                    KeyState::Released
                },
                scancode: map_keyboard_physical_key(event.physical_key),
                repeat: event.repeat,
            })),
            CloseRequested => Some(Event::Window(WindowEvent::CloseRequested)),
            other => {
                log::trace!("unused window event: {other:?}");
                None
            }
        };
        if let Some(event) = maybe_event {
            self.events.push_back(event);
        }
    }
}

impl WinitBackend {
    pub fn new(attrs: WindowAttrs) -> anyhow::Result<Self> {
        Ok(Self {
            event_loop: winit::event_loop::EventLoop::new()?,
            app: App {
                window_attrs: attrs,

                window: None,
                window_create_error: None,

                events: VecDeque::new(),
            },
        })
    }
}

impl rwh::HasDisplayHandle for WinitBackend {
    fn display_handle(&self) -> Result<rwh::DisplayHandle<'_>, rwh::HandleError> {
        self.event_loop.display_handle()
    }
}

impl rwh::HasWindowHandle for WinitBackend {
    fn window_handle(&self) -> Result<rwh::WindowHandle<'_>, rwh::HandleError> {
        if let Some(ref window) = self.app.window {
            window.window_handle()
        } else {
            Err(rwh::HandleError::Unavailable)
        }
    }
}

impl Window for WinitBackend {
    fn pump_events(&mut self) -> anyhow::Result<()> {
        use std::time::Duration;
        use winit::platform::pump_events::PumpStatus;

        let ret = match self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.app)
        {
            PumpStatus::Exit(code) => Err(anyhow!("unexpected exit (code {code})")),
            PumpStatus::Continue => Ok(()),
        };

        if let Some(err) = self.app.window_create_error.take() {
            return Err(err).context("could not create window");
        }

        ret
    }

    fn pop_event(&mut self) -> Option<Event> {
        self.app.events.pop_front()
    }

    fn set_title(&mut self, title: &str) {
        if let Some(ref window) = self.app.window {
            window.set_title(title);
        }
    }

    fn size(&self) -> (u32, u32) {
        self.app.window.as_ref().map_or((0, 0), |window| {
            let inner_size = window.inner_size();
            (inner_size.width, inner_size.height)
        })
    }
}
