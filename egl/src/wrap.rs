use std::ffi::{CStr, c_int, c_ulong, c_void};
use std::ptr::{null, null_mut};
use std::{array, error, fmt};

use raw_window_handle as rwh;

use crate::libegl::*;
use crate::libwayland_egl::{LibWaylandEgl, wl_egl_window};

// NOTE: Connection hands out handles to resources that it creates and is responsible for their
// cleanup; resources that were not destroyed explicitly are destroyed when Connection drops.

// ----
// errors

#[derive(Debug)]
pub enum Error {
    CouldNotLoad(dynlib::Error),
    UnsupportedDisplay(String),
    UnsupportedWindow(String),
    CouldNotGetDisplay,
    NoMatchingConfig,
    CouldNotCreateWlEglWindow,
    Egl { op: &'static str, code: EGLint },
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::CouldNotLoad(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CouldNotLoad(err) => f.write_fmt(format_args!("could not load egl: {err}")),
            Self::UnsupportedDisplay(display) => {
                f.write_fmt(format_args!("unsupported display: {display}"))
            }
            Self::UnsupportedWindow(window) => {
                f.write_fmt(format_args!("unsupported window: {window}"))
            }
            Self::CouldNotGetDisplay => f.write_str("could not get display"),
            Self::NoMatchingConfig => f.write_str("could not choose config (no compatible ones)"),
            Self::CouldNotCreateWlEglWindow => {
                f.write_str("could not create wl egl window, make sure params are correct")
            }
            Self::Egl { op, code } => f.write_fmt(format_args!(
                "could not {op}: {name} ({code:#x})",
                name = error_name(*code)
            )),
        }
    }
}

// ----
// attribs

/// `NONE`-terminated attribute list builder.
#[derive(Debug, Clone)]
pub struct Attribs(Vec<EGLint>);

impl Default for Attribs {
    fn default() -> Self {
        Self(vec![NONE])
    }
}

impl Attribs {
    pub fn push(&mut self, attr: EGLint, value: EGLint) -> &mut Self {
        let terminator = self.0.pop();
        debug_assert_eq!(terminator, Some(NONE));
        self.0.extend_from_slice(&[attr, value, NONE]);
        self
    }

    pub fn as_slice(&self) -> &[EGLint] {
        &self.0
    }
}

// ----
// display

enum DisplayKind {
    /// eglGetPlatformDisplay
    Platform,
    /// eglGetDisplay
    /// > the set of platforms to which display_id is permitted to belong, as well as the actual
    /// type of display_id, are implementation-specific.
    /// - https://registry.khronos.org/EGL/sdk/docs/man/html/eglGetDisplay.xhtml
    Legacy,
}

fn get_display(
    api: &Api,
    platform: EGLenum,
    native_display: *mut c_void,
) -> Option<(EGLDisplay, DisplayKind)> {
    if api.is_loaded("GetPlatformDisplay") {
        let dpy = unsafe { api.GetPlatformDisplay(platform, native_display, null()) };
        if dpy != NO_DISPLAY {
            return Some((dpy, DisplayKind::Platform));
        }
    }
    let dpy = unsafe { api.GetDisplay(native_display) };
    (dpy != NO_DISPLAY).then_some((dpy, DisplayKind::Legacy))
}

// ----
// context

pub struct Context {
    index: u8,
    pub context: EGLContext,
    pub config: EGLConfig,
}

// ----
// surface

// NOTE: wsi stands for window system integration; it is somewhat modelled after
// https://registry.khronos.org/vulkan/specs/latest/html/vkspec.html#wsi

struct WaylandWsi {
    lib: LibWaylandEgl,
    wl_egl_window: *mut wl_egl_window,
}

impl WaylandWsi {
    fn new(wl_surface: *mut c_void, width: u32, height: u32) -> Result<Self, Error> {
        let lib = LibWaylandEgl::load().map_err(Error::CouldNotLoad)?;
        let wl_egl_window =
            unsafe { lib.wl_egl_window_create(wl_surface, width as c_int, height as c_int) };
        if wl_egl_window.is_null() {
            return Err(Error::CouldNotCreateWlEglWindow);
        }
        Ok(Self { lib, wl_egl_window })
    }
}

impl Drop for WaylandWsi {
    fn drop(&mut self) {
        unsafe { self.lib.wl_egl_window_destroy(self.wl_egl_window) };
    }
}

enum Wsi {
    Wayland(WaylandWsi),
    // NOTE: boxed because eglCreatePlatformWindowSurface wants a pointer to the xlib Window.
    Xlib(Box<c_ulong>),
}

impl Wsi {
    fn new(window_handle: rwh::WindowHandle, width: u32, height: u32) -> Result<Self, Error> {
        match window_handle.as_raw() {
            rwh::RawWindowHandle::Wayland(wayland) => {
                WaylandWsi::new(wayland.surface.as_ptr(), width, height).map(Self::Wayland)
            }
            rwh::RawWindowHandle::Xlib(xlib) => Ok(Self::Xlib(Box::new(xlib.window))),
            other => Err(Error::UnsupportedWindow(format!("{other:?}"))),
        }
    }

    fn as_platform_window(&mut self) -> *mut c_void {
        match self {
            Self::Wayland(wayland) => wayland.wl_egl_window.cast(),
            Self::Xlib(window) => (window.as_mut() as *mut c_ulong).cast(),
        }
    }

    fn as_native_window(&self) -> EGLNativeWindowType {
        match self {
            Self::Wayland(wayland) => wayland.wl_egl_window.cast(),
            Self::Xlib(window) => **window as usize as EGLNativeWindowType,
        }
    }

    fn resize(&self, width: u32, height: u32) {
        match self {
            Self::Wayland(wayland) => unsafe {
                wayland.lib.wl_egl_window_resize(
                    wayland.wl_egl_window,
                    width as c_int,
                    height as c_int,
                    0,
                    0,
                )
            },
            // NOTE: x server resizes the drawable on its own.
            Self::Xlib(_) => {}
        }
    }
}

pub struct Surface {
    index: u8,
    wsi: Wsi,
    pub surface: EGLSurface,
    pub config: EGLConfig,
}

impl Surface {
    pub fn resize(&self, width: u32, height: u32) {
        self.wsi.resize(width, height);
    }
}

// ----
// connection

pub struct Connection {
    pub api: LibEgl,
    pub display: EGLDisplay,
    display_kind: DisplayKind,
    pub version: (EGLint, EGLint),

    contexts: [Option<EGLContext>; 4],
    surfaces: [Option<EGLSurface>; 4],
}

impl Drop for Connection {
    fn drop(&mut self) {
        unsafe {
            self.api
                .MakeCurrent(self.display, NO_SURFACE, NO_SURFACE, NO_CONTEXT)
        };

        for surface in self.surfaces.iter_mut().filter_map(Option::take) {
            unsafe { self.api.DestroySurface(self.display, surface) };
        }
        for context in self.contexts.iter_mut().filter_map(Option::take) {
            unsafe { self.api.DestroyContext(self.display, context) };
        }

        unsafe { self.api.Terminate(self.display) };
        log::debug!("terminated egl display");
    }
}

impl Connection {
    pub fn from_display_handle(display_handle: rwh::DisplayHandle) -> Result<Self, Error> {
        let (platform, native_display) = match display_handle.as_raw() {
            rwh::RawDisplayHandle::Wayland(wayland) => {
                (PLATFORM_WAYLAND_KHR, wayland.display.as_ptr())
            }
            rwh::RawDisplayHandle::Xlib(xlib) => (
                PLATFORM_X11_KHR,
                xlib.display.map_or(null_mut(), |display| display.as_ptr()),
            ),
            other => return Err(Error::UnsupportedDisplay(format!("{other:?}"))),
        };

        let api = LibEgl::load().map_err(Error::CouldNotLoad)?;

        let (display, display_kind) =
            get_display(&api, platform, native_display).ok_or(Error::CouldNotGetDisplay)?;

        let mut version = (0, 0);
        if unsafe { api.Initialize(display, &mut version.0, &mut version.1) } == FALSE {
            let code = unsafe { api.GetError() };
            return Err(Error::Egl {
                op: "initialize display",
                code,
            });
        }
        log::info!("initialized egl {}.{}", version.0, version.1);

        Ok(Self {
            api,
            display,
            display_kind,
            version,
            contexts: array::from_fn(|_| None),
            surfaces: array::from_fn(|_| None),
        })
    }

    pub fn last_error(&self, op: &'static str) -> Error {
        let code = unsafe { self.api.GetError() };
        Error::Egl { op, code }
    }

    pub fn query_string(&self, name: EGLint) -> Option<String> {
        let ptr = unsafe { self.api.QueryString(self.display, name) };
        if ptr.is_null() {
            return None;
        }
        Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }

    /// returns the first config that matches. EGLConfig does not need clean up.
    pub fn choose_config(&self, attribs: &Attribs) -> Result<EGLConfig, Error> {
        let mut num_configs = 0;
        if unsafe { self.api.GetConfigs(self.display, null_mut(), 0, &mut num_configs) } == FALSE {
            return Err(self.last_error("get num configs"));
        }

        let mut configs = vec![null_mut(); num_configs as usize];
        if unsafe {
            self.api.ChooseConfig(
                self.display,
                attribs.as_slice().as_ptr(),
                configs.as_mut_ptr(),
                num_configs,
                &mut num_configs,
            )
        } == FALSE
        {
            return Err(self.last_error("choose config"));
        }
        configs.truncate(num_configs as usize);
        configs.first().copied().ok_or(Error::NoMatchingConfig)
    }

    pub fn create_context(
        &mut self,
        api: EGLenum,
        config: EGLConfig,
        attribs: &Attribs,
    ) -> Result<Context, Error> {
        if unsafe { self.api.BindAPI(api) } == FALSE {
            return Err(self.last_error("bind api"));
        }

        let context = unsafe {
            self.api.CreateContext(
                self.display,
                config,
                NO_CONTEXT,
                attribs.as_slice().as_ptr(),
            )
        };
        if context == NO_CONTEXT {
            return Err(self.last_error("create context"));
        }

        let index = self
            .contexts
            .iter()
            .position(Option::is_none)
            .expect("exhausted context capacity");
        self.contexts[index] = Some(context);
        Ok(Context {
            index: index as u8,
            context,
            config,
        })
    }

    /// panics if handle is invalid.
    pub fn destroy_context(&mut self, c: Context) {
        let context = self.contexts[c.index as usize]
            .take()
            .expect("invalid context handle");
        unsafe { self.api.DestroyContext(self.display, context) };
    }

    pub fn create_window_surface(
        &mut self,
        config: EGLConfig,
        window_handle: rwh::WindowHandle,
        width: u32,
        height: u32,
    ) -> Result<Surface, Error> {
        assert!(width > 0);
        assert!(height > 0);

        let mut wsi = Wsi::new(window_handle, width, height)?;
        let surface = match self.display_kind {
            DisplayKind::Platform => unsafe {
                self.api.CreatePlatformWindowSurface(
                    self.display,
                    config,
                    wsi.as_platform_window(),
                    null(),
                )
            },
            DisplayKind::Legacy => unsafe {
                self.api
                    .CreateWindowSurface(self.display, config, wsi.as_native_window(), null())
            },
        };
        if surface == NO_SURFACE {
            return Err(self.last_error("create window surface"));
        }

        let index = self
            .surfaces
            .iter()
            .position(Option::is_none)
            .expect("exhausted surface capacity");
        self.surfaces[index] = Some(surface);
        Ok(Surface {
            index: index as u8,
            wsi,
            surface,
            config,
        })
    }

    /// panics if handle is invalid.
    pub fn destroy_surface(&mut self, s: Surface) {
        let surface = self.surfaces[s.index as usize]
            .take()
            .expect("invalid surface handle");
        unsafe { self.api.DestroySurface(self.display, surface) };
        // NOTE: wsi (wl_egl_window) must outlive egl surface; it drops with `s` here.
    }

    pub fn make_current(&self, surface: Option<&Surface>, context: &Context) -> Result<(), Error> {
        let surface = surface.map_or(NO_SURFACE, |s| s.surface);
        if unsafe {
            self.api
                .MakeCurrent(self.display, surface, surface, context.context)
        } == FALSE
        {
            return Err(self.last_error("make current"));
        }
        Ok(())
    }

    pub fn set_swap_interval(&self, interval: EGLint) -> Result<(), Error> {
        if unsafe { self.api.SwapInterval(self.display, interval) } == FALSE {
            return Err(self.last_error("set swap interval"));
        }
        Ok(())
    }

    pub fn swap_buffers(&self, surface: &Surface) -> Result<(), Error> {
        if unsafe { self.api.SwapBuffers(self.display, surface.surface) } == FALSE {
            return Err(self.last_error("swap buffers"));
        }
        Ok(())
    }

    pub fn get_proc_address(&self, procname: &CStr) -> *const c_void {
        unsafe { self.api.GetProcAddress(procname.as_ptr()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribs_stay_none_terminated() {
        let mut attribs = Attribs::default();
        assert_eq!(attribs.as_slice(), &[NONE]);

        attribs.push(RED_SIZE, 8).push(DEPTH_SIZE, 24);
        assert_eq!(attribs.as_slice(), &[RED_SIZE, 8, DEPTH_SIZE, 24, NONE]);
    }

    #[test]
    fn test_error_display_names_code() {
        let err = Error::Egl {
            op: "make current",
            code: BAD_MATCH,
        };
        assert_eq!(err.to_string(), "could not make current: EGL_BAD_MATCH (0x3009)");
    }
}
