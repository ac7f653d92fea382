use std::ffi::{CStr, c_char, c_void};
use std::ops::Deref;

use dynlib::DynLib;

// types
// ----

pub type EGLBoolean = u32;
pub type EGLint = i32;
pub type EGLenum = u32;
pub type EGLAttrib = isize;
pub type EGLDisplay = *mut c_void;
pub type EGLConfig = *mut c_void;
pub type EGLContext = *mut c_void;
pub type EGLSurface = *mut c_void;
pub type EGLNativeDisplayType = *mut c_void;
pub type EGLNativeWindowType = *mut c_void;
pub type EGLProc = *const c_void;

// enums
// ----

pub const FALSE: EGLBoolean = 0;
pub const TRUE: EGLBoolean = 1;

pub const NO_DISPLAY: EGLDisplay = std::ptr::null_mut();
pub const NO_CONTEXT: EGLContext = std::ptr::null_mut();
pub const NO_SURFACE: EGLSurface = std::ptr::null_mut();

pub const SUCCESS: EGLint = 0x3000;
pub const NOT_INITIALIZED: EGLint = 0x3001;
pub const BAD_ACCESS: EGLint = 0x3002;
pub const BAD_ALLOC: EGLint = 0x3003;
pub const BAD_ATTRIBUTE: EGLint = 0x3004;
pub const BAD_CONFIG: EGLint = 0x3005;
pub const BAD_CONTEXT: EGLint = 0x3006;
pub const BAD_CURRENT_SURFACE: EGLint = 0x3007;
pub const BAD_DISPLAY: EGLint = 0x3008;
pub const BAD_MATCH: EGLint = 0x3009;
pub const BAD_NATIVE_PIXMAP: EGLint = 0x300A;
pub const BAD_NATIVE_WINDOW: EGLint = 0x300B;
pub const BAD_PARAMETER: EGLint = 0x300C;
pub const BAD_SURFACE: EGLint = 0x300D;
pub const CONTEXT_LOST: EGLint = 0x300E;

pub const NONE: EGLint = 0x3038;

pub const ALPHA_SIZE: EGLint = 0x3021;
pub const BLUE_SIZE: EGLint = 0x3022;
pub const GREEN_SIZE: EGLint = 0x3023;
pub const RED_SIZE: EGLint = 0x3024;
pub const DEPTH_SIZE: EGLint = 0x3025;
pub const STENCIL_SIZE: EGLint = 0x3026;
pub const SAMPLE_BUFFERS: EGLint = 0x3032;
pub const SURFACE_TYPE: EGLint = 0x3033;
pub const RENDERABLE_TYPE: EGLint = 0x3040;
pub const CONFORMANT: EGLint = 0x3042;

pub const WINDOW_BIT: EGLint = 0x0004;
pub const OPENGL_BIT: EGLint = 0x0008;

pub const VENDOR: EGLint = 0x3053;
pub const VERSION: EGLint = 0x3054;
pub const EXTENSIONS: EGLint = 0x3055;
pub const CLIENT_APIS: EGLint = 0x308D;

pub const OPENGL_API: EGLenum = 0x30A2;

pub const CONTEXT_MAJOR_VERSION: EGLint = 0x3098;
pub const CONTEXT_MINOR_VERSION: EGLint = 0x30FB;
pub const CONTEXT_OPENGL_PROFILE_MASK: EGLint = 0x30FD;
pub const CONTEXT_OPENGL_CORE_PROFILE_BIT: EGLint = 0x0001;
pub const CONTEXT_OPENGL_DEBUG: EGLint = 0x31B0;
pub const CONTEXT_OPENGL_FORWARD_COMPATIBLE: EGLint = 0x31B1;

pub const PLATFORM_X11_KHR: EGLenum = 0x31D5;
pub const PLATFORM_WAYLAND_KHR: EGLenum = 0x31D8;

pub fn error_name(code: EGLint) -> &'static str {
    match code {
        SUCCESS => "EGL_SUCCESS",
        NOT_INITIALIZED => "EGL_NOT_INITIALIZED",
        BAD_ACCESS => "EGL_BAD_ACCESS",
        BAD_ALLOC => "EGL_BAD_ALLOC",
        BAD_ATTRIBUTE => "EGL_BAD_ATTRIBUTE",
        BAD_CONFIG => "EGL_BAD_CONFIG",
        BAD_CONTEXT => "EGL_BAD_CONTEXT",
        BAD_CURRENT_SURFACE => "EGL_BAD_CURRENT_SURFACE",
        BAD_DISPLAY => "EGL_BAD_DISPLAY",
        BAD_MATCH => "EGL_BAD_MATCH",
        BAD_NATIVE_PIXMAP => "EGL_BAD_NATIVE_PIXMAP",
        BAD_NATIVE_WINDOW => "EGL_BAD_NATIVE_WINDOW",
        BAD_PARAMETER => "EGL_BAD_PARAMETER",
        BAD_SURFACE => "EGL_BAD_SURFACE",
        CONTEXT_LOST => "EGL_CONTEXT_LOST",
        _ => "unknown egl error",
    }
}

// api
// ----

dynlib::api! {
    fn GetProcAddress = c"eglGetProcAddress" (procname: *const c_char) -> EGLProc;
    fn GetError = c"eglGetError" () -> EGLint;
    fn GetDisplay = c"eglGetDisplay" (display_id: EGLNativeDisplayType) -> EGLDisplay;
    fn GetPlatformDisplay = c"eglGetPlatformDisplay" (
        platform: EGLenum,
        native_display: *mut c_void,
        attrib_list: *const EGLAttrib,
    ) -> EGLDisplay;
    fn Initialize = c"eglInitialize" (dpy: EGLDisplay, major: *mut EGLint, minor: *mut EGLint) -> EGLBoolean;
    fn Terminate = c"eglTerminate" (dpy: EGLDisplay) -> EGLBoolean;
    fn QueryString = c"eglQueryString" (dpy: EGLDisplay, name: EGLint) -> *const c_char;
    fn BindAPI = c"eglBindAPI" (api: EGLenum) -> EGLBoolean;
    fn GetConfigs = c"eglGetConfigs" (
        dpy: EGLDisplay,
        configs: *mut EGLConfig,
        config_size: EGLint,
        num_config: *mut EGLint,
    ) -> EGLBoolean;
    fn ChooseConfig = c"eglChooseConfig" (
        dpy: EGLDisplay,
        attrib_list: *const EGLint,
        configs: *mut EGLConfig,
        config_size: EGLint,
        num_config: *mut EGLint,
    ) -> EGLBoolean;
    fn CreateContext = c"eglCreateContext" (
        dpy: EGLDisplay,
        config: EGLConfig,
        share_context: EGLContext,
        attrib_list: *const EGLint,
    ) -> EGLContext;
    fn DestroyContext = c"eglDestroyContext" (dpy: EGLDisplay, ctx: EGLContext) -> EGLBoolean;
    fn CreateWindowSurface = c"eglCreateWindowSurface" (
        dpy: EGLDisplay,
        config: EGLConfig,
        win: EGLNativeWindowType,
        attrib_list: *const EGLint,
    ) -> EGLSurface;
    fn CreatePlatformWindowSurface = c"eglCreatePlatformWindowSurface" (
        dpy: EGLDisplay,
        config: EGLConfig,
        native_window: *mut c_void,
        attrib_list: *const EGLAttrib,
    ) -> EGLSurface;
    fn DestroySurface = c"eglDestroySurface" (dpy: EGLDisplay, surface: EGLSurface) -> EGLBoolean;
    fn MakeCurrent = c"eglMakeCurrent" (
        dpy: EGLDisplay,
        draw: EGLSurface,
        read: EGLSurface,
        ctx: EGLContext,
    ) -> EGLBoolean;
    fn SwapBuffers = c"eglSwapBuffers" (dpy: EGLDisplay, surface: EGLSurface) -> EGLBoolean;
    fn SwapInterval = c"eglSwapInterval" (dpy: EGLDisplay, interval: EGLint) -> EGLBoolean;
}

pub struct LibEgl {
    api: Api,
    _dynlib: DynLib,
}

impl Deref for LibEgl {
    type Target = Api;

    fn deref(&self) -> &Self::Target {
        &self.api
    }
}

impl LibEgl {
    pub fn load() -> Result<Self, dynlib::Error> {
        let dynlib = DynLib::open_any(&[c"libEGL.so.1", c"libEGL.so"])?;

        // NOTE: some funcs (the ones that get enabled by extensions) cannot be loaded with dlsym,
        // but only with eglGetProcAddress. core ones are looked up with dlsym first.
        let get_proc_address = dynlib
            .lookup::<unsafe extern "system" fn(*const c_char) -> EGLProc>(c"eglGetProcAddress")?;

        let api = unsafe {
            Api::load_with(|name: &CStr| match dynlib.lookup::<EGLProc>(name) {
                Ok(ptr) if !ptr.is_null() => ptr,
                _ => get_proc_address(name.as_ptr()),
            })
        };

        Ok(Self {
            api,
            _dynlib: dynlib,
        })
    }
}
