use std::ffi::{c_int, c_void};
use std::ops::Deref;

use dynlib::DynLib;

dynlib::opaque_struct!(wl_egl_window);

dynlib::api! {
    fn wl_egl_window_create = c"wl_egl_window_create" (
        surface: *mut c_void,
        width: c_int,
        height: c_int,
    ) -> *mut wl_egl_window;
    fn wl_egl_window_destroy = c"wl_egl_window_destroy" (egl_window: *mut wl_egl_window);
    fn wl_egl_window_resize = c"wl_egl_window_resize" (
        egl_window: *mut wl_egl_window,
        width: c_int,
        height: c_int,
        dx: c_int,
        dy: c_int,
    );
}

pub struct LibWaylandEgl {
    api: Api,
    _dynlib: DynLib,
}

impl Deref for LibWaylandEgl {
    type Target = Api;

    fn deref(&self) -> &Self::Target {
        &self.api
    }
}

impl LibWaylandEgl {
    pub fn load() -> Result<Self, dynlib::Error> {
        let dynlib = DynLib::open_any(&[c"libwayland-egl.so.1", c"libwayland-egl.so"])?;
        let api = unsafe {
            Api::load_with(|name| dynlib.lookup::<*const c_void>(name).unwrap_or(std::ptr::null()))
        };
        Ok(Self {
            api,
            _dynlib: dynlib,
        })
    }
}
