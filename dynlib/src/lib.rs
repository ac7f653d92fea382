use std::ffi::{CStr, c_void};
use std::mem::transmute_copy;
use std::ptr::NonNull;
use std::{error, fmt};

use libc::{dlclose, dlerror, dlopen, dlsym};

#[derive(Debug)]
pub enum Error {
    Open { filename: String, reason: String },
    Lookup { name: String, reason: String },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { filename, reason } => {
                f.write_fmt(format_args!("could not open {filename}: {reason}"))
            }
            Self::Lookup { name, reason } => {
                f.write_fmt(format_args!("could not lookup {name}: {reason}"))
            }
        }
    }
}

/// NOTE: the string returned by dlerror is owned by libc, it must not be freed.
fn last_dlerror() -> Option<String> {
    let err = unsafe { dlerror() };
    if err.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(err) }.to_string_lossy().into_owned())
    }
}

pub struct DynLib(NonNull<c_void>);

impl DynLib {
    pub fn open(filename: &CStr) -> Result<Self, Error> {
        let handle = unsafe { dlopen(filename.as_ptr(), libc::RTLD_LAZY | libc::RTLD_LOCAL) };
        NonNull::new(handle).map(Self).ok_or_else(|| Error::Open {
            filename: filename.to_string_lossy().into_owned(),
            reason: last_dlerror().unwrap_or_else(|| "unknown dlerror".to_string()),
        })
    }

    /// tries each filename in order, returns the error of the last one if none of them could be
    /// opened.
    pub fn open_any(filenames: &[&CStr]) -> Result<Self, Error> {
        let mut last_err = None;
        for filename in filenames {
            match Self::open(filename) {
                Ok(dynlib) => return Ok(dynlib),
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or_else(|| Error::Open {
            filename: String::new(),
            reason: "no filenames were given".to_string(),
        }))
    }

    /// F must be a function pointer type (or anything else that is pointer sized).
    pub fn lookup<F: Sized>(&self, name: &CStr) -> Result<F, Error> {
        assert_eq!(size_of::<F>(), size_of::<*mut c_void>());

        // NOTE: a symbol may legitimately resolve to null, dlerror is the only reliable way to
        // tell failures apart.
        _ = last_dlerror();
        let addr = unsafe { dlsym(self.0.as_ptr(), name.as_ptr()) };
        match last_dlerror() {
            Some(reason) => Err(Error::Lookup {
                name: name.to_string_lossy().into_owned(),
                reason,
            }),
            None => Ok(unsafe { transmute_copy(&addr) }),
        }
    }
}

impl Drop for DynLib {
    fn drop(&mut self) {
        unsafe { dlclose(self.0.as_ptr()) };
    }
}

#[macro_export]
macro_rules! opaque_struct {
    ($name:ident) => {
        #[repr(C)]
        pub struct $name {
            _data: [u8; 0],
            _marker: std::marker::PhantomData<(*mut u8, std::marker::PhantomPinned)>,
        }
    };
}

#[cold]
#[inline(never)]
pub fn null_fn_ptr_panic() -> ! {
    panic!("function was not loaded")
}

/// declares a table of dynamically loaded functions.
///
/// expands into `pub struct Api` with a `load_with` constructor that resolves every function by
/// its c name and an `unsafe` method per function. functions that could not be resolved panic when
/// called; use `is_loaded` to check before calling optional ones.
///
/// ```ignore
/// dynlib::api! {
///     /// libfoo
///     fn Foo = c"fooFoo" (bar: c_int) -> c_int;
/// }
/// ```
#[macro_export]
macro_rules! api {
    (
        $(#[$meta:meta])*
        $(
            fn $name:ident = $symbol:literal ( $($param:ident : $param_ty:ty),* $(,)? ) $(-> $ret:ty)?;
        )*
    ) => {
        $(#[$meta])*
        #[allow(non_snake_case)]
        pub struct Api {
            $($name: *const std::ffi::c_void,)*
        }

        #[allow(non_snake_case)]
        #[allow(clippy::too_many_arguments)]
        impl Api {
            /// # Safety
            ///
            /// `get_proc_address` must return either null or pointers to functions with matching
            /// signatures.
            pub unsafe fn load_with<F>(mut get_proc_address: F) -> Self
            where
                F: FnMut(&std::ffi::CStr) -> *const std::ffi::c_void,
            {
                Self {
                    $($name: get_proc_address($symbol),)*
                }
            }

            pub fn is_loaded(&self, name: &str) -> bool {
                match name {
                    $(stringify!($name) => !self.$name.is_null(),)*
                    _ => false,
                }
            }

            $(
                #[inline]
                pub unsafe fn $name(&self, $($param: $param_ty),*) $(-> $ret)? {
                    type Dst = unsafe extern "system" fn($($param_ty),*) $(-> $ret)?;
                    if self.$name.is_null() {
                        $crate::null_fn_ptr_panic();
                    }
                    unsafe { std::mem::transmute::<*const std::ffi::c_void, Dst>(self.$name)($($param),*) }
                }
            )*
        }
    };
}

#[cfg(test)]
mod tests {
    use std::ffi::{c_int, c_void};

    use super::*;

    extern "system" fn add_one(value: c_int) -> c_int {
        value + 1
    }

    crate::api! {
        fn AddOne = c"add_one" (value: c_int) -> c_int;
        fn Missing = c"missing" ();
    }

    #[test]
    fn test_api_load_with() {
        let api = unsafe {
            Api::load_with(|name| {
                if name == c"add_one" {
                    add_one as *const c_void
                } else {
                    std::ptr::null()
                }
            })
        };
        assert!(api.is_loaded("AddOne"));
        assert!(!api.is_loaded("Missing"));
        assert!(!api.is_loaded("Unknown"));
        assert_eq!(unsafe { api.AddOne(41) }, 42);
    }

    #[test]
    fn test_open_missing_library() {
        let err = DynLib::open(c"libdefinitely-not-a-real-library.so.0")
            .err()
            .expect("should fail");
        assert!(matches!(err, Error::Open { .. }));
        assert!(err.to_string().contains("libdefinitely-not-a-real-library"));
    }

    #[test]
    fn test_open_any_reports_last_error() {
        let err = DynLib::open_any(&[c"libnope-a.so", c"libnope-b.so"])
            .err()
            .expect("should fail");
        let Error::Open { filename, .. } = &err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(filename, "libnope-b.so");
    }
}
