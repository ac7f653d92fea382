mod libegl;
pub mod libwayland_egl;
pub mod wrap;

pub use libegl::*;
