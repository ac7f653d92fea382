//! rendering pieces of the GL_ARB_gl_spirv demos: capability queries, spir-v pipeline building,
//! triangle geometry and the per-frame render step.
//!
//! everything that talks to opengl is generic over [`gl::Adapter`] and expects a current context
//! on the calling thread.

pub mod capability;
pub mod geometry;
pub mod pipeline;
pub mod render;
pub mod resource;
pub mod spirv;
pub mod transform;

#[cfg(test)]
mod mock;

pub const APP_TITLE: &str = "OpenGL example - GL_ARB_gl_spirv";
pub const CREDIT: &str = "2016 by Sascha Willems (www.saschawillems.de)";
