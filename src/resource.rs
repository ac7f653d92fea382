use std::rc::Rc;

use anyhow::Context as _;
use gl::Adapter;

// NOTE: every wrapper deletes its object on drop, which calls into gl; the context they were
// created with must still be current when they drop.

macro_rules! owned_object {
    ($(#[$meta:meta])* $name:ident, $handle:ident, $create:ident, $delete:ident, $label:ident) => {
        $(#[$meta])*
        pub struct $name<A: Adapter> {
            gl: Rc<A>,
            handle: A::$handle,
        }

        impl<A: Adapter> $name<A> {
            /// # Safety
            ///
            /// a gl context must be current on the calling thread.
            pub unsafe fn create(gl: &Rc<A>, label: &str) -> anyhow::Result<Self> {
                let handle = unsafe { gl.$create() }
                    .with_context(|| format!("could not create {label}"))?;
                unsafe { gl.$label(handle, label) };
                Ok(Self {
                    gl: Rc::clone(gl),
                    handle,
                })
            }

            /// takes ownership of an existing object.
            pub fn from_raw(gl: &Rc<A>, handle: A::$handle) -> Self {
                Self {
                    gl: Rc::clone(gl),
                    handle,
                }
            }

            pub fn handle(&self) -> A::$handle {
                self.handle
            }
        }

        impl<A: Adapter> Drop for $name<A> {
            fn drop(&mut self) {
                unsafe { self.gl.$delete(self.handle) };
            }
        }

        impl<A: Adapter> std::fmt::Debug for $name<A> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.handle).finish()
            }
        }
    };
}

owned_object!(Buffer, Buffer, create_buffer, delete_buffer, label_buffer);
owned_object!(
    /// a linked program; the only long-lived object of a pipeline.
    Program,
    Program,
    create_program,
    delete_program,
    label_program
);
owned_object!(VertexArray, VertexArray, create_vertex_array, delete_vertex_array, label_vertex_array);

/// a shader stage. only lives while its pipeline is being built.
pub struct Shader<A: Adapter> {
    gl: Rc<A>,
    handle: A::Shader,
}

impl<A: Adapter> Shader<A> {
    /// # Safety
    ///
    /// a gl context must be current on the calling thread.
    pub unsafe fn create(gl: &Rc<A>, r#type: gl::GLenum, label: &str) -> anyhow::Result<Self> {
        let handle =
            unsafe { gl.create_shader(r#type) }.with_context(|| format!("could not create {label}"))?;
        unsafe { gl.label_shader(handle, label) };
        Ok(Self {
            gl: Rc::clone(gl),
            handle,
        })
    }

    pub fn handle(&self) -> A::Shader {
        self.handle
    }
}

impl<A: Adapter> Drop for Shader<A> {
    fn drop(&mut self) {
        unsafe { self.gl.delete_shader(self.handle) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Call, Kind, RecordingGl};

    #[test]
    fn test_objects_are_labelled_and_deleted_on_drop() {
        let gl = Rc::new(RecordingGl::default());

        let buffer = unsafe { Buffer::create(&gl, "PositionBuffer") }.unwrap();
        let vertex_array = unsafe { VertexArray::create(&gl, "TriangleVAO") }.unwrap();
        let shader = unsafe { Shader::create(&gl, gl::VERTEX_SHADER, "VertexShader") }.unwrap();
        assert!(gl.calls().contains(&Call::Label(
            Kind::Buffer,
            buffer.handle(),
            "PositionBuffer".to_string()
        )));
        assert!(gl.calls().contains(&Call::Label(
            Kind::Shader,
            shader.handle(),
            "VertexShader".to_string()
        )));
        assert_eq!(gl.live(Kind::VertexArray), vec![vertex_array.handle()]);

        drop(shader);
        drop(vertex_array);
        drop(buffer);
        assert!(gl.live(Kind::Buffer).is_empty());
        assert!(gl.live(Kind::Shader).is_empty());
        assert!(gl.live(Kind::VertexArray).is_empty());
    }

    #[test]
    fn test_from_raw_takes_ownership() {
        let gl = Rc::new(RecordingGl::default());
        let handle = unsafe { gl.create_program() }.unwrap();
        let program = Program::from_raw(&gl, handle);
        assert_eq!(program.handle(), handle);
        drop(program);
        assert_eq!(gl.calls().last(), Some(&Call::Delete(Kind::Program, handle)));
    }
}
