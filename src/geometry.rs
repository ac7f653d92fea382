use std::rc::Rc;

use gl::{Adapter, GLint, GLsizei, GLuint};

use crate::resource::{Buffer, VertexArray};
use crate::transform::TransformBlock;

pub const POSITIONS: [[f32; 3]; 3] = [
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [0.0, 1.0, 0.0],
];
pub const COLORS: [[f32; 3]; 3] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];
pub const VERTEX_COUNT: GLsizei = POSITIONS.len() as GLsizei;

pub const POSITION_ATTRIB: GLuint = 0;
pub const COLOR_ATTRIB: GLuint = 1;
pub const TRANSFORM_BINDING: GLuint = 0;

const COMPONENTS: GLint = 3;
const STRIDE: GLsizei = size_of::<[f32; 3]>() as GLsizei;

/// vertex buffers, the transform uniform buffer and the vertex array that ties the vertex buffers
/// to attribute slots.
pub struct TriangleGeometry<A: Adapter> {
    gl: Rc<A>,
    // NOTE: vertex array goes first so that it is deleted before the buffers it references.
    vertex_array: VertexArray<A>,
    positions: Buffer<A>,
    colors: Buffer<A>,
    uniforms: Buffer<A>,
}

/// one float vec3 attribute per binding, binding index equals attribute index.
unsafe fn describe_attrib<A: Adapter>(
    gl: &A,
    vertex_array: A::VertexArray,
    attrib: GLuint,
    buffer: A::Buffer,
) {
    unsafe {
        gl.enable_vertex_array_attrib(vertex_array, attrib);
        gl.vertex_array_attrib_format(vertex_array, attrib, COMPONENTS, gl::FLOAT, gl::FALSE, 0);
        gl.vertex_array_attrib_binding(vertex_array, attrib, attrib);
        gl.vertex_array_vertex_buffer(vertex_array, attrib, buffer, 0, STRIDE);
    }
}

impl<A: Adapter> TriangleGeometry<A> {
    /// # Safety
    ///
    /// a gl context must be current on the calling thread.
    pub unsafe fn new(gl: &Rc<A>, transform: &TransformBlock) -> anyhow::Result<Self> {
        unsafe {
            let positions = Buffer::create(gl, "PositionBuffer")?;
            gl.named_buffer_storage(positions.handle(), bytemuck::cast_slice(&POSITIONS), 0);

            let colors = Buffer::create(gl, "ColorBuffer")?;
            gl.named_buffer_storage(colors.handle(), bytemuck::cast_slice(&COLORS), 0);

            let uniforms = Buffer::create(gl, "TransformBuffer")?;
            gl.named_buffer_storage(
                uniforms.handle(),
                transform.as_bytes(),
                gl::DYNAMIC_STORAGE_BIT,
            );

            let vertex_array = VertexArray::create(gl, "TriangleVAO")?;
            describe_attrib(&**gl, vertex_array.handle(), POSITION_ATTRIB, positions.handle());
            describe_attrib(&**gl, vertex_array.handle(), COLOR_ATTRIB, colors.handle());

            Ok(Self {
                gl: Rc::clone(gl),
                vertex_array,
                positions,
                colors,
                uniforms,
            })
        }
    }

    pub unsafe fn upload_transform(&self, transform: &TransformBlock) {
        unsafe {
            self.gl
                .named_buffer_sub_data(self.uniforms.handle(), 0, transform.as_bytes())
        };
    }

    pub fn vertex_array(&self) -> A::VertexArray {
        self.vertex_array.handle()
    }

    pub fn uniform_buffer(&self) -> A::Buffer {
        self.uniforms.handle()
    }

    pub fn vertex_buffers(&self) -> [A::Buffer; 2] {
        [self.positions.handle(), self.colors.handle()]
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::mock::{Call, Kind, RecordingGl};

    fn create(gl: &Rc<RecordingGl>) -> TriangleGeometry<RecordingGl> {
        let transform = TransformBlock::new(-2.0, Vec3::ZERO);
        unsafe { TriangleGeometry::new(gl, &transform) }.unwrap()
    }

    #[test]
    fn test_buffers_are_sized_to_their_data() {
        let gl = Rc::new(RecordingGl::default());
        let geometry = create(&gl);
        let [positions, colors] = geometry.vertex_buffers();

        let calls = gl.calls();
        let storage = |buffer: u32| {
            calls.iter().find_map(|call| match call {
                Call::NamedBufferStorage {
                    buffer: b,
                    data,
                    flags,
                } if *b == buffer => Some((data.clone(), *flags)),
                _ => None,
            })
        };

        let (data, flags) = storage(positions).unwrap();
        assert_eq!(data.len(), 36);
        assert_eq!(data, bytemuck::cast_slice::<f32, u8>(POSITIONS.as_flattened()));
        assert_eq!(flags, 0);

        let (data, flags) = storage(colors).unwrap();
        assert_eq!(data, bytemuck::cast_slice::<f32, u8>(COLORS.as_flattened()));
        assert_eq!(flags, 0);

        let (data, flags) = storage(geometry.uniform_buffer()).unwrap();
        assert_eq!(data.len(), size_of::<TransformBlock>());
        assert_eq!(flags, gl::DYNAMIC_STORAGE_BIT);
    }

    #[test]
    fn test_attribute_layout() {
        let gl = Rc::new(RecordingGl::default());
        let geometry = create(&gl);
        let vertex_array = geometry.vertex_array();
        let calls = gl.calls();

        assert!(calls.contains(&Call::Label(
            Kind::VertexArray,
            vertex_array,
            "TriangleVAO".to_string()
        )));
        for (attrib, buffer) in [POSITION_ATTRIB, COLOR_ATTRIB]
            .into_iter()
            .zip(geometry.vertex_buffers())
        {
            assert!(calls.contains(&Call::EnableVertexArrayAttrib(vertex_array, attrib)));
            assert!(calls.contains(&Call::VertexArrayAttribFormat {
                vertex_array,
                attrib,
                size: 3,
                r#type: gl::FLOAT,
                normalized: gl::FALSE,
                relative_offset: 0,
            }));
            assert!(calls.contains(&Call::VertexArrayAttribBinding {
                vertex_array,
                attrib,
                binding: attrib,
            }));
            assert!(calls.contains(&Call::VertexArrayVertexBuffer {
                vertex_array,
                binding: attrib,
                buffer,
                offset: 0,
                stride: 12,
            }));
        }
        assert_eq!(
            gl.count(|call| matches!(call, Call::VertexArrayAttribFormat { .. })),
            2
        );
    }

    #[test]
    fn test_upload_transform_rewrites_whole_block() {
        let gl = Rc::new(RecordingGl::default());
        let geometry = create(&gl);
        gl.clear_calls();

        let transform = TransformBlock::new(-2.0, Vec3::new(0.0, 25.0, 0.0));
        unsafe { geometry.upload_transform(&transform) };
        assert_eq!(
            gl.calls(),
            vec![Call::NamedBufferSubData {
                buffer: geometry.uniform_buffer(),
                offset: 0,
                data: transform.as_bytes().to_vec(),
            }]
        );
    }

    #[test]
    fn test_drop_releases_everything() {
        let gl = Rc::new(RecordingGl::default());
        let geometry = create(&gl);
        assert_eq!(gl.live(Kind::Buffer).len(), 3);
        drop(geometry);
        assert!(gl.live(Kind::Buffer).is_empty());
        assert!(gl.live(Kind::VertexArray).is_empty());
    }
}
