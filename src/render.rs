use std::rc::Rc;

use gl::Adapter;
use glam::Vec3;

use crate::geometry::{TriangleGeometry, VERTEX_COUNT};
use crate::pipeline::{self, Stage};
use crate::resource::Program;
use crate::spirv;
use crate::transform::TransformBlock;

pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.2, 1.0];
/// degrees per second about the y axis.
pub const ROTATION_SPEED: f64 = 50.0;
pub const DEFAULT_ZOOM: f32 = -2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

/// everything that changes from frame to frame. owned by the caller and handed to the renderer.
#[derive(Debug, Clone)]
pub struct RenderState {
    pub zoom: f32,
    /// rotation in degrees that the animation starts from.
    pub base_rotation: Vec3,
    elapsed: f64,
    phase: Phase,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            base_rotation: Vec3::ZERO,
            elapsed: 0.0,
            phase: Phase::Idle,
        }
    }
}

impl RenderState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// seconds of frame time accumulated so far.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn advance(&mut self, delta_time: f64) {
        self.elapsed += delta_time.max(0.0);
        self.phase = Phase::Running;
    }

    /// current rotation in degrees. y is derived from elapsed time rather than accumulated per
    /// frame, and wrapped to [0, 360) in f64 before it is narrowed to f32.
    pub fn rotation(&self) -> Vec3 {
        let y = (self.base_rotation.y as f64 + self.elapsed * ROTATION_SPEED).rem_euclid(360.0);
        Vec3::new(self.base_rotation.x, y as f32, self.base_rotation.z)
    }

    pub fn transform(&self) -> TransformBlock {
        TransformBlock::new(self.zoom, self.rotation())
    }
}

/// clears color and depth to [`CLEAR_COLOR`].
///
/// # Safety
///
/// a gl context must be current on the calling thread.
pub unsafe fn clear<A: Adapter>(gl: &A) {
    let [r, g, b, a] = CLEAR_COLOR;
    unsafe {
        gl.clear_color(r, g, b, a);
        gl.clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
    }
}

pub struct TriangleRenderer<A: Adapter> {
    gl: Rc<A>,
    // NOTE: program and geometry are released in declaration order.
    program: Program<A>,
    geometry: TriangleGeometry<A>,
}

impl<A: Adapter> TriangleRenderer<A> {
    /// # Safety
    ///
    /// a gl context must be current on the calling thread.
    pub unsafe fn new(
        gl: &Rc<A>,
        vertex: spirv::Module,
        fragment: spirv::Module,
        state: &RenderState,
    ) -> anyhow::Result<Self> {
        unsafe {
            let geometry = TriangleGeometry::new(gl, &state.transform())?;
            let program = pipeline::build_program(
                gl,
                "TriangleProgram",
                Stage {
                    r#type: gl::VERTEX_SHADER,
                    label: "VertexShader",
                    module: vertex,
                },
                Stage {
                    r#type: gl::FRAGMENT_SHADER,
                    label: "FragmentShader",
                    module: fragment,
                },
            )?;
            Ok(Self {
                gl: Rc::clone(gl),
                program,
                geometry,
            })
        }
    }

    /// the embedded triangle shaders.
    pub unsafe fn with_embedded_shaders(gl: &Rc<A>, state: &RenderState) -> anyhow::Result<Self> {
        let vertex = spirv::Module::parse(spirv::TRIANGLE_VERT)?;
        let fragment = spirv::Module::parse(spirv::TRIANGLE_FRAG)?;
        unsafe { Self::new(gl, vertex, fragment, state) }
    }

    pub fn program(&self) -> A::Program {
        self.program.handle()
    }

    pub fn geometry(&self) -> &TriangleGeometry<A> {
        &self.geometry
    }

    pub unsafe fn draw(&self) {
        unsafe {
            clear(&*self.gl);

            self.gl.polygon_mode(gl::FRONT_AND_BACK, gl::FILL);
            self.gl.enable(gl::DEPTH_TEST);

            self.gl.bind_buffer_base(
                gl::UNIFORM_BUFFER,
                crate::geometry::TRANSFORM_BINDING,
                Some(self.geometry.uniform_buffer()),
            );
            self.gl.use_program(Some(self.program.handle()));
            self.gl.bind_vertex_array(Some(self.geometry.vertex_array()));

            self.gl.draw_arrays(gl::TRIANGLES, 0, VERTEX_COUNT);
        }
    }

    /// draws the frame for `state`, then advances it by `delta_time` and uploads the transform
    /// that the next frame will draw with. presenting is up to the caller.
    pub unsafe fn frame(&self, state: &mut RenderState, delta_time: f64) {
        unsafe {
            self.draw();
            state.advance(delta_time);
            self.geometry.upload_transform(&state.transform());
        }
    }
}
