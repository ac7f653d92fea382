use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

pub const FOV_Y_DEGREES: f32 = 60.0;
pub const ASPECT_RATIO: f32 = 1280.0 / 720.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 256.0;

/// std140 uniform block at binding 0 of the vertex stage. member order and size are baked into
/// the shader binary.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TransformBlock {
    pub projection: Mat4,
    pub model: Mat4,
    pub view: Mat4,
}

const _: () = assert!(size_of::<TransformBlock>() == 3 * 64);

impl TransformBlock {
    /// `rotation` is in degrees and applied about x, then y, then z.
    pub fn new(zoom: f32, rotation: Vec3) -> Self {
        let projection =
            Mat4::perspective_rh_gl(FOV_Y_DEGREES.to_radians(), ASPECT_RATIO, Z_NEAR, Z_FAR);
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, zoom));
        let model = Mat4::IDENTITY
            * Mat4::from_rotation_x(rotation.x.to_radians())
            * Mat4::from_rotation_y(rotation.y.to_radians())
            * Mat4::from_rotation_z(rotation.z.to_radians());
        Self {
            projection,
            model,
            view,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    #[test]
    fn test_layout_matches_shader_block() {
        let transform = TransformBlock::new(-2.0, Vec3::ZERO);
        let bytes = transform.as_bytes();
        assert_eq!(bytes.len(), 192);
        // column major, projection first.
        assert_eq!(&bytes[..64], bytemuck::bytes_of(&transform.projection));
        assert_eq!(&bytes[64..128], bytemuck::bytes_of(&transform.model));
        assert_eq!(&bytes[128..], bytemuck::bytes_of(&transform.view));
    }

    #[test]
    fn test_projection_and_view() {
        let transform = TransformBlock::new(-2.0, Vec3::ZERO);

        let f = 1.0 / (30.0_f32.to_radians()).tan();
        let projection = transform.projection;
        assert!((projection.x_axis.x - f / ASPECT_RATIO).abs() < 1e-5);
        assert!((projection.y_axis.y - f).abs() < 1e-5);
        assert!((projection.z_axis.w + 1.0).abs() < 1e-6);
        assert!((projection.z_axis.z - (Z_FAR + Z_NEAR) / (Z_NEAR - Z_FAR)).abs() < 1e-5);

        assert_eq!(transform.view.w_axis, Vec4::new(0.0, 0.0, -2.0, 1.0));
        assert_eq!(transform.model, Mat4::IDENTITY);
    }

    #[test]
    fn test_model_rotates_x_then_y_then_z() {
        let rotation = Vec3::new(30.0, 45.0, 60.0);
        let transform = TransformBlock::new(-2.0, rotation);

        let expected = Mat4::from_rotation_x(30.0_f32.to_radians())
            * Mat4::from_rotation_y(45.0_f32.to_radians())
            * Mat4::from_rotation_z(60.0_f32.to_radians());
        assert!(transform.model.abs_diff_eq(expected, 1e-6));

        let reversed = Mat4::from_rotation_z(60.0_f32.to_radians())
            * Mat4::from_rotation_y(45.0_f32.to_radians())
            * Mat4::from_rotation_x(30.0_f32.to_radians());
        assert!(!transform.model.abs_diff_eq(reversed, 1e-3));
    }

    #[test]
    fn test_rotation_about_y() {
        let transform = TransformBlock::new(-2.0, Vec3::new(0.0, 90.0, 0.0));
        let x = transform.model * Vec4::X;
        assert!(x.abs_diff_eq(Vec4::new(0.0, 0.0, -1.0, 0.0), 1e-6));
    }
}
