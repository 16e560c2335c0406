use glam::{Mat4, Vec3};

// The plane sits at the origin and the camera looks at it down the Z axis.
const CAMERA_DISTANCE: f32 = 300.0;
const FOV_Y_DEG: f32 = 45.0;
const NEAR: f32 = 1.0;
const FAR: f32 = 10_000.0;

/// Perspective camera framing the shader plane.
///
/// Position and framing are fixed; the only thing that moves is the aspect
/// ratio, which follows the viewport when auto-resize is on.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,

    aspect: f32,

    // Cached matrices, rebuilt on aspect changes.
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.update_matrices();
        camera
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Updates the aspect ratio and recomputes the projection. Call when the
    /// viewport resizes.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_matrices();
    }

    /// Combined view-projection matrix for the vertex stage.
    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view
    }

    fn update_matrices(&mut self) {
        self.view = Mat4::look_at_rh(self.position, self.target, self.up);
        self.projection =
            Mat4::perspective_rh(FOV_Y_DEG.to_radians(), self.aspect, NEAR, FAR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_is_stored_and_reported() {
        let mut camera = Camera::new(640.0 / 480.0);
        assert_eq!(camera.aspect(), 640.0 / 480.0);

        camera.set_aspect(1920.0 / 1080.0);
        assert_eq!(camera.aspect(), 1920.0 / 1080.0);
    }

    #[test]
    fn projection_follows_aspect() {
        let mut camera = Camera::new(4.0 / 3.0);
        let before = camera.view_proj();
        camera.set_aspect(16.0 / 9.0);
        let after = camera.view_proj();
        assert_ne!(before, after);
    }

    #[test]
    fn view_proj_is_finite() {
        let camera = Camera::new(640.0 / 480.0);
        let m = camera.view_proj();
        assert!(m.to_cols_array().iter().all(|v| v.is_finite()));
    }
}
