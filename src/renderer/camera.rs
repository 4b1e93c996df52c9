use glam::{Mat4, Vec2, Vec3};

use crate::mesh::ViewExtent;

const FRAME_MARGIN: f32 = 1.15;

/// Orbit camera looking at `target` from `distance` along the direction given
/// by `yaw`/`pitch`. Z is up, matching the usual CAD orientation of STL files.
pub struct Camera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,

    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    pub min_distance: f32,
    pub max_distance: f32,
    pub mouse_sensitivity: f32,
    pub zoom_factor: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 10.0,
            yaw: -60.0_f32.to_radians(),
            pitch: 30.0_f32.to_radians(),

            fov: 45.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.01,
            far: 1000.0,

            min_distance: 0.01,
            max_distance: 1000.0,
            mouse_sensitivity: 0.005,
            zoom_factor: 0.1,
        }
    }
}

impl Camera {
    /// Places the camera so the whole extent cube fits the vertical field of view.
    pub fn framed(extent: &ViewExtent, aspect: f32) -> Self {
        let mut camera = Self {
            aspect,
            ..Self::default()
        };
        camera.frame(extent);
        camera
    }

    pub fn frame(&mut self, extent: &ViewExtent) {
        let radius = extent.radius();
        let fit = radius / (self.fov / 2.0).sin() * FRAME_MARGIN;

        self.target = extent.center();
        self.distance = fit;
        self.yaw = Self::default().yaw;
        self.pitch = Self::default().pitch;

        self.min_distance = radius * 0.05;
        self.max_distance = fit * 20.0;
        self.near = (fit - radius).max(radius * 1.0e-3) * 0.5;
        self.far = (fit + radius) * 20.0;
    }

    pub fn position(&self) -> Vec3 {
        self.target
            + self.distance
                * Vec3::new(
                    self.pitch.cos() * self.yaw.cos(),
                    self.pitch.cos() * self.yaw.sin(),
                    self.pitch.sin(),
                )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Z)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn process_mouse_movement(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.mouse_sensitivity;
        self.pitch += delta.y * self.mouse_sensitivity;

        let max_pitch = 89.0_f32.to_radians();
        self.pitch = self.pitch.clamp(-max_pitch, max_pitch);
    }

    pub fn process_scroll(&mut self, delta: f32) {
        let scale = (1.0 - delta * self.zoom_factor).clamp(0.5, 1.5);
        self.distance = (self.distance * scale).clamp(self.min_distance, self.max_distance);
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Maps a world point to screen coordinates (origin top-left, y down).
    /// `None` when the point is behind the camera.
    pub fn project_to_screen(&self, point: Vec3, screen: Vec2) -> Option<Vec2> {
        let clip = self.view_projection_matrix() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }

        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * screen.x,
            (1.0 - ndc.y) * 0.5 * screen.y,
        ))
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub _padding: f32,
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            camera_pos: camera.position().to_array(),
            _padding: 0.0,
        }
    }
}
