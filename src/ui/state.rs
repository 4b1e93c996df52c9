use egui::Color32;
use glam::Vec3;

/// Presentation constants for the viewer window.
pub struct ViewerSettings {
    pub window_title: String,
    pub window_size: (u32, u32),

    pub background: Color32,
    pub face_color: Color32,
    pub edge_color: Color32,
    pub light_direction: Vec3,

    pub show_axes_box: bool,
    pub axes_box_color: Color32,

    pub label_color: Color32,
    pub label_size: f32,

    pub show_info: bool,
    pub show_help: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            window_title: "STL Viewer".to_owned(),
            window_size: (1280, 960),

            background: Color32::WHITE,
            face_color: Color32::from_rgb(31, 119, 180),
            edge_color: Color32::BLACK,
            light_direction: Vec3::new(-0.4, -0.3, -1.0),

            show_axes_box: true,
            axes_box_color: Color32::from_rgb(190, 190, 190),

            label_color: Color32::RED,
            label_size: 12.0,

            show_info: true,
            show_help: true,
        }
    }
}

impl ViewerSettings {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }
}
