pub mod panels;
pub mod state;
pub mod theme;

pub use panels::{draw_bbox_label, draw_help_overlay, draw_info_panel};
pub use state::ViewerSettings;
pub use theme::apply_theme;
