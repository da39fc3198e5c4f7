mod controls_panel;
mod preview_panel;

pub use controls_panel::controls_panel;
pub use preview_panel::preview_panel;
