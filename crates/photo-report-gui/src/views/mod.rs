pub mod actions;
pub mod log_panel;
pub mod metadata;
pub mod photos;

pub use actions::show_actions;
pub use log_panel::show_log_panel;
pub use metadata::show_metadata;
pub use photos::show_photos;
