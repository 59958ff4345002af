mod constants;
pub mod ingest;
pub mod layout;
mod options;
pub mod paginate;
pub mod render;
mod resources;
mod session;
mod types;
mod winansi;

pub use constants::{mm_to_pt, pt_to_mm};
pub use ingest::{IMAGE_EXTENSIONS, ProbedImage, display_name, is_image_path, probe_batch, probe_file};
pub use options::*;
pub use paginate::{paginate, statistics};
pub use render::{RenderedReport, export_pdf, render_pdf};
pub use resources::*;
pub use session::*;
pub use types::*;
