//! Layout calculation for report pages
//!
//! This module handles the geometry of a report page:
//! - Header and footer blocks
//! - Photo frames for the landscape and portrait templates
//! - Fitting photos and text into their boxes
//! - Measuring text in the built-in Helvetica faces

mod fit;
mod metrics;
mod page;
mod types;

pub use fit::*;
pub use metrics::*;
pub use page::*;
pub use types::*;
