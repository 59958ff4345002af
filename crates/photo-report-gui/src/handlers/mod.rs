pub mod photos;
pub mod report;
