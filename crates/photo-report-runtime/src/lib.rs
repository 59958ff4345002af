use std::path::PathBuf;
use std::sync::Arc;

// Re-export types from the library crate
pub use photo_report::{
    MetadataText, Orientation, PhotoId, ReportOptions, ReportState, ReportStatistics,
};

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum ReportCommand {
    AddPhotos {
        paths: Vec<PathBuf>,
    },
    RemovePhoto {
        id: PhotoId,
    },
    SetLogo {
        path: PathBuf,
    },
    RemoveLogo,
    SetMetadata {
        text: MetadataText,
    },
    LoadOptions {
        path: PathBuf,
    },
    SaveOptions {
        options: ReportOptions,
        path: PathBuf,
    },
    GenerateReport {
        options: ReportOptions,
        output_path: PathBuf,
    },
    /// Drop every photo and the logo, keeping the header text
    Reset,
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum ReportUpdate {
    /// A new snapshot replaced the previous one
    StateChanged {
        state: Arc<ReportState>,
    },
    IngestStarted {
        count: usize,
    },
    IngestFinished {
        added: usize,
        unreadable: usize,
    },
    /// Downscaled preview of a photo, sent once per ingested photo
    Thumbnail {
        id: PhotoId,
        width: usize,
        height: usize,
        rgba_data: Vec<u8>,
    },
    LogoThumbnail {
        width: usize,
        height: usize,
        rgba_data: Vec<u8>,
    },
    LogoRemoved,
    OptionsLoaded {
        options: ReportOptions,
    },
    OptionsSaved {
        path: PathBuf,
    },
    ReportComplete {
        path: PathBuf,
        pages: usize,
    },
    /// Export was requested with no photos
    EmptyReport {
        message: String,
    },
    Error {
        message: String,
    },
}
