use crate::constants::{LANDSCAPE_PAGE_CAPACITY, PORTRAIT_PAGE_CAPACITY};
use crate::resources::ResourceHandle;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Please add photos before generating the report.")]
    EmptyReport,
    #[error("No photo with id {0}")]
    UnknownPhoto(PhotoId),
}

pub type Result<T> = std::result::Result<T, ReportError>;

static NEXT_PHOTO_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of an ingested photo, unique for the life of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PhotoId(u64);

impl PhotoId {
    pub fn generate() -> Self {
        Self(NEXT_PHOTO_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "photo-{}", self.0)
    }
}

/// Photo orientation, fixed when the record is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Width >= height (square photos included)
    Landscape,
    /// Height > width
    Portrait,
}

impl Orientation {
    /// Classify intrinsic pixel dimensions. Ties go to landscape, so a photo
    /// whose probe failed (0x0) is landscape too.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if width >= height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    /// Maximum number of photos on one page of this orientation
    pub fn page_capacity(self) -> usize {
        match self {
            Orientation::Landscape => LANDSCAPE_PAGE_CAPACITY,
            Orientation::Portrait => PORTRAIT_PAGE_CAPACITY,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Orientation::Landscape => "Landscape",
            Orientation::Portrait => "Portrait",
        }
    }
}

/// One ingested photo.
///
/// Records are immutable: the orientation is derived in [`ImageRecord::new`]
/// and cannot drift from the stored dimensions afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ImageRecord {
    id: PhotoId,
    location: ResourceHandle,
    name: String,
    orientation: Orientation,
    width: u32,
    height: u32,
}

impl ImageRecord {
    pub fn new(
        id: PhotoId,
        location: ResourceHandle,
        name: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id,
            location,
            name: name.into(),
            orientation: Orientation::from_dimensions(width, height),
            width,
            height,
        }
    }

    pub fn id(&self) -> PhotoId {
        self.id
    }

    /// Handle of the bytes backing this photo in the session's resource table
    pub fn location(&self) -> ResourceHandle {
        self.location
    }

    /// Display name (file name without its extension)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the dimension probe failed for this photo
    pub fn is_unprobed(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Report header fields
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReportMetadata {
    /// Organization or entity issuing the report
    pub organization: String,
    /// What the report is about
    pub subject: String,
    /// Free-form date text
    pub date: String,
    /// Logo image, if one was loaded in this session
    #[cfg_attr(feature = "serde", serde(skip))]
    pub logo: Option<ResourceHandle>,
}

impl ReportMetadata {
    /// Load header fields from a JSON file. Missing fields stay empty.
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ReportError::Config(format!("Failed to parse metadata: {}", e)))
    }
}

/// A page of the report, derived from the photo list on demand
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Page {
    /// Orientation shared by every photo on the page
    pub orientation: Orientation,
    /// Photos in display order, at most `orientation.page_capacity()`
    pub photos: Vec<ImageRecord>,
    /// 1-based page number
    pub number: usize,
    /// Total number of pages in the report
    pub total: usize,
}

/// Summary of how a photo collection paginates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReportStatistics {
    pub photos: usize,
    pub landscape_photos: usize,
    pub portrait_photos: usize,
    pub landscape_pages: usize,
    pub portrait_pages: usize,
    pub total_pages: usize,
    /// Photos whose dimensions could not be read
    pub unprobed_photos: usize,
}
