//! Photo ingestion: reading files and probing their pixel dimensions
//!
//! Probing never fails a batch. A file that cannot be read or whose header
//! cannot be decoded comes back with 0x0 dimensions and a warning in the log.

use crate::resources::ImageBlob;
use crate::types::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File extensions offered when picking photos or a logo
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff"];

/// Whether `path` has one of [`IMAGE_EXTENSIONS`] (case-insensitive)
pub fn is_image_path(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// A file that went through dimension probing
#[derive(Debug, Clone)]
pub struct ProbedImage {
    /// Display name derived from the file name
    pub name: String,
    /// Bytes and dimensions, ready to be registered in a resource table
    pub blob: ImageBlob,
}

impl ProbedImage {
    pub fn orientation(&self) -> Orientation {
        Orientation::from_dimensions(self.blob.width, self.blob.height)
    }
}

/// File name with its last extension stripped.
///
/// `"site.visit.jpg"` becomes `"site.visit"`; names without an extension and
/// dot-files such as `".hidden"` are kept whole.
pub fn display_name(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    let file_name = match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => return path.to_string_lossy().into_owned(),
    };

    match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name[..idx].to_string(),
        _ => file_name.into_owned(),
    }
}

/// Read intrinsic pixel dimensions from encoded image bytes.
///
/// Only the header is decoded; the format is guessed from the content.
pub fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let reader = image::ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let dimensions = reader.into_dimensions()?;
    Ok(dimensions)
}

/// Read a file and probe its dimensions, degrading to 0x0 on any failure
pub async fn probe_file(path: impl AsRef<Path>) -> Result<ProbedImage> {
    let path = path.as_ref().to_owned();
    let name = display_name(&path);

    let bytes: Arc<[u8]> = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes.into(),
        Err(e) => {
            log::warn!("Could not read {}: {}", path.display(), e);
            Arc::from(Vec::new())
        }
    };

    // Header decoding is CPU-bound, spawn blocking
    let probe_bytes = Arc::clone(&bytes);
    let dimensions = tokio::task::spawn_blocking(move || probe_dimensions(&probe_bytes)).await?;

    let (width, height) = match dimensions {
        Ok(dimensions) => dimensions,
        Err(e) => {
            log::warn!(
                "Could not read image dimensions of {}: {}; using 0x0",
                path.display(),
                e
            );
            (0, 0)
        }
    };

    Ok(ProbedImage {
        name,
        blob: ImageBlob {
            source: path,
            bytes,
            width,
            height,
        },
    })
}

/// Probe a batch of files concurrently.
///
/// Resolves once every probe has settled; results keep the order of `paths`
/// regardless of which probe finished first.
pub async fn probe_batch(paths: &[PathBuf]) -> Result<Vec<ProbedImage>> {
    let handles: Vec<_> = paths
        .iter()
        .cloned()
        .map(|path| tokio::spawn(probe_file(path)))
        .collect();

    let mut probed = Vec::with_capacity(handles.len());
    for handle in handles {
        probed.push(handle.await??);
    }

    log::debug!(
        "Probed {} files ({} without dimensions)",
        probed.len(),
        probed.iter().filter(|p| !p.blob.has_dimensions()).count()
    );

    Ok(probed)
}
