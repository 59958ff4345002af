//! Embedding photos and the logo as PDF image XObjects

use crate::resources::{ImageBlob, ResourceHandle, ResourceTable};
use crate::types::*;
use printpdf::{PdfDocument, RawImage, RawImageData, RawImageFormat, XObjectId};
use std::collections::HashMap;

/// Decode encoded image bytes into RGB pixels for embedding
pub fn decode_raw_image(blob: &ImageBlob) -> Result<RawImage> {
    let decoded = image::load_from_memory(&blob.bytes)?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    Ok(RawImage {
        pixels: RawImageData::U8(rgb.into_raw()),
        width: width as usize,
        height: height as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    })
}

/// An embedded image and its pixel size
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    pub id: XObjectId,
    pub width_px: usize,
    pub height_px: usize,
}

/// Cache of embedded images so a resource is added to the document once,
/// no matter how many pages use it (the logo appears on every page).
///
/// Failed decodes are remembered too, so they are only logged once.
#[derive(Default)]
pub struct ImageCache {
    embedded: HashMap<ResourceHandle, Option<EmbeddedImage>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Embed the image behind `handle`, or return the earlier embedding.
    /// `None` if the handle is unknown or the bytes do not decode.
    pub fn get_or_embed(
        &mut self,
        doc: &mut PdfDocument,
        resources: &ResourceTable,
        handle: ResourceHandle,
    ) -> Option<EmbeddedImage> {
        if let Some(cached) = self.embedded.get(&handle) {
            return cached.clone();
        }

        let embedded = match resources.resolve(handle) {
            Some(blob) => match decode_raw_image(blob) {
                Ok(raw) => {
                    let width_px = raw.width;
                    let height_px = raw.height;
                    let id = doc.add_image(&raw);
                    Some(EmbeddedImage {
                        id,
                        width_px,
                        height_px,
                    })
                }
                Err(e) => {
                    log::warn!(
                        "Could not decode {} for embedding: {}",
                        blob.source.display(),
                        e
                    );
                    None
                }
            },
            None => {
                log::warn!("Resource {:?} is not in the table", handle);
                None
            }
        };

        self.embedded.insert(handle, embedded.clone());
        embedded
    }

    /// Number of images actually embedded
    pub fn embedded_count(&self) -> usize {
        self.embedded.values().filter(|e| e.is_some()).count()
    }
}
