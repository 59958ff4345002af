//! PDF rendering for photo reports
//!
//! This module turns a report snapshot into a document:
//! - Paginating the photos and laying out each page
//! - Embedding photos and the logo as image XObjects
//! - Writing the finished document to disk

mod page;
mod xobject;

pub use page::*;
pub use xobject::{EmbeddedImage, ImageCache, decode_raw_image};

use crate::layout::layout_page;
use crate::options::ReportOptions;
use crate::resources::ResourceTable;
use crate::session::ReportState;
use crate::types::*;
use printpdf::{Mm, PdfDocument, PdfPage, PdfSaveOptions};
use std::path::PathBuf;
use std::sync::Arc;

/// A rendered report
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub pages: usize,
    /// Distinct images embedded (each photo once, the logo once)
    pub embedded_images: usize,
}

/// Render `state` into PDF bytes.
///
/// Fails with [`ReportError::EmptyReport`] when there are no photos.
pub fn render_pdf(
    state: &ReportState,
    resources: &ResourceTable,
    options: &ReportOptions,
) -> Result<RenderedReport> {
    if state.is_empty() {
        return Err(ReportError::EmptyReport);
    }
    options.validate()?;

    let metadata = state.metadata();
    let logo = metadata
        .logo
        .and_then(|handle| resources.resolve(handle).map(|blob| (handle, blob)));
    if metadata.logo.is_some() && logo.is_none() {
        log::warn!("Logo resource is gone, rendering the placeholder instead");
    }

    let title = if metadata.subject.trim().is_empty() {
        options.labels.report_title.clone()
    } else {
        metadata.subject.clone()
    };

    let mut doc = PdfDocument::new(&title);
    let mut cache = ImageCache::new();
    let (width_mm, height_mm) = options.paper_size.dimensions_mm();

    let pages = state.pages();
    let mut pdf_pages = Vec::with_capacity(pages.len());
    for page in &pages {
        let layout = layout_page(page, metadata, logo, options);
        let ops = render_page_ops(&layout, &mut doc, &mut cache, resources);
        pdf_pages.push(PdfPage::new(Mm(width_mm), Mm(height_mm), ops));
    }

    let page_count = pdf_pages.len();
    doc.pages = pdf_pages;

    // Text is shown through raw `Tj` operators, which secure mode strips
    let save_options = PdfSaveOptions {
        secure: false,
        ..Default::default()
    };
    let mut warnings = Vec::new();
    let bytes = doc.save(&save_options, &mut warnings);
    if !warnings.is_empty() {
        log::debug!("PDF writer reported {} warnings", warnings.len());
    }

    log::info!(
        "Rendered {} pages with {} embedded images",
        page_count,
        cache.embedded_count()
    );

    Ok(RenderedReport {
        bytes,
        pages: page_count,
        embedded_images: cache.embedded_count(),
    })
}

/// Render on a blocking thread and write the result to `path`.
///
/// Nothing is written if rendering fails.
pub async fn export_pdf(
    state: Arc<ReportState>,
    resources: ResourceTable,
    options: ReportOptions,
    path: PathBuf,
) -> Result<RenderedReport> {
    if state.is_empty() {
        return Err(ReportError::EmptyReport);
    }

    let report =
        tokio::task::spawn_blocking(move || render_pdf(&state, &resources, &options)).await??;
    tokio::fs::write(&path, &report.bytes).await?;
    log::info!("Saved report to {}", path.display());
    Ok(report)
}
