//! Report session: immutable state snapshots plus the resources they point to
//!
//! Every edit builds a new [`ReportState`] and swaps it in whole. Readers
//! (renderers, the GUI) hold an `Arc` to a snapshot that never changes under
//! them.

use crate::ingest::{ProbedImage, probe_batch, probe_file};
use crate::options::ReportOptions;
use crate::paginate::{paginate, statistics};
use crate::render::{RenderedReport, export_pdf, render_pdf};
use crate::resources::{ResourceOwner, ResourceTable};
use crate::types::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Photos and header fields at one point in time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportState {
    photos: Vec<ImageRecord>,
    metadata: ReportMetadata,
}

impl ReportState {
    /// Photos in the order they were added
    pub fn photos(&self) -> &[ImageRecord] {
        &self.photos
    }

    pub fn metadata(&self) -> &ReportMetadata {
        &self.metadata
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn photo(&self, id: PhotoId) -> Option<&ImageRecord> {
        self.photos.iter().find(|p| p.id() == id)
    }

    /// Pages computed fresh from the current photos
    pub fn pages(&self) -> Vec<Page> {
        paginate(&self.photos)
    }

    pub fn statistics(&self) -> ReportStatistics {
        statistics(&self.photos)
    }

    fn with_appended(&self, batch: Vec<ImageRecord>) -> Self {
        let mut photos = Vec::with_capacity(self.photos.len() + batch.len());
        photos.extend(self.photos.iter().cloned());
        photos.extend(batch);
        Self {
            photos,
            metadata: self.metadata.clone(),
        }
    }

    fn without_photo(&self, id: PhotoId) -> Self {
        Self {
            photos: self
                .photos
                .iter()
                .filter(|p| p.id() != id)
                .cloned()
                .collect(),
            metadata: self.metadata.clone(),
        }
    }

    fn with_metadata(&self, metadata: ReportMetadata) -> Self {
        Self {
            photos: self.photos.clone(),
            metadata,
        }
    }
}

/// Header text fields, without the logo
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataText {
    pub organization: String,
    pub subject: String,
    pub date: String,
}

impl From<&ReportMetadata> for MetadataText {
    fn from(metadata: &ReportMetadata) -> Self {
        Self {
            organization: metadata.organization.clone(),
            subject: metadata.subject.clone(),
            date: metadata.date.clone(),
        }
    }
}

/// Owner of the current snapshot and of every resource it references.
///
/// Dropping the session releases all resources.
#[derive(Debug, Default)]
pub struct Session {
    state: Arc<ReportState>,
    resources: ResourceTable,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot
    pub fn state(&self) -> Arc<ReportState> {
        Arc::clone(&self.state)
    }

    pub fn resources(&self) -> &ResourceTable {
        &self.resources
    }

    /// Ingest a batch of files and append them after the existing photos.
    ///
    /// Files that cannot be decoded are kept with 0x0 dimensions. The state
    /// changes once, after every file in the batch has been probed.
    pub async fn add_photos(&mut self, paths: &[PathBuf]) -> Result<Vec<PhotoId>> {
        let probed = probe_batch(paths).await?;
        Ok(self.commit_photos(probed))
    }

    /// Register already-probed files and append them as one batch
    pub fn commit_photos(&mut self, probed: Vec<ProbedImage>) -> Vec<PhotoId> {
        if probed.is_empty() {
            return Vec::new();
        }

        let batch: Vec<ImageRecord> = probed
            .into_iter()
            .map(|image| {
                let id = PhotoId::generate();
                let (width, height) = (image.blob.width, image.blob.height);
                let location = self.resources.register(ResourceOwner::Photo(id), image.blob);
                ImageRecord::new(id, location, image.name, width, height)
            })
            .collect();

        let ids: Vec<PhotoId> = batch.iter().map(|r| r.id()).collect();
        log::info!("Added {} photos", ids.len());
        self.state = Arc::new(self.state.with_appended(batch));
        ids
    }

    /// Remove one photo and release its resource
    pub fn remove_photo(&mut self, id: PhotoId) -> Result<ImageRecord> {
        let record = self
            .state
            .photo(id)
            .cloned()
            .ok_or(ReportError::UnknownPhoto(id))?;

        self.resources.release(record.location());
        self.state = Arc::new(self.state.without_photo(id));
        log::info!("Removed photo {} ({})", record.name(), id);
        Ok(record)
    }

    /// Load a logo, replacing (and releasing) the current one
    pub async fn set_logo(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let probed = probe_file(path).await?;
        self.commit_logo(probed);
        Ok(())
    }

    /// Install an already-probed logo, replacing the current one
    pub fn commit_logo(&mut self, probed: ProbedImage) {
        if !probed.blob.has_dimensions() {
            log::warn!(
                "Logo {} could not be decoded; the placeholder will be shown",
                probed.blob.source.display()
            );
        }

        let handle = self.resources.register(ResourceOwner::Logo, probed.blob);
        let mut metadata = self.state.metadata.clone();
        if let Some(previous) = metadata.logo.replace(handle) {
            self.resources.release(previous);
        }
        self.state = Arc::new(self.state.with_metadata(metadata));
    }

    /// Drop the logo. Returns false if there was none.
    pub fn remove_logo(&mut self) -> bool {
        let mut metadata = self.state.metadata.clone();
        match metadata.logo.take() {
            Some(handle) => {
                self.resources.release(handle);
                self.state = Arc::new(self.state.with_metadata(metadata));
                true
            }
            None => false,
        }
    }

    /// Replace the header text fields, keeping the logo
    pub fn set_metadata_text(&mut self, text: MetadataText) {
        let metadata = ReportMetadata {
            organization: text.organization,
            subject: text.subject,
            date: text.date,
            logo: self.state.metadata.logo,
        };
        if metadata != self.state.metadata {
            self.state = Arc::new(self.state.with_metadata(metadata));
        }
    }

    /// Render the current snapshot to PDF bytes
    pub fn render(&self, options: &ReportOptions) -> Result<RenderedReport> {
        render_pdf(&self.state, &self.resources, options)
    }

    /// Render the current snapshot and write it to `path`.
    ///
    /// Fails with [`ReportError::EmptyReport`] when there are no photos; the
    /// session is left untouched either way.
    pub async fn export(
        &self,
        options: &ReportOptions,
        path: impl AsRef<Path>,
    ) -> Result<RenderedReport> {
        export_pdf(
            self.state(),
            self.resources.clone(),
            options.clone(),
            path.as_ref().to_owned(),
        )
        .await
    }

    /// Remove every photo and the logo, keeping the header text
    pub fn clear(&mut self) {
        let released = self.resources.release_all();
        let metadata = ReportMetadata {
            logo: None,
            ..self.state.metadata.clone()
        };
        self.state = Arc::new(ReportState {
            photos: Vec::new(),
            metadata,
        });
        log::info!("Cleared the report, released {} resources", released);
    }

    /// Tear the session down: release every resource and start empty
    pub fn close(&mut self) {
        let released = self.resources.release_all();
        self.state = Arc::new(ReportState::default());
        log::debug!("Session closed, released {} resources", released);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.resources.release_all();
    }
}
