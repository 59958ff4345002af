use photo_report::{PhotoId, Session, probe_batch, probe_file};
use photo_report_runtime::ReportUpdate;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Longest edge of photo thumbnails, in pixels
const THUMBNAIL_SIZE: u32 = 160;

/// Longest edge of the logo preview, in pixels
const LOGO_PREVIEW_SIZE: u32 = 96;

/// Decode encoded bytes and shrink them to fit a `max_edge` square.
/// `None` if the bytes are not a decodable image.
pub fn thumbnail_rgba(bytes: &[u8], max_edge: u32) -> Option<(usize, usize, Vec<u8>)> {
    let image = image::load_from_memory(bytes).ok()?;
    let rgba = image.thumbnail(max_edge, max_edge).to_rgba8();
    let (width, height) = rgba.dimensions();
    Some((width as usize, height as usize, rgba.into_raw()))
}

async fn thumbnail_blocking(
    bytes: Arc<[u8]>,
    max_edge: u32,
) -> Option<(usize, usize, Vec<u8>)> {
    match tokio::task::spawn_blocking(move || thumbnail_rgba(&bytes, max_edge)).await {
        Ok(thumbnail) => thumbnail,
        Err(e) => {
            log::warn!("Thumbnail task failed: {}", e);
            None
        }
    }
}

pub async fn handle_add_photos(
    paths: Vec<PathBuf>,
    session: &mut Session,
    update_tx: &mpsc::UnboundedSender<ReportUpdate>,
) {
    if paths.is_empty() {
        let _ = update_tx.send(ReportUpdate::IngestFinished {
            added: 0,
            unreadable: 0,
        });
        return;
    }

    let _ = update_tx.send(ReportUpdate::IngestStarted { count: paths.len() });

    let probed = match probe_batch(&paths).await {
        Ok(probed) => probed,
        Err(e) => {
            let _ = update_tx.send(ReportUpdate::Error {
                message: format!("Failed to add photos: {e}"),
            });
            let _ = update_tx.send(ReportUpdate::IngestFinished {
                added: 0,
                unreadable: 0,
            });
            return;
        }
    };

    let unreadable = probed.iter().filter(|p| !p.blob.has_dimensions()).count();
    let sources: Vec<Arc<[u8]>> = probed.iter().map(|p| Arc::clone(&p.blob.bytes)).collect();
    let ids: Vec<PhotoId> = session.commit_photos(probed);

    let _ = update_tx.send(ReportUpdate::StateChanged {
        state: session.state(),
    });
    let _ = update_tx.send(ReportUpdate::IngestFinished {
        added: ids.len(),
        unreadable,
    });

    for (id, bytes) in ids.into_iter().zip(sources) {
        if let Some((width, height, rgba_data)) = thumbnail_blocking(bytes, THUMBNAIL_SIZE).await {
            let _ = update_tx.send(ReportUpdate::Thumbnail {
                id,
                width,
                height,
                rgba_data,
            });
        }
    }
}

pub fn handle_remove_photo(
    id: PhotoId,
    session: &mut Session,
    update_tx: &mpsc::UnboundedSender<ReportUpdate>,
) {
    match session.remove_photo(id) {
        Ok(_) => {
            let _ = update_tx.send(ReportUpdate::StateChanged {
                state: session.state(),
            });
        }
        Err(e) => {
            let _ = update_tx.send(ReportUpdate::Error {
                message: e.to_string(),
            });
        }
    }
}

pub async fn handle_set_logo(
    path: PathBuf,
    session: &mut Session,
    update_tx: &mpsc::UnboundedSender<ReportUpdate>,
) {
    let probed = match probe_file(&path).await {
        Ok(probed) => probed,
        Err(e) => {
            let _ = update_tx.send(ReportUpdate::Error {
                message: format!("Failed to load logo: {e}"),
            });
            return;
        }
    };

    let bytes = Arc::clone(&probed.blob.bytes);
    session.commit_logo(probed);
    log::info!("Logo set from {}", path.display());

    let _ = update_tx.send(ReportUpdate::StateChanged {
        state: session.state(),
    });

    match thumbnail_blocking(bytes, LOGO_PREVIEW_SIZE).await {
        Some((width, height, rgba_data)) => {
            let _ = update_tx.send(ReportUpdate::LogoThumbnail {
                width,
                height,
                rgba_data,
            });
        }
        // Undecodable logo: the report falls back to the placeholder box
        None => {
            let _ = update_tx.send(ReportUpdate::LogoRemoved);
        }
    }
}

pub fn handle_remove_logo(session: &mut Session, update_tx: &mpsc::UnboundedSender<ReportUpdate>) {
    if session.remove_logo() {
        log::info!("Logo removed");
        let _ = update_tx.send(ReportUpdate::LogoRemoved);
        let _ = update_tx.send(ReportUpdate::StateChanged {
            state: session.state(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_thumbnail_keeps_aspect() {
        let mut bytes = Vec::new();
        image::RgbImage::new(400, 200)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let (width, height, rgba) = thumbnail_rgba(&bytes, 100).unwrap();
        assert_eq!((width, height), (100, 50));
        assert_eq!(rgba.len(), 100 * 50 * 4);
    }

    #[test]
    fn test_thumbnail_of_garbage() {
        assert!(thumbnail_rgba(b"not an image", 100).is_none());
    }

    #[tokio::test]
    async fn test_add_photos_reports_progress() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        let bad = dir.path().join("bad.png");
        image::RgbImage::new(30, 40).save(&good).unwrap();
        std::fs::write(&bad, b"garbage").unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut session = Session::new();
        handle_add_photos(vec![good, bad], &mut session, &tx).await;
        drop(tx);

        let mut updates = Vec::new();
        while let Some(update) = rx.recv().await {
            updates.push(update);
        }

        assert!(matches!(updates[0], ReportUpdate::IngestStarted { count: 2 }));
        assert!(matches!(&updates[1], ReportUpdate::StateChanged { state } if state.photos().len() == 2));
        assert!(matches!(
            updates[2],
            ReportUpdate::IngestFinished {
                added: 2,
                unreadable: 1
            }
        ));
        // Only the decodable photo gets a thumbnail
        let thumbnails = updates
            .iter()
            .filter(|u| matches!(u, ReportUpdate::Thumbnail { .. }))
            .count();
        assert_eq!(thumbnails, 1);
    }
}
