//! Session-scoped image resources
//!
//! Every photo and the logo own one entry in a [`ResourceTable`]. Records
//! only carry the [`ResourceHandle`]; the bytes live here until the owner is
//! removed or the session is torn down.

use crate::types::PhotoId;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Handle to image bytes held by a [`ResourceTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResourceHandle(pub(crate) u64);

/// Who a resource belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOwner {
    Photo(PhotoId),
    Logo,
}

/// Encoded image bytes plus the dimensions probed from them
#[derive(Debug, Clone)]
pub struct ImageBlob {
    /// File the bytes were read from
    pub source: PathBuf,
    /// Encoded file contents (empty if the file could not be read)
    pub bytes: Arc<[u8]>,
    /// Intrinsic width in pixels, 0 if probing failed
    pub width: u32,
    /// Intrinsic height in pixels, 0 if probing failed
    pub height: u32,
}

impl ImageBlob {
    pub fn has_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[derive(Debug, Clone)]
struct Entry {
    owner: ResourceOwner,
    blob: ImageBlob,
}

/// Ownership table mapping handles to the image bytes they stand for.
///
/// Cloning is cheap: blobs share their bytes.
#[derive(Debug, Clone, Default)]
pub struct ResourceTable {
    next_handle: u64,
    entries: HashMap<ResourceHandle, Entry>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `blob` on behalf of `owner`
    pub fn register(&mut self, owner: ResourceOwner, blob: ImageBlob) -> ResourceHandle {
        self.next_handle += 1;
        let handle = ResourceHandle(self.next_handle);
        log::debug!(
            "Registered {:?} for {:?} ({} bytes)",
            handle,
            owner,
            blob.bytes.len()
        );
        self.entries.insert(handle, Entry { owner, blob });
        handle
    }

    pub fn resolve(&self, handle: ResourceHandle) -> Option<&ImageBlob> {
        self.entries.get(&handle).map(|entry| &entry.blob)
    }

    pub fn owner(&self, handle: ResourceHandle) -> Option<ResourceOwner> {
        self.entries.get(&handle).map(|entry| entry.owner)
    }

    /// Drop the bytes behind `handle`. Returns false if it was already gone.
    pub fn release(&mut self, handle: ResourceHandle) -> bool {
        match self.entries.remove(&handle) {
            Some(entry) => {
                log::debug!("Released {:?} owned by {:?}", handle, entry.owner);
                true
            }
            None => false,
        }
    }

    /// Release everything; returns the number of handles dropped
    pub fn release_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        if count > 0 {
            log::debug!("Released all {} resources", count);
        }
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(len: usize) -> ImageBlob {
        ImageBlob {
            source: PathBuf::from("test.png"),
            bytes: vec![0u8; len].into(),
            width: 10,
            height: 5,
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let mut table = ResourceTable::new();
        let id = PhotoId::generate();
        let handle = table.register(ResourceOwner::Photo(id), blob(3));

        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve(handle).map(|b| b.bytes.len()), Some(3));
        assert_eq!(table.owner(handle), Some(ResourceOwner::Photo(id)));
    }

    #[test]
    fn test_handles_are_never_reused() {
        let mut table = ResourceTable::new();
        let first = table.register(ResourceOwner::Logo, blob(1));
        assert!(table.release(first));
        let second = table.register(ResourceOwner::Logo, blob(1));

        assert_ne!(first, second);
        assert!(table.resolve(first).is_none());
        assert!(!table.release(first));
    }

    #[test]
    fn test_release_all() {
        let mut table = ResourceTable::new();
        table.register(ResourceOwner::Logo, blob(1));
        table.register(ResourceOwner::Photo(PhotoId::generate()), blob(2));

        assert_eq!(table.release_all(), 2);
        assert!(table.is_empty());
    }
}
