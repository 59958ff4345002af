//! Pagination: partition photos by orientation and chunk them into pages
//!
//! Landscape pages always come first, then portrait pages. Within each
//! orientation the photos keep the order they were added in.

use crate::types::*;

/// Split `items` into consecutive groups of at most `capacity`.
///
/// The last group may be short; nothing is padded or merged.
pub fn chunk<T: Clone>(items: &[T], capacity: usize) -> Vec<Vec<T>> {
    assert!(capacity > 0, "page capacity must be positive");
    items.chunks(capacity).map(<[T]>::to_vec).collect()
}

/// Photos of one orientation, in their original relative order
pub fn bucket(records: &[ImageRecord], orientation: Orientation) -> Vec<ImageRecord> {
    records
        .iter()
        .filter(|record| record.orientation() == orientation)
        .cloned()
        .collect()
}

/// Lay out the whole report. Zero photos give zero pages.
pub fn paginate(records: &[ImageRecord]) -> Vec<Page> {
    let landscape = chunk(
        &bucket(records, Orientation::Landscape),
        Orientation::Landscape.page_capacity(),
    );
    let portrait = chunk(
        &bucket(records, Orientation::Portrait),
        Orientation::Portrait.page_capacity(),
    );
    let total = landscape.len() + portrait.len();

    let pages: Vec<Page> = landscape
        .into_iter()
        .map(|photos| (Orientation::Landscape, photos))
        .chain(
            portrait
                .into_iter()
                .map(|photos| (Orientation::Portrait, photos)),
        )
        .enumerate()
        .map(|(idx, (orientation, photos))| Page {
            orientation,
            photos,
            number: idx + 1,
            total,
        })
        .collect();

    log::debug!("Paginated {} photos into {} pages", records.len(), total);
    pages
}

/// Count photos and pages without building the pages
pub fn statistics(records: &[ImageRecord]) -> ReportStatistics {
    let landscape_photos = records
        .iter()
        .filter(|r| r.orientation() == Orientation::Landscape)
        .count();
    let portrait_photos = records.len() - landscape_photos;
    let landscape_pages = landscape_photos.div_ceil(Orientation::Landscape.page_capacity());
    let portrait_pages = portrait_photos.div_ceil(Orientation::Portrait.page_capacity());

    ReportStatistics {
        photos: records.len(),
        landscape_photos,
        portrait_photos,
        landscape_pages,
        portrait_pages,
        total_pages: landscape_pages + portrait_pages,
        unprobed_photos: records.iter().filter(|r| r.is_unprobed()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceHandle;

    fn record(name: &str, width: u32, height: u32) -> ImageRecord {
        ImageRecord::new(PhotoId::generate(), ResourceHandle(0), name, width, height)
    }

    fn landscape(name: &str) -> ImageRecord {
        record(name, 400, 300)
    }

    fn portrait(name: &str) -> ImageRecord {
        record(name, 300, 400)
    }

    fn names(page: &Page) -> Vec<&str> {
        page.photos.iter().map(|p| p.name()).collect()
    }

    #[test]
    fn test_chunking_law() {
        for capacity in 1..=5 {
            for n in 0..=13 {
                let items: Vec<usize> = (0..n).collect();
                let chunks = chunk(&items, capacity);

                assert_eq!(chunks.len(), n.div_ceil(capacity));
                for (idx, group) in chunks.iter().enumerate() {
                    if idx + 1 < chunks.len() {
                        assert_eq!(group.len(), capacity);
                    } else if n % capacity == 0 {
                        assert_eq!(group.len(), capacity);
                    } else {
                        assert_eq!(group.len(), n % capacity);
                    }
                }
                let flattened: Vec<usize> = chunks.into_iter().flatten().collect();
                assert_eq!(flattened, items);
            }
        }
    }

    #[test]
    fn test_no_photos_no_pages() {
        assert!(paginate(&[]).is_empty());
        assert_eq!(statistics(&[]).total_pages, 0);
    }

    #[test]
    fn test_mixed_collection() {
        // 3 landscape + 5 portrait, interleaved
        let records = vec![
            portrait("p1"),
            landscape("l1"),
            portrait("p2"),
            landscape("l2"),
            portrait("p3"),
            portrait("p4"),
            landscape("l3"),
            portrait("p5"),
        ];

        let pages = paginate(&records);
        assert_eq!(pages.len(), 4);

        let sizes: Vec<usize> = pages.iter().map(|p| p.photos.len()).collect();
        assert_eq!(sizes, vec![2, 1, 4, 1]);

        assert_eq!(names(&pages[0]), vec!["l1", "l2"]);
        assert_eq!(names(&pages[1]), vec!["l3"]);
        assert_eq!(names(&pages[2]), vec!["p1", "p2", "p3", "p4"]);
        assert_eq!(names(&pages[3]), vec!["p5"]);

        assert_eq!(pages[0].orientation, Orientation::Landscape);
        assert_eq!(pages[1].orientation, Orientation::Landscape);
        assert_eq!(pages[2].orientation, Orientation::Portrait);
        assert_eq!(pages[3].orientation, Orientation::Portrait);

        let numbers: Vec<usize> = pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert!(pages.iter().all(|p| p.total == 4));

        let stats = statistics(&records);
        assert_eq!(stats.landscape_pages, 2);
        assert_eq!(stats.portrait_pages, 2);
        assert_eq!(stats.total_pages, pages.len());
    }

    #[test]
    fn test_every_photo_on_exactly_one_page() {
        let records: Vec<ImageRecord> = (0..23)
            .map(|i| {
                if i % 3 == 0 {
                    portrait(&format!("p{i}"))
                } else {
                    landscape(&format!("l{i}"))
                }
            })
            .collect();

        let pages = paginate(&records);
        let mut seen: Vec<PhotoId> = pages
            .iter()
            .flat_map(|p| p.photos.iter().map(|r| r.id()))
            .collect();
        assert_eq!(seen.len(), records.len());
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), records.len());

        for page in &pages {
            assert!(page.photos.len() <= page.orientation.page_capacity());
            assert!(page.photos.iter().all(|r| r.orientation() == page.orientation));
        }

        // Relative order within each bucket survives
        for orientation in [Orientation::Landscape, Orientation::Portrait] {
            let expected: Vec<PhotoId> = bucket(&records, orientation)
                .iter()
                .map(|r| r.id())
                .collect();
            let actual: Vec<PhotoId> = pages
                .iter()
                .filter(|p| p.orientation == orientation)
                .flat_map(|p| p.photos.iter().map(|r| r.id()))
                .collect();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_pagination_is_deterministic() {
        let records = vec![landscape("a"), portrait("b"), landscape("c"), record("d", 1, 1)];
        assert_eq!(paginate(&records), paginate(&records));
    }

    #[test]
    fn test_only_portrait() {
        let records: Vec<ImageRecord> = (0..8).map(|i| portrait(&format!("p{i}"))).collect();
        let pages = paginate(&records);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].number, 1);
        assert!(pages.iter().all(|p| p.photos.len() == 4));
    }

    #[test]
    fn test_unprobed_photos_are_landscape() {
        let records = vec![record("broken", 0, 0), portrait("p")];
        let stats = statistics(&records);
        assert_eq!(stats.landscape_photos, 1);
        assert_eq!(stats.unprobed_photos, 1);
        assert_eq!(paginate(&records)[0].photos[0].name(), "broken");
    }
}
