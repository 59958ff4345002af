//! Page templates
//!
//! Landscape pages stack up to two full-width frames; portrait pages use a
//! 2x2 grid. Both share the same header and footer.

use crate::constants::{
    FRAME_PADDING, LINE_HEIGHT_RATIO, PORTRAIT_GRID_COLUMNS, PORTRAIT_GRID_ROWS, mm_to_pt,
};
use crate::options::ReportOptions;
use crate::resources::{ImageBlob, ResourceHandle};
use crate::types::{ImageRecord, Orientation, Page, ReportMetadata};

use super::{
    FontStyle, FooterLayout, HeaderLayout, LogoSlot, PageLayout, PhotoSlot, Rect, TextAlign,
    TextLine, fit_image, text_width, truncate_to_width,
};

/// Size of the "LOGO" placeholder label (points)
const LOGO_PLACEHOLDER_FONT_SIZE: f32 = 10.0;

/// Share of the header width the text block may use
const HEADER_TEXT_WIDTH_RATIO: f32 = 0.7;

/// Gap between header text and logo box (millimeters)
const HEADER_TEXT_LOGO_GAP_MM: f32 = 4.0;

/// Compute the geometry of one page.
///
/// `logo` is the resolved logo resource, if the metadata has one.
pub fn layout_page(
    page: &Page,
    metadata: &ReportMetadata,
    logo: Option<(ResourceHandle, &ImageBlob)>,
    options: &ReportOptions,
) -> PageLayout {
    let (width, height) = options.page_size_pt();
    let content = content_area(options);
    let header = layout_header(metadata, logo, &content, options);
    let footer = layout_footer(page.number, page.total, &content, options);
    let body = body_area(&content, options);

    let slots = match page.orientation {
        Orientation::Landscape => layout_landscape(&page.photos, &body, options),
        Orientation::Portrait => layout_portrait(&page.photos, &body, options),
    };

    PageLayout {
        number: page.number,
        total: page.total,
        orientation: page.orientation,
        width,
        height,
        content,
        body,
        header,
        slots,
        footer,
    }
}

/// Page area inside the margins
pub fn content_area(options: &ReportOptions) -> Rect {
    let (width, height) = options.page_size_pt();
    let left = mm_to_pt(options.margins.left_mm);
    let right = mm_to_pt(options.margins.right_mm);
    let top = mm_to_pt(options.margins.top_mm);
    let bottom = mm_to_pt(options.margins.bottom_mm);
    Rect::new(left, bottom, width - left - right, height - top - bottom)
}

/// Area between header and footer
pub fn body_area(content: &Rect, options: &ReportOptions) -> Rect {
    let header = mm_to_pt(options.header_height_mm);
    let footer = mm_to_pt(options.footer_height_mm);
    Rect::new(
        content.x,
        content.y + footer,
        content.width,
        (content.height - header - footer).max(0.0),
    )
}

/// Header with organization, subject, date and logo box
pub fn layout_header(
    metadata: &ReportMetadata,
    logo: Option<(ResourceHandle, &ImageBlob)>,
    content: &Rect,
    options: &ReportOptions,
) -> HeaderLayout {
    let labels = &options.labels;
    let header_height = mm_to_pt(options.header_height_mm);
    let bounds = Rect::new(
        content.x,
        content.top() - header_height,
        content.width,
        header_height,
    );

    let logo_width = mm_to_pt(options.logo_width_mm);
    let logo_height = mm_to_pt(options.logo_height_mm);
    let max_text_width = (content.width * HEADER_TEXT_WIDTH_RATIO)
        .min(content.width - logo_width - mm_to_pt(HEADER_TEXT_LOGO_GAP_MM));

    let organization_size = options.organization_font_size_pt;
    let organization_text = or_placeholder(&metadata.organization, &labels.organization_placeholder)
        .to_uppercase();
    let organization = TextLine {
        text: truncate_to_width(
            &organization_text,
            organization_size,
            FontStyle::Bold,
            max_text_width,
        ),
        x: content.x,
        baseline: bounds.top() - organization_size,
        size_pt: organization_size,
        style: FontStyle::Bold,
        align: TextAlign::Left,
        gray: 0.1,
    };

    let subject_size = options.subject_font_size_pt;
    let subject = TextLine {
        text: truncate_to_width(
            or_placeholder(&metadata.subject, &labels.subject_placeholder),
            subject_size,
            FontStyle::Regular,
            max_text_width,
        ),
        x: content.x,
        baseline: organization.baseline - subject_size * LINE_HEIGHT_RATIO,
        size_pt: subject_size,
        style: FontStyle::Regular,
        align: TextAlign::Left,
        gray: 0.15,
    };

    let date_size = options.date_font_size_pt;
    let date_baseline = subject.baseline - date_size * LINE_HEIGHT_RATIO;
    let date_label = TextLine {
        text: labels.date_label.clone(),
        x: content.x,
        baseline: date_baseline,
        size_pt: date_size,
        style: FontStyle::Bold,
        align: TextAlign::Left,
        gray: 0.25,
    };
    let label_width = text_width(&format!("{} ", labels.date_label), date_size, FontStyle::Bold);
    let date = TextLine {
        text: truncate_to_width(
            or_placeholder(&metadata.date, &labels.date_placeholder),
            date_size,
            FontStyle::Regular,
            (max_text_width - label_width).max(0.0),
        ),
        x: content.x + label_width,
        baseline: date_baseline,
        size_pt: date_size,
        style: FontStyle::Regular,
        align: TextAlign::Left,
        gray: 0.25,
    };

    let logo_box = Rect::new(
        content.right() - logo_width,
        bounds.top() - logo_height,
        logo_width,
        logo_height,
    );
    let logo = layout_logo(logo, &logo_box, options);

    HeaderLayout {
        bounds,
        organization,
        subject,
        date_label,
        date,
        logo,
        rule_y: bounds.y,
    }
}

fn layout_logo(
    logo: Option<(ResourceHandle, &ImageBlob)>,
    logo_box: &Rect,
    options: &ReportOptions,
) -> LogoSlot {
    if let Some((handle, blob)) = logo {
        if let Some(rect) = fit_image(logo_box, blob.width, blob.height) {
            return LogoSlot::Image { handle, rect };
        }
        log::debug!("Logo has no usable dimensions, falling back to placeholder");
    }

    if !options.show_logo_placeholder {
        return LogoSlot::Empty;
    }

    // Slightly shorter than the box, vertically centered
    let height = logo_box.height * 0.8;
    let rect = Rect::new(
        logo_box.x,
        logo_box.y + (logo_box.height - height) / 2.0,
        logo_box.width,
        height,
    );
    LogoSlot::Placeholder {
        rect,
        label: TextLine {
            text: options.labels.logo_placeholder.clone(),
            x: rect.center_x(),
            baseline: rect.center_y() - LOGO_PLACEHOLDER_FONT_SIZE * 0.35,
            size_pt: LOGO_PLACEHOLDER_FONT_SIZE,
            style: FontStyle::Bold,
            align: TextAlign::Center,
            gray: 0.6,
        },
    }
}

/// Footer with the page counter, right-aligned
pub fn layout_footer(
    number: usize,
    total: usize,
    content: &Rect,
    options: &ReportOptions,
) -> FooterLayout {
    let footer_height = mm_to_pt(options.footer_height_mm);
    let size = options.footer_font_size_pt;
    FooterLayout {
        text: TextLine {
            text: options.labels.footer(number, total),
            x: content.right(),
            baseline: content.y + footer_height / 2.0 - size * 0.35,
            size_pt: size,
            style: FontStyle::Oblique,
            align: TextAlign::Right,
            gray: 0.6,
        },
        rule_y: content.y + footer_height,
    }
}

/// Up to two frames stacked vertically, the stack centered in the body
fn layout_landscape(photos: &[ImageRecord], body: &Rect, options: &ReportOptions) -> Vec<PhotoSlot> {
    if photos.is_empty() {
        return Vec::new();
    }

    let caption_size = options.landscape_caption_font_size_pt;
    let frame_height = mm_to_pt(options.frame_height_mm);
    let block = slot_block_height(frame_height, caption_size, options);
    let gap = mm_to_pt(options.row_gap_mm);

    let count = photos.len() as f32;
    let stack_height = count * block + (count - 1.0) * gap;
    let top = body.top() - ((body.height - stack_height) / 2.0).max(0.0);

    photos
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let frame_top = top - i as f32 * (block + gap);
            let frame = Rect::new(body.x, frame_top - frame_height, body.width, frame_height);
            photo_slot(record, frame, caption_size, options)
        })
        .collect()
}

/// 2x2 grid of equal cells; each frame is vertically centered in its cell
fn layout_portrait(photos: &[ImageRecord], body: &Rect, options: &ReportOptions) -> Vec<PhotoSlot> {
    let caption_size = options.portrait_caption_font_size_pt;
    let frame_height = mm_to_pt(options.frame_height_mm);
    let block = slot_block_height(frame_height, caption_size, options);
    let column_gap = mm_to_pt(options.column_gap_mm);
    let row_gap = mm_to_pt(options.row_gap_mm);

    let columns = PORTRAIT_GRID_COLUMNS as f32;
    let rows = PORTRAIT_GRID_ROWS as f32;
    let cell_width = (body.width - (columns - 1.0) * column_gap) / columns;
    let cell_height = (body.height - (rows - 1.0) * row_gap) / rows;

    photos
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let row = (i / PORTRAIT_GRID_COLUMNS) as f32;
            let col = (i % PORTRAIT_GRID_COLUMNS) as f32;
            let cell = Rect::new(
                body.x + col * (cell_width + column_gap),
                body.top() - (row + 1.0) * cell_height - row * row_gap,
                cell_width,
                cell_height,
            );
            let frame_top = cell.top() - ((cell.height - block) / 2.0).max(0.0);
            let frame = Rect::new(cell.x, frame_top - frame_height, cell.width, frame_height);
            photo_slot(record, frame, caption_size, options)
        })
        .collect()
}

fn slot_block_height(frame_height: f32, caption_size: f32, options: &ReportOptions) -> f32 {
    frame_height + mm_to_pt(options.caption_gap_mm) + caption_size * LINE_HEIGHT_RATIO
}

fn photo_slot(
    record: &ImageRecord,
    frame: Rect,
    caption_size: f32,
    options: &ReportOptions,
) -> PhotoSlot {
    let image = fit_image(&frame.inset(FRAME_PADDING), record.width(), record.height());
    let caption = TextLine {
        text: truncate_to_width(
            &record.name().to_uppercase(),
            caption_size,
            FontStyle::Bold,
            frame.width,
        ),
        x: frame.center_x(),
        baseline: frame.y - mm_to_pt(options.caption_gap_mm) - caption_size,
        size_pt: caption_size,
        style: FontStyle::Bold,
        align: TextAlign::Center,
        gray: 0.15,
    };

    PhotoSlot {
        photo: record.id(),
        location: record.location(),
        frame,
        image,
        caption,
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paginate::paginate;
    use crate::types::PhotoId;
    use std::path::PathBuf;

    fn record(name: &str, width: u32, height: u32) -> ImageRecord {
        ImageRecord::new(PhotoId::generate(), ResourceHandle(1), name, width, height)
    }

    fn blob(width: u32, height: u32) -> ImageBlob {
        ImageBlob {
            source: PathBuf::from("logo.png"),
            bytes: Vec::<u8>::new().into(),
            width,
            height,
        }
    }

    fn overlaps(a: &Rect, b: &Rect) -> bool {
        a.x < b.right() && b.x < a.right() && a.y < b.top() && b.y < a.top()
    }

    #[test]
    fn test_landscape_page_geometry() {
        let options = ReportOptions::default();
        let photos = vec![record("north wall", 4000, 3000), record("south", 1600, 900)];
        let pages = paginate(&photos);
        let layout = layout_page(&pages[0], &ReportMetadata::default(), None, &options);

        assert_eq!(layout.slots.len(), 2);
        for slot in &layout.slots {
            assert!(layout.body.contains(&slot.frame));
            let image = slot.image.expect("probed photo gets an image rect");
            assert!(slot.frame.contains(&image));
            assert!((slot.frame.width - layout.body.width).abs() < 0.01);
            assert!(slot.caption.baseline > layout.body.y);
        }
        // First photo above the second
        assert!(layout.slots[0].frame.y > layout.slots[1].frame.top());
        assert_eq!(layout.slots[0].caption.text, "NORTH WALL");
    }

    #[test]
    fn test_single_landscape_is_centered() {
        let options = ReportOptions::default();
        let pages = paginate(&[record("only", 800, 600)]);
        let layout = layout_page(&pages[0], &ReportMetadata::default(), None, &options);

        let frame = layout.slots[0].frame;
        let space_above = layout.body.top() - frame.top();
        assert!(space_above > 0.0);
        assert!(layout.body.contains(&frame));
    }

    #[test]
    fn test_portrait_grid() {
        let options = ReportOptions::default();
        let photos: Vec<_> = (0..4).map(|i| record(&format!("p{i}"), 600, 800)).collect();
        let pages = paginate(&photos);
        let layout = layout_page(&pages[0], &ReportMetadata::default(), None, &options);

        assert_eq!(layout.slots.len(), 4);
        for (i, a) in layout.slots.iter().enumerate() {
            assert!(layout.body.contains(&a.frame));
            for b in &layout.slots[i + 1..] {
                assert!(!overlaps(&a.frame, &b.frame));
            }
        }
        // Row-major: 0 and 1 share a row, 2 sits below 0
        assert!((layout.slots[0].frame.y - layout.slots[1].frame.y).abs() < 0.01);
        assert!(layout.slots[0].frame.x < layout.slots[1].frame.x);
        assert!(layout.slots[2].frame.top() < layout.slots[0].frame.y);
    }

    #[test]
    fn test_unprobed_photo_has_empty_frame() {
        let options = ReportOptions::default();
        let pages = paginate(&[record("broken", 0, 0)]);
        let layout = layout_page(&pages[0], &ReportMetadata::default(), None, &options);
        assert!(layout.slots[0].image.is_none());
    }

    #[test]
    fn test_header_placeholders() {
        let options = ReportOptions::default();
        let content = content_area(&options);
        let header = layout_header(&ReportMetadata::default(), None, &content, &options);

        assert_eq!(header.organization.text, "ORGANIZATION OR ENTITY");
        assert_eq!(header.subject.text, "Subject description");
        assert_eq!(header.date.text, options.labels.date_placeholder);
        assert_eq!(header.logo, LogoSlot::Empty);
    }

    #[test]
    fn test_logo_placeholder_when_enabled() {
        let options = ReportOptions {
            show_logo_placeholder: true,
            ..Default::default()
        };
        let content = content_area(&options);
        let header = layout_header(&ReportMetadata::default(), None, &content, &options);
        match header.logo {
            LogoSlot::Placeholder { rect, label } => {
                assert_eq!(label.text, "LOGO");
                assert!(rect.right() <= content.right() + 0.01);
            }
            other => panic!("expected placeholder, got {:?}", other),
        }
    }

    #[test]
    fn test_header_with_metadata_and_logo() {
        let options = ReportOptions::default();
        let content = content_area(&options);
        let metadata = ReportMetadata {
            organization: "City Hall".to_string(),
            subject: "School renovation".to_string(),
            date: "January 2025".to_string(),
            logo: Some(ResourceHandle(9)),
        };
        let logo = blob(300, 100);
        let header = layout_header(&metadata, Some((ResourceHandle(9), &logo)), &content, &options);

        assert_eq!(header.organization.text, "CITY HALL");
        assert_eq!(header.subject.text, "School renovation");
        assert_eq!(header.date.text, "January 2025");
        match header.logo {
            LogoSlot::Image { handle, rect } => {
                assert_eq!(handle, ResourceHandle(9));
                assert!(rect.right() <= content.right() + 0.01);
                assert!(rect.top() <= header.bounds.top() + 0.01);
            }
            other => panic!("expected logo image, got {:?}", other),
        }
    }

    #[test]
    fn test_logo_placeholder_can_be_hidden() {
        let options = ReportOptions {
            show_logo_placeholder: false,
            ..Default::default()
        };
        let content = content_area(&options);
        let header = layout_header(&ReportMetadata::default(), None, &content, &options);
        assert_eq!(header.logo, LogoSlot::Empty);

        // An undecodable logo behaves like no logo
        let broken = blob(0, 0);
        let header = layout_header(
            &ReportMetadata::default(),
            Some((ResourceHandle(3), &broken)),
            &content,
            &options,
        );
        assert_eq!(header.logo, LogoSlot::Empty);
    }

    #[test]
    fn test_long_header_text_stays_clear_of_logo() {
        let options = ReportOptions {
            show_logo_placeholder: true,
            ..Default::default()
        };
        let content = content_area(&options);
        let metadata = ReportMetadata {
            organization: "Secretaria Municipal de Obras e Serviços Públicos de Waldwick Township"
                .to_string(),
            subject: "WWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWW".to_string(),
            date: "MMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMMM".to_string(),
            logo: None,
        };
        let header = layout_header(&metadata, None, &content, &options);

        let LogoSlot::Placeholder { rect: logo_box, .. } = header.logo else {
            panic!("expected the logo placeholder");
        };
        assert!(header.organization.text.ends_with("..."));
        for line in [&header.organization, &header.subject, &header.date] {
            assert!(line.x + line.width() < logo_box.x, "{:?} runs into the logo", line.text);
        }
    }

    #[test]
    fn test_long_caption_fits_frame() {
        let options = ReportOptions::default();
        let photos: Vec<_> = (0..4)
            .map(|_| record("WWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWWW", 600, 800))
            .collect();
        let pages = paginate(&photos);
        let layout = layout_page(&pages[0], &ReportMetadata::default(), None, &options);

        for slot in &layout.slots {
            assert!(slot.caption.text.ends_with("..."));
            assert!(slot.caption.width() <= slot.frame.width + 0.001);
        }
    }

    #[test]
    fn test_footer() {
        let options = ReportOptions::default();
        let content = content_area(&options);
        let footer = layout_footer(3, 4, &content, &options);
        assert_eq!(footer.text.text, "Photographic Report - Page 3 of 4");
        assert_eq!(footer.text.align, TextAlign::Right);
        assert!(footer.rule_y > footer.text.baseline);
    }
}
