//! Content stream operations for one report page

use crate::constants::{
    CAPTION_MARKER_GAP, FOOTER_RULE_WIDTH, FRAME_BORDER_WIDTH, HEADER_RULE_WIDTH,
    PLACEHOLDER_BORDER_WIDTH, PLACEHOLDER_DASH_LENGTH,
};
use crate::layout::{FontStyle, LogoSlot, PageLayout, PhotoSlot, Rect, TextLine};
use crate::resources::ResourceTable;
use crate::winansi;
use printpdf::{
    BuiltinFont, Color, DictItem, Line, LinePoint, Op, PdfDocument, Point, Pt, Rgb,
    XObjectTransform,
};

use super::xobject::{EmbeddedImage, ImageCache};

/// Caption marker color (blue bar left of each caption)
const CAPTION_MARKER_RGB: (f32, f32, f32) = (0.23, 0.51, 0.96);

/// Width of the caption marker bar (points)
const CAPTION_MARKER_WIDTH: f32 = 1.5;

/// Gray level of frame borders
const FRAME_BORDER_GRAY: f32 = 0.85;

/// Build every operation for `layout`, embedding images into `doc` as needed
pub fn render_page_ops(
    layout: &PageLayout,
    doc: &mut PdfDocument,
    cache: &mut ImageCache,
    resources: &ResourceTable,
) -> Vec<Op> {
    let mut ops = Vec::new();

    // Header
    let header = &layout.header;
    ops.extend(text_ops(&header.organization));
    ops.extend(text_ops(&header.subject));
    ops.extend(text_ops(&header.date_label));
    ops.extend(text_ops(&header.date));

    match &header.logo {
        LogoSlot::Image { handle, rect } => match cache.get_or_embed(doc, resources, *handle) {
            Some(embedded) => ops.extend(image_ops(&embedded, rect)),
            None => {
                log::debug!("Logo could not be embedded, drawing its outline");
                ops.extend(dashed_rect_ops(rect, PLACEHOLDER_BORDER_WIDTH, 0.7));
            }
        },
        LogoSlot::Placeholder { rect, label } => {
            ops.extend(dashed_rect_ops(rect, PLACEHOLDER_BORDER_WIDTH, 0.7));
            ops.extend(text_ops(label));
        }
        LogoSlot::Empty => {}
    }

    ops.extend(line_ops(
        (header.bounds.x, header.rule_y),
        (header.bounds.right(), header.rule_y),
        HEADER_RULE_WIDTH,
        0.1,
    ));

    // Photos
    for slot in &layout.slots {
        ops.extend(photo_ops(slot, doc, cache, resources));
    }

    // Footer
    ops.extend(line_ops(
        (layout.content.x, layout.footer.rule_y),
        (layout.content.right(), layout.footer.rule_y),
        FOOTER_RULE_WIDTH,
        0.8,
    ));
    ops.extend(text_ops(&layout.footer.text));

    ops
}

fn photo_ops(
    slot: &PhotoSlot,
    doc: &mut PdfDocument,
    cache: &mut ImageCache,
    resources: &ResourceTable,
) -> Vec<Op> {
    let mut ops = rect_outline_ops(&slot.frame, FRAME_BORDER_WIDTH, FRAME_BORDER_GRAY);

    if let Some(rect) = &slot.image {
        if let Some(embedded) = cache.get_or_embed(doc, resources, slot.location) {
            ops.extend(image_ops(&embedded, rect));
        }
    }

    // Caption with its marker bar
    let caption = &slot.caption;
    let left = caption.left_edge(caption.width());
    let marker_x = left - CAPTION_MARKER_GAP;
    let (r, g, b) = CAPTION_MARKER_RGB;
    ops.push(Op::SaveGraphicsState);
    ops.push(Op::SetOutlineColor {
        col: Color::Rgb(Rgb::new(r, g, b, None)),
    });
    ops.push(Op::SetOutlineThickness {
        pt: Pt(CAPTION_MARKER_WIDTH),
    });
    ops.push(Op::DrawLine {
        line: polyline(
            &[
                (marker_x, caption.baseline - caption.size_pt * 0.2),
                (marker_x, caption.baseline + caption.size_pt * 0.8),
            ],
            false,
        ),
    });
    ops.push(Op::RestoreGraphicsState);
    ops.extend(text_ops(caption));

    ops
}

fn gray(level: f32) -> Color {
    Color::Rgb(Rgb::new(level, level, level, None))
}

fn builtin_font(style: FontStyle) -> BuiltinFont {
    match style {
        FontStyle::Regular => BuiltinFont::Helvetica,
        FontStyle::Bold => BuiltinFont::HelveticaBold,
        FontStyle::Oblique => BuiltinFont::HelveticaOblique,
    }
}

fn text_ops(line: &TextLine) -> Vec<Op> {
    if line.text.is_empty() {
        return Vec::new();
    }

    let font = builtin_font(line.style);
    let x = line.left_edge(line.width());
    let encoded = winansi::encode(&line.text);
    if encoded.replaced > 0 {
        log::debug!(
            "Replaced {} characters without a WinAnsi code in {:?}",
            encoded.replaced,
            line.text
        );
    }

    vec![
        Op::SaveGraphicsState,
        Op::SetFillColor {
            col: gray(line.gray),
        },
        Op::StartTextSection,
        Op::SetTextCursor {
            pos: Point {
                x: Pt(x),
                y: Pt(line.baseline),
            },
        },
        Op::SetFontSizeBuiltinFont {
            font,
            size: Pt(line.size_pt),
        },
        // Registers the font on the page without writing anything
        Op::WriteTextBuiltinFont {
            items: Vec::new(),
            font,
        },
        show_text_op(encoded.bytes),
        Op::EndTextSection,
        Op::RestoreGraphicsState,
    ]
}

/// `Tj` with an already encoded string
///
/// printpdf writes builtin-font text as UTF-8, so the WinAnsi bytes are
/// emitted as a raw operator instead.
fn show_text_op(bytes: Vec<u8>) -> Op {
    Op::Unknown {
        key: "Tj".to_string(),
        value: vec![DictItem::String {
            data: bytes,
            literal: false,
        }],
    }
}

fn polyline(points: &[(f32, f32)], is_closed: bool) -> Line {
    Line {
        points: points
            .iter()
            .map(|&(x, y)| LinePoint {
                p: Point { x: Pt(x), y: Pt(y) },
                bezier: false,
            })
            .collect(),
        is_closed,
    }
}

fn line_ops(from: (f32, f32), to: (f32, f32), thickness: f32, level: f32) -> Vec<Op> {
    vec![
        Op::SaveGraphicsState,
        Op::SetOutlineColor { col: gray(level) },
        Op::SetOutlineThickness { pt: Pt(thickness) },
        Op::DrawLine {
            line: polyline(&[from, to], false),
        },
        Op::RestoreGraphicsState,
    ]
}

fn rect_outline_ops(rect: &Rect, thickness: f32, level: f32) -> Vec<Op> {
    vec![
        Op::SaveGraphicsState,
        Op::SetOutlineColor { col: gray(level) },
        Op::SetOutlineThickness { pt: Pt(thickness) },
        Op::DrawLine {
            line: polyline(
                &[
                    (rect.x, rect.y),
                    (rect.right(), rect.y),
                    (rect.right(), rect.top()),
                    (rect.x, rect.top()),
                ],
                true,
            ),
        },
        Op::RestoreGraphicsState,
    ]
}

/// Rectangle outline made of short segments
fn dashed_rect_ops(rect: &Rect, thickness: f32, level: f32) -> Vec<Op> {
    let edges = [
        ((rect.x, rect.y), (rect.right(), rect.y)),
        ((rect.right(), rect.y), (rect.right(), rect.top())),
        ((rect.right(), rect.top()), (rect.x, rect.top())),
        ((rect.x, rect.top()), (rect.x, rect.y)),
    ];

    let mut ops = vec![
        Op::SaveGraphicsState,
        Op::SetOutlineColor { col: gray(level) },
        Op::SetOutlineThickness { pt: Pt(thickness) },
    ];

    for (start, end) in edges {
        for (from, to) in dash_segments(start, end, PLACEHOLDER_DASH_LENGTH) {
            ops.push(Op::DrawLine {
                line: polyline(&[from, to], false),
            });
        }
    }

    ops.push(Op::RestoreGraphicsState);
    ops
}

/// Split a segment into dashes of `dash` length separated by equal gaps
fn dash_segments(
    start: (f32, f32),
    end: (f32, f32),
    dash: f32,
) -> Vec<((f32, f32), (f32, f32))> {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let length = (dx * dx + dy * dy).sqrt();
    if length <= 0.0 || dash <= 0.0 {
        return Vec::new();
    }

    let (ux, uy) = (dx / length, dy / length);
    let mut segments = Vec::new();
    let mut offset = 0.0;
    while offset < length {
        let stop = (offset + dash).min(length);
        segments.push((
            (start.0 + ux * offset, start.1 + uy * offset),
            (start.0 + ux * stop, start.1 + uy * stop),
        ));
        offset += 2.0 * dash;
    }
    segments
}

fn image_ops(image: &EmbeddedImage, rect: &Rect) -> Vec<Op> {
    if image.width_px == 0 || image.height_px == 0 {
        return Vec::new();
    }

    // At 72 dpi one pixel is one point, so the scale maps pixels to the rect
    vec![Op::UseXobject {
        id: image.id.clone(),
        transform: XObjectTransform {
            translate_x: Some(Pt(rect.x)),
            translate_y: Some(Pt(rect.y)),
            rotate: None,
            scale_x: Some(rect.width / image.width_px as f32),
            scale_y: Some(rect.height / image.height_px as f32),
            dpi: Some(72.0),
        },
    }]
}
