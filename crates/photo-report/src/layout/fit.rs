//! Fitting images into frames and text into widths

use crate::constants::POINTS_PER_PIXEL;

use super::{FontStyle, Rect, char_width, text_width};

/// Fit an image of `width_px` x `height_px` into `frame`.
///
/// The image keeps its aspect ratio, is never cropped and never grows past
/// its natural size (pixels at 96 dpi). It is centered in the frame.
/// Returns `None` for images without dimensions.
pub fn fit_image(frame: &Rect, width_px: u32, height_px: u32) -> Option<Rect> {
    if width_px == 0 || height_px == 0 || frame.width <= 0.0 || frame.height <= 0.0 {
        return None;
    }

    let natural_width = width_px as f32 * POINTS_PER_PIXEL;
    let natural_height = height_px as f32 * POINTS_PER_PIXEL;
    let scale = calculate_scale(natural_width, natural_height, frame.width, frame.height);

    let width = natural_width * scale;
    let height = natural_height * scale;

    Some(Rect::new(
        frame.x + (frame.width - width) / 2.0,
        frame.y + (frame.height - height) / 2.0,
        width,
        height,
    ))
}

/// Largest scale <= 1 that fits the source inside the target
fn calculate_scale(src_width: f32, src_height: f32, target_width: f32, target_height: f32) -> f32 {
    let scale_w = target_width / src_width;
    let scale_h = target_height / src_height;
    scale_w.min(scale_h).min(1.0)
}

const ELLIPSIS: &str = "...";

/// Cut `text` so it fits in `max_width`, ending with "..." when shortened
pub fn truncate_to_width(text: &str, size_pt: f32, style: FontStyle, max_width: f32) -> String {
    if text_width(text, size_pt, style) <= max_width {
        return text.to_string();
    }

    let ellipsis = text_width(ELLIPSIS, size_pt, style);
    let budget = if ellipsis <= max_width {
        max_width - ellipsis
    } else {
        max_width
    };

    let mut truncated = String::new();
    let mut width = 0.0;
    for ch in text.chars() {
        width += char_width(ch, size_pt, style);
        if width > budget {
            break;
        }
        truncated.push(ch);
    }

    if ellipsis <= max_width {
        truncated.push_str(ELLIPSIS);
    }
    truncated
}
