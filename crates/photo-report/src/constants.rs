//! Shared constants for report layout and rendering

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Points per image pixel when a photo is shown at its natural size (96 dpi)
pub const POINTS_PER_PIXEL: f32 = 72.0 / 96.0;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Pagination
// =============================================================================

/// Landscape photos per page (stacked vertically)
pub const LANDSCAPE_PAGE_CAPACITY: usize = 2;

/// Portrait photos per page (2x2 grid)
pub const PORTRAIT_PAGE_CAPACITY: usize = 4;

/// Columns in the portrait grid
pub const PORTRAIT_GRID_COLUMNS: usize = 2;

/// Rows in the portrait grid
pub const PORTRAIT_GRID_ROWS: usize = 2;

// =============================================================================
// Text
// =============================================================================

/// Line height as a multiple of the font size
pub const LINE_HEIGHT_RATIO: f32 = 1.25;

// =============================================================================
// Strokes
// =============================================================================

/// Rule under the header (points)
pub const HEADER_RULE_WIDTH: f32 = 1.5;

/// Rule above the footer (points)
pub const FOOTER_RULE_WIDTH: f32 = 0.5;

/// Border around each photo frame (points)
pub const FRAME_BORDER_WIDTH: f32 = 0.5;

/// Border of the logo placeholder box (points)
pub const PLACEHOLDER_BORDER_WIDTH: f32 = 1.0;

/// Dash and gap length of the logo placeholder border (points)
pub const PLACEHOLDER_DASH_LENGTH: f32 = 4.0;

/// Padding between a frame border and the photo inside it (points)
pub const FRAME_PADDING: f32 = 3.0;

/// Gap between the caption marker bar and the caption text (points)
pub const CAPTION_MARKER_GAP: f32 = 6.0;
