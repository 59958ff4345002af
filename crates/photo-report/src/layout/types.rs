//! Layout data types for report pages
//!
//! These types sit between pagination and PDF rendering: everything is
//! positioned in points with the origin at the bottom-left of the page.

use crate::resources::ResourceHandle;
use crate::types::{Orientation, PhotoId};

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Shrink by `amount` on every side
    pub fn inset(&self, amount: f32) -> Rect {
        Rect::new(
            self.x + amount,
            self.y + amount,
            (self.width - 2.0 * amount).max(0.0),
            (self.height - 2.0 * amount).max(0.0),
        )
    }

    /// Whether `other` lies entirely inside this rect (with float tolerance)
    pub fn contains(&self, other: &Rect) -> bool {
        const EPSILON: f32 = 0.01;
        other.x >= self.x - EPSILON
            && other.y >= self.y - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.top() <= self.top() + EPSILON
    }
}

/// Built-in font face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Oblique,
}

/// Horizontal anchoring of a text line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// A single line of text, already resolved to its final content
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Anchor x; meaning depends on `align`
    pub x: f32,
    /// Baseline y
    pub baseline: f32,
    pub size_pt: f32,
    pub style: FontStyle,
    pub align: TextAlign,
    /// Gray level, 0.0 = black
    pub gray: f32,
}

impl TextLine {
    /// Left edge of the text given an estimated width
    pub fn left_edge(&self, width: f32) -> f32 {
        match self.align {
            TextAlign::Left => self.x,
            TextAlign::Center => self.x - width / 2.0,
            TextAlign::Right => self.x - width,
        }
    }
}

/// Content of the logo box in the header
#[derive(Debug, Clone, PartialEq)]
pub enum LogoSlot {
    /// The logo image, fitted inside the box
    Image {
        handle: ResourceHandle,
        rect: Rect,
    },
    /// Dashed box with a label
    Placeholder { rect: Rect, label: TextLine },
    /// Nothing drawn
    Empty,
}

/// Header block shared by every page
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLayout {
    pub bounds: Rect,
    pub organization: TextLine,
    pub subject: TextLine,
    pub date_label: TextLine,
    pub date: TextLine,
    pub logo: LogoSlot,
    /// Y of the rule under the header
    pub rule_y: f32,
}

/// Where a photo and its caption go on the page
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoSlot {
    pub photo: PhotoId,
    pub location: ResourceHandle,
    /// Fixed-size frame the photo is fitted into
    pub frame: Rect,
    /// Fitted photo; `None` when the photo has no known dimensions
    pub image: Option<Rect>,
    pub caption: TextLine,
}

/// Footer with the page counter
#[derive(Debug, Clone, PartialEq)]
pub struct FooterLayout {
    pub text: TextLine,
    /// Y of the rule above the footer
    pub rule_y: f32,
}

/// Complete geometry of one report page
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub number: usize,
    pub total: usize,
    pub orientation: Orientation,
    pub width: f32,
    pub height: f32,
    /// Page area inside the margins
    pub content: Rect,
    /// Area between header and footer
    pub body: Rect,
    pub header: HeaderLayout,
    pub slots: Vec<PhotoSlot>,
    pub footer: FooterLayout,
}
