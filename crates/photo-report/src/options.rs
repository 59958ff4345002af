use crate::constants::{LINE_HEIGHT_RATIO, mm_to_pt};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Standard paper sizes (always portrait)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PaperSize {
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Custom {
        width_mm: f32,
        height_mm: f32,
    },
}

impl PaperSize {
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
            PaperSize::Custom { .. } => "Custom",
        }
    }
}

/// Printable-area margins of every report page
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageMargins {
    pub top_mm: f32,
    pub bottom_mm: f32,
    pub left_mm: f32,
    pub right_mm: f32,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self::uniform(15.0)
    }
}

impl PageMargins {
    /// Create uniform margins on all sides
    pub fn uniform(margin_mm: f32) -> Self {
        Self {
            top_mm: margin_mm,
            bottom_mm: margin_mm,
            left_mm: margin_mm,
            right_mm: margin_mm,
        }
    }
}

/// Fixed texts printed on every page
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReportLabels {
    /// Report title used in the footer
    pub report_title: String,
    /// Shown when the organization is empty
    pub organization_placeholder: String,
    /// Shown when the subject is empty
    pub subject_placeholder: String,
    /// Prefix of the date line
    pub date_label: String,
    /// Shown when the date is empty
    pub date_placeholder: String,
    /// Text inside the logo placeholder box
    pub logo_placeholder: String,
    /// Footer word before the page number
    pub page_word: String,
    /// Footer word between the page number and the total
    pub of_word: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            report_title: "Photographic Report".to_string(),
            organization_placeholder: "ORGANIZATION OR ENTITY".to_string(),
            subject_placeholder: "Subject description".to_string(),
            date_label: "Date:".to_string(),
            date_placeholder: "____ / ____ / ________".to_string(),
            logo_placeholder: "LOGO".to_string(),
            page_word: "Page".to_string(),
            of_word: "of".to_string(),
        }
    }
}

impl ReportLabels {
    /// Footer line, e.g. "Photographic Report - Page 2 of 5"
    pub fn footer(&self, number: usize, total: usize) -> String {
        format!(
            "{} - {} {} {} {}",
            self.report_title, self.page_word, number, self.of_word, total
        )
    }
}

/// Report layout configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReportOptions {
    // Paper
    pub paper_size: PaperSize,
    pub margins: PageMargins,

    // Page regions
    pub header_height_mm: f32,
    pub footer_height_mm: f32,

    // Photo frames
    pub frame_height_mm: f32,
    pub column_gap_mm: f32,
    pub row_gap_mm: f32,
    pub caption_gap_mm: f32,

    // Logo box
    pub logo_width_mm: f32,
    pub logo_height_mm: f32,
    pub show_logo_placeholder: bool,

    // Font sizes
    pub organization_font_size_pt: f32,
    pub subject_font_size_pt: f32,
    pub date_font_size_pt: f32,
    pub landscape_caption_font_size_pt: f32,
    pub portrait_caption_font_size_pt: f32,
    pub footer_font_size_pt: f32,

    pub labels: ReportLabels,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            margins: PageMargins::default(),
            header_height_mm: 30.0,
            footer_height_mm: 12.0,
            frame_height_mm: 90.0,
            column_gap_mm: 8.5,
            row_gap_mm: 10.5,
            caption_gap_mm: 3.0,
            logo_width_mm: 42.0,
            logo_height_mm: 21.0,
            show_logo_placeholder: false,
            organization_font_size_pt: 14.0,
            subject_font_size_pt: 12.0,
            date_font_size_pt: 11.0,
            landscape_caption_font_size_pt: 11.0,
            portrait_caption_font_size_pt: 10.0,
            footer_font_size_pt: 9.0,
            labels: ReportLabels::default(),
        }
    }
}

impl ReportOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| ReportError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ReportError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Page size in points
    pub fn page_size_pt(&self) -> (f32, f32) {
        let (w, h) = self.paper_size.dimensions_mm();
        (mm_to_pt(w), mm_to_pt(h))
    }

    /// Height of the area between header and footer, in millimeters
    pub fn body_height_mm(&self) -> f32 {
        let (_, h) = self.paper_size.dimensions_mm();
        h - self.margins.top_mm
            - self.margins.bottom_mm
            - self.header_height_mm
            - self.footer_height_mm
    }

    /// Width of the area inside the side margins, in millimeters
    pub fn content_width_mm(&self) -> f32 {
        let (w, _) = self.paper_size.dimensions_mm();
        w - self.margins.left_mm - self.margins.right_mm
    }

    /// Frame plus caption height for one photo, in millimeters
    pub fn slot_height_mm(&self, orientation: Orientation) -> f32 {
        let caption_pt = match orientation {
            Orientation::Landscape => self.landscape_caption_font_size_pt,
            Orientation::Portrait => self.portrait_caption_font_size_pt,
        };
        self.frame_height_mm
            + self.caption_gap_mm
            + crate::constants::pt_to_mm(caption_pt * LINE_HEIGHT_RATIO)
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let (w, h) = self.paper_size.dimensions_mm();
        if w <= 0.0 || h <= 0.0 {
            return Err(ReportError::Config(
                "Paper dimensions must be positive".to_string(),
            ));
        }

        let sizes = [
            ("header height", self.header_height_mm),
            ("footer height", self.footer_height_mm),
            ("frame height", self.frame_height_mm),
            ("logo width", self.logo_width_mm),
            ("logo height", self.logo_height_mm),
            ("organization font size", self.organization_font_size_pt),
            ("subject font size", self.subject_font_size_pt),
            ("date font size", self.date_font_size_pt),
            ("landscape caption font size", self.landscape_caption_font_size_pt),
            ("portrait caption font size", self.portrait_caption_font_size_pt),
            ("footer font size", self.footer_font_size_pt),
        ];
        for (name, value) in sizes {
            if value <= 0.0 {
                return Err(ReportError::Config(format!("{} must be positive", name)));
            }
        }

        let gaps = [
            ("column gap", self.column_gap_mm),
            ("row gap", self.row_gap_mm),
            ("caption gap", self.caption_gap_mm),
            ("top margin", self.margins.top_mm),
            ("bottom margin", self.margins.bottom_mm),
            ("left margin", self.margins.left_mm),
            ("right margin", self.margins.right_mm),
        ];
        for (name, value) in gaps {
            if value < 0.0 {
                return Err(ReportError::Config(format!("{} must not be negative", name)));
            }
        }

        if self.content_width_mm() <= self.column_gap_mm {
            return Err(ReportError::Config(
                "Margins and column gap leave no room for photos".to_string(),
            ));
        }

        if self.logo_width_mm >= self.content_width_mm() {
            return Err(ReportError::Config(
                "Logo box is wider than the page content".to_string(),
            ));
        }

        if self.logo_height_mm > self.header_height_mm {
            return Err(ReportError::Config(
                "Logo box is taller than the header".to_string(),
            ));
        }

        // Both templates stack two slots vertically
        let body = self.body_height_mm();
        for orientation in [Orientation::Landscape, Orientation::Portrait] {
            let needed = 2.0 * self.slot_height_mm(orientation) + self.row_gap_mm;
            if needed > body {
                return Err(ReportError::Config(format!(
                    "{} pages need {:.1}mm between header and footer but only {:.1}mm is available",
                    orientation.label(),
                    needed,
                    body
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        for paper_size in [PaperSize::A4, PaperSize::Letter, PaperSize::Legal] {
            let options = ReportOptions {
                paper_size,
                ..Default::default()
            };
            assert!(options.validate().is_ok(), "{} should fit", paper_size.name());
        }
    }

    #[test]
    fn test_frames_too_tall_for_page() {
        let options = ReportOptions {
            paper_size: PaperSize::A5,
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(ReportError::Config(_))));
    }

    #[test]
    fn test_logo_placeholder_hidden_by_default() {
        assert!(!ReportOptions::default().show_logo_placeholder);
    }

    #[test]
    fn test_negative_gap_rejected() {
        let options = ReportOptions {
            row_gap_mm: -1.0,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_footer_text() {
        let labels = ReportLabels::default();
        assert_eq!(labels.footer(2, 5), "Photographic Report - Page 2 of 5");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_json_uses_defaults() {
        let options: ReportOptions =
            serde_json::from_str(r#"{ "paper_size": "Letter", "frame_height_mm": 80.0 }"#)
                .unwrap();
        assert_eq!(options.paper_size, PaperSize::Letter);
        assert_eq!(options.frame_height_mm, 80.0);
        assert_eq!(options.labels, ReportLabels::default());
        assert!(options.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        let options = ReportOptions {
            show_logo_placeholder: true,
            margins: PageMargins::uniform(12.0),
            ..Default::default()
        };

        options.save(&path).await.unwrap();
        let loaded = ReportOptions::load(&path).await.unwrap();
        assert_eq!(loaded, options);
    }
}
