//! Text metrics and alignment.
//!
//! Fonts are not available when diagrams are generated, so text extents are
//! estimated from a static table of per-character advance widths. The table
//! is a calibration constant: [`CharWidths`] can be swapped for another one
//! without touching layout code.
//!
//! # Examples
//!
//! ```
//! # use figura_core::text::TextMetrics;
//! let metrics = TextMetrics::new(16.0);
//! let size = metrics.size("Hello\nWorld!");
//! assert!(size.width() > metrics.width("Hello"));
//! assert_eq!(size.height(), 2.0 * metrics.line_height());
//! ```

use crate::geometry::Size;

/// Advance widths of the printable ASCII range (space through `~`) in
/// thousandths of an em, taken from the Helvetica AFM metrics.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' - '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0' - '9'
    278, 278, 584, 584, 584, 556, 1015, // ':' - '@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A' - 'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' - 'Z'
    278, 278, 278, 469, 556, 333, // '[' - '`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a' - 'm'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n' - 'z'
    334, 260, 334, 584, // '{' - '~'
];

/// Per-character advance widths used for text size estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct CharWidths {
    ascii: [u16; 95],
    fallback: u16,
}

impl CharWidths {
    /// Creates a width table for the printable ASCII range plus a fallback
    /// width for every other character, all in thousandths of an em.
    pub fn new(ascii: [u16; 95], fallback: u16) -> Self {
        Self { ascii, fallback }
    }

    /// Width of a single character in ems.
    pub fn em_width(&self, c: char) -> f32 {
        let code = c as u32;
        let milli = if (0x20..0x7f).contains(&code) {
            u32::from(self.ascii[(code - 0x20) as usize])
        } else if c == '\t' {
            u32::from(self.ascii[0]) * 4
        } else {
            u32::from(self.fallback)
        };
        milli as f32 / 1000.0
    }
}

impl Default for CharWidths {
    fn default() -> Self {
        Self::new(HELVETICA_WIDTHS, 600)
    }
}

/// Font size, line spacing and width table for estimating text extents.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMetrics {
    font_size: f32,
    line_spacing: f32,
    widths: CharWidths,
}

impl TextMetrics {
    /// Metrics for the given font size with a line spacing of 1.25 and the
    /// default width table.
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            line_spacing: 1.25,
            widths: CharWidths::default(),
        }
    }

    /// Sets the line spacing as a multiple of the font size.
    pub fn with_line_spacing(mut self, line_spacing: f32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    /// Replaces the character width table.
    pub fn with_widths(mut self, widths: CharWidths) -> Self {
        self.widths = widths;
        self
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Distance between consecutive baselines.
    pub fn line_height(&self) -> f32 {
        self.font_size * self.line_spacing
    }

    /// Estimated width of a single line.
    pub fn width(&self, line: &str) -> f32 {
        line.chars().map(|c| self.widths.em_width(c)).sum::<f32>() * self.font_size
    }

    /// Estimated size of a possibly multi-line text block.
    ///
    /// Width is the widest line; height is one line height per line. An
    /// empty string still occupies one line.
    pub fn size(&self, content: &str) -> Size {
        let lines = split_lines(content);
        let width = lines
            .iter()
            .map(|line| self.width(line))
            .fold(0.0, f32::max);
        Size::new(width, lines.len() as f32 * self.line_height())
    }
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::new(16.0)
    }
}

/// Splits text into lines, keeping a single empty line for empty input.
pub fn split_lines(content: &str) -> Vec<&str> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() { vec![""] } else { lines }
}

/// Horizontal placement of text relative to its anchor point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    /// Text starts at the anchor.
    Left,
    #[default]
    Center,
    /// Text ends at the anchor.
    Right,
}

impl HorizontalAlign {
    /// Fraction of the text width that lies left of the anchor.
    pub fn factor(self) -> f32 {
        match self {
            Self::Left => 0.0,
            Self::Center => 0.5,
            Self::Right => 1.0,
        }
    }

    /// SVG `text-anchor` value.
    pub fn text_anchor(self) -> &'static str {
        match self {
            Self::Left => "start",
            Self::Center => "middle",
            Self::Right => "end",
        }
    }
}

/// Vertical placement of text relative to its anchor point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    /// Text hangs below the anchor.
    Top,
    #[default]
    Center,
    /// Text sits on top of the anchor.
    Bottom,
}

impl VerticalAlign {
    /// Fraction of the text height that lies above the anchor.
    pub fn factor(self) -> f32 {
        match self {
            Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Bottom => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_char_widths_ascii_and_fallback() {
        let widths = CharWidths::default();
        assert_approx_eq!(f32, widths.em_width(' '), 0.278);
        assert_approx_eq!(f32, widths.em_width('W'), 0.944);
        assert_approx_eq!(f32, widths.em_width('~'), 0.584);
        assert_approx_eq!(f32, widths.em_width('é'), 0.6);
        assert_approx_eq!(f32, widths.em_width('\t'), 4.0 * 0.278);
    }

    #[test]
    fn test_wide_tab_in_custom_table() {
        let widths = CharWidths::new([u16::MAX; 95], 500);
        assert_approx_eq!(f32, widths.em_width('\t'), 4.0 * 65.535, epsilon = 1e-3);
    }

    #[test]
    fn test_width_scales_with_font_size() {
        let small = TextMetrics::new(10.0);
        let large = TextMetrics::new(20.0);
        assert_approx_eq!(f32, large.width("abc"), 2.0 * small.width("abc"));
        assert_approx_eq!(f32, small.width("0"), 5.56);
    }

    #[test]
    fn test_size_uses_widest_line() {
        let metrics = TextMetrics::new(10.0).with_line_spacing(1.5);
        let size = metrics.size("ii\nWWW\nm");
        assert_approx_eq!(f32, size.width(), metrics.width("WWW"));
        assert_approx_eq!(f32, size.height(), 45.0);
    }

    #[test]
    fn test_empty_text_has_one_line() {
        let metrics = TextMetrics::new(10.0);
        let size = metrics.size("");
        assert_eq!(size.width(), 0.0);
        assert_approx_eq!(f32, size.height(), metrics.line_height());
    }

    #[test]
    fn test_custom_width_table() {
        let metrics = TextMetrics::new(10.0).with_widths(CharWidths::new([500; 95], 500));
        assert_approx_eq!(f32, metrics.width("iW"), 10.0);
    }

    #[test]
    fn test_alignment_factors() {
        assert_eq!(HorizontalAlign::Left.factor(), 0.0);
        assert_eq!(HorizontalAlign::Right.text_anchor(), "end");
        assert_eq!(VerticalAlign::Bottom.factor(), 1.0);
        assert_eq!(VerticalAlign::default(), VerticalAlign::Center);
    }
}
