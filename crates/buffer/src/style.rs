// Chunk: docs/chunks/style_scheme - Style attributes and named style schemes
//!
//! Text styling attributes carried by tags.
//!
//! - [`Color`]: Named (16 ANSI), indexed (256), and RGB
//! - [`Style`]: Text attributes (fg/bg, bold, italic, underline variants, etc.)
//! - [`Span`]: A run of text with uniform styling
//! - [`StyledLine`]: A sequence of spans comprising a single line

// =============================================================================
// Color Types
// =============================================================================

/// The 16 standard ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// Color representation.
///
/// `Default` means "unset": it never overrides a color set by a
/// lower-priority tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Default foreground/background.
    #[default]
    Default,
    /// Named ANSI colors (0-15).
    Named(NamedColor),
    /// 256-color palette index.
    Indexed(u8),
    /// 24-bit RGB color.
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Builds an RGB color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Color::Rgb {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Color::Default)
    }
}

// =============================================================================
// Underline Types
// =============================================================================

/// Underline rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnderlineStyle {
    /// No underline.
    #[default]
    None,
    /// Single straight underline.
    Single,
    /// Double straight underline.
    Double,
    /// Curly/wavy underline (used for diagnostics).
    Curly,
    /// Dotted underline.
    Dotted,
    /// Dashed underline.
    Dashed,
}

// =============================================================================
// Style
// =============================================================================

/// Text styling attributes.
///
/// The default style is unstyled text: default colors, no attributes.
///
/// # Example
///
/// ```
/// use sheen_buffer::{Color, Style, UnderlineStyle};
///
/// let error_style = Style {
///     underline: UnderlineStyle::Curly,
///     underline_color: Some(Color::hex(0xff0000)),
///     ..Style::default()
/// };
/// assert!(!error_style.is_plain());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Style {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
    /// Dim/faint intensity.
    pub dim: bool,
    /// Underline style.
    pub underline: UnderlineStyle,
    /// Underline color (None = use fg color).
    pub underline_color: Option<Color>,
    /// Strikethrough line.
    pub strikethrough: bool,
}

impl Style {
    /// Shorthand for a style that only sets the foreground.
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Self::default()
        }
    }

    /// Returns true if this style sets nothing.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Layers `top` over `self`.
    ///
    /// Attributes set on `top` win; unset attributes fall through.
    pub fn overlay(self, top: &Style) -> Style {
        Style {
            fg: if top.fg.is_default() { self.fg } else { top.fg },
            bg: if top.bg.is_default() { self.bg } else { top.bg },
            bold: self.bold || top.bold,
            italic: self.italic || top.italic,
            dim: self.dim || top.dim,
            underline: if top.underline == UnderlineStyle::None {
                self.underline
            } else {
                top.underline
            },
            underline_color: top.underline_color.or(self.underline_color),
            strikethrough: self.strikethrough || top.strikethrough,
        }
    }
}

// =============================================================================
// Span and StyledLine
// =============================================================================

/// A contiguous run of text with uniform styling.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    /// The text content of this span.
    pub text: String,
    /// The style applied to this text.
    pub style: Style,
}

impl Span {
    /// Creates a new span with the given text and style.
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Creates an unstyled span (default style).
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::default())
    }
}

/// A line as a printer sees it: a sequence of styled spans.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledLine {
    /// The spans comprising this line.
    pub spans: Vec<Span>,
}

impl StyledLine {
    /// Creates a new styled line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Creates an empty line.
    pub fn empty() -> Self {
        Self { spans: vec![] }
    }

    /// Returns true if the line has no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Returns the total character count across all spans.
    pub fn char_count(&self) -> usize {
        self.spans.iter().map(|s| s.text.chars().count()).sum()
    }

    /// Concatenated text of all spans.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(Color::hex(0xfcaf3e), Color::Rgb { r: 0xfc, g: 0xaf, b: 0x3e });
    }

    #[test]
    fn test_overlay_prefers_top_when_set() {
        let base = Style {
            fg: Color::hex(0x111111),
            bold: true,
            ..Style::default()
        };
        let top = Style {
            fg: Color::hex(0x222222),
            underline: UnderlineStyle::Curly,
            ..Style::default()
        };
        let merged = base.overlay(&top);
        assert_eq!(merged.fg, Color::hex(0x222222));
        assert!(merged.bold);
        assert_eq!(merged.underline, UnderlineStyle::Curly);
    }

    #[test]
    fn test_overlay_unset_falls_through() {
        let base = Style::fg(Color::Named(NamedColor::Red));
        let merged = base.overlay(&Style::default());
        assert_eq!(merged, base);
    }

    #[test]
    fn test_styled_line_text() {
        let line = StyledLine::new(vec![Span::plain("let "), Span::new("x", Style::default())]);
        assert_eq!(line.text(), "let x");
        assert_eq!(line.char_count(), 5);
    }
}
