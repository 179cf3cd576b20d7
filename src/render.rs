// Chunk: docs/chunks/workspace - ANSI rendering of styled lines

//! Terminal rendering of [`StyledLine`]s as SGR escape sequences.

use sheen_buffer::{Color, NamedColor, Style, StyledLine, UnderlineStyle};

/// Resets all attributes.
pub const RESET: &str = "\x1b[0m";

/// SGR parameters for `style`, without the `ESC [` prefix and `m` suffix.
///
/// Empty for plain styles.
pub fn sgr_params(style: &Style) -> Vec<String> {
    let mut params = Vec::new();

    if style.bold {
        params.push("1".to_string());
    }
    if style.dim {
        params.push("2".to_string());
    }
    if style.italic {
        params.push("3".to_string());
    }
    match style.underline {
        UnderlineStyle::None => {}
        UnderlineStyle::Single => params.push("4".to_string()),
        UnderlineStyle::Double => params.push("4:2".to_string()),
        UnderlineStyle::Curly => params.push("4:3".to_string()),
        UnderlineStyle::Dotted => params.push("4:4".to_string()),
        UnderlineStyle::Dashed => params.push("4:5".to_string()),
    }
    if style.strikethrough {
        params.push("9".to_string());
    }

    if let Some(fg) = color_params(style.fg, 30, 38) {
        params.push(fg);
    }
    if let Some(bg) = color_params(style.bg, 40, 48) {
        params.push(bg);
    }
    if style.underline != UnderlineStyle::None {
        if let Some(color) = style.underline_color.and_then(|c| color_params(c, 0, 58)) {
            params.push(color);
        }
    }

    params
}

/// `base` is the SGR code of black for named colors (30 or 40), `extended`
/// the code introducing 256/RGB colors (38, 48 or 58).
fn color_params(color: Color, base: u8, extended: u8) -> Option<String> {
    match color {
        Color::Default => None,
        Color::Named(named) if base != 0 => {
            let (index, bright) = named_index(named);
            let code = if bright { base + 60 + index } else { base + index };
            Some(code.to_string())
        }
        Color::Named(named) => {
            let (index, bright) = named_index(named);
            Some(format!("{extended};5;{}", index + if bright { 8 } else { 0 }))
        }
        Color::Indexed(index) => Some(format!("{extended};5;{index}")),
        Color::Rgb { r, g, b } => Some(format!("{extended};2;{r};{g};{b}")),
    }
}

fn named_index(color: NamedColor) -> (u8, bool) {
    use NamedColor::*;
    match color {
        Black => (0, false),
        Red => (1, false),
        Green => (2, false),
        Yellow => (3, false),
        Blue => (4, false),
        Magenta => (5, false),
        Cyan => (6, false),
        White => (7, false),
        BrightBlack => (0, true),
        BrightRed => (1, true),
        BrightGreen => (2, true),
        BrightYellow => (3, true),
        BrightBlue => (4, true),
        BrightMagenta => (5, true),
        BrightCyan => (6, true),
        BrightWhite => (7, true),
    }
}

/// Renders one line with escape sequences. Plain spans are written as is.
pub fn render_line(line: &StyledLine) -> String {
    let mut out = String::new();
    for span in &line.spans {
        let params = sgr_params(&span.style);
        if params.is_empty() {
            out.push_str(&span.text);
        } else {
            out.push_str("\x1b[");
            out.push_str(&params.join(";"));
            out.push('m');
            out.push_str(&span.text);
            out.push_str(RESET);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheen_buffer::Span;

    #[test]
    fn test_plain_style_has_no_params() {
        assert!(sgr_params(&Style::default()).is_empty());
    }

    #[test]
    fn test_rgb_foreground() {
        let style = Style::fg(Color::hex(0xcba6f7));
        assert_eq!(sgr_params(&style), vec!["38;2;203;166;247"]);
    }

    #[test]
    fn test_named_colors() {
        let style = Style {
            fg: Color::Named(NamedColor::Red),
            bg: Color::Named(NamedColor::BrightBlue),
            ..Style::default()
        };
        assert_eq!(sgr_params(&style), vec!["31", "104"]);
    }

    #[test]
    fn test_attributes_before_colors() {
        let style = Style {
            bold: true,
            italic: true,
            fg: Color::Indexed(208),
            ..Style::default()
        };
        assert_eq!(sgr_params(&style), vec!["1", "3", "38;5;208"]);
    }

    #[test]
    fn test_curly_underline_with_color() {
        let style = Style {
            underline: UnderlineStyle::Curly,
            underline_color: Some(Color::Named(NamedColor::Red)),
            ..Style::default()
        };
        assert_eq!(sgr_params(&style), vec!["4:3", "58;5;1"]);
    }

    #[test]
    fn test_underline_color_ignored_without_underline() {
        let style = Style {
            underline_color: Some(Color::hex(0xff0000)),
            ..Style::default()
        };
        assert!(sgr_params(&style).is_empty());
    }

    #[test]
    fn test_render_line() {
        let line = StyledLine::new(vec![
            Span::new("fn", Style::fg(Color::Named(NamedColor::Magenta))),
            Span::plain(" main"),
        ]);
        assert_eq!(render_line(&line), "\x1b[35mfn\x1b[0m main");
    }
}
