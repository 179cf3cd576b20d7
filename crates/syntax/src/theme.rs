// Chunk: docs/chunks/syntax_highlighting - Catppuccin Mocha style scheme

//! Built-in style schemes.
//!
//! Styles are defined under the generic `def:` qualifier so that any
//! capture name, qualified by language or not, finds them through the
//! scheme's fallback chain.

use sheen_buffer::{Style, StyleScheme, UnderlineStyle};

/// Catppuccin Mocha color palette constants.
mod catppuccin {
    use sheen_buffer::Color;

    // Accent colors
    pub const MAUVE: Color = Color::hex(0xcba6f7);
    pub const BLUE: Color = Color::hex(0x89b4fa);
    pub const SAPPHIRE: Color = Color::hex(0x74c7ec);
    pub const GREEN: Color = Color::hex(0xa6e3a1);
    pub const PINK: Color = Color::hex(0xf5c2e7);
    pub const PEACH: Color = Color::hex(0xfab387);
    pub const YELLOW: Color = Color::hex(0xf9e2af);
    pub const MAROON: Color = Color::hex(0xeba0ac);
    pub const RED: Color = Color::hex(0xf38ba8);
    pub const LAVENDER: Color = Color::hex(0xb4befe);
    pub const SKY: Color = Color::hex(0x89dceb);
    pub const TEAL: Color = Color::hex(0x94e2d5);

    // Surface/text colors
    pub const OVERLAY0: Color = Color::hex(0x6c7086);
    pub const SUBTEXT0: Color = Color::hex(0xa6adc8);
}

pub const CATPPUCCIN_MOCHA: &str = "catppuccin-mocha";

/// Ids accepted by [`scheme_by_id`].
pub const SCHEME_IDS: &[&str] = &[CATPPUCCIN_MOCHA];

/// Looks up a built-in scheme.
pub fn scheme_by_id(id: &str) -> Option<StyleScheme> {
    match id {
        CATPPUCCIN_MOCHA => Some(catppuccin_mocha()),
        _ => None,
    }
}

fn italic(style: Style) -> Style {
    Style {
        italic: true,
        ..style
    }
}

/// The Catppuccin Mocha scheme.
pub fn catppuccin_mocha() -> StyleScheme {
    use catppuccin::*;

    let defs: &[(&str, Style)] = &[
        ("keyword", Style::fg(MAUVE)),
        ("function", Style::fg(BLUE)),
        ("function.method", Style::fg(BLUE)),
        ("function.macro", Style::fg(MAUVE)),
        ("type", Style::fg(YELLOW)),
        ("type.builtin", italic(Style::fg(YELLOW))),
        ("constructor", Style::fg(SAPPHIRE)),
        ("string", Style::fg(GREEN)),
        ("string.special", Style::fg(PINK)),
        ("escape", Style::fg(PINK)),
        ("constant", Style::fg(PEACH)),
        ("constant.builtin", Style::fg(PEACH)),
        ("number", Style::fg(PEACH)),
        ("comment", italic(Style::fg(OVERLAY0))),
        ("comment.documentation", italic(Style::fg(OVERLAY0))),
        ("variable.parameter", italic(Style::fg(MAROON))),
        ("variable.builtin", Style::fg(RED)),
        ("property", Style::fg(LAVENDER)),
        ("label", italic(Style::fg(SAPPHIRE))),
        ("tag", Style::fg(MAUVE)),
        ("module", Style::fg(TEAL)),
        ("punctuation.bracket", Style::fg(SUBTEXT0)),
        ("punctuation.delimiter", Style::fg(SUBTEXT0)),
        ("punctuation.special", Style::fg(SUBTEXT0)),
        ("operator", Style::fg(SKY)),
        ("attribute", Style::fg(YELLOW)),
        // Markdown
        (
            "text.title",
            Style {
                bold: true,
                ..Style::fg(MAUVE)
            },
        ),
        ("text.literal", Style::fg(GREEN)),
        (
            "text.uri",
            Style {
                underline: UnderlineStyle::Single,
                ..Style::fg(BLUE)
            },
        ),
        ("text.reference", Style::fg(LAVENDER)),
    ];

    defs.iter()
        .fold(StyleScheme::new(CATPPUCCIN_MOCHA), |scheme, (name, style)| {
            scheme.with_style(format!("def:{name}"), *style)
        })
}
