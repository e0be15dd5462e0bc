//! Colors, fonts and the active theme.
//!
//! Widget options refer to colors symbolically ([`ColorRef::Theme`]) so that
//! swapping the active [`Theme`] between or within frames recolors every
//! widget installed after the swap without touching call sites.

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An sRGB color with alpha.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    /// Opaque color from components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a color string.
    ///
    /// Supports `#rrggbb`, `#rgb` and a handful of names (`black`, `white`,
    /// `red`, `green`, `blue`, `yellow`, `cyan`, `magenta`, `gray`/`grey`).
    pub fn parse(s: &str) -> Option<Color> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        match s.to_ascii_lowercase().as_str() {
            "black" => Some(Color::BLACK),
            "white" => Some(Color::WHITE),
            "red" => Some(Color::rgb(205, 49, 49)),
            "green" => Some(Color::rgb(13, 188, 121)),
            "blue" => Some(Color::rgb(36, 114, 200)),
            "yellow" => Some(Color::rgb(229, 229, 16)),
            "cyan" => Some(Color::rgb(17, 168, 205)),
            "magenta" => Some(Color::rgb(188, 63, 188)),
            "gray" | "grey" => Some(Color::rgb(128, 128, 128)),
            _ => None,
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::rgb(r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            Some(Color::rgb(r * 17, g * 17, b * 17))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Font
// ---------------------------------------------------------------------------

/// A monospace font description.
///
/// Glyph rasterization belongs to the backend; the core only needs metrics.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    pub name: String,
    /// Line height in logical units. Each glyph advances by the same amount.
    pub size: f32,
}

impl Font {
    pub fn new(name: impl Into<String>, size: f32) -> Self {
        Self { name: name.into(), size }
    }

    /// Size of a single line of `text`.
    pub fn text_size(&self, text: &str) -> crate::geometry::Size {
        crate::geometry::Size::new(text.chars().count() as f32 * self.size, self.size)
    }
}

// ---------------------------------------------------------------------------
// Symbolic references
// ---------------------------------------------------------------------------

/// A named color slot of the active theme.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ThemeColor {
    Window,
    Fill,
    FillHover,
    FillPress,
    Text,
    Accent,
    Border,
}

/// Either a theme slot or a concrete color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorRef {
    Theme(ThemeColor),
    Custom(Color),
}

impl From<Color> for ColorRef {
    fn from(c: Color) -> Self {
        ColorRef::Custom(c)
    }
}

impl From<ThemeColor> for ColorRef {
    fn from(c: ThemeColor) -> Self {
        ColorRef::Theme(c)
    }
}

/// A named font slot of the active theme.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ThemeFont {
    Body,
    Heading,
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Color and font values that options reference symbolically.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub name: String,
    pub color_window: Color,
    pub color_fill: Color,
    pub color_fill_hover: Color,
    pub color_fill_press: Color,
    pub color_text: Color,
    pub color_accent: Color,
    pub color_border: Color,
    pub font_body: Font,
    pub font_heading: Font,
}

impl Theme {
    /// The default dark theme.
    pub fn dark() -> Self {
        Self {
            name: "dark".into(),
            color_window: Color::rgb(30, 30, 30),
            color_fill: Color::rgb(50, 50, 50),
            color_fill_hover: Color::rgb(70, 70, 70),
            color_fill_press: Color::rgb(90, 90, 90),
            color_text: Color::rgb(220, 220, 220),
            color_accent: Color::rgb(36, 114, 200),
            color_border: Color::rgb(110, 110, 110),
            font_body: Font::new("mono", 1.0),
            font_heading: Font::new("mono-bold", 1.0),
        }
    }

    /// A light theme.
    pub fn light() -> Self {
        Self {
            name: "light".into(),
            color_window: Color::rgb(245, 245, 245),
            color_fill: Color::rgb(225, 225, 225),
            color_fill_hover: Color::rgb(210, 210, 210),
            color_fill_press: Color::rgb(190, 190, 190),
            color_text: Color::rgb(20, 20, 20),
            color_accent: Color::rgb(0, 95, 184),
            color_border: Color::rgb(150, 150, 150),
            font_body: Font::new("mono", 1.0),
            font_heading: Font::new("mono-bold", 1.0),
        }
    }

    /// Resolve a symbolic color.
    pub fn color(&self, c: ColorRef) -> Color {
        match c {
            ColorRef::Custom(c) => c,
            ColorRef::Theme(slot) => match slot {
                ThemeColor::Window => self.color_window,
                ThemeColor::Fill => self.color_fill,
                ThemeColor::FillHover => self.color_fill_hover,
                ThemeColor::FillPress => self.color_fill_press,
                ThemeColor::Text => self.color_text,
                ThemeColor::Accent => self.color_accent,
                ThemeColor::Border => self.color_border,
            },
        }
    }

    /// Resolve a symbolic font.
    pub fn font(&self, f: ThemeFont) -> &Font {
        match f {
            ThemeFont::Body => &self.font_body,
            ThemeFont::Heading => &self.font_heading,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_six_digits() {
        assert_eq!(Color::parse("#ff8000"), Some(Color::rgb(255, 128, 0)));
    }

    #[test]
    fn parse_hex_three_digits_expands() {
        assert_eq!(Color::parse("#a0f"), Some(Color::rgb(0xaa, 0x00, 0xff)));
    }

    #[test]
    fn parse_named_case_insensitive() {
        assert_eq!(Color::parse("WHITE"), Some(Color::WHITE));
        assert_eq!(Color::parse(" grey "), Color::parse("gray"));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Color::parse("#12").is_none());
        assert!(Color::parse("#zzzzzz").is_none());
        assert!(Color::parse("chartreuse-ish").is_none());
    }

    #[test]
    fn theme_resolves_symbolic_colors() {
        let dark = Theme::dark();
        let light = Theme::light();
        let slot = ColorRef::Theme(ThemeColor::Text);
        assert_eq!(dark.color(slot), dark.color_text);
        assert_eq!(light.color(slot), light.color_text);
        assert_ne!(dark.color(slot), light.color(slot));
    }

    #[test]
    fn custom_colors_ignore_theme() {
        let c = Color::rgb(1, 2, 3);
        assert_eq!(Theme::dark().color(c.into()), c);
        assert_eq!(Theme::light().color(c.into()), c);
    }

    #[test]
    fn monospace_text_size() {
        let f = Font::new("mono", 1.0);
        assert_eq!(f.text_size("hello"), crate::geometry::Size::new(5.0, 1.0));
        assert_eq!(f.text_size(""), crate::geometry::Size::new(0.0, 1.0));
    }
}
