//! CSS color values.
//!
//! Configuration surfaces carry colors as CSS color strings (`"#cc3399"`,
//! `"tomato"`). This module parses the forms the host components actually
//! use — hex notation and the CSS named color keywords — into an RGBA8
//! value. Anything else is malformed and rejected; the caller must supply
//! a valid color rather than have one guessed for it.

use std::fmt;

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

/// A string that is not a recognized CSS color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError {
    /// The rejected input.
    pub value: String,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a valid CSS color: {:?}", self.value)
    }
}

impl std::error::Error for ColorParseError {}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color { r, g, b, a: 255 }
}

impl Color {
    /// Fully opaque white.
    pub const WHITE: Self = rgb(255, 255, 255);
    /// Fully opaque black.
    pub const BLACK: Self = rgb(0, 0, 0);

    /// Construct an opaque color from RGB channels.
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        rgb(r, g, b)
    }

    /// Parse a CSS color string: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`,
    /// or a named color keyword (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError`] for any other input, including
    /// functional notation (`rgb(...)`, `hsl(...)`), which is deliberately
    /// unsupported.
    pub fn parse(text: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError {
            value: text.to_owned(),
        };
        if let Some(hex) = text.strip_prefix('#') {
            return Self::parse_hex(hex).ok_or_else(err);
        }
        named(&text.to_ascii_lowercase()).ok_or_else(err)
    }

    /// Hex digits after the `#`: 3, 4, 6, or 8 of them.
    fn parse_hex(hex: &str) -> Option<Self> {
        let nibbles: Vec<u8> =
            hex.bytes().map(hex_nibble).collect::<Option<_>>()?;
        match *nibbles.as_slice() {
            [r, g, b] => Some(Self {
                r: r * 17,
                g: g * 17,
                b: b * 17,
                a: 255,
            }),
            [r, g, b, a] => Some(Self {
                r: r * 17,
                g: g * 17,
                b: b * 17,
                a: a * 17,
            }),
            [r1, r0, g1, g0, b1, b0] => Some(Self {
                r: r1 * 16 + r0,
                g: g1 * 16 + g0,
                b: b1 * 16 + b0,
                a: 255,
            }),
            [r1, r0, g1, g0, b1, b0, a1, a0] => Some(Self {
                r: r1 * 16 + r0,
                g: g1 * 16 + g0,
                b: b1 * 16 + b0,
                a: a1 * 16 + a0,
            }),
            _ => None,
        }
    }

    /// Canonical CSS serialization: `#rrggbb`, or `#rrggbbaa` when not
    /// fully opaque.
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_css())
    }
}

fn hex_nibble(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// CSS extended color keywords (lowercase input).
#[allow(clippy::too_many_lines)]
fn named(name: &str) -> Option<Color> {
    let c = match name {
        "transparent" => Color {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        },
        "aliceblue" => rgb(0xf0, 0xf8, 0xff),
        "antiquewhite" => rgb(0xfa, 0xeb, 0xd7),
        "aqua" | "cyan" => rgb(0x00, 0xff, 0xff),
        "aquamarine" => rgb(0x7f, 0xff, 0xd4),
        "azure" => rgb(0xf0, 0xff, 0xff),
        "beige" => rgb(0xf5, 0xf5, 0xdc),
        "bisque" => rgb(0xff, 0xe4, 0xc4),
        "black" => rgb(0x00, 0x00, 0x00),
        "blanchedalmond" => rgb(0xff, 0xeb, 0xcd),
        "blue" => rgb(0x00, 0x00, 0xff),
        "blueviolet" => rgb(0x8a, 0x2b, 0xe2),
        "brown" => rgb(0xa5, 0x2a, 0x2a),
        "burlywood" => rgb(0xde, 0xb8, 0x87),
        "cadetblue" => rgb(0x5f, 0x9e, 0xa0),
        "chartreuse" => rgb(0x7f, 0xff, 0x00),
        "chocolate" => rgb(0xd2, 0x69, 0x1e),
        "coral" => rgb(0xff, 0x7f, 0x50),
        "cornflowerblue" => rgb(0x64, 0x95, 0xed),
        "cornsilk" => rgb(0xff, 0xf8, 0xdc),
        "crimson" => rgb(0xdc, 0x14, 0x3c),
        "darkblue" => rgb(0x00, 0x00, 0x8b),
        "darkcyan" => rgb(0x00, 0x8b, 0x8b),
        "darkgoldenrod" => rgb(0xb8, 0x86, 0x0b),
        "darkgray" | "darkgrey" => rgb(0xa9, 0xa9, 0xa9),
        "darkgreen" => rgb(0x00, 0x64, 0x00),
        "darkkhaki" => rgb(0xbd, 0xb7, 0x6b),
        "darkmagenta" => rgb(0x8b, 0x00, 0x8b),
        "darkolivegreen" => rgb(0x55, 0x6b, 0x2f),
        "darkorange" => rgb(0xff, 0x8c, 0x00),
        "darkorchid" => rgb(0x99, 0x32, 0xcc),
        "darkred" => rgb(0x8b, 0x00, 0x00),
        "darksalmon" => rgb(0xe9, 0x96, 0x7a),
        "darkseagreen" => rgb(0x8f, 0xbc, 0x8f),
        "darkslateblue" => rgb(0x48, 0x3d, 0x8b),
        "darkslategray" | "darkslategrey" => rgb(0x2f, 0x4f, 0x4f),
        "darkturquoise" => rgb(0x00, 0xce, 0xd1),
        "darkviolet" => rgb(0x94, 0x00, 0xd3),
        "deeppink" => rgb(0xff, 0x14, 0x93),
        "deepskyblue" => rgb(0x00, 0xbf, 0xff),
        "dimgray" | "dimgrey" => rgb(0x69, 0x69, 0x69),
        "dodgerblue" => rgb(0x1e, 0x90, 0xff),
        "firebrick" => rgb(0xb2, 0x22, 0x22),
        "floralwhite" => rgb(0xff, 0xfa, 0xf0),
        "forestgreen" => rgb(0x22, 0x8b, 0x22),
        "fuchsia" | "magenta" => rgb(0xff, 0x00, 0xff),
        "gainsboro" => rgb(0xdc, 0xdc, 0xdc),
        "ghostwhite" => rgb(0xf8, 0xf8, 0xff),
        "gold" => rgb(0xff, 0xd7, 0x00),
        "goldenrod" => rgb(0xda, 0xa5, 0x20),
        "gray" | "grey" => rgb(0x80, 0x80, 0x80),
        "green" => rgb(0x00, 0x80, 0x00),
        "greenyellow" => rgb(0xad, 0xff, 0x2f),
        "honeydew" => rgb(0xf0, 0xff, 0xf0),
        "hotpink" => rgb(0xff, 0x69, 0xb4),
        "indianred" => rgb(0xcd, 0x5c, 0x5c),
        "indigo" => rgb(0x4b, 0x00, 0x82),
        "ivory" => rgb(0xff, 0xff, 0xf0),
        "khaki" => rgb(0xf0, 0xe6, 0x8c),
        "lavender" => rgb(0xe6, 0xe6, 0xfa),
        "lavenderblush" => rgb(0xff, 0xf0, 0xf5),
        "lawngreen" => rgb(0x7c, 0xfc, 0x00),
        "lemonchiffon" => rgb(0xff, 0xfa, 0xcd),
        "lightblue" => rgb(0xad, 0xd8, 0xe6),
        "lightcoral" => rgb(0xf0, 0x80, 0x80),
        "lightcyan" => rgb(0xe0, 0xff, 0xff),
        "lightgoldenrodyellow" => rgb(0xfa, 0xfa, 0xd2),
        "lightgray" | "lightgrey" => rgb(0xd3, 0xd3, 0xd3),
        "lightgreen" => rgb(0x90, 0xee, 0x90),
        "lightpink" => rgb(0xff, 0xb6, 0xc1),
        "lightsalmon" => rgb(0xff, 0xa0, 0x7a),
        "lightseagreen" => rgb(0x20, 0xb2, 0xaa),
        "lightskyblue" => rgb(0x87, 0xce, 0xfa),
        "lightslategray" | "lightslategrey" => rgb(0x77, 0x88, 0x99),
        "lightsteelblue" => rgb(0xb0, 0xc4, 0xde),
        "lightyellow" => rgb(0xff, 0xff, 0xe0),
        "lime" => rgb(0x00, 0xff, 0x00),
        "limegreen" => rgb(0x32, 0xcd, 0x32),
        "linen" => rgb(0xfa, 0xf0, 0xe6),
        "maroon" => rgb(0x80, 0x00, 0x00),
        "mediumaquamarine" => rgb(0x66, 0xcd, 0xaa),
        "mediumblue" => rgb(0x00, 0x00, 0xcd),
        "mediumorchid" => rgb(0xba, 0x55, 0xd3),
        "mediumpurple" => rgb(0x93, 0x70, 0xdb),
        "mediumseagreen" => rgb(0x3c, 0xb3, 0x71),
        "mediumslateblue" => rgb(0x7b, 0x68, 0xee),
        "mediumspringgreen" => rgb(0x00, 0xfa, 0x9a),
        "mediumturquoise" => rgb(0x48, 0xd1, 0xcc),
        "mediumvioletred" => rgb(0xc7, 0x15, 0x85),
        "midnightblue" => rgb(0x19, 0x19, 0x70),
        "mintcream" => rgb(0xf5, 0xff, 0xfa),
        "mistyrose" => rgb(0xff, 0xe4, 0xe1),
        "moccasin" => rgb(0xff, 0xe4, 0xb5),
        "navajowhite" => rgb(0xff, 0xde, 0xad),
        "navy" => rgb(0x00, 0x00, 0x80),
        "oldlace" => rgb(0xfd, 0xf5, 0xe6),
        "olive" => rgb(0x80, 0x80, 0x00),
        "olivedrab" => rgb(0x6b, 0x8e, 0x23),
        "orange" => rgb(0xff, 0xa5, 0x00),
        "orangered" => rgb(0xff, 0x45, 0x00),
        "orchid" => rgb(0xda, 0x70, 0xd6),
        "palegoldenrod" => rgb(0xee, 0xe8, 0xaa),
        "palegreen" => rgb(0x98, 0xfb, 0x98),
        "paleturquoise" => rgb(0xaf, 0xee, 0xee),
        "palevioletred" => rgb(0xdb, 0x70, 0x93),
        "papayawhip" => rgb(0xff, 0xef, 0xd5),
        "peachpuff" => rgb(0xff, 0xda, 0xb9),
        "peru" => rgb(0xcd, 0x85, 0x3f),
        "pink" => rgb(0xff, 0xc0, 0xcb),
        "plum" => rgb(0xdd, 0xa0, 0xdd),
        "powderblue" => rgb(0xb0, 0xe0, 0xe6),
        "purple" => rgb(0x80, 0x00, 0x80),
        "rebeccapurple" => rgb(0x66, 0x33, 0x99),
        "red" => rgb(0xff, 0x00, 0x00),
        "rosybrown" => rgb(0xbc, 0x8f, 0x8f),
        "royalblue" => rgb(0x41, 0x69, 0xe1),
        "saddlebrown" => rgb(0x8b, 0x45, 0x13),
        "salmon" => rgb(0xfa, 0x80, 0x72),
        "sandybrown" => rgb(0xf4, 0xa4, 0x60),
        "seagreen" => rgb(0x2e, 0x8b, 0x57),
        "seashell" => rgb(0xff, 0xf5, 0xee),
        "sienna" => rgb(0xa0, 0x52, 0x2d),
        "silver" => rgb(0xc0, 0xc0, 0xc0),
        "skyblue" => rgb(0x87, 0xce, 0xeb),
        "slateblue" => rgb(0x6a, 0x5a, 0xcd),
        "slategray" | "slategrey" => rgb(0x70, 0x80, 0x90),
        "snow" => rgb(0xff, 0xfa, 0xfa),
        "springgreen" => rgb(0x00, 0xff, 0x7f),
        "steelblue" => rgb(0x46, 0x82, 0xb4),
        "tan" => rgb(0xd2, 0xb4, 0x8c),
        "teal" => rgb(0x00, 0x80, 0x80),
        "thistle" => rgb(0xd8, 0xbf, 0xd8),
        "tomato" => rgb(0xff, 0x63, 0x47),
        "turquoise" => rgb(0x40, 0xe0, 0xd0),
        "violet" => rgb(0xee, 0x82, 0xee),
        "wheat" => rgb(0xf5, 0xde, 0xb3),
        "white" => rgb(0xff, 0xff, 0xff),
        "whitesmoke" => rgb(0xf5, 0xf5, 0xf5),
        "yellow" => rgb(0xff, 0xff, 0x00),
        "yellowgreen" => rgb(0x9a, 0xcd, 0x32),
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(
            Color::parse("#cc3399").unwrap(),
            Color::from_rgb(0xcc, 0x33, 0x99)
        );
    }

    #[test]
    fn parses_three_digit_hex() {
        assert_eq!(
            Color::parse("#fff").unwrap(),
            Color::from_rgb(0xff, 0xff, 0xff)
        );
        assert_eq!(
            Color::parse("#c39").unwrap(),
            Color::from_rgb(0xcc, 0x33, 0x99)
        );
    }

    #[test]
    fn parses_hex_with_alpha() {
        assert_eq!(
            Color::parse("#66aa6680").unwrap(),
            Color {
                r: 0x66,
                g: 0xaa,
                b: 0x66,
                a: 0x80
            }
        );
        assert_eq!(Color::parse("#f00c").unwrap().a, 0xcc);
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!(
            Color::parse("tomato").unwrap(),
            Color::from_rgb(0xff, 0x63, 0x47)
        );
        assert_eq!(
            Color::parse("Tomato").unwrap(),
            Color::parse("tomato").unwrap()
        );
        assert_eq!(
            Color::parse("rebeccapurple").unwrap(),
            Color::from_rgb(0x66, 0x33, 0x99)
        );
        assert_eq!(Color::parse("transparent").unwrap().a, 0);
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["", "#", "#12345", "#gggggg", "notacolor", "rgb(1,2,3)"] {
            assert!(Color::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn css_serialization_round_trips() {
        for text in ["#cc3399", "#66aa66", "#12345678"] {
            let c = Color::parse(text).unwrap();
            assert_eq!(Color::parse(&c.to_css()).unwrap(), c);
        }
        assert_eq!(Color::parse("#fff").unwrap().to_css(), "#ffffff");
    }
}
