use crate::PDFError;
use serde::Deserialize;
use std::str::FromStr;

/// A colour, expressed in RGB or CMYK colour spaces
#[derive(Copy, Clone, PartialEq, Debug, Deserialize)]
#[serde(try_from = "String")]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the CMYK space. c, m, y, and k range from 0.0 to 1.0
    pub fn new_cmyk(c: f32, m: f32, y: f32, k: f32) -> Colour {
        Colour::CMYK { c, m, y, k }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Parse a CSS-style hex colour: `#rgb` or `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Colour, PDFError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || PDFError::InvalidColour(hex.to_string());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                // each nibble is doubled: #abc == #aabbcc
                let expand = |i: usize| channel(&digits[i..i + 1].repeat(2));
                Ok(Colour::new_rgb_bytes(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Colour::new_rgb_bytes(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl FromStr for Colour {
    type Err = PDFError;

    /// Accepts a named colour (see [colours::by_name]) or a hex colour
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(colour) = colours::by_name(s) {
            return Ok(colour);
        }
        if s.starts_with('#') {
            return Colour::from_hex(s);
        }
        Err(PDFError::InvalidColour(s.to_string()))
    }
}

impl TryFrom<String> for Colour {
    type Error = PDFError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

impl<T: Into<f32>> From<(T, T, T, T)> for Colour {
    fn from(c: (T, T, T, T)) -> Self {
        Colour::CMYK {
            c: c.0.into(),
            m: c.1.into(),
            y: c.2.into(),
            k: c.3.into(),
        }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    pub const GREY: Colour = Colour::Grey { g: 0.5 };
    pub const DARK_GREY: Colour = Colour::Grey { g: 0.25 };
    pub const RED: Colour = Colour::RGB {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    pub const GREEN: Colour = Colour::RGB {
        r: 0.0,
        g: 0.5,
        b: 0.0,
    };
    pub const BLUE: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };
    pub const NAVY: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 0.5,
    };
    pub const ORANGE: Colour = Colour::RGB {
        r: 1.0,
        g: 0.647,
        b: 0.0,
    };
    pub const CYAN: Colour = Colour::CMYK {
        c: 1.0,
        m: 0.0,
        y: 0.0,
        k: 0.0,
    };
    pub const MAGENTA: Colour = Colour::CMYK {
        c: 0.0,
        m: 1.0,
        y: 0.0,
        k: 0.0,
    };
    pub const YELLOW: Colour = Colour::CMYK {
        c: 0.0,
        m: 0.0,
        y: 1.0,
        k: 0.0,
    };

    /// Look up one of the constants above by its (case-insensitive) name
    pub fn by_name(name: &str) -> Option<Colour> {
        let colour = match name.to_ascii_lowercase().as_str() {
            "black" => BLACK,
            "white" => WHITE,
            "grey" | "gray" => GREY,
            "darkgrey" | "darkgray" => DARK_GREY,
            "red" => RED,
            "green" => GREEN,
            "blue" => BLUE,
            "navy" => NAVY,
            "orange" => ORANGE,
            "cyan" => CYAN,
            "magenta" => MAGENTA,
            "yellow" => YELLOW,
            _ => return None,
        };
        Some(colour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_colours() {
        assert_eq!("red".parse::<Colour>().unwrap(), colours::RED);
        assert_eq!("Black".parse::<Colour>().unwrap(), colours::BLACK);
        assert_eq!("gray".parse::<Colour>().unwrap(), colours::GREY);
    }

    #[test]
    fn parses_hex_colours() {
        assert_eq!(
            "#ff0000".parse::<Colour>().unwrap(),
            Colour::new_rgb(1.0, 0.0, 0.0)
        );
        assert_eq!(
            "#0f0".parse::<Colour>().unwrap(),
            Colour::new_rgb(0.0, 1.0, 0.0)
        );
        assert_eq!(
            "#000000".parse::<Colour>().unwrap(),
            Colour::new_rgb(0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "not-a-colour".parse::<Colour>(),
            Err(PDFError::InvalidColour(_))
        ));
        assert!(matches!(
            "#12345".parse::<Colour>(),
            Err(PDFError::InvalidColour(_))
        ));
        assert!(matches!(
            "#gggggg".parse::<Colour>(),
            Err(PDFError::InvalidColour(_))
        ));
    }
}
