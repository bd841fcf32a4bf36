use super::{Alignment, ResolvedAttributes};
use crate::{layout::Margins, Colour, PDFError, Pt};

/// Call-site overrides applied on top of a resolved style. Every field is optional; set
/// fields always win over whatever the style chain declares.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Options {
    pub colour: Option<Colour>,
    pub align: Option<Alignment>,
    pub margin_top: Option<Pt>,
    pub margin_right: Option<Pt>,
    pub margin_bottom: Option<Pt>,
    pub margin_left: Option<Pt>,
    /// All four margins at once; takes precedence over the individual margin keys
    pub margins: Option<Margins>,
    pub font_size: Option<Pt>,
    pub leading: Option<Pt>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
}

impl Options {
    pub fn new() -> Options {
        Options::default()
    }

    /// Build overrides from loosely typed key / value pairs, as they would come out of a
    /// form or a query string. Unknown keys and unparseable values are errors.
    ///
    /// Recognised keys: `color`/`colour`, `align`, `margin_top`, `margin_right`,
    /// `margin_bottom`, `margin_left`, `margins` (four numbers separated by commas or
    /// spaces, in top / right / bottom / left order), `font_size`, `leading`, `bold`,
    /// `italic`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Options, PDFError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Options::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            match key {
                "color" | "colour" => options.colour = Some(value.parse()?),
                "align" | "alignment" => options.align = Some(value.parse()?),
                "margin_top" => options.margin_top = Some(length(key, value)?),
                "margin_right" => options.margin_right = Some(length(key, value)?),
                "margin_bottom" => options.margin_bottom = Some(length(key, value)?),
                "margin_left" => options.margin_left = Some(length(key, value)?),
                "margins" => options.margins = Some(margins(key, value)?),
                "font_size" => options.font_size = Some(length(key, value)?),
                "leading" => options.leading = Some(length(key, value)?),
                "bold" => options.bold = Some(flag(key, value)?),
                "italic" => options.italic = Some(flag(key, value)?),
                unknown => return Err(PDFError::UnknownOption(unknown.to_string())),
            }
        }
        Ok(options)
    }

    pub fn colour(mut self, colour: Colour) -> Self {
        self.colour = Some(colour);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    pub fn margins<M: Into<Margins>>(mut self, margins: M) -> Self {
        self.margins = Some(margins.into());
        self
    }

    pub fn margin_top<P: Into<Pt>>(mut self, margin: P) -> Self {
        self.margin_top = Some(margin.into());
        self
    }

    pub fn margin_bottom<P: Into<Pt>>(mut self, margin: P) -> Self {
        self.margin_bottom = Some(margin.into());
        self
    }

    pub fn margin_left<P: Into<Pt>>(mut self, margin: P) -> Self {
        self.margin_left = Some(margin.into());
        self
    }

    pub fn margin_right<P: Into<Pt>>(mut self, margin: P) -> Self {
        self.margin_right = Some(margin.into());
        self
    }

    pub fn font_size<P: Into<Pt>>(mut self, size: P) -> Self {
        self.font_size = Some(size.into());
        self
    }

    pub fn leading<P: Into<Pt>>(mut self, leading: P) -> Self {
        self.leading = Some(leading.into());
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Options::default()
    }

    /// The effective top / right / bottom / left overrides, with `margins` winning over
    /// the individual keys
    pub fn margin_overrides(&self) -> [Option<Pt>; 4] {
        match self.margins {
            Some(m) => [Some(m.top), Some(m.right), Some(m.bottom), Some(m.left)],
            None => [
                self.margin_top,
                self.margin_right,
                self.margin_bottom,
                self.margin_left,
            ],
        }
    }

    /// Overlay every set field onto `resolved`
    pub fn apply(&self, resolved: &mut ResolvedAttributes) {
        if let Some(colour) = self.colour {
            resolved.colour = colour;
        }
        if let Some(align) = self.align {
            resolved.alignment = align;
        }
        if let Some(size) = self.font_size {
            resolved.font_size = size;
        }
        if let Some(leading) = self.leading {
            resolved.leading = leading;
        }
        if let Some(bold) = self.bold {
            resolved.bold = bold;
        }
        if let Some(italic) = self.italic {
            resolved.italic = italic;
        }

        let [top, right, bottom, left] = self.margin_overrides();
        if let Some(top) = top {
            resolved.space_before = top;
        }
        if let Some(right) = right {
            resolved.right_indent = right;
        }
        if let Some(bottom) = bottom {
            resolved.space_after = bottom;
        }
        if let Some(left) = left {
            resolved.left_indent = left;
        }
    }
}

fn invalid(key: &str, reason: String) -> PDFError {
    PDFError::InvalidOption {
        key: key.to_string(),
        reason,
    }
}

fn length(key: &str, value: &str) -> Result<Pt, PDFError> {
    let parsed: f32 = value
        .parse()
        .map_err(|_| invalid(key, format!("`{value}` is not a number")))?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(invalid(key, format!("`{value}` must be a non-negative length")));
    }
    Ok(Pt(parsed))
}

fn flag(key: &str, value: &str) -> Result<bool, PDFError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(invalid(key, format!("`{value}` is not a boolean"))),
    }
}

fn margins(key: &str, value: &str) -> Result<Margins, PDFError> {
    let parts = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| length(key, part))
        .collect::<Result<Vec<Pt>, PDFError>>()?;
    match parts.as_slice() {
        [top, right, bottom, left] => Ok(Margins::trbl(*top, *right, *bottom, *left)),
        _ => Err(invalid(
            key,
            format!("expected four lengths, got {}", parts.len()),
        )),
    }
}
