//! Named styles and the cascade that flattens them into concrete attributes.
//!
//! A [Style] only carries the attributes it explicitly sets; everything else is inherited
//! from its parent style (by name), and ultimately from a set of hard defaults. The
//! [StyleRegistry] validates the inheritance graph once and then answers
//! [StyleRegistry::resolve] queries with fully populated [ResolvedAttributes].

mod options;
mod registry;
mod sample;

pub use options::*;
pub use registry::*;
pub use sample::*;

use crate::{colours, Colour, PDFError, Pt};
use serde::Deserialize;
use std::str::FromStr;

/// Horizontal alignment of the lines in a block of text
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
    Justify,
}

impl FromStr for Alignment {
    type Err = PDFError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "right" => Ok(Alignment::Right),
            "center" | "centre" => Ok(Alignment::Center),
            "justify" => Ok(Alignment::Justify),
            other => Err(PDFError::InvalidOption {
                key: "align".to_string(),
                reason: format!("expected left, right, center or justify, got `{other}`"),
            }),
        }
    }
}

/// How list items are marked
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListStyleType {
    #[default]
    #[serde(alias = "circle", alias = "disc")]
    Bullet,
    Asterisk,
    #[serde(alias = "guillemet")]
    Chevron,
    Dash,
    #[serde(alias = "1")]
    Decimal,
    #[serde(alias = "a")]
    LowerAlpha,
    #[serde(alias = "A")]
    UpperAlpha,
    #[serde(alias = "i")]
    LowerRoman,
    #[serde(alias = "I")]
    UpperRoman,
    None,
}

impl ListStyleType {
    /// Whether items are numbered (as opposed to marked with a glyph)
    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            ListStyleType::Decimal
                | ListStyleType::LowerAlpha
                | ListStyleType::UpperAlpha
                | ListStyleType::LowerRoman
                | ListStyleType::UpperRoman
        )
    }

    /// The marker text for the item at 0-based `index`. Glyph markers all have a
    /// WinAnsi code, so the built-in fonts can draw them.
    pub fn marker(&self, index: usize) -> String {
        let n = index + 1;
        match self {
            ListStyleType::Bullet => "•".to_string(),
            ListStyleType::Asterisk => "*".to_string(),
            ListStyleType::Chevron => "»".to_string(),
            ListStyleType::Dash => "–".to_string(),
            ListStyleType::Decimal => format!("{n}."),
            ListStyleType::LowerAlpha => format!("{}.", alphabetic(n)),
            ListStyleType::UpperAlpha => format!("{}.", alphabetic(n).to_ascii_uppercase()),
            ListStyleType::LowerRoman => format!("{}.", roman(n)),
            ListStyleType::UpperRoman => format!("{}.", roman(n).to_ascii_uppercase()),
            ListStyleType::None => String::new(),
        }
    }
}

/// 1 => a, 26 => z, 27 => aa, ...
fn alphabetic(mut n: usize) -> String {
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push((b'a' + (n % 26) as u8) as char);
        n /= 26;
    }
    letters.iter().rev().collect()
}

fn roman(mut n: usize) -> String {
    const NUMERALS: [(usize, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

/// The attributes a style explicitly declares. Anything left as [None] is inherited.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleAttributes {
    // font & text
    pub font_family: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub font_size: Option<Pt>,
    /// Distance between consecutive baselines
    pub leading: Option<Pt>,
    #[serde(alias = "color")]
    pub colour: Option<Colour>,
    #[serde(alias = "align")]
    pub alignment: Option<Alignment>,
    pub hyphenate: Option<bool>,
    pub allow_widows: Option<bool>,

    // spacing
    pub space_before: Option<Pt>,
    pub space_after: Option<Pt>,
    pub left_indent: Option<Pt>,
    pub right_indent: Option<Pt>,
    pub first_line_indent: Option<Pt>,

    // rules
    pub rule_thickness: Option<Pt>,

    // lists
    pub list_indent: Option<Pt>,
    pub list_style: Option<ListStyleType>,
}

/// Every attribute a flow element needs, all present. Produced by
/// [StyleRegistry::resolve] and consumed straight away by the flow builder.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAttributes {
    pub font_family: String,
    pub bold: bool,
    pub italic: bool,
    pub font_size: Pt,
    pub leading: Pt,
    pub colour: Colour,
    pub alignment: Alignment,
    pub hyphenate: bool,
    pub allow_widows: bool,
    pub space_before: Pt,
    pub space_after: Pt,
    pub left_indent: Pt,
    pub right_indent: Pt,
    pub first_line_indent: Pt,
    pub rule_thickness: Pt,
    pub list_indent: Pt,
    pub list_style: ListStyleType,
}

impl ResolvedAttributes {
    /// The hard defaults every cascade starts from, set in the given font family
    pub fn defaults<S: ToString>(font_family: S) -> ResolvedAttributes {
        ResolvedAttributes {
            font_family: font_family.to_string(),
            bold: false,
            italic: false,
            font_size: Pt(10.0),
            leading: Pt(12.0),
            colour: colours::BLACK,
            alignment: Alignment::Left,
            hyphenate: false,
            allow_widows: true,
            space_before: Pt(0.0),
            space_after: Pt(0.0),
            left_indent: Pt(0.0),
            right_indent: Pt(0.0),
            first_line_indent: Pt(0.0),
            rule_thickness: Pt(1.0),
            list_indent: Pt(18.0),
            list_style: ListStyleType::Bullet,
        }
    }
}

impl StyleAttributes {
    /// Overwrite every attribute of `resolved` that these attributes declare, leaving the
    /// rest untouched
    pub fn overlay(&self, resolved: &mut ResolvedAttributes) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        set(&mut resolved.font_family, &self.font_family);
        set(&mut resolved.bold, &self.bold);
        set(&mut resolved.italic, &self.italic);
        set(&mut resolved.font_size, &self.font_size);
        set(&mut resolved.leading, &self.leading);
        set(&mut resolved.colour, &self.colour);
        set(&mut resolved.alignment, &self.alignment);
        set(&mut resolved.hyphenate, &self.hyphenate);
        set(&mut resolved.allow_widows, &self.allow_widows);
        set(&mut resolved.space_before, &self.space_before);
        set(&mut resolved.space_after, &self.space_after);
        set(&mut resolved.left_indent, &self.left_indent);
        set(&mut resolved.right_indent, &self.right_indent);
        set(&mut resolved.first_line_indent, &self.first_line_indent);
        set(&mut resolved.rule_thickness, &self.rule_thickness);
        set(&mut resolved.list_indent, &self.list_indent);
        set(&mut resolved.list_style, &self.list_style);
    }
}

/// A named, immutable set of declared attributes with an optional parent style
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Style {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(flatten)]
    pub attributes: StyleAttributes,
}

impl Style {
    pub fn new<S: ToString>(name: S) -> Style {
        Style {
            name: name.to_string(),
            parent: None,
            attributes: StyleAttributes::default(),
        }
    }

    pub fn parent<S: ToString>(mut self, parent: S) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    /// Replace all declared attributes at once
    pub fn with(mut self, attributes: StyleAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn font_family<S: ToString>(mut self, family: S) -> Self {
        self.attributes.font_family = Some(family.to_string());
        self
    }

    pub fn font_size<P: Into<Pt>>(mut self, size: P) -> Self {
        self.attributes.font_size = Some(size.into());
        self
    }

    pub fn leading<P: Into<Pt>>(mut self, leading: P) -> Self {
        self.attributes.leading = Some(leading.into());
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.attributes.bold = Some(bold);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.attributes.italic = Some(italic);
        self
    }

    pub fn colour(mut self, colour: Colour) -> Self {
        self.attributes.colour = Some(colour);
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.attributes.alignment = Some(alignment);
        self
    }

    pub fn space_before<P: Into<Pt>>(mut self, space: P) -> Self {
        self.attributes.space_before = Some(space.into());
        self
    }

    pub fn space_after<P: Into<Pt>>(mut self, space: P) -> Self {
        self.attributes.space_after = Some(space.into());
        self
    }

    pub fn left_indent<P: Into<Pt>>(mut self, indent: P) -> Self {
        self.attributes.left_indent = Some(indent.into());
        self
    }

    pub fn list_style(mut self, list_style: ListStyleType) -> Self {
        self.attributes.list_style = Some(list_style);
        self
    }
}
