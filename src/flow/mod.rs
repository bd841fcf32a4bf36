//! Flow elements: the renderer-native units of content a document is made of.
//!
//! Elements are produced from resolved style attributes by the [FlowElementBuilder], or
//! built by hand and appended with [Document::add](crate::Document::add). They carry
//! everything the renderer needs, already resolved: fonts are registry ids, sizes are
//! points, and no style names remain.

mod builder;
pub use builder::*;

use crate::{fonts::Typeface, style::Alignment, Colour, Pt};
use id_arena::Id;

/// Font, size, line spacing and colour for a run of text
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle {
    pub font: Id<Typeface>,
    pub size: Pt,
    pub leading: Pt,
    pub colour: Colour,
}

/// A block of text that is wrapped to the width of its column
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub style: TextStyle,
    pub alignment: Alignment,
    pub space_before: Pt,
    pub space_after: Pt,
    pub left_indent: Pt,
    pub right_indent: Pt,
    /// Extra indent for the first line only; may be negative for a hanging indent
    pub first_line_indent: Pt,
    pub hyphenate: bool,
    /// When false, the last line of the paragraph is never left alone at the top of a column
    pub allow_widows: bool,
}

/// A single list entry: a marker hanging to the left of an indented paragraph
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    /// Bullet glyph or number, may be empty
    pub marker: String,
    /// How far left of the paragraph text the marker starts
    pub marker_offset: Pt,
    pub paragraph: Paragraph,
}

/// A horizontal line across the column
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub thickness: Pt,
    pub colour: Colour,
    pub space_before: Pt,
    pub space_after: Pt,
    pub left_indent: Pt,
    pub right_indent: Pt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowElement {
    Paragraph(Paragraph),
    ListItem(ListItem),
    Rule(Rule),
    /// Fixed vertical space
    Spacer(Pt),
    /// Continue on a fresh page
    PageBreak,
    /// Elements that move to the next column together if they don't fit in the current one
    KeepTogether(Vec<FlowElement>),
}

impl FlowElement {
    /// The text of a paragraph or list item
    pub fn text(&self) -> Option<&str> {
        match self {
            FlowElement::Paragraph(p) => Some(p.text.as_str()),
            FlowElement::ListItem(item) => Some(item.paragraph.text.as_str()),
            _ => None,
        }
    }

    /// The paragraph inside a paragraph or list item
    pub fn paragraph(&self) -> Option<&Paragraph> {
        match self {
            FlowElement::Paragraph(p) => Some(p),
            FlowElement::ListItem(item) => Some(&item.paragraph),
            _ => None,
        }
    }
}

impl From<Paragraph> for FlowElement {
    fn from(p: Paragraph) -> Self {
        FlowElement::Paragraph(p)
    }
}

impl From<ListItem> for FlowElement {
    fn from(item: ListItem) -> Self {
        FlowElement::ListItem(item)
    }
}

impl From<Rule> for FlowElement {
    fn from(rule: Rule) -> Self {
        FlowElement::Rule(rule)
    }
}
