use super::{FlowElement, ListItem, Paragraph, Rule, TextStyle};
use crate::{
    fonts::{FontRegistry, FontVariant},
    style::ResolvedAttributes,
    PDFError,
};

/// A semantic unit of content before any styling is applied
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
    List { ordered: bool, items: Vec<String> },
    Code(String),
    Rule,
}

impl Block {
    /// The style this kind of block is set in by default
    pub fn style_name(&self) -> String {
        match self {
            Block::Heading { level, .. } => format!("h{}", (*level).clamp(1, 6)),
            Block::Paragraph(_) => "p".to_string(),
            Block::List { ordered: true, .. } => "ol".to_string(),
            Block::List { ordered: false, .. } => "ul".to_string(),
            Block::Code(_) => "code".to_string(),
            Block::Rule => "hr".to_string(),
        }
    }
}

/// Turns resolved style attributes and content into flow elements.
///
/// The builder knows nothing about style names or inheritance; by the time it runs, the
/// cascade has produced a complete [ResolvedAttributes] record.
#[derive(Debug, Copy, Clone)]
pub struct FlowElementBuilder<'a> {
    fonts: &'a FontRegistry,
}

impl<'a> FlowElementBuilder<'a> {
    pub fn new(fonts: &'a FontRegistry) -> FlowElementBuilder<'a> {
        FlowElementBuilder { fonts }
    }

    pub fn text_style(&self, attributes: &ResolvedAttributes) -> Result<TextStyle, PDFError> {
        let variant = FontVariant::from_flags(attributes.bold, attributes.italic);
        let font = self.fonts.resolve(&attributes.font_family, variant)?;
        Ok(TextStyle {
            font,
            size: attributes.font_size,
            leading: attributes.leading,
            colour: attributes.colour,
        })
    }

    /// A paragraph of `text`. Empty text still produces a paragraph, so that its spacing
    /// is kept.
    pub fn paragraph<S: ToString>(
        &self,
        text: S,
        attributes: &ResolvedAttributes,
    ) -> Result<Paragraph, PDFError> {
        Ok(Paragraph {
            text: text.to_string(),
            style: self.text_style(attributes)?,
            alignment: attributes.alignment,
            space_before: attributes.space_before,
            space_after: attributes.space_after,
            left_indent: attributes.left_indent,
            right_indent: attributes.right_indent,
            first_line_indent: attributes.first_line_indent,
            hyphenate: attributes.hyphenate,
            allow_widows: attributes.allow_widows,
        })
    }

    /// One element per item, each marked according to the resolved list style. Items are
    /// indented by the list indent and the marker hangs in that indent.
    pub fn list<S: AsRef<str>>(
        &self,
        items: &[S],
        attributes: &ResolvedAttributes,
    ) -> Result<Vec<FlowElement>, PDFError> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let mut paragraph = self.paragraph(item.as_ref(), attributes)?;
                paragraph.left_indent += attributes.list_indent;
                paragraph.first_line_indent = crate::Pt(0.0);
                Ok(FlowElement::ListItem(ListItem {
                    marker: attributes.list_style.marker(i),
                    marker_offset: attributes.list_indent,
                    paragraph,
                }))
            })
            .collect()
    }

    /// A horizontal rule as thick as the resolved rule thickness
    pub fn rule(&self, attributes: &ResolvedAttributes) -> Rule {
        Rule {
            thickness: attributes.rule_thickness,
            colour: attributes.colour,
            space_before: attributes.space_before,
            space_after: attributes.space_after,
            left_indent: attributes.left_indent,
            right_indent: attributes.right_indent,
        }
    }

    /// Build any kind of block with the given attributes
    pub fn build(
        &self,
        block: &Block,
        attributes: &ResolvedAttributes,
    ) -> Result<Vec<FlowElement>, PDFError> {
        Ok(match block {
            Block::Heading { text, .. } | Block::Paragraph(text) | Block::Code(text) => {
                vec![self.paragraph(text, attributes)?.into()]
            }
            Block::List { items, .. } => self.list(items, attributes)?,
            Block::Rule => vec![self.rule(attributes).into()],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        colours,
        style::{Alignment, ListStyleType},
        Pt,
    };

    fn attributes() -> ResolvedAttributes {
        ResolvedAttributes::defaults("Helvetica")
    }

    #[test]
    fn paragraphs_carry_resolved_attributes() {
        let fonts = FontRegistry::new();
        let builder = FlowElementBuilder::new(&fonts);
        let mut attrs = attributes();
        attrs.bold = true;
        attrs.alignment = Alignment::Justify;
        attrs.colour = colours::NAVY;

        let p = builder.paragraph("Hello", &attrs).unwrap();
        assert_eq!(p.text, "Hello");
        assert_eq!(p.alignment, Alignment::Justify);
        assert_eq!(p.style.colour, colours::NAVY);
        assert_eq!(
            fonts.get(p.style.font).map(|f| f.name()),
            Some("Helvetica-Bold".to_string())
        );

        let empty = builder.paragraph("", &attrs).unwrap();
        assert_eq!(empty.text, "");
    }

    #[test]
    fn unknown_font_families_fail() {
        let fonts = FontRegistry::new();
        let builder = FlowElementBuilder::new(&fonts);
        let mut attrs = attributes();
        attrs.font_family = "Papyrus".to_string();
        assert!(matches!(
            builder.paragraph("x", &attrs),
            Err(PDFError::UnknownFont(_))
        ));
    }

    #[test]
    fn lists_mark_and_indent_items() {
        let fonts = FontRegistry::new();
        let builder = FlowElementBuilder::new(&fonts);
        let mut attrs = attributes();
        attrs.left_indent = Pt(10.0);
        attrs.list_style = ListStyleType::LowerRoman;

        let items = builder.list(&["one", "two", "three"], &attrs).unwrap();
        assert_eq!(items.len(), 3);
        match &items[2] {
            FlowElement::ListItem(item) => {
                assert_eq!(item.marker, "iii.");
                assert_eq!(item.marker_offset, Pt(18.0));
                assert_eq!(item.paragraph.left_indent, Pt(28.0));
            }
            other => panic!("expected a list item, got {other:?}"),
        }

        let none: [&str; 0] = [];
        assert!(builder.list(&none, &attrs).unwrap().is_empty());
    }

    #[test]
    fn builds_blocks() {
        let fonts = FontRegistry::new();
        let builder = FlowElementBuilder::new(&fonts);
        let mut attrs = attributes();
        attrs.rule_thickness = Pt(2.0);

        let rule = builder.build(&Block::Rule, &attrs).unwrap();
        assert!(matches!(&rule[..], [FlowElement::Rule(r)] if r.thickness == Pt(2.0)));

        let heading = Block::Heading {
            level: 2,
            text: "Intro".to_string(),
        };
        assert_eq!(heading.style_name(), "h2");
        let built = builder.build(&heading, &attrs).unwrap();
        assert_eq!(built[0].text(), Some("Intro"));

        let list = Block::List {
            ordered: true,
            items: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(list.style_name(), "ol");
        assert_eq!(builder.build(&list, &attrs).unwrap().len(), 2);
    }
}
