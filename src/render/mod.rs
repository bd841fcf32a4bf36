//! Turning flow elements into PDF bytes.
//!
//! The [Renderer] trait is the boundary between document assembly and output. The crate
//! ships [PdfRenderer], which paginates elements into the geometry's column frames and
//! writes the result with [pdf_writer].

mod content;
mod page;
mod paginate;
pub(crate) mod refs;

use crate::{flow::FlowElement, fonts::FontRegistry, Geometry, Info, Outline, PDFError};
use pdf_writer::{Finish, Pdf, Ref};
use refs::{ObjectReferences, RefType};
use std::collections::{BTreeMap, BTreeSet};

/// Something that can produce a finished document from laid out content
pub trait Renderer {
    /// Render every element, in order, into a complete document. Failures caused by a
    /// particular element are reported as [PDFError::Render] with that element's index.
    fn render(
        &self,
        geometry: &Geometry,
        fonts: &FontRegistry,
        elements: &[FlowElement],
        outline: &Outline,
        info: &Info,
    ) -> Result<Vec<u8>, PDFError>;
}

/// The default renderer, writing PDF 1.7 with [pdf_writer]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PdfRenderer {
    /// Deflate page content streams
    pub compress: bool,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        PdfRenderer { compress: true }
    }
}

impl PdfRenderer {
    pub fn new() -> PdfRenderer {
        PdfRenderer::default()
    }

    /// A renderer that leaves content streams readable, which is handy when debugging
    pub fn uncompressed() -> PdfRenderer {
        PdfRenderer { compress: false }
    }
}

impl Renderer for PdfRenderer {
    fn render(
        &self,
        geometry: &Geometry,
        fonts: &FontRegistry,
        elements: &[FlowElement],
        outline: &Outline,
        info: &Info,
    ) -> Result<Vec<u8>, PDFError> {
        let paginate::Layout { pages, anchors } = paginate::layout(geometry, fonts, elements)?;
        log::debug!(
            "laid out {} elements on {} pages",
            elements.len(),
            pages.len()
        );

        // only faces that actually appear get written, numbered in registry order
        let used: BTreeSet<usize> = pages
            .iter()
            .flat_map(|page| page.fonts())
            .map(|id| id.index())
            .collect();
        let font_indices: BTreeMap<usize, usize> = used
            .iter()
            .enumerate()
            .map(|(resource, &index)| (index, resource))
            .collect();

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        info.write(&mut refs, &mut writer);

        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        for (id, face) in fonts.faces.iter() {
            if let Some(&resource) = font_indices.get(&id.index()) {
                face.write(&mut refs, resource, &mut writer);
            }
        }

        for (i, page) in pages.iter().enumerate() {
            page.write(&mut refs, i, fonts, &font_indices, self.compress, &mut writer)?;
        }

        outline.write(
            &mut refs,
            |element| {
                let anchor = anchors.get(element).copied().flatten()?;
                Some((page_refs.get(anchor.page).copied()?, anchor))
            },
            &mut writer,
        );

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        if let Some(outlines) = refs.get(RefType::Outlines) {
            catalog.outlines(outlines);
        }
        catalog.finish();

        Ok(writer.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        colours,
        flow::{Paragraph, TextStyle},
        fonts::FontVariant,
        style::Alignment,
        Pt,
    };

    fn heading(fonts: &FontRegistry, text: &str) -> FlowElement {
        FlowElement::Paragraph(Paragraph {
            text: text.to_string(),
            style: TextStyle {
                font: fonts.resolve("Helvetica", FontVariant::Bold).unwrap(),
                size: Pt(18.0),
                leading: Pt(22.0),
                colour: colours::BLACK,
            },
            alignment: Alignment::Left,
            space_before: Pt(0.0),
            space_after: Pt(6.0),
            left_indent: Pt(0.0),
            right_indent: Pt(0.0),
            first_line_indent: Pt(0.0),
            hyphenate: false,
            allow_widows: true,
        })
    }

    #[test]
    fn writes_a_complete_document() {
        let fonts = FontRegistry::new();
        let elements = vec![
            heading(&fonts, "Hello"),
            FlowElement::PageBreak,
            heading(&fonts, "Again"),
        ];
        let mut outline = Outline::new();
        outline.add(1, "Hello", 0);
        outline.add(1, "Again", 2);
        let mut info = Info::new();
        info.title("Test").creation_date(None);

        let bytes = PdfRenderer::uncompressed()
            .render(&Geometry::default(), &fonts, &elements, &outline, &info)
            .unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(bytes.starts_with(b"%PDF-"));
        assert!(text.contains("/Type /Catalog"));
        assert!(text.contains("/Count 2"));
        assert!(text.contains("/BaseFont /Helvetica-Bold"));
        assert!(!text.contains("/BaseFont /Helvetica-Oblique"));
        assert!(text.contains("/Outlines"));
        assert!(text.contains("/Title (Again)"));
        assert!(text.contains("/F0 18 Tf"));
    }

    #[test]
    fn rendering_is_repeatable() {
        let fonts = FontRegistry::new();
        let elements = vec![heading(&fonts, "Same")];
        let mut info = Info::new();
        info.creation_date(None);
        let render = || {
            PdfRenderer::new()
                .render(&Geometry::default(), &fonts, &elements, &Outline::new(), &info)
                .unwrap()
        };
        assert_eq!(render(), render());
    }
}
