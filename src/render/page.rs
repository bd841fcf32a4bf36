use super::content::render_contents;
use super::refs::{ObjectReferences, RefType};
use crate::{fonts::FontRegistry, fonts::Typeface, Colour, Geometry, PDFError, Pt, Rect};
use id_arena::Id;
use pdf_writer::{Filter, Finish, Name, Pdf};
use std::collections::BTreeMap;

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Typeface>,
    pub size: Pt,
}

/// A run of text set at a fixed baseline position
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

/// A filled rectangle, used for rules
#[derive(Clone, PartialEq, Debug)]
pub struct RuleLayout {
    pub rect: Rect,
    pub colour: Colour,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Rule(RuleLayout),
}

/// One laid out page, ready to be written
#[derive(Clone, Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(geometry: &Geometry) -> Page {
        Page {
            media_box: geometry.media_box(),
            content_box: geometry.content_box(),
            contents: Vec::default(),
        }
    }

    /// Add a line's worth of spans as a single text block
    pub fn add_spans(&mut self, spans: Vec<SpanLayout>) {
        if !spans.is_empty() {
            self.contents.push(PageContents::Text(spans));
        }
    }

    pub fn add_rule(&mut self, rule: RuleLayout) {
        self.contents.push(PageContents::Rule(rule));
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Every face referenced by text on this page
    pub fn fonts(&self) -> impl Iterator<Item = Id<Typeface>> + '_ {
        self.contents.iter().flat_map(|c| match c {
            PageContents::Text(spans) => spans.iter().map(|s| s.font.id).collect(),
            PageContents::Rule(_) => Vec::new(),
        })
    }

    /// Write the page object and its content stream. `font_indices` maps the arena index
    /// of every face used in the document onto its resource name `/F{n}`.
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &FontRegistry,
        font_indices: &BTreeMap<usize, usize>,
        compress: bool,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs.get_or_gen(RefType::Page(page_index));
        let page_tree = refs.get_or_gen(RefType::PageTree);
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(page_tree);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for &font_index in font_indices.values() {
            let font_ref = refs
                .get(RefType::Font(font_index))
                .ok_or(PDFError::FontMissing)?;
            resource_fonts.pair(Name(format!("F{font_index}").as_bytes()), font_ref);
        }
        resource_fonts.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts, font_indices)?;
        if compress {
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
                rendered.as_slice(),
                miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
            );
            writer
                .stream(content_id, compressed.as_slice())
                .filter(Filter::FlateDecode);
        } else {
            writer.stream(content_id, rendered.as_slice());
        }

        Ok(())
    }
}
