use crate::{
    flow::{Block, FlowElement, FlowElementBuilder},
    fonts::FontRegistry,
    info::Info,
    markdown::MarkdownParser,
    outline::Outline,
    render::{PdfRenderer, Renderer},
    style::{Options, ResolvedAttributes, Style, StyleRegistry},
    template::{check_font_families, Template, TemplateConfig},
    Geometry, PDFError, Pt,
};
use serde::Deserialize;
use std::{fmt, io::Write, path::Path, sync::Arc};

/// Style used by [Document::hr] and [Document::add_separator] when registered
pub const RULE_STYLE: &str = "hr";

/// Per-document settings layered on top of a [Template]
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentConfig {
    /// Styles shadowing the template's styles of the same name
    pub styles: Vec<Style>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
}

/// A document is an ordered sequence of styled flow elements plus the metadata needed to
/// render it. Content is appended through the `add_*` methods (and their shortcuts such
/// as [Document::h1] and [Document::p]), each of which resolves a style, builds the
/// elements and appends them. Nothing is laid out until [Document::bytes],
/// [Document::write] or [Document::save_as] is called, and each of those renders the
/// whole document from scratch.
///
/// Every content method either appends everything it was asked to or, on error, leaves
/// the document exactly as it was.
pub struct Document {
    template: Arc<Template>,
    styles: StyleRegistry,
    elements: Vec<FlowElement>,
    outline: Outline,
    pub info: Info,
    renderer: Box<dyn Renderer>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("template", &self.template)
            .field("styles", &self.styles.len())
            .field("elements", &self.elements.len())
            .field("outline", &self.outline)
            .field("info", &self.info)
            .finish()
    }
}

/// `h1`..`h6` and `heading1`..`heading6` name heading styles
fn heading_level(style: &str) -> Option<u8> {
    let digits = style
        .strip_prefix("heading")
        .or_else(|| style.strip_prefix('h'))?;
    match digits.parse::<u8>() {
        Ok(level @ 1..=6) => Some(level),
        _ => None,
    }
}

impl Document {
    /// A document using the default template: A4, 15mm margins, one column and the
    /// sample stylesheet
    pub fn new() -> Result<Document, PDFError> {
        Document::from_config(&TemplateConfig::default(), &DocumentConfig::default())
    }

    /// Build a private template from `template` and a document on top of it
    pub fn from_config(
        template: &TemplateConfig,
        config: &DocumentConfig,
    ) -> Result<Document, PDFError> {
        Document::with_template(Arc::new(Template::new(template)?), config)
    }

    /// A document sharing an already built template
    pub fn with_template(
        template: Arc<Template>,
        config: &DocumentConfig,
    ) -> Result<Document, PDFError> {
        let styles = template.styles().layer(config.styles.iter().cloned())?;
        check_font_families(&styles, template.fonts())?;

        let mut info = Info::new();
        info.title = config.title.clone();
        info.author = config.author.clone();
        info.subject = config.subject.clone();
        info.keywords = config.keywords.clone();

        log::debug!(
            "created document with {} styles ({} declared by the document)",
            styles.len(),
            config.styles.len()
        );
        Ok(Document {
            template,
            styles,
            elements: Vec::new(),
            outline: Outline::new(),
            info,
            renderer: Box::new(PdfRenderer::default()),
        })
    }

    /// Render with something other than the built-in [PdfRenderer]
    pub fn set_renderer<R: Renderer + 'static>(&mut self, renderer: R) -> &mut Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn template(&self) -> &Arc<Template> {
        &self.template
    }

    pub fn geometry(&self) -> &Geometry {
        self.template.geometry()
    }

    pub fn fonts(&self) -> &FontRegistry {
        self.template.fonts()
    }

    /// The template's styles with the document's own styles layered on top
    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn elements(&self) -> &[FlowElement] {
        &self.elements
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.info.title(title);
        self
    }

    pub fn author<S: ToString>(&mut self, author: S) -> &mut Self {
        self.info.author(author);
        self
    }

    /// Resolve a style with call-site overrides, exactly as the content methods do
    pub fn resolve(&self, style: &str, options: &Options) -> Result<ResolvedAttributes, PDFError> {
        self.styles.resolve(style, options)
    }

    fn builder(&self) -> FlowElementBuilder<'_> {
        FlowElementBuilder::new(self.template.fonts())
    }

    /// Run `build`, rolling back anything it appended if it fails
    fn atomically<F>(&mut self, build: F) -> Result<&mut Self, PDFError>
    where
        F: FnOnce(&mut Document) -> Result<(), PDFError>,
    {
        let (elements, entries) = (self.elements.len(), self.outline.len());
        if let Err(e) = build(self) {
            self.elements.truncate(elements);
            self.outline.truncate(entries);
            return Err(e);
        }
        Ok(self)
    }

    /// Add a paragraph of text in `style`. Styles named `h1`..`h6` or
    /// `heading1`..`heading6` are headings and also add an outline entry.
    pub fn add_paragraph<S: AsRef<str>>(
        &mut self,
        text: S,
        style: &str,
        options: &Options,
    ) -> Result<&mut Self, PDFError> {
        let text = text.as_ref();
        if let Some(level) = heading_level(style) {
            return self.add_styled_heading(level, text, style, options);
        }

        let attributes = self.resolve(style, options)?;
        let paragraph = self.builder().paragraph(text, &attributes)?;
        self.elements.push(paragraph.into());
        Ok(self)
    }

    /// Add a heading in the `h{level}` style, clamping `level` to 1..=6
    pub fn add_heading<S: AsRef<str>>(
        &mut self,
        level: u8,
        text: S,
        options: &Options,
    ) -> Result<&mut Self, PDFError> {
        let level = level.clamp(1, 6);
        self.add_styled_heading(level, text.as_ref(), &format!("h{level}"), options)
    }

    fn add_styled_heading(
        &mut self,
        level: u8,
        text: &str,
        style: &str,
        options: &Options,
    ) -> Result<&mut Self, PDFError> {
        let attributes = self.resolve(style, options)?;
        let paragraph = self.builder().paragraph(text, &attributes)?;
        self.outline.add(level, text, self.elements.len());
        self.elements.push(paragraph.into());
        Ok(self)
    }

    pub fn h1<S: AsRef<str>>(&mut self, text: S) -> Result<&mut Self, PDFError> {
        self.add_heading(1, text, &Options::default())
    }

    pub fn h2<S: AsRef<str>>(&mut self, text: S) -> Result<&mut Self, PDFError> {
        self.add_heading(2, text, &Options::default())
    }

    pub fn h3<S: AsRef<str>>(&mut self, text: S) -> Result<&mut Self, PDFError> {
        self.add_heading(3, text, &Options::default())
    }

    pub fn h4<S: AsRef<str>>(&mut self, text: S) -> Result<&mut Self, PDFError> {
        self.add_heading(4, text, &Options::default())
    }

    pub fn h5<S: AsRef<str>>(&mut self, text: S) -> Result<&mut Self, PDFError> {
        self.add_heading(5, text, &Options::default())
    }

    pub fn h6<S: AsRef<str>>(&mut self, text: S) -> Result<&mut Self, PDFError> {
        self.add_heading(6, text, &Options::default())
    }

    /// A paragraph in the `p` style
    pub fn p<S: AsRef<str>>(&mut self, text: S) -> Result<&mut Self, PDFError> {
        self.add_paragraph(text, "p", &Options::default())
    }

    /// Add one list item per entry of `items`. An empty list adds nothing, but the style
    /// must still exist.
    pub fn add_list<S: AsRef<str>>(
        &mut self,
        items: &[S],
        style: &str,
        options: &Options,
    ) -> Result<&mut Self, PDFError> {
        let attributes = self.resolve(style, options)?;
        let elements = self.builder().list(items, &attributes)?;
        self.elements.extend(elements);
        Ok(self)
    }

    /// A bulleted list in the `ul` style
    pub fn ul<S: AsRef<str>>(&mut self, items: &[S]) -> Result<&mut Self, PDFError> {
        self.add_list(items, "ul", &Options::default())
    }

    /// A numbered list in the `ol` style
    pub fn ol<S: AsRef<str>>(&mut self, items: &[S]) -> Result<&mut Self, PDFError> {
        self.add_list(items, "ol", &Options::default())
    }

    /// Add a horizontal rule `height` thick. Colour and spacing come from the `hr` style
    /// if there is one, otherwise from the defaults; `options` margins override either.
    pub fn add_separator<P: Into<Pt>>(&mut self, height: P, options: &Options) -> &mut Self {
        let mut attributes = self.styles.resolve_or_defaults(RULE_STYLE, options);
        attributes.rule_thickness = height.into();
        let rule = self.builder().rule(&attributes);
        self.elements.push(rule.into());
        self
    }

    /// A rule as thick as the `hr` style says
    pub fn hr(&mut self) -> &mut Self {
        let attributes = self
            .styles
            .resolve_or_defaults(RULE_STYLE, &Options::default());
        let rule = self.builder().rule(&attributes);
        self.elements.push(rule.into());
        self
    }

    pub fn add_spacer<P: Into<Pt>>(&mut self, height: P) -> &mut Self {
        self.elements.push(FlowElement::Spacer(height.into()));
        self
    }

    /// A blank line: a spacer as tall as the `p` style's leading
    pub fn br(&mut self) -> &mut Self {
        let leading = self
            .styles
            .resolve_or_defaults("p", &Options::default())
            .leading;
        self.add_spacer(leading)
    }

    pub fn add_page_break(&mut self) -> &mut Self {
        self.elements.push(FlowElement::PageBreak);
        self
    }

    /// Parse `source` with `parser` and add every block in its default style. Fails
    /// without adding anything if parsing or any block fails.
    pub fn markdown<P: MarkdownParser + ?Sized>(
        &mut self,
        source: &str,
        parser: &P,
    ) -> Result<&mut Self, PDFError> {
        let blocks = parser.parse(source)?;
        log::debug!("adding {} markdown blocks", blocks.len());
        self.atomically(|doc| {
            for block in blocks.iter() {
                doc.add_block(block)?;
            }
            Ok(())
        })
    }

    /// Add a block in its default style
    pub fn add_block(&mut self, block: &Block) -> Result<&mut Self, PDFError> {
        let options = Options::default();
        match block {
            Block::Heading { level, text } => self.add_heading(*level, text, &options),
            Block::Rule => Ok(self.hr()),
            block => {
                let attributes = self.resolve(&block.style_name(), &options)?;
                let elements = self.builder().build(block, &attributes)?;
                self.elements.extend(elements);
                Ok(self)
            }
        }
    }

    /// Append a pre-built element as is, without style resolution or an outline entry
    pub fn add<E: Into<FlowElement>>(&mut self, element: E) -> &mut Self {
        self.elements.push(element.into());
        self
    }

    /// Append a pre-built element with an outline entry pointing at it
    pub fn add_with_outline<E: Into<FlowElement>, S: ToString>(
        &mut self,
        element: E,
        level: u8,
        title: S,
    ) -> &mut Self {
        self.outline.add(level, title, self.elements.len());
        self.add(element)
    }

    /// Everything `build` adds is kept in the same column where possible. Outline entries
    /// added inside point at the group.
    ///
    /// ```
    /// # use pdf_flow::Document;
    /// let mut doc = Document::new()?;
    /// doc.keep_together(|doc| {
    ///     doc.h2("Results")?.p("Everything went to plan.")?;
    ///     Ok(())
    /// })?;
    /// assert_eq!(doc.elements().len(), 1);
    /// # Ok::<(), pdf_flow::PDFError>(())
    /// ```
    pub fn keep_together<F>(&mut self, build: F) -> Result<&mut Self, PDFError>
    where
        F: FnOnce(&mut Document) -> Result<(), PDFError>,
    {
        let start = self.elements.len();
        self.atomically(build)?;
        if self.elements.len() > start {
            let group: Vec<FlowElement> = self.elements.drain(start..).collect();
            self.elements.push(FlowElement::KeepTogether(group));
            self.outline.retarget_from(start);
        }
        Ok(self)
    }

    /// Render the document
    pub fn bytes(&self) -> Result<Vec<u8>, PDFError> {
        log::debug!(
            "rendering {} elements with {} outline entries",
            self.elements.len(),
            self.outline.len()
        );
        self.renderer.render(
            self.template.geometry(),
            self.template.fonts(),
            &self.elements,
            &self.outline,
            &self.info,
        )
    }

    /// Render the document into `out`. Nothing is written if rendering fails.
    pub fn write<W: Write>(&self, out: &mut W) -> Result<(), PDFError> {
        let bytes = self.bytes()?;
        out.write_all(&bytes)?;
        Ok(())
    }

    /// Render the document to a file at `path`, replacing it if it exists
    pub fn save_as<P: AsRef<Path>>(&self, path: P) -> Result<(), PDFError> {
        let bytes = self.bytes()?;
        std::fs::write(path.as_ref(), bytes)?;
        log::debug!("saved document to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{colours, style::Alignment};

    #[test]
    fn recognises_heading_styles() {
        assert_eq!(heading_level("h1"), Some(1));
        assert_eq!(heading_level("heading6"), Some(6));
        assert_eq!(heading_level("h7"), None);
        assert_eq!(heading_level("hr"), None);
        assert_eq!(heading_level("p"), None);
    }

    #[test]
    fn headings_add_outline_entries() {
        let mut doc = Document::new().unwrap();
        doc.p("intro").unwrap();
        doc.add_paragraph("Methods", "heading2", &Options::default())
            .unwrap();
        doc.h3("Sampling").unwrap();

        let entries = doc.outline().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!((entries[0].level, entries[0].element), (2, 1));
        assert_eq!(entries[1].title, "Sampling");
        assert_eq!(entries[1].element, 2);
    }

    #[test]
    fn separators_use_the_rule_style() {
        let mut doc = Document::new().unwrap();
        doc.hr();
        doc.add_separator(Pt(3.0), &Options::new().margin_top(Pt(20.0)));

        match doc.elements() {
            [FlowElement::Rule(a), FlowElement::Rule(b)] => {
                assert_eq!(a.colour, colours::GREY);
                assert_eq!(a.thickness, Pt(1.0));
                assert_eq!(b.thickness, Pt(3.0));
                assert_eq!(b.space_before, Pt(20.0));
                assert_eq!(b.space_after, a.space_after);
            }
            other => panic!("expected two rules, got {other:?}"),
        }
    }

    #[test]
    fn separators_fall_back_to_defaults() {
        let config = TemplateConfig {
            use_sample_stylesheet: false,
            ..Default::default()
        };
        let mut doc = Document::from_config(&config, &DocumentConfig::default()).unwrap();
        doc.hr();
        assert!(matches!(&doc.elements()[0], FlowElement::Rule(r) if r.colour == colours::BLACK));
    }

    #[test]
    fn spacers_and_breaks() {
        let mut doc = Document::new().unwrap();
        doc.br().add_spacer(Pt(30.0)).add_page_break();
        assert_eq!(
            doc.elements(),
            &[
                FlowElement::Spacer(Pt(12.0)),
                FlowElement::Spacer(Pt(30.0)),
                FlowElement::PageBreak
            ]
        );
    }

    #[test]
    fn failed_markdown_adds_nothing() {
        let mut doc = Document::new().unwrap();
        doc.p("kept").unwrap();

        let parser = |_: &str| -> Result<Vec<Block>, PDFError> {
            Ok(vec![
                Block::Heading {
                    level: 1,
                    text: "Fine".to_string(),
                },
                Block::Paragraph("also fine".to_string()),
            ])
        };
        doc.markdown("ignored", &parser).unwrap();
        assert_eq!(doc.elements().len(), 3);
        assert_eq!(doc.outline().len(), 1);

        let config = DocumentConfig {
            styles: vec![Style::new("p").parent("missing")],
            ..Default::default()
        };
        assert!(matches!(
            Document::with_template(doc.template().clone(), &config),
            Err(PDFError::UnknownParentStyle { .. })
        ));

        let config = TemplateConfig {
            use_sample_stylesheet: false,
            styles: vec![Style::new("h1")],
            ..Default::default()
        };
        let mut bare = Document::from_config(&config, &DocumentConfig::default()).unwrap();
        // without a `p` style the second block fails, taking the heading with it
        assert!(matches!(
            bare.markdown("ignored", &parser),
            Err(PDFError::UnknownStyle(name)) if name == "p"
        ));
        assert!(bare.elements().is_empty());
        assert!(bare.outline().is_empty());
    }

    #[test]
    fn markdown_blocks_use_their_styles() {
        let mut doc = Document::new().unwrap();
        let parser = |_: &str| -> Result<Vec<Block>, PDFError> {
            Ok(vec![
                Block::List {
                    ordered: true,
                    items: vec!["one".to_string(), "two".to_string()],
                },
                Block::Code("let x = 1;".to_string()),
                Block::Rule,
            ])
        };
        doc.markdown("ignored", &parser).unwrap();

        match doc.elements() {
            [
                FlowElement::ListItem(first),
                FlowElement::ListItem(second),
                FlowElement::Paragraph(code),
                FlowElement::Rule(_),
            ] => {
                assert_eq!(first.marker, "1.");
                assert_eq!(second.marker, "2.");
                assert_eq!(code.style.size, Pt(8.0));
            }
            other => panic!("unexpected elements {other:?}"),
        }
    }

    #[test]
    fn keep_together_groups_elements() {
        let mut doc = Document::new().unwrap();
        doc.p("before").unwrap();
        doc.keep_together(|doc| {
            doc.h2("Grouped")?.p("body")?;
            Ok(())
        })
        .unwrap();

        assert_eq!(doc.elements().len(), 2);
        assert!(matches!(&doc.elements()[1], FlowElement::KeepTogether(group) if group.len() == 2));
        assert_eq!(doc.outline().entries()[0].element, 1);

        // an empty group adds nothing
        doc.keep_together(|_| Ok(())).unwrap();
        assert_eq!(doc.elements().len(), 2);
    }

    #[test]
    fn add_bypasses_styles() {
        let mut doc = Document::new().unwrap();
        let mut paragraph = doc
            .builder()
            .paragraph("custom", &doc.resolve("p", &Options::default()).unwrap())
            .unwrap();
        paragraph.alignment = Alignment::Right;

        doc.add(paragraph.clone());
        assert!(doc.outline().is_empty());

        doc.add_with_outline(paragraph, 1, "Custom");
        assert_eq!(doc.outline().entries()[0].element, 1);
    }

    #[test]
    fn metadata_comes_from_the_config() {
        let config = DocumentConfig {
            title: Some("Annual report".to_string()),
            author: Some("Finance".to_string()),
            ..Default::default()
        };
        let mut doc = Document::from_config(&TemplateConfig::default(), &config).unwrap();
        assert_eq!(doc.info.title.as_deref(), Some("Annual report"));
        doc.title("Amended report");
        assert_eq!(doc.info.title.as_deref(), Some("Amended report"));
        assert_eq!(doc.info.author.as_deref(), Some("Finance"));
    }

    #[test]
    fn writes_into_any_writer() {
        let mut doc = Document::new().unwrap();
        doc.p("hello").unwrap();
        let mut out: Vec<u8> = Vec::new();
        doc.write(&mut out).unwrap();
        assert!(out.starts_with(b"%PDF-"));
        assert_eq!(out, doc.bytes().unwrap());
    }
}
