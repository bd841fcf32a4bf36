use pdf_flow::{
    colours,
    flow::FlowElement,
    pagesize,
    style::{sample_stylesheet, Alignment, Options, ResolvedAttributes, Style, StyleRegistry},
    Colour, Document, DocumentConfig, PDFError, PagesizeSpec, PdfRenderer, Pt, Template,
    TemplateConfig,
};
use std::sync::Arc;

fn page_count(bytes: &[u8]) -> usize {
    let text = String::from_utf8_lossy(bytes);
    text.matches("/Type /Page").count() - text.matches("/Type /Pages").count()
}

#[test]
fn heading_then_paragraph() {
    let mut doc = Document::new().unwrap();
    doc.h1("Title").unwrap();
    doc.p("Body").unwrap();

    assert_eq!(doc.elements().len(), 2);
    assert_eq!(doc.outline().len(), 1);
    assert_eq!(doc.outline().entries()[0].element, 0);
    assert_eq!(doc.outline().entries()[0].title, "Title");

    let sample =
        StyleRegistry::build(ResolvedAttributes::defaults("Helvetica"), sample_stylesheet())
            .unwrap();
    let expected = sample.resolve("h1", &Options::default()).unwrap();
    assert_eq!(doc.resolve("h1", &Options::default()).unwrap(), expected);

    let heading = doc.elements()[0].paragraph().unwrap();
    assert_eq!(heading.style.size, expected.font_size);
    assert_eq!(heading.style.leading, expected.leading);
    assert_eq!(heading.space_after, expected.space_after);
}

#[test]
fn call_site_alignment_beats_the_style() {
    let template = TemplateConfig {
        pagesize: PagesizeSpec::from(pagesize::from_name("A5").unwrap()),
        styles: vec![Style::new("p").parent("normal").alignment(Alignment::Justify)],
        ..Default::default()
    };
    let mut doc = Document::from_config(&template, &DocumentConfig::default()).unwrap();
    assert_eq!(doc.geometry().pagesize, pagesize::A5);

    let options = Options::from_pairs([("align", "center")]).unwrap();
    doc.add_paragraph("Centred", "p", &options).unwrap();

    assert_eq!(
        doc.resolve("p", &options).unwrap().alignment,
        Alignment::Center
    );
    assert_eq!(
        doc.elements()[0].paragraph().map(|p| p.alignment),
        Some(Alignment::Center)
    );
}

#[test]
fn headings_need_a_stylesheet() {
    let template = TemplateConfig {
        use_sample_stylesheet: false,
        ..Default::default()
    };
    let mut doc = Document::from_config(&template, &DocumentConfig::default()).unwrap();
    assert!(matches!(doc.h1("Title"), Err(PDFError::UnknownStyle(name)) if name == "h1"));
    assert!(doc.elements().is_empty());
    assert!(doc.outline().is_empty());
}

#[test]
fn rendering_twice_gives_identical_bytes() {
    let mut doc = Document::new().unwrap();
    doc.title("Repeatable");
    doc.h1("Once").unwrap().p(lipsum::lipsum(40)).unwrap();
    doc.h2("Twice").unwrap().ol(&["a", "b", "c"]).unwrap();

    let first = doc.bytes().unwrap();
    let second = doc.bytes().unwrap();
    assert_eq!(first, second);
}

#[test]
fn document_styles_shadow_template_styles() {
    let template = TemplateConfig {
        styles: vec![Style::new("p")
            .parent("normal")
            .font_size(Pt(14.0))
            .space_after(Pt(20.0))],
        ..Default::default()
    };
    let config = DocumentConfig {
        styles: vec![Style::new("p").parent("normal").alignment(Alignment::Right)],
        ..Default::default()
    };
    let doc = Document::from_config(&template, &config).unwrap();
    let p = doc.resolve("p", &Options::default()).unwrap();

    assert_eq!(p.alignment, Alignment::Right);
    // nothing survives from the template's `p`, only what `normal` provides
    assert_eq!(p.font_size, Pt(10.0));
    assert_eq!(p.space_after, Pt(0.0));

    // styles inheriting from `p` see the replacement
    let ul = doc.resolve("ul", &Options::default()).unwrap();
    assert_eq!(ul.alignment, Alignment::Right);
}

#[test]
fn cycles_fail_when_the_document_is_built() {
    let template = Arc::new(Template::new(&TemplateConfig::default()).unwrap());
    let config = DocumentConfig {
        styles: vec![Style::new("A").parent("B"), Style::new("B").parent("A")],
        ..Default::default()
    };
    match Document::with_template(template, &config) {
        Err(PDFError::CyclicInheritance(chain)) => {
            assert_eq!(chain.first(), chain.last());
            assert!(chain.contains(&"A".to_string()));
            assert!(chain.contains(&"B".to_string()));
        }
        other => panic!("expected a cycle error, got {other:?}"),
    }
}

#[test]
fn overrides_always_win() {
    let template = TemplateConfig {
        styles: vec![
            Style::new("normal").colour(colours::BLUE),
            Style::new("p").parent("normal").colour(colours::GREEN),
        ],
        ..Default::default()
    };
    let doc = Document::from_config(&template, &DocumentConfig::default()).unwrap();
    let options = Options::from_pairs([("color", "red")]).unwrap();
    assert_eq!(doc.resolve("p", &options).unwrap().colour, colours::RED);
    assert_eq!(doc.resolve("normal", &options).unwrap().colour, colours::RED);
    assert_eq!(
        doc.resolve("p", &Options::default()).unwrap().colour,
        colours::GREEN
    );

    assert!(matches!(
        Options::from_pairs([("colour", "red"), ("shadow", "yes")]),
        Err(PDFError::UnknownOption(key)) if key == "shadow"
    ));
}

#[test]
fn long_documents_span_pages() {
    let mut doc = Document::new().unwrap();
    for chapter in 1..=3 {
        doc.h1(format!("Chapter {chapter}")).unwrap();
        for _ in 0..12 {
            doc.p(lipsum::lipsum(120)).unwrap();
        }
        doc.add_page_break();
    }

    let bytes = doc.bytes().unwrap();
    assert!(page_count(&bytes) >= 3);
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Title (Chapter 3)"));
}

#[test]
fn columns_share_the_content_box() {
    let template = TemplateConfig {
        columns: 3,
        ..Default::default()
    };
    let mut doc = Document::from_config(&template, &DocumentConfig::default()).unwrap();
    assert_eq!(doc.geometry().frames().len(), 3);

    for _ in 0..20 {
        doc.p(lipsum::lipsum(60)).unwrap();
    }
    doc.set_renderer(PdfRenderer::uncompressed());
    let bytes = doc.bytes().unwrap();
    assert!(page_count(&bytes) >= 1);
}

#[test]
fn unusable_indents_are_reported_with_the_element() {
    let mut doc = Document::new().unwrap();
    doc.p("fine").unwrap();
    doc.add_paragraph("squeezed", "p", &Options::new().margin_left(Pt(2000.0)))
        .unwrap();

    match doc.bytes() {
        Err(PDFError::Render { index, .. }) => assert_eq!(index, 1),
        other => panic!("expected a render error, got {other:?}"),
    }
}

#[test]
fn saves_to_disk() {
    let mut doc = Document::new().unwrap();
    doc.h1("Saved").unwrap().p("to a file").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.pdf");
    doc.save_as(&path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), doc.bytes().unwrap());

    // a failing render never creates the file
    doc.add_paragraph("broken", "p", &Options::new().margin_right(Pt(5000.0)))
        .unwrap();
    let broken = dir.path().join("broken.pdf");
    assert!(doc.save_as(&broken).is_err());
    assert!(!broken.exists());
}

#[test]
fn templates_from_toml() {
    let template = Template::from_toml_str(
        r##"
        pagesize = "Letter"
        columns = 2
        margins = { top = 72, right = 54, bottom = 72, left = 54 }

        [[styles]]
        name = "warning"
        parent = "p"
        colour = "#cc0000"
        bold = true
        "##,
    )
    .unwrap();
    assert_eq!(template.geometry().pagesize, pagesize::LETTER);
    assert_eq!(template.geometry().column_width(), Pt(246.0));

    let mut doc = Document::with_template(Arc::new(template), &DocumentConfig::default()).unwrap();
    doc.add_paragraph("Mind the gap", "warning", &Options::default())
        .unwrap();
    let warning = doc.elements()[0].paragraph().unwrap();
    assert_eq!(warning.style.colour, Colour::from_hex("#cc0000").unwrap());
    assert!(doc.bytes().is_ok());
}

#[test]
fn templates_are_shared_between_threads() {
    let template = Arc::new(Template::new(&TemplateConfig::default()).unwrap());
    let handles: Vec<_> = (0..2)
        .map(|i| {
            let template = Arc::clone(&template);
            std::thread::spawn(move || {
                let mut doc = Document::with_template(template, &DocumentConfig::default())?;
                doc.h1(format!("Report {i}"))?;
                doc.bytes()
            })
        })
        .collect();

    for handle in handles {
        let bytes = handle.join().unwrap().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}

#[test]
fn escape_hatch_elements_render() {
    let mut doc = Document::new().unwrap();
    doc.add(FlowElement::Spacer(Pt(100.0)));
    doc.hr();
    doc.keep_together(|doc| {
        doc.h2("Together")?.p(lipsum::lipsum(30))?;
        Ok(())
    })
    .unwrap();
    assert_eq!(doc.elements().len(), 3);
    assert!(doc.bytes().is_ok());
}
