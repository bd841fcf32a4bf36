use pdf_flow::{
    style::{Options, Style},
    Document, DocumentConfig, PDFError, TemplateConfig,
};

fn main() -> Result<(), PDFError> {
    let template = TemplateConfig {
        columns: 2,
        ..Default::default()
    };
    let config = DocumentConfig {
        styles: vec![Style::new("p").parent("normal").space_after(pdf_flow::Pt(6.0))],
        title: Some("Lorem Ipsum".to_string()),
        author: Some("pdf-flow".to_string()),
        ..Default::default()
    };
    let mut doc = Document::from_config(&template, &config)?;

    for chapter in 1..=4 {
        doc.h1(format!("Chapter {chapter}"))?;
        for section in 1..=3 {
            doc.h2(format!("Section {chapter}.{section}"))?;
            doc.p(lipsum::lipsum(150))?;
            doc.add_paragraph(
                lipsum::lipsum(40),
                "p",
                &Options::from_pairs([("align", "justify"), ("color", "darkgrey")])?,
            )?;
        }
        doc.ul(&["one", "two", "three"])?;
        doc.hr();
    }

    doc.save_as("report.pdf")
}
