//! Turns laid out page contents into PDF content stream operators.

use super::page::{PageContents, RuleLayout, SpanFont, SpanLayout};
use crate::{colour::Colour, fonts::FontRegistry, PDFError};
use std::collections::BTreeMap;
use std::io::Write;

#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &FontRegistry,
    font_indices: &BTreeMap<usize, usize>,
) -> Result<Vec<u8>, PDFError> {
    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => {
                render_text_spans(&mut content, spans, fonts, font_indices)?;
            }
            PageContents::Rule(rule) => render_rule(&mut content, rule)?,
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &FontRegistry,
    font_indices: &BTreeMap<usize, usize>,
) -> Result<(), PDFError> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;
    write_font(content, current_font, font_indices)?;
    write_colour(content, current_colour)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write_font(content, current_font, font_indices)?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write_colour(content, current_colour)?;
        }

        let face = fonts.get(current_font.id).ok_or(PDFError::FontMissing)?;
        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", span.coords.0, span.coords.1)?;
        write!(content, "<{}> Tj\n", face.encode(&span.text))?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_font(
    content: &mut Vec<u8>,
    font: SpanFont,
    font_indices: &BTreeMap<usize, usize>,
) -> Result<(), PDFError> {
    let index = font_indices
        .get(&font.id.index())
        .ok_or(PDFError::FontMissing)?;
    write!(content, "/F{} {} Tf\n", index, font.size)?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_rule(content: &mut Vec<u8>, rule: &RuleLayout) -> Result<(), PDFError> {
    write!(content, "q\n")?;
    write_colour(content, rule.colour)?;
    write!(
        content,
        "{} {} {} {} re f\n",
        rule.rect.x1,
        rule.rect.y1,
        rule.rect.width(),
        rule.rect.height()
    )?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::CMYK { c, m, y, k } => write!(content, "{c} {m} {y} {k} k\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}
