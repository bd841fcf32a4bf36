//! Flows elements down the columns of successive pages.

use super::page::{Page, RuleLayout, SpanFont, SpanLayout};
use crate::{
    flow::{FlowElement, Paragraph, Rule},
    fonts::FontRegistry,
    layout::{Line, LineBreaker},
    outline::Anchor,
    Geometry, PDFError, Pt, Rect,
};

// guards against lines being pushed to the next frame by rounding error
const EPSILON: f32 = 0.001;

/// The result of laying out a document
#[derive(Debug)]
pub(crate) struct Layout {
    pub pages: Vec<Page>,
    /// Where each top-level element started, or [None] if it produced nothing visible
    pub anchors: Vec<Option<Anchor>>,
}

/// Lay out every element in order. A failure is reported against the index of the
/// element that caused it.
pub(crate) fn layout(
    geometry: &Geometry,
    fonts: &FontRegistry,
    elements: &[FlowElement],
) -> Result<Layout, PDFError> {
    let mut paginator = Paginator::new(geometry, fonts)?;
    let mut anchors = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        let anchor = paginator
            .place(element)
            .map_err(|source| PDFError::Render {
                index,
                source: Box::new(source),
            })?;
        anchors.push(anchor);
    }

    Ok(Layout {
        pages: paginator.finish(),
        anchors,
    })
}

struct Paginator<'a> {
    geometry: &'a Geometry,
    fonts: &'a FontRegistry,
    frames: Vec<Rect>,
    done: Vec<Page>,
    current: Page,
    column: usize,
    /// Top of the free space in the current frame
    cursor: Pt,
    /// Nothing has been placed in the current frame yet
    fresh: bool,
}

impl<'a> Paginator<'a> {
    fn new(geometry: &'a Geometry, fonts: &'a FontRegistry) -> Result<Paginator<'a>, PDFError> {
        let frames = geometry.frames();
        let Some(first) = frames.first().copied() else {
            return Err(PDFError::InvalidGeometry(
                "at least one column is required".to_string(),
            ));
        };
        Ok(Paginator {
            geometry,
            fonts,
            frames,
            done: Vec::new(),
            current: Page::new(geometry),
            column: 0,
            cursor: first.y2,
            fresh: true,
        })
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.is_empty() || self.done.is_empty() {
            self.done.push(self.current);
        }
        self.done
    }

    fn frame(&self) -> Rect {
        self.frames[self.column]
    }

    fn remaining(&self) -> Pt {
        self.cursor - self.frame().y1
    }

    fn anchor(&self) -> Anchor {
        Anchor {
            page: self.done.len(),
            top: self.cursor,
            left: self.frame().x1,
        }
    }

    fn new_page(&mut self) {
        let page = std::mem::replace(&mut self.current, Page::new(self.geometry));
        self.done.push(page);
        self.column = 0;
        self.cursor = self.frame().y2;
        self.fresh = true;
    }

    fn next_frame(&mut self) {
        if self.column + 1 < self.frames.len() {
            self.column += 1;
            self.cursor = self.frame().y2;
            self.fresh = true;
        } else {
            self.new_page();
        }
    }

    /// Move down by `amount`, stopping at the bottom of the frame
    fn advance(&mut self, amount: Pt) {
        if amount > Pt(0.0) {
            self.cursor = (self.cursor - amount).max(self.frame().y1);
            self.fresh = false;
        }
    }

    fn place(&mut self, element: &FlowElement) -> Result<Option<Anchor>, PDFError> {
        match element {
            FlowElement::Paragraph(paragraph) => self.place_paragraph(paragraph, None),
            FlowElement::ListItem(item) => {
                let marker = (item.marker.as_str(), item.marker_offset);
                self.place_paragraph(&item.paragraph, Some(marker))
            }
            FlowElement::Rule(rule) => self.place_rule(rule).map(Some),
            FlowElement::Spacer(height) => {
                let anchor = self.anchor();
                if *height > self.remaining() {
                    self.next_frame();
                } else {
                    self.advance(*height);
                }
                Ok(Some(anchor))
            }
            FlowElement::PageBreak => {
                if !(self.current.is_empty() && self.column == 0 && self.fresh) {
                    self.new_page();
                }
                Ok(None)
            }
            FlowElement::KeepTogether(children) => {
                let height = children
                    .iter()
                    .map(|child| self.measure(child))
                    .sum::<Result<Pt, PDFError>>()?;
                if !self.fresh && height > self.remaining() && height <= self.frame().height() {
                    self.next_frame();
                }

                let mut first = None;
                for child in children.iter() {
                    let anchor = self.place(child)?;
                    first = first.or(anchor);
                }
                Ok(first)
            }
        }
    }

    /// Height an element will take up, ignoring frame breaks
    fn measure(&self, element: &FlowElement) -> Result<Pt, PDFError> {
        Ok(match element {
            FlowElement::Paragraph(p) => self.measure_paragraph(p)?,
            FlowElement::ListItem(item) => self.measure_paragraph(&item.paragraph)?,
            FlowElement::Rule(r) => r.space_before + r.thickness + r.space_after,
            FlowElement::Spacer(height) => *height,
            FlowElement::PageBreak => Pt(0.0),
            FlowElement::KeepTogether(children) => children
                .iter()
                .map(|child| self.measure(child))
                .sum::<Result<Pt, PDFError>>()?,
        })
    }

    fn measure_paragraph(&self, p: &Paragraph) -> Result<Pt, PDFError> {
        let (lines, _) = self.break_lines(p)?;
        Ok(p.space_before + leading(p) * (lines.len() as f32) + p.space_after)
    }

    fn break_lines(&self, p: &Paragraph) -> Result<(Vec<Line>, Pt), PDFError> {
        let face = self.fonts.get(p.style.font).ok_or(PDFError::FontMissing)?;
        let column_width = self.geometry.column_width();
        let width = column_width - p.left_indent - p.right_indent;
        let first_width = width - p.first_line_indent;
        if width <= Pt(0.0) || first_width <= Pt(0.0) {
            return Err(PDFError::InvalidGeometry(format!(
                "indents leave no room for text in a column {column_width}pt wide"
            )));
        }

        let size = p.style.size;
        let breaker = LineBreaker::new(|text: &str| face.width_of_text(text, size), p.hyphenate);
        Ok((
            breaker.break_lines(&p.text, first_width, width),
            breaker.space_width(),
        ))
    }

    fn place_paragraph(
        &mut self,
        p: &Paragraph,
        marker: Option<(&str, Pt)>,
    ) -> Result<Option<Anchor>, PDFError> {
        let (lines, space_width) = self.break_lines(p)?;
        let face = self.fonts.get(p.style.font).ok_or(PDFError::FontMissing)?;
        let ascent = face.ascent(p.style.size);
        let leading = leading(p);
        let font = SpanFont {
            id: p.style.font,
            size: p.style.size,
        };

        if !self.fresh {
            self.advance(p.space_before);
        }

        let mut anchor = None;
        let mut index = 0;
        while index < lines.len() {
            let left = lines.len() - index;
            let mut fit = ((self.remaining().0 + EPSILON) / leading.0).floor().max(0.0) as usize;
            if !p.allow_widows && fit < left && left - fit == 1 {
                if fit >= 3 {
                    fit -= 1;
                } else if !self.fresh {
                    // too short to split without a single line on either side
                    fit = 0;
                }
            }
            if fit == 0 {
                if !self.fresh {
                    self.next_frame();
                    continue;
                }
                // taller than an empty frame, place it anyway
                fit = 1;
            }

            let frame = self.frame();
            for (i, line) in lines.iter().enumerate().skip(index).take(fit) {
                if anchor.is_none() {
                    anchor = Some(self.anchor());
                }
                let baseline = self.cursor - ascent;
                let mut x = frame.x1 + p.left_indent;
                if i == 0 {
                    x += p.first_line_indent;
                }

                let mut spans = Vec::with_capacity(line.words.len() + 1);
                if let (0, Some((text, offset))) = (i, marker) {
                    if !text.is_empty() {
                        spans.push(SpanLayout {
                            text: text.to_string(),
                            font,
                            colour: p.style.colour,
                            coords: (frame.x1 + p.left_indent - offset, baseline),
                        });
                    }
                }

                let (offset, gap) = line.placement(p.alignment, space_width);
                if gap == space_width {
                    spans.push(SpanLayout {
                        text: line.text(),
                        font,
                        colour: p.style.colour,
                        coords: (x + offset, baseline),
                    });
                } else {
                    let mut x = x + offset;
                    for word in line.words.iter() {
                        spans.push(SpanLayout {
                            text: word.text.clone(),
                            font,
                            colour: p.style.colour,
                            coords: (x, baseline),
                        });
                        x += word.width + gap;
                    }
                }

                self.current.add_spans(spans);
                self.cursor -= leading;
                self.fresh = false;
            }

            index += fit;
            if index < lines.len() {
                self.next_frame();
            }
        }

        if anchor.is_none() {
            anchor = Some(self.anchor());
        }
        self.advance(p.space_after);
        Ok(anchor)
    }

    fn place_rule(&mut self, rule: &Rule) -> Result<Anchor, PDFError> {
        let width = self.geometry.column_width() - rule.left_indent - rule.right_indent;
        if width <= Pt(0.0) {
            return Err(PDFError::InvalidGeometry(
                "indents leave no room for a rule".to_string(),
            ));
        }

        if !self.fresh {
            self.advance(rule.space_before);
        }
        if rule.thickness > self.remaining() && !self.fresh {
            self.next_frame();
        }

        let anchor = self.anchor();
        let frame = self.frame();
        self.current.add_rule(RuleLayout {
            rect: Rect::from_origin(
                frame.x1 + rule.left_indent,
                self.cursor - rule.thickness,
                width,
                rule.thickness,
            ),
            colour: rule.colour,
        });
        self.cursor -= rule.thickness;
        self.fresh = false;
        self.advance(rule.space_after);
        Ok(anchor)
    }
}

/// Line height of a paragraph, never zero
fn leading(p: &Paragraph) -> Pt {
    p.style.leading.max(Pt(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        colours,
        flow::{ListItem, TextStyle},
        fonts::FontVariant,
        layout::Margins,
        style::Alignment,
    };

    // a 200pt x 100pt page with 10pt margins leaves a 180 x 80 content box
    fn geometry(columns: usize) -> Geometry {
        Geometry::new((Pt(200.0), Pt(100.0)), Margins::all(Pt(10.0)), columns, Pt(0.0)).unwrap()
    }

    fn paragraph(fonts: &FontRegistry, text: &str) -> Paragraph {
        Paragraph {
            text: text.to_string(),
            style: TextStyle {
                font: fonts.resolve("Courier", FontVariant::Normal).unwrap(),
                size: Pt(10.0),
                leading: Pt(20.0),
                colour: colours::BLACK,
            },
            alignment: Alignment::Left,
            space_before: Pt(0.0),
            space_after: Pt(0.0),
            left_indent: Pt(0.0),
            right_indent: Pt(0.0),
            first_line_indent: Pt(0.0),
            hyphenate: false,
            allow_widows: true,
        }
    }

    fn line_count(page: &Page) -> usize {
        page.contents.len()
    }

    #[test]
    fn empty_documents_still_have_a_page() {
        let fonts = FontRegistry::new();
        let layout = layout(&geometry(1), &fonts, &[]).unwrap();
        assert_eq!(layout.pages.len(), 1);
        assert!(layout.anchors.is_empty());
    }

    #[test]
    fn overflows_onto_new_pages() {
        let fonts = FontRegistry::new();
        // courier at 10pt is 6pt per character, so 30 characters per line; four lines
        // of 20pt fit in 80pt
        let text = vec!["aaaa"; 30].join(" ");
        let elements = vec![FlowElement::Paragraph(paragraph(&fonts, &text))];
        let layout = layout(&geometry(1), &fonts, &elements).unwrap();

        assert_eq!(layout.pages.len(), 2);
        assert_eq!(line_count(&layout.pages[0]), 4);
        assert_eq!(line_count(&layout.pages[1]), 1);
        assert_eq!(
            layout.anchors[0],
            Some(Anchor {
                page: 0,
                top: Pt(90.0),
                left: Pt(10.0)
            })
        );
    }

    #[test]
    fn keeps_widows_with_their_paragraph() {
        let fonts = FontRegistry::new();
        let text = vec!["aaaa"; 30].join(" ");
        let mut p = paragraph(&fonts, &text);
        p.allow_widows = false;
        let layout = layout(&geometry(1), &fonts, &[FlowElement::Paragraph(p)]).unwrap();

        assert_eq!(line_count(&layout.pages[0]), 3);
        assert_eq!(line_count(&layout.pages[1]), 2);
    }

    #[test]
    fn short_paragraphs_move_rather_than_split_around_a_widow() {
        let fonts = FontRegistry::new();
        // eighteen words of "aaaa" wrap to three lines of six words
        let mut p = paragraph(&fonts, &vec!["aaaa"; 18].join(" "));
        p.allow_widows = false;
        let elements = vec![FlowElement::Spacer(Pt(40.0)), FlowElement::Paragraph(p)];
        let layout = layout(&geometry(1), &fonts, &elements).unwrap();

        assert_eq!(layout.pages.len(), 2);
        assert_eq!(line_count(&layout.pages[0]), 0);
        assert_eq!(line_count(&layout.pages[1]), 3);
        assert_eq!(layout.anchors[1].map(|a| a.page), Some(1));
    }

    #[test]
    fn fills_columns_before_pages() {
        let fonts = FontRegistry::new();
        let elements: Vec<FlowElement> = (0..6)
            .map(|_| FlowElement::Paragraph(paragraph(&fonts, "short")))
            .collect();
        let layout = layout(&geometry(2), &fonts, &elements).unwrap();

        assert_eq!(layout.pages.len(), 1);
        let second_column = layout.anchors[4].unwrap();
        assert_eq!(second_column.left, Pt(100.0));
        assert_eq!(second_column.top, Pt(90.0));
    }

    #[test]
    fn page_breaks_and_rules() {
        let fonts = FontRegistry::new();
        let elements = vec![
            FlowElement::PageBreak,
            FlowElement::Paragraph(paragraph(&fonts, "one")),
            FlowElement::PageBreak,
            FlowElement::Rule(Rule {
                thickness: Pt(2.0),
                colour: colours::GREY,
                space_before: Pt(5.0),
                space_after: Pt(5.0),
                left_indent: Pt(10.0),
                right_indent: Pt(10.0),
            }),
        ];
        let layout = layout(&geometry(1), &fonts, &elements).unwrap();
        assert_eq!(layout.pages.len(), 2);

        match &layout.pages[1].contents[0] {
            super::super::page::PageContents::Rule(rule) => {
                assert_eq!(rule.rect.x1, Pt(20.0));
                assert_eq!(rule.rect.width(), Pt(160.0));
                assert_eq!(rule.rect.y2, Pt(90.0));
            }
            other => panic!("expected a rule, got {other:?}"),
        }
    }

    #[test]
    fn list_markers_hang_in_the_indent() {
        let fonts = FontRegistry::new();
        let mut p = paragraph(&fonts, "item");
        p.left_indent = Pt(18.0);
        let elements = vec![FlowElement::ListItem(ListItem {
            marker: "1.".to_string(),
            marker_offset: Pt(18.0),
            paragraph: p,
        })];
        let layout = layout(&geometry(1), &fonts, &elements).unwrap();

        match &layout.pages[0].contents[0] {
            super::super::page::PageContents::Text(spans) => {
                assert_eq!(spans[0].text, "1.");
                assert_eq!(spans[0].coords.0, Pt(10.0));
                assert_eq!(spans[1].text, "item");
                assert_eq!(spans[1].coords.0, Pt(28.0));
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn keep_together_moves_to_the_next_column() {
        let fonts = FontRegistry::new();
        let elements = vec![
            FlowElement::Paragraph(paragraph(&fonts, "first")),
            FlowElement::Paragraph(paragraph(&fonts, "second")),
            FlowElement::Paragraph(paragraph(&fonts, "third")),
            FlowElement::KeepTogether(vec![
                FlowElement::Paragraph(paragraph(&fonts, "title")),
                FlowElement::Paragraph(paragraph(&fonts, "body")),
            ]),
        ];
        let layout = layout(&geometry(1), &fonts, &elements).unwrap();
        assert_eq!(layout.pages.len(), 2);
        assert_eq!(layout.anchors[3].map(|a| a.page), Some(1));
    }

    #[test]
    fn errors_carry_the_element_index() {
        let fonts = FontRegistry::new();
        let mut p = paragraph(&fonts, "too indented");
        p.left_indent = Pt(500.0);
        let elements = vec![
            FlowElement::Spacer(Pt(5.0)),
            FlowElement::Paragraph(p),
        ];
        match layout(&geometry(1), &fonts, &elements) {
            Err(PDFError::Render { index, source }) => {
                assert_eq!(index, 1);
                assert!(matches!(*source, PDFError::InvalidGeometry(_)));
            }
            other => panic!("expected a render error, got {other:?}"),
        }
    }
}
