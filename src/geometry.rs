//! Page geometry: the size of every page, the margins around the content, and how the
//! content area is split into columns.

use crate::{layout::Margins, pagesize, pagesize::PageSize, PDFError, Pt, Rect};

/// Space left between adjacent columns unless a template asks for something else
pub const DEFAULT_COLUMN_GAP: Pt = Pt(12.0);

/// Immutable page geometry shared by every page of a document
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub pagesize: PageSize,
    pub margins: Margins,
    pub columns: usize,
    pub column_gap: Pt,
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry {
            pagesize: pagesize::A4,
            margins: Margins::all(crate::Mm(15.0)),
            columns: 1,
            column_gap: DEFAULT_COLUMN_GAP,
        }
    }
}

impl Geometry {
    /// Create a new geometry, checking that at least one column fits between the margins
    pub fn new(
        pagesize: PageSize,
        margins: Margins,
        columns: usize,
        column_gap: Pt,
    ) -> Result<Geometry, PDFError> {
        let geometry = Geometry {
            pagesize,
            margins,
            columns,
            column_gap,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    fn validate(&self) -> Result<(), PDFError> {
        if self.columns == 0 {
            return Err(PDFError::InvalidGeometry(
                "at least one column is required".to_string(),
            ));
        }
        if self.column_gap < Pt(0.0) {
            return Err(PDFError::InvalidGeometry(
                "column gap can't be negative".to_string(),
            ));
        }
        if self.content_box().height() <= Pt(0.0) {
            return Err(PDFError::InvalidGeometry(
                "vertical margins leave no room for content".to_string(),
            ));
        }
        if self.column_width() <= Pt(0.0) {
            return Err(PDFError::InvalidGeometry(format!(
                "{} columns don't fit between the margins",
                self.columns
            )));
        }
        Ok(())
    }

    /// The full page, starting at the origin
    pub fn media_box(&self) -> Rect {
        Rect::from_origin(Pt(0.0), Pt(0.0), self.pagesize.0, self.pagesize.1)
    }

    /// The area of the page inside the margins
    pub fn content_box(&self) -> Rect {
        Rect {
            x1: self.margins.left,
            y1: self.margins.bottom,
            x2: self.pagesize.0 - self.margins.right,
            y2: self.pagesize.1 - self.margins.top,
        }
    }

    /// Width available to content across all columns
    pub fn content_width(&self) -> Pt {
        self.content_box().width()
    }

    /// Width of a single column once gaps are taken out
    pub fn column_width(&self) -> Pt {
        let gaps = self.column_gap * (self.columns.saturating_sub(1) as f32);
        (self.content_width() - gaps) / (self.columns.max(1) as f32)
    }

    /// One frame per column, left to right, each spanning the full content height
    pub fn frames(&self) -> Vec<Rect> {
        let content = self.content_box();
        let width = self.column_width();
        (0..self.columns)
            .map(|i| {
                let x1 = content.x1 + (width + self.column_gap) * (i as f32);
                Rect {
                    x1,
                    y1: content.y1,
                    x2: x1 + width,
                    y2: content.y2,
                }
            })
            .collect()
    }
}
