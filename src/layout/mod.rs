//! Text layout utilities.
//!
//! [Margins] describe the blank border of a page. [LineBreaker] splits a paragraph into
//! lines for a given column width, using whatever measuring function the caller supplies,
//! and [Line::placement] works out where each line starts and how wide its word gaps are
//! for an [Alignment](crate::style::Alignment).
//!
//! ```
//! use pdf_flow::{layout::LineBreaker, style::Alignment, Pt};
//!
//! // every character is 5pt wide
//! let breaker = LineBreaker::new(|text: &str| Pt(5.0 * text.chars().count() as f32), false);
//! let lines = breaker.break_lines("the quick brown fox", Pt(50.0), Pt(50.0));
//! assert_eq!(lines.len(), 2);
//! assert_eq!(lines[0].text(), "the quick");
//!
//! let (offset, _) = lines[1].placement(Alignment::Right, breaker.space_width());
//! assert_eq!(offset, Pt(5.0));
//! ```

mod margins;
mod text;

pub use margins::*;
pub use text::*;
