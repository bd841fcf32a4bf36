//! Styled, flowing PDF documents.
//!
//! Content is appended to a [Document] by style name. Each call resolves the style through
//! a cascade of built-in, template and document styles plus call-site [Options], turns the
//! result into [flow elements](flow::FlowElement), and keeps a running outline of the
//! headings. Rendering flows the elements down the columns of as many pages as needed.
//!
//! ```
//! use pdf_flow::{style::Options, Document};
//!
//! let mut doc = Document::new()?;
//! doc.title("Minutes");
//! doc.h1("Minutes")?
//!     .p("The meeting was called to order at nine.")?
//!     .add_paragraph("Nothing else happened.", "p", &Options::new().align("center".parse()?))?;
//! doc.ul(&["coffee", "biscuits"])?;
//!
//! let pdf = doc.bytes()?;
//! assert!(pdf.starts_with(b"%PDF"));
//! # Ok::<(), pdf_flow::PDFError>(())
//! ```

mod colour;
pub use colour::*;

mod document;
pub use document::*;

/// Flow elements and the builder that produces them from resolved styles
pub mod flow;

/// Font families, faces and the font registry
pub mod fonts;
pub use fonts::{FontFamily, FontRegistry, FontVariant, Typeface};

mod geometry;
pub use geometry::*;

mod info;
pub use info::*;

/// Utility structures for laying out text: margins and line breaking
pub mod layout;

mod markdown;
pub use markdown::*;

mod outline;
pub use outline::*;

pub mod pagesize;

mod rect;
pub use rect::*;

/// Rendering flow elements into PDF bytes
pub mod render;
pub use render::{PdfRenderer, Renderer};

mod response;
pub use response::*;

/// Named styles, the style registry and call-site overrides
pub mod style;

mod template;
pub use template::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
