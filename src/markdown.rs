//! The hook for turning Markdown into document content.
//!
//! No parser is bundled. Anything that can split Markdown source into [Block]s can be
//! handed to [Document::markdown](crate::Document::markdown), including a plain closure.

use crate::{flow::Block, PDFError};

/// Splits Markdown source into semantic blocks, in document order
pub trait MarkdownParser {
    fn parse(&self, source: &str) -> Result<Vec<Block>, PDFError>;
}

impl<F> MarkdownParser for F
where
    F: Fn(&str) -> Result<Vec<Block>, PDFError>,
{
    fn parse(&self, source: &str) -> Result<Vec<Block>, PDFError> {
        self(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_parsers() {
        let parser = |source: &str| -> Result<Vec<Block>, PDFError> {
            Ok(source
                .split("\n\n")
                .map(|chunk| Block::Paragraph(chunk.to_string()))
                .collect())
        };
        let blocks = parser.parse("one\n\ntwo").unwrap();
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("one".to_string()),
                Block::Paragraph("two".to_string())
            ]
        );
    }
}
