//! A framework-agnostic description of an HTTP response carrying a rendered PDF.

/// The MIME type of every response built here
pub const CONTENT_TYPE: &str = "application/pdf";

/// Rendered document bytes plus what a web framework needs to serve them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfResponse {
    pub content: Vec<u8>,
    pub filename: String,
    /// Ask the browser to download the file rather than display it
    pub as_attachment: bool,
}

impl PdfResponse {
    pub fn new<S: ToString>(content: Vec<u8>, filename: S) -> PdfResponse {
        PdfResponse {
            content,
            filename: filename.to_string(),
            as_attachment: false,
        }
    }

    pub fn attachment(mut self) -> Self {
        self.as_attachment = true;
        self
    }

    pub fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }

    /// The `Content-Disposition` header value. Quotes and backslashes in the filename are
    /// escaped.
    pub fn content_disposition(&self) -> String {
        let disposition = if self.as_attachment {
            "attachment"
        } else {
            "inline"
        };
        let filename: String = self
            .filename
            .chars()
            .flat_map(|c| match c {
                '"' | '\\' => vec!['\\', c],
                c => vec![c],
            })
            .collect();
        format!("{disposition}; filename=\"{filename}\"")
    }

    /// Header name / value pairs, ready to copy into a framework's response type
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Type", self.content_type().to_string()),
            ("Content-Disposition", self.content_disposition()),
            ("Content-Length", self.content.len().to_string()),
        ]
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_headers() {
        let response = PdfResponse::new(b"%PDF-1.7".to_vec(), "report.pdf");
        assert_eq!(response.content_type(), "application/pdf");
        assert_eq!(
            response.content_disposition(),
            "inline; filename=\"report.pdf\""
        );

        let response = response.attachment();
        assert_eq!(
            response.headers(),
            vec![
                ("Content-Type", "application/pdf".to_string()),
                (
                    "Content-Disposition",
                    "attachment; filename=\"report.pdf\"".to_string()
                ),
                ("Content-Length", "8".to_string()),
            ]
        );
    }

    #[test]
    fn escapes_filenames() {
        let response = PdfResponse::new(Vec::new(), "a \"quoted\" name.pdf");
        assert_eq!(
            response.content_disposition(),
            "inline; filename=\"a \\\"quoted\\\" name.pdf\""
        );
    }
}
