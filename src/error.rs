use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// A TOML template configuration could not be parsed
    Config(#[from] toml::de::Error),

    #[error("unknown style `{0}`")]
    /// A style was requested that isn't present in the merged registry
    UnknownStyle(String),

    #[error("style `{style}` inherits from unknown style `{parent}`")]
    /// A style names a parent that doesn't exist in the merged registry
    UnknownParentStyle { style: String, parent: String },

    #[error("cyclic style inheritance: {}", .0.join(" -> "))]
    /// Following the parent chain revisited a style
    CyclicInheritance(Vec<String>),

    #[error("style `{style}` inherits through {depth} levels, more than the allowed maximum")]
    /// The parent chain is longer than the registry allows
    InheritanceTooDeep { style: String, depth: usize },

    #[error("invalid pagesize: {0}")]
    /// A named page size preset couldn't be found
    UnknownPagesize(String),

    #[error("invalid geometry: {0}")]
    /// The page geometry leaves no room for content
    InvalidGeometry(String),

    #[error("font family `{0}` is not registered")]
    /// A style or lookup referred to a font family that was never registered
    UnknownFont(String),

    #[error("font family `{family}` has no {variant} variant")]
    /// A variant was requested that the family lacks, and the family has no normal variant
    UnknownFontVariant {
        family: String,
        variant: crate::FontVariant,
    },

    #[error(
        "font {family} must have a normal variant which is an existing file ({})",
        .path.display()
    )]
    /// A font file declared in a template doesn't exist
    MissingFontFile {
        family: String,
        path: std::path::PathBuf,
    },

    #[error("font families `{0}` and `{1}` are both marked as the default")]
    /// More than one font family claimed to be the default
    MultipleDefaultFonts(String, String),

    #[error("unknown option `{0}`")]
    /// An element option key isn't recognized
    UnknownOption(String),

    #[error("invalid value for option `{key}`: {reason}")]
    /// An element option key is recognized but its value isn't
    InvalidOption { key: String, reason: String },

    #[error("invalid colour: {0}")]
    /// A colour string couldn't be parsed
    InvalidColour(String),

    #[error("a font referenced by the document is missing from the font registry")]
    /// The renderer was handed a face id that doesn't belong to the registry
    FontMissing,

    #[error("failed to render element {index}: {source}")]
    /// Rendering failed while laying out the element at `index`
    Render {
        index: usize,
        #[source]
        source: Box<PDFError>,
    },
}
