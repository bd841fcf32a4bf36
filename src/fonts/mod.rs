//! Font families and the registry that maps a family name and variant onto a concrete face.
//!
//! Every registry starts out knowing the built-in `Helvetica` and `Courier` families;
//! templates add their own TrueType / OpenType families on top of those. Exactly one family
//! is the document default, which is `Helvetica` unless a template marks one of its own.

mod builtin;
mod embedded;

pub use builtin::BuiltinFont;
pub use embedded::Font;

use crate::{render::refs::ObjectReferences, PDFError, Pt};
use id_arena::{Arena, Id};
use pdf_writer::Pdf;
use serde::Deserialize;
use std::{collections::BTreeMap, fmt, path::PathBuf};

/// The family used when no template font is marked as the default
pub const FALLBACK_FAMILY: &str = "Helvetica";

/// One of the (up to) four faces making up a font family
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontVariant {
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl FontVariant {
    pub fn from_flags(bold: bool, italic: bool) -> FontVariant {
        match (bold, italic) {
            (false, false) => FontVariant::Normal,
            (true, false) => FontVariant::Bold,
            (false, true) => FontVariant::Italic,
            (true, true) => FontVariant::BoldItalic,
        }
    }

    fn slot(self) -> usize {
        match self {
            FontVariant::Normal => 0,
            FontVariant::Bold => 1,
            FontVariant::Italic => 2,
            FontVariant::BoldItalic => 3,
        }
    }
}

impl fmt::Display for FontVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FontVariant::Normal => "normal",
            FontVariant::Bold => "bold",
            FontVariant::Italic => "italic",
            FontVariant::BoldItalic => "bold-italic",
        };
        write!(f, "{name}")
    }
}

/// A font family as declared by a template: a name plus the files for each variant.
/// Only the normal variant is required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FontFamily {
    pub name: String,
    pub normal: PathBuf,
    #[serde(default)]
    pub bold: Option<PathBuf>,
    #[serde(default)]
    pub italic: Option<PathBuf>,
    #[serde(default)]
    pub bold_italic: Option<PathBuf>,
    /// Whether this family replaces the built-in default family
    #[serde(default)]
    pub default: bool,
}

impl FontFamily {
    pub fn new<S: ToString, P: Into<PathBuf>>(name: S, normal: P) -> FontFamily {
        FontFamily {
            name: name.to_string(),
            normal: normal.into(),
            bold: None,
            italic: None,
            bold_italic: None,
            default: false,
        }
    }

    pub fn bold<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.bold = Some(path.into());
        self
    }

    pub fn italic<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.italic = Some(path.into());
        self
    }

    pub fn bold_italic<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.bold_italic = Some(path.into());
        self
    }

    /// Mark this family as the document default
    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }

    fn variant_paths(&self) -> [(FontVariant, Option<&PathBuf>); 4] {
        [
            (FontVariant::Normal, Some(&self.normal)),
            (FontVariant::Bold, self.bold.as_ref()),
            (FontVariant::Italic, self.italic.as_ref()),
            (FontVariant::BoldItalic, self.bold_italic.as_ref()),
        ]
    }
}

/// A single face that text can be set in: either a standard PDF font or an embedded one
#[derive(Debug)]
pub enum Typeface {
    Builtin(BuiltinFont),
    Embedded(Font),
}

impl Typeface {
    pub fn name(&self) -> String {
        match self {
            Typeface::Builtin(font) => font.base_font().to_string(),
            Typeface::Embedded(font) => font.name(),
        }
    }

    pub fn ascent(&self, size: Pt) -> Pt {
        match self {
            Typeface::Builtin(font) => font.ascent(size),
            Typeface::Embedded(font) => font.ascent(size),
        }
    }

    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        match self {
            Typeface::Builtin(font) => font.descent(size),
            Typeface::Embedded(font) => font.descent(size),
        }
    }

    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        match self {
            Typeface::Builtin(font) => font.width_of_text(text, size),
            Typeface::Embedded(font) => font.width_of_text(text, size),
        }
    }

    /// Encode text as the hex string a content stream's `Tj` operator expects for this face
    pub fn encode(&self, text: &str) -> String {
        match self {
            Typeface::Builtin(font) => font.encode(text),
            Typeface::Embedded(font) => font.encode(text),
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        match self {
            Typeface::Builtin(font) => font.write(refs, font_index, writer),
            Typeface::Embedded(font) => font.write(refs, font_index, writer),
        }
    }
}

/// Maps family names to their registered faces and tracks the default family
pub struct FontRegistry {
    pub faces: Arena<Typeface>,
    families: BTreeMap<String, [Option<Id<Typeface>>; 4]>,
    default_family: String,
}

impl fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontRegistry")
            .field("families", &self.families.keys().collect::<Vec<_>>())
            .field("default_family", &self.default_family)
            .finish()
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        FontRegistry::new()
    }
}

impl FontRegistry {
    /// Create a registry holding only the built-in families
    pub fn new() -> FontRegistry {
        let mut registry = FontRegistry {
            faces: Arena::new(),
            families: BTreeMap::new(),
            default_family: FALLBACK_FAMILY.to_string(),
        };
        for family in ["Helvetica", "Courier"] {
            if let Some(faces) = BuiltinFont::family(family) {
                let variants = [
                    FontVariant::Normal,
                    FontVariant::Bold,
                    FontVariant::Italic,
                    FontVariant::BoldItalic,
                ];
                for (variant, face) in variants.into_iter().zip(faces) {
                    registry.register(family, variant, Typeface::Builtin(face));
                }
            }
        }
        registry
    }

    /// Build a registry from a template's declared families, loading every font file.
    /// Fails if a normal variant file is missing, if any file can't be parsed, or if
    /// more than one family is marked as the default.
    pub fn from_families(families: &[FontFamily]) -> Result<FontRegistry, PDFError> {
        let mut defaults = families.iter().filter(|family| family.default);
        if let (Some(first), Some(second)) = (defaults.next(), defaults.next()) {
            return Err(PDFError::MultipleDefaultFonts(
                first.name.clone(),
                second.name.clone(),
            ));
        }

        let mut registry = FontRegistry::new();
        for family in families.iter() {
            registry.register_family(family)?;
        }
        Ok(registry)
    }

    /// Load and register all of a family's declared variants
    pub fn register_family(&mut self, family: &FontFamily) -> Result<(), PDFError> {
        if !family.normal.is_file() {
            return Err(PDFError::MissingFontFile {
                family: family.name.clone(),
                path: family.normal.clone(),
            });
        }

        for (variant, path) in family.variant_paths() {
            let Some(path) = path else {
                continue;
            };
            let font = Font::load_file(path)?;
            self.register(&family.name, variant, Typeface::Embedded(font));
        }

        if family.default {
            self.default_family = family.name.clone();
        }
        log::debug!(
            "registered font family `{}`{}",
            family.name,
            if family.default { " (default)" } else { "" }
        );
        Ok(())
    }

    /// Register a single face as the given variant of a family, replacing any face
    /// previously registered in that slot
    pub fn register<S: AsRef<str>>(
        &mut self,
        family: S,
        variant: FontVariant,
        face: Typeface,
    ) -> Id<Typeface> {
        let id = self.faces.alloc(face);
        let slots = self
            .families
            .entry(family.as_ref().to_string())
            .or_insert([None; 4]);
        slots[variant.slot()] = Some(id);
        id
    }

    /// Find the face for a family and variant. A missing variant falls back to the
    /// family's normal face; a family without a normal face is an error.
    pub fn resolve(&self, family: &str, variant: FontVariant) -> Result<Id<Typeface>, PDFError> {
        let slots = self
            .families
            .get(family)
            .ok_or_else(|| PDFError::UnknownFont(family.to_string()))?;

        if let Some(id) = slots[variant.slot()] {
            return Ok(id);
        }

        match slots[FontVariant::Normal.slot()] {
            Some(id) => {
                log::warn!(
                    "font family `{family}` has no {variant} variant, falling back to normal"
                );
                Ok(id)
            }
            None => Err(PDFError::UnknownFontVariant {
                family: family.to_string(),
                variant,
            }),
        }
    }

    pub fn default_family(&self) -> &str {
        &self.default_family
    }

    pub fn contains_family(&self, family: &str) -> bool {
        self.families.contains_key(family)
    }

    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }

    pub fn get(&self, id: Id<Typeface>) -> Option<&Typeface> {
        self.faces.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_builtin_families() {
        let registry = FontRegistry::new();
        assert_eq!(registry.default_family(), "Helvetica");
        assert!(registry.contains_family("Helvetica"));
        assert!(registry.contains_family("Courier"));
        assert_eq!(registry.families().count(), 2);

        let id = registry
            .resolve("Courier", FontVariant::BoldItalic)
            .unwrap();
        assert_eq!(registry.faces[id].name(), "Courier-BoldOblique");
    }

    #[test]
    fn unknown_family_is_an_error() {
        let registry = FontRegistry::new();
        assert!(matches!(
            registry.resolve("Lexend", FontVariant::Normal),
            Err(PDFError::UnknownFont(ref f)) if f == "Lexend"
        ));
    }

    #[test]
    fn missing_variants_fall_back_to_normal() {
        let mut registry = FontRegistry::new();
        let normal = registry.register(
            "Mono",
            FontVariant::Normal,
            Typeface::Builtin(BuiltinFont::Courier),
        );
        assert_eq!(registry.resolve("Mono", FontVariant::Bold).unwrap(), normal);
    }

    #[test]
    fn missing_normal_variant_is_an_error() {
        let mut registry = FontRegistry::new();
        registry.register(
            "Heavy",
            FontVariant::Bold,
            Typeface::Builtin(BuiltinFont::HelveticaBold),
        );
        assert!(registry.resolve("Heavy", FontVariant::Bold).is_ok());
        assert!(matches!(
            registry.resolve("Heavy", FontVariant::Italic),
            Err(PDFError::UnknownFontVariant {
                variant: FontVariant::Italic,
                ..
            })
        ));
    }

    #[test]
    fn declared_families_need_a_normal_file() {
        let families = [FontFamily::new("Lexend", "/no/such/Lexend-ExtraLight.ttf").as_default()];
        assert!(matches!(
            FontRegistry::from_families(&families),
            Err(PDFError::MissingFontFile { ref family, .. }) if family == "Lexend"
        ));
    }

    #[test]
    fn broken_font_files_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Broken.ttf");
        std::fs::write(&path, b"this is not a font").unwrap();

        let families = [FontFamily::new("Broken", &path)];
        assert!(matches!(
            FontRegistry::from_families(&families),
            Err(PDFError::FaceParsingError(_))
        ));
    }

    #[test]
    fn only_one_default_family() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Broken.ttf");
        std::fs::write(&path, b"this is not a font").unwrap();

        // the duplicate default is caught before any file is parsed
        let families = [
            FontFamily::new("A", &path).as_default(),
            FontFamily::new("B", &path).as_default(),
        ];
        let err = FontRegistry::from_families(&families).unwrap_err();
        assert!(matches!(
            err,
            PDFError::MultipleDefaultFonts(ref a, ref b) if a == "A" && b == "B"
        ));
    }
}
