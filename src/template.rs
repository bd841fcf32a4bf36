//! Reusable page and style configuration.
//!
//! A [Template] bundles the page [Geometry], the [FontRegistry] and a base
//! [StyleRegistry]. It is immutable once built, so a single template can be shared (via
//! [Arc](std::sync::Arc)) between any number of documents, including across threads.

use crate::{
    fonts::{FontFamily, FontRegistry},
    geometry::DEFAULT_COLUMN_GAP,
    layout::Margins,
    pagesize::{self, PageOrientation, PageSize},
    style::{sample_stylesheet, ResolvedAttributes, Style, StyleRegistry},
    Geometry, Mm, PDFError, Pt,
};
use serde::Deserialize;
use std::path::Path;

/// A page size given either as a preset name or as explicit dimensions
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PagesizeSpec {
    Named(String),
    Explicit { width: Pt, height: Pt },
}

impl Default for PagesizeSpec {
    fn default() -> Self {
        PagesizeSpec::Named("A4".to_string())
    }
}

impl From<PageSize> for PagesizeSpec {
    fn from((width, height): PageSize) -> Self {
        PagesizeSpec::Explicit { width, height }
    }
}

impl PagesizeSpec {
    pub fn resolve(&self) -> Result<PageSize, PDFError> {
        match self {
            PagesizeSpec::Named(name) => pagesize::from_name(name),
            PagesizeSpec::Explicit { width, height } => Ok((*width, *height)),
        }
    }
}

/// Everything a template is built from. Can be written out in TOML:
///
/// ```toml
/// pagesize = "Letter"
/// columns = 2
/// margins = { top = 72, right = 54, bottom = 72, left = 54 }
///
/// [[styles]]
/// name = "p"
/// parent = "normal"
/// alignment = "justify"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateConfig {
    pub pagesize: PagesizeSpec,
    /// Turn the page size sideways
    pub landscape: bool,
    pub margins: Margins,
    pub columns: usize,
    pub column_gap: Pt,
    pub fonts: Vec<FontFamily>,
    /// Start from the built-in sample stylesheet. When false only `styles` are registered.
    pub use_sample_stylesheet: bool,
    pub styles: Vec<Style>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        TemplateConfig {
            pagesize: PagesizeSpec::default(),
            landscape: false,
            margins: Margins::all(Mm(15.0)),
            columns: 1,
            column_gap: DEFAULT_COLUMN_GAP,
            fonts: Vec::new(),
            use_sample_stylesheet: true,
            styles: Vec::new(),
        }
    }
}

impl TemplateConfig {
    pub fn from_toml_str(source: &str) -> Result<TemplateConfig, PDFError> {
        Ok(toml::from_str(source)?)
    }

    /// Read a template configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<TemplateConfig, PDFError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loading template from {}", path.as_ref().display());
        TemplateConfig::from_toml_str(&source)
    }
}

/// Page geometry, fonts and styles shared by every document built from it
#[derive(Debug)]
pub struct Template {
    geometry: Geometry,
    fonts: FontRegistry,
    styles: StyleRegistry,
}

impl Template {
    /// Build a template, failing on the first configuration problem: an unknown page
    /// size, margins that leave no room, unloadable fonts, or a broken style graph.
    pub fn new(config: &TemplateConfig) -> Result<Template, PDFError> {
        let mut size = config.pagesize.resolve()?;
        if config.landscape {
            size = size.landscape();
        }
        let geometry = Geometry::new(size, config.margins, config.columns, config.column_gap)?;
        let fonts = FontRegistry::from_families(&config.fonts)?;

        let sample = if config.use_sample_stylesheet {
            sample_stylesheet()
        } else {
            Vec::new()
        };
        let styles = StyleRegistry::build(
            ResolvedAttributes::defaults(fonts.default_family()),
            sample.into_iter().chain(config.styles.iter().cloned()),
        )?;
        check_font_families(&styles, &fonts)?;

        log::debug!(
            "built template: {} columns on {}x{}pt pages, {} styles",
            geometry.columns,
            geometry.pagesize.0,
            geometry.pagesize.1,
            styles.len()
        );
        Ok(Template {
            geometry,
            fonts,
            styles,
        })
    }

    pub fn from_toml_str(source: &str) -> Result<Template, PDFError> {
        Template::new(&TemplateConfig::from_toml_str(source)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Template, PDFError> {
        Template::new(&TemplateConfig::load(path)?)
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    /// The merged sample and template styles
    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }
}

/// Every style must end up in a family the registry knows about
pub(crate) fn check_font_families(
    styles: &StyleRegistry,
    fonts: &FontRegistry,
) -> Result<(), PDFError> {
    for (style, resolved) in styles.iter() {
        if !fonts.contains_family(&resolved.font_family) {
            log::debug!(
                "style `{}` uses unregistered font family `{}`",
                style.name,
                resolved.font_family
            );
            return Err(PDFError::UnknownFont(resolved.font_family.clone()));
        }
    }
    Ok(())
}
