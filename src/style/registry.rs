use super::{Options, ResolvedAttributes, Style};
use crate::PDFError;
use std::collections::{HashMap, HashSet};

/// Longest permitted parent chain, counting the style itself
pub const MAX_INHERITANCE_DEPTH: usize = 8;

/// A validated set of named styles.
///
/// The inheritance graph is checked once, when the registry is built: every parent must
/// exist, no chain may revisit a style, and no chain may be deeper than
/// [MAX_INHERITANCE_DEPTH]. Each style is then flattened into a [ResolvedAttributes]
/// record, so that resolving a style later is a lookup plus an overlay of the call-site
/// [Options].
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    defaults: ResolvedAttributes,
    styles: Vec<Style>,
    index: HashMap<String, usize>,
    resolved: Vec<ResolvedAttributes>,
}

impl StyleRegistry {
    /// Build a registry from scratch. If several styles share a name, the last one
    /// replaces the earlier ones entirely.
    pub fn build<I>(defaults: ResolvedAttributes, styles: I) -> Result<StyleRegistry, PDFError>
    where
        I: IntoIterator<Item = Style>,
    {
        let mut declared: Vec<Style> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for style in styles {
            match index.get(&style.name) {
                Some(&i) => declared[i] = style,
                None => {
                    index.insert(style.name.clone(), declared.len());
                    declared.push(style);
                }
            }
        }

        let resolved = declared
            .iter()
            .map(|style| flatten(&defaults, &declared, &index, style))
            .collect::<Result<Vec<ResolvedAttributes>, PDFError>>()?;

        log::debug!("built style registry with {} styles", declared.len());
        Ok(StyleRegistry {
            defaults,
            styles: declared,
            index,
            resolved,
        })
    }

    /// Build a new registry with `styles` layered on top of this one. Styles sharing a
    /// name with an existing style shadow it: nothing is merged from the replaced style.
    pub fn layer<I>(&self, styles: I) -> Result<StyleRegistry, PDFError>
    where
        I: IntoIterator<Item = Style>,
    {
        StyleRegistry::build(
            self.defaults.clone(),
            self.styles.iter().cloned().chain(styles),
        )
    }

    /// The fully resolved attributes of `name`, with `overrides` applied last
    pub fn resolve(&self, name: &str, overrides: &Options) -> Result<ResolvedAttributes, PDFError> {
        let i = *self
            .index
            .get(name)
            .ok_or_else(|| PDFError::UnknownStyle(name.to_string()))?;
        log::trace!("resolving style `{name}` with overrides {overrides:?}");

        let mut attributes = self.resolved[i].clone();
        overrides.apply(&mut attributes);
        Ok(attributes)
    }

    /// Resolve `name` if it is registered, otherwise apply `overrides` to the hard defaults
    pub fn resolve_or_defaults(&self, name: &str, overrides: &Options) -> ResolvedAttributes {
        self.resolve(name, overrides).unwrap_or_else(|_| {
            let mut attributes = self.defaults.clone();
            overrides.apply(&mut attributes);
            attributes
        })
    }

    /// The attributes a style starts from before any style in its chain applies
    pub fn defaults(&self) -> &ResolvedAttributes {
        &self.defaults
    }

    /// The style as declared, without inherited attributes
    pub fn get(&self, name: &str) -> Option<&Style> {
        self.index.get(name).map(|&i| &self.styles[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Style names in the order they were first declared
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.iter().map(|style| style.name.as_str())
    }

    /// Every style alongside its flattened attributes
    pub fn iter(&self) -> impl Iterator<Item = (&Style, &ResolvedAttributes)> {
        self.styles.iter().zip(self.resolved.iter())
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Walk from `style` up to its root, then overlay each level back down onto the defaults
fn flatten(
    defaults: &ResolvedAttributes,
    styles: &[Style],
    index: &HashMap<String, usize>,
    style: &Style,
) -> Result<ResolvedAttributes, PDFError> {
    let mut chain: Vec<&Style> = vec![style];
    let mut seen: HashSet<&str> = HashSet::from([style.name.as_str()]);

    let mut current = style;
    while let Some(parent) = current.parent.as_deref() {
        let &i = index.get(parent).ok_or_else(|| PDFError::UnknownParentStyle {
            style: current.name.clone(),
            parent: parent.to_string(),
        })?;
        let next = &styles[i];

        if !seen.insert(next.name.as_str()) {
            let mut names: Vec<String> = chain.iter().map(|s| s.name.clone()).collect();
            names.push(next.name.clone());
            return Err(PDFError::CyclicInheritance(names));
        }
        chain.push(next);
        if chain.len() > MAX_INHERITANCE_DEPTH {
            return Err(PDFError::InheritanceTooDeep {
                style: style.name.clone(),
                depth: chain.len(),
            });
        }
        current = next;
    }

    let mut resolved = defaults.clone();
    for level in chain.iter().rev() {
        level.attributes.overlay(&mut resolved);
    }
    Ok(resolved)
}
