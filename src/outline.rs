use crate::{
    render::refs::{ObjectReferences, RefType},
    Pt,
};
use pdf_writer::{Finish, Name, Null, Pdf, Ref, TextStr};

/// Entries deeper than this start out collapsed in a viewer's bookmark panel
pub const OPEN_LEVELS: u8 = 2;

/// A bookmark pointing at one element of a document
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    /// Heading level, starting at 1
    pub level: u8,
    pub title: String,
    /// Index of the element in the document's element sequence
    pub element: usize,
}

impl OutlineEntry {
    pub fn is_open(&self) -> bool {
        self.level <= OPEN_LEVELS
    }
}

/// Where an element ended up once laid out
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Anchor {
    pub page: usize,
    pub top: Pt,
    pub left: Pt,
}

/// The heading hierarchy of a document, in document order
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Outline {
    entries: Vec<OutlineEntry>,
}

impl Outline {
    pub fn new() -> Outline {
        Outline::default()
    }

    pub fn add<S: ToString>(&mut self, level: u8, title: S, element: usize) {
        self.entries.push(OutlineEntry {
            level: level.max(1),
            title: title.to_string(),
            element,
        });
    }

    pub fn entries(&self) -> &[OutlineEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutlineEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    /// Point every entry targeting `element` or anything after it at `element` itself
    pub(crate) fn retarget_from(&mut self, element: usize) {
        for entry in self.entries.iter_mut().filter(|e| e.element >= element) {
            entry.element = element;
        }
    }

    /// The parent entry of each entry: the closest earlier entry with a lower level. Level
    /// jumps (an h3 straight under an h1) simply nest under whatever is above.
    pub fn parents(&self) -> Vec<Option<usize>> {
        let mut stack: Vec<usize> = Vec::new();
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                while let Some(&top) = stack.last() {
                    if self.entries[top].level >= entry.level {
                        stack.pop();
                    } else {
                        break;
                    }
                }
                let parent = stack.last().copied();
                stack.push(i);
                parent
            })
            .collect()
    }

    fn children(&self, parents: &[Option<usize>], of: Option<usize>) -> Vec<usize> {
        parents
            .iter()
            .enumerate()
            .filter(|(_, &parent)| parent == of)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of descendants a viewer shows when `of` is expanded
    fn visible(&self, parents: &[Option<usize>], of: Option<usize>) -> i32 {
        self.children(parents, of)
            .into_iter()
            .map(|child| {
                1 + if self.entries[child].is_open() {
                    self.visible(parents, Some(child))
                } else {
                    0
                }
            })
            .sum()
    }

    /// Write the outline tree. `anchor` maps an element index to where it was placed;
    /// entries whose element never made it onto a page are skipped.
    pub(crate) fn write<F>(&self, refs: &mut ObjectReferences, anchor: F, writer: &mut Pdf)
    where
        F: Fn(usize) -> Option<(Ref, Anchor)>,
    {
        let outline = Outline {
            entries: self
                .entries
                .iter()
                .filter(|entry| anchor(entry.element).is_some())
                .cloned()
                .collect(),
        };
        if outline.is_empty() {
            return;
        }

        let outlines_id = refs.gen(RefType::Outlines);
        let ids: Vec<Ref> = (0..outline.len())
            .map(|i| refs.gen(RefType::OutlineEntry(i)))
            .collect();
        let parents = outline.parents();

        let top_level = outline.children(&parents, None);
        let mut root = writer.outline(outlines_id);
        if let (Some(&first), Some(&last)) = (top_level.first(), top_level.last()) {
            root.first(ids[first]);
            root.last(ids[last]);
        }
        root.count(outline.visible(&parents, None));
        root.finish();

        for (i, entry) in outline.entries.iter().enumerate() {
            let siblings = outline.children(&parents, parents[i]);
            let position = siblings.iter().position(|&s| s == i).unwrap_or(0);
            let children = outline.children(&parents, Some(i));

            let mut item = writer.outline_item(ids[i]);
            item.title(TextStr(entry.title.as_str()));
            item.parent(parents[i].map(|p| ids[p]).unwrap_or(outlines_id));
            if position > 0 {
                item.prev(ids[siblings[position - 1]]);
            }
            if let Some(&next) = siblings.get(position + 1) {
                item.next(ids[next]);
            }
            if let (Some(&first), Some(&last)) = (children.first(), children.last()) {
                item.first(ids[first]);
                item.last(ids[last]);
                let visible = outline.visible(&parents, Some(i));
                item.count(if entry.is_open() { visible } else { -visible });
            }

            if let Some((page, anchor)) = anchor(entry.element) {
                item.insert(Name(b"Dest"))
                    .array()
                    .item(page)
                    .item(Name(b"XYZ"))
                    .item(anchor.left.0)
                    .item(anchor.top.0)
                    .item(Null);
            }
            item.finish();
        }
    }
}
