use crate::units::Pt;
use serde::Deserialize;

/// Margins are the blank space kept clear between the page edge and the content frames.
/// The renderer never places content outside of them; they are also written to each page
/// as its `ArtBox` in the generated PDF
#[derive(Debug, Default, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl<D: Into<Pt>>(top: D, right: D, bottom: D, left: D) -> Margins {
        Margins {
            top: top.into(),
            right: right.into(),
            bottom: bottom.into(),
            left: left.into(),
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric<D: Into<Pt>>(vertical: D, horizontal: D) -> Margins {
        let vertical: Pt = vertical.into();
        let horizontal: Pt = horizontal.into();
        Margins {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::all(Pt(0.0))
    }

    /// Total horizontal space taken up by the left and right margins
    pub fn horizontal(&self) -> Pt {
        self.left + self.right
    }

    /// Total vertical space taken up by the top and bottom margins
    pub fn vertical(&self) -> Pt {
        self.top + self.bottom
    }
}

impl<D: Into<Pt>> From<(D, D, D, D)> for Margins {
    fn from((top, right, bottom, left): (D, D, D, D)) -> Self {
        Margins::trbl(top, right, bottom, left)
    }
}
