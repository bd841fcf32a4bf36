//! Pre-defined page sizes for common paper formats.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height.
//! Use the [`PageOrientation`](crate::pagesize::PageOrientation) trait to convert between
//! portrait and landscape.
//!
//! # Available Sizes
//!
//! ## North American
//! `LETTER`, `HALF_LETTER`, `JUNIOR_LEGAL`, `LEGAL`, `TABLOID`, `LEDGER`
//!
//! ## ANSI
//! `ANSI_A` through `ANSI_E`
//!
//! ## ISO A-Series
//! `A0` through `A6`
//!
//! ## ISO B-Series
//! `B4`, `B5`
//!
//! ## Traditional
//! `FOLIO`, `QUARTO`, `OCTAVO`
//!
//! Templates usually refer to sizes by name, see [`from_name`](crate::pagesize::from_name).
//!
//! # Example
//!
//! ```
//! use pdf_flow::pagesize::{self, PageOrientation};
//!
//! let a5 = pagesize::from_name("a5").expect("A5 is a known size");
//! assert_eq!(a5, pagesize::A5);
//!
//! // convert to landscape
//! let landscape = pagesize::A4.landscape();
//! assert!(landscape.0 > landscape.1);
//! ```

use crate::{units::*, PDFError};

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

// north american sizes
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const HALF_LETTER: PageSize = (Pt(5.5 * 72.0), Pt(8.5 * 72.0));
pub const JUNIOR_LEGAL: PageSize = (Pt(5.0 * 72.0), Pt(8.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(13.0 * 72.0));
pub const TABLOID: PageSize = (Pt(11.0 * 72.0), Pt(17.0 * 72.0));
pub const LEDGER: PageSize = (Pt(17.0 * 72.0), Pt(11.0 * 72.0));

// ansi sizes
pub const ANSI_A: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const ANSI_B: PageSize = (Pt(11.0 * 72.0), Pt(17.0 * 72.0));
pub const ANSI_C: PageSize = (Pt(17.0 * 72.0), Pt(22.0 * 72.0));
pub const ANSI_D: PageSize = (Pt(22.0 * 72.0), Pt(34.0 * 72.0));
pub const ANSI_E: PageSize = (Pt(34.0 * 72.0), Pt(44.0 * 72.0));

// traditional sizes
pub const FOLIO: PageSize = (Pt(12.0 * 72.0), Pt(19.0 * 72.0));
pub const QUARTO: PageSize = (Pt(9.5 * 72.0), Pt(12.0 * 72.0));
pub const OCTAVO: PageSize = (Pt(6.0 * 72.0), Pt(9.0 * 72.0));

// iso a-series (converted from mm to points)
pub const A0: PageSize = (Pt(841.0 * 72.0 / 25.4), Pt(1189.0 * 72.0 / 25.4));
pub const A1: PageSize = (Pt(594.0 * 72.0 / 25.4), Pt(841.0 * 72.0 / 25.4));
pub const A2: PageSize = (Pt(420.0 * 72.0 / 25.4), Pt(594.0 * 72.0 / 25.4));
pub const A3: PageSize = (Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));
pub const A6: PageSize = (Pt(105.0 * 72.0 / 25.4), Pt(148.0 * 72.0 / 25.4));

// iso b-series
pub const B4: PageSize = (Pt(250.0 * 72.0 / 25.4), Pt(353.0 * 72.0 / 25.4));
pub const B5: PageSize = (Pt(176.0 * 72.0 / 25.4), Pt(250.0 * 72.0 / 25.4));

/// Resolve a named preset such as `"A4"` or `"letter"` to its dimensions. Names are
/// matched case-insensitively, and `-`, `_` and spaces are ignored so that
/// `"half-letter"`, `"HALF_LETTER"` and `"Half Letter"` all name the same size.
pub fn from_name(name: &str) -> Result<PageSize, PDFError> {
    let key: String = name
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let size = match key.as_str() {
        "LETTER" => LETTER,
        "HALFLETTER" => HALF_LETTER,
        "JUNIORLEGAL" => JUNIOR_LEGAL,
        "LEGAL" => LEGAL,
        "TABLOID" => TABLOID,
        "LEDGER" => LEDGER,
        "ANSIA" => ANSI_A,
        "ANSIB" => ANSI_B,
        "ANSIC" => ANSI_C,
        "ANSID" => ANSI_D,
        "ANSIE" => ANSI_E,
        "FOLIO" => FOLIO,
        "QUARTO" => QUARTO,
        "OCTAVO" => OCTAVO,
        "A0" => A0,
        "A1" => A1,
        "A2" => A2,
        "A3" => A3,
        "A4" => A4,
        "A5" => A5,
        "A6" => A6,
        "B4" => B4,
        "B5" => B5,
        _ => return Err(PDFError::UnknownPagesize(name.to_string())),
    };
    Ok(size)
}

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_names_case_insensitively() {
        assert_eq!(from_name("A4").unwrap(), A4);
        assert_eq!(from_name("LETTER").unwrap(), LETTER);
        assert_eq!(from_name("letter").unwrap(), LETTER);
        assert_eq!(from_name("half-letter").unwrap(), HALF_LETTER);
        assert_eq!(from_name("ANSI_C").unwrap(), ANSI_C);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = from_name("invalid").unwrap_err();
        assert!(matches!(err, PDFError::UnknownPagesize(ref n) if n == "invalid"));
        assert_eq!(err.to_string(), "invalid pagesize: invalid");
    }

    #[test]
    fn a4_matches_iso_dimensions() {
        assert!((A4.0 .0 - 595.2756).abs() < 0.001);
        assert!((A4.1 .0 - 841.8898).abs() < 0.001);
    }

    #[test]
    fn orientation_swaps_axes() {
        assert_eq!(A4.landscape(), (A4.1, A4.0));
        assert_eq!(A4.landscape().portrait(), A4);
        assert_eq!(LEDGER.portrait(), TABLOID);
    }
}
